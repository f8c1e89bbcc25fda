//! Scroll position over wrapped lines.

use core::ops::Range;

/// How many whole lines fit between the top and bottom padding.
///
/// Drawing and scrolling both take their viewport from here so the visible
/// window and the scroll bound never disagree.
pub const fn viewport_lines(area_height: u16, top_padding: u16, bottom_padding: u16, line_height: u16) -> usize {
    if line_height == 0 {
        return 0;
    }
    let usable = area_height.saturating_sub(top_padding).saturating_sub(bottom_padding);
    (usable / line_height) as usize
}

/// Visible window over `total_lines`; `position` is the first visible line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollState {
    position: usize,
    total_lines: usize,
    viewport_lines: usize,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            position: 0,
            total_lines: 0,
            viewport_lines: 1,
        }
    }
}

/// `position = max(0, min(requested, max(0, total_lines - viewport_lines)))`
pub fn clamp(requested: isize, total_lines: usize, viewport_lines: usize) -> ScrollState {
    ScrollState::clamp(requested, total_lines, viewport_lines)
}

impl ScrollState {
    /// A zero viewport is treated as one line.
    pub fn clamp(requested: isize, total_lines: usize, viewport_lines: usize) -> Self {
        let viewport_lines = viewport_lines.max(1);
        let max = total_lines.saturating_sub(viewport_lines);
        let position = if requested < 0 {
            0
        } else {
            (requested as usize).min(max)
        };
        Self {
            position,
            total_lines,
            viewport_lines,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn viewport_lines(&self) -> usize {
        self.viewport_lines
    }

    pub fn max_position(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_lines)
    }

    /// Returns `false` (and changes nothing) at the top.
    pub fn scroll_up(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Returns `false` (and changes nothing) at the bottom.
    pub fn scroll_down(&mut self) -> bool {
        if self.position + 1 > self.max_position() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Indices of the lines currently on screen.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.position + self.viewport_lines).min(self.total_lines);
        self.position.min(end)..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::wrap;
    use proptest::prelude::*;

    #[test]
    fn viewport_for_tall_panel_padding() {
        // 240 px tall, 20 top, 8 bottom, 16 px lines
        assert_eq!(viewport_lines(240, 20, 8, 16), 13);
        assert_eq!(viewport_lines(10, 20, 8, 16), 0);
        assert_eq!(viewport_lines(100, 0, 0, 0), 0);
    }

    #[test]
    fn clamp_limits_to_last_full_page() {
        let s = clamp(50, 10, 4);
        assert_eq!(s.position(), 6);
        assert_eq!(clamp(-3, 10, 4).position(), 0);
        assert_eq!(clamp(2, 3, 4).position(), 0);
    }

    #[test]
    fn scroll_up_at_top_is_noop() {
        let mut s = clamp(0, 10, 4);
        assert!(!s.scroll_up());
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn scroll_down_at_bottom_is_noop() {
        let mut s = clamp(6, 10, 4);
        assert!(!s.scroll_down());
        assert_eq!(s.position(), 6);
        assert!(s.scroll_up());
        assert!(s.scroll_down());
        assert_eq!(s.position(), 6);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut s = clamp(0, 2, 5);
        assert!(!s.scroll_down());
        assert_eq!(s.visible_range(), 0..2);
    }

    #[test]
    fn scrolled_window_shows_lines_three_to_five() {
        let six_px = |t: &str| t.chars().count() as u32 * 6;
        let layout = wrap(
            "Hello\n\nWorld, this is a long line that must wrap across multiple segments",
            100,
            &six_px,
        );
        assert_eq!(
            layout.lines(),
            [
                "Hello",
                "",
                "World, this is a",
                "long line that",
                "must wrap across",
                "multiple",
                "segments",
            ]
        );

        let s = clamp(2, layout.len(), 3);
        assert_eq!(s.visible_range(), 2..5);
        assert_eq!(
            layout.window(s.position(), s.viewport_lines()),
            ["World, this is a", "long line that", "must wrap across"]
        );

        let tail = clamp(9, layout.len(), 3);
        assert_eq!(layout.window(tail.position(), 3), ["must wrap across", "multiple", "segments"]);
    }

    proptest! {
        #[test]
        fn position_stays_in_bounds(requested in -1000isize..1000, total in 0usize..500, viewport in 1usize..50) {
            let s = clamp(requested, total, viewport);
            prop_assert!(s.position() <= total.saturating_sub(viewport));
        }

        #[test]
        fn stepping_never_leaves_bounds(total in 0usize..100, viewport in 1usize..20, steps in proptest::collection::vec(any::<bool>(), 0..60)) {
            let mut s = clamp(0, total, viewport);
            for down in steps {
                if down { s.scroll_down(); } else { s.scroll_up(); }
                prop_assert!(s.position() <= s.max_position());
            }
        }
    }
}
