//! Word wrapping for a fixed pixel width.
//!
//! Paragraphs are split on `\n`. Words are added greedily while the measured
//! line still fits; a word that cannot fit on a line of its own is broken
//! between characters instead of overflowing.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::{Point, RgbColor},
    text::{renderer::TextRenderer, Baseline},
};

/// One display line. Empty lines stand for blank paragraphs.
pub type WrappedLine = String;

/// Pixel width of a string in the font used for drawing.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> u32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> u32,
{
    fn measure(&self, text: &str) -> u32 {
        self(text)
    }
}

/// Measures strings the way `Text` will render them with a mono font.
pub struct MonoMeasure<'a> {
    style: MonoTextStyle<'a, Rgb888>,
}

impl<'a> MonoMeasure<'a> {
    pub fn new(font: &'a MonoFont<'a>) -> Self {
        Self {
            style: MonoTextStyle::new(font, Rgb888::WHITE),
        }
    }
}

impl TextMeasure for MonoMeasure<'_> {
    fn measure(&self, text: &str) -> u32 {
        self.style
            .measure_string(text, Point::zero(), Baseline::Top)
            .bounding_box
            .size
            .width
    }
}

/// Ordered wrapped lines for one input text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutResult {
    lines: Vec<WrappedLine>,
}

impl LayoutResult {
    pub fn lines(&self) -> &[WrappedLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines from `start`, at most `count` of them.
    pub fn window(&self, start: usize, count: usize) -> &[WrappedLine] {
        let start = start.min(self.lines.len());
        let end = start.saturating_add(count).min(self.lines.len());
        &self.lines[start..end]
    }
}

/// Drop characters the Latin-1 glyph tables cannot draw.
pub fn sanitize_text(text: &str) -> String {
    text.chars().filter(|c| (*c as u32) < 256).collect()
}

/// Wrap `text` into lines no wider than `available_width` pixels.
///
/// Every produced line either measures `<= available_width` or is a single
/// character that is wider than the whole line on its own.
pub fn wrap(text: &str, available_width: u32, measure: &impl TextMeasure) -> LayoutResult {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = place_word(word, available_width, measure, &mut lines);
                continue;
            }

            let mut candidate = String::with_capacity(current.len() + 1 + word.len());
            candidate.push_str(&current);
            candidate.push(' ');
            candidate.push_str(word);

            if measure.measure(&candidate) <= available_width {
                current = candidate;
            } else {
                lines.push(mem::take(&mut current));
                current = place_word(word, available_width, measure, &mut lines);
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    LayoutResult { lines }
}

// Start a fresh line with `word`. Returns the still-open line; full pieces of
// an oversized word are pushed to `lines` directly.
fn place_word(
    word: &str,
    available_width: u32,
    measure: &impl TextMeasure,
    lines: &mut Vec<WrappedLine>,
) -> String {
    if measure.measure(word) <= available_width {
        return String::from(word);
    }

    let mut fragment = String::new();
    for ch in word.chars() {
        fragment.push(ch);
        if fragment.chars().nth(1).is_some() && measure.measure(&fragment) > available_width {
            fragment.pop();
            lines.push(mem::take(&mut fragment));
            fragment.push(ch);
        }
    }
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mono_font::ascii::FONT_6X10;
    use proptest::prelude::*;

    fn six_px(text: &str) -> u32 {
        text.chars().count() as u32 * 6
    }

    #[test]
    fn blank_paragraphs_become_empty_lines() {
        let layout = wrap("Hello\n\nWorld", 100, &six_px);
        assert_eq!(layout.lines(), ["Hello", "", "World"]);
    }

    #[test]
    fn whitespace_only_paragraph_is_blank() {
        let layout = wrap("a\n   \t\nb", 100, &six_px);
        assert_eq!(layout.lines(), ["a", "", "b"]);
    }

    #[test]
    fn words_move_to_next_line_when_full() {
        let layout = wrap("one two three four", 60, &six_px);
        assert_eq!(layout.lines(), ["one two", "three four"]);
    }

    #[test]
    fn oversized_word_is_broken_between_characters() {
        let layout = wrap("abcdefghijklmnopqrstuvwxyz", 60, &six_px);
        assert_eq!(layout.lines(), ["abcdefghij", "klmnopqrst", "uvwxyz"]);
    }

    #[test]
    fn words_continue_after_a_broken_word() {
        let layout = wrap("abcdefghijkl mn op", 60, &six_px);
        assert_eq!(layout.lines(), ["abcdefghij", "kl mn op"]);
    }

    #[test]
    fn glyph_wider_than_line_stays_alone() {
        let layout = wrap("abc", 4, &six_px);
        assert_eq!(layout.lines(), ["a", "b", "c"]);
    }

    #[test]
    fn empty_text_is_one_blank_line() {
        assert_eq!(wrap("", 50, &six_px).lines(), [""]);
    }

    #[test]
    fn sanitize_drops_characters_outside_latin1() {
        assert_eq!(sanitize_text("café ☕ ok"), "café  ok");
    }

    #[test]
    fn mono_measure_matches_font_advance() {
        let measure = MonoMeasure::new(&FONT_6X10);
        assert_eq!(measure.measure("abcd"), 24);
        assert_eq!(measure.measure(""), 0);
    }

    #[test]
    fn window_is_bounded_by_line_count() {
        let layout = wrap("a\nb\nc", 50, &six_px);
        assert_eq!(layout.window(1, 5), ["b", "c"]);
        assert!(layout.window(7, 2).is_empty());
    }

    proptest! {
        #[test]
        fn every_line_fits_or_is_a_single_char(
            text in "[a-zA-Z0-9 ,.\n]{0,240}",
            width in 1u32..160,
        ) {
            let layout = wrap(&text, width, &six_px);
            for line in layout.lines() {
                prop_assert!(six_px(line) <= width || line.chars().count() == 1);
            }
        }

        #[test]
        fn wrapping_is_deterministic(text in ".{0,200}", width in 1u32..160) {
            prop_assert_eq!(wrap(&text, width, &six_px), wrap(&text, width, &six_px));
        }

        #[test]
        fn no_printable_character_is_lost(text in "[a-z ]{0,120}", width in 1u32..90) {
            let layout = wrap(&text, width, &six_px);
            let kept: usize = layout.lines().iter().map(|l| l.chars().filter(|c| *c != ' ').count()).sum();
            let given = text.chars().filter(|c| *c != ' ').count();
            prop_assert_eq!(kept, given);
        }
    }
}
