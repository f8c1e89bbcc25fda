//! Text to panel: sanitise, wrap, clamp the scroll, draw, rotate, send.

use core::fmt;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::RgbColor,
};

use crate::canvas::{self, Canvas, TextArea};
use crate::font::{self, FontRequest};
use crate::layout::{self, LayoutResult, MonoMeasure};
use crate::panel::{DisplayController, PanelGeometry, CLEAR_COLOR};
use crate::rotate::{self, Rotation};
use crate::scroll::ScrollState;

/// 14 px Latin-1 text, 13 px as a second choice.
pub const DEFAULT_FONTS: &[FontRequest] = &[
    FontRequest::Latin1 { height: 14 },
    FontRequest::Latin1 { height: 13 },
];

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Tried in order, see [`font::select_font`].
    pub fonts: &'static [FontRequest],
    /// Applied on the left and the right.
    pub horizontal_padding: u16,
    pub top_padding: u16,
    pub bottom_padding: u16,
    /// Added to the font height to get the line pitch.
    pub line_spacing: u16,
    pub foreground: Rgb888,
    pub background: Rgb888,
    pub rotation: Rotation,
    /// Canvas size before rotation. `None` derives it from the panel so no
    /// resize is needed.
    pub canvas_size: Option<(u16, u16)>,
    /// Blank the panel to [`CLEAR_COLOR`] before each frame.
    pub clear_before_render: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fonts: DEFAULT_FONTS,
            horizontal_padding: 10,
            top_padding: 20,
            bottom_padding: 8,
            line_spacing: 2,
            foreground: Rgb888::WHITE,
            background: Rgb888::BLACK,
            rotation: Rotation::Deg270,
            canvas_size: None,
            clear_before_render: false,
        }
    }
}

#[derive(Debug)]
pub enum RenderError<E> {
    Display(E),
    /// Configured canvas has no pixels.
    EmptyCanvas,
    /// Paddings leave no room for a single line.
    NoTextArea,
}

impl<E: fmt::Debug> fmt::Display for RenderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Display(e) => write!(f, "display: {:?}", e),
            RenderError::EmptyCanvas => f.write_str("canvas has zero width or height"),
            RenderError::NoTextArea => f.write_str("paddings leave no room for a text line"),
        }
    }
}

pub struct Renderer {
    config: RenderConfig,
    font: &'static MonoFont<'static>,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        let font = font::select_font(config.fonts);
        Self { config, font }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    pub fn line_height(&self) -> u16 {
        self.font.character_size.height as u16 + self.config.line_spacing
    }

    /// Pre-rotation canvas size for a panel.
    pub fn canvas_size(&self, geometry: &PanelGeometry) -> (u16, u16) {
        self.config
            .canvas_size
            .unwrap_or_else(|| self.config.rotation.rotated_size(geometry.dimensions()))
    }

    pub fn text_area(&self) -> TextArea {
        TextArea {
            left_padding: self.config.horizontal_padding,
            top_padding: self.config.top_padding,
            bottom_padding: self.config.bottom_padding,
            line_height: self.line_height(),
        }
    }

    pub fn viewport_lines(&self, canvas_height: u16) -> usize {
        self.text_area().viewport_lines(canvas_height)
    }

    pub fn available_width(&self, canvas_width: u16) -> u32 {
        canvas_width.saturating_sub(self.config.horizontal_padding.saturating_mul(2)) as u32
    }

    pub fn layout(&self, text: &str, canvas_width: u16) -> LayoutResult {
        let clean = layout::sanitize_text(text);
        layout::wrap(&clean, self.available_width(canvas_width), &MonoMeasure::new(self.font))
    }

    /// Draw the scrolled window of `lines` onto a fresh canvas.
    pub fn compose(&self, lines: &LayoutResult, scroll: &ScrollState, (width, height): (u16, u16)) -> Canvas {
        let mut canvas = Canvas::new(width, height, self.config.background);
        let style = MonoTextStyle::new(self.font, self.config.foreground);
        let visible = lines.window(scroll.position(), scroll.viewport_lines());
        canvas::draw_lines(&mut canvas, visible, &self.text_area(), style);
        canvas
    }

    /// Render `text` scrolled to `requested` (clamped) and push it to the
    /// panel. Returns the scroll state actually shown.
    pub fn render<D: DisplayController>(
        &self,
        display: &mut D,
        text: &str,
        requested: isize,
    ) -> Result<ScrollState, RenderError<D::Error>> {
        let geometry = display.geometry();
        let (width, height) = self.canvas_size(&geometry);
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyCanvas);
        }

        let viewport = self.viewport_lines(height);
        if viewport == 0 {
            return Err(RenderError::NoTextArea);
        }

        let lines = self.layout(text, width);
        let scroll = ScrollState::clamp(requested, lines.len(), viewport);
        let canvas = self.compose(&lines, &scroll, (width, height));
        let frame = rotate::to_display_frame(&canvas, self.config.rotation, geometry.dimensions());

        if self.config.clear_before_render {
            display.clear(CLEAR_COLOR).map_err(RenderError::Display)?;
        }
        display.show_frame(&frame).map_err(RenderError::Display)?;

        log::info!(
            "rendered {} lines, showing {:?} of {}",
            lines.len(),
            scroll.visible_range(),
            scroll.total_lines()
        );
        Ok(scroll)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
