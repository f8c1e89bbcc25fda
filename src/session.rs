//! The capture and scroll session that drives the viewer.
//!
//! Camera and vision back-ends are reached through [`ImageSource`] and
//! [`VisionService`]; button presses arrive from an [`EventSource`]. The
//! [`Viewer`] owns the panel and turns each event into at most a few redraws.

use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::input::ButtonEvent;
use crate::layout::sanitize_text;
use crate::panel::{DisplayController, CLEAR_COLOR};
use crate::render::{RenderError, Renderer};
use crate::rotate::Rotation;
use crate::scroll::ScrollState;

pub const READY_TEXT: &str = "Image Analyzer Ready\nPress CAPTURE button to take a photo";
pub const CAPTURING_TEXT: &str = "Capturing image...";
pub const DETECTING_TEXT: &str = "Detecting orientation...";
pub const CAPTURE_FAILED_TEXT: &str = "Failed to capture image. Please try again.";
pub const ANALYZING_TEXT: &str = "Analyzing image content...";
pub const GENERATING_TEXT: &str = "Generating description...";

pub trait ImageSource {
    type Image;
    type Error: fmt::Display;

    fn capture(&mut self) -> Result<Self::Image, Self::Error>;

    /// Turn the image clockwise so its content is upright. Sources that
    /// cannot rotate return the image unchanged.
    fn reorient(&mut self, image: Self::Image, rotation: Rotation) -> Result<Self::Image, Self::Error> {
        let _ = rotation;
        Ok(image)
    }
}

pub trait VisionService<I> {
    type Error: fmt::Display;

    /// Free-form reply that mentions the clockwise angle needed, e.g. "90".
    fn detect_orientation(&mut self, image: &I) -> Result<String, Self::Error>;

    /// Plain description of what is in the image.
    fn analyze(&mut self, image: &I) -> Result<String, Self::Error>;

    /// Reader-facing text built from an analysis.
    fn describe(&mut self, analysis: &str) -> Result<String, Self::Error>;
}

pub trait EventSource {
    fn poll_event(&mut self, now_ms: u64) -> Option<ButtonEvent>;
}

/// Angle from an orientation reply: all digits concatenated, anything other
/// than 0, 90, 180 or 270 means upright.
pub fn parse_orientation(reply: &str) -> Rotation {
    let mut angle: u32 = 0;
    let mut seen = false;
    for d in reply.chars().filter_map(|c| c.to_digit(10)) {
        seen = true;
        angle = match angle.checked_mul(10).and_then(|a| a.checked_add(d)) {
            Some(a) => a,
            None => return Rotation::Deg0,
        };
    }

    match (seen, angle) {
        (true, 90) => Rotation::Deg90,
        (true, 180) => Rotation::Deg180,
        (true, 270) => Rotation::Deg270,
        _ => Rotation::Deg0,
    }
}

/// What survives between events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    description: Option<String>,
    scroll: ScrollState,
}

impl SessionState {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }
}

pub struct Viewer<D> {
    display: D,
    renderer: Renderer,
}

impl<D: DisplayController> Viewer<D> {
    pub fn new(display: D, renderer: Renderer) -> Self {
        Self { display, renderer }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn show_status(&mut self, text: &str) -> Result<ScrollState, RenderError<D::Error>> {
        log::info!("status: {}", text);
        self.renderer.render(&mut self.display, text, 0)
    }

    pub fn show_ready(&mut self) -> Result<ScrollState, RenderError<D::Error>> {
        self.show_status(READY_TEXT)
    }

    /// Apply one button event. Returns whether the panel was redrawn.
    pub fn handle_event<C, V>(
        &mut self,
        session: &mut SessionState,
        event: ButtonEvent,
        camera: &mut C,
        vision: &mut V,
    ) -> Result<bool, RenderError<D::Error>>
    where
        C: ImageSource,
        V: VisionService<C::Image>,
    {
        match event {
            ButtonEvent::Capture => {
                self.capture_and_describe(session, camera, vision)?;
                Ok(true)
            }
            ButtonEvent::ScrollUp => self.scroll(session, ScrollState::scroll_up),
            ButtonEvent::ScrollDown => self.scroll(session, ScrollState::scroll_down),
        }
    }

    /// Blank the panel and hand it back.
    pub fn shutdown(mut self) -> Result<D, D::Error> {
        self.display.clear(CLEAR_COLOR)?;
        log::info!("viewer shut down");
        Ok(self.display)
    }

    fn scroll(
        &mut self,
        session: &mut SessionState,
        step: fn(&mut ScrollState) -> bool,
    ) -> Result<bool, RenderError<D::Error>> {
        let Some(text) = session.description.as_deref() else {
            return Ok(false);
        };
        let mut next = session.scroll;
        if !step(&mut next) {
            return Ok(false);
        }

        session.scroll = self
            .renderer
            .render(&mut self.display, text, next.position() as isize)?;
        log::debug!("scrolled to line {}", session.scroll.position());
        Ok(true)
    }

    fn capture_and_describe<C, V>(
        &mut self,
        session: &mut SessionState,
        camera: &mut C,
        vision: &mut V,
    ) -> Result<(), RenderError<D::Error>>
    where
        C: ImageSource,
        V: VisionService<C::Image>,
    {
        // the old description stays scrollable if this capture fails
        let kept = session.scroll;
        session.scroll = ScrollState::clamp(0, kept.total_lines(), kept.viewport_lines());

        self.show_status(CAPTURING_TEXT)?;
        let image = match camera.capture() {
            Ok(image) => image,
            Err(e) => {
                log::warn!("capture failed: {}", e);
                self.show_status(CAPTURE_FAILED_TEXT)?;
                return Ok(());
            }
        };

        self.show_status(DETECTING_TEXT)?;
        let rotation = match vision.detect_orientation(&image) {
            Ok(reply) => parse_orientation(&sanitize_text(&reply)),
            Err(e) => {
                log::warn!("orientation detection failed: {}", e);
                Rotation::Deg0
            }
        };

        let image = if rotation == Rotation::Deg0 {
            image
        } else {
            log::info!("rotating capture by {} degrees", rotation.degrees());
            match camera.reorient(image, rotation) {
                Ok(image) => image,
                Err(e) => {
                    log::warn!("rotating capture failed: {}", e);
                    self.show_status(CAPTURE_FAILED_TEXT)?;
                    return Ok(());
                }
            }
        };

        self.show_status(ANALYZING_TEXT)?;
        let description = match vision.analyze(&image) {
            Ok(analysis) => {
                log::debug!("analysis: {}", analysis);
                self.show_status(GENERATING_TEXT)?;
                match vision.describe(&analysis) {
                    Ok(text) => text,
                    Err(e) => format!("Error generating description: {}", e),
                }
            }
            Err(e) => format!("Error analyzing image: {}", e),
        };

        session.scroll = self.renderer.render(&mut self.display, &description, 0)?;
        session.description = Some(description);
        Ok(())
    }
}
