//! Caption viewer firmware
//! ========================================
//! source ~/export-esp.sh
//! cargo run --release --features esp32s3
//! ========================================
//!
//! Shows a ready banner, then waits for buttons: CAPTURE runs the capture and
//! describe workflow, UP/DOWN scroll the last description one line at a time.
//! This board has no camera or network link fitted, so capture reports its
//! failure on screen.

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

// Define the application description, which is placed in a special section of the binary.
// This is used by the bootloader to verify the application.
esp_bootloader_esp_idf::esp_app_desc!();

use caption_lcd::{
    display::setup_display,
    input::Buttons,
    render::Renderer,
    session::{EventSource, ImageSource, SessionState, Viewer, VisionService},
    wiring::{init_board_pins, BoardPins},
};

use esp_backtrace as _;
use esp_hal::{
    delay::Delay,
    gpio::Input,
    main,
    timer::systimer::{SystemTimer, Unit},
    Config,
};

extern crate alloc;
use alloc::string::String;

static BUTTONS: Buttons<Input<'static>> = Buttons::new();

// Main loop pacing
const POLL_MS: u32 = 10;

fn now_ms() -> u64 {
    let t = SystemTimer::unit_value(Unit::Unit0);
    t.saturating_mul(1000) / SystemTimer::ticks_per_second()
}

struct NoCamera;

impl ImageSource for NoCamera {
    type Image = ();
    type Error = &'static str;

    fn capture(&mut self) -> Result<(), &'static str> {
        Err("no camera fitted")
    }
}

struct Offline;

impl VisionService<()> for Offline {
    type Error = &'static str;

    fn detect_orientation(&mut self, _image: &()) -> Result<String, &'static str> {
        Err("offline")
    }

    fn analyze(&mut self, _image: &()) -> Result<String, &'static str> {
        Err("offline")
    }

    fn describe(&mut self, _analysis: &str) -> Result<String, &'static str> {
        Err("offline")
    }
}

#[main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();

    // Initialize peripherals
    let peripherals = esp_hal::init(Config::default());

    // Canvas and frame buffers live on the PSRAM heap
    esp_alloc::psram_allocator!(&peripherals.PSRAM, psram);

    let BoardPins {
        btn_capture,
        btn_up,
        btn_down,
        display_pins,
    } = init_board_pins(peripherals);

    BUTTONS.attach(btn_capture, btn_up, btn_down);

    let mut delay = Delay::new();
    let (display, _backlight) = setup_display(display_pins, &mut delay);

    let mut viewer = Viewer::new(display, Renderer::default());
    if let Err(e) = viewer.show_ready() {
        log::error!("ready banner failed: {}", e);
    }

    let mut session = SessionState::default();
    let mut events = &BUTTONS;
    let mut camera = NoCamera;
    let mut vision = Offline;

    loop {
        let now = now_ms();
        while let Some(event) = events.poll_event(now) {
            log::info!("{:?} pressed", event);
            if let Err(e) = viewer.handle_event(&mut session, event, &mut camera, &mut vision) {
                log::error!("redraw failed: {}", e);
            }
        }
        delay.delay_millis(POLL_MS);
    }
}
