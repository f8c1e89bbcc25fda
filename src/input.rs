//! Debounced push buttons.
//!
//! Buttons are active low with pull-ups. A press is the high to low edge,
//! accepted only once the button's debounce window has passed since its last
//! accepted press. State sits behind `critical_section` mutexes so a `static`
//! [`Buttons`] can be sampled from an interrupt handler as well as the main loop.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use embedded_hal::digital::InputPin;
use heapless::Deque;

use crate::session::EventSource;

pub const CAPTURE_DEBOUNCE_MS: u64 = 500;
pub const SCROLL_DEBOUNCE_MS: u64 = 300;

/// Pending events held between polls.
const QUEUE_DEPTH: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    Capture,
    ScrollUp,
    ScrollDown,
}

/// Falling-edge detector with a hold-off window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debouncer {
    window_ms: u64,
    last_high: bool,
    last_press: Option<u64>,
}

impl Debouncer {
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_high: true,
            last_press: None,
        }
    }

    /// Feed the current line level. Returns `true` for an accepted press.
    pub fn update(&mut self, is_low: bool, now_ms: u64) -> bool {
        let falling = self.last_high && is_low;
        self.last_high = !is_low;
        if !falling {
            return false;
        }

        match self.last_press {
            Some(last) if now_ms.saturating_sub(last) <= self.window_ms => false,
            _ => {
                self.last_press = Some(now_ms);
                true
            }
        }
    }
}

// Button state
pub struct ButtonState<P> {
    pub input: Mutex<RefCell<Option<P>>>,
    debouncer: Mutex<Cell<Debouncer>>,
    pub name: &'static str,
}

impl<P> ButtonState<P> {
    pub const fn new(name: &'static str, debounce_ms: u64) -> Self {
        Self {
            input: Mutex::new(RefCell::new(None)),
            debouncer: Mutex::new(Cell::new(Debouncer::new(debounce_ms))),
            name,
        }
    }
}

impl<P: InputPin> ButtonState<P> {
    /// Hand the pin over; the line is assumed released at this point.
    pub fn attach(&self, pin: P) {
        critical_section::with(|cs| {
            self.input.borrow_ref_mut(cs).replace(pin);
            let mut d = self.debouncer.borrow(cs).get();
            d.last_high = true;
            self.debouncer.borrow(cs).set(d);
        });
    }

    /// Sample the line. A pin read error counts as released.
    pub fn poll(&self, now_ms: u64) -> bool {
        critical_section::with(|cs| {
            let mut binding = self.input.borrow_ref_mut(cs);
            let Some(pin) = binding.as_mut() else {
                return false;
            };
            let is_low = pin.is_low().unwrap_or(false);

            let mut d = self.debouncer.borrow(cs).get();
            let pressed = d.update(is_low, now_ms);
            self.debouncer.borrow(cs).set(d);

            if pressed {
                log::debug!("{} pressed at {} ms", self.name, now_ms);
            }
            pressed
        })
    }
}

/// Capture plus scroll up/down.
pub struct Buttons<P> {
    pub capture: ButtonState<P>,
    pub up: ButtonState<P>,
    pub down: ButtonState<P>,
    pending: Mutex<RefCell<Deque<ButtonEvent, QUEUE_DEPTH>>>,
}

impl<P> Buttons<P> {
    pub const fn new() -> Self {
        Self {
            capture: ButtonState::new("capture", CAPTURE_DEBOUNCE_MS),
            up: ButtonState::new("up", SCROLL_DEBOUNCE_MS),
            down: ButtonState::new("down", SCROLL_DEBOUNCE_MS),
            pending: Mutex::new(RefCell::new(Deque::new())),
        }
    }
}

impl<P> Default for Buttons<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin> Buttons<P> {
    pub fn attach(&self, capture: P, up: P, down: P) {
        self.capture.attach(capture);
        self.up.attach(up);
        self.down.attach(down);
    }

    /// Sample all three buttons and queue presses, capture first.
    pub fn sample(&self, now_ms: u64) {
        let presses = [
            (self.capture.poll(now_ms), ButtonEvent::Capture),
            (self.up.poll(now_ms), ButtonEvent::ScrollUp),
            (self.down.poll(now_ms), ButtonEvent::ScrollDown),
        ];

        critical_section::with(|cs| {
            let mut queue = self.pending.borrow_ref_mut(cs);
            for (pressed, event) in presses {
                if pressed && queue.push_back(event).is_err() {
                    log::warn!("button queue full, dropping {:?}", event);
                }
            }
        });
    }

    pub fn next_event(&self) -> Option<ButtonEvent> {
        critical_section::with(|cs| self.pending.borrow_ref_mut(cs).pop_front())
    }
}

impl<P: InputPin> EventSource for Buttons<P> {
    fn poll_event(&mut self, now_ms: u64) -> Option<ButtonEvent> {
        self.sample(now_ms);
        self.next_event()
    }
}

// Lets a `static` button set be polled from the main loop.
impl<P: InputPin> EventSource for &Buttons<P> {
    fn poll_event(&mut self, now_ms: u64) -> Option<ButtonEvent> {
        self.sample(now_ms);
        self.next_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockButton;

    #[test]
    fn press_fires_once_per_falling_edge() {
        let mut d = Debouncer::new(300);
        assert!(d.update(true, 1_000));
        // held down
        assert!(!d.update(true, 2_000));
        assert!(!d.update(false, 2_100));
        assert!(d.update(true, 2_200));
    }

    #[test]
    fn bounce_inside_window_is_ignored() {
        let mut d = Debouncer::new(300);
        assert!(d.update(true, 1_000));
        assert!(!d.update(false, 1_010));
        assert!(!d.update(true, 1_020));
        assert!(!d.update(false, 1_200));
        // exactly at the window edge is still a bounce
        assert!(!d.update(true, 1_300));
        assert!(!d.update(false, 1_305));
        assert!(d.update(true, 1_301 + 10));
    }

    #[test]
    fn unattached_button_never_fires() {
        let b: ButtonState<MockButton> = ButtonState::new("x", 10);
        assert!(!b.poll(100));
    }

    #[test]
    fn events_come_out_in_capture_up_down_order() {
        let (cap, cap_line) = MockButton::new();
        let (up, up_line) = MockButton::new();
        let (down, down_line) = MockButton::new();
        let mut buttons = Buttons::new();
        buttons.attach(cap, up, down);

        down_line.set(true);
        up_line.set(true);
        cap_line.set(true);

        assert_eq!(buttons.poll_event(1_000), Some(ButtonEvent::Capture));
        assert_eq!(buttons.next_event(), Some(ButtonEvent::ScrollUp));
        assert_eq!(buttons.next_event(), Some(ButtonEvent::ScrollDown));
        assert_eq!(buttons.poll_event(1_010), None);
    }

    #[test]
    fn each_button_uses_its_own_window() {
        let (cap, cap_line) = MockButton::new();
        let (up, up_line) = MockButton::new();
        let (down, _) = MockButton::new();
        let mut buttons = Buttons::new();
        buttons.attach(cap, up, down);

        let tap = |line: &std::rc::Rc<Cell<bool>>, buttons: &mut Buttons<MockButton>, t: u64| {
            line.set(true);
            let e = buttons.poll_event(t);
            line.set(false);
            buttons.sample(t + 1);
            e
        };

        assert_eq!(tap(&up_line, &mut buttons, 1_000), Some(ButtonEvent::ScrollUp));
        assert_eq!(tap(&up_line, &mut buttons, 1_250), None);
        assert_eq!(tap(&up_line, &mut buttons, 1_400), Some(ButtonEvent::ScrollUp));

        assert_eq!(tap(&cap_line, &mut buttons, 2_000), Some(ButtonEvent::Capture));
        assert_eq!(tap(&cap_line, &mut buttons, 2_400), None);
        assert_eq!(tap(&cap_line, &mut buttons, 2_600), Some(ButtonEvent::Capture));
    }
}
