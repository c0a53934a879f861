//! Input handling for the two board buttons
//!
//! Both buttons are active low with the internal pull-up enabled. The pins are
//! polled from the main loop, there is no interrupt path.

use anyhow::{anyhow, Result};
use embedded_hal::digital::InputPin;
use log::debug;

// Re-export the public types
pub mod types;
pub use types::*;

// Button configuration
const DEBOUNCE_MS: u32 = 50; // Debounce time in milliseconds
const LONG_PRESS_MS: u32 = 1000; // Long press duration in milliseconds

/// Both buttons of the board
pub struct Buttons<P1, P2> {
    one: ButtonHandler<P1>,
    two: ButtonHandler<P2>,
}

impl<P1: InputPin, P2: InputPin> Buttons<P1, P2> {
    pub fn new(one: P1, two: P2) -> Self {
        Self {
            one: ButtonHandler::new(Button::One, one),
            two: ButtonHandler::new(Button::Two, two),
        }
    }

    /// Sample both buttons, `now_ms` is a monotonic millisecond counter
    pub fn poll(&mut self, now_ms: u32) -> Result<Vec<ButtonEvent>> {
        let mut events = Vec::new();
        events.extend(self.one.update(now_ms)?);
        events.extend(self.two.update(now_ms)?);
        for event in &events {
            debug!("{}", event);
        }
        Ok(events)
    }
}

/// Debounce and long press state of one button
pub struct ButtonHandler<P> {
    button: Button,
    pin: P,
    last_state: ButtonState,
    last_change: u32,
    long_press_sent: bool,
}

impl<P: InputPin> ButtonHandler<P> {
    pub fn new(button: Button, pin: P) -> Self {
        Self {
            button,
            pin,
            last_state: ButtonState::Released,
            last_change: 0,
            long_press_sent: false,
        }
    }

    /// Sample the pin and report at most one event
    pub fn update(&mut self, current_time: u32) -> Result<Option<ButtonEvent>> {
        let low = self
            .pin
            .is_low()
            .map_err(|e| anyhow!("Reading {} failed: {:?}", self.button, e))?;
        let current_state = if low {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        };
        let elapsed = current_time.wrapping_sub(self.last_change);

        // Check for state change
        if current_state != self.last_state {
            if elapsed < DEBOUNCE_MS {
                return Ok(None);
            }
            self.last_change = current_time;
            self.last_state = current_state;
            self.long_press_sent = false;

            return Ok(Some(match current_state {
                ButtonState::Pressed => ButtonEvent::Pressed(self.button),
                ButtonState::Released => ButtonEvent::Released(self.button),
            }));
        }

        // Long press detection, once per press
        if current_state == ButtonState::Pressed && !self.long_press_sent && elapsed >= LONG_PRESS_MS
        {
            self.long_press_sent = true;
            return Ok(Some(ButtonEvent::LongPress(self.button)));
        }

        Ok(None)
    }
}
