//! Types for input handling

/// Button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// BOOT button, GPIO0
    One,
    /// Side button, GPIO14
    Two,
}

/// Button state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Button events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed(Button),
    Released(Button),
    LongPress(Button),
}

impl std::fmt::Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Button::One => write!(f, "Button 1"),
            Button::Two => write!(f, "Button 2"),
        }
    }
}

impl std::fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ButtonEvent::Pressed(btn) => write!(f, "{} pressed", btn),
            ButtonEvent::Released(btn) => write!(f, "{} released", btn),
            ButtonEvent::LongPress(btn) => write!(f, "{} long press", btn),
        }
    }
}
