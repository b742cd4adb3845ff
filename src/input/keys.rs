//! Keyboard vocabulary for rectangle sessions.

/// Pixels moved per arrow-key press while Shift is held.
pub const NUDGE_VELOCITY: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierState {
    pub shift: bool,
    pub primary: bool,
    pub alt: bool,
}

impl ModifierState {
    pub const NONE: ModifierState = ModifierState {
        shift: false,
        primary: false,
        alt: false,
    };

    pub const fn shift() -> Self {
        ModifierState {
            shift: true,
            primary: false,
            alt: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Nudge { dx: f64, dy: f64 },
    Commit,
    Cancel,
}

/// Resolves a key press into the action a rectangle session should take.
/// Arrow keys nudge by one pixel, accelerated while Shift is held.
pub fn resolve_key(event: KeyEvent, modifiers: ModifierState) -> KeyAction {
    let (dx, dy) = match event {
        KeyEvent::ArrowUp => (0.0, -1.0),
        KeyEvent::ArrowDown => (0.0, 1.0),
        KeyEvent::ArrowLeft => (-1.0, 0.0),
        KeyEvent::ArrowRight => (1.0, 0.0),
        KeyEvent::Enter => return KeyAction::Commit,
        KeyEvent::Escape => return KeyAction::Cancel,
    };

    if modifiers.shift {
        KeyAction::Nudge {
            dx: dx * NUDGE_VELOCITY,
            dy: dy * NUDGE_VELOCITY,
        }
    } else {
        KeyAction::Nudge { dx, dy }
    }
}
