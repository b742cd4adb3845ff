mod keys;

pub use keys::{resolve_key, KeyAction, KeyEvent, ModifierState, NUDGE_VELOCITY};

