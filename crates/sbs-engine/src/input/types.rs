use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys the viewer binds get their own variant. Everything else
/// maps to `Key::Unknown`, carrying the native code for unidentified keys
/// and `0` otherwise.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Q,
    M,
    T,

    /// `=` / `+` on the main block.
    Equal,
    Minus,
    NumpadAdd,
    NumpadSubtract,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True for auto-repeat presses.
        repeat: bool,
    },

    /// The user asked the window to close.
    CloseRequested,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
