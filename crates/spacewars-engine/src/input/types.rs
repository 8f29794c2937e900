use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys the game reacts to plus the letter row are named; anything
/// else maps to `Key::Unknown` carrying the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic events delivered to the game loop.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The user asked to close the window.
    Quit,

    Key {
        key: Key,
        state: KeyState,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    /// Window focus change.
    Focused(bool),
}

impl InputEvent {
    /// Shorthand for a fresh (non-repeat) key press.
    pub fn key_pressed(key: Key) -> Self {
        Self::Key { key, state: KeyState::Pressed, repeat: false }
    }

    pub fn key_released(key: Key) -> Self {
        Self::Key { key, state: KeyState::Released, repeat: false }
    }

    /// True for `Quit` and for an Escape press; both end the frame loop.
    pub fn is_quit_request(&self) -> bool {
        matches!(
            self,
            InputEvent::Quit
                | InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, .. }
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
