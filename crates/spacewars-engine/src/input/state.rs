use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current keyboard state for the game window.
///
/// Mirrors a "which keys are held right now" snapshot: the platform applies
/// every polled event before handing it to the game loop, so scenes read the
/// state as of the end of the event drain.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the held-key set.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck keys when focus changes mid-press.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::Quit => {}
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// True when any of `keys` is held.
    pub fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.keys_down.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_track_held_keys() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::key_pressed(Key::A));
        s.apply_event(&InputEvent::key_pressed(Key::ArrowUp));
        assert!(s.key_down(Key::A));
        assert!(s.any_down(&[Key::W, Key::ArrowUp]));

        s.apply_event(&InputEvent::key_released(Key::A));
        assert!(!s.key_down(Key::A));
        assert!(s.key_down(Key::ArrowUp));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Focused(true));
        s.apply_event(&InputEvent::key_pressed(Key::D));
        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.focused);
        assert!(s.keys_down.is_empty());
    }

    #[test]
    fn escape_press_is_quit_request() {
        assert!(InputEvent::Quit.is_quit_request());
        assert!(InputEvent::key_pressed(Key::Escape).is_quit_request());
        assert!(!InputEvent::key_released(Key::Escape).is_quit_request());
        assert!(!InputEvent::key_pressed(Key::Space).is_quit_request());
    }
}
