use std::collections::HashMap;

use super::{InputEvent, Intent, Key, KeyState};

/// Key-to-intent bindings.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<Key, Intent>,
}

impl KeyMap {
    /// No bindings.
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, key: Key, intent: Intent) -> &mut Self {
        self.bindings.insert(key, intent);
        self
    }

    #[inline]
    pub fn lookup(&self, key: Key) -> Option<Intent> {
        self.bindings.get(&key).copied()
    }

    /// Maps an input event to an intent.
    ///
    /// Key releases never produce intents. Auto-repeat only produces the
    /// intents that [`repeat`](Intent::repeats).
    pub fn intent_for(&self, event: &InputEvent) -> Option<Intent> {
        match event {
            InputEvent::CloseRequested => Some(Intent::Quit),
            InputEvent::Key { key, state: KeyState::Pressed, repeat } => {
                let intent = self.lookup(*key)?;
                (!*repeat || intent.repeats()).then_some(intent)
            }
            _ => None,
        }
    }
}

impl Default for KeyMap {
    /// Escape/Q quit, `+`/`=`/`-` adjust IPD, M and T toggle modes.
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(Key::Escape, Intent::Quit)
            .bind(Key::Q, Intent::Quit)
            .bind(Key::Equal, Intent::IncreaseIpd)
            .bind(Key::NumpadAdd, Intent::IncreaseIpd)
            .bind(Key::Minus, Intent::DecreaseIpd)
            .bind(Key::NumpadSubtract, Intent::DecreaseIpd)
            .bind(Key::M, Intent::ToggleStereoMode)
            .bind(Key::T, Intent::ToggleTestPattern);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, repeat: false }
    }

    #[test]
    fn default_bindings() {
        let map = KeyMap::default();
        assert_eq!(map.intent_for(&press(Key::Escape)), Some(Intent::Quit));
        assert_eq!(map.intent_for(&press(Key::Q)), Some(Intent::Quit));
        assert_eq!(map.intent_for(&press(Key::Equal)), Some(Intent::IncreaseIpd));
        assert_eq!(map.intent_for(&press(Key::NumpadAdd)), Some(Intent::IncreaseIpd));
        assert_eq!(map.intent_for(&press(Key::Minus)), Some(Intent::DecreaseIpd));
        assert_eq!(map.intent_for(&press(Key::M)), Some(Intent::ToggleStereoMode));
        assert_eq!(map.intent_for(&press(Key::T)), Some(Intent::ToggleTestPattern));
        assert_eq!(map.intent_for(&press(Key::Unknown(42))), None);
    }

    #[test]
    fn close_request_quits() {
        assert_eq!(KeyMap::empty().intent_for(&InputEvent::CloseRequested), Some(Intent::Quit));
    }

    #[test]
    fn releases_are_ignored() {
        let ev = InputEvent::Key { key: Key::Escape, state: KeyState::Released, repeat: false };
        assert_eq!(KeyMap::default().intent_for(&ev), None);
    }

    #[test]
    fn repeat_only_for_ipd() {
        let map = KeyMap::default();
        let held_plus = InputEvent::Key { key: Key::Equal, state: KeyState::Pressed, repeat: true };
        let held_t = InputEvent::Key { key: Key::T, state: KeyState::Pressed, repeat: true };
        assert_eq!(map.intent_for(&held_plus), Some(Intent::IncreaseIpd));
        assert_eq!(map.intent_for(&held_t), None);
    }

    #[test]
    fn rebinding_replaces() {
        let mut map = KeyMap::default();
        map.bind(Key::Q, Intent::ToggleTestPattern);
        assert_eq!(map.lookup(Key::Q), Some(Intent::ToggleTestPattern));
    }
}
