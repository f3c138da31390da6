use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, NativeKeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyM => Key::M,
            KeyCode::KeyT => Key::T,
            KeyCode::Equal => Key::Equal,
            KeyCode::Minus => Key::Minus,
            KeyCode::NumpadAdd => Key::NumpadAdd,
            KeyCode::NumpadSubtract => Key::NumpadSubtract,
            _ => Key::Unknown(0),
        },
        PhysicalKey::Unidentified(native) => Key::Unknown(native_code(native)),
    }
}

fn native_code(native: NativeKeyCode) -> u32 {
    match native {
        NativeKeyCode::Unidentified => 0,
        NativeKeyCode::Android(c) => c,
        NativeKeyCode::MacOS(c) => c as u32,
        NativeKeyCode::Windows(c) => c as u32,
        NativeKeyCode::Xkb(c) => c,
        #[allow(unreachable_patterns)]
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_keys_map_to_engine_keys() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Equal)), Key::Equal);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::NumpadSubtract)), Key::NumpadSubtract);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyT)), Key::T);
    }

    #[test]
    fn other_keys_are_unknown() {
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::KeyZ)), Key::Unknown(_)));
        assert_eq!(
            map_key(PhysicalKey::Unidentified(NativeKeyCode::Xkb(77))),
            Key::Unknown(77)
        );
    }

    #[test]
    fn close_request_translates() {
        assert_eq!(translate_window_event(&WindowEvent::CloseRequested), Some(InputEvent::CloseRequested));
        assert_eq!(translate_window_event(&WindowEvent::Focused(false)), None);
    }
}
