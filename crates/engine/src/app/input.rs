use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    Other,
}

/// Host events handed to `Scene::process_event`, already stripped of
/// platform types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    QuitRequested,
    KeyPressed(Key),
    KeyReleased(Key),
    Resized { width: u32, height: u32 },
}

impl Key {
    pub(crate) fn from_physical(key: PhysicalKey) -> Self {
        match key {
            PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
            PhysicalKey::Code(KeyCode::Space) => Key::Space,
            _ => Key::Other,
        }
    }
}

/// Auto-repeat presses are dropped so a held key reports one press.
pub(crate) fn keyboard_event(
    physical_key: PhysicalKey,
    state: ElementState,
    repeat: bool,
) -> Option<SceneEvent> {
    let key = Key::from_physical(physical_key);
    match state {
        ElementState::Pressed if repeat => None,
        ElementState::Pressed => Some(SceneEvent::KeyPressed(key)),
        ElementState::Released => Some(SceneEvent::KeyReleased(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_and_space_map_to_named_keys() {
        assert_eq!(
            Key::from_physical(PhysicalKey::Code(KeyCode::Escape)),
            Key::Escape
        );
        assert_eq!(
            Key::from_physical(PhysicalKey::Code(KeyCode::Space)),
            Key::Space
        );
        assert_eq!(
            Key::from_physical(PhysicalKey::Code(KeyCode::KeyW)),
            Key::Other
        );
    }

    #[test]
    fn held_key_does_not_repeat_presses() {
        let space = PhysicalKey::Code(KeyCode::Space);
        assert_eq!(
            keyboard_event(space, ElementState::Pressed, false),
            Some(SceneEvent::KeyPressed(Key::Space))
        );
        assert_eq!(keyboard_event(space, ElementState::Pressed, true), None);
        assert_eq!(
            keyboard_event(space, ElementState::Released, false),
            Some(SceneEvent::KeyReleased(Key::Space))
        );
    }
}
