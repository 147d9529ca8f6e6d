use super::{DrawTarget, SceneEvent};

/// Lifecycle the host loop drives once per frame: events, then `update`,
/// then `set_viewport` and `draw`.
pub trait Scene {
    /// Returns `false` when the program should stop.
    fn process_event(&mut self, event: &SceneEvent) -> bool;

    fn update(&mut self, dt_seconds: f32);

    fn set_viewport(&mut self, width: i32, height: i32);

    /// Must not mutate scene state.
    fn draw(&self, target: &mut dyn DrawTarget);

    /// Releases owned assets. Calling it more than once is harmless.
    fn destroy(&mut self);

    fn debug_title(&self) -> Option<String> {
        None
    }
}
