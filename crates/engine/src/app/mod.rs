mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::{Key, SceneEvent};
pub use loop_runner::{run_app, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use rendering::{DrawTarget, FrameCanvas, Rect, RenderError, Renderer, Viewport};
pub use scene::Scene;
