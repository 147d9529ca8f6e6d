use std::env;
use std::path::PathBuf;

use engine::LoopConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub(crate) const WINDOW_TITLE: &str = "WarioWare";
const REPLAY_ENV_VAR: &str = "ELEVATOR_REPLAY";
const CLEAR_COLOR: [u8; 4] = [0x1a, 0x4d, 0x2e, 0xff];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RunMode {
    Window,
    Replay(PathBuf),
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) mode: RunMode,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Elevator Startup ===");

    let mode = run_mode_from(env::var(REPLAY_ENV_VAR).ok());
    let config = LoopConfig {
        window_title: WINDOW_TITLE.to_string(),
        clear_color: CLEAR_COLOR,
        ..LoopConfig::default()
    };

    AppWiring { config, mode }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn run_mode_from(replay_path: Option<String>) -> RunMode {
    match replay_path.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => RunMode::Replay(PathBuf::from(path)),
        _ => RunMode::Window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_mode_needs_a_non_blank_path() {
        assert_eq!(run_mode_from(None), RunMode::Window);
        assert_eq!(run_mode_from(Some("   ".to_string())), RunMode::Window);
        assert_eq!(
            run_mode_from(Some(" rides/full.json ".to_string())),
            RunMode::Replay(PathBuf::from("rides/full.json"))
        );
    }
}
