use std::path::Path;
use std::process::ExitCode;

use engine::run_app;
use tracing::error;

use super::bootstrap::{AppWiring, RunMode};
use super::elevator::ElevatorScene;
use super::replay::{self, ReplayError};

pub(crate) fn run(app: AppWiring) -> ExitCode {
    match app.mode {
        RunMode::Window => {
            if let Err(err) = run_app(app.config, ElevatorScene::create) {
                error!(error = %err, "startup_failed");
                return ExitCode::FAILURE;
            }
        }
        RunMode::Replay(path) => {
            if let Err(err) = run_replay_file(&path) {
                error!(error = %err, path = %path.display(), "replay_failed");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_replay_file(path: &Path) -> Result<(), ReplayError> {
    let script = replay::load_replay(path)?;
    let summary = replay::run_replay(&script);
    println!("{}", summary.to_json()?);
    Ok(())
}
