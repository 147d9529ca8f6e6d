//! Scripted, windowless runs of the elevator state machine.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::elevator::{ElevatorController, SceneState, Transition};

#[derive(Debug, Error)]
pub(crate) enum ReplayError {
    #[error("failed to read replay '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse replay json at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("replay validation failed at {field}: {message}")]
    Invalid { field: String, message: String },
    #[error("encode replay summary: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ReplayScript {
    #[serde(default = "default_fixed_dt")]
    pub fixed_dt: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ReplayFrame {
    /// Overrides `fixed_dt` for this frame.
    #[serde(default)]
    pub dt: Option<f32>,
    #[serde(default)]
    pub activate: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ReplaySummary {
    pub final_state: SceneState,
    pub frame: i32,
    pub floor: u32,
    pub lives: u32,
    pub steps: u64,
    pub transitions: Vec<Transition>,
}

impl ReplaySummary {
    pub(crate) fn to_json(&self) -> Result<String, ReplayError> {
        serde_json::to_string_pretty(self).map_err(ReplayError::Encode)
    }
}

pub(crate) fn load_replay(path: &Path) -> Result<ReplayScript, ReplayError> {
    let raw = fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_replay(&raw)
}

pub(crate) fn parse_replay(raw: &str) -> Result<ReplayScript, ReplayError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let script: ReplayScript = serde_path_to_error::deserialize(&mut deserializer).map_err(
        |error| {
            let path = error.path().to_string();
            ReplayError::Parse {
                path: if path.is_empty() { ".".to_string() } else { path },
                source: error.into_inner(),
            }
        },
    )?;
    validate_replay(&script)?;
    Ok(script)
}

fn validate_replay(script: &ReplayScript) -> Result<(), ReplayError> {
    if !script.fixed_dt.is_finite() || script.fixed_dt <= 0.0 {
        return Err(invalid("fixed_dt", format!("must be > 0, got {}", script.fixed_dt)));
    }
    if script.frames.is_empty() {
        return Err(invalid("frames", "list is empty"));
    }
    for (index, frame) in script.frames.iter().enumerate() {
        if let Some(dt) = frame.dt {
            if !dt.is_finite() || dt < 0.0 {
                return Err(invalid(
                    &format!("frames[{index}].dt"),
                    format!("must be finite and >= 0, got {dt}"),
                ));
            }
        }
    }
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ReplayError {
    ReplayError::Invalid {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Feeds every expanded frame through a fresh controller. A frame that
/// activates does so before its update.
pub(crate) fn run_replay(script: &ReplayScript) -> ReplaySummary {
    let mut controller = ElevatorController::new();
    let mut transitions = Vec::new();
    let mut steps = 0u64;

    for frame in &script.frames {
        let dt = frame.dt.unwrap_or(script.fixed_dt);
        for _ in 0..frame.repeat.max(1) {
            if frame.activate {
                transitions.extend(controller.activate());
            }
            transitions.extend(controller.update(dt));
            steps += 1;
        }
    }

    let summary = ReplaySummary {
        final_state: controller.state(),
        frame: controller.frame(),
        floor: controller.current_floor(),
        lives: controller.lives(),
        steps,
        transitions,
    };
    info!(
        final_state = ?summary.final_state,
        floor = summary.floor,
        lives = summary.lives,
        steps = summary.steps,
        transitions = summary.transitions.len(),
        "replay_finished"
    );
    summary
}

const fn default_fixed_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FULL_RIDE: &str = r#"{
        "frames": [
            { "repeat": 30 },
            { "activate": true },
            { "repeat": 47 },
            { "dt": 0.5, "repeat": 8 },
            { "dt": 0.08, "repeat": 10 },
            { "repeat": 12 }
        ]
    }"#;

    #[test]
    fn defaults_fill_in_missing_fields() {
        let script = parse_replay(r#"{ "frames": [ {} ] }"#).expect("replay");
        assert!((script.fixed_dt - 1.0 / 60.0).abs() < f32::EPSILON);
        assert_eq!(script.frames[0].repeat, 1);
        assert!(!script.frames[0].activate);
        assert!(script.frames[0].dt.is_none());
    }

    #[test]
    fn full_ride_reports_every_transition() {
        let summary = run_replay(&parse_replay(FULL_RIDE).expect("replay"));
        assert_eq!(summary.final_state, SceneState::Idle);
        assert_eq!(summary.floor, 2);
        assert_eq!(summary.lives, 4);
        assert_eq!(summary.steps, 30 + 1 + 47 + 8 + 10 + 12);

        let path: Vec<(SceneState, SceneState, u32)> = summary
            .transitions
            .iter()
            .map(|transition| (transition.from, transition.to, transition.floor))
            .collect();
        assert_eq!(
            path,
            vec![
                (SceneState::Idle, SceneState::DoorsOpening, 1),
                (SceneState::DoorsOpening, SceneState::Minigame, 1),
                (SceneState::Minigame, SceneState::DoorsClosing, 2),
                (SceneState::DoorsClosing, SceneState::Idle, 2),
            ]
        );
    }

    #[test]
    fn identical_scripts_give_identical_summaries() {
        let script = parse_replay(FULL_RIDE).expect("replay");
        let first = run_replay(&script);
        let second = run_replay(&script);
        assert_eq!(first, second);
        assert_eq!(
            first.to_json().expect("json"),
            second.to_json().expect("json")
        );
    }

    #[test]
    fn activating_outside_idle_changes_nothing() {
        let script = parse_replay(
            r#"{ "frames": [ { "activate": true }, { "activate": true, "repeat": 5 } ] }"#,
        )
        .expect("replay");
        let summary = run_replay(&script);
        assert_eq!(summary.transitions.len(), 1);
        assert_eq!(summary.final_state, SceneState::DoorsOpening);
    }

    #[test]
    fn summary_serializes_states_in_snake_case() {
        let script = parse_replay(r#"{ "frames": [ { "activate": true } ] }"#).expect("replay");
        let summary = run_replay(&script);
        let json = summary.to_json().expect("json");
        assert!(json.contains("\"final_state\": \"doors_opening\""));
    }

    #[test]
    fn rejects_non_positive_fixed_dt() {
        let error = parse_replay(r#"{ "fixed_dt": 0.0, "frames": [ {} ] }"#)
            .err()
            .expect("error");
        assert!(matches!(error, ReplayError::Invalid { ref field, .. } if field == "fixed_dt"));
    }

    #[test]
    fn rejects_empty_frames() {
        let error = parse_replay(r#"{ "frames": [] }"#).err().expect("error");
        assert!(matches!(error, ReplayError::Invalid { ref field, .. } if field == "frames"));
    }

    #[test]
    fn rejects_negative_frame_dt() {
        let error = parse_replay(r#"{ "frames": [ {}, { "dt": -0.1 } ] }"#)
            .err()
            .expect("error");
        assert!(matches!(error, ReplayError::Invalid { ref field, .. } if field == "frames[1].dt"));
    }

    #[test]
    fn parse_errors_name_the_offending_path() {
        let error = parse_replay(r#"{ "frames": [ { "repeat": "lots" } ] }"#)
            .err()
            .expect("error");
        match error {
            ReplayError::Parse { path, .. } => assert_eq!(path, "frames[0].repeat"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loads_scripts_from_disk() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("ride.json");
        fs::write(&path, FULL_RIDE).expect("write replay");
        let script = load_replay(&path).expect("replay");
        assert_eq!(script.frames.len(), 6);

        let missing = load_replay(&temp.path().join("missing.json"))
            .err()
            .expect("error");
        assert!(matches!(missing, ReplayError::Read { .. }));
    }
}
