use serde::Serialize;

use super::frames::{DOOR_FRAME_COUNT, IDLE_FRAME_COUNT};

pub(crate) const IDLE_FRAME_DURATION_SECONDS: f32 = 0.07;
pub(crate) const DOOR_FRAME_DURATION_SECONDS: f32 = 0.08;
pub(crate) const MINIGAME_DURATION_SECONDS: f32 = 4.0;
pub(crate) const STARTING_FLOOR: u32 = 1;
pub(crate) const STARTING_LIVES: u32 = 4;

const LAST_DOOR_FRAME: i32 = DOOR_FRAME_COUNT as i32 - 1;
const MAX_FRAME_STEPS_PER_UPDATE: u32 = 256;
/// Absorbs f32 rounding when a run of small deltas sums to a whole number
/// of frame durations.
const FRAME_STEP_EPSILON_SECONDS: f32 = 1.0e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SceneState {
    Idle,
    DoorsOpening,
    Minigame,
    DoorsClosing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct Transition {
    pub from: SceneState,
    pub to: SceneState,
    pub floor: u32,
}

/// The elevator's phase machine. Owns every counter the scene mutates;
/// drawing only reads it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ElevatorController {
    state: SceneState,
    frame: i32,
    frame_timer: f32,
    minigame_timer: f32,
    current_floor: u32,
    lives: u32,
}

impl Default for ElevatorController {
    fn default() -> Self {
        Self::new()
    }
}

impl ElevatorController {
    pub(crate) fn new() -> Self {
        Self {
            state: SceneState::Idle,
            frame: 0,
            frame_timer: 0.0,
            minigame_timer: 0.0,
            current_floor: STARTING_FLOOR,
            lives: STARTING_LIVES,
        }
    }

    pub(crate) fn state(&self) -> SceneState {
        self.state
    }

    pub(crate) fn frame(&self) -> i32 {
        self.frame
    }

    #[cfg(test)]
    pub(crate) fn frame_timer(&self) -> f32 {
        self.frame_timer
    }

    pub(crate) fn minigame_timer(&self) -> f32 {
        self.minigame_timer
    }

    pub(crate) fn current_floor(&self) -> u32 {
        self.current_floor
    }

    pub(crate) fn lives(&self) -> u32 {
        self.lives
    }

    /// Seconds of the countdown already burned; only meaningful in `Minigame`.
    pub(crate) fn minigame_elapsed(&self) -> f32 {
        MINIGAME_DURATION_SECONDS - self.minigame_timer
    }

    /// The "call the elevator" input. Ignored outside `Idle`.
    pub(crate) fn activate(&mut self) -> Option<Transition> {
        if self.state != SceneState::Idle {
            return None;
        }
        self.frame = 0;
        self.frame_timer = 0.0;
        Some(self.enter(SceneState::DoorsOpening))
    }

    pub(crate) fn update(&mut self, dt_seconds: f32) -> Option<Transition> {
        let dt = sanitize_delta(dt_seconds);
        match self.state {
            SceneState::Idle => {
                let steps = take_frame_steps(&mut self.frame_timer, dt, IDLE_FRAME_DURATION_SECONDS);
                let advanced = (self.frame as i64 + steps as i64).rem_euclid(IDLE_FRAME_COUNT as i64);
                self.frame = advanced as i32;
                None
            }
            SceneState::DoorsOpening => {
                let steps = take_frame_steps(&mut self.frame_timer, dt, DOOR_FRAME_DURATION_SECONDS);
                for _ in 0..steps {
                    self.frame += 1;
                    if self.frame > LAST_DOOR_FRAME {
                        self.frame = LAST_DOOR_FRAME;
                        self.frame_timer = 0.0;
                        self.minigame_timer = MINIGAME_DURATION_SECONDS;
                        return Some(self.enter(SceneState::Minigame));
                    }
                }
                None
            }
            SceneState::Minigame => {
                self.minigame_timer -= dt;
                if self.minigame_timer > 0.0 {
                    return None;
                }
                self.minigame_timer = 0.0;
                self.current_floor = self.current_floor.saturating_add(1);
                self.frame = LAST_DOOR_FRAME;
                self.frame_timer = 0.0;
                Some(self.enter(SceneState::DoorsClosing))
            }
            SceneState::DoorsClosing => {
                let steps = take_frame_steps(&mut self.frame_timer, dt, DOOR_FRAME_DURATION_SECONDS);
                for _ in 0..steps {
                    self.frame -= 1;
                    if self.frame < 0 {
                        self.frame = 0;
                        self.frame_timer = 0.0;
                        return Some(self.enter(SceneState::Idle));
                    }
                }
                None
            }
        }
    }

    fn enter(&mut self, next: SceneState) -> Transition {
        let from = self.state;
        self.state = next;
        Transition {
            from,
            to: next,
            floor: self.current_floor,
        }
    }
}

fn sanitize_delta(dt_seconds: f32) -> f32 {
    if dt_seconds.is_finite() && dt_seconds > 0.0 {
        dt_seconds
    } else {
        0.0
    }
}

/// Adds `dt` to `timer` and consumes it in whole `frame_duration` steps,
/// returning how many fired. Leaves `timer < frame_duration`.
fn take_frame_steps(timer: &mut f32, dt: f32, frame_duration: f32) -> u32 {
    *timer += dt;
    let mut steps = 0u32;
    while *timer + FRAME_STEP_EPSILON_SECONDS >= frame_duration {
        if steps == MAX_FRAME_STEPS_PER_UPDATE {
            // Stall backlog: keep only the phase within the current frame.
            *timer %= frame_duration;
            break;
        }
        *timer = (*timer - frame_duration).max(0.0);
        steps += 1;
    }
    if !timer.is_finite() {
        *timer = 0.0;
    }
    steps
}
