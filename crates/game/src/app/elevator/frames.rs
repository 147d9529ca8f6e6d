//! Atlas coordinates for every sprite the elevator scene draws.
//!
//! The state machine only hands out frame indices; this module owns the
//! mapping to source rectangles so the sheets can be re-laid out freely.

use engine::{Rect, Viewport};

use super::controller::MINIGAME_DURATION_SECONDS;

pub(crate) const SPRITE_WIDTH: u32 = 240;
pub(crate) const SPRITE_HEIGHT: u32 = 160;

pub(crate) const IDLE_FRAME_COUNT: usize = 3;
pub(crate) const DOOR_FRAME_COUNT: usize = 10;
pub(crate) const BOMB_TIMER_FRAME_COUNT: usize = 4;

const BOMB_TIMER_FRAME_WIDTH: u32 = 60;
const BOMB_TIMER_FRAME_HEIGHT: u32 = 129;

/// "Next" poses in elevator.png.
const IDLE_SRC_RECTS: [Rect; IDLE_FRAME_COUNT] = [
    Rect::new(4, 66, SPRITE_WIDTH, SPRITE_HEIGHT),
    Rect::new(254, 66, SPRITE_WIDTH, SPRITE_HEIGHT),
    Rect::new(504, 66, SPRITE_WIDTH, SPRITE_HEIGHT),
];

/// Door sweep in elevator.png, two rows of five. Closing walks it backward.
const DOOR_SRC_RECTS: [Rect; DOOR_FRAME_COUNT] = [
    Rect::new(1, 310, SPRITE_WIDTH, SPRITE_HEIGHT),
    Rect::new(251, 311, SPRITE_WIDTH, SPRITE_HEIGHT),
    Rect::new(501, 311, SPRITE_WIDTH, SPRITE_HEIGHT),
    Rect::new(751, 311, SPRITE_WIDTH, SPRITE_HEIGHT),
    Rect::new(1001, 311, SPRITE_WIDTH, SPRITE_HEIGHT),
    Rect::new(1, 476, SPRITE_WIDTH, SPRITE_HEIGHT),
    Rect::new(251, 476, SPRITE_WIDTH, SPRITE_HEIGHT),
    Rect::new(501, 476, SPRITE_WIDTH, SPRITE_HEIGHT),
    Rect::new(751, 476, SPRITE_WIDTH, SPRITE_HEIGHT),
    Rect::new(1001, 476, SPRITE_WIDTH, SPRITE_HEIGHT),
];

pub(crate) const MUG_SHOT_SRC_RECT: Rect = Rect::new(2, 2, SPRITE_WIDTH, SPRITE_HEIGHT);

pub(crate) fn idle_src_rect(frame: i32) -> Rect {
    IDLE_SRC_RECTS[clamp_index(frame, IDLE_FRAME_COUNT)]
}

pub(crate) fn door_src_rect(frame: i32) -> Rect {
    DOOR_SRC_RECTS[clamp_index(frame, DOOR_FRAME_COUNT)]
}

/// Rope-burning frame derived from elapsed minigame time only.
pub(crate) fn bomb_timer_frame(elapsed_seconds: f32) -> usize {
    let scaled = (elapsed_seconds / MINIGAME_DURATION_SECONDS) * BOMB_TIMER_FRAME_COUNT as f32;
    // `as` saturates: NaN and negatives land on 0.
    (scaled.floor() as usize).min(BOMB_TIMER_FRAME_COUNT - 1)
}

pub(crate) fn bomb_timer_src_rect(frame: usize) -> Rect {
    let frame = frame.min(BOMB_TIMER_FRAME_COUNT - 1) as u32;
    Rect::new(
        (frame * BOMB_TIMER_FRAME_WIDTH) as i32,
        0,
        BOMB_TIMER_FRAME_WIDTH,
        BOMB_TIMER_FRAME_HEIGHT,
    )
}

/// Top-right corner, drawn at native size.
pub(crate) fn bomb_timer_dst_rect(viewport: Viewport) -> Rect {
    Rect::new(
        viewport.width as i32 - BOMB_TIMER_FRAME_WIDTH as i32,
        0,
        BOMB_TIMER_FRAME_WIDTH,
        BOMB_TIMER_FRAME_HEIGHT,
    )
}

/// Every rect sampled from the elevator sheet.
pub(crate) fn elevator_sheet_rects() -> impl Iterator<Item = Rect> {
    IDLE_SRC_RECTS.into_iter().chain(DOOR_SRC_RECTS)
}

fn clamp_index(frame: i32, count: usize) -> usize {
    frame.clamp(0, count as i32 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_frames_clamp_to_table_edges() {
        assert_eq!(idle_src_rect(-3), IDLE_SRC_RECTS[0]);
        assert_eq!(idle_src_rect(7), IDLE_SRC_RECTS[2]);
        assert_eq!(door_src_rect(-1), DOOR_SRC_RECTS[0]);
        assert_eq!(door_src_rect(10), DOOR_SRC_RECTS[9]);
    }

    #[test]
    fn door_table_is_two_rows_of_five() {
        let top_row: Vec<i32> = DOOR_SRC_RECTS[..5].iter().map(|rect| rect.y).collect();
        let bottom_row: Vec<i32> = DOOR_SRC_RECTS[5..].iter().map(|rect| rect.y).collect();
        assert!(top_row.iter().all(|y| (310..=311).contains(y)));
        assert!(bottom_row.iter().all(|y| *y == 476));
        for rect in DOOR_SRC_RECTS {
            assert_eq!((rect.w, rect.h), (SPRITE_WIDTH, SPRITE_HEIGHT));
        }
    }

    #[test]
    fn bomb_timer_frame_quarters_the_countdown() {
        assert_eq!(bomb_timer_frame(0.0), 0);
        assert_eq!(bomb_timer_frame(0.99), 0);
        assert_eq!(bomb_timer_frame(1.0), 1);
        assert_eq!(bomb_timer_frame(2.5), 2);
        assert_eq!(bomb_timer_frame(3.99), 3);
        assert_eq!(bomb_timer_frame(4.0), 3);
        assert_eq!(bomb_timer_frame(40.0), 3);
    }

    #[test]
    fn bomb_timer_frame_is_monotonic_and_bounded() {
        let mut previous = 0;
        for step in 0..=500 {
            let frame = bomb_timer_frame(step as f32 * 0.01);
            assert!(frame >= previous);
            assert!(frame < BOMB_TIMER_FRAME_COUNT);
            previous = frame;
        }
    }

    #[test]
    fn pathological_elapsed_times_map_to_first_frame() {
        assert_eq!(bomb_timer_frame(-1.0), 0);
        assert_eq!(bomb_timer_frame(f32::NAN), 0);
    }

    #[test]
    fn bomb_timer_rects_tile_a_single_row() {
        assert_eq!(bomb_timer_src_rect(0), Rect::new(0, 0, 60, 129));
        assert_eq!(bomb_timer_src_rect(3), Rect::new(180, 0, 60, 129));
        assert_eq!(bomb_timer_src_rect(9), Rect::new(180, 0, 60, 129));
        assert_eq!(
            bomb_timer_dst_rect(Viewport {
                width: 240,
                height: 160
            }),
            Rect::new(180, 0, 60, 129)
        );
    }
}
