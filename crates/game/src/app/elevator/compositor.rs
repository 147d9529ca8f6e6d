use engine::{DrawTarget, Viewport};

use super::controller::{ElevatorController, SceneState};
use super::frames::{
    bomb_timer_dst_rect, bomb_timer_frame, bomb_timer_src_rect, door_src_rect, idle_src_rect,
    MUG_SHOT_SRC_RECT,
};
use super::SceneAssets;

pub(crate) const BACKDROP_COLOR: [u8; 4] = [0, 0, 0, 255];
pub(crate) const HUD_TEXT_COLOR: [u8; 4] = [255, 255, 255, 255];
const HUD_LEFT_PX: i32 = 8;
const HUD_FLOOR_TOP_PX: i32 = 8;
const HUD_LIVES_TOP_PX: i32 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HudLabel {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Floor and lives are only shown while the elevator idles.
pub(crate) fn hud_labels(controller: &ElevatorController) -> Vec<HudLabel> {
    if controller.state() != SceneState::Idle {
        return Vec::new();
    }
    vec![
        HudLabel {
            text: format!("Floor {}", controller.current_floor()),
            x: HUD_LEFT_PX,
            y: HUD_FLOOR_TOP_PX,
        },
        HudLabel {
            text: format!("Lives: {}", controller.lives()),
            x: HUD_LEFT_PX,
            y: HUD_LIVES_TOP_PX,
        },
    ]
}

pub(crate) fn compose(
    controller: &ElevatorController,
    assets: &SceneAssets,
    viewport: Viewport,
    target: &mut dyn DrawTarget,
) {
    let full = viewport.full_rect();

    match controller.state() {
        SceneState::Idle => {
            target.blit(&assets.sprite_sheet, idle_src_rect(controller.frame()), full);
        }
        state => {
            target.fill_rect(full, BACKDROP_COLOR);
            if let Some(mug_shot) = &assets.mug_shot {
                target.blit(mug_shot, MUG_SHOT_SRC_RECT, full);
            }
            if matches!(state, SceneState::DoorsOpening | SceneState::DoorsClosing) {
                target.blit(&assets.sprite_sheet, door_src_rect(controller.frame()), full);
            }
            if state == SceneState::Minigame && controller.minigame_timer() > 0.0 {
                if let Some(bomb_timer) = &assets.bomb_timer {
                    let frame = bomb_timer_frame(controller.minigame_elapsed());
                    target.blit(
                        bomb_timer,
                        bomb_timer_src_rect(frame),
                        bomb_timer_dst_rect(viewport),
                    );
                }
            }
        }
    }

    if let Some(font) = &assets.font {
        for label in hud_labels(controller) {
            target.draw_text(font, &label.text, label.x, label.y, HUD_TEXT_COLOR);
        }
    }
}
