//! The elevator scene: idles, opens its doors onto the bomb minigame, then
//! closes them and moves up a floor.

mod compositor;
mod controller;
mod frames;

use engine::{
    AssetError, AssetLoader, ColorKey, DrawTarget, FontFace, Key, Rect, Scene, SceneEvent,
    Texture, Viewport,
};
use thiserror::Error;
use tracing::{info, warn};

use super::bootstrap::WINDOW_TITLE;

pub(crate) use controller::{ElevatorController, SceneState, Transition};

const ELEVATOR_SHEET_KEY: &str = "graphics/elevator.png";
const MUG_SHOT_SHEET_KEY: &str = "graphics/mug shot.png";
const BOMB_TIMER_SHEET_KEY: &str = "graphics/bomb timer.png";
const HUD_FONT_KEY: &str = "warioware font.otf/warioware-inc-mega-microgame-big.otf";
const HUD_FONT_PX: f32 = 14.0;

const ELEVATOR_CHROMA_KEY: ColorKey = ColorKey::rgb(25, 128, 93);
const MUG_SHOT_CHROMA_KEY: ColorKey = ColorKey::rgb(24, 126, 55);
const BOMB_TIMER_CHROMA_KEY: ColorKey = ColorKey::rgb(0x88, 0x88, 0x88);

#[derive(Debug, Error)]
pub(crate) enum SceneError {
    #[error("failed to load elevator sprite sheet: {0}")]
    SpriteSheet(#[source] AssetError),
    #[error("elevator sprite sheet is {width}x{height} but a frame needs {rect:?}")]
    AtlasOutOfBounds { width: u32, height: u32, rect: Rect },
}

/// Handles the scene owns. Only the elevator sheet is required.
#[derive(Debug)]
pub(crate) struct SceneAssets {
    pub sprite_sheet: Texture,
    pub mug_shot: Option<Texture>,
    pub bomb_timer: Option<Texture>,
    pub font: Option<FontFace>,
}

pub(crate) struct ElevatorScene {
    controller: ElevatorController,
    assets: Option<SceneAssets>,
    viewport: Viewport,
}

impl ElevatorScene {
    pub(crate) fn create(loader: &AssetLoader) -> Result<Self, SceneError> {
        let sprite_sheet = loader
            .load_texture(ELEVATOR_SHEET_KEY, Some(ELEVATOR_CHROMA_KEY))
            .map_err(SceneError::SpriteSheet)?;
        let mug_shot = optional_asset(
            MUG_SHOT_SHEET_KEY,
            loader.load_texture(MUG_SHOT_SHEET_KEY, Some(MUG_SHOT_CHROMA_KEY)),
        );
        let bomb_timer = optional_asset(
            BOMB_TIMER_SHEET_KEY,
            loader.load_texture(BOMB_TIMER_SHEET_KEY, Some(BOMB_TIMER_CHROMA_KEY)),
        );
        let font = optional_asset(HUD_FONT_KEY, loader.load_font(HUD_FONT_KEY, HUD_FONT_PX));

        Self::from_assets(SceneAssets {
            sprite_sheet,
            mug_shot,
            bomb_timer,
            font,
        })
    }

    pub(crate) fn from_assets(assets: SceneAssets) -> Result<Self, SceneError> {
        validate_sheet_covers_frames(&assets.sprite_sheet)?;
        info!(
            sheet_width = assets.sprite_sheet.width(),
            sheet_height = assets.sprite_sheet.height(),
            mug_shot = assets.mug_shot.is_some(),
            bomb_timer = assets.bomb_timer.is_some(),
            font = assets.font.is_some(),
            "elevator_scene_created"
        );
        Ok(Self {
            controller: ElevatorController::new(),
            assets: Some(assets),
            viewport: Viewport {
                width: frames::SPRITE_WIDTH,
                height: frames::SPRITE_HEIGHT,
            },
        })
    }

    #[cfg(test)]
    pub(crate) fn controller(&self) -> &ElevatorController {
        &self.controller
    }

    #[cfg(test)]
    pub(crate) fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[cfg(test)]
    pub(crate) fn has_assets(&self) -> bool {
        self.assets.is_some()
    }

    fn record(&self, transition: Option<Transition>) {
        if let Some(transition) = transition {
            info!(
                from = ?transition.from,
                to = ?transition.to,
                floor = transition.floor,
                lives = self.controller.lives(),
                "scene_transition"
            );
        }
    }
}

impl Scene for ElevatorScene {
    fn process_event(&mut self, event: &SceneEvent) -> bool {
        match event {
            SceneEvent::QuitRequested | SceneEvent::KeyPressed(Key::Escape) => false,
            SceneEvent::KeyPressed(Key::Space) => {
                let transition = self.controller.activate();
                self.record(transition);
                true
            }
            _ => true,
        }
    }

    fn update(&mut self, dt_seconds: f32) {
        let transition = self.controller.update(dt_seconds);
        self.record(transition);
    }

    fn set_viewport(&mut self, width: i32, height: i32) {
        self.viewport = Viewport::clamped(width, height);
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        let Some(assets) = &self.assets else {
            return;
        };
        compositor::compose(&self.controller, assets, self.viewport, target);
    }

    fn destroy(&mut self) {
        if self.assets.take().is_some() {
            info!(floor = self.controller.current_floor(), "elevator_scene_destroyed");
        }
    }

    fn debug_title(&self) -> Option<String> {
        Some(format!(
            "{WINDOW_TITLE} - Floor {}",
            self.controller.current_floor()
        ))
    }
}

fn optional_asset<T>(key: &str, loaded: Result<T, AssetError>) -> Option<T> {
    match loaded {
        Ok(asset) => Some(asset),
        Err(error) => {
            warn!(asset = key, error = %error, "optional_asset_unavailable");
            None
        }
    }
}

fn validate_sheet_covers_frames(sheet: &Texture) -> Result<(), SceneError> {
    let bounds = Rect::new(0, 0, sheet.width(), sheet.height());
    match frames::elevator_sheet_rects().find(|rect| !bounds.contains_rect(*rect)) {
        Some(rect) => Err(SceneError::AtlasOutOfBounds {
            width: sheet.width(),
            height: sheet.height(),
            rect,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
