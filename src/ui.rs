//! Overlay button layout and hit-testing
//!
//! Layout is fixed to the playfield size. The renderer draws the same
//! rectangles the simulation tests the pointer against.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::{SessionPhase, UpgradeChoice};

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// What pressing a button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UiAction {
    Play,
    Quit,
    Resume,
    Restart,
    QuitToMenu,
    Replay,
    Menu,
    Upgrade(UpgradeChoice),
}

/// A clickable region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Button {
    pub action: UiAction,
    pub rect: Rect,
}

const CX: f32 = PLAYFIELD_WIDTH / 2.0;
const CY: f32 = PLAYFIELD_HEIGHT / 2.0;

/// Upgrade box geometry
const UPGRADE_BOX_W: f32 = 240.0;
const UPGRADE_BOX_H: f32 = 140.0;
const UPGRADE_SPACING: f32 = 40.0;

pub fn menu_buttons() -> Vec<Button> {
    vec![
        Button {
            action: UiAction::Play,
            rect: Rect::new(CX - 100.0, CY - 60.0, 200.0, 60.0),
        },
        Button {
            action: UiAction::Quit,
            rect: Rect::new(CX - 100.0, CY + 20.0, 200.0, 60.0),
        },
    ]
}

pub fn pause_buttons() -> Vec<Button> {
    vec![
        Button {
            action: UiAction::Resume,
            rect: Rect::new(CX - 100.0, CY - 100.0, 200.0, 60.0),
        },
        Button {
            action: UiAction::Restart,
            rect: Rect::new(CX - 100.0, CY - 20.0, 200.0, 60.0),
        },
        Button {
            action: UiAction::QuitToMenu,
            rect: Rect::new(CX - 100.0, CY + 60.0, 200.0, 60.0),
        },
    ]
}

pub fn game_over_buttons() -> Vec<Button> {
    vec![
        Button {
            action: UiAction::Replay,
            rect: Rect::new(CX - 150.0, CY - 40.0, 120.0, 70.0),
        },
        Button {
            action: UiAction::Menu,
            rect: Rect::new(CX + 30.0, CY - 40.0, 120.0, 70.0),
        },
    ]
}

/// Three upgrade boxes, centered horizontally
pub fn upgrade_buttons() -> Vec<Button> {
    let total_w = UPGRADE_BOX_W * 3.0 + UPGRADE_SPACING * 2.0;
    let start_x = (PLAYFIELD_WIDTH - total_w) * 0.5;
    UpgradeChoice::ALL
        .iter()
        .enumerate()
        .map(|(i, &choice)| Button {
            action: UiAction::Upgrade(choice),
            rect: Rect::new(
                start_x + i as f32 * (UPGRADE_BOX_W + UPGRADE_SPACING),
                CY - UPGRADE_BOX_H * 0.5,
                UPGRADE_BOX_W,
                UPGRADE_BOX_H,
            ),
        })
        .collect()
}

/// Buttons shown for a session phase (empty while playing)
pub fn buttons_for(phase: SessionPhase) -> Vec<Button> {
    match phase {
        SessionPhase::Menu => menu_buttons(),
        SessionPhase::Paused => pause_buttons(),
        SessionPhase::GameOver => game_over_buttons(),
        SessionPhase::Upgrade => upgrade_buttons(),
        SessionPhase::Splash | SessionPhase::Playing => Vec::new(),
    }
}

/// First button under the pointer
pub fn hit_test(buttons: &[Button], pointer: Vec2) -> Option<UiAction> {
    buttons
        .iter()
        .find(|b| b.rect.contains(pointer))
        .map(|b| b.action)
}

/// Center of the button for an action in a phase (for scripted input)
pub fn button_center(phase: SessionPhase, action: UiAction) -> Option<Vec2> {
    buttons_for(phase)
        .iter()
        .find(|b| b.action == action)
        .map(|b| b.rect.center())
}
