//! Per-frame input commands
//!
//! The host polls keyboard, mouse and touch, then hands the simulation a
//! `TickInput`. Raw movement keys and touch points are resolved during the
//! PLAYING tick against the session's `VirtualStick`, which turns a
//! left-half drag into the same movement vector the keyboard produces.

use glam::Vec2;

use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Analog movement (gamepad or scripted); added to keys and stick
    pub move_dir: Vec2,
    /// Movement keys held
    pub keys: MoveKeys,
    /// Active touch points
    pub touches: Vec<Touch>,
    /// Aim point in playfield coordinates (mouse)
    pub aim: Vec2,
    /// Fire held (mouse button or space)
    pub fire: bool,
    /// UI pointer position (mouse or first touch)
    pub pointer: Vec2,
    /// Select pressed this frame (click or new touch)
    pub select: bool,
    /// Pause/back key pressed this frame
    pub pause: bool,
    /// Confirm key pressed this frame (enter/space)
    pub confirm: bool,
}

impl TickInput {
    /// Any press edge this frame (used to skip the splash)
    pub fn any_press(&self) -> bool {
        self.select || self.pause || self.confirm
    }
}

/// Movement keys held this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    /// Unnormalized direction (y grows downward)
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// One active touch point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub id: u64,
    pub pos: Vec2,
}

/// Floating touch joystick anchored wherever the left-half touch begins
#[derive(Debug, Clone)]
pub struct VirtualStick {
    pub anchor: Vec2,
    pub position: Vec2,
    pub base_radius: f32,
    pub knob_radius: f32,
    pub pointer_id: Option<u64>,
    pub direction: Vec2,
}

impl Default for VirtualStick {
    fn default() -> Self {
        let anchor = Self::home();
        Self {
            anchor,
            position: anchor,
            base_radius: 95.0,
            knob_radius: 36.0,
            pointer_id: None,
            direction: Vec2::ZERO,
        }
    }
}

impl VirtualStick {
    /// Resting anchor in the lower-left corner
    fn home() -> Vec2 {
        Vec2::new(130.0, PLAYFIELD_HEIGHT - 140.0)
    }

    pub fn is_active(&self) -> bool {
        self.pointer_id.is_some()
    }

    /// Release the pointer and return to the resting anchor
    pub fn reset(&mut self) {
        *self = Self {
            base_radius: self.base_radius,
            knob_radius: self.knob_radius,
            ..Self::default()
        };
    }

    /// Track touches and return the stick direction (length <= 1)
    pub fn update(&mut self, touches: &[Touch]) -> Vec2 {
        let tracked = self
            .pointer_id
            .and_then(|id| touches.iter().find(|t| t.id == id));

        match tracked {
            Some(touch) => self.position = touch.pos,
            None => {
                self.pointer_id = None;
                self.position = self.anchor;
                if let Some(touch) = touches.iter().find(|t| t.pos.x <= PLAYFIELD_WIDTH * 0.5) {
                    self.pointer_id = Some(touch.id);
                    self.anchor = touch.pos;
                    self.position = touch.pos;
                }
            }
        }

        self.direction = Vec2::ZERO;
        if self.pointer_id.is_some() {
            let mut delta = self.position - self.anchor;
            let len = delta.length();
            if len > self.base_radius {
                delta *= self.base_radius / len;
                self.position = self.anchor + delta;
            }
            if self.base_radius > 0.0 {
                self.direction = delta / self.base_radius;
            }
        }
        self.direction
    }

    /// First touch on the right side that is not steering the stick
    pub fn fire_touch(&self, touches: &[Touch]) -> Option<Vec2> {
        touches
            .iter()
            .filter(|t| Some(t.id) != self.pointer_id)
            .find(|t| t.pos.x >= PLAYFIELD_WIDTH * 0.55)
            .map(|t| t.pos)
    }
}

/// Movement and trigger for one PLAYING frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub move_dir: Vec2,
    pub aim: Vec2,
    pub fire: bool,
}

/// Resolve a frame's raw input against the stick.
///
/// A right-side touch that is not steering aims and fires. It is looked up
/// before the stick takes this frame's touches, so a finger that just
/// started steering cannot also fire.
pub fn resolve_controls(stick: &mut VirtualStick, input: &TickInput) -> Controls {
    let touch_aim = stick.fire_touch(&input.touches);
    let stick_dir = stick.update(&input.touches);
    Controls {
        move_dir: combine_movement(stick_dir + input.move_dir, input.keys),
        aim: touch_aim.unwrap_or(input.aim),
        fire: input.fire || touch_aim.is_some(),
    }
}

/// Combine stick and keys into one movement vector (length <= 1)
pub fn combine_movement(stick: Vec2, keys: MoveKeys) -> Vec2 {
    let dir = stick + keys.direction();
    if dir.length() > 1.0 {
        dir.normalize()
    } else {
        dir
    }
}
