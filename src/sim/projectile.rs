//! Projectiles and rocket explosions

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{heading, outside_playfield};

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bullet,
    Rocket,
}

impl ProjectileKind {
    pub fn radius(self) -> f32 {
        match self {
            ProjectileKind::Bullet => BULLET_RADIUS,
            ProjectileKind::Rocket => ROCKET_RADIUS,
        }
    }

    /// Shove applied to an enemy on direct impact
    pub fn knockback(self) -> f32 {
        match self {
            ProjectileKind::Bullet => BULLET_KNOCKBACK,
            ProjectileKind::Rocket => ROCKET_KNOCKBACK,
        }
    }
}

/// A projectile flying on a fixed heading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: u32,
    /// Blast radius (rockets only, 0 for bullets)
    pub explosion_radius: f32,
    pub color: [u8; 4],
    /// Consumed by an impact this frame
    #[serde(skip)]
    pub spent: bool,
}

impl Projectile {
    pub fn new(
        id: u32,
        kind: ProjectileKind,
        origin: Vec2,
        angle: f32,
        speed: f32,
        damage: u32,
        color: [u8; 4],
    ) -> Self {
        Self {
            id,
            kind,
            pos: origin,
            vel: heading(angle) * speed,
            radius: kind.radius(),
            damage,
            explosion_radius: match kind {
                ProjectileKind::Bullet => 0.0,
                ProjectileKind::Rocket => ROCKET_EXPLOSION_RADIUS,
            },
            color,
            spent: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn is_off_screen(&self) -> bool {
        outside_playfield(self.pos)
    }

    /// Still able to hit something this frame
    pub fn is_live(&self) -> bool {
        !self.spent && !self.is_off_screen()
    }

    /// Blast radius to use on detonation (rockets only)
    pub fn blast_radius(&self) -> Option<f32> {
        match self.kind {
            ProjectileKind::Bullet => None,
            ProjectileKind::Rocket if self.explosion_radius > 0.0 => Some(self.explosion_radius),
            ProjectileKind::Rocket => Some(ROCKET_EXPLOSION_RADIUS),
        }
    }
}

/// A one-shot area-damage blast with a short visual lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub lifetime: f32,
    pub elapsed: f32,
    pub damage: u32,
    /// Area damage already dealt
    pub applied: bool,
}

impl Explosion {
    pub fn new(pos: Vec2, radius: f32, damage: u32) -> Self {
        Self {
            pos,
            radius,
            lifetime: EXPLOSION_LIFETIME,
            elapsed: 0.0,
            damage,
            applied: false,
        }
    }

    pub fn age(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.lifetime
    }

    /// Display progress 0..1
    pub fn progress(&self) -> f32 {
        if self.lifetime <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.lifetime).clamp(0.0, 1.0)
        }
    }

    /// Display alpha factor, 1 at detonation fading to 0
    pub fn fade(&self) -> f32 {
        1.0 - self.progress()
    }

    /// Whether a circle at `pos` with `radius` is inside the blast
    pub fn reaches(&self, pos: Vec2, radius: f32) -> bool {
        self.pos.distance(pos) <= self.radius + radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_flies_straight() {
        let start = Vec2::new(100.0, 100.0);
        let mut b = Projectile::new(1, ProjectileKind::Bullet, start, 0.0, 500.0, 20, [255; 4]);
        b.update(0.1);
        assert!((b.pos.x - 150.0).abs() < 1e-3);
        assert!((b.pos.y - 100.0).abs() < 1e-3);
        assert_eq!(b.radius, 5.0);
        assert_eq!(b.blast_radius(), None);
    }

    #[test]
    fn test_rocket_blast_radius() {
        let mut r =
            Projectile::new(1, ProjectileKind::Rocket, Vec2::ZERO, 0.0, 360.0, 70, [255; 4]);
        assert_eq!(r.radius, 8.0);
        assert_eq!(r.blast_radius(), Some(110.0));
        r.explosion_radius = 0.0;
        assert_eq!(r.blast_radius(), Some(ROCKET_EXPLOSION_RADIUS));
    }

    #[test]
    fn test_off_screen() {
        let start = Vec2::new(995.0, 10.0);
        let mut b = Projectile::new(1, ProjectileKind::Bullet, start, 0.0, 100.0, 1, [255; 4]);
        assert!(b.is_live());
        b.update(0.1);
        assert!(b.is_off_screen());
        assert!(!b.is_live());
    }

    #[test]
    fn test_explosion_lifetime_and_fade() {
        let mut e = Explosion::new(Vec2::ZERO, 110.0, 70);
        assert_eq!(e.fade(), 1.0);
        e.age(0.175);
        assert!((e.fade() - 0.5).abs() < 1e-4);
        assert!(!e.is_expired());
        e.age(0.175);
        assert!(e.is_expired());
        assert_eq!(e.fade(), 0.0);
    }

    #[test]
    fn test_explosion_reach_includes_target_radius() {
        let e = Explosion::new(Vec2::ZERO, 110.0, 70);
        assert!(e.reaches(Vec2::new(125.0, 0.0), 16.0));
        assert!(!e.reaches(Vec2::new(127.0, 0.0), 16.0));
    }
}
