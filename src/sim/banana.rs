//! The banana: a thrown projectile that splats
//!
//! Lifecycle:
//! - `Flying` spins along a gravity-clamped arc until it lands, leaves the
//!   arena sideways, or hits a hero.
//! - A direct hit damages once and turns it into `FallingAfterHit`; it keeps
//!   falling (no spin) and becomes a short-lived `SplattedTemp` on landing.
//! - A landing without a hit leaves a `SplattedPersist` that never decays on
//!   its own; the first hero to step on it takes step damage and starts the
//!   decay timer.
//! - `Gone` marks it for removal.

use glam::Vec2;
use serde::Serialize;

use super::collision::{Surface, land_from_above, left_arena};
use super::geom::Rect;
use super::hero::{Hero, Side};
use super::platform::Platform;
use crate::consts::*;
use crate::tuning::BananaTuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BananaState {
    Flying,
    FallingAfterHit,
    SplattedPersist { landed_at: u64 },
    SplattedTemp { landed_at: u64, despawn_at: u64 },
    Gone,
}

/// Notable transition reported by [`Banana::update`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BananaStep {
    /// Became a persistent splat (`surface` is `None` when it left the arena)
    Splatted { surface: Option<Surface> },
    /// A hit banana reached a surface and started decaying
    Settled { surface: Surface },
    /// Decay finished
    Despawned,
}

#[derive(Debug, Clone, Serialize)]
pub struct Banana {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
    /// Thrower; only consulted for the self-hit immunity window
    pub owner: Side,
    pub damage_direct: f32,
    pub damage_step: f32,
    pub state: BananaState,
    /// Where it came to rest, once it has
    pub surface: Option<Surface>,
    pub spawned_at: u64,
    owner_immunity_ms: u64,
    /// Rotation frame in [0, 4)
    spin: f32,
    damaged: bool,
    stepped: bool,
}

impl Banana {
    pub fn new(id: u32, center: Vec2, vel: Vec2, owner: Side, now: u64, tuning: &BananaTuning) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, BANANA_SIZE),
            vel,
            owner,
            damage_direct: tuning.damage_direct,
            damage_step: tuning.damage_step,
            state: BananaState::Flying,
            surface: None,
            spawned_at: now,
            owner_immunity_ms: tuning.owner_immunity_ms,
            spin: 0.0,
            damaged: false,
            stepped: false,
        }
    }

    /// Whether a direct hit on `target` would count right now
    pub fn can_hit(&self, target: Side, now: u64) -> bool {
        if self.state != BananaState::Flying || self.damaged {
            return false;
        }
        if target == self.owner && now.saturating_sub(self.spawned_at) < self.owner_immunity_ms {
            return false;
        }
        true
    }

    /// Direct hit: damage once, switch to splat shape and start falling.
    ///
    /// Returns whether damage was applied.
    pub fn on_hit(&mut self, target: &mut Hero) -> bool {
        if self.damaged || self.state != BananaState::Flying {
            return false;
        }
        self.damaged = true;
        self.to_splat();
        self.state = BananaState::FallingAfterHit;
        target.take_damage(self.damage_direct);
        true
    }

    /// Step-on contact. Only a persistent splat reacts, and only once.
    ///
    /// Returns whether damage was applied.
    pub fn stepped_on_by(&mut self, target: &mut Hero, now: u64, decay_ms: u64) -> bool {
        if !matches!(self.state, BananaState::SplattedPersist { .. }) || self.stepped {
            return false;
        }
        self.stepped = true;
        target.take_damage(self.damage_step);
        self.state = BananaState::SplattedTemp {
            landed_at: now,
            despawn_at: now + decay_ms,
        };
        true
    }

    pub fn update(&mut self, now: u64, platforms: &[Platform], tuning: &BananaTuning) -> Option<BananaStep> {
        match self.state {
            BananaState::Flying => {
                let prev_bottom = self.integrate(tuning);
                self.spin = (self.spin + tuning.spin_rate) % 4.0;

                if let Some(landing) = land_from_above(prev_bottom, &self.rect, platforms) {
                    self.to_splat();
                    self.rect.set_bottom(landing.top);
                    self.surface = Some(landing.surface);
                    self.state = BananaState::SplattedPersist { landed_at: now };
                    return Some(BananaStep::Splatted {
                        surface: self.surface,
                    });
                }

                if left_arena(&self.rect) {
                    self.to_splat();
                    self.surface = None;
                    self.state = BananaState::SplattedPersist { landed_at: now };
                    return Some(BananaStep::Splatted { surface: None });
                }
                None
            }
            BananaState::FallingAfterHit => {
                let prev_bottom = self.integrate(tuning);
                let landing = land_from_above(prev_bottom, &self.rect, platforms)?;
                self.rect.set_bottom(landing.top);
                self.vel = Vec2::ZERO;
                self.surface = Some(landing.surface);
                self.state = BananaState::SplattedTemp {
                    landed_at: now,
                    despawn_at: now + tuning.hit_decay_ms,
                };
                Some(BananaStep::Settled {
                    surface: landing.surface,
                })
            }
            BananaState::SplattedPersist { .. } => None,
            BananaState::SplattedTemp { despawn_at, .. } => {
                if now >= despawn_at {
                    self.state = BananaState::Gone;
                    Some(BananaStep::Despawned)
                } else {
                    None
                }
            }
            BananaState::Gone => None,
        }
    }

    /// Ready to be dropped from the world (decayed, or splatted outside the arena)
    pub fn is_gone(&self) -> bool {
        match self.state {
            BananaState::Gone => true,
            BananaState::SplattedPersist { .. } => self.surface.is_none() && left_arena(&self.rect),
            _ => false,
        }
    }

    /// Persistent splat resting on the ground line (counted against the clutter cap)
    pub fn is_ground_splat(&self) -> bool {
        matches!(self.state, BananaState::SplattedPersist { .. }) && self.on_ground()
    }

    pub fn on_ground(&self) -> bool {
        self.surface == Some(Surface::Ground)
    }

    /// Timestamp of the last landing (or step-on), if it has come to rest
    pub fn landed_at(&self) -> Option<u64> {
        match self.state {
            BananaState::SplattedPersist { landed_at } | BananaState::SplattedTemp { landed_at, .. } => {
                Some(landed_at)
            }
            _ => None,
        }
    }

    pub fn despawn_at(&self) -> Option<u64> {
        match self.state {
            BananaState::SplattedTemp { despawn_at, .. } => Some(despawn_at),
            _ => None,
        }
    }

    /// Box used for step-on tests
    pub fn step_box(&self, tuning: &BananaTuning) -> Rect {
        self.rect.inflate(tuning.step_box_grow.0, tuning.step_box_grow.1)
    }

    /// Splat sprite should be drawn instead of the whole banana
    pub fn is_splat(&self) -> bool {
        self.state != BananaState::Flying
    }

    /// Current quarter-turn frame (0..4) of the spin animation
    pub fn rotation_frame(&self) -> usize {
        self.spin as usize % 4
    }

    pub fn has_damaged(&self) -> bool {
        self.damaged
    }

    /// Apply gravity and move; returns the bottom edge before moving
    fn integrate(&mut self, tuning: &BananaTuning) -> f32 {
        self.vel.y = (self.vel.y + tuning.gravity).min(tuning.max_fall_speed);
        let prev_bottom = self.rect.bottom();
        self.rect.translate(self.vel);
        prev_bottom
    }

    fn to_splat(&mut self) {
        self.rect = self.rect.resized(SPLAT_SIZE);
        self.vel = Vec2::ZERO;
    }
}
