//! Sling Duel - two-player banana and grappling-hook arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, entities, collisions, round state)
//! - `tuning`: Data-driven game balance
//! - `controls`: Action set and per-player key bindings
//! - `session`: Round lifecycle driver (timed world events, restart gating, score)

pub mod controls;
pub mod session;
pub mod sim;
pub mod tuning;

pub use controls::{Action, Controls, KeyBindings};
pub use session::{Scoreboard, Session, SessionPhase};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const FPS: u32 = 60;
    /// Milliseconds per tick rounded down, for drivers that synthesize timestamps.
    /// The session keeps the exact rate by counting ticks.
    pub const TICK_MS: u64 = 1000 / FPS as u64;
    /// Maximum ticks run per rendered frame (prevents spiral of death)
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longer frames are truncated to this before accumulating
    pub const MAX_FRAME_MS: u64 = 100;

    /// Arena dimensions (screen space, +y is down)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;
    /// Top edge of the floor
    pub const GROUND_Y: f32 = 680.0;
    /// Hooks latch onto this line
    pub const ARENA_TOP: f32 = 0.0;
    /// Heroes may rise a little above the visible top before being clamped
    pub const CEILING_Y: f32 = -60.0;

    pub const MAX_HEALTH: f32 = 5.0;

    /// Entity sizes (width, height)
    pub const HERO_SIZE: (f32, f32) = (48.0, 72.0);
    pub const BANANA_SIZE: (f32, f32) = (28.0, 28.0);
    pub const SPLAT_SIZE: (f32, f32) = (36.0, 18.0);
    pub const HOOK_SIZE: (f32, f32) = (26.0, 26.0);
    pub const BANANA_PICKUP_SIZE: (f32, f32) = (28.0, 28.0);
    pub const HEART_SIZE: (f32, f32) = (26.0, 24.0);

    pub const PLATFORM_HEIGHT: f32 = 36.0;
    pub const PLATFORM_WIDTHS: [f32; 3] = [128.0, 160.0, 192.0];

    /// Hero spawn x positions (red, blue)
    pub const RED_START_X: f32 = 200.0;
    pub const BLUE_START_X: f32 = SCREEN_WIDTH - 200.0;
}

/// Scale `v` down to `max` length if it is longer
#[inline]
pub fn clamp_length(v: Vec2, max: f32) -> Vec2 {
    if v.length_squared() > max * max {
        v.normalize_or_zero() * max
    } else {
        v
    }
}

/// Offset on a circle of radius `len` around an anchor, measured from straight down.
///
/// Screen space has +y down, so angle 0 hangs directly below the anchor.
#[inline]
pub fn pendulum_offset(theta: f32, len: f32) -> Vec2 {
    Vec2::new(theta.sin(), theta.cos()) * len
}

/// Angle of `offset` measured from straight down (inverse of [`pendulum_offset`])
#[inline]
pub fn pendulum_angle(offset: Vec2) -> f32 {
    let y = if offset.y != 0.0 { offset.y } else { 1.0 };
    offset.x.atan2(y)
}
