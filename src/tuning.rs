//! Data-driven game balance
//!
//! Every gameplay constant lives here so a match can be re-tuned from a JSON
//! file without touching simulation code. Units are per tick (60 Hz) for
//! motion and milliseconds for timers.

use serde::{Deserialize, Serialize};

/// Combatant movement, aiming and launching
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroTuning {
    /// Horizontal run speed (px/tick)
    pub run_speed: f32,
    /// Vertical speed applied on jump (negative is up)
    pub jump_force: f32,
    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Per-tick damping of residual hook momentum while airborne
    pub momentum_damping: f32,
    /// Momentum below this magnitude is dropped
    pub momentum_cutoff: f32,
    /// Momentum multiplier applied on every ground/platform contact
    pub landing_friction: f32,
    /// Distance from center to the aim reticle
    pub aim_radius: f32,
    /// Aim angle change per tick while aiming
    pub aim_step: f32,
    /// Aim angle bounds (radians, 0 = straight ahead, positive = up)
    pub aim_min: f32,
    pub aim_max: f32,
    /// Banana launch speed
    pub throw_speed: f32,
    /// Upward bias added to the aim direction before normalizing a throw
    pub throw_lift: f32,
    /// Hook launch speed
    pub hook_speed: f32,
    /// Time between hook launches, counted from launch
    pub hook_cooldown_ms: u64,
    /// Hook release impulses are clamped to this speed
    pub max_impulse_speed: f32,
    /// Hit box shrink (total width, total height)
    pub hitbox_shrink: (f32, f32),
    /// Ticks the throw pose is held after a throw or hook launch
    pub throw_pose_ticks: u32,
    /// Test mode banana refill delay
    pub banana_refill_ms: u64,
}

impl Default for HeroTuning {
    fn default() -> Self {
        Self {
            run_speed: 6.0,
            jump_force: -15.0,
            gravity: 1.0,
            momentum_damping: 0.96,
            momentum_cutoff: 0.08,
            landing_friction: 0.6,
            aim_radius: 105.0,
            aim_step: 0.06,
            aim_min: -1.25,
            aim_max: 1.25,
            throw_speed: 12.0,
            throw_lift: 0.15,
            hook_speed: 14.0 * 1.3,
            hook_cooldown_ms: 500,
            max_impulse_speed: 30.0,
            hitbox_shrink: (16.0, 12.0),
            throw_pose_ticks: 15,
            banana_refill_ms: 1000,
        }
    }
}

/// Projectile flight, damage and splat decay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BananaTuning {
    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Terminal fall speed
    pub max_fall_speed: f32,
    /// Damage dealt by a direct hit
    pub damage_direct: f32,
    /// Damage dealt by stepping on a splat
    pub damage_step: f32,
    /// Thrower cannot be hit by their own banana this soon after release
    pub owner_immunity_ms: u64,
    /// Splat lifetime after being stepped on
    pub step_decay_ms: u64,
    /// Splat lifetime after landing from a direct hit (shorter than `step_decay_ms`)
    pub hit_decay_ms: u64,
    /// Rotation frames advanced per tick while flying (4 frames per turn)
    pub spin_rate: f32,
    /// Growth of the splat box when testing step-on contact (total width, total height)
    pub step_box_grow: (f32, f32),
}

impl Default for BananaTuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            max_fall_speed: 18.0,
            damage_direct: 1.0,
            damage_step: 0.5,
            owner_immunity_ms: 150,
            step_decay_ms: 3000,
            hit_decay_ms: 1500,
            spin_rate: 0.3,
            step_box_grow: (10.0, 6.0),
        }
    }
}

/// Grappling hook flight, rope physics and release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookTuning {
    /// Flight gravity (half the banana's)
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Latching is allowed once this much time has passed...
    pub attach_grace_ms: u64,
    /// ...or the hook has travelled this far
    pub min_travel_before_attach: f32,
    /// Minimum time attached before a release request is honored
    pub min_stick_ms: u64,
    /// Forced release after this long attached
    pub detach_safety_ms: u64,
    /// Maximum owner displacement per tick while reeling
    pub pull_speed: f32,
    /// Rope shortening per tick while reeling
    pub reel_distance: f32,
    /// Reeling stops shortening the rope here
    pub min_rope_len: f32,
    /// Rope length floor when latching
    pub min_attach_rope_len: f32,
    /// Owner is pushed this far toward the anchor on latch
    pub attach_nudge: f32,
    /// Pendulum gravity constant
    pub swing_gravity: f32,
    /// Angular velocity multiplier per tick
    pub swing_damping: f32,
    /// Snap onto the surface when within this fraction of the owner's height
    pub snap_height_factor: f32,
    pub swing_release_boost: f32,
    pub pull_release_boost: f32,
    /// Release impulse clamp
    pub max_release_speed: f32,
}

impl Default for HookTuning {
    fn default() -> Self {
        Self {
            gravity: 0.25,
            max_fall_speed: 18.0,
            attach_grace_ms: 90,
            min_travel_before_attach: 30.0,
            min_stick_ms: 0,
            detach_safety_ms: 7000,
            pull_speed: 14.0,
            reel_distance: 1.6,
            min_rope_len: 16.0,
            min_attach_rope_len: 40.0,
            attach_nudge: 20.0,
            swing_gravity: 0.45,
            swing_damping: 0.985,
            snap_height_factor: 0.55,
            swing_release_boost: 2.3,
            pull_release_boost: 1.4,
            max_release_speed: 34.0,
        }
    }
}

/// World-level policy: pickups, regeneration, clutter and timed events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Persistent splats allowed on the ground at once
    pub ground_splat_cap: usize,
    /// Health restored by a heart pickup
    pub heart_heal: f32,
    /// Health restored to both heroes by each regeneration event
    pub regen_amount: f32,
    pub banana_spawn_interval_ms: u64,
    pub regen_interval_ms: u64,
    pub heart_spawn_interval_ms: u64,
    /// Delay between a round ending and a restart being accepted
    pub restart_delay_ms: u64,
    /// Banana pickups kept in the arena by the spawner
    pub banana_pickup_cap: usize,
    pub heart_pickup_cap: usize,
    /// Platforms placed per round
    pub platform_count: usize,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            ground_splat_cap: 2,
            heart_heal: 0.5,
            regen_amount: 0.5,
            banana_spawn_interval_ms: 10_000,
            regen_interval_ms: 30_000,
            heart_spawn_interval_ms: 60_000,
            restart_delay_ms: 3000,
            banana_pickup_cap: 4,
            heart_pickup_cap: 1,
            platform_count: 8,
        }
    }
}

/// Complete balance sheet for a match
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub hero: HeroTuning,
    pub banana: BananaTuning,
    pub hook: HookTuning,
    pub world: WorldTuning,
}

impl Tuning {
    /// Parse a (possibly partial) tuning document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
