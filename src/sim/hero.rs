//! Combatant controller
//!
//! Turns a tick's worth of input into motion, aiming, throws and hook
//! launches. Position is a box anchored at its midbottom (the feet).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::banana::Banana;
use super::collision::land_from_above;
use super::geom::Rect;
use super::hook::{Hook, Tethered};
use super::platform::Platform;
use super::state::EntityIds;
use super::trajectory::{TrajectoryParams, simulate_trajectory};
use crate::clamp_length;
use crate::consts::*;
use crate::tuning::{BananaTuning, HeroTuning, HookTuning};

/// Which of the two combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Red, Side::Blue];

    pub fn index(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Blue => 1,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Red => "Red",
            Side::Blue => "Blue",
        }
    }
}

/// Held state of every action for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroInput {
    pub left: bool,
    pub right: bool,
    pub aim_up: bool,
    pub aim_down: bool,
    /// Jump, or reel in while hooked
    pub jump: bool,
    pub throw: bool,
    pub hook: bool,
}

/// Animation pose for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pose {
    Stand,
    Run,
    Jump,
    Throw,
}

/// Shared collections a hero may read or spawn into during its update
pub struct HeroContext<'a> {
    pub platforms: &'a [Platform],
    pub bananas: &'a mut Vec<Banana>,
    pub hooks: &'a mut Vec<Hook>,
    pub ids: &'a mut EntityIds,
    pub banana_tuning: &'a BananaTuning,
}

/// What the hero launched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeroActions {
    pub threw_banana: Option<u32>,
    pub fired_hook: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub side: Side,
    pub rect: Rect,
    /// Horizontal speed from run input this tick
    pub run_speed: f32,
    /// Vertical speed accumulator (+ is down)
    pub vertical_speed: f32,
    /// Residual horizontal speed from a hook release
    pub hook_momentum: f32,
    pub facing_right: bool,
    /// Radians above (+) or below (-) the facing direction
    pub aim_angle: f32,
    pub health: f32,
    pub has_banana: bool,
    /// Test mode: banana refills shortly after every throw
    pub infinite_bananas: bool,
    pub grounded: bool,
    /// Earliest time the next hook may launch
    pub hook_ready_at: u64,
    /// Id of the live owned hook
    pub hook: Option<u32>,
    #[serde(skip)]
    tuning: HeroTuning,
    start_x: f32,
    start_facing_right: bool,
    pending_throw: Option<Vec2>,
    banana_refill_at: u64,
    hook_held: bool,
    throw_pose_ticks: u32,
}

impl Hero {
    pub fn new(side: Side, tuning: &HeroTuning) -> Self {
        let (start_x, start_facing_right) = match side {
            Side::Red => (RED_START_X, true),
            Side::Blue => (BLUE_START_X, false),
        };
        let mut hero = Self {
            side,
            rect: Rect::default(),
            run_speed: 0.0,
            vertical_speed: 0.0,
            hook_momentum: 0.0,
            facing_right: start_facing_right,
            aim_angle: 0.0,
            health: MAX_HEALTH,
            has_banana: false,
            infinite_bananas: false,
            grounded: true,
            hook_ready_at: 0,
            hook: None,
            tuning: *tuning,
            start_x,
            start_facing_right,
            pending_throw: None,
            banana_refill_at: 0,
            hook_held: false,
            throw_pose_ticks: 0,
        };
        hero.reset();
        hero
    }

    /// Back to the spawn point with full health and nothing in flight
    pub fn reset(&mut self) {
        self.rect = Rect::from_midbottom(Vec2::new(self.start_x, GROUND_Y), HERO_SIZE);
        self.run_speed = 0.0;
        self.vertical_speed = 0.0;
        self.hook_momentum = 0.0;
        self.facing_right = self.start_facing_right;
        self.aim_angle = 0.0;
        self.health = MAX_HEALTH;
        self.has_banana = self.infinite_bananas;
        self.grounded = true;
        self.hook_ready_at = 0;
        self.hook = None;
        self.pending_throw = None;
        self.banana_refill_at = 0;
        self.hook_held = false;
        self.throw_pose_ticks = 0;
    }

    pub fn update(&mut self, input: &HeroInput, now: u64, ctx: &mut HeroContext<'_>) -> HeroActions {
        let mut actions = HeroActions::default();

        // Forget a hook the world has already removed
        if let Some(id) = self.hook
            && !ctx.hooks.iter().any(|h| h.id == id && !h.is_done())
        {
            self.hook = None;
        }

        self.handle_input(input, now, ctx, &mut actions);
        self.apply_gravity(ctx.platforms);
        self.move_horizontal();
        self.throw_pose_ticks = self.throw_pose_ticks.saturating_sub(1);

        if let Some(vel) = self.pending_throw.take() {
            let id = ctx.ids.next();
            ctx.bananas
                .push(Banana::new(id, self.center(), vel, self.side, now, ctx.banana_tuning));
            actions.threw_banana = Some(id);
        }
        actions
    }

    fn handle_input(&mut self, input: &HeroInput, now: u64, ctx: &mut HeroContext<'_>, actions: &mut HeroActions) {
        let t = self.tuning;

        if self.infinite_bananas && !self.has_banana && now >= self.banana_refill_at {
            self.has_banana = true;
        }

        if input.jump && self.grounded {
            self.vertical_speed = t.jump_force;
        }

        // Run input wins over any leftover hook momentum
        self.run_speed = if input.left {
            self.facing_right = false;
            -t.run_speed
        } else if input.right {
            self.facing_right = true;
            t.run_speed
        } else {
            0.0
        };
        if self.run_speed != 0.0 {
            self.hook_momentum = 0.0;
        }

        if input.aim_up {
            self.adjust_aim(t.aim_step);
        } else if input.aim_down {
            self.adjust_aim(-t.aim_step);
        }

        if input.throw && self.has_banana && self.pending_throw.is_none() {
            let dir = (self.aim_direction() + Vec2::new(0.0, -t.throw_lift)).normalize_or_zero();
            self.pending_throw = Some(dir * t.throw_speed);
            self.has_banana = false;
            self.throw_pose_ticks = t.throw_pose_ticks;
            if self.infinite_bananas {
                self.banana_refill_at = now + t.banana_refill_ms;
            }
        }

        let pressed = input.hook && !self.hook_held;
        let released = !input.hook && self.hook_held;
        self.hook_held = input.hook;

        if pressed && self.hook_ready(now) {
            let id = ctx.ids.next();
            let vel = self.aim_direction() * t.hook_speed;
            ctx.hooks
                .push(Hook::new(id, self.side, self.center(), vel, self.facing_right, now));
            self.hook = Some(id);
            self.hook_ready_at = now + t.hook_cooldown_ms;
            self.throw_pose_ticks = t.throw_pose_ticks;
            actions.fired_hook = Some(id);
        }

        if let Some(hook) = self.hook.and_then(|id| ctx.hooks.iter_mut().find(|h| h.id == id)) {
            if released {
                hook.request_release();
            }
            hook.set_pull(input.jump);
        }
    }

    fn apply_gravity(&mut self, platforms: &[Platform]) {
        self.grounded = false;
        self.vertical_speed += self.tuning.gravity;
        let prev_bottom = self.rect.bottom();
        self.rect.translate(Vec2::new(0.0, self.vertical_speed));

        if self.rect.top() < CEILING_Y {
            self.rect.set_top(CEILING_Y);
            self.vertical_speed = self.vertical_speed.max(0.0);
        }

        if self.vertical_speed >= 0.0
            && let Some(landing) = land_from_above(prev_bottom, &self.rect, platforms)
        {
            self.rect.set_bottom(landing.top);
            self.vertical_speed = 0.0;
            self.grounded = true;
            self.hook_momentum *= self.tuning.landing_friction;
        }
    }

    fn move_horizontal(&mut self) {
        self.rect.x += self.run_speed + self.hook_momentum;

        self.hook_momentum *= self.tuning.momentum_damping;
        if self.hook_momentum.abs() < self.tuning.momentum_cutoff {
            self.hook_momentum = 0.0;
        }

        if self.clamp_to_arena() {
            self.hook_momentum = 0.0;
        }
    }

    /// Keep the box between the side walls; true if it had to be moved
    fn clamp_to_arena(&mut self) -> bool {
        if self.rect.left() < 0.0 {
            self.rect.set_left(0.0);
            true
        } else if self.rect.right() > SCREEN_WIDTH {
            self.rect.set_right(SCREEN_WIDTH);
            true
        } else {
            false
        }
    }

    fn adjust_aim(&mut self, delta: f32) {
        self.aim_angle = (self.aim_angle + delta).clamp(self.tuning.aim_min, self.tuning.aim_max);
    }

    /// Set the aim angle directly (clamped to the allowed range)
    pub fn set_aim(&mut self, angle: f32) {
        self.aim_angle = angle.clamp(self.tuning.aim_min, self.tuning.aim_max);
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Reticle position on a circle around the center, mirrored by facing
    pub fn aim_point(&self) -> Vec2 {
        let (sin, cos) = self.aim_angle.sin_cos();
        let dx = if self.facing_right { cos } else { -cos };
        self.center() + Vec2::new(dx, -sin) * self.tuning.aim_radius
    }

    /// Unit vector toward the reticle
    pub fn aim_direction(&self) -> Vec2 {
        let dir = self.aim_point() - self.center();
        if dir.length_squared() == 0.0 {
            Vec2::new(if self.facing_right { 1.0 } else { -1.0 }, 0.0)
        } else {
            dir.normalize()
        }
    }

    /// Reduced box used for banana hits and splat contact
    pub fn hitbox(&self) -> Rect {
        let (sx, sy) = self.tuning.hitbox_shrink;
        let hitbox = self.rect.inflate(-sx, -sy);
        if hitbox.is_empty() { self.rect } else { hitbox }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount.max(0.0)).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount.max(0.0)).min(MAX_HEALTH);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn hook_ready(&self, now: u64) -> bool {
        self.hook.is_none() && now >= self.hook_ready_at
    }

    pub fn pose(&self) -> Pose {
        if self.throw_pose_ticks > 0 {
            Pose::Throw
        } else if !self.grounded {
            Pose::Jump
        } else if self.run_speed != 0.0 {
            Pose::Run
        } else {
            Pose::Stand
        }
    }

    /// Predicted banana arc if thrown now
    pub fn throw_preview(&self, banana: &BananaTuning, steps: usize) -> Vec<Vec2> {
        let dir = (self.aim_direction() + Vec2::new(0.0, -self.tuning.throw_lift)).normalize_or_zero();
        simulate_trajectory(
            self.center(),
            dir * self.tuning.throw_speed,
            TrajectoryParams {
                gravity: banana.gravity,
                max_fall: Some(banana.max_fall_speed),
                steps,
            },
        )
    }

    /// Predicted hook arc if fired now
    pub fn hook_preview(&self, hook: &HookTuning, steps: usize) -> Vec<Vec2> {
        simulate_trajectory(
            self.center(),
            self.aim_direction() * self.tuning.hook_speed,
            TrajectoryParams {
                gravity: hook.gravity,
                max_fall: Some(hook.max_fall_speed),
                steps,
            },
        )
    }
}

impl Tethered for Hero {
    fn center(&self) -> Vec2 {
        self.rect.center()
    }

    fn height(&self) -> f32 {
        self.rect.h
    }

    fn hang_at(&mut self, center: Vec2) {
        self.rect.set_center(center);
        self.clamp_to_arena();
        self.vertical_speed = 0.0;
        self.run_speed = 0.0;
        self.grounded = false;
    }

    fn stand_at(&mut self, feet: Vec2) {
        self.rect.set_midbottom(feet);
        self.clamp_to_arena();
        self.vertical_speed = 0.0;
        self.run_speed = 0.0;
        self.grounded = true;
    }

    fn apply_hook_impulse(&mut self, velocity: Vec2) {
        let impulse = clamp_length(velocity, self.tuning.max_impulse_speed);
        self.hook_momentum = impulse.x;
        self.vertical_speed = impulse.y;
        self.grounded = false;
    }
}
