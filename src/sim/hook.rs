//! Grappling hook: flight, latching, swing/reel and release
//!
//! The hook never owns its thrower. Each tick the world lends it the owner
//! through [`Tethered`], the only surface the hook may use to read or move
//! the owner. The owner in turn only talks to the hook through
//! [`Hook::set_pull`] and [`Hook::request_release`].

use glam::Vec2;
use serde::Serialize;

use super::collision::{Surface, left_arena, touching_stand};
use super::geom::Rect;
use super::hero::Side;
use super::platform::Platform;
use crate::consts::*;
use crate::tuning::HookTuning;
use crate::{clamp_length, pendulum_angle, pendulum_offset};

/// What a hook may do to its owner
pub trait Tethered {
    fn center(&self) -> Vec2;
    fn height(&self) -> f32;
    /// Place the owner's center, cancelling run/fall speed and leaving the ground
    fn hang_at(&mut self, center: Vec2);
    /// Stand the owner with its feet at `feet` (grounded)
    fn stand_at(&mut self, feet: Vec2);
    /// Momentum handed back when the hook lets go
    fn apply_hook_impulse(&mut self, velocity: Vec2);
}

/// How the rope moved the owner on the last attached tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RopeMotion {
    Swing,
    Pull,
    Snapped,
}

/// Rope state, only meaningful while attached
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tether {
    /// World-space latch point
    pub anchor: Vec2,
    pub surface: Surface,
    pub attached_at: u64,
    pub rope_len: f32,
    /// Pendulum angle from straight down
    pub theta: f32,
    /// Angular velocity (radians/tick)
    pub omega: f32,
    pub motion: RopeMotion,
    /// Owner displacement on the last tick
    pub owner_velocity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum HookState {
    Flying { travelled: f32 },
    Attached(Tether),
    Done,
}

/// Notable transition reported by [`Hook::update`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HookStep {
    Attached { surface: Surface, rope_len: f32 },
    /// Let go of the owner; `forced` when the safety timeout fired
    Released { impulse: Vec2, forced: bool },
    /// Flew out of the arena without latching
    Lost,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hook {
    pub id: u32,
    pub owner: Side,
    pub rect: Rect,
    pub vel: Vec2,
    pub state: HookState,
    pub spawned_at: u64,
    /// Rope attachment point relative to the hook's center
    anchor_offset: Vec2,
    pull_mode: bool,
    release_requested: bool,
}

impl Hook {
    pub fn new(id: u32, owner: Side, center: Vec2, vel: Vec2, owner_facing_right: bool, now: u64) -> Self {
        // Rope ties to the bottom-left corner; mirror when flying left
        let mut anchor_offset = Vec2::new(-HOOK_SIZE.0 / 2.0, HOOK_SIZE.1 / 2.0);
        if vel.x < 0.0 || (vel.x == 0.0 && !owner_facing_right) {
            anchor_offset.x = -anchor_offset.x;
        }
        Self {
            id,
            owner,
            rect: Rect::from_center(center, HOOK_SIZE),
            vel,
            state: HookState::Flying { travelled: 0.0 },
            spawned_at: now,
            anchor_offset,
            pull_mode: false,
            release_requested: false,
        }
    }

    /// Reel in (true) or swing (false); refreshed by the owner every tick
    pub fn set_pull(&mut self, on: bool) {
        self.pull_mode = on;
    }

    /// Ask to let go. Ignored unless attached.
    pub fn request_release(&mut self) {
        if self.is_attached() {
            self.release_requested = true;
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, HookState::Attached(_))
    }

    pub fn is_done(&self) -> bool {
        self.state == HookState::Done
    }

    pub fn pull_mode(&self) -> bool {
        self.pull_mode
    }

    pub fn tether(&self) -> Option<&Tether> {
        match &self.state {
            HookState::Attached(tether) => Some(tether),
            _ => None,
        }
    }

    pub fn rope_len(&self) -> Option<f32> {
        self.tether().map(|t| t.rope_len)
    }

    /// Where the rope is tied in world space
    pub fn rope_anchor(&self) -> Vec2 {
        match &self.state {
            HookState::Attached(tether) => tether.anchor,
            _ => self.rect.center() + self.anchor_offset,
        }
    }

    /// Drawn mirrored
    pub fn is_flipped(&self) -> bool {
        self.anchor_offset.x > 0.0
    }

    pub fn update<T: Tethered>(
        &mut self,
        now: u64,
        platforms: &[Platform],
        owner: &mut T,
        tuning: &HookTuning,
    ) -> Option<HookStep> {
        match self.state {
            HookState::Flying { travelled } => self.update_flying(travelled, now, platforms, owner, tuning),
            HookState::Attached(tether) => self.update_attached(tether, now, owner, tuning),
            HookState::Done => None,
        }
    }

    fn update_flying<T: Tethered>(
        &mut self,
        travelled: f32,
        now: u64,
        platforms: &[Platform],
        owner: &mut T,
        tuning: &HookTuning,
    ) -> Option<HookStep> {
        self.vel.y = (self.vel.y + tuning.gravity).min(tuning.max_fall_speed);
        self.rect.translate(self.vel);
        let travelled = travelled + self.vel.length();
        self.state = HookState::Flying { travelled };

        let allow_attach =
            now >= self.spawned_at + tuning.attach_grace_ms || travelled >= tuning.min_travel_before_attach;

        if allow_attach {
            if self.rect.top() <= ARENA_TOP {
                self.rect.set_top(ARENA_TOP);
                return Some(self.latch(Surface::Ceiling, now, owner, tuning));
            }
            if self.rect.bottom() >= GROUND_Y {
                self.rect.set_bottom(GROUND_Y);
                return Some(self.latch(Surface::Ground, now, owner, tuning));
            }
            if let Some(platform) = touching_stand(&self.rect, platforms) {
                self.rect.set_bottom(platform.surface_top());
                return Some(self.latch(Surface::Platform, now, owner, tuning));
            }
        }

        if left_arena(&self.rect) {
            self.state = HookState::Done;
            return Some(HookStep::Lost);
        }
        None
    }

    fn latch<T: Tethered>(&mut self, surface: Surface, now: u64, owner: &mut T, tuning: &HookTuning) -> HookStep {
        let anchor = self.rect.center() + self.anchor_offset;
        self.vel = Vec2::ZERO;

        let offset = owner.center() - anchor;
        let rope_len = offset.length().max(tuning.min_attach_rope_len);
        let theta = pendulum_angle(offset);

        // Pull the owner slightly toward the anchor so the swing starts right away
        let nudged = owner.center() - offset.normalize_or_zero() * tuning.attach_nudge;
        owner.hang_at(nudged);

        self.state = HookState::Attached(Tether {
            anchor,
            surface,
            attached_at: now,
            rope_len,
            theta,
            omega: 0.0,
            motion: RopeMotion::Swing,
            owner_velocity: Vec2::ZERO,
        });
        log::debug!("hook {} latched to {:?} (rope {:.1})", self.id, surface, rope_len);
        HookStep::Attached { surface, rope_len }
    }

    fn update_attached<T: Tethered>(
        &mut self,
        mut tether: Tether,
        now: u64,
        owner: &mut T,
        tuning: &HookTuning,
    ) -> Option<HookStep> {
        if now.saturating_sub(tether.attached_at) >= tuning.detach_safety_ms {
            let impulse = self.detach(&tether, owner, tuning);
            return Some(HookStep::Released { impulse, forced: true });
        }

        let anchor = tether.anchor;
        let prev_center = owner.center();
        let mut offset = prev_center - anchor;
        if offset.length_squared() == 0.0 {
            offset = Vec2::splat(0.001);
        }
        tether.theta = pendulum_angle(offset);

        let snapped = if self.pull_mode {
            reel(&mut tether, owner, tuning)
        } else {
            let g = tuning.swing_gravity;
            tether.omega += (g / tether.rope_len) * tether.theta.sin();
            tether.omega *= tuning.swing_damping;
            tether.theta -= tether.omega;
            let mut target = anchor + pendulum_offset(tether.theta, tether.rope_len);
            if tether.surface != Surface::Ceiling {
                // Never swing through the surface the hook is stuck in
                target.y = target.y.min(anchor.y - owner.height() * 0.5);
            }
            owner.hang_at(target);
            tether.motion = RopeMotion::Swing;
            false
        };

        if snapped {
            tether.owner_velocity = Vec2::ZERO;
        } else {
            let center = owner.center();
            tether.rope_len = (center - anchor).length().max(1.0);
            tether.owner_velocity = center - prev_center;
        }
        self.state = HookState::Attached(tether);

        let can_detach = now.saturating_sub(tether.attached_at) >= tuning.min_stick_ms;
        if can_detach && (snapped || self.release_requested) {
            let impulse = self.detach(&tether, owner, tuning);
            return Some(HookStep::Released { impulse, forced: false });
        }
        None
    }

    fn detach<T: Tethered>(&mut self, tether: &Tether, owner: &mut T, tuning: &HookTuning) -> Vec2 {
        let impulse = release_impulse(tether, tuning);
        if impulse != Vec2::ZERO {
            owner.apply_hook_impulse(impulse);
        }
        self.state = HookState::Done;
        self.release_requested = false;
        log::debug!("hook {} released ({:?}, impulse {:?})", self.id, tether.motion, impulse);
        impulse
    }
}

/// Shorten the rope and drag the owner in; returns true once snapped onto the surface
fn reel<T: Tethered>(tether: &mut Tether, owner: &mut T, tuning: &HookTuning) -> bool {
    let anchor = tether.anchor;
    tether.rope_len = (tether.rope_len - tuning.reel_distance)
        .max(tuning.min_rope_len)
        .min(tether.rope_len);

    let center = owner.center();
    let to_anchor = anchor - center;
    let dist = to_anchor.length();
    let snap_threshold = owner.height() * tuning.snap_height_factor;

    if dist <= snap_threshold {
        match tether.surface {
            Surface::Ceiling => owner.hang_at(anchor + Vec2::new(0.0, owner.height() / 2.0)),
            Surface::Ground | Surface::Platform => owner.stand_at(anchor),
        }
        tether.rope_len = (owner.center() - anchor).length().max(1.0);
        tether.motion = RopeMotion::Snapped;
        return true;
    }

    let step = tuning.pull_speed.min(dist);
    let target = clamp_length(center + to_anchor / dist * step - anchor, tether.rope_len);
    owner.hang_at(anchor + target);
    tether.motion = RopeMotion::Pull;
    false
}

fn release_impulse(tether: &Tether, tuning: &HookTuning) -> Vec2 {
    let mut velocity = tether.owner_velocity;
    let mut boost = tuning.pull_release_boost;

    if tether.motion == RopeMotion::Swing {
        boost = tuning.swing_release_boost;
        let tangent = tangential_velocity(tether);
        if tangent.length_squared() > velocity.length_squared() {
            velocity = tangent;
        } else {
            velocity += tangent * 0.5;
        }
    }

    if velocity.length_squared() == 0.0 {
        return Vec2::ZERO;
    }
    clamp_length(velocity * boost, tuning.max_release_speed)
}

/// Instantaneous velocity along the swing arc
fn tangential_velocity(tether: &Tether) -> Vec2 {
    // theta decreases by omega each tick; differentiate the pendulum offset
    Vec2::new(-tether.theta.cos(), tether.theta.sin()) * (tether.omega * tether.rope_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Bare owner for exercising the rope without a full hero
    #[derive(Debug, Default)]
    struct Dummy {
        center: Vec2,
        grounded: bool,
        impulse: Option<Vec2>,
    }

    impl Dummy {
        fn at(center: Vec2) -> Self {
            Self {
                center,
                ..Default::default()
            }
        }
    }

    impl Tethered for Dummy {
        fn center(&self) -> Vec2 {
            self.center
        }

        fn height(&self) -> f32 {
            HERO_SIZE.1
        }

        fn hang_at(&mut self, center: Vec2) {
            self.center = center;
            self.grounded = false;
        }

        fn stand_at(&mut self, feet: Vec2) {
            self.center = feet - Vec2::new(0.0, HERO_SIZE.1 / 2.0);
            self.grounded = true;
        }

        fn apply_hook_impulse(&mut self, velocity: Vec2) {
            self.impulse = Some(velocity);
        }
    }

    /// Hook latched to the ceiling with its anchor at `anchor`
    fn ceiling_hook(anchor: Vec2, owner: &mut Dummy, tuning: &HookTuning) -> Hook {
        let center = anchor - Vec2::new(-HOOK_SIZE.0 / 2.0, HOOK_SIZE.1 / 2.0);
        let mut hook = Hook::new(1, Side::Red, center, Vec2::new(1.0, 0.0), true, 0);
        hook.latch(Surface::Ceiling, 0, owner, tuning);
        hook
    }

    #[test]
    fn test_anchor_offset_mirrors_with_direction() {
        let right = Hook::new(1, Side::Red, Vec2::new(100.0, 100.0), Vec2::new(5.0, -5.0), true, 0);
        assert_eq!(right.rope_anchor(), Vec2::new(87.0, 113.0));
        assert!(!right.is_flipped());

        let left = Hook::new(2, Side::Red, Vec2::new(100.0, 100.0), Vec2::new(-5.0, -5.0), true, 0);
        assert_eq!(left.rope_anchor(), Vec2::new(113.0, 113.0));

        let straight_up = Hook::new(3, Side::Blue, Vec2::new(100.0, 100.0), Vec2::new(0.0, -5.0), false, 0);
        assert!(straight_up.is_flipped());
    }

    #[test]
    fn test_latches_to_ceiling_after_grace() {
        let tuning = HookTuning::default();
        let mut owner = Dummy::at(Vec2::new(300.0, 400.0));
        let mut hook = Hook::new(1, Side::Red, Vec2::new(300.0, 12.0), Vec2::new(0.5, 0.0), true, 1000);

        // Muzzle grace: neither time nor distance satisfied yet
        assert_eq!(hook.update(1016, &[], &mut owner, &tuning), None);
        assert!(matches!(hook.state, HookState::Flying { .. }));

        let step = hook.update(1100, &[], &mut owner, &tuning);
        assert!(matches!(step, Some(HookStep::Attached { surface: Surface::Ceiling, .. })));
        assert_eq!(hook.rect.top(), ARENA_TOP);
        assert_eq!(hook.vel, Vec2::ZERO);
    }

    #[test]
    fn test_latches_to_platform_stand_surface() {
        let tuning = HookTuning::default();
        let platform = Platform::new(3, Rect::new(400.0, 300.0, 200.0, 36.0));
        let mut owner = Dummy::at(Vec2::new(300.0, 600.0));
        let mut hook = Hook::new(1, Side::Red, Vec2::new(480.0, 360.0), Vec2::new(4.0, -12.0), true, 0);

        let step = (1..20).find_map(|t| hook.update(t * 16, std::slice::from_ref(&platform), &mut owner, &tuning));
        assert!(matches!(step, Some(HookStep::Attached { surface: Surface::Platform, .. })));
        assert_eq!(hook.rect.bottom(), platform.surface_top());
    }

    #[test]
    fn test_lost_when_leaving_arena() {
        let tuning = HookTuning::default();
        let mut owner = Dummy::at(Vec2::new(1200.0, 400.0));
        let mut hook = Hook::new(1, Side::Red, Vec2::new(SCREEN_WIDTH - 10.0, 300.0), Vec2::new(40.0, -2.0), true, 0);
        let step = (1..10).find_map(|t| hook.update(t * 16, &[], &mut owner, &tuning));
        assert_eq!(step, Some(HookStep::Lost));
        assert!(hook.is_done());
        assert_eq!(owner.impulse, None);
    }

    #[test]
    fn test_attach_measures_rope_and_nudges_owner() {
        let tuning = HookTuning::default();
        let anchor = Vec2::new(640.0, 100.0);
        let mut owner = Dummy::at(anchor + pendulum_offset(0.5, 200.0));
        let hook = ceiling_hook(anchor, &mut owner, &tuning);

        let tether = hook.tether().expect("attached");
        assert!((tether.anchor - anchor).length() < 1e-3);
        assert!((tether.rope_len - 200.0).abs() < 1e-3);
        assert!((tether.theta - 0.5).abs() < 1e-4);
        assert!(((owner.center - anchor).length() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_swing_step_keeps_rope_length() {
        let tuning = HookTuning::default();
        let anchor = Vec2::new(640.0, 100.0);
        let mut owner = Dummy::at(anchor + pendulum_offset(0.5, 200.0));
        let mut hook = ceiling_hook(anchor, &mut owner, &tuning);

        assert_eq!(hook.update(16, &[], &mut owner, &tuning), None);

        let omega = (tuning.swing_gravity / 200.0) * 0.5f32.sin() * tuning.swing_damping;
        let tether = hook.tether().expect("attached");
        assert!(((owner.center - anchor).length() - 200.0).abs() < 1e-2);
        assert!((tether.theta - (0.5 - omega)).abs() < 1e-4);
        assert!((tether.omega - omega).abs() < 1e-6);
        assert_eq!(tether.motion, RopeMotion::Swing);
    }

    #[test]
    fn test_swing_release_uses_boosted_tangent() {
        let tuning = HookTuning::default();
        let anchor = Vec2::new(640.0, 100.0);
        let mut owner = Dummy::at(anchor + pendulum_offset(1.0, 250.0));
        let mut hook = ceiling_hook(anchor, &mut owner, &tuning);

        for t in 1..30 {
            hook.update(t * 16, &[], &mut owner, &tuning);
        }
        hook.request_release();
        let step = hook.update(30 * 16, &[], &mut owner, &tuning);
        let Some(HookStep::Released { impulse, forced }) = step else {
            panic!("expected release, got {step:?}");
        };
        assert!(!forced);
        assert!(hook.is_done());
        assert_eq!(owner.impulse, Some(impulse));
        // Swinging back toward the bottom: moving left from the right side
        assert!(impulse.x < 0.0);
        assert!(impulse.length() <= tuning.max_release_speed + 1e-3);
    }

    #[test]
    fn test_swing_release_blends_half_tangent_into_faster_displacement() {
        let tuning = HookTuning::default();
        let tether = Tether {
            anchor: Vec2::new(640.0, 100.0),
            surface: Surface::Ceiling,
            attached_at: 0,
            rope_len: 100.0,
            theta: 0.0,
            omega: 0.01,
            motion: RopeMotion::Swing,
            owner_velocity: Vec2::new(0.0, 5.0),
        };
        // Tangent at the bottom of the arc is (-1, 0), slower than the displacement
        let expected = clamp_length(Vec2::new(-0.5, 5.0) * tuning.swing_release_boost, tuning.max_release_speed);
        assert!((release_impulse(&tether, &tuning) - expected).length() < 1e-4);

        let pulled = Tether {
            motion: RopeMotion::Pull,
            ..tether
        };
        let expected = clamp_length(Vec2::new(0.0, 5.0) * tuning.pull_release_boost, tuning.max_release_speed);
        assert!((release_impulse(&pulled, &tuning) - expected).length() < 1e-4);
    }

    #[test]
    fn test_ground_swing_stays_above_anchor() {
        let tuning = HookTuning::default();
        let mut owner = Dummy::at(Vec2::new(300.0, 400.0));
        let anchor = Vec2::new(120.0, GROUND_Y);
        let center = anchor - Vec2::new(-HOOK_SIZE.0 / 2.0, HOOK_SIZE.1 / 2.0);
        let mut hook = Hook::new(1, Side::Red, center, Vec2::new(-1.0, 1.0), true, 0);
        hook.latch(Surface::Ground, 0, &mut owner, &tuning);

        for t in 1..120 {
            if hook.update(t * 16, &[], &mut owner, &tuning).is_some() {
                break;
            }
            let feet = owner.center.y + HERO_SIZE.1 / 2.0;
            assert!(feet <= GROUND_Y + 1e-3, "tick {t}: feet at {feet}");
        }
    }

    #[test]
    fn test_release_request_ignored_while_flying() {
        let tuning = HookTuning::default();
        let mut owner = Dummy::at(Vec2::new(300.0, 600.0));
        let mut hook = Hook::new(1, Side::Red, Vec2::new(300.0, 500.0), Vec2::new(3.0, -10.0), true, 0);
        hook.request_release();
        assert!(!hook.release_requested);
        hook.update(16, &[], &mut owner, &tuning);
        assert!(matches!(hook.state, HookState::Flying { .. }));
    }

    #[test]
    fn test_pull_reels_in_and_snaps_to_ground() {
        let tuning = HookTuning::default();
        let mut owner = Dummy::at(Vec2::new(300.0, 300.0));
        // Anchor on the ground line to the right
        let anchor = Vec2::new(600.0, GROUND_Y);
        let center = anchor - Vec2::new(-HOOK_SIZE.0 / 2.0, HOOK_SIZE.1 / 2.0);
        let mut hook = Hook::new(1, Side::Red, center, Vec2::new(1.0, 1.0), true, 0);
        hook.latch(Surface::Ground, 0, &mut owner, &tuning);
        hook.set_pull(true);

        let mut last_len = hook.rope_len().expect("attached");
        let mut released = None;
        for t in 1..200 {
            match hook.update(t * 16, &[], &mut owner, &tuning) {
                Some(step) => {
                    released = Some(step);
                    break;
                }
                None => {
                    let len = hook.rope_len().expect("attached");
                    assert!(len <= last_len + 1e-4, "rope grew from {last_len} to {len}");
                    last_len = len;
                }
            }
        }
        assert!(matches!(released, Some(HookStep::Released { forced: false, .. })));
        assert!(owner.grounded);
        assert_eq!(owner.center + Vec2::new(0.0, HERO_SIZE.1 / 2.0), anchor);
    }

    #[test]
    fn test_ceiling_snap_hangs_below_anchor() {
        let tuning = HookTuning::default();
        let anchor = Vec2::new(640.0, 26.0);
        let mut owner = Dummy::at(anchor + Vec2::new(0.0, 120.0));
        let mut hook = ceiling_hook(anchor, &mut owner, &tuning);
        hook.set_pull(true);

        let step = (1..100).find_map(|t| hook.update(t * 16, &[], &mut owner, &tuning));
        assert!(matches!(step, Some(HookStep::Released { .. })));
        assert!(!owner.grounded);
        assert!((owner.center - (anchor + Vec2::new(0.0, HERO_SIZE.1 / 2.0))).length() < 1e-3);
    }

    #[test]
    fn test_safety_timeout_forces_release() {
        let tuning = HookTuning::default();
        let anchor = Vec2::new(640.0, 100.0);
        let mut owner = Dummy::at(anchor + pendulum_offset(0.8, 200.0));
        let mut hook = ceiling_hook(anchor, &mut owner, &tuning);

        assert_eq!(hook.update(tuning.detach_safety_ms - 1, &[], &mut owner, &tuning), None);
        let step = hook.update(tuning.detach_safety_ms, &[], &mut owner, &tuning);
        assert!(matches!(step, Some(HookStep::Released { forced: true, .. })));
        assert!(hook.is_done());
        assert!(owner.impulse.is_some());
    }

    proptest! {
        #[test]
        fn prop_swing_preserves_rope(theta in -1.4f32..1.4, len in 60.0f32..500.0, ticks in 1u64..60) {
            let tuning = HookTuning::default();
            let anchor = Vec2::new(640.0, 50.0);
            let mut owner = Dummy::at(anchor + pendulum_offset(theta, len));
            let mut hook = ceiling_hook(anchor, &mut owner, &tuning);
            let rope = hook.rope_len().unwrap();
            for t in 1..=ticks {
                prop_assert_eq!(hook.update(t * 16, &[], &mut owner, &tuning), None);
                prop_assert!((hook.rope_len().unwrap() - rope).abs() < 0.05);
                prop_assert!(((owner.center - anchor).length() - rope).abs() < 0.05);
            }
        }

        #[test]
        fn prop_pull_never_lengthens_rope(x in 100.0f32..1180.0, y in 100.0f32..600.0, ticks in 1u64..120) {
            let tuning = HookTuning::default();
            let anchor = Vec2::new(640.0, 26.0);
            let mut owner = Dummy::at(Vec2::new(x, y));
            let mut hook = ceiling_hook(anchor, &mut owner, &tuning);
            hook.set_pull(true);
            let mut last = hook.rope_len().unwrap();
            for t in 1..=ticks {
                if hook.update(t * 16, &[], &mut owner, &tuning).is_some() {
                    break;
                }
                let len = hook.rope_len().unwrap();
                prop_assert!(len >= 0.0);
                prop_assert!(len <= last + 1e-3);
                last = len;
            }
        }
    }
}
