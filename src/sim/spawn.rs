//! Seeded layout provider for platforms and pickups
//!
//! Platforms are picked from a fixed candidate grid; pickups are dropped on
//! the ground or on platform surfaces without overlapping existing pickups.
//! All randomness comes from the caller's `Pcg32`.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;

use super::geom::Rect;
use super::platform::{Pickup, PickupKind, Platform};
use super::state::EntityIds;
use crate::consts::*;
use crate::tuning::WorldTuning;

const GRID_COLS: u32 = 5;
const GRID_ROWS: u32 = 5;
/// Space kept clear above the ground for heroes to run under platforms
const GRID_BOTTOM_MARGIN: f32 = 120.0;
/// Ground bananas keep this far from the side walls
const GROUND_EDGE_MARGIN: f32 = 60.0;
/// Pickups keep this far from platform edges
const PLATFORM_EDGE_MARGIN: f32 = 20.0;
const PLATFORM_BANANA_TRIES: usize = 12;
const HEART_TRIES: usize = 20;
const MAX_GROUND_BANANAS: usize = 1;

/// Candidate platform anchors (midtop), row-major
fn platform_candidates() -> Vec<Vec2> {
    let cell_w = (SCREEN_WIDTH / (GRID_COLS + 1) as f32).floor();
    let cell_h = ((GROUND_Y - GRID_BOTTOM_MARGIN) / (GRID_ROWS + 1) as f32).floor();
    (1..=GRID_ROWS)
        .flat_map(|row| (1..=GRID_COLS).map(move |col| Vec2::new(col as f32 * cell_w, row as f32 * cell_h)))
        .collect()
}

/// Fresh platform layout for a round
pub fn spawn_platforms(rng: &mut Pcg32, ids: &mut EntityIds, count: usize) -> Vec<Platform> {
    let mut candidates = platform_candidates();
    let mut platforms = Vec::with_capacity(count);

    while !candidates.is_empty() && platforms.len() < count {
        let midtop = candidates.remove(rng.random_range(0..candidates.len()));
        let width = PLATFORM_WIDTHS.choose(rng).copied().unwrap_or(PLATFORM_WIDTHS[0]);
        platforms.push(Platform::at_midtop(ids.next(), midtop, width));
    }

    platforms
}

/// Top up banana pickups to the cap: at most one on the ground, the rest on
/// platforms. Returns how many were added.
pub fn spawn_bananas_if_needed(
    rng: &mut Pcg32,
    ids: &mut EntityIds,
    platforms: &[Platform],
    pickups: &mut Vec<Pickup>,
    tuning: &WorldTuning,
) -> usize {
    let before = pickups.len();
    if count_kind(pickups, PickupKind::Banana) >= tuning.banana_pickup_cap {
        return 0;
    }

    spawn_banana_on_ground(rng, ids, pickups);
    while count_kind(pickups, PickupKind::Banana) < tuning.banana_pickup_cap {
        if !spawn_banana_on_platform(rng, ids, platforms, pickups) {
            break;
        }
    }

    pickups.len() - before
}

/// Place a heart on a random platform if none is present
pub fn spawn_heart_if_needed(
    rng: &mut Pcg32,
    ids: &mut EntityIds,
    platforms: &[Platform],
    pickups: &mut Vec<Pickup>,
    tuning: &WorldTuning,
) -> bool {
    if count_kind(pickups, PickupKind::Heart) >= tuning.heart_pickup_cap || platforms.is_empty() {
        return false;
    }

    for _ in 0..HEART_TRIES {
        let Some(platform) = platforms.choose(rng) else {
            return false;
        };
        let x = random_x_on(rng, platform);
        let candidate = Pickup::heart(0, x, platform.surface_top());
        if is_clear(&candidate.rect, pickups) {
            pickups.push(Pickup {
                id: ids.next(),
                ..candidate
            });
            return true;
        }
    }
    false
}

fn spawn_banana_on_ground(rng: &mut Pcg32, ids: &mut EntityIds, pickups: &mut Vec<Pickup>) -> bool {
    let on_ground = pickups
        .iter()
        .filter(|p| p.kind == PickupKind::Banana && p.on_ground())
        .count();
    if on_ground >= MAX_GROUND_BANANAS {
        return false;
    }

    let x = rng.random_range(GROUND_EDGE_MARGIN..=SCREEN_WIDTH - GROUND_EDGE_MARGIN).floor();
    let candidate = Pickup::banana(0, x, GROUND_Y);
    if !is_clear(&candidate.rect, pickups) {
        return false;
    }
    pickups.push(Pickup {
        id: ids.next(),
        ..candidate
    });
    true
}

fn spawn_banana_on_platform(
    rng: &mut Pcg32,
    ids: &mut EntityIds,
    platforms: &[Platform],
    pickups: &mut Vec<Pickup>,
) -> bool {
    for _ in 0..PLATFORM_BANANA_TRIES {
        let Some(platform) = platforms.choose(rng) else {
            return false;
        };
        let x = random_x_on(rng, platform);
        let candidate = Pickup::banana(0, x, platform.surface_top());
        if is_clear(&candidate.rect, pickups) {
            pickups.push(Pickup {
                id: ids.next(),
                ..candidate
            });
            return true;
        }
    }
    false
}

fn random_x_on(rng: &mut Pcg32, platform: &Platform) -> f32 {
    let left = platform.rect.left() + PLATFORM_EDGE_MARGIN;
    let right = platform.rect.right() - PLATFORM_EDGE_MARGIN;
    if right <= left {
        return platform.rect.center().x;
    }
    rng.random_range(left..=right).floor()
}

fn is_clear(rect: &Rect, pickups: &[Pickup]) -> bool {
    !pickups.iter().any(|p| rect.overlaps(&p.rect))
}

fn count_kind(pickups: &[Pickup], kind: PickupKind) -> usize {
    pickups.iter().filter(|p| p.kind == kind).count()
}
