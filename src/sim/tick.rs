//! Fixed timestep simulation tick
//!
//! One call advances the whole world by one frame. The order below matters:
//! later steps read positions and states written by earlier ones.

use serde::{Deserialize, Serialize};

use super::banana::{BananaState, BananaStep};
use super::hero::{HeroContext, HeroInput, Side};
use super::hook::HookStep;
use super::platform::PickupKind;
use super::state::{GameEvent, GameState, RoundStatus};

/// Input commands for a single tick, indexed by [`Side::index`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub players: [HeroInput; 2],
}

impl TickInput {
    pub fn new(red: HeroInput, blue: HeroInput) -> Self {
        Self { players: [red, blue] }
    }

    pub fn for_side(&self, side: Side) -> &HeroInput {
        &self.players[side.index()]
    }
}

/// Advance the world by one tick at timestamp `now` (ms)
pub fn tick(state: &mut GameState, input: &TickInput, now: u64) {
    advance_heroes(state, input, now);
    advance_bananas(state, now);
    advance_hooks(state, now);
    for pickup in &mut state.pickups {
        pickup.update();
    }

    collect_pickups(state);
    resolve_direct_hits(state, now);
    resolve_step_ons(state, now);
    enforce_ground_splat_cap(state);
    check_round_over(state);
    state.normalize_order();
}

fn advance_heroes(state: &mut GameState, input: &TickInput, now: u64) {
    for side in Side::ALL {
        let hero = &mut state.heroes[side.index()];
        let mut ctx = HeroContext {
            platforms: &state.platforms,
            bananas: &mut state.bananas,
            hooks: &mut state.hooks,
            ids: &mut state.ids,
            banana_tuning: &state.tuning.banana,
        };
        let actions = hero.update(input.for_side(side), now, &mut ctx);

        if let Some(banana) = actions.threw_banana {
            state.events.push(GameEvent::BananaThrown { side, banana });
        }
        if let Some(hook) = actions.fired_hook {
            state.events.push(GameEvent::HookFired { side, hook });
        }
    }
}

fn advance_bananas(state: &mut GameState, now: u64) {
    for banana in &mut state.bananas {
        let surface = match banana.update(now, &state.platforms, &state.tuning.banana) {
            Some(BananaStep::Splatted { surface }) => surface,
            Some(BananaStep::Settled { surface }) => Some(surface),
            Some(BananaStep::Despawned) | None => continue,
        };
        state.events.push(GameEvent::BananaSplatted {
            banana: banana.id,
            surface,
        });
    }
    state.bananas.retain(|b| !b.is_gone());
}

fn advance_hooks(state: &mut GameState, now: u64) {
    for hook in &mut state.hooks {
        let side = hook.owner;
        let owner = &mut state.heroes[side.index()];
        let event = match hook.update(now, &state.platforms, owner, &state.tuning.hook) {
            Some(HookStep::Attached { surface, .. }) => GameEvent::HookAttached { side, surface },
            Some(HookStep::Released { forced, .. }) => GameEvent::HookReleased { side, forced },
            Some(HookStep::Lost) => GameEvent::HookLost { side },
            None => continue,
        };
        state.events.push(event);
    }

    state.hooks.retain(|h| !h.is_done());
    for hero in &mut state.heroes {
        if let Some(id) = hero.hook
            && !state.hooks.iter().any(|h| h.id == id)
        {
            hero.hook = None;
        }
    }
}

fn collect_pickups(state: &mut GameState) {
    // Bananas only go to empty hands
    for side in Side::ALL {
        let hero = &mut state.heroes[side.index()];
        if hero.has_banana {
            continue;
        }
        if let Some(i) = state
            .pickups
            .iter()
            .position(|p| p.kind == PickupKind::Banana && p.rect.overlaps(&hero.rect))
        {
            state.pickups.remove(i);
            hero.has_banana = true;
            state.events.push(GameEvent::PickupCollected {
                side,
                kind: PickupKind::Banana,
            });
        }
    }

    let heal = state.tuning.world.heart_heal;
    for side in Side::ALL {
        let hero = &mut state.heroes[side.index()];
        if let Some(i) = state
            .pickups
            .iter()
            .position(|p| p.kind == PickupKind::Heart && p.rect.overlaps(&hero.rect))
        {
            state.pickups.remove(i);
            hero.heal(heal);
            state.events.push(GameEvent::PickupCollected {
                side,
                kind: PickupKind::Heart,
            });
        }
    }
}

fn resolve_direct_hits(state: &mut GameState, now: u64) {
    for banana in &mut state.bananas {
        for side in Side::ALL {
            if !banana.can_hit(side, now) {
                continue;
            }
            let hero = &mut state.heroes[side.index()];
            if !banana.rect.overlaps(&hero.hitbox()) {
                continue;
            }
            if banana.on_hit(hero) {
                log::debug!(
                    "banana {} ({}) hit {} -> {:.1} hp",
                    banana.id,
                    banana.owner.name(),
                    side.name(),
                    hero.health
                );
                state.events.push(GameEvent::BananaHit {
                    target: side,
                    thrower: banana.owner,
                    damage: banana.damage_direct,
                });
                if side == banana.owner {
                    state.events.push(GameEvent::SelfHit { side });
                }
            }
            break;
        }
    }
}

fn resolve_step_ons(state: &mut GameState, now: u64) {
    let tuning = state.tuning.banana;
    for banana in &mut state.bananas {
        if !matches!(banana.state, BananaState::SplattedPersist { .. }) {
            continue;
        }
        let step_box = banana.step_box(&tuning);
        for side in Side::ALL {
            let hero = &mut state.heroes[side.index()];
            if step_box.overlaps(&hero.hitbox()) && banana.stepped_on_by(hero, now, tuning.step_decay_ms) {
                log::debug!("{} stepped on splat {}", side.name(), banana.id);
                state.events.push(GameEvent::SplatStepped {
                    target: side,
                    damage: banana.damage_step,
                });
            }
        }
    }
}

/// Drop the oldest ground splats beyond the clutter cap
fn enforce_ground_splat_cap(state: &mut GameState) {
    let cap = state.tuning.world.ground_splat_cap;
    let mut ground: Vec<(u64, u32)> = state
        .bananas
        .iter()
        .filter(|b| b.is_ground_splat())
        .filter_map(|b| Some((b.landed_at()?, b.id)))
        .collect();
    if ground.len() <= cap {
        return;
    }

    ground.sort_unstable();
    let evicted: Vec<u32> = ground[..ground.len() - cap].iter().map(|(_, id)| *id).collect();
    state.bananas.retain(|b| !evicted.contains(&b.id));
    for banana in evicted {
        log::debug!("evicted ground splat {}", banana);
        state.events.push(GameEvent::SplatEvicted { banana });
    }
}

fn check_round_over(state: &mut GameState) {
    let status = state.round_status();
    if status == RoundStatus::Ongoing || state.round_over_reported {
        return;
    }
    state.round_over_reported = true;
    match status {
        RoundStatus::Won(side) => log::info!("round {} won by {}", state.round, side.name()),
        RoundStatus::Draw => log::info!("round {} ended in a draw", state.round),
        RoundStatus::Ongoing => {}
    }
    state.events.push(GameEvent::RoundOver { status });
}
