//! World state and round lifecycle
//!
//! Everything a round needs lives in [`GameState`]: both heroes, the arena
//! layout and every transient entity. The whole state serializes for
//! snapshots except the RNG, which is re-derived from the seed each round.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::banana::Banana;
use super::collision::Surface;
use super::hero::{Hero, Side};
use super::hook::Hook;
use super::platform::{Pickup, PickupKind, Platform};
use super::spawn;
use crate::tuning::Tuning;

/// Monotonic entity id allocator (ids start at 1)
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntityIds {
    last: u32,
}

impl EntityIds {
    pub fn next(&mut self) -> u32 {
        self.last += 1;
        self.last
    }
}

/// Outcome of the round so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundStatus {
    Ongoing,
    Won(Side),
    Draw,
}

/// Things that happened during a tick, for renderers and audio
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    BananaThrown { side: Side, banana: u32 },
    HookFired { side: Side, hook: u32 },
    /// Direct hit (`thrower == target` is a self-hit)
    BananaHit { target: Side, thrower: Side, damage: f32 },
    SelfHit { side: Side },
    SplatStepped { target: Side, damage: f32 },
    BananaSplatted { banana: u32, surface: Option<Surface> },
    /// Removed by the ground clutter cap
    SplatEvicted { banana: u32 },
    HookAttached { side: Side, surface: Surface },
    HookReleased { side: Side, forced: bool },
    HookLost { side: Side },
    PickupCollected { side: Side, kind: PickupKind },
    Regenerated { amount: f32 },
    RoundOver { status: RoundStatus },
}

#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Match seed; each round derives its own
    pub seed: u64,
    /// Rounds started so far (1 during the first round)
    pub round: u32,
    pub tuning: Tuning,
    /// Indexed by [`Side::index`]
    pub heroes: [Hero; 2],
    pub platforms: Vec<Platform>,
    pub bananas: Vec<Banana>,
    pub hooks: Vec<Hook>,
    pub pickups: Vec<Pickup>,
    /// Pending events since the last drain
    pub events: Vec<GameEvent>,
    /// Infinite bananas for both heroes
    pub test_mode: bool,
    pub(crate) ids: EntityIds,
    pub(crate) round_over_reported: bool,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a world and start its first round
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            round: 1,
            tuning,
            heroes: [Hero::new(Side::Red, &tuning.hero), Hero::new(Side::Blue, &tuning.hero)],
            platforms: Vec::new(),
            bananas: Vec::new(),
            hooks: Vec::new(),
            pickups: Vec::new(),
            events: Vec::new(),
            test_mode: false,
            ids: EntityIds::default(),
            round_over_reported: false,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.begin_round();
        state
    }

    fn round_seed(&self) -> u64 {
        self.seed
            .wrapping_add((self.round as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Re-initialize the current round from scratch.
    ///
    /// Heroes go back to their spawn points at full health, transient
    /// entities are cleared and the layout is regenerated. Calling this twice
    /// produces the same state as calling it once.
    pub fn begin_round(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.round_seed());
        self.ids = EntityIds::default();

        for hero in &mut self.heroes {
            hero.infinite_bananas = self.test_mode;
            hero.reset();
        }
        self.bananas.clear();
        self.hooks.clear();
        self.pickups.clear();
        self.events.clear();
        self.round_over_reported = false;

        self.platforms = spawn::spawn_platforms(&mut self.rng, &mut self.ids, self.tuning.world.platform_count);
        self.spawn_bananas_if_needed();

        log::info!(
            "round {} started: {} platforms, {} pickups",
            self.round,
            self.platforms.len(),
            self.pickups.len()
        );
    }

    /// Advance to a fresh round with a new layout
    pub fn next_round(&mut self) {
        self.round += 1;
        self.begin_round();
    }

    /// Timed banana drop; returns how many pickups were added
    pub fn spawn_bananas_if_needed(&mut self) -> usize {
        spawn::spawn_bananas_if_needed(
            &mut self.rng,
            &mut self.ids,
            &self.platforms,
            &mut self.pickups,
            &self.tuning.world,
        )
    }

    /// Timed heart drop
    pub fn spawn_heart_if_needed(&mut self) -> bool {
        spawn::spawn_heart_if_needed(
            &mut self.rng,
            &mut self.ids,
            &self.platforms,
            &mut self.pickups,
            &self.tuning.world,
        )
    }

    /// Passive healing for both heroes, capped at full health
    pub fn regenerate(&mut self, amount: f32) {
        for hero in &mut self.heroes {
            hero.heal(amount);
        }
        self.events.push(GameEvent::Regenerated { amount });
    }

    /// Toggle infinite bananas; takes effect immediately and on every reset
    pub fn set_test_mode(&mut self, enabled: bool) {
        if self.test_mode == enabled {
            return;
        }
        self.test_mode = enabled;
        for hero in &mut self.heroes {
            hero.infinite_bananas = enabled;
            if enabled {
                hero.has_banana = true;
            }
        }
        log::info!("test mode {}", if enabled { "on" } else { "off" });
    }

    pub fn hero(&self, side: Side) -> &Hero {
        &self.heroes[side.index()]
    }

    pub fn hero_mut(&mut self, side: Side) -> &mut Hero {
        &mut self.heroes[side.index()]
    }

    /// Live hook owned by `side`
    pub fn hook_of(&self, side: Side) -> Option<&Hook> {
        let id = self.hero(side).hook?;
        self.hooks.iter().find(|h| h.id == id)
    }

    pub fn round_status(&self) -> RoundStatus {
        let alive: Vec<Side> = Side::ALL
            .into_iter()
            .filter(|side| !self.hero(*side).is_dead())
            .collect();
        match alive.as_slice() {
            [] => RoundStatus::Draw,
            [survivor] => RoundStatus::Won(*survivor),
            _ => RoundStatus::Ongoing,
        }
    }

    pub fn round_over(&self) -> bool {
        self.round_status() != RoundStatus::Ongoing
    }

    pub fn round_winner(&self) -> Option<Side> {
        match self.round_status() {
            RoundStatus::Won(side) => Some(side),
            _ => None,
        }
    }

    pub fn round_draw(&self) -> bool {
        self.round_status() == RoundStatus::Draw
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Keep entity collections in id order
    pub fn normalize_order(&mut self) {
        self.bananas.sort_by_key(|b| b.id);
        self.hooks.sort_by_key(|h| h.id);
        self.pickups.sort_by_key(|p| p.id);
    }
}
