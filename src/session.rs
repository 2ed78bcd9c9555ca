//! Round lifecycle driver
//!
//! Wraps a [`GameState`] with everything the simulation leaves to its
//! caller: the title/playing/paused flow, the fixed-step accumulator, the
//! three timed world events and the restart delay after a round ends.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{GameState, RoundStatus, Side, TickInput, tick};
use crate::tuning::Tuning;

/// Maximum number of finished rounds kept in the history
pub const MAX_HISTORY: usize = 10;

/// Delay before a restart is accepted after quitting to the title
const QUIT_RESTART_DELAY_MS: u64 = 300;

/// Accumulator cost of one tick; frame time is added scaled by `FPS`
const TICK_COST: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for a round to be started (shows the last outcome, if any)
    Title,
    Playing,
    Paused,
}

/// A finished round
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundRecord {
    pub round: u32,
    pub status: RoundStatus,
    /// Unpaused play time
    pub duration_ms: u64,
}

/// Win/draw tally across rounds
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scoreboard {
    pub red_wins: u32,
    pub blue_wins: u32,
    pub draws: u32,
    /// Most recent first
    pub history: Vec<RoundRecord>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: RoundRecord) {
        match record.status {
            RoundStatus::Won(Side::Red) => self.red_wins += 1,
            RoundStatus::Won(Side::Blue) => self.blue_wins += 1,
            RoundStatus::Draw => self.draws += 1,
            RoundStatus::Ongoing => return,
        }
        self.history.insert(0, record);
        self.history.truncate(MAX_HISTORY);
    }

    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::Red => self.red_wins,
            Side::Blue => self.blue_wins,
        }
    }

    pub fn rounds_played(&self) -> u32 {
        self.red_wins + self.blue_wins + self.draws
    }

    /// Side with strictly more wins
    pub fn leader(&self) -> Option<Side> {
        match self.red_wins.cmp(&self.blue_wins) {
            std::cmp::Ordering::Greater => Some(Side::Red),
            std::cmp::Ordering::Less => Some(Side::Blue),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Next firing time of each timed world event (play clock)
#[derive(Debug, Clone, Copy, Default, Serialize)]
struct WorldTimers {
    banana_at: u64,
    regen_at: u64,
    heart_at: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub state: GameState,
    pub phase: SessionPhase,
    pub scoreboard: Scoreboard,
    /// Outcome of the most recent round, shown on the title screen
    pub last_outcome: Option<RoundStatus>,
    /// Wall time (sum of all frame times)
    wall_ms: u64,
    /// Ticks of play; only advances while a round is running unpaused
    ticks: u64,
    /// Unspent frame time in ms times `FPS`
    accumulator: u64,
    round_started_at: u64,
    restart_available_at: u64,
    rounds_started: u32,
    timers: WorldTimers,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            phase: SessionPhase::Title,
            scoreboard: Scoreboard::new(),
            last_outcome: None,
            wall_ms: 0,
            ticks: 0,
            accumulator: 0,
            round_started_at: 0,
            restart_available_at: 0,
            rounds_started: 0,
            timers: WorldTimers::default(),
        }
    }

    /// Current play clock, the timestamp fed to the simulation
    pub fn now(&self) -> u64 {
        self.ticks * 1000 / FPS as u64
    }

    pub fn can_start(&self) -> bool {
        self.phase == SessionPhase::Title && self.wall_ms >= self.restart_available_at
    }

    /// Start a round from the title screen; refused during the restart delay
    pub fn start_round(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        if self.rounds_started == 0 {
            self.state.begin_round();
        } else {
            self.state.next_round();
        }
        self.rounds_started += 1;
        self.phase = SessionPhase::Playing;
        self.last_outcome = None;
        self.accumulator = 0;
        let now = self.now();
        self.round_started_at = now;

        let world = self.state.tuning.world;
        self.timers = WorldTimers {
            banana_at: now + world.banana_spawn_interval_ms,
            regen_at: now + world.regen_interval_ms,
            heart_at: now + world.heart_spawn_interval_ms,
        };
        true
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            SessionPhase::Playing => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Playing,
            SessionPhase::Title => SessionPhase::Title,
        };
        self.accumulator = 0;
    }

    /// Abandon the paused round and go back to the title
    pub fn quit_to_title(&mut self) {
        if self.phase != SessionPhase::Paused {
            return;
        }
        self.phase = SessionPhase::Title;
        self.restart_available_at = self.wall_ms + QUIT_RESTART_DELAY_MS;
    }

    pub fn set_test_mode(&mut self, enabled: bool) {
        self.state.set_test_mode(enabled);
    }

    /// Feed one rendered frame's duration; runs as many fixed ticks as fit.
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, frame_ms: u64, input: &TickInput) -> u32 {
        self.wall_ms += frame_ms;
        if self.phase != SessionPhase::Playing {
            return 0;
        }

        self.accumulator += frame_ms.min(MAX_FRAME_MS) * FPS as u64;
        let mut substeps = 0;
        while self.accumulator >= TICK_COST && substeps < MAX_SUBSTEPS {
            self.step(input);
            self.accumulator -= TICK_COST;
            substeps += 1;
            if self.phase != SessionPhase::Playing {
                self.accumulator = 0;
                break;
            }
        }
        substeps
    }

    /// Run exactly one tick of play (no-op unless playing)
    pub fn step(&mut self, input: &TickInput) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        self.ticks += 1;
        self.fire_timers();
        let now = self.now();
        tick(&mut self.state, input, now);

        if self.state.round_over() {
            self.finish_round();
        }
    }

    fn fire_timers(&mut self) {
        let now = self.now();
        let world = self.state.tuning.world;

        if now >= self.timers.banana_at {
            self.timers.banana_at = now + world.banana_spawn_interval_ms;
            let added = self.state.spawn_bananas_if_needed();
            log::debug!("banana drop: {} added", added);
        }
        if now >= self.timers.regen_at {
            self.timers.regen_at = now + world.regen_interval_ms;
            self.state.regenerate(world.regen_amount);
        }
        if now >= self.timers.heart_at {
            self.timers.heart_at = now + world.heart_spawn_interval_ms;
            self.state.spawn_heart_if_needed();
        }
    }

    fn finish_round(&mut self) {
        let status = self.state.round_status();
        let record = RoundRecord {
            round: self.state.round,
            status,
            duration_ms: self.now() - self.round_started_at,
        };
        self.scoreboard.record(record);
        self.last_outcome = Some(status);
        self.phase = SessionPhase::Title;
        self.restart_available_at = self.wall_ms + self.state.tuning.world.restart_delay_ms;
        log::info!(
            "score: Red {} / Blue {} / draws {}",
            self.scoreboard.red_wins,
            self.scoreboard.blue_wins,
            self.scoreboard.draws
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PickupKind;

    fn playing() -> Session {
        let mut session = Session::new(31337, Tuning::default());
        assert!(session.start_round());
        session
    }

    fn run_for(session: &mut Session, ms: u64) {
        for _ in 0..ms * FPS as u64 / 1000 {
            session.step(&TickInput::default());
        }
    }

    #[test]
    fn test_starts_on_title() {
        let mut session = Session::new(1, Tuning::default());
        assert_eq!(session.phase, SessionPhase::Title);
        assert_eq!(session.advance(100, &TickInput::default()), 0);
        assert_eq!(session.now(), 0);
        assert!(session.start_round());
        assert_eq!(session.phase, SessionPhase::Playing);
        assert!(!session.start_round());
    }

    #[test]
    fn test_accumulator_runs_fixed_ticks() {
        let mut session = playing();
        assert_eq!(session.advance(10, &TickInput::default()), 0);
        assert_eq!(session.advance(10, &TickInput::default()), 1);
        assert_eq!(session.now(), TICK_MS);
        // Huge frames are capped
        let ran = session.advance(10_000, &TickInput::default());
        assert!(ran <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_accumulator_keeps_exact_rate() {
        let mut session = playing();
        let mut ran = 0;
        // Six seconds of 10 ms frames
        for _ in 0..600 {
            ran += session.advance(10, &TickInput::default());
        }
        assert_eq!(ran, 6 * FPS);
        assert_eq!(session.now(), 6000);

        // Rounded-down tick frames fall behind one tick in every 25
        let mut session = playing();
        let ran: u32 = (0..250).map(|_| session.advance(TICK_MS, &TickInput::default())).sum();
        assert_eq!(ran, 240);
        assert_eq!(session.now(), 4000);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut session = playing();
        assert_eq!(session.advance(20, &TickInput::default()), 1);
        session.toggle_pause();
        assert_eq!(session.phase, SessionPhase::Paused);
        let before = session.now();
        assert_eq!(session.advance(1000, &TickInput::default()), 0);
        assert_eq!(session.now(), before);
        session.toggle_pause();
        assert_eq!(session.advance(20, &TickInput::default()), 1);
    }

    #[test]
    fn test_banana_timer_refills() {
        let mut session = playing();
        session.state.pickups.clear();
        run_for(&mut session, 9_900);
        assert!(session.state.pickups.is_empty());
        run_for(&mut session, 200);
        assert!(session.state.pickups.iter().any(|p| p.kind == PickupKind::Banana));
    }

    #[test]
    fn test_regen_timer_heals_both() {
        let mut session = playing();
        session.state.hero_mut(Side::Red).take_damage(1.0);
        session.state.hero_mut(Side::Blue).take_damage(2.0);
        run_for(&mut session, 30_016);
        assert_eq!(session.state.hero(Side::Red).health, 4.5);
        assert_eq!(session.state.hero(Side::Blue).health, 3.5);
    }

    #[test]
    fn test_heart_timer() {
        let mut session = playing();
        run_for(&mut session, 59_000);
        assert!(!session.state.pickups.iter().any(|p| p.kind == PickupKind::Heart));
        run_for(&mut session, 1_100);
        assert!(session.state.pickups.iter().any(|p| p.kind == PickupKind::Heart));
    }

    #[test]
    fn test_round_end_records_and_gates_restart() {
        let mut session = playing();
        session.state.hero_mut(Side::Blue).take_damage(MAX_HEALTH);
        assert_eq!(session.advance(20, &TickInput::default()), 1);

        assert_eq!(session.phase, SessionPhase::Title);
        assert_eq!(session.last_outcome, Some(RoundStatus::Won(Side::Red)));
        assert_eq!(session.scoreboard.wins(Side::Red), 1);
        assert_eq!(session.scoreboard.leader(), Some(Side::Red));

        assert!(!session.start_round());
        session.advance(2_900, &TickInput::default());
        assert!(!session.start_round());
        session.advance(200, &TickInput::default());
        assert!(session.start_round());
        assert_eq!(session.state.round, 2);
        assert_eq!(session.state.hero(Side::Blue).health, MAX_HEALTH);
    }

    #[test]
    fn test_quit_to_title() {
        let mut session = playing();
        session.quit_to_title();
        assert_eq!(session.phase, SessionPhase::Playing);
        session.toggle_pause();
        session.quit_to_title();
        assert_eq!(session.phase, SessionPhase::Title);
        assert!(!session.start_round());
        session.advance(300, &TickInput::default());
        assert!(session.start_round());
    }

    #[test]
    fn test_scoreboard_history() {
        let mut board = Scoreboard::new();
        for round in 0..15 {
            let status = if round % 3 == 0 {
                RoundStatus::Draw
            } else {
                RoundStatus::Won(Side::Blue)
            };
            board.record(RoundRecord {
                round,
                status,
                duration_ms: 1000,
            });
        }
        board.record(RoundRecord {
            round: 99,
            status: RoundStatus::Ongoing,
            duration_ms: 0,
        });
        assert_eq!(board.rounds_played(), 15);
        assert_eq!(board.draws, 5);
        assert_eq!(board.blue_wins, 10);
        assert_eq!(board.history.len(), MAX_HISTORY);
        assert_eq!(board.history[0].round, 14);
        assert_eq!(board.leader(), Some(Side::Blue));
    }
}
