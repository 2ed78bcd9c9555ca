//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, timestamps passed in explicitly
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod banana;
pub mod collision;
pub mod geom;
pub mod hero;
pub mod hook;
pub mod platform;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use banana::{Banana, BananaState, BananaStep};
pub use collision::{Landing, Surface, land_from_above, left_arena};
pub use geom::Rect;
pub use hero::{Hero, HeroActions, HeroContext, HeroInput, Pose, Side};
pub use hook::{Hook, HookState, HookStep, RopeMotion, Tether, Tethered};
pub use platform::{Pickup, PickupKind, Platform};
pub use state::{EntityIds, GameEvent, GameState, RoundStatus};
pub use tick::{TickInput, tick};
pub use trajectory::{TrajectoryParams, simulate_trajectory};
