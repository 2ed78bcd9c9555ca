//! Landing and latching against the arena's static geometry
//!
//! Everything that falls (heroes, bananas) lands with the same rule: the
//! ground line always stops it, and a platform's stand box stops it only when
//! the previous bottom edge was at or above the stand surface. Moving upward
//! through a platform is always allowed.

use serde::Serialize;

use super::geom::Rect;
use super::platform::Platform;
use crate::consts::*;

/// Surface an entity came to rest on (or latched to)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Surface {
    Ground,
    Platform,
    Ceiling,
}

/// Result of a landing check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    pub surface: Surface,
    /// Y the entity's bottom edge should be snapped to
    pub top: f32,
}

/// Check whether `rect` (which had its bottom at `prev_bottom` last tick) landed.
///
/// The ground wins over platforms; among platforms the first in iteration
/// order wins, which keeps resolution deterministic.
pub fn land_from_above(prev_bottom: f32, rect: &Rect, platforms: &[Platform]) -> Option<Landing> {
    if rect.bottom() >= GROUND_Y {
        return Some(Landing {
            surface: Surface::Ground,
            top: GROUND_Y,
        });
    }

    platforms.iter().find_map(|platform| {
        let stand = platform.stand_rect();
        let top = stand.top();
        let horizontal = rect.right() > stand.left() && rect.left() < stand.right();
        (horizontal && prev_bottom <= top && rect.bottom() >= top).then_some(Landing {
            surface: Surface::Platform,
            top,
        })
    })
}

/// First platform whose stand box overlaps `rect`
pub fn touching_stand<'a>(rect: &Rect, platforms: &'a [Platform]) -> Option<&'a Platform> {
    platforms.iter().find(|p| rect.overlaps(&p.stand_rect()))
}

/// Entirely past either side wall
pub fn left_arena(rect: &Rect) -> bool {
    rect.right() < 0.0 || rect.left() > SCREEN_WIDTH
}
