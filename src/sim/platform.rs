//! Static arena geometry and pickups

use glam::Vec2;
use serde::Serialize;

use super::geom::Rect;
use crate::consts::*;

/// A floating platform.
///
/// Only the bottom half is solid: heroes, bananas and hooks pass through the
/// top half and land on the top edge of the stand box.
#[derive(Debug, Clone, Serialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
}

impl Platform {
    pub fn new(id: u32, rect: Rect) -> Self {
        Self { id, rect }
    }

    /// Platform hanging from `midtop`
    pub fn at_midtop(id: u32, midtop: Vec2, width: f32) -> Self {
        Self::new(id, Rect::from_midtop(midtop, (width, PLATFORM_HEIGHT)))
    }

    /// Solid part (bottom half)
    pub fn stand_rect(&self) -> Rect {
        let half = self.rect.h / 2.0;
        Rect::new(self.rect.x, self.rect.y + half, self.rect.w, self.rect.h - half)
    }

    /// Y coordinate entities stand on
    pub fn surface_top(&self) -> f32 {
        self.stand_rect().top()
    }
}

/// What a pickup grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PickupKind {
    Banana,
    Heart,
}

/// A stationary pickup resting on the ground or a platform
#[derive(Debug, Clone, Serialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub rect: Rect,
}

impl Pickup {
    pub fn banana(id: u32, x: f32, y_bottom: f32) -> Self {
        Self {
            id,
            kind: PickupKind::Banana,
            rect: Rect::from_midbottom(Vec2::new(x, y_bottom), BANANA_PICKUP_SIZE),
        }
    }

    pub fn heart(id: u32, x: f32, y_bottom: f32) -> Self {
        Self {
            id,
            kind: PickupKind::Heart,
            rect: Rect::from_midbottom(Vec2::new(x, y_bottom), HEART_SIZE),
        }
    }

    /// Pickups are static.
    pub fn update(&mut self) {}

    pub fn on_ground(&self) -> bool {
        self.rect.bottom() >= GROUND_Y
    }
}
