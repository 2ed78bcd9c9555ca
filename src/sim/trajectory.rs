//! Aim preview arcs
//!
//! Forward-integrates a launch the same way a projectile flies so renderers
//! can draw a dotted guide before the player commits to a throw or hook.

use glam::Vec2;

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryParams {
    /// Added to vertical speed each step
    pub gravity: f32,
    /// Terminal fall speed, if any
    pub max_fall: Option<f32>,
    /// Upper bound on returned points
    pub steps: usize,
}

/// Predicted positions after each step, ending early at the ground line or
/// once the point leaves the arena sideways.
pub fn simulate_trajectory(start: Vec2, velocity: Vec2, params: TrajectoryParams) -> Vec<Vec2> {
    let mut pos = start;
    let mut vel = velocity;
    let mut points = Vec::with_capacity(params.steps);

    for _ in 0..params.steps {
        pos += vel;
        vel.y += params.gravity;
        if let Some(max_fall) = params.max_fall {
            vel.y = vel.y.min(max_fall);
        }
        points.push(pos);
        if pos.y >= GROUND_Y || pos.x < 0.0 || pos.x > SCREEN_WIDTH {
            break;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(steps: usize) -> TrajectoryParams {
        TrajectoryParams {
            gravity: 0.5,
            max_fall: Some(18.0),
            steps,
        }
    }

    #[test]
    fn test_first_point_is_one_step_out() {
        let points = simulate_trajectory(Vec2::new(100.0, 300.0), Vec2::new(10.0, -5.0), params(3));
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], Vec2::new(110.0, 295.0));
        assert_eq!(points[1], Vec2::new(120.0, 290.5));
    }

    #[test]
    fn test_stops_at_ground() {
        let points = simulate_trajectory(Vec2::new(640.0, 600.0), Vec2::new(0.0, 10.0), params(500));
        let last = *points.last().expect("points");
        assert!(last.y >= GROUND_Y);
        assert!(points.len() < 500);
    }

    #[test]
    fn test_stops_leaving_arena() {
        let points = simulate_trajectory(Vec2::new(1200.0, 100.0), Vec2::new(30.0, 0.0), params(500));
        assert!(points.last().expect("points").x > SCREEN_WIDTH);
        assert!(points.len() <= 3);
    }

    #[test]
    fn test_fall_speed_is_capped() {
        let points = simulate_trajectory(Vec2::new(640.0, -2000.0), Vec2::ZERO, params(200));
        let deltas: Vec<f32> = points.windows(2).map(|w| w[1].y - w[0].y).collect();
        assert!(deltas.iter().all(|d| *d <= 18.0 + 1e-4));
    }

    #[test]
    fn test_zero_steps() {
        assert!(simulate_trajectory(Vec2::ZERO, Vec2::ONE, params(0)).is_empty());
    }
}
