//! Lane Runner - a scrolling multi-lane driving game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (sensors, road segments, lane logic)
//! - `renderer`: Immediate-mode 2D drawing behind an injected render target
//! - `input`: Keyboard state to per-tick input commands
//! - `config`: Tunable constants for road, vehicle, sensors and generation

pub mod config;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::SimConfig;

use glam::Vec2;

/// Game configuration defaults
pub mod consts {
    /// Canvas dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Road defaults
    pub const ROAD_WIDTH: f32 = 300.0;
    pub const LANE_COUNT: usize = 3;
    pub const SEGMENT_HEIGHT: f32 = 100.0;
    /// Upper bound on the pooled segment count
    pub const MAX_SEGMENT_COUNT: usize = 256;

    /// Vehicle body
    pub const VEHICLE_WIDTH: f32 = 50.0;
    pub const VEHICLE_HEIGHT: f32 = 80.0;
    /// Distance of the vehicle centre above the bottom of the viewport
    pub const VEHICLE_BOTTOM_MARGIN: f32 = 100.0;

    /// Vehicle handling (units per tick)
    pub const ACCELERATION: f32 = 0.2;
    pub const FRICTION: f32 = 0.05;
    pub const MAX_SPEED: f32 = 10.0;
    pub const MAX_REVERSE_SPEED: f32 = -3.0;
    /// Maximum lateral step toward the target lane centre
    pub const LANE_CHANGE_STEP: f32 = 5.0;

    /// Sensor ranges
    pub const FRONT_SENSOR_RANGE: f32 = 150.0;
    pub const DIAGONAL_SENSOR_RANGE: f32 = 120.0;
    pub const SIDE_SENSOR_RANGE: f32 = 120.0;
    /// Diagonal sensors sweep into the neighbouring lanes
    pub const DIAGONAL_SENSOR_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
    /// A reading at or below this counts as "obstacle near"
    pub const PROXIMITY_THRESHOLD: f32 = 120.0;

    /// Obstacle generation
    pub const ROADSIDE_CHANCE: f32 = 0.5;
    pub const LANE_OBSTACLE_CHANCE: f32 = 0.3;
    pub const SHOULDER_OFFSET: f32 = 30.0;
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
}

/// Unit direction for a heading (radians, 0 = up the screen, positive = clockwise)
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), -heading.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_heading_vector_axes() {
        let up = heading_vector(0.0);
        assert!(up.x.abs() < 1e-6 && (up.y + 1.0).abs() < 1e-6);

        let right = heading_vector(FRAC_PI_2);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);
    }
}
