//! The player vehicle: speed, lane targeting and the reflex controller
//!
//! `target_lane` is the only lateral intent; `x` eases toward that lane's
//! centreline by a bounded step each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect};
use super::random::RandomSource;
use super::sensor::Sensor;
use crate::config::{SensorSpec, VehicleConfig};

/// Lane change direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneDirection {
    Left,
    Right,
}

/// Longitudinal intent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Throttle {
    Accelerate,
    Decelerate,
}

/// Output of the reflex controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maneuver {
    pub lane_change: Option<LaneDirection>,
    pub throttle: Throttle,
}

/// Sensor readings reduced to "something close" flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Surroundings {
    pub ahead: bool,
    pub left: bool,
    pub right: bool,
}

impl Surroundings {
    /// The reflex policy table
    pub fn maneuver(&self, rng: &mut dyn RandomSource) -> Maneuver {
        if !self.ahead {
            return Maneuver {
                lane_change: None,
                throttle: Throttle::Accelerate,
            };
        }

        let lane_change = match (self.left, self.right) {
            (true, false) => Some(LaneDirection::Right),
            (false, true) => Some(LaneDirection::Left),
            (false, false) => Some(if rng.coin() {
                LaneDirection::Left
            } else {
                LaneDirection::Right
            }),
            // Boxed in: brake and hold the lane
            (true, true) => None,
        };

        Maneuver {
            lane_change,
            throttle: Throttle::Decelerate,
        }
    }
}

/// The player vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    /// Centre of the body
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Radians, 0 = up the screen
    pub heading: f32,
    /// Units per tick; negative when reversing
    pub speed: f32,
    pub target_lane: usize,
    /// Centreline x of each lane, left to right
    pub lane_positions: Vec<f32>,
    pub sensors: Vec<Sensor>,
    acceleration: f32,
    friction: f32,
    max_speed: f32,
    max_reverse_speed: f32,
    lane_change_step: f32,
}

impl Vehicle {
    /// Place a vehicle on its start lane (middle lane by default) at height `y`
    pub fn new(config: &VehicleConfig, sensors: &[SensorSpec], lane_positions: Vec<f32>, y: f32) -> Self {
        let last_lane = lane_positions.len().saturating_sub(1);
        let target_lane = config
            .start_lane
            .unwrap_or(lane_positions.len() / 2)
            .min(last_lane);
        let x = lane_positions.get(target_lane).copied().unwrap_or_default();

        Self {
            x,
            y,
            width: config.width,
            height: config.height,
            heading: 0.0,
            speed: 0.0,
            target_lane,
            lane_positions,
            sensors: sensors.iter().map(Sensor::new).collect(),
            acceleration: config.acceleration,
            friction: config.friction,
            max_speed: config.max_speed,
            max_reverse_speed: config.max_reverse_speed,
            lane_change_step: config.lane_change_step,
        }
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn position(&self) -> Point {
        Vec2::new(self.x, self.y)
    }

    /// Body footprint, ignoring heading
    pub fn body(&self) -> Rect {
        Rect::from_center(self.position(), self.width, self.height)
    }

    /// X the vehicle is easing toward; the current x when there are no lanes
    pub fn target_x(&self) -> f32 {
        self.lane_positions
            .get(self.target_lane)
            .copied()
            .unwrap_or(self.x)
    }

    /// True once the vehicle sits exactly on its target lane centre
    pub fn is_settled(&self) -> bool {
        self.x == self.target_x()
    }

    /// Move the lane target one step, saturating at the outer lanes
    ///
    /// Returns true when the target actually changed.
    pub fn change_lane(&mut self, direction: LaneDirection) -> bool {
        let last_lane = self.lane_positions.len().saturating_sub(1);
        let next = match direction {
            LaneDirection::Left => self.target_lane.saturating_sub(1),
            LaneDirection::Right => (self.target_lane + 1).min(last_lane),
        };
        let changed = next != self.target_lane;
        if changed {
            log::debug!("Lane change {:?}: {} -> {}", direction, self.target_lane, next);
            self.target_lane = next;
        }
        changed
    }

    pub fn accelerate(&mut self) {
        self.speed += self.acceleration;
        self.limit_speed();
    }

    pub fn decelerate(&mut self) {
        self.speed -= self.acceleration;
        self.limit_speed();
    }

    pub fn apply_throttle(&mut self, throttle: Throttle) {
        match throttle {
            Throttle::Accelerate => self.accelerate(),
            Throttle::Decelerate => self.decelerate(),
        }
    }

    /// Bleed speed toward zero without crossing it
    pub fn apply_friction(&mut self) {
        if self.speed > 0.0 {
            self.speed = (self.speed - self.friction).max(0.0);
        } else if self.speed < 0.0 {
            self.speed = (self.speed + self.friction).min(0.0);
        }
    }

    pub fn limit_speed(&mut self) {
        self.speed = self.speed.clamp(self.max_reverse_speed, self.max_speed);
    }

    /// Ease `x` toward the target lane by at most `lane_change_step`
    pub fn step_toward_lane(&mut self) {
        let target = self.target_x();
        let delta = target - self.x;
        if delta.abs() <= self.lane_change_step {
            self.x = target;
        } else {
            self.x += self.lane_change_step.copysign(delta);
        }
    }

    /// Friction, speed limit and lateral easing for one tick
    pub fn update_motion(&mut self) {
        self.apply_friction();
        self.limit_speed();
        self.step_toward_lane();
    }

    /// Recast every sensor against the current obstacle set
    pub fn update_sensors(&mut self, obstacles: &[Rect]) {
        let origin = self.position();
        for sensor in &mut self.sensors {
            sensor.update(origin, self.heading, obstacles);
        }
    }

    /// Fold the sensor bank into ahead / left / right flags
    pub fn surroundings(&self, threshold: f32) -> Surroundings {
        let mut surroundings = Surroundings::default();
        for sensor in self.sensors.iter().filter(|s| s.is_near(threshold)) {
            surroundings.ahead |= sensor.mount.looks_ahead();
            surroundings.left |= sensor.mount.looks_left();
            surroundings.right |= sensor.mount.looks_right();
        }
        surroundings
    }

    /// Reflex decision from the latest readings
    ///
    /// Lane changes are only requested while settled on a lane centre.
    pub fn decide(&self, threshold: f32, rng: &mut dyn RandomSource) -> Maneuver {
        let mut maneuver = self.surroundings(threshold).maneuver(rng);
        if !self.is_settled() {
            maneuver.lane_change = None;
        }
        maneuver
    }

    /// Apply a maneuver through the same entry points manual control uses
    pub fn apply_maneuver(&mut self, maneuver: Maneuver) -> bool {
        let changed = maneuver
            .lane_change
            .is_some_and(|direction| self.change_lane(direction));
        self.apply_throttle(maneuver.throttle);
        changed
    }
}
