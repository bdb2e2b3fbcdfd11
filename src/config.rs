//! Simulation configuration
//!
//! Plain numeric parameters. `Default` reproduces the stock game; a host can
//! override any subset by passing a JSON document to [`SimConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::error::SimError;
use crate::sim::sensor::SensorMount;

/// Road and viewport geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Horizontal centre of the road
    pub center_x: f32,
    pub width: f32,
    pub lane_count: usize,
    pub segment_height: f32,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            center_x: VIEWPORT_WIDTH / 2.0,
            width: ROAD_WIDTH,
            lane_count: LANE_COUNT,
            segment_height: SEGMENT_HEIGHT,
        }
    }
}

impl RoadConfig {
    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.width / self.lane_count as f32
    }

    /// X coordinate of a lane's centreline
    #[inline]
    pub fn lane_center(&self, lane: usize) -> f32 {
        let lane_width = self.lane_width();
        self.center_x - self.width / 2.0 + lane_width / 2.0 + lane as f32 * lane_width
    }

    /// Number of pooled segments needed to cover the viewport plus one staged above it
    pub fn segment_count(&self) -> usize {
        ((self.viewport_height / self.segment_height).ceil() as usize).saturating_add(1)
    }
}

/// Vehicle body and handling, all rates in units per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub width: f32,
    pub height: f32,
    /// Distance of the vehicle centre above the bottom of the viewport
    pub bottom_margin: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,
    /// Negative: the fastest the vehicle may roll backwards
    pub max_reverse_speed: f32,
    /// Maximum lateral step per tick while easing toward the target lane
    pub lane_change_step: f32,
    /// Starting lane; the middle lane when unset
    pub start_lane: Option<usize>,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            width: VEHICLE_WIDTH,
            height: VEHICLE_HEIGHT,
            bottom_margin: VEHICLE_BOTTOM_MARGIN,
            acceleration: ACCELERATION,
            friction: FRICTION,
            max_speed: MAX_SPEED,
            max_reverse_speed: MAX_REVERSE_SPEED,
            lane_change_step: LANE_CHANGE_STEP,
            start_lane: None,
        }
    }
}

/// Mounting of a single proximity sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSpec {
    pub mount: SensorMount,
    /// Radians relative to the vehicle heading (positive = clockwise)
    pub angle_offset: f32,
    pub max_range: f32,
}

impl SensorSpec {
    pub fn new(mount: SensorMount, angle_offset: f32, max_range: f32) -> Self {
        Self {
            mount,
            angle_offset,
            max_range,
        }
    }

    /// The stock five-sensor bank
    pub fn default_bank() -> Vec<SensorSpec> {
        use std::f32::consts::FRAC_PI_2;
        vec![
            SensorSpec::new(SensorMount::FrontCenter, 0.0, FRONT_SENSOR_RANGE),
            SensorSpec::new(SensorMount::FrontLeft, -DIAGONAL_SENSOR_ANGLE, DIAGONAL_SENSOR_RANGE),
            SensorSpec::new(SensorMount::FrontRight, DIAGONAL_SENSOR_ANGLE, DIAGONAL_SENSOR_RANGE),
            SensorSpec::new(SensorMount::LeftSide, -FRAC_PI_2, SIDE_SENSOR_RANGE),
            SensorSpec::new(SensorMount::RightSide, FRAC_PI_2, SIDE_SENSOR_RANGE),
        ]
    }
}

/// Obstacle placement policy for freshly generated segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Probability that a segment gets one shoulder object
    pub roadside_chance: f32,
    /// Independent probability of one in-lane obstacle
    pub lane_obstacle_chance: f32,
    /// Distance of shoulder objects outside the road edge
    pub shoulder_offset: f32,
    /// Factory kind names for each placement slot
    pub left_shoulder_kind: String,
    pub right_shoulder_kind: String,
    pub lane_kind: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            roadside_chance: ROADSIDE_CHANCE,
            lane_obstacle_chance: LANE_OBSTACLE_CHANCE,
            shoulder_offset: SHOULDER_OFFSET,
            left_shoulder_kind: "tree".to_string(),
            right_shoulder_kind: "barrier".to_string(),
            lane_kind: "obstacle".to_string(),
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub road: RoadConfig,
    pub vehicle: VehicleConfig,
    pub sensors: Vec<SensorSpec>,
    pub generation: GenerationConfig,
    /// A sensor reading at or below this distance counts as an obstacle nearby
    pub proximity_threshold: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            road: RoadConfig::default(),
            vehicle: VehicleConfig::default(),
            sensors: SensorSpec::default_bank(),
            generation: GenerationConfig::default(),
            proximity_threshold: PROXIMITY_THRESHOLD,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        let road = &self.road;
        if road.lane_count == 0 {
            return Err(SimError::InvalidConfig("lane_count must be at least 1".into()));
        }
        if road.width <= 0.0 || road.segment_height <= 0.0 || road.viewport_height <= 0.0 {
            return Err(SimError::InvalidConfig(
                "road width, segment height and viewport height must be positive".into(),
            ));
        }
        let visible = (road.viewport_height / road.segment_height).ceil();
        if visible >= MAX_SEGMENT_COUNT as f32 {
            return Err(SimError::InvalidConfig(format!(
                "segment_height {} too small: more than {MAX_SEGMENT_COUNT} segments",
                road.segment_height
            )));
        }
        if road.lane_width() < self.vehicle.width {
            return Err(SimError::InvalidConfig(format!(
                "lane width {} narrower than vehicle width {}",
                road.lane_width(),
                self.vehicle.width
            )));
        }
        if let Some(lane) = self.vehicle.start_lane {
            if lane >= road.lane_count {
                return Err(SimError::InvalidConfig(format!(
                    "start_lane {lane} out of range for {} lanes",
                    road.lane_count
                )));
            }
        }
        if self.vehicle.max_speed < 0.0 || self.vehicle.max_reverse_speed > 0.0 {
            return Err(SimError::InvalidConfig(
                "max_speed must be >= 0 and max_reverse_speed <= 0".into(),
            ));
        }
        if self.sensors.is_empty() {
            return Err(SimError::InvalidConfig("at least one sensor is required".into()));
        }
        if self.sensors.iter().any(|s| s.max_range <= 0.0) {
            return Err(SimError::InvalidConfig("sensor range must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sensors.len(), 5);
        assert_eq!(config.road.segment_count(), 7);
    }

    #[test]
    fn test_lane_centers() {
        let road = RoadConfig {
            center_x: 400.0,
            width: 300.0,
            lane_count: 3,
            ..Default::default()
        };
        assert_eq!(road.lane_center(0), 300.0);
        assert_eq!(road.lane_center(1), 400.0);
        assert_eq!(road.lane_center(2), 500.0);
    }

    #[test]
    fn test_partial_json_override() {
        let config = SimConfig::from_json(r#"{ "road": { "lane_count": 4 }, "proximity_threshold": 90.0 }"#)
            .unwrap();
        assert_eq!(config.road.lane_count, 4);
        assert_eq!(config.road.segment_height, SEGMENT_HEIGHT);
        assert_eq!(config.proximity_threshold, 90.0);
        assert_eq!(config.generation.lane_kind, "obstacle");
    }

    #[test]
    fn test_json_round_trip_keeps_sensor_bank() {
        let config = SimConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_lanes_narrower_than_vehicle_rejected() {
        // 300 / 7 ≈ 42.9 < 50: the edge clamp would hold the vehicle off the lane centre
        let mut config = SimConfig::default();
        config.road.lane_count = 7;
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

        config.road.lane_count = 6;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tiny_segment_height_rejected() {
        let mut config = SimConfig::default();
        config.road.segment_height = 1e-30;
        assert_eq!(config.road.segment_count(), usize::MAX);
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

        config.road.segment_height = 10.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut config = SimConfig::default();
        config.road.lane_count = 0;
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

        let mut config = SimConfig::default();
        config.vehicle.start_lane = Some(3);
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.sensors.clear();
        assert!(config.validate().is_err());

        assert!(matches!(
            SimConfig::from_json("{ not json"),
            Err(SimError::ConfigParse(_))
        ));
    }
}
