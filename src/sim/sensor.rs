//! Ray-cast proximity sensors
//!
//! Each sensor casts one ray from the vehicle centre at a fixed offset from
//! the vehicle heading and reports the distance to the nearest obstacle edge
//! it crosses.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect, distance, segment_intersect};
use crate::config::SensorSpec;
use crate::heading_vector;

/// Where a sensor sits on the vehicle; the reflex controller groups readings by this
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorMount {
    FrontCenter,
    FrontLeft,
    FrontRight,
    LeftSide,
    RightSide,
}

impl SensorMount {
    pub fn looks_ahead(&self) -> bool {
        matches!(self, SensorMount::FrontCenter)
    }

    pub fn looks_left(&self) -> bool {
        matches!(self, SensorMount::FrontLeft | SensorMount::LeftSide)
    }

    pub fn looks_right(&self) -> bool {
        matches!(self, SensorMount::FrontRight | SensorMount::RightSide)
    }
}

/// A single distance sensor
#[derive(Debug, Clone)]
pub struct Sensor {
    pub mount: SensorMount,
    /// Radians relative to the vehicle heading
    pub angle_offset: f32,
    pub max_range: f32,
    /// Distance to the closest hit from the latest update
    pub reading: Option<f32>,
    /// Last cast ray, kept for drawing: ends at the hit point or at full range
    pub ray_start: Point,
    pub ray_end: Point,
}

impl Sensor {
    pub fn new(spec: &SensorSpec) -> Self {
        Self {
            mount: spec.mount,
            angle_offset: spec.angle_offset,
            max_range: spec.max_range,
            reading: None,
            ray_start: Vec2::ZERO,
            ray_end: Vec2::ZERO,
        }
    }

    /// Cast the ray and store the new reading
    ///
    /// `obstacles` is the full visible set; filtering is geometric. Every
    /// edge of every rectangle is tested and the closest hit wins. A hit
    /// only replaces the current best when strictly closer.
    pub fn update(&mut self, origin: Point, vehicle_heading: f32, obstacles: &[Rect]) -> Option<f32> {
        let end = origin + heading_vector(vehicle_heading + self.angle_offset) * self.max_range;

        let mut closest: Option<(f32, Point)> = None;
        for rect in obstacles {
            for (a, b) in rect.edges() {
                let Some(hit) = segment_intersect(origin, end, a, b) else {
                    continue;
                };
                let dist = distance(origin, hit);
                if closest.is_none_or(|(best, _)| dist < best) {
                    closest = Some((dist, hit));
                }
            }
        }

        self.ray_start = origin;
        self.ray_end = closest.map_or(end, |(_, hit)| hit);
        self.reading = closest.map(|(dist, _)| dist);
        self.reading
    }

    /// True when the last reading is at or below `threshold`
    pub fn is_near(&self, threshold: f32) -> bool {
        self.reading.is_some_and(|d| d <= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn front_sensor(range: f32) -> Sensor {
        Sensor::new(&SensorSpec::new(SensorMount::FrontCenter, 0.0, range))
    }

    #[test]
    fn test_reading_matches_distance_to_near_edge() {
        let mut sensor = front_sensor(150.0);
        let origin = Vec2::new(400.0, 500.0);
        // Bottom edge 100 units straight ahead
        let rect = Rect::from_center(Vec2::new(400.0, 380.0), 20.0, 40.0);

        let reading = sensor.update(origin, 0.0, &[rect]).unwrap();
        assert!((reading - 100.0).abs() < 1e-3);
        assert!((sensor.ray_end - Vec2::new(400.0, 400.0)).length() < 1e-3);
    }

    #[test]
    fn test_closest_of_several_obstacles_wins() {
        let mut sensor = front_sensor(200.0);
        let origin = Vec2::new(0.0, 0.0);
        let far = Rect::from_center(Vec2::new(0.0, -150.0), 20.0, 20.0);
        let near = Rect::from_center(Vec2::new(0.0, -60.0), 20.0, 20.0);

        let reading = sensor.update(origin, 0.0, &[far, near]).unwrap();
        assert!((reading - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let mut sensor = front_sensor(200.0);
        let origin = Vec2::new(0.0, -200.0);
        let rect = Rect::from_center(Vec2::new(0.0, -100.0), 20.0, 40.0);

        assert!(sensor.update(origin, 0.0, &[rect]).is_none());

        // Turned around, the ray enters through the top edge
        let reading = sensor.update(origin, std::f32::consts::PI, &[rect]).unwrap();
        assert!((reading - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_range_obstacle_ignored() {
        let mut sensor = front_sensor(150.0);
        let rect = Rect::from_center(Vec2::new(0.0, -200.0), 20.0, 40.0);
        assert_eq!(sensor.update(Vec2::ZERO, 0.0, &[rect]), None);
        assert_eq!(sensor.ray_end, Vec2::new(0.0, -150.0));
    }

    #[test]
    fn test_side_sensor_sees_sideways() {
        let mut sensor = Sensor::new(&SensorSpec::new(SensorMount::RightSide, FRAC_PI_2, 80.0));
        let rect = Rect::from_center(Vec2::new(60.0, 0.0), 20.0, 40.0);
        let reading = sensor.update(Vec2::ZERO, 0.0, &[rect]).unwrap();
        assert!((reading - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_rect_never_hits() {
        let mut sensor = front_sensor(150.0);
        // Zero-width rectangle lying along the ray
        let rect = Rect::new(Vec2::new(0.0, -100.0), Vec2::new(0.0, -60.0));
        assert_eq!(sensor.update(Vec2::ZERO, 0.0, &[rect]), None);
    }

    #[test]
    fn test_reading_recomputed_every_update() {
        let mut sensor = front_sensor(150.0);
        let rect = Rect::from_center(Vec2::new(0.0, -80.0), 20.0, 40.0);
        assert!(sensor.update(Vec2::ZERO, 0.0, &[rect]).is_some());
        assert!(sensor.is_near(120.0));
        assert_eq!(sensor.update(Vec2::ZERO, 0.0, &[]), None);
        assert!(!sensor.is_near(120.0));
    }

    #[test]
    fn test_mount_groups() {
        assert!(SensorMount::FrontCenter.looks_ahead());
        assert!(SensorMount::LeftSide.looks_left());
        assert!(SensorMount::FrontLeft.looks_left());
        assert!(SensorMount::FrontRight.looks_right());
        assert!(!SensorMount::FrontCenter.looks_left());
    }

    proptest! {
        #[test]
        fn prop_rect_beside_ray_never_hit(
            x_offset in 30.0f32..500.0,
            y in -300.0f32..300.0,
            w in 1.0f32..20.0,
            h in 1.0f32..100.0,
            left in any::<bool>(),
        ) {
            // Rectangle entirely left or right of the vertical ray's bounding segment
            let mut sensor = front_sensor(150.0);
            let cx = if left { -x_offset } else { x_offset };
            let rect = Rect::from_center(Vec2::new(cx, y), w, h);
            prop_assert_eq!(sensor.update(Vec2::ZERO, 0.0, &[rect]), None);
        }

        #[test]
        fn prop_beyond_range_ignored(
            gap in 0.5f32..400.0,
            range in 10.0f32..300.0,
            h in 1.0f32..50.0,
        ) {
            let mut sensor = front_sensor(range);
            let near_edge = range + gap;
            let rect = Rect::from_center(Vec2::new(0.0, -(near_edge + h / 2.0)), 20.0, h);
            prop_assert_eq!(sensor.update(Vec2::ZERO, 0.0, &[rect]), None);
        }

        #[test]
        fn prop_reading_never_exceeds_range(
            cx in -200.0f32..200.0,
            cy in -200.0f32..200.0,
            heading in -3.1f32..3.1,
        ) {
            let mut sensor = front_sensor(150.0);
            let rect = Rect::from_center(Vec2::new(cx, cy), 20.0, 40.0);
            if let Some(d) = sensor.update(Vec2::ZERO, heading, &[rect]) {
                prop_assert!(d >= 0.0);
                prop_assert!(d <= 150.0 + 1e-2);
            }
        }
    }
}
