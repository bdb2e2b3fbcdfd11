//! Road segments: fixed-height strips carrying their own obstacles
//!
//! Segments come from a fixed pool owned by the road. When one scrolls past
//! the bottom of the viewport it is moved back above the top and refilled
//! with fresh obstacles, so the road never ends and never allocates more
//! segments.

use super::geometry::Rect;
use super::obstacle::Obstacle;
use super::random::RandomSource;
use crate::config::{GenerationConfig, RoadConfig};

/// Vertical limits used to decide when a segment wraps around
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBounds {
    /// Segments whose origin passes below this are recycled to the top
    pub viewport_height: f32,
    /// Segments whose origin rises above this (reverse scrolling) wrap to the bottom
    pub staging_top: f32,
}

/// A strip of road and the obstacles on it
#[derive(Debug, Clone)]
pub struct Segment {
    /// Screen y of the segment's top edge
    pub origin_y: f32,
    pub height: f32,
    pub lane_count: usize,
    pub road_center_x: f32,
    pub road_width: f32,
    /// Obstacle `y` values are relative to `origin_y`
    pub obstacles: Vec<Obstacle>,
    /// How many times this segment has been recycled
    pub recycle_count: u32,
}

impl Segment {
    pub fn new(
        origin_y: f32,
        road: &RoadConfig,
        generation: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let mut segment = Self {
            origin_y,
            height: road.segment_height,
            lane_count: road.lane_count,
            road_center_x: road.center_x,
            road_width: road.width,
            obstacles: Vec::new(),
            recycle_count: 0,
        };
        segment.obstacles = segment.generate_obstacles(generation, rng);
        segment
    }

    #[inline]
    pub fn left_edge(&self) -> f32 {
        self.road_center_x - self.road_width / 2.0
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.road_center_x + self.road_width / 2.0
    }

    /// X coordinate of a lane's centreline
    pub fn lane_center(&self, lane: usize) -> f32 {
        let lane_width = self.road_width / self.lane_count as f32;
        self.left_edge() + lane_width / 2.0 + lane as f32 * lane_width
    }

    /// Roll a fresh obstacle set for this segment
    ///
    /// At most one shoulder object (tree on the left, barrier on the right,
    /// side chosen by a fair coin) and, independently, at most one in-lane
    /// obstacle centred on a uniformly chosen lane. A placement whose kind
    /// the factory rejects is logged and skipped.
    pub fn generate_obstacles(
        &self,
        generation: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> Vec<Obstacle> {
        let mut obstacles = Vec::with_capacity(2);

        if rng.chance(generation.roadside_chance) {
            let left_side = rng.coin();
            let (kind, x) = if left_side {
                (
                    generation.left_shoulder_kind.as_str(),
                    self.left_edge() - generation.shoulder_offset,
                )
            } else {
                (
                    generation.right_shoulder_kind.as_str(),
                    self.right_edge() + generation.shoulder_offset,
                )
            };
            let y = rng.range(self.height);
            place(&mut obstacles, kind, x, y);
        }

        if rng.chance(generation.lane_obstacle_chance) {
            let lane = rng.index(self.lane_count);
            let y = rng.range(self.height);
            place(&mut obstacles, generation.lane_kind.as_str(), self.lane_center(lane), y);
        }

        obstacles
    }

    /// Scroll by `delta`, recycling when the segment leaves the pool's range
    ///
    /// Returns true when the segment was recycled. Position and obstacles are
    /// replaced together.
    pub fn advance(
        &mut self,
        delta: f32,
        bounds: ScrollBounds,
        generation: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> bool {
        self.origin_y += delta;

        let new_origin = if self.origin_y > bounds.viewport_height {
            -self.height
        } else if self.origin_y < bounds.staging_top {
            bounds.viewport_height - self.height
        } else {
            return false;
        };

        let obstacles = self.generate_obstacles(generation, rng);
        self.origin_y = new_origin;
        self.obstacles = obstacles;
        self.recycle_count += 1;
        log::debug!(
            "Segment recycled to y={} with {} obstacles",
            self.origin_y,
            self.obstacles.len()
        );
        true
    }

    /// World-space footprints of this segment's obstacles
    pub fn world_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.obstacles.iter().map(|o| o.world_rect(self.origin_y))
    }
}

fn place(obstacles: &mut Vec<Obstacle>, kind: &str, x: f32, y: f32) {
    match Obstacle::spawn(kind, x, y) {
        Ok(obstacle) => obstacles.push(obstacle),
        Err(e) => log::warn!("Skipping obstacle placement at ({x}, {y}): {e}"),
    }
}
