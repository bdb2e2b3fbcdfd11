//! The scrolling road: a fixed pool of segments plus lateral limits

use super::geometry::Rect;
use super::random::RandomSource;
use super::segment::{ScrollBounds, Segment};
use super::vehicle::Vehicle;
use crate::config::{GenerationConfig, RoadConfig};

/// The road and its segment pool
#[derive(Debug, Clone)]
pub struct Road {
    pub center_x: f32,
    pub width: f32,
    pub lane_count: usize,
    pub segment_height: f32,
    pub viewport_height: f32,
    /// Displacement applied on the last advance
    pub scroll_speed: f32,
    /// Always `ceil(viewport_height / segment_height) + 1` entries
    pub segments: Vec<Segment>,
    generation: GenerationConfig,
}

impl Road {
    /// Build the road and its segment pool
    ///
    /// Segment origins start at `0, -h, -2h, ...`, one more than needed to
    /// cover the viewport so there is always one staged above it.
    pub fn new(config: &RoadConfig, generation: &GenerationConfig, rng: &mut dyn RandomSource) -> Self {
        let count = config.segment_count();
        let segments = (0..count)
            .map(|i| Segment::new(-(i as f32) * config.segment_height, config, generation, rng))
            .collect();

        log::info!(
            "Road initialized: {} lanes, {} segments of height {}",
            config.lane_count,
            count,
            config.segment_height
        );

        Self {
            center_x: config.center_x,
            width: config.width,
            lane_count: config.lane_count,
            segment_height: config.segment_height,
            viewport_height: config.viewport_height,
            scroll_speed: 0.0,
            segments,
            generation: generation.clone(),
        }
    }

    /// Put every pooled segment back at its starting origin with fresh obstacles
    pub fn reset(&mut self, rng: &mut dyn RandomSource) {
        for (i, segment) in self.segments.iter_mut().enumerate() {
            segment.origin_y = -(i as f32) * self.segment_height;
            segment.obstacles = segment.generate_obstacles(&self.generation, rng);
            segment.recycle_count = 0;
        }
        self.scroll_speed = 0.0;
    }

    pub fn bounds(&self) -> ScrollBounds {
        ScrollBounds {
            viewport_height: self.viewport_height,
            staging_top: -(self.segments.len() as f32) * self.segment_height,
        }
    }

    #[inline]
    pub fn left_edge(&self) -> f32 {
        self.center_x - self.width / 2.0
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.center_x + self.width / 2.0
    }

    /// Centreline x of every lane, left to right
    pub fn lane_positions(&self) -> Vec<f32> {
        let lane_width = self.width / self.lane_count as f32;
        (0..self.lane_count)
            .map(|i| self.left_edge() + lane_width / 2.0 + i as f32 * lane_width)
            .collect()
    }

    /// Scroll every segment, returning how many were recycled
    ///
    /// The displacement is clamped to `±max_speed` so obstacles can never
    /// jump further in one tick than the vehicle could travel.
    pub fn advance(&mut self, scroll_speed: f32, max_speed: f32, rng: &mut dyn RandomSource) -> usize {
        let max_speed = max_speed.abs();
        self.scroll_speed = scroll_speed.clamp(-max_speed, max_speed);

        let bounds = self.bounds();
        let mut recycled = 0;
        for segment in &mut self.segments {
            if segment.advance(self.scroll_speed, bounds, &self.generation, rng) {
                recycled += 1;
            }
        }
        recycled
    }

    /// Pin the vehicle back inside the road edges
    ///
    /// A positional clamp, not a collision response.
    pub fn clamp_lateral(&self, vehicle: &mut Vehicle) {
        let half_width = vehicle.width / 2.0;
        let left = self.left_edge();
        let right = self.right_edge();

        if vehicle.x - half_width < left {
            vehicle.x = left + half_width;
        } else if vehicle.x + half_width > right {
            vehicle.x = right - half_width;
        }
    }

    /// World-space footprints of every obstacle in the pool
    ///
    /// Fills `out` in place so the per-tick buffer can be reused.
    pub fn collect_obstacle_rects(&self, out: &mut Vec<Rect>) {
        out.clear();
        for segment in &self.segments {
            out.extend(segment.world_rects());
        }
    }

    pub fn obstacle_count(&self) -> usize {
        self.segments.iter().map(|s| s.obstacles.len()).sum()
    }
}
