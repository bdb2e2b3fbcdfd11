//! Roadside and in-lane obstacles, and the factory that builds them

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::geometry::Rect;
use crate::consts::{OBSTACLE_HEIGHT, OBSTACLE_WIDTH};

/// What an obstacle is; decides where it may be placed and how it is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Left shoulder decoration
    Tree,
    /// Right shoulder decoration
    Barrier,
    /// Blocks a lane
    Obstacle,
}

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Tree => "tree",
            ObstacleKind::Barrier => "barrier",
            ObstacleKind::Obstacle => "obstacle",
        }
    }

    /// Footprint (width, height)
    pub fn size(&self) -> (f32, f32) {
        (OBSTACLE_WIDTH, OBSTACLE_HEIGHT)
    }

    pub fn is_roadside(&self) -> bool {
        matches!(self, ObstacleKind::Tree | ObstacleKind::Barrier)
    }
}

impl FromStr for ObstacleKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(ObstacleKind::Tree),
            "barrier" => Ok(ObstacleKind::Barrier),
            "obstacle" => Ok(ObstacleKind::Obstacle),
            _ => Err(SimError::UnknownObstacleKind(s.to_string())),
        }
    }
}

/// A placed obstacle
///
/// `(x, y)` is the centre of the footprint. `x` is in world space, `y` is
/// relative to the owning segment's origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub kind: ObstacleKind,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f32, y: f32) -> Self {
        let (width, height) = kind.size();
        Self {
            x,
            y,
            kind,
            width,
            height,
        }
    }

    /// Build an obstacle from a kind name, failing on names the factory doesn't know
    pub fn spawn(kind: &str, x: f32, y: f32) -> Result<Self, SimError> {
        Ok(Self::new(kind.parse()?, x, y))
    }

    /// World-space footprint for a segment whose origin is at `origin_y`
    pub fn world_rect(&self, origin_y: f32) -> Rect {
        Rect::from_center(Vec2::new(self.x, origin_y + self.y), self.width, self.height)
    }
}
