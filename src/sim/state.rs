//! Simulation state and core types
//!
//! One `Simulation` owns everything that changes from tick to tick.

use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::geometry::Rect;
use super::obstacle::ObstacleKind;
use super::random::{RandomSource, SeededRandom};
use super::road::Road;
use super::vehicle::{LaneDirection, Vehicle};
use crate::config::SimConfig;

/// Who drives the vehicle; the two controllers never run together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    /// Keyboard throttle and lane changes
    #[default]
    Manual,
    /// Sensor-driven reflex controller
    Reflex,
}

impl ControlMode {
    pub fn toggled(self) -> Self {
        match self {
            ControlMode::Manual => ControlMode::Reflex,
            ControlMode::Reflex => ControlMode::Manual,
        }
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Target lane changed
    LaneChanged {
        direction: LaneDirection,
        lane: usize,
    },
    /// Segments recycled to the top of the road this tick
    SegmentsRecycled { count: usize },
    /// Vehicle body started overlapping an obstacle
    Collision { kind: ObstacleKind },
    /// Control mode switched
    ModeChanged { mode: ControlMode },
}

/// Per-sensor view for renderers and HUDs
#[derive(Debug, Clone, Serialize)]
pub struct SensorSnapshot {
    pub reading: Option<f32>,
    pub ray_start: (f32, f32),
    pub ray_end: (f32, f32),
}

/// Read-only summary of the current state
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub mode: ControlMode,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub target_lane: usize,
    pub distance: f32,
    pub collisions: u32,
    pub sensors: Vec<SensorSnapshot>,
}

/// Complete simulation state
#[derive(Debug)]
pub struct Simulation {
    pub config: SimConfig,
    pub road: Road,
    pub vehicle: Vehicle,
    pub mode: ControlMode,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Total scrolled distance (negative contributions when reversing)
    pub distance: f32,
    /// Number of distinct collisions so far
    pub collisions: u32,
    /// Events from the most recent tick
    pub events: Vec<SimEvent>,
    pub(crate) in_collision: bool,
    pub(crate) rng: Box<dyn RandomSource>,
    /// Obstacle footprints for the current tick, reused between ticks
    pub(crate) obstacle_rects: Vec<Rect>,
}

impl Simulation {
    /// Create a simulation with a seeded generator
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        Self::with_random(config, Box::new(SeededRandom::new(seed)))
    }

    /// Create a simulation drawing from the given random source
    pub fn with_random(config: SimConfig, mut rng: Box<dyn RandomSource>) -> Result<Self, SimError> {
        config.validate()?;

        let road = Road::new(&config.road, &config.generation, rng.as_mut());
        let vehicle = Vehicle::new(
            &config.vehicle,
            &config.sensors,
            road.lane_positions(),
            config.road.viewport_height - config.vehicle.bottom_margin,
        );

        Ok(Self {
            config,
            road,
            vehicle,
            mode: ControlMode::default(),
            time_ticks: 0,
            distance: 0.0,
            collisions: 0,
            events: Vec::new(),
            in_collision: false,
            rng,
            obstacle_rects: Vec::new(),
        })
    }

    /// Start over on a fresh road, keeping the segment pool and random source
    pub fn restart(&mut self) {
        self.road.reset(self.rng.as_mut());
        self.vehicle = Vehicle::new(
            &self.config.vehicle,
            &self.config.sensors,
            self.road.lane_positions(),
            self.config.road.viewport_height - self.config.vehicle.bottom_margin,
        );
        self.time_ticks = 0;
        self.distance = 0.0;
        self.collisions = 0;
        self.events.clear();
        self.in_collision = false;
        log::info!("Simulation restarted");
    }

    pub fn set_mode(&mut self, mode: ControlMode) {
        if self.mode != mode {
            self.mode = mode;
            self.events.push(SimEvent::ModeChanged { mode });
            log::info!("Control mode: {:?}", mode);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ticks: self.time_ticks,
            mode: self.mode,
            x: self.vehicle.x,
            y: self.vehicle.y,
            speed: self.vehicle.speed,
            target_lane: self.vehicle.target_lane,
            distance: self.distance,
            collisions: self.collisions,
            sensors: self
                .vehicle
                .sensors
                .iter()
                .map(|s| SensorSnapshot {
                    reading: s.reading,
                    ray_start: (s.ray_start.x, s.ray_start.y),
                    ray_end: (s.ray_end.x, s.ray_end.y),
                })
                .collect(),
        }
    }

    /// Kind of the first obstacle overlapping the vehicle body, if any
    pub fn overlapping_obstacle(&self) -> Option<ObstacleKind> {
        let body = self.vehicle.body();
        self.road.segments.iter().find_map(|segment| {
            segment
                .obstacles
                .iter()
                .find(|o| o.world_rect(segment.origin_y).intersects(&body))
                .map(|o| o.kind)
        })
    }
}
