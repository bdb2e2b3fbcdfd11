//! Simulation module
//!
//! All driving logic lives here. This module must stay free of rendering
//! and platform code:
//! - One tick per frame, no wall-clock time
//! - Randomness only through `RandomSource`
//! - Fixed segment pool, allocated once

pub mod error;
pub mod geometry;
pub mod obstacle;
pub mod random;
pub mod road;
pub mod segment;
pub mod sensor;
pub mod state;
pub mod tick;
pub mod vehicle;

pub use error::SimError;
pub use geometry::{Point, Rect, distance, segment_intersect};
pub use obstacle::{Obstacle, ObstacleKind};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use road::Road;
pub use segment::{ScrollBounds, Segment};
pub use sensor::{Sensor, SensorMount};
pub use state::{ControlMode, SensorSnapshot, SimEvent, Simulation, Snapshot};
pub use tick::{TickInput, tick};
pub use vehicle::{LaneDirection, Maneuver, Surroundings, Throttle, Vehicle};
