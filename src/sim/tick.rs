//! Frame-stepped simulation tick
//!
//! One call per animation frame: sensors → controller → vehicle motion →
//! road scroll → lateral clamp → collision check.

use super::state::{ControlMode, SimEvent, Simulation};
use super::vehicle::LaneDirection;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Accelerate key held
    pub accelerate: bool,
    /// Brake/reverse key held
    pub decelerate: bool,
    /// Edge-triggered lane change (one per key release)
    pub lane_change: Option<LaneDirection>,
    /// Switch between manual and reflex control
    pub toggle_autopilot: bool,
}

/// Advance the simulation by one tick
pub fn tick(sim: &mut Simulation, input: &TickInput) {
    sim.events.clear();

    if input.toggle_autopilot {
        let mode = sim.mode.toggled();
        sim.set_mode(mode);
    }

    sim.time_ticks += 1;

    // Sensors see the road as it was drawn last frame
    sim.road.collect_obstacle_rects(&mut sim.obstacle_rects);
    sim.vehicle.update_sensors(&sim.obstacle_rects);

    let lane_change = match sim.mode {
        ControlMode::Manual => {
            if input.accelerate {
                sim.vehicle.accelerate();
            }
            if input.decelerate {
                sim.vehicle.decelerate();
            }
            match input.lane_change {
                Some(direction) if sim.vehicle.change_lane(direction) => Some(direction),
                _ => None,
            }
        }
        ControlMode::Reflex => {
            let maneuver = sim
                .vehicle
                .decide(sim.config.proximity_threshold, sim.rng.as_mut());
            if sim.vehicle.apply_maneuver(maneuver) {
                maneuver.lane_change
            } else {
                None
            }
        }
    };
    if let Some(direction) = lane_change {
        sim.events.push(SimEvent::LaneChanged {
            direction,
            lane: sim.vehicle.target_lane,
        });
    }

    sim.vehicle.update_motion();

    let recycled = sim
        .road
        .advance(sim.vehicle.speed, sim.vehicle.max_speed(), sim.rng.as_mut());
    sim.distance += sim.road.scroll_speed;
    if recycled > 0 {
        sim.events.push(SimEvent::SegmentsRecycled { count: recycled });
    }

    sim.road.clamp_lateral(&mut sim.vehicle);

    let overlap = sim.overlapping_obstacle();
    match overlap {
        Some(kind) if !sim.in_collision => {
            sim.collisions += 1;
            sim.events.push(SimEvent::Collision { kind });
            log::warn!(
                "Collision with {} at tick {} (total {})",
                kind.as_str(),
                sim.time_ticks,
                sim.collisions
            );
        }
        _ => {}
    }
    sim.in_collision = overlap.is_some();
}
