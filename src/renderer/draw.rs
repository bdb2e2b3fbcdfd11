//! Draw routines for road, obstacles, vehicle and sensor rays

use glam::Vec2;

use super::target::RenderTarget;
use crate::sim::{ObstacleKind, Road, Segment, Simulation, Vehicle};

/// Colour palette
pub mod palette {
    pub const ROAD: &str = "gray";
    pub const LANE_MARKING: &str = "white";
    pub const ROAD_EDGE: &str = "yellow";
    pub const TREE: &str = "green";
    pub const BARRIER: &str = "gray";
    pub const OBSTACLE: &str = "black";
    pub const VEHICLE: &str = "red";
    pub const WHEEL: &str = "black";
    /// Sensor ray with a reading
    pub const RAY_HIT: &str = "red";
    /// Sensor ray seeing nothing
    pub const RAY_CLEAR: &str = "green";
}

const LANE_DASH: [f32; 2] = [20.0, 20.0];
const LANE_LINE_WIDTH: f32 = 3.0;
const EDGE_LINE_WIDTH: f32 = 5.0;
const RAY_LINE_WIDTH: f32 = 2.0;

const WHEEL_WIDTH: f32 = 10.0;
const FRONT_WHEEL_HEIGHT: f32 = 20.0;
const REAR_WHEEL_HEIGHT: f32 = 25.0;

fn obstacle_color(kind: ObstacleKind) -> &'static str {
    match kind {
        ObstacleKind::Tree => palette::TREE,
        ObstacleKind::Barrier => palette::BARRIER,
        ObstacleKind::Obstacle => palette::OBSTACLE,
    }
}

/// Draw one full frame: road first, vehicle on top
pub fn draw_frame(target: &mut dyn RenderTarget, sim: &Simulation) {
    let road_config = &sim.config.road;
    target.clear(road_config.viewport_width, road_config.viewport_height);
    draw_road(target, &sim.road);
    draw_vehicle(target, &sim.vehicle);
}

pub fn draw_road(target: &mut dyn RenderTarget, road: &Road) {
    for segment in &road.segments {
        draw_segment(target, segment);
    }

    for x in [road.left_edge(), road.right_edge()] {
        target.stroke_line(
            Vec2::new(x, 0.0),
            Vec2::new(x, road.viewport_height),
            EDGE_LINE_WIDTH,
            palette::ROAD_EDGE,
            None,
        );
    }
}

pub fn draw_segment(target: &mut dyn RenderTarget, segment: &Segment) {
    let top = segment.origin_y;
    target.fill_rect(
        segment.left_edge(),
        top,
        segment.road_width,
        segment.height,
        palette::ROAD,
    );

    let lane_width = segment.road_width / segment.lane_count as f32;
    for i in 1..segment.lane_count {
        let x = segment.left_edge() + i as f32 * lane_width;
        target.stroke_line(
            Vec2::new(x, top),
            Vec2::new(x, top + segment.height),
            LANE_LINE_WIDTH,
            palette::LANE_MARKING,
            Some(LANE_DASH),
        );
    }

    for obstacle in &segment.obstacles {
        let rect = obstacle.world_rect(top);
        target.fill_rect(
            rect.min.x,
            rect.min.y,
            rect.width(),
            rect.height(),
            obstacle_color(obstacle.kind),
        );
    }
}

pub fn draw_vehicle(target: &mut dyn RenderTarget, vehicle: &Vehicle) {
    for sensor in &vehicle.sensors {
        let color = if sensor.reading.is_some() {
            palette::RAY_HIT
        } else {
            palette::RAY_CLEAR
        };
        target.stroke_line(sensor.ray_start, sensor.ray_end, RAY_LINE_WIDTH, color, None);
    }

    let (w, h) = (vehicle.width, vehicle.height);
    target.save();
    target.translate(vehicle.x, vehicle.y);
    target.rotate(-vehicle.heading);

    target.fill_rect(-w / 2.0, -h / 2.0, w, h, palette::VEHICLE);

    // Rear wheels sit a quarter length behind centre, front wheels a quarter ahead
    let wheel_x = [-w / 2.0 - WHEEL_WIDTH / 2.0, w / 2.0 - WHEEL_WIDTH / 2.0];
    for x in wheel_x {
        target.fill_rect(
            x,
            h / 4.0 - REAR_WHEEL_HEIGHT / 2.0,
            WHEEL_WIDTH,
            REAR_WHEEL_HEIGHT,
            palette::WHEEL,
        );
        target.fill_rect(
            x,
            -h / 4.0 - FRONT_WHEEL_HEIGHT / 2.0,
            WHEEL_WIDTH,
            FRONT_WHEEL_HEIGHT,
            palette::WHEEL,
        );
    }

    target.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::renderer::target::{DrawCommand, RecordingTarget};
    use crate::sim::{Obstacle, ScriptedRandom, TickInput, tick};

    fn empty_sim() -> Simulation {
        let rng = Box::new(ScriptedRandom::constant(0.99));
        Simulation::with_random(SimConfig::default(), rng).unwrap()
    }

    #[test]
    fn test_frame_draws_every_segment_and_edges() {
        let sim = empty_sim();
        let mut target = RecordingTarget::new();
        draw_frame(&mut target, &sim);

        assert!(matches!(target.commands[0], DrawCommand::Clear { .. }));
        // Road fills share the barrier grey, but there are no obstacles here
        assert_eq!(target.rects_with_color(palette::ROAD).count(), 7);
        assert_eq!(target.lines_with_color(palette::ROAD_EDGE).count(), 2);
        // Two dashed lane markings per segment
        let dashed = target
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { dash: Some(_), .. }))
            .count();
        assert_eq!(dashed, 14);
    }

    #[test]
    fn test_vehicle_drawn_with_wheels_inside_save_restore() {
        let sim = empty_sim();
        let mut target = RecordingTarget::new();
        draw_vehicle(&mut target, &sim.vehicle);

        assert_eq!(target.rects_with_color(palette::VEHICLE).count(), 1);
        assert_eq!(target.rects_with_color(palette::WHEEL).count(), 4);
        let saves = target.commands.iter().filter(|c| **c == DrawCommand::Save).count();
        let restores = target.commands.iter().filter(|c| **c == DrawCommand::Restore).count();
        assert_eq!((saves, restores), (1, 1));
        assert_eq!(target.commands.last(), Some(&DrawCommand::Restore));
    }

    #[test]
    fn test_ray_colour_follows_reading() {
        let mut sim = empty_sim();
        let lane_x = sim.vehicle.x;
        let segment = &mut sim.road.segments[1];
        segment.origin_y = 300.0;
        segment
            .obstacles
            .push(Obstacle::new(ObstacleKind::Obstacle, lane_x, 80.0));
        tick(&mut sim, &TickInput::default());

        let mut target = RecordingTarget::new();
        draw_vehicle(&mut target, &sim.vehicle);
        assert_eq!(target.lines_with_color(palette::RAY_HIT).count(), 1);
        assert_eq!(target.lines_with_color(palette::RAY_CLEAR).count(), 4);
    }

    #[test]
    fn test_obstacles_drawn_at_world_position() {
        let mut sim = empty_sim();
        let segment = &mut sim.road.segments[0];
        segment.origin_y = 100.0;
        segment.obstacles.push(Obstacle::new(ObstacleKind::Tree, 220.0, 50.0));

        let mut target = RecordingTarget::new();
        draw_segment(&mut target, &sim.road.segments[0]);
        let tree = target.rects_with_color(palette::TREE).next().unwrap();
        assert_eq!(
            *tree,
            DrawCommand::FillRect {
                x: 210.0,
                y: 130.0,
                width: 20.0,
                height: 40.0,
                color: palette::TREE.to_string(),
            }
        );
    }
}
