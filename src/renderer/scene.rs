//! Scene geometry for one frame

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::QualityPreset;
use crate::sim::{BodySnapshot, WorldConfig};

/// Build the frame's triangles in world pixels (origin top-left, y down)
pub fn build_scene(snapshot: &BodySnapshot, world: &WorldConfig, quality: QualityPreset) -> Vec<Vertex> {
    let width = world.width as f32;
    let height = world.height as f32;
    let floor = world.floor_level as f32;
    let center = snapshot.pos.as_vec2();
    let radius = snapshot.radius as f32;

    let mut vertices = Vec::new();
    vertices.extend(shapes::rect(Vec2::ZERO, Vec2::new(width, height), colors::SKY));
    vertices.extend(shapes::rect(
        Vec2::new(0.0, floor),
        Vec2::new(width, height),
        colors::GROUND,
    ));
    vertices.extend(shapes::circle(
        center,
        radius,
        colors::BALL,
        quality.circle_segments(),
    ));

    // Rolling: one radian per radius travelled
    let roll = (snapshot.pos.x / f64::from(snapshot.radius)) as f32;
    vertices.extend(shapes::spoke(
        center,
        roll,
        radius * 0.8,
        (radius * 0.2).max(1.0),
        colors::BALL_SPOKE,
    ));

    vertices
}
