//! Per-frame animation state.
//!
//! [`update`] advances everything that moves once per tick. The look of each
//! edge and node at a given moment is a pure function of elapsed time and is
//! computed by [`edge_look`] and [`node_look`] when painting.

use std::f32::consts::TAU;

use neurofolio_core::{AnimationStyle, GraphLayout, Settings};

use crate::network::{Edge, Network, Node};

/// Camera distance from the origin in the orbit layout.
const CAMERA_DISTANCE: f32 = 10.0;
/// Half of the vertical field of view, in radians (50 degree camera).
const HALF_FOV: f32 = 25.0 * std::f32::consts::PI / 180.0;
/// Orbit rotation rate at speed 1: one revolution every two minutes.
const ORBIT_RADIANS_PER_SEC: f32 = TAU / 120.0;
/// Closest depth still drawn.
const NEAR_PLANE: f32 = 0.1;

/// Length of one animation tick. Particle speeds are per tick.
pub const TICK_MS: u64 = 16;

/// How an edge is stroked this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLook {
    /// Intensity of the selected waveform in `[0, 1]`.
    pub intensity: f32,
    pub opacity: f32,
    pub width: f32,
}

/// How a node is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLook {
    pub radius: f32,
    pub glow: f32,
    pub inner_radius: f32,
    pub inner_alpha: f32,
    pub outer_radius: f32,
    pub outer_alpha: f32,
}

/// Advance particles by `ticks` ticks and refresh node projections for
/// `seconds` since start. Zero ticks only reprojects.
pub fn update(network: &mut Network, settings: &Settings, seconds: f32, ticks: u32) {
    let speed = settings.speed;
    let width = network.params.width;
    let height = network.params.height;

    for _ in 0..ticks {
        for particle in &mut network.ambient {
            particle.advance(speed, width, height);
        }
        for edge in &mut network.edges {
            for particle in &mut edge.particles {
                particle.advance(speed);
            }
        }
    }

    let angle = seconds * speed * ORBIT_RADIANS_PER_SEC;
    let layout = network.params.layout;
    for node in &mut network.nodes {
        project(node, layout, width, height, angle);
    }
}

/// Refresh a node's canvas position.
fn project(node: &mut Node, layout: GraphLayout, width: f32, height: f32, angle: f32) {
    match layout {
        GraphLayout::Planar => {
            node.screen_x = node.x;
            node.screen_y = node.y;
            node.screen_scale = 1.0;
        }
        GraphLayout::Orbit => {
            let (sin, cos) = angle.sin_cos();
            let x = node.x * cos + node.z * sin;
            let z = -node.x * sin + node.z * cos;
            let depth = (CAMERA_DISTANCE - z).max(NEAR_PLANE);
            let focal = (height / 2.0) / HALF_FOV.tan();

            node.screen_x = width / 2.0 + x * focal / depth;
            node.screen_y = height / 2.0 - node.y * focal / depth;
            node.screen_scale = CAMERA_DISTANCE / depth;
        }
    }
}

/// Stroke of `edge` at `seconds` since start.
pub fn edge_look(network: &Network, edge: &Edge, settings: &Settings, seconds: f32) -> EdgeLook {
    let t = seconds * settings.speed;
    let from = &network.nodes[edge.source];
    let to = &network.nodes[edge.target];

    let intensity = match network.params.layout {
        GraphLayout::Planar => {
            let distance = (to.x - from.x).hypot(to.y - from.y);
            waveform(settings.style, t, distance * 0.01, edge.phase)
        }
        GraphLayout::Orbit => {
            let distance = ((to.x - from.x).powi(2)
                + (to.y - from.y).powi(2)
                + (to.z - from.z).powi(2))
            .sqrt();
            waveform(settings.style, t, distance * 2.0, 0.0)
        }
    };

    let opacity = match network.params.layout {
        GraphLayout::Planar => intensity * 0.8,
        GraphLayout::Orbit => intensity,
    };

    EdgeLook {
        intensity,
        opacity,
        width: edge.width,
    }
}

/// Connection waveform value in `[0, 1]`.
///
/// `travel` is the distance term of the wave; pulse ignores it.
fn waveform(style: AnimationStyle, t: f32, travel: f32, phase: f32) -> f32 {
    match style {
        AnimationStyle::Pulse => (t + phase).sin() * 0.3 + 0.7,
        AnimationStyle::Wave => (t * 2.0 - travel + phase).sin() * 0.5 + 0.5,
    }
}

/// Pulsing radius and glow of `node` at `seconds` since start.
pub fn node_look(node: &Node, settings: &Settings, seconds: f32) -> NodeLook {
    let t = seconds * node.pulse_speed * settings.speed + node.phase;
    let wobble = t.sin();
    let glow = node.glow * (0.8 + 0.2 * wobble);

    NodeLook {
        radius: node.radius * (1.0 + 0.3 * wobble) * node.screen_scale,
        glow,
        inner_radius: (5.0 + 3.0 * wobble) * node.screen_scale,
        inner_alpha: glow * 0.8,
        outer_radius: (15.0 + 5.0 * (t * 0.7).sin()) * node.screen_scale,
        outer_alpha: glow * 0.4,
    }
}
