//! Layered network generation.

use std::f32::consts::TAU;

use neurofolio_core::{GraphLayout, Settings};
use rand::Rng;

use crate::color::{ORBIT_PALETTE, PLANAR_PALETTE, Rgb};

/// Width of one terminal cell in canvas pixels.
pub const CELL_WIDTH_PX: f32 = 8.0;
/// Height of one terminal cell in canvas pixels.
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Resting glow intensity.
pub const GLOW_REST: f32 = 0.7;
/// Highest glow intensity reachable through pointer interaction.
pub const GLOW_MAX: f32 = 1.5;

/// Depth between consecutive rings in the orbit layout.
const ORBIT_LAYER_SPACING: f32 = 4.0;

/// A single node ("neuron").
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Canvas position (planar) or world position (orbit).
    pub x: f32,
    pub y: f32,
    /// Depth, zero in the planar layout.
    pub z: f32,
    /// Projected canvas position, refreshed every frame.
    pub screen_x: f32,
    pub screen_y: f32,
    /// Perspective scale of the last projection.
    pub screen_scale: f32,
    /// Base radius in canvas pixels.
    pub radius: f32,
    pub color: Rgb,
    pub layer: u8,
    /// Phase offset of the pulse.
    pub phase: f32,
    /// Pulse rate multiplier.
    pub pulse_speed: f32,
    /// Current glow intensity.
    pub glow: f32,
}

/// A data particle travelling along an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowParticle {
    /// Progress along the edge in `[0, 1)`.
    pub position: f32,
    /// Progress per tick at speed 1.
    pub speed: f32,
    pub size: f32,
    pub opacity: f32,
}

impl FlowParticle {
    /// Advance one tick at the given global speed, wrapping past 1 back to 0.
    pub fn advance(&mut self, global_speed: f32) {
        self.position = (self.position + self.speed * global_speed).rem_euclid(1.0);
    }
}

/// A connection between a node and a node in the next layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Index of the source node.
    pub source: usize,
    /// Index of the target node.
    pub target: usize,
    pub width: f32,
    pub phase: f32,
    pub particles: Vec<FlowParticle>,
}

/// A free-floating background particle.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientParticle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub opacity: f32,
}

impl AmbientParticle {
    /// Move one tick and wrap around the canvas edges.
    pub fn advance(&mut self, global_speed: f32, width: f32, height: f32) {
        self.x += self.vx * global_speed;
        self.y += self.vy * global_speed;

        if self.x < 0.0 {
            self.x = width;
        } else if self.x > width {
            self.x = 0.0;
        }
        if self.y < 0.0 {
            self.y = height;
        } else if self.y > height {
            self.y = 0.0;
        }
    }
}

/// Inputs to graph generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphParams {
    pub layers: u8,
    pub density: f32,
    /// Canvas width in pixels.
    pub width: f32,
    /// Canvas height in pixels.
    pub height: f32,
    pub layout: GraphLayout,
}

impl GraphParams {
    /// Parameters for the given settings on a canvas of `width` x `height` pixels.
    pub fn from_settings(settings: &Settings, width: f32, height: f32) -> Self {
        Self {
            layers: settings.layers,
            density: settings.density,
            width,
            height,
            layout: settings.layout,
        }
    }

    /// Nodes generated in every layer.
    pub fn nodes_per_layer(&self) -> usize {
        let (baseline, scale) = match self.layout {
            GraphLayout::Planar => (5.0, 15.0),
            GraphLayout::Orbit => (5.0, 10.0),
        };
        (baseline + self.density * scale).floor().max(0.0) as usize
    }

    /// Ambient particles generated with the network.
    pub fn ambient_count(&self) -> usize {
        50 + (self.density * 100.0).floor().max(0.0) as usize
    }
}

/// A generated network: nodes in layer order, edges, and ambient particles.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub params: GraphParams,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub ambient: Vec<AmbientParticle>,
}

impl Network {
    /// Nodes in each layer.
    pub fn nodes_per_layer(&self) -> usize {
        self.params.nodes_per_layer()
    }

    /// Slice of the nodes in `layer`.
    pub fn layer(&self, layer: u8) -> &[Node] {
        let n = self.nodes_per_layer();
        let start = (layer as usize * n).min(self.nodes.len());
        let end = (start + n).min(self.nodes.len());
        &self.nodes[start..end]
    }
}

/// Generate a network with the thread-local RNG.
///
/// Topology is not reproducible between calls.
pub fn generate(params: GraphParams) -> Network {
    generate_with(params, &mut rand::thread_rng())
}

/// Generate a network drawing randomness from `rng`.
pub fn generate_with<R: Rng + ?Sized>(params: GraphParams, rng: &mut R) -> Network {
    let per_layer = params.nodes_per_layer();
    let layers = params.layers as usize;

    let mut nodes = Vec::with_capacity(layers * per_layer);
    for layer in 0..layers {
        for i in 0..per_layer {
            nodes.push(make_node(&params, layer, i, per_layer, rng));
        }
    }

    let mut edges = Vec::new();
    if per_layer > 0 {
        for layer in 0..layers.saturating_sub(1) {
            let next_start = (layer + 1) * per_layer;
            for i in 0..per_layer {
                let source = layer * per_layer + i;
                let count = rng.gen_range(1..=2);
                for _ in 0..count {
                    let target = next_start + rng.gen_range(0..per_layer);
                    edges.push(make_edge(source, target, rng));
                }
            }
        }
    }

    let ambient = (0..params.ambient_count())
        .map(|_| AmbientParticle {
            x: rng.r#gen::<f32>() * params.width,
            y: rng.r#gen::<f32>() * params.height,
            vx: (rng.r#gen::<f32>() - 0.5) * 0.5,
            vy: (rng.r#gen::<f32>() - 0.5) * 0.5,
            size: between(rng, 1.0, 3.0),
            opacity: between(rng, 0.1, 0.4),
        })
        .collect();

    Network {
        params,
        nodes,
        edges,
        ambient,
    }
}

fn make_node<R: Rng + ?Sized>(
    params: &GraphParams,
    layer: usize,
    index: usize,
    per_layer: usize,
    rng: &mut R,
) -> Node {
    let layers = params.layers as f32;
    let (x, y, z, color) = match params.layout {
        GraphLayout::Planar => {
            let x = params.width * (layer as f32 + 1.0) / (layers + 1.0);
            let y = params.height * (index as f32 + 1.0) / (per_layer as f32 + 1.0);
            (x, y, 0.0, PLANAR_PALETTE[layer % PLANAR_PALETTE.len()])
        }
        GraphLayout::Orbit => {
            let z = (layer as f32 - (layers - 1.0) / 2.0) * ORBIT_LAYER_SPACING;
            let angle = index as f32 / per_layer as f32 * TAU;
            let ring = between(rng, 2.0, 3.0);
            (
                angle.cos() * ring,
                angle.sin() * ring,
                z,
                ORBIT_PALETTE[layer % ORBIT_PALETTE.len()],
            )
        }
    };

    Node {
        x,
        y,
        z,
        screen_x: x,
        screen_y: y,
        screen_scale: 1.0,
        radius: between(rng, 2.5, 5.5),
        color,
        layer: layer as u8,
        phase: between(rng, 0.0, TAU),
        pulse_speed: between(rng, 0.5, 2.0),
        glow: between(rng, GLOW_REST, 1.0),
    }
}

fn make_edge<R: Rng + ?Sized>(source: usize, target: usize, rng: &mut R) -> Edge {
    let particle_count = rng.gen_range(0..=3);
    let particles = (0..particle_count)
        .map(|_| FlowParticle {
            position: rng.r#gen::<f32>(),
            speed: between(rng, 0.001, 0.004),
            size: between(rng, 1.5, 2.5),
            opacity: between(rng, 0.6, 1.0),
        })
        .collect();

    Edge {
        source,
        target,
        width: between(rng, 0.5, 1.5),
        phase: between(rng, 0.0, TAU),
        particles,
    }
}

/// Uniform sample in `[lo, hi)`; never panics on an empty range.
fn between<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.r#gen::<f32>() * (hi - lo)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn params(layers: u8, density: f32) -> GraphParams {
        GraphParams {
            layers,
            density,
            width: 800.0,
            height: 480.0,
            layout: GraphLayout::Planar,
        }
    }

    #[test]
    fn test_nodes_per_layer() {
        assert_eq!(params(4, 0.8).nodes_per_layer(), 17);
        assert_eq!(params(4, 0.2).nodes_per_layer(), 8);
        assert_eq!(params(4, 0.0).nodes_per_layer(), 5);
        let orbit = GraphParams {
            layout: GraphLayout::Orbit,
            ..params(4, 0.8)
        };
        assert_eq!(orbit.nodes_per_layer(), 13);
    }

    #[test]
    fn test_every_layer_has_same_count() {
        let net = generate(params(5, 0.6));
        let n = net.nodes_per_layer();
        assert_eq!(net.nodes.len(), 5 * n);
        for layer in 0..5 {
            let nodes = net.layer(layer);
            assert_eq!(nodes.len(), n);
            assert!(nodes.iter().all(|node| node.layer == layer));
        }
    }

    #[test]
    fn test_planar_positions_evenly_spaced() {
        let net = generate(params(3, 0.2));
        let n = net.nodes_per_layer();
        for (layer, expected_x) in [200.0, 400.0, 600.0].into_iter().enumerate() {
            let nodes = net.layer(layer as u8);
            assert!(nodes.iter().all(|node| (node.x - expected_x).abs() < 1e-3));
            for (i, node) in nodes.iter().enumerate() {
                let expected_y = 480.0 * (i as f32 + 1.0) / (n as f32 + 1.0);
                assert!((node.y - expected_y).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_edges_connect_adjacent_layers() {
        let mut rng = StdRng::seed_from_u64(7);
        let net = generate_with(params(4, 0.8), &mut rng);
        let n = net.nodes_per_layer();

        for edge in &net.edges {
            let from = &net.nodes[edge.source];
            let to = &net.nodes[edge.target];
            assert_eq!(to.layer, from.layer + 1);
            assert!(edge.particles.len() <= 3);
            assert!((0.5..1.5).contains(&edge.width));
        }

        // Each node outside the last layer has one or two outgoing edges.
        for source in 0..3 * n {
            let count = net.edges.iter().filter(|e| e.source == source).count();
            assert!((1..=2).contains(&count), "node {source} has {count} edges");
        }
        assert!(net.edges.iter().all(|e| e.source < 3 * n));
    }

    #[test]
    fn test_layer_colors_alternate() {
        let net = generate(params(3, 0.2));
        assert_eq!(net.layer(0)[0].color, PLANAR_PALETTE[0]);
        assert_eq!(net.layer(1)[0].color, PLANAR_PALETTE[1]);
        assert_eq!(net.layer(2)[0].color, PLANAR_PALETTE[0]);
    }

    #[test]
    fn test_regeneration_keeps_counts() {
        let a = generate(params(4, 0.5));
        let b = generate(params(4, 0.5));
        assert_eq!(a.nodes.len(), b.nodes.len());
        assert_eq!(a.nodes_per_layer(), b.nodes_per_layer());
        assert_eq!(a.ambient.len(), b.ambient.len());
    }

    #[test]
    fn test_seeded_generation_is_repeatable() {
        let a = generate_with(params(3, 0.7), &mut StdRng::seed_from_u64(42));
        let b = generate_with(params(3, 0.7), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_sized_canvas_does_not_panic() {
        let net = generate(GraphParams {
            width: 0.0,
            height: 0.0,
            ..params(2, 0.2)
        });
        assert_eq!(net.nodes.len(), 16);
        assert_eq!(net.ambient.len(), 70);
    }

    #[test]
    fn test_orbit_nodes_sit_on_rings() {
        let net = generate(GraphParams {
            layout: GraphLayout::Orbit,
            ..params(4, 0.5)
        });
        for node in &net.nodes {
            let r = (node.x * node.x + node.y * node.y).sqrt();
            assert!((1.999..=3.001).contains(&r));
        }
        assert_eq!(net.layer(0)[0].z, -6.0);
        assert_eq!(net.layer(3)[0].z, 6.0);
    }

    #[test]
    fn test_flow_particle_wraps() {
        let mut p = FlowParticle {
            position: 0.999,
            speed: 0.002,
            size: 2.0,
            opacity: 1.0,
        };
        p.advance(1.0);
        assert!((p.position - 0.001).abs() < 1e-5);
    }

    #[test]
    fn test_flow_particle_after_n_ticks() {
        let initial = 0.37;
        let cases = [(0.003f32, 1.2f32, 500u32), (0.001, 2.0, 1234), (0.004, 0.1, 77)];
        for &(speed, global, ticks) in &cases {
            let mut p = FlowParticle {
                position: initial,
                speed,
                size: 2.0,
                opacity: 1.0,
            };
            for _ in 0..ticks {
                p.advance(global);
            }
            let expected = (initial + ticks as f32 * speed * global).rem_euclid(1.0);
            let diff = (p.position - expected).abs();
            assert!(diff.min(1.0 - diff) < 1e-3, "{} vs {}", p.position, expected);
            assert!((0.0..1.0).contains(&p.position));
        }
    }

    #[test]
    fn test_ambient_wraps_edges() {
        let mut p = AmbientParticle {
            x: 0.1,
            y: 99.9,
            vx: -0.25,
            vy: 0.25,
            size: 1.0,
            opacity: 0.2,
        };
        p.advance(1.0, 100.0, 100.0);
        assert_eq!(p.x, 100.0);
        assert_eq!(p.y, 0.0);
    }
}
