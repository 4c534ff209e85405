//! Pointer interaction.

use neurofolio_core::{GraphLayout, PointerMode};

use crate::network::{GLOW_MAX, GLOW_REST, Network};

/// Only every n-th node reacts to the pointer.
pub const POINTER_STRIDE: usize = 5;
/// Reach of the pointer in canvas pixels.
pub const POINTER_RADIUS: f32 = 250.0;
/// Displacement at zero distance, in pixels per event.
pub const POINTER_FORCE: f32 = 2.5;

const GLOW_BOOST: f32 = 0.01;
const GLOW_DECAY: f32 = 0.005;

/// React to the pointer at canvas position (`px`, `py`).
///
/// Every [`POINTER_STRIDE`]-th node within [`POINTER_RADIUS`] is displaced in
/// proportion to its proximity and brightened; the others fade back toward
/// their resting glow. In the orbit layout nodes only change glow.
pub fn pointer_moved(network: &mut Network, px: f32, py: f32, mode: PointerMode) {
    let movable = network.params.layout == GraphLayout::Planar;

    for node in network.nodes.iter_mut().step_by(POINTER_STRIDE) {
        let dx = node.screen_x - px;
        let dy = node.screen_y - py;
        let distance = dx.hypot(dy);

        if distance < POINTER_RADIUS {
            if movable {
                let force = (1.0 - distance / POINTER_RADIUS) * POINTER_FORCE;
                let away = dy.atan2(dx);
                let angle = match mode {
                    PointerMode::Repel => away,
                    PointerMode::Attract => away + std::f32::consts::PI,
                };
                node.x += angle.cos() * force;
                node.y += angle.sin() * force;
                node.screen_x = node.x;
                node.screen_y = node.y;
            }
            node.glow = (node.glow + GLOW_BOOST).min(GLOW_MAX);
        } else {
            node.glow = (node.glow - GLOW_DECAY).max(GLOW_REST);
        }
    }
}
