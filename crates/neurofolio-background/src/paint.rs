//! Painting the network onto a ratatui canvas.

use neurofolio_core::Settings;
use ratatui::{
    Frame,
    layout::Rect,
    symbols::Marker,
    widgets::canvas::{Canvas, Circle, Context, Line, Points},
};

use crate::color::{BACKGROUND, Rgb, WHITE, blend};
use crate::frame::{edge_look, node_look};
use crate::network::Network;

/// Paint one frame: background, ambient particles, edges with their flow
/// particles, then nodes with their glow.
pub(crate) fn paint(
    frame: &mut Frame,
    area: Rect,
    network: &Network,
    settings: &Settings,
    seconds: f32,
) {
    let width = network.params.width as f64;
    let height = network.params.height as f64;

    let canvas = Canvas::default()
        .background_color(BACKGROUND.into())
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            // Canvas y grows upward; the network's y grows downward.
            let flip = |x: f32, y: f32| (x as f64, height - y as f64);

            paint_ambient(ctx, network, &flip);
            ctx.layer();
            paint_edges(ctx, network, settings, seconds, &flip);
            ctx.layer();
            paint_nodes(ctx, network, settings, seconds, &flip);
        });

    frame.render_widget(canvas, area);
}

fn paint_ambient(ctx: &mut Context<'_>, network: &Network, flip: &impl Fn(f32, f32) -> (f64, f64)) {
    for particle in &network.ambient {
        let (x, y) = flip(particle.x, particle.y);
        let color = blend(WHITE, particle.opacity);
        if particle.size >= 2.0 {
            ctx.draw(&Circle {
                x,
                y,
                radius: particle.size as f64,
                color,
            });
        }
        ctx.draw(&Points {
            coords: &[(x, y)],
            color,
        });
    }
}

fn paint_edges(
    ctx: &mut Context<'_>,
    network: &Network,
    settings: &Settings,
    seconds: f32,
    flip: &impl Fn(f32, f32) -> (f64, f64),
) {
    for edge in &network.edges {
        let from = &network.nodes[edge.source];
        let to = &network.nodes[edge.target];
        let look = edge_look(network, edge, settings, seconds);

        let (x1, y1) = flip(from.screen_x, from.screen_y);
        let (x2, y2) = flip(to.screen_x, to.screen_y);
        let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);

        // Thin strokes read fainter; approximate width through brightness.
        let alpha = look.opacity * (0.6 + 0.4 * look.width.min(1.5) / 1.5);
        ctx.draw(&Line::new(x1, y1, mx, my, blend(from.color, alpha)));
        ctx.draw(&Line::new(mx, my, x2, y2, blend(to.color, alpha)));

        for particle in &edge.particles {
            let px = from.screen_x + (to.screen_x - from.screen_x) * particle.position;
            let py = from.screen_y + (to.screen_y - from.screen_y) * particle.position;
            let (x, y) = flip(px, py);
            let color: Rgb = if particle.position < 0.5 {
                from.color
            } else {
                to.color
            };

            ctx.draw(&Circle {
                x,
                y,
                radius: (particle.size * 3.0) as f64,
                color: blend(color, particle.opacity * 0.6 * 0.5),
            });
            ctx.draw(&Circle {
                x,
                y,
                radius: particle.size as f64,
                color: blend(color, particle.opacity),
            });
            ctx.draw(&Points {
                coords: &[(x, y)],
                color: blend(color, particle.opacity),
            });
        }
    }
}

fn paint_nodes(
    ctx: &mut Context<'_>,
    network: &Network,
    settings: &Settings,
    seconds: f32,
    flip: &impl Fn(f32, f32) -> (f64, f64),
) {
    for node in &network.nodes {
        let look = node_look(node, settings, seconds);
        let (x, y) = flip(node.screen_x, node.screen_y);

        // Outer glow is white at half strength.
        ctx.draw(&Circle {
            x,
            y,
            radius: look.outer_radius as f64,
            color: blend(WHITE, look.outer_alpha * 0.5),
        });
        ctx.draw(&Circle {
            x,
            y,
            radius: look.inner_radius as f64,
            color: blend(node.color, look.inner_alpha),
        });

        // Fill the body with concentric rings.
        let mut r = look.radius;
        while r > 0.5 {
            ctx.draw(&Circle {
                x,
                y,
                radius: r as f64,
                color: node.color.into(),
            });
            r -= 2.0;
        }
        ctx.draw(&Points {
            coords: &[(x, y)],
            color: node.color.into(),
        });
    }
}
