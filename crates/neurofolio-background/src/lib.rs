//! Animated neural network background for the neurofolio portfolio.
//!
//! A layered graph of nodes and connections is generated from the current
//! [`neurofolio_core::Settings`], advanced once per frame, and painted onto a
//! ratatui canvas with glow and particle-flow effects. Pointer movement
//! nudges nearby nodes and brightens them.

mod color;
mod frame;
mod network;
mod paint;
mod pointer;
mod state;

pub use color::{BACKGROUND, Rgb, blend};
pub use frame::{EdgeLook, NodeLook, TICK_MS, edge_look, node_look, update};
pub use network::{
    AmbientParticle, CELL_HEIGHT_PX, CELL_WIDTH_PX, Edge, FlowParticle, GraphParams, Network,
    Node, generate, generate_with,
};
pub use pointer::pointer_moved;
pub use state::BackgroundState;
