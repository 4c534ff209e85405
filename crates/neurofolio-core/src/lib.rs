//! Core types for the neurofolio portfolio.
//!
//! Holds the live-tunable background settings and the handle that shares them
//! between the control surface (single writer) and the renderer (reader).

mod settings;
mod shared;

pub use settings::{AnimationStyle, GraphLayout, GraphShape, PointerMode, Settings};
pub use shared::SharedSettings;
