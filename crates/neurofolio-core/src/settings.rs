//! Background settings and their allowed ranges.

use serde::{Deserialize, Serialize};

/// Lowest animation speed multiplier.
pub const MIN_SPEED: f32 = 0.1;
/// Highest animation speed multiplier.
pub const MAX_SPEED: f32 = 2.0;
/// Step used by the control surface for speed.
pub const SPEED_STEP: f32 = 0.1;

/// Fewest layers in the network.
pub const MIN_LAYERS: u8 = 2;
/// Most layers in the network.
pub const MAX_LAYERS: u8 = 5;

/// Sparsest density factor.
pub const MIN_DENSITY: f32 = 0.2;
/// Densest density factor.
pub const MAX_DENSITY: f32 = 1.0;
/// Step used by the control surface for density.
pub const DENSITY_STEP: f32 = 0.1;

/// Waveform used to animate connections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationStyle {
    /// Every connection breathes in place.
    Pulse,
    /// A wave travels along connections, offset by their length.
    #[default]
    Wave,
}

impl AnimationStyle {
    /// Switch to the other style.
    pub fn toggle(self) -> Self {
        match self {
            AnimationStyle::Pulse => AnimationStyle::Wave,
            AnimationStyle::Wave => AnimationStyle::Pulse,
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            AnimationStyle::Pulse => "Pulse",
            AnimationStyle::Wave => "Wave",
        }
    }
}

/// How nodes are placed on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphLayout {
    /// Layers as evenly spaced columns on a flat canvas.
    #[default]
    Planar,
    /// Layers as rings stacked in depth, slowly orbiting the viewer.
    Orbit,
}

impl GraphLayout {
    /// Switch to the other layout.
    pub fn toggle(self) -> Self {
        match self {
            GraphLayout::Planar => GraphLayout::Orbit,
            GraphLayout::Orbit => GraphLayout::Planar,
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            GraphLayout::Planar => "Planar",
            GraphLayout::Orbit => "Orbit",
        }
    }
}

/// Direction nodes move when the pointer comes near.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerMode {
    /// Nodes are pushed away from the pointer.
    #[default]
    Repel,
    /// Nodes drift toward the pointer.
    Attract,
}

/// Key whose change forces the network to be regenerated.
///
/// Density is stored in tenths so the key can be compared exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphShape {
    pub layers: u8,
    pub density_tenths: u8,
    pub layout: GraphLayout,
}

/// Live-tunable background settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Global animation speed multiplier.
    pub speed: f32,
    /// Number of layers in the network.
    pub layers: u8,
    /// Controls nodes per layer and ambient particle count.
    pub density: f32,
    /// Connection waveform.
    pub style: AnimationStyle,
    /// Node placement.
    pub layout: GraphLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: 1.2,
            layers: 4,
            density: 0.8,
            style: AnimationStyle::default(),
            layout: GraphLayout::default(),
        }
    }
}

impl Settings {
    /// Return a copy with every field forced into its allowed range.
    pub fn clamped(self) -> Self {
        Self {
            speed: snap(self.speed, MIN_SPEED, MAX_SPEED, SPEED_STEP),
            layers: self.layers.clamp(MIN_LAYERS, MAX_LAYERS),
            density: snap(self.density, MIN_DENSITY, MAX_DENSITY, DENSITY_STEP),
            ..self
        }
    }

    /// Set the speed multiplier, clamped.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = snap(speed, MIN_SPEED, MAX_SPEED, SPEED_STEP);
    }

    /// Set the layer count, clamped.
    pub fn set_layers(&mut self, layers: u8) {
        self.layers = layers.clamp(MIN_LAYERS, MAX_LAYERS);
    }

    /// Set the density factor, clamped.
    pub fn set_density(&mut self, density: f32) {
        self.density = snap(density, MIN_DENSITY, MAX_DENSITY, DENSITY_STEP);
    }

    pub fn faster(&mut self) {
        self.set_speed(self.speed + SPEED_STEP);
    }

    pub fn slower(&mut self) {
        self.set_speed(self.speed - SPEED_STEP);
    }

    pub fn more_layers(&mut self) {
        self.set_layers(self.layers.saturating_add(1));
    }

    pub fn fewer_layers(&mut self) {
        self.set_layers(self.layers.saturating_sub(1));
    }

    pub fn denser(&mut self) {
        self.set_density(self.density + DENSITY_STEP);
    }

    pub fn sparser(&mut self) {
        self.set_density(self.density - DENSITY_STEP);
    }

    /// Generation key for these settings.
    pub fn shape(&self) -> GraphShape {
        GraphShape {
            layers: self.layers,
            density_tenths: (self.density * 10.0).round() as u8,
            layout: self.layout,
        }
    }
}

/// Clamp to `[min, max]` and snap to the nearest multiple of `step`.
fn snap(value: f32, min: f32, max: f32, step: f32) -> f32 {
    if !value.is_finite() {
        return min;
    }
    let stepped = (value / step).round() * step;
    // Rounding to one decimal keeps 0.1 increments from drifting.
    ((stepped.clamp(min, max)) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_control_surface() {
        let s = Settings::default();
        assert_eq!(s.speed, 1.2);
        assert_eq!(s.layers, 4);
        assert_eq!(s.density, 0.8);
        assert_eq!(s.style, AnimationStyle::Wave);
        assert_eq!(s.layout, GraphLayout::Planar);
    }

    #[test]
    fn test_setters_clamp() {
        let mut s = Settings::default();
        s.set_speed(5.0);
        assert_eq!(s.speed, MAX_SPEED);
        s.set_speed(-1.0);
        assert_eq!(s.speed, MIN_SPEED);
        s.set_layers(9);
        assert_eq!(s.layers, MAX_LAYERS);
        s.set_layers(0);
        assert_eq!(s.layers, MIN_LAYERS);
        s.set_density(0.0);
        assert_eq!(s.density, MIN_DENSITY);
        s.set_density(f32::NAN);
        assert_eq!(s.density, MIN_DENSITY);
    }

    #[test]
    fn test_steps_stay_on_grid() {
        let mut s = Settings::default();
        for _ in 0..7 {
            s.faster();
        }
        assert_eq!(s.speed, 1.9);
        s.faster();
        s.faster();
        assert_eq!(s.speed, 2.0);

        s.sparser();
        assert_eq!(s.density, 0.7);
        for _ in 0..20 {
            s.sparser();
        }
        assert_eq!(s.density, 0.2);

        s.more_layers();
        s.more_layers();
        assert_eq!(s.layers, 5);
    }

    #[test]
    fn test_clamped_repairs_loaded_values() {
        let s = Settings {
            speed: 0.0,
            layers: 12,
            density: 1.34,
            ..Settings::default()
        }
        .clamped();
        assert_eq!(s.speed, 0.1);
        assert_eq!(s.layers, 5);
        assert_eq!(s.density, 1.0);
    }

    #[test]
    fn test_shape_ignores_speed_and_style() {
        let a = Settings::default();
        let mut b = a;
        b.faster();
        b.style = b.style.toggle();
        assert_eq!(a.shape(), b.shape());

        b.denser();
        assert_ne!(a.shape(), b.shape());
    }

    #[test]
    fn test_shape_tracks_layout() {
        let a = Settings::default();
        let mut b = a;
        b.layout = b.layout.toggle();
        assert_ne!(a.shape(), b.shape());
        assert_eq!(b.shape().layout, GraphLayout::Orbit);
        assert_eq!(
            a.shape(),
            GraphShape {
                layers: 4,
                density_tenths: 8,
                layout: GraphLayout::Planar,
            }
        );
    }

    #[test]
    fn test_toggles() {
        assert_eq!(AnimationStyle::Pulse.toggle(), AnimationStyle::Wave);
        assert_eq!(AnimationStyle::Wave.toggle(), AnimationStyle::Pulse);
        assert_eq!(GraphLayout::Planar.toggle(), GraphLayout::Orbit);
        assert_eq!(GraphLayout::Orbit.label(), "Orbit");
    }
}
