//! Background animation state management.

use neurofolio_core::{GraphShape, PointerMode, Settings};
use ratatui::Frame;
use tracing::debug;

use crate::frame::{TICK_MS, update};
use crate::network::{CELL_HEIGHT_PX, CELL_WIDTH_PX, GraphParams, Network, generate};
use crate::paint::paint;
use crate::pointer::pointer_moved;

/// Most ticks replayed by a single frame.
const MAX_CATCH_UP_TICKS: u64 = 60;

/// Background animation state.
#[derive(Debug)]
pub struct BackgroundState {
    /// Current network, absent until the first non-empty frame.
    network: Option<Network>,
    /// Settings shape the network was generated for.
    last_shape: Option<GraphShape>,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
    /// Animation clock at the last whole tick, in milliseconds.
    last_update_ms: Option<u64>,
    /// How nodes react to the pointer.
    pointer_mode: PointerMode,
}

impl Default for BackgroundState {
    fn default() -> Self {
        Self::new(PointerMode::default())
    }
}

impl BackgroundState {
    /// Create a new background state.
    pub fn new(pointer_mode: PointerMode) -> Self {
        Self {
            network: None,
            last_shape: None,
            last_width: 0,
            last_height: 0,
            last_update_ms: None,
            pointer_mode,
        }
    }

    /// The current network, if one has been generated.
    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    /// Advance the animation to `elapsed_ms` and paint the background over
    /// the whole frame.
    ///
    /// Particles move one step per whole [`TICK_MS`] since the previous call,
    /// so redraw frequency does not change animation speed. The network is
    /// regenerated when the layer count, density, layout or terminal size
    /// changed since the previous frame. A zero-sized frame is a no-op.
    pub fn render(&mut self, frame: &mut Frame, settings: &Settings, elapsed_ms: u64) {
        let area = frame.area();
        let width = area.width;
        let height = area.height;
        if width == 0 || height == 0 {
            return;
        }

        let shape = settings.shape();
        let dimensions_changed = width != self.last_width || height != self.last_height;
        if dimensions_changed || self.last_shape != Some(shape) || self.network.is_none() {
            self.regenerate(settings, width, height);
        }

        let ticks = self.take_ticks(elapsed_ms);
        let seconds = elapsed_ms as f32 / 1000.0;
        if let Some(network) = self.network.as_mut() {
            update(network, settings, seconds, ticks);
            paint(frame, area, network, settings, seconds);
        }
    }

    /// Pointer moved to terminal cell (`column`, `row`).
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        if let Some(network) = self.network.as_mut() {
            let px = (column as f32 + 0.5) * CELL_WIDTH_PX;
            let py = (row as f32 + 0.5) * CELL_HEIGHT_PX;
            pointer_moved(network, px, py, self.pointer_mode);
        }
    }

    /// Whole ticks elapsed since the last call. The remainder carries over.
    fn take_ticks(&mut self, elapsed_ms: u64) -> u32 {
        let Some(last) = self.last_update_ms else {
            self.last_update_ms = Some(elapsed_ms);
            return 0;
        };
        let ticks = elapsed_ms.saturating_sub(last) / TICK_MS;
        if ticks > MAX_CATCH_UP_TICKS {
            // Drop the backlog after a stall instead of fast-forwarding.
            self.last_update_ms = Some(elapsed_ms);
            return MAX_CATCH_UP_TICKS as u32;
        }
        self.last_update_ms = Some(last + ticks * TICK_MS);
        ticks as u32
    }

    fn regenerate(&mut self, settings: &Settings, width: u16, height: u16) {
        let params = GraphParams::from_settings(
            settings,
            width as f32 * CELL_WIDTH_PX,
            height as f32 * CELL_HEIGHT_PX,
        );
        let network = generate(params);
        debug!(
            layers = params.layers,
            per_layer = network.nodes_per_layer(),
            edges = network.edges.len(),
            width,
            height,
            "regenerated network"
        );

        self.network = Some(network);
        self.last_shape = Some(settings.shape());
        self.last_width = width;
        self.last_height = height;
    }
}

#[cfg(test)]
mod tests {
    use neurofolio_core::GraphLayout;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn draw(
        terminal: &mut Terminal<TestBackend>,
        state: &mut BackgroundState,
        settings: &Settings,
    ) {
        draw_at(terminal, state, settings, 1_000);
    }

    fn draw_at(
        terminal: &mut Terminal<TestBackend>,
        state: &mut BackgroundState,
        settings: &Settings,
        elapsed_ms: u64,
    ) {
        terminal
            .draw(|frame| state.render(frame, settings, elapsed_ms))
            .unwrap();
    }

    #[test]
    fn test_first_frame_generates_network() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = BackgroundState::default();
        let settings = Settings::default();

        draw(&mut terminal, &mut state, &settings);

        let network = state.network().unwrap();
        assert_eq!(network.params.width, 480.0);
        assert_eq!(network.params.height, 320.0);
        assert_eq!(network.nodes.len(), 4 * 17);
    }

    #[test]
    fn test_speed_change_keeps_network() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = BackgroundState::default();
        let mut settings = Settings::default();
        draw(&mut terminal, &mut state, &settings);
        let edges = state.network().unwrap().edges.clone();

        settings.faster();
        settings.style = settings.style.toggle();
        draw(&mut terminal, &mut state, &settings);

        let after = &state.network().unwrap().edges;
        let sources: Vec<_> = after.iter().map(|e| (e.source, e.target)).collect();
        let expected: Vec<_> = edges.iter().map(|e| (e.source, e.target)).collect();
        assert_eq!(sources, expected);
    }

    #[test]
    fn test_shape_change_regenerates() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = BackgroundState::default();
        let mut settings = Settings::default();
        draw(&mut terminal, &mut state, &settings);

        settings.fewer_layers();
        settings.layout = GraphLayout::Orbit;
        draw(&mut terminal, &mut state, &settings);

        let network = state.network().unwrap();
        assert_eq!(network.params.layers, 3);
        assert_eq!(network.params.layout, GraphLayout::Orbit);
        assert_eq!(network.nodes.len(), 3 * 13);
    }

    #[test]
    fn test_resize_regenerates() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = BackgroundState::default();
        let settings = Settings::default();
        draw(&mut terminal, &mut state, &settings);

        terminal.backend_mut().resize(30, 10);
        draw(&mut terminal, &mut state, &settings);

        assert_eq!(state.network().unwrap().params.width, 240.0);
    }

    #[test]
    fn test_redraw_without_time_passing_keeps_particles() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = BackgroundState::default();
        let settings = Settings::default();
        draw(&mut terminal, &mut state, &settings);
        let ambient = state.network().unwrap().ambient.clone();
        let edges = state.network().unwrap().edges.clone();

        for _ in 0..200 {
            draw(&mut terminal, &mut state, &settings);
        }

        assert_eq!(state.network().unwrap().ambient, ambient);
        assert_eq!(state.network().unwrap().edges, edges);
    }

    #[test]
    fn test_particles_advance_with_elapsed_time() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = BackgroundState::default();
        let settings = Settings::default();
        draw_at(&mut terminal, &mut state, &settings, 1_000);
        let ambient = state.network().unwrap().ambient.clone();

        draw_at(&mut terminal, &mut state, &settings, 1_000 + 5 * TICK_MS);

        assert_ne!(state.network().unwrap().ambient, ambient);
    }

    #[test]
    fn test_ticks_carry_remainder() {
        let mut state = BackgroundState::default();
        assert_eq!(state.take_ticks(100), 0);
        assert_eq!(state.take_ticks(100 + TICK_MS - 1), 0);
        assert_eq!(state.take_ticks(100 + TICK_MS), 1);
        assert_eq!(state.take_ticks(100 + 3 * TICK_MS + 5), 2);
        assert_eq!(state.take_ticks(100 + 4 * TICK_MS), 1);
    }

    #[test]
    fn test_stall_is_not_replayed() {
        let mut state = BackgroundState::default();
        state.take_ticks(0);
        assert_eq!(state.take_ticks(60_000), MAX_CATCH_UP_TICKS as u32);
        assert_eq!(state.take_ticks(60_000 + TICK_MS), 1);
    }

    #[test]
    fn test_zero_sized_frame_is_noop() {
        let mut terminal = Terminal::new(TestBackend::new(0, 0)).unwrap();
        let mut state = BackgroundState::default();
        draw(&mut terminal, &mut state, &Settings::default());
        assert!(state.network().is_none());
    }

    #[test]
    fn test_pointer_before_first_frame_is_ignored() {
        let mut state = BackgroundState::default();
        state.pointer_moved(3, 4);
        assert!(state.network().is_none());
    }

    #[test]
    fn test_pointer_maps_cells_to_pixels() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = BackgroundState::default();
        draw(&mut terminal, &mut state, &Settings::default());

        let node = state.network().unwrap().nodes[0].clone();
        let column = (node.x / CELL_WIDTH_PX) as u16;
        let row = (node.y / CELL_HEIGHT_PX) as u16;
        state.pointer_moved(column, row);

        let moved = &state.network().unwrap().nodes[0];
        assert_ne!((moved.x, moved.y), (node.x, node.y));
    }
}
