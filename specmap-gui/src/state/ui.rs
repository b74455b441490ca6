//! Edit buffers for the side panel.

use std::collections::BTreeSet;

use specmap_core::ColorRange;

/// Values being edited before they are applied to the session.
#[derive(Default)]
pub struct UiState {
    /// Color range fields; applied with the Apply button or Enter.
    pub color_range: ColorRange,
    /// Selected positions in the export queue list.
    pub selected: BTreeSet<usize>,
}
