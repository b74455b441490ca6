//! Application state modules.

mod status;
mod ui;
mod view;

pub use status::StatusState;
pub use ui::UiState;
pub use view::{LineBounds, PlotContent, ViewState};
