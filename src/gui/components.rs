mod control_panel;
mod selection_panel;

pub use control_panel::{DemoControls, render_control_panel};
pub use selection_panel::render_selection_panel;
