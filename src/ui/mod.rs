pub mod controls;
pub mod legend;
pub mod popup;

pub use controls::{ControlPosition, LayerControl};
pub use legend::{Legend, LegendEntry};
pub use popup::{earthquake_popup, escape_html, Popup};
