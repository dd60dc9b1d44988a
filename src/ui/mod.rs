pub mod camera;
pub mod details;
pub mod overlay;
pub mod ui_system;

pub use camera::OrbitCamera;
pub use details::{DetailCatalog, DetailView};
pub use overlay::{Overlay, OverlayResponse};
pub use ui_system::UiSystem;
