//! egui presentation layer.

pub mod app;
pub mod widgets;

pub use app::{DesktopGuiApp, StartupConfig};
