//! Dashboard application: the backend-independent shell and the egui window.

pub mod egui_backend;
pub mod shell;

pub use egui_backend::{install_font, run, DashboardApp, EguiRasterizer};
pub use shell::Dashboard;
