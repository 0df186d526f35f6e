//! UI components for the admin panel

pub mod actions;
pub mod editor;
pub mod loader;
pub mod settings;
pub mod status;
