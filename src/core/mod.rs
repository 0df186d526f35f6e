//! Core functionality for documents, panel state and configuration

pub mod config;
pub mod document;
pub mod state;
