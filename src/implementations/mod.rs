pub mod config;
pub mod schema;
pub mod gemini_backend;
pub mod asset_generator;
pub mod stage_ticker;
pub mod workflow_controller;
pub mod diagram_renderer;
pub mod diagram_viewer;
pub mod dashboard;
