pub mod app;
pub mod auth;
pub mod chat;
pub mod config;
pub mod pdf_assets;
pub mod state;
pub mod telemetry;
