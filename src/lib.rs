//! # Postboard TUI
//!
//! A terminal client for a remote post service: list, create, edit and
//! delete posts made of a title, a description and an image.
//!
//! ## Features
//! - Post list with edit and delete dialogs
//! - Post creation form with multipart image upload
//! - Full list reload after every change
//! - YAML config with environment override
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod models;
pub mod config;
pub mod constants;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{ImageChange, NewPost, Post, PostUpdate};
pub use config::Config;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiError, NetworkActor, PostApiClient};
