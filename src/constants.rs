//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default origin of the Post API
pub const DEFAULT_API_BASE_URL: &str = "https://post-app-backend-7hpn.onrender.com";

/// Environment variable that overrides the configured API origin
pub const API_URL_ENV: &str = "POSTBOARD_API_URL";

/// Post API endpoint paths (relative to the base origin)
pub const LIST_POSTS_PATH: &str = "/api/v1/postapp/getPosts";
pub const CREATE_POST_PATH: &str = "/api/v1/postapp/addPost";
pub const UPDATE_POST_PATH: &str = "/api/v1/postapp/updatePost";
pub const DELETE_POST_PATH: &str = "/api/v1/postapp/deletePost";

/// Shown when a failed request carries no server message
pub const GENERIC_ERROR_MESSAGE: &str = "something went wrong";

/// Shown next to an empty required field on submit
pub const REQUIRED_FIELD_MESSAGE: &str = "Please fill out this field.";

/// Directory under $HOME holding the config file
pub const CONFIG_DIR_NAME: &str = ".postboard";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "postboard.log";

/// Application name shown in the navigation bar
pub const APP_NAME: &str = "PostApp";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
