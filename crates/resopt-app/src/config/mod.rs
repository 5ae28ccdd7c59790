//! Configuration file parsing for the Resume Optimizer client
//!
//! Supports `.resopt/config.toml` plus the `RESOPT_ENDPOINT` override.

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, init_config_dir, load_settings, ENDPOINT_ENV, RESOPT_DIR,
};
pub use types::*;
