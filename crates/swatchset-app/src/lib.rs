//! Swatchset Application
//!
//! Shells around the palette store: a command-line editor and exporter on
//! native targets, localStorage persistence and PNG download in the browser.

pub mod error;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod deliver;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod cli;
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod commands;

pub use error::{AppError, AppResult};

#[cfg(not(target_arch = "wasm32"))]
pub use config::AppConfig;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub use cli::Cli;
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub use commands::run;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WebPalette, download_artifact};
