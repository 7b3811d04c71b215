//! Ready2Intern client library

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod progress;
pub mod view;

pub use config::Config;
pub use error::{AppError, Result};
