//! Common utilities and shared types for pushboard.
//!
//! This crate provides foundational components used across all pushboard crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`],
//!   plus per-field form errors via [`FieldErrors`]
//! - **ID Generation**: ULID record ids and session tokens via [`IdGenerator`]
//!
//! # Example
//!
//! ```no_run
//! use pushboard_common::{Config, IdGenerator};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     println!("Listening on port {} with record {}", config.server.port, id_gen.generate());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;

pub use config::Config;
pub use error::{AppError, AppResult, FieldError, FieldErrorKind, FieldErrors};
pub use id::IdGenerator;
