//! Core business logic for pushboard.
//!
//! - **Form**: notification form validation and platform field groups
//! - **Notification**: simulated submission and history
//! - **Session**: the shared-credential login gate
//! - **Store**: notification history storage

pub mod services;

pub use services::*;
