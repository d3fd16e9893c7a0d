//! Core utilities and shared types
//!
//! - `config`: session configuration
//! - `error`: the error type shared by every operation
//! - `notification`: transient user-facing messages
//! - `path`: archive path normalisation helpers

pub mod config;
pub mod error;
pub mod notification;
pub mod path;
