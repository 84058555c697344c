//! # mynah-core
//!
//! Configuration, error handling, and text sanitization for the Mynah bot.

pub mod config;
pub mod error;
pub mod sanitize;
