//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - Id-keyed and arena collections
//! - Logging utilities

pub mod collections;
pub mod logging;
pub mod math;
