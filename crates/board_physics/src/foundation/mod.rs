//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the kernel:
//! - Math types and screen-space helpers
//! - Fixed-capacity collections
//! - Frame timing
//! - Injected random sources
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod random;
pub mod logging;
