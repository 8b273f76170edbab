//! Utility Functions and Diagnostics
//!
//! System diagnostics and user-friendly error formatting.
//!
//! # Overview
//!
//! This module provides two utilities for operational visibility and debugging:
//!
//! 1. **Diagnostics** - System information and display server detection
//! 2. **Error Formatting** - User-friendly error messages with troubleshooting hints
//!
//! ## Diagnostics
//!
//! The [`diagnostics`] module helps understand the runtime environment:
//!
//! ```rust
//! use handmouse::utils::{detect_display_server, SystemInfo};
//!
//! // Gather system information
//! let sys_info = SystemInfo::gather();
//! sys_info.log(); // Logs: OS, kernel, CPU count, memory
//!
//! // Detect the display server (None on a headless box)
//! match detect_display_server() {
//!     Some(display) => println!("Running on: {}", display),
//!     None => println!("Headless; pointer injection will not work"),
//! }
//! ```
//!
//! ## Error Formatting
//!
//! The [`errors`] module provides user-friendly error messages:
//!
//! ```rust
//! use handmouse::utils::format_user_error;
//!
//! let error = anyhow::anyhow!("no sensor available");
//! eprintln!("{}", format_user_error(&error));
//! // Shows:
//! // - Formatted error with box drawing
//! // - Context-specific troubleshooting steps
//! // - Common causes and solutions
//! // - Technical details
//! ```
//!
//! Error categories with context-aware help:
//! - Sensor errors → Source configuration, capture paths, header format
//! - Pointer errors → Display session, injection permissions, --dry-run
//! - Config errors → Syntax validation, valid field values
//!
//! This makes troubleshooting accessible without reading feed internals.

pub mod diagnostics;
pub mod errors;

// Re-export key types
pub use diagnostics::{detect_display_server, log_startup_diagnostics, SystemInfo};
pub use errors::format_user_error;
