//! OS Pointer Injection
//!
//! The boundary to the operating system's input stack: a backend trait,
//! the enigo-based production backend, and a null backend for dry runs.

pub mod backend;
pub mod error;

#[cfg(feature = "enigo-backend")]
pub use backend::EnigoPointer;
pub use backend::{NullPointer, PointerBackend, PointerButton};
pub use error::{PointerError, Result};
