//! Configuration - pattern compilation settings.
//!
//! Settings are read from `.xtringrc` files and decide how every pattern
//! handed to an `RString` or `Xtring` is compiled.

pub mod rc;

pub use rc::{RcConfig, RcLoader};
