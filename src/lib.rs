//! Multi-match text transformation.
//!
//! A pattern is run over a snapshot of the text, every match (or every
//! capture group) becomes a region, and an edit is applied around each region
//! in one pass. Regions are visited from the last to the first, so edits never
//! move the offsets of the regions still waiting.

pub mod buffer;
pub mod cli;
pub mod config;
pub mod edit;
pub mod error;
pub mod matching;
pub mod rstring;
pub mod walker;
pub mod xtring;

pub use buffer::TextBuffer;
pub use config::{RcConfig, RcLoader};
pub use edit::{EditAction, EditState, Operator, Transformation};
pub use error::{Result, XtringError};
pub use matching::{MatchRegion, collect};
pub use rstring::{Position, RString, r};
pub use walker::{Neighborhood, RegionCallback, walk};
pub use xtring::Xtring;
