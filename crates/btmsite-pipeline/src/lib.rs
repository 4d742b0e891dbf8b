//! Qualification workflows built on the rules engine and the upstream
//! clients: the five-step single-address check and the bulk ZIP scout.

pub mod error;
pub mod qualify;
pub mod scout;

pub use error::{PipelineError, QualifyFailure};
pub use qualify::{qualify_place, PlaceQuery};
pub use scout::{merge_candidates, scout_zip, ScoutReport};
