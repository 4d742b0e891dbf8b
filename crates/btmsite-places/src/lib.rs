pub mod census;
pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use census::{density_per_sq_mile, CensusClient};
pub use client::{NearbyFilter, PlacesClient};
pub use error::PlacesError;
