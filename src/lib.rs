//! boundary-fetch - Download OpenStreetMap administrative boundaries from the Overpass API

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod logger;
pub mod osm;

pub use error::FetchError;
pub use fetch::{FetchEvent, Fetcher, SavedLevel};
