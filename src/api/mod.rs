pub mod overpass;

pub use overpass::OverpassClient;
