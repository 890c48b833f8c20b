use serde::Deserialize;
use std::fmt;

/// Levels fetched when neither the CLI nor a config file names any.
pub const DEFAULT_LEVELS: [AdminLevel; 2] = [AdminLevel(2), AdminLevel(4)];

/// OSM `admin_level` tag value (2 = country, 4 = state/region, ...)
///
/// Not range-checked: whatever the caller asks for is sent to Overpass as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct AdminLevel(u8);

impl AdminLevel {
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Output file name for this level, e.g. `al2.geom.osm`
    pub fn file_name(self) -> String {
        format!("al{}.geom.osm", self.0)
    }
}

impl From<u8> for AdminLevel {
    fn from(level: u8) -> Self {
        Self(level)
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
