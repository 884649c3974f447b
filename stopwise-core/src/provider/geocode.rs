//! Reverse-geocoding result types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// Feature family a reverse-geocode query is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FeatureLayer {
    /// Named streets.
    #[default]
    Street,
    /// Individual street addresses.
    Address,
    /// Points of interest such as shops and landmarks.
    Venue,
}

impl FeatureLayer {
    /// Wire name of the layer.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::Address => "address",
            Self::Venue => "venue",
        }
    }
}

impl fmt::Display for FeatureLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One feature returned by a reverse-geocode query.
///
/// Providers return candidates nearest first.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaceCandidate {
    /// Position of the feature.
    pub location: Coordinate,
    /// Neighbourhood the feature lies in.
    pub neighbourhood: Option<String>,
    /// Short feature name, e.g. a street name.
    pub name: Option<String>,
    /// Full display label, e.g. a formatted address.
    pub label: Option<String>,
}

impl PlaceCandidate {
    /// Construct an unnamed candidate at `location`.
    #[must_use]
    pub const fn at(location: Coordinate) -> Self {
        Self {
            location,
            neighbourhood: None,
            name: None,
            label: None,
        }
    }

    /// Best available display name: neighbourhood, then name, then label.
    ///
    /// Blank strings are skipped.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        [&self.neighbourhood, &self.name, &self.label]
            .into_iter()
            .filter_map(Option::as_deref)
            .map(str::trim)
            .find(|value| !value.is_empty())
    }
}
