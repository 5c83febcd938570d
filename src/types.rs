//! Type-safe search types for SakhiMap
//!
//! Search modes, category filters and the delivery answer are proper Rust
//! enums rather than strings, so the filter can match on them exhaustively.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Kind of organisation running a distribution point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum ResourceCategory {
    #[strum(to_string = "Government Scheme", serialize = "government")]
    Government,
    #[strum(to_string = "NGO / Charity", serialize = "ngo")]
    Ngo,
    #[strum(to_string = "Community Center", serialize = "community")]
    Community,
}

impl ResourceCategory {
    /// Short tag used on resource cards
    pub fn short_label(self) -> &'static str {
        match self {
            Self::Government => "GOV",
            Self::Ngo => "NGO",
            Self::Community => "COMMUNITY",
        }
    }
}

/// How the user describes their location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum SearchMode {
    /// Quick-select city or free-form address
    #[default]
    #[strum(to_string = "Address / Area", serialize = "city")]
    City,
    /// Six digit pincode (prefix match)
    #[strum(to_string = "Pincode", serialize = "pincode")]
    PostalCode,
    /// City plus region picked from the region grid
    #[strum(to_string = "Regions", serialize = "map")]
    RegionMap,
}

/// Category chip on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum CategoryFilter {
    #[default]
    #[strum(to_string = "All", serialize = "all")]
    All,
    #[strum(to_string = "Government", serialize = "government")]
    Government,
    #[strum(to_string = "NGO", serialize = "ngo")]
    Ngo,
}

impl CategoryFilter {
    /// Check whether a record category passes this filter
    pub fn accepts(self, category: ResourceCategory) -> bool {
        match self {
            Self::All => true,
            Self::Government => category == ResourceCategory::Government,
            Self::Ngo => category == ResourceCategory::Ngo,
        }
    }
}

/// Answer to "Do you need delivery?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeliveryNeed {
    /// Not answered yet
    #[default]
    Unknown,
    Yes,
    No,
}

impl DeliveryNeed {
    /// True once the user picked yes or no
    pub fn is_answered(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// True only for an explicit "yes"
    pub fn is_required(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for DeliveryNeed {
    fn from(needed: bool) -> Self {
        if needed { Self::Yes } else { Self::No }
    }
}
