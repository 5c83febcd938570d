//! Search criteria
//!
//! `SearchCriteria` is a plain value: every change produces a new value, which
//! the session stores in place of the old one. The builder methods keep the
//! field invariants:
//!
//! - picking a city clears the free-form address and vice versa
//! - changing the city clears the region (regions belong to a city)
//! - the pincode query only ever holds up to six ASCII digits

use crate::types::{CategoryFilter, DeliveryNeed, SearchMode};

/// Maximum pincode length
pub const POSTAL_CODE_LEN: usize = 6;

/// Strip non-digits and truncate to six characters.
///
/// This is the only way text reaches the pincode query, so the filter never
/// sees a non-digit.
pub fn sanitize_postal_code(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(POSTAL_CODE_LEN)
        .collect()
}

/// The user's current location, category and delivery selections
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchCriteria {
    mode: SearchMode,
    selected_city: String,
    selected_region: String,
    postal_code_query: String,
    freeform_address: String,
    category_filter: CategoryFilter,
    delivery_needed: DeliveryNeed,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn selected_city(&self) -> &str {
        &self.selected_city
    }

    pub fn selected_region(&self) -> &str {
        &self.selected_region
    }

    pub fn postal_code_query(&self) -> &str {
        &self.postal_code_query
    }

    pub fn freeform_address(&self) -> &str {
        &self.freeform_address
    }

    pub fn category_filter(&self) -> CategoryFilter {
        self.category_filter
    }

    pub fn delivery_needed(&self) -> DeliveryNeed {
        self.delivery_needed
    }

    /// Switch the search mode. Entered values are kept so switching back
    /// restores them.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Select a city from the quick-select list; clears the free-form address
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.set_city(city.into());
        self.freeform_address.clear();
        self
    }

    /// Type a free-form address; clears the selected city
    pub fn with_freeform_address(mut self, address: impl Into<String>) -> Self {
        self.freeform_address = address.into();
        self.set_city(String::new());
        self
    }

    /// Select (or with an empty string, clear) a region of the selected city
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.selected_region = region.into();
        self
    }

    /// Set the pincode query from raw user input (sanitized)
    pub fn with_postal_code(mut self, input: &str) -> Self {
        self.postal_code_query = sanitize_postal_code(input);
        self
    }

    pub fn with_category(mut self, filter: CategoryFilter) -> Self {
        self.category_filter = filter;
        self
    }

    pub fn with_delivery(mut self, need: DeliveryNeed) -> Self {
        self.delivery_needed = need;
        self
    }

    /// Short human-readable description of the active location, for headings
    pub fn location_summary(&self) -> String {
        match self.mode {
            SearchMode::City if !self.selected_city.is_empty() => self.selected_city.clone(),
            SearchMode::City if !self.freeform_address.is_empty() => {
                self.freeform_address.trim().to_string()
            }
            SearchMode::City => "all areas".to_string(),
            SearchMode::PostalCode if self.postal_code_query.is_empty() => {
                "all pincodes".to_string()
            }
            SearchMode::PostalCode => format!("pincode {}", self.postal_code_query),
            SearchMode::RegionMap => match (
                self.selected_region.is_empty(),
                self.selected_city.is_empty(),
            ) {
                (false, false) => format!("{}, {}", self.selected_region, self.selected_city),
                (false, true) => self.selected_region.clone(),
                (true, false) => self.selected_city.clone(),
                (true, true) => "all regions".to_string(),
            },
        }
    }

    fn set_city(&mut self, city: String) {
        if city != self.selected_city {
            self.selected_region.clear();
        }
        self.selected_city = city;
    }
}
