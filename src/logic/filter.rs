//! Location gate and catalog filter
//!
//! # Design
//!
//! - **Pure logic**: no I/O, no caching. Both functions are recomputed on
//!   every criteria change; the catalog is small.
//! - **Independent predicates**: category, delivery and location are checked
//!   as a conjunction. Check order only affects short-circuiting.
//! - **Stable**: results keep catalog order.
//!
//! # Location Matching
//!
//! | Mode         | Rule |
//! |--------------|------|
//! | `City`       | exact city if selected, else address contains city or region (case-insensitive), else all |
//! | `PostalCode` | pincode starts with the query, or all when the query is empty |
//! | `RegionMap`  | exact city if set AND exact region if set |

use crate::catalog::ResourceRecord;
use crate::criteria::{POSTAL_CODE_LEN, SearchCriteria};
use crate::types::SearchMode;

/// Minimum address length (exclusive) for a free-form address to count as a
/// location. Measured in UTF-16 code units, so an emoji counts as two.
pub const MIN_ADDRESS_CHARS: usize = 5;

/// Decide whether "Confirm Location" is enabled for the current criteria.
pub fn is_location_confirmable(criteria: &SearchCriteria) -> bool {
    match criteria.mode() {
        SearchMode::PostalCode => criteria.postal_code_query().len() == POSTAL_CODE_LEN,
        SearchMode::City => {
            !criteria.selected_city().is_empty()
                || criteria.freeform_address().encode_utf16().count() > MIN_ADDRESS_CHARS
        }
        SearchMode::RegionMap => {
            !criteria.selected_city().is_empty() && !criteria.selected_region().is_empty()
        }
    }
}

/// Select the records matching the criteria, in their original order.
///
/// Accepts any sequence of record references so a previous result can be
/// filtered again. An empty result is a normal outcome.
pub fn filter_catalog<'a, I>(records: I, criteria: &SearchCriteria) -> Vec<&'a ResourceRecord>
where
    I: IntoIterator<Item = &'a ResourceRecord>,
{
    records
        .into_iter()
        .filter(|record| matches(record, criteria))
        .collect()
}

/// Check a single record against the criteria
pub fn matches(record: &ResourceRecord, criteria: &SearchCriteria) -> bool {
    criteria.category_filter().accepts(record.category)
        && (!criteria.delivery_needed().is_required() || record.supports_delivery)
        && matches_location(record, criteria)
}

fn matches_location(record: &ResourceRecord, criteria: &SearchCriteria) -> bool {
    match criteria.mode() {
        SearchMode::City => {
            let city = criteria.selected_city();
            let address = criteria.freeform_address();
            if !city.is_empty() {
                record.city == city
            } else if !address.is_empty() {
                address_mentions(address, record)
            } else {
                true
            }
        }
        SearchMode::PostalCode => record.postal_code.starts_with(criteria.postal_code_query()),
        SearchMode::RegionMap => {
            let city = criteria.selected_city();
            let region = criteria.selected_region();
            (city.is_empty() || record.city == city)
                && (region.is_empty() || record.region == region)
        }
    }
}

/// Substring test of the lower-cased address against the record's city and
/// region. Not tokenized: "Thanekar Street" mentions "Thane".
fn address_mentions(address: &str, record: &ResourceRecord) -> bool {
    let address = address.to_lowercase();
    address.contains(&record.city.to_lowercase()) || address.contains(&record.region.to_lowercase())
}
