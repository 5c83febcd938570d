//! Property-Based Tests for SakhiMap
//!
//! Uses proptest for testing invariants of the filter and criteria:
//! - Generated catalogs (including empty ones) derive valid lookup tables
//! - Filter output is an order-preserving subset of its input, for any catalog
//! - Filtering is idempotent
//! - Pincode sanitization only ever yields up to six ASCII digits
//! - The location gate agrees with `advance`

use proptest::prelude::*;
use sakhimap::catalog::{Catalog, Coordinates, ResourceRecord};
use sakhimap::criteria::{sanitize_postal_code, SearchCriteria, POSTAL_CODE_LEN};
use sakhimap::logic::filter::{filter_catalog, is_location_confirmable};
use sakhimap::types::{CategoryFilter, DeliveryNeed, ResourceCategory, SearchMode};
use sakhimap::wizard_state::{advance, WizardStep};

// =============================================================================
// Strategies
// =============================================================================

fn mode_strategy() -> impl Strategy<Value = SearchMode> {
    prop_oneof![
        Just(SearchMode::City),
        Just(SearchMode::PostalCode),
        Just(SearchMode::RegionMap),
    ]
}

fn category_strategy() -> impl Strategy<Value = CategoryFilter> {
    prop_oneof![
        Just(CategoryFilter::All),
        Just(CategoryFilter::Government),
        Just(CategoryFilter::Ngo),
    ]
}

fn delivery_strategy() -> impl Strategy<Value = DeliveryNeed> {
    prop_oneof![
        Just(DeliveryNeed::Unknown),
        Just(DeliveryNeed::Yes),
        Just(DeliveryNeed::No),
    ]
}

/// City names from the catalog plus some that match nothing
fn city_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Mumbai".to_string()),
        Just("Navi Mumbai".to_string()),
        Just("Thane".to_string()),
        Just("thane".to_string()),
        Just("Pune".to_string()),
        "[A-Za-z ]{1,12}",
    ]
}

fn region_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Vashi".to_string()),
        Just("Kopri".to_string()),
        Just("Dadar".to_string()),
        Just("Kothrud".to_string()),
        "[A-Za-z ]{1,12}",
    ]
}

/// Pincode input: either noise or a prefix shared by generated records
fn pincode_input_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9a-z]{0,8}", "(4000|4006|4110)[0-9]{0,2}"]
}

fn resource_category_strategy() -> impl Strategy<Value = ResourceCategory> {
    prop_oneof![
        Just(ResourceCategory::Government),
        Just(ResourceCategory::Ngo),
        Just(ResourceCategory::Community),
    ]
}

prop_compose! {
    /// A record drawn from small pools so that cities, regions and pincode
    /// prefixes repeat across a catalog. The id is assigned by the catalog.
    fn record_strategy()(
        category in resource_category_strategy(),
        city in prop::sample::select(vec!["Mumbai", "Thane", "Pune"]),
        region in prop::sample::select(vec!["Dadar", "Kopri", "Vashi", "Kothrud", "Sector 17"]),
        postal_code in "(4000|4006|4110)[0-9]{2}",
        supports_delivery in any::<bool>(),
    ) -> ResourceRecord {
        ResourceRecord {
            id: String::new(),
            name: format!("{} point", region),
            category,
            address: format!("1 Main Road, {}", region),
            city: city.to_string(),
            region: region.to_string(),
            state: "Maharashtra".to_string(),
            postal_code,
            coordinates: Coordinates::new(19.0, 72.9),
            operating_hours: "10 AM - 5 PM".to_string(),
            eligibility_conditions: vec![],
            required_documents: vec![],
            contact_phone: None,
            verified_at: "2024-06-15".to_string(),
            supports_delivery,
        }
    }
}

/// Generated catalogs with unique ids, 0 to 24 records
fn generated_catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(record_strategy(), 0..24).prop_map(|records| {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| ResourceRecord {
                id: format!("r{}", i),
                ..record
            })
            .collect();
        Catalog::from_records(records)
    })
}

/// Mostly generated catalogs, sometimes the bundled one
fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop_oneof![
        1 => Just(Catalog::builtin().as_ref().clone()),
        4 => generated_catalog_strategy(),
    ]
}

prop_compose! {
    fn criteria_strategy()(
        mode in mode_strategy(),
        city in city_strategy(),
        region in region_strategy(),
        address in "[A-Za-z0-9 ,]{0,24}",
        pincode in pincode_input_strategy(),
        use_address in any::<bool>(),
        category in category_strategy(),
        delivery in delivery_strategy(),
    ) -> SearchCriteria {
        let criteria = SearchCriteria::new()
            .with_mode(mode)
            .with_postal_code(&pincode)
            .with_category(category)
            .with_delivery(delivery);
        if use_address {
            criteria.with_freeform_address(address)
        } else {
            criteria.with_city(city).with_region(region)
        }
    }
}

// =============================================================================
// Filter Properties
// =============================================================================

proptest! {
    /// Tables derived from the records always pass validation
    #[test]
    fn generated_catalogs_validate(catalog in generated_catalog_strategy()) {
        prop_assert!(catalog.validate().is_ok());
        for record in catalog.records() {
            prop_assert!(catalog.regions_for_city(&record.city).contains(&record.region));
        }
    }

    /// An empty catalog yields no results for any criteria
    #[test]
    fn empty_catalog_yields_nothing(criteria in criteria_strategy()) {
        let catalog = Catalog::from_records(Vec::new());
        prop_assert!(catalog.cities().is_empty());
        prop_assert!(filter_catalog(catalog.records(), &criteria).is_empty());
    }

    /// Output is a subset of the catalog, in catalog order
    #[test]
    fn filter_is_order_preserving_subset(
        catalog in catalog_strategy(),
        criteria in criteria_strategy(),
    ) {
        let results = filter_catalog(catalog.records(), &criteria);

        let mut last = None;
        for record in results {
            let pos = catalog.records().iter().position(|r| r.id == record.id);
            prop_assert!(pos.is_some());
            prop_assert!(last < pos);
            last = pos;
        }
    }

    /// Filtering the filtered list again changes nothing
    #[test]
    fn filter_is_idempotent(catalog in catalog_strategy(), criteria in criteria_strategy()) {
        let once = filter_catalog(catalog.records(), &criteria);
        let twice = filter_catalog(once.iter().copied(), &criteria);
        prop_assert_eq!(once, twice);
    }

    /// A yes-delivery answer never returns a non-delivering point
    #[test]
    fn delivery_yes_excludes_pickup_only(
        catalog in catalog_strategy(),
        criteria in criteria_strategy(),
    ) {
        let criteria = criteria.with_delivery(DeliveryNeed::Yes);
        for record in filter_catalog(catalog.records(), &criteria) {
            prop_assert!(record.supports_delivery);
        }
    }

    /// Narrowing the category never adds results
    #[test]
    fn category_narrowing_is_monotonic(
        catalog in catalog_strategy(),
        criteria in criteria_strategy(),
    ) {
        let all = filter_catalog(catalog.records(), &criteria.clone().with_category(CategoryFilter::All));
        for filter in [CategoryFilter::Government, CategoryFilter::Ngo] {
            let narrowed = filter_catalog(catalog.records(), &criteria.clone().with_category(filter));
            prop_assert!(narrowed.len() <= all.len());
            prop_assert!(narrowed.iter().all(|r| all.iter().any(|a| a.id == r.id)));
        }
    }
}

// =============================================================================
// Criteria Properties
// =============================================================================

proptest! {
    /// Sanitized pincodes are at most six ASCII digits
    #[test]
    fn sanitized_pincode_is_digits(input in "\\PC{0,20}") {
        let code = sanitize_postal_code(&input);
        prop_assert!(code.len() <= POSTAL_CODE_LEN);
        prop_assert!(code.bytes().all(|b| b.is_ascii_digit()));
    }

    /// Sanitizing twice is the same as once
    #[test]
    fn sanitize_is_idempotent(input in "\\PC{0,20}") {
        let once = sanitize_postal_code(&input);
        prop_assert_eq!(sanitize_postal_code(&once), once);
    }

    /// The pincode gate opens exactly at six digits
    #[test]
    fn pincode_gate_needs_six_digits(digits in "[0-9]{0,6}") {
        let criteria = SearchCriteria::new()
            .with_mode(SearchMode::PostalCode)
            .with_postal_code(&digits);
        prop_assert_eq!(is_location_confirmable(&criteria), digits.len() == POSTAL_CODE_LEN);
    }

    /// `advance` from the location step follows the gate
    #[test]
    fn advance_follows_gate(criteria in criteria_strategy()) {
        let expected = if is_location_confirmable(&criteria) {
            WizardStep::Delivery
        } else {
            WizardStep::Location
        };
        prop_assert_eq!(advance(WizardStep::Location, &criteria), expected);
    }

    /// Parsing a mode from its CLI name always succeeds
    #[test]
    fn search_mode_parses_cli_names(mode in mode_strategy()) {
        let name = match mode {
            SearchMode::City => "city",
            SearchMode::PostalCode => "pincode",
            SearchMode::RegionMap => "map",
        };
        let parsed: SearchMode = name.parse().expect("Should parse");
        prop_assert_eq!(parsed, mode);
    }
}
