//! Static resource catalog
//!
//! The catalog is the read-only set of distribution points plus the two lookup
//! tables the location step needs: the ordered city list and the
//! city → regions table. It is loaded once and never mutated afterwards.
//!
//! # Sources
//!
//! - [`Catalog::builtin`] - the bundled catalog, shared process-wide
//! - [`Catalog::load_from_file`] - a JSON catalog supplied by the integrator
//!
//! Loaded catalogs are validated before use; the bundled one is checked by tests.

mod builtin;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::error::{Result, SakhiMapError};
use crate::types::ResourceCategory;

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that latitude and longitude are finite and in range
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance to another point in kilometres (haversine)
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// A single distribution point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub name: String,
    pub category: ResourceCategory,
    pub address: String,
    pub city: String,
    pub region: String,
    pub state: String,
    /// Indian pincode, exactly 6 digits
    pub postal_code: String,
    pub coordinates: Coordinates,
    pub operating_hours: String,
    #[serde(default)]
    pub eligibility_conditions: Vec<String>,
    #[serde(default)]
    pub required_documents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    /// Date of the last on-site verification (YYYY-MM-DD)
    pub verified_at: String,
    pub supports_delivery: bool,
}

impl ResourceRecord {
    /// Check the record-level invariants
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SakhiMapError::catalog("record id must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(SakhiMapError::catalog(format!("record {}: name is empty", self.id)));
        }
        if self.city.trim().is_empty() {
            return Err(SakhiMapError::catalog(format!("record {}: city is empty", self.id)));
        }
        if self.region.trim().is_empty() {
            return Err(SakhiMapError::catalog(format!("record {}: region is empty", self.id)));
        }
        if !is_valid_postal_code(&self.postal_code) {
            return Err(SakhiMapError::catalog(format!(
                "record {}: postal code '{}' must be exactly 6 digits",
                self.id, self.postal_code
            )));
        }
        if !self.coordinates.is_valid() {
            return Err(SakhiMapError::catalog(format!(
                "record {}: coordinates out of range",
                self.id
            )));
        }
        if !is_iso_date(&self.verified_at) {
            return Err(SakhiMapError::catalog(format!(
                "record {}: verified_at '{}' is not a YYYY-MM-DD date",
                self.id, self.verified_at
            )));
        }
        Ok(())
    }
}

/// Returns true for exactly six ASCII digits
pub fn is_valid_postal_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYY-MM-DD` naming a real calendar day
fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return false;
    }

    let (Ok(year), Ok(month), Ok(day)) = (
        value[0..4].parse::<u32>(),
        value[5..7].parse::<u32>(),
        value[8..10].parse::<u32>(),
    ) else {
        return false;
    };
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => return false,
    };
    (1..=days_in_month).contains(&day)
}

/// The full catalog: records plus lookup tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    records: Vec<ResourceRecord>,
    #[serde(default)]
    cities: Vec<String>,
    #[serde(default)]
    regions_by_city: BTreeMap<String, Vec<String>>,
}

static BUILTIN: OnceLock<Arc<Catalog>> = OnceLock::new();

impl Catalog {
    /// Build a catalog from explicit tables
    pub fn new(
        records: Vec<ResourceRecord>,
        cities: Vec<String>,
        regions_by_city: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            records,
            cities,
            regions_by_city,
        }
    }

    /// Build a catalog whose lookup tables are derived from the records.
    ///
    /// Cities and regions keep the order of their first appearance.
    pub fn from_records(records: Vec<ResourceRecord>) -> Self {
        let mut catalog = Self::new(records, Vec::new(), BTreeMap::new());
        catalog.fill_missing_tables();
        catalog
    }

    /// The bundled catalog, built once and shared by every session
    pub fn builtin() -> Arc<Catalog> {
        BUILTIN
            .get_or_init(|| Arc::new(builtin::catalog()))
            .clone()
    }

    /// Parse and validate a JSON catalog.
    ///
    /// Missing `cities` / `regions_by_city` tables are derived from the records.
    pub fn from_json(content: &str) -> Result<Self> {
        let mut catalog: Self = serde_json::from_str(content)?;
        catalog.fill_missing_tables();
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a JSON catalog file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog from {:?}", path.as_ref()))?;

        let catalog = Self::from_json(&content)
            .with_context(|| format!("Catalog {:?} is invalid", path.as_ref()))?;

        tracing::info!(
            records = catalog.records.len(),
            cities = catalog.cities.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Save the catalog as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize catalog to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write catalog to {:?}", path.as_ref()))?;
        Ok(())
    }

    fn fill_missing_tables(&mut self) {
        if self.cities.is_empty() {
            for record in &self.records {
                if !self.cities.contains(&record.city) {
                    self.cities.push(record.city.clone());
                }
            }
        }
        if self.regions_by_city.is_empty() {
            for record in &self.records {
                let regions = self.regions_by_city.entry(record.city.clone()).or_default();
                if !regions.contains(&record.region) {
                    regions.push(record.region.clone());
                }
            }
        }
    }

    /// Validate every record plus catalog-wide invariants.
    ///
    /// Every record's city and region must be selectable from the lookup
    /// tables.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for record in &self.records {
            record.validate()?;
            if !seen.insert(record.id.as_str()) {
                return Err(SakhiMapError::catalog(format!("duplicate id {}", record.id)));
            }
            if !self.cities.contains(&record.city) {
                return Err(SakhiMapError::catalog(format!(
                    "record {}: city '{}' is missing from the city list",
                    record.id, record.city
                )));
            }
            if !self.regions_for_city(&record.city).contains(&record.region) {
                return Err(SakhiMapError::catalog(format!(
                    "record {}: region '{}' is missing from the regions of '{}'",
                    record.id, record.region, record.city
                )));
            }
        }

        for city in &self.cities {
            if city.trim().is_empty() {
                return Err(SakhiMapError::catalog("city list contains an empty name"));
            }
        }
        for (city, regions) in &self.regions_by_city {
            if city.trim().is_empty() || regions.iter().any(|r| r.trim().is_empty()) {
                return Err(SakhiMapError::catalog(format!(
                    "regions table for '{}' contains an empty name",
                    city
                )));
            }
        }
        Ok(())
    }

    /// All records in catalog order
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Ordered city names for the quick-select list
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&ResourceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Regions of a city in table order; empty for unknown or empty city
    pub fn regions_for_city(&self, city: &str) -> &[String] {
        if city.is_empty() {
            return &[];
        }
        self.regions_by_city
            .get(city)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
