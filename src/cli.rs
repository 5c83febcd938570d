use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::criteria::SearchCriteria;
use crate::types::{CategoryFilter, DeliveryNeed, SearchMode};

/// SakhiMap - find nearby food, sanitary and support resources
#[derive(Parser)]
#[command(name = "sakhimap")]
#[command(about = "Locate government and NGO resource points by city, pincode or region")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to a JSON catalog file (overrides the config's catalog_path)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive locator (default)
    Browse,
    /// Filter the catalog without the TUI
    Search(SearchArgs),
    /// List catalog cities
    Cities,
    /// List the regions of a city
    Regions {
        /// City name, exactly as listed by `cities`
        city: String,
    },
    /// Validate a catalog file
    Validate {
        /// Path to catalog file to validate
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Location mode: city, pincode or map. Inferred from the other flags when omitted.
    #[arg(long)]
    pub mode: Option<SearchMode>,

    /// Exact city name
    #[arg(long, conflicts_with = "address")]
    pub city: Option<String>,

    /// Free-form address, matched against city and region names
    #[arg(long)]
    pub address: Option<String>,

    /// Pincode prefix (non-digits are dropped, at most 6 digits kept)
    #[arg(long)]
    pub pincode: Option<String>,

    /// Region within the city (map mode)
    #[arg(long)]
    pub region: Option<String>,

    /// Category filter: all, government or ngo
    #[arg(long, default_value = "all")]
    pub category: CategoryFilter,

    /// Only show points that deliver (yes) or show all (no)
    #[arg(long)]
    pub delivery: Option<DeliveryNeed>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Mode to search in: explicit, else inferred from which location flag was given
    pub fn effective_mode(&self) -> SearchMode {
        match self.mode {
            Some(mode) => mode,
            None if self.pincode.is_some() => SearchMode::PostalCode,
            None if self.region.is_some() => SearchMode::RegionMap,
            None => SearchMode::City,
        }
    }

    /// Build search criteria the same way the interactive screens do
    pub fn to_criteria(&self) -> SearchCriteria {
        let mut criteria = SearchCriteria::new().with_mode(self.effective_mode());
        if let Some(city) = &self.city {
            criteria = criteria.with_city(city.trim());
        }
        if let Some(address) = &self.address {
            criteria = criteria.with_freeform_address(address.as_str());
        }
        if let Some(region) = &self.region {
            criteria = criteria.with_region(region.trim());
        }
        if let Some(pincode) = &self.pincode {
            criteria = criteria.with_postal_code(pincode);
        }
        criteria
            .with_category(self.category)
            .with_delivery(self.delivery.unwrap_or_default())
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
