//! SakhiMap Library
//!
//! Core of the SakhiMap resource locator: the static catalog, search criteria,
//! the catalog filter, the three-step wizard and the terminal UI around them.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod criteria;
pub mod error;
pub mod geolocation;
pub mod input;
pub mod logic;
pub mod session;
pub mod theme;
pub mod types;
pub mod ui;
pub mod wizard_state;

// Re-export main types for convenience
pub use app::{App, AppExit};
pub use catalog::{Catalog, Coordinates, ResourceRecord};
pub use config_file::AppConfig;
pub use criteria::{sanitize_postal_code, SearchCriteria, POSTAL_CODE_LEN};
pub use error::SakhiMapError;
pub use geolocation::{
    DetectionPolicy, GeolocationError, LocationDetector, PositionProvider, ReverseGeocoder,
};
pub use logic::filter::{filter_catalog, is_location_confirmable};
pub use logic::links::{dial_link, directions_url};
pub use session::Session;
pub use types::{CategoryFilter, DeliveryNeed, ResourceCategory, SearchMode};
pub use wizard_state::{advance, SessionState, WizardAction, WizardStep, WizardTransitionError};
