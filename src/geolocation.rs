//! Device location detection
//!
//! Detection is split into two pluggable collaborators:
//!
//! - a [`PositionProvider`] standing in for the host positioning capability
//! - a [`ReverseGeocoder`] that turns a position into a catalog city
//!
//! The default geocoding policy is [`FixedCity`]: it ignores the reported
//! coordinates and always answers with the configured default city. The
//! [`NearestCatalogCity`] policy picks the city of the closest catalog record.
//!
//! # Concurrency
//!
//! A detection is one blocking call to the provider. The TUI runs it on a
//! worker thread via [`LocationDetector::spawn`] and receives exactly one
//! [`DetectionMessage`] back over a channel. The session's busy flag makes
//! sure only one request is in flight.
//!
//! # Privacy
//!
//! Coordinates are never logged.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::catalog::{Catalog, Coordinates};

/// Errors surfaced to the user when detection does not produce a city
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// The host has no positioning capability (or it is disabled)
    #[error("Location detection is not supported on this device.")]
    Unsupported,

    /// The provider failed to produce a position
    #[error("Could not detect location. Please enter manually.")]
    PositionUnavailable(String),

    /// A position was found but no catalog city could be matched
    #[error("Could not match your location to a supported city. Please enter manually.")]
    NoMatchingCity,

    /// A detection request is already in flight
    #[error("Location detection is already in progress.")]
    Busy,
}

/// Source of the device position
pub trait PositionProvider: Send + Sync {
    fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Turns a position into a city name known to the catalog
pub trait ReverseGeocoder: Send + Sync {
    fn city_for(&self, position: &Coordinates) -> Option<String>;
}

/// Provider for hosts without positioning
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPositioning;

impl PositionProvider for NoPositioning {
    fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Provider that reports a fixed, configured position
#[derive(Debug, Clone, Copy)]
pub struct StaticPosition(pub Coordinates);

impl PositionProvider for StaticPosition {
    fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        if self.0.is_valid() {
            Ok(self.0)
        } else {
            Err(GeolocationError::PositionUnavailable(
                "configured position is out of range".to_string(),
            ))
        }
    }
}

/// Ignores the position and answers with a fixed city
#[derive(Debug, Clone)]
pub struct FixedCity(pub String);

impl ReverseGeocoder for FixedCity {
    fn city_for(&self, _position: &Coordinates) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Picks the city of the catalog record closest to the position
#[derive(Debug, Clone)]
pub struct NearestCatalogCity {
    catalog: Arc<Catalog>,
}

impl NearestCatalogCity {
    /// Records further away than this are not considered a match
    pub const MAX_DISTANCE_KM: f64 = 50.0;

    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl ReverseGeocoder for NearestCatalogCity {
    fn city_for(&self, position: &Coordinates) -> Option<String> {
        self.catalog
            .records()
            .iter()
            .map(|r| (r, r.coordinates.distance_km(position)))
            .filter(|(_, d)| *d <= Self::MAX_DISTANCE_KM)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(r, _)| r.city.clone())
    }
}

/// How a detected position becomes a city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DetectionPolicy {
    /// Always use the configured default city
    #[default]
    Fixed,
    /// City of the nearest catalog record
    Nearest,
    /// Detection switched off; behaves like a host without positioning
    Disabled,
}

/// Outcome posted by a detection worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionMessage {
    Finished(Result<String, GeolocationError>),
}

/// Provider and geocoder bundled for one-shot detections
#[derive(Clone)]
pub struct LocationDetector {
    provider: Arc<dyn PositionProvider>,
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl std::fmt::Debug for LocationDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationDetector").finish_non_exhaustive()
    }
}

impl LocationDetector {
    pub fn new(provider: Arc<dyn PositionProvider>, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self { provider, geocoder }
    }

    /// Build a detector for a policy.
    ///
    /// `position` stands in for the host capability: `None` means the host
    /// cannot report a position.
    pub fn for_policy(
        policy: DetectionPolicy,
        position: Option<Coordinates>,
        default_city: &str,
        catalog: Arc<Catalog>,
    ) -> Self {
        let provider: Arc<dyn PositionProvider> = match (policy, position) {
            (DetectionPolicy::Disabled, _) | (_, None) => Arc::new(NoPositioning),
            (_, Some(pos)) => Arc::new(StaticPosition(pos)),
        };
        let geocoder: Arc<dyn ReverseGeocoder> = match policy {
            DetectionPolicy::Nearest => Arc::new(NearestCatalogCity::new(catalog)),
            DetectionPolicy::Fixed | DetectionPolicy::Disabled => {
                Arc::new(FixedCity(default_city.to_string()))
            }
        };
        Self::new(provider, geocoder)
    }

    /// Run one detection synchronously
    pub fn detect(&self) -> Result<String, GeolocationError> {
        let position = self.provider.current_position()?;
        let city = self
            .geocoder
            .city_for(&position)
            .filter(|c| !c.is_empty())
            .ok_or(GeolocationError::NoMatchingCity)?;
        tracing::debug!("Device location resolved to a catalog city");
        Ok(city)
    }

    /// Run one detection on a worker thread, posting the outcome to `tx`
    pub fn spawn(&self, tx: Sender<DetectionMessage>) -> thread::JoinHandle<()> {
        let detector = self.clone();
        thread::spawn(move || {
            let outcome = detector.detect();
            if tx.send(DetectionMessage::Finished(outcome)).is_err() {
                tracing::debug!("Detection finished after the receiver was dropped");
            }
        })
    }
}
