//! Locator session
//!
//! A `Session` owns the current [`SessionState`] and a handle to the shared
//! catalog. Every change builds a new state value and swaps it in; derived
//! values (gate, results, regions) are recomputed on demand.
//!
//! The session also owns the in-flight detection marker and the single
//! user-visible notice slot.

use std::sync::Arc;

use crate::catalog::{Catalog, ResourceRecord};
use crate::criteria::SearchCriteria;
use crate::geolocation::{GeolocationError, LocationDetector};
use crate::logic::filter::{filter_catalog, is_location_confirmable};
use crate::wizard_state::{SessionState, WizardAction, WizardStep, WizardTransitionError};

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    state: SessionState,
    /// Count of accepted wizard transitions
    transitions: u64,
    /// `transitions` at the time the in-flight detection began
    detection_started: Option<u64>,
    notice: Option<String>,
}

impl Session {
    /// Start a session at the location step
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            state: SessionState::new(),
            transitions: 0,
            detection_started: None,
            notice: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step()
    }

    pub fn criteria(&self) -> &SearchCriteria {
        self.state.criteria()
    }

    /// Replace the criteria with an updated copy
    pub fn update_criteria<F>(&mut self, update: F)
    where
        F: FnOnce(SearchCriteria) -> SearchCriteria,
    {
        let criteria = update(self.state.criteria().clone());
        self.state = self.state.clone().with_criteria(criteria);
    }

    /// Apply a wizard action. On refusal the state is unchanged.
    pub fn dispatch(&mut self, action: WizardAction) -> Result<WizardStep, WizardTransitionError> {
        let from = self.state.step();
        match self.state.clone().apply(action) {
            Ok(next) => {
                self.state = next;
                self.transitions += 1;
                tracing::info!(%from, to = %self.state.step(), "Wizard transition");
                Ok(self.state.step())
            }
            Err(err) => {
                tracing::debug!(%from, "Wizard transition refused: {}", err);
                Err(err)
            }
        }
    }

    /// Whether "Confirm Location" is enabled
    pub fn is_location_confirmable(&self) -> bool {
        is_location_confirmable(self.state.criteria())
    }

    /// Records matching the current criteria, in catalog order
    pub fn results(&self) -> Vec<&ResourceRecord> {
        filter_catalog(self.catalog.records(), self.state.criteria())
    }

    /// Regions of the selected city
    pub fn available_regions(&self) -> &[String] {
        self.catalog
            .regions_for_city(self.state.criteria().selected_city())
    }

    pub fn is_detecting(&self) -> bool {
        self.detection_started.is_some()
    }

    /// Mark a detection request as in flight.
    ///
    /// # Errors
    ///
    /// `Busy` if a request is already outstanding.
    pub fn begin_detection(&mut self) -> Result<(), GeolocationError> {
        if self.detection_started.is_some() {
            return Err(GeolocationError::Busy);
        }
        self.detection_started = Some(self.transitions);
        self.notice = None;
        tracing::debug!("Location detection started");
        Ok(())
    }

    /// Deliver the outcome of the in-flight detection.
    ///
    /// Success applies the detected city and moves to the delivery step.
    /// Failure leaves the criteria untouched and sets the notice. A success
    /// that arrives after any wizard transition since `begin_detection` is
    /// dropped, even if the user has come back to the location step.
    pub fn finish_detection(&mut self, outcome: Result<String, GeolocationError>) {
        let Some(started) = self.detection_started.take() else {
            tracing::warn!("Detection outcome received with no request in flight");
            return;
        };

        match outcome {
            Ok(_) if started != self.transitions => {
                tracing::debug!(
                    transitions = self.transitions - started,
                    "Detected location discarded: wizard moved on"
                );
            }
            Ok(city) => {
                if let Err(err) = self.dispatch(WizardAction::UseDetectedCity(city)) {
                    tracing::debug!("Detected location discarded: {}", err);
                }
            }
            Err(err) => {
                tracing::info!("Location detection failed: {:?}", err);
                self.notice = Some(err.to_string());
            }
        }
    }

    /// Begin, run and finish one detection on the current thread
    pub fn detect_location(&mut self, detector: &LocationDetector) -> Result<(), GeolocationError> {
        self.begin_detection()?;
        let outcome = detector.detect();
        let result = outcome.as_ref().map(|_| ()).map_err(|e| e.clone());
        self.finish_detection(outcome);
        result
    }

    /// The current user-visible notice, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Coordinates;
    use crate::geolocation::DetectionPolicy;
    use crate::types::{DeliveryNeed, SearchMode};

    fn session() -> Session {
        Session::new(Catalog::builtin())
    }

    #[test]
    fn test_new_session_starts_at_location() {
        let s = session();
        assert_eq!(s.step(), WizardStep::Location);
        assert!(!s.is_location_confirmable());
        assert!(!s.is_detecting());
        assert!(s.notice().is_none());
    }

    #[test]
    fn test_refused_dispatch_keeps_state() {
        let mut s = session();
        let before = s.state().clone();
        assert!(s.dispatch(WizardAction::ConfirmLocation).is_err());
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn test_results_follow_criteria() {
        let mut s = session();
        s.update_criteria(|c| c.with_city("Navi Mumbai"));
        let results = s.results();
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.city == "Navi Mumbai"));
    }

    #[test]
    fn test_available_regions() {
        let mut s = session();
        assert!(s.available_regions().is_empty());
        s.update_criteria(|c| c.with_mode(SearchMode::RegionMap).with_city("Thane"));
        assert_eq!(s.available_regions(), ["Ghodbunder Road", "Naupada", "Kopri"]);
    }

    #[test]
    fn test_second_detection_is_busy() {
        let mut s = session();
        s.begin_detection().expect("first request");
        assert_eq!(s.begin_detection(), Err(GeolocationError::Busy));
    }

    #[test]
    fn test_successful_detection_advances() {
        let mut s = session();
        s.update_criteria(|c| c.with_mode(SearchMode::PostalCode).with_postal_code("41"));
        s.begin_detection().expect("request");
        s.finish_detection(Ok("Mumbai".to_string()));

        assert!(!s.is_detecting());
        assert_eq!(s.step(), WizardStep::Delivery);
        assert_eq!(s.criteria().mode(), SearchMode::City);
        assert_eq!(s.criteria().selected_city(), "Mumbai");
    }

    #[test]
    fn test_failed_detection_leaves_criteria_untouched() {
        let mut s = session();
        s.update_criteria(|c| c.with_freeform_address("Sector 17, Vashi"));
        let before = s.state().clone();

        s.begin_detection().expect("request");
        s.finish_detection(Err(GeolocationError::Unsupported));

        assert_eq!(s.state(), &before);
        assert!(!s.is_detecting());
        assert_eq!(
            s.notice(),
            Some("Location detection is not supported on this device.")
        );
    }

    #[test]
    fn test_stale_detection_is_dropped() {
        let mut s = session();
        s.update_criteria(|c| c.with_city("Thane"));
        s.begin_detection().expect("request");
        s.dispatch(WizardAction::ConfirmLocation).expect("delivery");
        s.dispatch(WizardAction::ChooseDelivery(true)).expect("results");

        s.finish_detection(Ok("Mumbai".to_string()));
        assert_eq!(s.step(), WizardStep::Results);
        assert_eq!(s.criteria().selected_city(), "Thane");
        assert_eq!(s.criteria().delivery_needed(), DeliveryNeed::Yes);
    }

    #[test]
    fn test_detection_dropped_after_back_and_reentry() {
        let mut s = session();
        s.update_criteria(|c| c.with_city("Thane"));
        s.begin_detection().expect("request");
        s.dispatch(WizardAction::ConfirmLocation).expect("delivery");
        s.dispatch(WizardAction::Back).expect("location");
        s.update_criteria(|c| c.with_mode(SearchMode::PostalCode).with_postal_code("400703"));

        s.finish_detection(Ok("Mumbai".to_string()));
        assert!(!s.is_detecting());
        assert_eq!(s.step(), WizardStep::Location);
        assert_eq!(s.criteria().mode(), SearchMode::PostalCode);
        assert_eq!(s.criteria().postal_code_query(), "400703");
        assert_eq!(s.criteria().selected_city(), "Thane");
    }

    #[test]
    fn test_failure_after_back_still_sets_notice() {
        let mut s = session();
        s.update_criteria(|c| c.with_city("Thane"));
        s.begin_detection().expect("request");
        s.dispatch(WizardAction::ConfirmLocation).expect("delivery");
        s.dispatch(WizardAction::Back).expect("location");

        s.finish_detection(Err(GeolocationError::NoMatchingCity));
        assert!(!s.is_detecting());
        assert!(s.notice().is_some());
    }

    #[test]
    fn test_detect_location_synchronously() {
        let mut s = session();
        let detector = LocationDetector::for_policy(
            DetectionPolicy::Fixed,
            Some(Coordinates::new(19.0, 72.8)),
            "Mumbai",
            Catalog::builtin(),
        );
        s.detect_location(&detector).expect("detected");
        assert_eq!(s.step(), WizardStep::Delivery);
    }
}
