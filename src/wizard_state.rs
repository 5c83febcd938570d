//! Wizard State Machine
//!
//! The locator wizard has three steps and a value type, [`SessionState`], that
//! pairs the current step with the search criteria. Every transition consumes
//! a state and returns the next one; nothing is mutated in place.
//!
//! # Step Flow
//!
//! ```text
//! Location ──confirm (gate open)──▶ Delivery ──yes / no──▶ Results
//!    ▲                                 │                      │
//!    └──────────── back ───────────────┘                      │
//!    └──────────── change location (clears delivery) ─────────┘
//! ```
//!
//! # Invariants
//!
//! - No step is ever skipped
//! - `Location → Delivery` requires [`is_location_confirmable`]
//! - `Results` is only reached with an answered delivery question
//! - Leaving `Results` resets the delivery answer to unknown

use std::fmt;
use thiserror::Error;

use crate::criteria::SearchCriteria;
use crate::logic::filter::is_location_confirmable;
use crate::types::{DeliveryNeed, SearchMode};

/// Wizard steps in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum WizardStep {
    /// Step 1: where is the user?
    #[default]
    Location = 1,
    /// Step 2: does the user need delivery?
    Delivery = 2,
    /// Step 3: the filtered resource list
    Results = 3,
}

impl WizardStep {
    /// Returns the 1-indexed step number
    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Label used by the progress tracker
    pub const fn label(self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::Delivery => "Delivery",
            Self::Results => "Resources",
        }
    }

    /// Heading shown above the step content
    pub const fn title(self) -> &'static str {
        match self {
            Self::Location => "First, where are you?",
            Self::Delivery => "Do you need delivery?",
            Self::Results => "Available Resources",
        }
    }

    /// All steps in order
    pub const fn all_steps() -> &'static [Self] {
        &[Self::Location, Self::Delivery, Self::Results]
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.order(), self.label())
    }
}

/// Compute the step that follows `step` for the given criteria.
///
/// Refused transitions return `step` unchanged:
///
/// - `Location` stays put until the location gate opens
/// - `Delivery` stays put until the delivery question is answered
/// - `Results` always returns to `Location` (the "change" action; the caller
///   is responsible for clearing the delivery answer, see
///   [`SessionState::change_location`])
pub fn advance(step: WizardStep, criteria: &SearchCriteria) -> WizardStep {
    match step {
        WizardStep::Location if is_location_confirmable(criteria) => WizardStep::Delivery,
        WizardStep::Location => WizardStep::Location,
        WizardStep::Delivery if criteria.delivery_needed().is_answered() => WizardStep::Results,
        WizardStep::Delivery => WizardStep::Delivery,
        WizardStep::Results => WizardStep::Location,
    }
}

/// User actions that move the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// "Confirm Location" on the location step
    ConfirmLocation,
    /// Answer to the delivery question; commits the answer and shows results
    ChooseDelivery(bool),
    /// Back link on the delivery step
    Back,
    /// "Change" on the results step
    ChangeLocation,
    /// Device location resolved to a city
    UseDetectedCity(String),
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfirmLocation => write!(f, "confirm location"),
            Self::ChooseDelivery(true) => write!(f, "choose delivery"),
            Self::ChooseDelivery(false) => write!(f, "choose pickup"),
            Self::Back => write!(f, "back"),
            Self::ChangeLocation => write!(f, "change location"),
            Self::UseDetectedCity(_) => write!(f, "use detected location"),
        }
    }
}

/// Reasons a wizard action was refused. The state is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardTransitionError {
    /// The location gate is closed
    #[error("Location is incomplete for mode '{mode}'")]
    LocationNotConfirmed { mode: SearchMode },

    /// The action does not exist on the current step
    #[error("Cannot {action} from step {step}")]
    NotAvailable { action: String, step: WizardStep },
}

/// Step plus criteria, replaced wholesale on every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    step: WizardStep,
    criteria: SearchCriteria,
}

impl SessionState {
    /// Fresh state at the location step with default criteria
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[inline]
    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// Replace the criteria, keeping the step
    pub fn with_criteria(self, criteria: SearchCriteria) -> Self {
        Self {
            step: self.step,
            criteria,
        }
    }

    /// Apply a user action.
    ///
    /// # Errors
    ///
    /// - `LocationNotConfirmed` when confirming with an incomplete location
    /// - `NotAvailable` when the action does not belong to the current step
    pub fn apply(self, action: WizardAction) -> Result<Self, WizardTransitionError> {
        match (self.step, action) {
            (WizardStep::Location, WizardAction::ConfirmLocation) => {
                match advance(self.step, &self.criteria) {
                    WizardStep::Delivery => Ok(Self {
                        step: WizardStep::Delivery,
                        criteria: self.criteria,
                    }),
                    _ => Err(WizardTransitionError::LocationNotConfirmed {
                        mode: self.criteria.mode(),
                    }),
                }
            }
            (WizardStep::Location, WizardAction::UseDetectedCity(city)) => {
                let criteria = self.criteria.with_mode(SearchMode::City).with_city(city);
                Ok(Self {
                    step: advance(WizardStep::Location, &criteria),
                    criteria,
                })
            }
            (WizardStep::Delivery, WizardAction::ChooseDelivery(needed)) => {
                let criteria = self.criteria.with_delivery(DeliveryNeed::from(needed));
                Ok(Self {
                    step: advance(WizardStep::Delivery, &criteria),
                    criteria,
                })
            }
            (WizardStep::Delivery, WizardAction::Back) => Ok(Self {
                step: WizardStep::Location,
                criteria: self.criteria,
            }),
            (WizardStep::Results, WizardAction::ChangeLocation) => Ok(Self {
                step: advance(WizardStep::Results, &self.criteria),
                criteria: self.criteria.with_delivery(DeliveryNeed::Unknown),
            }),
            (step, action) => Err(WizardTransitionError::NotAvailable {
                action: action.to_string(),
                step,
            }),
        }
    }

    pub fn confirm_location(self) -> Result<Self, WizardTransitionError> {
        self.apply(WizardAction::ConfirmLocation)
    }

    pub fn choose_delivery(self, needed: bool) -> Result<Self, WizardTransitionError> {
        self.apply(WizardAction::ChooseDelivery(needed))
    }

    pub fn back(self) -> Result<Self, WizardTransitionError> {
        self.apply(WizardAction::Back)
    }

    pub fn change_location(self) -> Result<Self, WizardTransitionError> {
        self.apply(WizardAction::ChangeLocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // WizardStep Tests
    // =========================================================================

    #[test]
    fn test_step_order_is_sequential() {
        for (i, step) in WizardStep::all_steps().iter().enumerate() {
            assert_eq!(step.order() as usize, i + 1);
        }
        assert_eq!(WizardStep::all_steps().len(), 3);
    }

    #[test]
    fn test_step_display() {
        assert_eq!(WizardStep::Location.to_string(), "1. Location");
        assert_eq!(WizardStep::Results.to_string(), "3. Resources");
    }

    // =========================================================================
    // advance() Tests
    // =========================================================================

    #[test]
    fn test_advance_refuses_incomplete_location() {
        let criteria = SearchCriteria::new();
        assert_eq!(advance(WizardStep::Location, &criteria), WizardStep::Location);
    }

    #[test]
    fn test_advance_through_all_steps() {
        let criteria = SearchCriteria::new().with_city("Mumbai");
        let step = advance(WizardStep::Location, &criteria);
        assert_eq!(step, WizardStep::Delivery);

        assert_eq!(advance(step, &criteria), WizardStep::Delivery);
        let criteria = criteria.with_delivery(DeliveryNeed::No);
        let step = advance(step, &criteria);
        assert_eq!(step, WizardStep::Results);

        assert_eq!(advance(step, &criteria), WizardStep::Location);
    }

    // =========================================================================
    // SessionState Tests
    // =========================================================================

    #[test]
    fn test_confirm_with_closed_gate_is_refused() {
        let state = SessionState::new();
        let err = state.clone().confirm_location().unwrap_err();
        assert_eq!(
            err,
            WizardTransitionError::LocationNotConfirmed {
                mode: SearchMode::City
            }
        );
        assert_eq!(state.step(), WizardStep::Location);
    }

    #[test]
    fn test_full_flow_and_change_location() {
        let state = SessionState::new()
            .with_criteria(SearchCriteria::new().with_city("Thane"))
            .confirm_location()
            .expect("gate open");
        assert_eq!(state.step(), WizardStep::Delivery);

        let state = state.choose_delivery(true).expect("delivery answered");
        assert_eq!(state.step(), WizardStep::Results);
        assert_eq!(state.criteria().delivery_needed(), DeliveryNeed::Yes);

        let state = state.change_location().expect("change is unconditional");
        assert_eq!(state.step(), WizardStep::Location);
        assert_eq!(state.criteria().delivery_needed(), DeliveryNeed::Unknown);
        assert_eq!(state.criteria().selected_city(), "Thane");
    }

    #[test]
    fn test_cannot_skip_to_results() {
        let state = SessionState::new().with_criteria(SearchCriteria::new().with_city("Thane"));
        let err = state.choose_delivery(false).unwrap_err();
        assert!(matches!(err, WizardTransitionError::NotAvailable { .. }));
    }

    #[test]
    fn test_back_from_delivery() {
        let state = SessionState::new()
            .with_criteria(SearchCriteria::new().with_city("Thane"))
            .confirm_location()
            .and_then(SessionState::back)
            .expect("back is allowed");
        assert_eq!(state.step(), WizardStep::Location);
    }

    #[test]
    fn test_back_not_available_on_results() {
        let state = SessionState::new()
            .with_criteria(SearchCriteria::new().with_city("Thane"))
            .confirm_location()
            .and_then(|s| s.choose_delivery(false))
            .expect("results");
        let err = state.back().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot back from step 3. Resources".to_string()
        );
    }

    #[test]
    fn test_detected_city_switches_mode_and_advances() {
        let state = SessionState::new()
            .with_criteria(
                SearchCriteria::new()
                    .with_mode(SearchMode::PostalCode)
                    .with_postal_code("4007"),
            )
            .apply(WizardAction::UseDetectedCity("Mumbai".to_string()))
            .expect("detected city");
        assert_eq!(state.step(), WizardStep::Delivery);
        assert_eq!(state.criteria().mode(), SearchMode::City);
        assert_eq!(state.criteria().selected_city(), "Mumbai");
    }

    #[test]
    fn test_detected_city_ignored_after_leaving_location() {
        let state = SessionState::new()
            .with_criteria(SearchCriteria::new().with_city("Thane"))
            .confirm_location()
            .expect("delivery step");
        let err = state
            .apply(WizardAction::UseDetectedCity("Mumbai".to_string()))
            .unwrap_err();
        assert!(matches!(err, WizardTransitionError::NotAvailable { .. }));
    }
}
