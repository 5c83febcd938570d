//! Application module
//!
//! Contains the main application loop and key handling.
//!
//! # Module Structure
//! - `state` - screen state types (AppState, AppMode, LocationFocus)
//! - Main module - App struct and event loop

mod state;

pub use state::{step_cursor, AppMode, AppState, LocationFocus};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::error::Result;
use crate::geolocation::{DetectionMessage, LocationDetector};
use crate::input::{InputResult, TextInput};
use crate::session::Session;
use crate::theme::{UiConstants, UiText};
use crate::types::{CategoryFilter, SearchMode};
use crate::ui::UiRenderer;
use crate::wizard_state::{WizardAction, WizardStep};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;
use strum::IntoEnumIterator;
use tracing::{debug, info};

/// Why the main loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppExit {
    /// Normal quit
    Quit,
    /// Quick exit: the caller should also wipe the screen
    QuickExit,
}

/// Main application struct
pub struct App {
    session: Session,
    state: AppState,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints and key dispatch
    keybinding_context: KeybindingContext,
    detector: LocationDetector,
    /// Cloned into detection worker threads
    detection_tx: Sender<DetectionMessage>,
    /// Polled in the main loop
    detection_rx: Receiver<DetectionMessage>,
}

impl App {
    /// Create a new application instance
    pub fn new(session: Session, detector: LocationDetector) -> Self {
        info!("Creating new App instance");
        let (detection_tx, detection_rx) = mpsc::channel();

        Self {
            session,
            state: AppState::default(),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            detector,
            detection_tx,
            detection_rx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<AppExit> {
        info!("Starting main application loop");

        loop {
            self.poll_detection();

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if let Some(exit) = self.handle_key_event(key_event) {
                        info!(?exit, "Leaving main loop");
                        return Ok(exit);
                    }
                }
            }

            self.draw(terminal)?;
        }
    }

    /// Render one frame
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|f| {
            self.ui_renderer
                .render(f, &self.session, &self.state, &self.keybinding_context);
        })?;
        Ok(())
    }

    /// Drain finished detections from worker threads
    pub fn poll_detection(&mut self) {
        while let Ok(DetectionMessage::Finished(outcome)) = self.detection_rx.try_recv() {
            let before = self.session.step();
            self.session.finish_detection(outcome);

            if before == WizardStep::Location && self.session.step() == WizardStep::Delivery {
                self.state.status_message = format!(
                    "Location detected: {}",
                    self.session.criteria().location_summary()
                );
            } else if self.session.notice().is_none() {
                self.state.status_message = "Location detection finished".to_string();
            }
            self.sync_mode();
        }
    }

    /// Handle one key press. Returns `Some` when the app should exit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<AppExit> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let mode = self.state.mode;

        // Help overlay swallows everything except quick exit
        if self.state.help_visible {
            match self.keybinding_context.action_for(&mode, &key) {
                Some(KeyAction::QuickExit) => return Some(AppExit::QuickExit),
                Some(KeyAction::Help) => self.state.help_visible = false,
                _ if key.code == KeyCode::Esc => self.state.help_visible = false,
                _ => {}
            }
            return None;
        }

        // Digits and Backspace go straight into the pincode field
        if mode == AppMode::Location && self.session.criteria().mode() == SearchMode::PostalCode {
            let field = TextInput::pincode();
            if field.accepts_key(&key) {
                self.edit_postal_code(field, key);
                return None;
            }
        }

        let action = self.keybinding_context.action_for(&mode, &key);
        if mode == AppMode::AddressInput && action.is_none() {
            self.edit_address(key);
            return None;
        }

        let exit = action.and_then(|action| self.perform(action, key));
        self.sync_mode();
        exit
    }

    fn perform(&mut self, action: KeyAction, key: KeyEvent) -> Option<AppExit> {
        debug!(?action, "Key action");
        match action {
            KeyAction::Quit => return Some(AppExit::Quit),
            KeyAction::QuickExit => return Some(AppExit::QuickExit),
            KeyAction::Help => self.state.help_visible = true,

            KeyAction::NextTab => self.cycle_search_mode(1),
            KeyAction::PreviousTab => self.cycle_search_mode(-1),
            KeyAction::NavigateUp => self.move_cursor(-1),
            KeyAction::NavigateDown => self.move_cursor(1),
            KeyAction::PageUp => self.state.select_previous_result(UiConstants::PAGE_SCROLL_SIZE),
            KeyAction::PageDown => {
                let count = self.session.results().len();
                self.state
                    .select_next_result(UiConstants::PAGE_SCROLL_SIZE, count);
            }
            KeyAction::Home => self.state.result_cursor = 0,
            KeyAction::End => {
                self.state.result_cursor = self.session.results().len().saturating_sub(1);
            }
            KeyAction::SwitchFocus => self.switch_focus(key.code),
            KeyAction::Select => self.select_at_cursor(),
            KeyAction::EditAddress => {
                if self.session.criteria().mode() == SearchMode::City {
                    self.state.mode = AppMode::AddressInput;
                    self.state.status_message =
                        "Typing address. Enter or Esc when done".to_string();
                }
            }
            KeyAction::ClearSelection => self.clear_selection(),
            KeyAction::DetectLocation => self.start_detection(),
            KeyAction::ConfirmLocation => self.dispatch(WizardAction::ConfirmLocation),

            KeyAction::ChooseYes => self.dispatch(WizardAction::ChooseDelivery(true)),
            KeyAction::ChooseNo => self.dispatch(WizardAction::ChooseDelivery(false)),
            KeyAction::Toggle => {
                self.state.delivery_cursor = match key.code {
                    KeyCode::Left => true,
                    KeyCode::Right => false,
                    _ => !self.state.delivery_cursor,
                };
            }
            KeyAction::Confirm => {
                self.dispatch(WizardAction::ChooseDelivery(self.state.delivery_cursor))
            }
            KeyAction::Back => self.dispatch(WizardAction::Back),

            KeyAction::CycleCategory => self.cycle_category(),
            KeyAction::ChangeLocation => self.dispatch(WizardAction::ChangeLocation),

            KeyAction::FinishInput => {
                self.state.mode = AppMode::Location;
                self.state.status_message = if self.session.is_location_confirmable() {
                    "Address entered. Press C to confirm".to_string()
                } else {
                    "Choose how to describe your location".to_string()
                };
            }
            KeyAction::ClearInput => {
                self.session.update_criteria(|c| c.with_freeform_address(""));
            }
            // Display-only binding; digits are routed before dispatch
            KeyAction::TypePincode => {}
        }
        None
    }

    /// Apply a wizard action and report the outcome on the status line
    fn dispatch(&mut self, action: WizardAction) {
        match self.session.dispatch(action) {
            Ok(step) => {
                self.session.clear_notice();
                self.state.status_message = match step {
                    WizardStep::Location => "Choose how to describe your location".to_string(),
                    WizardStep::Delivery => format!(
                        "Location: {}",
                        self.session.criteria().location_summary()
                    ),
                    WizardStep::Results => {
                        self.state.result_cursor = 0;
                        "Use Up/Down to browse, F to filter by category".to_string()
                    }
                };
            }
            Err(err) => self.state.status_message = err.to_string(),
        }
    }

    fn start_detection(&mut self) {
        match self.session.begin_detection() {
            Ok(()) => {
                self.detector.spawn(self.detection_tx.clone());
                self.state.status_message = UiText::DETECTING.to_string();
            }
            Err(err) => self.state.status_message = err.to_string(),
        }
    }

    fn cycle_search_mode(&mut self, delta: isize) {
        let modes: Vec<SearchMode> = SearchMode::iter().collect();
        let current = modes
            .iter()
            .position(|m| *m == self.session.criteria().mode())
            .unwrap_or(0);
        let next = modes[(current as isize + delta).rem_euclid(modes.len() as isize) as usize];

        self.session.update_criteria(|c| c.with_mode(next));
        self.state.location_focus = LocationFocus::Cities;
        self.state.status_message = match next {
            SearchMode::City => "Pick a city or press E to type an address".to_string(),
            SearchMode::PostalCode => "Type your 6-digit pincode".to_string(),
            SearchMode::RegionMap => "Pick a city, then a region".to_string(),
        };
    }

    fn cycle_category(&mut self) {
        let filters: Vec<CategoryFilter> = CategoryFilter::iter().collect();
        let current = filters
            .iter()
            .position(|f| *f == self.session.criteria().category_filter())
            .unwrap_or(0);
        let next = filters[(current + 1) % filters.len()];

        self.session.update_criteria(|c| c.with_category(next));
        self.state.result_cursor = 0;
        self.state.status_message = format!("Category: {}", next);
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.session.step() {
            WizardStep::Location => match self.session.criteria().mode() {
                SearchMode::PostalCode => {}
                SearchMode::RegionMap if self.state.location_focus == LocationFocus::Regions => {
                    let len = self.session.available_regions().len();
                    self.state.region_cursor = step_cursor(self.state.region_cursor, delta, len);
                }
                SearchMode::City | SearchMode::RegionMap => {
                    let len = self.session.catalog().cities().len();
                    self.state.city_cursor = step_cursor(self.state.city_cursor, delta, len);
                }
            },
            WizardStep::Results => {
                if delta < 0 {
                    self.state.select_previous_result(1);
                } else {
                    let count = self.session.results().len();
                    self.state.select_next_result(1, count);
                }
            }
            WizardStep::Delivery => {}
        }
    }

    fn switch_focus(&mut self, code: KeyCode) {
        if self.session.criteria().mode() != SearchMode::RegionMap {
            return;
        }
        self.state.location_focus = match code {
            KeyCode::Left => LocationFocus::Cities,
            KeyCode::Right if !self.session.available_regions().is_empty() => {
                LocationFocus::Regions
            }
            _ => self.state.location_focus,
        };
    }

    fn select_at_cursor(&mut self) {
        let criteria_mode = self.session.criteria().mode();
        if criteria_mode == SearchMode::PostalCode {
            self.dispatch(WizardAction::ConfirmLocation);
            return;
        }

        if criteria_mode == SearchMode::RegionMap
            && self.state.location_focus == LocationFocus::Regions
        {
            if let Some(region) = self
                .session
                .available_regions()
                .get(self.state.region_cursor)
                .cloned()
            {
                self.state.status_message = format!("Selected region {}", region);
                self.session.update_criteria(|c| c.with_region(region));
            }
            return;
        }

        let Some(city) = self
            .session
            .catalog()
            .cities()
            .get(self.state.city_cursor)
            .cloned()
        else {
            return;
        };
        self.state.status_message = format!("Selected {}", city);
        self.session.update_criteria(|c| c.with_city(city));

        if criteria_mode == SearchMode::RegionMap {
            self.state.region_cursor = 0;
            if !self.session.available_regions().is_empty() {
                self.state.location_focus = LocationFocus::Regions;
            }
        }
    }

    fn clear_selection(&mut self) {
        match self.session.criteria().mode() {
            SearchMode::RegionMap if !self.session.criteria().selected_region().is_empty() => {
                self.session.update_criteria(|c| c.with_region(""));
            }
            SearchMode::RegionMap | SearchMode::City => {
                self.session.update_criteria(|c| c.with_city(""));
                self.state.location_focus = LocationFocus::Cities;
            }
            SearchMode::PostalCode => {
                self.session.update_criteria(|c| c.with_postal_code(""));
            }
        }
        self.state.status_message = "Selection cleared".to_string();
    }

    fn edit_address(&mut self, key: KeyEvent) {
        let current = self.session.criteria().freeform_address();
        match TextInput::address().handle_key(current, key) {
            InputResult::Changed(value) => {
                self.session.update_criteria(|c| c.with_freeform_address(value));
            }
            InputResult::Confirm | InputResult::Cancel => self.state.mode = AppMode::Location,
            InputResult::Ignored => {}
        }
    }

    fn edit_postal_code(&mut self, field: TextInput, key: KeyEvent) {
        let current = self.session.criteria().postal_code_query();
        if let InputResult::Changed(value) = field.handle_key(current, key) {
            self.session.update_criteria(|c| c.with_postal_code(&value));
        }
    }

    /// Keep the screen mode and cursors consistent with the session
    fn sync_mode(&mut self) {
        let editing = self.state.mode == AppMode::AddressInput
            && self.session.criteria().mode() == SearchMode::City;
        self.state.mode = AppMode::for_step(self.session.step(), editing);

        if self.state.mode == AppMode::Results {
            let count = self.session.results().len();
            self.state.clamp_result_cursor(count);
        }
    }
}
