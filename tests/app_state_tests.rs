//! Tests for Application State Management
//!
//! These tests verify:
//! - AppState default initialization
//! - AppMode per wizard step
//! - Cursor helpers
//! - Keybinding registry coverage for every mode

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sakhimap::app::{step_cursor, AppMode, AppState, LocationFocus};
use sakhimap::components::keybindings::{KeyAction, KeybindingContext};
use sakhimap::wizard_state::WizardStep;

// =============================================================================
// AppState Default Tests
// =============================================================================

#[test]
fn test_app_state_default_mode_is_location() {
    let state = AppState::default();
    assert_eq!(state.mode, AppMode::Location);
    assert_eq!(state.location_focus, LocationFocus::Cities);
}

#[test]
fn test_app_state_default_cursors_are_zero() {
    let state = AppState::default();
    assert_eq!(state.city_cursor, 0);
    assert_eq!(state.region_cursor, 0);
    assert_eq!(state.result_cursor, 0);
    assert!(!state.help_visible);
}

#[test]
fn test_app_state_default_has_prompt() {
    let state = AppState::default();
    assert!(state.status_message.contains("location"));
}

// =============================================================================
// AppMode Tests
// =============================================================================

#[test]
fn test_every_step_has_a_mode() {
    for step in WizardStep::all_steps() {
        let mode = AppMode::for_step(*step, false);
        assert!(AppMode::all().contains(&mode));
    }
}

#[test]
fn test_all_app_modes_are_distinct() {
    use std::collections::HashSet;

    let set: HashSet<_> = AppMode::all().iter().collect();
    assert_eq!(set.len(), AppMode::all().len(), "All AppModes should be distinct");
}

// =============================================================================
// Cursor Tests
// =============================================================================

#[test]
fn test_step_cursor_stops_at_ends() {
    assert_eq!(step_cursor(0, -1, 3), 0);
    assert_eq!(step_cursor(2, 1, 3), 2);
    assert_eq!(step_cursor(1, 1, 3), 2);
    assert_eq!(step_cursor(5, 0, 0), 0);
}

#[test]
fn test_result_cursor_clamps() {
    let mut state = AppState::default();
    state.select_next_result(10, 4);
    assert_eq!(state.result_cursor, 3);
    state.clamp_result_cursor(2);
    assert_eq!(state.result_cursor, 1);
    state.select_previous_result(5);
    assert_eq!(state.result_cursor, 0);
    state.select_next_result(1, 0);
    assert_eq!(state.result_cursor, 0);
}

// =============================================================================
// Keybinding Registry Tests
// =============================================================================

#[test]
fn test_every_mode_has_nav_items_and_help() {
    let ctx = KeybindingContext::new();
    for mode in AppMode::all() {
        assert!(!ctx.get_nav_items(mode).is_empty(), "{:?} has no nav items", mode);
        assert!(!ctx.get_help_content(mode).is_empty(), "{:?} has no help", mode);
    }
}

#[test]
fn test_quick_exit_works_everywhere() {
    let ctx = KeybindingContext::new();
    let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
    for mode in AppMode::all() {
        assert_eq!(ctx.action_for(mode, &ctrl_x), Some(KeyAction::QuickExit));
    }
}

#[test]
fn test_letters_are_text_while_typing() {
    let ctx = KeybindingContext::new();
    let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
    assert_eq!(ctx.action_for(&AppMode::Location, &q), Some(KeyAction::Quit));
    assert_eq!(ctx.action_for(&AppMode::AddressInput, &q), None);
}
