//! Rendering tests for the wizard screens
//!
//! Drives the app with key events and renders into ratatui's TestBackend.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use sakhimap::app::{App, AppMode};
use sakhimap::catalog::Catalog;
use sakhimap::geolocation::{DetectionPolicy, LocationDetector};
use sakhimap::session::Session;

fn app() -> App {
    let catalog = Catalog::builtin();
    let detector =
        LocationDetector::for_policy(DetectionPolicy::Fixed, None, "Mumbai", catalog.clone());
    App::new(Session::new(catalog), detector)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

/// Render one frame and return the screen as text, one line per row
fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(110, 48)).expect("terminal");
    app.draw(&mut terminal).expect("draw");

    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_location_screen() {
    let app = app();
    let text = screen(&app);
    assert!(text.contains("SakhiMap"));
    assert!(text.contains("● 1. Location"));
    assert!(text.contains("First, where are you?"));
    assert!(text.contains("Address / Area"));
    assert!(text.contains("Navi Mumbai"));
    assert!(text.contains("Confirm Location"));
    assert!(text.contains("Privacy-First Guarantee"));
}

#[test]
fn test_pincode_tab_shows_digit_count() {
    let mut app = app();
    press(&mut app, KeyCode::Tab);
    for c in "4007".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    let text = screen(&app);
    assert!(text.contains("4007"));
    assert!(text.contains("4/6 digits"));
}

#[test]
fn test_delivery_screen() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.state().mode, AppMode::Delivery);

    let text = screen(&app);
    assert!(text.contains("Do you need delivery?"));
    assert!(text.contains("Yes, deliver to me"));
    assert!(text.contains("No, I can visit"));
    assert!(text.contains("✓ 1. Location"));
    assert!(!text.contains("Privacy-First Guarantee"));
}

#[test]
fn test_results_screen_with_delivery_banner() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('c'));
    press(&mut app, KeyCode::Char('y'));

    let text = screen(&app);
    assert!(text.contains("Available Resources"));
    assert!(text.contains("Delivery Enabled"));
    assert!(text.contains("GOVERNMENT"));
    assert!(text.contains("Myna Mahila Foundation"));
    assert!(text.contains("Verified 2024-12-14"));
}

#[test]
fn test_results_empty_state() {
    let mut app = app();
    // Thane has no government point that delivers
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('c'));
    press(&mut app, KeyCode::Char('y'));
    press(&mut app, KeyCode::Char('f'));

    assert!(app.session().results().is_empty());
    let text = screen(&app);
    assert!(text.contains("No locations found"));
}

#[test]
fn test_help_overlay() {
    let mut app = app();
    press(&mut app, KeyCode::Char('?'));
    let text = screen(&app);
    assert!(text.contains("Press ? or Esc to close"));
    assert!(text.contains("Quick exit"));
}
