//! Wizard screens
//!
//! One render function per wizard step:
//! - `Location` - search mode tabs, city list, address/pincode fields, region grid
//! - `Delivery` - yes/no question
//! - `Results` - category chips, delivery banner and resource cards
//!
//! Screens only read the session; all changes go through the app's key handler.

use crate::app::{AppMode, AppState, LocationFocus};
use crate::catalog::ResourceRecord;
use crate::logic::links::{dial_link, directions_url};
use crate::session::Session;
use crate::theme::{Colors, Styles, Theme, UiText};
use crate::types::{CategoryFilter, SearchMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};
use strum::IntoEnumIterator;

// ============================================================================
// Shared pieces
// ============================================================================

fn render_step_title(f: &mut Frame, area: Rect, title: &str, subtitle: Option<String>) {
    let mut lines = vec![Line::from(Span::styled(title.to_string(), Styles::text_bold()))];
    if let Some(subtitle) = subtitle {
        lines.push(Line::from(Span::styled(subtitle, Styles::text_secondary())));
    }
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn panel(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(if focused {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        })
}

/// Selectable list where the chosen value is ticked and the cursor highlighted
fn choice_list<'a>(
    items: &'a [String],
    chosen: &str,
    block: Block<'static>,
) -> List<'a> {
    let rows: Vec<ListItem> = items
        .iter()
        .map(|item| {
            if item == chosen {
                ListItem::new(format!("✓ {}", item)).style(Styles::chosen())
            } else {
                ListItem::new(format!("  {}", item)).style(Styles::text())
            }
        })
        .collect();
    List::new(rows).block(block).highlight_style(Styles::selected())
}

fn render_choice_list(
    f: &mut Frame,
    area: Rect,
    items: &[String],
    chosen: &str,
    block: Block<'static>,
    cursor: Option<usize>,
) {
    let mut list_state = ListState::default();
    list_state.select(cursor.filter(|_| !items.is_empty()));
    f.render_stateful_widget(choice_list(items, chosen, block), area, &mut list_state);
}

/// Text field with placeholder and, while editing, a trailing cursor
fn text_field(value: &str, placeholder: &str, editing: bool) -> Line<'static> {
    if value.is_empty() && !editing {
        return Line::from(Span::styled(placeholder.to_string(), Styles::text_muted()));
    }
    let mut spans = vec![Span::styled(value.to_string(), Styles::text())];
    if editing {
        spans.push(Span::styled(
            "█",
            Style::default().fg(Colors::PRIMARY).add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}

// ============================================================================
// Location Screen
// ============================================================================

/// Render the location step
pub fn render_location_screen(f: &mut Frame, area: Rect, session: &Session, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Mode tabs
            Constraint::Min(6),    // Mode body
            Constraint::Length(3), // Buttons
        ])
        .split(area);

    let step = session.step();
    render_step_title(
        f,
        chunks[0],
        step.title(),
        Some("Tell us roughly where you are to see nearby resources.".to_string()),
    );

    let criteria = session.criteria();
    let modes: Vec<SearchMode> = SearchMode::iter().collect();
    let selected_tab = modes.iter().position(|m| *m == criteria.mode()).unwrap_or(0);
    let tabs = Tabs::new(modes.iter().map(|m| m.to_string()).collect::<Vec<_>>())
        .select(selected_tab)
        .block(Block::default().borders(Borders::ALL).border_style(Styles::border_inactive()))
        .style(Styles::text_secondary())
        .highlight_style(Styles::selected());
    f.render_widget(tabs, chunks[1]);

    match criteria.mode() {
        SearchMode::City => render_city_mode(f, chunks[2], session, state),
        SearchMode::PostalCode => render_pincode_mode(f, chunks[2], session),
        SearchMode::RegionMap => render_region_mode(f, chunks[2], session, state),
    }

    render_location_buttons(f, chunks[3], session);
}

fn render_city_mode(f: &mut Frame, area: Rect, session: &Session, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let editing = state.mode == AppMode::AddressInput;
    let criteria = session.criteria();

    render_choice_list(
        f,
        columns[0],
        session.catalog().cities(),
        criteria.selected_city(),
        panel("Quick Select City", !editing),
        (!editing).then_some(state.city_cursor),
    );

    let address = criteria.freeform_address();
    let chars = address.chars().count();
    let hint = if chars == 0 || session.is_location_confirmable() {
        Line::from(Span::styled(
            "Press E to type. Matches city and area names.",
            Styles::text_muted(),
        ))
    } else {
        Line::from(Span::styled(
            "Keep typing: a little more detail is needed.",
            Styles::warning(),
        ))
    };
    let field = Paragraph::new(vec![
        text_field(address, UiText::ADDRESS_PLACEHOLDER, editing),
        Line::from(""),
        hint,
    ])
    .block(panel("Or Enter Address / Area", editing))
    .wrap(Wrap { trim: false });
    f.render_widget(field, columns[1]);
}

fn render_pincode_mode(f: &mut Frame, area: Rect, session: &Session) {
    let query = session.criteria().postal_code_query();
    let progress = format!(
        "{}/{} digits",
        query.len(),
        crate::criteria::POSTAL_CODE_LEN
    );
    let style = if session.is_location_confirmable() {
        Styles::success()
    } else {
        Styles::text_muted()
    };
    let body = Paragraph::new(vec![
        Line::from(""),
        text_field(query, UiText::PINCODE_PLACEHOLDER, true),
        Line::from(""),
        Line::from(Span::styled(progress, style)),
        Line::from(Span::styled(
            "Type digits; Backspace to correct.",
            Styles::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(panel("Enter Pincode", true));
    f.render_widget(body, area);
}

fn render_region_mode(f: &mut Frame, area: Rect, session: &Session, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let criteria = session.criteria();
    let cities_focused = state.location_focus == LocationFocus::Cities;

    render_choice_list(
        f,
        columns[0],
        session.catalog().cities(),
        criteria.selected_city(),
        panel("1. City", cities_focused),
        cities_focused.then_some(state.city_cursor),
    );

    let regions = session.available_regions();
    if regions.is_empty() {
        let prompt = if criteria.selected_city().is_empty() {
            "Pick a city to see its regions."
        } else {
            "No regions listed for this city."
        };
        let empty = Paragraph::new(Span::styled(prompt, Styles::text_muted()))
            .alignment(Alignment::Center)
            .block(panel("2. Region", !cities_focused));
        f.render_widget(empty, columns[1]);
        return;
    }

    let title = if criteria.selected_region().is_empty() {
        "2. Region".to_string()
    } else {
        "2. Region (X: Clear Selection)".to_string()
    };
    render_choice_list(
        f,
        columns[1],
        regions,
        criteria.selected_region(),
        panel(&title, !cities_focused),
        (!cities_focused).then_some(state.region_cursor),
    );
}

fn render_location_buttons(f: &mut Frame, area: Rect, session: &Session) {
    let detect = if session.is_detecting() {
        Span::styled(format!("[ {} ]", UiText::DETECTING), Styles::warning())
    } else {
        Span::styled(UiText::BTN_DETECT, Styles::button_inactive())
    };
    let confirm = if session.is_location_confirmable() {
        Span::styled(UiText::BTN_CONFIRM_LOCATION, Styles::button_active())
    } else {
        Span::styled(UiText::BTN_CONFIRM_LOCATION, Styles::button_disabled())
    };
    let buttons = Paragraph::new(Line::from(vec![
        Span::styled("D ", Styles::key_hint()),
        detect,
        Span::raw("      "),
        Span::styled("C ", Styles::key_hint()),
        confirm,
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP).border_style(Styles::border_inactive()));
    f.render_widget(buttons, area);
}

// ============================================================================
// Delivery Screen
// ============================================================================

/// Render the delivery question
pub fn render_delivery_screen(f: &mut Frame, area: Rect, session: &Session, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(4), // Explanation
            Constraint::Length(3), // Buttons
            Constraint::Min(0),
        ])
        .split(area);

    render_step_title(
        f,
        chunks[0],
        session.step().title(),
        Some(format!("Location: {}", session.criteria().location_summary())),
    );

    let explanation = Paragraph::new(vec![
        Line::from("Some NGOs can bring supplies to your door."),
        Line::from("Choose yes to see only those; choose no to see every point you can visit."),
    ])
    .style(Styles::text_secondary())
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(explanation, chunks[1]);

    let (yes_style, no_style) = if state.delivery_cursor {
        (Styles::button_active(), Styles::button_inactive())
    } else {
        (Styles::button_inactive(), Styles::button_active())
    };
    let buttons = Paragraph::new(Line::from(vec![
        Span::styled(UiText::BTN_YES, yes_style),
        Span::raw("    "),
        Span::styled(UiText::BTN_NO, no_style),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(buttons, chunks[2]);
}

// ============================================================================
// Results Screen
// ============================================================================

/// Render the filtered resource list
pub fn render_results_screen(f: &mut Frame, area: Rect, session: &Session, state: &AppState) {
    let criteria = session.criteria();
    let results = session.results();
    let banner = criteria.delivery_needed().is_required();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                         // Title
            Constraint::Length(1),                         // Category chips
            Constraint::Length(if banner { 1 } else { 0 }), // Delivery banner
            Constraint::Min(4),                            // Cards
        ])
        .split(area);

    let count = match results.len() {
        1 => "1 location".to_string(),
        n => format!("{} locations", n),
    };
    render_step_title(
        f,
        chunks[0],
        session.step().title(),
        Some(format!("{} for {}  (C: change)", count, criteria.location_summary())),
    );

    let mut chips = vec![Span::styled("Category: ", Styles::text_muted())];
    for filter in CategoryFilter::iter() {
        let style = if filter == criteria.category_filter() {
            Styles::selected()
        } else {
            Styles::text_secondary()
        };
        chips.push(Span::styled(format!(" {} ", filter.to_string().to_uppercase()), style));
        chips.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(chips)).alignment(Alignment::Center), chunks[1]);

    if banner {
        let delivery = Paragraph::new(Span::styled(
            UiText::DELIVERY_BANNER,
            Styles::success().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(delivery, chunks[2]);
    }

    if results.is_empty() {
        render_empty_state(f, chunks[3]);
        return;
    }

    let items: Vec<ListItem> = results
        .iter()
        .map(|record| ListItem::new(resource_card(record)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::TOP).border_style(Styles::border_inactive()))
        .highlight_symbol("▌ ")
        .highlight_style(Style::default().bg(Colors::BG_PRIMARY));

    let mut list_state = ListState::default();
    list_state.select(Some(state.result_cursor.min(results.len() - 1)));
    f.render_stateful_widget(list, chunks[3], &mut list_state);
}

fn render_empty_state(f: &mut Frame, area: Rect) {
    let empty = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(UiText::NO_RESULTS, Styles::text_bold())),
        Line::from(Span::styled(UiText::NO_RESULTS_HINT, Styles::text_muted())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(empty, area);
}

/// Card text for one resource
pub fn resource_card(record: &ResourceRecord) -> Text<'static> {
    let tag_style = Style::default()
        .fg(Theme::category_color(record.category))
        .add_modifier(Modifier::BOLD);

    let mut header = vec![
        Span::styled(format!("[{}] ", record.category.short_label()), tag_style),
        Span::styled(record.category.to_string(), tag_style),
        Span::styled(format!("   Verified {}", record.verified_at), Styles::text_muted()),
    ];
    if record.supports_delivery {
        header.push(Span::styled("   Delivers", Styles::success()));
    }

    let mut lines = vec![
        Line::from(header),
        Line::from(Span::styled(record.name.clone(), Styles::text_bold())),
        labelled("Address", format!("{}, {}", record.address, record.city)),
        labelled("Hours", record.operating_hours.clone()),
    ];
    if !record.eligibility_conditions.is_empty() {
        lines.push(labelled("Eligibility", record.eligibility_conditions.join("; ")));
    }
    if !record.required_documents.is_empty() {
        lines.push(labelled("Bring", record.required_documents.join(", ")));
    }
    lines.push(labelled("Directions", directions_url(record)));
    if let Some(tel) = dial_link(record) {
        lines.push(labelled("Call", tel));
    }
    lines.push(Line::from(""));

    Text::from(lines)
}

fn labelled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", format!("{}:", label)), Styles::text_muted()),
        Span::styled(value, Styles::text()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn card_text(id: &str) -> String {
        let catalog = Catalog::builtin();
        let record = catalog.get(id).expect("bundled record");
        resource_card(record)
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_card_shows_links_and_badges() {
        let text = card_text("mum-002");
        assert!(text.contains("[NGO] NGO / Charity"));
        assert!(text.contains("Delivers"));
        assert!(text.contains("Call:"));
        assert!(text.contains("tel:+919820000002"));
        assert!(text.contains("https://www.google.com/maps/dir/?api=1&destination="));
    }

    #[test]
    fn test_card_without_phone() {
        let text = card_text("nmb-003");
        assert!(!text.contains("Call:"));
        assert!(text.contains("Government Scheme"));
    }
}
