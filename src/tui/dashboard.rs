//! # Dashboard View
//!
//! Renders `DashboardState` and maps key presses to `DashboardAction`s.
//!
//! ```text
//! ┌ title: server, filter, loading ─────────────────────┐
//! │ banner: connection / error / notice                  │
//! ├──────────────────────────────────────────────────────┤
//! │ page: package table | package detail | form          │
//! ├──────────────────────────────────────────────────────┤
//! │ key hints                                            │
//! └──────────────────────────────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap};

use crate::api::{Package, PackageFilter};
use crate::core::dashboard::{
    ChildRow, Connection, DashboardAction, DashboardState, ListView, Page,
};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{FormEvent, FormView};
use crate::tui::event::TuiEvent;

/// Maps a key press to an action, editing the open form in place.
pub fn handle_key(state: &mut DashboardState, event: &TuiEvent) -> Option<DashboardAction> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(DashboardAction::Quit);
    }
    if state.error.is_some() && matches!(event, TuiEvent::Escape) {
        return Some(DashboardAction::DismissError);
    }
    if let Some(form) = state.form_mut() {
        return match form.handle_event(event)? {
            FormEvent::Submit => Some(DashboardAction::SubmitForm),
            FormEvent::Cancel => Some(DashboardAction::Back),
        };
    }

    let on_list = state.page == Page::List;
    match event {
        TuiEvent::Up | TuiEvent::Char('k') => Some(DashboardAction::SelectPrev),
        TuiEvent::Down | TuiEvent::Char('j') => Some(DashboardAction::SelectNext),
        TuiEvent::Char('q') => Some(DashboardAction::Quit),
        TuiEvent::Char('r') if state.connection == Connection::Disconnected => {
            Some(DashboardAction::Retry)
        }
        TuiEvent::Char('r') => Some(DashboardAction::Refresh),
        TuiEvent::Char('d') => Some(DashboardAction::DeletePackage),
        TuiEvent::Enter if on_list => Some(DashboardAction::OpenSelected),
        TuiEvent::Char('n') if on_list => Some(DashboardAction::NewPackage),
        TuiEvent::Char('s') if on_list => Some(DashboardAction::CycleStatusFilter),
        TuiEvent::Char('f') if on_list => Some(DashboardAction::CycleFeaturedFilter),
        TuiEvent::Char('e') if !on_list => Some(DashboardAction::EditPackage),
        TuiEvent::Char('i') if !on_list => Some(DashboardAction::AddItinerary),
        TuiEvent::Char('m') if !on_list => Some(DashboardAction::AddImage),
        TuiEvent::Char('x') if !on_list => Some(DashboardAction::DeleteChild),
        TuiEvent::Escape | TuiEvent::Char('b') if !on_list => Some(DashboardAction::Back),
        _ => None,
    }
}

pub fn draw_dashboard(frame: &mut Frame, state: &DashboardState, server_url: &str) {
    use Constraint::{Length, Min};
    let [title, banner, main, footer] =
        Layout::vertical([Length(1), Length(1), Min(0), Length(1)]).areas(frame.area());

    draw_title(frame, title, state, server_url);
    draw_banner(frame, banner, state, server_url);
    match &state.page {
        Page::List => draw_list(frame, main, state),
        Page::Detail => draw_detail(frame, main, state),
        Page::Editor(editor) => FormView {
            title: editor.title(),
            form: &editor.form,
            masked: &[],
        }
        .render(frame, main),
        Page::Itinerary(editor) => FormView {
            title: "Add itinerary day",
            form: &editor.form,
            masked: &[],
        }
        .render(frame, main),
        Page::Image(editor) => FormView {
            title: "Add image",
            form: &editor.form,
            masked: &[],
        }
        .render(frame, main),
    }
    frame.render_widget(
        Paragraph::new(hints(&state.page)).style(Style::new().fg(Color::DarkGray)),
        footer,
    );
}

fn draw_title(frame: &mut Frame, area: Rect, state: &DashboardState, server_url: &str) {
    let mut spans = vec![
        Span::styled(
            " Wanderlust Dashboard ",
            Style::new().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(format!("  {}  |  {}", server_url, filter_label(&state.filter))),
    ];
    if state.loading {
        spans.push(Span::styled("  |  Loading...", Style::new().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_banner(frame: &mut Frame, area: Rect, state: &DashboardState, server_url: &str) {
    let line = if state.connection == Connection::Disconnected {
        Line::from(Span::styled(
            format!("Not connected to {server_url}. Press r to retry."),
            Style::new().fg(Color::White).bg(Color::Red),
        ))
    } else if let Some(error) = &state.error {
        Line::from(Span::styled(
            format!("Error: {error}  (Esc to dismiss)"),
            Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if let Some(notice) = &state.notice {
        Line::from(Span::styled(notice.as_str(), Style::new().fg(Color::Green)))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_list(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let [overview_area, table_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let rows = match state.list_view() {
        ListView::Disconnected => {
            return draw_message(frame, table_area, "Cannot reach the server.");
        }
        ListView::Loading => return draw_message(frame, table_area, "Loading packages..."),
        ListView::Empty => {
            return draw_message(frame, table_area, "No packages yet. Press n to create one.");
        }
        ListView::Rows(rows) => rows,
    };

    let overview = state.overview();
    frame.render_widget(
        Paragraph::new(format!(
            " Total {}  ·  Active {}  ·  Featured {}",
            overview.total, overview.active, overview.featured
        )),
        overview_area,
    );

    let table_rows: Vec<Row> = rows.iter().map(package_row).collect();
    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(3),
    ];
    let table = Table::new(table_rows, widths)
        .header(
            Row::new(["Title", "Location", "Days", "Price", "Status", "★"])
                .style(Style::new().add_modifier(Modifier::BOLD)),
        )
        .block(Block::bordered().title(" Packages "))
        .row_highlight_style(Style::new().fg(Color::Yellow))
        .highlight_symbol("> ");
    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, table_area, &mut table_state);
}

fn package_row(package: &Package) -> Row<'_> {
    Row::new([
        package.title.clone(),
        package.location.clone().unwrap_or_default(),
        package.duration_days.to_string(),
        format!("{:.2}", package.price),
        package.status.to_string(),
        if package.is_featured { "★" } else { "" }.to_string(),
    ])
}

fn draw_detail(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(package) = &state.open_package else {
        return draw_message(frame, area, "Loading package...");
    };
    let [summary_area, children_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Min(0)]).areas(area);

    let dates = match (package.start_date, package.end_date) {
        (Some(start), Some(end)) => format!("{start} to {end}"),
        (Some(start), None) => format!("from {start}"),
        _ => "no dates".to_string(),
    };
    let summary = vec![
        Line::from(Span::styled(
            package.title.as_str(),
            Style::new().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{}  ·  {} days  ·  {:.2}  ·  up to {} guests",
            package.location.as_deref().unwrap_or("no location"),
            package.duration_days,
            package.price,
            package.max_guests
        )),
        Line::from(format!(
            "Status {}  ·  {}{}",
            package.status,
            dates,
            if package.is_featured { "  ·  featured" } else { "" }
        )),
        Line::from(package.description.as_deref().unwrap_or("").to_string()),
    ];
    frame.render_widget(
        Paragraph::new(summary)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(format!(" {} ", package.id))),
        summary_area,
    );

    let items: Vec<ListItem> = state
        .child_rows()
        .into_iter()
        .map(|row| match row {
            ChildRow::Itinerary(entry) => ListItem::new(format!(
                "Day {:<3} {}{}",
                entry.day_number,
                entry.title,
                entry
                    .description
                    .as_deref()
                    .map(|d| format!(": {d}"))
                    .unwrap_or_default()
            )),
            ChildRow::Image(image) => ListItem::new(format!(
                "Image #{} {}{}",
                image.display_order,
                image.image_url,
                image
                    .caption
                    .as_deref()
                    .map(|c| format!(" ({c})"))
                    .unwrap_or_default()
            )),
        })
        .collect();
    let title = format!(
        " Itinerary ({}) and images ({}) ",
        package.itinerary.len(),
        package.images.len()
    );
    let list = List::new(items)
        .block(Block::bordered().title(title))
        .highlight_style(Style::new().fg(Color::Yellow))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.child_selected));
    frame.render_stateful_widget(list, children_area, &mut list_state);
}

fn draw_message(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(
        Paragraph::new(message).block(Block::bordered().title(" Packages ")),
        area,
    );
}

fn filter_label(filter: &PackageFilter) -> String {
    let status = filter.status.map(|s| s.as_str()).unwrap_or("all");
    let featured = match filter.featured {
        None => "any",
        Some(true) => "featured",
        Some(false) => "not featured",
    };
    format!("status: {status}  featured: {featured}")
}

fn hints(page: &Page) -> &'static str {
    match page {
        Page::List => {
            " ↑↓ select  Enter open  n new  d archive  s status  f featured  r refresh  q quit"
        }
        Page::Detail => {
            " ↑↓ select  e edit  i add day  m add image  x remove item  d archive  b back  q quit"
        }
        Page::Editor(_) | Page::Itinerary(_) | Page::Image(_) => {
            " Tab/↑↓ field  Enter save  Esc cancel"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::core::dashboard::update;
    use crate::test_support::sample_package;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(state: &DashboardState) -> String {
        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw_dashboard(f, state, "http://localhost:8000"))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn connected(packages: Vec<Package>) -> DashboardState {
        let mut state = DashboardState::new(PackageFilter::default());
        update(&mut state, DashboardAction::Started);
        update(&mut state, DashboardAction::HealthChecked(true));
        update(&mut state, DashboardAction::PackagesLoaded(packages));
        state
    }

    #[test]
    fn test_disconnected_banner() {
        let mut state = DashboardState::new(PackageFilter::default());
        update(&mut state, DashboardAction::HealthChecked(false));
        let text = render(&state);
        assert!(text.contains("Not connected to http://localhost:8000"));
        assert!(text.contains("Cannot reach the server."));
    }

    #[test]
    fn test_empty_state_and_rows() {
        assert!(render(&connected(vec![])).contains("No packages yet"));

        let text = render(&connected(vec![sample_package("p1", "Highlands Loop")]));
        assert!(text.contains("Highlands Loop"));
        assert!(text.contains("Inverness"));
        assert!(text.contains("1200.00"));
        assert!(text.contains("Total 1"));
    }

    #[test]
    fn test_error_banner_shows_server_detail() {
        let mut state = connected(vec![]);
        update(
            &mut state,
            DashboardAction::RequestFailed(ApiError::RequestFailed {
                status: 404,
                message: "Package not found".to_string(),
            }),
        );
        assert!(render(&state).contains("Error: Package not found"));
        assert_eq!(
            handle_key(&mut state, &TuiEvent::Escape),
            Some(DashboardAction::DismissError)
        );
    }

    #[test]
    fn test_keys_on_list_and_detail() {
        let package = sample_package("p1", "Highlands Loop");
        let mut state = connected(vec![package.clone()]);
        assert_eq!(
            handle_key(&mut state, &TuiEvent::Enter),
            Some(DashboardAction::OpenSelected)
        );
        assert_eq!(
            handle_key(&mut state, &TuiEvent::Char('e')),
            None,
            "edit needs the detail page"
        );

        update(&mut state, DashboardAction::PackageLoaded(package));
        assert_eq!(
            handle_key(&mut state, &TuiEvent::Char('e')),
            Some(DashboardAction::EditPackage)
        );
        assert!(render(&state).contains("Day 1"));
    }

    #[test]
    fn test_form_keys_edit_in_place() {
        let mut state = connected(vec![]);
        update(&mut state, DashboardAction::NewPackage);
        for c in "Skye".chars() {
            assert_eq!(handle_key(&mut state, &TuiEvent::Char(c)), None);
        }
        assert_eq!(state.form_mut().unwrap().value("Title"), "Skye");
        // 'q' is text inside a form, not quit
        assert_eq!(handle_key(&mut state, &TuiEvent::Char('q')), None);
        assert_eq!(
            handle_key(&mut state, &TuiEvent::Enter),
            Some(DashboardAction::SubmitForm)
        );
        assert_eq!(
            handle_key(&mut state, &TuiEvent::Escape),
            Some(DashboardAction::Back)
        );
    }

    #[test]
    fn test_retry_only_when_disconnected() {
        let mut state = DashboardState::new(PackageFilter::default());
        update(&mut state, DashboardAction::HealthChecked(false));
        assert_eq!(
            handle_key(&mut state, &TuiEvent::Char('r')),
            Some(DashboardAction::Retry)
        );
        let mut state = connected(vec![]);
        assert_eq!(
            handle_key(&mut state, &TuiEvent::Char('r')),
            Some(DashboardAction::Refresh)
        );
    }
}
