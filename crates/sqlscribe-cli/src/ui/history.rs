//! History list pane.

use chrono::Local;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, Focus};

/// Render the history list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered();
  let total = app.history.len();

  // Title with count.
  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" History ({}/{}) ", filtered.len(), total)
  } else {
    format!(" History ({total}) ")
  };

  let border = if app.focus == Focus::History {
    Style::default().fg(Color::Blue)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(border);

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  if total == 0 {
    f.render_widget(
      Paragraph::new("No translations yet.")
        .style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  // Build list items: prompt and timestamp on one line, SQL below.
  let items: Vec<ListItem> = filtered
    .iter()
    .enumerate()
    .map(|(i, t)| {
      let when = t
        .timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

      let is_cursor = i == app.list_cursor && app.focus == Focus::History;
      let sql_style = if is_cursor {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Cyan)
      };

      ListItem::new(vec![
        Line::from(vec![
          Span::styled(t.prompt.clone(), Style::default().fg(Color::Gray)),
          Span::styled(format!("  {when}"), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(t.sql.clone(), sql_style)),
      ])
    })
    .collect();

  // If a filter is active or set, show a filter bar at the bottom.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  // Scrollable list with cursor tracking.
  let mut state = ListState::default();
  state.select(if filtered.is_empty() {
    None
  } else {
    Some(app.list_cursor)
  });

  f.render_stateful_widget(
    List::new(items).highlight_symbol(""),
    inner_area,
    &mut state,
  );
}
