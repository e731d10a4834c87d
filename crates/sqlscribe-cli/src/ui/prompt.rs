//! Prompt input and result panes.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Focus};

/// Render the English prompt box.
pub fn draw_input(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.focus == Focus::Prompt && !app.filter_active;

  let border = if focused {
    Style::default().fg(Color::Blue)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let block = Block::default()
    .title(" English prompt ")
    .borders(Borders::ALL)
    .border_style(border);
  let inner = block.inner(area);
  f.render_widget(block, area);

  // Trailing `_` stands in for the cursor while the box has focus.
  let text = if focused {
    format!("{}_", app.input)
  } else {
    app.input.clone()
  };
  f.render_widget(Paragraph::new(text), inner);
}

/// Render the generated-SQL pane.
pub fn draw_result(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Generated SQL ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.in_flight {
    f.render_widget(
      Paragraph::new("Translating…").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let para = match &app.result {
    Some(text) if app.result_is_error => {
      Paragraph::new(text.as_str()).style(Style::default().fg(Color::Red))
    }
    Some(text) => Paragraph::new(text.as_str())
      .style(Style::default().fg(Color::Cyan))
      .wrap(Wrap { trim: false }),
    None => Paragraph::new("Enter a request in plain English and press Enter.")
      .style(Style::default().fg(Color::DarkGray)),
  };
  f.render_widget(para, inner);
}
