//! Modal form overlay.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::forms::Form;

/// Render `form` centered within `area`.
pub fn draw(f: &mut Frame, area: Rect, form: &Form) {
  let height = (form.fields.len() as u16 + 4).min(area.height);
  let width = 52.min(area.width);
  let popup = centered(area, width, height);

  f.render_widget(Clear, popup);

  let block = Block::default()
    .title(form.title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  let mut lines: Vec<Line> = form
    .fields
    .iter()
    .enumerate()
    .map(|(i, field)| {
      let active = i == form.cursor;
      let label_style = if active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      let shown = if field.mask {
        "*".repeat(field.value.chars().count())
      } else {
        field.value.clone()
      };
      let caret = if active { "_" } else { "" };
      Line::from(vec![
        Span::styled(format!("{:<22}", field.label), label_style),
        Span::raw(format!("{shown}{caret}")),
      ])
    })
    .collect();

  if let Some(error) = &form.error {
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
      error.clone(),
      Style::default().fg(Color::Red),
    )));
  }

  f.render_widget(Paragraph::new(lines), inner);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let vertical = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Min(0),
      Constraint::Length(height),
      Constraint::Min(0),
    ])
    .split(area);
  let horizontal = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Min(0),
      Constraint::Length(width),
      Constraint::Min(0),
    ])
    .split(vertical[1]);
  horizontal[1]
}
