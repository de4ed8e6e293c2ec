//! Login / registration entry screens.
//!
//! The actual input happens in the form overlay; this pane is the backdrop
//! with a short orientation text.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Screen};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let title = if app.screen == Screen::Login {
    " Sign in to StudyHub "
  } else {
    " Create a StudyHub account "
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines = vec![
    Line::raw(""),
    Line::from(Span::styled(
      "  StudyHub",
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(
      "  Course modules, weeks, and shared resources.",
      Style::default().fg(Color::Gray),
    )),
    Line::raw(""),
    Line::from(Span::styled(
      if app.screen == Screen::Login {
        "  Press Enter to open the sign-in form, r to register instead."
      } else {
        "  Press Enter to open the registration form, s to sign in instead."
      },
      Style::default().fg(Color::DarkGray),
    )),
  ];

  f.render_widget(Paragraph::new(lines), inner);
}
