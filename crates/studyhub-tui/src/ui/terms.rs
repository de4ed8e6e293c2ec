//! Academic terms pane.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Academic terms ({}) ", app.terms.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.terms.is_empty() {
    let hint = if app.is_admin() {
      "No academic terms. Press n to create one, or N to start a new term."
    } else {
      "No academic terms yet."
    };
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
      ))),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .terms
    .iter()
    .map(|term| {
      let mut spans = vec![Span::styled(
        term.label(),
        Style::default().add_modifier(Modifier::BOLD),
      )];
      if term.is_active {
        spans.push(Span::styled(
          "  ● active",
          Style::default().fg(Color::Green),
        ));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.term_cursor));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner,
    &mut state,
  );
}
