//! Admin dashboard: module table on the left, selected module's runs on the
//! right.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(area);

  draw_modules(f, cols[0], app);
  draw_runs(f, cols[1], app);
}

fn draw_modules(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Modules ({}) ", app.admin_modules.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let items: Vec<ListItem> = app
    .admin_modules
    .iter()
    .map(|module| {
      ListItem::new(Line::from(vec![
        Span::styled(
          format!("{:<10}", module.code),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(module.name.clone()),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(if app.admin_modules.is_empty() {
    None
  } else {
    Some(app.admin_cursor)
  });

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

fn draw_runs(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Runs ({}) ", app.admin_runs.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.admin_runs.is_empty() {
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        "Press Enter on a module to list its runs.",
        Style::default().fg(Color::DarkGray),
      ))),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .admin_runs
    .iter()
    .map(|run| {
      let mut spans = vec![Span::raw(format!("{} {}", run.semester, run.year))];
      if run.is_active {
        spans.push(Span::styled(
          "  ● active",
          Style::default().fg(Color::Green),
        ));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.admin_run_cursor));

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
