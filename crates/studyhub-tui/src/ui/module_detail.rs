//! Module detail pane: module header, active run, and its weeks.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(page) = &app.module_page else {
    return;
  };

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(5), // module header
      Constraint::Min(0),    // run + weeks
    ])
    .split(area);

  draw_module_header(f, rows[0], app);
  match &page.run {
    Some(_) => draw_run(f, rows[1], app),
    // No active run: the page must say so, not render an empty run.
    None => draw_no_run(f, rows[1], app),
  }
}

fn draw_module_header(f: &mut Frame, area: Rect, app: &App) {
  let Some(page) = &app.module_page else {
    return;
  };
  let module = &page.module;

  let block = Block::default()
    .title(format!(" {} ", module.code))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines = vec![
    Line::from(Span::styled(
      module.name.clone(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(
      module.department_name.clone(),
      Style::default().fg(Color::Gray),
    )),
  ];
  if !module.description.is_empty() {
    lines.push(Line::from(Span::styled(
      module.description.clone(),
      Style::default().fg(Color::DarkGray),
    )));
  }
  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_run(f: &mut Frame, area: Rect, app: &App) {
  let Some(page) = &app.module_page else {
    return;
  };
  let Some(run) = &page.run else {
    return;
  };

  let title = format!(
    " Active run — {} {} ({} weeks) ",
    run.semester,
    run.year,
    page.weeks.len()
  );
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let items: Vec<ListItem> = page
    .weeks
    .iter()
    .map(|week| {
      let mut spans = vec![Span::styled(
        format!("Week {:>2}", week.number),
        Style::default().add_modifier(Modifier::BOLD),
      )];
      if !week.topic.is_empty() {
        spans.push(Span::styled(
          format!("  {}", week.topic),
          Style::default().fg(Color::Gray),
        ));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  let mut state = ListState::default();
  state.select(if page.weeks.is_empty() {
    None
  } else {
    Some(app.week_cursor)
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

fn draw_no_run(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" No active run ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let hint = if app.is_admin() {
    "This module has no active run. Press n to create one."
  } else {
    "This module has no active run this term."
  };
  f.render_widget(
    Paragraph::new(Line::from(Span::styled(
      hint,
      Style::default().fg(Color::DarkGray),
    ))),
    inner,
  );
}
