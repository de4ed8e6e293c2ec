//! Profile pane: identity card plus everything the user has shared.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use studyhub_core::ResourceType;

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(4), // identity card
      Constraint::Min(0),    // resources
    ])
    .split(area);

  draw_identity(f, rows[0], app);
  draw_resources(f, rows[1], app);
}

fn draw_identity(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Profile ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(user) = app.session.identity() else {
    return;
  };

  let mut name_spans = vec![Span::styled(
    user.full_name(),
    Style::default().add_modifier(Modifier::BOLD),
  )];
  if user.is_admin {
    name_spans.push(Span::styled("  admin", Style::default().fg(Color::Yellow)));
  }

  f.render_widget(
    Paragraph::new(vec![
      Line::from(name_spans),
      Line::from(Span::styled(
        user.email.clone(),
        Style::default().fg(Color::Gray),
      )),
    ]),
    inner,
  );
}

fn draw_resources(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Shared resources ({}) ", app.my_resources.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.my_resources.is_empty() {
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        "Nothing shared yet.",
        Style::default().fg(Color::DarkGray),
      ))),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .my_resources
    .iter()
    .map(|resource| {
      let tag = match resource.resource_type {
        ResourceType::File => "[file]",
        ResourceType::Link => "[link]",
        ResourceType::Note => "[note]",
      };
      ListItem::new(Line::from(vec![
        Span::styled(format!("{tag:<7}"), Style::default().fg(Color::Cyan)),
        Span::styled(
          resource.name.clone(),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
          format!(
            "  · {} — {} {}, week {}",
            resource.module_name, resource.semester, resource.year, resource.week_number
          ),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.profile_cursor));

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
