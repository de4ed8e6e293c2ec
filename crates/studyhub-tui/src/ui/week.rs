//! Week detail pane: the resources shared for one week.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use studyhub_core::ResourceType;

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let title = match &app.current_week {
    Some(week) if !week.topic.is_empty() => {
      format!(" Week {} — {} ({}) ", week.number, week.topic, app.resources.len())
    }
    Some(week) => format!(" Week {} ({}) ", week.number, app.resources.len()),
    None => format!(" Resources ({}) ", app.resources.len()),
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.resources.is_empty() {
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        "No resources yet. Press a to add a link or u to upload a file.",
        Style::default().fg(Color::DarkGray),
      ))),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .resources
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
          format!("  · {}", resource.user_name),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.resource_cursor));

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
