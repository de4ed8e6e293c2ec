//! TUI rendering — orchestrates all panes.

pub mod admin;
pub mod entry;
pub mod form;
pub mod module_detail;
pub mod modules;
pub mod profile;
pub mod terms;
pub mod week;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  // Modal form overlay, always on top.
  if let Some(active) = &app.form {
    form::draw(f, rows[1], active);
  }
}

/// Neutral frame shown while the session bootstrap is still in flight —
/// nothing protected is committed to the screen.
pub fn draw_resolving(f: &mut Frame) {
  let area = f.area();
  f.render_widget(
    Paragraph::new(Line::from(Span::styled(
      "Loading session…",
      Style::default().fg(Color::DarkGray),
    ))),
    area,
  );
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let left = Span::styled(
    " studyhub",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );

  let who = match app.session.identity() {
    Some(user) if user.is_admin => format!("{} (admin) ", user.full_name()),
    Some(user) => format!("{} ", user.full_name()),
    None => "not signed in ".to_owned(),
  };
  let right = Span::styled(who, Style::default().fg(Color::Gray));

  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  match app.screen {
    Screen::Login | Screen::Register => entry::draw(f, area, app),
    Screen::Modules => modules::draw(f, area, app),
    Screen::ModuleDetail => module_detail::draw(f, area, app),
    Screen::Week => week::draw(f, area, app),
    Screen::Terms => terms::draw(f, area, app),
    Screen::Admin => admin::draw(f, area, app),
    Screen::Profile => profile::draw(f, area, app),
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = hints_for(app);

  let status = if app.status_msg.is_empty() {
    hints.to_owned()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

fn hints_for(app: &App) -> (&'static str, &'static str) {
  if app.form.is_some() {
    return ("INPUT", "Tab next field  Enter submit  Esc cancel");
  }
  match app.screen {
    Screen::Login => ("SIGN IN", "Enter form  r register  q quit"),
    Screen::Register => ("REGISTER", "Enter form  s sign in  q quit"),
    Screen::Modules if app.filter_active => {
      ("SEARCH", "Type to filter  Esc cancel  Enter select")
    }
    Screen::Modules if app.is_admin() => (
      "MODULES",
      "↑↓/jk navigate  / search  Enter open  t terms  p profile  a admin  n new  Q sign out  q quit",
    ),
    Screen::Modules => (
      "MODULES",
      "↑↓/jk navigate  / search  Enter open  t terms  p profile  Q sign out  q quit",
    ),
    Screen::ModuleDetail if app.is_admin() => (
      "MODULE",
      "↑↓/jk weeks  Enter open week  n new run  d delete run  Esc back",
    ),
    Screen::ModuleDetail => ("MODULE", "↑↓/jk weeks  Enter open week  Esc back"),
    Screen::Week => (
      "WEEK",
      "↑↓/jk navigate  Enter/o open  a add link  u upload  d delete  Esc back",
    ),
    Screen::Terms if app.is_admin() => (
      "TERMS",
      "↑↓/jk navigate  n new  N new term rollover  a activate  x deactivate  Esc back",
    ),
    Screen::Terms => ("TERMS", "↑↓/jk navigate  Esc back"),
    Screen::Admin => (
      "ADMIN",
      "jk modules  Enter runs  JK runs  n new module  d/D delete  Esc back",
    ),
    Screen::Profile => ("PROFILE", "↑↓/jk navigate  d delete  Q sign out  Esc back"),
  }
}
