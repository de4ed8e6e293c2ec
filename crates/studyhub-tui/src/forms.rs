//! Text-input forms rendered as overlays.
//!
//! A form is a titled list of fields with one active field; keys go into the
//! active field until the user submits (Enter on the last field, or Enter
//! anywhere with Ctrl) or cancels (Esc). The owning screen decides what the
//! submitted values mean via [`FormKind`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
  Login,
  Register,
  NewModule,
  NewRun { module_id: Uuid },
  NewTerm,
  /// Create a term and roll every module into a run for it.
  TermRollover,
  NewLink { week_id: Uuid },
  UploadFile { week_id: Uuid },
}

#[derive(Debug, Clone)]
pub struct Field {
  pub label: &'static str,
  pub value: String,
  /// Render as asterisks (passwords).
  pub mask:  bool,
}

impl Field {
  fn plain(label: &'static str) -> Self {
    Self {
      label,
      value: String::new(),
      mask: false,
    }
  }

  fn masked(label: &'static str) -> Self {
    Self {
      label,
      value: String::new(),
      mask: true,
    }
  }
}

/// Outcome of feeding a key event to a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
  Consumed,
  Cancelled,
  Submitted,
}

#[derive(Debug, Clone)]
pub struct Form {
  pub kind:   FormKind,
  pub title:  &'static str,
  pub fields: Vec<Field>,
  pub cursor: usize,
  /// Validation message shown under the fields.
  pub error:  Option<String>,
}

impl Form {
  pub fn login() -> Self {
    Self::new(FormKind::Login, " Sign in ", vec![
      Field::plain("Email"),
      Field::masked("Password"),
    ])
  }

  pub fn register() -> Self {
    Self::new(FormKind::Register, " Create account ", vec![
      Field::plain("Email"),
      Field::masked("Password"),
      Field::plain("First name"),
      Field::plain("Last name"),
    ])
  }

  pub fn new_module() -> Self {
    Self::new(FormKind::NewModule, " New module ", vec![
      Field::plain("Code"),
      Field::plain("Name"),
      Field::plain("Description"),
      Field::plain("Department"),
    ])
  }

  pub fn new_run(module_id: Uuid) -> Self {
    Self::new(FormKind::NewRun { module_id }, " New module run ", vec![
      Field::plain("Year"),
      Field::plain("Semester (spring/fall)"),
      Field::plain("Active (y/n)"),
    ])
  }

  pub fn new_term() -> Self {
    Self::new(FormKind::NewTerm, " New academic term ", vec![
      Field::plain("Year"),
      Field::plain("Semester (spring/fall)"),
    ])
  }

  pub fn term_rollover() -> Self {
    Self::new(FormKind::TermRollover, " Start new term ", vec![
      Field::plain("Year"),
      Field::plain("Semester (spring/fall)"),
    ])
  }

  pub fn new_link(week_id: Uuid) -> Self {
    Self::new(FormKind::NewLink { week_id }, " Add link ", vec![
      Field::plain("Name"),
      Field::plain("URL"),
    ])
  }

  pub fn upload_file(week_id: Uuid) -> Self {
    Self::new(FormKind::UploadFile { week_id }, " Upload file ", vec![
      Field::plain("Path"),
    ])
  }

  fn new(kind: FormKind, title: &'static str, fields: Vec<Field>) -> Self {
    Self {
      kind,
      title,
      fields,
      cursor: 0,
      error: None,
    }
  }

  pub fn value(&self, index: usize) -> &str {
    self.fields.get(index).map_or("", |f| f.value.trim())
  }

  /// Feed a key event; the caller acts on [`FormEvent::Submitted`].
  pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
    match key.code {
      KeyCode::Esc => return FormEvent::Cancelled,
      KeyCode::Enter => {
        if key.modifiers.contains(KeyModifiers::CONTROL)
          || self.cursor + 1 == self.fields.len()
        {
          return FormEvent::Submitted;
        }
        self.cursor += 1;
      }
      KeyCode::Tab | KeyCode::Down => {
        self.cursor = (self.cursor + 1) % self.fields.len();
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.cursor = self.cursor.checked_sub(1).unwrap_or(self.fields.len() - 1);
      }
      KeyCode::Backspace => {
        if let Some(field) = self.fields.get_mut(self.cursor) {
          field.value.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(field) = self.fields.get_mut(self.cursor) {
          field.value.push(c);
        }
      }
      _ => {}
    }
    FormEvent::Consumed
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::{KeyCode, KeyEvent};

  use super::*;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
  }

  #[test]
  fn typing_fills_the_active_field() {
    let mut form = Form::login();
    for c in "a@b.com".chars() {
      assert_eq!(form.handle_key(key(KeyCode::Char(c))), FormEvent::Consumed);
    }
    assert_eq!(form.value(0), "a@b.com");
    assert_eq!(form.value(1), "");
  }

  #[test]
  fn enter_advances_then_submits_on_last_field() {
    let mut form = Form::login();
    assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Consumed);
    assert_eq!(form.cursor, 1);
    assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Submitted);
  }

  #[test]
  fn esc_cancels() {
    let mut form = Form::new_module();
    assert_eq!(form.handle_key(key(KeyCode::Esc)), FormEvent::Cancelled);
  }

  #[test]
  fn tab_wraps_around() {
    let mut form = Form::login();
    form.handle_key(key(KeyCode::Tab));
    form.handle_key(key(KeyCode::Tab));
    assert_eq!(form.cursor, 0);
    form.handle_key(key(KeyCode::BackTab));
    assert_eq!(form.cursor, 1);
  }
}
