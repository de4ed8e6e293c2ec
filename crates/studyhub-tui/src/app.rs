//! Application state machine and event dispatcher.
//!
//! Each screen owns only transient fetch state — nothing fetched survives a
//! navigation, so every entry re-fetches from the backend. Failed fetches
//! surface in the status bar and leave whatever was already on screen
//! intact. Known limitation: there is no de-duplication or cancellation of
//! in-flight requests; fetches are awaited inline on the event loop.

use std::{path::Path, sync::Arc};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use studyhub_client::{Error as ClientError, Gateway, Session};
use studyhub_core::{
  AcademicTerm, Module, ModulePage, ModuleRun, NewAcademicTerm, NewLink,
  NewModule, NewModuleRun, NewUser, Resource, Semester, UserResource, Week,
};
use uuid::Uuid;

use crate::{
  forms::{Form, FormEvent, FormKind},
  route::{self, AuthState, Route, Verdict},
};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  Login,
  Register,
  Modules,
  ModuleDetail,
  Week,
  Terms,
  Admin,
  Profile,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen:     Screen,
  pub status_msg: String,
  /// Modal form overlay, if one is open.
  pub form:       Option<Form>,

  // Modules screen.
  pub modules:        Vec<Module>,
  pub filter:         String,
  pub filter_active:  bool,
  pub modules_cursor: usize,

  // Module detail screen.
  pub module_page: Option<ModulePage>,
  pub week_cursor: usize,

  // Week screen.
  pub current_week:    Option<Week>,
  pub resources:       Vec<Resource>,
  pub resource_cursor: usize,

  // Academic terms screen.
  pub terms:       Vec<AcademicTerm>,
  pub term_cursor: usize,

  // Admin dashboard.
  pub admin_modules: Vec<Module>,
  pub admin_cursor:  usize,
  pub admin_runs:    Vec<ModuleRun>,
  pub admin_run_cursor: usize,

  // Profile screen.
  pub my_resources:   Vec<UserResource>,
  pub profile_cursor: usize,

  pub session: Session,
  /// Shared HTTP gateway.
  pub client:  Arc<Gateway>,
}

impl App {
  pub fn new(client: Arc<Gateway>, session: Session) -> Self {
    Self {
      screen: Screen::Login,
      status_msg: String::new(),
      form: None,
      modules: Vec::new(),
      filter: String::new(),
      filter_active: false,
      modules_cursor: 0,
      module_page: None,
      week_cursor: 0,
      current_week: None,
      resources: Vec::new(),
      resource_cursor: 0,
      terms: Vec::new(),
      term_cursor: 0,
      admin_modules: Vec::new(),
      admin_cursor: 0,
      admin_runs: Vec::new(),
      admin_run_cursor: 0,
      my_resources: Vec::new(),
      profile_cursor: 0,
      session,
      client,
    }
  }

  pub fn is_admin(&self) -> bool {
    route::can_manage(self.session.identity())
  }

  fn auth_state(&mut self) -> AuthState {
    if self.session.is_authenticated() {
      AuthState::Authenticated
    } else {
      AuthState::Unauthenticated
    }
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Route every screen change through the authorization gate.
  pub async fn navigate(&mut self, route: Route) {
    match route::resolve(route, self.auth_state()) {
      Verdict::Wait => {}
      Verdict::RedirectLogin => self.show_login(),
      Verdict::RedirectModules => {
        self.screen = Screen::Modules;
        self.load_modules().await;
      }
      Verdict::Allow => self.enter(route).await,
    }
  }

  async fn enter(&mut self, route: Route) {
    match route {
      Route::Login => self.show_login(),
      Route::Register => {
        self.screen = Screen::Register;
        self.form = Some(Form::register());
      }
      Route::Modules => {
        self.screen = Screen::Modules;
        self.load_modules().await;
      }
      Route::ModuleDetail(id) => self.open_module(id).await,
      Route::Week(week_id) => self.load_week_resources(week_id).await,
      Route::Terms => {
        self.screen = Screen::Terms;
        self.load_terms().await;
      }
      Route::Admin => {
        if !self.is_admin() {
          self.status_msg = "Admin access required".into();
          return;
        }
        self.screen = Screen::Admin;
        self.load_admin().await;
      }
      Route::Profile => {
        self.screen = Screen::Profile;
        self.load_profile().await;
      }
    }
  }

  fn show_login(&mut self) {
    self.screen = Screen::Login;
    self.form = Some(Form::login());
  }

  /// Clear the session and land on login unconditionally.
  pub fn logout(&mut self) {
    self.session.logout();
    self.status_msg = "Signed out".into();
    self.show_login();
  }

  /// Shared failure path: surface the message without touching on-screen
  /// data. An expired session routes back to login (unless already there) —
  /// the gateway has already cleared the persisted state by then.
  fn fail(&mut self, err: ClientError) {
    self.status_msg = format!("Error: {err}");
    if matches!(err, ClientError::AuthExpired { .. })
      && self.screen != Screen::Login
    {
      // Drops the revoked in-memory identity as a side effect.
      let _ = self.session.is_authenticated();
      self.show_login();
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  pub async fn load_modules(&mut self) {
    self.status_msg = "Loading modules…".into();
    match self.client.list_modules().await {
      Ok(modules) => {
        self.modules = modules;
        self.modules_cursor = 0;
        self.status_msg.clear();
      }
      Err(err) => self.fail(err),
    }
  }

  async fn open_module(&mut self, id: Uuid) {
    self.status_msg = "Loading module…".into();
    match self.client.module_page(id).await {
      Ok(page) => {
        self.module_page = Some(page);
        self.week_cursor = 0;
        self.screen = Screen::ModuleDetail;
        self.status_msg.clear();
      }
      Err(err) => self.fail(err),
    }
  }

  /// Open the week detail screen for `week`.
  async fn open_week(&mut self, week: Week) {
    let week_id = week.id;
    self.current_week = Some(week);
    self.load_week_resources(week_id).await;
  }

  async fn load_week_resources(&mut self, week_id: Uuid) {
    self.status_msg = "Loading resources…".into();
    match self.client.week_resources(week_id).await {
      Ok(resources) => {
        self.resources = resources;
        self.resource_cursor = 0;
        self.screen = Screen::Week;
        self.status_msg.clear();
      }
      Err(err) => self.fail(err),
    }
  }

  async fn load_terms(&mut self) {
    self.status_msg = "Loading academic terms…".into();
    match self.client.list_terms().await {
      Ok(terms) => {
        self.terms = terms;
        self.term_cursor = 0;
        self.status_msg.clear();
      }
      Err(err) => self.fail(err),
    }
  }

  async fn load_admin(&mut self) {
    self.status_msg = "Loading dashboard…".into();
    match self.client.list_modules().await {
      Ok(modules) => {
        self.admin_modules = modules;
        self.admin_cursor = 0;
        self.admin_runs.clear();
        self.admin_run_cursor = 0;
        self.status_msg.clear();
      }
      Err(err) => self.fail(err),
    }
  }

  async fn load_admin_runs(&mut self) {
    let Some(module) = self.admin_modules.get(self.admin_cursor) else {
      return;
    };
    let module_id = module.id;
    match self.client.list_runs(module_id).await {
      Ok(runs) => {
        self.admin_runs = runs;
        self.admin_run_cursor = 0;
        self.status_msg.clear();
      }
      Err(err) => self.fail(err),
    }
  }

  async fn load_profile(&mut self) {
    let Some(user_id) = self.session.identity().map(|u| u.id) else {
      return;
    };
    self.status_msg = "Loading your resources…".into();
    match self.client.user_resources(user_id).await {
      Ok(resources) => {
        self.my_resources = resources;
        self.profile_cursor = 0;
        self.status_msg.clear();
      }
      Err(err) => self.fail(err),
    }
  }

  // ── Filtered module list ──────────────────────────────────────────────────

  /// Modules matching the current fuzzy filter on code and name.
  pub fn filtered_modules(&self) -> Vec<&Module> {
    if self.filter.is_empty() {
      return self.modules.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .modules
      .iter()
      .filter(|m| {
        matcher.fuzzy_match(&m.code, &self.filter).is_some()
          || matcher.fuzzy_match(&m.name, &self.filter).is_some()
      })
      .collect()
  }

  pub fn cursor_module(&self) -> Option<&Module> {
    let list = self.filtered_modules();
    list.get(self.modules_cursor).copied()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // An open form swallows everything else.
    if let Some(form) = self.form.as_mut() {
      match form.handle_key(key) {
        FormEvent::Consumed => return Ok(true),
        FormEvent::Cancelled => return Ok(self.cancel_form()),
        FormEvent::Submitted => {
          if let Some(form) = self.form.take() {
            self.submit_form(form).await;
          }
          return Ok(true);
        }
      }
    }

    if self.filter_active {
      return Ok(self.handle_filter_key(key).await);
    }

    match self.screen {
      Screen::Login | Screen::Register => self.handle_entry_key(key).await,
      Screen::Modules => self.handle_modules_key(key).await,
      Screen::ModuleDetail => self.handle_detail_key(key).await,
      Screen::Week => self.handle_week_key(key).await,
      Screen::Terms => self.handle_terms_key(key).await,
      Screen::Admin => self.handle_admin_key(key).await,
      Screen::Profile => self.handle_profile_key(key).await,
    }
  }

  /// Closing a form on an entry screen quits; elsewhere it just closes.
  fn cancel_form(&mut self) -> bool {
    self.form = None;
    !matches!(self.screen, Screen::Login | Screen::Register)
  }

  async fn handle_entry_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
      // Reopen the form (it closed on a failed submit).
      KeyCode::Enter => {
        self.form = Some(if self.screen == Screen::Login {
          Form::login()
        } else {
          Form::register()
        });
      }
      KeyCode::Char('r') => self.navigate(Route::Register).await,
      KeyCode::Char('s') => self.navigate(Route::Login).await,
      _ => {}
    }
    Ok(true)
  }

  async fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.modules_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.modules_cursor = 0;
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.modules_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.modules_cursor = 0;
      }
      _ => {}
    }
    true
  }

  async fn handle_modules_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Char('Q') => self.logout(),

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_modules().len();
        if len > 0 && self.modules_cursor + 1 < len {
          self.modules_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.modules_cursor = self.modules_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_module().map(|m| m.id) {
          self.navigate(Route::ModuleDetail(id)).await;
        }
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.modules_cursor = 0;
      }

      KeyCode::Char('t') => self.navigate(Route::Terms).await,
      KeyCode::Char('p') => self.navigate(Route::Profile).await,
      KeyCode::Char('a') if self.is_admin() => self.navigate(Route::Admin).await,
      KeyCode::Char('n') if self.is_admin() => {
        self.form = Some(Form::new_module());
      }
      KeyCode::Char('r') => self.load_modules().await,

      _ => {}
    }
    Ok(true)
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.module_page = None;
        self.navigate(Route::Modules).await;
      }

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.module_page.as_ref().map_or(0, |p| p.weeks.len());
        if len > 0 && self.week_cursor + 1 < len {
          self.week_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.week_cursor = self.week_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        let week = self
          .module_page
          .as_ref()
          .and_then(|p| p.weeks.get(self.week_cursor))
          .cloned();
        if let Some(week) = week {
          self.open_week(week).await;
        }
      }

      // Admin affordances: create a run (also the empty-state affordance
      // when the module has no active run) and delete the active one.
      KeyCode::Char('n') if self.is_admin() => {
        if let Some(id) = self.module_page.as_ref().map(|p| p.module.id) {
          self.form = Some(Form::new_run(id));
        }
      }
      KeyCode::Char('d') if self.is_admin() => {
        let run_id = self.module_page.as_ref().and_then(|p| p.run.as_ref()).map(|r| r.id);
        if let Some(run_id) = run_id {
          match self.client.delete_run(run_id).await {
            Ok(()) => {
              self.status_msg = "Module run deleted".into();
              self.reload_module().await;
            }
            Err(err) => self.fail(err),
          }
        }
      }
      KeyCode::Char('r') => self.reload_module().await,

      _ => {}
    }
    Ok(true)
  }

  async fn reload_module(&mut self) {
    if let Some(id) = self.module_page.as_ref().map(|p| p.module.id) {
      self.open_module(id).await;
    }
  }

  async fn handle_week_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.current_week = None;
        self.resources.clear();
        // The module page is still loaded; fall back to the list if not.
        if self.module_page.is_some() {
          self.screen = Screen::ModuleDetail;
        } else {
          self.navigate(Route::Modules).await;
        }
      }

      KeyCode::Down | KeyCode::Char('j') => {
        if !self.resources.is_empty()
          && self.resource_cursor + 1 < self.resources.len()
        {
          self.resource_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.resource_cursor = self.resource_cursor.saturating_sub(1);
      }

      KeyCode::Char('a') => {
        if let Some(week_id) = self.current_week.as_ref().map(|w| w.id) {
          self.form = Some(Form::new_link(week_id));
        }
      }
      KeyCode::Char('u') => {
        if let Some(week_id) = self.current_week.as_ref().map(|w| w.id) {
          self.form = Some(Form::upload_file(week_id));
        }
      }

      // Resolve the presigned URL for a file resource.
      KeyCode::Enter | KeyCode::Char('o') => {
        let object_id = self
          .resources
          .get(self.resource_cursor)
          .and_then(|r| r.object_id);
        if let Some(object_id) = object_id {
          match self.client.download_url(object_id).await {
            Ok(loc) => self.status_msg = format!("Download: {}", loc.url),
            Err(err) => self.fail(err),
          }
        } else if let Some(url) = self
          .resources
          .get(self.resource_cursor)
          .and_then(|r| r.url.clone())
        {
          self.status_msg = format!("Link: {url}");
        }
      }

      KeyCode::Char('d') => {
        let deletable = self
          .resources
          .get(self.resource_cursor)
          .filter(|r| route::can_delete_resource(self.session.identity(), r))
          .map(|r| r.id);
        if let Some(id) = deletable {
          match self.client.delete_resource(id).await {
            Ok(()) => {
              self.status_msg = "Resource deleted".into();
              if let Some(week_id) = self.current_week.as_ref().map(|w| w.id) {
                self.load_week_resources(week_id).await;
              }
            }
            Err(err) => self.fail(err),
          }
        }
      }

      KeyCode::Char('r') => {
        if let Some(week_id) = self.current_week.as_ref().map(|w| w.id) {
          self.load_week_resources(week_id).await;
        }
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_terms_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.navigate(Route::Modules).await;
      }

      KeyCode::Down | KeyCode::Char('j') => {
        if !self.terms.is_empty() && self.term_cursor + 1 < self.terms.len() {
          self.term_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.term_cursor = self.term_cursor.saturating_sub(1);
      }

      KeyCode::Char('n') if self.is_admin() => {
        self.form = Some(Form::new_term());
      }
      KeyCode::Char('N') if self.is_admin() => {
        self.form = Some(Form::term_rollover());
      }
      KeyCode::Char('a') if self.is_admin() => {
        if let Some(id) = self.terms.get(self.term_cursor).map(|t| t.id) {
          match self.client.activate_term(id).await {
            Ok(()) => {
              self.status_msg = "Term activated".into();
              self.load_terms().await;
            }
            Err(err) => self.fail(err),
          }
        }
      }
      KeyCode::Char('x') if self.is_admin() => {
        if let Some(id) = self.terms.get(self.term_cursor).map(|t| t.id) {
          match self.client.deactivate_term(id).await {
            Ok(()) => {
              self.status_msg = "Term deactivated".into();
              self.load_terms().await;
            }
            Err(err) => self.fail(err),
          }
        }
      }
      KeyCode::Char('r') => self.load_terms().await,

      _ => {}
    }
    Ok(true)
  }

  async fn handle_admin_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.navigate(Route::Modules).await;
      }

      KeyCode::Down | KeyCode::Char('j') => {
        if !self.admin_modules.is_empty()
          && self.admin_cursor + 1 < self.admin_modules.len()
        {
          self.admin_cursor += 1;
          self.admin_runs.clear();
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.admin_cursor > 0 {
          self.admin_cursor -= 1;
          self.admin_runs.clear();
        }
      }
      KeyCode::Enter => self.load_admin_runs().await,

      KeyCode::Char('J') => {
        if !self.admin_runs.is_empty()
          && self.admin_run_cursor + 1 < self.admin_runs.len()
        {
          self.admin_run_cursor += 1;
        }
      }
      KeyCode::Char('K') => {
        self.admin_run_cursor = self.admin_run_cursor.saturating_sub(1);
      }

      KeyCode::Char('n') => self.form = Some(Form::new_module()),
      KeyCode::Char('d') => {
        if let Some(id) = self.admin_modules.get(self.admin_cursor).map(|m| m.id) {
          match self.client.delete_module(id).await {
            Ok(()) => {
              self.status_msg = "Module deleted".into();
              self.load_admin().await;
            }
            Err(err) => self.fail(err),
          }
        }
      }
      KeyCode::Char('D') => {
        if let Some(id) = self.admin_runs.get(self.admin_run_cursor).map(|r| r.id) {
          match self.client.delete_run(id).await {
            Ok(()) => {
              self.status_msg = "Module run deleted".into();
              self.load_admin_runs().await;
            }
            Err(err) => self.fail(err),
          }
        }
      }
      KeyCode::Char('r') => self.load_admin().await,

      _ => {}
    }
    Ok(true)
  }

  async fn handle_profile_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.navigate(Route::Modules).await;
      }
      KeyCode::Char('Q') => self.logout(),

      KeyCode::Down | KeyCode::Char('j') => {
        if !self.my_resources.is_empty()
          && self.profile_cursor + 1 < self.my_resources.len()
        {
          self.profile_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.profile_cursor = self.profile_cursor.saturating_sub(1);
      }

      KeyCode::Char('d') => {
        let me = self.session.identity().map(|u| (u.id, u.is_admin));
        let deletable = self
          .my_resources
          .get(self.profile_cursor)
          .filter(|r| me.is_some_and(|(id, admin)| admin || id == r.user_id))
          .map(|r| r.id);
        if let Some(id) = deletable {
          match self.client.delete_resource(id).await {
            Ok(()) => {
              self.status_msg = "Resource deleted".into();
              self.load_profile().await;
            }
            Err(err) => self.fail(err),
          }
        }
      }
      KeyCode::Char('r') => self.load_profile().await,

      _ => {}
    }
    Ok(true)
  }

  // ── Form submission ───────────────────────────────────────────────────────

  async fn submit_form(&mut self, form: Form) {
    match form.kind {
      FormKind::Login => {
        let (email, password) = (form.value(0).to_owned(), form.value(1).to_owned());
        self.status_msg = "Signing in…".into();
        match self.session.login(&email, &password).await {
          Ok(user) => {
            self.status_msg = format!("Welcome back, {}", user.first_name);
            self.navigate(Route::Modules).await;
          }
          Err(err) => {
            // Gate state is untouched; stay on the entry screen.
            self.status_msg = format!("Error: {err}");
            let mut form = Form::login();
            form.error = Some(err.to_string());
            self.form = Some(form);
          }
        }
      }
      FormKind::Register => {
        let fields = NewUser {
          email:      form.value(0).to_owned(),
          password:   form.value(1).to_owned(),
          first_name: form.value(2).to_owned(),
          last_name:  form.value(3).to_owned(),
        };
        self.status_msg = "Creating account…".into();
        match self.session.register(fields).await {
          Ok(user) => {
            self.status_msg = format!("Welcome, {}", user.first_name);
            self.navigate(Route::Modules).await;
          }
          Err(err) => {
            self.status_msg = format!("Error: {err}");
            let mut form = Form::register();
            form.error = Some(err.to_string());
            self.form = Some(form);
          }
        }
      }
      FormKind::NewModule => {
        let fields = NewModule {
          code:            form.value(0).to_owned(),
          name:            form.value(1).to_owned(),
          description:     form.value(2).to_owned(),
          department_name: form.value(3).to_owned(),
        };
        match self.client.create_module(&fields).await {
          Ok(_) => {
            self.status_msg = format!("Module {} created", fields.code);
            if self.screen == Screen::Admin {
              self.load_admin().await;
            } else {
              self.load_modules().await;
            }
          }
          Err(err) => self.fail(err),
        }
      }
      FormKind::NewRun { module_id } => {
        match parse_run_fields(&form) {
          Ok(fields) => match self.client.create_run(module_id, &fields).await {
            Ok(_) => {
              self.status_msg = "Module run created".into();
              self.reload_module().await;
            }
            Err(err) => self.fail(err),
          },
          Err(message) => self.reopen_with_error(form, message),
        }
      }
      FormKind::NewTerm | FormKind::TermRollover => {
        match parse_term_fields(&form) {
          Ok(fields) => {
            let result = if form.kind == FormKind::NewTerm {
              self.client.create_term(&fields).await
            } else {
              self.client.start_new_term(&fields).await
            };
            match result {
              Ok(_) => {
                self.status_msg = format!("Term {} {} created", fields.semester, fields.year);
                self.load_terms().await;
              }
              Err(err) => self.fail(err),
            }
          }
          Err(message) => self.reopen_with_error(form, message),
        }
      }
      FormKind::NewLink { week_id } => {
        let link = NewLink {
          name: form.value(0).to_owned(),
          url:  form.value(1).to_owned(),
        };
        match self.client.add_link(week_id, &link).await {
          Ok(()) => {
            self.status_msg = "Link added".into();
            self.load_week_resources(week_id).await;
          }
          Err(err) => self.fail(err),
        }
      }
      FormKind::UploadFile { week_id } => {
        let path = form.value(0).to_owned();
        match std::fs::read(&path) {
          Ok(bytes) => {
            let name = Path::new(&path)
              .file_name()
              .map(|n| n.to_string_lossy().into_owned())
              .unwrap_or_else(|| path.clone());
            self.status_msg = "Uploading…".into();
            match self.client.upload_file(week_id, &name, bytes).await {
              Ok(()) => {
                self.status_msg = format!("Uploaded {name}");
                self.load_week_resources(week_id).await;
              }
              Err(err) => self.fail(err),
            }
          }
          Err(err) => self.reopen_with_error(form, format!("cannot read {path}: {err}")),
        }
      }
    }
  }

  fn reopen_with_error(&mut self, mut form: Form, message: String) {
    form.error = Some(message);
    self.form = Some(form);
  }
}

fn parse_run_fields(form: &Form) -> Result<NewModuleRun, String> {
  let year = parse_year(form.value(0))?;
  let semester = parse_semester(form.value(1))?;
  let is_active = matches!(form.value(2), "y" | "yes" | "true");
  Ok(NewModuleRun {
    year,
    semester,
    is_active,
  })
}

fn parse_term_fields(form: &Form) -> Result<NewAcademicTerm, String> {
  Ok(NewAcademicTerm {
    year:     parse_year(form.value(0))?,
    semester: parse_semester(form.value(1))?,
  })
}

fn parse_year(raw: &str) -> Result<i32, String> {
  raw
    .parse::<i32>()
    .map_err(|_| format!("invalid year: {raw:?}"))
}

fn parse_semester(raw: &str) -> Result<Semester, String> {
  raw
    .to_ascii_lowercase()
    .parse::<Semester>()
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn run_fields_parse_and_validate() {
    let mut form = Form::new_run(Uuid::new_v4());
    form.fields[0].value = "2025".into();
    form.fields[1].value = "Fall".into();
    form.fields[2].value = "y".into();

    let fields = parse_run_fields(&form).unwrap();
    assert_eq!(fields.year, 2025);
    assert_eq!(fields.semester, Semester::Fall);
    assert!(fields.is_active);

    form.fields[1].value = "summer".into();
    assert!(parse_run_fields(&form).is_err());

    form.fields[0].value = "20x5".into();
    assert!(parse_run_fields(&form).is_err());
  }
}
