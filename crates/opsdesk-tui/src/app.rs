//! Application state management for opsdesk.
//!
//! This module contains the core `App` struct: the session service built at
//! startup, the current route, the sign-in/sign-up form, and the data loaded
//! for the current page. Page loads and session operations run in spawned
//! tasks and report back over an MPSC channel drained by the UI loop.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use opsdesk_core::access::{self, evaluate_route, GuardOutcome, LayoutGuard, LayoutOutcome, NavigationItem};
use opsdesk_core::auth::SessionCell;
use opsdesk_core::config::Config;
use opsdesk_core::models::Summary;
use opsdesk_core::router::routes;
use opsdesk_core::{
    ApiClient, ApiError, AuthError, Navigator, Session, SessionHandle, SessionManager,
    SessionSnapshot, SessionStatus,
};

use crate::ui::icons::IconRegistry;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for email input.
const MAX_EMAIL_LENGTH: usize = 100;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for the sign-up display name.
const MAX_NAME_LENGTH: usize = 80;

/// Guard redirects chain at most this deep in one pass.
const MAX_REDIRECTS: usize = 4;

/// Number of rows to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Which panel of the shell takes the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Navigation,
    Content,
}

/// What the current route draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    SignIn,
    SignUp,
    Unauthorized,
    Dashboard,
    Records(RecordKind),
    /// A redirect is pending; nothing to draw yet.
    Blank,
}

/// Record lists reachable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Leads,
    Customers,
    Products,
    Quotations,
    Invoices,
    FinanceRecords,
    Employees,
    Departments,
}

impl RecordKind {
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/leads" => Some(RecordKind::Leads),
            "/customers" => Some(RecordKind::Customers),
            "/products" => Some(RecordKind::Products),
            "/quotations" => Some(RecordKind::Quotations),
            "/invoices" => Some(RecordKind::Invoices),
            "/finance/records" => Some(RecordKind::FinanceRecords),
            "/employees" => Some(RecordKind::Employees),
            "/departments" => Some(RecordKind::Departments),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RecordKind::Leads => "Leads",
            RecordKind::Customers => "Customers",
            RecordKind::Products => "Products",
            RecordKind::Quotations => "Quotations",
            RecordKind::Invoices => "Invoices",
            RecordKind::FinanceRecords => "Finance records",
            RecordKind::Employees => "Employees",
            RecordKind::Departments => "Departments",
        }
    }

    async fn fetch(self, api: &ApiClient) -> Result<Vec<RecordLine>, ApiError> {
        match self {
            RecordKind::Leads => api.fetch_leads().await.map(lines),
            RecordKind::Customers => api.fetch_customers().await.map(lines),
            RecordKind::Products => api.fetch_products().await.map(lines),
            RecordKind::Quotations => api.fetch_quotations().await.map(lines),
            RecordKind::Invoices => api.fetch_invoices().await.map(lines),
            RecordKind::FinanceRecords => api.fetch_finance_records().await.map(lines),
            RecordKind::Employees => api.fetch_employees().await.map(lines),
            RecordKind::Departments => api.fetch_departments().await.map(lines),
        }
    }
}

/// One row of a record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine {
    pub title: String,
    pub detail: String,
}

fn lines<T: Summary>(items: Vec<T>) -> Vec<RecordLine> {
    items
        .iter()
        .map(|item| RecordLine {
            title: item.title(),
            detail: item.detail(),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub enum PageData {
    Loading,
    Loaded(Vec<RecordLine>),
    Failed(String),
}

/// Dashboard count for one of the role's record lists.
#[derive(Debug, Clone)]
pub struct Tile {
    pub item: &'static NavigationItem,
    pub count: Result<usize, String>,
}

#[derive(Debug, Clone)]
pub enum DashboardData {
    Loading,
    Ready(Vec<Tile>),
}

// ============================================================================
// Sign-in / sign-up form
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Password,
    Submit,
    /// Link to the other form.
    Switch,
}

const SIGN_IN_FIELDS: &[FormField] = &[
    FormField::Email,
    FormField::Password,
    FormField::Submit,
    FormField::Switch,
];

const SIGN_UP_FIELDS: &[FormField] = &[
    FormField::Name,
    FormField::Email,
    FormField::Password,
    FormField::Submit,
    FormField::Switch,
];

#[derive(Debug, Clone)]
pub struct AuthForm {
    pub mode: FormMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub focus: FormField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl AuthForm {
    pub fn new(email: Option<String>) -> Self {
        let mut form = Self {
            mode: FormMode::SignIn,
            name: String::new(),
            email: email.unwrap_or_default(),
            password: String::new(),
            focus: FormField::Email,
            error: None,
            submitting: false,
        };
        form.reset(FormMode::SignIn);
        form
    }

    /// Switch to `mode`, keeping the email and dropping everything secret.
    pub fn reset(&mut self, mode: FormMode) {
        self.mode = mode;
        self.password.clear();
        self.error = None;
        self.submitting = false;
        self.focus = match mode {
            FormMode::SignUp if self.name.is_empty() => FormField::Name,
            _ if self.email.is_empty() => FormField::Email,
            _ => FormField::Password,
        };
    }

    pub fn fields(&self) -> &'static [FormField] {
        match self.mode {
            FormMode::SignIn => SIGN_IN_FIELDS,
            FormMode::SignUp => SIGN_UP_FIELDS,
        }
    }

    fn position(&self) -> usize {
        self.fields()
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0)
    }

    pub fn next_field(&mut self) {
        let fields = self.fields();
        self.focus = fields[(self.position() + 1) % fields.len()];
    }

    pub fn prev_field(&mut self) {
        let fields = self.fields();
        self.focus = fields[(self.position() + fields.len() - 1) % fields.len()];
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::Name if can_add_name_char(self.name.chars().count(), c) => self.name.push(c),
            FormField::Email if can_add_email_char(self.email.chars().count(), c) => self.email.push(c),
            FormField::Password if can_add_password_char(self.password.chars().count(), c) => {
                self.password.push(c)
            }
            _ => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Email => {
                self.email.pop();
            }
            FormField::Password => {
                self.password.pop();
            }
            FormField::Submit | FormField::Switch => {}
        }
    }

    /// Route of the other form.
    pub fn switch_target(&self) -> &'static str {
        match self.mode {
            FormMode::SignIn => routes::SIGNUP,
            FormMode::SignUp => routes::LOGIN,
        }
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from spawned tasks.
///
/// Page results carry the generation they were started under; anything from
/// an older generation belongs to a previous user and is dropped.
enum TaskResult {
    Initialized(SessionStatus),
    Auth(Result<Session, AuthError>),
    Refreshed(Result<Session, AuthError>),
    Records {
        generation: u64,
        kind: RecordKind,
        result: Result<Vec<RecordLine>, String>,
    },
    Dashboard {
        generation: u64,
        tiles: Vec<Tile>,
    },
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    session: Arc<SessionManager<ApiClient>>,
    pub navigator: Navigator,
    handle: SessionHandle,
    pub icons: Box<dyn IconRegistry>,

    // UI State
    pub state: AppState,
    pub focus: Focus,
    pub form: AuthForm,
    pub nav_selection: usize,
    pub record_selection: usize,
    pub status_message: Option<String>,

    // Page data for the current user
    pub records: HashMap<RecordKind, PageData>,
    pub dashboard: Option<DashboardData>,

    // Route bookkeeping
    outcome: GuardOutcome,
    entered_path: Option<String>,
    current_user: Option<String>,
    generation: u64,

    // Background task channel
    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,
}

impl App {
    /// Build the session service and the HTTP client around one shared
    /// session cell, so a 401 from any request ends the session.
    pub fn new(config: Config, icons: Box<dyn IconRegistry>) -> Result<Self> {
        let base_url = config.base_url();
        debug!(%base_url, backend = ?config.token_backend, "App::new() starting");

        let navigator = Navigator::new(routes::ROOT);
        let cell = SessionCell::new();
        let tokens = config.token_store()?;
        let api = ApiClient::new(&base_url, tokens.clone(), navigator.clone())?
            .with_revoker(Arc::new(cell.clone()));
        let session = Arc::new(SessionManager::new(api, tokens, navigator.clone(), cell));
        let handle = session.handle();

        let (task_tx, task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let form = AuthForm::new(config.last_email.clone());

        Ok(Self {
            config,
            session,
            navigator,
            handle,
            icons,
            state: AppState::Normal,
            focus: Focus::Navigation,
            form,
            nav_selection: 0,
            record_selection: 0,
            status_message: None,
            records: HashMap::new(),
            dashboard: None,
            outcome: GuardOutcome::Loading,
            entered_path: None,
            current_user: None,
            generation: 0,
            task_rx,
            task_tx,
        })
    }

    pub fn session(&self) -> &SessionManager<ApiClient> {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.handle.snapshot()
    }

    /// Resolve the stored credential in the background. The loading screen
    /// shows until it finishes.
    pub fn start(&mut self) {
        let session = self.session.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let status = session.initialize().await;
            Self::send_result(&tx, TaskResult::Initialized(status)).await;
        });
    }

    // =========================================================================
    // Routing
    // =========================================================================

    /// Re-run the guards against the current session and path, applying any
    /// redirect, and enter the page if it is newly showing.
    pub fn sync_route(&mut self) {
        if self.handle.has_changed() {
            let snapshot = self.handle.mark_seen();
            self.on_session_changed(&snapshot);
        }

        let snapshot = self.handle.snapshot();
        for _ in 0..MAX_REDIRECTS {
            let path = self.navigator.current();
            self.outcome = evaluate_route(&snapshot, &path);
            match self.outcome {
                GuardOutcome::Redirect(to) if to != path => {
                    debug!(from = %path, to, "Guard redirect");
                    self.navigator.navigate(to);
                }
                _ => break,
            }
        }

        let path = self.navigator.current();
        if self.outcome == GuardOutcome::Render && self.entered_path.as_deref() != Some(path.as_str()) {
            self.enter_route(&path, &snapshot);
        }
    }

    fn on_session_changed(&mut self, snapshot: &SessionSnapshot) {
        if snapshot.status == SessionStatus::Loading {
            return;
        }

        let user = snapshot.session().map(|s| s.user_id.clone());
        if user != self.current_user {
            debug!(?user, "Session owner changed, dropping page data");
            self.current_user = user;
            self.generation += 1;
            self.records.clear();
            self.dashboard = None;
            self.entered_path = None;
        }
    }

    fn enter_route(&mut self, path: &str, snapshot: &SessionSnapshot) {
        debug!(path, "Entering route");
        self.entered_path = Some(path.to_string());
        self.focus = Focus::Navigation;
        self.record_selection = 0;

        if let Some(index) = self.navigation().iter().position(|item| item.href == path) {
            self.nav_selection = index;
        }

        match self.screen() {
            Screen::SignIn | Screen::SignUp => {
                let mode = if path == routes::SIGNUP {
                    FormMode::SignUp
                } else {
                    FormMode::SignIn
                };
                self.form.reset(mode);
                if let Some(AuthError::Expired) = snapshot.error {
                    self.form.error = Some(AuthError::Expired.to_string());
                }
            }
            Screen::Records(kind) => {
                if !matches!(self.records.get(&kind), Some(PageData::Loaded(_))) {
                    self.load_records(kind);
                }
            }
            Screen::Dashboard => {
                if self.dashboard.is_none() {
                    self.load_dashboard();
                }
            }
            Screen::Loading | Screen::Unauthorized | Screen::Blank => {}
        }
    }

    /// What to draw for the last guard outcome and the current path.
    pub fn screen(&self) -> Screen {
        if self.outcome == GuardOutcome::Loading {
            return Screen::Loading;
        }
        if self.outcome != GuardOutcome::Render {
            return Screen::Blank;
        }

        let path = self.navigator.current();
        match path.as_str() {
            routes::LOGIN => Screen::SignIn,
            routes::SIGNUP => Screen::SignUp,
            routes::UNAUTHORIZED => Screen::Unauthorized,
            other => match RecordKind::from_path(other) {
                Some(kind) => Screen::Records(kind),
                None if access::item_for_path(other).is_some() => Screen::Dashboard,
                None => Screen::Blank,
            },
        }
    }

    /// Menu for the signed-in user; empty when there is no shell.
    pub fn navigation(&self) -> Vec<&'static NavigationItem> {
        let path = self.navigator.current();
        let snapshot = self.handle.borrow();
        let outcome = LayoutGuard::evaluate(&snapshot, &path);
        match outcome {
            LayoutOutcome::Shell { navigation, .. } => navigation,
            _ => Vec::new(),
        }
    }

    pub fn navigate_to_selection(&mut self) {
        if let Some(item) = self.navigation().get(self.nav_selection) {
            self.navigator.navigate(item.href);
        }
    }

    pub fn go_home(&mut self) {
        if let Some(session) = self.session.current_session() {
            self.navigator.navigate(access::home_route(&session.role));
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Submit the sign-in or sign-up form.
    pub fn submit_form(&mut self) {
        if self.form.submitting {
            return;
        }

        let mode = self.form.mode;
        let email = self.form.email.trim().to_string();
        let password = self.form.password.clone();
        let name = self.form.name.trim().to_string();

        self.form.error = None;
        self.form.submitting = true;

        let session = self.session.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = match mode {
                FormMode::SignIn => session.sign_in(&email, &password).await,
                FormMode::SignUp => session.sign_up(&email, &password, &name).await,
            };
            Self::send_result(&tx, TaskResult::Auth(result)).await;
        });
    }

    pub fn refresh_session(&mut self) {
        self.status_message = Some("Refreshing session...".to_string());
        let session = self.session.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = session.refresh().await;
            Self::send_result(&tx, TaskResult::Refreshed(result)).await;
        });
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out();
        self.status_message = Some("Signed out".to_string());
    }

    // =========================================================================
    // Page loading
    // =========================================================================

    /// Reload whatever the current page shows.
    pub fn reload_page(&mut self) {
        match self.screen() {
            Screen::Records(kind) => self.load_records(kind),
            Screen::Dashboard => self.load_dashboard(),
            _ => {}
        }
    }

    fn load_records(&mut self, kind: RecordKind) {
        self.records.insert(kind, PageData::Loading);
        let api = self.session.api().clone();
        let tx = self.task_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = kind.fetch(&api).await.map_err(|e| e.to_string());
            Self::send_result(&tx, TaskResult::Records { generation, kind, result }).await;
        });
    }

    /// Count every record list on the user's menu, in parallel.
    fn load_dashboard(&mut self) {
        let items: Vec<(&'static NavigationItem, RecordKind)> = self
            .navigation()
            .into_iter()
            .filter_map(|item| RecordKind::from_path(item.href).map(|kind| (item, kind)))
            .collect();

        self.dashboard = Some(DashboardData::Loading);
        let api = self.session.api().clone();
        let tx = self.task_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let counts = join_all(items.iter().map(|(_, kind)| kind.fetch(&api))).await;
            let tiles = items
                .into_iter()
                .zip(counts)
                .map(|((item, _), result)| Tile {
                    item,
                    count: result.map(|rows| rows.len()).map_err(|e| e.to_string()),
                })
                .collect();
            Self::send_result(&tx, TaskResult::Dashboard { generation, tiles }).await;
        });
    }

    /// Helper to send task results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<TaskResult>, result: TaskResult) {
        if tx.send(result).await.is_err() {
            error!("Failed to send task result - channel closed");
        }
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.task_rx.try_recv() {
            self.process_task_result(result);
        }
    }

    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Initialized(status) => {
                debug!(?status, "Session initialized");
            }
            TaskResult::Auth(Ok(session)) => {
                self.form.submitting = false;
                self.form.password.clear();
                info!(user_id = %session.user_id, "Signed in from form");

                self.config.last_email = Some(session.email.clone());
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.status_message = Some(format!("Signed in as {}", session.label()));
                self.navigator.navigate(access::home_route(&session.role));
            }
            TaskResult::Auth(Err(e)) => {
                self.form.submitting = false;
                self.form.error = Some(e.to_string());
            }
            TaskResult::Refreshed(Ok(session)) => {
                self.status_message = Some(format!("Session refreshed for {}", session.label()));
            }
            TaskResult::Refreshed(Err(e)) => {
                self.status_message = Some(e.to_string());
            }
            TaskResult::Records { generation, kind, result } => {
                if generation != self.generation {
                    debug!(?kind, "Dropping stale page result");
                    return;
                }
                let data = match result {
                    Ok(rows) => PageData::Loaded(rows),
                    Err(e) => {
                        warn!(?kind, error = %e, "Page load failed");
                        PageData::Failed(e)
                    }
                };
                self.records.insert(kind, data);
            }
            TaskResult::Dashboard { generation, tiles } => {
                if generation == self.generation {
                    self.dashboard = Some(DashboardData::Ready(tiles));
                }
            }
        }
    }

    // =========================================================================
    // Selection helpers
    // =========================================================================

    pub fn visible_rows(&self) -> usize {
        match self.screen() {
            Screen::Records(kind) => match self.records.get(&kind) {
                Some(PageData::Loaded(rows)) => rows.len(),
                _ => 0,
            },
            _ => 0,
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = match self.focus {
            Focus::Navigation => self.navigation().len(),
            Focus::Content => self.visible_rows(),
        };
        let current = match self.focus {
            Focus::Navigation => self.nav_selection,
            Focus::Content => self.record_selection,
        };
        let next = step(current, delta, len);
        match self.focus {
            Focus::Navigation => self.nav_selection = next,
            Focus::Content => self.record_selection = next,
        }
    }
}

/// Move `current` by `delta` within `0..len`, clamping at both ends.
fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

pub fn can_add_email_char(current_len: usize, c: char) -> bool {
    current_len < MAX_EMAIL_LENGTH && is_valid_input_char(c) && !c.is_whitespace()
}

pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

pub fn can_add_name_char(current_len: usize, c: char) -> bool {
    current_len < MAX_NAME_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::icons::SymbolIcons;
    use opsdesk_core::access::NAVIGATION;
    use opsdesk_core::config::TokenBackend;

    fn ephemeral_app() -> App {
        let config = Config {
            api_base_url: Some("http://127.0.0.1:9".to_string()),
            token_backend: TokenBackend::Memory,
            last_email: None,
        };
        App::new(config, Box::new(SymbolIcons)).unwrap()
    }

    // -------------------------------------------------------------------------
    // Routing
    // -------------------------------------------------------------------------

    #[test]
    fn test_every_list_route_has_a_record_kind() {
        for item in NAVIGATION.iter().filter(|i| i.name != "Dashboard") {
            assert!(RecordKind::from_path(item.href).is_some(), "{}", item.href);
        }
        for item in NAVIGATION.iter().filter(|i| i.name == "Dashboard") {
            assert!(RecordKind::from_path(item.href).is_none(), "{}", item.href);
        }
    }

    #[tokio::test]
    async fn test_loading_screen_before_initialize() {
        let mut app = ephemeral_app();
        app.sync_route();
        assert_eq!(app.screen(), Screen::Loading);
        assert_eq!(app.navigator.current(), routes::ROOT);
    }

    #[tokio::test]
    async fn test_no_stored_token_lands_on_sign_in() {
        let mut app = ephemeral_app();
        app.session().initialize().await;
        app.sync_route();

        assert_eq!(app.navigator.current(), routes::LOGIN);
        assert_eq!(app.screen(), Screen::SignIn);
        assert!(app.form.error.is_none());
        assert!(app.navigation().is_empty());
    }

    #[tokio::test]
    async fn test_protected_path_while_signed_out_redirects() {
        let mut app = ephemeral_app();
        app.session().initialize().await;
        app.navigator.navigate("/invoices");
        app.sync_route();
        assert_eq!(app.navigator.current(), routes::LOGIN);
    }

    #[tokio::test]
    async fn test_sign_up_route_shows_sign_up_form() {
        let mut app = ephemeral_app();
        app.session().initialize().await;
        app.navigator.navigate(routes::SIGNUP);
        app.sync_route();
        assert_eq!(app.screen(), Screen::SignUp);
        assert_eq!(app.form.mode, FormMode::SignUp);
        assert_eq!(app.form.focus, FormField::Name);
    }

    #[tokio::test]
    async fn test_sign_out_is_idempotent_for_the_shell() {
        let mut app = ephemeral_app();
        app.session().initialize().await;
        app.sign_out();
        app.sign_out();
        app.sync_route();
        assert_eq!(app.navigator.current(), routes::LOGIN);
        assert_eq!(app.snapshot().status, SessionStatus::Unauthenticated);
    }

    // -------------------------------------------------------------------------
    // Form
    // -------------------------------------------------------------------------

    #[test]
    fn test_form_focus_cycles() {
        let mut form = AuthForm::new(None);
        assert_eq!(form.focus, FormField::Email);
        form.next_field();
        assert_eq!(form.focus, FormField::Password);
        form.next_field();
        form.next_field();
        assert_eq!(form.focus, FormField::Switch);
        form.next_field();
        assert_eq!(form.focus, FormField::Email);
        form.prev_field();
        assert_eq!(form.focus, FormField::Switch);
    }

    #[test]
    fn test_form_reset_keeps_email_and_drops_password() {
        let mut form = AuthForm::new(Some("ada@example.com".to_string()));
        assert_eq!(form.focus, FormField::Password);
        form.password.push_str("hunter2");
        form.error = Some("bad".to_string());

        form.reset(FormMode::SignUp);
        assert_eq!(form.email, "ada@example.com");
        assert!(form.password.is_empty());
        assert!(form.error.is_none());
        assert_eq!(form.switch_target(), routes::LOGIN);
    }

    #[test]
    fn test_form_typing_goes_to_focused_field() {
        let mut form = AuthForm::new(None);
        form.push_char('a');
        form.push_char(' ');
        form.next_field();
        form.push_char('p');
        form.push_char(' ');
        assert_eq!(form.email, "a");
        assert_eq!(form.password, "p ");
        form.pop_char();
        assert_eq!(form.password, "p");
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, -1, 5), 0);
        assert_eq!(step(4, 1, 5), 4);
        assert_eq!(step(2, PAGE_SCROLL_SIZE as isize, 5), 4);
        assert_eq!(step(3, 1, 0), 0);
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_email_char() {
        assert!(can_add_email_char(0, 'a'));
        assert!(can_add_email_char(99, '@'));
        assert!(!can_add_email_char(100, 'a'));
        assert!(!can_add_email_char(0, ' '));
        assert!(!can_add_email_char(0, '\n'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\x00'));
        assert!(!can_add_password_char(0, '\r'));
    }

    #[test]
    fn test_can_add_name_char() {
        assert!(can_add_name_char(0, 'A'));
        assert!(can_add_name_char(79, ' '));
        assert!(!can_add_name_char(80, 'a'));
        assert!(!can_add_name_char(0, '\t'));
    }
}
