use crate::catalog::{
    fill_template, html_fragment, normalize, CatalogStore, Display, DisplayUnit,
    NormalizedRecord, Pager, ProductRecord,
};
use crate::config::Config;
use crate::source::{CatalogSource, SourceError};
use crate::util::catch_task_panic;
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

// ============================================================================
// Loader State Machine
// ============================================================================

/// Top-level lifecycle of the catalog session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    Idle,
    /// The single catalog fetch is in flight.
    InitialLoading,
    /// Catalog ingested; scroll and filter input are live.
    Ready,
    /// The fetch failed. Terminal for the session.
    Failed,
}

/// Named inputs routed to the state machine.
#[derive(Debug)]
pub enum Signal {
    /// The catalog fetch succeeded.
    DataReady(Vec<ProductRecord>),
    /// The catalog fetch failed; `reason` is the user-facing message.
    DataFailed { reason: String },
    /// The filter text changed (read from `App::filter_input`).
    QueryChanged,
    /// The user scrolled to within the proximity threshold of the last row.
    ScrolledNearBottom,
}

// ============================================================================
// Background Events
// ============================================================================

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// Result of the catalog fetch started by [`App::start`].
    CatalogFetched(Result<Vec<ProductRecord>, SourceError>),
    /// The one-shot "loaded" status timer fired.
    StatusClearDue,
    /// The "copied" marker on a unit expired.
    ///
    /// `epoch` is the filter epoch the unit belonged to; markers from an
    /// earlier epoch are ignored.
    CopyFeedbackElapsed { epoch: u64, unit: usize },
    /// HTML export written.
    ExportComplete { count: usize, path: String },
    /// HTML export failed.
    ExportFailed { error: String },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Status Line
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: Cow<'static, str>,
    pub kind: StatusKind,
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state and the loader controller.
///
/// All mutation happens on the UI task; background work reports back through
/// [`AppEvent`]s, so every signal runs to completion before the next one.
pub struct App {
    pub config: Config,
    pub state: LoadState,

    // Catalog
    pub store: CatalogStore,
    pub pager: Pager,
    pub display: Display,
    /// Reentrancy guard for page renders (not a network flag).
    pub loading: bool,
    /// Incremented every time the display surface is cleared by a filter change.
    pub epoch: u64,

    // UI State
    pub status: Option<StatusLine>,
    pub filter_input: String,
    pub selected: usize,
    /// Units currently showing the "copied" marker.
    pub copied_units: HashSet<usize>,
    /// Blocking notification; input is captured until it is dismissed.
    pub alert: Option<String>,
    /// Current frame of the loading spinner animation.
    pub spinner_frame: usize,
    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,
    /// Product rows visible in the last rendered frame.
    pub list_visible_rows: usize,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: LoadState::Idle,
            store: CatalogStore::new(),
            pager: Pager::new(),
            display: Display::new(),
            loading: false,
            epoch: 0,
            status: None,
            filter_input: String::new(),
            selected: 0,
            copied_units: HashSet::new(),
            alert: None,
            spinner_frame: 0,
            needs_redraw: true,
            list_visible_rows: 0,
        }
    }

    /// Issue the single catalog fetch (`Idle → InitialLoading`).
    ///
    /// The result arrives as [`AppEvent::CatalogFetched`]. Calling this again
    /// is ignored: the catalog is never re-fetched.
    pub fn start<S: CatalogSource>(&mut self, source: Arc<S>, event_tx: &mpsc::Sender<AppEvent>) {
        if self.state != LoadState::Idle {
            tracing::warn!(state = ?self.state, "Catalog fetch already issued, ignoring");
            return;
        }

        self.state = LoadState::InitialLoading;
        self.set_status("Loading products...", StatusKind::Info);
        tracing::info!("Fetching catalog");

        let tx = event_tx.clone();
        tokio::spawn(async move {
            let event = match catch_task_panic(source.fetch()).await {
                Ok(result) => AppEvent::CatalogFetched(result),
                Err(error) => AppEvent::TaskPanicked {
                    task: "catalog_fetch",
                    error,
                },
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, "Failed to send catalog result (receiver dropped)");
            }
        });
    }

    /// Route a signal through the state machine.
    ///
    /// Signals that do not apply in the current state are dropped; in
    /// particular scroll and filter signals do nothing until the catalog is
    /// `Ready`.
    pub fn dispatch(&mut self, signal: Signal, event_tx: &mpsc::Sender<AppEvent>) {
        self.needs_redraw = true;
        match (self.state, signal) {
            (LoadState::InitialLoading, Signal::DataReady(records)) => {
                self.on_data_ready(records, event_tx);
            }
            (LoadState::InitialLoading, Signal::DataFailed { reason }) => {
                tracing::error!(reason = %reason, "Catalog load failed");
                self.state = LoadState::Failed;
                self.set_status(reason, StatusKind::Error);
            }
            (LoadState::Ready, Signal::QueryChanged) => self.on_query_changed(),
            (LoadState::Ready, Signal::ScrolledNearBottom) => {
                self.load_next_page();
            }
            (state, signal) => {
                tracing::debug!(?state, ?signal, "Signal ignored in current state");
            }
        }
    }

    fn on_data_ready(&mut self, records: Vec<ProductRecord>, event_tx: &mpsc::Sender<AppEvent>) {
        let count = records.len();
        self.store.ingest(records);
        self.pager = Pager::new();
        self.state = LoadState::Ready;
        tracing::info!(count, "Catalog ready");

        self.set_status(format!("Loaded {} products", count), StatusKind::Success);
        spawn_timer(
            self.config.status_clear_delay(),
            AppEvent::StatusClearDue,
            event_tx,
        );

        self.load_next_page();
    }

    fn on_query_changed(&mut self) {
        self.store.apply_filter(&self.filter_input);
        self.display.clear();
        self.epoch = self.epoch.wrapping_add(1);
        self.copied_units.clear();
        self.status = None;
        self.pager.reset();
        self.selected = 0;
        self.load_next_page();
    }

    /// Render the next page of the active subset.
    ///
    /// No-op when the subset is exhausted or a page render is already in
    /// progress. Returns whether a page was rendered.
    pub fn load_next_page(&mut self) -> bool {
        if self.loading || !self.pager.has_more(self.store.active().len()) {
            return false;
        }

        self.loading = true;
        let page: Vec<NormalizedRecord> = self
            .pager
            .take_page(self.store.active())
            .iter()
            .map(|record| normalize(record))
            .collect();
        tracing::debug!(
            page = self.pager.next_page_index() - 1,
            records = page.len(),
            "Rendering page"
        );
        self.display.render_page(&page);
        self.loading = false;
        true
    }

    // ------------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------------

    pub fn set_status(&mut self, text: impl Into<Cow<'static, str>>, kind: StatusKind) {
        self.status = Some(StatusLine {
            text: text.into(),
            kind,
        });
        self.needs_redraw = true;
    }

    /// The deferred clear always fires, whatever the status says by then.
    pub fn clear_status(&mut self) {
        self.status = None;
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------------
    // Filter input
    // ------------------------------------------------------------------------

    pub fn filter_push(&mut self, c: char) {
        self.filter_input.push(c);
    }

    /// Returns false when there was nothing to delete.
    pub fn filter_pop(&mut self) -> bool {
        self.filter_input.pop().is_some()
    }

    /// Returns false when the filter was already empty.
    pub fn filter_clear(&mut self) -> bool {
        if self.filter_input.is_empty() {
            return false;
        }
        self.filter_input.clear();
        true
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn selected_unit(&self) -> Option<&DisplayUnit> {
        self.display.units().get(self.selected)
    }

    pub fn select_down(&mut self, rows: usize) {
        let last = self.display.len().saturating_sub(1);
        self.selected = self.selected.saturating_add(rows).min(last);
    }

    pub fn select_up(&mut self, rows: usize) {
        self.selected = self.selected.saturating_sub(rows);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.display.len().saturating_sub(1);
    }

    /// Whether the cursor is within `scroll_threshold` rows of the last
    /// rendered unit (always true when nothing is rendered).
    pub fn is_near_bottom(&self) -> bool {
        let len = self.display.len();
        let reach = self
            .selected
            .saturating_add(self.config.scroll_threshold)
            .saturating_add(1);
        len == 0 || reach >= len
    }

    // ------------------------------------------------------------------------
    // Side effects
    // ------------------------------------------------------------------------

    /// Show the "copied" marker on `unit` and schedule its removal.
    pub fn mark_copied(&mut self, unit: usize, event_tx: &mpsc::Sender<AppEvent>) {
        self.copied_units.insert(unit);
        spawn_timer(
            self.config.copy_feedback_delay(),
            AppEvent::CopyFeedbackElapsed {
                epoch: self.epoch,
                unit,
            },
            event_tx,
        );
    }

    pub fn clear_copied(&mut self, epoch: u64, unit: usize) {
        if epoch == self.epoch {
            self.copied_units.remove(&unit);
        }
    }

    /// Write the rendered units as HTML cards to `config.export_path`,
    /// inside `config.export_template` when one is set.
    ///
    /// Only a `Ready` catalog exports; the loading and failure messages stay
    /// on the status line otherwise.
    pub fn export_html(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        if self.state != LoadState::Ready {
            tracing::debug!(state = ?self.state, "Export ignored before catalog is ready");
            return;
        }
        if self.display.is_empty() {
            self.set_status("Nothing to export", StatusKind::Info);
            return;
        }

        let count = self.display.len();
        let html = html_fragment(self.display.units());
        let path = self.config.export_path.clone();
        let template = self.config.export_template.clone();
        let tx = event_tx.clone();
        self.set_status(format!("Exporting {} products...", count), StatusKind::Info);

        tokio::spawn(async move {
            let result = catch_task_panic(write_export(&path, template, html)).await;
            let event = match result {
                Ok(Ok(())) => AppEvent::ExportComplete { count, path },
                Ok(Err(e)) => AppEvent::ExportFailed {
                    error: e.to_string(),
                },
                Err(error) => AppEvent::TaskPanicked {
                    task: "html_export",
                    error,
                },
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, "Failed to send export result (receiver dropped)");
            }
        });
    }
}

async fn write_export(path: &str, template: Option<String>, html: String) -> std::io::Result<()> {
    let page = match template {
        Some(template_path) => {
            let template = tokio::fs::read_to_string(&template_path).await?;
            fill_template(&template, &html)
        }
        None => html,
    };
    tokio::fs::write(path, page).await
}

/// Send `event` after `delay`. Not cancellable.
fn spawn_timer(delay: Duration, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    let tx = event_tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(event).await;
    });
}
