//! The feed controller: the single owner of everything the UI renders.
//!
//! ## Request lifecycle
//!
//! ```text
//!            load_by_category / search
//!   Idle ─────────────────────────────► Loading ──► Success ─┐
//!    ▲                                     │                  │
//!    │                                     └──────► Failed ───┤
//!    └────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation spawns one tokio task that calls the [`NewsSource`] and
//! sends a [`Completion`] back over a channel.  The UI loop drains that
//! channel with [`FeedController::poll_completions`] each tick, so state is
//! only ever mutated on the UI thread.
//!
//! Each request is tagged with a sequence number.  Issuing a new request
//! aborts the previous task, and any completion that still arrives for an
//! older sequence number is dropped, so the most recently *issued* request
//! always decides what is shown.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::category::Category;
use crate::error::FetchError;
use crate::source::{Article, FeedRequest, NewsSource};
use crate::storage::KeyValueStore;
use crate::theme::{Theme, THEME_KEY};

/// Everything the renderer needs, in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    /// Current result set, in API order.
    pub articles: Vec<Article>,
    /// True while the latest issued request is outstanding.
    pub loading: bool,
    /// Message from the last failed request.  Shown instead of `articles`.
    pub error: Option<String>,
    pub selected_category: Category,
    pub theme: Theme,
    /// The search whose results are (or will be) shown; `None` for the
    /// category feed.
    pub active_query: Option<String>,
}

impl FeedState {
    fn new(selected_category: Category, theme: Theme) -> Self {
        Self {
            articles: Vec::new(),
            loading: false,
            error: None,
            selected_category,
            theme,
            active_query: None,
        }
    }
}

/// Result of one request task.
#[derive(Debug)]
struct Completion {
    seq: u64,
    request: FeedRequest,
    outcome: Result<Vec<Article>, FetchError>,
}

pub struct FeedController {
    state: FeedState,
    source: Arc<dyn NewsSource>,
    prefs: Box<dyn KeyValueStore>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    /// Sequence number of the most recently issued request.
    issued: u64,
    in_flight: Option<AbortHandle>,
}

impl FeedController {
    /// Build the controller and its state.
    ///
    /// The theme preference is read here, so `state().theme` is already
    /// correct before the first frame is drawn or any request is made.
    /// Call [`start`](Self::start) to issue the initial load.
    pub fn new(
        source: Arc<dyn NewsSource>,
        prefs: Box<dyn KeyValueStore>,
        initial_category: Category,
    ) -> Self {
        let theme = Theme::load(prefs.as_ref());
        tracing::info!(theme = theme.as_str(), category = %initial_category, "feed state created");

        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: FeedState::new(initial_category, theme),
            source,
            prefs,
            tx,
            rx,
            issued: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Initial load of the selected category.  Must be called from within a
    /// tokio runtime.
    pub fn start(&mut self) {
        self.load_by_category(self.state.selected_category);
    }

    // -- operations ------------------------------------------------------------

    /// Show top headlines for `category`.
    pub fn load_by_category(&mut self, category: Category) {
        self.state.selected_category = category;
        self.state.active_query = None;
        self.issue(FeedRequest::TopHeadlines(category));
    }

    /// Category selector intent: reload only when the category changes.
    pub fn select_category(&mut self, category: Category) {
        if category != self.state.selected_category {
            self.load_by_category(category);
        }
    }

    /// Reload the current category feed.
    pub fn refresh(&mut self) {
        self.load_by_category(self.state.selected_category);
    }

    /// Search everything for `query`.  A blank query resets to the category
    /// feed.
    pub fn search(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.load_by_category(self.state.selected_category);
            return;
        }
        self.state.active_query = Some(query.to_string());
        self.issue(FeedRequest::Everything(query.to_string()));
    }

    /// Flip the theme and persist it.  A failed write is logged; the toggle
    /// still takes effect for this session.
    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
        if let Err(e) = self.prefs.set(THEME_KEY, self.state.theme.as_str()) {
            tracing::warn!(error = %e, "failed to persist theme preference");
        }
        tracing::info!(theme = self.state.theme.as_str(), "theme toggled");
    }

    // -- completions -----------------------------------------------------------

    /// Apply every completion that has already arrived.  Never blocks.
    ///
    /// Returns the number of completions that changed state.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            if self.apply(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait until the latest request has finished and its result is applied.
    pub async fn settle(&mut self) {
        while self.state.loading {
            match self.rx.recv().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
    }

    // -- internals -------------------------------------------------------------

    fn issue(&mut self, request: FeedRequest) {
        self.issued += 1;
        let seq = self.issued;

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        self.state.loading = true;
        self.state.error = None;
        tracing::info!(seq, source = self.source.name(), request = ?request, "request issued");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = source.fetch(&request).await;
            // The controller owns the receiver; if it is gone nobody cares.
            let _ = tx.send(Completion {
                seq,
                request,
                outcome,
            });
        });
        self.in_flight = Some(handle.abort_handle());
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.seq != self.issued {
            tracing::debug!(
                seq = completion.seq,
                latest = self.issued,
                "discarding stale completion"
            );
            return false;
        }

        match completion.outcome {
            Ok(articles) => {
                tracing::info!(
                    seq = completion.seq,
                    count = articles.len(),
                    request = ?completion.request,
                    "request succeeded"
                );
                self.state.articles = articles;
                self.state.error = None;
            }
            Err(e) => {
                tracing::warn!(
                    seq = completion.seq,
                    request = ?completion.request,
                    error = %e,
                    "request failed"
                );
                self.state.error = Some(e.to_string());
            }
        }
        self.state.loading = false;
        self.in_flight = None;
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
