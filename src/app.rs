use ratatui::widgets::ListState;

use crate::browser;
use crate::category::Category;
use crate::feed::{FeedController, FeedState};
use crate::source::Article;

/// Whether keystrokes drive navigation or go into the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// UI root: owns the feed controller plus purely presentational state.
pub struct App {
    pub feed: FeedController,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    pub mode: InputMode,
    /// Text typed into the search box, kept after submit so it stays visible.
    pub search_input: String,
}

impl App {
    pub fn new(feed: FeedController) -> Self {
        Self {
            feed,
            list_state: ListState::default(),
            quit: false,
            mode: InputMode::Normal,
            search_input: String::new(),
        }
    }

    pub fn state(&self) -> &FeedState {
        self.feed.state()
    }

    /// Apply finished requests.  Called once per tick from the main loop.
    pub fn tick(&mut self) {
        if self.feed.poll_completions() > 0 {
            self.reset_selection();
        }
    }

    /// Select the first article of a fresh result set (or nothing).
    fn reset_selection(&mut self) {
        let first = (!self.articles().is_empty()).then_some(0);
        self.list_state.select(first);
    }

    fn articles(&self) -> &[Article] {
        &self.feed.state().articles
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.list_state.selected().and_then(|i| self.articles().get(i))
    }

    // -- intents -------------------------------------------------------------

    pub fn select_category(&mut self, category: Category) {
        self.feed.select_category(category);
    }

    pub fn next_category(&mut self) {
        let next = self.state().selected_category.next();
        self.feed.select_category(next);
    }

    pub fn previous_category(&mut self) {
        let previous = self.state().selected_category.previous();
        self.feed.select_category(previous);
    }

    pub fn refresh(&mut self) {
        self.feed.refresh();
    }

    pub fn toggle_theme(&mut self) {
        self.feed.toggle_theme();
    }

    pub fn open_selected(&self) {
        if let Some(article) = self.openable_article() {
            browser::open_url(&article.url);
        }
    }

    /// The selected article, but only while the list is actually on screen.
    fn openable_article(&self) -> Option<&Article> {
        let state = self.state();
        if state.loading || state.error.is_some() {
            return None;
        }
        self.selected_article()
    }

    // -- search box ------------------------------------------------------------

    pub fn begin_search(&mut self) {
        self.mode = InputMode::Search;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
    }

    /// Submit the buffer.  A blank buffer resets to the category feed.
    pub fn submit_search(&mut self) {
        self.mode = InputMode::Normal;
        let query = self.search_input.clone();
        if query.trim().is_empty() {
            self.search_input.clear();
        }
        self.feed.search(&query);
    }

    pub fn cancel_search(&mut self) {
        self.mode = InputMode::Normal;
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        let len = self.articles().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.articles().is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.articles().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.articles().len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }
}
