//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  Everything is a pure function of
//! the current [`FeedState`](crate::feed::FeedState) plus the small amount of
//! presentational state `App` keeps (selection, search buffer, input mode).
//!
//! ## Layout
//!
//! ```text
//! ┌ header: app title ─────────────── theme switch ┐
//! ┌ search box ────────────────────────────────────┐
//! ┌ category tabs ─────────────────────────────────┐
//! ┌ main: loading | error banner | articles | none ┐
//!   status bar
//! ```
//!
//! Colours come from the active [`Theme`](crate::theme::Theme)'s palette.

use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, InputMode};
use crate::category::Category;
use crate::source::Article;
use crate::theme::{Palette, Theme};

/// Longest description shown on a card before it is cut with an ellipsis.
const DESCRIPTION_LIMIT: usize = 240;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let palette = app.state().theme.palette();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        frame.area(),
    );

    let [header_area, search_area, tabs_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(app, frame, header_area, &palette);
    draw_search_box(app, frame, search_area, &palette);
    draw_category_tabs(app, frame, tabs_area, &palette);
    draw_main(app, frame, main_area, &palette);
    draw_status_bar(app, frame, status_area, &palette);
}

fn draw_header(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let switch = match app.state().theme {
        Theme::Light => "☀ Light",
        Theme::Dark => "☾ Dark",
    };
    let [title_area, switch_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(12)]).areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            " News Feed",
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        )),
        title_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(switch, Style::default().fg(palette.accent)))
            .right_aligned(),
        switch_area,
    );
}

fn draw_search_box(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let editing = app.mode == InputMode::Search;
    let border = if editing { palette.accent } else { palette.muted };

    let content = if app.search_input.is_empty() && !editing {
        Span::styled("Search news... (/)", Style::default().fg(palette.muted))
    } else {
        Span::styled(app.search_input.as_str(), Style::default().fg(palette.text))
    };

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(content).block(block), area);

    if editing {
        let typed = u16::try_from(app.search_input.chars().count()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(typed);
        frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_category_tabs(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let titles: Vec<Line> = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| Line::from(format!("{} {}", i + 1, c.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.state().selected_category.index())
        .block(
            Block::default()
                .title(" Categories ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.muted)),
        )
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, area);
}

/// Precedence: loading indicator, then error banner, then articles.
fn draw_main(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let state = app.feed.state();

    if state.loading {
        let text = Paragraph::new(Line::from(vec![
            Span::styled("⟳ ", Style::default().fg(palette.accent)),
            Span::raw("Loading..."),
        ]))
        .centered()
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(text, area);
        return;
    }

    if let Some(error) = &state.error {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled("Error! ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(error.as_str()),
        ]))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(palette.error_fg).bg(palette.error_bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.error_fg)),
        );
        frame.render_widget(banner, area);
        return;
    }

    let title = match &state.active_query {
        Some(q) => format!(" Results for \"{q}\" "),
        None => format!(" Top headlines: {} ", state.selected_category.label()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted));

    if state.articles.is_empty() {
        frame.render_widget(
            Paragraph::new("No articles found.").centered().block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = state
        .articles
        .iter()
        .map(|article| article_card(article, palette))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(palette.highlight_bg))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// One article as a multi-line list entry.
fn article_card<'a>(article: &'a Article, palette: &Palette) -> ListItem<'a> {
    let mut lines = vec![Line::from(Span::styled(
        article.title.as_str(),
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
    ))];

    if let Some(description) = &article.description {
        lines.push(Line::from(Span::styled(
            clamp(description, DESCRIPTION_LIMIT),
            Style::default().fg(palette.muted),
        )));
    }

    let mut meta = Vec::new();
    if !article.source_name.is_empty() {
        meta.push(Span::styled(
            article.source_name.as_str(),
            Style::default().fg(palette.accent),
        ));
    }
    if let Some(date) = article.formatted_date() {
        if !meta.is_empty() {
            meta.push(Span::raw(" · "));
        }
        meta.push(Span::styled(date, Style::default().fg(palette.muted)));
    }
    if article.image_url.is_some() {
        meta.push(Span::styled("  [image]", Style::default().fg(palette.muted)));
    }
    if !meta.is_empty() {
        lines.push(Line::from(meta));
    }

    lines.push(Line::from(Span::styled(
        article.url.as_str(),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::UNDERLINED),
    )));
    lines.push(Line::default());

    ListItem::new(lines)
}

/// Cut `text` to at most `max` characters, marking the cut with "…".
fn clamp(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let help = match app.mode {
        InputMode::Normal => {
            "  q: quit  ↑/↓: scroll  ←/→ 1-7: category  /: search  t: theme  r: refresh  o: open"
        }
        InputMode::Search => "  Enter: search  Esc: cancel",
    };
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{} articles", app.state().articles.len()),
            Style::default().fg(palette.accent),
        ),
        Span::styled(help, Style::default().fg(palette.muted)),
    ]));
    frame.render_widget(status, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{loaded_app, make_app, FixedSource};
    use crate::error::FetchError;
    use crate::feed::FeedController;
    use crate::source::{FeedRequest, NewsSource};
    use crate::storage::MemoryStore;

    use std::sync::Arc;

    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    struct FailingSource;

    #[async_trait]
    impl NewsSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, _: &FeedRequest) -> Result<Vec<Article>, FetchError> {
            Err(FetchError::Status {
                code: 500,
                message: None,
            })
        }
    }

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();

        let buf = terminal.backend().buffer().clone();
        buf.content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[test]
    fn draw_does_not_panic_with_no_items() {
        let mut app = make_app(Arc::new(FixedSource::default()));
        let text = render(&mut app);
        assert!(text.contains("No articles found."));
        assert!(text.contains("News Feed"));
    }

    #[tokio::test]
    async fn draw_shows_article_cards() {
        let (mut app, _) = loaded_app().await;
        let text = render(&mut app);

        assert!(text.contains("general story 1"));
        assert!(text.contains("Test Wire"));
        assert!(text.contains("3 articles"), "status bar shows article count");
    }

    #[tokio::test]
    async fn loading_indicator_replaces_list() {
        let (mut app, _) = loaded_app().await;
        app.refresh();
        let text = render(&mut app);

        assert!(text.contains("Loading..."));
        assert!(!text.contains("general story 1"));
    }

    #[tokio::test]
    async fn error_banner_replaces_list() {
        let feed = FeedController::new(
            Arc::new(FailingSource),
            Box::new(MemoryStore::default()),
            Category::General,
        );
        let mut app = App::new(feed);
        app.feed.start();
        app.feed.settle().await;

        let text = render(&mut app);
        assert!(text.contains("Error!"));
        assert!(text.contains("500"));
        assert!(!text.contains("No articles found."));
    }

    #[tokio::test]
    async fn error_banner_hides_previously_loaded_articles() {
        let (mut app, _) = loaded_app().await;
        assert!(render(&mut app).contains("general story 1"));

        app.feed.search("offline");
        app.feed.settle().await;
        assert_eq!(app.state().articles.len(), 3, "articles are kept");

        let text = render(&mut app);
        assert!(text.contains("Error!"));
        assert!(text.contains("connection refused"));
        assert!(!text.contains("general story 1"));
    }

    #[test]
    fn very_long_search_input_keeps_cursor_inside_the_box() {
        let mut app = make_app(Arc::new(FixedSource::default()));
        app.begin_search();
        app.search_input = "x".repeat(70_000);

        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();

        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor.x, 38);
        assert_eq!(cursor.y, 2);
    }

    #[test]
    fn theme_switch_reflects_state() {
        let mut app = make_app(Arc::new(FixedSource::default()));
        assert!(render(&mut app).contains("Light"));

        app.toggle_theme();
        assert!(render(&mut app).contains("Dark"));
    }

    #[tokio::test]
    async fn search_results_are_titled_with_query() {
        let (mut app, _) = loaded_app().await;
        app.feed.search("ferris");
        app.feed.settle().await;

        let text = render(&mut app);
        assert!(text.contains("Results for \"ferris\""));
        assert!(text.contains("about ferris"));
    }

    #[test]
    fn clamp_shortens_long_text() {
        assert_eq!(clamp("short", 10), "short");
        let cut = clamp("abcdefghij", 5);
        assert_eq!(cut, "abcd…");
        assert_eq!(cut.chars().count(), 5);
    }
}
