use std::borrow::Cow;

use super::state::{Focus, TuiState, FACET_SECTIONS};
use chrono::{DateTime, Utc};
use newsdeck::feed::types::{Article, SentimentLabel};
use newsdeck::session::FeedStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

pub fn draw(f: &mut Frame, state: &TuiState) {
    // Derived once per frame; the query pipeline is pure so this is the
    // single source of truth for everything below.
    let visible = state.session.visible();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0], visible.len());
    draw_search(f, state, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(24)])
        .split(chunks[2]);

    draw_facets(f, state, body[0]);
    draw_articles(f, state, body[1], &visible);
    draw_footer(f, state, chunks[3]);
}

fn draw_header(f: &mut Frame, state: &TuiState, area: Rect, visible_count: usize) {
    let stats = state.session.stats();
    let line = Line::from(vec![
        Span::styled(
            " newsdeck ",
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {} of {} articles | {} publishers | {} feeds | {} forum posts",
            visible_count, stats.total, stats.publishers, stats.feeds, stats.forum_posts,
        )),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_search(f: &mut Frame, state: &TuiState, area: Rect) {
    let focused = state.focus == Focus::Search;
    let cursor = if focused { "_" } else { "" };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(format!("{}{}", state.session.search_query(), cursor))
        .style(style)
        .block(
            Block::default()
                .title(" Search (/) ")
                .borders(Borders::ALL)
                .border_style(style),
        );
    f.render_widget(search, area);
}

fn draw_facets(f: &mut Frame, state: &TuiState, area: Rect) {
    let focused = state.focus == Focus::Filters;
    let width = area.width.saturating_sub(6) as usize;
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0usize;

    for (section_idx, facet) in FACET_SECTIONS.iter().enumerate() {
        let selected = state.session.selections().set(*facet);
        let current_section = focused && section_idx == state.facet_section;

        let mut title_style = Style::default().add_modifier(Modifier::BOLD);
        if current_section {
            title_style = title_style.fg(Color::Yellow);
        }
        let title = if selected.is_empty() {
            facet.title().to_string()
        } else {
            format!("{} ({})", facet.title(), selected.len())
        };
        lines.push(Line::from(Span::styled(title, title_style)));

        let values = state.session.facets().values(*facet);
        if values.is_empty() {
            lines.push(Line::from(Span::styled(
                "  none",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (row_idx, value) in values.iter().enumerate() {
            let mark = if selected.contains(value) { "[x]" } else { "[ ]" };
            let text = format!(" {} {}", mark, truncate_with_ellipsis(value, width));
            let mut style = Style::default();
            if selected.contains(value) {
                style = style.fg(Color::Green);
            }
            if current_section && row_idx == state.facet_row {
                style = style.add_modifier(Modifier::REVERSED);
                cursor_line = lines.len();
            }
            lines.push(Line::from(Span::styled(text, style)));
        }
        lines.push(Line::from(""));
    }

    // Keep the cursor on screen when a section outgrows the panel.
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = cursor_line.saturating_sub(inner_height.saturating_sub(1)) as u16;

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let active = state.session.selections().active_count();
    let title = if active == 0 {
        " Filters (Tab) ".to_string()
    } else {
        format!(" Filters (Tab) [{} active, c clears] ", active)
    };
    let panel = Paragraph::new(lines).scroll((scroll, 0)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(panel, area);
}

fn draw_articles(f: &mut Frame, state: &TuiState, area: Rect, visible: &[Article]) {
    let focused = state.focus == Focus::List;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    if visible.is_empty() {
        let message = match state.session.feed_status() {
            FeedStatus::Failed(err) if state.session.articles().is_empty() => {
                format!("feed unavailable: {}", err)
            }
            FeedStatus::Loading if state.session.articles().is_empty() => {
                "fetching articles...".to_string()
            }
            _ => "No articles match. Adjust the search or clear filters (c).".to_string(),
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title(" Articles ")
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
        f.render_widget(empty, area);
        return;
    }

    let now = Utc::now();
    let title_w = area.width.saturating_sub(48).max(16) as usize;

    let header = Row::new(vec!["Age", "", "Publisher", "Title", "Feed"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let visible_lines = area.height.saturating_sub(3) as usize; // borders + header row
    let total = visible.len();
    let offset = state.list_offset.min(total.saturating_sub(visible_lines.max(1)));

    let rows: Vec<Row> = visible
        .iter()
        .skip(offset)
        .take(visible_lines)
        .map(|article| {
            let (marker, marker_color) = sentiment_marker(article.sentiment_label);
            Row::new(vec![
                Cell::from(relative_age(article.date, now))
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(marker).style(Style::default().fg(marker_color)),
                Cell::from(truncate_with_ellipsis(&article.publisher, 14).into_owned()),
                Cell::from(truncate_with_ellipsis(&article.title, title_w).into_owned()),
                Cell::from(truncate_with_ellipsis(&article.feed_title, 14).into_owned())
                    .style(Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    let constraints = [
        Constraint::Length(8),
        Constraint::Length(1),
        Constraint::Length(14),
        Constraint::Min(16),
        Constraint::Length(14),
    ];

    let title = format!(
        " Articles [{}-{} of {}] ",
        offset + 1,
        (offset + visible_lines).min(total),
        total,
    );
    let table = Table::new(rows, constraints).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(table, area);
}

fn draw_footer(f: &mut Frame, state: &TuiState, area: Rect) {
    let status_span = match state.session.feed_status() {
        FeedStatus::Loading => Span::styled("fetching...", Style::default().fg(Color::Yellow)),
        FeedStatus::Ready { fetched_at, count } => Span::styled(
            format!("updated {} ({} articles)", fetched_at.format("%H:%M:%S"), count),
            Style::default().fg(Color::Green),
        ),
        FeedStatus::Failed(_) => {
            Span::styled("feed error (r retries)", Style::default().fg(Color::Red))
        }
    };

    let line = Line::from(vec![
        Span::raw(format!(
            "q quit | / search | Tab filters | Space toggle | c clear | s sort: {} | r refresh   ",
            state.session.sort_key().label(),
        )),
        status_span,
    ]);
    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

/// Row marker for the sentiment column.
fn sentiment_marker(label: Option<SentimentLabel>) -> (&'static str, Color) {
    match label {
        Some(SentimentLabel::Bullish) => ("▲", Color::Green),
        Some(SentimentLabel::Bearish) => ("▼", Color::Red),
        Some(SentimentLabel::Neutral) => ("·", Color::DarkGray),
        None => (" ", Color::Reset),
    }
}

/// Compact "time since" for the age column.
fn relative_age(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - date).num_seconds();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

fn truncate_with_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    let char_count = s.chars().count();
    if char_count <= max_width {
        Cow::Borrowed(s)
    } else if max_width <= 3 {
        Cow::Owned(".".repeat(max_width))
    } else {
        let end = s
            .char_indices()
            .nth(max_width - 3)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        Cow::Owned(format!("{}...", &s[..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_with_ellipsis("GME squeeze", 20), "GME squeeze");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_with_ellipsis("hello", 2), "..");
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        assert_eq!(truncate_with_ellipsis("日本語のニュース見出し", 7), "日本語の...");
    }

    #[test]
    fn test_relative_age_buckets() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let at = |secs_ago: i64| DateTime::from_timestamp(1_700_000_000 - secs_ago, 0).unwrap();

        assert_eq!(relative_age(at(0), now), "just now");
        assert_eq!(relative_age(at(59), now), "just now");
        assert_eq!(relative_age(at(60), now), "1m ago");
        assert_eq!(relative_age(at(59 * 60), now), "59m ago");
        assert_eq!(relative_age(at(2 * 3600), now), "2h ago");
        assert_eq!(relative_age(at(3 * 86_400), now), "3d ago");
    }

    #[test]
    fn test_sentiment_marker_mapping() {
        assert_eq!(sentiment_marker(Some(SentimentLabel::Bullish)).0, "▲");
        assert_eq!(sentiment_marker(Some(SentimentLabel::Bearish)).0, "▼");
        assert_eq!(sentiment_marker(Some(SentimentLabel::Neutral)).0, "·");
        assert_eq!(sentiment_marker(None).0, " ");
    }
}
