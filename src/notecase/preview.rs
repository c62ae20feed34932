//! One-line previews and relative timestamps for note listings.
//!
//! Text notes are Markdown. The preview keeps only the words: markup is parsed with
//! pulldown-cmark and only text and inline code survive, joined on a single line.

use crate::model::{Note, NoteKind, Timestamp};
use chrono::{DateTime, Local};
use pulldown_cmark::{Event, Parser, TagEnd};
use unicode_width::UnicodeWidthChar;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;

/// Flattens Markdown into plain text on one line.
pub fn plain_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::CodeBlock) => out.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&out)
}

/// The preview line for a note, before truncation.
pub fn note_preview(note: &Note) -> String {
    match note.kind {
        NoteKind::Text => plain_text(&note.content),
        // Code is shown verbatim; markdown parsing would eat symbols.
        NoteKind::Code => collapse_whitespace(&note.content),
        NoteKind::Image => plain_text(note.caption.as_deref().unwrap_or(&note.content)),
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts `s` to at most `max_width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Relative label for a timestamp: `Just now`, `5m ago`, `3h ago`, `2d ago`, then `Jan 5`.
pub fn format_relative(timestamp: Timestamp, now: Timestamp) -> String {
    let elapsed = now.saturating_sub(timestamp);
    if elapsed < MINUTE_MS {
        "Just now".to_string()
    } else if elapsed < HOUR_MS {
        format!("{}m ago", elapsed / MINUTE_MS)
    } else if elapsed < DAY_MS {
        format!("{}h ago", elapsed / HOUR_MS)
    } else if elapsed < WEEK_MS {
        format!("{}d ago", elapsed / DAY_MS)
    } else {
        match DateTime::from_timestamp_millis(timestamp) {
            Some(dt) => dt.with_timezone(&Local).format("%b %-d").to_string(),
            None => String::new(),
        }
    }
}
