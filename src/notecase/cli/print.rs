use colored::Colorize;
use notecase::api::{CmdMessage, MessageLevel};
use notecase::config::{NotecaseConfig, CONFIG_KEYS};
use notecase::index::{DisplayIndex, DisplayNote};
use notecase::model::{now_millis, Note, NoteKind, Timestamp};
use notecase::preview::{format_relative, note_preview, truncate_to_width};
use unicode_width::UnicodeWidthStr;

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 10;
const PIN_MARKER: &str = "⚲";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn kind_badge(note: &Note) -> String {
    match note.kind {
        NoteKind::Text => String::new(),
        NoteKind::Code => format!("[{}] ", note.language.as_deref().unwrap_or("code")),
        NoteKind::Image => "[image] ".to_string(),
    }
}

pub(super) fn print_notes(notes: &[DisplayNote]) {
    if notes.is_empty() {
        println!("No notes yet.");
        return;
    }
    let now = now_millis();
    for line in list_lines(notes, now) {
        println!("{}", line);
    }
}

/// One row per note with a blank line between the pinned and regular partitions.
fn list_lines(notes: &[DisplayNote], now: Timestamp) -> Vec<String> {
    let mut lines = Vec::with_capacity(notes.len() + 1);
    let mut last_was_pinned = false;

    for dn in notes {
        let is_pinned = matches!(dn.index, DisplayIndex::Pinned(_));
        if last_was_pinned && !is_pinned {
            lines.push(String::new());
        }
        last_was_pinned = is_pinned;

        let left_prefix = if is_pinned {
            format!("{} ", PIN_MARKER)
        } else {
            "  ".to_string()
        };
        let idx_str = format!("{}. ", dn.index);
        let badge = kind_badge(&dn.note);
        let time_label = format!(
            "{:>width$}",
            format_relative(dn.note.updated_at, now),
            width = TIME_WIDTH
        );

        let fixed = left_prefix.width() + idx_str.width() + badge.width() + TIME_WIDTH + 1;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let preview = truncate_to_width(&note_preview(&dn.note), available);
        let padding = available.saturating_sub(preview.width());

        let idx_colored = if is_pinned {
            idx_str.yellow()
        } else {
            idx_str.normal()
        };

        lines.push(format!(
            "{}{}{}{}{} {}",
            left_prefix,
            idx_colored,
            badge.cyan(),
            preview,
            " ".repeat(padding),
            time_label.dimmed()
        ));
    }
    lines
}

pub(super) fn print_full_notes(notes: &[DisplayNote]) {
    for (i, dn) in notes.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        let note = &dn.note;
        let pin = if note.pinned { " (pinned)" } else { "" };
        println!(
            "{} {}{} {}",
            dn.index.to_string().yellow(),
            note.kind.to_string().bold(),
            pin,
            note.id.dimmed()
        );
        println!("--------------------------------");
        match note.kind {
            NoteKind::Text => println!("{}", note.content),
            NoteKind::Code => {
                if let Some(lang) = &note.language {
                    println!("{}", format!("```{}", lang).dimmed());
                }
                println!("{}", note.content);
            }
            NoteKind::Image => {
                if let Some(caption) = &note.caption {
                    println!("{}", caption);
                }
                let size = note.image_data.as_deref().map(str::len).unwrap_or(0);
                println!("{}", format!("<image data, {} bytes>", size).dimmed());
            }
        }
    }
}

pub(super) fn print_config(config: &NotecaseConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}
