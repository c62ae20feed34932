//! # CLI Layer
//!
//! This module is **one possible UI client** for notecase. It stands where a browser
//! popup would: it collects drafts, asks the questions a popup would ask (merge or
//! replace, confirm delete) and renders `CmdResult`s.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Reads image files from disk
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` around the API
//! - `handle_*()`: Per-command handlers that call the API and print the result

use super::print::{print_config, print_full_notes, print_messages, print_notes};
use super::setup::{Cli, Commands, NoteInput};
use base64::{engine::general_purpose, Engine as _};
use clap::Parser;
use console::Term;
use notecase::api::{ConfigAction, NoteFilter, NotecaseApi};
use notecase::commands::import::read_file;
use notecase::error::{NotecaseError, Result};
use notecase::init::{data_dir, initialize};
use notecase::logging::init_logging;
use notecase::model::{DraftTarget, ImportMode, Note, NoteDraft, NoteKind};
use notecase::store::fs::FileStore;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

struct AppContext {
    api: NotecaseApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _logger = match init_logging(cli.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: {}", e);
            None
        }
    };

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Add { input }) => handle_add(&mut ctx, input),
        Some(Commands::Edit { selector, input }) => handle_edit(&mut ctx, selector, input),
        Some(Commands::List {
            search,
            kind,
            pinned,
        }) => handle_list(
            &ctx,
            NoteFilter {
                kind,
                pinned_only: pinned,
                search,
            },
        ),
        Some(Commands::View { selectors }) => handle_view(&ctx, selectors),
        Some(Commands::Pin { selectors }) => handle_pin(&mut ctx, selectors),
        Some(Commands::Delete { selectors, yes }) => handle_delete(&mut ctx, selectors, yes),
        Some(Commands::Export { path }) => handle_export(&ctx, path),
        Some(Commands::Import { path, mode }) => handle_import(&mut ctx, path, mode),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_list(&ctx, NoteFilter::default()),
    }
}

fn init_context() -> Result<AppContext> {
    let dir = data_dir()?;
    let ctx = initialize(&dir);
    Ok(AppContext { api: ctx.api })
}

fn handle_add(ctx: &mut AppContext, input: NoteInput) -> Result<()> {
    let text = input.joined_text().or_else(read_piped_stdin);

    let draft = if let Some(path) = &input.image {
        NoteDraft::image(image_data_uri(path)?, input.caption.clone().or(text))
    } else if let Some(lang) = input.code {
        NoteDraft::code(text.unwrap_or_default(), Some(lang))
    } else {
        NoteDraft::text(text.unwrap_or_default())
    };

    let result = ctx.api.submit(DraftTarget::New, draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, selector: String, input: NoteInput) -> Result<()> {
    let result = ctx.api.view(&[selector.as_str()])?;
    let Some(existing) = result.listed_notes.into_iter().next().map(|dn| dn.note) else {
        return Err(NotecaseError::Api(format!("No note matches {}", selector)));
    };

    let text = input.joined_text().or_else(read_piped_stdin);
    let draft = edit_draft(&existing, input, text)?;

    let result = ctx
        .api
        .submit(DraftTarget::Existing(existing.id.clone()), draft)?;
    print_messages(&result.messages);
    Ok(())
}

/// Builds the replacement draft: flags pick the new type, otherwise the note keeps its own.
fn edit_draft(existing: &Note, input: NoteInput, text: Option<String>) -> Result<NoteDraft> {
    if let Some(path) = &input.image {
        let caption = input.caption.or(text);
        return Ok(NoteDraft::image(image_data_uri(path)?, caption));
    }
    if let Some(lang) = input.code {
        let content = text.unwrap_or_else(|| existing.content.clone());
        return Ok(NoteDraft::code(content, Some(lang)));
    }

    match existing.kind {
        NoteKind::Text => text
            .map(NoteDraft::text)
            .ok_or_else(|| NotecaseError::Api("Nothing to change: give the new text".into())),
        NoteKind::Code => match text {
            Some(content) => Ok(NoteDraft::code(content, existing.language.clone())),
            None => Err(NotecaseError::Api("Nothing to change: give the new code".into())),
        },
        NoteKind::Image => {
            let data = existing.image_data.clone().unwrap_or_default();
            let caption = input.caption.or(text).or_else(|| existing.caption.clone());
            Ok(NoteDraft::image(data, caption))
        }
    }
}

fn handle_list(ctx: &AppContext, filter: NoteFilter) -> Result<()> {
    let result = ctx.api.list(&filter)?;
    print_notes(&result.listed_notes);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.view(&selectors)?;
    print_full_notes(&result.listed_notes);
    print_messages(&result.messages);
    Ok(())
}

fn handle_pin(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let ids = ctx.api.resolve_ids(&selectors)?;
    let result = ctx.api.toggle_pins(&ids)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: Vec<String>, yes: bool) -> Result<()> {
    let ids = ctx.api.resolve_ids(&selectors)?;

    if !yes {
        if !is_interactive() {
            return Err(NotecaseError::Api(
                "Refusing to delete without confirmation, pass --yes".into(),
            ));
        }
        let answer = ask(&format!("Delete {} note(s)? [y/N]", ids.len()))?;
        if !matches!(answer.as_str(), "y" | "yes") {
            println!("Nothing deleted.");
            return Ok(());
        }
    }

    let result = ctx.api.delete_many(&ids)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, path: Option<PathBuf>) -> Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let result = ctx.api.export_to_file(path, &cwd)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: PathBuf, mode: Option<ImportMode>) -> Result<()> {
    // Parse fully before asking anything, a bad file never reaches the prompt
    let imported = read_file(&path)?;
    let mode = choose_import_mode(ctx, mode)?;
    let result = ctx.api.import_notes(imported, mode)?;
    print_messages(&result.messages);
    Ok(())
}

fn choose_import_mode(ctx: &AppContext, requested: Option<ImportMode>) -> Result<ImportMode> {
    if let Some(mode) = requested {
        return Ok(mode);
    }
    let existing = ctx.api.note_count()?;
    if existing == 0 || !is_interactive() {
        return Ok(ctx.api.settings().default_import_mode);
    }

    let answer = ask(&format!(
        "You have {} note(s). Merge the imported notes with them or replace them? [M/r]",
        existing
    ))?;
    if answer.is_empty() {
        return Ok(ImportMode::Merge);
    }
    answer.parse().map_err(NotecaseError::Api)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn is_interactive() -> bool {
    console::user_attended() && std::io::stdin().is_terminal()
}

fn ask(question: &str) -> Result<String> {
    let term = Term::stdout();
    term.write_line(question)?;
    Ok(term.read_line()?.trim().to_lowercase())
}

fn read_piped_stdin() -> Option<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    let mut buffer = String::new();
    match stdin.read_to_string(&mut buffer) {
        Ok(_) if !buffer.trim().is_empty() => Some(buffer),
        _ => None,
    }
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Reads an image file into a `data:` URI, the form image notes store.
fn image_data_uri(path: &Path) -> Result<String> {
    let mime = image_mime(path).ok_or_else(|| {
        NotecaseError::Api(format!("Not a supported image file: {}", path.display()))
    })?;
    let bytes = std::fs::read(path)?;
    Ok(format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(bytes)
    ))
}
