use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotecaseError, Result};
use crate::model::{ExportEnvelope, Note, EXPORT_FORMAT_VERSION};
use crate::store::KeyValueStore;
use chrono::{DateTime, SecondsFormat, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::helpers::load_notes;

/// Wraps the full collection in an export envelope.
pub fn snapshot(notes: Vec<Note>, now: DateTime<Utc>) -> Result<ExportEnvelope> {
    if notes.is_empty() {
        return Err(NotecaseError::EmptyCollection);
    }
    Ok(ExportEnvelope {
        version: EXPORT_FORMAT_VERSION.to_string(),
        export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        notes_count: notes.len(),
        notes,
    })
}

pub fn run<S: KeyValueStore>(store: &S, key: &str) -> Result<CmdResult> {
    let notes = load_notes(store, key)?;
    let envelope = snapshot(notes, Utc::now())?;
    Ok(CmdResult::default().with_export(envelope))
}

/// Exports the collection to `path`, or to a timestamped file in `dir`.
pub fn to_file<S: KeyValueStore>(
    store: &S,
    key: &str,
    path: Option<PathBuf>,
    dir: &Path,
    compress: bool,
) -> Result<CmdResult> {
    let now = Utc::now();
    let envelope = snapshot(load_notes(store, key)?, now)?;
    let path = path.unwrap_or_else(|| dir.join(default_filename(now, compress)));

    write_to_path(&path, &envelope)?;
    log::info!(
        "exported {} notes to {}",
        envelope.notes_count,
        path.display()
    );

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} note(s) to {}",
        envelope.notes_count,
        path.display()
    )));
    result.export_path = Some(path);
    Ok(result.with_export(envelope))
}

pub fn default_filename(now: DateTime<Utc>, compress: bool) -> String {
    let ext = if compress { "json.gz" } else { "json" };
    format!("notecase-{}.{}", now.timestamp_millis(), ext)
}

pub fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Writes the envelope as pretty JSON, gzip-compressed when the path ends in `.gz`.
pub fn write_to_path(path: &Path, envelope: &ExportEnvelope) -> Result<()> {
    let file = File::create(path).map_err(NotecaseError::Io)?;
    write_envelope(BufWriter::new(file), envelope, is_gzip_path(path))
}

pub fn write_envelope<W: Write>(writer: W, envelope: &ExportEnvelope, compress: bool) -> Result<()> {
    if compress {
        let mut enc = GzEncoder::new(writer, Compression::default());
        serde_json::to_writer_pretty(&mut enc, envelope).map_err(NotecaseError::Serialization)?;
        enc.finish()?.flush()?;
    } else {
        let mut writer = writer;
        serde_json::to_writer_pretty(&mut writer, envelope)
            .map_err(NotecaseError::Serialization)?;
        writer.flush()?;
    }
    Ok(())
}
