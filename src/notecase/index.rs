//! # Ordering and Display Indexes
//!
//! The stored order of the collection is never authoritative. Whenever notes are
//! persisted after a re-sort, or shown to the user, they are put in the canonical
//! order by [`sort_notes`]:
//!
//! 1. pinned notes before unpinned notes
//! 2. within each group, most recently updated first
//!
//! Ties on `updated_at` keep their relative input order (the sort is stable), but
//! callers must not rely on any particular tiebreak.
//!
//! For the CLI, [`index_notes`] hands out short display indexes: `p1, p2, …` for
//! pinned notes and `1, 2, …` for the rest. Indexes are recomputed on every read,
//! so they are only meaningful against the listing they came from. Stable
//! references use the note id.

use crate::model::Note;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Canonical ordering of two notes.
pub fn compare_notes(a: &Note, b: &Note) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
}

/// Applies the ordering rule in place.
pub fn sort_notes(notes: &mut [Note]) {
    notes.sort_by(compare_notes);
}

/// True when every adjacent pair respects [`compare_notes`].
pub fn is_sorted(notes: &[Note]) -> bool {
    notes
        .windows(2)
        .all(|w| compare_notes(&w[0], &w[1]) != Ordering::Greater)
}

/// A user-facing index for a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisplayIndex {
    Pinned(usize),
    Regular(usize),
}

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayIndex::Pinned(i) => write!(f, "p{}", i),
            DisplayIndex::Regular(i) => write!(f, "{}", i),
        }
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix('p') {
            if let Ok(n) = rest.parse() {
                return Ok(DisplayIndex::Pinned(n));
            }
        }
        if let Ok(n) = s.parse() {
            return Ok(DisplayIndex::Regular(n));
        }
        Err(format!("Invalid index format: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNote {
    pub note: Note,
    pub index: DisplayIndex,
}

/// Sorts the notes and assigns display indexes.
///
/// The result is the pinned partition (`p1…`) followed by the unpinned one (`1…`),
/// each ordered by most recent update.
pub fn index_notes(mut notes: Vec<Note>) -> Vec<DisplayNote> {
    sort_notes(&mut notes);

    let (pinned, regular): (Vec<Note>, Vec<Note>) = notes.into_iter().partition(|n| n.pinned);

    let pinned = pinned.into_iter().enumerate().map(|(i, note)| DisplayNote {
        note,
        index: DisplayIndex::Pinned(i + 1),
    });
    let regular = regular.into_iter().enumerate().map(|(i, note)| DisplayNote {
        note,
        index: DisplayIndex::Regular(i + 1),
    });

    pinned.chain(regular).collect()
}

/// A user input that picks notes: a display index, an inclusive index range, or (a
/// unique prefix of) an id.
///
/// Ranges stay unexpanded until they are resolved against a listing, so their size is
/// bounded by the number of notes rather than by what the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSelector {
    Index(DisplayIndex),
    Range(DisplayIndex, DisplayIndex),
    Id(String),
}

impl NoteSelector {
    /// True when `index` is picked by this selector. Ids never match an index.
    pub fn covers(&self, index: &DisplayIndex) -> bool {
        match (self, index) {
            (NoteSelector::Index(idx), _) => idx == index,
            (
                NoteSelector::Range(DisplayIndex::Regular(s), DisplayIndex::Regular(e)),
                DisplayIndex::Regular(i),
            )
            | (
                NoteSelector::Range(DisplayIndex::Pinned(s), DisplayIndex::Pinned(e)),
                DisplayIndex::Pinned(i),
            ) => s <= i && i <= e,
            _ => false,
        }
    }
}

impl fmt::Display for NoteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteSelector::Index(idx) => write!(f, "{}", idx),
            NoteSelector::Range(start, end) => write!(f, "{}-{}", start, end),
            NoteSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Parses one CLI argument into a selector. Ranges look like `2-4` or `p1-p3`;
/// anything that is not an index is taken as an id.
pub fn parse_selector(s: &str) -> Result<NoteSelector, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Empty note selector".to_string());
    }
    if let Some(dash_pos) = s.find('-') {
        if dash_pos > 0 {
            let start = DisplayIndex::from_str(&s[..dash_pos]);
            let end = DisplayIndex::from_str(&s[dash_pos + 1..]);
            if let (Ok(start), Ok(end)) = (start, end) {
                return check_range(start, end);
            }
        }
    }
    match DisplayIndex::from_str(s) {
        Ok(idx) => Ok(NoteSelector::Index(idx)),
        Err(_) => Ok(NoteSelector::Id(s.to_string())),
    }
}

pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<NoteSelector>, String> {
    inputs.iter().map(|i| parse_selector(i.as_ref())).collect()
}

fn check_range(start: DisplayIndex, end: DisplayIndex) -> Result<NoteSelector, String> {
    match (&start, &end) {
        (DisplayIndex::Regular(s), DisplayIndex::Regular(e))
        | (DisplayIndex::Pinned(s), DisplayIndex::Pinned(e)) => {
            if s <= e {
                Ok(NoteSelector::Range(start, end))
            } else {
                Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    start, end
                ))
            }
        }
        _ => Err(format!(
            "Invalid range: cannot mix index types ({} and {})",
            start, end
        )),
    }
}
