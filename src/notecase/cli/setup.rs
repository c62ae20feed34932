use clap::{Parser, Subcommand};
use notecase::model::{ImportMode, NoteKind};
use std::path::PathBuf;

/// "0.3.2" for releases, "0.3.2@abc1234" for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("NOTECASE_GIT_HASH");
    const IS_RELEASE: &str = env!("NOTECASE_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "notecase", bin_name = "notecase", version = get_version())]
#[command(about = "A small local note box for text, code snippets and images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// How a note's body is given on the command line.
#[derive(clap::Args, Debug, Default)]
pub struct NoteInput {
    /// Make it a code note in this language
    #[arg(long, value_name = "LANG", conflicts_with = "image")]
    pub code: Option<String>,

    /// Make it an image note from this file
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Caption for an image note
    #[arg(long, requires = "image")]
    pub caption: Option<String>,

    /// Note text (joined with spaces, read from stdin when omitted)
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}

impl NoteInput {
    pub fn joined_text(&self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.join(" "))
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a note
    #[command(alias = "n", display_order = 1)]
    Add {
        #[command(flatten)]
        input: NoteInput,
    },

    /// Replace the contents of a note
    #[command(alias = "e", display_order = 2)]
    Edit {
        /// Index or id of the note (e.g. 1, p1, 3f9a)
        selector: String,

        #[command(flatten)]
        input: NoteInput,
    },

    /// List notes
    #[command(alias = "ls", display_order = 3)]
    List {
        /// Only notes containing this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only notes of this type (text, code, image)
        #[arg(long = "type", value_name = "TYPE", value_parser = parse_kind)]
        kind: Option<NoteKind>,

        /// Only pinned notes
        #[arg(long)]
        pinned: bool,
    },

    /// View one or more notes in full
    #[command(alias = "v", display_order = 4)]
    View {
        /// Indexes or ids of the notes (e.g. 1 p1 2-4)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Pin or unpin notes
    #[command(alias = "p", display_order = 5)]
    Pin {
        /// Indexes or ids of the notes (e.g. 1 p1)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Delete one or more notes
    #[command(alias = "rm", display_order = 6)]
    Delete {
        /// Indexes or ids of the notes (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Export all notes to a JSON file (gzip when the name ends in .gz)
    #[command(display_order = 10)]
    Export {
        /// Output file (defaults to notecase-<timestamp>.json in the current directory)
        path: Option<PathBuf>,
    },

    /// Import notes from an export file
    #[command(display_order = 11)]
    Import {
        /// Export file to read (.json or .json.gz)
        path: PathBuf,

        /// merge or replace (asks when interactive, else uses config)
        #[arg(long, value_parser = parse_mode)]
        mode: Option<ImportMode>,
    },

    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (storage-key, default-language, import-mode, compress-exports)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create the data directory and a default config
    #[command(display_order = 21)]
    Init,
}

fn parse_kind(s: &str) -> Result<NoteKind, String> {
    match s.trim().to_lowercase().as_str() {
        "text" => Ok(NoteKind::Text),
        "code" => Ok(NoteKind::Code),
        "image" | "img" => Ok(NoteKind::Image),
        other => Err(format!("unknown note type: {} (use text, code or image)", other)),
    }
}

fn parse_mode(s: &str) -> Result<ImportMode, String> {
    s.parse()
}
