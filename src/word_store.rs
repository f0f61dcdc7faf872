//! Word list persistence and random target selection.
//!
//! The list is stored as a single line of words joined by `,`. Entries are
//! trimmed on load. Words containing commas cannot be represented.

use crate::error::{Result, TimeMeError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_WORDS: [&str; 11] = [
    "Salut", "Pisica", "A", "Dumnezeu", "Mihaela", "Ce", "Repede", "Strain", "Laringe", "Da",
    "Nu",
];

const FILE_SEPARATOR: &str = ",";
const EDITOR_SEPARATOR: &str = ", ";

pub fn default_words() -> Vec<String> {
    DEFAULT_WORDS.iter().map(|w| w.to_string()).collect()
}

/// Split a comma-delimited blob into trimmed, non-empty words.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

/// Serialized form written to the word list file.
pub fn serialize_word_list(words: &[String]) -> String {
    words.join(FILE_SEPARATOR)
}

/// Human friendly form shown in the configuration editor.
pub fn editor_text(words: &[String]) -> String {
    words.join(EDITOR_SEPARATOR)
}

pub trait WordStore {
    /// Load the persisted list, seeding (and persisting) the defaults when
    /// nothing has been stored yet.
    fn load(&self) -> Result<Vec<String>>;
    fn save(&self, words: &[String]) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileWordStore {
    path: PathBuf,
}

impl FileWordStore {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl WordStore for FileWordStore {
    fn load(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let words = parse_word_list(&text);
                tracing::info!(path = %self.path.display(), count = words.len(), "loaded word list");
                Ok(words)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let words = default_words();
                tracing::info!(path = %self.path.display(), "word list missing, seeding defaults");
                self.save(&words)?;
                Ok(words)
            }
            Err(e) => Err(TimeMeError::read(&self.path, e)),
        }
    }

    fn save(&self, words: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| TimeMeError::write(&self.path, e))?;
        }
        fs::write(&self.path, serialize_word_list(words))
            .map_err(|e| TimeMeError::write(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), count = words.len(), "saved word list");
        Ok(())
    }
}

/// Keeps the list in memory; `None` behaves like a missing file.
#[derive(Debug, Default)]
pub struct MemoryWordStore {
    contents: RefCell<Option<String>>,
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(text: &str) -> Self {
        Self {
            contents: RefCell::new(Some(text.to_string())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl WordStore for MemoryWordStore {
    fn load(&self) -> Result<Vec<String>> {
        let existing = self.contents.borrow().clone();
        match existing {
            Some(text) => Ok(parse_word_list(&text)),
            None => {
                let words = default_words();
                self.save(&words)?;
                Ok(words)
            }
        }
    }

    fn save(&self, words: &[String]) -> Result<()> {
        *self.contents.borrow_mut() = Some(serialize_word_list(words));
        Ok(())
    }
}

/// Process-wide random source for target words.
#[derive(Debug)]
pub struct WordPicker {
    rng: StdRng,
}

impl WordPicker {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn pick(&mut self, words: &[String]) -> Result<String> {
        words
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| TimeMeError::InvalidState("word list is empty".into()))
    }
}

impl Default for WordPicker {
    fn default() -> Self {
        Self::new(None)
    }
}
