use crate::source::{self, TextEncoding};
use kanjigraph_core::{KanjiGraphError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Stroke count reported for characters that are not in the table.
pub const UNKNOWN_STROKES: u32 = 99;

/// One of the 214 Kangxi radicals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadicalEntry {
    pub number: u32,
    pub char: String,
    pub strokes: u32,
    pub en: String,
    #[serde(default)]
    pub kana: String,
    #[serde(default)]
    pub romaji: String,
}

/// Criteria for [`RadicalTable::lookup`]; unset fields match anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadicalQuery<'a> {
    pub char: Option<&'a str>,
    pub en: Option<&'a str>,
}

impl<'a> RadicalQuery<'a> {
    pub fn by_char(c: &'a str) -> Self {
        Self {
            char: Some(c),
            ..Self::default()
        }
    }

    pub fn by_en(en: &'a str) -> Self {
        Self {
            en: Some(en),
            ..Self::default()
        }
    }

    fn matches(&self, entry: &RadicalEntry) -> bool {
        self.char.map_or(true, |c| entry.char == c) && self.en.map_or(true, |en| entry.en == en)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RadicalTable {
    entries: Vec<RadicalEntry>,
}

impl RadicalTable {
    /// Parses JSON lines, one radical object per line.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry: RadicalEntry = serde_json::from_str(line).map_err(|e| {
                KanjiGraphError::Dictionary(format!("radical line {}: {}", lineno + 1, e))
            })?;
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let table = Self::parse(&source::read_text(path, TextEncoding::Utf8)?)?;
        info!("Loaded {} radicals from {:?}", table.len(), path);
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, query: RadicalQuery<'_>) -> Vec<&RadicalEntry> {
        self.entries.iter().filter(|e| query.matches(e)).collect()
    }

    pub fn english_name(&self, c: &str) -> &str {
        self.lookup(RadicalQuery::by_char(c))
            .first()
            .map_or("", |e| e.en.as_str())
    }

    pub fn strokes(&self, c: &str) -> u32 {
        self.lookup(RadicalQuery::by_char(c))
            .first()
            .map_or(UNKNOWN_STROKES, |e| e.strokes)
    }
}
