use crate::source::{self, TextEncoding};
use kanjigraph_core::{Kanji, KanjiGraphError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

pub const KANJI_COLUMN: &str = "kanji";
pub const KEYWORD_COLUMN: &str = "keyword5th-ed";
pub const LESSON_COLUMN: &str = "lessonnumber";
pub const FRAME_COLUMN: &str = "framenum5th-ed";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeisigEntry {
    pub kanji: Kanji,
    pub keyword: String,
    pub lesson: Option<String>,
    pub frame: Option<u32>,
    /// Every column of the row, including the ones above
    pub fields: BTreeMap<String, String>,
}

/// Heisig keywords and lessons keyed by kanji and by keyword.
#[derive(Debug, Clone, Default)]
pub struct HeisigTable {
    entries: Vec<HeisigEntry>,
    by_kanji: HashMap<Kanji, usize>,
    by_keyword: HashMap<String, usize>,
}

impl HeisigTable {
    /// Parses the `:`-separated table. The first line is a banner and the
    /// second holds the column names.
    pub fn parse(text: &str) -> Result<Self> {
        let body: String = source::body_lines(text)
            .flat_map(|line| [line, "\n"])
            .collect();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b':')
            .flexible(true)
            .has_headers(true)
            .from_reader(body.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        for required in [KANJI_COLUMN, KEYWORD_COLUMN] {
            if !headers.iter().any(|h| h == required) {
                return Err(KanjiGraphError::Dictionary(format!(
                    "heisig table is missing the {:?} column",
                    required
                )));
            }
        }

        let mut table = Self::default();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let fields: BTreeMap<String, String> = headers
                .iter()
                .cloned()
                .zip(record.iter().map(|v| v.trim().to_string()))
                .collect();

            let kanji = fields.get(KANJI_COLUMN).cloned().unwrap_or_default();
            if kanji.is_empty() {
                warn!(row, "skipping heisig row without a kanji");
                continue;
            }
            let entry = HeisigEntry {
                keyword: fields.get(KEYWORD_COLUMN).cloned().unwrap_or_default(),
                lesson: fields.get(LESSON_COLUMN).filter(|s| !s.is_empty()).cloned(),
                frame: fields.get(FRAME_COLUMN).and_then(|s| s.parse().ok()),
                kanji,
                fields,
            };
            table.insert(entry);
        }
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let table = Self::parse(&source::read_text(path, TextEncoding::Utf8)?)?;
        info!("Loaded {} heisig entries from {:?}", table.len(), path);
        Ok(table)
    }

    fn insert(&mut self, entry: HeisigEntry) {
        let idx = self.entries.len();
        self.by_kanji.insert(entry.kanji.clone(), idx);
        if !entry.keyword.is_empty() {
            self.by_keyword.insert(entry.keyword.clone(), idx);
        }
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, kanji: &str) -> Option<&HeisigEntry> {
        self.by_kanji.get(kanji).map(|&i| &self.entries[i])
    }

    pub fn keyword(&self, kanji: &str) -> Option<&str> {
        self.get(kanji)
            .map(|e| e.keyword.as_str())
            .filter(|k| !k.is_empty())
    }

    pub fn from_keyword(&self, keyword: &str) -> Option<&str> {
        self.by_keyword
            .get(keyword)
            .map(|&i| self.entries[i].kanji.as_str())
    }

    /// Kanji of one lesson, in table order. A kanji listed on several rows
    /// belongs to the lesson of its last row.
    pub fn lesson(&self, lesson: &str) -> Vec<&str> {
        let lesson = lesson.trim();
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, e)| self.by_kanji.get(&e.kanji) == Some(i))
            .filter(|(_, e)| e.lesson.as_deref() == Some(lesson))
            .map(|(_, e)| e.kanji.as_str())
            .collect()
    }

    /// Maps a keyword to its kanji; anything else is returned unchanged.
    pub fn resolve<'a>(&'a self, input: &'a str) -> &'a str {
        self.from_keyword(input).unwrap_or(input)
    }
}
