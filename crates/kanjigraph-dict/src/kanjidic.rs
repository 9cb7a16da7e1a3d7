//! KANJIDIC: one kanji per line with its JIS code, coded fields, readings
//! and `{english meanings}`.
//!
//! Field codes worth knowing:
//! `U` Unicode, `N` Nelson index, `B`/`C` Nelson and classical radical,
//! `S` stroke count (later `S` fields list common miscounts), `G` school
//! grade, `H` Halpern index, `F` frequency rank, `P` SKIP code, `L` Heisig
//! index, `Q` four-corner code, `MN`/`MP` Morohashi index and page.

use crate::source::{self, TextEncoding};
use kanjigraph_core::{Kanji, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

const MULTI_LETTER_CODES: [&str; 2] = ["MN", "MP"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanjiEntry {
    pub kanji: Kanji,
    pub jis_code: String,
    pub fields: BTreeMap<String, Vec<String>>,
    pub readings: Vec<String>,
    pub meanings: Vec<String>,
}

impl KanjiEntry {
    /// First value recorded for a field code.
    pub fn field(&self, code: &str) -> Option<&str> {
        self.fields
            .get(code)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    pub fn strokes(&self) -> Option<u32> {
        self.field("S").and_then(|s| s.parse().ok())
    }
}

/// Splits on spaces but keeps `{...}` groups whole.
fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = line.trim();
    while !rest.is_empty() {
        let end = if rest.starts_with('{') {
            rest.find('}').map_or(rest.len(), |i| i + 1)
        } else {
            rest.find(' ').unwrap_or(rest.len())
        };
        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    tokens
}

fn field_code(token: &str) -> Option<(&str, &str)> {
    if !token.starts_with(|c: char| c.is_ascii_uppercase()) {
        return None;
    }
    if let Some(code) = MULTI_LETTER_CODES.iter().find(|c| token.starts_with(**c)) {
        return Some(token.split_at(code.len()));
    }
    Some(token.split_at(1))
}

pub fn parse_line(line: &str) -> Option<KanjiEntry> {
    let tokens = tokenize(line);
    let (kanji, jis_code) = match tokens.as_slice() {
        [kanji, jis, ..] => (kanji.to_string(), jis.to_string()),
        _ => return None,
    };

    let mut entry = KanjiEntry {
        kanji,
        jis_code,
        fields: BTreeMap::new(),
        readings: Vec::new(),
        meanings: Vec::new(),
    };
    for token in &tokens[2..] {
        if let Some(meaning) = token.strip_prefix('{') {
            let meaning = meaning.strip_suffix('}').unwrap_or(meaning).trim();
            if !meaning.is_empty() {
                entry.meanings.push(meaning.to_string());
            }
        } else if let Some((code, value)) = field_code(token) {
            entry
                .fields
                .entry(code.to_string())
                .or_default()
                .push(value.to_string());
        } else {
            entry.readings.push(token.to_string());
        }
    }
    Some(entry)
}

#[derive(Debug, Clone, Default)]
pub struct KanjiDic {
    entries: HashMap<Kanji, KanjiEntry>,
    by_meaning: HashMap<String, Vec<Kanji>>,
}

impl KanjiDic {
    pub fn parse(text: &str) -> Self {
        let mut dic = Self::default();
        for (lineno, line) in source::body_lines(text).enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Some(entry) => dic.insert(entry),
                None => warn!(line = lineno + 2, "skipping malformed kanjidic line"),
            }
        }
        dic
    }

    pub fn load(path: &Path) -> Result<Self> {
        let dic = Self::parse(&source::read_text(path, TextEncoding::EucJp)?);
        info!("Loaded {} kanjidic entries from {:?}", dic.len(), path);
        Ok(dic)
    }

    fn insert(&mut self, entry: KanjiEntry) {
        for meaning in &entry.meanings {
            self.by_meaning
                .entry(meaning.clone())
                .or_default()
                .push(entry.kanji.clone());
        }
        self.entries.insert(entry.kanji.clone(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, kanji: &str) -> Option<&KanjiEntry> {
        self.entries.get(kanji)
    }

    /// First English meaning, or `""`.
    pub fn meaning(&self, kanji: &str) -> &str {
        self.get(kanji)
            .and_then(|e| e.meanings.first())
            .map_or("", String::as_str)
    }

    pub fn strokes(&self, kanji: &str) -> Option<u32> {
        self.get(kanji).and_then(KanjiEntry::strokes)
    }

    /// Kanji listing `word` among their meanings.
    pub fn with_meaning(&self, word: &str) -> &[Kanji] {
        self.by_meaning
            .get(word)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "語 386C U8a9e N4358 B149 G2 S14 S13 F301 P1-7-7 L347 Q0166.1 MN35616 MP10.0481 ゴ かた.る かた.らう {word} {speech} {to tell a story}";

    #[test]
    fn parses_codes_readings_and_meanings() {
        let e = parse_line(LINE).unwrap();
        assert_eq!(e.kanji, "語");
        assert_eq!(e.jis_code, "386C");
        assert_eq!(e.field("U"), Some("8a9e"));
        assert_eq!(e.field("MN"), Some("35616"));
        assert_eq!(e.field("MP"), Some("10.0481"));
        assert_eq!(e.fields["S"], vec!["14", "13"]);
        assert_eq!(e.strokes(), Some(14));
        assert_eq!(e.readings, vec!["ゴ", "かた.る", "かた.らう"]);
        assert_eq!(e.meanings, vec!["word", "speech", "to tell a story"]);
    }

    #[test]
    fn table_skips_banner_and_indexes_meanings() {
        let text = format!("# KANJIDIC banner\n{}\n口 387D U53e3 S3 コウ くち {{mouth}}\n", LINE);
        let dic = KanjiDic::parse(&text);
        assert_eq!(dic.len(), 2);
        assert_eq!(dic.meaning("口"), "mouth");
        assert_eq!(dic.meaning("木"), "");
        assert_eq!(dic.strokes("口"), Some(3));
        assert_eq!(dic.with_meaning("speech"), ["語".to_string()]);
        assert!(dic.with_meaning("tell").is_empty());
    }

    #[test]
    fn short_lines_are_rejected() {
        assert!(parse_line("語").is_none());
    }
}
