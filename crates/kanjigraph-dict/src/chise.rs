use crate::source::{self, TextEncoding};
use kanjigraph_core::{Kanji, Result};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Ideographic description characters (⿰, ⿱, ...) only describe layout.
fn is_layout_operator(c: char) -> bool {
    ('\u{2FF0}'..='\u{2FFF}').contains(&c)
}

/// Splits an IDS string into ideographs. `&CDP-8BF1;` style entity
/// escapes stand for glyphs without a code point and stay one token.
pub fn tokenize_ids(ids: &str) -> Vec<Kanji> {
    let mut out = Vec::new();
    let mut rest = ids;
    while let Some(c) = rest.chars().next() {
        if c == '&' {
            if let Some(end) = rest.find(';') {
                out.push(rest[..=end].to_string());
                rest = &rest[end + 1..];
                continue;
            }
        }
        if !is_layout_operator(c) && !c.is_whitespace() {
            out.push(c.to_string());
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// CHISE ideograph decomposition table (`IDS-UCS-*.txt`).
#[derive(Debug, Clone, Default)]
pub struct IdsTable {
    parts: HashMap<Kanji, Vec<Kanji>>,
    inverse: HashMap<Kanji, BTreeSet<Kanji>>,
}

impl IdsTable {
    /// Parses `code<TAB>kanji<TAB>ids` lines after the banner line. Only
    /// the first IDS alternative of a line is used.
    pub fn parse(text: &str) -> Self {
        let mut parts = HashMap::new();
        for line in source::body_lines(text) {
            if line.starts_with(";;") {
                continue;
            }
            let mut cols = line.trim_end().split('\t');
            let (Some(_code), Some(kanji), Some(ids)) = (cols.next(), cols.next(), cols.next())
            else {
                debug!(line, "skipping IDS line without three columns");
                continue;
            };
            let tokens = tokenize_ids(ids);
            if !tokens.is_empty() {
                parts.insert(kanji.to_string(), tokens);
            }
        }

        let mut table = Self {
            parts,
            inverse: HashMap::new(),
        };
        table.build_inverse();
        table
    }

    pub fn load(path: &Path) -> Result<Self> {
        let table = Self::parse(&source::read_text(path, TextEncoding::Utf8)?);
        info!("Loaded {} IDS decompositions from {:?}", table.len(), path);
        Ok(table)
    }

    fn build_inverse(&mut self) {
        let mut inverse: HashMap<Kanji, BTreeSet<Kanji>> = HashMap::new();
        for (kanji, direct) in &self.parts {
            for part in direct.iter().cloned().chain(self.decompose(kanji)) {
                inverse.entry(part).or_default().insert(kanji.clone());
            }
        }
        self.inverse = inverse;
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn contains(&self, kanji: &str) -> bool {
        self.parts.contains_key(kanji)
    }

    /// Decomposes as far as the table allows.
    pub fn decompose(&self, kanji: &str) -> Vec<Kanji> {
        let mut path = HashSet::new();
        let mut out = Vec::new();
        self.decompose_into(kanji, &mut path, &mut out);
        out
    }

    fn decompose_into<'a>(
        &'a self,
        kanji: &'a str,
        path: &mut HashSet<&'a str>,
        out: &mut Vec<Kanji>,
    ) {
        let parts = match self.parts.get(kanji) {
            Some(parts) if path.insert(kanji) => parts,
            _ => {
                out.push(kanji.to_string());
                return;
            }
        };
        if parts.len() == 1 {
            out.push(parts[0].clone());
        } else {
            for part in parts {
                self.decompose_into(part, path, out);
            }
        }
        path.remove(kanji);
    }

    /// Kanji containing every part, directly or after decomposition. A single
    /// part that is itself a known kanji is included in its own result.
    pub fn search<S: AsRef<str>>(&self, parts: &[S]) -> BTreeSet<Kanji> {
        let Some((first, rest)) = parts.split_first() else {
            return BTreeSet::new();
        };
        let mut candidates = self.inverse.get(first.as_ref()).cloned().unwrap_or_default();
        for part in rest {
            match self.inverse.get(part.as_ref()) {
                Some(set) => candidates.retain(|k| set.contains(k)),
                None => candidates.clear(),
            }
        }
        if parts.len() == 1 && self.contains(first.as_ref()) {
            candidates.insert(first.as_ref().to_string());
        }
        candidates
    }
}
