use crate::source::{self, TextEncoding};
use kanjigraph_core::{Kanji, Result};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::info;

/// KRADFILE radical decomposition with its inverted index.
#[derive(Debug, Clone, Default)]
pub struct RadicalIndex {
    radicals: HashMap<Kanji, Vec<Kanji>>,
    inverse: HashMap<Kanji, BTreeSet<Kanji>>,
}

impl RadicalIndex {
    /// Parses `kanji : r1 r2 ...` lines; `#` comments and anything else are ignored.
    pub fn parse(text: &str) -> Self {
        let mut index = Self::default();
        for line in text.lines() {
            if line.starts_with('#') {
                continue;
            }
            let Some((kanji, radicals)) = line.split_once(" : ") else {
                continue;
            };
            let radicals: Vec<Kanji> = radicals.split_whitespace().map(str::to_string).collect();
            index.insert(kanji.trim().to_string(), radicals);
        }
        index
    }

    pub fn load(path: &Path) -> Result<Self> {
        let index = Self::parse(&source::read_text(path, TextEncoding::EucJp)?);
        info!("Loaded {} kradfile entries from {:?}", index.len(), path);
        Ok(index)
    }

    fn insert(&mut self, kanji: Kanji, radicals: Vec<Kanji>) {
        for radical in &radicals {
            self.inverse
                .entry(radical.clone())
                .or_default()
                .insert(kanji.clone());
        }
        self.radicals.insert(kanji, radicals);
    }

    pub fn len(&self) -> usize {
        self.radicals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radicals.is_empty()
    }

    pub fn radicals(&self, kanji: &str) -> &[Kanji] {
        self.radicals
            .get(kanji)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Kanji containing every radical in `parts`.
    ///
    /// When nothing matches, the last part is returned on its own so that a
    /// lone radical still yields a hit.
    pub fn search<S: AsRef<str>>(&self, parts: &[S]) -> BTreeSet<Kanji> {
        let Some((last, rest)) = parts.split_last() else {
            return BTreeSet::new();
        };
        let mut candidates = self.inverse.get(last.as_ref()).cloned().unwrap_or_default();
        for part in rest {
            if candidates.is_empty() {
                break;
            }
            match self.inverse.get(part.as_ref()) {
                Some(set) => candidates.retain(|k| set.contains(k)),
                None => candidates.clear(),
            }
        }
        if candidates.is_empty() {
            candidates.insert(last.as_ref().to_string());
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# KRADFILE\n\
# comment line\n\
語 : 言 五 口\n\
吾 : 五 口\n\
唄 : 口 貝\n\
garbage line\n";

    #[test]
    fn parses_entries_and_skips_comments() {
        let idx = RadicalIndex::parse(SAMPLE);
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.radicals("語"), ["言", "五", "口"]);
        assert!(idx.radicals("木").is_empty());
    }

    #[test]
    fn search_intersects_all_parts() {
        let idx = RadicalIndex::parse(SAMPLE);
        let hits = idx.search(&["五", "口"]);
        assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec!["吾", "語"]);
        let hits = idx.search(&["貝"]);
        assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec!["唄"]);
    }

    #[test]
    fn search_without_hits_returns_last_part() {
        let idx = RadicalIndex::parse(SAMPLE);
        let hits = idx.search(&["言", "貝"]);
        assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec!["貝"]);
        assert!(idx.search::<&str>(&[]).is_empty());
    }
}
