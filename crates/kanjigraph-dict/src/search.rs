use crate::radicals::UNKNOWN_STROKES;
use crate::{HeisigTable, IdsTable, KanjiDic, RadicalIndex, RadicalQuery, RadicalTable};
use kanjigraph_core::{DataConfig, Kanji, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadicalLabel {
    pub kanji: Kanji,
    /// English radical name shown above the glyph
    pub ruby: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryHit {
    pub kanji: Kanji,
    pub meaning: String,
    /// CHISE decomposition joined by spaces
    pub parts: String,
    pub radicals: Vec<RadicalLabel>,
}

/// All lookup tables, joined on the kanji character.
#[derive(Debug, Clone, Default)]
pub struct Dictionaries {
    pub heisig: HeisigTable,
    pub kanjidic: KanjiDic,
    pub krad: RadicalIndex,
    pub radicals: RadicalTable,
    pub chise: IdsTable,
}

fn load_or_empty<T: Default>(
    name: &str,
    path: &Path,
    load: impl FnOnce(&Path) -> Result<T>,
) -> Result<T> {
    if !path.exists() {
        warn!("{} not found at {:?}; continuing without it", name, path);
        return Ok(T::default());
    }
    load(path)
}

impl Dictionaries {
    /// Loads every table named in `data`. Missing files yield empty tables;
    /// unreadable or malformed files are errors.
    pub fn load(data: &DataConfig) -> Result<Self> {
        let dicts = Self {
            heisig: load_or_empty("heisig table", &data.heisig_path(), HeisigTable::load)?,
            kanjidic: load_or_empty("kanjidic", &data.kanjidic_path(), KanjiDic::load)?,
            krad: load_or_empty("kradfile", &data.kradfile_path(), RadicalIndex::load)?,
            radicals: load_or_empty("radical table", &data.radicals_path(), RadicalTable::load)?,
            chise: load_or_empty("IDS table", &data.ids_path(), IdsTable::load)?,
        };
        info!(
            heisig = dicts.heisig.len(),
            kanjidic = dicts.kanjidic.len(),
            krad = dicts.krad.len(),
            radicals = dicts.radicals.len(),
            chise = dicts.chise.len(),
            "dictionaries ready"
        );
        Ok(dicts)
    }

    /// Every kanji or radical a query word may stand for, sorted.
    pub fn synset(&self, part: &str) -> Vec<Kanji> {
        let mut candidates: BTreeSet<Kanji> = self
            .radicals
            .lookup(RadicalQuery::by_en(part))
            .into_iter()
            .map(|r| r.char.clone())
            .collect();

        if let Some(kanji) = self.heisig.from_keyword(part) {
            candidates.insert(kanji.to_string());
        }
        candidates.extend(self.kanjidic.with_meaning(part).iter().cloned());

        // A single character may already be a kanji
        if part.chars().count() == 1 {
            candidates.insert(part.to_string());
        }
        candidates.into_iter().collect()
    }

    /// Kanji built from one candidate of every word, via KRADFILE or CHISE.
    pub fn multisearch<S: AsRef<str>>(&self, parts: &[S], max_combinations: usize) -> BTreeSet<Kanji> {
        let synsets: Vec<Vec<Kanji>> = parts
            .iter()
            .map(|p| self.synset(p.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        debug!(?synsets, "query synsets");

        let mut found = BTreeSet::new();
        if synsets.is_empty() {
            return found;
        }

        let total = synsets
            .iter()
            .try_fold(1usize, |acc, s| acc.checked_mul(s.len()))
            .unwrap_or(usize::MAX);
        if total > max_combinations {
            warn!(
                total,
                max_combinations, "query expands to too many combinations; truncating"
            );
        }

        let mut odometer = vec![0usize; synsets.len()];
        let mut combo: Vec<&str> = Vec::with_capacity(synsets.len());
        for _ in 0..total.min(max_combinations) {
            combo.clear();
            combo.extend(odometer.iter().zip(&synsets).map(|(&i, s)| s[i].as_str()));
            found.extend(self.krad.search(&combo));
            found.extend(self.chise.search(&combo));

            for (slot, set) in odometer.iter_mut().zip(&synsets).rev() {
                *slot += 1;
                if *slot < set.len() {
                    break;
                }
                *slot = 0;
            }
        }
        found
    }

    /// Radicals of a kanji, ordered by radical stroke count.
    pub fn radical_labels(&self, kanji: &str) -> Vec<RadicalLabel> {
        let mut radicals: Vec<&Kanji> = self.krad.radicals(kanji).iter().collect();
        radicals.sort_by_key(|r| self.radicals.strokes(r));
        radicals
            .into_iter()
            .map(|r| RadicalLabel {
                kanji: r.clone(),
                ruby: self.radicals.english_name(r).to_string(),
            })
            .collect()
    }

    pub fn hit(&self, kanji: &str) -> QueryHit {
        QueryHit {
            kanji: kanji.to_string(),
            meaning: self.kanjidic.meaning(kanji).to_string(),
            parts: self.chise.decompose(kanji).join(" "),
            radicals: self.radical_labels(kanji),
        }
    }

    /// Free-text kanji search: words are lowercased and split on whitespace,
    /// hits come back ordered by stroke count.
    pub fn query(&self, q: &str, max_combinations: usize) -> Vec<QueryHit> {
        let lowered = q.to_lowercase();
        let parts: Vec<&str> = lowered.split_whitespace().collect();
        info!(?parts, "query");

        let mut hits: Vec<QueryHit> = self
            .multisearch(&parts, max_combinations)
            .iter()
            .map(|k| self.hit(k))
            .collect();
        hits.sort_by_key(|h| {
            self.kanjidic.strokes(&h.kanji).unwrap_or_else(|| {
                debug!(kanji = %h.kanji, "no kanjidic stroke count");
                UNKNOWN_STROKES
            })
        });
        hits
    }
}
