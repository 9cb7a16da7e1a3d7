use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single kanji, primitive or CHISE entity escape such as `&CDP-8BF1;`.
pub type Kanji = String;

/// Which edges a traversal follows.
///
/// An edge `a -> b` reads "`a` is built from `b`", so `Outgoing` walks towards
/// components and `Incoming` walks towards compounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Outgoing,
    Incoming,
    Both,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Outgoing => "outgoing",
            Direction::Incoming => "incoming",
            Direction::Both => "both",
        };
        f.write_str(s)
    }
}

impl FromStr for Direction {
    type Err = crate::KanjiGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outgoing" | "out" => Ok(Direction::Outgoing),
            "incoming" | "in" => Ok(Direction::Incoming),
            "both" | "undirected" => Ok(Direction::Both),
            other => Err(crate::KanjiGraphError::InvalidOperation(format!(
                "unknown direction: {}",
                other
            ))),
        }
    }
}
