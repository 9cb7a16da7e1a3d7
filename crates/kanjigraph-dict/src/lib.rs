pub mod chise;
pub mod heisig;
pub mod kanjidic;
pub mod krad;
pub mod radicals;
pub mod search;
pub mod source;

pub use chise::IdsTable;
pub use heisig::{HeisigEntry, HeisigTable};
pub use kanjidic::{KanjiDic, KanjiEntry};
pub use krad::RadicalIndex;
pub use radicals::{RadicalEntry, RadicalQuery, RadicalTable};
pub use search::{Dictionaries, QueryHit, RadicalLabel};
pub use source::{read_text, TextEncoding};
