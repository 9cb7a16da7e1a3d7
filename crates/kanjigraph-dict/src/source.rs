use flate2::read::GzDecoder;
use kanjigraph_core::{KanjiGraphError, Result};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::warn;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Character encoding of a dictionary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// KANJIDIC and KRADFILE are distributed in EUC-JP
    EucJp,
}

/// Reads a dictionary file, gunzipping it when it carries the gzip magic.
pub fn read_text(path: &Path, encoding: TextEncoding) -> Result<String> {
    let raw = fs::read(path)?;
    let bytes = if raw.starts_with(&GZIP_MAGIC) {
        let mut out = Vec::with_capacity(raw.len() * 4);
        GzDecoder::new(raw.as_slice()).read_to_end(&mut out)?;
        out
    } else {
        raw
    };
    decode(bytes, encoding).map_err(|e| match e {
        KanjiGraphError::Dictionary(msg) => {
            KanjiGraphError::Dictionary(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

pub fn decode(bytes: Vec<u8>, encoding: TextEncoding) -> Result<String> {
    match encoding {
        TextEncoding::Utf8 => String::from_utf8(bytes)
            .map_err(|e| KanjiGraphError::Dictionary(format!("invalid UTF-8: {}", e))),
        TextEncoding::EucJp => {
            let (text, _, had_errors) = encoding_rs::EUC_JP.decode(&bytes);
            if had_errors {
                warn!("EUC-JP input contained undecodable sequences; replaced with U+FFFD");
            }
            Ok(text.into_owned())
        }
    }
}

/// Lines after the first one, which in every supported format is a banner.
pub(crate) fn body_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().skip(1)
}
