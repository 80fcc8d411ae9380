//! Byte-to-text decoding.
//!
//! Raw file or archive-entry bytes are decoded with the encoding named by a
//! [`CharsetDetector`]. When nothing is detected, or the detected label is not
//! a known encoding, [`DEFAULT_ENCODING`] is used. Decoding never fails:
//! malformed sequences are replaced.

use encoding_rs::{Encoding, UTF_8};

use crate::base::constants::DEFAULT_ENCODING;

/// Best-guess charset sniffing over raw bytes.
pub trait CharsetDetector: Send + Sync {
    /// Returns an encoding label (e.g. `"utf-16le"`, `"windows-1252"`), if any.
    fn detect(&self, bytes: &[u8]) -> Option<String>;
}

/// Detects UTF-8 and UTF-16 byte-order marks only.
#[derive(Debug, Clone, Copy, Default)]
pub struct BomDetector;

impl CharsetDetector for BomDetector {
    fn detect(&self, bytes: &[u8]) -> Option<String> {
        Encoding::for_bom(bytes).map(|(encoding, _)| encoding.name().to_string())
    }
}

fn default_encoding() -> &'static Encoding {
    Encoding::for_label(DEFAULT_ENCODING.as_bytes()).unwrap_or(UTF_8)
}

/// Decode `bytes` to text using the detector's guess or the default encoding.
pub fn decode_text(bytes: &[u8], detector: &dyn CharsetDetector) -> String {
    let encoding = match detector.detect(bytes) {
        Some(label) => Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
            tracing::debug!("unsupported charset '{}', using {}", label, DEFAULT_ENCODING);
            default_encoding()
        }),
        None => default_encoding(),
    };
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!("malformed {} input replaced during decoding", used.name());
    }
    text.into_owned()
}
