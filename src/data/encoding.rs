use std::borrow::Cow;
use std::fmt;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

use super::error::EncodingError;

// ---------------------------------------------------------------------------
// Candidate encodings
// ---------------------------------------------------------------------------

/// A text encoding the probe can try. `Iso8859_1` and `Latin1` are the same
/// code page; both are listed so the probe order matches the usual
/// "utf-8, ISO-8859-1, latin1, cp1252, utf-16" retry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Iso8859_1,
    Latin1,
    Windows1252,
    Utf16,
}

impl TextEncoding {
    /// Default probe order.
    pub const CANDIDATES: [TextEncoding; 5] = [
        TextEncoding::Utf8,
        TextEncoding::Iso8859_1,
        TextEncoding::Latin1,
        TextEncoding::Windows1252,
        TextEncoding::Utf16,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Iso8859_1 => "ISO-8859-1",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Windows1252 => "cp1252",
            TextEncoding::Utf16 => "utf-16",
        }
    }

    /// Strictly decode `bytes`. Returns `None` on malformed input.
    ///
    /// * UTF-8 declines input that looks like BOM-less UTF-16
    /// * the single-byte code pages decline implausible text
    ///   (see [`is_plausible_text`])
    /// * UTF-16 needs a BOM or the NUL layout of [`sniff_utf16`]
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        let text: Cow<'_, str> = match self {
            TextEncoding::Utf8 => {
                let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                if sniff_utf16(body).is_some() {
                    return None;
                }
                UTF_8.decode_without_bom_handling_and_without_replacement(body)?
            }
            TextEncoding::Iso8859_1 | TextEncoding::Latin1 => {
                single_byte(encoding_rs::mem::decode_latin1(bytes))?
            }
            TextEncoding::Windows1252 => single_byte(
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)?,
            )?,
            TextEncoding::Utf16 => {
                // The BOM only selects byte order.
                let (encoding, body) = match bytes {
                    [0xFE, 0xFF, rest @ ..] => (UTF_16BE, rest),
                    [0xFF, 0xFE, rest @ ..] => (UTF_16LE, rest),
                    _ => (sniff_utf16(bytes)?, bytes),
                };
                encoding.decode_without_bom_handling_and_without_replacement(body)?
            }
        };
        Some(text.into_owned())
    }
}

fn single_byte(text: Cow<'_, str>) -> Option<Cow<'_, str>> {
    is_plausible_text(&text).then_some(text)
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Single-byte decodes containing NUL or C1 control characters are treated
/// as failed. Those code pages accept every byte sequence, so without this
/// check UTF-16 input or cp1252-only characters would be claimed by
/// ISO-8859-1.
pub fn is_plausible_text(text: &str) -> bool {
    !text
        .chars()
        .any(|c| c == '\0' || ('\u{80}'..='\u{9f}').contains(&c))
}

/// Byte order of BOM-less UTF-16, judged by where the NULs fall. Text in
/// the ASCII range leaves a zero high byte in at least half the code units;
/// anything else is not treated as UTF-16.
pub fn sniff_utf16(bytes: &[u8]) -> Option<&'static Encoding> {
    if bytes.len() < 2 || bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes.len() / 2;
    let (even, odd) = bytes
        .chunks_exact(2)
        .fold((0usize, 0usize), |(even, odd), pair| {
            (even + usize::from(pair[0] == 0), odd + usize::from(pair[1] == 0))
        });

    if odd * 2 >= units && odd > even {
        Some(UTF_16LE)
    } else if even * 2 >= units && even > odd {
        Some(UTF_16BE)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// EncodingProbe
// ---------------------------------------------------------------------------

/// Tries a fixed, ordered list of encodings; first success wins.
#[derive(Debug, Clone)]
pub struct EncodingProbe {
    candidates: Vec<TextEncoding>,
}

impl Default for EncodingProbe {
    fn default() -> Self {
        Self::new(TextEncoding::CANDIDATES.to_vec())
    }
}

impl EncodingProbe {
    pub fn new(candidates: Vec<TextEncoding>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[TextEncoding] {
        &self.candidates
    }

    /// Decode with the first candidate that succeeds.
    pub fn decode(&self, bytes: &[u8]) -> Result<(TextEncoding, String), EncodingError> {
        self.decodings(bytes)
            .next()
            .ok_or(EncodingError::AllCandidatesFailed)
    }

    /// Lazily yield every successful decoding, in candidate order. Readers
    /// use this to fall through to the next encoding when parsing fails.
    pub fn decodings<'a>(
        &'a self,
        bytes: &'a [u8],
    ) -> impl Iterator<Item = (TextEncoding, String)> + 'a {
        self.candidates.iter().filter_map(move |&enc| {
            let decoded = enc.decode(bytes);
            if decoded.is_none() {
                log::debug!("decoding as {enc} failed");
            }
            decoded.map(|text| (enc, text))
        })
    }
}
