//! Charset resolution from the Content-Type header

use encoding_rs::Encoding;
use serde::Deserialize;

const CHARSET_KEY: &str = "charset=";

/// Labels decoded as ISO-8859-1 proper rather than the WHATWG windows-1252 alias
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso8859_1",
    "iso-ir-100",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
    "csisolatin1",
];

/// Character set a response body is decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyCharset {
    /// ISO-8859-1: every byte becomes the code point of the same value
    Latin1,

    /// Any other encoding known to the WHATWG registry
    Encoding(&'static Encoding),
}

impl BodyCharset {
    /// Looks up a charset label, ignoring case and surrounding whitespace
    pub fn for_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if LATIN1_LABELS
            .iter()
            .any(|latin1| latin1.eq_ignore_ascii_case(trimmed))
        {
            return Some(Self::Latin1);
        }
        Encoding::for_label(trimmed.as_bytes()).map(Self::Encoding)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Encoding(encoding) => encoding.name(),
        }
    }
}

/// How the `charset=` parameter key is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharsetMatch {
    /// Only the literal lowercase `charset=` key is recognised
    #[default]
    Strict,

    /// `Charset=`, `CHARSET=` and other case variants are recognised too
    IgnoreCase,
}

impl From<&'static Encoding> for BodyCharset {
    fn from(encoding: &'static Encoding) -> Self {
        Self::Encoding(encoding)
    }
}

/// Returns the value of the `charset=` parameter of a Content-Type header
///
/// The header is split on `;` and each parameter trimmed. The value is everything
/// after the first `=`, taken literally.
///
/// # Example
///
/// ```
/// use link_tracker::extractor::{charset_parameter, CharsetMatch};
///
/// let value = charset_parameter("text/html; charset=ISO-8859-1", CharsetMatch::Strict);
/// assert_eq!(value, Some("ISO-8859-1"));
/// ```
pub fn charset_parameter(content_type: &str, policy: CharsetMatch) -> Option<&str> {
    content_type
        .split(';')
        .map(str::trim)
        .find(|param| is_charset_key(param, policy))
        .map(|param| &param[CHARSET_KEY.len()..])
}

fn is_charset_key(param: &str, policy: CharsetMatch) -> bool {
    match policy {
        CharsetMatch::Strict => param.starts_with(CHARSET_KEY),
        CharsetMatch::IgnoreCase => param
            .get(..CHARSET_KEY.len())
            .is_some_and(|key| key.eq_ignore_ascii_case(CHARSET_KEY)),
    }
}

/// Picks the encoding for a response body
///
/// # Returns
///
/// * `Ok(BodyCharset)` - The declared charset, or `default` when none is declared
/// * `Err(String)` - The declared charset label is not a known encoding
pub fn resolve_charset(
    content_type: Option<&str>,
    policy: CharsetMatch,
    default: BodyCharset,
) -> Result<BodyCharset, String> {
    let Some(label) = content_type.and_then(|value| charset_parameter(value, policy)) else {
        return Ok(default);
    };

    BodyCharset::for_label(label).ok_or_else(|| label.to_string())
}
