//! `data:` URLs used as inline image sources.
//!
//! [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397)
//!
//! ```text
//! dataurl    := "data:" [ mediatype ] [ ";base64" ] "," data
//! ```

use base64::Engine;
use thiserror::Error;

/// Reasons a `data:` URL can fail to decode.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUrlError {
    /// The string does not start with `data:`.
    #[error("not a data URL")]
    NotDataUrl,
    /// There is no `,` separating the header from the payload.
    #[error("invalid data URL: missing comma")]
    MissingComma,
    /// The base64 payload is malformed.
    #[error("base64 decode error: {0}")]
    Base64(String),
}

/// A parsed `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// The media type, e.g. `image/png`. Empty means `text/plain`.
    pub media_type: &'a str,
    /// Whether the payload carries the `;base64` marker.
    pub base64: bool,
    /// The raw payload after the comma.
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split a `data:` URL into its header fields and payload.
    ///
    /// # Errors
    ///
    /// Returns [`DataUrlError`] if `raw` is not a `data:` URL or has no
    /// payload separator.
    pub fn parse(raw: &'a str) -> Result<Self, DataUrlError> {
        let rest = raw
            .strip_prefix("data:")
            .ok_or(DataUrlError::NotDataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingComma)?;
        let (media_type, base64) = header
            .strip_suffix(";base64")
            .map_or((header, false), |m| (m, true));
        Ok(Self {
            media_type,
            base64,
            payload,
        })
    }

    /// Decode the payload into raw bytes.
    ///
    /// Base64 payloads are decoded with the standard alphabet; anything else
    /// is percent-decoded.
    ///
    /// # Errors
    ///
    /// Returns [`DataUrlError::Base64`] if base64 decoding fails.
    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        if self.base64 {
            base64::engine::general_purpose::STANDARD
                .decode(self.payload.trim())
                .map_err(|e| DataUrlError::Base64(e.to_string()))
        } else {
            Ok(percent_decode(self.payload))
        }
    }
}

/// Whether `s` looks like a `data:` URL.
#[must_use]
pub fn is_data_url(s: &str) -> bool {
    s.starts_with("data:")
}

fn percent_decode(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = s.get(i + 1..i + 3).and_then(|h| u8::from_str_radix(h, 16).ok());
            if let Some(b) = hex {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base64_header() {
        let url = DataUrl::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(url.media_type, "image/png");
        assert!(url.base64);
        assert_eq!(url.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_percent_encoded_payload() {
        let url = DataUrl::parse("data:,a%20b%zz").unwrap();
        assert_eq!(url.media_type, "");
        assert_eq!(url.decode().unwrap(), b"a b%zz");
    }

    #[test]
    fn test_missing_comma() {
        assert_eq!(
            DataUrl::parse("data:image/png;base64").unwrap_err(),
            DataUrlError::MissingComma
        );
    }

    #[test]
    fn test_bad_base64_is_error() {
        let url = DataUrl::parse("data:image/png;base64,@@@").unwrap();
        assert!(matches!(url.decode(), Err(DataUrlError::Base64(_))));
    }
}
