//! Outer wrapper of a backup file carrying the Base64 container
//!
//! SecureVault has written three layouts over time. Current backups are a
//! JSON object with a `data` field, older ones used an `f` field, and the
//! oldest are the bare Base64 text. All three are resolved here so the
//! decryption code only ever sees the payload.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// JSON field holding the payload in current backups
pub const DATA_FIELD: &str = "data";
/// JSON field holding the payload in legacy backups
pub const LEGACY_FIELD: &str = "f";

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors extracting the payload from a backup
pub enum EnvelopeError {
    /// The backup is a JSON object without a payload field
    #[error("No 'data' or 'f' field found in backup JSON")]
    MissingPayloadField,
    /// The payload field holds something other than a string
    #[error("Backup field '{0}' is not a string")]
    NonStringPayload(&'static str),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Which layout a backup was stored in
pub enum EnvelopeFormat {
    /// JSON object with a `data` field
    Data,
    /// JSON object with an `f` field
    Legacy,
    /// Bare Base64 text
    Raw,
}

impl EnvelopeFormat {
    /// Wrap a payload in this layout, as the app would write it
    pub fn wrap(self, payload: &str) -> String {
        match self {
            EnvelopeFormat::Data => serde_json::json!({ DATA_FIELD: payload }).to_string(),
            EnvelopeFormat::Legacy => serde_json::json!({ LEGACY_FIELD: payload }).to_string(),
            EnvelopeFormat::Raw => payload.to_string(),
        }
    }
}

impl fmt::Display for EnvelopeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeFormat::Data => write!(f, "'{}' field (new format)", DATA_FIELD),
            EnvelopeFormat::Legacy => write!(f, "'{}' field (legacy format)", LEGACY_FIELD),
            EnvelopeFormat::Raw => write!(f, "raw encrypted data (oldest format)"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
/// A backup's Base64 payload, tagged with the layout it came from
pub enum Envelope {
    /// Payload from the `data` field
    Data(String),
    /// Payload from the `f` field
    Legacy(String),
    /// Whole file, trimmed
    Raw(String),
}

impl Envelope {
    /// Work out the layout of a backup and extract its payload
    ///
    /// Text that is not a JSON object is taken as raw Base64. When both
    /// fields are present `data` wins.
    pub fn detect(text: &str) -> Result<Envelope, EnvelopeError> {
        let object = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => object,
            _ => {
                tracing::debug!("backup is not a JSON object, reading as raw payload");
                return Ok(Envelope::Raw(text.trim().to_string()));
            }
        };

        let (field, value) = if let Some(value) = object.get(DATA_FIELD) {
            (DATA_FIELD, value)
        } else if let Some(value) = object.get(LEGACY_FIELD) {
            (LEGACY_FIELD, value)
        } else {
            return Err(EnvelopeError::MissingPayloadField);
        };
        let payload = value
            .as_str()
            .ok_or(EnvelopeError::NonStringPayload(field))?
            .to_string();
        tracing::debug!(field, length = payload.len(), "found backup payload field");

        Ok(if field == DATA_FIELD {
            Envelope::Data(payload)
        } else {
            Envelope::Legacy(payload)
        })
    }

    /// Layout the payload was found in
    pub fn format(&self) -> EnvelopeFormat {
        match self {
            Envelope::Data(_) => EnvelopeFormat::Data,
            Envelope::Legacy(_) => EnvelopeFormat::Legacy,
            Envelope::Raw(_) => EnvelopeFormat::Raw,
        }
    }

    /// The Base64 container text
    pub fn payload(&self) -> &str {
        match self {
            Envelope::Data(payload) | Envelope::Legacy(payload) | Envelope::Raw(payload) => {
                payload
            }
        }
    }

    /// Take the Base64 container text
    pub fn into_payload(self) -> String {
        match self {
            Envelope::Data(payload) | Envelope::Legacy(payload) | Envelope::Raw(payload) => {
                payload
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = "AQIDBAUGBwgJCgsMDQ4PEA==";

    #[test]
    fn detects_data_field() {
        let envelope = Envelope::detect(r#"{"data": "AQIDBAUGBwgJCgsMDQ4PEA=="}"#).unwrap();
        assert_eq!(envelope, Envelope::Data(PAYLOAD.to_string()));
        assert_eq!(envelope.format(), EnvelopeFormat::Data);
    }

    #[test]
    fn detects_legacy_field() {
        let envelope = Envelope::detect(r#"{"f": "AQIDBAUGBwgJCgsMDQ4PEA==", "v": 2}"#).unwrap();
        assert_eq!(envelope, Envelope::Legacy(PAYLOAD.to_string()));
    }

    #[test]
    fn raw_text_is_trimmed() {
        let envelope = Envelope::detect("  AQIDBAUGBwgJCgsMDQ4PEA==\n").unwrap();
        assert_eq!(envelope, Envelope::Raw(PAYLOAD.to_string()));
    }

    #[test]
    fn data_preferred_over_legacy() {
        let envelope = Envelope::detect(r#"{"f": "other", "data": "AQIDBAUGBwgJCgsMDQ4PEA=="}"#)
            .unwrap();
        assert_eq!(envelope.format(), EnvelopeFormat::Data);
        assert_eq!(envelope.payload(), PAYLOAD);
    }

    #[test]
    fn escaped_characters_are_unescaped() {
        let envelope =
            Envelope::detect(r#"{"data": "AQIDBAUGBwgJCgsMDQ4PEA\u003d\u003d"}"#).unwrap();
        assert_eq!(envelope.payload(), PAYLOAD);
    }

    #[test]
    fn missing_field_rejected() {
        assert_eq!(
            Envelope::detect(r#"{"version": 3}"#),
            Err(EnvelopeError::MissingPayloadField)
        );
    }

    #[test]
    fn non_string_field_rejected() {
        assert_eq!(
            Envelope::detect(r#"{"data": 12}"#),
            Err(EnvelopeError::NonStringPayload("data"))
        );
    }

    #[test]
    fn non_object_json_is_raw() {
        let envelope = Envelope::detect("1234").unwrap();
        assert_eq!(envelope, Envelope::Raw("1234".to_string()));
    }

    #[test]
    fn wrap_is_detected_as_same_format() {
        for format in [EnvelopeFormat::Data, EnvelopeFormat::Legacy, EnvelopeFormat::Raw] {
            let envelope = Envelope::detect(&format.wrap(PAYLOAD)).unwrap();
            assert_eq!(envelope.format(), format);
            assert_eq!(envelope.into_payload(), PAYLOAD);
        }
    }
}
