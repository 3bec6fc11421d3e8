//! Decrypted vault contents

use serde_json::Value;

#[derive(Debug, PartialEq, Clone)]
/// Plaintext recovered from a backup
///
/// SecureVault stores its password entries as a JSON array. Plaintext that
/// is not JSON at all is still kept so it can be inspected.
pub enum Vault {
    /// Parsed JSON document
    Json(Value),
    /// Plaintext that could not be parsed as JSON
    Text(String),
}

impl Vault {
    /// Parse decrypted plaintext
    pub fn parse(plaintext: &str) -> Vault {
        match serde_json::from_str(plaintext) {
            Ok(value) => Vault::Json(value),
            Err(e) => {
                tracing::debug!(error = %e, "decrypted vault is not JSON");
                Vault::Text(plaintext.to_string())
            }
        }
    }

    /// Number of password entries, when the vault is a JSON array
    pub fn entry_count(&self) -> Option<usize> {
        match self {
            Vault::Json(Value::Array(entries)) => Some(entries.len()),
            _ => None,
        }
    }

    /// Password entries, when the vault is a JSON array
    pub fn entries(&self) -> Option<&[Value]> {
        match self {
            Vault::Json(Value::Array(entries)) => Some(entries),
            _ => None,
        }
    }

    /// Indented JSON, or the plaintext unchanged when it is not JSON
    pub fn pretty(&self) -> String {
        match self {
            // Serializing a `Value` cannot fail
            Vault::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Vault::Text(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_array_has_no_entries() {
        let vault = Vault::parse("[]");
        assert_eq!(vault.entry_count(), Some(0));
        assert_eq!(vault.pretty(), "[]");
    }

    #[test]
    fn counts_entries() {
        let vault = Vault::parse(r#"[{"title":"mail","password":"x"},{"title":"bank"}]"#);
        assert_eq!(vault.entry_count(), Some(2));
        assert_eq!(vault.entries().unwrap()[1]["title"], "bank");
    }

    #[test]
    fn pretty_uses_two_space_indent() {
        let vault = Vault::parse(r#"[{"title":"mail"}]"#);
        assert_eq!(vault.pretty(), "[\n  {\n    \"title\": \"mail\"\n  }\n]");
    }

    #[test]
    fn pretty_keeps_stored_key_order() {
        let vault = Vault::parse(r#"[{"title":"Email","password":"x","id":1}]"#);
        assert_eq!(
            vault.pretty(),
            "[\n  {\n    \"title\": \"Email\",\n    \"password\": \"x\",\n    \"id\": 1\n  }\n]"
        );
    }

    #[test]
    fn object_has_unknown_count() {
        let vault = Vault::parse(r#"{"entries": []}"#);
        assert_eq!(vault.entry_count(), None);
    }

    #[test]
    fn non_json_kept_verbatim() {
        let vault = Vault::parse("not json");
        assert_eq!(vault, Vault::Text("not json".to_string()));
        assert_eq!(vault.entry_count(), None);
        assert_eq!(vault.pretty(), "not json");
    }
}
