//! Telegram login widget signature verification.
//!
//! Telegram signs the login payload with HMAC-SHA256. The key is the SHA-256
//! digest of the bot token; the message is every field except `hash`, rendered
//! as `key=value`, sorted by key and joined with `\n`.

use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TelegramAuthError {
    #[error("login payload has no hash")]
    MissingHash,
    #[error("login hash is not valid hex")]
    MalformedHash,
    #[error("login signature does not match")]
    SignatureMismatch,
}

fn field_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Builds the string Telegram signs.
pub fn data_check_string(fields: &Map<String, Value>) -> String {
    let mut pairs: Vec<(&String, String)> = fields
        .iter()
        .filter(|(key, _)| key.as_str() != "hash")
        .filter_map(|(key, value)| field_value(value).map(|v| (key, v)))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn keyed_mac(bot_token: &str, fields: &Map<String, Value>) -> HmacSha256 {
    let secret = Sha256::digest(bot_token.as_bytes());
    let mut mac = HmacSha256::new_from_slice(&secret).expect("HMAC accepts any key length");
    mac.update(data_check_string(fields).as_bytes());
    mac
}

/// Computes the hex signature Telegram would attach to `fields`.
pub fn sign(fields: &Map<String, Value>, bot_token: &str) -> String {
    hex::encode(keyed_mac(bot_token, fields).finalize().into_bytes())
}

/// Checks the `hash` field of a login payload in constant time.
pub fn verify_login(fields: &Map<String, Value>, bot_token: &str) -> Result<(), TelegramAuthError> {
    let hash = fields
        .get("hash")
        .and_then(Value::as_str)
        .ok_or(TelegramAuthError::MissingHash)?;
    let expected = hex::decode(hash).map_err(|_| TelegramAuthError::MalformedHash)?;

    keyed_mac(bot_token, fields)
        .verify_slice(&expected)
        .map_err(|_| TelegramAuthError::SignatureMismatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TOKEN: &str = "123456:TEST-TOKEN";

    fn login_fields() -> Map<String, Value> {
        let value = json!({
            "id": 7,
            "first_name": "Ann",
            "username": "ann",
            "auth_date": 1700000000,
            "photo_url": null
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_data_check_string_is_sorted_and_skips_hash() {
        let mut fields = login_fields();
        fields.insert("hash".to_string(), json!("abc"));

        assert_eq!(
            data_check_string(&fields),
            "auth_date=1700000000\nfirst_name=Ann\nid=7\nusername=ann"
        );
    }

    #[test]
    fn test_verify_accepts_signed_payload() {
        let mut fields = login_fields();
        let hash = sign(&fields, TOKEN);
        fields.insert("hash".to_string(), json!(hash));

        assert_eq!(verify_login(&fields, TOKEN), Ok(()));
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let mut fields = login_fields();
        let hash = sign(&fields, TOKEN);
        fields.insert("hash".to_string(), json!(hash));
        fields.insert("id".to_string(), json!(8));

        assert_eq!(
            verify_login(&fields, TOKEN),
            Err(TelegramAuthError::SignatureMismatch)
        );
    }

    #[test]
    fn test_verify_rejects_wrong_token() {
        let mut fields = login_fields();
        let hash = sign(&fields, TOKEN);
        fields.insert("hash".to_string(), json!(hash));

        assert_eq!(
            verify_login(&fields, "other-token"),
            Err(TelegramAuthError::SignatureMismatch)
        );
    }

    #[test]
    fn test_verify_requires_hex_hash() {
        let mut fields = login_fields();
        assert_eq!(
            verify_login(&fields, TOKEN),
            Err(TelegramAuthError::MissingHash)
        );

        fields.insert("hash".to_string(), json!("not-hex"));
        assert_eq!(
            verify_login(&fields, TOKEN),
            Err(TelegramAuthError::MalformedHash)
        );
    }
}
