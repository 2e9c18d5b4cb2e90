use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Name of the query parameter carrying the signature.
pub const DIGEST_PARAM: &str = "epoch_digest";

/// Hex-encoded HMAC-SHA1 of `message` under `key`.
pub fn hmac_sha1_hex(key: &str, message: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Request parameters in the order the processor signs them.
///
/// The digest covers every `key` immediately followed by its `value`, in
/// insertion order, with no separators. Reordering parameters changes the
/// signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedParams {
    pairs: Vec<(&'static str, String)>,
}

impl SignedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.pairs.push((key, value.into()));
        self
    }

    /// The string the digest is computed over.
    pub fn signing_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{key}{value}"))
            .collect()
    }

    pub fn digest(&self, key: &str) -> String {
        hmac_sha1_hex(key, &self.signing_string())
    }

    /// Percent-encoded query string with the digest appended last.
    pub fn to_signed_query(&self, key: &str) -> String {
        let mut query: Vec<String> = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        query.push(format!("{DIGEST_PARAM}={}", self.digest(key)));
        query.join("&")
    }
}
