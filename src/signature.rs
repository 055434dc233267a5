//! Per-request HMAC authentication for the provider's JSON API.
//!
//! Every outbound call gets a fresh timestamp and nonce; signature material is
//! never cached or reused across requests.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;
use sha2::Sha256;
use url::{Position, Url};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// RFC 3986 unreserved characters pass through; everything else is escaped.
const URL_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Signs outbound requests with the website key / secret key pair.
#[derive(Clone)]
pub struct HmacSigner {
    website_key: String,
    private_key: String,
}

impl HmacSigner {
    pub fn new(website_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            website_key: website_key.into(),
            private_key: private_key.into(),
        }
    }

    /// Authorization header value for one request, with fresh timestamp and
    /// nonce.
    pub fn authorization_header(&self, method: &Method, url: &Url, body: Option<&[u8]>) -> String {
        let timestamp = chrono::Utc::now().timestamp();
        let nonce = hex::encode(Uuid::new_v4().as_bytes());
        self.authorization_header_at(method, url, body, timestamp, &nonce)
    }

    /// Deterministic core of [`authorization_header`]: timestamp and nonce are
    /// caller-supplied so the exact signing string is checkable.
    ///
    /// [`authorization_header`]: Self::authorization_header
    pub fn authorization_header_at(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
        timestamp: i64,
        nonce: &str,
    ) -> String {
        let payload = self.signing_payload(method, url, body, timestamp, nonce);

        let mut mac = HmacSha256::new_from_slice(self.private_key.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        let signature = BASE64.encode(mac.finalize().into_bytes());

        format!(
            "hmac {}:{}:{}:{}",
            self.website_key, signature, nonce, timestamp
        )
    }

    /// Canonical signing string: websiteKey + METHOD + canonicalUrl +
    /// timestamp + nonce + base64(MD5(body)), concatenated without delimiters.
    fn signing_payload(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
        timestamp: i64,
        nonce: &str,
    ) -> String {
        let content_hash = match body {
            Some(bytes) => BASE64.encode(Md5::digest(bytes)),
            None => String::new(),
        };

        format!(
            "{}{}{}{}{}{}",
            self.website_key,
            method.as_str(),
            canonical_url(url),
            timestamp,
            nonce,
            content_hash
        )
    }
}

/// Lowercased percent-encoding of the URL's authority, path and query.
fn canonical_url(url: &Url) -> String {
    let authority_path_query = &url[Position::BeforeHost..Position::AfterQuery];
    utf8_percent_encode(authority_path_query, URL_ESCAPE)
        .to_string()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> HmacSigner {
        HmacSigner::new("website-key", "secret-key")
    }

    #[test]
    fn canonical_url_escapes_and_lowercases_authority_path_and_query() {
        let url = Url::parse("https://Checkout.Buckaroo.nl/json/Transaction?A=B").unwrap();
        assert_eq!(
            canonical_url(&url),
            "checkout.buckaroo.nl%2fjson%2ftransaction%3fa%3db"
        );
    }

    #[test]
    fn canonical_url_keeps_non_default_port() {
        let url = Url::parse("http://127.0.0.1:8080/json/datarequest").unwrap();
        assert_eq!(canonical_url(&url), "127.0.0.1%3a8080%2fjson%2fdatarequest");
    }

    #[test]
    fn signing_payload_concatenates_fields_without_delimiters() {
        let url = Url::parse("https://example.test/json/transaction").unwrap();
        let payload =
            signer().signing_payload(&Method::POST, &url, Some(b"{}"), 1700000000, "abcdef");

        let content_hash = BASE64.encode(Md5::digest(b"{}"));
        assert_eq!(
            payload,
            format!(
                "website-keyPOSTexample.test%2fjson%2ftransaction1700000000abcdef{}",
                content_hash
            )
        );
    }

    #[test]
    fn empty_body_hashes_to_empty_string() {
        let url = Url::parse("https://example.test/json/datarequest").unwrap();
        let payload = signer().signing_payload(&Method::POST, &url, None, 1700000000, "abcdef");
        assert!(payload.ends_with("1700000000abcdef"));
    }

    #[test]
    fn header_is_deterministic_for_fixed_inputs() {
        let url = Url::parse("https://example.test/json/transaction").unwrap();
        let a = signer().authorization_header_at(&Method::POST, &url, Some(b"{}"), 1700000000, "n1");
        let b = signer().authorization_header_at(&Method::POST, &url, Some(b"{}"), 1700000000, "n1");
        assert_eq!(a, b);
    }

    #[test]
    fn header_carries_scheme_and_colon_delimited_credentials() {
        let url = Url::parse("https://example.test/json/transaction").unwrap();
        let header =
            signer().authorization_header_at(&Method::POST, &url, Some(b"{}"), 1700000000, "n1");

        let credentials = header.strip_prefix("hmac ").unwrap();
        let parts: Vec<&str> = credentials.split(':').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "website-key");
        assert_eq!(parts[2], "n1");
        assert_eq!(parts[3], "1700000000");
    }

    #[test]
    fn any_single_input_change_changes_the_signature() {
        let url = Url::parse("https://example.test/json/transaction").unwrap();
        let other_url = Url::parse("https://example.test/json/datarequest").unwrap();
        let s = signer();

        let base = s.authorization_header_at(&Method::POST, &url, Some(b"{}"), 1700000000, "n1");
        let variants = [
            s.authorization_header_at(&Method::GET, &url, Some(b"{}"), 1700000000, "n1"),
            s.authorization_header_at(&Method::POST, &other_url, Some(b"{}"), 1700000000, "n1"),
            s.authorization_header_at(&Method::POST, &url, Some(b"{ }"), 1700000000, "n1"),
            s.authorization_header_at(&Method::POST, &url, Some(b"{}"), 1700000001, "n1"),
            s.authorization_header_at(&Method::POST, &url, Some(b"{}"), 1700000000, "n2"),
        ];
        for variant in variants {
            assert_ne!(base, variant);
        }
    }

    #[test]
    fn fresh_material_differs_per_call() {
        let url = Url::parse("https://example.test/json/transaction").unwrap();
        let s = signer();
        let a = s.authorization_header(&Method::POST, &url, Some(b"{}"));
        let b = s.authorization_header(&Method::POST, &url, Some(b"{}"));
        // Nonces are random per call, so the credentials can never repeat.
        assert_ne!(a, b);
    }
}
