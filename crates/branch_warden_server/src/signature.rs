//! Webhook signature verification.
//!
//! GitHub signs every delivery with HMAC-SHA256 over the raw request body
//! and sends the digest in the `X-Hub-Signature-256` header as
//! `sha256=<hex>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;

/// Returns `true` when `signature_header` matches the HMAC-SHA256 of `body`
/// using `secret`.
///
/// Uses a constant-time comparison to prevent timing attacks.
pub fn verify_signature(body: &[u8], signature_header: &str, secret: &[u8]) -> bool {
    let Some(hex_part) = signature_header.strip_prefix("sha256=") else {
        return false;
    };

    let Ok(received_bytes) = hex::decode(hex_part) else {
        return false;
    };

    let mut mac = Hmac::<Sha256>::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(body);

    // `verify_slice` uses constant-time comparison internally.
    mac.verify_slice(&received_bytes).is_ok()
}

/// Computes the `sha256=<hex>` header value for `body`.
///
/// Used by tests to sign synthetic deliveries the way GitHub would.
#[cfg(test)]
pub fn sign(body: &[u8], secret: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}
