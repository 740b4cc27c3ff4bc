// SPDX-License-Identifier: MPL-2.0
//! PKCE verifier/challenge generation (RFC 7636, S256 method).

use crate::application::port::GatewayError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

const VERIFIER_BYTES: usize = 32;

/// A verifier kept locally and the challenge sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

/// Generates a fresh verifier from the OS random source.
pub fn generate() -> Result<PkcePair, GatewayError> {
    let mut random = [0u8; VERIFIER_BYTES];
    getrandom::fill(&mut random)
        .map_err(|e| GatewayError::Auth(format!("random source unavailable: {e}")))?;

    let verifier = URL_SAFE_NO_PAD.encode(random);
    let challenge = challenge_for(&verifier);
    Ok(PkcePair {
        verifier,
        challenge,
    })
}

/// `BASE64URL(SHA256(verifier))` without padding.
#[must_use]
pub fn challenge_for(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}
