//! Share-token issuance.
//!
//! Tokens are cryptographically random, URL-safe, and opaque: 16 bytes from
//! the operating system RNG, rendered as unpadded URL-safe base64 (22
//! characters). There is no structure to enumerate and no relationship
//! between a checklist's public link and its edit token, so knowing one gives
//! no purchase on the other.
//!
//! Issuance is local and infallible. *Global* uniqueness is confirmed by the
//! service layer, which re-issues on collision against the persistence
//! layer's existing tokens (of either kind).

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

use packlist_core::ShareToken;

/// Random bytes per token. 128 bits of entropy.
const TOKEN_BYTES: usize = 16;

/// Issue a fresh share token.
///
/// Safe for concurrent use: every call draws independently from `OsRng`.
#[must_use]
pub fn issue_token() -> ShareToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    ShareToken::new(URL_SAFE_NO_PAD.encode(bytes))
}

/// Issue a (public link, edit token) pair for one checklist.
///
/// The two tokens are issued independently; the loop guarantees they are
/// never equal, which at this entropy only guards against a broken RNG.
#[must_use]
pub fn issue_distinct_pair() -> (ShareToken, ShareToken) {
    let public_link = issue_token();
    loop {
        let edit_token = issue_token();
        if edit_token != public_link {
            return (public_link, edit_token);
        }
        tracing::warn!("issued identical share tokens, reissuing edit token");
    }
}
