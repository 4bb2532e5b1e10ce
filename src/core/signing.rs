//! Request signing: the id/timestamp obfuscation and the wire body quirk
//! expected by the mobile JSON-RPC endpoint.
//!
//! The arithmetic here reproduces what the official iOS client sends. The
//! endpoint silently rejects requests that deviate, so the formulas must
//! stay exactly as written.

use tracing::debug;

use crate::core::errors::Result;
use crate::core::models::{
    PayloadLang, PayloadParams, PayloadText, SignedPayload, TranslationRequest, RPC_METHOD,
};
use crate::core::random::RandomSource;

/// Lowest id seed, before scaling
pub const ID_SEED_MIN: u64 = 8_300_000;

/// Highest id seed, before scaling
pub const ID_SEED_MAX: u64 = 8_399_998;

/// Factor applied to the seed to obtain the request id
pub const ID_SCALE: u64 = 1000;

/// Upper bound for requested alternatives
pub const MAX_ALTERNATIVES: i64 = 3;

const METHOD_KEY: &str = "\"method\":\"";
const METHOD_KEY_SPACED: &str = "\"method\" : \"";
const METHOD_KEY_TRAILING: &str = "\"method\": \"";

/// Count of literal lowercase `i` characters in the text
pub fn i_count(text: &str) -> u64 {
    text.chars().filter(|&c| c == 'i').count() as u64
}

/// Draw a fresh request id
pub fn request_id(random: &dyn RandomSource) -> u64 {
    random.next_in_range(ID_SEED_MIN..=ID_SEED_MAX) * ID_SCALE
}

/// Derive the signed timestamp from epoch milliseconds and the i-count
pub fn timestamp(ts: i64, i_count: u64) -> i64 {
    if i_count == 0 {
        return ts;
    }
    let n = i_count as i64 + 1;
    ts - ts.rem_euclid(n) + n
}

/// Clamp the requested alternative count to what the endpoint accepts
pub fn clamp_alternatives(count: i64) -> u8 {
    count.clamp(0, MAX_ALTERNATIVES) as u8
}

/// Whether the id selects the `"method" : "` spelling
pub fn uses_spaced_method(id: u64) -> bool {
    (id + 5) % 29 == 0 || (id + 3) % 13 == 0
}

/// Rewrite the first `"method":"` occurrence according to the id
pub fn rewrite_method_key(json: &str, id: u64) -> String {
    let replacement = if uses_spaced_method(id) {
        METHOD_KEY_SPACED
    } else {
        METHOD_KEY_TRAILING
    };
    json.replacen(METHOD_KEY, replacement, 1)
}

/// Assemble the JSON-RPC envelope for a request
pub fn build_payload(request: &TranslationRequest, id: u64, timestamp: i64) -> SignedPayload {
    SignedPayload {
        jsonrpc: "2.0",
        method: RPC_METHOD,
        id,
        params: PayloadParams {
            texts: vec![PayloadText {
                text: request.text.clone(),
                request_alternatives: clamp_alternatives(request.alternative_count),
            }],
            splitting: "newlines",
            lang: PayloadLang {
                source_lang_user_selected: request.source_lang.to_uppercase(),
                target_lang: request.target_lang.to_uppercase(),
            },
            timestamp,
        },
    }
}

/// Serialize the envelope and apply the method key rewrite
pub fn sign(payload: &SignedPayload) -> Result<String> {
    let canonical = serde_json::to_string(payload)?;
    let spaced = uses_spaced_method(payload.id);
    debug!("Signing payload id={} spaced_method={}", payload.id, spaced);
    Ok(rewrite_method_key(&canonical, payload.id))
}
