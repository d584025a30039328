//! Best-effort expiry probe for JWT-shaped access credentials.
//!
//! The access layer itself treats credentials as opaque and reacts to `401` responses;
//! this helper lets callers that know their backend issues JWTs discard a session
//! client-side before issuing a request that is bound to fail.

// std
use std::time::{SystemTime, UNIX_EPOCH};
// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{_prelude::*, auth::Credential};

#[derive(Deserialize)]
struct Claims {
	#[serde(default)]
	exp: Option<i64>,
}

/// Returns `true` when the credential carries an `exp` claim at or before `now_unix`.
///
/// Anything that does not decode as a JWT payload counts as expired; a decodable
/// payload without an `exp` claim counts as valid.
pub fn is_expired_at(credential: &Credential, now_unix: i64) -> bool {
	let payload = match credential.expose().split('.').nth(1) {
		Some(part) if !part.is_empty() => part,
		_ => return true,
	};
	let bytes = match URL_SAFE_NO_PAD.decode(payload) {
		Ok(bytes) => bytes,
		Err(_) => return true,
	};
	let claims = match serde_json::from_slice::<Claims>(&bytes) {
		Ok(claims) => claims,
		Err(_) => return true,
	};

	match claims.exp {
		Some(exp) => exp <= now_unix,
		None => false,
	}
}

/// Convenience helper that probes against the current system clock.
pub fn is_expired(credential: &Credential) -> bool {
	let now_unix = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|elapsed| elapsed.as_secs() as i64)
		.unwrap_or_default();

	is_expired_at(credential, now_unix)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn jwt_with_payload(payload: &str) -> Credential {
		Credential::new(format!("header.{}.signature", URL_SAFE_NO_PAD.encode(payload)))
	}

	#[test]
	fn expired_and_live_claims_compare_against_the_probe_instant() {
		let credential = jwt_with_payload(r#"{"exp":1000}"#);

		assert!(is_expired_at(&credential, 1000));
		assert!(is_expired_at(&credential, 2000));
		assert!(!is_expired_at(&credential, 999));
	}

	#[test]
	fn payloads_without_exp_count_as_valid() {
		let credential = jwt_with_payload(r#"{"sub":"user-1"}"#);

		assert!(!is_expired_at(&credential, i64::MAX));
	}

	#[test]
	fn undecodable_credentials_count_as_expired() {
		assert!(is_expired_at(&Credential::new("opaque-token"), 0));
		assert!(is_expired_at(&Credential::new("a..c"), 0));
		assert!(is_expired_at(&Credential::new("a.%%%.c"), 0));

		let garbage = Credential::new(format!("a.{}.c", URL_SAFE_NO_PAD.encode("not json")));

		assert!(is_expired_at(&garbage, 0));
	}
}
