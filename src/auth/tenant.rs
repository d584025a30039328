//! Validated identifier for the tenant partition a session is scoped to.

// std
use std::{borrow::Borrow, ops::Deref, str::FromStr};
// self
use crate::_prelude::*;

const TENANT_MAX_LEN: usize = 128;

/// Error returned when tenant identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum TenantIdError {
	/// The identifier was empty.
	#[error("Tenant identifier cannot be empty.")]
	Empty,
	/// The identifier contains a character that cannot travel in a header value.
	#[error("Tenant identifier contains a non-printable or non-ASCII character.")]
	InvalidCharacter,
	/// The identifier exceeded the allowed character count.
	#[error("Tenant identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Identifier selecting which backend data partition a request targets.
///
/// Validation guarantees the value is usable as an HTTP header value as-is.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);
impl TenantId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, TenantIdError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for TenantId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for TenantId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<TenantId> for String {
	fn from(value: TenantId) -> Self {
		value.0
	}
}
impl TryFrom<String> for TenantId {
	type Error = TenantIdError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for TenantId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for TenantId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Tenant({})", self.0)
	}
}
impl Display for TenantId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for TenantId {
	type Err = TenantIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), TenantIdError> {
	if view.is_empty() {
		return Err(TenantIdError::Empty);
	}
	if !view.bytes().all(|b| b.is_ascii_graphic()) {
		return Err(TenantIdError::InvalidCharacter);
	}
	if view.len() > TENANT_MAX_LEN {
		return Err(TenantIdError::TooLong { max: TENANT_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn tenants_validate_on_construction() {
		assert!(TenantId::new("").is_err());
		assert!(TenantId::new("with space").is_err(), "Whitespace must be rejected.");
		assert!(TenantId::new("acmé").is_err(), "Non-ASCII must be rejected.");

		let tenant = TenantId::new("acme-legal").expect("Tenant fixture should be valid.");

		assert_eq!(tenant.as_ref(), "acme-legal");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let tenant: TenantId =
			serde_json::from_str("\"tenant-42\"").expect("Tenant should deserialize successfully.");

		assert_eq!(tenant.as_ref(), "tenant-42");
		assert!(serde_json::from_str::<TenantId>("\"with space\"").is_err());
	}

	#[test]
	fn length_limit_is_exact() {
		let exact = "a".repeat(TENANT_MAX_LEN);

		TenantId::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(TENANT_MAX_LEN + 1);

		assert!(TenantId::new(&too_long).is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<TenantId, u8> = HashMap::from_iter([(
			TenantId::new("acme").expect("Tenant used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("acme"), Some(&7));
	}
}
