//! The persisted credential bundle and its rotation rules.

// self
use crate::{
	_prelude::*,
	auth::{Credential, TenantId},
};

/// Credential bundle persisted for an authenticated operator.
///
/// A session either exists with both credentials populated or does not exist at all;
/// `tenant` may be absent independently (cross-tenant operators). Callers replace the
/// whole bundle — individual fields are never mutated in place.
///
/// Serialized field names match the persisted JSON document. `tenant` defaults when
/// missing so bundles written before a field addition keep loading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	/// Short-lived bearer credential attached to every request.
	#[serde(rename = "accessToken")]
	pub access_token: Credential,
	/// Longer-lived credential used solely to mint new access credentials.
	#[serde(rename = "refreshToken")]
	pub refresh_token: Credential,
	/// Tenant partition the session is scoped to, if any.
	#[serde(default)]
	pub tenant: Option<TenantId>,
}
impl Session {
	/// Creates a bundle from its parts.
	pub fn new(access: Credential, refresh: Credential, tenant: Option<TenantId>) -> Self {
		Self { access_token: access, refresh_token: refresh, tenant }
	}

	/// Produces the bundle that results from a successful renewal.
	///
	/// The access credential is always replaced; the renewal credential is replaced only
	/// when the backend rotated it. Tenant scope carries over unchanged.
	pub fn rotated(self, access: Credential, refresh: Option<Credential>) -> Self {
		Self {
			access_token: access,
			refresh_token: refresh.unwrap_or(self.refresh_token),
			tenant: self.tenant,
		}
	}
}
