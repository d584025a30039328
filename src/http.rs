//! Thin transport wrapper shared by the gateway and renewer.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

/// Wrapper around [`ReqwestClient`] so shared transport configuration lives in one place.
///
/// The access layer performs no caching and no implicit retries of its own beyond the
/// single credential-renewal retry; timeout policy is whatever the wrapped client was
/// built with.
#[derive(Clone, Debug, Default)]
pub struct HttpClient(pub ReqwestClient);
impl HttpClient {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for HttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for HttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
