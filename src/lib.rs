//! Authenticated API access layer—bearer injection, single-flight credential renewal,
//! tenant scoping, and error normalization for multi-tenant backends.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod descriptor;
pub mod error;
pub mod events;
pub mod ext;
#[cfg(feature = "reqwest")] pub mod gateway;
#[cfg(feature = "reqwest")] pub mod http;
pub mod obs;
pub mod renew;
#[cfg(feature = "reqwest")] pub mod request;
pub mod response;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{Credential, Session, TenantId},
		descriptor::ApiDescriptor,
		gateway::Gateway,
		http::HttpClient,
		store::{MemoryStore, SessionStore},
	};

	/// Renewal endpoint path wired into descriptors built by [`build_test_gateway`].
	pub const TEST_RENEWAL_PATH: &str = "/auth/refresh/";

	/// Constructs a [`Gateway`] backed by an in-memory store against the provided mock base URL.
	pub fn build_test_gateway(base: &str) -> (Gateway, Arc<MemoryStore>) {
		let descriptor = ApiDescriptor::builder(
			Url::parse(base).expect("Mock base URL should parse successfully."),
		)
		.renewal_path(TEST_RENEWAL_PATH)
		.build()
		.expect("Test descriptor should build successfully.");
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn SessionStore> = store_backend.clone();
		let gateway = Gateway::with_http_client(store, descriptor, HttpClient::default());

		(gateway, store_backend)
	}

	/// Seeds the store with a session fixture.
	pub fn seed_session(store: &MemoryStore, access: &str, refresh: &str, tenant: Option<&str>) {
		let tenant =
			tenant.map(|value| TenantId::new(value).expect("Tenant fixture should be valid."));
		let session = Session::new(Credential::new(access), Credential::new(refresh), tenant);

		store.persist(session).expect("Session fixture should persist successfully.");
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {httpmock as _, session_broker as _};
