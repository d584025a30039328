//! Gateway coordinating authenticated calls against a single backend descriptor.

pub mod execute;
pub mod renew;

pub use renew::Renewer;

// crates.io
use tokio::sync::broadcast;
// self
use crate::{
	_prelude::*,
	descriptor::ApiDescriptor,
	events::{SessionChanged, SessionEvents},
	http::HttpClient,
	store::SessionStore,
};

/// Coordinates authenticated API calls for one backend.
///
/// The gateway owns the HTTP client, session store, descriptor, renewer, and change
/// announcer so call sites only supply a path and per-request options. Clones share
/// every collaborator, including the renewer's in-flight state.
#[derive(Clone)]
pub struct Gateway {
	/// HTTP client used for every outbound request.
	pub http_client: HttpClient,
	/// Store holding the persisted session bundle.
	pub store: Arc<dyn SessionStore>,
	/// Backend descriptor: base URL, renewal endpoint, tenant header.
	pub descriptor: ApiDescriptor,
	/// Renewer that mints fresh access credentials on expiry.
	pub renewer: Renewer,
	/// Announcer for session replacement events.
	pub events: SessionEvents,
}
impl Gateway {
	/// Creates a gateway with a default reqwest transport.
	pub fn new(store: Arc<dyn SessionStore>, descriptor: ApiDescriptor) -> Self {
		Self::with_http_client(store, descriptor, HttpClient::default())
	}

	/// Creates a gateway that reuses the caller-provided transport.
	pub fn with_http_client(
		store: Arc<dyn SessionStore>,
		descriptor: ApiDescriptor,
		http_client: HttpClient,
	) -> Self {
		let events = SessionEvents::new();
		let renewer = Renewer::new(
			http_client.clone(),
			store.clone(),
			descriptor.renewal.clone(),
			events.clone(),
		);

		Self { http_client, store, descriptor, renewer, events }
	}

	/// Registers a subscriber for session replacement announcements.
	pub fn subscribe(&self) -> broadcast::Receiver<SessionChanged> {
		self.events.subscribe()
	}

	/// Erases the persisted session and announces the change.
	pub fn sign_out(&self) -> Result<()> {
		self.store.remove()?;
		self.events.announce();

		Ok(())
	}
}
impl Debug for Gateway {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway").field("descriptor", &self.descriptor).finish()
	}
}
