//! Single-flight credential renewal against the backend's renewal endpoint.

// crates.io
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
// self
use crate::{
	_prelude::*,
	auth::Credential,
	events::SessionEvents,
	http::HttpClient,
	obs::{self, StageKind, StageOutcome, StageSpan},
	renew::{RenewalGrant, RenewalMetrics, RenewalRequest, SingleFlight},
	store::SessionStore,
};

/// Obtains fresh access credentials, never issuing more than one renewal request
/// concurrently regardless of how many callers need one at the same moment.
///
/// Clones share the in-flight state, so a gateway and its clones count as one caller
/// population for the single-flight guarantee.
#[derive(Clone)]
pub struct Renewer {
	inner: Arc<RenewerInner>,
}
struct RenewerInner {
	http_client: HttpClient,
	store: Arc<dyn SessionStore>,
	endpoint: Url,
	events: SessionEvents,
	flight: SingleFlight<Option<Credential>>,
	metrics: RenewalMetrics,
}
impl Renewer {
	/// Creates a renewer for the provided renewal endpoint.
	pub fn new(
		http_client: HttpClient,
		store: Arc<dyn SessionStore>,
		endpoint: Url,
		events: SessionEvents,
	) -> Self {
		Self {
			inner: Arc::new(RenewerInner {
				http_client,
				store,
				endpoint,
				events,
				flight: SingleFlight::default(),
				metrics: RenewalMetrics::default(),
			}),
		}
	}

	/// Returns a fresh access credential, or `None` when renewal is impossible or failed.
	///
	/// Without a stored session no network call is made. Concurrent callers adopt the
	/// in-flight attempt and observe its single outcome; the next call after settlement
	/// starts a fresh attempt. Failures (transport, non-success status, malformed body,
	/// persist rejection) all resolve to `None` — renewal never errors.
	pub async fn refresh(&self) -> Option<Credential> {
		const KIND: StageKind = StageKind::Renew;

		let span = StageSpan::new(KIND, "refresh");

		obs::record_stage_outcome(KIND, StageOutcome::Attempt);
		self.inner.metrics.record_attempt();

		let result = span.instrument(self.refresh_inner()).await;

		if result.is_some() {
			obs::record_stage_outcome(KIND, StageOutcome::Success);
			self.inner.metrics.record_success();
		} else {
			obs::record_stage_outcome(KIND, StageOutcome::Failure);
			self.inner.metrics.record_failure();
		}

		result
	}

	/// Returns the renewal counters shared by every clone of this renewer.
	pub fn metrics(&self) -> &RenewalMetrics {
		&self.inner.metrics
	}

	async fn refresh_inner(&self) -> Option<Credential> {
		self.inner.store.load()?;

		let inner = self.inner.clone();
		// The slot is installed before the attempt is first polled; callers that observe
		// an expired credential while it is pending join this attempt instead of leading
		// their own.
		let attempt = self.inner.flight.join_or_lead(move || async move {
			let outcome = renew_once(&inner).await;

			inner.flight.settle();

			outcome
		});

		attempt.await
	}
}
impl Debug for Renewer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Renewer").field("endpoint", &self.inner.endpoint).finish()
	}
}

/// One renewal exchange: read the session, call the endpoint, persist the rotation,
/// announce the change.
async fn renew_once(inner: &RenewerInner) -> Option<Credential> {
	let current = inner.store.load()?;
	let payload =
		serde_json::to_vec(&RenewalRequest { refresh: current.refresh_token.clone() }).ok()?;
	let response = inner
		.http_client
		.post(inner.endpoint.clone())
		.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
		.header(ACCEPT, HeaderValue::from_static("application/json"))
		.body(payload)
		.send()
		.await
		.ok()?;

	if !response.status().is_success() {
		return None;
	}

	let bytes = response.bytes().await.ok()?;
	let grant = serde_json::from_slice::<RenewalGrant>(&bytes).ok()?;
	let rotated = current.rotated(grant.access, grant.refresh);
	let access = rotated.access_token.clone();

	inner.store.persist(rotated).ok()?;
	inner.events.announce();

	Some(access)
}
