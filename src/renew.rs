//! Renewal primitives: the single-flight attempt holder and the renewal wire contract.

mod metrics;

pub use metrics::RenewalMetrics;

// crates.io
use futures::future::{BoxFuture, FutureExt, Shared};
// self
use crate::{_prelude::*, auth::Credential};

/// Cloneable handle to an in-flight attempt; every clone resolves to the same outcome.
pub type SharedAttempt<T> = Shared<BoxFuture<'static, T>>;

/// Single-slot holder that collapses concurrent operations into one shared attempt.
///
/// The slot is populated synchronously, before the attempt future has been polled, so
/// every caller arriving while an attempt is pending adopts it instead of starting its
/// own. The owner clears the slot at settlement via [`settle`](Self::settle); until
/// then, late arrivals keep joining the same attempt.
pub struct SingleFlight<T>(Mutex<Option<SharedAttempt<T>>>);
impl<T> Default for SingleFlight<T> {
	fn default() -> Self {
		Self(Mutex::new(None))
	}
}
impl<T> SingleFlight<T>
where
	T: 'static + Clone + Send,
{
	/// Returns the pending attempt, or installs one built from `make` and returns it.
	pub fn join_or_lead<F>(&self, make: impl FnOnce() -> F) -> SharedAttempt<T>
	where
		F: 'static + Future<Output = T> + Send,
	{
		let mut slot = self.0.lock();

		if let Some(pending) = slot.as_ref() {
			return pending.clone();
		}

		let attempt = make().boxed().shared();

		*slot = Some(attempt.clone());

		attempt
	}

	/// Clears the slot so the next caller starts a fresh attempt.
	///
	/// Must be invoked on every settlement path, success or failure; callers already
	/// holding a handle keep their outcome.
	pub fn settle(&self) {
		self.0.lock().take();
	}
}

/// Request payload sent to the renewal endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct RenewalRequest {
	/// Renewal credential exchanged for a fresh access credential.
	pub refresh: Credential,
}

/// Successful renewal payload returned by the backend.
///
/// A missing `refresh` field means the backend did not rotate the renewal credential
/// and the existing one stays valid.
#[derive(Clone, Debug, Deserialize)]
pub struct RenewalGrant {
	/// Freshly minted access credential.
	pub access: Credential,
	/// Rotated renewal credential, when the backend issued one.
	#[serde(default)]
	pub refresh: Option<Credential>,
}
