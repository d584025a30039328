//! Fire-and-forget notifications emitted when the persisted session is replaced.

// crates.io
use tokio::sync::broadcast;
// self
use crate::_prelude::*;

const CHANNEL_CAPACITY: usize = 16;

/// Marker broadcast after the stored session bundle has been replaced or erased.
///
/// Carries no payload: receivers re-read the session store, which stays the single
/// source of truth. Delivery is best-effort and nothing in the access layer depends
/// on a receiver existing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionChanged;

/// Process-wide announcer for session replacement events.
#[derive(Clone, Debug)]
pub struct SessionEvents(broadcast::Sender<SessionChanged>);
impl SessionEvents {
	/// Creates a new announcer with no subscribers.
	pub fn new() -> Self {
		Self(broadcast::channel(CHANNEL_CAPACITY).0)
	}

	/// Registers a new subscriber; only changes announced after this call are observed.
	pub fn subscribe(&self) -> broadcast::Receiver<SessionChanged> {
		self.0.subscribe()
	}

	/// Announces a change to every live subscriber; absent subscribers are ignored.
	pub fn announce(&self) {
		let _ = self.0.send(SessionChanged);
	}
}
impl Default for SessionEvents {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn announcements_reach_live_subscribers() {
		let events = SessionEvents::new();
		let mut rx = events.subscribe();

		events.announce();

		let received = rx.recv().await.expect("Announced change should be received.");

		assert_eq!(received, SessionChanged);
	}

	#[test]
	fn announcing_without_subscribers_is_silent() {
		SessionEvents::new().announce();
	}
}
