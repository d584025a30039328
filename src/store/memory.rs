//! Thread-safe in-memory [`SessionStore`] for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::Session,
	store::{SessionStore, StoreError},
};

/// Keeps the session bundle in-process; the backing slot is shared across clones.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<RwLock<Option<Session>>>);
impl SessionStore for MemoryStore {
	fn load(&self) -> Option<Session> {
		self.0.read().clone()
	}

	fn persist(&self, session: Session) -> Result<(), StoreError> {
		*self.0.write() = Some(session);

		Ok(())
	}

	fn remove(&self) -> Result<(), StoreError> {
		*self.0.write() = None;

		Ok(())
	}
}
