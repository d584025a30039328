//! Storage contracts and built-in session stores.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::Session};

/// Durable storage contract for the persisted session bundle.
///
/// Implementations are synchronous and never touch the network. The bundle is replaced
/// wholesale on every write; field-level mutation is not part of the contract.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Returns the current session, if one is stored.
	///
	/// Never fails: a corrupt persisted value is erased as a side effect and reported
	/// as absent.
	fn load(&self) -> Option<Session>;

	/// Atomically replaces the stored session with the provided bundle.
	fn persist(&self, session: Session) -> Result<(), StoreError>;

	/// Erases the stored session entirely.
	fn remove(&self) -> Result<(), StoreError>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failure surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
