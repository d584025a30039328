//! Access-layer error types shared across the gateway, stores, and normalizer.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical access-layer error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Backend answered the (possibly retried) request with a non-success status.
	///
	/// `Display` renders the message extracted from the response body; the message is
	/// always non-empty.
	#[error("{message}")]
	Api {
		/// HTTP status code of the final response.
		status: u16,
		/// Best-effort human-readable message extracted from the response body.
		message: String,
	},
	/// Success response whose JSON body could not be decoded into the requested type.
	#[error("Response body returned malformed JSON.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// The network call itself failed before any response existed.
	#[error("Network error occurred while calling the API.")]
	Transport {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Wraps a transport-specific network error.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for Error {
	fn from(e: reqwest::Error) -> Self {
		Self::transport(e)
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Descriptor-level problem (base URL, paths, tenant header name).
	#[error(transparent)]
	Descriptor(#[from] crate::descriptor::DescriptorError),
	/// JSON request body could not be serialized.
	#[error("Request body could not be serialized as JSON.")]
	BodySerialize {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Access credential cannot be carried in an HTTP header.
	#[error("Access credential is not a valid header value.")]
	CredentialHeader,
	/// Tenant header name was rejected by the HTTP stack.
	#[error("Tenant header `{name}` is not a valid header name.")]
	TenantHeader {
		/// Header name that failed to parse.
		name: String,
	},
	/// Tenant identifier cannot be carried in an HTTP header.
	#[error("Tenant `{value}` is not a valid header value.")]
	TenantValue {
		/// Tenant identifier that failed to parse.
		value: String,
	},
}
