//! Response normalization: typed decoding of success bodies and best-effort message
//! extraction from failure bodies.

// crates.io
#[cfg(feature = "reqwest")] use reqwest::{Response, StatusCode, header::CONTENT_TYPE};
#[cfg(feature = "reqwest")] use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::_prelude::*;

/// Classified failure-body shapes, evaluated in fixed priority order.
///
/// The backend guarantees no particular error schema, so classification is exhaustive
/// over everything it has been observed to return: a bare JSON string, an object with
/// a `detail` field, an arbitrary object or array, plain text, or nothing at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorBody {
	/// JSON body that was itself a string; used verbatim.
	Message(String),
	/// JSON object carrying a non-empty string `detail` field.
	Detail(String),
	/// Non-empty JSON object or array without a usable `detail`; kept serialized.
	Serialized(String),
	/// Body that failed JSON parsing but contained text.
	Raw(String),
	/// Nothing usable; messages fall back to a generic form.
	Empty,
}
impl ErrorBody {
	/// Classifies a raw response body according to the extraction ladder.
	pub fn classify(raw: &str) -> Self {
		match serde_json::from_str::<Value>(raw) {
			Ok(Value::String(message)) => Self::Message(message),
			Ok(Value::Object(map)) => {
				if let Some(Value::String(detail)) = map.get("detail")
					&& !detail.is_empty()
				{
					return Self::Detail(detail.clone());
				}
				if map.is_empty() {
					Self::Empty
				} else {
					Self::Serialized(Value::Object(map).to_string())
				}
			},
			Ok(Value::Array(items)) if !items.is_empty() =>
				Self::Serialized(Value::Array(items).to_string()),
			Ok(_) => Self::Empty,
			Err(_) =>
				if raw.is_empty() {
					Self::Empty
				} else {
					Self::Raw(raw.to_owned())
				},
		}
	}

	/// Renders the human-readable message, falling back to `Error API <status>`.
	pub fn into_message(self, status: u16) -> String {
		match self {
			Self::Message(message)
			| Self::Detail(message)
			| Self::Serialized(message)
			| Self::Raw(message) => message,
			Self::Empty => format!("Error API {status}"),
		}
	}
}

/// Extracts the status and human-readable message from a failed response.
///
/// Body read failures degrade to the generic message; the result is never empty.
#[cfg(feature = "reqwest")]
pub async fn failure_message(response: Response) -> (u16, String) {
	let status = response.status().as_u16();
	let raw = response.text().await.unwrap_or_default();

	(status, ErrorBody::classify(&raw).into_message(status))
}

/// Turns a successful response into a typed value, or `None` for bodiless responses.
///
/// `204 No Content` and bodies not declared as JSON normalize to `None` regardless of
/// content; everything else is decoded as JSON into `T`.
#[cfg(feature = "reqwest")]
pub async fn interpret<T>(response: Response) -> Result<Option<T>>
where
	T: DeserializeOwned,
{
	if response.status() == StatusCode::NO_CONTENT {
		return Ok(None);
	}

	let declares_json = response
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.is_some_and(|value| value.contains("application/json"));

	if !declares_json {
		return Ok(None);
	}

	let status = response.status().as_u16();
	let bytes = response.bytes().await?;
	let mut deserializer = serde_json::Deserializer::from_slice(&bytes);

	serde_path_to_error::deserialize(&mut deserializer)
		.map(Some)
		.map_err(|source| Error::Decode { source, status })
}
