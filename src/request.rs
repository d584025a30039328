//! Request construction: caller intent merged with ambient session state.

// crates.io
use reqwest::{
	Method, RequestBuilder, Response,
	header::{ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
// self
use crate::{
	_prelude::*,
	auth::Credential,
	descriptor::ApiDescriptor,
	error::ConfigError,
	http::HttpClient,
	store::SessionStore,
};

/// Caller-supplied parameters for a single API call.
///
/// Headers set here win over every ambient default, including `Authorization` and the
/// tenant-scope header.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
	/// HTTP method; defaults to `GET`.
	pub method: Method,
	/// Caller headers, inserted after the ambient defaults.
	pub headers: HeaderMap,
	/// Raw request body bytes, if any.
	pub body: Option<Vec<u8>>,
}
impl RequestOptions {
	/// Creates options for the provided method.
	pub fn new(method: Method) -> Self {
		Self { method, headers: HeaderMap::new(), body: None }
	}

	/// Creates options for a `GET` request.
	pub fn get() -> Self {
		Self::new(Method::GET)
	}

	/// Creates options for a `POST` request.
	pub fn post() -> Self {
		Self::new(Method::POST)
	}

	/// Creates options for a `PUT` request.
	pub fn put() -> Self {
		Self::new(Method::PUT)
	}

	/// Creates options for a `DELETE` request.
	pub fn delete() -> Self {
		Self::new(Method::DELETE)
	}

	/// Adds or replaces a caller header.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Serializes `payload` as the JSON request body and declares its content type.
	pub fn json<T>(mut self, payload: &T) -> Result<Self, ConfigError>
	where
		T: Serialize,
	{
		let body =
			serde_json::to_vec(payload).map_err(|source| ConfigError::BodySerialize { source })?;

		self.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		self.body = Some(body);

		Ok(self)
	}
}

/// Builds one outbound request from caller options plus ambient session state.
///
/// Header layering, lowest precedence first: `Accept: application/json` and
/// `Cache-Control: no-store` defaults, then `Authorization` (override credential, else
/// the stored access credential, else absent) and the tenant-scope header (absent when
/// the session carries no tenant), then the caller's own headers.
pub(crate) fn build(
	client: &HttpClient,
	descriptor: &ApiDescriptor,
	store: &dyn SessionStore,
	path: &str,
	options: &RequestOptions,
	credential: Option<&Credential>,
) -> Result<RequestBuilder> {
	let url = descriptor.endpoint(path).map_err(ConfigError::from)?;
	let session = store.load();
	let mut headers = HeaderMap::new();

	headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
	headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

	let bearer = credential.or_else(|| session.as_ref().map(|session| &session.access_token));

	if let Some(token) = bearer {
		let value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
			.map_err(|_| ConfigError::CredentialHeader)?;

		headers.insert(AUTHORIZATION, value);
	}
	if let Some(tenant) = session.as_ref().and_then(|session| session.tenant.as_ref()) {
		let name = HeaderName::from_bytes(descriptor.tenant_header.as_bytes()).map_err(|_| {
			ConfigError::TenantHeader { name: descriptor.tenant_header.clone() }
		})?;
		let value = HeaderValue::from_str(tenant.as_ref())
			.map_err(|_| ConfigError::TenantValue { value: tenant.to_string() })?;

		headers.insert(name, value);
	}
	for (name, value) in options.headers.iter() {
		headers.insert(name, value.clone());
	}

	let mut request = client.request(options.method.clone(), url).headers(headers);

	if let Some(body) = options.body.as_ref() {
		request = request.body(body.clone());
	}

	Ok(request)
}

/// Builds and dispatches one outbound request.
///
/// Transport failures surface as [`Error::Transport`]; no interpretation of the
/// response happens here.
pub(crate) async fn dispatch(
	client: &HttpClient,
	descriptor: &ApiDescriptor,
	store: &dyn SessionStore,
	path: &str,
	options: &RequestOptions,
	credential: Option<&Credential>,
) -> Result<Response> {
	let request = build(client, descriptor, store, path, options, credential)?;

	Ok(request.send().await?)
}
