//! Backend descriptor consumed by the gateway: base URL, renewal endpoint, tenant header.

// std
use std::env;
// self
use crate::_prelude::*;

/// Renewal endpoint path used when the builder receives none.
pub const DEFAULT_RENEWAL_PATH: &str = "/api/accounts/token/refresh/";
/// Tenant-scope header name used when the builder receives none.
pub const DEFAULT_TENANT_HEADER: &str = "X-Tenant";

const BASE_URL_VAR: &str = "API_BASE_URL";

/// Errors raised while constructing or using descriptors.
#[derive(Debug, ThisError)]
pub enum DescriptorError {
	/// Base URL scheme is neither `http` nor `https`.
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// URL that failed validation.
		url: String,
	},
	/// Tenant header name contains characters the HTTP stack rejects.
	#[error("Tenant header `{name}` is not a valid header name.")]
	InvalidTenantHeader {
		/// Header name that failed validation.
		name: String,
	},
	/// Paths must be rooted so they append cleanly to the base URL.
	#[error("Path `{path}` must begin with `/`.")]
	PathNotRooted {
		/// Path that failed validation.
		path: String,
	},
	/// Joining the path onto the base did not produce a valid URL.
	#[error("Path `{path}` does not form a valid URL against the base.")]
	InvalidPath {
		/// Path that failed to join.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Environment variable holding the base URL is unset.
	#[error("`{var}` is not set.")]
	MissingBaseUrl {
		/// Variable that was consulted.
		var: &'static str,
	},
	/// Environment variable holding the base URL does not parse.
	#[error("`{var}` does not contain a valid URL.")]
	InvalidBaseUrl {
		/// Variable that was consulted.
		var: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Immutable backend descriptor consumed by the gateway and renewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiDescriptor {
	/// Base URL every request path is appended to.
	pub base: Url,
	/// Absolute URL of the credential renewal endpoint.
	pub renewal: Url,
	/// Name of the tenant-scope header attached to scoped requests.
	pub tenant_header: String,
}
impl ApiDescriptor {
	/// Creates a new builder for the provided base URL.
	pub fn builder(base: Url) -> ApiDescriptorBuilder {
		ApiDescriptorBuilder::new(base)
	}

	/// Builds a descriptor from the `API_BASE_URL` environment variable with default
	/// renewal path and tenant header.
	pub fn from_env() -> Result<Self, DescriptorError> {
		let raw = env::var(BASE_URL_VAR)
			.map_err(|_| DescriptorError::MissingBaseUrl { var: BASE_URL_VAR })?;
		let base = Url::parse(&raw)
			.map_err(|source| DescriptorError::InvalidBaseUrl { var: BASE_URL_VAR, source })?;

		Self::builder(base).build()
	}

	/// Resolves a rooted request path against the base URL.
	///
	/// Paths append to the base verbatim, so a base carrying a path prefix keeps it.
	pub fn endpoint(&self, path: &str) -> Result<Url, DescriptorError> {
		join(&self.base, path)
	}
}

/// Builder for [`ApiDescriptor`] values.
#[derive(Debug)]
pub struct ApiDescriptorBuilder {
	/// Base URL every request path is appended to.
	pub base: Url,
	/// Renewal endpoint path; defaults to [`DEFAULT_RENEWAL_PATH`].
	pub renewal_path: String,
	/// Tenant-scope header name; defaults to [`DEFAULT_TENANT_HEADER`].
	pub tenant_header: String,
}
impl ApiDescriptorBuilder {
	/// Creates a new builder seeded with the provided base URL.
	pub fn new(base: Url) -> Self {
		Self {
			base,
			renewal_path: DEFAULT_RENEWAL_PATH.into(),
			tenant_header: DEFAULT_TENANT_HEADER.into(),
		}
	}

	/// Overrides the renewal endpoint path.
	pub fn renewal_path(mut self, path: impl Into<String>) -> Self {
		self.renewal_path = path.into();

		self
	}

	/// Overrides the tenant-scope header name.
	pub fn tenant_header(mut self, name: impl Into<String>) -> Self {
		self.tenant_header = name.into();

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ApiDescriptor, DescriptorError> {
		if !matches!(self.base.scheme(), "http" | "https") {
			return Err(DescriptorError::UnsupportedScheme { url: self.base.to_string() });
		}
		if !is_valid_header_name(&self.tenant_header) {
			return Err(DescriptorError::InvalidTenantHeader { name: self.tenant_header });
		}

		let renewal = join(&self.base, &self.renewal_path)?;

		Ok(ApiDescriptor { base: self.base, renewal, tenant_header: self.tenant_header })
	}
}

fn join(base: &Url, path: &str) -> Result<Url, DescriptorError> {
	if !path.starts_with('/') {
		return Err(DescriptorError::PathNotRooted { path: path.to_owned() });
	}

	let joined = format!("{}{path}", base.as_str().trim_end_matches('/'));

	Url::parse(&joined)
		.map_err(|source| DescriptorError::InvalidPath { path: path.to_owned(), source })
}

fn is_valid_header_name(name: &str) -> bool {
	!name.is_empty()
		&& name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
