//! Retry orchestration: one request, at most one renewal-backed re-issue.

// crates.io
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	gateway::Gateway,
	obs::{self, StageKind, StageOutcome, StageSpan},
	request::{self, RequestOptions},
	response,
};

impl Gateway {
	/// Issues a request, renewing the access credential at most once on `401`.
	///
	/// A `401` response triggers one renewal; when the renewer yields a fresh
	/// credential, the same request is re-issued exactly once carrying it explicitly
	/// (the store is never re-read for the retry, so a rotation racing in from another
	/// caller cannot change which credential this retry uses). When the renewer yields
	/// nothing, the original response stands. Any non-success final status becomes
	/// [`Error::Api`]; a second `401` after renewal is terminal. Transport failures on
	/// either leg surface as [`Error::Transport`] and never trigger renewal.
	pub async fn execute_raw(&self, path: &str, options: RequestOptions) -> Result<Response> {
		const KIND: StageKind = StageKind::Execute;

		let span = StageSpan::new(KIND, "execute_raw");

		obs::record_stage_outcome(KIND, StageOutcome::Attempt);

		let result = span.instrument(self.execute_raw_inner(path, &options)).await;

		match &result {
			Ok(_) => obs::record_stage_outcome(KIND, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(KIND, StageOutcome::Failure),
		}

		result
	}

	/// Issues a request and decodes the JSON body, returning `None` for bodiless
	/// responses (`204`, or a content type other than JSON).
	pub async fn execute<T>(&self, path: &str, options: RequestOptions) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		let response = self.execute_raw(path, options).await?;

		response::interpret(response).await
	}

	async fn execute_raw_inner(&self, path: &str, options: &RequestOptions) -> Result<Response> {
		let mut response = request::dispatch(
			&self.http_client,
			&self.descriptor,
			self.store.as_ref(),
			path,
			options,
			None,
		)
		.await?;

		if response.status() == StatusCode::UNAUTHORIZED
			&& let Some(renewed) = self.renewer.refresh().await
		{
			obs::record_stage_outcome(StageKind::Retry, StageOutcome::Attempt);

			response = request::dispatch(
				&self.http_client,
				&self.descriptor,
				self.store.as_ref(),
				path,
				options,
				Some(&renewed),
			)
			.await?;
		}

		if !response.status().is_success() {
			let (status, message) = response::failure_message(response).await;

			return Err(Error::Api { status, message });
		}

		Ok(response)
	}
}
