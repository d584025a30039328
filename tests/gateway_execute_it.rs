#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use session_broker::{
	_preludet::*,
	request::RequestOptions,
	reqwest::header::{ACCEPT, HeaderValue},
};

#[tokio::test]
async fn execute_decodes_json_payloads() {
	let server = MockServer::start_async().await;
	let (gateway, store) = build_test_gateway(&server.base_url());

	seed_session(&store, "access-1", "refresh-1", Some("acme"));

	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/companies/1/")
				.header("accept", "application/json")
				.header("authorization", "Bearer access-1")
				.header("x-tenant", "acme");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"id":1,"name":"Acme Holdings"}"#);
		})
		.await;
	let company: Option<Value> = gateway
		.execute("/api/companies/1/", RequestOptions::get())
		.await
		.expect("Decorated request should succeed.");

	mock.assert_async().await;

	assert_eq!(company, Some(json!({"id": 1, "name": "Acme Holdings"})));
}

#[tokio::test]
async fn ambient_headers_are_omitted_without_a_session() {
	let server = MockServer::start_async().await;
	let (gateway, _store) = build_test_gateway(&server.base_url());
	let authorized = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/companies/").header_exists("authorization");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let err = gateway
		.execute_raw("/api/companies/", RequestOptions::get())
		.await
		.expect_err("Unmatched mock should yield a failing status.");

	authorized.assert_calls_async(0).await;

	assert!(matches!(err, Error::Api { status: 404, .. }));
}

#[tokio::test]
async fn tenant_header_is_omitted_for_tenantless_sessions() {
	let server = MockServer::start_async().await;
	let (gateway, store) = build_test_gateway(&server.base_url());

	seed_session(&store, "access-1", "refresh-1", None);

	let scoped = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/companies/").header_exists("x-tenant");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let unscoped = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/companies/").header("authorization", "Bearer access-1");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let companies: Option<Value> = gateway
		.execute("/api/companies/", RequestOptions::get())
		.await
		.expect("Tenantless request should succeed.");

	scoped.assert_calls_async(0).await;
	unscoped.assert_async().await;

	assert_eq!(companies, Some(json!([])));
}

#[tokio::test]
async fn caller_headers_take_precedence_over_defaults() {
	let server = MockServer::start_async().await;
	let (gateway, store) = build_test_gateway(&server.base_url());

	seed_session(&store, "access-1", "refresh-1", Some("acme"));

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/reports/export/").header("accept", "text/csv");
			then.status(200).header("content-type", "text/csv").body("id,name\n1,Acme\n");
		})
		.await;
	let options =
		RequestOptions::get().header(ACCEPT, HeaderValue::from_static("text/csv"));
	let decoded: Option<Value> = gateway
		.execute("/api/reports/export/", options)
		.await
		.expect("CSV export should succeed.");

	mock.assert_async().await;

	assert_eq!(decoded, None, "Non-JSON content types should normalize to none.");
}

#[tokio::test]
async fn no_content_normalizes_to_none() {
	let server = MockServer::start_async().await;
	let (gateway, store) = build_test_gateway(&server.base_url());

	seed_session(&store, "access-1", "refresh-1", Some("acme"));

	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/companies/1/");
			then.status(204);
		})
		.await;
	let deleted: Option<Value> = gateway
		.execute("/api/companies/1/", RequestOptions::delete())
		.await
		.expect("Delete should succeed.");

	mock.assert_async().await;

	assert_eq!(deleted, None);
}

#[tokio::test]
async fn post_json_bodies_reach_the_backend() {
	let server = MockServer::start_async().await;
	let (gateway, store) = build_test_gateway(&server.base_url());

	seed_session(&store, "access-1", "refresh-1", Some("acme"));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/suppliers/")
				.header("content-type", "application/json")
				.json_body(json!({"name": "Nuevo Proveedor", "rfc": "NPR010101ABC"}));
			then.status(201)
				.header("content-type", "application/json")
				.body(r#"{"id":7,"name":"Nuevo Proveedor"}"#);
		})
		.await;
	let options = RequestOptions::post()
		.json(&json!({"name": "Nuevo Proveedor", "rfc": "NPR010101ABC"}))
		.expect("JSON body should serialize.");
	let created: Option<Value> = gateway
		.execute("/api/suppliers/", options)
		.await
		.expect("Create should succeed.");

	mock.assert_async().await;

	assert_eq!(created, Some(json!({"id": 7, "name": "Nuevo Proveedor"})));
}

#[tokio::test]
async fn api_errors_extract_detail_messages() {
	let server = MockServer::start_async().await;
	let (gateway, store) = build_test_gateway(&server.base_url());

	seed_session(&store, "access-1", "refresh-1", Some("acme"));
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/contracts/9/");
			then.status(403)
				.header("content-type", "application/json")
				.body(r#"{"detail": "No tiene permisos"}"#);
		})
		.await;

	let err = gateway
		.execute_raw("/api/contracts/9/", RequestOptions::get())
		.await
		.expect_err("Forbidden response should surface as an error.");

	match err {
		Error::Api { status, message } => {
			assert_eq!(status, 403);
			assert_eq!(message, "No tiene permisos");
		},
		other => panic!("Expected an API error, got {other:?}."),
	}
}

#[tokio::test]
async fn api_errors_fall_back_to_the_generic_message() {
	let server = MockServer::start_async().await;
	let (gateway, store) = build_test_gateway(&server.base_url());

	seed_session(&store, "access-1", "refresh-1", Some("acme"));
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/contracts/");
			then.status(500);
		})
		.await;

	let err = gateway
		.execute_raw("/api/contracts/", RequestOptions::get())
		.await
		.expect_err("Server failure should surface as an error.");

	assert_eq!(err.to_string(), "Error API 500");
	assert!(matches!(err, Error::Api { status: 500, .. }));
}

#[tokio::test]
async fn success_responses_return_raw_and_untouched() {
	let server = MockServer::start_async().await;
	let (gateway, store) = build_test_gateway(&server.base_url());

	seed_session(&store, "access-1", "refresh-1", Some("acme"));
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/health/");
			then.status(200).header("content-type", "text/plain").body("pong");
		})
		.await;

	let response = gateway
		.execute_raw("/api/health/", RequestOptions::get())
		.await
		.expect("Health probe should succeed.");

	assert_eq!(response.status().as_u16(), 200);
	assert_eq!(
		response.text().await.expect("Body should read successfully."),
		"pong",
	);
}

#[tokio::test]
async fn malformed_success_bodies_surface_decode_errors() {
	let server = MockServer::start_async().await;
	let (gateway, store) = build_test_gateway(&server.base_url());

	seed_session(&store, "access-1", "refresh-1", Some("acme"));
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/companies/");
			then.status(200).header("content-type", "application/json").body("{broken");
		})
		.await;

	let err = gateway
		.execute::<Value>("/api/companies/", RequestOptions::get())
		.await
		.expect_err("Malformed JSON should surface as a decode error.");

	assert!(matches!(err, Error::Decode { status: 200, .. }));
}
