//! Identity-provider log-out client tests.

use lantern_session::{ProviderClient, SessionConfig, SessionError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> SessionConfig {
    SessionConfig {
        provider_base_url: server.uri(),
        provider_api_key: "provider-key".into(),
        ..SessionConfig::default()
    }
}

#[tokio::test]
async fn log_out_posts_to_the_user_endpoint_with_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/ext-42/log_out"))
        .and(header("Api-Key", "provider-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProviderClient::new(&config(&server));
    client.log_out("ext-42").await.unwrap();
}

#[tokio::test]
async fn provider_error_status_surfaces_as_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/ext-42/log_out"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ProviderClient::new(&config(&server));
    let err = client.log_out("ext-42").await.unwrap_err();
    assert!(matches!(err, SessionError::Provider(_)));
    assert_eq!(err.public_message(), "service unavailable");
}
