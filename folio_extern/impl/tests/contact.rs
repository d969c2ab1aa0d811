use std::path::Path;

use folio_di::{provider, Provides};
use folio_extern_contracts::contact::{ContactApiResponse, ContactApiService};
use folio_extern_impl::contact::{ContactApiServiceConfig, ContactApiServiceImpl};
use folio_models::contact::{ContactDraft, ContactMessage};
use folio_testing::contact::{
    ContactSubmission, TestingServer, MALFORMED_DOMAIN, REJECTED_DOMAIN, REJECTED_MESSAGE,
    SUCCESS_MESSAGE, UNAVAILABLE_DOMAIN, UNAVAILABLE_MESSAGE,
};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn accepted() {
    let server = TestingServer::spawn().await.unwrap();
    let sut = make_sut(&server.base_url());

    let result = sut
        .send_message(make_message("ann@example.com"))
        .await
        .unwrap();

    assert_eq!(
        result,
        ContactApiResponse::Accepted {
            message: SUCCESS_MESSAGE.into()
        }
    );
    assert_eq!(
        server.submissions().await,
        [ContactSubmission {
            name: "Ann Lee".into(),
            email: "ann@example.com".into(),
            subject: "Hello there".into(),
            message: "This is a test message.".into(),
        }]
    );
}

#[tokio::test]
async fn base_url_with_trailing_slash() {
    let server = TestingServer::spawn().await.unwrap();
    let sut = make_sut(&format!("{}/", server.base_url()));

    let result = sut
        .send_message(make_message("ann@example.com"))
        .await
        .unwrap();

    assert!(matches!(result, ContactApiResponse::Accepted { .. }));
    assert_eq!(server.submissions().await.len(), 1);
}

#[tokio::test]
async fn rejected() {
    let server = TestingServer::spawn().await.unwrap();
    let sut = make_sut(&server.base_url());

    let result = sut
        .send_message(make_message(&format!("ann@{REJECTED_DOMAIN}")))
        .await
        .unwrap();

    assert_eq!(
        result,
        ContactApiResponse::Rejected {
            message: Some(REJECTED_MESSAGE.into())
        }
    );
}

#[tokio::test]
async fn unavailable() {
    let server = TestingServer::spawn().await.unwrap();
    let sut = make_sut(&server.base_url());

    let result = sut
        .send_message(make_message(&format!("ann@{UNAVAILABLE_DOMAIN}")))
        .await
        .unwrap();

    assert_eq!(
        result,
        ContactApiResponse::Rejected {
            message: Some(UNAVAILABLE_MESSAGE.into())
        }
    );
}

#[tokio::test]
async fn refused_by_backend_validation() {
    let server = TestingServer::spawn().await.unwrap();
    let sut = make_sut(&server.base_url());

    let result = sut
        .send_message(make_message("ann@localhost"))
        .await
        .unwrap();

    assert_eq!(result, ContactApiResponse::Rejected { message: None });
    assert!(server.submissions().await.is_empty());
}

#[tokio::test]
async fn malformed_response() {
    let server = TestingServer::spawn().await.unwrap();
    let sut = make_sut(&server.base_url());

    let result = sut
        .send_message(make_message(&format!("ann@{MALFORMED_DOMAIN}")))
        .await;

    assert!(result.is_err());
    assert_eq!(server.submissions().await.len(), 1);
}

#[tokio::test]
async fn backend_unreachable() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let sut = make_sut(&format!("http://127.0.0.1:{port}"));

    let result = sut.send_message(make_message("ann@example.com")).await;

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Contact request failed"));
}

fn make_message(email: &str) -> ContactMessage {
    ContactDraft {
        name: "Ann Lee".into(),
        email: email.into(),
        subject: "Hello there".into(),
        message: "This is a test message.".into(),
    }
    .validate()
    .unwrap()
}

fn make_sut(base_url: &str) -> ContactApiServiceImpl {
    let config = folio_config::load_with_override::<&Path>(
        &[],
        &[&format!("backend.url = \"{base_url}\"")],
    )
    .unwrap();

    provider! {
        Provider { contact_api_service_config: ContactApiServiceConfig, }
    }

    let mut provider = Provider {
        _cache: Default::default(),
        contact_api_service_config: ContactApiServiceConfig::new(&config.backend.url).unwrap(),
    };

    provider.provide()
}
