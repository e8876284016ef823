use crate::utils::spawn_app;
use fake::{faker::internet::en::SafeEmail, Fake};
use http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::json;
use std::{collections::HashSet, sync::Arc};

#[tokio::test]
async fn new_email_is_added_to_the_waitlist() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.post_waitlist_email("ursula_le_guin@gmail.com").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Successfully added to waitlist" }));
    assert_eq!(
        app.stored_emails(),
        Some(vec!["ursula_le_guin@gmail.com".to_string()])
    );
}

#[tokio::test]
async fn data_directory_is_created_by_the_first_submission() {
    // Arrange
    let app = spawn_app().await;
    assert!(!app.data_dir().exists());

    // Act
    app.post_waitlist_email("a@x.com").await;

    // Assert
    assert!(app.data_dir().is_dir());
    assert_eq!(app.waitlist_file().as_deref(), Some("[\n  \"a@x.com\"\n]"));
}

#[tokio::test]
async fn duplicate_email_is_rejected_and_file_is_unchanged() {
    // Arrange
    let app = spawn_app().await;
    let first = app.post_waitlist_email("a@x.com").await;
    assert_eq!(first.status(), StatusCode::OK);
    let before = app.waitlist_file();

    // Act
    let response = app.post_waitlist_email("a@x.com").await;

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Email already exists in waitlist" }));
    assert_eq!(app.waitlist_file(), before);
}

#[rstest]
#[case(json!({}), "missing the email")]
#[case(json!({ "email": "" }), "empty email")]
#[case(json!({ "email": null }), "null email")]
#[tokio::test]
async fn missing_email_is_rejected_without_touching_storage(
    #[case] body: serde_json::Value,
    #[case] description: &str,
) {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.post_waitlist(&body).await;

    // Assert
    assert_eq!(
        response.status(),
        StatusCode::BAD_REQUEST,
        "The API did not fail with 400 Bad Request when the payload was {}.",
        description
    );
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Email is required" }));
    assert_eq!(app.waitlist_file(), None);
}

#[rstest]
#[case(None)]
#[case(Some("text/plain;charset=UTF-8"))]
#[case(Some("application/x-www-form-urlencoded"))]
#[tokio::test]
async fn json_body_is_accepted_whatever_the_content_type(#[case] content_type: Option<&str>) {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .post_waitlist_raw(r#"{"email":"a@x.com"}"#, content_type)
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.stored_emails(), Some(vec!["a@x.com".to_string()]));
}

#[rstest]
#[case("{ broken", "malformed JSON")]
#[case("email=a@x.com", "form encoded body")]
#[case("", "empty body")]
#[case(r#"{"email": 42}"#, "email is not a string")]
#[tokio::test]
async fn unparseable_body_is_an_internal_error(#[case] body: &str, #[case] description: &str) {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .post_waitlist_raw(body, Some("application/json"))
        .await;

    // Assert
    assert_eq!(
        response.status(),
        StatusCode::INTERNAL_SERVER_ERROR,
        "The API did not fail with 500 Internal Server Error when the payload was {}.",
        description
    );
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Internal server error" }));
    assert_eq!(app.waitlist_file(), None);
}

#[tokio::test]
async fn worked_example_from_empty_waitlist() {
    // Arrange
    let app = spawn_app().await;

    // Act & Assert
    let response = app.post_waitlist_email("a@x.com").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.stored_emails(), Some(vec!["a@x.com".to_string()]));

    let response = app.post_waitlist_email("a@x.com").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.stored_emails(), Some(vec!["a@x.com".to_string()]));

    let response = app.post_waitlist_email("b@x.com").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        app.stored_emails(),
        Some(vec!["a@x.com".to_string(), "b@x.com".to_string()])
    );
}

#[tokio::test]
async fn sequential_submissions_keep_their_order() {
    // Arrange
    let app = spawn_app().await;
    let mut emails: Vec<String> = Vec::new();
    while emails.len() < 10 {
        let email: String = SafeEmail().fake();
        if !emails.contains(&email) {
            emails.push(email);
        }
    }

    // Act
    for email in &emails {
        let response = app.post_waitlist_email(email).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Assert
    assert_eq!(app.stored_emails(), Some(emails));
}

#[tokio::test]
async fn concurrent_submissions_are_all_kept() {
    // Arrange
    let app = Arc::new(spawn_app().await);
    let emails: Vec<String> = (0..20).map(|i| format!("user{i}@x.com")).collect();

    // Act
    let handles: Vec<_> = emails
        .iter()
        .cloned()
        .map(|email| {
            let app = app.clone();
            tokio::spawn(async move { app.post_waitlist_email(&email).await.status() })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    // Assert
    let stored: HashSet<String> = app.stored_emails().unwrap().into_iter().collect();
    assert_eq!(stored, emails.into_iter().collect::<HashSet<_>>());
}

#[tokio::test]
async fn corrupt_waitlist_file_fails_every_submission() {
    // Arrange
    let app = spawn_app().await;
    std::fs::create_dir_all(app.data_dir()).unwrap();
    std::fs::write(app.waitlist_path(), "{ not a list").unwrap();

    for email in ["a@x.com", "b@x.com"] {
        // Act
        let response = app.post_waitlist_email(email).await;

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }
    assert_eq!(app.waitlist_file().as_deref(), Some("{ not a list"));
}
