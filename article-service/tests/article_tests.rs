mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_publish_article_success() {
    let app = TestApp::spawn().await;

    let (user_id, token) = app
        .register_user("Grace Hopper", "grace@example.edu", "pass_word!")
        .await;

    let response = app
        .post_authenticated("/api/articles", &token)
        .json(&json!({
            "title": "Compiling English Statements",
            "author": "G. Hopper and the A-0 team",
            "abstract": "We describe a system that translates statements into subroutine calls.",
            "keywords": "compilers, subroutines",
            "content": "The A-0 system reads a statement and emits machine code.",
            "bibliography": "[1] A-0 System Manual"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["id"].is_string());
    assert_eq!(body["title"], "Compiling English Statements");
    assert_eq!(body["author"], "G. Hopper and the A-0 team");
    assert_eq!(
        body["abstract"],
        "We describe a system that translates statements into subroutine calls."
    );
    assert_eq!(body["keywords"], "compilers, subroutines");
    assert_eq!(body["bibliography"], "[1] A-0 System Manual");
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["author_name"], "Grace Hopper");
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_publish_preserves_text_exactly() {
    let app = TestApp::spawn().await;

    let (_user_id, token) = app
        .register_user("Grace Hopper", "grace@example.edu", "pass_word!")
        .await;

    // Markup, quotes, and non-ASCII text must come back byte for byte
    let content = "Let E = mc\u{00b2}; see \u{00a7}2 for <em>details</em> & \"caveats\".\n\tNo rewriting.";

    let response = app
        .post_authenticated("/api/articles", &token)
        .json(&json!({
            "title": "100% Reproducible Notation: \u{03bb}, \u{2200}, \u{2203}",
            "author": "G. Hopper",
            "abstract": "On symbols.",
            "keywords": "notation",
            "content": content
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let created: serde_json::Value = response.json().await.expect("Failed to parse response");
    let article_id = created["id"].as_str().unwrap();

    // Read back through the public endpoint, not the create response
    let fetched = app
        .get(&format!("/api/articles/{}", article_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(fetched.status(), StatusCode::OK);

    let body: serde_json::Value = fetched.json().await.expect("Failed to parse response");
    assert_eq!(
        body["title"],
        "100% Reproducible Notation: \u{03bb}, \u{2200}, \u{2203}"
    );
    assert_eq!(body["content"], content);
    assert!(body["bibliography"].is_null());
}

#[tokio::test]
async fn test_publish_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/articles")
        .json(&json!({
            "title": "Anonymous Manuscript",
            "author": "Nobody",
            "abstract": "None.",
            "keywords": "none",
            "content": "None."
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_publish_empty_title() {
    let app = TestApp::spawn().await;

    let (_user_id, token) = app
        .register_user("Grace Hopper", "grace@example.edu", "pass_word!")
        .await;

    let response = app
        .post_authenticated("/api/articles", &token)
        .json(&json!({
            "title": "",
            "author": "G. Hopper",
            "abstract": "An abstract.",
            "keywords": "keywords",
            "content": "Content."
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "title must not be empty");
}

#[tokio::test]
async fn test_publish_missing_abstract() {
    let app = TestApp::spawn().await;

    let (_user_id, token) = app
        .register_user("Grace Hopper", "grace@example.edu", "pass_word!")
        .await;

    // The key is absent entirely, not just empty
    let response = app
        .post_authenticated("/api/articles", &token)
        .json(&json!({
            "title": "A Title",
            "author": "G. Hopper",
            "keywords": "keywords",
            "content": "Content."
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "abstract must not be empty");
}

#[tokio::test]
async fn test_publish_with_deleted_account() {
    let app = TestApp::spawn().await;

    let (user_id, token) = app
        .register_user("Grace Hopper", "grace@example.edu", "pass_word!")
        .await;

    sqlx::query("DELETE FROM users WHERE id = ?1")
        .bind(&user_id)
        .execute(&app.db.pool)
        .await
        .expect("Failed to delete user");

    let response = app
        .post_authenticated("/api/articles", &token)
        .json(&json!({
            "title": "Posthumous Work",
            "author": "G. Hopper",
            "abstract": "An abstract.",
            "keywords": "keywords",
            "content": "Content."
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("log in again"));
}

#[tokio::test]
async fn test_get_article_not_found() {
    let app = TestApp::spawn().await;

    let fake_uuid = uuid::Uuid::new_v4().to_string();
    let response = app
        .get(&format!("/api/articles/{}", fake_uuid))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("not found"));
}

#[tokio::test]
async fn test_get_article_invalid_id() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/articles/not-a-uuid")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("Invalid article ID"));
}

#[tokio::test]
async fn test_list_articles_newest_first() {
    let app = TestApp::spawn().await;

    let (_user_id, token) = app
        .register_user("Grace Hopper", "grace@example.edu", "pass_word!")
        .await;

    app.publish_article(&token, "First Article").await;
    app.publish_article(&token, "Second Article").await;
    app.publish_article(&token, "Third Article").await;

    let response = app
        .get("/api/articles")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pages"], 1);

    let titles: Vec<&str> = body["articles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Third Article", "Second Article", "First Article"]);
}

#[tokio::test]
async fn test_list_articles_pagination() {
    let app = TestApp::spawn().await;

    let (_user_id, token) = app
        .register_user("Grace Hopper", "grace@example.edu", "pass_word!")
        .await;

    for n in 1..=5 {
        app.publish_article(&token, &format!("Article {}", n)).await;
    }

    // First page of two
    let response = app
        .get("/api/articles?page=1&pageSize=2")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 5);
    assert_eq!(body["pages"], 3);
    assert_eq!(body["articles"].as_array().unwrap().len(), 2);
    assert_eq!(body["articles"][0]["title"], "Article 5");

    // Last page holds the remainder
    let last_page = app
        .get("/api/articles?page=3&pageSize=2")
        .send()
        .await
        .expect("Failed to execute request");

    let last_body: serde_json::Value = last_page.json().await.expect("Failed to parse response");
    assert_eq!(last_body["articles"].as_array().unwrap().len(), 1);
    assert_eq!(last_body["articles"][0]["title"], "Article 1");

    // Past the end is an empty page, not an error
    let beyond = app
        .get("/api/articles?page=4&pageSize=2")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(beyond.status(), StatusCode::OK);

    let beyond_body: serde_json::Value = beyond.json().await.expect("Failed to parse response");
    assert_eq!(beyond_body["total"], 5);
    assert_eq!(beyond_body["articles"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_articles_rejects_bad_paging() {
    let app = TestApp::spawn().await;

    let zero_page = app
        .get("/api/articles?page=0")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(zero_page.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = zero_page.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "page must be at least 1");

    let zero_size = app
        .get("/api/articles?pageSize=0")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(zero_size.status(), StatusCode::BAD_REQUEST);

    let size_body: serde_json::Value = zero_size.json().await.expect("Failed to parse response");
    assert_eq!(size_body["error"], "pageSize must be at least 1");
}

#[tokio::test]
async fn test_search_covers_title_abstract_and_keywords() {
    let app = TestApp::spawn().await;

    let (_user_id, token) = app
        .register_user("Grace Hopper", "grace@example.edu", "pass_word!")
        .await;

    // One match per searchable column
    app.post_authenticated("/api/articles", &token)
        .json(&json!({
            "title": "Quantum Entanglement Basics",
            "author": "G. Hopper",
            "abstract": "An introduction.",
            "keywords": "physics",
            "content": "Text."
        }))
        .send()
        .await
        .expect("Failed to execute request");

    app.post_authenticated("/api/articles", &token)
        .json(&json!({
            "title": "Error Correction Codes",
            "author": "G. Hopper",
            "abstract": "A survey of quantum methods.",
            "keywords": "codes",
            "content": "Text."
        }))
        .send()
        .await
        .expect("Failed to execute request");

    app.post_authenticated("/api/articles", &token)
        .json(&json!({
            "title": "Cooling Large Machines",
            "author": "G. Hopper",
            "abstract": "On refrigeration.",
            "keywords": "quantum computing, hardware",
            "content": "Text."
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get("/api/articles?q=quantum")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 3);

    // Case-insensitive
    let upper = app
        .get("/api/articles?q=QUANTUM")
        .send()
        .await
        .expect("Failed to execute request");

    let upper_body: serde_json::Value = upper.json().await.expect("Failed to parse response");
    assert_eq!(upper_body["total"], 3);

    // The body text is not part of the search, every content above says "Text."
    let content_only = app
        .get("/api/articles?q=text")
        .send()
        .await
        .expect("Failed to execute request");

    let content_body: serde_json::Value = content_only
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(content_body["total"], 0);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let app = TestApp::spawn().await;

    let (_user_id, token) = app
        .register_user("Grace Hopper", "grace@example.edu", "pass_word!")
        .await;

    app.publish_article(&token, "Scaling to 100% Coverage").await;
    app.publish_article(&token, "Scaling to 100 Nodes").await;

    // A percent sign in the term must not act as a LIKE wildcard
    let response = app
        .get("/api/articles?q=100%25")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 1);
    assert_eq!(body["articles"][0]["title"], "Scaling to 100% Coverage");
}

#[tokio::test]
async fn test_search_without_match() {
    let app = TestApp::spawn().await;

    let (_user_id, token) = app
        .register_user("Grace Hopper", "grace@example.edu", "pass_word!")
        .await;

    app.publish_article(&token, "An Article").await;

    let response = app
        .get("/api/articles?q=zebrafish")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 0);
    assert_eq!(body["pages"], 0);
    assert_eq!(body["articles"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_search_empty_term_lists_everything() {
    let app = TestApp::spawn().await;

    let (_user_id, token) = app
        .register_user("Grace Hopper", "grace@example.edu", "pass_word!")
        .await;

    app.publish_article(&token, "First Article").await;
    app.publish_article(&token, "Second Article").await;

    let response = app
        .get("/api/articles?q=")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 2);
}
