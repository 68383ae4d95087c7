mod support;

use axum::http::StatusCode;
use configs::StorageLayout;
use support::{body_text, location, session_cookie, TestApp};

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let app = TestApp::new(StorageLayout::Shared);
    let resp = app.get("/health", None).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(resp).await?)?;
    assert_eq!(json["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn test_forms_render() -> anyhow::Result<()> {
    let app = TestApp::new(StorageLayout::Shared);
    for uri in ["/login", "/register"] {
        let resp = app.get(uri, None).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await?;
        assert!(html.contains("name=\"username\""));
        assert!(html.contains("name=\"password\""));
    }
    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_rejected() -> anyhow::Result<()> {
    let app = TestApp::new(StorageLayout::Shared);

    let resp = app.post_form("/register", "username=alice&password=pw1", None).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/login"));

    let resp = app.post_form("/register", "username=alice&password=pw2", None).await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_text(resp).await?, "User exists");

    // the first password still works, the second never did
    let resp = app.post_form("/login", "username=alice&password=pw1", None).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let resp = app.post_form("/login", "username=alice&password=pw2", None).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_register_empty_username_rejected() -> anyhow::Result<()> {
    let app = TestApp::new(StorageLayout::Shared);
    let resp = app.post_form("/register", "username=&password=pw", None).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_login_sets_session_cookie() -> anyhow::Result<()> {
    let app = TestApp::new(StorageLayout::Shared);
    app.post_form("/register", "username=alice&password=pw1", None).await?;

    let resp = app.post_form("/login", "username=alice&password=pw1", None).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/"));
    let raw = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(raw.contains("HttpOnly"));
    assert!(raw.contains("Path=/"));
    assert!(session_cookie(&resp).is_some());
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password() -> anyhow::Result<()> {
    let app = TestApp::new(StorageLayout::Shared);
    app.post_form("/register", "username=alice&password=pw1", None).await?;

    let resp = app.post_form("/login", "username=alice&password=wrong", None).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&resp).is_none());
    assert_eq!(body_text(resp).await?, "Invalid login");

    let resp = app.post_form("/login", "username=nobody&password=pw1", None).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_protected_routes_redirect_to_login() -> anyhow::Result<()> {
    let app = TestApp::new(StorageLayout::Shared);
    for uri in ["/", "/add", "/edit/0", "/delete/0"] {
        let resp = app.get(uri, None).await?;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp), Some("/login"));
    }
    let resp = app.post_form("/add", &support::contact_form("Bob", "Lee"), None).await?;
    assert_eq!(location(&resp), Some("/login"));

    let resp = app.get("/", Some("session=forged.token.value")).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn test_logout_clears_cookie() -> anyhow::Result<()> {
    let app = TestApp::new(StorageLayout::Shared);
    let cookie = app.login_as("alice", "pw1").await?;

    let resp = app.get("/", Some(&cookie)).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.get("/logout", Some(&cookie)).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/login"));
    let cleared = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cleared.starts_with("session="));
    assert!(cleared.contains("Max-Age=0"));
    Ok(())
}

#[tokio::test]
async fn test_unreadable_stored_hashes_are_invalid_logins() -> anyhow::Result<()> {
    let app = TestApp::new(StorageLayout::Shared);
    std::fs::create_dir_all(&app.data_dir)?;
    std::fs::write(
        app.data_dir.join("accounts.json"),
        r#"{
            "alice": "$argon2pw",
            "bob": {"password_hash": "$argon2id$broken", "password_algorithm": "argon2"}
        }"#,
    )?;

    // a legacy plaintext password that merely looks like a hash still works
    let resp = app.post_form("/login", "username=alice&password=%24argon2pw", None).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(session_cookie(&resp).is_some());

    let resp = app.post_form("/login", "username=bob&password=%24argon2id%24broken", None).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(resp).await?, "Invalid login");
    Ok(())
}
