//! Integration tests per gli endpoints di autenticazione
//!
//! Test per:
//! - POST /auth/signup
//! - POST /auth/login

mod common;

#[cfg(test)]
mod auth_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::json;

    // ============================================================
    // Test per POST /auth/signup - signup_user
    // ============================================================

    #[tokio::test]
    async fn test_signup_success() {
        let ctx = TestContext::new().await;

        let response = ctx
            .server
            .post("/auth/signup")
            .json(&json!({
                "username": "testuser",
                "email": "test@test.com",
                "password": "HASHED_PASSWORD"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let user: serde_json::Value = response.json();
        assert_eq!(user["username"], "testuser");
        assert_eq!(user["email"], "test@test.com");
        assert_eq!(user["image_url"], "/static/images/default-pic.png");
        assert!(user.get("password").is_none(), "Password must never be returned");
    }

    #[tokio::test]
    async fn test_signup_duplicate_username() {
        let ctx = TestContext::new().await;
        ctx.create_user("testuser").await;

        let response = ctx
            .server
            .post("/auth/signup")
            .json(&json!({
                "username": "testuser",
                "email": "other@test.com",
                "password": "HASHED_PASSWORD"
            }))
            .await;

        response.assert_status_conflict();
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let ctx = TestContext::new().await;
        ctx.create_user("testuser").await;

        let response = ctx
            .server
            .post("/auth/signup")
            .json(&json!({
                "username": "otheruser",
                "email": "testuser@test.com",
                "password": "HASHED_PASSWORD"
            }))
            .await;

        response.assert_status_conflict();
    }

    #[tokio::test]
    async fn test_signup_invalid_payload() {
        let ctx = TestContext::new().await;

        let response = ctx
            .server
            .post("/auth/signup")
            .json(&json!({
                "username": "testuser",
                "email": "not-an-email",
                "password": "123"
            }))
            .await;

        response.assert_status_bad_request();
    }

    // ============================================================
    // Test per POST /auth/login - login_user
    // ============================================================

    #[tokio::test]
    async fn test_login_success() {
        let ctx = TestContext::new().await;
        ctx.create_user("test2user").await;

        let response = ctx
            .server
            .post("/auth/login")
            .json(&json!({
                "username": "test2user",
                "password": TEST_PASSWORD
            }))
            .await;

        response.assert_status_ok();

        let auth_header = response.header("authorization");
        let auth_header = auth_header.to_str().unwrap();
        assert!(
            auth_header.starts_with("Bearer "),
            "Authorization should start with 'Bearer '"
        );

        let body: serde_json::Value = response.json();
        assert_eq!(body["user"]["username"], "test2user");
        assert_eq!(format!("Bearer {}", body["token"].as_str().unwrap()), auth_header);
    }

    #[tokio::test]
    async fn test_login_token_opens_protected_routes() {
        let ctx = TestContext::new().await;
        ctx.create_user("test2user").await;

        let login = ctx
            .server
            .post("/auth/login")
            .json(&json!({ "username": "test2user", "password": TEST_PASSWORD }))
            .await;
        let token = login.json::<serde_json::Value>()["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = ctx
            .server
            .get("/timeline")
            .add_header(
                axum::http::HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let ctx = TestContext::new().await;
        ctx.create_user("test2user").await;

        let response = ctx
            .server
            .post("/auth/login")
            .json(&json!({
                "username": "test2user",
                "password": "WRONG_PASSWORD"
            }))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_login_nonexistent_user() {
        let ctx = TestContext::new().await;

        let response = ctx
            .server
            .post("/auth/login")
            .json(&json!({
                "username": "nonexistent",
                "password": "password123"
            }))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_login_missing_password() {
        let ctx = TestContext::new().await;

        let response = ctx
            .server
            .post("/auth/login")
            .json(&json!({ "username": "test2user" }))
            .await;

        // 422 Unprocessable Entity quando manca un campo obbligatorio
        response.assert_status_unprocessable_entity();
    }

    // ============================================================
    // Middleware di autenticazione
    // ============================================================

    #[tokio::test]
    async fn test_protected_route_without_token() {
        let ctx = TestContext::new().await;

        let response = ctx.server.get("/timeline").await;

        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_protected_route_with_invalid_token() {
        let ctx = TestContext::new().await;

        let response = ctx
            .server
            .get("/timeline")
            .add_header(
                axum::http::HeaderName::from_static("authorization"),
                "Bearer not-a-jwt".to_string(),
            )
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_token_of_deleted_user_is_rejected() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("test2user").await;

        ctx.authorized(ctx.server.delete("/users/me"), &user)
            .await
            .assert_status_ok();

        let response = ctx.authorized(ctx.server.get("/timeline"), &user).await;
        response.assert_status_unauthorized();
    }
}
