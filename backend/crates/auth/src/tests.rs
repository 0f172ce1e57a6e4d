//! Router tests for the auth crate
//! Every request goes through the full router against an in-memory store.

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use chrono::Utc;
    use platform::store::MemoryDocumentStore;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::application::config::AuthConfig;
    use crate::application::token_service::{Claims, TOKEN_TTL, TokenService};
    use crate::domain::value_object::{email::Email, subject_id::SubjectId};
    use crate::presentation::router::auth_router_generic;

    const BOOTSTRAP_ADMIN: &str = "boss@bistro.com";

    struct TestApp {
        router: Router,
        tokens: Arc<TokenService>,
    }

    fn app() -> TestApp {
        let config = AuthConfig {
            bootstrap_admin_email: Some(Email::new(BOOTSTRAP_ADMIN).unwrap()),
            ..AuthConfig::development()
        };
        let tokens = Arc::new(TokenService::from_config(&config));
        let router = auth_router_generic(MemoryDocumentStore::new(), config, tokens.clone());
        TestApp { router, tokens }
    }

    impl TestApp {
        async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, json)
        }

        async fn register_staff(&self, email: &str, password: &str) -> (StatusCode, Value) {
            self.send(
                Method::POST,
                "/api/staff/register",
                None,
                Some(json!({
                    "first_name": "Remy",
                    "last_name": "Rat",
                    "email": email,
                    "password": password,
                })),
            )
            .await
        }

        async fn register_guest(&self, email: &str, password: &str) -> (StatusCode, Value) {
            self.send(
                Method::POST,
                "/api/guests/register",
                None,
                Some(json!({"username": "hungry", "email": email, "password": password})),
            )
            .await
        }

        async fn login(&self, kind: &str, email: &str, password: &str) -> (StatusCode, Value) {
            self.send(
                Method::POST,
                &format!("/api/{kind}/login"),
                None,
                Some(json!({"email": email, "password": password})),
            )
            .await
        }

        async fn token(&self, kind: &str, email: &str, password: &str) -> String {
            let (status, body) = self.login(kind, email, password).await;
            assert_eq!(status, StatusCode::OK, "{body}");
            body["token"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn test_register_returns_inserted_id() {
        let app = app();
        let (status, body) = app.register_staff("remy@bistro.com", "ratatouille").await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(Uuid::parse_str(body["inserted_id"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_not_acceptable() {
        let app = app();
        app.register_guest("anna@bistro.com", "strudel").await;
        let (status, body) = app.register_guest("anna@bistro.com", "other-pass").await;

        assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
        assert_eq!(body["error_code"], 406);
        assert_eq!(body["error_message"], "email already used");
    }

    #[tokio::test]
    async fn test_login_response_shape() {
        let app = app();
        app.register_staff("remy@bistro.com", "ratatouille").await;
        let (status, body) = app.login("staff", "remy@bistro.com", "ratatouille").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status_code"], 200);
        assert_eq!(body["message"], "user is logged in");
        assert!(!body["token"].as_str().unwrap().is_empty());
        assert_eq!(body["user"]["email"], "remy@bistro.com");
        assert_eq!(body["user"]["is_admin"], false);
        assert!(body["user"].get("password").is_none());

        let principal = app.tokens.verify(body["token"].as_str().unwrap()).unwrap();
        assert_eq!(principal.display_name, "Remy");
    }

    #[tokio::test]
    async fn test_guest_login_records_logged_at() {
        let app = app();
        app.register_guest("anna@bistro.com", "strudel").await;
        let (status, body) = app.login("guests", "anna@bistro.com", "strudel").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["user"]["logged_at"].is_i64());
        assert!(body["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_bad_credentials_are_unauthorized() {
        let app = app();
        app.register_staff("remy@bistro.com", "ratatouille").await;

        let (status, body) = app.login("staff", "remy@bistro.com", "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], 401);

        let (status, _) = app.login("staff", "ghost@bistro.com", "ratatouille").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app();
        let (status, body) = app
            .send(
                Method::POST,
                "/api/staff/register",
                None,
                Some(json!({"email": 42})),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["error_message"]
                .as_str()
                .unwrap()
                .starts_with("unable to decode request body")
        );
    }

    #[tokio::test]
    async fn test_gate_rejects_missing_and_invalid_tokens() {
        let app = app();

        let (status, body) = app.send(Method::GET, "/api/dashboard", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_message"], "Missing auth token");

        let (status, _) = app
            .send(Method::GET, "/api/dashboard", Some("not.a.token"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let foreign = TokenService::new(b"another-restaurant")
            .issue(SubjectId::Uuid(Uuid::new_v4()), "Eve", "eve@x.io", true)
            .unwrap();
        let (status, _) = app.send(Method::GET, "/api/staff", Some(&foreign), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let app = app();
        let issued_at = Utc::now().timestamp() - TOKEN_TTL.as_secs() as i64 - 1;
        let claims = Claims::new(
            SubjectId::Uuid(Uuid::new_v4()),
            "Boss",
            BOOTSTRAP_ADMIN,
            true,
            issued_at,
        );
        let expired = app.tokens.sign(&claims).unwrap();

        let (status, body) = app.send(Method::GET, "/api/staff", Some(&expired), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], 401);
    }

    #[tokio::test]
    async fn test_dashboard_with_valid_token() {
        let app = app();
        app.register_guest("anna@bistro.com", "strudel").await;
        let token = app.token("guests", "anna@bistro.com", "strudel").await;

        let (status, _) = app.send(Method::GET, "/api/dashboard", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_staff_routes_require_admin() {
        let app = app();
        app.register_staff("cook@bistro.com", "carbonara").await;
        app.register_staff(BOOTSTRAP_ADMIN, "tiramisu").await;

        let cook = app.token("staff", "cook@bistro.com", "carbonara").await;
        let (status, body) = app.send(Method::GET, "/api/staff", Some(&cook), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error_code"], 403);

        let boss = app.token("staff", BOOTSTRAP_ADMIN, "tiramisu").await;
        let (status, body) = app.send(Method::GET, "/api/staff", Some(&boss), None).await;
        assert_eq!(status, StatusCode::OK);
        let staff = body.as_array().unwrap();
        assert_eq!(staff.len(), 2);
        assert!(staff.iter().all(|s| s.get("password").is_none()));
    }

    #[tokio::test]
    async fn test_public_registration_cannot_claim_admin() {
        let app = app();
        let (status, _) = app
            .send(
                Method::POST,
                "/api/staff/register",
                None,
                Some(json!({
                    "first_name": "Mallory",
                    "email": "mallory@bistro.com",
                    "password": "let-me-in",
                    "is_admin": true,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = app.login("staff", "mallory@bistro.com", "let-me-in").await;
        assert_eq!(body["user"]["is_admin"], false);
    }

    #[tokio::test]
    async fn test_admin_can_promote_staff() {
        let app = app();
        let (_, body) = app.register_staff("cook@bistro.com", "carbonara").await;
        let cook_id = body["inserted_id"].as_str().unwrap().to_string();
        app.register_staff(BOOTSTRAP_ADMIN, "tiramisu").await;
        let boss = app.token("staff", BOOTSTRAP_ADMIN, "tiramisu").await;

        let (status, body) = app
            .send(
                Method::PUT,
                &format!("/api/staff/{cook_id}"),
                Some(&boss),
                Some(json!({"is_admin": true})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_admin"], true);
        assert_eq!(body["first_name"], "Remy");
        assert!(body.get("password").is_none());

        let cook = app.token("staff", "cook@bistro.com", "carbonara").await;
        let (status, _) = app.send(Method::GET, "/api/staff", Some(&cook), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_path_id_is_bad_request() {
        let app = app();
        app.register_staff(BOOTSTRAP_ADMIN, "tiramisu").await;
        let boss = app.token("staff", BOOTSTRAP_ADMIN, "tiramisu").await;

        let (status, body) = app
            .send(Method::GET, "/api/staff/not-a-uuid", Some(&boss), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["error_message"]
                .as_str()
                .unwrap()
                .starts_with("unable to retrieve parameters")
        );
    }

    #[tokio::test]
    async fn test_guest_update_and_delete() {
        let app = app();
        let (_, body) = app.register_guest("anna@bistro.com", "strudel").await;
        let anna_id = body["inserted_id"].as_str().unwrap().to_string();
        let token = app.token("guests", "anna@bistro.com", "strudel").await;
        let uri = format!("/api/guests/{anna_id}");

        let (status, body) = app
            .send(
                Method::PUT,
                &uri,
                Some(&token),
                Some(json!({"username": "anna_b", "password": "sachertorte"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "anna_b");
        assert_eq!(body["email"], "anna@bistro.com");
        assert!(body.get("password").is_none());

        // Password change takes effect
        let (status, _) = app.login("guests", "anna@bistro.com", "strudel").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        app.token("guests", "anna@bistro.com", "sachertorte").await;

        let (status, body) = app.send(Method::GET, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "anna_b");

        let (status, body) = app.send(Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted_count"], 1);

        let (status, body) = app.send(Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_code"], 404);

        let (status, _) = app.send(Method::GET, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
