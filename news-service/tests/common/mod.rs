#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::Duration;
use http_body_util::BodyExt;
use news_service::domain::access::IdentityResolver;
use news_service::domain::article::service::ArticleService;
use news_service::domain::source::service::SourceService;
use news_service::domain::user::models::EmailAddress;
use news_service::domain::user::models::Password;
use news_service::domain::user::models::RegisterUserCommand;
use news_service::domain::user::models::Username;
use news_service::domain::user::ports::UserServicePort;
use news_service::domain::user::service::UserService;
use news_service::inbound::http::router::create_router;
use news_service::inbound::http::router::AppState;
use news_service::outbound::repositories::InMemoryRepository;
use serde_json::json;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PASSWORD: &str = "pass_word!";

/// Router wired over the in-memory repository; no server or database involved.
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryRepository>,
    pub authenticator: Arc<Authenticator>,
    pub user_service: Arc<UserService<InMemoryRepository>>,
}

/// Decoded HTTP response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(30))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let repository = Arc::new(InMemoryRepository::new());
        let authenticator = Arc::new(Authenticator::new(JwtHandler::new(JWT_SECRET), ttl));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));

        let state = AppState {
            user_service: Arc::clone(&user_service) as Arc<dyn UserServicePort>,
            source_service: Arc::new(SourceService::new(Arc::clone(&repository))),
            article_service: Arc::new(ArticleService::new(
                Arc::clone(&repository),
                Arc::clone(&repository),
            )),
            identity_resolver: Arc::new(IdentityResolver::new(
                Arc::clone(&authenticator),
                Arc::clone(&repository),
            )),
        };

        Self {
            router: create_router(state),
            repository,
            authenticator,
            user_service,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("response body")
            .to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri, None, None).await
    }

    /// Register `username` with email `{username}@example.com` and return the user id.
    pub async fn register(&self, username: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/auth/register",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": PASSWORD,
                })),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["id"].as_i64().expect("user id")
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Register and log in; returns `(user_id, access_token)`.
    pub async fn register_and_login(&self, username: &str) -> (i64, String) {
        let id = self.register(username).await;
        let response = self
            .login(&format!("{username}@example.com"), PASSWORD)
            .await;

        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        let token = response.body["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string();

        (id, token)
    }

    /// Provision an administrator and log in; returns `(user_id, access_token)`.
    pub async fn admin(&self) -> (i64, String) {
        let command = RegisterUserCommand::new(
            Username::new("admin".to_string()).unwrap(),
            EmailAddress::new("admin@example.com".to_string()).unwrap(),
            Password::new(PASSWORD.to_string()).unwrap(),
        );
        self.user_service.provision_admin(command).await.unwrap();

        let response = self.login("admin@example.com", PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);

        let me = self
            .request(
                "GET",
                "/auth/me",
                response.body["data"]["access_token"].as_str(),
                None,
            )
            .await;

        (
            me.body["data"]["id"].as_i64().expect("admin id"),
            response.body["data"]["access_token"]
                .as_str()
                .expect("access token")
                .to_string(),
        )
    }

    pub async fn create_source(&self, token: &str, url: &str) -> TestResponse {
        self.request(
            "POST",
            "/sources",
            Some(token),
            Some(json!({
                "name": "Daily Planet",
                "url": url,
                "description": "Metropolis news",
            })),
        )
        .await
    }

    pub async fn create_article(&self, token: &str, source_id: i64, title: &str) -> TestResponse {
        self.request(
            "POST",
            "/articles",
            Some(token),
            Some(json!({
                "title": title,
                "summary": "Short summary",
                "content": "Full story",
                "author_name": "Lois Lane",
                "source_id": source_id,
            })),
        )
        .await
    }
}
