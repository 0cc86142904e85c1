use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::articles::create_article;
use super::handlers::articles::delete_article;
use super::handlers::articles::get_article;
use super::handlers::articles::list_articles;
use super::handlers::articles::update_article;
use super::handlers::auth::login;
use super::handlers::auth::me;
use super::handlers::auth::register;
use super::handlers::sources::create_source;
use super::handlers::sources::delete_source;
use super::handlers::sources::get_source;
use super::handlers::sources::list_source_articles;
use super::handlers::sources::list_sources;
use super::handlers::sources::update_source;
use super::middleware::authenticate as auth_middleware;
use crate::domain::access::resolver::IdentityResolverPort;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::source::ports::SourceServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub source_service: Arc<dyn SourceServicePort>,
    pub article_service: Arc<dyn ArticleServicePort>,
    pub identity_resolver: Arc<dyn IdentityResolverPort>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/sources", get(list_sources))
        .route("/sources/:id", get(get_source))
        .route("/sources/:id/articles", get(list_source_articles))
        .route("/articles", get(list_articles))
        .route("/articles/:id", get(get_article));

    let protected_routes = Router::new()
        .route("/auth/me", get(me))
        .route("/sources", post(create_source))
        .route(
            "/sources/:id",
            patch(update_source).delete(delete_source),
        )
        .route("/articles", post(create_article))
        .route(
            "/articles/:id",
            patch(update_article).delete(delete_article),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
