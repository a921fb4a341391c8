// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, form, response, upload},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, forms, upload).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Owner- or responder-gated routes require a valid bearer token.
    let protected_form_routes = Router::new()
        .route("/", post(form::create_form))
        .route("/form/mine", get(form::list_my_forms))
        .route("/allresponses", get(response::list_all_responses_by_user))
        .route("/responses/{response_id}", get(response::get_single_response))
        .route(
            "/{id}/responses",
            post(response::submit_response).get(response::list_responses),
        )
        .route("/{id}", put(form::update_form))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Forms are publicly readable by id: this is the fill link.
    let form_routes = protected_form_routes.merge(Router::new().route("/{id}", get(form::get_form)));

    let upload_routes = Router::new().route("/", post(upload::upload_image));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/forms", form_routes)
        .nest("/api/upload", upload_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
