pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::store::MovieStore;

#[derive(Clone)]
pub struct AppState {
    pub movies: MovieStore,
}

/// Builds the HTTP surface over `state`.
///
/// With `cors` set, any origin is allowed with credentials. The request origin
/// is echoed back; a wildcard cannot carry credentials.
pub fn app(state: Arc<AppState>, cors: bool) -> Router {
    let mut app = Router::new()
        .route("/movies", post(routes::create_movie).get(routes::list_movies))
        .route(
            "/movies/{key}",
            get(routes::get_movie_by_title).post(routes::update_movie).delete(routes::delete_movie),
        )
        .route("/movies/director/{director}", get(routes::movies_by_director))
        .route("/movies/genres/{genre}", get(routes::movies_by_genre))
        .with_state(state);

    if cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true),
        );
    }

    app.layer(TraceLayer::new_for_http())
}
