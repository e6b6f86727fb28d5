use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use tracing::{debug, info};

use crate::{
    AppState,
    entities::movie,
    error::{AppError, AppResult},
    models::{Deleted, Movie, MoviePatch, NewMovie, Updated},
};

type Payload<T> = WithRejection<Json<T>, AppError>;

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(new), _): Payload<NewMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    new.validate()?;

    let created = state
        .movies
        .insert(new)
        .await
        .map_err(|e| AppError::internal("Failed to add movie.", e))?;

    info!(id = %created.id, title = %created.title, "movie created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn get_movie_by_title(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> AppResult<Json<Movie>> {
    let movie = state
        .movies
        .find_by_title(&title)
        .await
        .map_err(|e| AppError::internal("Failed to fetch movie.", e))?
        .ok_or(AppError::NotFound("Movie not found."))?;

    Ok(Json(movie.into()))
}

pub async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    let movies = state
        .movies
        .find_all()
        .await
        .map_err(|e| AppError::internal("Failed to fetch movies.", e))?;

    debug!(count = movies.len(), "listed movies");
    non_empty(movies, "No movies found.")
}

pub async fn movies_by_director(
    State(state): State<Arc<AppState>>,
    Path(director): Path<String>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = state
        .movies
        .find_by_director(&director)
        .await
        .map_err(|e| AppError::internal("Failed to fetch movies.", e))?;

    debug!(%director, count = movies.len(), "movies by director");
    non_empty(movies, "No movies found.")
}

pub async fn movies_by_genre(
    State(state): State<Arc<AppState>>,
    Path(genre): Path<String>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = state
        .movies
        .find_by_genre(&genre)
        .await
        .map_err(|e| AppError::internal("Failed to fetch movies.", e))?;

    debug!(%genre, count = movies.len(), "movies by genre");
    non_empty(movies, "Movies not found.")
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    WithRejection(Json(patch), _): Payload<MoviePatch>,
) -> AppResult<Json<Updated>> {
    patch.validate()?;

    let updated = state
        .movies
        .update_by_id(&id, patch)
        .await
        .map_err(|e| AppError::internal("Failed to update movie.", e))?
        .ok_or(AppError::NotFound("Movie not found."))?;

    info!(%id, "movie updated");
    Ok(Json(Updated { message: "Movie updated successfully.", movie: updated.into() }))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Deleted>> {
    let deleted = state
        .movies
        .delete_by_id(&id)
        .await
        .map_err(|e| AppError::internal("Failed to delete movie.", e))?
        .ok_or(AppError::NotFound("Movie not found."))?;

    info!(%id, title = %deleted.title, "movie deleted");
    Ok(Json(Deleted { message: "Movie deleted successfully." }))
}

fn non_empty(movies: Vec<movie::Model>, not_found: &'static str) -> AppResult<Json<Vec<Movie>>> {
    if movies.is_empty() {
        return Err(AppError::NotFound(not_found));
    }
    Ok(Json(movies.into_iter().map(Movie::from).collect()))
}
