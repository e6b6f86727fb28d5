//! Concurrent writers against a file-backed database with a multi-connection pool.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use movie_api::{
    AppState, db,
    models::{MoviePatch, NewMovie},
    store::MovieStore,
};
use tempfile::TempDir;
use tower::ServiceExt;

const WRITERS: usize = 40;

async fn file_store() -> (TempDir, MovieStore) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("movies.db").display());
    let db = db::connect_and_migrate(&url, 5).await.unwrap();
    (dir, MovieStore::new(db))
}

fn lagaan() -> NewMovie {
    NewMovie {
        title: "Lagaan".to_string(),
        release_year: Some(2001),
        genre: vec!["Drama".to_string()],
        director: Some("Ashutosh Gowariker".to_string()),
        rating: Some(8.1),
        ..Default::default()
    }
}

fn rating_for(i: usize) -> f64 {
    (i % 10) as f64 + 0.5
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_to_one_movie_all_succeed() {
    let (_dir, store) = file_store().await;
    let created = store.insert(lagaan()).await.unwrap();

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let store = store.clone();
            let id = created.id.clone();
            tokio::spawn(async move {
                let patch = MoviePatch { rating: Some(rating_for(i)), ..Default::default() };
                store.update_by_id(&id, patch).await
            })
        })
        .collect();

    for handle in handles {
        let updated = handle.await.unwrap().unwrap().unwrap();
        assert_eq!(updated.id, created.id);
    }

    let stored = store.find_by_id(&created.id).await.unwrap().unwrap();
    let rating = stored.rating.unwrap();
    assert!((0..WRITERS).any(|i| rating_for(i) == rating));
    assert_eq!(stored.title, created.title);
    assert_eq!(stored.genre, created.genre);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deletes_remove_exactly_once() {
    let (_dir, store) = file_store().await;
    let created = store.insert(lagaan()).await.unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = store.clone();
            let id = created.id.clone();
            tokio::spawn(async move { store.delete_by_id(&id).await })
        })
        .collect();

    let mut removed = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_some() {
            removed += 1;
        }
    }
    assert_eq!(removed, 1);
    assert!(store.find_by_id(&created.id).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_update_requests_never_fail() {
    let (_dir, store) = file_store().await;
    let created = store.insert(lagaan()).await.unwrap();
    let app = movie_api::app(Arc::new(AppState { movies: store.clone() }), true);

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let app = app.clone();
            let uri = format!("/movies/{}", created.id);
            tokio::spawn(async move {
                let body = serde_json::json!({ "rating": rating_for(i) }).to_string();
                let req = Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap();
                app.oneshot(req).await.unwrap().status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }
}
