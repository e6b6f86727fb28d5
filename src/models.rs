use serde::{Deserialize, Serialize};

use crate::{entities::movie, error::InvalidField};

/// Earliest year a motion picture could have been released.
const FIRST_FILM_YEAR: i32 = 1888;
/// How far ahead of the current year an announced release may be dated.
const MAX_YEARS_AHEAD: i32 = 10;

/// A stored movie as returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    pub genre: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    pub actors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            release_year: m.release_year,
            genre: m.genre.0,
            director: m.director,
            actors: m.actors.0,
            language: m.language,
            country: m.country,
            rating: m.rating,
            plot: m.plot,
            awards: m.awards,
            poster_url: m.poster_url,
            trailer_url: m.trailer_url,
        }
    }
}

/// Payload for creating a movie. Unknown fields, including `id`, are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub release_year: Option<i32>,
    #[serde(default)]
    pub genre: Vec<String>,
    pub director: Option<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub rating: Option<f64>,
    pub plot: Option<String>,
    pub awards: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
}

impl NewMovie {
    pub fn validate(&self) -> Result<(), InvalidField> {
        check_title(&self.title)?;
        check_common(
            self.release_year,
            self.rating,
            Some(self.genre.as_slice()),
            Some(self.actors.as_slice()),
            self.poster_url.as_deref(),
            self.trailer_url.as_deref(),
        )
    }
}

/// Partial update. `None` (absent or `null`) leaves the stored value as is.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePatch {
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub genre: Option<Vec<String>>,
    pub director: Option<String>,
    pub actors: Option<Vec<String>>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub rating: Option<f64>,
    pub plot: Option<String>,
    pub awards: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
}

impl MoviePatch {
    pub fn validate(&self) -> Result<(), InvalidField> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        check_common(
            self.release_year,
            self.rating,
            self.genre.as_deref(),
            self.actors.as_deref(),
            self.poster_url.as_deref(),
            self.trailer_url.as_deref(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct Updated {
    pub message: &'static str,
    pub movie: Movie,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: &'static str,
}

fn check_title(title: &str) -> Result<(), InvalidField> {
    if title.trim().is_empty() {
        return Err(InvalidField::new("title", "must not be blank"));
    }
    Ok(())
}

fn check_common(
    release_year: Option<i32>,
    rating: Option<f64>,
    genre: Option<&[String]>,
    actors: Option<&[String]>,
    poster_url: Option<&str>,
    trailer_url: Option<&str>,
) -> Result<(), InvalidField> {
    if let Some(year) = release_year {
        let today: jiff::civil::Date = jiff::Zoned::now().into();
        let latest = i32::from(today.year()) + MAX_YEARS_AHEAD;
        if !(FIRST_FILM_YEAR..=latest).contains(&year) {
            return Err(InvalidField::new("releaseYear", "is out of range"));
        }
    }

    if let Some(rating) = rating {
        if !rating.is_finite() || !(0.0..=10.0).contains(&rating) {
            return Err(InvalidField::new("rating", "must be between 0 and 10"));
        }
    }

    if genre.is_some_and(has_blank) {
        return Err(InvalidField::new("genre", "entries must not be blank"));
    }
    if actors.is_some_and(has_blank) {
        return Err(InvalidField::new("actors", "entries must not be blank"));
    }

    if poster_url.is_some_and(|u| !is_http_url(u)) {
        return Err(InvalidField::new("posterUrl", "must be an http(s) URL"));
    }
    if trailer_url.is_some_and(|u| !is_http_url(u)) {
        return Err(InvalidField::new("trailerUrl", "must be an http(s) URL"));
    }

    Ok(())
}

fn has_blank(values: &[String]) -> bool {
    values.iter().any(|v| v.trim().is_empty())
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or_default();
    !rest.is_empty() && !rest.starts_with('/') && !rest.contains(char::is_whitespace)
}
