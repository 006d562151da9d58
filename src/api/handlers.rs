//! API handlers

use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, State},
    http::{Method, StatusCode},
    response::Response,
};
use chrono::Utc;
use serde::Serialize;

use crate::api::json::{read_json, write_json};
use crate::api::params::parse_id;
use crate::api::{ApiError, AppState};
use crate::data::movies::CreateMovieInput;
use crate::data::{validate_movie, Movie, Runtime};
use crate::validator::Validator;

#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub environment: &'static str,
    pub version: &'static str,
}

/// Report application status, operating environment and version
pub async fn healthcheck(State(state): State<AppState>) -> Result<Response, ApiError> {
    let health = HealthCheck {
        status: "available",
        environment: state.env.as_str(),
        version: state.version,
    };

    Ok(write_json(StatusCode::OK, &health, None)?)
}

/// Decode and validate a new movie, echoing the accepted input.
///
/// Nothing is stored yet.
pub async fn create_movie(
    State(state): State<AppState>,
    body: Body,
) -> Result<Response, ApiError> {
    let input: CreateMovieInput = read_json(&state.decoder, body).await?;

    let movie = input.clone().into_movie(Utc::now());
    let mut v = Validator::new();
    validate_movie(&mut v, &movie);
    v.into_result()?;

    tracing::debug!(title = %movie.title, "movie input accepted");

    Ok(write_json(StatusCode::OK, &input, None)?)
}

/// Show a placeholder movie for the requested id
pub async fn show_movie(
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    // An id that does not even decode as UTF-8 cannot name a movie.
    let Ok(Path(id)) = id else {
        return Err(ApiError::not_found());
    };
    let id = parse_id(&id)?;

    let movie = Movie {
        id,
        created_at: Utc::now(),
        title: "Casablanca".to_string(),
        year: 0,
        runtime: Runtime(102),
        genres: vec!["drama".to_string(), "romance".to_string(), "war".to_string()],
        version: 1,
    };

    Ok(write_json(StatusCode::OK, &movie, None)?)
}

pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(&method)
}
