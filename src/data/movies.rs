//! Movie records and their validation rules

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::data::Runtime;
use crate::validator::{unique, Validator};

pub const MAX_TITLE_BYTES: usize = 500;
pub const EARLIEST_YEAR: i32 = 1888;
pub const MAX_GENRES: usize = 5;

/// A movie in the catalog.
///
/// `year`, `runtime` and `genres` are left out of the JSON output when they hold
/// their zero value, so a zero cannot be told apart from a missing value on the
/// wire. `created_at` is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub id: i64,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub year: i32,
    #[serde(skip_serializing_if = "Runtime::is_zero")]
    pub runtime: Runtime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    /// Starts at 1 and is bumped on every update.
    pub version: i32,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

/// Request body accepted when creating a movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateMovieInput {
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
}

impl CreateMovieInput {
    /// Build a not-yet-stored record; `id` stays 0 until one is assigned.
    pub fn into_movie(self, created_at: DateTime<Utc>) -> Movie {
        Movie {
            id: 0,
            created_at,
            title: self.title,
            year: self.year,
            runtime: self.runtime,
            genres: self.genres,
            version: 1,
        }
    }
}

/// Run every movie rule against `movie`, recording failures in `v`.
pub fn validate_movie(v: &mut Validator, movie: &Movie) {
    validate_movie_at(v, movie, Utc::now().year());
}

fn validate_movie_at(v: &mut Validator, movie: &Movie, current_year: i32) {
    v.check(!movie.title.is_empty(), "title", "must be provided");
    v.check(
        movie.title.len() <= MAX_TITLE_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );

    v.check(movie.year != 0, "year", "must be provided");
    v.check(
        movie.year >= EARLIEST_YEAR,
        "year",
        "must be 1888 or later",
    );
    v.check(
        movie.year <= current_year,
        "year",
        "must not be in the future",
    );

    v.check(!movie.runtime.is_zero(), "runtime", "must be provided");

    v.check(
        !movie.genres.is_empty(),
        "genres",
        "must contain at least 1 genre",
    );
    v.check(
        movie.genres.len() <= MAX_GENRES,
        "genres",
        "must not contain more than 5 genres",
    );
    v.check(
        unique(&movie.genres),
        "genres",
        "must not contain duplicate values",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT_YEAR: i32 = 2024;

    fn moana() -> Movie {
        Movie {
            id: 1,
            created_at: Utc::now(),
            title: "Moana".to_string(),
            year: 2016,
            runtime: Runtime(107),
            genres: vec!["animation".to_string(), "adventure".to_string()],
            version: 1,
        }
    }

    fn with(mutate: impl FnOnce(&mut Movie)) -> Movie {
        let mut movie = moana();
        mutate(&mut movie);
        movie
    }

    fn errors_for(movie: &Movie) -> Validator {
        let mut v = Validator::new();
        validate_movie_at(&mut v, movie, CURRENT_YEAR);
        v
    }

    #[test]
    fn test_valid_movie_has_no_errors() {
        let v = errors_for(&moana());
        assert!(v.valid());
        assert!(v.errors().is_empty());

        let mut edge = moana();
        edge.title = "x".repeat(MAX_TITLE_BYTES);
        edge.year = EARLIEST_YEAR;
        edge.genres = (0..MAX_GENRES).map(|i| format!("genre-{i}")).collect();
        assert!(errors_for(&edge).valid());

        edge.year = CURRENT_YEAR;
        assert!(errors_for(&edge).valid());
    }

    #[test]
    fn test_single_rule_violation_reports_single_key() {
        let cases = [
            ("title", "must be provided", with(|m| m.title.clear())),
            (
                "title",
                "must not be more than 500 bytes long",
                with(|m| m.title = "é".repeat(251)),
            ),
            ("year", "must be provided", with(|m| m.year = 0)),
            ("year", "must be 1888 or later", with(|m| m.year = 1887)),
            (
                "year",
                "must not be in the future",
                with(|m| m.year = CURRENT_YEAR + 1),
            ),
            ("runtime", "must be provided", with(|m| m.runtime = Runtime(0))),
            (
                "genres",
                "must contain at least 1 genre",
                with(|m| m.genres.clear()),
            ),
            (
                "genres",
                "must not contain more than 5 genres",
                with(|m| m.genres = (0..6).map(|i| i.to_string()).collect()),
            ),
            (
                "genres",
                "must not contain duplicate values",
                with(|m| m.genres = vec!["drama".into(), "drama".into()]),
            ),
        ];

        for (key, message, movie) in cases {
            let v = errors_for(&movie);
            assert_eq!(v.errors().len(), 1, "{key}: {:?}", v.errors());
            assert_eq!(v.errors()[key], message);
        }
    }

    #[test]
    fn test_all_failures_are_accumulated() {
        let movie = Movie {
            id: 1,
            created_at: Utc::now(),
            title: String::new(),
            year: 0,
            runtime: Runtime(0),
            genres: Vec::new(),
            version: 1,
        };

        let v = errors_for(&movie);
        let keys: Vec<&str> = v.errors().keys().map(String::as_str).collect();
        assert_eq!(keys, ["genres", "runtime", "title", "year"]);
        assert_eq!(v.errors()["year"], "must be provided");
    }

    #[test]
    fn test_serialization_omits_zero_values_and_created_at() {
        let value = serde_json::to_value(moana()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "title": "Moana",
                "year": 2016,
                "runtime": "107 mins",
                "genres": ["animation", "adventure"],
                "version": 1
            })
        );

        let bare = Movie {
            year: 0,
            runtime: Runtime(0),
            genres: Vec::new(),
            ..moana()
        };
        assert_eq!(
            serde_json::to_value(bare).unwrap(),
            serde_json::json!({ "id": 1, "title": "Moana", "version": 1 })
        );
    }

    #[test]
    fn test_input_into_movie_defaults_version() {
        let input = CreateMovieInput {
            title: "Moana".into(),
            year: 2016,
            runtime: Runtime(107),
            genres: vec!["animation".into()],
        };
        let now = Utc::now();
        let movie = input.clone().into_movie(now);

        assert_eq!(movie.version, 1);
        assert_eq!(movie.created_at, now);
        assert_eq!(movie.title, input.title);
        assert_eq!(movie.runtime, input.runtime);
    }

    #[test]
    fn test_validate_movie_uses_current_year() {
        let mut v = Validator::new();
        validate_movie(&mut v, &moana());
        assert!(v.valid());
    }
}
