//! Domain types for the movie catalog

pub mod movies;
pub mod runtime;

pub use movies::{validate_movie, Movie};
pub use runtime::Runtime;
