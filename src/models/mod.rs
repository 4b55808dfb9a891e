mod movie;
mod recommendation;

pub use movie::{
    release_year, CastMember, Genre, Movie, MovieDetails, MovieDetailsWithCast, TmdbCastMember,
    TmdbCredits, TmdbMovie, TmdbMovieDetails, TmdbSearchResponse,
};
pub use recommendation::{is_sample_only, Recommendation};
