mod detail;
mod movie;

pub use detail::{CastMember, CreditsResponse, MovieDetails, Video, VideosResponse};
pub use movie::{Genre, GenreListResponse, Movie, MoviePage};
