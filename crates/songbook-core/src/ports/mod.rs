pub mod metadata;
pub mod song_repository;

pub use metadata::{MetadataError, MetadataProvider};
pub use song_repository::{RepoError, SongRepository};
