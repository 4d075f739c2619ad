pub mod ids;
pub mod page;
pub mod song;

pub use ids::SongId;
pub use page::PageRequest;
pub use song::{AddSong, NewSong, Song, SongDetails, SongFilter, SongPatch, parse_release_date};
