pub mod player;
pub mod playlist;
pub mod wav;

pub use player::AudioPlayer;
pub use playlist::Playlist;
pub use wav::Track;
