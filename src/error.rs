use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config Error: {0}")]
    Config(String),

    #[error("Config Source Error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Track {id}: first frame {first} is after last frame {last}")]
    InvalidTrack { id: String, first: u32, last: u32 },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
}
