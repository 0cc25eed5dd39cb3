use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("id3 error: {0}")]
    Id3(#[from] id3::Error),

    #[error("filesystem error: {0}")]
    Fs(#[from] std::io::Error),
}
