use std::fmt::Display;

use thiserror::Error;

use crate::domain::MetadataRecord;

/// Page fields without which the scraped record is useless
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Lyrics,
    Title,
    Artist,
    Album,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Lyrics => "song lyrics",
            Field::Title => "song title",
            Field::Artist => "artist name",
            Field::Album => "album name",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unable to resolve song URL")]
    Resolve,

    /// `partial` holds whatever was extracted before `field` went missing
    #[error("unable to parse {field}")]
    Extract {
        field: Field,
        partial: Box<MetadataRecord>,
    },

    #[error("invalid selector: {0}")]
    Selector(String),
}

impl ScrapeError {
    pub fn extract(field: Field, partial: MetadataRecord) -> Self {
        Self::Extract {
            field,
            partial: Box::new(partial),
        }
    }
}
