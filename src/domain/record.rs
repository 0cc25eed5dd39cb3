use std::fmt::Display;

/// Everything that ends up in the tag of one song
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: u32,
    pub track_no: u32,
    pub track_count: u32,
    pub lyrics: String,
    pub cover: Option<Cover>,
}

/// Album cover image together with its MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    pub data: Vec<u8>,
    pub mime: String,
}

impl Cover {
    pub const DEFAULT_MIME: &'static str = "image/jpeg";

    pub fn new(data: Vec<u8>, mime: Option<&str>) -> Self {
        let mime = mime
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(Self::DEFAULT_MIME);
        Self {
            data,
            mime: mime.to_string(),
        }
    }
}

impl Display for MetadataRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Title:  {}", self.title)?;
        writeln!(f, "Artist: {}", self.artist)?;
        writeln!(f, "Album:  {}", self.album)?;
        writeln!(f, "Year:   {}", self.year)?;
        writeln!(f, "Track:  {}/{}", self.track_no, self.track_count)?;
        writeln!(f, "Lyrics: {} lines", self.lyrics.lines().count())?;
        match &self.cover {
            Some(cover) => write!(f, "Cover:  {} ({} bytes)", cover.mime, cover.data.len()),
            None => write!(f, "Cover:  no cover"),
        }
    }
}
