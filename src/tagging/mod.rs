//! Writing the record into the ID3v2 tag of an MP3 file

use std::path::{Path, PathBuf};

use id3::{
    ErrorKind, Tag, TagLike, Version,
    frame::{Lyrics, Picture, PictureType},
};

use crate::domain::{Cover, MetadataRecord};

pub mod error;
pub mod library;

use error::TagError;

pub const PERFORMER: &str = "TPE1";
pub const TITLE: &str = "TIT2";
pub const ALBUM: &str = "TALB";
pub const YEAR: &str = "TYER";
pub const TRACK: &str = "TRCK";
pub const LYRICS: &str = "USLT";
pub const PICTURE: &str = "APIC";

/// ID3 language code for "undetermined"
const LYRICS_LANG: &str = "XXX";

/// Tags `source`, after copying it under `library_root` when one is given.
///
/// Returns the path of the file that was tagged.
pub fn tag_file(
    record: &MetadataRecord,
    source: &Path,
    library_root: Option<&Path>,
) -> Result<PathBuf, TagError> {
    let target = match library_root {
        Some(root) => library::copy_into_library(source, root, record)?,
        None => source.to_path_buf(),
    };

    write_tags(&target, record)?;
    Ok(target)
}

/// Sets every record field on the file's tag and saves it once at the end
pub fn write_tags(path: &Path, record: &MetadataRecord) -> Result<(), TagError> {
    let mut tag = read_or_new(path)?;

    tag.set_text(PERFORMER, record.artist.as_str());
    tag.set_text(TITLE, record.title.as_str());
    tag.set_text(ALBUM, record.album.as_str());
    tag.set_text(YEAR, record.year.to_string());
    tag.set_text(TRACK, format!("{}/{}", record.track_no, record.track_count));

    tag.remove(LYRICS);
    tag.add_frame(Lyrics {
        lang: LYRICS_LANG.to_string(),
        description: String::new(),
        text: record.lyrics.clone(),
    });

    if let Some(cover) = &record.cover {
        tag.remove(PICTURE);
        tag.add_frame(Picture {
            mime_type: cover.mime.clone(),
            picture_type: PictureType::CoverFront,
            description: String::new(),
            data: cover.data.clone(),
        });
    }

    tag.write_to_path(path, Version::Id3v23)?;
    log::info!("wrote tag to {}", path.display());
    Ok(())
}

/// Reads back the fields written by [`write_tags`]
pub fn read_tags(path: &Path) -> Result<MetadataRecord, TagError> {
    let tag = read_or_new(path)?;
    let text = |id: &str| {
        tag.get(id)
            .and_then(|frame| frame.content().text())
            .unwrap_or_default()
            .to_string()
    };

    let (track_no, track_count) = parse_track(&text(TRACK));

    Ok(MetadataRecord {
        title: text(TITLE),
        artist: text(PERFORMER),
        album: text(ALBUM),
        year: text(YEAR).trim().parse().unwrap_or(0),
        track_no,
        track_count,
        lyrics: tag
            .lyrics()
            .next()
            .map(|lyrics| lyrics.text.clone())
            .unwrap_or_default(),
        cover: tag.pictures().next().map(|picture| Cover {
            data: picture.data.clone(),
            mime: picture.mime_type.clone(),
        }),
    })
}

fn read_or_new(path: &Path) -> Result<Tag, TagError> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(tag),
        Err(err) if matches!(err.kind, ErrorKind::NoTag) => Ok(Tag::new()),
        Err(err) => Err(err.into()),
    }
}

/// `"N/M"` into its two numbers, 0 for anything missing
fn parse_track(text: &str) -> (u32, u32) {
    let mut parts = text.splitn(2, '/');
    let mut number = || {
        parts
            .next()
            .and_then(|part| part.trim().parse().ok())
            .unwrap_or(0)
    };
    let track_no = number();
    let track_count = number();
    (track_no, track_count)
}
