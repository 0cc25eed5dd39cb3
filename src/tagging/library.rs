//! Copying tagged songs into an `artist/album` tree

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{domain::MetadataRecord, tagging::error::TagError};

/// Punctuation allowed in file and directory names besides letters, digits and spaces
const ALLOWED_PUNCTUATION: &str = ".,;!&'()[]{}-_+=#@$%~^";

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == ' '
        || matches!(c, 'А'..='я' | 'Ё' | 'ё')
        || ALLOWED_PUNCTUATION.contains(c)
}

/// Replaces every character that is not safe in a path component with a space
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if is_allowed(c) { c } else { ' ' })
        .collect()
}

/// Placeholder for names that would not stay a directory of their own
const UNNAMED: &str = "_";

/// A sanitized directory name; empty, blank and dot-only names become [`UNNAMED`]
fn dir_name(name: &str) -> String {
    let name = sanitize(name);
    if name.trim().chars().all(|c| c == '.') {
        UNNAMED.to_string()
    } else {
        name
    }
}

/// `{root}/{artist}/{album}`, always below `root`
pub fn album_dir(root: &Path, record: &MetadataRecord) -> PathBuf {
    root.join(dir_name(&record.artist)).join(dir_name(&record.album))
}

/// `{track}. {title}.mp3`
pub fn song_file_name(record: &MetadataRecord) -> String {
    format!("{}.mp3", sanitize(&format!("{}. {}", record.track_no, record.title)))
}

/// File extension for a cover of the given MIME type
pub fn cover_extension(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        other => mime_guess::get_mime_extensions_str(other)
            .and_then(|exts| exts.first().copied())
            .unwrap_or("jpg"),
    }
}

/// Copies `source` into the album directory, with the cover next to it.
///
/// Returns the path of the copy.
pub fn copy_into_library(
    source: &Path,
    root: &Path,
    record: &MetadataRecord,
) -> Result<PathBuf, TagError> {
    let dir = album_dir(root, record);
    fs::create_dir_all(&dir)?;

    let target = dir.join(song_file_name(record));
    fs::copy(source, &target)?;
    log::info!("copied {} to {}", source.display(), target.display());

    if let Some(cover) = &record.cover {
        let cover_path = dir.join(format!("cover.{}", cover_extension(&cover.mime)));
        fs::write(&cover_path, &cover.data)?;
        log::info!("saved cover to {}", cover_path.display());
    }

    Ok(target)
}
