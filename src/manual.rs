//! Filling the record by hand when scraping did not work out

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    domain::{Cover, MetadataRecord},
    prompt::{
        Prompt, ask_number, confirm,
        editor::{self, Seed},
    },
};

pub struct ManualSettings {
    /// Editor suggested for the lyrics, the user may pick another one
    pub editor: String,
    pub scratch: PathBuf,
}

/// Walks the user through every field, prefilled with what `record` already has.
///
/// `fresh` means nothing was resolved yet: the lyrics scratch file is cleared
/// instead of being reused.
pub fn fill(
    mut record: MetadataRecord,
    prompt: &mut dyn Prompt,
    settings: &ManualSettings,
    fresh: bool,
) -> anyhow::Result<MetadataRecord> {
    record.title = prompt.ask("Song title: ", &record.title)?.trim().to_string();
    record.artist = prompt.ask("Artist name: ", &record.artist)?.trim().to_string();
    record.album = prompt.ask("Album name: ", &record.album)?.trim().to_string();
    record.year = ask_number(prompt, "Release year: ", record.year)?;
    record.track_no = ask_number(prompt, "Track #", record.track_no)?;
    record.track_count = ask_number(prompt, "Tracks in album: ", record.track_count)?;

    let record = fill_lyrics(record, prompt, settings, fresh)?;
    fill_cover(record, prompt)
}

fn fill_lyrics(
    mut record: MetadataRecord,
    prompt: &mut dyn Prompt,
    settings: &ManualSettings,
    fresh: bool,
) -> anyhow::Result<MetadataRecord> {
    let edit = fresh
        || record.lyrics.is_empty()
        || confirm(prompt, "Edit the lyrics? [y/N] ", false)?;
    if !edit {
        return Ok(record);
    }

    println!("Now, paste the lyrics into a text editor");
    println!("Default editor: {}", settings.editor);
    let editor = prompt.ask("Editor: ", &settings.editor)?;
    let editor = match editor.trim() {
        "" => settings.editor.as_str(),
        other => other,
    };

    let seed = if fresh {
        Seed::Blank
    } else if record.lyrics.is_empty() {
        Seed::Keep
    } else {
        Seed::Text(&record.lyrics)
    };

    match editor::edit_lyrics(editor, &settings.scratch, seed) {
        Ok(lyrics) => {
            record.lyrics = lyrics;
            println!("Done");
        }
        Err(err) => log::error!("failed to edit lyrics with {editor}: {err}"),
    }

    Ok(record)
}

fn fill_cover(
    mut record: MetadataRecord,
    prompt: &mut dyn Prompt,
) -> anyhow::Result<MetadataRecord> {
    let wanted = match record.cover {
        None => confirm(prompt, "Insert an album cover? [Y/n] ", true)?,
        Some(_) => confirm(prompt, "Replace the album cover? [y/N] ", false)?,
    };
    if !wanted {
        return Ok(record);
    }

    println!("Download the cover and enter its path:");
    println!("(relative path is not recommended)");
    let path = prompt.ask("Cover: ", "")?;
    if let Some(cover) = load_cover(Path::new(path.trim())) {
        record.cover = Some(cover);
    }

    Ok(record)
}

/// Reads a cover image from disk; a failure is logged and means "no cover"
pub fn load_cover(path: &Path) -> Option<Cover> {
    match fs::read(path) {
        Ok(data) => Some(Cover::new(data, mime_guess::from_path(path).first_raw())),
        Err(err) => {
            log::error!("failed to read cover {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::prompt::testing::Scripted;

    fn settings(tmp: &TempDir, editor: &str) -> ManualSettings {
        ManualSettings {
            editor: editor.to_string(),
            scratch: tmp.path().join("lyrics.txt"),
        }
    }

    fn parsed() -> MetadataRecord {
        MetadataRecord {
            title: "Never Gonna Give You Up".into(),
            artist: "Rick Astley".into(),
            album: "Whenever You Need Somebody".into(),
            year: 1987,
            track_no: 1,
            track_count: 10,
            lyrics: "We're no strangers to love".into(),
            cover: None,
        }
    }

    #[cfg(unix)]
    #[test]
    fn fresh_entry_fills_every_field() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("lyrics.txt"), "leftover from last run").unwrap();
        let mut prompt = Scripted::new([
            Some("Song"),
            Some("Artist"),
            Some("Album"),
            Some("2001"),
            Some("3"),
            Some("10"),
            None,
            Some("n"),
        ]);

        let record = fill(
            MetadataRecord::default(),
            &mut prompt,
            &settings(&tmp, "true"),
            true,
        )
        .unwrap();

        assert_eq!(record.title, "Song");
        assert_eq!(record.artist, "Artist");
        assert_eq!(record.album, "Album");
        assert_eq!(record.year, 2001);
        assert_eq!(record.track_no, 3);
        assert_eq!(record.track_count, 10);
        // scratch was cleared before the (no-op) editor ran
        assert_eq!(record.lyrics, "");
        assert_eq!(record.cover, None);
    }

    #[test]
    fn re_entry_keeps_parsed_fields() {
        let tmp = TempDir::new().unwrap();
        let mut prompt = Scripted::new([None, None, None, None, None, None, Some(""), Some("n")]);

        let record = fill(parsed(), &mut prompt, &settings(&tmp, "true"), false).unwrap();

        assert_eq!(record, parsed());
        assert_eq!(prompt.asked[0].1, "Never Gonna Give You Up");
        assert_eq!(prompt.asked[3].1, "1987");
    }

    #[test]
    fn re_entry_changes_only_edited_fields() {
        let tmp = TempDir::new().unwrap();
        let mut prompt = Scripted::new([
            None,
            None,
            Some("Greatest Hits"),
            Some("2002"),
            None,
            None,
            Some("n"),
            Some("n"),
        ]);

        let record = fill(parsed(), &mut prompt, &settings(&tmp, "true"), false).unwrap();

        assert_eq!(record.title, "Never Gonna Give You Up");
        assert_eq!(record.album, "Greatest Hits");
        assert_eq!(record.year, 2002);
        assert_eq!(record.lyrics, "We're no strangers to love");
    }

    #[cfg(unix)]
    #[test]
    fn re_entry_editor_starts_from_existing_lyrics() {
        let tmp = TempDir::new().unwrap();
        let mut prompt = Scripted::new([
            None,
            None,
            None,
            None,
            None,
            None,
            Some("y"),
            None,
            Some("n"),
        ]);

        let record = fill(parsed(), &mut prompt, &settings(&tmp, "true"), false).unwrap();

        assert_eq!(record.lyrics, "We're no strangers to love");
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("lyrics.txt")).unwrap(),
            "We're no strangers to love\n"
        );
    }

    #[test]
    fn broken_editor_leaves_lyrics_alone() {
        let tmp = TempDir::new().unwrap();
        let mut prompt = Scripted::new([
            None,
            None,
            None,
            None,
            None,
            None,
            Some("y"),
            Some("lyrictag-no-such-editor"),
            Some("n"),
        ]);

        let record = fill(parsed(), &mut prompt, &settings(&tmp, "true"), false).unwrap();

        assert_eq!(record.lyrics, "We're no strangers to love");
    }

    #[test]
    fn cover_is_loaded_with_guessed_mime() {
        let tmp = TempDir::new().unwrap();
        let cover_path = tmp.path().join("front.png");
        std::fs::write(&cover_path, b"\x89PNG fake").unwrap();

        let cover = load_cover(&cover_path).unwrap();

        assert_eq!(cover.mime, "image/png");
        assert_eq!(cover.data, b"\x89PNG fake");
    }

    #[test]
    fn cover_without_known_extension_is_jpeg() {
        let tmp = TempDir::new().unwrap();
        let cover_path = tmp.path().join("cover");
        std::fs::write(&cover_path, b"bytes").unwrap();

        assert_eq!(load_cover(&cover_path).unwrap().mime, "image/jpeg");
    }

    #[test]
    fn unreadable_cover_means_no_cover() {
        let tmp = TempDir::new().unwrap();

        assert_eq!(load_cover(&tmp.path().join("missing.jpg")), None);
    }

    #[test]
    fn failed_cover_replacement_keeps_old_cover() {
        let tmp = TempDir::new().unwrap();
        let mut record = parsed();
        record.cover = Some(Cover::new(vec![1, 2, 3], Some("image/png")));
        let missing = tmp.path().join("missing.jpg");
        let mut prompt = Scripted::new([Some("y"), missing.to_str()]);

        let record = fill_cover(record, &mut prompt).unwrap();

        assert_eq!(
            record.cover,
            Some(Cover::new(vec![1, 2, 3], Some("image/png")))
        );
    }
}
