//! Editing lyrics in the user's text editor through a scratch file

use std::{
    fs, io,
    path::Path,
    process::{Command, ExitStatus},
};

/// `$EDITOR`, or `fallback` when it is unset or blank
pub fn editor_from_env(fallback: &str) -> String {
    std::env::var("EDITOR")
        .ok()
        .filter(|editor| !editor.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// How the scratch file is prepared before the editor opens it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed<'a> {
    /// Start from an empty file
    Blank,
    /// Start from these lyrics
    Text(&'a str),
    /// Leave a previous scratch file as it is
    Keep,
}

pub fn prepare_scratch(path: &Path, seed: Seed) -> io::Result<()> {
    match seed {
        Seed::Blank => fs::write(path, "\n"),
        Seed::Text(text) => fs::write(path, format!("{text}\n")),
        Seed::Keep if path.exists() => Ok(()),
        Seed::Keep => fs::write(path, "\n"),
    }
}

/// Runs `editor` on `path` and waits for it.
///
/// `editor` may carry arguments, e.g. `code --wait`.
pub fn run_editor(editor: &str, path: &Path) -> io::Result<ExitStatus> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty editor command"))?;

    Command::new(program).args(parts).arg(path).status()
}

pub fn read_scratch(path: &Path) -> io::Result<String> {
    Ok(fs::read_to_string(path)?.trim().to_string())
}

/// Seeds the scratch file, lets the user edit it, then reads it back
pub fn edit_lyrics(editor: &str, path: &Path, seed: Seed) -> io::Result<String> {
    prepare_scratch(path, seed)?;

    let status = run_editor(editor, path)?;
    if !status.success() {
        log::warn!("editor {editor} exited with {status}");
    }

    println!("Reading file...");
    read_scratch(path)
}
