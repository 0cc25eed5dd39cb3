use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use crate::{
    config::Config,
    domain::title,
    manual::ManualSettings,
    prompt::{Terminal, editor},
    scrape::AzLyrics,
    tagging,
    workflow::Session,
};

#[derive(Parser)]
#[command(name = "lyrictag")]
#[command(version = "0.1")]
#[command(about = "Tag an MP3 with metadata and lyrics scraped from the web")]
pub struct Cli {
    /// 1 to copy the file into tagged/<artist>/<album>/, 0 to tag it in place
    #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
    pub copy: u8,

    /// MP3 file to tag
    pub file: PathBuf,

    /// Path to a config TOML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = Config::load_or_default(cli.config.as_deref())?;

    let guess = title::normalize(&cli.file.to_string_lossy(), &cfg.paths.strip_prefixes);
    log::debug!("title guess for {}: {guess:?}", cli.file.display());

    let source = AzLyrics::new(cfg.site.clone(), cfg.search.clone(), &cfg.http)
        .context("Failed to create HTTP client")?;
    let manual = ManualSettings {
        editor: editor::editor_from_env(&cfg.editor.default),
        scratch: cfg.paths.lyrics_scratch.clone(),
    };

    let mut terminal = Terminal;
    let record = Session {
        prompt: &mut terminal,
        source: &source,
        manual: &manual,
    }
    .run(&guess)?;

    let library_root = (cli.copy == 1).then_some(cfg.paths.tagged_root.as_path());
    let tagged = tagging::tag_file(&record, &cli.file, library_root)
        .with_context(|| format!("Failed to tag {}", cli.file.display()))?;

    println!("Saved {}", tagged.display());
    println!("{}", tagging::read_tags(&tagged)?);
    Ok(())
}
