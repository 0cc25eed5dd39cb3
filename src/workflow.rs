//! From a title guess to a confirmed record.
//!
//! The session is a small state machine: searching either yields a record
//! waiting for confirmation or drops into manual editing, and a declined
//! record goes to manual editing with its values as defaults.

use crate::{
    domain::MetadataRecord,
    manual::{self, ManualSettings},
    prompt::{Prompt, confirm},
    scrape::{LyricsSource, error::ScrapeError},
};

/// Typed at the title prompt to skip the search altogether
pub const MANUAL_MARKER: &str = "!--";

#[derive(Debug, PartialEq, Eq)]
pub enum Stage {
    Searching { query: String },
    PendingConfirmation(MetadataRecord),
    /// `fresh` is set when nothing was resolved automatically
    ManualEdit { record: MetadataRecord, fresh: bool },
    Done(MetadataRecord),
}

pub struct Session<'a> {
    pub prompt: &'a mut dyn Prompt,
    pub source: &'a dyn LyricsSource,
    pub manual: &'a ManualSettings,
}

impl Session<'_> {
    /// Runs the whole dialogue and returns the record to write
    pub fn run(&mut self, title_guess: &str) -> anyhow::Result<MetadataRecord> {
        let mut stage = self.start(title_guess)?;
        loop {
            stage = match stage {
                Stage::Done(record) => return Ok(record),
                other => self.step(other)?,
            };
        }
    }

    /// Lets the user correct the guessed title before searching
    pub fn start(&mut self, title_guess: &str) -> anyhow::Result<Stage> {
        println!("Edit the title to correct it, or press Enter to continue");
        println!("\"{MANUAL_MARKER}\" without quotes means that you want to enter info and lyrics manually");

        let answer = self.prompt.ask("Title: ", title_guess)?;
        let answer = answer.trim();

        Ok(match answer {
            MANUAL_MARKER => Stage::ManualEdit {
                record: MetadataRecord::default(),
                fresh: true,
            },
            "" => Stage::Searching {
                query: title_guess.to_string(),
            },
            query => Stage::Searching {
                query: query.to_lowercase(),
            },
        })
    }

    pub fn step(&mut self, stage: Stage) -> anyhow::Result<Stage> {
        let next = match stage {
            Stage::Searching { query } => self.search(&query),
            Stage::PendingConfirmation(record) => {
                println!("Successfully parsed");
                println!("{record}");
                if confirm(self.prompt, "Is this correct? [Y/n] ", true)? {
                    Stage::Done(record)
                } else {
                    Stage::ManualEdit {
                        record,
                        fresh: false,
                    }
                }
            }
            Stage::ManualEdit { record, fresh } => {
                Stage::Done(manual::fill(record, self.prompt, self.manual, fresh)?)
            }
            done @ Stage::Done(_) => done,
        };
        Ok(next)
    }

    fn search(&mut self, query: &str) -> Stage {
        println!("Searching...");
        match self.source.lookup(query) {
            Ok(record) => Stage::PendingConfirmation(record),
            Err(ScrapeError::Extract { field, partial }) => {
                println!("Unable to parse {field}");
                Stage::ManualEdit {
                    record: *partial,
                    fresh: false,
                }
            }
            Err(err) => {
                log::warn!("lookup of {query:?} failed: {err:?}");
                println!("{err}, switching to manual input");
                Stage::ManualEdit {
                    record: MetadataRecord::default(),
                    fresh: true,
                }
            }
        }
    }
}
