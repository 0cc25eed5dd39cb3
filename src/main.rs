use crate::cli::run;

pub mod cli;
mod config;
pub mod domain;
mod manual;
mod prompt;
pub mod scrape;
pub mod tagging;
mod workflow;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    run()
}
