use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "jobmatch")]
#[command(about = "Browse job listings and match them against your resume", long_about = None)]
pub struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,

    /// Backend base URL, overriding the configuration file
    #[arg(short, long, value_name = "URL")]
    pub base_url: Option<String>,

    /// View to open at startup: landing, feed, search, result or job
    #[arg(long, value_name = "VIEW", default_value = "landing")]
    pub view: String,

    /// Force a feed refresh on entry (only meaningful with --view feed)
    #[arg(long)]
    pub refresh: bool,

    /// Sets the logger's verbosity level
    #[arg(short, long, value_name = "VERBOSITY", default_value_t = LevelFilter::Info)]
    pub verbosity: LevelFilter,
}
