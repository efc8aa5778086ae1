//! Command-line flags.  Each one overrides the matching config setting.

use std::path::PathBuf;

use clap::Parser;

use crate::category::Category;
use crate::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "headlines", version, about = "Browse NewsAPI headlines in the terminal")]
pub struct Cli {
    /// Config file to read instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// NewsAPI key (overrides NEWSAPI_KEY and the config file).
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Category to show at startup.
    #[arg(long, value_name = "NAME")]
    pub category: Option<Category>,
}

impl Cli {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(key) = &self.api_key {
            settings.api_key = Some(key.clone());
        }
        if let Some(category) = self.category {
            settings.default_category = category;
        }
    }
}
