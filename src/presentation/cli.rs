// Command line interface
use crate::infrastructure::config::SettingsOverrides;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "autodoc")]
#[command(version)]
#[command(about = "Generate markdown documentation for Grafana dashboards")]
pub struct Cli {
    /// Dashboard JSON file, directory of dashboards, or glob pattern
    #[arg(short, long)]
    pub input: Option<String>,

    /// Directory the markdown files are written to [default: .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// debug, info, warn or error (or -4, 0, 4, 8) [default: info]
    #[arg(long, allow_hyphen_values = true)]
    pub log_level: Option<String>,

    /// Optional settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(self) -> SettingsOverrides {
        SettingsOverrides {
            input: self.input,
            output: self.output,
            log_level: self.log_level,
            config_file: self.config,
        }
    }
}
