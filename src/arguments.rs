use clap::{Parser, ValueEnum};

use crate::incrementer::IncrementOptions;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Default)]
pub enum ReplaceMode {
    /// Rewrite each matched line where it was found
    #[default]
    Position,
    /// Rewrite every occurrence of the matched line's text anywhere in the file
    Content,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Default)]
pub enum LineEnding {
    #[default]
    #[value(name = "crlf")]
    CrLf,
    Lf,
    /// Keep whatever terminator the matched line had
    Preserve,
}

impl LineEnding {
    /// Picks the terminator for a rewritten line given the original line's text
    pub fn terminator_for(self, original: &str) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
            LineEnding::Preserve => {
                if original.ends_with("\r\n") {
                    "\r\n"
                } else if original.ends_with('\n') {
                    "\n"
                } else {
                    ""
                }
            }
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about, bin_name = "ivc")]
pub struct Arguments {
    /// Path to your version.properties file
    #[arg(long, short)]
    pub path: String,
    #[arg(long, short, value_enum, ignore_case = true, default_value_t = ReplaceMode::Position)]
    pub replace_mode: ReplaceMode,
    #[arg(long, short, value_enum, ignore_case = true, default_value_t = LineEnding::CrLf)]
    pub line_ending: LineEnding,
    /// Fail instead of treating a non-numeric VERSION_CODE as 0
    #[arg(long, short)]
    pub strict: bool,
    /// Append the pipeline outputs as KEY=value lines to this file
    #[arg(long, short)]
    pub output_file: Option<String>,
    /// Report the next version code without writing the file
    #[arg(long = "dry-run", short = 'n')]
    pub dry_run: bool,
    #[arg(long, short)]
    pub verbose: bool,
}

impl Arguments {
    pub fn increment_options(&self) -> IncrementOptions {
        IncrementOptions {
            replace_mode: self.replace_mode,
            line_ending: self.line_ending,
            strict: self.strict,
        }
    }
}
