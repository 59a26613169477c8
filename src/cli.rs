use crate::linker::LinkStyle;
use crate::matcher::CharClass;
use crate::runner::RunOptions;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "maplink",
    about = "Create symlinks by matching a templated source path and rendering a target path",
    version
)]
pub struct Cli {
    /// Pattern matching source paths, e.g. "/data/{sample:[A-Za-z0-9-]+}_{read}.fq.gz"
    pub source: String,

    /// Path each symlink is created at, using placeholders from SOURCE, e.g. "/links/{sample}/{read}.fq.gz"
    pub target: String,

    /// Create directories and symlinks instead of only printing them
    #[arg(short, long)]
    pub create: bool,

    /// Replace symlinks that already exist at a target
    #[arg(long)]
    pub clobber: bool,

    /// Skip checking that every target is unique
    #[arg(long)]
    pub skip_validation: bool,

    /// Let {name} placeholders also match '_'
    #[arg(short, long)]
    pub underscore: bool,

    /// Let {name} placeholders also match '.'
    #[arg(short, long)]
    pub period: bool,

    /// Let {name} placeholders also match '-'
    #[arg(short = 'H', long)]
    pub hyphen: bool,

    /// Create links relative to the target directory (not implemented)
    #[arg(long)]
    pub relative: bool,

    /// Log debug output to stderr (overridden by MAPLINK_LOG)
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            create: self.create,
            clobber: self.clobber,
            validate: !self.skip_validation,
            link_style: if self.relative {
                LinkStyle::Relative
            } else {
                LinkStyle::Absolute
            },
            char_class: CharClass::new()
                .underscore(self.underscore)
                .period(self.period)
                .hyphen(self.hyphen),
        }
    }
}
