use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed template '{template}' at byte {offset}: {reason}")]
    MalformedTemplate {
        template: String,
        offset: usize,
        reason: String,
    },

    #[error("Placeholder '{{{name}}}' appears more than once in template '{template}'")]
    DuplicatePlaceholder { template: String, name: String },

    #[error("Invalid pattern in template '{template}'")]
    InvalidPattern {
        template: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid glob pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error(
        "Path '{}' does not match '{matcher}' (target template '{target_template}'). \
         This usually means the path contains a character the placeholder does not \
         accept, most often '_' or '.'; see --underscore, --period and --hyphen",
        path.display()
    )]
    PatternMismatch {
        path: PathBuf,
        target_template: String,
        matcher: String,
    },

    #[error("Path '{}' is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Target template '{template}' references '{{{name}}}', which the source template does not capture")]
    UnresolvedPlaceholder { name: String, template: String },

    #[error(
        "Duplicate target '{}' from '{}' and '{}'. Other duplicate targets may exist: \
         only the first one is reported",
        target.display(),
        first.display(),
        second.display()
    )]
    DuplicateTarget {
        target: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Failed to {action} '{}'", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
