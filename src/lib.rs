pub mod cli;
pub mod error;
pub mod fs;
pub mod linker;
pub mod mapping;
pub mod matcher;
pub mod output;
pub mod runner;
pub mod template;

pub use error::{Error, Result};
pub use fs::{Filesystem, OsFilesystem};
pub use linker::{create_symlink, LinkStyle};
pub use mapping::{determine_targets, render_target, Link, Mapping};
pub use matcher::{Captures, CharClass, Matcher};
pub use runner::{run, LinkEvent, RunOptions};
pub use template::{Segment, Template};
