use crate::error::Result;
use crate::fs::Filesystem;
use crate::linker::{create_symlink, LinkStyle};
use crate::mapping::{determine_targets, Link, Mapping};
use crate::matcher::{CharClass, Matcher};
use crate::template::Template;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Create links; otherwise only report what would be linked.
    pub create: bool,
    pub clobber: bool,
    /// Refuse to run when two sources map to the same target.
    pub validate: bool,
    pub link_style: LinkStyle,
    pub char_class: CharClass,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            create: false,
            clobber: false,
            validate: true,
            link_style: LinkStyle::default(),
            char_class: CharClass::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent<'a> {
    Planned(&'a Link),
    Created(&'a Link),
}

/// Discover every file matching `source`, map each to `target`, and either
/// report or create the links.
///
/// The whole mapping is computed and validated before the first link is
/// made. Links already created when a later one fails are not removed.
pub fn run<F>(
    fs: &F,
    source: &str,
    target: &str,
    options: &RunOptions,
    on_event: &mut dyn FnMut(LinkEvent<'_>),
) -> Result<Mapping>
where
    F: Filesystem + ?Sized,
{
    let source = Template::parse(source)?.normalized_path();
    let target = Template::parse(target)?;
    let matcher = Matcher::compile(&source, options.char_class)?;
    let glob_pattern = source.glob_pattern();
    tracing::debug!(matcher = %matcher, glob = %glob_pattern, "compiled source template");

    let candidates = fs.glob(&glob_pattern)?;
    tracing::debug!(count = candidates.len(), "discovered candidates");
    if candidates.is_empty() {
        tracing::info!(glob = %glob_pattern, "no files matched");
    }

    let mapping = determine_targets(&candidates, &target, &matcher, options.validate)?;

    for link in &mapping {
        if options.create {
            create_symlink(
                fs,
                &link.source,
                &link.target,
                options.clobber,
                options.link_style,
            )?;
            on_event(LinkEvent::Created(link));
        } else {
            on_event(LinkEvent::Planned(link));
        }
    }

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fs::OsFilesystem;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, name).unwrap();
    }

    fn run_collect(
        source: &str,
        target: &str,
        options: &RunOptions,
    ) -> (Result<Mapping>, Vec<String>) {
        let mut events = Vec::new();
        let result = run(&OsFilesystem, source, target, options, &mut |event| {
            events.push(match event {
                LinkEvent::Planned(link) => format!("plan {}", link.target.display()),
                LinkEvent::Created(link) => format!("create {}", link.target.display()),
            })
        });
        (result, events)
    }

    #[test]
    fn test_dry_run_has_no_side_effects() {
        let tmp = TempDir::new().unwrap();
        create_test_file(tmp.path(), "raw/A_R1.fq");
        create_test_file(tmp.path(), "raw/B_R1.fq");
        let root = tmp.path().display();

        let (result, events) = run_collect(
            &format!("{}/raw/{{sample}}_{{read}}.fq", root),
            &format!("{}/links/{{sample}}/{{read}}.fq", root),
            &RunOptions::default(),
        );

        let mapping = result.unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(
            events,
            vec![
                format!("plan {}/links/A/R1.fq", root),
                format!("plan {}/links/B/R1.fq", root),
            ]
        );
        assert!(!tmp.path().join("links").exists());
    }

    #[test]
    fn test_create_links() {
        let tmp = TempDir::new().unwrap();
        create_test_file(tmp.path(), "raw/A_R1.fq");
        create_test_file(tmp.path(), "raw/A_R2.fq");
        let root = tmp.path().display();
        let options = RunOptions {
            create: true,
            ..RunOptions::default()
        };

        let (result, events) = run_collect(
            &format!("{}/raw/{{sample}}_{{read}}.fq", root),
            &format!("{}/links/{{sample}}/{{read}}.fq", root),
            &options,
        );

        result.unwrap();
        assert_eq!(events.len(), 2);
        let link = tmp.path().join("links/A/R2.fq");
        assert!(link.is_symlink());
        assert_eq!(fs::read_to_string(&link).unwrap(), "raw/A_R2.fq");
    }

    #[test]
    fn test_duplicate_target_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        create_test_file(tmp.path(), "raw/A_R1.fq");
        create_test_file(tmp.path(), "raw/A_R2.fq");
        let root = tmp.path().display();
        let options = RunOptions {
            create: true,
            ..RunOptions::default()
        };

        let (result, events) = run_collect(
            &format!("{}/raw/{{sample}}_{{read}}.fq", root),
            &format!("{}/links/{{sample}}.fq", root),
            &options,
        );

        assert!(matches!(result, Err(Error::DuplicateTarget { .. })));
        assert!(events.is_empty());
        assert!(!tmp.path().join("links").exists());
    }

    #[test]
    fn test_mismatch_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        create_test_file(tmp.path(), "raw/A.fq");
        create_test_file(tmp.path(), "raw/B_2.fq");
        let root = tmp.path().display();
        let options = RunOptions {
            create: true,
            ..RunOptions::default()
        };

        let (result, _) = run_collect(
            &format!("{}/raw/{{sample}}.fq", root),
            &format!("{}/links/{{sample}}.fq", root),
            &options,
        );

        assert!(matches!(result, Err(Error::PatternMismatch { .. })));
        assert!(!tmp.path().join("links").exists());
    }

    #[test]
    fn test_char_class_accepts_underscore() {
        let tmp = TempDir::new().unwrap();
        create_test_file(tmp.path(), "raw/B_2.fq");
        let root = tmp.path().display();
        let options = RunOptions {
            char_class: CharClass::new().underscore(true),
            ..RunOptions::default()
        };

        let (result, _) = run_collect(
            &format!("{}/raw/{{sample}}.fq", root),
            &format!("{}/links/{{sample}}.fq", root),
            &options,
        );

        let mapping = result.unwrap();
        assert_eq!(
            mapping.target_of(&tmp.path().join("raw/B_2.fq")),
            Some(tmp.path().join("links/B_2.fq").as_path())
        );
    }

    #[test]
    fn test_repeated_separators_in_source() {
        let tmp = TempDir::new().unwrap();
        create_test_file(tmp.path(), "raw/A.fq");
        let root = tmp.path().display();

        let (result, events) = run_collect(
            &format!("{}/raw//{{s}}.fq", root),
            &format!("{}/links/{{s}}.fq", root),
            &RunOptions::default(),
        );

        let mapping = result.unwrap();
        assert_eq!(
            mapping.target_of(&tmp.path().join("raw/A.fq")),
            Some(tmp.path().join("links/A.fq").as_path())
        );
        assert_eq!(events, vec![format!("plan {}/links/A.fq", root)]);
    }

    #[test]
    fn test_leading_dot_slash_in_source() {
        let fake = GlobFs {
            pattern: "raw/*.fq",
            paths: vec![PathBuf::from("raw/A.fq"), PathBuf::from("raw/B.fq")],
        };

        let mapping = run(
            &fake,
            "./raw/{s}.fq",
            "links/{s}.fq",
            &RunOptions::default(),
            &mut |_| {},
        )
        .unwrap();

        assert_eq!(
            mapping.target_of(Path::new("raw/B.fq")),
            Some(Path::new("links/B.fq"))
        );
    }

    #[test]
    fn test_malformed_template_fails_before_discovery() {
        let (result, events) = run_collect(
            "/data/{id:[0-9]{3}}.txt",
            "/links/{id}.txt",
            &RunOptions::default(),
        );
        assert!(matches!(result, Err(Error::MalformedTemplate { .. })));
        assert!(events.is_empty());
    }

    #[test]
    fn test_no_matches_is_empty_mapping() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().display();
        let (result, events) = run_collect(
            &format!("{}/raw/{{sample}}.fq", root),
            &format!("{}/links/{{sample}}.fq", root),
            &RunOptions::default(),
        );
        assert!(result.unwrap().is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_clobber_replaces_existing_links() {
        let tmp = TempDir::new().unwrap();
        create_test_file(tmp.path(), "raw/A.fq");
        let root = tmp.path().display();
        let source = format!("{}/raw/{{sample}}.fq", root);
        let target = format!("{}/links/{{sample}}.fq", root);
        let create = RunOptions {
            create: true,
            ..RunOptions::default()
        };

        run_collect(&source, &target, &create).0.unwrap();

        let (again, _) = run_collect(&source, &target, &create);
        assert!(matches!(again, Err(Error::Io { .. })));

        let clobber = RunOptions {
            clobber: true,
            ..create
        };
        run_collect(&source, &target, &clobber).0.unwrap();
        assert!(PathBuf::from(format!("{}/links/A.fq", root)).is_symlink());
    }

    /// Answers one glob pattern with fixed paths, spelled the way the glob
    /// crate returns them.
    struct GlobFs {
        pattern: &'static str,
        paths: Vec<PathBuf>,
    }

    impl Filesystem for GlobFs {
        fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
            assert_eq!(pattern, self.pattern);
            Ok(self.paths.clone())
        }

        fn create_dir_all(&self, _path: &Path) -> std::io::Result<()> {
            unreachable!("dry run")
        }

        fn is_symlink(&self, _path: &Path) -> bool {
            false
        }

        fn remove_file(&self, _path: &Path) -> std::io::Result<()> {
            unreachable!("dry run")
        }

        fn symlink(&self, _original: &Path, _link: &Path) -> std::io::Result<()> {
            unreachable!("dry run")
        }
    }
}
