//! Turning discovered source paths into validated (source, target) links.

use crate::error::{Error, Result};
use crate::matcher::Matcher;
use crate::template::Template;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Every link a run will create, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    links: Vec<Link>,
}

impl Mapping {
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn target_of(&self, source: &Path) -> Option<&Path> {
        self.links
            .iter()
            .find(|link| link.source == source)
            .map(|link| link.target.as_path())
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

pub fn render_target(candidate: &Path, target: &Template, matcher: &Matcher) -> Result<PathBuf> {
    let text = candidate
        .to_str()
        .ok_or_else(|| Error::NonUtf8Path(candidate.to_path_buf()))?;

    let captures = matcher
        .captures(text)
        .ok_or_else(|| Error::PatternMismatch {
            path: candidate.to_path_buf(),
            target_template: target.as_str().to_string(),
            matcher: matcher.as_str().to_string(),
        })?;

    target.render(&captures).map(PathBuf::from)
}

/// Render a target for every candidate. With `validate` set, stops at the
/// first target produced by two different sources.
pub fn determine_targets<I>(
    candidates: I,
    target: &Template,
    matcher: &Matcher,
    validate: bool,
) -> Result<Mapping>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut links = Vec::new();
    let mut seen: HashMap<PathBuf, usize> = HashMap::new();

    for candidate in candidates {
        let source = candidate.as_ref();
        let rendered = render_target(source, target, matcher)?;
        tracing::debug!(source = %source.display(), target = %rendered.display(), "mapped");

        if validate {
            if let Some(&index) = seen.get(&rendered) {
                let first: &Link = &links[index];
                return Err(Error::DuplicateTarget {
                    target: rendered,
                    first: first.source.clone(),
                    second: source.to_path_buf(),
                });
            }
            seen.insert(rendered.clone(), links.len());
        }

        links.push(Link {
            source: source.to_path_buf(),
            target: rendered,
        });
    }

    Ok(Mapping { links })
}
