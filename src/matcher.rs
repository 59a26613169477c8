use crate::error::{Error, Result};
use crate::template::{Segment, Template};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

/// Placeholder name to captured text.
pub type Captures = BTreeMap<String, String>;

/// Characters an unconstrained `{name}` placeholder accepts in addition to
/// ASCII letters and digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClass {
    pub underscore: bool,
    pub period: bool,
    pub hyphen: bool,
}

impl CharClass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn underscore(mut self, yes: bool) -> Self {
        self.underscore = yes;
        self
    }

    pub fn period(mut self, yes: bool) -> Self {
        self.period = yes;
        self
    }

    pub fn hyphen(mut self, yes: bool) -> Self {
        self.hyphen = yes;
        self
    }

    /// The bracketed regex class, e.g. `[A-Za-z0-9_]`.
    pub fn regex_class(&self) -> String {
        let mut class = String::from("[A-Za-z0-9");
        if self.underscore {
            class.push('_');
        }
        if self.period {
            class.push('.');
        }
        if self.hyphen {
            class.push_str(r"\-");
        }
        class.push(']');
        class
    }
}

/// A source template compiled to an anchored regex with one named group per
/// placeholder.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    names: Vec<String>,
}

impl Matcher {
    pub fn compile(template: &Template, class: CharClass) -> Result<Self> {
        let mut seen = HashSet::new();
        if let Some(name) = template.placeholders().find(|name| !seen.insert(*name)) {
            return Err(Error::DuplicatePlaceholder {
                template: template.as_str().to_string(),
                name: name.to_string(),
            });
        }

        let default_class = class.regex_class();
        let mut names = Vec::new();
        let mut regex_str = String::from("^");

        for segment in template.segments() {
            match segment {
                Segment::Literal(text) => regex_str.push_str(&regex::escape(text)),
                Segment::Placeholder { name, pattern } => {
                    let capture_pattern = match pattern {
                        Some(p) => p.clone(),
                        None => format!("{}+", default_class),
                    };
                    regex_str.push_str(&format!("(?P<{}>{})", name, capture_pattern));
                    names.push(name.clone());
                }
            }
        }

        regex_str.push('$');

        let regex = Regex::new(&regex_str).map_err(|source| Error::InvalidPattern {
            template: template.as_str().to_string(),
            source,
        })?;

        Ok(Self { regex, names })
    }

    /// The regex source this matcher was built from.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Match the whole of `text`, returning every placeholder's capture.
    pub fn captures(&self, text: &str) -> Option<Captures> {
        let caps = self.regex.captures(text)?;
        let mut captured = Captures::new();
        for name in &self.names {
            if let Some(m) = caps.name(name) {
                captured.insert(name.clone(), m.as_str().to_string());
            }
        }
        Some(captured)
    }
}

impl std::fmt::Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
