//! Path templates with `{name}` and `{name:pattern}` placeholders.
//!
//! A template is parsed once into a list of [`Segment`]s. The same segment
//! list is rendered three ways: into a discovery glob ([`Template::glob_pattern`]),
//! into a capturing regex (see [`crate::matcher`]), and into a concrete path
//! once captures are known ([`Template::render`]).

use crate::error::{Error, Result};
use crate::matcher::Captures;
use winnow::combinator::{alt, opt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// A piece of a template: either literal text or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder {
        name: String,
        pattern: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let mut input = source;
        let segments: Vec<Segment> = repeat(0.., segment)
            .parse_next(&mut input)
            .map_err(|_| malformed(source, 0, "unparseable template"))?;

        if !input.is_empty() {
            let offset = source.len() - input.len();
            return Err(malformed(source, offset, diagnose(input)));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in order of appearance, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Spell literal text the way glob spells the paths it returns: no
    /// leading `./` and no repeated `/`. The original text is kept for
    /// error messages.
    pub fn normalized_path(&self) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len());
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(text) => {
                    let mut text = collapse_separators(text);
                    if i == 0 {
                        while let Some(rest) = text.strip_prefix("./") {
                            text = rest.to_string();
                        }
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Literal(text));
                    }
                }
                placeholder => segments.push(placeholder.clone()),
            }
        }
        Self {
            source: self.source.clone(),
            segments,
        }
    }

    /// Replace every placeholder with `*`, escaping glob metacharacters in
    /// the literal text. Adjacent placeholders share one `*`, since `**`
    /// means recursive descent to glob.
    pub fn glob_pattern(&self) -> String {
        let mut pattern = String::new();
        let mut wildcard = false;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    pattern.push_str(&glob::Pattern::escape(text));
                    wildcard = false;
                }
                Segment::Placeholder { .. } if wildcard => {}
                Segment::Placeholder { .. } => {
                    pattern.push('*');
                    wildcard = true;
                }
            }
        }
        pattern
    }

    /// Substitute captured values. Any sub-pattern on a placeholder is ignored.
    pub fn render(&self, captures: &Captures) -> Result<String> {
        let mut result = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Placeholder { name, .. } => {
                    let value = captures
                        .get(name)
                        .ok_or_else(|| Error::UnresolvedPlaceholder {
                            name: name.clone(),
                            template: self.source.clone(),
                        })?;
                    result.push_str(value);
                }
            }
        }
        Ok(result)
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

fn collapse_separators(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}

fn malformed(template: &str, offset: usize, reason: impl Into<String>) -> Error {
    Error::MalformedTemplate {
        template: template.to_string(),
        offset,
        reason: reason.into(),
    }
}

// ============ Parser ============

fn ident(input: &mut &str) -> PResult<String> {
    let first = take_while(1, |c: char| c.is_ascii_alphabetic() || c == '_').parse_next(input)?;
    let rest =
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)?;
    Ok(format!("{}{}", first, rest))
}

fn sub_pattern<'a>(input: &mut &'a str) -> PResult<&'a str> {
    take_till(1.., ['{', '}']).parse_next(input)
}

fn placeholder(input: &mut &str) -> PResult<Segment> {
    '{'.parse_next(input)?;
    let name = ident.parse_next(input)?;
    let pattern = opt(preceded(':', sub_pattern)).parse_next(input)?;
    '}'.parse_next(input)?;
    Ok(Segment::Placeholder {
        name,
        pattern: pattern.map(str::to_string),
    })
}

fn literal(input: &mut &str) -> PResult<Segment> {
    take_till(1.., ['{', '}'])
        .map(|s: &str| Segment::Literal(s.to_string()))
        .parse_next(input)
}

fn segment(input: &mut &str) -> PResult<Segment> {
    alt((placeholder, literal)).parse_next(input)
}

/// Explain why parsing stopped at `rest`, which starts with a brace that
/// could not be consumed as part of a placeholder.
fn diagnose(rest: &str) -> &'static str {
    let Some(body) = rest.strip_prefix('{') else {
        return "unmatched '}'";
    };

    let name_len = body
        .char_indices()
        .find(|&(i, c)| {
            !(c == '_' || c.is_ascii_alphabetic() || (i > 0 && c.is_ascii_digit()))
        })
        .map_or(body.len(), |(i, _)| i);
    if name_len == 0 {
        return "expected a placeholder name ([A-Za-z_][A-Za-z0-9_]*) after '{'";
    }

    let after_name = &body[name_len..];
    match after_name.chars().next() {
        None => "unclosed placeholder",
        Some(':') => {
            let pattern = &after_name[1..];
            match pattern.find(['{', '}']) {
                Some(0) if pattern.starts_with('}') => "empty placeholder pattern",
                Some(i) if pattern[i..].starts_with('{') => {
                    "braces are not supported inside a placeholder pattern"
                }
                _ => "unclosed placeholder",
            }
        }
        Some('{') => "braces are not supported inside a placeholder",
        Some(_) => "invalid character in placeholder name",
    }
}
