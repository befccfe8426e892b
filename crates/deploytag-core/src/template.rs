//! Tag suffix templates
//!
//! A template is free text with `%{name}` placeholders. Substitution here is
//! pure: the caller gathers the clock reading, the OS user and the release
//! summary up front and hands them in as [`TemplateValues`].

use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;

use crate::error::ConfigError;

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\{([^}]+)\}").expect("Invalid regex"));

static SUMMARY_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[ '"]+"#).expect("Invalid regex"));

/// `date` format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `datetime` format
pub const DATETIME_FORMAT: &str = "%Y-%m-%d-%H%M";

/// A value a template can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Local date, `YYYY-MM-DD`
    Date,
    /// Local date and time, `YYYY-MM-DD-HHMM`
    DateTime,
    /// OS user running the release
    Who,
    /// Operator-supplied description of the release
    What,
}

impl Placeholder {
    /// Returns the name used inside `%{...}`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Who => "who",
            Self::What => "what",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "date" => Some(Self::Date),
            "datetime" => Some(Self::DateTime),
            "who" => Some(Self::Who),
            "what" => Some(Self::What),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A parsed tag suffix template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTemplate {
    source: String,
    segments: Vec<Segment>,
}

/// Everything a template may substitute
#[derive(Debug, Clone)]
pub struct TemplateValues {
    /// Clock reading used for `date` and `datetime`
    pub now: DateTime<Local>,
    /// OS user, needed only when the template uses `who`
    pub who: Option<String>,
    /// Raw release summary, needed only when the template uses `what`
    pub what: Option<String>,
}

impl TemplateValues {
    /// Values with only a clock reading
    pub fn at(now: DateTime<Local>) -> Self {
        Self {
            now,
            who: None,
            what: None,
        }
    }
}

impl TagTemplate {
    /// Parse a template, rejecting placeholders nobody can fill
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in PLACEHOLDER_REGEX.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let name = &caps[1];
            let placeholder =
                Placeholder::from_name(name).ok_or_else(|| ConfigError::UnknownPlaceholder {
                    name: name.to_string(),
                    template: source.to_string(),
                })?;

            if whole.start() > last {
                segments.push(Segment::Literal(source[last..whole.start()].to_string()));
            }
            segments.push(Segment::Placeholder(placeholder));
            last = whole.end();
        }

        if last < source.len() {
            segments.push(Segment::Literal(source[last..].to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template text as configured
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the template contains the given placeholder
    pub fn uses(&self, placeholder: Placeholder) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder(p) if *p == placeholder))
    }

    /// Substitute all placeholders
    pub fn render(&self, values: &TemplateValues) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(Placeholder::Date) => {
                    out.push_str(&values.now.format(DATE_FORMAT).to_string())
                }
                Segment::Placeholder(Placeholder::DateTime) => {
                    out.push_str(&values.now.format(DATETIME_FORMAT).to_string())
                }
                Segment::Placeholder(Placeholder::Who) => {
                    out.push_str(values.who.as_deref().unwrap_or_default())
                }
                Segment::Placeholder(Placeholder::What) => {
                    out.push_str(&normalize_summary(values.what.as_deref().unwrap_or_default()))
                }
            }
        }
        out
    }
}

/// Make a free-text release summary usable inside a tag name.
///
/// Runs of spaces and quote characters collapse into a single `_`.
pub fn normalize_summary(summary: &str) -> String {
    SUMMARY_SEPARATOR_REGEX.replace_all(summary, "_").into_owned()
}

/// Join prefix and suffix into the final tag name
pub fn compose_tag_name(prefix: &str, suffix: &str) -> String {
    format!("{}-{}", prefix, suffix)
}
