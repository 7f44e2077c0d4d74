//! Dependency glob patterns.
//!
//! Patterns are resolved against the template root and matched one path
//! segment at a time, which lets a directory be tested for "some descendant
//! could still match" before it is entered.
//!
//! | Pattern          | Matches                                    |
//! |------------------|--------------------------------------------|
//! | `util.js`        | `/util.js`                                 |
//! | `images/**/*.*`  | any dotted file anywhere below `/images`   |
//! | `lib/*.{js,mjs}` | direct `.js`/`.mjs` children of `/lib`     |
//! | `!lib/test.js`   | excludes `/lib/test.js`                    |
//!
//! Wildcards never match a leading `.` unless the pattern segment itself
//! starts with `.`.

use super::error::TemplateError;
use crate::utils::path;
use globset::{GlobBuilder, GlobMatcher};

enum Segment {
    /// `**`: zero or more whole segments.
    Globstar,
    Glob { matcher: GlobMatcher, dot: bool },
}

impl Segment {
    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Globstar => !name.starts_with('.'),
            Self::Glob { matcher, dot } => (*dot || !name.starts_with('.')) && matcher.is_match(name),
        }
    }
}

struct Pattern {
    negated: bool,
    segments: Vec<Segment>,
}

impl Pattern {
    fn parse(raw: &str) -> Result<Self, TemplateError> {
        let (negated, body) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let resolved = path::resolve("/", body);

        let segments = path::segments(&resolved)
            .into_iter()
            .map(|segment| {
                if segment == "**" {
                    return Ok(Segment::Globstar);
                }
                let glob = GlobBuilder::new(segment)
                    .literal_separator(true)
                    .backslash_escape(true)
                    .build()
                    .map_err(|err| TemplateError::Config(format!("Invalid pattern `{raw}`: {err}")))?;
                Ok(Segment::Glob {
                    matcher: glob.compile_matcher(),
                    dot: segment.starts_with('.'),
                })
            })
            .collect::<Result<Vec<_>, TemplateError>>()?;

        Ok(Self { negated, segments })
    }

    /// Full match of the whole path.
    fn matches(&self, file: &[String]) -> bool {
        match_segments(&self.segments, file, false)
    }

    /// The path itself, or some descendant of it, could match.
    fn may_contain(&self, dir: &[String]) -> bool {
        match_segments(&self.segments, dir, true)
    }

    /// Everything at and below `dir` is matched.
    fn covers(&self, dir: &[String]) -> bool {
        if self.matches(dir) {
            return true;
        }
        let trailing = self
            .segments
            .iter()
            .rev()
            .take_while(|s| matches!(s, Segment::Globstar))
            .count();
        trailing > 0
            && match_segments(&self.segments[..self.segments.len() - trailing], dir, false)
    }
}

/// Match `path` against `pattern`.
///
/// With `partial`, running out of path before the pattern is exhausted still
/// counts as a match: the path is a directory that may contain matches.
fn match_segments(pattern: &[Segment], path: &[String], partial: bool) -> bool {
    let Some((head, rest)) = pattern.split_first() else {
        return path.is_empty();
    };

    match head {
        Segment::Globstar => {
            for skip in 0..=path.len() {
                if match_segments(rest, &path[skip..], partial) {
                    return true;
                }
                if skip < path.len() && !head.matches(&path[skip]) {
                    break;
                }
            }
            false
        }
        Segment::Glob { .. } => match path.split_first() {
            None => partial,
            Some((name, tail)) => head.matches(name) && match_segments(rest, tail, partial),
        },
    }
}

/// Compiled local dependency patterns of one declaration list.
pub struct DependencyMatcher {
    patterns: Vec<Pattern>,
}

impl DependencyMatcher {
    /// Compile every local (non-link) entry of `list`.
    pub fn new<'a>(list: impl IntoIterator<Item = &'a String>) -> Result<Self, TemplateError> {
        let patterns = list
            .into_iter()
            .filter(|item| !path::is_link(item))
            .map(|item| Pattern::parse(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        !self.patterns.iter().any(|p| !p.negated)
    }

    /// Whether the file at root-relative `segments` is a dependency.
    pub fn matches_file(&self, segments: &[String]) -> bool {
        let (mut included, mut excluded) = (false, false);
        for pattern in &self.patterns {
            if pattern.matches(segments) {
                if pattern.negated {
                    excluded = true;
                } else {
                    included = true;
                }
            }
        }
        included && !excluded
    }

    /// Whether the directory at root-relative `segments` should be entered.
    ///
    /// A directory is entered when a positive pattern could match below it,
    /// unless a negated pattern fully excludes it.
    pub fn enters_dir(&self, segments: &[String]) -> bool {
        let wanted = self
            .patterns
            .iter()
            .any(|p| !p.negated && p.may_contain(segments));
        wanted
            && !self
                .patterns
                .iter()
                .any(|p| p.negated && p.covers(segments))
    }
}
