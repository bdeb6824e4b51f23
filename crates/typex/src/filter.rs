//! Qualified-name filters and display path relocation.
//!
//! Patterns are compiled once, when a filter or replacement is built, and
//! the compiled value is reused for every name. Patterns that are not valid
//! regular expressions are matched literally instead; relocation rules of
//! the wrong shape are dropped. Neither case is an error.

use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

/// A predicate over qualified names.
pub trait NameFilter {
    /// Returns `true` if `name` passes the filter.
    fn matches(&self, name: &str) -> bool;
}

impl<F> NameFilter for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, name: &str) -> bool {
        self(name)
    }
}

/// Compiles a pattern, falling back to a literal match when it is not a
/// valid regular expression. Returns `None` if even the literal cannot be
/// compiled, e.g. because it exceeds the size limit.
fn compile(pattern: &str) -> Option<Regex> {
    let err = match Regex::new(pattern) {
        Ok(re) => return Some(re),
        Err(err) => err,
    };
    warn!(pattern, err:%; "Invalid regular expression, matching literally");
    match Regex::new(&regex::escape(pattern)) {
        Ok(re) => Some(re),
        Err(err) => {
            warn!(pattern, err:%; "Pattern cannot be compiled, skipping");
            None
        }
    }
}

/// Matches names against any of a list of patterns.
///
/// A name matches if any pattern matches a substring of it. An empty
/// pattern list matches nothing.
///
/// # Example
///
/// ```
/// # use typex::filter::{NameFilter, PathFilter};
/// let filter = PathFilter::new(["URL", "invalid[regex"]);
/// assert!(filter.matches("net/url.URL"));
/// assert!(filter.matches("x.invalid[regex"));
/// assert!(!filter.matches("net/url.Values"));
/// ```
#[derive(Debug, Clone)]
pub struct PathFilter {
    patterns: Vec<Regex>,
}

impl PathFilter {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .filter_map(|pattern| compile(pattern.as_ref()))
            .collect();
        Self { patterns }
    }
}

impl NameFilter for PathFilter {
    fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(name))
    }
}

/// Combines an include filter with an exclude filter.
///
/// A name passes if it matches some include pattern and no exclude pattern.
/// The exclude patterns are only consulted for included names.
#[derive(Debug, Clone)]
pub struct IncludeExcludeFilter {
    include: PathFilter,
    exclude: PathFilter,
}

impl IncludeExcludeFilter {
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            include: PathFilter::new(include),
            exclude: PathFilter::new(exclude),
        }
    }
}

impl NameFilter for IncludeExcludeFilter {
    fn matches(&self, name: &str) -> bool {
        self.include.matches(name) && !self.exclude.matches(name)
    }
}

/// Fixed clean-up substitutions run after the relocation rules, in order.
static SANITIZE: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (r"/*(\.+/+)+", "."),
        (r"(/+\.+)+", "/"),
        (r"/{2,}", "/"),
        (r"\.{2,}", "."),
    ]
    .map(|(pattern, with)| (Regex::new(pattern).expect("sanitize pattern is valid"), with))
});

/// One `pattern:replacement` relocation rule.
#[derive(Debug, Clone)]
struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    /// Parses `pattern:replacement`; returns `None` for malformed rules.
    fn parse(rule: &str) -> Option<Self> {
        let parts: Vec<&str> = rule.split(':').map(str::trim).collect();
        let [pattern, replacement] = parts[..] else {
            warn!(rule; "Relocation rule must have the form `pattern:replacement`, skipping");
            return None;
        };
        if pattern.is_empty() {
            warn!(rule; "Relocation rule has an empty pattern, skipping");
            return None;
        }
        Some(Self {
            pattern: compile(pattern)?,
            replacement: replacement.to_string(),
        })
    }
}

/// Relocates qualified names into canonical display paths.
///
/// Rules are regular expression substitutions applied in order, each one
/// operating on the previous one's output. The result is then sanitized:
///
/// 1. runs of `./` collapse to `.`
/// 2. runs of `/.` collapse to `/`
/// 3. repeated `/` collapse to one
/// 4. repeated `.` collapse to one
///
/// followed by trimming `/` and `.` from both ends and replacing `-` with `_`.
///
/// # Example
///
/// ```
/// # use typex::filter::PathReplace;
/// let replace = PathReplace::new(["a/b:x", "x/c:y", "malformed"]);
/// assert_eq!(replace.apply("a/b/c"), "y");
/// assert_eq!(PathReplace::default().apply("a/./../b"), "a.b");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathReplace {
    rules: Vec<Rule>,
}

impl PathReplace {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules: Vec<Rule> = rules
            .into_iter()
            .filter_map(|rule| Rule::parse(rule.as_ref()))
            .collect();
        debug!(rules_count = rules.len(); "Relocation rules compiled");
        Self { rules }
    }

    /// Applies the rules and the sanitization pass to `name`.
    pub fn apply(&self, name: &str) -> String {
        let mut path = name.to_string();
        for rule in &self.rules {
            path = rule
                .pattern
                .replace_all(&path, rule.replacement.as_str())
                .into_owned();
        }
        for (re, with) in SANITIZE.iter() {
            path = re.replace_all(&path, *with).into_owned();
        }
        path.trim_matches(['/', '.']).replace('-', "_")
    }
}
