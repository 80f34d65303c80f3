use regex::{NoExpand, Regex};
use std::fmt;
use tracing::debug;

use crate::error::{PatchError, PatchResult};

/// How a transformation locates the text it rewrites
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact substring, every occurrence
    Literal { needle: String, replacement: String },
    /// Regular expression, every non-overlapping occurrence. The
    /// replacement is inserted verbatim.
    Pattern { regex: Regex, replacement: String },
    /// Exact substring that gets `text` appended after it, unless the
    /// occurrence is already followed by `text`
    InsertAfter { anchor: String, text: String },
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Literal { needle, .. } => write!(f, "literal {:?}", needle),
            Matcher::Pattern { regex, .. } => write!(f, "pattern /{}/", regex.as_str()),
            Matcher::InsertAfter { anchor, .. } => write!(f, "insert after {:?}", anchor),
        }
    }
}

/// A single named rewrite of the page source
#[derive(Debug, Clone)]
pub struct Transformation {
    pub name: &'static str,
    pub matcher: Matcher,
}

/// Output of one transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub content: String,
    pub matches: usize,
}

impl Transformation {
    pub fn literal(name: &'static str, needle: &str, replacement: &str) -> Self {
        Self {
            name,
            matcher: Matcher::Literal {
                needle: needle.to_string(),
                replacement: replacement.to_string(),
            },
        }
    }

    /// Compile `pattern` into a regex transformation. The replacement is
    /// inserted verbatim; `$1`-style group references are not expanded.
    pub fn pattern(name: &'static str, pattern: &str, replacement: &str) -> PatchResult<Self> {
        let regex =
            Regex::new(pattern).map_err(|e| PatchError::invalid_pattern(pattern, e))?;
        Ok(Self {
            name,
            matcher: Matcher::Pattern {
                regex,
                replacement: replacement.to_string(),
            },
        })
    }

    pub fn insert_after(name: &'static str, anchor: &str, text: &str) -> Self {
        Self {
            name,
            matcher: Matcher::InsertAfter {
                anchor: anchor.to_string(),
                text: text.to_string(),
            },
        }
    }

    /// Apply this transformation to `content`. No match is not an error.
    pub fn apply(&self, content: &str) -> StepOutcome {
        match &self.matcher {
            Matcher::Literal {
                needle,
                replacement,
            } => {
                if needle.is_empty() {
                    return unchanged(content);
                }
                let matches = content.matches(needle.as_str()).count();
                if matches == 0 {
                    return unchanged(content);
                }
                StepOutcome {
                    content: content.replace(needle.as_str(), replacement),
                    matches,
                }
            }
            Matcher::Pattern { regex, replacement } => {
                let matches = regex.find_iter(content).count();
                if matches == 0 {
                    return unchanged(content);
                }
                StepOutcome {
                    content: regex
                        .replace_all(content, NoExpand(replacement.as_str()))
                        .into_owned(),
                    matches,
                }
            }
            Matcher::InsertAfter { anchor, text } => insert_after(content, anchor, text),
        }
    }
}

fn unchanged(content: &str) -> StepOutcome {
    StepOutcome {
        content: content.to_string(),
        matches: 0,
    }
}

fn insert_after(content: &str, anchor: &str, text: &str) -> StepOutcome {
    if anchor.is_empty() || text.is_empty() {
        return unchanged(content);
    }

    let mut result = String::with_capacity(content.len() + text.len());
    let mut last = 0;
    let mut matches = 0;

    for (start, _) in content.match_indices(anchor) {
        let end = start + anchor.len();
        result.push_str(&content[last..end]);
        if !content[end..].starts_with(text) {
            result.push_str(text);
            matches += 1;
        }
        last = end;
    }
    result.push_str(&content[last..]);

    StepOutcome {
        content: result,
        matches,
    }
}

/// Match count recorded for one step of a `PatchSet`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub name: &'static str,
    pub matches: usize,
}

/// Result of running a whole `PatchSet`
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub content: String,
    pub steps: Vec<StepReport>,
}

impl PatchOutcome {
    pub fn total_matches(&self) -> usize {
        self.steps.iter().map(|s| s.matches).sum()
    }
}

/// Ordered list of transformations, each applied to the previous one's output
#[derive(Debug, Clone, Default)]
pub struct PatchSet {
    transformations: Vec<Transformation>,
}

impl PatchSet {
    pub fn new(transformations: Vec<Transformation>) -> Self {
        Self { transformations }
    }

    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transformation> {
        self.transformations.iter()
    }

    pub fn apply(&self, content: &str) -> PatchOutcome {
        let mut current = content.to_string();
        let mut steps = Vec::with_capacity(self.transformations.len());

        for (index, transformation) in self.transformations.iter().enumerate() {
            let outcome = transformation.apply(&current);
            debug!(
                "Step {} ({}): {} match(es) for {}",
                index + 1,
                transformation.name,
                outcome.matches,
                transformation.matcher
            );
            steps.push(StepReport {
                name: transformation.name,
                matches: outcome.matches,
            });
            current = outcome.content;
        }

        PatchOutcome {
            content: current,
            steps,
        }
    }
}
