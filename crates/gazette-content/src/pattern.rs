//! Glob-style path patterns for selecting content files.
//!
//! Supported syntax:
//! - `**/` matches zero or more directory segments
//! - `*` matches within a single segment
//! - `?` matches one character other than `/`
//! - `{a,b}` matches either alternative

use regex::Regex;

/// A compiled glob pattern matched against `/`-separated relative paths.
#[derive(Debug, Clone)]
pub struct ContentPattern {
    glob: String,
    regex: Regex,
}

impl ContentPattern {
    /// Compile a glob pattern. A leading `./` is ignored.
    pub fn new(glob: &str) -> Result<Self, PatternError> {
        let glob = glob.trim().trim_start_matches("./");
        if glob.is_empty() {
            return Err(PatternError::Empty);
        }

        let source = glob_to_regex(glob)?;
        let regex = Regex::new(&source).map_err(|e| PatternError::Invalid {
            glob: glob.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    /// The glob this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// Check whether a relative path matches.
    pub fn is_match(&self, relative_path: &str) -> bool {
        self.regex.is_match(relative_path.trim_start_matches("./"))
    }
}

impl std::str::FromStr for ContentPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Errors that can occur when compiling a pattern.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Content pattern is empty")]
    Empty,

    #[error("Unbalanced braces in pattern: {0}")]
    UnbalancedBraces(String),

    #[error("Invalid pattern {glob}: {message}")]
    Invalid { glob: String, message: String },
}

fn glob_to_regex(glob: &str) -> Result<String, PatternError> {
    let mut out = String::from("^");
    let mut chars = glob.chars().peekable();
    let mut in_group = false;

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("(?:[^/]+/)*");
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '{' if !in_group => {
                in_group = true;
                out.push_str("(?:");
            }
            '}' if in_group => {
                in_group = false;
                out.push(')');
            }
            ',' if in_group => out.push('|'),
            '{' | '}' => return Err(PatternError::UnbalancedBraces(glob.to_string())),
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }

    if in_group {
        return Err(PatternError::UnbalancedBraces(glob.to_string()));
    }

    out.push('$');
    Ok(out)
}
