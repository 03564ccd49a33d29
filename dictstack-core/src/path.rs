//! Path-fragment matching.
//!
//! A fragment selects a dictionary when its components form a trailing run of
//! the dictionary path's components, so `main.json` and `spanish/main.json`
//! both select `dicts/spanish/main.json` but `ish/main.json` does not.

use std::fmt;

fn is_separator(c: char) -> bool {
    c == '/' || c == std::path::MAIN_SEPARATOR
}

fn starts_with_separator(s: &str) -> bool {
    s.chars().next().is_some_and(is_separator)
}

/// A user fragment with redundant separators and `.`/`..` segments collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFragment {
    absolute: bool,
    components: Vec<String>,
}

impl NormalizedFragment {
    pub fn parse(fragment: &str) -> Self {
        let absolute = starts_with_separator(fragment);
        let mut components: Vec<String> = Vec::new();

        for part in fragment.split(is_separator) {
            match part {
                "" | "." => {}
                // `..` above the root of an absolute path is dropped.
                ".." => {
                    if components.last().is_some_and(|c| c != "..") {
                        components.pop();
                    } else if !absolute {
                        components.push("..".into());
                    }
                }
                other => components.push(other.to_string()),
            }
        }

        if components.is_empty() && !absolute {
            components.push(".".into());
        }

        Self {
            absolute,
            components,
        }
    }

    /// Whether `path` ends with this fragment on a component boundary.
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split(is_separator).filter(|p| !p.is_empty()).collect();

        if self.absolute {
            return starts_with_separator(path)
                && parts.len() == self.components.len()
                && parts.iter().zip(&self.components).all(|(a, b)| *a == b);
        }

        if parts.len() < self.components.len() {
            return false;
        }
        let tail = &parts[parts.len() - self.components.len()..];
        tail.iter().zip(&self.components).all(|(a, b)| *a == b)
    }
}

impl fmt::Display for NormalizedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            f.write_str("/")?;
        }
        f.write_str(&self.components.join("/"))
    }
}
