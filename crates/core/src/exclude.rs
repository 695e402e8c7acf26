//! Exclude pattern filtering
//!
//! Glob patterns supplied via `--exclude` are compiled once per run and
//! tested against `/`-separated relative paths. The exclude set applies
//! symmetrically: an excluded path is never uploaded, downloaded, or
//! deleted in either direction.

use glob::Pattern;

use crate::error::{Error, Result};

/// A compiled, immutable set of exclude patterns
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<Pattern>,
}

impl ExcludeSet {
    /// Compile a set of glob patterns.
    ///
    /// Fails with `Error::InvalidPattern` on the first malformed pattern.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref())
                    .map_err(|e| Error::InvalidPattern(format!("{}: {e}", p.as_ref())))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Whether the given relative path matches any exclude pattern
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(rel_path))
    }

    /// Number of compiled patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_excludes_nothing() {
        let set = ExcludeSet::default();
        assert!(!set.is_excluded("a.txt"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_glob_matching() {
        let set = ExcludeSet::new(&["*.tmp", "logs/*"]).unwrap();
        assert!(set.is_excluded("scratch.tmp"));
        assert!(set.is_excluded("logs/app.log"));
        assert!(!set.is_excluded("data/app.log"));
        assert!(!set.is_excluded("notes.txt"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = ExcludeSet::new(&["[broken"]).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
