//! Declarative rule model.
//!
//! A [`Rule`] describes one text transformation as data: what to match
//! (exact substring or regex pattern), what to write in its place, how many
//! occurrences to touch, and an optional [`Guard`] precondition over the
//! whole document. Rules carry no compiled state; compilation and
//! validation happen once, in `PatchSet::new`.

use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while compiling a rule set.
///
/// These are configuration-time failures: a malformed rule aborts the whole
/// run before any document is read.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule `{rule}`: invalid pattern")]
    Pattern {
        rule: &'static str,
        #[source]
        source: Box<regex::Error>,
    },

    #[error(
        "rule `{rule}`: replacement references capture group `{reference}`, but the pattern only has {available}"
    )]
    Capture {
        rule: &'static str,
        reference: String,
        available: usize,
    },
}

// ============================================================================
// Rule components
// ============================================================================

/// Rule grouping, used for config-level toggles and the `rules` listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Accessibility,
    Performance,
}

impl Group {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accessibility => "accessibility",
            Self::Performance => "performance",
        }
    }
}

/// How a rule locates the text to replace.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Exact substring match.
    Literal(&'static str),
    /// Regex with capture groups; the replacement may reference them as `$n`.
    Pattern(&'static str),
}

/// How many matches a rule consumes per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every non-overlapping occurrence.
    All,
    /// Only the first occurrence (for known-unique anchors).
    First,
}

impl Scope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::First => "first",
        }
    }
}

/// Precondition over the current document state.
///
/// A guarded rule fires only if every `requires` marker is present in the
/// document and none of the `forbids` markers are. Guards are evaluated
/// immediately before their rule runs, against the output of the previous
/// rule, so insertion rules guard on a marker their own replacement writes.
#[derive(Debug, Clone, Copy)]
pub struct Guard {
    pub requires: &'static [&'static str],
    pub forbids: &'static [&'static str],
}

impl Guard {
    /// Check the guard against the current document text.
    pub fn allows(&self, doc: &str) -> bool {
        self.requires.iter().all(|marker| doc.contains(marker))
            && !self.forbids.iter().any(|marker| doc.contains(marker))
    }
}

// ============================================================================
// Rule
// ============================================================================

/// One declarative text transformation.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Stable identifier, shown by `retouch rules` and in debug output.
    pub name: &'static str,
    pub group: Group,
    pub matcher: Matcher,
    pub replacement: &'static str,
    pub scope: Scope,
    pub guard: Option<Guard>,
}

impl Rule {
    /// Literal substring rule replacing every occurrence.
    pub const fn literal(
        name: &'static str,
        group: Group,
        needle: &'static str,
        replacement: &'static str,
    ) -> Self {
        Self {
            name,
            group,
            matcher: Matcher::Literal(needle),
            replacement,
            scope: Scope::All,
            guard: None,
        }
    }

    /// Regex rule replacing every non-overlapping match.
    pub const fn pattern(
        name: &'static str,
        group: Group,
        pattern: &'static str,
        replacement: &'static str,
    ) -> Self {
        Self {
            name,
            group,
            matcher: Matcher::Pattern(pattern),
            replacement,
            scope: Scope::All,
            guard: None,
        }
    }

    /// Restrict the rule to the first occurrence only.
    pub const fn first(mut self) -> Self {
        self.scope = Scope::First;
        self
    }

    /// Attach a guard precondition.
    pub const fn guarded(
        mut self,
        requires: &'static [&'static str],
        forbids: &'static [&'static str],
    ) -> Self {
        self.guard = Some(Guard { requires, forbids });
        self
    }

    pub const fn kind(&self) -> &'static str {
        match self.matcher {
            Matcher::Literal(_) => "literal",
            Matcher::Pattern(_) => "pattern",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_requires_and_forbids() {
        let guard = Guard {
            requires: &["<body"],
            forbids: &["skip-link"],
        };

        assert!(guard.allows("<body class=\"x\">"));
        assert!(!guard.allows("<div>no body tag</div>"));
        assert!(!guard.allows("<body><a class=\"skip-link\"></a>"));
    }

    #[test]
    fn test_guard_empty_lists_always_allow() {
        let guard = Guard {
            requires: &[],
            forbids: &[],
        };
        assert!(guard.allows(""));
        assert!(guard.allows("anything"));
    }

    #[test]
    fn test_rule_builders() {
        let rule = Rule::literal("x", Group::Accessibility, "a", "b");
        assert_eq!(rule.scope, Scope::All);
        assert!(rule.guard.is_none());
        assert_eq!(rule.kind(), "literal");

        let rule = Rule::pattern("y", Group::Performance, "(a)", "$1")
            .first()
            .guarded(&["m"], &[]);
        assert_eq!(rule.scope, Scope::First);
        assert!(rule.guard.is_some());
        assert_eq!(rule.kind(), "pattern");
    }
}
