//! Rule compilation and sequential application.

use std::borrow::Cow;

use regex::Regex;

use super::rule::{Matcher, Rule, RuleError, Scope};

// ============================================================================
// Compiled rules
// ============================================================================

enum CompiledMatcher {
    Literal(&'static str),
    Pattern(Regex),
}

struct CompiledRule {
    rule: Rule,
    matcher: CompiledMatcher,
}

impl CompiledRule {
    fn compile(rule: Rule) -> Result<Self, RuleError> {
        let matcher = match rule.matcher {
            Matcher::Literal(needle) => CompiledMatcher::Literal(needle),
            Matcher::Pattern(pattern) => {
                let re = Regex::new(pattern).map_err(|source| RuleError::Pattern {
                    rule: rule.name,
                    source: Box::new(source),
                })?;
                validate_template(rule.name, &re, rule.replacement)?;
                CompiledMatcher::Pattern(re)
            }
        };
        Ok(Self { rule, matcher })
    }
}

/// Validate `$n` / `${n}` capture references in a replacement template.
///
/// The regex crate expands unknown groups to the empty string at replacement
/// time; here an unknown reference is instead a hard error, raised once at
/// set construction.
fn validate_template(rule: &'static str, re: &Regex, template: &str) -> Result<(), RuleError> {
    let bytes = template.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        i += 1;
        if i >= bytes.len() {
            break; // trailing '$' is literal
        }
        if bytes[i] == b'$' {
            i += 1; // '$$' escapes a dollar sign
            continue;
        }

        let braced = bytes[i] == b'{';
        if braced {
            i += 1;
        }
        let start = i;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
            i += 1;
        }
        let reference = &template[start..i];
        if braced {
            if i >= bytes.len() || bytes[i] != b'}' {
                continue; // unterminated '${' is treated literally by regex
            }
            i += 1;
        }
        if reference.is_empty() {
            continue;
        }

        let known = match reference.parse::<usize>() {
            Ok(index) => index < re.captures_len(),
            Err(_) => re.capture_names().flatten().any(|name| name == reference),
        };
        if !known {
            return Err(RuleError::Capture {
                rule,
                reference: reference.to_string(),
                available: re.captures_len() - 1,
            });
        }
    }

    Ok(())
}

// ============================================================================
// PatchSet
// ============================================================================

/// Result of applying a [`PatchSet`] to one document.
pub struct PatchOutcome {
    /// The transformed document text.
    pub text: String,
    /// Whether `text` differs character-for-character from the input.
    pub changed: bool,
}

/// A fixed, ordered collection of compiled rules.
///
/// Construction validates every rule eagerly; a malformed pattern or
/// replacement template fails the whole set before any document is touched.
pub struct PatchSet {
    rules: Vec<CompiledRule>,
}

impl PatchSet {
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Result<Self, RuleError> {
        let rules = rules
            .into_iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order, each rule's output feeding the next
    /// rule's input. Guards are evaluated against the intermediate document
    /// immediately before their rule runs.
    pub fn apply(&self, doc: &str) -> PatchOutcome {
        let mut text = doc.to_string();

        for compiled in &self.rules {
            let rule = &compiled.rule;
            if let Some(guard) = &rule.guard
                && !guard.allows(&text)
            {
                continue;
            }

            match (&compiled.matcher, rule.scope) {
                (CompiledMatcher::Literal(needle), Scope::All) => {
                    if text.contains(needle) {
                        text = text.replace(needle, rule.replacement);
                    }
                }
                (CompiledMatcher::Literal(needle), Scope::First) => {
                    if text.contains(needle) {
                        text = text.replacen(needle, rule.replacement, 1);
                    }
                }
                (CompiledMatcher::Pattern(re), Scope::All) => {
                    if let Cow::Owned(out) = re.replace_all(&text, rule.replacement) {
                        text = out;
                    }
                }
                (CompiledMatcher::Pattern(re), Scope::First) => {
                    if let Cow::Owned(out) = re.replace(&text, rule.replacement) {
                        text = out;
                    }
                }
            }
        }

        let changed = text != doc;
        PatchOutcome { text, changed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::rule::Group;

    fn set(rules: Vec<Rule>) -> PatchSet {
        PatchSet::new(rules).expect("rules should compile")
    }

    #[test]
    fn test_rules_run_in_order() {
        // The second rule only matches text the first rule introduces.
        let patches = set(vec![
            Rule::literal("one", Group::Accessibility, "a", "b"),
            Rule::literal("two", Group::Accessibility, "b", "c"),
        ]);

        let outcome = patches.apply("a");
        assert_eq!(outcome.text, "c");
        assert!(outcome.changed);
    }

    #[test]
    fn test_scope_first_vs_all() {
        let all = set(vec![Rule::literal("r", Group::Accessibility, "x", "y")]);
        assert_eq!(all.apply("x x x").text, "y y y");

        let first = set(vec![
            Rule::literal("r", Group::Accessibility, "x", "y").first(),
        ]);
        assert_eq!(first.apply("x x x").text, "y x x");
    }

    #[test]
    fn test_pattern_capture_expansion() {
        let patches = set(vec![Rule::pattern(
            "swap",
            Group::Performance,
            r"(\w+)=(\w+)",
            "$2=$1",
        )]);
        assert_eq!(patches.apply("a=b c=d").text, "b=a d=c");
    }

    #[test]
    fn test_guard_blocks_rule() {
        let patches = set(vec![
            Rule::literal("guarded", Group::Accessibility, "x", "y").guarded(&[], &["stop"]),
        ]);

        assert_eq!(patches.apply("x").text, "y");

        let outcome = patches.apply("x stop");
        assert_eq!(outcome.text, "x stop");
        assert!(!outcome.changed);
    }

    #[test]
    fn test_guard_sees_previous_rule_output() {
        // The first rule introduces the marker that vetoes the second.
        let patches = set(vec![
            Rule::literal("introduce", Group::Accessibility, "a", "marker"),
            Rule::literal("vetoed", Group::Accessibility, "b", "c").guarded(&[], &["marker"]),
        ]);

        assert_eq!(patches.apply("a b").text, "marker b");
    }

    #[test]
    fn test_noop_document_unchanged() {
        let patches = set(vec![Rule::literal("r", Group::Accessibility, "x", "y")]);
        let outcome = patches.apply("nothing to see here");
        assert_eq!(outcome.text, "nothing to see here");
        assert!(!outcome.changed);
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let result = PatchSet::new(vec![Rule::pattern(
            "broken",
            Group::Accessibility,
            "(unclosed",
            "x",
        )]);
        assert!(matches!(result, Err(RuleError::Pattern { rule: "broken", .. })));
    }

    #[test]
    fn test_unknown_capture_reference_fails_construction() {
        let result = PatchSet::new(vec![Rule::pattern(
            "broken",
            Group::Accessibility,
            "(a)(b)",
            "$1$3",
        )]);
        match result {
            Err(RuleError::Capture {
                rule,
                reference,
                available,
            }) => {
                assert_eq!(rule, "broken");
                assert_eq!(reference, "3");
                assert_eq!(available, 2);
            }
            other => panic!("expected capture error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_braced_and_escaped_template_refs() {
        // ${1} is valid, $$ is a literal dollar and never a reference.
        assert!(
            PatchSet::new(vec![Rule::pattern("ok", Group::Accessibility, "(a)", "${1}$$2")])
                .is_ok()
        );
        assert!(
            PatchSet::new(vec![Rule::pattern("bad", Group::Accessibility, "(a)", "${7}")]).is_err()
        );
    }

    #[test]
    fn test_empty_set_is_noop() {
        let patches = set(Vec::new());
        assert!(patches.is_empty());
        assert_eq!(patches.len(), 0);
        assert!(!patches.apply("doc").changed);
    }
}
