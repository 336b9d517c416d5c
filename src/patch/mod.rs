//! Ordered textual patch engine.
//!
//! A [`PatchSet`] is a fixed, ordered list of [`Rule`]s applied strictly in
//! sequence to one document: each rule's output feeds the next rule's input.
//! Documents are opaque character sequences; no HTML structure is parsed.
//!
//! # Modules
//!
//! - `rule`: the declarative rule model (matcher, replacement, scope, guard)
//! - `engine`: rule compilation, validation, and sequential application
//! - `catalog`: the built-in accessibility/performance rule table

mod catalog;
mod engine;
mod rule;

pub use catalog::{DEFAULT_RULES, enabled_rules};
pub use engine::{PatchOutcome, PatchSet};
pub use rule::{Group, Guard, Matcher, Rule, RuleError, Scope};
