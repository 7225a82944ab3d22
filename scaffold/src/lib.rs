//! Generates parser scaffolds from validated grammars.
//!
//! A scaffold embeds the grammar text verbatim, binds an entry rule, and
//! wraps both in a small harness for the target host language. The grammar
//! is never parsed or executed here.

use tracing::{debug, warn};

use grammar::{GrammarDocument, ValidationResult};

mod error;
mod target;

pub use error::{Result, ScaffoldError};
pub use target::{Context, Target};

/// Entry rule used when a grammar defines no rules at all.
pub const FALLBACK_ENTRY_RULE: &str = "doc";

/// A rendered scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldResult {
    pub target_language_id: String,
    /// Conventional extension for a file holding `generated_text`.
    pub file_extension: &'static str,
    pub generated_text: String,
    pub entry_rule_name: String,
}

/// Generate a scaffold for `document` in the language named by
/// `target_language_id`.
///
/// Fails if `validation` reported errors, or if the target isn't known.
/// `entry_rule` is only honored if the grammar defines it.
pub fn generate(
    document: &GrammarDocument,
    validation: &ValidationResult,
    target_language_id: &str,
    entry_rule: Option<&str>,
) -> Result<ScaffoldResult> {
    if !validation.is_valid() {
        return Err(ScaffoldError::InvalidInput {
            errors: validation.error_count(),
        });
    }
    let target: Target = target_language_id.parse()?;
    let entry = resolve_entry_rule(validation, entry_rule);

    let ctx = Context {
        grammar: &document.source_text,
        file_identifier: &document.file_identifier,
        entry_rule: entry,
    };
    let generated_text = target.render(&ctx);
    debug!(
        file = %document.file_identifier,
        %target,
        entry,
        bytes = generated_text.len(),
        "generated scaffold"
    );

    Ok(ScaffoldResult {
        target_language_id: target.id().to_owned(),
        file_extension: target.extension(),
        generated_text,
        entry_rule_name: entry.to_owned(),
    })
}

/// Chosen rule if defined, else the first defined rule, else the fallback.
fn resolve_entry_rule<'a>(validation: &'a ValidationResult, chosen: Option<&'a str>) -> &'a str {
    if let Some(rule) = chosen {
        if validation.defines(rule) {
            return rule;
        }
        warn!(rule, "requested entry rule is not defined, ignoring");
    }
    validation
        .rule_names
        .first()
        .map(String::as_str)
        .unwrap_or(FALLBACK_ENTRY_RULE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammar::check;

    fn validated(text: &str) -> (GrammarDocument, ValidationResult) {
        let doc = GrammarDocument::new("test.npeg", text);
        let validation = check(&doc.source_text);
        (doc, validation)
    }

    #[test]
    fn first_rule_is_default_entry() {
        let (doc, v) = validated("number <- [0-9]+\nexpr <- number ('+' number)*");
        let out = generate(&doc, &v, "nim", None).unwrap();

        assert_eq!(out.entry_rule_name, "number");
        assert_eq!(out.target_language_id, "nim");
        assert_eq!(out.file_extension, "nim");
        assert!(out.generated_text.contains("peg \"number\":"));
        assert!(out.generated_text.contains(&doc.source_text));
    }

    #[test]
    fn chosen_entry_rule() {
        let (doc, v) = validated("number <- [0-9]+\nexpr <- number ('+' number)*");

        let out = generate(&doc, &v, "nim", Some("expr")).unwrap();
        assert_eq!(out.entry_rule_name, "expr");

        let out = generate(&doc, &v, "nim", Some("missing")).unwrap();
        assert_eq!(out.entry_rule_name, "number");
    }

    #[test]
    fn invalid_grammar_is_rejected() {
        let (doc, v) = validated("");
        assert!(v.rule_names.is_empty());

        let err = generate(&doc, &v, "nim", None).unwrap_err();
        assert_eq!(err, ScaffoldError::InvalidInput { errors: 1 });
    }

    #[test]
    fn unknown_target() {
        let (doc, v) = validated("a <- 'x'");
        let err = generate(&doc, &v, "cobol", None).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnknownTargetLanguage { .. }));
        assert!(err.to_string().contains("nim, rust"));
    }

    #[test]
    fn fallback_entry_without_rules() {
        let doc = GrammarDocument::new("empty.npeg", "");
        let v = ValidationResult::default();
        let out = generate(&doc, &v, "rust", None).unwrap();
        assert_eq!(out.entry_rule_name, FALLBACK_ENTRY_RULE);
        assert_eq!(out.file_extension, "rs");
    }

    #[test]
    fn output_is_deterministic() {
        let (doc, v) = validated("a <- b\nb <- 'x'");
        for target in Target::ALL {
            let first = generate(&doc, &v, target.id(), None).unwrap();
            let second = generate(&doc, &v, target.id(), None).unwrap();
            assert_eq!(first, second);
        }
    }
}
