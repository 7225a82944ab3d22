//! Property tests for the tokenizer and validator.

use grammar::{check, tokenize, Token};
use proptest::prelude::*;

fn rule_name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

/// Expression bodies with no parens, strings, comments or arrows.
fn plain_expression() -> impl Strategy<Value = String> {
    let term = prop_oneof![
        "[a-z][a-z0-9]{0,5}",
        Just("*".to_owned()),
        Just("+".to_owned()),
        Just("?".to_owned()),
        Just("/".to_owned()),
        Just("!".to_owned()),
        Just("&".to_owned()),
        Just("[0-9]".to_owned()),
        Just("{a..z}".to_owned()),
        Just("1".to_owned()),
    ];
    prop::collection::vec(term, 1..12).prop_map(|terms| terms.join(" "))
}

proptest! {
    #[test]
    fn single_rule_is_valid(name in rule_name(), expr in plain_expression()) {
        let text = format!("{} <- {}", name, expr);
        let result = check(&text);
        prop_assert!(result.is_valid(), "text: {:?}, diagnostics: {:?}", text, result.diagnostics);
        prop_assert_eq!(result.rule_names, vec![name]);
    }

    #[test]
    fn unbalanced_parens_give_one_grouping_diagnostic(
        (open, close) in (0usize..24, 0usize..24).prop_filter("counts differ", |(n, m)| n != m)
    ) {
        let text = format!("{}{}", "(".repeat(open), ")".repeat(close));
        let result = check(&text);
        prop_assert!(!result.is_valid());

        let grouping = result
            .diagnostics
            .iter()
            .filter(|d| d.message.contains("unmatched"))
            .count();
        prop_assert_eq!(grouping, 1, "diagnostics: {:?}", result.diagnostics);
    }

    #[test]
    fn tokenize_is_pure(text in any::<String>()) {
        let first: Vec<Token> = tokenize(&text).collect();
        let second: Vec<Token> = tokenize(&text).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn tokens_cover_the_input(text in any::<String>()) {
        let tokens: Vec<Token> = tokenize(&text).collect();
        let joined: String = tokens.iter().map(|t| t.text).collect();
        prop_assert_eq!(&joined, &text);

        let mut offset = 0;
        for token in &tokens {
            prop_assert_eq!(token.position, offset);
            offset += token.text.len();
        }
    }

    #[test]
    fn validate_never_panics(text in any::<String>()) {
        let result = check(&text);
        prop_assert_eq!(result.is_valid(), result.error_count() == 0);
    }
}
