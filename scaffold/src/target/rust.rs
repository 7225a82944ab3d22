//! Rust scaffold.
//!
//! Items are generated with `quote`, except for the grammar constant. The
//! grammar is written out as a raw string literal by hand so the text lands
//! in the output byte for byte. Raw strings can't hold a carriage return, so
//! grammars containing one are written as an escaped string literal instead.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use super::{provenance, Context};

pub(super) fn render(ctx: &Context) -> String {
    format!(
        "// Scaffold generated from {file}\n\
         // Replace the body of `parse` with a call into a PEG runtime.\n\
         \n\
         const GRAMMAR: &str = {grammar};\n\
         \n\
         {binding}\n\
         \n\
         {parse}\n\
         \n\
         {harness}\n",
        file = provenance(ctx.file_identifier),
        grammar = grammar_literal(ctx.grammar),
        binding = generate_binding(ctx.entry_rule),
        parse = generate_parse_stub(),
        harness = generate_harness(),
    )
}

fn grammar_literal(text: &str) -> String {
    if text.contains('\r') {
        Literal::string(text).to_string()
    } else {
        raw_string_literal(text)
    }
}

/// Wrap text in a raw string literal, using enough `#`s that nothing in the
/// text can close it early.
fn raw_string_literal(text: &str) -> String {
    let mut hashes = 1;
    while text.contains(&format!("\"{}", "#".repeat(hashes))) {
        hashes += 1;
    }
    let guard = "#".repeat(hashes);
    format!("r{guard}\"{text}\"{guard}")
}

/// The rule parsing starts from.
fn generate_binding(entry_rule: &str) -> TokenStream {
    quote! {
        const ENTRY_RULE: &str = #entry_rule;
    }
}

fn generate_parse_stub() -> TokenStream {
    quote! {
        fn parse(grammar: &str, entry_rule: &str, input: &str) -> Result<Vec<String>, usize> {
            let _ = (grammar, entry_rule, input);
            Err(0)
        }
    }
}

/// Run the parser on a sample input and report where it stopped.
fn generate_harness() -> TokenStream {
    quote! {
        fn main() -> std::process::ExitCode {
            let input = "your input here";
            match parse(GRAMMAR, ENTRY_RULE, input) {
                Ok(captures) => {
                    println!("Parsing succeeded!");
                    if !captures.is_empty() {
                        println!("Captures: {:?}", captures);
                    }
                    std::process::ExitCode::SUCCESS
                }
                Err(position) => {
                    println!("Parsing failed at position {}", position);
                    std::process::ExitCode::FAILURE
                }
            }
        }
    }
}
