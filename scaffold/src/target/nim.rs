//! NPeg scaffold. The grammar body goes straight into the `peg` block.
//!
//! Only the first grammar line picks up the block's two space indent. Later
//! lines keep their own indentation, so a multi-line grammar written flush
//! left must be indented by hand before the output compiles as Nim.

use super::{provenance, Context};

pub(super) fn render(ctx: &Context) -> String {
    format!(
        r#"import npeg, strutils

let parser = peg "{entry}":
  # Grammar generated from {file}
  {grammar}

# Example usage
let input = "your input here"
let result = parser.match(input)

if result.ok:
  echo "Parsing succeeded!"
  if result.captures.len > 0:
    echo "Captures: ", result.captures
else:
  echo "Parsing failed at position ", result.matchMax
"#,
        entry = ctx.entry_rule,
        file = provenance(ctx.file_identifier),
        grammar = ctx.grammar,
    )
}
