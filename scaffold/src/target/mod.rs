use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ScaffoldError;

mod nim;
mod rust;

/// Everything a template needs to render a scaffold.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Grammar source, embedded verbatim.
    pub grammar: &'a str,
    pub file_identifier: &'a str,
    pub entry_rule: &'a str,
}

/// Host languages a scaffold can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// An NPeg program.
    Nim,
    /// A Rust program with the grammar as a string constant.
    Rust,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::Nim, Target::Rust];

    pub fn id(self) -> &'static str {
        match self {
            Target::Nim => "nim",
            Target::Rust => "rust",
        }
    }

    /// Conventional extension for files holding a scaffold.
    pub fn extension(self) -> &'static str {
        match self {
            Target::Nim => "nim",
            Target::Rust => "rs",
        }
    }

    pub fn render(self, ctx: &Context) -> String {
        match self {
            Target::Nim => nim::render(ctx),
            Target::Rust => rust::render(ctx),
        }
    }

    /// Comma separated list of all target ids.
    pub fn supported() -> String {
        Target::ALL
            .iter()
            .map(|t| t.id())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Target {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .iter()
            .copied()
            .find(|t| t.id() == s)
            .ok_or_else(|| ScaffoldError::UnknownTargetLanguage {
                requested: s.to_owned(),
                supported: Target::supported(),
            })
    }
}

/// File identifiers end up in line comments, so they must stay on one line.
fn provenance(file_identifier: &str) -> String {
    file_identifier.replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_targets() {
        assert_eq!("nim".parse::<Target>(), Ok(Target::Nim));
        assert_eq!("rust".parse::<Target>(), Ok(Target::Rust));

        let err = "cobol".parse::<Target>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown target language `cobol`, supported targets: nim, rust"
        );
    }

    #[test]
    fn extensions() {
        let got: Vec<(&str, &str)> = Target::ALL.iter().map(|t| (t.id(), t.extension())).collect();
        assert_eq!(got, vec![("nim", "nim"), ("rust", "rs")]);
    }

    #[test]
    fn provenance_is_single_line() {
        assert_eq!(provenance("a\nb.npeg"), "a b.npeg");
        assert_eq!(provenance("/tmp/x.npeg"), "/tmp/x.npeg");
    }
}
