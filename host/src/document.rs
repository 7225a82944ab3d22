use std::fs;
use std::path::Path;

use grammar::GrammarDocument;

use crate::error::{HostError, Result};

/// Extension NPeg grammar files carry.
pub const GRAMMAR_EXTENSION: &str = "npeg";

pub fn is_grammar_file(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case(GRAMMAR_EXTENSION))
}

/// Read a grammar file. The path becomes the document's file identifier.
pub fn load_document(path: &Path) -> Result<GrammarDocument> {
    if !is_grammar_file(path) {
        return Err(HostError::NotAGrammarFile(path.to_owned()));
    }
    let source_text = fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(GrammarDocument::new(
        path.display().to_string(),
        source_text,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_extension() {
        assert!(is_grammar_file(Path::new("a/b.npeg")));
        assert!(is_grammar_file(Path::new("B.NPEG")));
        assert!(!is_grammar_file(Path::new("b.nim")));
        assert!(!is_grammar_file(Path::new("npeg")));
    }

    #[test]
    fn load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calc.npeg");
        fs::write(&path, "a <- 'x'\n").unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.source_text, "a <- 'x'\n");
        assert_eq!(doc.file_identifier, path.display().to_string());
    }

    #[test]
    fn rejects_other_files() {
        let err = load_document(Path::new("grammar.txt")).unwrap_err();
        assert_eq!(err.to_string(), "grammar.txt is not an NPeg grammar file");
    }

    #[test]
    fn missing_file() {
        let err = load_document(Path::new("/no/such/file.npeg")).unwrap_err();
        assert!(matches!(err, HostError::Io { .. }));
    }
}
