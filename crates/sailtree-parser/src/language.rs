//! The loadable language descriptor.
//!
//! Hosts load the grammar through an opaque, versioned descriptor instead
//! of linking against parser internals. The descriptor carries the symbol
//! tables plus function pointers for lexing and for mapping a parse state
//! to its lexer start state, which is what an incremental driver needs to
//! restart lexing anywhere in a document.

use crate::lexer::{lex, LexMode, LexerDriver};
use crate::ParseState;
use sailtree_core::symbols::{
    SymbolMetadata, LANGUAGE_VERSION, SYMBOL_COUNT, SYMBOL_METADATA, SYMBOL_NAMES, TOKEN_COUNT,
};

/// Number of parse states published for start-state selection.
pub const PARSE_STATE_COUNT: u16 = 3;

/// A versioned grammar descriptor.
///
/// The version integer identifies table-format compatibility; a host built
/// against a different version must reject the descriptor.
pub struct Language {
    /// Table-format version
    pub version: u32,
    /// Total number of grammar symbols
    pub symbol_count: usize,
    /// Number of terminal symbols
    pub token_count: usize,
    /// Published symbol names, indexed by id
    pub symbol_names: &'static [&'static str],
    /// Visibility/naming metadata, indexed by id
    pub symbol_metadata: &'static [SymbolMetadata],
    /// The lex function
    pub lex: fn(&mut dyn LexerDriver, LexMode) -> bool,
    /// Lexer start state for a parse state id
    pub lex_mode: fn(u16) -> LexMode,
}

fn lex_mode_for(state: u16) -> LexMode {
    match state {
        s if s == ParseState::BlockCode as u16 || s == ParseState::BlockClose as u16 => {
            LexMode::Code
        }
        _ => LexMode::Text,
    }
}

static LANGUAGE: Language = Language {
    version: LANGUAGE_VERSION,
    symbol_count: SYMBOL_COUNT,
    token_count: TOKEN_COUNT,
    symbol_names: &SYMBOL_NAMES,
    symbol_metadata: &SYMBOL_METADATA,
    lex,
    lex_mode: lex_mode_for,
};

/// The descriptor for the sailfish template grammar.
pub fn language() -> &'static Language {
    &LANGUAGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Cursor;
    use sailtree_core::Symbol;

    #[test]
    fn test_descriptor_versions_and_counts() {
        let lang = language();
        assert_eq!(lang.version, 14);
        assert_eq!(lang.symbol_count, 10);
        assert_eq!(lang.token_count, 6);
    }

    #[test]
    fn test_descriptor_name_table() {
        let lang = language();
        assert_eq!(lang.symbol_names[0], "end");
        assert_eq!(lang.symbol_names[1], "html_part");
        assert_eq!(lang.symbol_names[2], "sailfish_part_token1");
        assert_eq!(lang.symbol_names[3], "%>");
        assert_eq!(lang.symbol_names[4], "rust_code");
        assert_eq!(lang.symbol_names[5], "comment");
        assert_eq!(lang.symbol_names[6], "document");
        assert_eq!(lang.symbol_names[7], "_node");
        assert_eq!(lang.symbol_names[8], "sailfish_part");
        assert_eq!(lang.symbol_names[9], "document_repeat1");
    }

    #[test]
    fn test_descriptor_metadata() {
        let lang = language();
        // end: hidden but named
        assert!(!lang.symbol_metadata[0].visible);
        assert!(lang.symbol_metadata[0].named);
        // %>: visible but anonymous
        assert!(lang.symbol_metadata[3].visible);
        assert!(!lang.symbol_metadata[3].named);
        // document_repeat1: hidden auxiliary
        assert!(!lang.symbol_metadata[9].visible);
        assert!(!lang.symbol_metadata[9].named);
    }

    #[test]
    fn test_descriptor_lex_fn() {
        let lang = language();
        let source = b"<%= x %>";
        let mut cursor = Cursor::new(source, 0);
        assert!((lang.lex)(&mut cursor, LexMode::Text));
        let tok = cursor.into_token();
        assert_eq!(tok.symbol, Symbol::Directive);
    }

    #[test]
    fn test_descriptor_state_lookup() {
        let lang = language();
        assert_eq!((lang.lex_mode)(0), LexMode::Text);
        assert_eq!((lang.lex_mode)(1), LexMode::Code);
        assert_eq!((lang.lex_mode)(2), LexMode::Code);
        // Unknown states fall back to the text start state.
        assert_eq!((lang.lex_mode)(7), LexMode::Text);
    }
}
