//! Grammar symbols for the sailfish template language.
//!
//! Symbol ids, names, and metadata are a published interface: hosts address
//! nodes by these exact strings and numbers, so they must stay stable
//! across releases. Terminals come first in the id space, mirroring the
//! table layout the language version number refers to.

use serde::{Deserialize, Serialize};

/// Version number identifying table-format compatibility with hosts.
pub const LANGUAGE_VERSION: u32 = 14;

/// Number of grammar symbols, terminals first.
pub const SYMBOL_COUNT: usize = 10;

/// Number of terminal symbols (token kinds).
pub const TOKEN_COUNT: usize = 6;

/// A grammar symbol: terminal, non-terminal, or the error marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Symbol {
    /// End-of-input sentinel
    End = 0,
    /// A maximal run of literal template text
    HtmlPart = 1,
    /// The one-byte block classifier following `<%`
    Directive = 2,
    /// The `%>` closer
    Close = 3,
    /// The bytes of an embedded code block
    RustCode = 4,
    /// A `<%# ... %>` block consumed as a single token
    Comment = 5,
    /// Document root
    Document = 6,
    /// Hidden node alternative (text or block)
    Node = 7,
    /// A `DIRECTIVE CODE CLOSE` block
    SailfishPart = 8,
    /// Hidden repetition auxiliary
    DocumentRepeat = 9,
    /// Synthesized error marker; sits outside the grammar tables
    Error = 0xFFFF,
}

/// Published names, indexed by symbol id.
pub const SYMBOL_NAMES: [&str; SYMBOL_COUNT] = [
    "end",
    "html_part",
    "sailfish_part_token1",
    "%>",
    "rust_code",
    "comment",
    "document",
    "_node",
    "sailfish_part",
    "document_repeat1",
];

/// Visibility and naming metadata published per symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMetadata {
    /// Whether the symbol appears in rendered trees
    pub visible: bool,
    /// Whether hosts can query the symbol by name
    pub named: bool,
}

/// Metadata table, indexed by symbol id.
pub const SYMBOL_METADATA: [SymbolMetadata; SYMBOL_COUNT] = [
    // end
    SymbolMetadata { visible: false, named: true },
    // html_part
    SymbolMetadata { visible: true, named: true },
    // sailfish_part_token1
    SymbolMetadata { visible: false, named: false },
    // %>
    SymbolMetadata { visible: true, named: false },
    // rust_code
    SymbolMetadata { visible: true, named: true },
    // comment
    SymbolMetadata { visible: true, named: true },
    // document
    SymbolMetadata { visible: true, named: true },
    // _node
    SymbolMetadata { visible: false, named: true },
    // sailfish_part
    SymbolMetadata { visible: true, named: true },
    // document_repeat1
    SymbolMetadata { visible: false, named: false },
];

impl Symbol {
    /// Numeric symbol id.
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Look a symbol up by id.
    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            0 => Some(Symbol::End),
            1 => Some(Symbol::HtmlPart),
            2 => Some(Symbol::Directive),
            3 => Some(Symbol::Close),
            4 => Some(Symbol::RustCode),
            5 => Some(Symbol::Comment),
            6 => Some(Symbol::Document),
            7 => Some(Symbol::Node),
            8 => Some(Symbol::SailfishPart),
            9 => Some(Symbol::DocumentRepeat),
            u16::MAX => Some(Symbol::Error),
            _ => None,
        }
    }

    /// The published name for this symbol.
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Error => "ERROR",
            _ => SYMBOL_NAMES[self.id() as usize],
        }
    }

    /// Visibility/naming metadata for this symbol.
    pub fn metadata(self) -> SymbolMetadata {
        match self {
            Symbol::Error => SymbolMetadata {
                visible: true,
                named: true,
            },
            _ => SYMBOL_METADATA[self.id() as usize],
        }
    }

    /// Whether the symbol appears in rendered trees.
    pub fn is_visible(self) -> bool {
        self.metadata().visible
    }

    /// Whether hosts can query the symbol by name.
    pub fn is_named(self) -> bool {
        self.metadata().named
    }

    /// Whether the symbol is a terminal (token kind).
    pub fn is_terminal(self) -> bool {
        (self.id() as usize) < TOKEN_COUNT
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_ids_stable() {
        assert_eq!(Symbol::End.id(), 0);
        assert_eq!(Symbol::HtmlPart.id(), 1);
        assert_eq!(Symbol::Directive.id(), 2);
        assert_eq!(Symbol::Close.id(), 3);
        assert_eq!(Symbol::RustCode.id(), 4);
        assert_eq!(Symbol::Comment.id(), 5);
        assert_eq!(Symbol::Document.id(), 6);
        assert_eq!(Symbol::Node.id(), 7);
        assert_eq!(Symbol::SailfishPart.id(), 8);
        assert_eq!(Symbol::DocumentRepeat.id(), 9);
    }

    #[test]
    fn test_symbol_names() {
        assert_eq!(Symbol::End.name(), "end");
        assert_eq!(Symbol::HtmlPart.name(), "html_part");
        assert_eq!(Symbol::Directive.name(), "sailfish_part_token1");
        assert_eq!(Symbol::Close.name(), "%>");
        assert_eq!(Symbol::RustCode.name(), "rust_code");
        assert_eq!(Symbol::Comment.name(), "comment");
        assert_eq!(Symbol::Document.name(), "document");
        assert_eq!(Symbol::Node.name(), "_node");
        assert_eq!(Symbol::SailfishPart.name(), "sailfish_part");
        assert_eq!(Symbol::DocumentRepeat.name(), "document_repeat1");
        assert_eq!(Symbol::Error.name(), "ERROR");
    }

    #[test]
    fn test_symbol_visibility() {
        assert!(Symbol::HtmlPart.is_visible());
        assert!(Symbol::Close.is_visible());
        assert!(Symbol::RustCode.is_visible());
        assert!(Symbol::Comment.is_visible());
        assert!(Symbol::Document.is_visible());
        assert!(Symbol::SailfishPart.is_visible());

        assert!(!Symbol::End.is_visible());
        assert!(!Symbol::Directive.is_visible());
        assert!(!Symbol::Node.is_visible());
        assert!(!Symbol::DocumentRepeat.is_visible());
    }

    #[test]
    fn test_symbol_named() {
        assert!(Symbol::End.is_named());
        assert!(Symbol::HtmlPart.is_named());
        assert!(Symbol::RustCode.is_named());
        assert!(Symbol::Comment.is_named());
        assert!(Symbol::Document.is_named());
        assert!(Symbol::Node.is_named());
        assert!(Symbol::SailfishPart.is_named());

        assert!(!Symbol::Directive.is_named());
        assert!(!Symbol::Close.is_named());
        assert!(!Symbol::DocumentRepeat.is_named());
    }

    #[test]
    fn test_symbol_terminals() {
        assert!(Symbol::End.is_terminal());
        assert!(Symbol::Comment.is_terminal());
        assert!(!Symbol::Document.is_terminal());
        assert!(!Symbol::SailfishPart.is_terminal());
    }

    #[test]
    fn test_symbol_roundtrip() {
        for id in 0..SYMBOL_COUNT as u16 {
            let sym = Symbol::from_id(id).unwrap();
            assert_eq!(sym.id(), id);
            assert_eq!(sym.name(), SYMBOL_NAMES[id as usize]);
        }
        assert_eq!(Symbol::from_id(42), None);
        assert_eq!(Symbol::from_id(u16::MAX), Some(Symbol::Error));
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol::Document.to_string(), "document");
        assert_eq!(Symbol::Close.to_string(), "%>");
    }
}
