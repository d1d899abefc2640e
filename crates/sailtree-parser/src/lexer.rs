//! Mode-directed lexer for sailfish templates.
//!
//! This module recognizes the six terminal kinds under two start states:
//! text context between blocks and code context inside them. The lex
//! function is written against a small driver interface so hosts can feed
//! it their own buffers, and lexing is resumable: lexing from any
//! (byte-offset, mode) pair yields the same token a full scan from the
//! start would produce at that point.

use sailtree_core::{Span, Symbol};

/// The bytes that classify a block when they follow the `<%` opener.
pub const DIRECTIVE_BYTES: [u8; 4] = [b' ', b'+', b'-', b'='];

/// Lexical start state.
///
/// The parser selects the state per token request; incremental drivers may
/// restart at any byte in [`LexMode::Text`], while a restart inside a code
/// block requires [`LexMode::Code`] and the block's interior offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexMode {
    /// Between blocks: TEXT, DIRECTIVE, COMMENT, or END
    Text,
    /// Inside a block after the directive: CODE, CLOSE, or END
    Code,
}

/// Driver surface the lex function runs against.
///
/// `advance(false)` consumes the cursor byte into the pending token's
/// leading padding rather than its content; the `<%` opener of a directive
/// is absorbed this way so the directive token stays one byte.
pub trait LexerDriver {
    /// Consume the current byte, into content or padding.
    fn advance(&mut self, include_in_token: bool);

    /// Mark the current position as the end of the token.
    fn mark_end(&mut self);

    /// Peek `n` bytes ahead of the cursor; `0` is the cursor byte.
    fn lookahead(&self, n: usize) -> Option<u8>;

    /// Whether the cursor is at end of input.
    fn eof(&self) -> bool;

    /// Record the recognized token kind.
    fn set_result(&mut self, symbol: Symbol);
}

/// Recognize one token starting at the driver's cursor.
///
/// Returns `true` when a token was recognized; the two shipped modes
/// always recognize one (END at end of input).
pub fn lex(driver: &mut dyn LexerDriver, mode: LexMode) -> bool {
    match mode {
        LexMode::Text => lex_text(driver),
        LexMode::Code => lex_code(driver),
    }
}

/// Whether the cursor sits on a validated opener: `<`, `%`, then a
/// directive byte or `#`. Anything less keeps the `<` literal.
fn at_opener(driver: &dyn LexerDriver) -> bool {
    driver.lookahead(0) == Some(b'<')
        && driver.lookahead(1) == Some(b'%')
        && matches!(
            driver.lookahead(2),
            Some(b) if b == b'#' || DIRECTIVE_BYTES.contains(&b)
        )
}

fn lex_text(driver: &mut dyn LexerDriver) -> bool {
    if driver.eof() {
        driver.mark_end();
        driver.set_result(Symbol::End);
        return true;
    }

    if at_opener(driver) {
        if driver.lookahead(2) == Some(b'#') {
            return lex_comment(driver);
        }
        // The directive byte alone determines the block flavor, so the
        // opener is absorbed as padding.
        driver.advance(false);
        driver.advance(false);
        driver.advance(true);
        driver.mark_end();
        driver.set_result(Symbol::Directive);
        return true;
    }

    // A text run ends only at a validated opener or end of input.
    while !driver.eof() && !at_opener(driver) {
        driver.advance(true);
    }
    driver.mark_end();
    driver.set_result(Symbol::HtmlPart);
    true
}

/// Consume `<%# ... %>` as one token. The body is arbitrary bytes up to
/// the earliest `%>`; at end of input the partial comment is still emitted
/// and the parser flags it.
fn lex_comment(driver: &mut dyn LexerDriver) -> bool {
    driver.advance(true);
    driver.advance(true);
    driver.advance(true);
    loop {
        if driver.eof() {
            break;
        }
        if driver.lookahead(0) == Some(b'%') && driver.lookahead(1) == Some(b'>') {
            driver.advance(true);
            driver.advance(true);
            break;
        }
        driver.advance(true);
    }
    driver.mark_end();
    driver.set_result(Symbol::Comment);
    true
}

fn lex_code(driver: &mut dyn LexerDriver) -> bool {
    if driver.eof() {
        driver.mark_end();
        driver.set_result(Symbol::End);
        return true;
    }

    if driver.lookahead(0) == Some(b'%') && driver.lookahead(1) == Some(b'>') {
        driver.advance(true);
        driver.advance(true);
        driver.mark_end();
        driver.set_result(Symbol::Close);
        return true;
    }

    // A `%` not followed by `>` belongs to the code run.
    while !driver.eof()
        && !(driver.lookahead(0) == Some(b'%') && driver.lookahead(1) == Some(b'>'))
    {
        driver.advance(true);
    }
    driver.mark_end();
    driver.set_result(Symbol::RustCode);
    true
}

/// One recognized terminal with its byte ranges.
///
/// `padding` covers bytes absorbed before the content (the `<%` opener of
/// a directive); `span` is the content itself. The padded spans of
/// consecutive tokens tile the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Token kind
    pub symbol: Symbol,
    /// Leading bytes absorbed before the content
    pub padding: Span,
    /// Content byte range
    pub span: Span,
}

impl Token {
    /// The full extent, from the first absorbed byte to the content end.
    pub fn padded_span(&self) -> Span {
        Span::new(self.padding.start, self.span.end)
    }

    /// The offset to resume lexing from.
    pub fn resume_at(&self) -> usize {
        self.span.end
    }
}

/// In-memory slice driver for the lex function.
#[derive(Debug)]
pub struct Cursor<'a> {
    source: &'a [u8],
    pos: usize,
    content_start: usize,
    padding_start: usize,
    end: usize,
    result: Option<Symbol>,
}

impl<'a> Cursor<'a> {
    /// Start a cursor at `offset` into `source`.
    pub fn new(source: &'a [u8], offset: usize) -> Self {
        let offset = offset.min(source.len());
        Self {
            source,
            pos: offset,
            content_start: offset,
            padding_start: offset,
            end: offset,
            result: None,
        }
    }

    /// Extract the recognized token.
    pub fn into_token(self) -> Token {
        Token {
            // The shipped modes always set a result; END is the safe
            // fallback for a driver state they cannot classify.
            symbol: self.result.unwrap_or(Symbol::End),
            padding: Span::new(self.padding_start, self.content_start),
            span: Span::new(self.content_start, self.end),
        }
    }
}

impl LexerDriver for Cursor<'_> {
    fn advance(&mut self, include_in_token: bool) {
        if self.pos >= self.source.len() {
            return;
        }
        // Padding only accumulates before the first content byte.
        let skip = !include_in_token && self.content_start == self.pos;
        self.pos += 1;
        if skip {
            self.content_start = self.pos;
        }
    }

    fn mark_end(&mut self) {
        self.end = self.pos;
    }

    fn lookahead(&self, n: usize) -> Option<u8> {
        self.source.get(self.pos + n).copied()
    }

    fn eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn set_result(&mut self, symbol: Symbol) {
        self.result = Some(symbol);
    }
}

/// Resumable lexer over a byte buffer.
///
/// Carries no state between calls: every token request rebuilds its
/// cursor from the (offset, mode) pair the caller supplies.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    source: &'a [u8],
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source`.
    pub fn new(source: &'a [u8]) -> Self {
        Self { source }
    }

    /// Lex one token at `offset` in `mode`.
    pub fn token_at(&self, offset: usize, mode: LexMode) -> Token {
        let mut cursor = Cursor::new(self.source, offset);
        lex(&mut cursor, mode);
        cursor.into_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(source: &str, offset: usize, mode: LexMode) -> Token {
        Lexer::new(source.as_bytes()).token_at(offset, mode)
    }

    #[test]
    fn test_empty_input_is_end() {
        let tok = token("", 0, LexMode::Text);
        assert_eq!(tok.symbol, Symbol::End);
        assert!(tok.span.is_empty());
    }

    #[test]
    fn test_plain_text_runs_to_eof() {
        let tok = token("hello", 0, LexMode::Text);
        assert_eq!(tok.symbol, Symbol::HtmlPart);
        assert_eq!(tok.span, Span::new(0, 5));
        assert!(tok.padding.is_empty());
    }

    #[test]
    fn test_text_stops_at_opener() {
        let tok = token("ab<%= x %>", 0, LexMode::Text);
        assert_eq!(tok.symbol, Symbol::HtmlPart);
        assert_eq!(tok.span, Span::new(0, 2));
    }

    #[test]
    fn test_directive_is_one_byte_with_opener_padding() {
        for dir in ["<% x %>", "<%= x %>", "<%+ x %>", "<%- x %>"] {
            let tok = token(dir, 0, LexMode::Text);
            assert_eq!(tok.symbol, Symbol::Directive, "input {:?}", dir);
            assert_eq!(tok.padding, Span::new(0, 2));
            assert_eq!(tok.span, Span::new(2, 3));
            assert_eq!(tok.padded_span(), Span::new(0, 3));
        }
    }

    #[test]
    fn test_unclassified_opener_stays_text() {
        // `x` is not a directive byte, so the `<` is literal.
        let tok = token("<%x", 0, LexMode::Text);
        assert_eq!(tok.symbol, Symbol::HtmlPart);
        assert_eq!(tok.span, Span::new(0, 3));
    }

    #[test]
    fn test_opener_then_closer_is_text() {
        let tok = token("<%%>", 0, LexMode::Text);
        assert_eq!(tok.symbol, Symbol::HtmlPart);
        assert_eq!(tok.span, Span::new(0, 4));
    }

    #[test]
    fn test_truncated_opener_is_text() {
        let tok = token("<%", 0, LexMode::Text);
        assert_eq!(tok.symbol, Symbol::HtmlPart);
        assert_eq!(tok.span, Span::new(0, 2));
    }

    #[test]
    fn test_comment_spans_opener_to_closer() {
        let tok = token("<%# note %>", 0, LexMode::Text);
        assert_eq!(tok.symbol, Symbol::Comment);
        assert_eq!(tok.span, Span::new(0, 11));
    }

    #[test]
    fn test_comment_minimal() {
        let tok = token("<%# %>", 0, LexMode::Text);
        assert_eq!(tok.symbol, Symbol::Comment);
        assert_eq!(tok.span.len(), 6);
    }

    #[test]
    fn test_comment_stops_at_first_closer() {
        let tok = token("<%# a %> b %>", 0, LexMode::Text);
        assert_eq!(tok.symbol, Symbol::Comment);
        assert_eq!(tok.span, Span::new(0, 8));
    }

    #[test]
    fn test_comment_spans_newlines() {
        let tok = token("<%# line\nline %>", 0, LexMode::Text);
        assert_eq!(tok.symbol, Symbol::Comment);
        assert_eq!(tok.span.len(), 16);
    }

    #[test]
    fn test_unterminated_comment_runs_to_eof() {
        let tok = token("<%# dangling", 0, LexMode::Text);
        assert_eq!(tok.symbol, Symbol::Comment);
        assert_eq!(tok.span, Span::new(0, 12));
    }

    #[test]
    fn test_code_runs_to_closer() {
        // Offset 3 is just past the directive of `<%= x %>`.
        let tok = token("<%= x %>", 3, LexMode::Code);
        assert_eq!(tok.symbol, Symbol::RustCode);
        assert_eq!(tok.span, Span::new(3, 6));
    }

    #[test]
    fn test_code_absorbs_lone_percent() {
        let tok = token("a % b %>", 0, LexMode::Code);
        assert_eq!(tok.symbol, Symbol::RustCode);
        assert_eq!(tok.span, Span::new(0, 6));
    }

    #[test]
    fn test_close_token() {
        let tok = token("%>", 0, LexMode::Code);
        assert_eq!(tok.symbol, Symbol::Close);
        assert_eq!(tok.span, Span::new(0, 2));
    }

    #[test]
    fn test_code_mode_eof_is_end() {
        let tok = token("abc", 3, LexMode::Code);
        assert_eq!(tok.symbol, Symbol::End);
        assert!(tok.span.is_empty());
    }

    #[test]
    fn test_code_run_to_eof() {
        let tok = token("incomplete", 0, LexMode::Code);
        assert_eq!(tok.symbol, Symbol::RustCode);
        assert_eq!(tok.span, Span::new(0, 10));
    }

    #[test]
    fn test_resumable_from_any_boundary() {
        let source = "a<%= b %>c";
        let lexer = Lexer::new(source.as_bytes());

        // Walk the token stream once, recording (offset, mode) pairs.
        let t0 = lexer.token_at(0, LexMode::Text);
        let t1 = lexer.token_at(t0.resume_at(), LexMode::Text);
        let t2 = lexer.token_at(t1.resume_at(), LexMode::Code);
        let t3 = lexer.token_at(t2.resume_at(), LexMode::Code);
        let t4 = lexer.token_at(t3.resume_at(), LexMode::Text);

        assert_eq!(t0.symbol, Symbol::HtmlPart);
        assert_eq!(t1.symbol, Symbol::Directive);
        assert_eq!(t2.symbol, Symbol::RustCode);
        assert_eq!(t3.symbol, Symbol::Close);
        assert_eq!(t4.symbol, Symbol::HtmlPart);

        // Re-lexing any recorded pair reproduces the same token.
        assert_eq!(lexer.token_at(t1.padded_span().start, LexMode::Text), t1);
        assert_eq!(lexer.token_at(t2.padding.start, LexMode::Code), t2);
    }

    #[test]
    fn test_tokens_tile_the_input() {
        let source = "x<% a %><%# c %>y";
        let lexer = Lexer::new(source.as_bytes());
        let mut offset = 0;
        let mut mode = LexMode::Text;
        loop {
            let tok = lexer.token_at(offset, mode);
            assert_eq!(tok.padded_span().start, offset);
            if tok.symbol == Symbol::End {
                assert_eq!(offset, source.len());
                break;
            }
            offset = tok.resume_at();
            mode = match tok.symbol {
                Symbol::Directive | Symbol::RustCode => LexMode::Code,
                _ => LexMode::Text,
            };
        }
    }
}
