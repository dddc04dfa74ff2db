//! Loader for the toolkit's minimalist BNF (spec §4.8, §6).
//!
//! Grammar:
//! ```text
//! bnf  := prod end | prod bnf
//! prod := nterm ':=' rhs
//! syms := sym | sym syms
//! rhs  := syms | syms '|' rhs
//! ```
//! A symbol token is any run of non-whitespace characters; the 4-character
//! sequence `'\''` is a special escape for a literal quote symbol. `|` and
//! `:=` are reserved single/double-character keyword tokens and must be
//! surrounded by whitespace to be recognized as such — `a|b` with no
//! spaces is one symbol, not three tokens.

use crate::grammar::Grammar;
use crate::error::{GrammarError, Result};
use crate::symbol::Symbol;
use indexmap::IndexMap;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Keyword,
    Sym,
    End,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    /// `None` only for the synthetic sentinel returned past the last real
    /// token, mirroring the source's `(Token.END, None)`.
    text: Option<String>,
    pos: usize,
}

fn tokenize(buf: &str) -> Result<Vec<Token>> {
    let bytes = buf.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && matches!(bytes[i], b' ' | b'\t') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        if bytes[i] == b'|' {
            tokens.push(Token {
                kind: TokenKind::Keyword,
                text: Some("|".to_string()),
                pos: i,
            });
            i += 1;
            continue;
        }
        if buf[i..].starts_with(":=") {
            tokens.push(Token {
                kind: TokenKind::Keyword,
                text: Some(":=".to_string()),
                pos: i,
            });
            i += 2;
            continue;
        }
        if matches!(bytes[i], b'\r' | b'\n') {
            let start = i;
            while i < bytes.len() && matches!(bytes[i], b'\r' | b'\n') {
                i += 1;
            }
            tokens.push(Token {
                kind: TokenKind::End,
                text: Some(buf[start..i].to_string()),
                pos: start,
            });
            continue;
        }

        let start = i;
        while i < bytes.len() && !matches!(bytes[i], b' ' | b'\t' | b'\r' | b'\n') {
            i += 1;
        }
        let raw = &buf[start..i];
        let text = if raw == "'\\''" { "'".to_string() } else { raw.to_string() };
        tokens.push(Token {
            kind: TokenKind::Sym,
            text: Some(text),
            pos: start,
        });
    }

    Ok(tokens)
}

struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    fn peek(&self) -> Token {
        self.tokens.get(self.pos).cloned().unwrap_or(Token {
            kind: TokenKind::End,
            text: None,
            pos: self.tokens.last().map_or(0, |t| t.pos),
        })
    }

    fn next(&mut self) -> Token {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn unget(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }
}

struct Builder {
    start: Option<Symbol>,
    heads: HashSet<String>,
    all_symbols: HashSet<String>,
    productions: IndexMap<Symbol, Vec<Vec<Symbol>>>,
}

/// Parses a complete BNF source document into a [`Grammar`].
pub fn parse(source: &str) -> Result<Grammar> {
    let tokens = tokenize(source)?;
    let mut stream = TokenStream { tokens, pos: 0 };
    let mut builder = Builder {
        start: None,
        heads: HashSet::new(),
        all_symbols: HashSet::new(),
        productions: IndexMap::new(),
    };

    loop {
        let token = stream.peek();
        match token.kind {
            TokenKind::End if token.text.is_none() => break,
            TokenKind::End => {
                stream.next();
            }
            _ => parse_production(&mut stream, &mut builder)?,
        }
    }

    let start = builder.start.ok_or(GrammarError::EmptyGrammar)?;
    let terminals: HashSet<Symbol> = builder
        .all_symbols
        .iter()
        .filter(|s| !builder.heads.contains(*s) && s.as_str() != "@")
        .map(|s| Symbol::new(s))
        .collect();

    // `builder.productions` is already in first-seen head order — IndexMap
    // preserves insertion order — so nonterminal declaration order carries
    // straight through into the grammar.
    let mut grammar = Grammar::new(start, terminals, IndexMap::new());
    for (head, bodies) in &builder.productions {
        for body in bodies {
            grammar.add_production(head.clone(), body.clone());
        }
    }
    Ok(grammar)
}

fn parse_production(stream: &mut TokenStream, builder: &mut Builder) -> Result<()> {
    let head_token = stream.next();
    if head_token.kind != TokenKind::Sym {
        return Err(GrammarError::NonterminalExpected(describe(&head_token)));
    }
    let head_text = head_token.text.expect("Sym tokens always carry text");
    if builder.start.is_none() {
        builder.start = Some(Symbol::new(&head_text));
    }
    builder.heads.insert(head_text.clone());

    let assign = stream.next();
    if assign.kind != TokenKind::Keyword || assign.text.as_deref() != Some(":=") {
        return Err(GrammarError::MissingAssign {
            found: describe(&assign),
        });
    }

    loop {
        let lookahead = stream.peek();
        if lookahead.kind == TokenKind::End {
            return Ok(());
        }
        let alternative = parse_rhs(stream)?;
        if alternative.is_empty() {
            return Err(GrammarError::EmptyRhs {
                nonterminal: head_text,
            });
        }
        for symbol in &alternative {
            builder.all_symbols.insert(symbol.clone());
        }
        let body: Vec<Symbol> = alternative.iter().map(|s| Symbol::new(s)).collect();
        builder
            .productions
            .entry(Symbol::new(&head_text))
            .or_default()
            .push(body);
    }
}

fn parse_rhs(stream: &mut TokenStream) -> Result<Vec<String>> {
    let mut result = Vec::new();
    loop {
        let token = stream.next();
        match token.kind {
            TokenKind::End => {
                stream.unget();
                return Ok(result);
            }
            TokenKind::Keyword if token.text.as_deref() == Some("|") => return Ok(result),
            TokenKind::Keyword => {
                return Err(GrammarError::UnknownToken {
                    pos: token.pos,
                    excerpt: token.text.unwrap_or_default(),
                });
            }
            TokenKind::Sym => result.push(token.text.expect("Sym tokens always carry text")),
        }
    }
}

fn describe(token: &Token) -> String {
    token.text.clone().unwrap_or_else(|| "<end of input>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_grammar() {
        let source = "S := A B\nA := a\nB := b\n";
        let grammar = parse(source).unwrap();
        assert_eq!(grammar.start(), &Symbol::new("S"));
        assert!(grammar.is_terminal(&Symbol::new("a")));
        assert!(grammar.is_nonterminal(&Symbol::new("A")));
        assert_eq!(grammar.productions_of(&Symbol::new("S"))[0].body.len(), 2);
    }

    #[test]
    fn parses_alternatives_and_epsilon() {
        let source = "S := a S | @\n";
        let grammar = parse(source).unwrap();
        let prods = grammar.productions_of(&Symbol::new("S"));
        assert_eq!(prods.len(), 2);
        assert!(prods[1].is_epsilon());
    }

    #[test]
    fn quote_escape_becomes_literal_quote_symbol() {
        let source = "S := '\\'' a\n";
        let grammar = parse(source).unwrap();
        let body = &grammar.productions_of(&Symbol::new("S"))[0].body;
        assert_eq!(body[0], Symbol::new("'"));
    }

    #[test]
    fn missing_assign_is_an_error() {
        let source = "S a\n";
        assert!(matches!(parse(source), Err(GrammarError::MissingAssign { .. })));
    }

    #[test]
    fn empty_rhs_is_an_error() {
        // The first alternative is non-empty, but the one after `|` is
        // empty — that's the path that actually reaches `parse_rhs` with
        // nothing before the next `|`/end-of-line.
        let source = "S := | a\n";
        assert!(matches!(parse(source), Err(GrammarError::EmptyRhs { .. })));
    }

    #[test]
    fn pipe_without_surrounding_space_is_part_of_symbol() {
        let source = "S := a|b\n";
        let grammar = parse(source).unwrap();
        let body = &grammar.productions_of(&Symbol::new("S"))[0].body;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0], Symbol::new("a|b"));
    }
}
