//! Lexer for the Skiff language
//!
//! Tokenizes source text with logos and attaches 1-based line/column
//! positions for diagnostics.

pub mod tokens;

pub use tokens::{Token, TokenKind};

use logos::Logos;
use miette::{miette, Result};

use crate::ast::Lit;

/// Tokenize source text into a token stream terminated by an Eof token
pub fn lex(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        let (line, col) = position(source, lexer.span().start);

        let kind = result.map_err(|()| {
            miette!("[line {}:{}] unexpected character `{}`", line, col, slice)
        })?;

        let literal = match kind {
            TokenKind::Number => {
                let n: f64 = slice
                    .parse()
                    .map_err(|_| miette!("[line {}:{}] invalid number `{}`", line, col, slice))?;
                Some(Lit::Num(n))
            }
            TokenKind::StringLit => Some(Lit::Str(unescape(&slice[1..slice.len() - 1]))),
            TokenKind::CharLit => {
                let text = unescape(&slice[1..slice.len() - 1]);
                let c = text
                    .chars()
                    .next()
                    .ok_or_else(|| miette!("[line {}:{}] empty character literal", line, col))?;
                Some(Lit::Char(c))
            }
            _ => None,
        };

        tokens.push(Token {
            kind,
            lexeme: slice.to_string(),
            literal,
            line,
            col,
            ty: None,
        });
    }

    let (line, col) = position(source, source.len());
    tokens.push(Token::new(TokenKind::Eof, "", line, col));
    Ok(tokens)
}

/// 1-based line/column of a byte offset
fn position(source: &str, offset: usize) -> (u32, u32) {
    let prefix = &source[..offset];
    let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = prefix.matches('\n').count() as u32 + 1;
    let col = (offset - line_start) as u32 + 1;
    (line, col)
}

/// Process backslash escapes in string and character literals
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lexes_declaration() {
        let tokens = lex("var x: float = 1;").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Var,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::Number,
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[5].literal, Some(Lit::Num(1.0)));
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = lex("var x: float = 1;\nprint x;").unwrap();
        let print_tok = tokens.iter().find(|t| t.kind == TokenKind::Print).unwrap();
        assert_eq!((print_tok.line, print_tok.col), (2, 1));
        let x_ref = tokens.iter().rposition(|t| t.lexeme == "x").unwrap();
        assert_eq!((tokens[x_ref].line, tokens[x_ref].col), (2, 7));
    }

    #[test]
    fn lexes_string_with_escapes() {
        let tokens = lex(r#"print "a\nb";"#).unwrap();
        assert_eq!(tokens[1].literal, Some(Lit::Str("a\nb".to_string())));
    }

    #[test]
    fn lexes_compound_operators() {
        let tokens = lex("a <= b == c != d >= e").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::Le));
        assert!(kinds.contains(&TokenKind::EqEq));
        assert!(kinds.contains(&TokenKind::Ne));
        assert!(kinds.contains(&TokenKind::Ge));
    }

    #[test]
    fn skips_comments() {
        let tokens = lex("// nothing here\nprint 1;").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Print);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn rejects_unknown_character() {
        assert!(lex("var x = @;").is_err());
    }
}
