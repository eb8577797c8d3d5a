use std::{mem, result};

use crate::cst::{
    self, lexer::Lexer, Class, ClassItem, Expected, Expr, Quantifier,
    RepetitionKind, Sub, SyntaxError, Term, Token, TokenKind,
};

type Result<T> = result::Result<T, SyntaxError>;

/// Groups can't be nested deeper than this, each level costs a few stack
/// frames in the parser and in the compiler.
pub const MAX_NESTING: usize = 128;

/// Recursive-descent parser, one method per grammar symbol.
///
/// The first error aborts the parse, there is no recovery.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    token: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(pattern: &'a str) -> Self {
        let mut lexer = Lexer::new(pattern);
        let token = lexer.next();
        Parser {
            lexer,
            token,
            depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<cst::Regex> {
        let regex = self.regex()?;
        self.expect(TokenKind::Eof)?;
        Ok(regex)
    }

    /// Consumes the current token, returning it.
    fn bump(&mut self) -> Token {
        let next = self.lexer.next();
        mem::replace(&mut self.token, next)
    }

    fn accept(&mut self, kind: TokenKind) -> Option<Token> {
        if self.token.kind == kind {
            Some(self.bump())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        self.accept(kind)
            .ok_or_else(|| SyntaxError::new(Expected::Token(kind), &self.token))
    }

    /// Makes `token` the current token again, the one it replaces goes back
    /// to the lexer.
    fn unget(&mut self, token: Token) {
        let current = mem::replace(&mut self.token, token);
        self.lexer.pushback(current);
    }

    fn regex(&mut self) -> Result<cst::Regex> {
        let mut subs = vec![self.sub()?];
        let mut pipes = vec![];
        while let Some(pipe) = self.accept(TokenKind::Pipe) {
            pipes.push(pipe);
            subs.push(self.sub()?);
        }
        Ok(cst::Regex::chain(subs, pipes))
    }

    fn sub(&mut self) -> Result<Sub> {
        let mut exprs = vec![];
        while !matches!(
            self.token.kind,
            TokenKind::Eof | TokenKind::RParen | TokenKind::Pipe
        ) {
            exprs.push(self.expr()?);
        }
        Ok(Sub::chain(exprs))
    }

    fn expr(&mut self) -> Result<Expr> {
        let term = self.term()?;
        let kind = match self.token.kind {
            TokenKind::Question => Some(RepetitionKind::ZeroOrOne),
            TokenKind::Star => Some(RepetitionKind::ZeroOrMore),
            TokenKind::Plus => Some(RepetitionKind::OneOrMore),
            _ => None,
        };
        let quantifier = kind.map(|kind| {
            let op = self.bump();
            let lazy = self.accept(TokenKind::Question);
            Quantifier { kind, op, lazy }
        });
        Ok(Expr { term, quantifier })
    }

    fn term(&mut self) -> Result<Term> {
        match self.token.kind {
            TokenKind::Char | TokenKind::Dot | TokenKind::Special => {
                Ok(Term::Atom(self.bump()))
            }
            TokenKind::LParen => {
                if self.depth == MAX_NESTING {
                    return Err(SyntaxError::new(
                        Expected::Nesting(MAX_NESTING),
                        &self.token,
                    ));
                }
                let open = self.bump();
                self.depth += 1;
                let regex = Box::new(self.regex()?);
                self.depth -= 1;
                let close = self.expect(TokenKind::RParen)?;
                Ok(Term::Group { open, regex, close })
            }
            TokenKind::LBracket => {
                let open = self.bump();
                let negated = self.accept(TokenKind::Caret);
                let class = self.class();
                let close = self.expect(TokenKind::RBracket)?;
                Ok(Term::Class {
                    open,
                    negated,
                    class,
                    close,
                })
            }
            _ => Err(SyntaxError::new(Expected::Term, &self.token)),
        }
    }

    fn class(&mut self) -> Class {
        let mut items = vec![];
        loop {
            if let Some(lo) = self.accept(TokenKind::Char) {
                match self.accept(TokenKind::Minus) {
                    Some(minus) => match self.accept(TokenKind::Char) {
                        Some(hi) => items.push(ClassItem::Range(lo, hi)),
                        None => {
                            // Not a range after all, the `-` is read again
                            // as a member of its own.
                            self.unget(minus);
                            items.push(ClassItem::Single(lo));
                        }
                    },
                    None => items.push(ClassItem::Single(lo)),
                }
            } else if let Some(minus) = self.accept(TokenKind::Minus) {
                items.push(ClassItem::Single(minus));
            } else {
                return Class::chain(items);
            }
        }
    }
}
