/*! Concrete syntax tree (CST) for regular expressions.

The tree mirrors the grammar accepted by [`parser::Parser`] production by
production, nothing is simplified away:

```text
REGEX  := SUB ( '|' REGEX )?
SUB    := EXPR*
EXPR   := TERM ( ('+' | '*' | '?') '?'? )?
TERM   := (Literal | '.' | Special)
        | '(' REGEX ')'
        | '[' '^'? CLASS ']'
CLASS  := ( Literal ('-' Literal)? CLASS )
        | ( '-' CLASS )
        | ε
```

`SUB` and `CLASS` are right-leaning chains: each link holds one element and,
unless it is the last one, the rest of the chain. The `'|' REGEX` tail of a
`REGEX` forms a chain of the same kind. Chains are walked and dropped with
loops, so their length is bounded only by the pattern.
*/

use std::fmt;

use thiserror::Error;

pub mod ascii_tree;
pub mod lexer;
pub mod parser;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Position {
    pub offset: usize,
}

impl Position {
    pub fn new(offset: usize) -> Position {
        Position { offset }
    }
}

/// Byte range of a token within the pattern.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Span {
    start: Position,
    end: Position,
}

impl Span {
    pub fn point(pos: Position) -> Span {
        Span {
            start: pos,
            end: pos,
        }
    }

    pub fn new(start: Position, end: Position) -> Span {
        Span { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({}, {})", self.start.offset, self.end.offset)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// A literal character, either verbatim or escaped.
    Char,
    /// An escaped character with no meaning of its own, like `\d`.
    Special,
    Eof,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Plus,
    Minus,
    Star,
    Question,
    Caret,
    Pipe,
    Dot,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Char => "literal",
            TokenKind::Special => "escape",
            TokenKind::Eof => "end of input",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Question => "'?'",
            TokenKind::Caret => "'^'",
            TokenKind::Pipe => "'|'",
            TokenKind::Dot => "'.'",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The character carried by the token. For punctuation this is the
    /// punctuation character itself, for [`TokenKind::Eof`] it is `'\0'`.
    pub char: char,
    pub span: Span,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, char: char, span: Span) -> Token {
        Token { kind, char, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Char | TokenKind::Special => {
                write!(f, "{} {:?}", self.kind, self.char)
            }
            kind => fmt::Display::fmt(&kind, f),
        }
    }
}

/// `REGEX := SUB ( '|' REGEX )?`
#[derive(Debug, PartialEq, Eq)]
pub struct Regex {
    pub sub: Sub,
    pub alternative: Option<Alternative>,
}

impl Regex {
    pub(crate) fn chain(mut subs: Vec<Sub>, pipes: Vec<Token>) -> Regex {
        debug_assert_eq!(subs.len(), pipes.len() + 1);
        let last = Regex {
            sub: subs.pop().unwrap_or(Sub::Empty),
            alternative: None,
        };
        subs.into_iter().zip(pipes).rev().fold(last, |tail, (sub, pipe)| {
            Regex {
                sub,
                alternative: Some(Alternative {
                    pipe,
                    regex: Box::new(tail),
                }),
            }
        })
    }

    /// Iterates the alternatives from left to right.
    pub fn alternatives(&self) -> impl Iterator<Item = &Regex> + '_ {
        std::iter::successors(Some(self), |regex| {
            regex.alternative.as_ref().map(|alt| &*alt.regex)
        })
    }

    /// Renders the tree as an ASCII tree. Chains are shown as a single node
    /// holding all their elements.
    pub fn ascii_tree(&self) -> String {
        let mut s = String::new();
        // Writing into a `String` never fails.
        let tree = ascii_tree::regex_ascii_tree(self);
        let _ = ::ascii_tree::write_tree(&mut s, &tree);
        s
    }
}

impl Drop for Regex {
    fn drop(&mut self) {
        let mut next = self.alternative.take();
        while let Some(mut alternative) = next {
            next = alternative.regex.alternative.take();
        }
    }
}

/// The `'|' REGEX` tail of a [`Regex`].
#[derive(Debug, PartialEq, Eq)]
pub struct Alternative {
    pub pipe: Token,
    pub regex: Box<Regex>,
}

/// `SUB := EXPR*`
///
/// `Sub::Empty` only appears when the production matched nothing at all, the
/// last link of a non-empty chain has no tail.
#[derive(Debug, PartialEq, Eq)]
pub enum Sub {
    Empty,
    Expr(Box<Expr>, Option<Box<Sub>>),
}

impl Sub {
    pub(crate) fn chain(exprs: Vec<Expr>) -> Sub {
        exprs
            .into_iter()
            .rev()
            .fold(None, |tail, expr| {
                Some(Sub::Expr(Box::new(expr), tail.map(Box::new)))
            })
            .unwrap_or(Sub::Empty)
    }

    fn take_tail(&mut self) -> Option<Box<Sub>> {
        match self {
            Sub::Empty => None,
            Sub::Expr(_, tail) => tail.take(),
        }
    }

    fn link(&self) -> Option<(&Expr, Option<&Sub>)> {
        match self {
            Sub::Empty => None,
            Sub::Expr(expr, tail) => Some((expr, tail.as_deref())),
        }
    }

    /// Iterates the expressions in the chain from left to right.
    pub fn exprs(&self) -> impl Iterator<Item = &Expr> + '_ {
        std::iter::successors(self.link(), |(_, tail)| {
            tail.and_then(Sub::link)
        })
        .map(|(expr, _)| expr)
    }
}

impl Drop for Sub {
    fn drop(&mut self) {
        let mut tail = self.take_tail();
        while let Some(mut sub) = tail {
            tail = sub.take_tail();
        }
    }
}

/// `EXPR := TERM ( ('+' | '*' | '?') '?'? )?`
#[derive(Debug, PartialEq, Eq)]
pub struct Expr {
    pub term: Term,
    pub quantifier: Option<Quantifier>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Quantifier {
    pub kind: RepetitionKind,
    pub op: Token,
    /// The second `?` that turns the quantifier into a non-greedy one.
    pub lazy: Option<Token>,
}

impl Quantifier {
    pub fn is_greedy(&self) -> bool {
        self.lazy.is_none()
    }
}

#[derive(PartialEq, Debug, Eq, Copy, Clone)]
pub enum RepetitionKind {
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Term {
    /// A literal, `.` or an escape.
    Atom(Token),
    Group {
        open: Token,
        regex: Box<Regex>,
        close: Token,
    },
    Class {
        open: Token,
        negated: Option<Token>,
        class: Class,
        close: Token,
    },
}

/// `CLASS := ( Literal ('-' Literal)? CLASS ) | ( '-' CLASS ) | ε`
#[derive(Debug, PartialEq, Eq)]
pub enum Class {
    Empty,
    Item(ClassItem, Option<Box<Class>>),
}

impl Class {
    pub(crate) fn chain(items: Vec<ClassItem>) -> Class {
        items
            .into_iter()
            .rev()
            .fold(None, |tail, item| {
                Some(Class::Item(item, tail.map(Box::new)))
            })
            .unwrap_or(Class::Empty)
    }

    fn take_tail(&mut self) -> Option<Box<Class>> {
        match self {
            Class::Empty => None,
            Class::Item(_, tail) => tail.take(),
        }
    }

    fn link(&self) -> Option<(&ClassItem, Option<&Class>)> {
        match self {
            Class::Empty => None,
            Class::Item(item, tail) => Some((item, tail.as_deref())),
        }
    }

    /// Iterates the members of the class from left to right.
    pub fn items(&self) -> impl Iterator<Item = &ClassItem> + '_ {
        std::iter::successors(self.link(), |(_, tail)| {
            tail.and_then(Class::link)
        })
        .map(|(item, _)| item)
    }
}

impl Drop for Class {
    fn drop(&mut self) {
        let mut tail = self.take_tail();
        while let Some(mut class) = tail {
            tail = class.take_tail();
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ClassItem {
    /// A single character, which may be a bare `-`.
    Single(Token),
    /// An inclusive range `lo-hi`.
    Range(Token, Token),
}

impl ClassItem {
    pub fn bounds(&self) -> (char, char) {
        match self {
            ClassItem::Single(c) => (c.char, c.char),
            ClassItem::Range(lo, hi) => (lo.char, hi.char),
        }
    }
}

/// What the parser was looking for when it failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Expected {
    Token(TokenKind),
    /// Anything that can start a TERM: a literal, `.`, an escape, `(` or `[`.
    Term,
    /// A group opened no deeper than this many levels.
    Nesting(usize),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => fmt::Display::fmt(kind, f),
            Expected::Term => f.write_str("a term"),
            Expected::Nesting(limit) => {
                write!(f, "at most {} nested groups", limit)
            }
        }
    }
}

#[derive(Error, Clone, Debug, Eq, PartialEq)]
#[error("expected {expected}, got {found}")]
pub struct SyntaxError {
    expected: Expected,
    found: TokenKind,
    span: Span,
}

impl SyntaxError {
    pub(crate) fn new(expected: Expected, found: &Token) -> SyntaxError {
        SyntaxError {
            expected,
            found: found.kind,
            span: found.span,
        }
    }

    pub fn expected(&self) -> Expected {
        self.expected
    }

    pub fn found(&self) -> TokenKind {
        self.found
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}
