use crate::cst::{Position, Span, Token, TokenKind};

/// Splits a pattern into [`Token`]s.
///
/// One token can be handed back with [`Lexer::pushback`], which is all the
/// lookahead the grammar ever needs. Once the input is exhausted, or a NUL
/// character is found, [`Lexer::next`] keeps returning [`TokenKind::Eof`].
pub struct Lexer<'a> {
    input: &'a str,
    pos: Position,
    pushback: Option<Token>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: Position::new(0),
            pushback: None,
            done: false,
        }
    }

    /// Returns `token` to the lexer, the next call to [`Lexer::next`] will
    /// return it again.
    pub fn pushback(&mut self, token: Token) {
        debug_assert!(self.pushback.is_none(), "only one token of pushback");
        self.pushback = Some(token);
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Token {
        if let Some(token) = self.pushback.take() {
            return token;
        }

        let start = self.pos;
        let c = match self.bump() {
            Some(c) => c,
            None => return self.eof(),
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '?' => TokenKind::Question,
            '^' => TokenKind::Caret,
            '|' => TokenKind::Pipe,
            '.' => TokenKind::Dot,
            '\\' => return self.escape(start),
            '\0' => return self.stop(start),
            _ => TokenKind::Char,
        };

        Token::new(kind, c, Span::new(start, self.pos))
    }

    /// Lexes the character that follows a backslash.
    fn escape(&mut self, start: Position) -> Token {
        let (kind, c) = match self.bump() {
            Some(
                c @ ('(' | ')' | '[' | ']' | '+' | '-' | '*' | '?' | '^' | '.'
                | '|'),
            ) => (TokenKind::Char, c),
            Some('n') => (TokenKind::Char, '\n'),
            Some('\0') => {
                self.stop(Position::new(start.offset + 1));
                (TokenKind::Char, '\\')
            }
            Some(c) => (TokenKind::Special, c),
            // A backslash at the very end stands for itself.
            None => (TokenKind::Char, '\\'),
        };
        Token::new(kind, c, Span::new(start, self.pos))
    }

    fn eof(&self) -> Token {
        Token::new(TokenKind::Eof, '\0', Span::point(self.pos))
    }

    /// Ends the input at `pos`, where a NUL was found.
    fn stop(&mut self, pos: Position) -> Token {
        self.pos = pos;
        self.done = true;
        self.eof()
    }

    fn bump(&mut self) -> Option<char> {
        if self.done {
            return None;
        }
        let c = self.input[self.pos.offset..].chars().next()?;
        self.pos = Position::new(self.pos.offset + c.len_utf8());
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::Lexer;
    use crate::cst::{Position, Span, TokenKind};
    use pretty_assertions::assert_eq;

    fn kinds(s: &str) -> Vec<(TokenKind, char)> {
        let mut lexer = Lexer::new(s);
        let mut tokens = vec![];
        loop {
            let token = lexer.next();
            tokens.push((token.kind, token.char));
            if token.kind == TokenKind::Eof {
                return tokens;
            }
        }
    }

    #[test]
    fn punctuation() {
        use TokenKind::*;
        assert_eq!(
            kinds("()[]+-*?^|.a"),
            vec![
                (LParen, '('),
                (RParen, ')'),
                (LBracket, '['),
                (RBracket, ']'),
                (Plus, '+'),
                (Minus, '-'),
                (Star, '*'),
                (Question, '?'),
                (Caret, '^'),
                (Pipe, '|'),
                (Dot, '.'),
                (Char, 'a'),
                (Eof, '\0'),
            ]
        );
    }

    #[test]
    fn escapes() {
        use TokenKind::*;
        assert_eq!(
            kinds(r"\(\*\.\|\n\d\\"),
            vec![
                (Char, '('),
                (Char, '*'),
                (Char, '.'),
                (Char, '|'),
                (Char, '\n'),
                (Special, 'd'),
                (Special, '\\'),
                (Eof, '\0'),
            ]
        );
        assert_eq!(kinds("a\\"), vec![(Char, 'a'), (Char, '\\'), (Eof, '\0')]);
    }

    #[test]
    fn eof_forever() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next().kind, TokenKind::Char);
        for _ in 0..3 {
            assert_eq!(lexer.next().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn nul_ends_input() {
        assert_eq!(
            kinds("a\0b"),
            vec![(TokenKind::Char, 'a'), (TokenKind::Eof, '\0')]
        );
        let mut lexer = Lexer::new("a\0b");
        lexer.next();
        lexer.next();
        assert_eq!(lexer.next().kind, TokenKind::Eof);
        assert_eq!(
            kinds("a\\\0b"),
            vec![
                (TokenKind::Char, 'a'),
                (TokenKind::Char, '\\'),
                (TokenKind::Eof, '\0')
            ]
        );
    }

    #[test]
    fn nul_eof_span() {
        let mut lexer = Lexer::new("a\0b");
        lexer.next();
        for _ in 0..3 {
            assert_eq!(lexer.next().span, Span::point(Position::new(1)));
        }

        let mut lexer = Lexer::new("\\\0b");
        assert_eq!(
            lexer.next().span,
            Span::new(Position::new(0), Position::new(1))
        );
        assert_eq!(lexer.next().span, Span::point(Position::new(1)));
    }

    #[test]
    fn pushback() {
        let mut lexer = Lexer::new("a-b");
        lexer.next();
        let minus = lexer.next();
        assert_eq!(minus.kind, TokenKind::Minus);
        lexer.pushback(minus);
        assert_eq!(lexer.next(), minus);
        assert_eq!(lexer.next().char, 'b');
    }

    #[test]
    fn spans() {
        let mut lexer = Lexer::new("☃\\(");
        assert_eq!(
            lexer.next().span,
            Span::new(Position::new(0), Position::new(3))
        );
        assert_eq!(
            lexer.next().span,
            Span::new(Position::new(3), Position::new(5))
        );
        assert_eq!(lexer.next().span, Span::point(Position::new(5)));
    }
}
