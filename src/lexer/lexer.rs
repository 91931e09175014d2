use super::{CharSource, TextSpan, Token, TokenKind};

#[derive(Debug, Clone)]
pub struct Lexer<S> {
    source: S,
}

impl<S: CharSource> Lexer<S> {
    pub fn new(source: S) -> Lexer<S> {
        Lexer { source }
    }

    /// Scan up to the next meaningful token, comments are skipped.
    /// Once the source is exhausted this keeps returning `EndOfFile`.
    pub fn next_token(&mut self) -> Token {
        loop {
            let Some(c) = self.source.supply() else {
                return Token::end_of_file(self.source.position());
            };

            let kind = TokenKind::classify(c);
            if kind == TokenKind::Comment {
                continue;
            }

            let pos = self.source.position();
            let token = Token::new(TextSpan::new(pos - 1, pos), kind, c);
            tracing::trace!(kind = %token.kind, span = %token.span, "scanned token");
            return token;
        }
    }

    /// Every token up to (not including) `EndOfFile`
    pub fn collect_tokens(&mut self) -> Vec<Token> {
        let mut v = vec![];
        loop {
            match self.next_token() {
                token if token.is_eof() => break v,
                token => v.push(token),
            }
        }
    }

    pub fn lex(self) -> TokenStream<S> {
        TokenStream::new(self)
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

/// Pull based token stream with a single token of lookahead
#[derive(Debug, Clone)]
pub struct TokenStream<S> {
    lexer: Lexer<S>,
    stash: Option<Token>,
}

impl<S: CharSource> TokenStream<S> {
    pub fn new(lexer: Lexer<S>) -> Self {
        Self { lexer, stash: None }
    }

    /// Peek at the next token without consuming it
    pub fn lookahead(&mut self) -> Token {
        match self.stash {
            Some(token) => token,
            None => {
                let token = self.lexer.next_token();
                self.stash = Some(token);
                token
            }
        }
    }

    pub fn next(&mut self) -> Token {
        match self.stash.take() {
            Some(token) => token,
            None => self.lexer.next_token(),
        }
    }

    pub fn into_lexer(self) -> Lexer<S> {
        self.lexer
    }
}
