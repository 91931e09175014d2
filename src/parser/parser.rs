use crate::lexer::{CharSource, TokenKind, TokenStream};

use super::{BasicBlock, ParseError, Program, Statement};

pub struct Parser<'a, S> {
    tokens: &'a mut TokenStream<S>,
}

impl<'a, S: CharSource> Parser<'a, S> {
    pub fn new(tokens: &'a mut TokenStream<S>) -> Parser<'a, S> {
        Parser { tokens }
    }

    /// Parse until `EndOfFile`, any error throws away everything parsed so far
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut statements = vec![];

        loop {
            match self.tokens.lookahead().kind {
                TokenKind::EndOfFile => break,
                TokenKind::LeftBracket => statements.push(self.parse_loop()?),
                _ => statements.push(self.parse_single()?),
            }
        }

        let program = BasicBlock::new(statements);
        tracing::debug!(
            statements = program.statements.len(),
            depth = program.depth(),
            "parsed program"
        );
        Ok(program)
    }

    /// One non-loop statement, folding runs of `<`, `>`, `+` and `-`
    pub fn parse_single(&mut self) -> Result<Statement, ParseError> {
        let token = self.tokens.next();

        let counted: fn(usize) -> Statement = match token.kind {
            TokenKind::Dot => return Ok(Statement::Print),
            TokenKind::Comma => return Ok(Statement::Input),
            TokenKind::LeftAngleBracket => |by| Statement::ShiftLeft { by },
            TokenKind::RightAngleBracket => |by| Statement::ShiftRight { by },
            TokenKind::Plus => |by| Statement::Increment { by },
            TokenKind::Minus => |by| Statement::Decrement { by },
            kind => {
                return Err(ParseError::UnexpectedToken {
                    kind,
                    value: token.value,
                    span: token.span,
                })
            }
        };

        let mut by = 1;
        while self.tokens.lookahead().kind == token.kind {
            self.tokens.next();
            by += 1;
        }

        Ok(counted(by))
    }

    /// `[` body `]`, the body may be empty
    pub fn parse_loop(&mut self) -> Result<Statement, ParseError> {
        let open = self.tokens.next();
        debug_assert_eq!(open.kind, TokenKind::LeftBracket);
        tracing::trace!(span = %open.span, "entering loop");

        let mut statements = vec![];
        loop {
            let lookahead = self.tokens.lookahead();
            match lookahead.kind {
                TokenKind::RightBracket => break,
                TokenKind::EndOfFile => {
                    return Err(ParseError::UnterminatedLoop {
                        opened_at: open.span,
                        span: lookahead.span,
                    })
                }
                TokenKind::LeftBracket => statements.push(self.parse_loop()?),
                _ => statements.push(self.parse_single()?),
            }
        }

        let close = self.tokens.next();
        tracing::trace!(span = %close.span, statements = statements.len(), "leaving loop");
        Ok(Statement::Loop(BasicBlock::new(statements)))
    }
}

/// Parse a whole token stream
pub fn parse<S: CharSource>(tokens: &mut TokenStream<S>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, TextSource, TextSpan};

    fn parse_str(text: &str) -> Result<Program, ParseError> {
        let mut tokens = Lexer::new(TextSource::new(text)).lex();
        parse(&mut tokens)
    }

    fn statements(text: &str) -> Vec<Statement> {
        parse_str(text).unwrap().statements
    }

    #[test]
    fn runs_fold_into_one_statement() {
        for n in 1..=12 {
            assert_eq!(statements(&"+".repeat(n)), vec![Statement::Increment { by: n }]);
            assert_eq!(statements(&"-".repeat(n)), vec![Statement::Decrement { by: n }]);
            assert_eq!(statements(&"<".repeat(n)), vec![Statement::ShiftLeft { by: n }]);
            assert_eq!(statements(&">".repeat(n)), vec![Statement::ShiftRight { by: n }]);
        }
    }

    #[test]
    fn comments_inside_a_run_do_not_break_it() {
        assert_eq!(statements("++ +\n+"), vec![Statement::Increment { by: 4 }]);
    }

    #[test]
    fn different_operators_start_a_new_run() {
        assert_eq!(
            statements("++-+>><"),
            vec![
                Statement::Increment { by: 2 },
                Statement::Decrement { by: 1 },
                Statement::Increment { by: 1 },
                Statement::ShiftRight { by: 2 },
                Statement::ShiftLeft { by: 1 },
            ]
        );
    }

    #[test]
    fn print_and_input_are_never_folded() {
        assert_eq!(
            statements("..,,"),
            vec![Statement::Print, Statement::Print, Statement::Input, Statement::Input]
        );
    }

    #[test]
    fn empty_loop_parses() {
        assert_eq!(statements("[]"), vec![Statement::Loop(BasicBlock::default())]);
    }

    #[test]
    fn loops_nest() {
        for depth in 1..=16 {
            let source = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
            let program = parse_str(&source).unwrap();
            assert_eq!(program.depth(), depth);
            assert_eq!(program.statements.len(), 1);
        }
    }

    #[test]
    fn loop_body_is_kept_in_order() {
        assert_eq!(
            statements("[->+<]"),
            vec![Statement::Loop(BasicBlock::new(vec![
                Statement::Decrement { by: 1 },
                Statement::ShiftRight { by: 1 },
                Statement::Increment { by: 1 },
                Statement::ShiftLeft { by: 1 },
            ]))]
        );
    }

    #[test]
    fn stray_close_bracket_fails() {
        assert_eq!(
            parse_str("]"),
            Err(ParseError::UnexpectedToken {
                kind: TokenKind::RightBracket,
                value: ']',
                span: TextSpan::new(0, 1),
            })
        );
        assert!(matches!(
            parse_str("+[-]]+"),
            Err(ParseError::UnexpectedToken { kind: TokenKind::RightBracket, .. })
        ));
    }

    #[test]
    fn unterminated_loop_fails() {
        assert_eq!(
            parse_str("[+"),
            Err(ParseError::UnterminatedLoop {
                opened_at: TextSpan::new(0, 1),
                span: TextSpan::empty(2),
            })
        );
        assert!(matches!(
            parse_str("[[-]"),
            Err(ParseError::UnterminatedLoop { .. })
        ));
    }

    #[test]
    fn only_comments_is_an_empty_program() {
        assert!(parse_str("nothing to see here").unwrap().is_empty());
    }
}
