use std::fmt;

pub mod lexer;
pub mod source;

pub use lexer::{Lexer, TokenStream};
pub use source::{CharSource, FileSource, ReaderSource, TextSource};

/// Half open range `[begin, end)` of character offsets into the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSpan {
    pub begin: u64,
    pub end: u64,
}

impl TextSpan {
    pub fn new(begin: u64, end: u64) -> Self {
        debug_assert!(begin <= end, "span begins after it ends ({begin}..{end})");
        Self { begin, end }
    }

    /// Zero width span sitting at `pos`
    pub fn empty(pos: u64) -> Self {
        Self { begin: pos, end: pos }
    }

    pub fn len(&self) -> u64 {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // `.`: Write the byte at the current cell to the output
    Dot,
    // `,`: Read the next input byte into the current cell
    Comma,

    // `<`: Move the cell pointer one to the left
    LeftAngleBracket,
    // `>`: Move the cell pointer one to the right
    RightAngleBracket,

    // `[`: Start of a loop that runs while the current cell is non-zero
    LeftBracket,
    // `]`: End of the innermost open loop
    RightBracket,

    // `+`: Increment the current cell (wrapping)
    Plus,
    // `-`: Decrement the current cell (wrapping)
    Minus,

    // Every other character, never handed out by the token stream
    Comment,

    // End of file: no more tokens left
    EndOfFile,
}

impl TokenKind {
    /// Classify a single source character
    pub fn classify(c: char) -> TokenKind {
        match c {
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            '<' => TokenKind::LeftAngleBracket,
            '>' => TokenKind::RightAngleBracket,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            _ => TokenKind::Comment,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Dot => "Dot",
            TokenKind::Comma => "Comma",
            TokenKind::LeftAngleBracket => "LeftAngleBracket",
            TokenKind::RightAngleBracket => "RightAngleBracket",
            TokenKind::LeftBracket => "LeftBracket",
            TokenKind::RightBracket => "RightBracket",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Comment => "Comment",
            TokenKind::EndOfFile => "EndOfFile",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub span: TextSpan,
    pub kind: TokenKind,
    /// The source character, `'\0'` for `EndOfFile`
    pub value: char,
}

impl Token {
    pub fn new(span: TextSpan, kind: TokenKind, value: char) -> Self {
        Self { span, kind, value }
    }

    pub fn end_of_file(pos: u64) -> Self {
        Self::new(TextSpan::empty(pos), TokenKind::EndOfFile, '\0')
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }
}
