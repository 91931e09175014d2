use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

/// Something that hands out characters one at a time until it runs dry
pub trait CharSource {
    /// The next character, or `None` once the source is exhausted.
    /// Once `None` is returned every later call returns `None` too.
    fn supply(&mut self) -> Option<char>;

    /// How many characters have been supplied so far
    fn position(&self) -> u64;
}

/// In-memory program text
#[derive(Debug, Clone)]
pub struct TextSource {
    chars: Vec<char>,
    position: u64,
}

impl TextSource {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            position: 0,
        }
    }
}

impl CharSource for TextSource {
    fn supply(&mut self) -> Option<char> {
        let c = *self.chars.get(self.position as usize)?;
        self.position += 1;
        Some(c)
    }

    fn position(&self) -> u64 {
        self.position
    }
}

/// Streams a program out of any reader, each byte being one character
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    position: u64,
    done: bool,
    error: Option<io::Error>,
}

/// A buffered program file
pub type FileSource = ReaderSource<BufReader<File>>;

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(ReaderSource::new(BufReader::new(file)))
    }
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
            done: false,
            error: None,
        }
    }

    /// The read failure that cut the stream short, if there was one
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn supply(&mut self) -> Option<char> {
        if self.done {
            return None;
        }

        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    self.position += 1;
                    return Some(byte[0] as char);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!(position = self.position, error = %e, "reading source failed, treating as end of input");
                    self.error = Some(e);
                    break;
                }
            }
        }

        self.done = true;
        None
    }

    fn position(&self) -> u64 {
        self.position
    }
}
