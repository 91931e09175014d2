pub mod ast_interpreter;

use std::{
    collections::HashMap,
    io::{self, Read, Write},
};

use clap::ValueEnum;
use thiserror::Error;

pub use ast_interpreter::AstInterpreter;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("IO Error: {0}")]
    Io(
        #[from]
        io::Error,
    ),
}

/// What `,` stores once the input has run out
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofBehavior {
    /// Leave the cell as it was
    #[default]
    Unchanged,
    /// Store 0
    Zero,
    /// Store 255, what C's `getchar()` returning -1 ends up as
    Max,
}

/// Sparse tape of cells, unbounded in both directions, every cell starts at 0
#[derive(Debug, Clone, Default)]
pub struct Tape {
    cells: HashMap<i64, u8>,
}

impl Tape {
    pub fn get(&self, index: i64) -> u8 {
        self.cells.get(&index).copied().unwrap_or(0)
    }

    pub fn set(&mut self, index: i64, value: u8) {
        self.cells.insert(index, value);
    }

    pub fn cell_mut(&mut self, index: i64) -> &mut u8 {
        self.cells.entry(index).or_insert(0)
    }

    /// Number of cells that have ever been written
    pub fn touched(&self) -> usize {
        self.cells.len()
    }
}

pub struct Runtime<R = Box<dyn Read>, W = Box<dyn Write>> {
    /// Index of the current cell, can go negative
    data_pointer: i64,

    tape: Tape,

    eof: EofBehavior,

    in_stream: R,
    out_stream: W,
}

impl<R: Read, W: Write> Runtime<R, W> {
    pub fn new(in_stream: R, out_stream: W) -> Self {
        Self {
            data_pointer: 0,
            tape: Tape::default(),
            eof: EofBehavior::default(),
            in_stream,
            out_stream,
        }
    }

    pub fn with_eof(mut self, eof: EofBehavior) -> Self {
        self.eof = eof;
        self
    }

    pub fn reset(&mut self) {
        self.tape = Tape::default();
        self.data_pointer = 0;
    }

    /// Read one byte from the input into the current cell, blocks until one is available
    pub fn read(&mut self) -> Result<(), RuntimeError> {
        // whatever was printed should be visible before we wait on input
        self.out_stream.flush()?;

        let mut byte = [0u8; 1];
        let read = loop {
            match self.in_stream.read(&mut byte) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if read == 1 {
            self.tape.set(self.data_pointer, byte[0]);
            return Ok(());
        }

        tracing::debug!(eof = ?self.eof, pointer = self.data_pointer, "input exhausted");
        match self.eof {
            EofBehavior::Unchanged => {}
            EofBehavior::Zero => self.tape.set(self.data_pointer, 0),
            EofBehavior::Max => self.tape.set(self.data_pointer, u8::MAX),
        }
        Ok(())
    }

    /// Write the current cell to the output
    pub fn write(&mut self) -> Result<(), RuntimeError> {
        self.out_stream.write_all(&[self.value()])?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.out_stream.flush()?;
        Ok(())
    }

    pub fn deref_and_add_value(&mut self, by: usize) {
        let cell = self.tape.cell_mut(self.data_pointer);
        *cell = cell.wrapping_add((by % 256) as u8);
    }

    pub fn deref_and_sub_value(&mut self, by: usize) {
        let cell = self.tape.cell_mut(self.data_pointer);
        *cell = cell.wrapping_sub((by % 256) as u8);
    }

    pub fn shift_data_pointer(&mut self, by: i64) {
        self.data_pointer += by;
    }

    /// is the value at the data pointer zero?
    pub fn value_is_zero(&self) -> bool {
        self.value() == 0
    }

    pub fn value(&self) -> u8 {
        self.tape.get(self.data_pointer)
    }

    pub fn data_pointer(&self) -> i64 {
        self.data_pointer
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn output(&self) -> &W {
        &self.out_stream
    }

    pub fn into_output(self) -> W {
        self.out_stream
    }
}
