use std::io::{Read, Write};

use crate::parser::{self, Statement};

use super::{Runtime, RuntimeError};

pub struct AstInterpreter {}

impl Default for AstInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl AstInterpreter {
    pub fn new() -> Self {
        Self {}
    }

    /// Run the program to completion, a loop that never zeroes its cell never returns
    pub fn interpret<R: Read, W: Write>(
        &mut self,
        runtime: &mut Runtime<R, W>,
        program: &parser::Program,
    ) -> Result<(), RuntimeError> {
        self.interpret_block(runtime, program)?;
        runtime.flush()
    }

    fn interpret_block<R: Read, W: Write>(
        &mut self,
        runtime: &mut Runtime<R, W>,
        block: &parser::BasicBlock,
    ) -> Result<(), RuntimeError> {
        // written this way since the upper-most block (program) doesn't repeat
        for statement in block.statements.iter() {
            match statement {
                Statement::Print => runtime.write()?,
                Statement::Input => runtime.read()?,
                Statement::ShiftLeft { by } => runtime.shift_data_pointer(-(*by as i64)),
                Statement::ShiftRight { by } => runtime.shift_data_pointer(*by as i64),
                Statement::Increment { by } => runtime.deref_and_add_value(*by),
                Statement::Decrement { by } => runtime.deref_and_sub_value(*by),
                Statement::Loop(sub_block) => {
                    while !runtime.value_is_zero() {
                        self.interpret_block(runtime, sub_block)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::parser::BasicBlock;

    fn run(program: &BasicBlock, input: &[u8]) -> Runtime<Cursor<Vec<u8>>, Vec<u8>> {
        let mut runtime = Runtime::new(Cursor::new(input.to_vec()), vec![]);
        AstInterpreter::new().interpret(&mut runtime, program).unwrap();
        runtime
    }

    #[test]
    fn loop_that_starts_at_zero_is_skipped() {
        let program = BasicBlock::new(vec![Statement::Loop(BasicBlock::new(vec![Statement::Print]))]);
        assert!(run(&program, b"").output().is_empty());
    }

    #[test]
    fn loop_rechecks_after_each_pass() {
        // +++[>++<-] leaves 6 in cell 1
        let program = BasicBlock::new(vec![
            Statement::Increment { by: 3 },
            Statement::Loop(BasicBlock::new(vec![
                Statement::ShiftRight { by: 1 },
                Statement::Increment { by: 2 },
                Statement::ShiftLeft { by: 1 },
                Statement::Decrement { by: 1 },
            ])),
        ]);
        let runtime = run(&program, b"");
        assert_eq!(runtime.tape().get(0), 0);
        assert_eq!(runtime.tape().get(1), 6);
        assert_eq!(runtime.data_pointer(), 0);
    }

    #[test]
    fn shifts_move_by_the_run_length() {
        let program = BasicBlock::new(vec![
            Statement::ShiftLeft { by: 10 },
            Statement::ShiftRight { by: 3 },
        ]);
        assert_eq!(run(&program, b"").data_pointer(), -7);
    }

    #[test]
    fn echoes_input() {
        let program = BasicBlock::new(vec![Statement::Input, Statement::Print]);
        assert_eq!(run(&program, b"A").into_output(), b"A");
    }
}
