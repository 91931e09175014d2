pub mod c;

use crate::parser::Program;

pub use self::c::CGen;

pub trait CodeGen {
    fn load(&mut self, program: &Program);

    fn output(&self) -> &str;

    fn new() -> Self;
}

/// Just the statement lines, no surrounding program
pub fn generate(program: &Program) -> String {
    let mut gen = CGen::new();
    gen.load(program);
    gen.into_output()
}

/// A complete C translation unit with a `memory_size` byte tape
pub fn generate_program(program: &Program, memory_size: usize) -> String {
    let mut gen = CGen::new().with_indent_level(1);
    gen.load(program);

    format!(
        "#include <stdio.h>\n\
         \n\
         unsigned char memory[{memory_size}];\n\
         long long current = 0;\n\
         \n\
         int main(void) {{\n\
         {body}\
         {indent}return 0;\n\
         }}\n",
        body = gen.output(),
        indent = c::INDENT,
    )
}
