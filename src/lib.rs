/*!
Compiles regular expressions into programs for a Thompson/Pike-style
virtual machine, as described in Russ Cox's article [Regular Expression
Matching: the Virtual Machine Approach][1].

A pattern goes through three stages: the [`cst::lexer::Lexer`] splits it into
tokens, the [`cst::parser::Parser`] builds a concrete syntax tree, and the
[`automata::compiler::Compiler`] turns the tree into a flat list of
instructions. This crate doesn't execute programs, [`disassemble`] renders
them as text.

```
let program = revis::compile("a+b").unwrap();
assert_eq!(
    revis::disassemble(&program),
    "L1:\n    char a\n    split L1 L2\nL2:\n    char b\n    match\n"
);
```

[1]: https://swtch.com/~rsc/regexp/regexp2.html
*/

pub mod automata;
pub mod cst;
pub mod errors;
mod regex;

pub use crate::automata::disasm::disassemble;
pub use crate::automata::program::{Inst, InstPtr, Program};
pub use crate::errors::Error;
pub use crate::regex::Regex;

/// Compiles `pattern` into a [`Program`].
pub fn compile(pattern: &str) -> Result<Program, Error> {
    Regex::new(pattern).map(Regex::into_program)
}
