pub mod compiler;
pub mod disasm;
pub mod program;
