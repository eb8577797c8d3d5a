use std::fmt;

use log::debug;

use crate::automata::compiler::Compiler;
use crate::automata::program::Program;
use crate::cst::{self, parser::Parser};
use crate::errors::Error;

/// A compiled pattern, together with the tree it was compiled from.
pub struct Regex {
    pattern: String,
    tree: cst::Regex,
    program: Program,
}

impl Regex {
    pub fn new(pat: &str) -> Result<Regex, Error> {
        let tree = Parser::new(pat).parse()?;
        debug!("concrete syntax tree for {:?}:\n{}", pat, tree.ascii_tree());
        let program = Compiler::new().compile(&tree);
        Ok(Regex {
            pattern: pat.to_owned(),
            tree,
            program,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn tree(&self) -> &cst::Regex {
        &self.tree
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn into_program(self) -> Program {
        self.program
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.program, f)
    }
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Regex").field(&self.pattern).finish()
    }
}
