use thiserror::Error;

use crate::cst::SyntaxError;

/// Error returned when a pattern can't be compiled.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}
