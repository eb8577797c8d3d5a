use std::fmt;

pub type InstPtr = usize;

/// An inclusive character range, `(lo, hi)`.
pub type ClassRange = (char, char);

/// A VM instruction.
///
/// `T` is the type of branch targets. Instructions in a [`Program`] use
/// absolute indices ([`InstPtr`]), the compiler works with targets relative
/// to the instruction that holds them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Inst<T = InstPtr> {
    Match,
    Char(char),
    Any,
    Range(Vec<ClassRange>),
    NRange(Vec<ClassRange>),
    Save(usize),
    Jump(T),
    /// Branch to both targets, the first one is preferred.
    Split(T, T),
}

impl<T: Copy> Inst<T> {
    pub fn map_targets<U>(self, mut f: impl FnMut(T) -> U) -> Inst<U> {
        match self {
            Inst::Match => Inst::Match,
            Inst::Char(c) => Inst::Char(c),
            Inst::Any => Inst::Any,
            Inst::Range(ranges) => Inst::Range(ranges),
            Inst::NRange(ranges) => Inst::NRange(ranges),
            Inst::Save(slot) => Inst::Save(slot),
            Inst::Jump(x) => Inst::Jump(f(x)),
            Inst::Split(x, y) => {
                let x = f(x);
                Inst::Split(x, f(y))
            }
        }
    }

    /// Targets of a `Jump` or `Split`, in preference order.
    pub fn targets(&self) -> impl Iterator<Item = T> {
        let (x, y) = match *self {
            Inst::Jump(x) => (Some(x), None),
            Inst::Split(x, y) => (Some(x), Some(y)),
            _ => (None, None),
        };
        x.into_iter().chain(y)
    }
}

/// A compiled program: a flat list of instructions starting at index 0 and
/// ending with its only [`Inst::Match`].
///
/// Programs only come out of the compiler and can't be modified afterwards,
/// so every branch target is a valid index.
///
/// ```compile_fail
/// let mut program = revis::compile("a").unwrap();
/// program.insts.push(revis::Inst::Jump(7));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Program {
    insts: Vec<Inst>,
    slots: usize,
}

impl Program {
    pub(crate) fn new(insts: Vec<Inst>, slots: usize) -> Program {
        Program { insts, slots }
    }

    pub fn insts(&self) -> &[Inst] {
        &self.insts
    }

    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    /// Number of capture slots written by `Save` instructions, two per
    /// group.
    pub fn slots(&self) -> usize {
        self.slots
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::disasm::write_program(f, self)
    }
}
