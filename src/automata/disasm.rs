use std::fmt::{self, Write};

use crate::automata::program::{ClassRange, Inst, InstPtr, Program};

/// Returns a textual listing of `program`.
///
/// Every instruction that is the target of a `jump` or `split` gets a label
/// `L1`, `L2`, ... numbered in program order.
///
/// ```text
/// L1:
///     split L2 L3
/// L2:
///     char a
///     jump L1
/// L3:
///     match
/// ```
pub fn disassemble(program: &Program) -> String {
    let mut s = String::new();
    // Writing into a `String` never fails.
    let _ = write_program(&mut s, program);
    s
}

pub(crate) fn write_program<W: Write>(
    w: &mut W,
    program: &Program,
) -> fmt::Result {
    let labels = labels(program);
    let label = |target: InstPtr| labels[target].unwrap_or_default();

    for (pc, inst) in program.insts().iter().enumerate() {
        if let Some(l) = labels[pc] {
            writeln!(w, "L{}:", l)?;
        }
        match inst {
            Inst::Char(c) => writeln!(w, "    char {}", c)?,
            Inst::Match => writeln!(w, "    match")?,
            Inst::Jump(x) => writeln!(w, "    jump L{}", label(*x))?,
            Inst::Split(x, y) => {
                writeln!(w, "    split L{} L{}", label(*x), label(*y))?
            }
            Inst::Save(slot) => writeln!(w, "    save {}", slot)?,
            Inst::Any => writeln!(w, "    any")?,
            Inst::Range(ranges) => write_ranges(w, "range", ranges)?,
            Inst::NRange(ranges) => write_ranges(w, "nrange", ranges)?,
        }
    }
    Ok(())
}

fn write_ranges<W: Write>(
    w: &mut W,
    mnemonic: &str,
    ranges: &[ClassRange],
) -> fmt::Result {
    write!(w, "    {}", mnemonic)?;
    for (lo, hi) in ranges {
        write!(w, " {} {}", lo, hi)?;
    }
    writeln!(w)
}

/// Label number of each instruction, `None` for those nobody branches to.
fn labels(program: &Program) -> Vec<Option<usize>> {
    let mut targeted = vec![false; program.len()];
    for target in program.insts().iter().flat_map(Inst::targets) {
        targeted[target] = true;
    }
    let mut next = 0;
    targeted
        .into_iter()
        .map(|t| {
            t.then(|| {
                next += 1;
                next
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::disassemble;
    use crate::automata::compiler::Compiler;
    use crate::cst::parser::Parser;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> String {
        let tree = Parser::new(s).parse().expect("should be valid cst");
        disassemble(&Compiler::new().compile(&tree))
    }

    #[test]
    fn straight_line() {
        assert_eq!(d("a.b"), "    char a\n    any\n    char b\n    match\n");
    }

    #[test]
    fn star() {
        assert_eq!(
            d("a*"),
            "L1:\n    split L2 L3\nL2:\n    char a\n    jump L1\nL3:\n    match\n"
        );
        assert_eq!(
            d("a*?"),
            "L1:\n    split L3 L2\nL2:\n    char a\n    jump L1\nL3:\n    match\n"
        );
    }

    #[test]
    fn alternation() {
        assert_eq!(
            d("a|b"),
            "    split L1 L2\nL1:\n    char a\n    jump L3\nL2:\n    char b\nL3:\n    match\n"
        );
    }

    #[test]
    fn groups_and_classes() {
        assert_eq!(
            d("([a-cx-z])[^q]"),
            "    save 0\n    range a c x z\n    save 1\n    nrange q q\n    match\n"
        );
    }

    #[test]
    fn display_matches_disassemble() {
        let tree = Parser::new("(ab)+").parse().unwrap();
        let program = Compiler::new().compile(&tree);
        assert_eq!(program.to_string(), disassemble(&program));
    }
}
