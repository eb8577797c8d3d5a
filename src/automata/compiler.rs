use log::{debug, trace};

use crate::{
    automata::program::{ClassRange, Inst, InstPtr, Program},
    cst::{self, ClassItem, Expr, RepetitionKind, Sub, Term, TokenKind},
};

/// Branch target, as a distance from the instruction holding it.
type Offset = isize;

/// A self-contained piece of code that ends with a placeholder
/// [`Inst::Match`].
///
/// Branches are relative, so a fragment can be moved around without
/// renumbering it. A branch that lands on the placeholder is dangling: it
/// stands for "whatever comes next" until [`Fragment::join`] puts something
/// there.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Fragment {
    insts: Vec<Inst<Offset>>,
}

impl Default for Fragment {
    /// The fragment that matches the empty string.
    fn default() -> Self {
        Fragment {
            insts: vec![Inst::Match],
        }
    }
}

impl Fragment {
    fn new(inst: Inst<Offset>) -> Fragment {
        Fragment {
            insts: vec![inst, Inst::Match],
        }
    }

    fn len(&self) -> usize {
        self.insts.len()
    }

    /// Index of the placeholder `Match`.
    fn hole(&self) -> usize {
        self.insts.len() - 1
    }

    /// Number of branches that land on the placeholder `Match`.
    fn dangling(&self) -> usize {
        let hole = self.hole() as Offset;
        self.insts
            .iter()
            .enumerate()
            .flat_map(|(pc, inst)| {
                inst.targets().map(move |t| pc as Offset + t)
            })
            .filter(|&target| target == hole)
            .count()
    }

    /// Appends `next` to this fragment.
    ///
    /// The placeholder `Match` is dropped and `next` takes its place, so
    /// every dangling branch now lands on the first instruction of `next`.
    /// Branches to instructions past the placeholder keep pointing at the
    /// same distance, which is how a construct refers to a fragment that is
    /// joined after it.
    fn join(mut self, next: Fragment) -> Fragment {
        debug_assert_eq!(self.insts.last(), Some(&Inst::Match));
        trace!(
            "join: {} dangling branches patched to instruction {}",
            self.dangling(),
            self.hole()
        );
        self.insts.pop();
        self.insts.extend(next.insts);
        self
    }

    /// Resolves relative branches into absolute indices.
    fn into_program(self, slots: usize) -> Program {
        let len = self.insts.len();
        let insts = self
            .insts
            .into_iter()
            .enumerate()
            .map(|(pc, inst)| {
                inst.map_targets(|offset| {
                    let target = (pc as Offset + offset) as InstPtr;
                    debug_assert!(target < len, "branch out of program");
                    target
                })
            })
            .collect();
        Program::new(insts, slots)
    }
}

/// `Split` that prefers `body` when greedy and `exit` otherwise.
fn split(body: Offset, exit: Offset, greedy: bool) -> Inst<Offset> {
    if greedy {
        Inst::Split(body, exit)
    } else {
        Inst::Split(exit, body)
    }
}

/// Translates a CST into a [`Program`].
///
/// A compiler is consumed by [`Compiler::compile`], capture slots are
/// numbered from zero on each compilation.
#[derive(Default)]
pub struct Compiler {
    slots: usize,
}

impl Compiler {
    pub fn new() -> Compiler {
        Compiler { slots: 0 }
    }

    pub fn compile(mut self, regex: &cst::Regex) -> Program {
        let fragment = self.c_regex(regex);
        debug!(
            "compiled {} instructions, {} capture slots",
            fragment.len(),
            self.slots
        );
        fragment.into_program(self.slots)
    }

    fn c_regex(&mut self, regex: &cst::Regex) -> Fragment {
        let mut subs: Vec<Fragment> = regex
            .alternatives()
            .map(|regex| self.c_sub(&regex.sub))
            .collect();
        let last = subs.pop().unwrap_or_default();

        // Instructions after the `jump` of the current alternative, up to and
        // including the final `match`.
        let mut rest =
            last.len() + subs.iter().map(|sub| sub.hole() + 2).sum::<usize>();

        let mut fragment = Fragment::default();
        for sub in subs {
            //     split L1 L2
            // L1: <sub>
            //     jump L3
            // L2: <rest>
            // L3: match
            rest -= sub.hole() + 2;
            let to_rest = sub.hole() as Offset + 2;
            fragment = fragment
                .join(Fragment::new(Inst::Split(1, to_rest)))
                .join(sub)
                .join(Fragment::new(Inst::Jump(rest as Offset)));
        }
        fragment.join(last)
    }

    fn c_sub(&mut self, sub: &Sub) -> Fragment {
        sub.exprs()
            .map(|expr| self.c_expr(expr))
            .fold(Fragment::default(), Fragment::join)
    }

    fn c_expr(&mut self, expr: &Expr) -> Fragment {
        let body = self.c_term(&expr.term);
        let quantifier = match &expr.quantifier {
            Some(quantifier) => quantifier,
            None => return body,
        };
        let greedy = quantifier.is_greedy();
        let n = body.hole() as Offset;

        match quantifier.kind {
            // L1: split L2 L3
            // L2: <body>
            //     jump L1
            // L3: match
            RepetitionKind::ZeroOrMore => {
                Fragment::new(split(1, n + 2, greedy))
                    .join(body)
                    .join(Fragment::new(Inst::Jump(-(n + 1))))
            }
            // L1: <body>
            //     split L1 L2
            // L2: match
            RepetitionKind::OneOrMore => {
                body.join(Fragment::new(split(-n, 1, greedy)))
            }
            //     split L1 L2
            // L1: <body>
            // L2: match
            RepetitionKind::ZeroOrOne => {
                Fragment::new(split(1, n + 1, greedy)).join(body)
            }
        }
    }

    fn c_term(&mut self, term: &Term) -> Fragment {
        match term {
            Term::Atom(token) => match token.kind {
                TokenKind::Dot => Fragment::new(Inst::Any),
                // Escapes with no meaning of their own match the escaped
                // character, like any other escape.
                _ => Fragment::new(Inst::Char(token.char)),
            },
            Term::Group { regex, .. } => {
                // Both slots are taken before the body is compiled, so
                // outer groups get lower slots than the groups they contain.
                let slot = self.slots;
                self.slots += 2;
                Fragment::new(Inst::Save(slot))
                    .join(self.c_regex(regex))
                    .join(Fragment::new(Inst::Save(slot + 1)))
            }
            Term::Class { negated, class, .. } => {
                let ranges: Vec<ClassRange> =
                    class.items().map(ClassItem::bounds).collect();
                Fragment::new(match negated {
                    Some(_) => Inst::NRange(ranges),
                    None => Inst::Range(ranges),
                })
            }
        }
    }
}
