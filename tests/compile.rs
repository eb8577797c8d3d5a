use pretty_assertions::assert_eq;
use revis::cst::{Expected, TokenKind};
use revis::{compile, disassemble, Error, Inst, Program, Regex};

fn syntax_error(pattern: &str) -> (Expected, TokenKind) {
    match compile(pattern) {
        Err(Error::Syntax(err)) => (err.expected(), err.found()),
        Ok(program) => panic!("{:?} compiled to {:?}", pattern, program),
    }
}

fn splits(program: &Program) -> Vec<(usize, usize)> {
    program
        .insts()
        .iter()
        .filter_map(|inst| match inst {
            Inst::Split(x, y) => Some((*x, *y)),
            _ => None,
        })
        .collect()
}

#[test]
fn literal_patterns_compile_to_chars() {
    let pattern = "hello, wörld";
    let program = compile(pattern).unwrap();
    let mut expected: Vec<Inst> = pattern.chars().map(Inst::Char).collect();
    expected.push(Inst::Match);
    assert_eq!(program.insts(), expected);
}

#[test]
fn outer_groups_save_first() {
    let program = compile("(a(b))").unwrap();
    let saves: Vec<usize> = program
        .insts()
        .iter()
        .filter_map(|inst| match inst {
            Inst::Save(slot) => Some(*slot),
            _ => None,
        })
        .collect();
    assert_eq!(saves, vec![0, 2, 3, 1]);
    assert_eq!(program.slots(), 4);
}

#[test]
fn greediness_only_swaps_split_branches() {
    let greedy = compile("a*").unwrap();
    let lazy = compile("a*?").unwrap();
    assert_eq!(greedy.len(), lazy.len());

    let (x, y) = splits(&greedy)[0];
    assert_eq!(greedy.insts()[x], Inst::Char('a'));
    assert_eq!(greedy.insts()[y], Inst::Match);
    assert_eq!(splits(&lazy), vec![(y, x)]);
}

#[test]
fn alternation_funnels_into_one_match() {
    let program = compile("a|b").unwrap();
    let splits = splits(&program);
    assert_eq!(splits.len(), 1);

    let (x, y) = splits[0];
    assert_eq!(program.insts()[x], Inst::Char('a'));
    assert_eq!(program.insts()[y], Inst::Char('b'));
    let matches: Vec<usize> = program
        .insts()
        .iter()
        .enumerate()
        .filter(|(_, inst)| **inst == Inst::Match)
        .map(|(pc, _)| pc)
        .collect();
    assert_eq!(matches, vec![program.len() - 1]);
    assert_eq!(program.insts()[x + 1], Inst::Jump(program.len() - 1));
}

#[test]
fn class_ranges_keep_their_order() {
    assert_eq!(
        compile("[a-cx-z]").unwrap().insts(),
        [Inst::Range(vec![('a', 'c'), ('x', 'z')]), Inst::Match]
    );
    assert_eq!(
        compile("[^a]").unwrap().insts(),
        [Inst::NRange(vec![('a', 'a')]), Inst::Match]
    );
}

#[test]
fn syntax_errors_are_deterministic() {
    for _ in 0..3 {
        assert_eq!(
            syntax_error("(a"),
            (Expected::Token(TokenKind::RParen), TokenKind::Eof)
        );
        assert_eq!(
            syntax_error("[a-"),
            (Expected::Token(TokenKind::RBracket), TokenKind::Eof)
        );
    }
    assert_eq!(
        compile("a|(b").unwrap_err().to_string(),
        "expected ')', got end of input"
    );
}

#[test]
fn regex_handle() {
    let regex = Regex::new("x(y|z)+?").unwrap();
    assert_eq!(regex.pattern(), "x(y|z)+?");
    assert_eq!(regex.to_string(), disassemble(regex.program()));
    assert!(regex.tree().ascii_tree().contains("REGEX"));
    assert_eq!(regex.into_program(), compile("x(y|z)+?").unwrap());
}

#[test]
fn disassembly() {
    assert_eq!(
        disassemble(&compile("(a|b)*c").unwrap()),
        "L1:
    split L2 L6
L2:
    save 0
    split L3 L4
L3:
    char a
    jump L5
L4:
    char b
L5:
    save 1
    jump L1
L6:
    char c
    match
"
    );
}

#[test]
fn long_and_nested_patterns() {
    let program = compile(&"a".repeat(200_000)).unwrap();
    assert_eq!(program.len(), 200_001);
    drop(program);

    assert!(compile(&"a|".repeat(100_000)).is_ok());
    assert!(compile(&format!("[{}]", "a-".repeat(100_000))).is_ok());
    assert_eq!(
        syntax_error(&"(".repeat(100_000)),
        (Expected::Nesting(128), TokenKind::LParen)
    );
}
