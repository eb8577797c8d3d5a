/*! Functions that return an ASCII representation of a CST.*/

use ::ascii_tree::Tree;
use ::ascii_tree::Tree::{Leaf, Node};

use crate::cst::{Class, ClassItem, Expr, Regex, Sub, Term, Token};

fn leaf(token: &Token) -> Tree {
    Leaf(vec![token.to_string()])
}

/// Returns a representation of the regex as an ASCII tree.
///
/// The alternatives hang from a single `REGEX` node, separated by their
/// `'|'` tokens. `SUB` and `CLASS` chains are flattened the same way.
pub(crate) fn regex_ascii_tree(regex: &Regex) -> Tree {
    let mut children = vec![];
    for regex in regex.alternatives() {
        children.push(sub_ascii_tree(&regex.sub));
        if let Some(alternative) = &regex.alternative {
            children.push(leaf(&alternative.pipe));
        }
    }
    Node("REGEX".to_owned(), children)
}

fn sub_ascii_tree(sub: &Sub) -> Tree {
    Node("SUB".to_owned(), sub.exprs().map(expr_ascii_tree).collect())
}

fn expr_ascii_tree(expr: &Expr) -> Tree {
    let mut children = vec![term_ascii_tree(&expr.term)];
    if let Some(quantifier) = &expr.quantifier {
        children.push(leaf(&quantifier.op));
        if let Some(lazy) = &quantifier.lazy {
            children.push(leaf(lazy));
        }
    }
    Node("EXPR".to_owned(), children)
}

fn term_ascii_tree(term: &Term) -> Tree {
    let children = match term {
        Term::Atom(token) => vec![leaf(token)],
        Term::Group { open, regex, close } => {
            vec![leaf(open), regex_ascii_tree(regex), leaf(close)]
        }
        Term::Class { open, negated, class, close } => {
            let mut children = vec![leaf(open)];
            if let Some(caret) = negated {
                children.push(leaf(caret));
            }
            children.push(class_ascii_tree(class));
            children.push(leaf(close));
            children
        }
    };
    Node("TERM".to_owned(), children)
}

fn class_ascii_tree(class: &Class) -> Tree {
    let mut children = vec![];
    for item in class.items() {
        match item {
            ClassItem::Single(c) => children.push(leaf(c)),
            ClassItem::Range(lo, hi) => children
                .push(Node("RANGE".to_owned(), vec![leaf(lo), leaf(hi)])),
        }
    }
    Node("CLASS".to_owned(), children)
}
