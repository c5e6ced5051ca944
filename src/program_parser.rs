//! Component D: tokenizes a source file and builds the program tree using
//! the lexicon's statement/function dispatch.

use std::path::Path;

use tracing::warn;

use crate::lexicon::Lexicon;
use crate::result::{Error, Result};
use crate::tree::{Expr, Statement, StatementKind};

pub fn parse_file(lexicon: &Lexicon, path: &Path) -> Result<Vec<Statement>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::SourceLoad(path.to_path_buf(), e.to_string()))?;
    Ok(parse(lexicon, &text))
}

/// Tokenizes and parses `text` into a program. Runs out of tokens
/// mid-statement is handled gracefully: the partial statement is discarded,
/// replaced with a single `exit`, and parsing stops (SPEC_FULL.md §4.D/§9).
pub fn parse(lexicon: &Lexicon, text: &str) -> Vec<Statement> {
    let mut tokens: Vec<String> = text
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();
    tokens.reverse();

    let mut program = Vec::new();

    while !tokens.is_empty() {
        let head = tokens.pop().unwrap();
        let kind = lexicon.statement_of(&head);

        match build_statement(lexicon, kind, &mut tokens) {
            Some(statement) => program.push(statement),
            None => {
                warn!("token stream exhausted mid-statement; truncating with an implicit exit");
                program.push(Statement { kind: StatementKind::Exit, args: Vec::new() });
                break;
            }
        }
    }

    program
}

fn build_statement(
    lexicon: &Lexicon,
    kind: StatementKind,
    tokens: &mut Vec<String>,
) -> Option<Statement> {
    let arity = kind.arity();
    let mut args = Vec::with_capacity(arity);

    for slot in 0..arity {
        // assign's first slot names the variable being targeted: always a
        // raw token, never resolved through the function table.
        if kind == StatementKind::Assign && slot == 0 {
            args.push(Expr::Word(tokens.pop()?));
            continue;
        }
        args.push(build_expr(lexicon, tokens)?);
    }

    Some(Statement { kind, args })
}

fn build_expr(lexicon: &Lexicon, tokens: &mut Vec<String>) -> Option<Expr> {
    let token = tokens.pop()?;

    match lexicon.function_of(&token) {
        Some(function) => {
            let arity = function.arity();
            let mut args = Vec::with_capacity(arity);
            for _ in 0..arity {
                args.push(build_expr(lexicon, tokens)?);
            }
            Some(Expr::Application(function, args))
        }
        None => Some(Expr::Word(token)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexicon::Lexicon;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
digits: a,b,c,d,e,f,g,o,t,j
decimals: .
signs: -
print: print
assign: assign
calculate: calculate
exit: exit
go: go
if: if
return: return
add: add
true: true
false: false
period: period
space: space
";

    fn lexicon() -> Lexicon {
        Lexicon::parse(SAMPLE).unwrap()
    }

    #[test]
    fn parses_print_literal() {
        let lex = lexicon();
        let program = parse(&lex, "print hello");
        assert_eq!(program.len(), 1);
        assert_eq!(program[0].kind, StatementKind::Print);
        assert_eq!(program[0].args, vec![Expr::Word("hello".to_string())]);
    }

    #[test]
    fn parses_assign_with_raw_target() {
        let lex = lexicon();
        let program = parse(&lex, "assign x hello");
        assert_eq!(program[0].kind, StatementKind::Assign);
        assert_eq!(program[0].args[0], Expr::Word("x".to_string()));
        assert_eq!(program[0].args[1], Expr::Word("hello".to_string()));
    }

    #[test]
    fn parses_nested_function_application() {
        let lex = lexicon();
        let program = parse(&lex, "calculate add b c");
        assert_eq!(program[0].kind, StatementKind::Calculate);
        match &program[0].args[0] {
            Expr::Application(f, args) => {
                assert_eq!(*f, crate::tree::FunctionKind::Add);
                assert_eq!(args.len(), 2);
            }
            other => panic!("expected application, got {other:?}"),
        }
    }

    #[test]
    fn underflow_truncates_to_exit() {
        let lex = lexicon();
        let program = parse(&lex, "assign x");
        assert_eq!(program.len(), 1);
        assert_eq!(program[0].kind, StatementKind::Exit);
        assert!(program[0].args.is_empty());
    }
}
