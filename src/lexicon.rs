//! Component C: loads a lexicon file and builds the dispatch tables the
//! parser and interpreter consult.

use std::path::Path;

use tracing::{debug, trace, warn};

use crate::fuzzy::FuzzyMap;
use crate::numerics::Charset;
use crate::result::{Error, Result};
use crate::tree::{FunctionKind, StatementKind};

/// The rendered value a zero-arity constant function produces when no
/// lexicon overrides it. These are fixed by the language, not configurable
/// per-lexicon (see SPEC_FULL.md §4.C step 4).
const TRUE_VALUE: &str = "ace";
const FALSE_VALUE: &str = "bozo";
const PERIOD_VALUE: &str = ".";
const SPACE_VALUE: &str = " ";

pub struct Lexicon {
    charset: Charset,
    functions: FuzzyMap<FunctionKind>,
    pub variables: FuzzyMap<String>,
    statements: Vec<StatementKind>,
    breakpoints: Vec<f64>,
}

impl Lexicon {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::LexiconLoad(path.to_path_buf(), e.to_string()))?;
        Self::parse(&text).map_err(|e| match e {
            Error::KeyConflict(k) => Error::LexiconLoad(path.to_path_buf(), format!("duplicate alias {k}")),
            other => other,
        })
    }

    fn parse(text: &str) -> Result<Self> {
        let mut digits = Vec::new();
        let mut decimals = Vec::new();
        let mut signs = Vec::new();
        let mut statement_lines: Vec<(StatementKind, Vec<String>)> = Vec::new();
        let mut function_lines: Vec<(FunctionKind, Vec<String>)> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('(') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let values: Vec<String> = value
                .split(',')
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .collect();

            match key.as_str() {
                "digits" => digits = values.join(",").chars().filter(|c| !c.is_whitespace() && *c != ',').collect(),
                "decimals" => decimals = values.join(",").chars().filter(|c| !c.is_whitespace() && *c != ',').collect(),
                "signs" => signs = values.join(",").chars().filter(|c| !c.is_whitespace() && *c != ',').collect(),
                _ => {
                    if let Some(kind) = statement_kind(&key) {
                        statement_lines.push((kind, values));
                    } else if let Some(kind) = function_kind(&key) {
                        function_lines.push((kind, values));
                    }
                    // "more" and unrecognized keys are handled below / ignored.
                    if key == "more" {
                        function_lines.push((FunctionKind::Greater, values_from_line(value)));
                    }
                }
            }
        }

        trace!(digits = digits.len(), decimals = decimals.len(), signs = signs.len(), "lexicon character classes loaded");

        let charset = Charset::new(digits, decimals, signs);
        let chars = charset.chars();

        let mut functions: FuzzyMap<FunctionKind> = FuzzyMap::new(&chars, true);
        let mut variables: FuzzyMap<String> = FuzzyMap::new(&chars, false);

        for (kind, aliases) in &function_lines {
            for alias in aliases {
                functions.insert(alias, *kind)?;
                debug!(alias = %alias, function = ?kind, "registered function alias");
            }
        }

        for (kind, aliases) in &function_lines {
            let rendered = constant_value(*kind);
            if let Some(rendered) = rendered {
                for alias in aliases {
                    variables.insert(alias, rendered.to_string())?;
                }
            }
        }

        let mut values: Vec<(f64, StatementKind)> = Vec::new();
        for (kind, aliases) in &statement_lines {
            for alias in aliases {
                values.push((charset.float(alias), *kind));
            }
        }
        values.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        let statements: Vec<StatementKind> = values.iter().map(|(_, k)| *k).collect();
        let breakpoints: Vec<f64> = values.windows(2).map(|w| (w[0].0 + w[1].0) / 2.0).collect();

        Ok(Self { charset, functions, variables, statements, breakpoints })
    }

    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    /// The "tight" statement match: the word's numeric value is bisected
    /// against the registered statement aliases' values, returning the
    /// nearest one. Every word resolves to some statement.
    pub fn statement_of(&self, word: &str) -> StatementKind {
        let v = self.charset.float(word);
        let idx = self.breakpoints.partition_point(|&bp| bp <= v);
        self.statements[idx]
    }

    pub fn function_of(&self, word: &str) -> Option<FunctionKind> {
        let found = self.functions.lookup(word).copied();
        if found.is_none() {
            warn!(word = %word, "ambiguous or unknown function alias, treated as a literal word");
        }
        found
    }
}

fn values_from_line(value: &str) -> Vec<String> {
    value.split(',').map(|v| v.trim().to_lowercase()).filter(|v| !v.is_empty()).collect()
}

fn constant_value(kind: FunctionKind) -> Option<&'static str> {
    match kind {
        FunctionKind::True => Some(TRUE_VALUE),
        FunctionKind::False => Some(FALSE_VALUE),
        FunctionKind::Period => Some(PERIOD_VALUE),
        FunctionKind::Space => Some(SPACE_VALUE),
        _ => None,
    }
}

fn statement_kind(key: &str) -> Option<StatementKind> {
    Some(match key {
        "assign" => StatementKind::Assign,
        "calculate" => StatementKind::Calculate,
        "exit" => StatementKind::Exit,
        "go" => StatementKind::Go,
        "if" => StatementKind::If,
        "print" => StatementKind::Print,
        "return" => StatementKind::Return,
        _ => return None,
    })
}

fn function_kind(key: &str) -> Option<FunctionKind> {
    Some(match key {
        "add" => FunctionKind::Add,
        "and" => FunctionKind::And,
        "concatenate" => FunctionKind::Concatenate,
        "divide" => FunctionKind::Divide,
        "equal" => FunctionKind::Equal,
        "false" => FunctionKind::False,
        "greater" => FunctionKind::Greater,
        "input" => FunctionKind::Input,
        "left" => FunctionKind::Left,
        "less" => FunctionKind::Less,
        "modulus" => FunctionKind::Modulus,
        "multiply" => FunctionKind::Multiply,
        "not" => FunctionKind::Not,
        "or" => FunctionKind::Or,
        "period" => FunctionKind::Period,
        "power" => FunctionKind::Power,
        "right" => FunctionKind::Right,
        "space" => FunctionKind::Space,
        "subtract" => FunctionKind::Subtract,
        "true" => FunctionKind::True,
        _ => return None,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
digits: a,b,c,d,e,f,g,o,t,j
decimals: .
signs: -
print: print, show
assign: assign, set
calculate: calculate, calc
exit: exit
go: go
if: if
return: return
add: add, plus
true: true
false: false
period: period
space: space
";

    #[test]
    fn loads_statement_bisection_table() {
        let lex = Lexicon::parse(SAMPLE).unwrap();
        assert_eq!(lex.statement_of("print"), StatementKind::Print);
        assert_eq!(lex.statement_of("assign"), StatementKind::Assign);
    }

    #[test]
    fn function_alias_resolves() {
        let lex = Lexicon::parse(SAMPLE).unwrap();
        assert_eq!(lex.function_of("add"), Some(FunctionKind::Add));
        assert_eq!(lex.function_of("plus"), Some(FunctionKind::Add));
    }

    #[test]
    fn variables_seeded_with_constants() {
        let lex = Lexicon::parse(SAMPLE).unwrap();
        assert_eq!(lex.variables.lookup("true"), Some(&TRUE_VALUE.to_string()));
        assert_eq!(lex.variables.lookup("false"), Some(&FALSE_VALUE.to_string()));
    }

    #[test]
    fn unknown_alias_is_absent() {
        let lex = Lexicon::parse(SAMPLE).unwrap();
        assert_eq!(lex.function_of("zzz"), None);
    }
}
