//! Component E: executes a parsed program against a lexicon.

use std::io::{self, BufRead, Write};

use tracing::trace;

use crate::fuzzy::FuzzyMap;
use crate::lexicon::Lexicon;
use crate::numerics;
use crate::tree::{Expr, FunctionKind, Statement, StatementKind};

pub struct Interpreter<'a> {
    lexicon: &'a Lexicon,
    program: &'a [Statement],
    pc: usize,
    returns: Vec<usize>,
    vars: FuzzyMap<String>,
}

impl<'a> Interpreter<'a> {
    pub fn new(lexicon: &'a Lexicon, program: &'a [Statement]) -> Self {
        Self {
            lexicon,
            program,
            pc: 0,
            returns: Vec::new(),
            vars: lexicon.variables.clone(),
        }
    }

    /// Runs to completion, writing `print`/`calculate` output to `out` and
    /// reading `input` prompts from `in_`. There is no fault recovery: a
    /// malformed program (e.g. division by zero) is allowed to panic,
    /// matching SPEC_FULL.md §7's policy.
    pub fn run<W: Write, R: BufRead>(&mut self, out: &mut W, in_: &mut R) {
        if self.program.is_empty() {
            return;
        }
        loop {
            let line = &self.program[self.pc];
            self.pc += 1;
            trace!(pc = self.pc - 1, kind = ?line.kind, "executing statement");
            self.exec(line, out, in_);
            if self.pc >= self.program.len() {
                break;
            }
        }
    }

    fn exec<W: Write, R: BufRead>(&mut self, stmt: &Statement, out: &mut W, in_: &mut R) {
        match stmt.kind {
            StatementKind::Exit => self.pc = self.program.len(),
            StatementKind::Go => {
                let target = self.eval(&stmt.args[0], out, in_);
                let t = (self.lexicon.charset().int(&target) - 1).rem_euclid(self.program.len() as i64);
                self.returns.push(self.pc);
                self.pc = t as usize;
            }
            StatementKind::Return => {
                if let Some(pc) = self.returns.pop() {
                    self.pc = pc;
                }
            }
            StatementKind::If => {
                let v = self.eval(&stmt.args[0], out, in_);
                if !self.lexicon.charset().num(&v).is_truthy() {
                    self.pc += 1;
                }
            }
            StatementKind::Assign => {
                let name = match &stmt.args[0] {
                    Expr::Word(w) => w.clone(),
                    Expr::Application(..) => unreachable!("assign's target is always parsed as a raw word"),
                };
                let value = self.eval(&stmt.args[1], out, in_);
                // Non-strict: assigning a variable also seeds its
                // one-substitution neighborhood, so a later near-miss
                // spelling of the same name still resolves (unless it
                // collides with another variable's neighborhood, in which
                // case it falls back to being treated as a literal word).
                let _ = self.vars.insert(&name, value);
            }
            StatementKind::Print => {
                let v = self.eval(&stmt.args[0], out, in_);
                let _ = writeln!(out, "{v}");
            }
            StatementKind::Calculate => {
                let v = self.eval(&stmt.args[0], out, in_);
                let n = self.lexicon.charset().num(&v);
                let _ = writeln!(out, "{n}");
            }
        }
    }

    fn eval<W: Write, R: BufRead>(&mut self, expr: &Expr, out: &mut W, in_: &mut R) -> String {
        match expr {
            Expr::Word(w) => self.vars.lookup(w).cloned().unwrap_or_else(|| w.clone()),
            Expr::Application(f, args) => self.apply(*f, args, out, in_),
        }
    }

    fn apply<W: Write, R: BufRead>(
        &mut self,
        function: FunctionKind,
        args: &[Expr],
        out: &mut W,
        in_: &mut R,
    ) -> String {
        let charset = self.lexicon.charset();

        match function {
            FunctionKind::True => self.truth_value(true),
            FunctionKind::False => self.truth_value(false),
            FunctionKind::Period => self.vars.lookup("period").cloned().unwrap_or_default(),
            FunctionKind::Space => self.vars.lookup("space").cloned().unwrap_or_default(),

            FunctionKind::Add => {
                let (a, b) = self.eval_pair(args, out, in_);
                numerics::add(charset, &a, &b)
            }
            FunctionKind::Subtract => {
                let (a, b) = self.eval_pair(args, out, in_);
                numerics::subtract(charset, &a, &b)
            }
            FunctionKind::Multiply => {
                let (a, b) = self.eval_pair(args, out, in_);
                numerics::multiply(charset, &a, &b)
            }
            FunctionKind::Divide => {
                let (a, b) = self.eval_pair(args, out, in_);
                numerics::divide(charset, &a, &b)
            }
            FunctionKind::Modulus => {
                let (a, b) = self.eval_pair(args, out, in_);
                numerics::modulus(charset, &a, &b)
            }
            FunctionKind::Power => {
                let (a, b) = self.eval_pair(args, out, in_);
                numerics::power(charset, &a, &b)
            }

            FunctionKind::Concatenate => {
                let (a, b) = self.eval_pair(args, out, in_);
                format!("{a}{b}")
            }
            FunctionKind::Left => {
                let (t, n) = self.eval_pair(args, out, in_);
                let n = charset.int(&n).rem_euclid(t.chars().count() as i64 + 1) as usize;
                t.chars().take(n).collect()
            }
            FunctionKind::Right => {
                let (t, n) = self.eval_pair(args, out, in_);
                let n = charset.int(&n).rem_euclid(t.chars().count() as i64 + 1) as usize;
                t.chars().skip(n).collect()
            }
            FunctionKind::And => {
                let a = self.eval(&args[0], out, in_);
                if charset.num(&a).is_truthy() {
                    let b = self.eval(&args[1], out, in_);
                    if charset.num(&b).is_truthy() {
                        a
                    } else {
                        b
                    }
                } else {
                    a
                }
            }
            FunctionKind::Or => {
                let a = self.eval(&args[0], out, in_);
                if charset.num(&a).is_truthy() {
                    a
                } else {
                    let b = self.eval(&args[1], out, in_);
                    if charset.num(&b).is_truthy() {
                        b
                    } else {
                        a
                    }
                }
            }
            FunctionKind::Not => {
                let v = self.eval(&args[0], out, in_);
                let truthy = !v.is_empty() && charset.num(&v).is_truthy();
                self.truth_value(!truthy)
            }
            FunctionKind::Equal => {
                let (a, b) = self.eval_pair(args, out, in_);
                self.truth_value(charset.float(&a) == charset.float(&b))
            }
            FunctionKind::Greater => {
                let (a, b) = self.eval_pair(args, out, in_);
                self.truth_value(charset.float(&a) > charset.float(&b))
            }
            FunctionKind::Less => {
                let (a, b) = self.eval_pair(args, out, in_);
                self.truth_value(charset.float(&a) < charset.float(&b))
            }
            FunctionKind::Input => {
                let prompt = self.eval(&args[0], out, in_);
                let _ = write!(out, "{prompt}? ");
                let _ = out.flush();
                let mut line = String::new();
                let _ = in_.read_line(&mut line);
                line.trim_end_matches(['\n', '\r']).to_string()
            }
        }
    }

    fn eval_pair<W: Write, R: BufRead>(&mut self, args: &[Expr], out: &mut W, in_: &mut R) -> (String, String) {
        let a = self.eval(&args[0], out, in_);
        let b = self.eval(&args[1], out, in_);
        (a, b)
    }

    fn truth_value(&self, cond: bool) -> String {
        let key = if cond { "true" } else { "false" };
        self.vars.lookup(key).cloned().unwrap_or_default()
    }
}
