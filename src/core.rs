use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::args::{Args, Mode};
use crate::interpreter::Interpreter;
use crate::lexicon::Lexicon;
use crate::program_parser;
use crate::result::{Error, Result};

const DEFAULT_LEXICON: &str = "lexicons/english_lex.txt";

/// The canned programs exercised by `run-tests`, named after the originals
/// this language's test suite carried (SPEC_FULL.md's ambient-stack test
/// tooling section).
const CANNED_PROGRAMS: [(&str, &str); 6] = [
    ("hello_plain", "Hello World"),
    ("hello_one", "Hello World on one line"),
    ("hello_obfus", "Hello World obfuscated"),
    ("fib", "Fibonacci numbers"),
    ("earhart", "Emilia Earhart quote"),
    ("hamlet", "Hamlet soliloquy"),
];

pub struct Core {}

impl Core {
    pub fn run(args: &Args) -> Result<()> {
        match args.mode() {
            Mode::RunTests => Self::run_tests(),
            Mode::Run { file, lexicon } => {
                let lexicon_path = lexicon.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_LEXICON));
                Self::run_file(&lexicon_path, file)
            }
        }
    }

    fn run_tests() -> Result<()> {
        let lexicon_path = PathBuf::from(DEFAULT_LEXICON);
        let lexicon = Lexicon::load(&lexicon_path)?;

        let mut errors = Vec::new();
        for (name, title) in CANNED_PROGRAMS {
            println!("\n-------------------\n\n{title}");
            let path = PathBuf::from("tests/programs").join(name).with_extension("3o");
            match program_parser::parse_file(&lexicon, &path) {
                Ok(program) => {
                    info!(program = name, statements = program.len(), "parsed canned program");
                    println!();
                    for (line, statement) in program.iter().enumerate() {
                        println!("{line}: {statement:?}");
                    }
                    println!();
                    let stdout = io::stdout();
                    let mut out = stdout.lock();
                    let stdin = io::stdin();
                    let mut in_ = stdin.lock();
                    Interpreter::new(&lexicon, &program).run(&mut out, &mut in_);
                    println!();
                }
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::BuildErrors(errors))
        }
    }

    fn run_file(lexicon_path: &Path, file: &Path) -> Result<()> {
        let lexicon = Lexicon::load(lexicon_path)?;
        let program = program_parser::parse_file(&lexicon, file)?;
        info!(file = %file.display(), statements = program.len(), "parsed source file");

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let stdin = io::stdin();
        let mut in_ = stdin.lock();
        Interpreter::new(&lexicon, &program).run(&mut out, &mut in_);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn run_file_executes_program() {
        let temp = TempDir::new("fuzzylang-tests").unwrap();
        let source = temp.path().join("hello.3o");
        std::fs::write(&source, "print hello").unwrap();

        let args_vec = vec![
            "fuzzylang".to_string(),
            "run".to_string(),
            source.display().to_string(),
        ];
        let args = Args::from(args_vec);
        let result = Core::run(&args);
        assert!(result.is_ok());
    }

    #[test]
    fn run_file_missing_source_is_error() {
        let args_vec = vec![
            "fuzzylang".to_string(),
            "run".to_string(),
            "./does/not/exist.3o".to_string(),
        ];
        let args = Args::from(args_vec);
        let result = Core::run(&args);
        assert!(result.is_err());
    }

    #[test]
    fn run_tests_executes_all_canned_programs() {
        let args = Args::from(vec!["fuzzylang".to_string(), "run-tests".to_string()]);
        let result = Core::run(&args);
        assert!(result.is_ok());
    }
}
