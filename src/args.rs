use std::path::PathBuf;

use clap::{Parser as ClapParser, Subcommand};
#[cfg(test)]
use clap::error::Error as ClapError;

#[derive(Clone, Debug, ClapParser, PartialEq)]
#[command(version, about, long_about = None)]
///
/// Interpreter for the 3.0 natural-language esoteric programming language.
///
pub(crate) struct Args {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Clone, Debug, Subcommand, PartialEq)]
pub(crate) enum Mode {
    /// Run every canned program under the tests/ directory against the
    /// default lexicon, printing each one's output in turn.
    RunTests,

    /// Parse and execute a single source file.
    Run {
        /// The source file to execute.
        file: PathBuf,

        /// The lexicon file to load. Defaults to lexicons/english_lex.txt.
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
}

impl Args {
    pub(crate) fn from(args: Vec<String>) -> Self {
        Args::parse_from(args)
    }

    pub(crate) fn mode(&self) -> &Mode {
        &self.mode
    }

    #[cfg(test)]
    pub(crate) fn try_from(args: &str) -> Result<Self, ClapError> {
        let args = Vec::from_iter(args.split(' ').map(String::from));
        Args::try_parse_from(&args)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_with_zero_args() {
        let args = "fuzzylang";
        assert!(Args::try_from(args).is_err());
    }

    #[test]
    fn parses_run_tests() {
        let args = Args::try_from("fuzzylang run-tests").unwrap();
        assert_eq!(args.mode(), &Mode::RunTests);
    }

    #[test]
    fn parses_run_with_file() {
        let args = Args::try_from("fuzzylang run program.3o").unwrap();
        match args.mode() {
            Mode::Run { file, lexicon } => {
                assert_eq!(file, &PathBuf::from("program.3o"));
                assert_eq!(lexicon, &None);
            }
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn parses_run_with_explicit_lexicon() {
        let args = Args::try_from("fuzzylang run program.3o --lexicon custom_lex.txt").unwrap();
        match args.mode() {
            Mode::Run { lexicon, .. } => {
                assert_eq!(lexicon, &Some(PathBuf::from("custom_lex.txt")));
            }
            other => panic!("expected Run, got {other:?}"),
        }
    }
}
