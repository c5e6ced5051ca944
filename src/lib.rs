pub(crate) mod args;
pub(crate) mod core;
pub(crate) mod fuzzy;
pub(crate) mod interpreter;
pub(crate) mod lexicon;
pub(crate) mod logging;
pub(crate) mod numerics;
pub(crate) mod program_parser;
pub(crate) mod tree;

pub mod result;

use crate::args::Args;
use crate::result::Result;

pub fn fuzzylang(args: Vec<String>) -> Result<()> {
    logging::init_logging();
    let args = Args::from(args);
    core::Core::run(&args)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invoke_core() {
        let args = vec!["fuzzylang", "run-tests"].into_iter().map(|s| s.to_string()).collect();
        let result = fuzzylang(args);
        assert!(result.is_ok())
    }
}