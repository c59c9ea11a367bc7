//! An interpreter for the Whitespace esoteric programming language: source
//! programs are written entirely in space, tab and line feed characters,
//! every other byte is a comment.
//!
//! The pipeline mirrors the four stages a reader would expect from any
//! interpreter: [`sanitize`] strips comment bytes, [`token`] segments the
//! remaining symbols into instructions and builds the label table,
//! [`exec`] runs the resulting program, and [`error`] carries every way
//! that can go wrong. [`run`] wires the three together into a single
//! pure function from source text to output text.
pub mod error;
pub mod exec;
pub mod literal;
pub mod sanitize;
pub mod token;

use error::InterpreterError;

/// Interprets a Whitespace program end to end, feeding it `input` for any
/// ReadChar/ReadInt instructions it executes and returning everything its
/// PrintChar/PrintInt instructions wrote.
///
/// This is the pure `(program, input) -> output` core contract: a program
/// that never reaches Halt runs forever. A caller that needs to bound how
/// long a program may run drives [`exec::Executor::step`] itself instead
/// (see the CLI's `--max-steps` wrapper in `main.rs`); that bound is a
/// host-side concern, not a parameter of this function.
pub fn run(source: &str, input: &str) -> Result<String, InterpreterError>
{
	let sanitized = sanitize::sanitize(source);
	let program = token::tokenize(&sanitized)?;
	let output = exec::run(&program, input)?;

	Ok(output)
}
