use std::error::Error;
use std::fmt;

// Every fallible stage of the interpreter (sanitize, tokenize, execute) signals
// failure through one of these two leaf types, composed into InterpreterError
// at the crate boundary.

// A malformed program is rejected before a single instruction runs:
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError
{
	// Two mark instructions defined the same label:
	DuplicateLabel { label: String, position: usize },

	// Invalid prefix/discriminator, a literal missing its L terminator, or a
	// number literal whose first symbol is L:
	MalformedToken { position: usize },
}

impl fmt::Display for SyntaxError
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
	{
		match self
		{
			SyntaxError::DuplicateLabel { label, position } =>
				write!(f, "[offset {:}] the label \"{:}\" is defined more than once", position, label),
			SyntaxError::MalformedToken { position } =>
				write!(f, "[offset {:}] the token starting here is not a valid instruction", position),
		}
	}
}

impl Error for SyntaxError { }

// A syntactically valid program can still misbehave once it runs:
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError
{
	// An operator needed more operands than the stack held:
	StackUnderflow,

	// Copy was given a negative index:
	InvalidIndex(i64),

	// Load read an address that was never stored to:
	HeapMiss(i64),

	// Div or mod with a zero divisor:
	DivideByZero,

	// ReadChar past the end of input, or ReadInt unable to find its L terminator:
	InputExhausted,

	// ReadInt found digits invalid for the base its prefix selected:
	InputMalformed,

	// PrintChar popped a value that is not a valid Unicode code point:
	InvalidCodepoint(i64),

	// Call/Jump/JumpZero/JumpNeg referenced a label no Mark ever defined:
	UndefinedLabel(String),

	// Return with nothing on the call stack:
	EmptyCallStack,

	// The token sequence ran out before a Halt was reached, at this
	// instruction index:
	UnterminatedProgram(usize),

	// The host-side instruction budget (CLI `--max-steps`) was exhausted
	// before the program halted on its own:
	StepLimitExceeded,
}

impl fmt::Display for RuntimeError
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
	{
		match self
		{
			RuntimeError::StackUnderflow 			=> write!(f, "an operator needed more values than the stack held"),
			RuntimeError::InvalidIndex(n) 			=> write!(f, "copy index {:} is negative", n),
			RuntimeError::HeapMiss(addr) 			=> write!(f, "heap address {:} was never written", addr),
			RuntimeError::DivideByZero 				=> write!(f, "division or modulo by zero"),
			RuntimeError::InputExhausted 			=> write!(f, "ran out of input before a value could be read"),
			RuntimeError::InputMalformed 			=> write!(f, "input did not contain a valid number for the selected base"),
			RuntimeError::InvalidCodepoint(n) 		=> write!(f, "{:} is not a valid Unicode code point", n),
			RuntimeError::UndefinedLabel(label) 	=> write!(f, "reference to undefined label \"{:}\"", label),
			RuntimeError::EmptyCallStack 			=> write!(f, "return with no pending call"),
			RuntimeError::UnterminatedProgram(pc) 	=> write!(f, "reached the end of the program at instruction {:} without halting", pc),
			RuntimeError::StepLimitExceeded 		=> write!(f, "exceeded the maximum number of instructions"),
		}
	}
}

impl Error for RuntimeError { }

// The compound error type returned by the core entry point:
#[derive(Debug, Clone, PartialEq)]
pub enum InterpreterError
{
	Syntax(SyntaxError),
	Runtime(RuntimeError),
}

impl From<SyntaxError> for InterpreterError
{
	fn from(err: SyntaxError) -> Self
	{
		InterpreterError::Syntax(err)
	}
}

impl From<RuntimeError> for InterpreterError
{
	fn from(err: RuntimeError) -> Self
	{
		InterpreterError::Runtime(err)
	}
}

impl fmt::Display for InterpreterError
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
	{
		match self
		{
			InterpreterError::Syntax(err) 	=> write!(f, "syntax error: {:}", err),
			InterpreterError::Runtime(err) => write!(f, "runtime error: {:}", err),
		}
	}
}

impl Error for InterpreterError { }
