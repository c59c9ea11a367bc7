// The tokenizer segments a sanitized S/T/L stream into instruction tokens
// across four families (stack, arithmetic, heap, I/O) plus flow control, and
// builds the label table that the executor later resolves jumps against.
//
// Every family dispatcher below mirrors the opcode table: the outer
// `preceded` strips the family's prefix, the inner `alt` picks the opcode by
// its discriminator symbols, and combinators that need an operand chain
// straight into the literal decoders in src/literal.rs.
use std::collections::{hash_map, HashMap};
use log::{debug, trace};
use nom::
{
	IResult,
	branch::alt,
	character::complete::char as one_char,
	combinator::{map, value},
	sequence::{pair, preceded},
};
use crate::error::SyntaxError;
use crate::literal::{integer_literal, label_literal};

// One fully-formed instruction. Call/Jump/JumpZero/JumpNeg carry their
// target label unresolved: a reference to an undefined label is a runtime
// error, not a syntax error, so resolution happens lazily against the label
// table at the moment control actually transfers.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction
{
	Push(i64),
	Copy(i64),
	Slide(i64),
	Dup,
	Swap,
	Discard,

	Add,
	Sub,
	Mul,
	Div,
	Mod,

	Store,
	Load,

	PrintChar,
	PrintInt,
	ReadChar,
	ReadInt,

	// A mark has no runtime effect; it only exists so the program counter
	// can fall through it as a no-op.
	Mark,
	Call(String),
	Jump(String),
	JumpZero(String),
	JumpNeg(String),
	Return,
	Halt,
}

// The result of tokenization: an immutable instruction sequence plus the
// label table built alongside it.
pub struct Program
{
	pub instructions: Vec<Instruction>,
	pub labels: HashMap<String, usize>,
}

// What a single parse step produced, before the tokenizer decides whether to
// also record a label table entry:
enum Parsed
{
	Mark(String),
	Plain(Instruction),
}

fn stack_instruction(i: &str) -> IResult<&str, Instruction>
{
	preceded(one_char(' '), alt
	((
		map(preceded(one_char(' '), integer_literal), Instruction::Push),
		map(preceded(pair(one_char('\t'), one_char(' ')), integer_literal), Instruction::Copy),
		map(preceded(pair(one_char('\t'), one_char('\t')), integer_literal), Instruction::Slide),
		value(Instruction::Dup, 		pair(one_char('\n'), one_char(' '))),
		value(Instruction::Swap, 		pair(one_char('\n'), one_char('\t'))),
		value(Instruction::Discard, 	pair(one_char('\n'), one_char('\n'))),
	)))(i)
}

fn arithmetic_instruction(i: &str) -> IResult<&str, Instruction>
{
	preceded(pair(one_char('\t'), one_char(' ')), alt
	((
		value(Instruction::Add, pair(one_char(' '), one_char(' '))),
		value(Instruction::Sub, pair(one_char(' '), one_char('\t'))),
		value(Instruction::Mul, pair(one_char(' '), one_char('\n'))),
		value(Instruction::Div, pair(one_char('\t'), one_char(' '))),
		value(Instruction::Mod, pair(one_char('\t'), one_char('\t'))),
	)))(i)
}

fn heap_instruction(i: &str) -> IResult<&str, Instruction>
{
	preceded(pair(one_char('\t'), one_char('\t')), alt
	((
		value(Instruction::Store, one_char(' ')),
		value(Instruction::Load, one_char('\t')),
	)))(i)
}

fn io_instruction(i: &str) -> IResult<&str, Instruction>
{
	preceded(pair(one_char('\t'), one_char('\n')), alt
	((
		value(Instruction::PrintChar, 	pair(one_char(' '), one_char(' '))),
		value(Instruction::PrintInt, 	pair(one_char(' '), one_char('\t'))),
		value(Instruction::ReadChar, 	pair(one_char('\t'), one_char(' '))),
		value(Instruction::ReadInt, 	pair(one_char('\t'), one_char('\t'))),
	)))(i)
}

fn flow_instruction(i: &str) -> IResult<&str, Parsed>
{
	preceded(one_char('\n'), alt
	((
		map(preceded(pair(one_char(' '), one_char(' ')), label_literal), Parsed::Mark),
		map(preceded(pair(one_char(' '), one_char('\t')), label_literal), |l| Parsed::Plain(Instruction::Call(l))),
		map(preceded(pair(one_char(' '), one_char('\n')), label_literal), |l| Parsed::Plain(Instruction::Jump(l))),
		map(preceded(pair(one_char('\t'), one_char(' ')), label_literal), |l| Parsed::Plain(Instruction::JumpZero(l))),
		map(preceded(pair(one_char('\t'), one_char('\t')), label_literal), |l| Parsed::Plain(Instruction::JumpNeg(l))),
		value(Parsed::Plain(Instruction::Return), pair(one_char('\t'), one_char('\n'))),
		value(Parsed::Plain(Instruction::Halt), 	pair(one_char('\n'), one_char('\n'))),
	)))(i)
}

fn parse_one(i: &str) -> IResult<&str, Parsed>
{
	alt
	((
		map(stack_instruction, Parsed::Plain),
		map(arithmetic_instruction, Parsed::Plain),
		map(heap_instruction, Parsed::Plain),
		map(io_instruction, Parsed::Plain),
		flow_instruction,
	))(i)
}

// Segment the sanitized stream into a token sequence, resolving mark
// instructions into a label table as they are encountered.
pub fn tokenize(sanitized: &str) -> Result<Program, SyntaxError>
{
	let mut rest = sanitized;
	let mut instructions = Vec::new();
	let mut labels = HashMap::new();

	while !rest.is_empty()
	{
		let position = sanitized.len() - rest.len();

		let (next_rest, parsed) = parse_one(rest).map_err(|_| SyntaxError::MalformedToken { position })?;

		match parsed
		{
			Parsed::Mark(label) =>
			{
				trace!("token[{:}] @ offset {:} = Mark({:?})", instructions.len(), position, label);
				instructions.push(Instruction::Mark);

				match labels.entry(label.clone())
				{
					hash_map::Entry::Occupied(_) 	=> return Err(SyntaxError::DuplicateLabel { label, position }),
					hash_map::Entry::Vacant(entry) =>
					{
						let target = instructions.len();
						debug!("label {:?} -> token[{:}]", label, target);
						entry.insert(target);
					},
				}
			},

			Parsed::Plain(instruction) =>
			{
				trace!("token[{:}] @ offset {:} = {:?}", instructions.len(), position, instruction);
				instructions.push(instruction);
			},
		}

		rest = next_rest;
	}

	debug!("tokenized {:} instructions, {:} labels", instructions.len(), labels.len());

	Ok(Program { instructions, labels })
}
