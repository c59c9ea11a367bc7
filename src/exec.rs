// The executor walks a tokenized Program instruction by instruction against
// a value stack, a sparse heap and a call stack, accumulating program output
// as it goes. Label targets are resolved lazily here rather than up front:
// an instruction that names a label nobody ever defined only fails once
// control actually tries to reach it.
use std::collections::HashMap;
use std::convert::TryFrom;

use log::{debug, trace};

use crate::error::RuntimeError;
use crate::token::{Instruction, Program};

// Walks `input` one character at a time, tracking enough position to decode
// the multi-base integer grammar that ReadInt accepts: an optional "0x"/"0X"
// (hex), "0b"/"0B" (binary) or bare leading "0" (octal) prefix, defaulting to
// decimal, with the digits running up to (and consuming) the next '\n'.
struct InputCursor
{
	chars: Vec<char>,
	pos: usize,
}

impl InputCursor
{
	fn new(input: &str) -> Self
	{
		InputCursor { chars: input.chars().collect(), pos: 0 }
	}

	fn peek(&self) -> Option<char>
	{
		self.chars.get(self.pos).copied()
	}

	fn peek_nth(&self, n: usize) -> Option<char>
	{
		self.chars.get(self.pos + n).copied()
	}

	fn read_char(&mut self) -> Result<char, RuntimeError>
	{
		let c = self.peek().ok_or(RuntimeError::InputExhausted)?;
		self.pos += 1;
		Ok(c)
	}

	// Consumes a (base-prefix, digits, terminating '\n') sequence and parses
	// the digits in the base the prefix selected.
	fn read_integer(&mut self) -> Result<i64, RuntimeError>
	{
		let base = if self.peek() == Some('0')
		{
			match self.peek_nth(1)
			{
				Some('x') | Some('X') => { self.pos += 2; 16 },
				Some('b') | Some('B') => { self.pos += 2; 2 },
				_ 					  => { self.pos += 1; 8 },
			}
		}
		else
		{
			10
		};

		let start = self.pos;

		while self.peek().map_or(false, |c| c != '\n')
		{
			self.pos += 1;
		}

		if self.peek() != Some('\n')
		{
			return Err(RuntimeError::InputExhausted);
		}

		let digits: String = self.chars[start..self.pos].iter().collect();
		self.pos += 1; // consume the '\n' terminator

		i64::from_str_radix(&digits, base).map_err(|_| RuntimeError::InputMalformed)
	}
}

// A stack machine bound to one tokenized Program, stepped one instruction at
// a time. `run` below drives it to completion unconditionally; a caller that
// wants to bound how long a program may run (spec.md §5's host-side
// instruction-count guard) drives `step` itself instead, since that bound is
// not part of the core contract and has no business living in `run`'s
// signature.
pub struct Executor<'p>
{
	program: &'p Program,
	stack: Vec<i64>,
	heap: HashMap<i64, i64>,
	call_stack: Vec<usize>,
	output: String,
	cursor: InputCursor,
	pc: usize,
}

impl<'p> Executor<'p>
{
	pub fn new(program: &'p Program, input: &str) -> Self
	{
		Executor
		{
			program,
			stack: Vec::new(),
			heap: HashMap::new(),
			call_stack: Vec::new(),
			output: String::new(),
			cursor: InputCursor::new(input),
			pc: 0,
		}
	}

	pub fn output(&self) -> &str
	{
		&self.output
	}

	// Dispatches exactly one token. Returns `Ok(true)` once Halt has run (the
	// caller should stop stepping and take `output()`), `Ok(false)` if the
	// program is to keep running.
	pub fn step(&mut self) -> Result<bool, RuntimeError>
	{
		let pc = self.pc;

		let instruction = self.program.instructions.get(pc).ok_or(RuntimeError::UnterminatedProgram(pc))?;

		trace!("pc={:} op={:?} stack={:?}", pc, instruction, self.stack);

		let pop = |stack: &mut Vec<i64>| stack.pop().ok_or(RuntimeError::StackUnderflow);

		let mut next_pc = pc + 1;

		match instruction
		{
			Instruction::Push(n) => self.stack.push(*n),

			Instruction::Copy(n) =>
			{
				if *n < 0
				{
					return Err(RuntimeError::InvalidIndex(*n));
				}

				let index = self.stack.len().checked_sub((*n as usize).saturating_add(1)).ok_or(RuntimeError::StackUnderflow)?;
				self.stack.push(self.stack[index]);
			},

			Instruction::Slide(n) =>
			{
				let top = pop(&mut self.stack)?;
				let keep = if *n < 0 || *n as usize >= self.stack.len() { self.stack.len() } else { *n as usize };
				let new_len = self.stack.len() - keep;
				self.stack.truncate(new_len);
				self.stack.push(top);
			},

			Instruction::Dup =>
			{
				let top = *self.stack.last().ok_or(RuntimeError::StackUnderflow)?;
				self.stack.push(top);
			},

			Instruction::Swap =>
			{
				let len = self.stack.len();
				if len < 2 { return Err(RuntimeError::StackUnderflow); }
				self.stack.swap(len - 1, len - 2);
			},

			Instruction::Discard => { pop(&mut self.stack)?; },

			Instruction::Add =>
			{
				let rhs = pop(&mut self.stack)?;
				let lhs = pop(&mut self.stack)?;
				self.stack.push(lhs.wrapping_add(rhs));
			},

			Instruction::Sub =>
			{
				let rhs = pop(&mut self.stack)?;
				let lhs = pop(&mut self.stack)?;
				self.stack.push(lhs.wrapping_sub(rhs));
			},

			Instruction::Mul =>
			{
				let rhs = pop(&mut self.stack)?;
				let lhs = pop(&mut self.stack)?;
				self.stack.push(lhs.wrapping_mul(rhs));
			},

			Instruction::Div =>
			{
				let rhs = pop(&mut self.stack)?;
				let lhs = pop(&mut self.stack)?;
				if rhs == 0 { return Err(RuntimeError::DivideByZero); }
				self.stack.push(floor_div(lhs, rhs));
			},

			Instruction::Mod =>
			{
				let rhs = pop(&mut self.stack)?;
				let lhs = pop(&mut self.stack)?;
				if rhs == 0 { return Err(RuntimeError::DivideByZero); }
				self.stack.push(floor_mod(lhs, rhs));
			},

			Instruction::Store =>
			{
				let value = pop(&mut self.stack)?;
				let addr = pop(&mut self.stack)?;
				self.heap.insert(addr, value);
			},

			Instruction::Load =>
			{
				let addr = pop(&mut self.stack)?;
				let value = *self.heap.get(&addr).ok_or(RuntimeError::HeapMiss(addr))?;
				self.stack.push(value);
			},

			Instruction::PrintChar =>
			{
				let n = pop(&mut self.stack)?;
				let c = u32::try_from(n).ok().and_then(char::from_u32).ok_or(RuntimeError::InvalidCodepoint(n))?;
				self.output.push(c);
			},

			Instruction::PrintInt =>
			{
				let n = pop(&mut self.stack)?;
				self.output.push_str(&n.to_string());
			},

			Instruction::ReadChar =>
			{
				let addr = pop(&mut self.stack)?;
				let c = self.cursor.read_char()?;
				self.heap.insert(addr, c as i64);
			},

			Instruction::ReadInt =>
			{
				let addr = pop(&mut self.stack)?;
				let n = self.cursor.read_integer()?;
				self.heap.insert(addr, n);
			},

			Instruction::Mark => { },

			Instruction::Call(label) =>
			{
				let target = *self.program.labels.get(label).ok_or_else(|| RuntimeError::UndefinedLabel(label.clone()))?;
				self.call_stack.push(next_pc);
				next_pc = target;
			},

			Instruction::Jump(label) =>
			{
				next_pc = *self.program.labels.get(label).ok_or_else(|| RuntimeError::UndefinedLabel(label.clone()))?;
			},

			Instruction::JumpZero(label) =>
			{
				let n = pop(&mut self.stack)?;
				if n == 0
				{
					next_pc = *self.program.labels.get(label).ok_or_else(|| RuntimeError::UndefinedLabel(label.clone()))?;
				}
			},

			Instruction::JumpNeg(label) =>
			{
				let n = pop(&mut self.stack)?;
				if n < 0
				{
					next_pc = *self.program.labels.get(label).ok_or_else(|| RuntimeError::UndefinedLabel(label.clone()))?;
				}
			},

			Instruction::Return =>
			{
				next_pc = self.call_stack.pop().ok_or(RuntimeError::EmptyCallStack)?;
			},

			Instruction::Halt =>
			{
				debug!("halted at pc={:}", pc);
				return Ok(true);
			},
		}

		self.pc = next_pc;
		Ok(false)
	}
}

// Runs a tokenized program to completion against the given input, returning
// everything PrintChar/PrintInt ever wrote. Unbounded: a program that never
// reaches Halt runs forever, which matches spec.md §1/§5 — any instruction
// budget is a host-side concern layered on top of `Executor::step`, not a
// parameter of this pure entry point.
pub fn run(program: &Program, input: &str) -> Result<String, RuntimeError>
{
	let mut executor = Executor::new(program, input);

	loop
	{
		if executor.step()?
		{
			return Ok(executor.output().to_string());
		}
	}
}

// Rust's `/` and `%` panic on overflow (lhs == i64::MIN, rhs == -1) as well as
// on truncating toward zero instead of flooring; `wrapping_div`/`wrapping_rem`
// saturate that overflow case the same way Add/Sub/Mul already wrap instead
// of panicking, matching the documented i64-capping behavior for oversized
// literals (see DESIGN.md's "Arbitrary-precision integers" entry).
fn floor_div(lhs: i64, rhs: i64) -> i64
{
	let q = lhs.wrapping_div(rhs);
	let r = lhs.wrapping_rem(rhs);
	if (r != 0) && ((r < 0) != (rhs < 0)) { q.wrapping_sub(1) } else { q }
}

fn floor_mod(lhs: i64, rhs: i64) -> i64
{
	let r = lhs.wrapping_rem(rhs);
	if (r != 0) && ((r < 0) != (rhs < 0)) { r.wrapping_add(rhs) } else { r }
}
