use wsim::error::{InterpreterError, RuntimeError};

// Lets these tests read like the worked examples they come from: "S S S T L"
// instead of an opaque Rust string literal.
fn sym(spec: &str) -> String
{
	spec.chars().filter_map(|c| match c
	{
		'S' => Some(' '),
		'T' => Some('\t'),
		'L' => Some('\n'),
		_ 	=> None,
	}).collect()
}

#[test]
fn push_and_print_number()
{
	let source = sym("S S S T L   T L S T   L L L");
	assert_eq!(wsim::run(&source, "").unwrap(), "1");
}

#[test]
fn push_and_print_character()
{
	let source = sym("S S S T S S T S S T L   T L S S   L L L");
	assert_eq!(wsim::run(&source, "").unwrap(), "I");
}

#[test]
fn addition()
{
	// push 2, push 3, add, write integer, halt
	let source = sym("S S S T S L   S S S T T L   T S S S   T L S T   L L L");
	assert_eq!(wsim::run(&source, "").unwrap(), "5");
}

#[test]
fn subtraction_preserves_operand_order()
{
	// push 7, push 3, subtract, write integer, halt -> 4, not -4
	let source = sym("S S S T T T L   S S S T T L   T S S T   T L S T   L L L");
	assert_eq!(wsim::run(&source, "").unwrap(), "4");
}

#[test]
fn loop_with_jump_if_zero_counts_down()
{
	// push 3
	// LOOP:  dup; jump-if-zero END; dup; print-int; push 1; sub; jump LOOP
	// END:   discard; halt
	let source = sym(concat!(
		"S S S T T L   ",
		"L S S L   ",         // mark LOOP
		"S L S   ",           // dup
		"L T S S L   ",       // jumpzero END
		"S L S   ",           // dup
		"T L S T   ",         // print int
		"S S S T L   ",       // push 1
		"T S S T   ",         // sub
		"L S L L   ",         // jump LOOP
		"L S S S L   ",       // mark END
		"S L L   ",           // discard
		"L L L",              // halt
	));
	assert_eq!(wsim::run(&source, "").unwrap(), "321");
}

#[test]
fn read_integer_store_load_print_accepts_every_base_prefix()
{
	// push 0 (addr), read int into heap[0], push 0 (addr), load, print, halt
	let source = sym(concat!(
		"S S S L   ",
		"T L T T   ",
		"S S S L   ",
		"T T T   ",
		"T L S T   ",
		"L L L",
	));

	for literal in ["42\n", "0x2A\n", "052\n", "0b101010\n"]
	{
		assert_eq!(wsim::run(&source, literal).unwrap(), "42");
	}
}

#[test]
fn jump_to_a_never_marked_label_is_an_undefined_label_error()
{
	let source = sym("L S L S L");
	let err = wsim::run(&source, "").unwrap_err();
	assert_eq!(err, InterpreterError::Runtime(RuntimeError::UndefinedLabel(" ".to_string())));
}

#[test]
fn comments_interleaved_anywhere_do_not_change_output()
{
	let clean = "This program ignores everything but space, tab and newline.\n".to_string()
		+ &sym("S S S T L   T L S T   L L L");

	assert_eq!(wsim::run(&clean, "").unwrap(), "1");
}

#[test]
fn a_label_defined_twice_is_a_syntax_error_not_a_runtime_one()
{
	// two marks both defining the empty label
	let source = sym("L S S L   L S S L   L L L");
	let err = wsim::run(&source, "").unwrap_err();
	assert!(matches!(err, InterpreterError::Syntax(_)));
}

#[test]
fn call_and_return_resume_after_the_call_site()
{
	// call SUB; print-int (sees the value SUB pushed); halt
	// SUB: push 9; return
	let source = sym(concat!(
		"L S T T L   ",  // call SUB (label "T")
		"T L S T   ",    // print int
		"L L L   ",      // halt
		"L S S T L   ",  // mark SUB (label "T")
		"S S S T S S T L ", // push 9
		"L T L",         // return
	));
	assert_eq!(wsim::run(&source, "").unwrap(), "9");
}
