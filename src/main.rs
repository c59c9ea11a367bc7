use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::process;

use clap::{arg, Arg, Command};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

fn main()
{
	let matches = Command::new("wsim")
		.about("An interpreter for the Whitespace esoteric programming language")
		.version("0.1.0")
		.arg(Arg::new("file").required(true).help("path to a Whitespace source file"))
		.arg(arg!(--verbose "show tokenizer and executor trace output"))
		.arg(Arg::new("input").long("input").takes_value(true)
			.help("program input, with \\n standing for a literal newline"))
		.arg(Arg::new("max-steps").long("max-steps").takes_value(true)
			.help("abort after this many instructions instead of running forever"))
		.get_matches();

	if matches.is_present("verbose")
	{
		init_logging(LevelFilter::Trace);
	}

	let filename = matches.get_one::<String>("file").unwrap();

	let max_steps = matches.get_one::<String>("max-steps").map(|s| s.parse::<u64>()).transpose();
	let max_steps = match max_steps
	{
		Ok(n) => n,
		Err(_) =>
		{
			eprintln!("wsim: --max-steps expects a non-negative integer");
			process::exit(1);
		},
	};

	if let Err(err) = run(filename, matches.get_one::<String>("input"), max_steps)
	{
		eprintln!("wsim: {}", err);
		process::exit(1);
	}
}

fn run(filename: &str, input_arg: Option<&String>, max_steps: Option<u64>) -> Result<(), Box<dyn Error>>
{
	let source = fs::read_to_string(filename)?;

	let input = match input_arg
	{
		Some(raw) => raw.replace("\\n", "\n"),
		None => prompt_for_input()?,
	};

	let output = match max_steps
	{
		Some(limit) => run_bounded(&source, &input, limit)?,
		None => wsim::run(&source, &input)?,
	};

	print!("{}", output);
	io::stdout().flush()?;
	Ok(())
}

// `--max-steps` is a host-side concern the core library deliberately keeps
// out of its pure `(program, input) -> output` entry point (see wsim::run's
// doc comment), so this wrapper drives wsim::exec::Executor's step loop
// directly instead of threading a limit through the library.
fn run_bounded(source: &str, input: &str, limit: u64) -> Result<String, wsim::error::InterpreterError>
{
	let sanitized = wsim::sanitize::sanitize(source);
	let program = wsim::token::tokenize(&sanitized)?;
	let mut executor = wsim::exec::Executor::new(&program, input);

	for _ in 0..limit
	{
		if executor.step()?
		{
			return Ok(executor.output().to_string());
		}
	}

	Err(wsim::error::RuntimeError::StepLimitExceeded.into())
}

// Mirrors the reference interpreter's interactive prompt: a single line of
// input, with the two-character sequence "\n" standing in for a literal
// newline, since a real newline can't be typed into a single readline call.
fn prompt_for_input() -> Result<String, io::Error>
{
	print!("Enter all program input, using \\n for newlines: ");
	io::stdout().flush()?;

	let mut line = String::new();
	io::stdin().read_line(&mut line)?;

	Ok(line.trim_end_matches('\n').replace("\\n", "\n"))
}

fn init_logging(level: LevelFilter)
{
	let encoder = PatternEncoder::new("[{l}] {m}{n}");

	let stdout = ConsoleAppender::builder().encoder(Box::new(encoder)).build();

	let config = Config::builder()
		.appender(Appender::builder().build("stdout", Box::new(stdout)))
		.build(Root::builder().appender("stdout").build(level))
		.unwrap();

	let _handle = log4rs::init_config(config).unwrap();
}
