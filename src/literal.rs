// Literal decoders consume symbols from a position in the sanitized S/T/L
// stream. Both are used by the tokenizer (src/token.rs) to pull the
// immediate operand off an instruction once its family/opcode prefix has
// been recognized.
use nom::
{
	IResult,
	character::complete::{char as one_char, one_of},
	bytes::complete::take_while,
};

// A signed, arbitrary-length binary literal: one sign symbol (S = "+",
// T = "-"), then zero or more magnitude bits (S = 0, T = 1) most-significant
// bit first, terminated by L. The empty magnitude denotes zero.
//
// Magnitudes are folded into a native i64 rather than an arbitrary-precision
// type (see DESIGN.md's "Arbitrary-precision integers" entry): literals
// longer than 64 bits wrap instead of growing. Documented, deliberate capping.
pub fn integer_literal(i: &str) -> IResult<&str, i64>
{
	let (i, sign) = one_of(" \t")(i)?;
	let (i, bits) = take_while(|c| c == ' ' || c == '\t')(i)?;
	let (i, _) = one_char('\n')(i)?;

	let magnitude = bits.chars().fold(0i64, |acc, c| acc.wrapping_shl(1) | (c == '\t') as i64);
	let value = if sign == '\t' { magnitude.wrapping_neg() } else { magnitude };

	Ok((i, value))
}

// A label literal: any run of S/T symbols (including none), terminated by L.
// Labels are compared by exact symbol-sequence equality, so two labels of
// different lengths are always distinct even if one is a prefix of the other.
pub fn label_literal(i: &str) -> IResult<&str, String>
{
	let (i, bits) = take_while(|c| c == ' ' || c == '\t')(i)?;
	let (i, _) = one_char('\n')(i)?;

	Ok((i, bits.to_string()))
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn decodes_positive_zero_from_empty_magnitude()
	{
		let (rest, n) = integer_literal(" \n").unwrap();
		assert_eq!(n, 0);
		assert_eq!(rest, "");
	}

	#[test]
	fn decodes_negative_zero_as_numerically_zero()
	{
		let (_, n) = integer_literal("\t\n").unwrap();
		assert_eq!(n, 0);
	}

	#[test]
	fn decodes_positive_magnitude_msb_first()
	{
		// sign S, bits "1001001" (S=0, T=1) == 73
		let (_, n) = integer_literal(" \t  \t  \t\n").unwrap();
		assert_eq!(n, 73);
	}

	#[test]
	fn decodes_negative_magnitude()
	{
		// sign T, bits "11" == 3, so -3
		let (_, n) = integer_literal("\t\t\t\n").unwrap();
		assert_eq!(n, -3);
	}

	#[test]
	fn rejects_literal_starting_with_terminator()
	{
		assert!(integer_literal("\n").is_err());
	}

	#[test]
	fn rejects_unterminated_literal()
	{
		assert!(integer_literal(" \t\t").is_err());
	}

	#[test]
	fn decodes_empty_label()
	{
		let (rest, label) = label_literal("\nrest").unwrap();
		assert_eq!(label, "");
		assert_eq!(rest, "rest");
	}

	#[test]
	fn decodes_label_with_mixed_symbols()
	{
		let (_, label) = label_literal(" \t \t\n").unwrap();
		assert_eq!(label, " \t \t");
	}

	#[test]
	fn distinguishes_labels_by_exact_length()
	{
		let (_, short) = label_literal(" \n").unwrap();
		let (_, long) = label_literal("  \n").unwrap();
		assert_ne!(short, long);
	}
}
