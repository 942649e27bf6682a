//! Decoding of the run-parameter tuple embedded in benchmark names.
//!
//! Google Benchmark names templated runs after their template arguments, so a
//! result entry looks like `run_fft<65536,1>` or `run_1d_fft<1 << 8>`. The
//! content of the first `<...>` group is read with a fixed grammar:
//!
//! ```text
//! tuple := [ "(" ] term { "," term } [ "," ] [ ")" ]
//! term  := uint [ "<<" uint ]
//! ```
//!
//! Nothing else (signs, other operators, names) is accepted.
//!
//! ```rust
//! use fftcmp_core::params::decode_run_params;
//! use fftcmp_core::types::{ParamArity, RunParams};
//! let p = decode_run_params("run_fft<65536,1>", ParamArity::SizeAndDimension).unwrap();
//! assert_eq!(p, RunParams::new(65536, 1));
//! let p = decode_run_params("run_1d_fft<1 << 8>", ParamArity::SizeOnly).unwrap();
//! assert_eq!(p, RunParams::new(256, 1));
//! ```

use thiserror::Error;

use crate::types::{ParamArity, RunParams};

/// Upper bound on the bracketed content, in bytes.
pub const MAX_TUPLE_LEN: usize = 256;

/// Why a benchmark name did not decode. Offsets are byte offsets into the
/// bracketed content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
	/// No `<...>` group in the name.
	#[error("no <...> parameter tuple in name")]
	MissingBrackets,
	/// Content longer than [`MAX_TUPLE_LEN`].
	#[error("parameter tuple too long ({0} bytes)")]
	TooLong(usize),
	/// Well-formed tuple with the wrong number of terms.
	#[error("expected {expected} value(s), found {found}")]
	Arity {
		/// Terms required by the arity.
		expected: usize,
		/// Terms present.
		found: usize,
	},
	/// A character outside the grammar.
	#[error("unexpected {found:?} at offset {offset}")]
	Unexpected {
		/// Position of `found`.
		offset: usize,
		/// The offending character.
		found: char,
	},
	/// The content stops inside a term or before `)`.
	#[error("unexpected end of parameter tuple")]
	UnexpectedEnd,
	/// A number, shift or dimension that does not fit its type.
	#[error("value out of range at offset {offset}")]
	Overflow {
		/// Start of the term.
		offset: usize,
	},
}

/// Content of the first `<...>` group of `name`, with surplus angle brackets
/// trimmed from both ends.
pub fn extract_bracketed(name: &str) -> Option<&str> {
	let start = name.find('<')?;
	let len = name[start + 1..].find('>')?;
	let group = &name[start..start + len + 2];
	Some(group.trim_matches(|c| c == '<' || c == '>'))
}

/// Parse the bracketed content according to `arity`.
pub fn parse_params(content: &str, arity: ParamArity) -> Result<RunParams, ParamError> {
	if content.len() > MAX_TUPLE_LEN {
		return Err(ParamError::TooLong(content.len()));
	}
	let mut cur = Cursor::new(content);
	let parenthesized = cur.eat("(");
	let mut terms: Vec<(usize, u64)> = Vec::with_capacity(arity.terms());
	loop {
		terms.push(cur.term()?);
		if !cur.eat(",") {
			break;
		}
		cur.skip_ws();
		// trailing comma, as in `(1024,)`
		if matches!(cur.peek(), None | Some(')')) {
			break;
		}
	}
	if parenthesized && !cur.eat(")") {
		return Err(cur.unexpected());
	}
	cur.skip_ws();
	if cur.peek().is_some() {
		return Err(cur.unexpected());
	}

	match (arity, terms.as_slice()) {
		(ParamArity::SizeOnly, [(_, size)]) => Ok(RunParams::new(*size, 1)),
		(ParamArity::SizeAndDimension, [(_, size), (offset, dim)]) => {
			let dimension = u32::try_from(*dim).map_err(|_| ParamError::Overflow { offset: *offset })?;
			Ok(RunParams::new(*size, dimension))
		}
		_ => Err(ParamError::Arity { expected: arity.terms(), found: terms.len() }),
	}
}

/// Locate and parse the run parameters of a benchmark name.
pub fn decode_run_params(name: &str, arity: ParamArity) -> Result<RunParams, ParamError> {
	let content = extract_bracketed(name).ok_or(ParamError::MissingBrackets)?;
	parse_params(content, arity)
}

struct Cursor<'a> {
	src: &'a str,
	pos: usize,
}

impl<'a> Cursor<'a> {
	fn new(src: &'a str) -> Self { Self { src, pos: 0 } }

	fn rest(&self) -> &'a str { &self.src[self.pos..] }

	fn peek(&self) -> Option<char> { self.rest().chars().next() }

	fn skip_ws(&mut self) {
		let trimmed = self.rest().trim_start();
		self.pos = self.src.len() - trimmed.len();
	}

	fn eat(&mut self, token: &str) -> bool {
		self.skip_ws();
		if self.rest().starts_with(token) {
			self.pos += token.len();
			true
		} else {
			false
		}
	}

	fn unexpected(&self) -> ParamError {
		match self.peek() {
			Some(found) => ParamError::Unexpected { offset: self.pos, found },
			None => ParamError::UnexpectedEnd,
		}
	}

	fn uint(&mut self) -> Result<(usize, u64), ParamError> {
		self.skip_ws();
		let start = self.pos;
		let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
		if digits == 0 {
			return Err(self.unexpected());
		}
		self.pos += digits;
		let value = self.src[start..self.pos].parse::<u64>().map_err(|_| ParamError::Overflow { offset: start })?;
		Ok((start, value))
	}

	fn term(&mut self) -> Result<(usize, u64), ParamError> {
		let (start, base) = self.uint()?;
		if !self.eat("<<") {
			return Ok((start, base));
		}
		let (_, shift) = self.uint()?;
		let shifted = u32::try_from(shift)
			.ok()
			.and_then(|s| base.checked_shl(s).filter(|v| v >> s == base))
			.ok_or(ParamError::Overflow { offset: start })?;
		Ok((start, shifted))
	}
}
