/*!
  The human readable textual form of bytecode is called assembly. Each line holds one
  instruction: a mnemonic followed by its arguments, separated by any whitespace. There are no
  labels, comments or directives. This module only splits lines into tokens; resolving the
  mnemonic and parsing the arguments is the emitter's job.
*/

use log::trace;
use nom::{
  bytes::complete::{take_till1, take_while, take_while1},
  combinator::all_consuming,
  multi::many0,
  sequence::{delimited, pair, preceded},
  IResult,
};

/// One tokenized source line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssemblyUnit<'a> {
  /// 1-based line number in the source text.
  pub line: usize,
  pub mnemonic: &'a str,
  pub args: Vec<&'a str>,
}

fn token(text: &str) -> IResult<&str, &str> {
  take_till1(char::is_whitespace)(text)
}

fn unit_tokens(text: &str) -> IResult<&str, (&str, Vec<&str>)> {
  all_consuming(delimited(
    take_while(char::is_whitespace),
    pair(token, many0(preceded(take_while1(char::is_whitespace), token))),
    take_while(char::is_whitespace),
  ))(text)
}

/**
  Tokenizes a single line. Returns `None` for a blank line, which is the only input without a
  first token.
*/
pub fn parse_line(line: usize, text: &str) -> Option<AssemblyUnit<'_>> {
  let (_rest, (mnemonic, args)) = unit_tokens(text).ok()?;
  trace!("line {}: {} {:?}", line, mnemonic, args);
  Some(AssemblyUnit { line, mnemonic, args })
}

/// Lazily tokenizes every non-blank line of `text`, in order.
pub fn parse_assembly(text: &str) -> impl Iterator<Item = AssemblyUnit<'_>> {
  text
    .lines()
    .enumerate()
    .filter_map(|(index, line)| parse_line(index + 1, line))
}
