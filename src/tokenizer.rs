//! Low-level slice-returning tokenizer primitives.
//!
//! No allocation beyond slice windows: every helper here returns `&str`
//! views into the caller's input. This is the hot-path layer spec §5
//! describes as "the hot path should operate on string slices."

use nom::bytes::complete::{tag, take_till, take_until};
use nom::character::complete::space0;
use nom::combinator::opt;
use nom::sequence::preceded;
use nom::IResult;

/// Advance `slice` past the first occurrence of `delimiter`, returning the
/// prefix before it. Errors if `delimiter` is absent — the caller decides
/// whether that's fatal ([`crate::error::ParseError::MalformedToken`]) or an
/// expected "no more delimiters" condition.
pub fn nom<'a>(slice: &mut &'a str, delimiter: char) -> Result<&'a str, &'static str> {
    match slice.find(delimiter) {
        Some(idx) => {
            let (head, rest) = slice.split_at(idx);
            *slice = &rest[delimiter.len_utf8()..];
            Ok(head)
        }
        None => Err("delimiter not found"),
    }
}

/// True if `slice` starts with any character in `charset`.
pub fn starts_with_any(slice: &str, charset: &str) -> bool {
    slice
        .chars()
        .next()
        .is_some_and(|c| charset.contains(c))
}

/// True if `slice` contains the byte `b`.
pub fn contains(slice: &str, b: u8) -> bool {
    slice.as_bytes().contains(&b)
}

/// The four syntactic pieces of one inbound line, as raw (still-escaped,
/// still-unclassified) slices. See spec §6's wire-protocol grammar.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RawLine<'a> {
    pub tags: Option<&'a str>,
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub params: Vec<&'a str>,
}

fn parse_tags_section(input: &str) -> IResult<&str, &str> {
    preceded(tag("@"), take_until(" "))(input)
}

fn parse_prefix_section(input: &str) -> IResult<&str, &str> {
    preceded(tag(":"), take_until(" "))(input)
}

fn parse_command_token(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == ' ' || c == '\r' || c == '\n')(input)
}

/// Split the trailing params section into positional params plus an
/// optional `:`-prefixed trailing param. Mirrors IRC's "everything after a
/// lone `:` is one argument" rule.
fn parse_params(mut input: &str) -> (&str, Vec<&str>) {
    let mut params = Vec::new();
    loop {
        input = input.trim_start_matches(' ');
        if input.is_empty() {
            break;
        }
        if let Some(rest) = input.strip_prefix(':') {
            let trailing = rest.trim_end_matches(['\r', '\n']);
            params.push(trailing);
            input = "";
            break;
        }
        match input.find(' ') {
            Some(idx) => {
                params.push(&input[..idx]);
                input = &input[idx..];
            }
            None => {
                params.push(input.trim_end_matches(['\r', '\n']));
                input = "";
                break;
            }
        }
    }
    (input, params)
}

/// Tokenize one complete inbound line (CRLF already trimmed or not — both
/// are tolerated) into its four syntactic pieces. This is the Tokenizer of
/// spec §4.3 composed with just enough structure-splitting to hand off to
/// the Prefix Parser and Typestring Parser; it does not interpret tag
/// escapes, prefix shape, or command identity.
pub fn tokenize(input: &str) -> Result<RawLine<'_>, &'static str> {
    let input = input.trim_end_matches(['\r', '\n']);
    if input.is_empty() {
        return Err("empty line");
    }

    let (input, tags) = opt(parse_tags_section)(input).map_err(|_: nom::Err<nom::error::Error<&str>>| "malformed tags")?;
    let (input, _) = space0::<_, nom::error::Error<&str>>(input).map_err(|_| "malformed tags")?;

    let (input, prefix) = opt(parse_prefix_section)(input).map_err(|_: nom::Err<nom::error::Error<&str>>| "malformed prefix")?;
    let (input, _) = space0::<_, nom::error::Error<&str>>(input).map_err(|_| "malformed prefix")?;

    let (input, command) = parse_command_token(input).map_err(|_: nom::Err<nom::error::Error<&str>>| "missing command")?;
    if command.is_empty() {
        return Err("missing command");
    }

    let (_, params) = parse_params(input);

    Ok(RawLine {
        tags,
        prefix,
        command,
        params,
    })
}
