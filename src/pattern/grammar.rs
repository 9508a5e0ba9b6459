use winnow::combinator::{delimited, eof, peek, preceded, repeat_till};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{none_of, take_while};

const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// A `/body/flags` literal split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RegexLiteral<'i> {
    pub(crate) body: &'i str,
    pub(crate) flags: &'i str,
}

// The closing slash is the last one in the input: only there can the
// lowercase flag run reach end of input.
fn flags_to_end<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited('/', take_while(0.., 'a'..='z'), eof).parse_next(input)
}

fn body<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    repeat_till(0.., none_of(LINE_TERMINATORS), peek(flags_to_end))
        .map(|((), _): ((), &str)| ())
        .take()
        .parse_next(input)
}

pub(crate) fn regex_literal<'i>(input: &mut &'i str) -> ModalResult<RegexLiteral<'i>> {
    preceded('/', (body, flags_to_end))
        .map(|(body, flags)| RegexLiteral { body, flags })
        .parse_next(input)
}
