mod error;
mod grammar;

use regex::{Regex, RegexBuilder};

pub use error::PatternError;

/// Compile a `/pattern/flags` literal.
///
/// Flags `i`, `m` and `s` map onto the matching regex options, `y` anchors
/// the match at the start of the subject, and `d`, `g` and `u` are accepted
/// without effect on a single test. Any other or repeated flag is an error.
///
/// # Errors
///
/// Returns [`PatternError`] if the input is not a literal, carries a bad
/// flag, or its body is not a valid regex.
pub fn compile(literal: &str) -> Result<Regex, PatternError> {
    use winnow::Parser;
    let parsed = grammar::regex_literal
        .parse(literal)
        .map_err(|_| PatternError::NotALiteral(literal.to_owned()))?;

    let mut seen = String::with_capacity(parsed.flags.len());
    for flag in parsed.flags.chars() {
        if !"dgimsuy".contains(flag) {
            return Err(PatternError::UnsupportedFlag(flag));
        }
        if seen.contains(flag) {
            return Err(PatternError::DuplicateFlag(flag));
        }
        seen.push(flag);
    }

    let source = if seen.contains('y') {
        format!(r"\A(?:{})", parsed.body)
    } else {
        parsed.body.to_owned()
    };

    let regex = RegexBuilder::new(&source)
        .case_insensitive(seen.contains('i'))
        .multi_line(seen.contains('m'))
        .dot_matches_new_line(seen.contains('s'))
        .build()?;
    Ok(regex)
}
