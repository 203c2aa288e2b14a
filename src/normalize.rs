use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::options::NormalizeMode;

/// Look-alike code points folded onto one representative, applied after NFKC.
pub const CHAR_REPLACEMENTS: &[(char, char)] = &[
    ('\u{2212}', '-'), // minus sign
    ('\u{2010}', '-'), // hyphen
    ('\u{2011}', '-'), // non-breaking hyphen
    ('\u{2012}', '-'), // figure dash
    ('\u{2013}', '-'), // en dash
    ('\u{2014}', '-'), // em dash
    ('\u{002D}', '-'),
    ('\u{2213}', '±'),
    ('\u{00B1}', '±'),
    ('\u{2044}', '/'), // fraction slash
    ('\u{2215}', '/'), // division slash
    ('\u{002F}', '/'),
    ('\u{2264}', '≤'),
    ('\u{2265}', '≥'),
    ('\u{003C}', '<'),
    ('\u{003E}', '>'),
    ('\u{FF0D}', '-'), // fullwidth hyphen-minus
];

/// Applied in order, after [`CHAR_REPLACEMENTS`].
pub const DIGRAPH_REPLACEMENTS: &[(&str, &str)] = &[(">=", "≥"), ("<=", "≤"), ("!=", "≠")];

/// Whitespace on either side of these is removed.
pub const SPACED_OPERATORS: &[char] = &[
    '=', '-', '+', '/', '*', '<', '>', '(', ')', ',', '≥', '≤', '≠',
];

static OPERATOR_SPACING: LazyLock<Regex> = LazyLock::new(|| {
    let class = SPACED_OPERATORS
        .iter()
        .map(|op| regex::escape(op.encode_utf8(&mut [0; 4])))
        .collect::<String>();
    Regex::new(&format!(r"\s*([{class}])\s*")).expect("hardcoded operator spacing regex is valid")
});

/// Canonicalize one text field for comparison.
///
/// `None` passes through, and a value that is empty after normalization
/// becomes `None` so blank and missing fields compare equal.
#[must_use]
pub fn normalize(text: Option<&str>, mode: NormalizeMode) -> Option<String> {
    let text = text?;
    let normalized = match mode {
        NormalizeMode::Canonical => canonicalize(text),
        NormalizeMode::StripWhitespace => strip_whitespace(text),
    };

    (!normalized.is_empty()).then_some(normalized)
}

/// Repeats [`canonical_pass`] until it stops changing the text.
///
/// Dropping spaces can join a fresh digraph (`"x > = 5"`) or put an operator
/// next to a combining mark that NFKC then composes (`"a < \u{338}b"`).
/// After the first pass the text never grows, so this terminates.
fn canonicalize(text: &str) -> String {
    let mut current = canonical_pass(text);
    loop {
        let next = canonical_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn canonical_pass(text: &str) -> String {
    // NFKC can expand a compatibility character into a leading space.
    let composed = text.trim().nfkc().collect::<String>();
    let folded = composed.trim().chars().map(fold_char).collect::<String>();
    collapse_operator_spacing(&replace_digraphs(&folded))
}

fn strip_whitespace(text: &str) -> String {
    text.trim().chars().filter(|ch| !ch.is_whitespace()).collect()
}

fn fold_char(ch: char) -> char {
    CHAR_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == ch)
        .map_or(ch, |(_, to)| *to)
}

fn replace_digraphs(text: &str) -> String {
    DIGRAPH_REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

fn collapse_operator_spacing(text: &str) -> String {
    OPERATOR_SPACING.replace_all(text, "$1").into_owned()
}
