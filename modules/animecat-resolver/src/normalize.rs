//! Title rewriting used to derive search variants.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Uppercase Roman numerals I–X as whole words. Alternation order is irrelevant
/// because the `\b` anchors force the match to span the whole word.
static ROMAN_NUMERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:I|II|III|IV|V|VI|VII|VIII|IX|X)\b").unwrap());

/// Dub/sub markers the listing site appends to titles.
const LANGUAGE_TAGS: &[&str] = &["(SUB ITA)", "(ITA)"];

fn roman_to_arabic(numeral: &str) -> &'static str {
    match numeral {
        "I" => "1",
        "II" => "2",
        "III" => "3",
        "IV" => "4",
        "V" => "5",
        "VI" => "6",
        "VII" => "7",
        "VIII" => "8",
        "IX" => "9",
        "X" => "10",
        _ => unreachable!("regex only matches I through X"),
    }
}

/// Rewrite whole-word Roman numerals I–X to Arabic digits and trim the result.
///
/// Matching is case-sensitive: "Lupin III" becomes "Lupin 3" while "CIVIL War"
/// and "Lupin iii" are left alone. `None` and empty input both yield `""`.
pub fn normalize_numerals<'a>(title: impl Into<Option<&'a str>>) -> String {
    let Some(title) = title.into() else {
        return String::new();
    };
    ROMAN_NUMERAL_RE
        .replace_all(title, |caps: &Captures| roman_to_arabic(&caps[0]))
        .trim()
        .to_string()
}

/// Remove the site's "(ITA)" / "(SUB ITA)" markers so they don't pollute searches.
pub fn strip_language_tags(title: &str) -> String {
    let mut cleaned = title.to_string();
    for tag in LANGUAGE_TAGS {
        cleaned = cleaned.replace(tag, "");
    }
    cleaned.trim().to_string()
}
