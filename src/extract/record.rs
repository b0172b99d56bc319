/*! Record fragment parsing.

Records are located and parsed by pattern matching over a fixed Dublin Core tag vocabulary,
not by an XML parser: fragments that are malformed or truncated are simply skipped.

A fragment yields a [ParsedRecord] when it has
- a `<dc:date>` element,
- a 4-digit run in that date (the year),
- a `<setSpec>` element.

Every other field is optional and collects all its occurrences, in order.
!*/
use std::fmt;

use lazy_static::lazy_static;
use quick_xml::escape::resolve_html5_entity;
use regex::{Captures, Regex};

use crate::types::{Article, Fields};

/// Repeated Dublin Core elements, in [Fields] order (`date` excepted).
const REPEATED_TAGS: [&str; 9] = [
    "identifier",
    "creator",
    "publisher",
    "title",
    "description",
    "source",
    "relation",
    "language",
    "rights",
];

lazy_static! {
    static ref RECORD: Regex = Regex::new(r"(?s)<record.+?</record>").unwrap();
    static ref DATE: Regex = Regex::new(r"<dc:date>(.+?)</dc:date>").unwrap();
    static ref YEAR: Regex = Regex::new(r"\d{4}").unwrap();
    static ref SETSPEC: Regex = Regex::new(r"<setSpec>(.+?)</setSpec>").unwrap();
    // open tags may carry attributes
    static ref REPEATED: Vec<Regex> = REPEATED_TAGS
        .iter()
        .map(|tag| Regex::new(&format!(r"<dc:{tag}.*?>(.+?)</dc:{tag}>")).unwrap())
        .collect();
    // numeric references, or names of up to 32 characters, the `;` being optional
    static ref ENTITY: Regex =
        Regex::new(r"&(#[0-9]+;?|#[xX][0-9a-fA-F]+;?|[^\t\n\x0C <&#;]{1,32};?)").unwrap();
}

/// Entities that HTML parsers resolve without a trailing `;`.
const LEGACY_ENTITIES: [&str; 106] = [
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren", "deg",
    "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34", "gt",
    "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml", "yacute",
    "yen", "yuml",
];

/// An article along with its partition keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub year: String,
    pub setspec: String,
    pub article: Article,
}

/// Reason a fragment did not produce a [ParsedRecord].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoDate,
    NoYear,
    NoSetSpec,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::NoDate => "no date",
            Rejection::NoYear => "no year in date",
            Rejection::NoSetSpec => "no setSpec",
        };
        f.write_str(reason)
    }
}

/// Non-overlapping record fragments of a line, from the first `<record` to the next `</record>`.
pub fn fragments(line: &str) -> impl Iterator<Item = &str> + '_ {
    RECORD.find_iter(line).map(|m| m.as_str())
}

/// Resolves a numeric character reference the way HTML parsers do.
fn char_ref(num: Option<u32>) -> String {
    let replaced = match num {
        Some(0x00) => '\u{FFFD}',
        Some(0x0D) => '\r',
        // windows-1252 range
        Some(0x80) => '\u{20AC}',
        Some(0x82) => '\u{201A}',
        Some(0x83) => '\u{0192}',
        Some(0x84) => '\u{201E}',
        Some(0x85) => '\u{2026}',
        Some(0x86) => '\u{2020}',
        Some(0x87) => '\u{2021}',
        Some(0x88) => '\u{02C6}',
        Some(0x89) => '\u{2030}',
        Some(0x8A) => '\u{0160}',
        Some(0x8B) => '\u{2039}',
        Some(0x8C) => '\u{0152}',
        Some(0x8E) => '\u{017D}',
        Some(0x91) => '\u{2018}',
        Some(0x92) => '\u{2019}',
        Some(0x93) => '\u{201C}',
        Some(0x94) => '\u{201D}',
        Some(0x95) => '\u{2022}',
        Some(0x96) => '\u{2013}',
        Some(0x97) => '\u{2014}',
        Some(0x98) => '\u{02DC}',
        Some(0x99) => '\u{2122}',
        Some(0x9A) => '\u{0161}',
        Some(0x9B) => '\u{203A}',
        Some(0x9C) => '\u{0153}',
        Some(0x9E) => '\u{017E}',
        Some(0x9F) => '\u{0178}',
        Some(n @ (0x81 | 0x8D | 0x8F | 0x90 | 0x9D)) => char::from(n as u8),
        Some(n) if is_dropped_codepoint(n) => return String::new(),
        // surrogates and out of range
        Some(n) => char::from_u32(n).unwrap_or('\u{FFFD}'),
        None => '\u{FFFD}',
    };
    replaced.to_string()
}

/// Control characters and noncharacters, removed from the output.
fn is_dropped_codepoint(n: u32) -> bool {
    matches!(n, 0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F..=0x9F | 0xFDD0..=0xFDEF)
        || (n <= 0x10FFFF && n & 0xFFFE == 0xFFFE)
}

fn named_ref(name: &str, terminated: bool) -> Option<String> {
    if terminated {
        if let Some(value) = resolve_html5_entity(name) {
            return Some(value.to_string());
        }
    }
    // longest legacy entity prefixing the name, the rest is kept as text
    (2..=name.len()).rev().find_map(|len| {
        let prefix = name.get(..len)?;
        if !LEGACY_ENTITIES.contains(&prefix) {
            return None;
        }
        let value = resolve_html5_entity(prefix)?;
        let rest = &name[len..];
        let semicolon = if terminated { ";" } else { "" };
        Some(format!("{value}{rest}{semicolon}"))
    })
}

/// Decodes HTML entities one by one.
///
/// Named entities, decimal and hexadecimal references are resolved, as well as legacy
/// entities lacking their `;` (`&amp`, `&eacute`). Anything unresolvable is kept verbatim.
pub fn decode(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    ENTITY
        .replace_all(raw, |caps: &Captures| {
            let entity = &caps[1];
            let terminated = entity.ends_with(';');
            let body = entity.trim_end_matches(';');
            if let Some(digits) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                char_ref(u32::from_str_radix(digits, 16).ok())
            } else if let Some(digits) = body.strip_prefix('#') {
                char_ref(digits.parse().ok())
            } else {
                named_ref(body, terminated).unwrap_or_else(|| caps[0].to_string())
            }
        })
        .into_owned()
}

fn first<'a>(pattern: &Regex, fragment: &'a str) -> Option<&'a str> {
    pattern
        .captures(fragment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn all(pattern: &Regex, fragment: &str) -> Vec<String> {
    pattern
        .captures_iter(fragment)
        .filter_map(|caps| caps.get(1))
        .map(|m| decode(m.as_str()))
        .collect()
}

/// Parses a record fragment.
pub fn parse_record(fragment: &str) -> Result<ParsedRecord, Rejection> {
    let date = first(&DATE, fragment).ok_or(Rejection::NoDate)?;
    let year = YEAR.find(date).ok_or(Rejection::NoYear)?.as_str().to_string();
    let setspec = first(&SETSPEC, fragment).ok_or(Rejection::NoSetSpec)?;

    let mut repeated = REPEATED.iter().map(|pattern| all(pattern, fragment));
    let mut next = || repeated.next().unwrap_or_default();

    let fields = Fields {
        identifier: next(),
        date: vec![decode(date)],
        creator: next(),
        publisher: next(),
        title: next(),
        description: next(),
        source: next(),
        relation: next(),
        language: next(),
        rights: next(),
    };

    Ok(ParsedRecord {
        year,
        setspec: setspec.to_string(),
        article: Article::new(fields),
    })
}
