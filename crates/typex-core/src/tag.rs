//! Struct field tag decoding.
//!
//! By convention a tag is a concatenation of optionally space-separated
//! `key:"value"` pairs. A key is a non-empty run of characters other than
//! space, control characters, quote and colon. Each value is a double-quoted
//! string literal using the usual escape sequences.
//!
//! Decoding never fails: malformed tag text simply ends the scan, and any
//! key not found before that point has an empty value.
//!
//! # Example
//!
//! ```
//! # use typex_core::tag::StructTag;
//! let tag = StructTag::new(r#"json:"name,omitempty" xml:"n""#);
//!
//! let (name, options) = tag.get("json");
//! assert_eq!(name, "name");
//! assert!(options.contains("omitempty"));
//! assert_eq!(tag.get("xml").0, "n");
//! ```

use winnow::{
    ModalResult, Parser as _,
    combinator::{alt, delimited, preceded, repeat, separated_pair},
    token::{any, none_of, one_of, take_while},
};

/// Key under which serialization names and options are looked up.
pub const JSON_KEY: &str = "json";

/// Tag value requesting that a field be left out entirely.
pub const ELIDE: &str = "-";

/// Option marking a field as optional.
pub const OMIT_EMPTY: &str = "omitempty";

/// A borrowed struct field tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructTag<'a>(&'a str);

impl<'a> StructTag<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    /// Returns the value associated with `key`, split on its first comma.
    ///
    /// The first element is the primary value, the second the remaining
    /// options. Both are empty if the key is absent or the tag is malformed
    /// before the key is reached.
    pub fn get(&self, key: &str) -> (String, TagOptions) {
        let mut input = self.0;
        loop {
            if spaces.parse_next(&mut input).is_err() || input.is_empty() {
                break;
            }
            let Ok((name, raw)) = pair.parse_next(&mut input) else {
                break;
            };
            if name != key {
                continue;
            }
            let Some(value) = unquote(raw) else {
                break;
            };
            return match value.split_once(',') {
                Some((primary, options)) => (primary.to_string(), TagOptions(options.to_string())),
                None => (value, TagOptions::default()),
            };
        }
        (String::new(), TagOptions::default())
    }
}

/// The comma-separated options following the primary value of a tag entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions(String);

impl TagOptions {
    /// Reports whether `name` is one of the comma-separated options.
    pub fn contains(&self, name: &str) -> bool {
        !self.0.is_empty() && self.0.split(',').any(|option| option == name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn spaces<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(0.., ' ').parse_next(input)
}

fn key<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c > ' ' && c != ':' && c != '"' && c != '\u{7f}').parse_next(input)
}

/// Delimits a quoted value without interpreting escapes.
///
/// Returns the text between the quotes.
fn raw_value<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    let body = repeat::<_, _, (), _, _>(
        0..,
        alt((preceded('\\', any).void(), none_of(['"', '\\']).void())),
    )
    .take();
    delimited('"', body, '"').parse_next(input)
}

fn pair<'s>(input: &mut &'s str) -> ModalResult<(&'s str, &'s str)> {
    separated_pair(key, ':', raw_value).parse_next(input)
}

/// A decoded piece of a quoted value.
enum Fragment<'s> {
    Literal(&'s str),
    Char(char),
    Byte(u8),
}

fn literal<'s>(input: &mut &'s str) -> ModalResult<Fragment<'s>> {
    take_while(1.., |c: char| c != '\\' && c != '\n')
        .map(Fragment::Literal)
        .parse_next(input)
}

fn hex_digits<'s>(count: usize) -> impl FnMut(&mut &'s str) -> ModalResult<&'s str> {
    move |input: &mut &'s str| take_while(count, |c: char| c.is_ascii_hexdigit()).parse_next(input)
}

fn escape<'s>(input: &mut &'s str) -> ModalResult<Fragment<'s>> {
    preceded(
        '\\',
        alt((
            one_of(['a', 'b', 'f', 'n', 'r', 't', 'v', '\\', '"']).map(|c| {
                Fragment::Char(match c {
                    'a' => '\u{07}',
                    'b' => '\u{08}',
                    'f' => '\u{0c}',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'v' => '\u{0b}',
                    other => other,
                })
            }),
            preceded('x', hex_digits(2))
                .verify_map(|hex| u8::from_str_radix(hex, 16).ok())
                .map(Fragment::Byte),
            preceded('u', hex_digits(4))
                .verify_map(code_point)
                .map(Fragment::Char),
            preceded('U', hex_digits(8))
                .verify_map(code_point)
                .map(Fragment::Char),
            take_while(3, |c: char| ('0'..='7').contains(&c))
                .verify_map(|octal| u8::from_str_radix(octal, 8).ok())
                .map(Fragment::Byte),
        )),
    )
    .parse_next(input)
}

fn code_point(hex: &str) -> Option<char> {
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Interprets the escape sequences of a quoted value's body.
///
/// Byte escapes are assembled as raw bytes; sequences that do not form
/// valid UTF-8 are replaced rather than rejected.
fn unquote(raw: &str) -> Option<String> {
    let bytes = repeat(0.., alt((literal, escape)))
        .fold(Vec::new, |mut bytes: Vec<u8>, fragment| {
            match fragment {
                Fragment::Literal(text) => bytes.extend_from_slice(text.as_bytes()),
                Fragment::Char(c) => {
                    let mut buf = [0; 4];
                    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
                Fragment::Byte(b) => bytes.push(b),
            }
            bytes
        })
        .parse(raw)
        .ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
