use crate::error::*;
use crate::prelude::{Xint, Xstr};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Tok<'a> {
    If,
    Else,
    End,
    Branch(isize),
    ZBranch(isize),
    Word(&'a str),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Token<'a> {
    pub text: &'a str,
    pub pos: usize,
}

impl<'a> Token<'a> {
    pub fn tok(&self) -> Tok<'a> {
        classify(self.text)
    }
}

/// Splits a line on spaces and NULs.
#[derive(Clone, Debug)]
pub struct Lex<'a> {
    buffer: &'a str,
    cursor: usize,
    name_len: usize,
}

fn is_separator(c: u8) -> bool {
    c == b' ' || c == 0
}

// start and end of the next token at or after `cursor`
fn next_span(buf: &[u8], mut cursor: usize) -> Option<(usize, usize)> {
    while cursor < buf.len() && is_separator(buf[cursor]) {
        cursor += 1;
    }
    if cursor >= buf.len() {
        return None;
    }
    let end = memchr::memchr2(b' ', 0, &buf[cursor..])
        .map(|n| cursor + n)
        .unwrap_or(buf.len());
    Some((cursor, end))
}

impl<'a> Lex<'a> {
    pub fn new(buffer: &'a str, name_len: usize) -> Self {
        Self {
            buffer,
            cursor: 0,
            name_len,
        }
    }

    pub fn next(&mut self) -> Xresult1<Option<Token<'a>>> {
        let (start, end) = match next_span(self.buffer.as_bytes(), self.cursor) {
            Some(span) => span,
            None => {
                self.cursor = self.buffer.len();
                return Ok(None);
            }
        };
        self.cursor = end;
        if end - start > self.name_len {
            return Err(Xerr::TokenTooLong {
                offset: start + self.name_len,
            });
        }
        Ok(Some(Token {
            text: &self.buffer[start..end],
            pos: start,
        }))
    }
}

/// Whole line up front, nothing is compiled if any token is too long.
pub fn tokenize(line: &str, name_len: usize) -> Xresult1<Vec<Token<'_>>> {
    let mut lex = Lex::new(line, name_len);
    let mut toks = Vec::new();
    while let Some(t) = lex.next()? {
        toks.push(t);
    }
    Ok(toks)
}

/// Raw line to text. Lengths are checked first, like `tokenize` does,
/// then a token that is not UTF-8 is reported as unresolved.
pub fn line_from_bytes(buf: &[u8], name_len: usize) -> Xresult1<&str> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    while let Some((start, end)) = next_span(buf, cursor) {
        if end - start > name_len {
            return Err(Xerr::TokenTooLong {
                offset: start + name_len,
            });
        }
        spans.push((start, end));
        cursor = end;
    }
    std::str::from_utf8(buf).map_err(|e| {
        let bad = e.valid_up_to();
        let index = spans.iter().take_while(|(_, end)| *end <= bad).count();
        let (start, end) = spans.get(index).copied().unwrap_or((bad, buf.len()));
        Xerr::UnresolvedSymbol {
            index,
            name: Xstr::from(&*String::from_utf8_lossy(&buf[start..end])),
        }
    })
}

pub fn classify(text: &str) -> Tok<'_> {
    match text {
        "IF" => Tok::If,
        "ELSE" => Tok::Else,
        "END" => Tok::End,
        _ => {
            if let Some(offs) = branch_offset(text, "ZBRANCH") {
                Tok::ZBranch(offs)
            } else if let Some(offs) = branch_offset(text, "BRANCH") {
                Tok::Branch(offs)
            } else {
                Tok::Word(text)
            }
        }
    }
}

// BRANCH12, BRANCH-3
fn branch_offset(text: &str, prefix: &str) -> Option<isize> {
    let n = text.strip_prefix(prefix)?;
    let digits = n.strip_prefix('-').unwrap_or(n);
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    n.parse().ok()
}

pub fn parse_literal(text: &str) -> Option<Xint> {
    text.parse().ok()
}

// tests ---------------------------------------------------------------------

#[cfg(test)]
fn texts(line: &str, name_len: usize) -> Xresult1<Vec<&str>> {
    Ok(tokenize(line, name_len)?.iter().map(|t| t.text).collect())
}

#[test]
fn test_lex_ws() {
    assert_eq!(Ok(vec![]), texts("", 8));
    assert_eq!(Ok(vec![]), texts("   ", 8));
    assert_eq!(Ok(vec![]), texts("\0", 8));
    assert_eq!(Ok(vec!["a", "bc"]), texts("  a   bc ", 8));
    assert_eq!(Ok(vec!["a", "b"]), texts("a\0b", 8));
    assert_eq!(Ok(vec!["a\tb"]), texts("a\tb", 8));
    let toks = tokenize(" abcde 123", 8).unwrap();
    assert_eq!(Token { text: "abcde", pos: 1 }, toks[0]);
    assert_eq!(Token { text: "123", pos: 7 }, toks[1]);
}

#[test]
fn test_lex_name_len() {
    assert_eq!(Ok(vec!["abcd"]), texts("abcd", 4));
    assert_eq!(Err(Xerr::TokenTooLong { offset: 4 }), texts("abcde", 4));
    assert_eq!(Err(Xerr::TokenTooLong { offset: 8 }), texts("1 2 abcde 3", 4));
    assert_eq!(Ok(vec!["abcd", "abcd"]), texts("abcd abcd", 4));
}

#[test]
fn test_line_from_bytes() {
    assert_eq!(Ok("1 2 ADD"), line_from_bytes(b"1 2 ADD", 8));
    assert_eq!(Ok(""), line_from_bytes(b"", 8));
    assert_eq!(
        Err(Xerr::UnresolvedSymbol {
            index: 1,
            name: Xstr::from("a\u{fffd}b")
        }),
        line_from_bytes(b"1  a\xffb 2", 8)
    );
    // too long wins even when it comes after the bad token
    assert_eq!(
        Err(Xerr::TokenTooLong { offset: 8 }),
        line_from_bytes(b"\xff 1 abcde", 4)
    );
}

#[test]
fn test_lex_classify() {
    assert_eq!(Tok::If, classify("IF"));
    assert_eq!(Tok::Else, classify("ELSE"));
    assert_eq!(Tok::End, classify("END"));
    assert_eq!(Tok::Word("if"), classify("if"));
    assert_eq!(Tok::Branch(12), classify("BRANCH12"));
    assert_eq!(Tok::Branch(-3), classify("BRANCH-3"));
    assert_eq!(Tok::ZBranch(0), classify("ZBRANCH0"));
    assert_eq!(Tok::Word("BRANCH"), classify("BRANCH"));
    assert_eq!(Tok::Word("BRANCH+1"), classify("BRANCH+1"));
    assert_eq!(Tok::Word("BRANCH1x"), classify("BRANCH1x"));
    assert_eq!(Tok::Word("ZBRANCH-"), classify("ZBRANCH-"));
    assert_eq!(Tok::Word("IFF"), classify("IFF"));
}

#[test]
fn test_lex_num() {
    assert_eq!(Some(-1), parse_literal("-1"));
    assert_eq!(Some(1), parse_literal("+1"));
    assert_eq!(Some(0), parse_literal("0"));
    assert_eq!(None, parse_literal("12abc"));
    assert_eq!(None, parse_literal("--1"));
    assert_eq!(None, parse_literal("0x10"));
    assert_eq!(None, parse_literal("99999999999999999999999999"));
}
