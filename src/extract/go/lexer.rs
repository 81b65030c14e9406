// Sat Oct 17 2026 - Alex

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tok {
    Ident(String),
    /// Integer literal; `None` when it does not fit or is not an integer.
    Number(Option<u64>),
    /// String, raw string or rune literal. Contents are not needed.
    Str,
    /// `<-`
    Arrow,
    /// `...`
    Ellipsis,
    Newline,
    Punct(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub tok: Tok,
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn is_punct(&self, c: char) -> bool {
        self.tok == Tok::Punct(c)
    }

    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.tok, Tok::Ident(s) if s == name)
    }

    /// Newlines and semicolons both end a field or declaration.
    pub fn is_separator(&self) -> bool {
        matches!(self.tok, Tok::Newline | Tok::Punct(';'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

/// Tokenizes Go source. Comments are dropped; a block comment spanning
/// lines counts as one newline.
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let c = bytes[i];

        match c {
            b'\n' => {
                tokens.push(Token { tok: Tok::Newline, line, start, end: i + 1 });
                line += 1;
                i += 1;
            }
            b' ' | b'\t' | b'\r' => i += 1,
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let comment_line = line;
                let mut multiline = false;
                i += 2;
                loop {
                    match bytes.get(i) {
                        None => {
                            return Err(LexError { line: comment_line, message: "unterminated comment".to_string() })
                        }
                        Some(b'*') if bytes.get(i + 1) == Some(&b'/') => {
                            i += 2;
                            break;
                        }
                        Some(b'\n') => {
                            multiline = true;
                            line += 1;
                            i += 1;
                        }
                        Some(_) => i += 1,
                    }
                }
                if multiline {
                    tokens.push(Token { tok: Tok::Newline, line: comment_line, start, end: i });
                }
            }
            b'"' | b'\'' => {
                i += 1;
                loop {
                    match bytes.get(i) {
                        None | Some(b'\n') => {
                            return Err(LexError { line, message: "unterminated literal".to_string() })
                        }
                        Some(b'\\') if bytes.get(i + 1) != Some(&b'\n') => i += 2,
                        Some(b'\\') => i += 1,
                        Some(&q) if q == c => {
                            i += 1;
                            break;
                        }
                        Some(_) => i += 1,
                    }
                }
                tokens.push(Token { tok: Tok::Str, line, start, end: i });
            }
            b'`' => {
                let literal_line = line;
                i += 1;
                loop {
                    match bytes.get(i) {
                        None => {
                            return Err(LexError { line: literal_line, message: "unterminated raw string".to_string() })
                        }
                        Some(b'`') => {
                            i += 1;
                            break;
                        }
                        Some(b'\n') => {
                            line += 1;
                            i += 1;
                        }
                        Some(_) => i += 1,
                    }
                }
                tokens.push(Token { tok: Tok::Str, line: literal_line, start, end: i });
            }
            b'0'..=b'9' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.') {
                    i += 1;
                }
                let value = parse_int(&src[start..i]);
                tokens.push(Token { tok: Tok::Number(value), line, start, end: i });
            }
            b'<' if bytes.get(i + 1) == Some(&b'-') => {
                i += 2;
                tokens.push(Token { tok: Tok::Arrow, line, start, end: i });
            }
            b'.' if bytes.get(i + 1) == Some(&b'.') && bytes.get(i + 2) == Some(&b'.') => {
                i += 3;
                tokens.push(Token { tok: Tok::Ellipsis, line, start, end: i });
            }
            _ => {
                let ch = src[i..].chars().next().unwrap_or('\u{fffd}');
                if ch == '_' || ch.is_alphabetic() {
                    let rest = &src[i..];
                    let len = rest
                        .char_indices()
                        .find(|(_, ch)| !(*ch == '_' || ch.is_alphanumeric()))
                        .map(|(idx, _)| idx)
                        .unwrap_or(rest.len());
                    i += len;
                    tokens.push(Token { tok: Tok::Ident(src[start..i].to_string()), line, start, end: i });
                } else {
                    i += ch.len_utf8();
                    tokens.push(Token { tok: Tok::Punct(ch), line, start, end: i });
                }
            }
        }
    }

    Ok(tokens)
}

fn parse_int(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        u64::from_str_radix(oct, 8).ok()
    } else if lower.len() > 1 && lower.starts_with('0') {
        u64::from_str_radix(&lower[1..], 8).ok()
    } else {
        lower.parse().ok()
    }
}
