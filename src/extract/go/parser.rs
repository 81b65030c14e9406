// Sat Oct 17 2026 - Alex

use super::lexer::{Tok, Token};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Type expression as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named(String),
    Qualified(String, String),
    /// Instantiation of a generic type, e.g. `List[int]`.
    Instance(String),
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array(u64, Box<TypeExpr>),
    /// Array whose length is a named constant.
    SymbolicArray(String, Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    Chan(ChanDir, Box<TypeExpr>),
    Func(String),
    Interface(String),
    Struct(Vec<FieldDecl>),
}

impl TypeExpr {
    /// Name an embedded field of this type gets.
    fn embedded_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named(name) | TypeExpr::Qualified(_, name) => Some(name),
            TypeExpr::Pointer(inner) => inner.embedded_name(),
            TypeExpr::Instance(text) => text.split('[').next(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) | TypeExpr::Instance(name) => write!(f, "{}", name),
            TypeExpr::Qualified(pkg, name) => write!(f, "{}.{}", pkg, name),
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Slice(inner) => write!(f, "[]{}", inner),
            TypeExpr::Array(len, inner) => write!(f, "[{}]{}", len, inner),
            TypeExpr::SymbolicArray(len, inner) => write!(f, "[{}]{}", len, inner),
            TypeExpr::Map(key, value) => write!(f, "map[{}]{}", key, value),
            TypeExpr::Chan(ChanDir::Both, inner) => write!(f, "chan {}", inner),
            TypeExpr::Chan(ChanDir::Send, inner) => write!(f, "chan<- {}", inner),
            TypeExpr::Chan(ChanDir::Recv, inner) => write!(f, "<-chan {}", inner),
            TypeExpr::Func(text) | TypeExpr::Interface(text) => write!(f, "{}", text),
            TypeExpr::Struct(fields) => {
                write!(f, "struct{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    if field.embedded {
                        write!(f, "{}", field.ty)?;
                    } else {
                        write!(f, "{} {}", field.name, field.ty)?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

/// One field of a struct type. `A, B int` expands to two declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub embedded: bool,
}

/// A package-level `type` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub generic: bool,
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

type ParseResult<T> = Result<T, SyntaxError>;

/// Collects the package-level type declarations of a Go file. Everything
/// else (functions, vars, imports) is skipped.
pub struct Parser<'a> {
    src: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str, tokens: &'a [Token]) -> Self {
        Self { src, tokens, pos: 0 }
    }

    pub fn parse_file(&mut self) -> ParseResult<Vec<TypeDecl>> {
        let mut decls = Vec::new();
        let mut depth = 0usize;

        while let Some(token) = self.peek() {
            match &token.tok {
                Tok::Punct('{') | Tok::Punct('(') | Tok::Punct('[') => {
                    depth += 1;
                    self.pos += 1;
                }
                Tok::Punct('}') | Tok::Punct(')') | Tok::Punct(']') => {
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                }
                _ if depth == 0 && token.is_ident("type") => {
                    self.pos += 1;
                    self.parse_type_decl(&mut decls)?;
                }
                _ => self.pos += 1,
            }
        }

        Ok(decls)
    }

    fn parse_type_decl(&mut self, decls: &mut Vec<TypeDecl>) -> ParseResult<()> {
        if !self.eat_punct('(') {
            decls.push(self.parse_type_spec()?);
            return Ok(());
        }

        loop {
            self.skip_separators();
            match self.peek() {
                Some(t) if t.is_punct(')') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => decls.push(self.parse_type_spec()?),
                None => return Err(self.error("unterminated type group")),
            }
        }
    }

    fn parse_type_spec(&mut self) -> ParseResult<TypeDecl> {
        let start_line = self.current_line();
        let name = self.expect_ident()?;

        let mut generic = false;
        if self.peek().map(|t| t.is_punct('[')).unwrap_or(false) && self.starts_type_params() {
            self.skip_balanced('[', ']')?;
            generic = true;
        }

        self.eat_punct('=');
        let ty = self.parse_type()?;
        let end_line = self.previous_line();

        Ok(TypeDecl { name, ty, generic, start_line, end_line })
    }

    /// After `type Name`, `[` opens type parameters unless it is an array
    /// or slice type.
    fn starts_type_params(&self) -> bool {
        let next = self.tokens.get(self.pos + 1).map(|t| &t.tok);
        let after = self.tokens.get(self.pos + 2).map(|t| &t.tok);
        match (next, after) {
            (Some(Tok::Punct(']')), _) | (Some(Tok::Number(_)), _) => false,
            (Some(Tok::Ident(_)), Some(Tok::Punct(']'))) => false,
            _ => true,
        }
    }

    pub fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        let token = self.next().ok_or_else(|| self.error("expected type, found end of file"))?;
        let line = token.line;

        match &token.tok {
            Tok::Ident(word) => match word.as_str() {
                "struct" => {
                    self.expect_punct('{')?;
                    Ok(TypeExpr::Struct(self.parse_struct_body()?))
                }
                "interface" => {
                    let start = token.start;
                    self.expect_punct('{')?;
                    self.pos -= 1;
                    self.skip_balanced('{', '}')?;
                    Ok(TypeExpr::Interface(self.source_text(start)))
                }
                "map" => {
                    self.expect_punct('[')?;
                    let key = self.parse_type()?;
                    self.expect_punct(']')?;
                    let value = self.parse_type()?;
                    Ok(TypeExpr::Map(Box::new(key), Box::new(value)))
                }
                "chan" => {
                    let dir = if self.peek().map(|t| t.tok == Tok::Arrow).unwrap_or(false) {
                        self.pos += 1;
                        ChanDir::Send
                    } else {
                        ChanDir::Both
                    };
                    Ok(TypeExpr::Chan(dir, Box::new(self.parse_type()?)))
                }
                "func" => {
                    let start = token.start;
                    self.parse_signature()?;
                    Ok(TypeExpr::Func(self.source_text(start)))
                }
                _ => {
                    let name = word.clone();
                    if self.eat_punct('.') {
                        let selected = self.expect_ident()?;
                        return Ok(TypeExpr::Qualified(name, selected));
                    }
                    if self.peek().map(|t| t.is_punct('[')).unwrap_or(false) {
                        let start = token.start;
                        self.skip_balanced('[', ']')?;
                        return Ok(TypeExpr::Instance(self.source_text(start)));
                    }
                    Ok(TypeExpr::Named(name))
                }
            },
            Tok::Punct('*') => Ok(TypeExpr::Pointer(Box::new(self.parse_type()?))),
            Tok::Punct('(') => {
                let inner = self.parse_type()?;
                self.expect_punct(')')?;
                Ok(inner)
            }
            Tok::Punct('[') => {
                if self.eat_punct(']') {
                    return Ok(TypeExpr::Slice(Box::new(self.parse_type()?)));
                }
                let len = self.next().ok_or_else(|| self.error("expected array length"))?;
                let ty = match &len.tok {
                    Tok::Number(Some(n)) => {
                        let n = *n;
                        self.expect_punct(']')?;
                        TypeExpr::Array(n, Box::new(self.parse_type()?))
                    }
                    Tok::Ident(constant) => {
                        let constant = constant.clone();
                        self.expect_punct(']')?;
                        TypeExpr::SymbolicArray(constant, Box::new(self.parse_type()?))
                    }
                    _ => return Err(SyntaxError { line: len.line, message: "unsupported array length".to_string() }),
                };
                Ok(ty)
            }
            Tok::Arrow => {
                let chan = self.expect_ident()?;
                if chan != "chan" {
                    return Err(SyntaxError { line, message: format!("expected chan after <-, found {}", chan) });
                }
                Ok(TypeExpr::Chan(ChanDir::Recv, Box::new(self.parse_type()?)))
            }
            other => Err(SyntaxError { line, message: format!("expected type, found {:?}", other) }),
        }
    }

    /// Parses fields up to and including the closing brace.
    fn parse_struct_body(&mut self) -> ParseResult<Vec<FieldDecl>> {
        let mut fields = Vec::new();

        loop {
            self.skip_separators();
            let token = self.peek().ok_or_else(|| self.error("unterminated struct"))?;

            if token.is_punct('}') {
                self.pos += 1;
                return Ok(fields);
            }

            self.parse_field(&mut fields)?;

            if self.peek().map(|t| t.tok == Tok::Str).unwrap_or(false) {
                self.pos += 1;
            }

            match self.peek() {
                Some(t) if t.is_separator() || t.is_punct('}') => {}
                Some(t) => {
                    return Err(SyntaxError { line: t.line, message: format!("unexpected {:?} after field", t.tok) })
                }
                None => return Err(self.error("unterminated struct")),
            }
        }
    }

    fn parse_field(&mut self, fields: &mut Vec<FieldDecl>) -> ParseResult<()> {
        let embedded = match (self.peek().map(|t| &t.tok), self.tokens.get(self.pos + 1).map(|t| &t.tok)) {
            (Some(Tok::Punct('*')), _) => true,
            (Some(Tok::Ident(_)), Some(Tok::Punct('.'))) => true,
            (Some(Tok::Ident(_)), None) => true,
            (Some(Tok::Ident(_)), Some(next)) => {
                matches!(next, Tok::Newline | Tok::Str | Tok::Punct(';') | Tok::Punct('}'))
            }
            _ => false,
        };

        if embedded {
            let line = self.current_line();
            let ty = self.parse_type()?;
            let name = ty
                .embedded_name()
                .ok_or_else(|| SyntaxError { line, message: format!("invalid embedded field {}", ty) })?
                .to_string();
            fields.push(FieldDecl { name, ty, embedded: true });
            return Ok(());
        }

        let mut names = vec![self.expect_ident()?];
        while self.eat_punct(',') {
            self.skip_newlines();
            names.push(self.expect_ident()?);
        }
        let ty = self.parse_type()?;

        fields.extend(names.into_iter().map(|name| FieldDecl { name, ty: ty.clone(), embedded: false }));
        Ok(())
    }

    /// Skips `(params) results` after `func`.
    fn parse_signature(&mut self) -> ParseResult<()> {
        self.skip_balanced('(', ')')?;
        match self.peek().map(|t| &t.tok) {
            Some(Tok::Punct('(')) => self.skip_balanced('(', ')'),
            Some(Tok::Ident(_)) | Some(Tok::Punct('*')) | Some(Tok::Punct('[')) | Some(Tok::Arrow) => {
                self.parse_type().map(|_| ())
            }
            _ => Ok(()),
        }
    }

    fn skip_balanced(&mut self, open: char, close: char) -> ParseResult<()> {
        let line = self.current_line();
        self.expect_punct(open)?;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self
                .next()
                .ok_or_else(|| SyntaxError { line, message: format!("unbalanced {}", open) })?;
            if token.is_punct(open) {
                depth += 1;
            } else if token.is_punct(close) {
                depth -= 1;
            }
        }
        Ok(())
    }

    /// Source from `start` to the end of the last consumed token, with
    /// line breaks folded into `; `.
    fn source_text(&self, start: usize) -> String {
        let end = self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)).map(|t| t.end).unwrap_or(start);
        let parts: Vec<&str> = self.src[start..end].lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        parts.join("; ").replace("{; ", "{").replace("; }", "}")
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.peek().map(|t| t.is_punct(c)).unwrap_or(false) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char) -> ParseResult<()> {
        if self.eat_punct(c) {
            Ok(())
        } else {
            Err(self.error(&format!("expected `{}`", c)))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek().map(|t| &t.tok) {
            Some(Tok::Ident(name)) => {
                self.pos += 1;
                Ok(name.clone())
            }
            _ => Err(self.error("expected identifier")),
        }
    }

    fn skip_separators(&mut self) {
        while self.peek().map(Token::is_separator).unwrap_or(false) {
            self.pos += 1;
        }
    }

    fn skip_newlines(&mut self) {
        while self.peek().map(|t| t.tok == Tok::Newline).unwrap_or(false) {
            self.pos += 1;
        }
    }

    fn current_line(&self) -> usize {
        self.peek().map(|t| t.line).unwrap_or_else(|| self.previous_line())
    }

    fn previous_line(&self) -> usize {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)).map(|t| t.line).unwrap_or(1)
    }

    fn error(&self, message: &str) -> SyntaxError {
        let found = self.peek().map(|t| format!(", found {:?}", t.tok)).unwrap_or_default();
        SyntaxError { line: self.current_line(), message: format!("{}{}", message, found) }
    }
}
