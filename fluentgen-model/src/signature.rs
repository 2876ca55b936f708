//! Parser for type text in Java syntax.
//!
//! Descriptors carry types as text (`Map<String, ? extends T>`, `int[]`,
//! `String...`). This module turns that text into [`TypeReference`] values.
//! A bare name that matches a type parameter in scope becomes
//! [`TypeReference::TypeParameter`].

use crate::error::ParseError;
use crate::types::{PrimitiveKind, TypeReference};

/// Parses a type such as a return type or an `extends` clause.
///
/// # Arguments
/// * `text` - Type text
/// * `scope` - Names of the type parameters in scope
///
/// # Errors
/// Returns `ParseError::InvalidType` if the text is not a well-formed type.
pub fn parse_type(text: &str, scope: &[String]) -> Result<TypeReference, ParseError> {
    let mut parser = TypeTextParser::new(text, scope);
    let type_ref = parser.parse_type(true)?;
    parser.expect_end()?;
    Ok(type_ref)
}

/// Parses a parameter type, which may end with `...`.
///
/// Varargs are returned as the array type together with a `true` flag.
///
/// # Errors
/// Returns `ParseError::InvalidType` if the text is not a well-formed type.
pub fn parse_parameter_type(
    text: &str,
    scope: &[String],
) -> Result<(TypeReference, bool), ParseError> {
    let mut parser = TypeTextParser::new(text, scope);
    let type_ref = parser.parse_type(false)?;
    parser.skip_whitespace();
    if parser.eat_str("...") {
        parser.expect_end()?;
        return Ok((TypeReference::array_of(type_ref), true));
    }
    parser.expect_end()?;
    Ok((type_ref, false))
}

/// Parses the bound list of a type parameter, `A & B & C`.
///
/// Empty text yields no bounds.
///
/// # Errors
/// Returns `ParseError::InvalidType` if any bound is malformed.
pub fn parse_bounds(text: &str, scope: &[String]) -> Result<Vec<TypeReference>, ParseError> {
    let mut parser = TypeTextParser::new(text, scope);
    let mut bounds = Vec::new();
    parser.skip_whitespace();
    if parser.at_end() {
        return Ok(bounds);
    }
    loop {
        bounds.push(parser.parse_type(false)?);
        parser.skip_whitespace();
        if !parser.eat_str("&") {
            break;
        }
    }
    parser.expect_end()?;
    Ok(bounds)
}

/// Cursor over type text.
struct TypeTextParser<'a> {
    text: &'a str,
    pos: usize,
    scope: &'a [String],
}

impl<'a> TypeTextParser<'a> {
    fn new(text: &'a str, scope: &'a [String]) -> Self {
        Self {
            text,
            pos: 0,
            scope,
        }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat_str(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::invalid_type(self.text, self.pos, message)
    }

    fn expect(&mut self, token: &str) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.eat_str(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", token)))
        }
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing text"))
        }
    }

    fn identifier(&mut self) -> Result<&'a str, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        for (i, c) in self.rest().char_indices() {
            let valid = if i == 0 {
                c.is_alphabetic() || c == '_' || c == '$'
            } else {
                c.is_alphanumeric() || c == '_' || c == '$'
            };
            if !valid {
                break;
            }
            self.pos = start + i + c.len_utf8();
        }
        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(&self.text[start..self.pos])
    }

    /// Parses a dotted name, stopping before `...`.
    fn qualified_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.identifier()?.to_string();
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("...") || !self.rest().starts_with('.') {
                break;
            }
            self.pos += 1;
            name.push('.');
            name.push_str(self.identifier()?);
        }
        Ok(name)
    }

    fn parse_type(&mut self, allow_void: bool) -> Result<TypeReference, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let name = self.qualified_name()?;

        let base = if name == "void" {
            if !allow_void {
                self.pos = start;
                return Err(self.error("'void' is not allowed here"));
            }
            return Ok(TypeReference::Void);
        } else if let Some(kind) = PrimitiveKind::from_java_name(&name) {
            TypeReference::Primitive(kind)
        } else {
            self.skip_whitespace();
            let type_arguments = if self.eat_str("<") {
                self.type_arguments()?
            } else {
                Vec::new()
            };
            if type_arguments.is_empty() && self.scope.iter().any(|p| *p == name) {
                TypeReference::TypeParameter(name)
            } else {
                TypeReference::object(name, type_arguments)
            }
        };

        self.array_suffix(base)
    }

    fn array_suffix(&mut self, mut type_ref: TypeReference) -> Result<TypeReference, ParseError> {
        loop {
            self.skip_whitespace();
            if !self.eat_str("[") {
                return Ok(type_ref);
            }
            self.expect("]")?;
            type_ref = TypeReference::array_of(type_ref);
        }
    }

    /// Parses arguments after the opening `<`, consuming the closing `>`.
    fn type_arguments(&mut self) -> Result<Vec<TypeReference>, ParseError> {
        let mut arguments = Vec::new();
        self.skip_whitespace();
        // Diamond.
        if self.eat_str(">") {
            return Ok(arguments);
        }
        loop {
            arguments.push(self.type_argument()?);
            self.skip_whitespace();
            if self.eat_str(",") {
                continue;
            }
            self.expect(">")?;
            return Ok(arguments);
        }
    }

    fn type_argument(&mut self) -> Result<TypeReference, ParseError> {
        self.skip_whitespace();
        if !self.eat_str("?") {
            return self.parse_type(false);
        }
        self.skip_whitespace();
        let checkpoint = self.pos;
        if self.peek().is_some_and(|c| c == ',' || c == '>') {
            return Ok(TypeReference::wildcard());
        }
        match self.identifier()? {
            "extends" => Ok(TypeReference::Wildcard {
                extends: Some(Box::new(self.parse_type(false)?)),
                super_bound: None,
            }),
            "super" => Ok(TypeReference::Wildcard {
                extends: None,
                super_bound: Some(Box::new(self.parse_type(false)?)),
            }),
            _ => {
                self.pos = checkpoint;
                Err(self.error("expected 'extends' or 'super' after '?'"))
            }
        }
    }
}
