//! Declaration descriptor parser.
//!
//! This module parses the XML descriptors produced by discovery into
//! [`SourceUnit`] values. A document is either a single `<sourceUnit>` or a
//! `<sources>` element wrapping several of them.

use crate::error::ParseError;
use crate::signature::{parse_bounds, parse_parameter_type, parse_type};
use crate::types::{
    DeclarationKind, ImportDecl, MethodModifiers, MethodSignature, NestedType, Parameter,
    SourceDeclaration, SourceUnit, TypeParameter, Visibility,
};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Parses every source unit in a descriptor document.
///
/// # Arguments
/// * `xml` - Descriptor content
///
/// # Returns
/// Parsed units in document order.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, a type is malformed, or the
/// document contains no `sourceUnit` element.
pub fn parse_units(xml: &str) -> Result<Vec<SourceUnit>, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut units = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "sources" => {}
                    "sourceUnit" => units.push(parse_source_unit(&mut reader, e, true)?),
                    other => {
                        return Err(ParseError::structure(format!(
                            "unexpected element '{}' at document level",
                            other
                        )));
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"sourceUnit" {
                    units.push(parse_source_unit(&mut reader, e, false)?);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if units.is_empty() {
        return Err(ParseError::structure("no sourceUnit element found"));
    }
    Ok(units)
}

/// Parses a descriptor that holds exactly one source unit.
///
/// # Errors
/// Returns `ParseError` if parsing fails or the document holds more than one
/// unit.
pub fn parse_unit(xml: &str) -> Result<SourceUnit, ParseError> {
    let mut units = parse_units(xml)?;
    if units.len() != 1 {
        return Err(ParseError::structure(format!(
            "expected one sourceUnit, found {}",
            units.len()
        )));
    }
    units
        .pop()
        .ok_or_else(|| ParseError::structure("no sourceUnit element found"))
}

/// Reads and parses a descriptor file.
///
/// # Errors
/// Returns `ParseError::Io` if the file cannot be read, or any parse error.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<SourceUnit>, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_units(&xml)
}

/// Type parameter before its bounds are parsed.
struct RawTypeParameter {
    name: String,
    bounds: String,
}

/// Method before its types are parsed.
struct RawMethod {
    name: String,
    returns: String,
    visibility: Option<Visibility>,
    modifiers: MethodModifiers,
    type_parameters: Vec<RawTypeParameter>,
    parameters: Vec<(String, String)>,
    throws: Vec<String>,
}

/// Declaration before its types are parsed.
///
/// Types can only be parsed once every type parameter in scope is known, so
/// children are collected as text first.
struct RawDeclaration {
    declaration: SourceDeclaration,
    type_parameters: Vec<RawTypeParameter>,
    extends: Vec<String>,
    implements: Vec<String>,
    methods: Vec<RawMethod>,
}

/// Reads an attribute value, resolving XML escapes.
fn attr_value(element: &str, key: &str, raw: &[u8]) -> Result<String, ParseError> {
    let raw = std::str::from_utf8(raw)?;
    unescape(raw)
        .map(|value| value.into_owned())
        .map_err(|_| ParseError::invalid_attr(element, key, raw))
}

/// Collects all attributes of an element as unescaped key/value pairs.
fn attributes(e: &BytesStart<'_>, element: &str) -> Result<Vec<(String, String)>, ParseError> {
    let mut pairs = Vec::new();
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr_value(element, &key, &attr.value)?;
        pairs.push((key, value));
    }
    Ok(pairs)
}

fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

fn parse_visibility(element: &str, value: &str) -> Result<Visibility, ParseError> {
    Visibility::parse(value).ok_or_else(|| ParseError::invalid_attr(element, "visibility", value))
}

/// Skips the remainder of an element whose start tag was just read.
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::structure("unexpected end of document"));
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }
}

/// Parses a sourceUnit element.
fn parse_source_unit(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    has_children: bool,
) -> Result<SourceUnit, ParseError> {
    let mut package = None;
    for (key, value) in attributes(start, "sourceUnit")? {
        if key == "package" && !value.is_empty() {
            package = Some(value);
        }
    }

    let mut unit = SourceUnit::new(package);
    if !has_children {
        return Ok(unit);
    }

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match DeclarationKind::from_element(name) {
                    Some(kind) => unit
                        .declarations
                        .push(parse_declaration(reader, e, kind, true)?),
                    None if name == "import" => {
                        unit.imports.push(parse_import(e)?);
                        skip_element(reader)?;
                    }
                    None => skip_element(reader)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match DeclarationKind::from_element(name) {
                    Some(kind) => unit
                        .declarations
                        .push(parse_declaration(reader, e, kind, false)?),
                    None if name == "import" => unit.imports.push(parse_import(e)?),
                    None => {}
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"sourceUnit" {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::structure(
                    "unexpected end of document inside sourceUnit",
                ));
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(unit)
}

/// Parses an import element.
fn parse_import(e: &BytesStart<'_>) -> Result<ImportDecl, ParseError> {
    let mut name = None;
    let mut is_static = false;
    let mut is_asterisk = false;

    for (key, value) in attributes(e, "import")? {
        match key.as_str() {
            "name" => name = Some(value),
            "static" => is_static = parse_bool("import", "static", &value)?,
            "asterisk" => is_asterisk = parse_bool("import", "asterisk", &value)?,
            _ => {}
        }
    }

    let mut name = name.ok_or_else(|| ParseError::missing_attr("import", "name"))?;
    if let Some(stripped) = name.strip_suffix(".*") {
        name = stripped.to_string();
        is_asterisk = true;
    }

    Ok(ImportDecl {
        name,
        is_static,
        is_asterisk,
    })
}

/// Parses a declaration element and all of its children.
fn parse_declaration(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    kind: DeclarationKind,
    has_children: bool,
) -> Result<SourceDeclaration, ParseError> {
    let element = kind_element(kind);
    let mut name = None;
    let mut declaration = SourceDeclaration::new(String::new(), kind);

    for (key, value) in attributes(start, element)? {
        match key.as_str() {
            "name" => name = Some(value),
            "visibility" => declaration.visibility = parse_visibility(element, &value)?,
            "abstract" => declaration.is_abstract = parse_bool(element, "abstract", &value)?,
            "final" => declaration.is_final = parse_bool(element, "final", &value)?,
            _ => {}
        }
    }
    declaration.name = name.ok_or_else(|| ParseError::missing_attr(element, "name"))?;

    let mut raw = RawDeclaration {
        declaration,
        type_parameters: Vec::new(),
        extends: Vec::new(),
        implements: Vec::new(),
        methods: Vec::new(),
    };

    if has_children {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name_bytes = e.name().as_ref().to_vec();
                    let name = std::str::from_utf8(&name_bytes)?;
                    if name == "method" {
                        raw.methods.push(parse_method(reader, e, kind, true)?);
                    } else {
                        parse_declaration_child(&mut raw, e, name)?;
                        skip_element(reader)?;
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let name_bytes = e.name().as_ref().to_vec();
                    let name = std::str::from_utf8(&name_bytes)?;
                    if name == "method" {
                        raw.methods.push(parse_method(reader, e, kind, false)?);
                    } else {
                        parse_declaration_child(&mut raw, e, name)?;
                    }
                }
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => {
                    return Err(ParseError::structure(format!(
                        "unexpected end of document inside '{}'",
                        raw.declaration.name
                    )));
                }
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    resolve_declaration(raw)
}

const fn kind_element(kind: DeclarationKind) -> &'static str {
    match kind {
        DeclarationKind::Class => "class",
        DeclarationKind::Interface => "interface",
        DeclarationKind::Enum => "enum",
        DeclarationKind::Record => "record",
        DeclarationKind::Annotation => "annotation",
    }
}

/// Handles one non-method child of a declaration.
fn parse_declaration_child(
    raw: &mut RawDeclaration,
    e: &BytesStart<'_>,
    name: &str,
) -> Result<(), ParseError> {
    match name {
        "typeParameter" => raw.type_parameters.push(parse_type_parameter(e)?),
        "extends" => raw.extends.push(required_attr(e, "extends", "type")?),
        "implements" => raw.implements.push(required_attr(e, "implements", "type")?),
        "nested" => {
            let mut nested_name = None;
            let mut nested_kind = DeclarationKind::Class;
            for (key, value) in attributes(e, "nested")? {
                match key.as_str() {
                    "name" => nested_name = Some(value),
                    "kind" => {
                        nested_kind = DeclarationKind::from_element(&value)
                            .ok_or_else(|| ParseError::invalid_attr("nested", "kind", &value))?
                    }
                    _ => {}
                }
            }
            let nested_name =
                nested_name.ok_or_else(|| ParseError::missing_attr("nested", "name"))?;
            raw.declaration
                .nested_types
                .push(NestedType::new(nested_name, nested_kind));
        }
        _ => {}
    }
    Ok(())
}

fn required_attr(e: &BytesStart<'_>, element: &str, attribute: &str) -> Result<String, ParseError> {
    attributes(e, element)?
        .into_iter()
        .find(|(key, _)| key == attribute)
        .map(|(_, value)| value)
        .ok_or_else(|| ParseError::missing_attr(element, attribute))
}

fn parse_type_parameter(e: &BytesStart<'_>) -> Result<RawTypeParameter, ParseError> {
    let mut name = None;
    let mut bounds = String::new();
    for (key, value) in attributes(e, "typeParameter")? {
        match key.as_str() {
            "name" => name = Some(value),
            "bounds" => bounds = value,
            _ => {}
        }
    }
    Ok(RawTypeParameter {
        name: name.ok_or_else(|| ParseError::missing_attr("typeParameter", "name"))?,
        bounds,
    })
}

/// Parses a method element and its children.
fn parse_method(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    owner_kind: DeclarationKind,
    has_children: bool,
) -> Result<RawMethod, ParseError> {
    let mut name = None;
    let mut returns = None;
    let mut visibility = None;
    let mut modifiers = MethodModifiers::default();
    let mut abstract_stated = false;

    for (key, value) in attributes(start, "method")? {
        match key.as_str() {
            "name" => name = Some(value),
            "returns" => returns = Some(value),
            "visibility" => visibility = Some(parse_visibility("method", &value)?),
            "static" => modifiers.is_static = parse_bool("method", "static", &value)?,
            "default" => modifiers.is_default = parse_bool("method", "default", &value)?,
            "abstract" => {
                modifiers.is_abstract = parse_bool("method", "abstract", &value)?;
                abstract_stated = true;
            }
            "final" => modifiers.is_final = parse_bool("method", "final", &value)?,
            _ => {}
        }
    }

    let is_interface = owner_kind == DeclarationKind::Interface;
    if is_interface && !abstract_stated {
        modifiers.is_abstract = !modifiers.is_static
            && !modifiers.is_default
            && visibility != Some(Visibility::Private);
    }

    let mut method = RawMethod {
        name: name.ok_or_else(|| ParseError::missing_attr("method", "name"))?,
        returns: returns.unwrap_or_else(|| "void".to_string()),
        visibility,
        modifiers,
        type_parameters: Vec::new(),
        parameters: Vec::new(),
        throws: Vec::new(),
    };

    if !has_children {
        return Ok(method);
    }

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                parse_method_child(&mut method, e)?;
                skip_element(reader)?;
            }
            Ok(Event::Empty(ref e)) => parse_method_child(&mut method, e)?,
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::structure(format!(
                    "unexpected end of document inside method '{}'",
                    method.name
                )));
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(method)
}

fn parse_method_child(method: &mut RawMethod, e: &BytesStart<'_>) -> Result<(), ParseError> {
    match e.name().as_ref() {
        b"typeParameter" => method.type_parameters.push(parse_type_parameter(e)?),
        b"parameter" => {
            let mut name = None;
            let mut type_text = None;
            for (key, value) in attributes(e, "parameter")? {
                match key.as_str() {
                    "name" => name = Some(value),
                    "type" => type_text = Some(value),
                    _ => {}
                }
            }
            method.parameters.push((
                name.ok_or_else(|| ParseError::missing_attr("parameter", "name"))?,
                type_text.ok_or_else(|| ParseError::missing_attr("parameter", "type"))?,
            ));
        }
        b"throws" => method.throws.push(required_attr(e, "throws", "type")?),
        _ => {}
    }
    Ok(())
}

/// Parses all collected type text once the scope is known.
fn resolve_declaration(raw: RawDeclaration) -> Result<SourceDeclaration, ParseError> {
    let RawDeclaration {
        mut declaration,
        type_parameters,
        extends,
        implements,
        methods,
    } = raw;

    let scope: Vec<String> = type_parameters.iter().map(|p| p.name.clone()).collect();
    declaration.type_parameters = resolve_type_parameters(type_parameters, &scope)?;

    declaration.extended_types = extends
        .iter()
        .map(|text| parse_type(text, &scope))
        .collect::<Result<_, _>>()?;
    declaration.implemented_types = implements
        .iter()
        .map(|text| parse_type(text, &scope))
        .collect::<Result<_, _>>()?;

    let default_visibility = if declaration.is_interface() {
        Visibility::Public
    } else {
        Visibility::Package
    };

    for raw_method in methods {
        let mut method_scope = scope.clone();
        method_scope.extend(raw_method.type_parameters.iter().map(|p| p.name.clone()));

        let mut modifiers = raw_method.modifiers;
        modifiers.visibility = raw_method.visibility.unwrap_or(default_visibility);

        let mut parameters = Vec::with_capacity(raw_method.parameters.len());
        for (name, type_text) in &raw_method.parameters {
            let (type_ref, is_varargs) = parse_parameter_type(type_text, &method_scope)?;
            parameters.push(Parameter {
                name: name.clone(),
                type_ref,
                is_varargs,
            });
        }

        declaration.methods.push(MethodSignature {
            name: raw_method.name,
            type_parameters: resolve_type_parameters(raw_method.type_parameters, &method_scope)?,
            parameters,
            return_type: parse_type(&raw_method.returns, &method_scope)?,
            thrown_types: raw_method
                .throws
                .iter()
                .map(|text| parse_type(text, &method_scope))
                .collect::<Result<_, _>>()?,
            modifiers,
        });
    }

    Ok(declaration)
}

fn resolve_type_parameters(
    raw: Vec<RawTypeParameter>,
    scope: &[String],
) -> Result<Vec<TypeParameter>, ParseError> {
    raw.into_iter()
        .map(|param| {
            Ok(TypeParameter::bounded(
                param.name,
                parse_bounds(&param.bounds, scope)?,
            ))
        })
        .collect()
}
