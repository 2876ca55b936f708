//! Java source emission.
//!
//! Renders a [`CompilationUnit`] to Java source text.

use crate::ast::{
    Block, CompilationUnit, ConstructorDecl, FieldDecl, GeneratedParameter, MethodDecl, Modifier,
    TypeDeclaration,
};
use fluentgen_model::{TypeParameter, TypeReference};

/// Incrementally builds indented source text.
#[derive(Debug, Default, Clone)]
pub struct JavaSourceBuilder {
    content: String,
    indent_level: usize,
    indent: String,
}

impl JavaSourceBuilder {
    /// Creates a builder with the given indentation unit.
    #[must_use]
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            indent_level: 0,
            indent: indent.into(),
        }
    }

    /// Appends one indented line. Empty lines carry no indentation.
    pub fn push_line(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.indent_level {
                self.content.push_str(&self.indent);
            }
            self.content.push_str(line);
        }
        self.content.push('\n');
    }

    /// Increases indentation.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decreases indentation.
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Returns the built text.
    #[must_use]
    pub fn build(self) -> String {
        self.content
    }
}

/// Renders a compilation unit to Java source.
///
/// # Arguments
/// * `unit` - The unit to render
/// * `indent` - Indentation unit for members and statements
#[must_use]
pub fn emit_unit(unit: &CompilationUnit, indent: &str) -> String {
    let mut builder = JavaSourceBuilder::new(indent);

    if let Some(package) = &unit.package {
        builder.push_line(&format!("package {};", package));
        builder.push_line("");
    }

    if !unit.imports.is_empty() {
        for import in &unit.imports {
            builder.push_line(&format!("import {};", import));
        }
        builder.push_line("");
    }

    emit_declaration(&mut builder, &unit.declaration);
    builder.build()
}

fn emit_declaration(builder: &mut JavaSourceBuilder, declaration: &TypeDeclaration) {
    if let Some(documentation) = &declaration.documentation {
        emit_javadoc(builder, documentation);
    }

    builder.push_line(&format!("{} {{", declaration_header(declaration)));
    builder.indent();

    let mut first = true;
    let mut separate = |builder: &mut JavaSourceBuilder| {
        if !first {
            builder.push_line("");
        }
        first = false;
    };

    for field in &declaration.fields {
        separate(builder);
        builder.push_line(&field_line(field));
    }
    for constructor in &declaration.constructors {
        separate(builder);
        emit_constructor(builder, constructor);
    }
    for method in &declaration.methods {
        separate(builder);
        emit_method(builder, method, declaration.is_interface);
    }

    builder.dedent();
    builder.push_line("}");
}

fn emit_javadoc(builder: &mut JavaSourceBuilder, text: &str) {
    builder.push_line("/**");
    for line in text.lines() {
        if line.is_empty() {
            builder.push_line(" *");
        } else {
            builder.push_line(&format!(" * {}", line));
        }
    }
    builder.push_line(" */");
}

/// Renders the declaration line without the opening brace.
#[must_use]
pub fn declaration_header(declaration: &TypeDeclaration) -> String {
    let mut header = modifier_prefix(&declaration.modifiers);
    header.push_str(if declaration.is_interface {
        "interface "
    } else {
        "class "
    });
    header.push_str(&declaration.name);
    header.push_str(&type_parameter_list(&declaration.type_parameters));

    if !declaration.extended_types.is_empty() {
        header.push_str(" extends ");
        header.push_str(&join_types(&declaration.extended_types));
    }
    if !declaration.implemented_types.is_empty() {
        header.push_str(" implements ");
        header.push_str(&join_types(&declaration.implemented_types));
    }
    header
}

fn modifier_prefix(modifiers: &[Modifier]) -> String {
    let mut prefix = String::new();
    for modifier in modifiers {
        prefix.push_str(modifier.keyword());
        prefix.push(' ');
    }
    prefix
}

/// Renders `<A, B extends C>`, or nothing for an empty list.
#[must_use]
pub fn type_parameter_list(params: &[TypeParameter]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = params.iter().map(ToString::to_string).collect();
    format!("<{}>", rendered.join(", "))
}

fn join_types(types: &[TypeReference]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn parameter_list(params: &[GeneratedParameter]) -> String {
    params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn field_line(field: &FieldDecl) -> String {
    let mut line = modifier_prefix(&field.modifiers);
    line.push_str(&format!("{} {}", field.type_ref, field.name));
    if let Some(initializer) = &field.initializer {
        line.push_str(&format!(" = {}", initializer));
    }
    line.push(';');
    line
}

fn emit_constructor(builder: &mut JavaSourceBuilder, constructor: &ConstructorDecl) {
    builder.push_line(&format!(
        "{}{}({}) {{",
        modifier_prefix(&constructor.modifiers),
        constructor.name,
        parameter_list(&constructor.parameters)
    ));
    emit_block_body(builder, &constructor.body);
    builder.push_line("}");
}

/// Renders the method signature without body or terminator.
#[must_use]
pub fn method_signature(method: &MethodDecl) -> String {
    let mut signature = modifier_prefix(&method.modifiers);
    if !method.type_parameters.is_empty() {
        signature.push_str(&type_parameter_list(&method.type_parameters));
        signature.push(' ');
    }
    signature.push_str(&format!(
        "{} {}({})",
        method.return_type,
        method.name,
        parameter_list(&method.parameters)
    ));
    if !method.thrown_types.is_empty() {
        signature.push_str(" throws ");
        signature.push_str(&join_types(&method.thrown_types));
    }
    signature
}

fn emit_method(builder: &mut JavaSourceBuilder, method: &MethodDecl, in_interface: bool) {
    let signature = method_signature(method);
    match &method.body {
        Some(body) => {
            builder.push_line(&format!("{} {{", signature));
            emit_block_body(builder, body);
            builder.push_line("}");
        }
        None => {
            debug_assert!(in_interface || method.has_modifier(Modifier::Abstract));
            builder.push_line(&format!("{};", signature));
        }
    }
}

fn emit_block_body(builder: &mut JavaSourceBuilder, body: &Block) {
    builder.indent();
    for statement in &body.statements {
        builder.push_line(statement);
    }
    builder.dedent();
}
