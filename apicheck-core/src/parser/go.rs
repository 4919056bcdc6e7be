//! Go declaration parser using tree-sitter.
//!
//! Only the package clause, imports and top-level declarations are kept.
//! Function bodies are skipped entirely; initializer expressions of
//! package-level values are reduced to [`ValueExpr`] for type inference.

use std::collections::HashMap;
use tree_sitter::{Node, Parser};

use super::helpers::{
    children_by_field, find_child_by_type, first_error_line, get_node_text,
    get_normalized_text, get_start_line, has_child_of_type, named_children, unquote,
};
use crate::error::ParseError;
use crate::types::{
    ChanDir, Field, FuncDecl, FuncType, ImportDef, LiteralKind, Receiver, SourceFile, TopDecl,
    TypeExpr, TypeSpec, ValueExpr, ValueKeyword, ValueSpec,
};

type Result<T> = std::result::Result<T, ParseError>;

/// Parse Go source code into a body-free [`SourceFile`].
pub fn parse(source: &str, file_path: &str) -> Result<SourceFile> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| ParseError::Language {
            message: e.to_string(),
        })?;

    let tree = parser.parse(source, None).ok_or_else(|| ParseError::Failed {
        path: file_path.to_string(),
    })?;
    let root = tree.root_node();

    if let Some(line) = first_error_line(&root) {
        return Err(ParseError::Syntax {
            path: file_path.to_string(),
            line,
        });
    }

    let mut file = SourceFile {
        path: file_path.to_string(),
        ..Default::default()
    };

    // Imports first so qualified types can be bound to their paths.
    for child in named_children(&root) {
        match child.kind() {
            "package_clause" => {
                if let Some(id) = find_child_by_type(&child, "package_identifier") {
                    file.package = get_node_text(&id, source).to_string();
                }
            }
            "import_declaration" => extract_imports(&child, source, &mut file.imports),
            _ => {}
        }
    }

    let ctx = FileContext::new(source, file_path, &file.imports);
    for child in named_children(&root) {
        match child.kind() {
            "package_clause" | "import_declaration" => {}
            "function_declaration" | "method_declaration" => {
                file.decls.push(TopDecl::Func(ctx.function(&child)?));
            }
            "type_declaration" => ctx.type_declaration(&child, &mut file.decls)?,
            "var_declaration" => {
                ctx.value_declaration(&child, ValueKeyword::Var, &mut file.decls)?
            }
            "const_declaration" => {
                ctx.value_declaration(&child, ValueKeyword::Const, &mut file.decls)?
            }
            other => return Err(ctx.unsupported(&child, other)),
        }
    }

    Ok(file)
}

/// Package name an import path binds when no alias is given.
pub fn default_import_name(path: &str) -> String {
    let mut segments: Vec<&str> = path.split('/').collect();
    // Module major-version suffix: example.com/mod/v2
    if segments.len() > 1 {
        if let Some(last) = segments.last() {
            let is_major = last.len() > 1
                && last.starts_with('v')
                && last[1..].chars().all(|c| c.is_ascii_digit());
            if is_major {
                segments.pop();
            }
        }
    }
    let mut name = segments.last().copied().unwrap_or(path);
    // gopkg.in/yaml.v3
    if let Some((stem, version)) = name.rsplit_once(".v") {
        if !version.is_empty() && version.chars().all(|c| c.is_ascii_digit()) {
            name = stem;
        }
    }
    let name = name.strip_prefix("go-").unwrap_or(name);
    let name = name.strip_suffix("-go").unwrap_or(name);
    name.replace(['-', '.'], "_")
}

/// Extract imports from an import declaration.
fn extract_imports(node: &Node, source: &str, imports: &mut Vec<ImportDef>) {
    for child in named_children(node) {
        match child.kind() {
            "import_spec" => {
                if let Some(import) = extract_import_spec(&child, source) {
                    imports.push(import);
                }
            }
            "import_spec_list" => extract_imports(&child, source, imports),
            _ => {}
        }
    }
}

/// Extract a single import spec.
fn extract_import_spec(node: &Node, source: &str) -> Option<ImportDef> {
    let path = node.child_by_field_name("path")?;
    let path = unquote(get_node_text(&path, source)).to_string();
    if path.is_empty() {
        return None;
    }
    let alias = node
        .child_by_field_name("name")
        .map(|name| get_node_text(&name, source).to_string());
    Some(ImportDef { path, alias })
}

/// Per-file state: source text and the import alias table.
struct FileContext<'s> {
    source: &'s str,
    path: &'s str,
    imports: HashMap<String, String>,
}

impl<'s> FileContext<'s> {
    fn new(source: &'s str, path: &'s str, imports: &[ImportDef]) -> Self {
        let imports = imports
            .iter()
            .filter_map(|import| {
                let name = match &import.alias {
                    Some(alias) if alias == "_" || alias == "." => return None,
                    Some(alias) => alias.clone(),
                    None => default_import_name(&import.path),
                };
                Some((name, import.path.clone()))
            })
            .collect();
        Self {
            source,
            path,
            imports,
        }
    }

    fn text(&self, node: &Node) -> &'s str {
        get_node_text(node, self.source)
    }

    fn unsupported(&self, node: &Node, kind: &str) -> ParseError {
        ParseError::Unsupported {
            path: self.path.to_string(),
            line: get_start_line(node),
            kind: kind.to_string(),
        }
    }

    fn required<'t>(&self, node: &Node<'t>, field: &str) -> Result<Node<'t>> {
        node.child_by_field_name(field)
            .ok_or_else(|| self.unsupported(node, node.kind()))
    }

    // ---- declarations ----

    fn function(&self, node: &Node) -> Result<FuncDecl> {
        let name = self.text(&self.required(node, "name")?).to_string();
        let receiver = match node.child_by_field_name("receiver") {
            Some(list) => Some(self.receiver(&list)?),
            None => None,
        };
        let type_params = match node.child_by_field_name("type_parameters") {
            Some(list) => self.type_parameters(&list)?,
            None => Vec::new(),
        };
        Ok(FuncDecl {
            name,
            receiver,
            type_params,
            ty: self.signature(node)?,
            line: get_start_line(node),
        })
    }

    fn receiver(&self, list: &Node) -> Result<Receiver> {
        let param = named_children(list)
            .into_iter()
            .find(|child| child.kind() == "parameter_declaration")
            .ok_or_else(|| self.unsupported(list, "receiver"))?;
        let name = param
            .child_by_field_name("name")
            .map(|n| self.text(&n).to_string());
        let mut ty = self.required(&param, "type")?;
        while ty.kind() == "parenthesized_type" {
            ty = self.first_named(&ty)?;
        }
        let pointer = ty.kind() == "pointer_type";
        if pointer {
            ty = self.first_named(&ty)?;
        }
        if ty.kind() == "generic_type" {
            ty = self.required(&ty, "type")?;
        }
        match ty.kind() {
            "type_identifier" | "identifier" => Ok(Receiver {
                name,
                type_name: self.text(&ty).to_string(),
                pointer,
            }),
            other => Err(self.unsupported(&ty, other)),
        }
    }

    fn signature(&self, node: &Node) -> Result<FuncType> {
        let params = match node.child_by_field_name("parameters") {
            Some(list) => self.parameters(&list)?,
            None => Vec::new(),
        };
        let results = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self.parameters(&result)?,
            Some(result) => vec![Field::unnamed(self.parse_type(&result)?)],
            None => Vec::new(),
        };
        Ok(FuncType { params, results })
    }

    fn parameters(&self, list: &Node) -> Result<Vec<Field>> {
        let mut fields = Vec::new();
        for param in named_children(list) {
            match param.kind() {
                "parameter_declaration" => {
                    let ty = self.parse_type(&self.required(&param, "type")?)?;
                    let names = children_by_field(&param, "name");
                    if names.is_empty() {
                        fields.push(Field::unnamed(ty));
                    } else {
                        for name in names {
                            fields.push(Field::named(self.text(&name), ty.clone()));
                        }
                    }
                }
                "variadic_parameter_declaration" => {
                    let elem = self.parse_type(&self.required(&param, "type")?)?;
                    let ty = TypeExpr::Variadic(Box::new(elem));
                    match param.child_by_field_name("name") {
                        Some(name) => fields.push(Field::named(self.text(&name), ty)),
                        None => fields.push(Field::unnamed(ty)),
                    }
                }
                other => return Err(self.unsupported(&param, other)),
            }
        }
        Ok(fields)
    }

    fn type_parameters(&self, list: &Node) -> Result<Vec<Field>> {
        let mut fields = Vec::new();
        for decl in named_children(list) {
            if decl.kind() != "type_parameter_declaration" {
                return Err(self.unsupported(&decl, decl.kind()));
            }
            let constraint = self.constraint(&self.required(&decl, "type")?)?;
            for name in children_by_field(&decl, "name") {
                fields.push(Field::named(self.text(&name), constraint.clone()));
            }
        }
        Ok(fields)
    }

    fn type_declaration(&self, node: &Node, out: &mut Vec<TopDecl>) -> Result<()> {
        for spec in named_children(node) {
            let alias = match spec.kind() {
                "type_spec" => false,
                "type_alias" => true,
                other => return Err(self.unsupported(&spec, other)),
            };
            let name = self.text(&self.required(&spec, "name")?).to_string();
            let type_params = match spec.child_by_field_name("type_parameters") {
                Some(list) => self.type_parameters(&list)?,
                None => Vec::new(),
            };
            let ty = self.parse_type(&self.required(&spec, "type")?)?;
            out.push(TopDecl::Type(TypeSpec {
                name,
                type_params,
                alias,
                ty,
                line: get_start_line(&spec),
            }));
        }
        Ok(())
    }

    fn value_declaration(
        &self,
        node: &Node,
        keyword: ValueKeyword,
        out: &mut Vec<TopDecl>,
    ) -> Result<()> {
        let mut previous = None;
        self.value_specs(node, keyword, &mut previous, out)
    }

    fn value_specs(
        &self,
        node: &Node,
        keyword: ValueKeyword,
        previous: &mut Option<(Option<TypeExpr>, Vec<ValueExpr>)>,
        out: &mut Vec<TopDecl>,
    ) -> Result<()> {
        for spec in named_children(node) {
            match spec.kind() {
                "var_spec" | "const_spec" => {}
                "var_spec_list" | "const_spec_list" => {
                    self.value_specs(&spec, keyword, previous, out)?;
                    continue;
                }
                other => return Err(self.unsupported(&spec, other)),
            }

            let names: Vec<String> = children_by_field(&spec, "name")
                .iter()
                .map(|n| self.text(n).to_string())
                .collect();
            let mut ty = match spec.child_by_field_name("type") {
                Some(t) => Some(self.parse_type(&t)?),
                None => None,
            };
            let mut values: Vec<ValueExpr> = match spec.child_by_field_name("value") {
                Some(list) if list.kind() == "expression_list" => named_children(&list)
                    .iter()
                    .map(|v| self.parse_value(v))
                    .collect(),
                Some(single) => vec![self.parse_value(&single)],
                None => Vec::new(),
            };

            // Implicit repetition of the previous const spec.
            if keyword == ValueKeyword::Const && ty.is_none() && values.is_empty() {
                if let Some((prev_ty, prev_values)) = previous.as_ref() {
                    ty = prev_ty.clone();
                    values = prev_values.clone();
                }
            } else {
                *previous = Some((ty.clone(), values.clone()));
            }

            out.push(TopDecl::Value(ValueSpec {
                keyword,
                names,
                ty,
                values,
                line: get_start_line(&spec),
            }));
        }
        Ok(())
    }

    // ---- types ----

    fn parse_type(&self, node: &Node) -> Result<TypeExpr> {
        let child = |field: &str| self.child_type(node, field);

        let ty = match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::Ident(self.text(node).to_string()),
            "qualified_type" => {
                let package = self.text(&self.required(node, "package")?).to_string();
                let name = self.text(&self.required(node, "name")?).to_string();
                let path = self
                    .imports
                    .get(&package)
                    .cloned()
                    .unwrap_or_else(|| package.clone());
                TypeExpr::Qualified {
                    package,
                    path,
                    name,
                }
            }
            "pointer_type" => {
                TypeExpr::Pointer(Box::new(self.parse_type(&self.first_named(node)?)?))
            }
            "parenthesized_type" => self.parse_type(&self.first_named(node)?)?,
            "slice_type" => TypeExpr::Slice(child("element")?),
            "array_type" => TypeExpr::Array {
                len: get_normalized_text(&self.required(node, "length")?, self.source),
                elem: child("element")?,
            },
            "implicit_length_array_type" => TypeExpr::Array {
                len: "...".to_string(),
                elem: child("element")?,
            },
            "map_type" => TypeExpr::Map {
                key: child("key")?,
                value: child("value")?,
            },
            "channel_type" => TypeExpr::Chan {
                dir: self.chan_dir(node),
                elem: child("value")?,
            },
            "function_type" => TypeExpr::Func(self.signature(node)?),
            "struct_type" => {
                let list = find_child_by_type(node, "field_declaration_list")
                    .ok_or_else(|| self.unsupported(node, "struct_type"))?;
                TypeExpr::Struct(self.struct_fields(&list)?)
            }
            "interface_type" => TypeExpr::Interface(self.interface_elems(node)?),
            "generic_type" => {
                let args = self.required(node, "type_arguments")?;
                TypeExpr::Generic {
                    base: child("type")?,
                    args: named_children(&args)
                        .iter()
                        .map(|arg| self.constraint(arg))
                        .collect::<Result<_>>()?,
                }
            }
            "negated_type" => TypeExpr::Constraint(get_normalized_text(node, self.source)),
            "type_elem" | "type_constraint" | "constraint_elem" => self.constraint(node)?,
            other => return Err(self.unsupported(node, other)),
        };
        Ok(ty)
    }

    fn child_type(&self, node: &Node, field: &str) -> Result<Box<TypeExpr>> {
        Ok(Box::new(self.parse_type(&self.required(node, field)?)?))
    }

    fn first_named<'t>(&self, node: &Node<'t>) -> Result<Node<'t>> {
        named_children(node)
            .into_iter()
            .next()
            .ok_or_else(|| self.unsupported(node, node.kind()))
    }

    /// A type-set element: a single type, or a union kept as text.
    fn constraint(&self, node: &Node) -> Result<TypeExpr> {
        match node.kind() {
            "type_elem" | "type_constraint" | "constraint_elem" => {
                let children = named_children(node);
                match children.as_slice() {
                    [single] if single.kind() != "negated_type" => self.parse_type(single),
                    _ => Ok(TypeExpr::Constraint(get_normalized_text(node, self.source))),
                }
            }
            _ => self.parse_type(node),
        }
    }

    fn chan_dir(&self, node: &Node) -> ChanDir {
        let mut cursor = node.walk();
        let tokens: Vec<&str> = node
            .children(&mut cursor)
            .filter(|c| !c.is_named())
            .map(|c| c.kind())
            .collect();
        match tokens.as_slice() {
            ["<-", ..] => ChanDir::Recv,
            t if t.contains(&"<-") => ChanDir::Send,
            _ => ChanDir::Both,
        }
    }

    fn struct_fields(&self, list: &Node) -> Result<Vec<Field>> {
        let mut fields = Vec::new();
        for decl in named_children(list) {
            if decl.kind() != "field_declaration" {
                return Err(self.unsupported(&decl, decl.kind()));
            }
            let ty = self.parse_type(&self.required(&decl, "type")?)?;
            let names = children_by_field(&decl, "name");
            if names.is_empty() {
                let ty = if has_child_of_type(&decl, "*") {
                    TypeExpr::Pointer(Box::new(ty))
                } else {
                    ty
                };
                fields.push(Field::embedded(ty));
            } else {
                for name in names {
                    fields.push(Field::named(self.text(&name), ty.clone()));
                }
            }
        }
        Ok(fields)
    }

    fn interface_elems(&self, node: &Node) -> Result<Vec<Field>> {
        let mut fields = Vec::new();
        for elem in named_children(node) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    let name = self.text(&self.required(&elem, "name")?);
                    fields.push(Field::named(name, TypeExpr::Func(self.signature(&elem)?)));
                }
                "type_elem" | "constraint_elem" => match self.constraint(&elem)? {
                    TypeExpr::Constraint(text) => {
                        fields.push(Field::unnamed(TypeExpr::Constraint(text)))
                    }
                    ty => fields.push(Field::embedded(ty)),
                },
                "type_identifier" | "qualified_type" | "generic_type" => {
                    fields.push(Field::embedded(self.parse_type(&elem)?));
                }
                other => return Err(self.unsupported(&elem, other)),
            }
        }
        Ok(fields)
    }

    // ---- value expressions ----

    fn parse_value(&self, node: &Node) -> ValueExpr {
        let field = |name: &str| node.child_by_field_name(name);
        let fallback = || ValueExpr::Other(get_normalized_text(node, self.source));

        match node.kind() {
            "int_literal" => ValueExpr::Literal(LiteralKind::Int),
            "float_literal" => ValueExpr::Literal(LiteralKind::Float),
            "imaginary_literal" => ValueExpr::Literal(LiteralKind::Imaginary),
            "rune_literal" => ValueExpr::Literal(LiteralKind::Rune),
            "interpreted_string_literal" | "raw_string_literal" => {
                ValueExpr::Literal(LiteralKind::String)
            }
            "true" | "false" => ValueExpr::Literal(LiteralKind::Bool),
            "nil" => ValueExpr::Literal(LiteralKind::Nil),
            "iota" => ValueExpr::Iota,
            "identifier" => ValueExpr::Name(self.text(node).to_string()),
            "selector_expression" => {
                let (Some(operand), Some(name)) = (field("operand"), field("field")) else {
                    return fallback();
                };
                let package = self.text(&operand);
                match self.imports.get(package) {
                    Some(path) if operand.kind() == "identifier" => ValueExpr::Qualified {
                        package: package.to_string(),
                        path: path.clone(),
                        name: self.text(&name).to_string(),
                    },
                    _ => fallback(),
                }
            }
            "composite_literal" => match field("type").map(|t| self.parse_type(&t)) {
                Some(Ok(ty)) => ValueExpr::Composite(ty),
                _ => fallback(),
            },
            "unary_expression" => {
                let (Some(op), Some(operand)) = (field("operator"), field("operand")) else {
                    return fallback();
                };
                let operand = Box::new(self.parse_value(&operand));
                match self.text(&op) {
                    "&" => ValueExpr::AddressOf(operand),
                    op => ValueExpr::Unary {
                        op: op.to_string(),
                        operand,
                    },
                }
            }
            "binary_expression" => {
                let (Some(left), Some(op), Some(right)) =
                    (field("left"), field("operator"), field("right"))
                else {
                    return fallback();
                };
                ValueExpr::Binary {
                    op: self.text(&op).to_string(),
                    left: Box::new(self.parse_value(&left)),
                    right: Box::new(self.parse_value(&right)),
                }
            }
            "parenthesized_expression" => match named_children(node).first() {
                Some(inner) => self.parse_value(inner),
                None => fallback(),
            },
            "call_expression" => {
                let Some(function) = field("function") else {
                    return fallback();
                };
                let args = field("arguments")
                    .map(|list| {
                        named_children(&list)
                            .iter()
                            .map(|arg| self.parse_value(arg))
                            .collect()
                    })
                    .unwrap_or_default();
                ValueExpr::Call {
                    callee: Box::new(self.parse_value(&function)),
                    args,
                }
            }
            "type_conversion_expression" => {
                match (field("type").map(|t| self.parse_type(&t)), field("operand")) {
                    (Some(Ok(ty)), Some(operand)) => ValueExpr::Call {
                        callee: Box::new(ValueExpr::Type(ty)),
                        args: vec![self.parse_value(&operand)],
                    },
                    _ => fallback(),
                }
            }
            "func_literal" => match self.signature(node) {
                Ok(sig) => ValueExpr::FuncLit(sig),
                Err(_) => fallback(),
            },
            "pointer_type" | "slice_type" | "array_type" | "map_type" | "channel_type"
            | "function_type" | "struct_type" | "interface_type" | "qualified_type"
            | "generic_type" | "type_identifier" | "parenthesized_type" => {
                match self.parse_type(node) {
                    Ok(ty) => ValueExpr::Type(ty),
                    Err(_) => fallback(),
                }
            }
            _ => fallback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> SourceFile {
        parse(source, "a.go").expect("parse")
    }

    fn only_type(file: &SourceFile) -> &TypeSpec {
        match file.decls.as_slice() {
            [TopDecl::Type(spec)] => spec,
            other => panic!("expected one type, got {:?}", other),
        }
    }

    #[test]
    fn test_default_import_name() {
        assert_eq!(default_import_name("net/http"), "http");
        assert_eq!(default_import_name("github.com/foo/bar/v2"), "bar");
        assert_eq!(default_import_name("gopkg.in/yaml.v3"), "yaml");
        assert_eq!(default_import_name("github.com/mattn/go-isatty"), "isatty");
        assert_eq!(default_import_name("fmt"), "fmt");
    }

    #[test]
    fn test_package_and_imports() {
        let file = parse_ok(
            "package widget\n\nimport (\n\t\"io\"\n\tstdctx \"context\"\n\t_ \"embed\"\n)\n",
        );
        assert_eq!(file.package, "widget");
        assert_eq!(file.imports.len(), 3);
        assert_eq!(file.imports[1].alias.as_deref(), Some("stdctx"));
        assert!(file.decls.is_empty());
    }

    #[test]
    fn test_function_body_is_dropped() {
        let file = parse_ok(
            "package p\n\nfunc Sum(a, b int, rest ...int) (total int, err error) {\n\treturn a + b, nil\n}\n",
        );
        let TopDecl::Func(func) = &file.decls[0] else {
            panic!("expected func");
        };
        assert_eq!(func.name, "Sum");
        assert_eq!(func.ty.params.len(), 3);
        assert_eq!(func.ty.params[1].name.as_deref(), Some("b"));
        assert!(matches!(func.ty.params[2].ty, TypeExpr::Variadic(_)));
        assert_eq!(func.ty.results.len(), 2);
        assert_eq!(func.line, 3);
    }

    #[test]
    fn test_method_receiver() {
        let file = parse_ok("package p\n\nfunc (l *List[T]) Push(v T) {}\n");
        let TopDecl::Func(func) = &file.decls[0] else {
            panic!("expected func");
        };
        let recv = func.receiver.as_ref().expect("receiver");
        assert_eq!(recv.type_name, "List");
        assert!(recv.pointer);
        assert_eq!(recv.name.as_deref(), Some("l"));
    }

    #[test]
    fn test_qualified_type_uses_import_path() {
        let file = parse_ok("package p\n\nimport h \"net/http\"\n\ntype Mux = h.Handler\n");
        let spec = only_type(&file);
        assert!(spec.alias);
        assert_eq!(
            spec.ty,
            TypeExpr::Qualified {
                package: "h".into(),
                path: "net/http".into(),
                name: "Handler".into(),
            }
        );
    }

    #[test]
    fn test_struct_fields_and_embedding() {
        let file = parse_ok(
            "package p\n\nimport \"sync\"\n\ntype S struct {\n\t*sync.Mutex\n\tX, y int `json:\"x\"`\n\tcb func(string) error\n}\n",
        );
        let TypeExpr::Struct(fields) = &only_type(&file).ty else {
            panic!("expected struct");
        };
        assert_eq!(fields.len(), 4);
        assert!(fields[0].embedded);
        assert!(matches!(fields[0].ty, TypeExpr::Pointer(_)));
        assert_eq!(fields[0].match_key(0), "Mutex");
        assert_eq!(fields[2].name.as_deref(), Some("y"));
        assert!(matches!(fields[3].ty, TypeExpr::Func(_)));
    }

    #[test]
    fn test_interface_methods_and_embeds() {
        let file = parse_ok(
            "package p\n\nimport \"io\"\n\ntype RC interface {\n\tio.Reader\n\tClose() error\n}\n",
        );
        let TypeExpr::Interface(fields) = &only_type(&file).ty else {
            panic!("expected interface");
        };
        assert_eq!(fields.len(), 2);
        assert!(fields[0].embedded);
        assert_eq!(fields[1].name.as_deref(), Some("Close"));
    }

    #[test]
    fn test_channel_directions() {
        let file = parse_ok(
            "package p\n\nvar A chan int\nvar B chan<- int\nvar C <-chan int\n",
        );
        let dirs: Vec<ChanDir> = file
            .decls
            .iter()
            .map(|d| match d {
                TopDecl::Value(ValueSpec {
                    ty: Some(TypeExpr::Chan { dir, .. }),
                    ..
                }) => *dir,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(dirs, vec![ChanDir::Both, ChanDir::Send, ChanDir::Recv]);
    }

    #[test]
    fn test_const_implicit_repetition() {
        let file = parse_ok(
            "package p\n\ntype Level int\n\nconst (\n\tLow Level = iota\n\tMid\n\tHigh\n)\n",
        );
        let specs: Vec<&ValueSpec> = file
            .decls
            .iter()
            .filter_map(|d| match d {
                TopDecl::Value(spec) => Some(spec),
                _ => None,
            })
            .collect();
        assert_eq!(specs.len(), 3);
        for spec in specs {
            assert_eq!(spec.ty, Some(TypeExpr::Ident("Level".into())));
            assert_eq!(spec.values, vec![ValueExpr::Iota]);
        }
    }

    #[test]
    fn test_value_expressions() {
        let file = parse_ok(
            "package p\n\nimport \"errors\"\n\nvar (\n\tErr = errors.New(\"x\")\n\tP = &Config{}\n\tN = int64(3)\n)\n",
        );
        let values: Vec<&ValueExpr> = file
            .decls
            .iter()
            .filter_map(|d| match d {
                TopDecl::Value(spec) => spec.values.first(),
                _ => None,
            })
            .collect();
        assert!(matches!(
            values[0],
            ValueExpr::Call { callee, .. } if matches!(callee.as_ref(), ValueExpr::Qualified { name, .. } if name == "New")
        ));
        assert!(matches!(values[1], ValueExpr::AddressOf(inner) if matches!(inner.as_ref(), ValueExpr::Composite(_))));
        assert!(matches!(values[2], ValueExpr::Call { .. }));
    }

    #[test]
    fn test_generic_type_params() {
        let file = parse_ok(
            "package p\n\ntype Number interface {\n\t~int | ~float64\n}\n\nfunc Max[T Number](a, b T) T { return a }\n",
        );
        let TopDecl::Func(func) = &file.decls[1] else {
            panic!("expected func");
        };
        assert_eq!(func.type_params.len(), 1);
        assert_eq!(func.type_params[0].ty, TypeExpr::Ident("Number".into()));

        let TopDecl::Type(spec) = &file.decls[0] else {
            panic!("expected type");
        };
        let TypeExpr::Interface(elems) = &spec.ty else {
            panic!("expected interface");
        };
        assert!(matches!(&elems[0].ty, TypeExpr::Constraint(text) if text.contains("~int")));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse("package p\n\nfunc F( {\n", "bad.go").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { ref path, .. } if path == "bad.go"));
    }
}
