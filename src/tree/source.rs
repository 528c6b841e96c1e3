//! Java source parsing and rendering
//!
//! A structural parser for the dialect the generators produce: one public
//! type per file, members recognized by brace/string/comment aware
//! scanning. Rendering normalizes layout to four-space indentation, so a
//! parse and render round trip doubles as the formatter.

use crate::error::{GenError, Result};
use crate::tree::class::{
    Annotation, AnnotationValue, JavaClass, JavaFile, Member, MemberKind, TypeKind,
};

/// Parse a `.java` compilation unit.
pub fn parse_java(src: &str) -> Result<JavaFile> {
    let mut s = Scanner::new(src);
    let mut package = String::new();
    let mut imports: Vec<String> = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    // File header: package statement, imports, leading comments.
    loop {
        s.skip_ws();
        if s.at_end() {
            return Err(GenError::ParseError("no type declaration found".into()));
        }
        if let Some(c) = s.read_comment() {
            pending.push(c);
            continue;
        }
        if s.eat_keyword("package") {
            package = s.read_to(';')?.trim().to_string();
            continue;
        }
        if s.eat_keyword("import") {
            imports.push(s.read_to(';')?.trim().to_string());
            continue;
        }
        break;
    }

    // Type declaration header. The last comment before it is the banner.
    let doc = pending.pop();
    let mut annotations = Vec::new();
    s.skip_ws();
    while s.peek() == Some('@') {
        annotations.push(s.read_annotation()?);
        s.skip_ws();
        while s.read_comment().is_some() {
            s.skip_ws();
        }
    }

    let mut modifiers: Vec<String> = Vec::new();
    let kind = loop {
        s.skip_ws();
        if s.eat_keyword("class") {
            break TypeKind::Class;
        }
        if s.eat_keyword("interface") {
            break TypeKind::Interface;
        }
        let word = s.read_ident();
        if word.is_empty() {
            return Err(GenError::ParseError(format!(
                "unexpected character {:?} in type header",
                s.peek()
            )));
        }
        modifiers.push(word.to_string());
    };
    s.skip_ws();
    let name = s.read_ident().to_string();
    if name.is_empty() {
        return Err(GenError::ParseError("missing type name".into()));
    }
    s.skip_ws();
    if s.peek() == Some('<') {
        s.read_balanced('<', '>')?;
    }

    let mut extends = None;
    s.skip_ws();
    if s.eat_keyword("extends") {
        extends = Some(s.read_type_ref()?);
    }
    let mut implements = Vec::new();
    s.skip_ws();
    if s.eat_keyword("implements") {
        loop {
            implements.push(s.read_type_ref()?);
            s.skip_ws();
            if !s.eat(",") {
                break;
            }
        }
    }
    s.skip_ws();
    if !s.eat("{") {
        return Err(GenError::ParseError(format!(
            "expected class body for {}",
            name
        )));
    }

    let mut class = JavaClass::new(&name, kind);
    class.modifiers = modifiers.join(" ");
    class.doc = doc;
    class.annotations = annotations;
    class.extends = extends;
    class.implements = implements;

    // Class body. A run of comments before a declaration yields standalone
    // comment members for all but the last, which becomes the member doc.
    let mut pending: Vec<String> = Vec::new();
    loop {
        s.skip_ws();
        match s.peek() {
            None => return Err(GenError::ParseError(format!("unterminated body of {}", name))),
            Some('}') => {
                s.bump();
                break;
            }
            _ => {}
        }
        if let Some(c) = s.read_comment() {
            pending.push(c);
            continue;
        }
        let mut annos = Vec::new();
        while s.peek() == Some('@') {
            annos.push(s.read_annotation()?);
            s.skip_ws();
        }
        let mut member = s.read_member(&name)?;
        member.doc = pending.pop();
        for c in pending.drain(..) {
            class.members.push(Member::comment(&c));
        }
        member.annotations = annos;
        class.members.push(member);
    }
    for c in pending.drain(..) {
        class.members.push(Member::comment(&c));
    }

    let mut file = JavaFile::new(&package, class);
    file.imports = imports;
    Ok(file)
}

/// Render a compilation unit back to normalized source text.
pub fn render_java(file: &JavaFile) -> String {
    let mut out = String::new();
    out.push_str(&format!("package {};\n", file.package));
    if !file.imports.is_empty() {
        out.push('\n');
        for imp in &file.imports {
            out.push_str(&format!("import {};\n", imp));
        }
    }
    out.push('\n');

    let class = &file.class;
    if let Some(doc) = &class.doc {
        for line in doc.lines() {
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    for anno in &class.annotations {
        out.push_str(&anno.render());
        out.push('\n');
    }
    if !class.modifiers.is_empty() {
        out.push_str(&class.modifiers);
        out.push(' ');
    }
    out.push_str(class.kind.keyword());
    out.push(' ');
    out.push_str(&class.name);
    if let Some(ext) = &class.extends {
        out.push_str(" extends ");
        out.push_str(ext);
    }
    if !class.implements.is_empty() {
        out.push_str(" implements ");
        out.push_str(&class.implements.join(", "));
    }
    out.push_str(" {\n");

    for member in &class.members {
        out.push('\n');
        if let Some(doc) = &member.doc {
            push_indented(&mut out, doc);
        }
        for anno in &member.annotations {
            push_indented(&mut out, &anno.render());
        }
        push_indented(&mut out, &member.text);
    }

    out.push_str("}\n");
    out
}

fn push_indented(out: &mut String, text: &str) {
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
    }
}

/// Strip up to `col` leading spaces from every line after the first, so
/// member text is stored at column zero regardless of nesting.
fn dedent(text: &str, col: usize) -> String {
    let mut out = String::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(strip_indent(line, col));
        } else {
            out.push_str(line);
        }
    }
    out
}

fn strip_indent(line: &str, col: usize) -> &str {
    let mut s = line;
    let mut n = 0;
    while n < col && s.starts_with(' ') {
        s = &s[1..];
        n += 1;
    }
    s
}

/// Split on a separator at nesting depth zero, respecting brackets and
/// string literals.
pub(crate) fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    let mut in_str = false;
    let mut in_char = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if in_str || in_char {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if in_str && c == '"' {
                in_str = false;
            } else if in_char && c == '\'' {
                in_char = false;
            }
            continue;
        }
        match c {
            '"' => in_str = true,
            '\'' => in_char = true,
            '(' | '{' | '[' | '<' => depth += 1,
            ')' | '}' | ']' | '>' => depth -= 1,
            c if c == sep && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn find_top_level(s: &str, target: char) -> Option<usize> {
    let mut depth = 0i32;
    let mut in_str = false;
    let mut in_char = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if in_str || in_char {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if in_str && c == '"' {
                in_str = false;
            } else if in_char && c == '\'' {
                in_char = false;
            }
            continue;
        }
        match c {
            '"' => in_str = true,
            '\'' => in_char = true,
            '(' | '{' | '[' | '<' => depth += 1,
            ')' | '}' | ']' | '>' => depth -= 1,
            c if c == target && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Tokenize a declaration prefix, keeping generic argument lists inside a
/// single token so `Map<String, Integer>` stays intact.
fn tokenize_decl(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut cur = String::new();
    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '<' => {
                depth += 1;
                cur.push(c);
            }
            '>' => {
                depth -= 1;
                cur.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !cur.is_empty() {
                    tokens.push(std::mem::take(&mut cur));
                }
            }
            _ => cur.push(c),
        }
    }
    if !cur.is_empty() {
        tokens.push(cur);
    }
    tokens
}

fn parse_annotation_args(inner: &str) -> Result<Vec<(String, AnnotationValue)>> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut args = Vec::new();
    for part in split_top_level(inner, ',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match find_top_level(part, '=') {
            Some(i) => {
                let key = part[..i].trim();
                let value = parse_annotation_value(part[i + 1..].trim())?;
                args.push((key.to_string(), value));
            }
            None => args.push(("value".to_string(), parse_annotation_value(part)?)),
        }
    }
    Ok(args)
}

fn parse_annotation_value(s: &str) -> Result<AnnotationValue> {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        return Ok(AnnotationValue::Str(s[1..s.len() - 1].to_string()));
    }
    if s == "true" {
        return Ok(AnnotationValue::Bool(true));
    }
    if s == "false" {
        return Ok(AnnotationValue::Bool(false));
    }
    if let Ok(n) = s.parse::<i64>() {
        return Ok(AnnotationValue::Int(n));
    }
    if let Some(class_name) = s.strip_suffix(".class") {
        return Ok(AnnotationValue::ClassRef(class_name.to_string()));
    }
    if s.starts_with('{') && s.ends_with('}') {
        let inner = &s[1..s.len() - 1];
        let mut items = Vec::new();
        for part in split_top_level(inner, ',') {
            let part = part.trim();
            if !part.is_empty() {
                items.push(parse_annotation_value(part)?);
            }
        }
        return Ok(AnnotationValue::List(items));
    }
    Ok(AnnotationValue::Ident(s.to_string()))
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Scanner { src, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    fn eat(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        if !self.starts_with(kw) {
            return false;
        }
        match self.src[self.pos + kw.len()..].chars().next() {
            Some(c) if c.is_alphanumeric() || c == '_' || c == '$' => false,
            _ => {
                self.pos += kw.len();
                true
            }
        }
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Column of the current position, counted from the last newline.
    /// Indentation in the handled dialect is spaces only.
    fn column(&self) -> usize {
        match self.src[..self.pos].rfind('\n') {
            Some(i) => self.pos - i - 1,
            None => self.pos,
        }
    }

    fn read_to(&mut self, term: char) -> Result<&'a str> {
        let rest = self.rest();
        match rest.find(term) {
            Some(i) => {
                let text = &rest[..i];
                self.pos += i + term.len_utf8();
                Ok(text)
            }
            None => Err(GenError::ParseError(format!("missing {:?}", term))),
        }
    }

    fn read_ident(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                self.bump();
            } else {
                break;
            }
        }
        &self.src[start..self.pos]
    }

    fn read_qualified_ident(&mut self) -> &'a str {
        let start = self.pos;
        loop {
            let id_start = self.pos;
            while let Some(c) = self.peek() {
                if c.is_alphanumeric() || c == '_' || c == '$' {
                    self.bump();
                } else {
                    break;
                }
            }
            if self.pos == id_start {
                break;
            }
            if self.peek() == Some('.') {
                let save = self.pos;
                self.bump();
                match self.peek() {
                    Some(c) if c.is_alphabetic() || c == '_' || c == '$' => continue,
                    _ => {
                        self.pos = save;
                        break;
                    }
                }
            } else {
                break;
            }
        }
        &self.src[start..self.pos]
    }

    /// A type reference with an optional generic argument list, e.g.
    /// `pengesoft.db.QueryDataList<Order>`.
    fn read_type_ref(&mut self) -> Result<String> {
        self.skip_ws();
        let start = self.pos;
        let ident = self.read_qualified_ident();
        if ident.is_empty() {
            return Err(GenError::ParseError("expected type reference".into()));
        }
        if self.peek() == Some('<') {
            self.read_balanced('<', '>')?;
        }
        Ok(self.src[start..self.pos].to_string())
    }

    /// Read a comment at the cursor, dedented to column zero. Returns None
    /// when the cursor is not on a comment.
    fn read_comment(&mut self) -> Option<String> {
        let col = self.column();
        if self.starts_with("//") {
            let rest = self.rest();
            let end = rest.find('\n').unwrap_or(rest.len());
            let text = rest[..end].trim_end().to_string();
            self.pos += end;
            return Some(text);
        }
        if self.starts_with("/*") {
            let rest = self.rest();
            let end = rest[2..].find("*/").map(|i| i + 4)?;
            let text = dedent(&rest[..end], col);
            self.pos += end;
            return Some(text);
        }
        None
    }

    fn read_annotation(&mut self) -> Result<Annotation> {
        self.bump();
        let name = self.read_qualified_ident().to_string();
        if name.is_empty() {
            return Err(GenError::ParseError("missing annotation name".into()));
        }
        let save = self.pos;
        self.skip_ws();
        if self.peek() == Some('(') {
            let inner = self.read_balanced('(', ')')?.to_string();
            let args = parse_annotation_args(&inner)?;
            Ok(Annotation { name, args })
        } else {
            self.pos = save;
            Ok(Annotation { name, args: Vec::new() })
        }
    }

    /// Consume a balanced bracket pair and return the text between the
    /// outermost brackets.
    fn read_balanced(&mut self, open: char, close: char) -> Result<&'a str> {
        let start = self.pos;
        let mut depth = 0usize;
        let mut in_str = false;
        let mut in_char = false;
        let mut escaped = false;
        while let Some(c) = self.bump() {
            if in_str || in_char {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if in_str && c == '"' {
                    in_str = false;
                } else if in_char && c == '\'' {
                    in_char = false;
                }
                continue;
            }
            match c {
                '"' => in_str = true,
                '\'' => in_char = true,
                c if c == open => depth += 1,
                c if c == close => {
                    depth -= 1;
                    if depth == 0 {
                        let inner_start = start + open.len_utf8();
                        let inner_end = self.pos - close.len_utf8();
                        return Ok(&self.src[inner_start..inner_end]);
                    }
                }
                _ => {}
            }
        }
        Err(GenError::ParseError(format!(
            "unbalanced {}...{} starting at offset {}",
            open, close, start
        )))
    }

    /// Read one class body member starting at the cursor. Doc comments and
    /// annotations are attached by the caller.
    fn read_member(&mut self, class_name: &str) -> Result<Member> {
        let start = self.pos;
        let base_col = self.column();
        let src = self.src;

        let mut sig: Option<char> = None;
        let mut sig_pos = 0usize;
        let mut paren_open: Option<usize> = None;
        let mut paren_close: Option<usize> = None;
        let mut end: Option<usize> = None;

        let mut depth_paren = 0i32;
        let mut depth_brace = 0i32;
        let mut in_str = false;
        let mut in_char = false;
        let mut escaped = false;
        let mut line_comment = false;
        let mut block_comment = false;
        let mut prev = '\0';

        let mut it = src[start..].char_indices().peekable();
        while let Some((off, c)) = it.next() {
            let abs = start + off;
            if line_comment {
                if c == '\n' {
                    line_comment = false;
                }
                prev = c;
                continue;
            }
            if block_comment {
                if prev == '*' && c == '/' {
                    block_comment = false;
                    prev = '\0';
                } else {
                    prev = c;
                }
                continue;
            }
            if in_str || in_char {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if in_str && c == '"' {
                    in_str = false;
                } else if in_char && c == '\'' {
                    in_char = false;
                }
                prev = c;
                continue;
            }
            match c {
                '/' if matches!(it.peek(), Some((_, '/'))) => line_comment = true,
                '/' if matches!(it.peek(), Some((_, '*'))) => {
                    block_comment = true;
                    it.next();
                }
                '"' => in_str = true,
                '\'' => in_char = true,
                '(' => {
                    if depth_paren == 0 && depth_brace == 0 && sig.is_none() {
                        sig = Some('(');
                        sig_pos = abs;
                        paren_open = Some(abs);
                    }
                    depth_paren += 1;
                }
                ')' => {
                    depth_paren -= 1;
                    if depth_paren == 0 && paren_open.is_some() && paren_close.is_none() {
                        paren_close = Some(abs);
                    }
                }
                '=' if depth_paren == 0 && depth_brace == 0 && sig.is_none() => {
                    sig = Some('=');
                    sig_pos = abs;
                }
                '{' => {
                    if depth_brace == 0 && depth_paren == 0 && sig.is_none() {
                        sig = Some('{');
                        sig_pos = abs;
                    }
                    depth_brace += 1;
                }
                '}' => {
                    depth_brace -= 1;
                    if depth_brace == 0 && matches!(sig, Some('(') | Some('{')) {
                        end = Some(abs + 1);
                        break;
                    }
                }
                ';' if depth_paren == 0 && depth_brace == 0 => {
                    if sig.is_none() {
                        sig = Some(';');
                        sig_pos = abs;
                    }
                    end = Some(abs + 1);
                    break;
                }
                _ => {}
            }
            prev = c;
        }

        let end = end.ok_or_else(|| {
            GenError::ParseError(format!("unterminated member in {}", class_name))
        })?;
        self.pos = end;
        let text = dedent(&src[start..end], base_col);

        match sig {
            Some('(') => {
                let open = paren_open.ok_or_else(|| {
                    GenError::ParseError("missing parameter list".into())
                })?;
                let close = paren_close.ok_or_else(|| {
                    GenError::ParseError("unbalanced parameter list".into())
                })?;
                let tokens = tokenize_decl(&src[start..open]);
                let name = tokens
                    .last()
                    .cloned()
                    .ok_or_else(|| GenError::ParseError("missing member name".into()))?;
                let arity = split_top_level(&src[open + 1..close], ',')
                    .iter()
                    .filter(|p| !p.trim().is_empty())
                    .count();
                let is_static = tokens.iter().any(|t| t == "static");
                let kind = if name == class_name {
                    MemberKind::Constructor
                } else {
                    MemberKind::Method
                };
                Ok(Member {
                    kind,
                    name,
                    arity,
                    ty: None,
                    is_static,
                    doc: None,
                    annotations: Vec::new(),
                    text,
                })
            }
            Some('=') | Some(';') => {
                let tokens = tokenize_decl(&src[start..sig_pos]);
                if tokens.len() < 2 {
                    return Err(GenError::ParseError(format!(
                        "malformed field declaration in {}",
                        class_name
                    )));
                }
                let name = tokens[tokens.len() - 1].trim_end_matches("[]").to_string();
                let ty = tokens[tokens.len() - 2].clone();
                let is_static = tokens.iter().any(|t| t == "static");
                Ok(Member {
                    kind: MemberKind::Field,
                    name,
                    arity: 0,
                    ty: Some(ty),
                    is_static,
                    doc: None,
                    annotations: Vec::new(),
                    text,
                })
            }
            // Initializer blocks and nested types are carried through as
            // opaque text.
            Some('{') => Ok(Member::comment(&text)),
            _ => Err(GenError::ParseError(format!(
                "unrecognized member in {}",
                class_name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::class::MemberKind;

    const SAMPLE: &str = r#"package com.shop;

import java.util.Date;

/**
 * order
 *
 * Generated by the Pengesoft model tool (template: JavaAdv); avoid editing this file directly.
 * Copyright (C) 2008 - Pengesoft
 */
public class Order extends pengesoft.data.DataPacket {

    // order number
    private String orderNo;

    // created at
    private Date createTime;

    /**
     * Gets the order number.
     *
     * @return the order number
     */
    public String getOrderNo() {
        return this.orderNo;
    }

    @Override
    public void clear() {
        super.clear();
        this.orderNo = null;
    }
}
"#;

    #[test]
    fn test_parse_class_header() {
        let file = parse_java(SAMPLE).unwrap();
        assert_eq!(file.package, "com.shop");
        assert_eq!(file.imports, vec!["java.util.Date".to_string()]);
        assert_eq!(file.class.name, "Order");
        assert_eq!(file.class.kind, TypeKind::Class);
        assert_eq!(file.class.modifiers, "public");
        assert_eq!(
            file.class.extends.as_deref(),
            Some("pengesoft.data.DataPacket")
        );
        assert!(file.class.doc.as_deref().unwrap().contains("JavaAdv"));
    }

    #[test]
    fn test_parse_members() {
        let file = parse_java(SAMPLE).unwrap();
        let class = &file.class;
        assert_eq!(class.members.len(), 4);

        let field = &class.members[0];
        assert_eq!(field.kind, MemberKind::Field);
        assert_eq!(field.name, "orderNo");
        assert_eq!(field.ty.as_deref(), Some("String"));
        assert_eq!(field.doc.as_deref(), Some("// order number"));
        assert!(!field.is_static);

        let getter = &class.members[2];
        assert_eq!(getter.kind, MemberKind::Method);
        assert_eq!(getter.name, "getOrderNo");
        assert_eq!(getter.arity, 0);
        assert!(getter.doc.as_deref().unwrap().starts_with("/**"));

        let clear = &class.members[3];
        assert_eq!(clear.name, "clear");
        assert_eq!(clear.annotations.len(), 1);
        assert_eq!(clear.annotations[0].name, "Override");
        assert_eq!(
            clear.text,
            "public void clear() {\n    super.clear();\n    this.orderNo = null;\n}"
        );
    }

    #[test]
    fn test_round_trip_is_stable() {
        let file = parse_java(SAMPLE).unwrap();
        let rendered = render_java(&file);
        assert_eq!(rendered, SAMPLE);
        let reparsed = parse_java(&rendered).unwrap();
        assert_eq!(reparsed, file);
    }

    #[test]
    fn test_parse_interface() {
        let src = "package com.shop;\n\npublic interface IOrderDao extends pengesoft.db.IDataProvider<Order> {\n\n    int addOrder(String uid, Order item);\n}\n";
        let file = parse_java(src).unwrap();
        assert_eq!(file.class.kind, TypeKind::Interface);
        let m = &file.class.members[0];
        assert_eq!(m.kind, MemberKind::Method);
        assert_eq!(m.name, "addOrder");
        assert_eq!(m.arity, 2);
    }

    #[test]
    fn test_parse_constructor_and_constant() {
        let src = r#"package com.shop;

public class OrderQueryPara extends pengesoft.db.QueryParameter {

    /**
     * Constant query attribute name (order number).
     */
    public static final String QueryAttr_OrderNo = "orderNo";

    public OrderQueryPara() {
        this(null, null, false);
    }

    public OrderQueryPara(Order data, String order, boolean isAse) {
        SetQueryPara(data, order, isAse);
    }
}
"#;
        let file = parse_java(src).unwrap();
        let class = &file.class;
        let constant = &class.members[0];
        assert_eq!(constant.kind, MemberKind::Field);
        assert!(constant.is_static);
        assert_eq!(constant.name, "QueryAttr_OrderNo");

        let default_ctor = &class.members[1];
        assert_eq!(default_ctor.kind, MemberKind::Constructor);
        assert_eq!(default_ctor.arity, 0);

        let para_ctor = &class.members[2];
        assert_eq!(para_ctor.kind, MemberKind::Constructor);
        assert_eq!(para_ctor.arity, 3);
    }

    #[test]
    fn test_parse_class_annotation_args() {
        let src = "package com.shop;\n\n@EntityDesc(tbName = \"t_order\", desc = \"order\", logicDel = false, index = {\"a\", \"b\"})\npublic class Order {\n}\n";
        let file = parse_java(src).unwrap();
        let anno = &file.class.annotations[0];
        assert_eq!(anno.simple_name(), "EntityDesc");
        assert_eq!(anno.str_arg("tbName").as_deref(), Some("t_order"));
        assert_eq!(anno.bool_arg("logicDel"), Some(false));
        match anno.get("index") {
            Some(AnnotationValue::List(items)) => assert_eq!(items.len(), 2),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_comment_member() {
        let src = "package com.shop;\n\npublic class OrderDao {\n\n    /*\n     * default statement ids:\n     * insertOrder\n     */\n}\n";
        let file = parse_java(src).unwrap();
        let m = &file.class.members[0];
        assert_eq!(m.kind, MemberKind::Comment);
        assert_eq!(m.name, "default statement ids:");
        let rendered = render_java(&file);
        assert_eq!(rendered, src);
    }

    #[test]
    fn test_parse_rejects_non_java() {
        assert!(parse_java("not a java file").is_err());
        assert!(parse_java("").is_err());
    }
}
