//! Structural model of a Java compilation unit and the merge plan types
//!
//! Generators never emit whole files. They produce a `ClassSpec` describing
//! the members a class must contain, and the merge engine reconciles that
//! plan against whatever already exists on disk.

use std::collections::BTreeSet;

/// Kind of top-level type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
        }
    }
}

/// Kind of class body member.
///
/// `Comment` covers standalone comments that sit between members, such as
/// the statement-id listing appended to DAO implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Constructor,
    Method,
    Comment,
}

/// A parsed annotation argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Str(String),
    Bool(bool),
    Int(i64),
    /// `Foo.class` style reference, stored without the `.class` suffix.
    ClassRef(String),
    /// Bare expression we do not interpret further (enum constants and so on).
    Ident(String),
    /// `{a, b}` array initializer.
    List(Vec<AnnotationValue>),
}

impl AnnotationValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AnnotationValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Render the value back to Java source form.
    pub fn render(&self) -> String {
        match self {
            AnnotationValue::Str(s) => format!("\"{}\"", s),
            AnnotationValue::Bool(b) => b.to_string(),
            AnnotationValue::Int(n) => n.to_string(),
            AnnotationValue::ClassRef(c) => format!("{}.class", c),
            AnnotationValue::Ident(i) => i.clone(),
            AnnotationValue::List(items) => {
                let inner: Vec<String> = items.iter().map(|v| v.render()).collect();
                format!("{{{}}}", inner.join(", "))
            }
        }
    }
}

/// An annotation attached to a class or member.
///
/// A single unnamed argument is stored under the key `value`, mirroring the
/// Java language rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Name as written in source, possibly qualified.
    pub name: String,
    pub args: Vec<(String, AnnotationValue)>,
}

impl Annotation {
    pub fn marker(name: &str) -> Self {
        Annotation {
            name: name.to_string(),
            args: Vec::new(),
        }
    }

    /// Simple name with any package qualifier stripped.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.args.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn str_arg(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str()).map(str::to_string)
    }

    pub fn bool_arg(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    pub fn int_arg(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_int())
    }

    /// Render back to Java source form.
    pub fn render(&self) -> String {
        if self.args.is_empty() {
            return format!("@{}", self.name);
        }
        if self.args.len() == 1 && self.args[0].0 == "value" {
            return format!("@{}({})", self.name, self.args[0].1.render());
        }
        let args: Vec<String> = self
            .args
            .iter()
            .map(|(k, v)| format!("{} = {}", k, v.render()))
            .collect();
        format!("@{}({})", self.name, args.join(", "))
    }
}

/// A single class body member.
///
/// `text` holds the declaration itself with every line at column zero; the
/// renderer indents it. Leading comments and annotations are kept apart so
/// the merge engine can compare and replace them independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub kind: MemberKind,
    /// Identity name. Comments are named by their first non-empty inner line.
    pub name: String,
    /// Parameter count for methods and constructors, zero otherwise.
    pub arity: usize,
    /// Declared type for fields, return type for methods.
    pub ty: Option<String>,
    pub is_static: bool,
    /// Comment block directly above the declaration, delimiters included.
    pub doc: Option<String>,
    pub annotations: Vec<Annotation>,
    pub text: String,
}

impl Member {
    pub fn field(name: &str, ty: &str, doc: Option<String>, text: &str) -> Self {
        Member {
            kind: MemberKind::Field,
            name: name.to_string(),
            arity: 0,
            ty: Some(ty.to_string()),
            is_static: false,
            doc,
            annotations: Vec::new(),
            text: text.to_string(),
        }
    }

    pub fn constant(name: &str, ty: &str, doc: Option<String>, text: &str) -> Self {
        Member {
            is_static: true,
            ..Member::field(name, ty, doc, text)
        }
    }

    pub fn constructor(class_name: &str, arity: usize, doc: Option<String>, text: &str) -> Self {
        Member {
            kind: MemberKind::Constructor,
            name: class_name.to_string(),
            arity,
            ty: None,
            is_static: false,
            doc,
            annotations: Vec::new(),
            text: text.to_string(),
        }
    }

    pub fn method(name: &str, arity: usize, doc: Option<String>, text: &str) -> Self {
        Member {
            kind: MemberKind::Method,
            name: name.to_string(),
            arity,
            ty: None,
            is_static: false,
            doc,
            annotations: Vec::new(),
            text: text.to_string(),
        }
    }

    /// Standalone comment member. `text` is the full comment including
    /// delimiters; identity is derived from the first non-empty inner line.
    pub fn comment(text: &str) -> Self {
        Member {
            kind: MemberKind::Comment,
            name: comment_label(text),
            arity: 0,
            ty: None,
            is_static: false,
            doc: None,
            annotations: Vec::new(),
            text: text.to_string(),
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    /// True when this member matches the given identity. Constructors are
    /// distinguished by arity because they all share the class name; every
    /// other kind is keyed by name alone.
    pub fn matches(&self, kind: MemberKind, name: &str, arity: Option<usize>) -> bool {
        if self.kind != kind || self.name != name {
            return false;
        }
        match (kind, arity) {
            (MemberKind::Constructor, Some(n)) => self.arity == n,
            _ => true,
        }
    }
}

/// Identity label for a standalone comment: its first non-empty inner line
/// with comment punctuation stripped.
pub fn comment_label(text: &str) -> String {
    for line in text.lines() {
        let stripped = line
            .trim()
            .trim_start_matches("/**")
            .trim_start_matches("/*")
            .trim_start_matches("//")
            .trim_start_matches('*')
            .trim_end_matches("*/")
            .trim();
        if !stripped.is_empty() {
            return stripped.to_string();
        }
    }
    String::new()
}

/// Where a missing member is inserted.
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// Before every existing member.
    Head,
    /// After every existing member.
    Tail,
    /// Directly after the named member, falling back to the end of the class
    /// body when the anchor is absent.
    After {
        kind: MemberKind,
        name: String,
        arity: Option<usize>,
    },
}

impl Anchor {
    pub fn after_field(name: &str) -> Self {
        Anchor::After {
            kind: MemberKind::Field,
            name: name.to_string(),
            arity: None,
        }
    }

    pub fn after_method(name: &str) -> Self {
        Anchor::After {
            kind: MemberKind::Method,
            name: name.to_string(),
            arity: None,
        }
    }

    pub fn after_constructor(class_name: &str, arity: usize) -> Self {
        Anchor::After {
            kind: MemberKind::Constructor,
            name: class_name.to_string(),
            arity: Some(arity),
        }
    }
}

/// How an already-present member is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Leave the existing member untouched.
    KeepExisting,
    /// Rewrite the existing member in place when its content differs.
    Replace,
}

/// One planned member together with its merge behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSpec {
    pub member: Member,
    pub policy: MergePolicy,
    pub anchor: Anchor,
}

impl MemberSpec {
    pub fn keep(member: Member, anchor: Anchor) -> Self {
        MemberSpec {
            member,
            policy: MergePolicy::KeepExisting,
            anchor,
        }
    }

    pub fn replace(member: Member, anchor: Anchor) -> Self {
        MemberSpec {
            member,
            policy: MergePolicy::Replace,
            anchor,
        }
    }
}

/// Prune rules applied after member placement.
///
/// `fields` lists the instance fields allowed to survive; any other
/// non-static field is removed together with its accessors. `methods` does
/// the same for methods. `None` disables pruning of that member kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetainPlan {
    pub fields: Option<BTreeSet<String>>,
    pub methods: Option<BTreeSet<String>>,
}

impl RetainPlan {
    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RetainPlan {
            fields: Some(names.into_iter().map(Into::into).collect()),
            methods: None,
        }
    }

    pub fn methods<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RetainPlan {
            fields: None,
            methods: Some(names.into_iter().map(Into::into).collect()),
        }
    }
}

/// Complete plan for one generated class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSpec {
    pub package: String,
    pub name: String,
    pub kind: TypeKind,
    /// Class banner comment; `None` leaves any existing banner alone.
    pub doc: Option<String>,
    pub annotations: Vec<Annotation>,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub imports: Vec<String>,
    pub members: Vec<MemberSpec>,
    pub retain: RetainPlan,
}

impl ClassSpec {
    pub fn new(package: &str, name: &str, kind: TypeKind) -> Self {
        ClassSpec {
            package: package.to_string(),
            name: name.to_string(),
            kind,
            doc: None,
            annotations: Vec::new(),
            extends: None,
            implements: Vec::new(),
            imports: Vec::new(),
            members: Vec::new(),
            retain: RetainPlan::default(),
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

    pub fn file_name(&self) -> String {
        format!("{}.java", self.name)
    }
}

/// A parsed top-level type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaClass {
    pub name: String,
    pub kind: TypeKind,
    /// Modifier string before the type keyword, normally `public`.
    pub modifiers: String,
    pub doc: Option<String>,
    pub annotations: Vec<Annotation>,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub members: Vec<Member>,
}

impl JavaClass {
    pub fn new(name: &str, kind: TypeKind) -> Self {
        JavaClass {
            name: name.to_string(),
            kind,
            modifiers: "public".to_string(),
            doc: None,
            annotations: Vec::new(),
            extends: None,
            implements: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn find_member(&self, kind: MemberKind, name: &str, arity: Option<usize>) -> Option<usize> {
        self.members
            .iter()
            .position(|m| m.matches(kind, name, arity))
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.find_member(MemberKind::Method, name, None).is_some()
    }

    /// Instance fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Member> {
        self.members
            .iter()
            .filter(|m| m.kind == MemberKind::Field && !m.is_static)
    }

    /// Static fields in declaration order.
    pub fn constants(&self) -> impl Iterator<Item = &Member> {
        self.members
            .iter()
            .filter(|m| m.kind == MemberKind::Field && m.is_static)
    }

    pub fn methods(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.kind == MemberKind::Method)
    }

    /// Look up a class annotation by simple name.
    pub fn annotation(&self, simple: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.simple_name() == simple)
    }
}

/// A parsed `.java` file: package header, imports and one public type.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaFile {
    pub package: String,
    pub imports: Vec<String>,
    pub class: JavaClass,
}

impl JavaFile {
    pub fn new(package: &str, class: JavaClass) -> Self {
        JavaFile {
            package: package.to_string(),
            imports: Vec::new(),
            class,
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.class.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_render_forms() {
        let marker = Annotation::marker("Override");
        assert_eq!(marker.render(), "@Override");

        let single = Annotation {
            name: "SuppressWarnings".to_string(),
            args: vec![(
                "value".to_string(),
                AnnotationValue::Str("unused".to_string()),
            )],
        };
        assert_eq!(single.render(), "@SuppressWarnings(\"unused\")");

        let multi = Annotation {
            name: "EntityDesc".to_string(),
            args: vec![
                ("tbName".to_string(), AnnotationValue::Str("t_order".to_string())),
                ("logicDel".to_string(), AnnotationValue::Bool(false)),
            ],
        };
        assert_eq!(
            multi.render(),
            "@EntityDesc(tbName = \"t_order\", logicDel = false)"
        );
    }

    #[test]
    fn test_annotation_simple_name() {
        let qualified = Annotation::marker("org.springframework.stereotype.Repository");
        assert_eq!(qualified.simple_name(), "Repository");
        assert_eq!(Annotation::marker("Repository").simple_name(), "Repository");
    }

    #[test]
    fn test_annotation_value_render() {
        assert_eq!(AnnotationValue::ClassRef("Base".to_string()).render(), "Base.class");
        let list = AnnotationValue::List(vec![
            AnnotationValue::Str("a".to_string()),
            AnnotationValue::Str("b".to_string()),
        ]);
        assert_eq!(list.render(), "{\"a\", \"b\"}");
    }

    #[test]
    fn test_member_identity() {
        let m = Member::method("setParamByName", 1, None, "public void setParamByName(String v) {\n}");
        assert!(m.matches(MemberKind::Method, "setParamByName", None));
        // Methods are keyed by name alone.
        assert!(m.matches(MemberKind::Method, "setParamByName", Some(2)));
        assert!(!m.matches(MemberKind::Field, "setParamByName", None));

        let c = Member::constructor("OrderList", 1, None, "public OrderList(int cap) {\n}");
        assert!(c.matches(MemberKind::Constructor, "OrderList", Some(1)));
        assert!(!c.matches(MemberKind::Constructor, "OrderList", Some(2)));
        assert!(c.matches(MemberKind::Constructor, "OrderList", None));
    }

    #[test]
    fn test_comment_label() {
        let text = "/*\n * Statement ids defined in com.shop.dao.OrderDao:\n * insertOrder\n */";
        assert_eq!(
            comment_label(text),
            "Statement ids defined in com.shop.dao.OrderDao:"
        );
        assert_eq!(comment_label("// single line"), "single line");
    }

    #[test]
    fn test_find_member_in_class() {
        let mut class = JavaClass::new("Order", TypeKind::Class);
        class.members.push(Member::field("name", "String", None, "private String name;"));
        class.members.push(Member::method("getName", 0, None, "public String getName() {\n}"));

        assert_eq!(class.find_member(MemberKind::Field, "name", None), Some(0));
        assert_eq!(class.find_member(MemberKind::Method, "getName", None), Some(1));
        assert_eq!(class.find_member(MemberKind::Method, "getNope", None), None);
        assert!(class.has_method("getName"));
        assert_eq!(class.fields().count(), 1);
    }
}
