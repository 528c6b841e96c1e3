//! Entity class generation
//!
//! The entity carries the described fields, their accessors and the three
//! lifecycle methods. Fields and accessors are merge-safe (KeepExisting so
//! hand edits survive); clear/assignFrom/toString are regenerated on every
//! run, and fields dropped from the description are pruned together with
//! their accessors.

use crate::codegen::naming;
use crate::codegen::{class_banner, FieldType, TypeResolver, DATA_PACKET};
use crate::parser::{EntityDescription, FieldDescription, SKIP_MARKER};
use crate::tree::{Anchor, Annotation, ClassSpec, Member, MemberSpec, RetainPlan, TypeKind};

/// Build the merge plan for the entity class itself.
pub fn entity_spec(desc: &EntityDescription) -> ClassSpec {
    let mut spec = ClassSpec::new(&desc.package, &desc.class_name, TypeKind::Class);
    spec.doc = Some(class_banner(&desc.description, "JavaAdv"));
    spec.extends = Some(DATA_PACKET.to_string());

    let resolved: Vec<FieldType> = desc
        .fields
        .iter()
        .map(|f| TypeResolver::resolve(&f.java_type))
        .collect();
    if resolved.contains(&FieldType::Decimal) {
        spec.imports.push("java.math.BigDecimal".to_string());
    }
    if resolved.contains(&FieldType::Date) {
        spec.imports.push("java.util.Date".to_string());
    }

    // Field declarations, each anchored behind its predecessor.
    for (index, field) in desc.fields.iter().enumerate() {
        let anchor = if index == 0 {
            Anchor::Head
        } else {
            Anchor::after_field(&desc.fields[index - 1].name)
        };
        spec.members.push(MemberSpec::keep(field_member(field), anchor));
    }

    // Accessor pairs, each getter chained behind the previous field's setter.
    for (index, field) in desc.fields.iter().enumerate() {
        let getter = getter_member(field);
        let getter_anchor = if index == 0 {
            Anchor::Tail
        } else {
            Anchor::after_method(&naming::setter_name(&desc.fields[index - 1].name))
        };
        let setter_anchor = Anchor::after_method(&getter.name);
        spec.members.push(MemberSpec::keep(getter, getter_anchor));
        spec.members
            .push(MemberSpec::keep(setter_member(field), setter_anchor));
    }

    spec.members
        .push(MemberSpec::replace(clear_member(desc), Anchor::Tail));
    spec.members
        .push(MemberSpec::replace(assign_from_member(desc), Anchor::Tail));
    spec.members
        .push(MemberSpec::replace(to_string_member(), Anchor::Tail));

    spec.retain = RetainPlan::fields(desc.fields.iter().map(|f| f.name.as_str()));
    spec
}

fn field_member(field: &FieldDescription) -> Member {
    let doc = if field.skip {
        format!("// {} {}", field.description, SKIP_MARKER)
    } else {
        format!("// {}", field.description)
    };
    Member::field(
        &field.name,
        &field.java_type,
        Some(doc),
        &format!("private {} {};", field.java_type, field.name),
    )
}

fn getter_member(field: &FieldDescription) -> Member {
    let is_bool = TypeResolver::resolve(&field.java_type) == FieldType::Boolean;
    let name = naming::getter_name(&field.name, is_bool);
    let doc = format!(
        "/**\n * Gets the {d}.\n *\n * @return {d}\n */",
        d = field.description
    );
    let text = format!(
        "public {} {}() {{\n    return this.{};\n}}",
        field.java_type, name, field.name
    );
    Member::method(&name, 0, Some(doc), &text)
}

fn setter_member(field: &FieldDescription) -> Member {
    let name = naming::setter_name(&field.name);
    let doc = format!(
        "/**\n * Sets the {d}.\n *\n * @param {f} {d}\n */",
        d = field.description,
        f = field.name
    );
    let text = format!(
        "public void {name}({ty} {f}) {{\n    this.{f} = {f};\n}}",
        name = name,
        ty = field.java_type,
        f = field.name
    );
    Member::method(&name, 1, Some(doc), &text)
}

fn clear_member(desc: &EntityDescription) -> Member {
    let mut body = String::new();
    for field in &desc.fields {
        let default = TypeResolver::resolve(&field.java_type).default_literal();
        body.push_str(&format!("    this.{} = {};\n", field.name, default));
    }
    let text = format!("public void clear() {{\n    super.clear();\n{}}}", body);
    Member::method("clear", 0, None, &text).with_annotations(vec![Annotation::marker("Override")])
}

fn assign_from_member(desc: &EntityDescription) -> Member {
    let n = &desc.class_name;
    let mut body = String::new();
    for field in &desc.fields {
        body.push_str(&assign_item(field));
    }
    let text = format!(
        "public void assignFrom({base} sou) {{\n    super.assignFrom(sou);\n    if (!(sou instanceof {n})) {{\n        return;\n    }}\n    {n} s = ({n}) sou;\n{body}}}",
        base = DATA_PACKET,
        n = n,
        body = body
    );
    Member::method("assignFrom", 1, None, &text)
        .with_annotations(vec![Annotation::marker("Override")])
}

/// One copy statement of assignFrom. Primitives, boxed values and strings
/// copy directly; BigDecimal and Date take a value copy under a null guard;
/// anything else gets the nested construct-and-assignFrom path.
fn assign_item(field: &FieldDescription) -> String {
    let f = &field.name;
    match TypeResolver::resolve(&field.java_type) {
        FieldType::Decimal => format!(
            "    if (s.{f} != null)\n        this.{f} = s.{f}.add(BigDecimal.ZERO);\n",
            f = f
        ),
        FieldType::Date => format!(
            "    if (s.{f} != null)\n        this.{f} = new Date(s.{f}.getTime());\n",
            f = f
        ),
        ty if ty.is_custom() => format!(
            "    if (s.{f} != null) {{\n        this.{f} = new {ty}();\n        this.{f}.assignFrom(s.{f});\n    }}\n",
            f = f,
            ty = field.java_type
        ),
        _ => format!("    this.{f} = s.{f};\n", f = f),
    }
}

fn to_string_member() -> Member {
    Member::method(
        "toString",
        0,
        None,
        "public String toString() {\n    return this.getJsonText();\n}",
    )
    .with_annotations(vec![Annotation::marker("Override")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{MemberKind, MergePolicy, Project, SourceTree};

    fn make_desc() -> EntityDescription {
        let mut desc = EntityDescription::new("com.shop", "Order", "t_order", "customer order");
        let mut order_no = FieldDescription::new("orderNo", "String", "order number", "OrderNo");
        order_no.primary = true;
        desc.fields.push(order_no);
        desc.fields.push(FieldDescription::new(
            "amount",
            "java.math.BigDecimal",
            "amount",
            "Amount",
        ));
        desc.fields.push(FieldDescription::new(
            "createTime",
            "java.util.Date",
            "create time",
            "CreateTime",
        ));
        desc.fields.push(FieldDescription::new(
            "address",
            "com.shop.Address",
            "delivery address",
            "Address",
        ));
        desc.ensure_flag_del();
        desc
    }

    #[test]
    fn test_spec_shape() {
        let desc = make_desc();
        let spec = entity_spec(&desc);
        assert_eq!(spec.name, "Order");
        assert_eq!(spec.extends.as_deref(), Some(DATA_PACKET));
        let doc = spec.doc.unwrap();
        assert!(doc.contains("customer order"));
        assert!(doc.contains("JavaAdv"));
        assert!(spec.imports.contains(&"java.math.BigDecimal".to_string()));
        assert!(spec.imports.contains(&"java.util.Date".to_string()));
        assert_eq!(spec.retain.fields.as_ref().unwrap().len(), 5);
    }

    #[test]
    fn test_field_members_and_anchors() {
        let desc = make_desc();
        let spec = entity_spec(&desc);
        let fields: Vec<&MemberSpec> = spec
            .members
            .iter()
            .filter(|m| m.member.kind == MemberKind::Field)
            .collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0].anchor, Anchor::Head);
        assert_eq!(fields[1].anchor, Anchor::after_field("orderNo"));
        assert_eq!(fields[0].member.doc.as_deref(), Some("// order number"));
        assert_eq!(fields[0].member.text, "private String orderNo;");
        assert_eq!(fields[0].policy, MergePolicy::KeepExisting);
    }

    #[test]
    fn test_skip_marker_in_field_comment() {
        let mut desc = make_desc();
        desc.fields[1].skip = true;
        let spec = entity_spec(&desc);
        let amount = spec
            .members
            .iter()
            .find(|m| m.member.name == "amount" && m.member.kind == MemberKind::Field)
            .unwrap();
        assert_eq!(amount.member.doc.as_deref(), Some("// amount @pass"));
    }

    #[test]
    fn test_accessor_members() {
        let desc = make_desc();
        let spec = entity_spec(&desc);

        let flag_getter = spec
            .members
            .iter()
            .find(|m| m.member.name == "isFlagDel")
            .unwrap();
        assert!(flag_getter.member.text.contains("public boolean isFlagDel()"));

        // The second field's getter chains behind the first field's setter.
        let amount_getter = spec
            .members
            .iter()
            .find(|m| m.member.name == "getAmount")
            .unwrap();
        assert_eq!(amount_getter.anchor, Anchor::after_method("setOrderNo"));

        let setter = spec
            .members
            .iter()
            .find(|m| m.member.name == "setAmount")
            .unwrap();
        assert_eq!(setter.anchor, Anchor::after_method("getAmount"));
        assert!(setter
            .member
            .text
            .contains("public void setAmount(java.math.BigDecimal amount)"));
    }

    #[test]
    fn test_clear_defaults() {
        let desc = make_desc();
        let spec = entity_spec(&desc);
        let clear = spec
            .members
            .iter()
            .find(|m| m.member.name == "clear")
            .unwrap();
        assert_eq!(clear.policy, MergePolicy::Replace);
        let text = &clear.member.text;
        assert!(text.contains("super.clear();"));
        assert!(text.contains("this.orderNo = null;"));
        assert!(text.contains("this.amount = java.math.BigDecimal.ZERO;"));
        assert!(text.contains("this.flagDel = false;"));
        assert_eq!(clear.member.annotations[0].simple_name(), "Override");
    }

    #[test]
    fn test_assign_from_variants() {
        let desc = make_desc();
        let spec = entity_spec(&desc);
        let assign = spec
            .members
            .iter()
            .find(|m| m.member.name == "assignFrom")
            .unwrap();
        let text = &assign.member.text;
        assert!(text.contains("if (!(sou instanceof Order))"));
        assert!(text.contains("Order s = (Order) sou;"));
        assert!(text.contains("this.orderNo = s.orderNo;"));
        assert!(text.contains("this.amount = s.amount.add(BigDecimal.ZERO);"));
        assert!(text.contains("this.createTime = new Date(s.createTime.getTime());"));
        assert!(text.contains("this.address = new com.shop.Address();"));
        assert!(text.contains("this.address.assignFrom(s.address);"));
    }

    #[test]
    fn test_apply_twice_is_stable() {
        let desc = make_desc();
        let spec = entity_spec(&desc);
        let mut project = Project::in_memory(&["app"]);

        let first = project.apply_class("app", &spec).unwrap();
        assert!(first.created);
        let rendered = project.file_text("app", "com/shop/Order.java").unwrap();
        assert!(rendered.contains("public class Order extends pengesoft.data.DataPacket {"));

        let second = project.apply_class("app", &spec).unwrap();
        assert!(!second.changed());
        assert_eq!(
            project.file_text("app", "com/shop/Order.java").unwrap(),
            rendered
        );
    }
}
