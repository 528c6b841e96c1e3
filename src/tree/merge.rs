//! Merge engine reconciling a generated ClassSpec with existing source
//!
//! Presence checks, not overwrites: members the class already has are kept
//! or rewritten in place according to the member policy, missing members
//! are inserted at their anchor, and retain plans prune what the metadata
//! no longer describes. Applying the same spec twice is a no-op.

use std::collections::BTreeSet;

use crate::codegen::naming;
use crate::tree::class::{
    Anchor, ClassSpec, JavaClass, JavaFile, MemberKind, MergePolicy,
};

/// What a merge changed. `created` is set by the caller when the file did
/// not exist before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub created: bool,
    pub added: usize,
    pub replaced: usize,
    pub removed: usize,
    pub header_updated: bool,
}

impl MergeReport {
    pub fn changed(&self) -> bool {
        self.created
            || self.added > 0
            || self.replaced > 0
            || self.removed > 0
            || self.header_updated
    }
}

/// Apply a class plan to a parsed file.
pub fn apply_spec(file: &mut JavaFile, spec: &ClassSpec) -> MergeReport {
    let mut report = MergeReport::default();

    if file.package != spec.package {
        file.package = spec.package.clone();
        report.header_updated = true;
    }
    for imp in &spec.imports {
        if !file.imports.iter().any(|i| i == imp) {
            file.imports.push(imp.clone());
            report.header_updated = true;
        }
    }

    let class = &mut file.class;
    if let Some(doc) = &spec.doc {
        if class.doc.as_deref() != Some(doc.as_str()) {
            class.doc = Some(doc.clone());
            report.header_updated = true;
        }
    }
    for anno in &spec.annotations {
        if class.annotation(anno.simple_name()).is_none() {
            class.annotations.push(anno.clone());
            report.header_updated = true;
        }
    }
    if class.extends.is_none() && spec.extends.is_some() {
        class.extends = spec.extends.clone();
        report.header_updated = true;
    }
    for iface in &spec.implements {
        if !class.implements.iter().any(|i| i == iface) {
            class.implements.push(iface.clone());
            report.header_updated = true;
        }
    }

    for planned in &spec.members {
        let member = &planned.member;
        let arity = match member.kind {
            MemberKind::Constructor => Some(member.arity),
            _ => None,
        };
        match class.find_member(member.kind, &member.name, arity) {
            Some(i) => {
                if planned.policy == MergePolicy::Replace && class.members[i] != *member {
                    class.members[i] = member.clone();
                    report.replaced += 1;
                }
            }
            None => {
                let at = insert_index(class, &planned.anchor);
                class.members.insert(at, member.clone());
                report.added += 1;
            }
        }
    }

    if let Some(keep) = &spec.retain.fields {
        report.removed += prune_fields(class, keep);
    }
    if let Some(keep) = &spec.retain.methods {
        report.removed += prune_methods(class, keep);
    }

    report
}

fn insert_index(class: &JavaClass, anchor: &Anchor) -> usize {
    match anchor {
        Anchor::Head => 0,
        Anchor::Tail => class.members.len(),
        Anchor::After { kind, name, arity } => match class.find_member(*kind, name, *arity) {
            Some(i) => i + 1,
            None => class.members.len(),
        },
    }
}

/// Remove instance fields not named in `keep`, together with the accessor
/// pair derived from each removed field's declared type.
fn prune_fields(class: &mut JavaClass, keep: &BTreeSet<String>) -> usize {
    let stale: Vec<(String, bool)> = class
        .fields()
        .filter(|m| !keep.contains(&m.name))
        .map(|m| (m.name.clone(), m.ty.as_deref() == Some("boolean")))
        .collect();

    let mut removed = 0;
    for (name, is_boolean) in stale {
        let getter = naming::getter_name(&name, is_boolean);
        let setter = naming::setter_name(&name);
        removed += remove_members(class, |m| {
            m.kind == MemberKind::Field && !m.is_static && m.name == name
        });
        removed += remove_members(class, |m| {
            m.kind == MemberKind::Method && (m.name == getter || m.name == setter)
        });
    }
    removed
}

fn prune_methods(class: &mut JavaClass, keep: &BTreeSet<String>) -> usize {
    remove_members(class, |m| {
        m.kind == MemberKind::Method && !keep.contains(&m.name)
    })
}

fn remove_members<F>(class: &mut JavaClass, stale: F) -> usize
where
    F: Fn(&crate::tree::class::Member) -> bool,
{
    let before = class.members.len();
    class.members.retain(|m| !stale(m));
    before - class.members.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::class::{Member, MemberSpec, RetainPlan, TypeKind};

    fn empty_file(name: &str) -> JavaFile {
        JavaFile::new("com.shop", JavaClass::new(name, TypeKind::Class))
    }

    fn order_spec() -> ClassSpec {
        let mut spec = ClassSpec::new("com.shop", "Order", TypeKind::Class);
        spec.extends = Some("pengesoft.data.DataPacket".to_string());
        spec.members.push(MemberSpec::keep(
            Member::field("orderNo", "String", Some("// order number".into()), "private String orderNo;"),
            Anchor::Tail,
        ));
        spec.members.push(MemberSpec::keep(
            Member::field("amount", "java.math.BigDecimal", Some("// amount".into()), "private java.math.BigDecimal amount;"),
            Anchor::after_field("orderNo"),
        ));
        spec
    }

    #[test]
    fn test_apply_to_empty_class() {
        let mut file = empty_file("Order");
        let report = apply_spec(&mut file, &order_spec());
        assert_eq!(report.added, 2);
        assert!(report.header_updated);
        assert_eq!(file.class.members[0].name, "orderNo");
        assert_eq!(file.class.members[1].name, "amount");
        assert_eq!(
            file.class.extends.as_deref(),
            Some("pengesoft.data.DataPacket")
        );
    }

    #[test]
    fn test_apply_twice_is_noop() {
        let mut file = empty_file("Order");
        apply_spec(&mut file, &order_spec());
        let second = apply_spec(&mut file, &order_spec());
        assert!(!second.changed());
    }

    #[test]
    fn test_keep_existing_preserves_edits() {
        let mut file = empty_file("Order");
        file.class.members.push(Member::field(
            "orderNo",
            "String",
            Some("// hand tuned".into()),
            "private String orderNo = \"N/A\";",
        ));
        apply_spec(&mut file, &order_spec());
        assert_eq!(file.class.members[0].doc.as_deref(), Some("// hand tuned"));
        assert!(file.class.members[0].text.contains("N/A"));
    }

    #[test]
    fn test_replace_rewrites_in_place() {
        let mut file = empty_file("Order");
        file.class.members.push(Member::method(
            "toString",
            0,
            None,
            "public String toString() {\n    return \"old\";\n}",
        ));
        file.class.members.push(Member::field(
            "orderNo",
            "String",
            None,
            "private String orderNo;",
        ));

        let mut spec = ClassSpec::new("com.shop", "Order", TypeKind::Class);
        let replacement = Member::method(
            "toString",
            0,
            None,
            "public String toString() {\n    return this.getJsonText();\n}",
        );
        spec.members.push(MemberSpec::replace(replacement, Anchor::Tail));

        let report = apply_spec(&mut file, &spec);
        assert_eq!(report.replaced, 1);
        // Position is preserved.
        assert_eq!(file.class.members[0].name, "toString");
        assert!(file.class.members[0].text.contains("getJsonText"));

        let second = apply_spec(&mut file, &spec);
        assert!(!second.changed());
    }

    #[test]
    fn test_insert_after_anchor() {
        let mut file = empty_file("Order");
        apply_spec(&mut file, &order_spec());

        // A new field arrives between the two existing ones.
        let mut spec = order_spec();
        spec.members.insert(
            1,
            MemberSpec::keep(
                Member::field("status", "int", Some("// status".into()), "private int status;"),
                Anchor::after_field("orderNo"),
            ),
        );
        let report = apply_spec(&mut file, &spec);
        assert_eq!(report.added, 1);
        let names: Vec<&str> = file.class.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["orderNo", "status", "amount"]);
    }

    #[test]
    fn test_insert_with_missing_anchor_appends() {
        let mut file = empty_file("Order");
        let mut spec = ClassSpec::new("com.shop", "Order", TypeKind::Class);
        spec.members.push(MemberSpec::keep(
            Member::field("amount", "int", None, "private int amount;"),
            Anchor::after_field("nope"),
        ));
        apply_spec(&mut file, &spec);
        assert_eq!(file.class.members.len(), 1);
    }

    #[test]
    fn test_prune_fields_and_accessors() {
        let mut file = empty_file("Order");
        let class = &mut file.class;
        class.members.push(Member::field("orderNo", "String", None, "private String orderNo;"));
        class.members.push(Member::field("legacy", "boolean", None, "private boolean legacy;"));
        class.members.push(Member::method(
            "isLegacy",
            0,
            None,
            "public boolean isLegacy() {\n    return this.legacy;\n}",
        ));
        class.members.push(Member::method(
            "setLegacy",
            1,
            None,
            "public void setLegacy(boolean legacy) {\n    this.legacy = legacy;\n}",
        ));
        class.members.push(Member::method(
            "getOrderNo",
            0,
            None,
            "public String getOrderNo() {\n    return this.orderNo;\n}",
        ));

        let mut spec = ClassSpec::new("com.shop", "Order", TypeKind::Class);
        spec.retain = RetainPlan::fields(["orderNo"]);
        let report = apply_spec(&mut file, &spec);
        assert_eq!(report.removed, 3);
        let names: Vec<&str> = file.class.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["orderNo", "getOrderNo"]);
    }

    #[test]
    fn test_prune_methods() {
        let mut file = empty_file("IOrderBaseSvr");
        file.class.members.push(Member::method("addOrder", 2, None, "int addOrder(String uid, Order item);"));
        file.class.members.push(Member::method("legacyOp", 0, None, "void legacyOp();"));

        let mut spec = ClassSpec::new("com.shop", "IOrderBaseSvr", TypeKind::Interface);
        spec.retain = RetainPlan::methods(["addOrder"]);
        let report = apply_spec(&mut file, &spec);
        assert_eq!(report.removed, 1);
        assert!(file.class.has_method("addOrder"));
        assert!(!file.class.has_method("legacyOp"));
    }

    #[test]
    fn test_constructor_identity_uses_arity() {
        let mut file = empty_file("OrderList");
        file.class.members.push(Member::constructor(
            "OrderList",
            0,
            None,
            "public OrderList() {\n    super();\n}",
        ));

        let mut spec = ClassSpec::new("com.shop", "OrderList", TypeKind::Class);
        spec.members.push(MemberSpec::keep(
            Member::constructor("OrderList", 0, None, "public OrderList() {\n    super();\n}"),
            Anchor::Tail,
        ));
        spec.members.push(MemberSpec::keep(
            Member::constructor(
                "OrderList",
                1,
                None,
                "public OrderList(java.util.Collection<Order> c) {\n    super(c);\n}",
            ),
            Anchor::after_constructor("OrderList", 0),
        ));
        let report = apply_spec(&mut file, &spec);
        assert_eq!(report.added, 1);
        assert_eq!(file.class.members.len(), 2);
        assert_eq!(file.class.members[1].arity, 1);
    }
}
