//! Query result list generation
//!
//! `{Name}List` is a thin typed wrapper over the shared query list base,
//! two constructors and nothing else.

use crate::codegen::{class_banner, QUERY_DATA_LIST};
use crate::parser::EntityDescription;
use crate::tree::{Anchor, ClassSpec, Member, MemberSpec, TypeKind};

/// Build the merge plan for `{Name}List`.
pub fn query_list_spec(desc: &EntityDescription) -> ClassSpec {
    let list_name = desc.list_name();
    let mut spec = ClassSpec::new(&desc.package, &list_name, TypeKind::Class);
    spec.doc = Some(class_banner(
        &format!("Summary of the {} list.", desc.description),
        "JavaListAdv",
    ));
    spec.extends = Some(format!("{}<{}>", QUERY_DATA_LIST, desc.class_name));

    spec.members.push(MemberSpec::keep(
        Member::constructor(
            &list_name,
            0,
            Some("/**\n * Default constructor.\n */".to_string()),
            &format!("public {}() {{\n    super();\n}}", list_name),
        ),
        Anchor::Tail,
    ));
    spec.members.push(MemberSpec::keep(
        Member::constructor(
            &list_name,
            1,
            Some(
                "/**\n * Builds the list from an existing collection.\n *\n * @param c existing collection\n */"
                    .to_string(),
            ),
            &format!(
                "public {list}(java.util.Collection<{entity}> c) {{\n    super(c);\n}}",
                list = list_name,
                entity = desc.class_name
            ),
        ),
        Anchor::after_constructor(&list_name, 0),
    ));

    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Project, SourceTree};

    #[test]
    fn test_list_spec() {
        let desc = EntityDescription::new("com.shop", "Order", "t_order", "customer order");
        let spec = query_list_spec(&desc);
        assert_eq!(spec.name, "OrderList");
        assert_eq!(
            spec.extends.as_deref(),
            Some("pengesoft.db.QueryDataList<Order>")
        );
        let doc = spec.doc.as_ref().unwrap();
        assert!(doc.contains("Summary of the customer order list."));
        assert!(doc.contains("JavaListAdv"));

        assert_eq!(spec.members.len(), 2);
        assert_eq!(spec.members[1].anchor, Anchor::after_constructor("OrderList", 0));
        assert!(spec.members[1]
            .member
            .text
            .contains("public OrderList(java.util.Collection<Order> c)"));
    }

    #[test]
    fn test_render() {
        let desc = EntityDescription::new("com.shop", "Order", "t_order", "customer order");
        let mut project = Project::in_memory(&["app"]);
        project.apply_class("app", &query_list_spec(&desc)).unwrap();
        let text = project.file_text("app", "com/shop/OrderList.java").unwrap();
        assert!(text.contains("public class OrderList extends pengesoft.db.QueryDataList<Order> {"));
        assert!(text.contains("super(c);"));
    }
}
