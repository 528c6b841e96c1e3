//! Service interface and base implementation generation
//!
//! `I{Name}BaseSvr` carries the nine conventional operations; its method set
//! follows the metadata exactly, so stale operations are pruned. The
//! implementation is merge-safe per method, letting subclass-style edits in
//! the base survive regeneration.

use crate::codegen::naming;
use crate::codegen::{class_banner, FieldType, TypeResolver};
use crate::parser::{EntityDescription, FieldDescription};
use crate::tree::{
    Anchor, Annotation, AnnotationValue, ClassSpec, Member, MemberSpec, RetainPlan, TypeKind,
};

/// Build the merge plan for `I{Name}BaseSvr`.
pub fn service_interface_spec(desc: &EntityDescription) -> ClassSpec {
    let mut spec = ClassSpec::new(
        &desc.package,
        &desc.service_interface_name(),
        TypeKind::Interface,
    );
    spec.doc = Some(class_banner(&desc.description, "JavaAdv"));
    spec.annotations.push(Annotation {
        name: "SuppressWarnings".to_string(),
        args: vec![(
            "value".to_string(),
            AnnotationValue::Str("unused".to_string()),
        )],
    });
    spec.imports.push("java.util.List".to_string());

    let methods = interface_methods(desc);
    spec.retain = RetainPlan::methods(methods.iter().map(|m| m.name.as_str()));
    for member in methods {
        spec.members.push(MemberSpec::replace(member, Anchor::Tail));
    }
    spec
}

/// Build the merge plan for `{Name}BaseSvr`.
pub fn service_impl_spec(desc: &EntityDescription) -> ClassSpec {
    let mut spec = ClassSpec::new(&desc.package, &desc.service_impl_name(), TypeKind::Class);
    spec.doc = Some(class_banner(&desc.description, "JavaAdv"));
    spec.implements.push(desc.service_interface_name());
    spec.annotations.push(Annotation::marker("Service"));
    spec.imports.push("java.util.List".to_string());
    spec.imports
        .push("org.springframework.beans.factory.annotation.Autowired".to_string());
    spec.imports
        .push("org.springframework.stereotype.Service".to_string());

    let dao_field = naming::dao_field_name(&desc.class_name);
    spec.members.push(MemberSpec::keep(
        Member::field(
            &dao_field,
            &desc.dao_interface_name(),
            None,
            &format!("protected {} {};", desc.dao_interface_name(), dao_field),
        )
        .with_annotations(vec![Annotation::marker("Autowired")]),
        Anchor::Head,
    ));

    for member in impl_methods(desc) {
        spec.members.push(MemberSpec::keep(member, Anchor::Tail));
    }
    spec
}

fn key_getter(key: &FieldDescription) -> String {
    let is_bool = TypeResolver::resolve(&key.java_type) == FieldType::Boolean;
    naming::getter_name(&key.name, is_bool)
}

fn interface_methods(desc: &EntityDescription) -> Vec<Member> {
    let n = &desc.class_name;
    let d = &desc.description;
    let qp = desc.query_para_name();
    let list = desc.list_name();
    vec![
        Member::method(
            &format!("add{}", n),
            2,
            Some(format!(
                "/**\n * Adds a {d}.\n *\n * @param uid  user id\n * @param item {d}\n * @return rows\n */",
                d = d
            )),
            &format!("int add{n}(String uid, {n} item);", n = n),
        ),
        Member::method(
            &format!("add{}List", n),
            2,
            Some(format!(
                "/**\n * Adds a {d} list.\n *\n * @param uid  user id\n * @param list {d} list\n * @return rows\n */",
                d = d
            )),
            &format!("int add{n}List(String uid, List<{n}> list);", n = n),
        ),
        Member::method(
            &format!("remove{}", n),
            2,
            Some(format!(
                "/**\n * Removes a {d}.\n *\n * @param uid  user id\n * @param item {d}\n * @return rows\n */",
                d = d
            )),
            &format!("int remove{n}(String uid, {n} item);", n = n),
        ),
        Member::method(
            &format!("remove{}List", n),
            2,
            Some(format!(
                "/**\n * Removes a {d} list.\n *\n * @param uid  user id\n * @param list {d} list\n */",
                d = d
            )),
            &format!("void remove{n}List(String uid, List<{n}> list);", n = n),
        ),
        Member::method(
            &format!("update{}", n),
            2,
            Some(format!(
                "/**\n * Updates a {d}.\n *\n * @param uid  user id\n * @param item {d}\n * @return rows\n */",
                d = d
            )),
            &format!("int update{n}(String uid, {n} item);", n = n),
        ),
        Member::method(
            &format!("update{}List", n),
            2,
            Some(format!(
                "/**\n * Updates a {d} list.\n *\n * @param uid  user id\n * @param list {d} list\n */",
                d = d
            )),
            &format!("void update{n}List(String uid, List<{n}> list);", n = n),
        ),
        Member::method(
            &format!("get{}Detail", n),
            2,
            Some(format!(
                "/**\n * Gets the {d} detail.\n *\n * @param uid   user id\n * @param keyId key identifier\n * @return {d} detail\n */",
                d = d
            )),
            &format!("{n} get{n}Detail(String uid, String keyId);", n = n),
        ),
        Member::method(
            &format!("query{}List", n),
            5,
            Some(format!(
                "/**\n * Queries the {d} detail list.\n *\n * @param uid        user id\n * @param para       query parameter\n * @param startIndex start index\n * @param maxSize    max rows returned\n * @param retTotal   whether to return the total count\n * @return {d} list\n */",
                d = d
            )),
            &format!(
                "{list} query{n}List(String uid, {qp} para, int startIndex, int maxSize, boolean retTotal);",
                list = list,
                n = n,
                qp = qp
            ),
        ),
        Member::method(
            &format!("query{}Count", n),
            2,
            Some(format!(
                "/**\n * Queries the {d} total count.\n *\n * @param uid  user id\n * @param para query parameter\n * @return {d} total count\n */",
                d = d
            )),
            &format!("int query{n}Count(String uid, {qp} para);", n = n, qp = qp),
        ),
    ]
}

fn impl_methods(desc: &EntityDescription) -> Vec<Member> {
    let n = &desc.class_name;
    let d = &desc.description;
    let qp = desc.query_para_name();
    let list_name = desc.list_name();
    let dao = naming::dao_field_name(n);
    let key = desc.key_field();
    let get_key = key_getter(&key);
    let set_key = naming::setter_name(&key.name);
    let soft = desc.has_flag_del();

    let remove_tail = if soft {
        format!(
            "    detail.setFlagDel(true);\n    return {dao}.update(detail);",
            dao = dao
        )
    } else {
        format!("    return {dao}.delete(item);", dao = dao)
    };
    let remove_list_tail = if soft {
        format!(
            "    list.forEach(v -> v.setFlagDel(true));\n    {dao}.updateList(list);",
            dao = dao
        )
    } else {
        format!("    {dao}.deleteList(list);", dao = dao)
    };

    let mut methods = vec![
        Member::method(
            &format!("add{}", n),
            2,
            None,
            &format!(
                "public int add{n}(String uid, {n} item) {{\n    AssertUtils.ThrowArgNullException(item, \"{d}\");\n    return {dao}.insert(item);\n}}",
                n = n,
                d = d,
                dao = dao
            ),
        ),
        Member::method(
            &format!("add{}List", n),
            2,
            None,
            &format!(
                "public int add{n}List(String uid, List<{n}> list) {{\n    AssertUtils.ThrowArgNullException(list, \"{d}\", true);\n    return {dao}.insertList(list);\n}}",
                n = n,
                d = d,
                dao = dao
            ),
        ),
        Member::method(
            &format!("remove{}", n),
            2,
            None,
            &format!(
                "public int remove{n}(String uid, {n} item) {{\n    AssertUtils.ThrowArgNullException(item, \"{d}\");\n    AssertUtils.ThrowArgNullException(item.{get_key}(), \"{d}Id\");\n    {n} detail = get{n}Detail(uid, item.{get_key}());\n{tail}\n}}",
                n = n,
                d = d,
                get_key = get_key,
                tail = remove_tail
            ),
        ),
        Member::method(
            &format!("remove{}List", n),
            2,
            None,
            &format!(
                "public void remove{n}List(String uid, List<{n}> list) {{\n    AssertUtils.ThrowArgNullException(list, \"{d}\", true);\n{tail}\n}}",
                n = n,
                d = d,
                tail = remove_list_tail
            ),
        ),
        Member::method(
            &format!("update{}", n),
            2,
            None,
            &format!(
                "public int update{n}(String uid, {n} item) {{\n    AssertUtils.ThrowArgNullException(item, \"{d}\");\n    AssertUtils.ThrowArgNullException(item.{get_key}(), \"{d}Id\");\n    return {dao}.update(item);\n}}",
                n = n,
                d = d,
                get_key = get_key,
                dao = dao
            ),
        ),
        Member::method(
            &format!("update{}List", n),
            2,
            None,
            &format!(
                "public void update{n}List(String uid, List<{n}> list) {{\n    AssertUtils.ThrowArgNullException(list, \"{d}\", true);\n    {dao}.updateList(list);\n}}",
                n = n,
                d = d,
                dao = dao
            ),
        ),
        Member::method(
            &format!("get{}Detail", n),
            2,
            None,
            &format!(
                "public {n} get{n}Detail(String uid, String keyId) {{\n    AssertUtils.ThrowArgNullException(keyId, \"{d} detail key\", true);\n    {n} detail = new {n}();\n    detail.{set_key}(keyId);\n    return {dao}.getDetail(detail);\n}}",
                n = n,
                d = d,
                set_key = set_key,
                dao = dao
            ),
        ),
        Member::method(
            &format!("query{}List", n),
            5,
            None,
            &format!(
                "public {list} query{n}List(String uid, {qp} para, int startIndex, int maxSize, boolean retTotal) {{\n    if (para == null) {{\n        para = new {qp}();\n    }}\n    {list} list = new {list}({dao}.queryList(para, startIndex, maxSize));\n    if (retTotal) {{\n        list.setTotalCount({dao}.queryCount(para));\n    }}\n    return list;\n}}",
                list = list_name,
                n = n,
                qp = qp,
                dao = dao
            ),
        ),
        Member::method(
            &format!("query{}Count", n),
            2,
            None,
            &format!(
                "public int query{n}Count(String uid, {qp} para) {{\n    if (para == null) {{\n        para = new {qp}();\n    }}\n    return {dao}.queryCount(para);\n}}",
                n = n,
                qp = qp,
                dao = dao
            ),
        ),
    ];
    for m in &mut methods {
        m.annotations = vec![Annotation::marker("Override")];
    }
    methods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{parse_java, MergePolicy, Project, SourceTree};

    fn make_desc(logical_delete: bool) -> EntityDescription {
        let mut desc = EntityDescription::new("com.shop", "Order", "t_order", "customer order");
        desc.logical_delete = logical_delete;
        let mut id = FieldDescription::new("id", "String", "identifier", "Id");
        id.primary = true;
        desc.fields.push(id);
        desc.fields
            .push(FieldDescription::new("name", "String", "order name", "Name"));
        desc.ensure_flag_del();
        desc
    }

    #[test]
    fn test_interface_methods() {
        let spec = service_interface_spec(&make_desc(true));
        assert_eq!(spec.name, "IOrderBaseSvr");
        assert_eq!(spec.kind, TypeKind::Interface);
        assert_eq!(
            spec.annotations[0].render(),
            "@SuppressWarnings(\"unused\")"
        );
        assert!(spec.imports.contains(&"java.util.List".to_string()));

        assert_eq!(spec.members.len(), 9);
        assert!(spec
            .members
            .iter()
            .all(|m| m.policy == MergePolicy::Replace));
        let texts: Vec<&str> = spec.members.iter().map(|m| m.member.text.as_str()).collect();
        assert!(texts.contains(&"int addOrder(String uid, Order item);"));
        assert!(texts.contains(&"void removeOrderList(String uid, List<Order> list);"));
        assert!(texts.contains(&"Order getOrderDetail(String uid, String keyId);"));
        assert!(texts.contains(
            &"OrderList queryOrderList(String uid, OrderQueryPara para, int startIndex, int maxSize, boolean retTotal);"
        ));

        let retained = spec.retain.methods.as_ref().unwrap();
        assert_eq!(retained.len(), 9);
        assert!(retained.contains("queryOrderCount"));
    }

    #[test]
    fn test_interface_prunes_stale_methods() {
        let existing = parse_java(
            "package com.shop;\n\npublic interface IOrderBaseSvr {\n\n    int addOrder(String uid, Order item);\n\n    int legacyOp(String uid);\n}\n",
        )
        .unwrap();
        let mut project = Project::in_memory(&["app"]);
        project.insert_java("app", existing).unwrap();

        let report = project
            .apply_class("app", &service_interface_spec(&make_desc(true)))
            .unwrap();
        assert_eq!(report.removed, 1);
        let text = project
            .file_text("app", "com/shop/IOrderBaseSvr.java")
            .unwrap();
        assert!(!text.contains("legacyOp"));
        assert!(text.contains("queryOrderCount"));
    }

    #[test]
    fn test_impl_dao_field() {
        let spec = service_impl_spec(&make_desc(true));
        assert_eq!(spec.name, "OrderBaseSvr");
        assert_eq!(spec.implements, vec!["IOrderBaseSvr".to_string()]);
        assert_eq!(spec.annotations[0].simple_name(), "Service");

        let field = &spec.members[0];
        assert_eq!(field.member.name, "orderDao");
        assert_eq!(field.member.text, "protected IOrderDao orderDao;");
        assert_eq!(field.member.annotations[0].simple_name(), "Autowired");
        assert_eq!(field.anchor, Anchor::Head);
        assert_eq!(field.policy, MergePolicy::KeepExisting);
    }

    #[test]
    fn test_soft_delete_bodies() {
        let spec = service_impl_spec(&make_desc(true));
        let remove = spec
            .members
            .iter()
            .find(|m| m.member.name == "removeOrder")
            .unwrap();
        let text = &remove.member.text;
        assert!(text.contains("AssertUtils.ThrowArgNullException(item, \"customer order\");"));
        assert!(text.contains("AssertUtils.ThrowArgNullException(item.getId(), \"customer orderId\");"));
        assert!(text.contains("Order detail = getOrderDetail(uid, item.getId());"));
        assert!(text.contains("detail.setFlagDel(true);"));
        assert!(text.contains("return orderDao.update(detail);"));

        let remove_list = spec
            .members
            .iter()
            .find(|m| m.member.name == "removeOrderList")
            .unwrap();
        assert!(remove_list
            .member
            .text
            .contains("list.forEach(v -> v.setFlagDel(true));"));
        assert!(remove_list.member.text.contains("orderDao.updateList(list);"));
    }

    #[test]
    fn test_hard_delete_bodies() {
        let spec = service_impl_spec(&make_desc(false));
        let remove = spec
            .members
            .iter()
            .find(|m| m.member.name == "removeOrder")
            .unwrap();
        assert!(remove.member.text.contains("return orderDao.delete(item);"));
        assert!(!remove.member.text.contains("setFlagDel"));

        let remove_list = spec
            .members
            .iter()
            .find(|m| m.member.name == "removeOrderList")
            .unwrap();
        assert!(remove_list.member.text.contains("orderDao.deleteList(list);"));
    }

    #[test]
    fn test_get_detail_probe_and_query_defaults() {
        let spec = service_impl_spec(&make_desc(true));
        let get_detail = spec
            .members
            .iter()
            .find(|m| m.member.name == "getOrderDetail")
            .unwrap();
        let text = &get_detail.member.text;
        assert!(text.contains("AssertUtils.ThrowArgNullException(keyId, \"customer order detail key\", true);"));
        assert!(text.contains("Order detail = new Order();"));
        assert!(text.contains("detail.setId(keyId);"));
        assert!(text.contains("return orderDao.getDetail(detail);"));

        let query = spec
            .members
            .iter()
            .find(|m| m.member.name == "queryOrderList")
            .unwrap();
        let text = &query.member.text;
        assert!(text.contains("para = new OrderQueryPara();"));
        assert!(text.contains("OrderList list = new OrderList(orderDao.queryList(para, startIndex, maxSize));"));
        assert!(text.contains("list.setTotalCount(orderDao.queryCount(para));"));
    }

    #[test]
    fn test_render_impl() {
        let desc = make_desc(true);
        let mut project = Project::in_memory(&["app"]);
        project
            .apply_class("app", &service_impl_spec(&desc))
            .unwrap();
        let text = project
            .file_text("app", "com/shop/OrderBaseSvr.java")
            .unwrap();
        assert!(text.contains("import org.springframework.stereotype.Service;"));
        assert!(text.contains("@Service\npublic class OrderBaseSvr implements IOrderBaseSvr {"));
        assert!(text.contains("    @Autowired\n    protected IOrderDao orderDao;"));
        assert!(text.contains("    @Override\n    public int addOrder(String uid, Order item) {"));
    }
}
