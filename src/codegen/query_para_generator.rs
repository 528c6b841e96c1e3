//! Query parameter class generation
//!
//! `{Name}QueryPara` collects typed condition setters over the queryable
//! fields. Constants and setter families are merge-safe; only SetQueryPara
//! is rewritten so it always reflects the current field set.

use crate::codegen::naming;
use crate::codegen::{FieldType, QueryFamily, TypeResolver, DYN_DATA_PACKET, QUERY_PARAMETER};
use crate::parser::{EntityDescription, FieldDescription};
use crate::tree::{Anchor, ClassSpec, Member, MemberSpec, TypeKind};

/// Build the merge plan for `{Name}QueryPara`.
pub fn query_para_spec(desc: &EntityDescription) -> ClassSpec {
    let qp_name = desc.query_para_name();
    let mut spec = ClassSpec::new(&desc.package, &qp_name, TypeKind::Class);
    spec.extends = Some(QUERY_PARAMETER.to_string());

    let queryable: Vec<&FieldDescription> =
        desc.fields.iter().filter(|f| f.queryable).collect();
    let sortable: Vec<&FieldDescription> = desc.fields.iter().filter(|f| f.sortable).collect();

    if queryable
        .iter()
        .any(|f| TypeResolver::resolve(&f.java_type) == FieldType::DynData)
    {
        spec.imports.push(DYN_DATA_PACKET.to_string());
    }

    // Attribute name constants, grouped per category and chained in field
    // order. The first query constant opens the class body.
    for (index, field) in queryable.iter().enumerate() {
        let anchor = if index == 0 {
            Anchor::Head
        } else {
            Anchor::after_field(&naming::query_attr_const(&queryable[index - 1].name))
        };
        spec.members
            .push(MemberSpec::keep(query_attr_member(field), anchor));
    }
    for (index, field) in sortable.iter().enumerate() {
        let anchor = if index == 0 {
            match queryable.last() {
                Some(last) => Anchor::after_field(&naming::query_attr_const(&last.name)),
                None => Anchor::Head,
            }
        } else {
            Anchor::after_field(&naming::order_attr_const(&sortable[index - 1].name))
        };
        spec.members
            .push(MemberSpec::keep(order_attr_member(field), anchor));
    }

    spec.members.push(MemberSpec::keep(
        default_constructor(&qp_name),
        Anchor::Tail,
    ));
    spec.members.push(MemberSpec::keep(
        full_constructor(&qp_name, &desc.class_name),
        Anchor::after_constructor(&qp_name, 0),
    ));
    spec.members.push(MemberSpec::replace(
        set_query_para_member(desc),
        Anchor::after_constructor(&qp_name, 3),
    ));

    // Setter families, one block per queryable field, each spliced behind
    // the previous field's last generated setter.
    let mut previous_last: Option<String> = None;
    for field in &queryable {
        let members = family_members(field);
        let mut anchor = match &previous_last {
            Some(name) => Anchor::after_method(name),
            None => Anchor::after_method("SetQueryPara"),
        };
        for member in members {
            let next_anchor = Anchor::after_method(&member.name);
            previous_last = Some(member.name.clone());
            spec.members.push(MemberSpec::keep(member, anchor));
            anchor = next_anchor;
        }
    }

    spec
}

fn query_attr_member(field: &FieldDescription) -> Member {
    let name = naming::query_attr_const(&field.name);
    Member::constant(
        &name,
        "String",
        Some(format!(
            "/**\n * Constant query attribute name ({}).\n */",
            field.description
        )),
        &format!(
            "public static final String {} = \"{}\";",
            name, field.name
        ),
    )
}

fn order_attr_member(field: &FieldDescription) -> Member {
    let name = naming::order_attr_const(&field.name);
    Member::constant(
        &name,
        "String",
        Some(format!(
            "/**\n * Constant order attribute name ({}).\n */",
            field.description
        )),
        &format!(
            "public static final String {} = \"{}\";",
            name, field.name
        ),
    )
}

fn default_constructor(qp_name: &str) -> Member {
    Member::constructor(
        qp_name,
        0,
        Some("/**\n * Default constructor.\n */".to_string()),
        &format!("public {}() {{\n    this(null, null, false);\n}}", qp_name),
    )
}

fn full_constructor(qp_name: &str, entity_name: &str) -> Member {
    let doc = "/**\n * Constructor specifying the parameter object and order attribute.\n *\n * @param data  query parameter object\n * @param order order attribute name\n * @param isAse true for ascending, false for descending\n */";
    let text = format!(
        "public {qp}({entity} data, String order, boolean isAse) {{\n    SetQueryPara(data, order, isAse);\n}}",
        qp = qp_name,
        entity = entity_name
    );
    Member::constructor(qp_name, 3, Some(doc.to_string()), &text)
}

fn set_query_para_member(desc: &EntityDescription) -> Member {
    let mut calls = String::new();
    for field in desc.fields.iter().filter(|f| f.queryable) {
        let is_bool = TypeResolver::resolve(&field.java_type) == FieldType::Boolean;
        calls.push_str(&format!(
            "        {}(data.{}());\n",
            naming::param_method(&field.name),
            naming::getter_name(&field.name, is_bool)
        ));
    }
    let doc = "/**\n * Applies the query parameter object and order attribute.\n *\n * @param data  query parameter object\n * @param order order attribute name\n * @param isAse true for ascending, false for descending\n */";
    let text = format!(
        "public void SetQueryPara({entity} data, String order, boolean isAse) {{\n    if (data != null) {{\n{calls}    }}\n    if (!StringHelper.isNullOrEmpty(order)) addOrderBy(order, isAse);\n}}",
        entity = desc.class_name,
        calls = calls
    );
    Member::method("SetQueryPara", 3, Some(doc.to_string()), &text)
}

/// The setter family of one queryable field, in splice order.
fn family_members(field: &FieldDescription) -> Vec<Member> {
    let ty = TypeResolver::resolve(&field.java_type);
    let param = ty.param_type_string();
    match ty.query_family() {
        QueryFamily::Text => vec![
            like_setter(field),
            in_empty_setter(field),
            enum_setter(field, &param),
        ],
        QueryFamily::Flag => vec![exact_setter(field, &param)],
        QueryFamily::Numeric | QueryFamily::Decimal => vec![
            exact_setter(field, &param),
            inc_zero_setter(field, &param),
            enum_setter(field, &param),
            bound_range_setter(field, &param),
        ],
        QueryFamily::Date => vec![exact_setter(field, &param), date_range_setter(field)],
        QueryFamily::Nested | QueryFamily::Object => vec![exact_setter(field, &param)],
    }
}

fn like_setter(field: &FieldDescription) -> Member {
    let f = &field.name;
    let name = naming::param_method(f);
    let doc = format!(
        "/**\n * Adds a {d} match condition (target like {f}), key: {f}.\n *\n * @param {f} {d} match condition parameter\n */",
        d = field.description,
        f = f
    );
    let text = format!(
        "public void {name}(String {f}) {{\n    addParameter({attr}, {f});\n}}",
        name = name,
        f = f,
        attr = naming::query_attr_const(f)
    );
    Member::method(&name, 1, Some(doc), &text)
}

fn in_empty_setter(field: &FieldDescription) -> Member {
    let f = &field.name;
    let name = format!("{}InEmpty", naming::param_method(f));
    let doc = format!(
        "/**\n * Adds a {d} match condition ({f} applies even when empty); not empty (target like {f}), key: {f}; empty (target is null or target = ''), key: {f}.\n *\n * @param {f} {d} match condition parameter\n */",
        d = field.description,
        f = f
    );
    let text = format!(
        "public void {name}(String {f}) {{\n    put({attr}, {f});\n}}",
        name = name,
        f = f,
        attr = naming::query_attr_const(f)
    );
    Member::method(&name, 1, Some(doc), &text)
}

fn exact_setter(field: &FieldDescription, param: &str) -> Member {
    let f = &field.name;
    let name = naming::param_method(f);
    let doc = format!(
        "/**\n * Adds a {d} match condition (target = {f}), key: {f}.\n *\n * @param {f} {d} match condition parameter\n */",
        d = field.description,
        f = f
    );
    let text = format!(
        "public void {name}({param} {f}) {{\n    addParameter({attr}, {f});\n}}",
        name = name,
        param = param,
        f = f,
        attr = naming::query_attr_const(f)
    );
    Member::method(&name, 1, Some(doc), &text)
}

fn inc_zero_setter(field: &FieldDescription, param: &str) -> Member {
    let f = &field.name;
    let name = format!("{}IncZero", naming::param_method(f));
    let doc = format!(
        "/**\n * Adds a {d} match condition (zero included), key: {f}.\n *\n * @param {f} {d} match condition parameter\n */",
        d = field.description,
        f = f
    );
    let text = format!(
        "public void {name}({param} {f}) {{\n    put({attr}, {f});\n}}",
        name = name,
        param = param,
        f = f,
        attr = naming::query_attr_const(f)
    );
    Member::method(&name, 1, Some(doc), &text)
}

fn enum_setter(field: &FieldDescription, param: &str) -> Member {
    let f = &field.name;
    let name = format!("{}_Enum", naming::param_method(f));
    let doc = format!(
        "/**\n * Adds a {d} enum condition (target in ({f}s)), key: {f}_Enum.\n *\n * @param {f}s {d} array condition parameter\n */",
        d = field.description,
        f = f
    );
    let text = format!(
        "public void {name}({param}... {f}s) {{\n    addParameterByEnum({attr}, {f}s);\n}}",
        name = name,
        param = param,
        f = f,
        attr = naming::query_attr_const(f)
    );
    Member::method(&name, 1, Some(doc), &text)
}

fn bound_range_setter(field: &FieldDescription, param: &str) -> Member {
    let f = &field.name;
    let name = format!("{}_Range", naming::param_method(f));
    let doc = format!(
        "/**\n * Adds a {d} range condition (target between low and high), key: {f}_Range.\n *\n * @param low  range lower bound\n * @param high range upper bound\n */",
        d = field.description,
        f = f
    );
    let text = format!(
        "public void {name}({param} low, {param} high) {{\n    addParameterByRange({attr}, low, high);\n}}",
        name = name,
        param = param,
        attr = naming::query_attr_const(f)
    );
    Member::method(&name, 2, Some(doc), &text)
}

fn date_range_setter(field: &FieldDescription) -> Member {
    let f = &field.name;
    let name = format!("{}_Range", naming::param_method(f));
    let doc = format!(
        "/**\n * Adds a {d} range condition (target between startDate and endDate), key: {f}_Range.\n *\n * @param startDate start date\n * @param endDate   end date\n */",
        d = field.description,
        f = f
    );
    let text = format!(
        "public void {name}(java.util.Date startDate, java.util.Date endDate) {{\n    addParameterByRange({attr}, startDate, endDate);\n}}",
        name = name,
        attr = naming::query_attr_const(f)
    );
    Member::method(&name, 2, Some(doc), &text)
}
