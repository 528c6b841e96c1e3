//! DAO interface and implementation generation
//!
//! Both classes are close to empty; the runtime base classes carry the CRUD
//! behavior and resolve mapper statements by naming convention. The
//! implementation documents those conventional statement ids in a class-body
//! comment so overrides have the list at hand.

use crate::codegen::naming;
use crate::codegen::{class_banner, DATA_PROVIDER_IMPL, DATA_PROVIDER_INTF};
use crate::parser::EntityDescription;
use crate::tree::{Anchor, Annotation, ClassSpec, Member, MemberSpec, TypeKind};

/// Build the merge plan for `I{Name}Dao`.
pub fn dao_interface_spec(desc: &EntityDescription) -> ClassSpec {
    let mut spec = ClassSpec::new(&desc.package, &desc.dao_interface_name(), TypeKind::Interface);
    spec.doc = Some(class_banner(
        &format!("{} data access interface", desc.description),
        "JavaDaoIntf",
    ));
    spec.extends = Some(format!("{}<{}>", DATA_PROVIDER_INTF, desc.class_name));
    spec
}

/// Build the merge plan for `{Name}Dao` under `{pkg}.dao`.
pub fn dao_impl_spec(desc: &EntityDescription) -> ClassSpec {
    let mut spec = ClassSpec::new(&desc.dao_package(), &desc.dao_impl_name(), TypeKind::Class);
    spec.doc = Some(class_banner(
        &format!("{} data access base implementation", desc.description),
        "JavaDaoImp",
    ));
    spec.extends = Some(format!("{}<{}>", DATA_PROVIDER_IMPL, desc.class_name));
    // The implementation lives in the dao subpackage, away from the entity.
    spec.imports
        .push(format!("{}.{}", desc.package, desc.class_name));
    spec.imports
        .push("org.springframework.stereotype.Repository".to_string());
    spec.annotations.push(Annotation::marker("Repository"));

    spec.members.push(MemberSpec::keep(
        Member::comment(&statement_id_comment(desc)),
        Anchor::Tail,
    ));
    spec
}

/// Class-body comment listing the statement ids the runtime resolves by
/// default, fully qualified with the mapper namespace.
fn statement_id_comment(desc: &EntityDescription) -> String {
    let ns = desc.mapper_namespace();
    let ids = naming::statement_ids(&desc.class_name);
    format!(
        "/*\n    default statement ids:\n    InsertStatementId: {ns}.{insert}.\n    UpdateStatementId: {ns}.{update}.\n    DeleteStatementId: {ns}.{delete}.\n    GetHasDetailStatementId: {ns}.{get}.\n    GetNoDetailStatementId: {ns}.{get_base}.\n    QueryCountStatementId: {ns}.{count}.\n    QueryHasDetailListStatementId: {ns}.{list}.\n    QueryNoDetailListStatementId: {ns}.{base_list}.\n    If you need to change, you can rewrite the corresponding get method.\n */",
        ns = ns,
        insert = ids[0],
        update = ids[1],
        delete = ids[2],
        get_base = ids[3],
        get = ids[4],
        count = ids[5],
        base_list = ids[6],
        list = ids[7]
    )
}
