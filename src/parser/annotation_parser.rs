//! Metadata extraction from `@EntityDesc` / `@EntityFieldDesc` annotations

use tracing::debug;

use crate::codegen::naming::capitalize_first;
use crate::error::{GenError, Result};
use crate::parser::metadata::{EntityDescription, FieldDescription};
use crate::tree::{AnnotationValue, JavaFile, Member};

/// Class-level annotation carrying the entity description. Matched by
/// simple name so both `@EntityDesc` and a fully qualified form work.
pub const ENTITY_ANNOTATION: &str = "EntityDesc";

/// Field-level annotation. Fields without it are not part of the entity.
pub const FIELD_ANNOTATION: &str = "EntityFieldDesc";

/// Build an `EntityDescription` from the annotations on a class.
///
/// Optional attributes fall back to documented defaults: `logicDel` true,
/// `pkg` the containing file's package, `queryable`/`sortable` true,
/// `width` 0, `pass` false. Unannotated fields are filtered out, and when
/// logical deletion is on the synthetic `flagDel` field is appended after
/// all annotation-derived fields.
pub fn extract_from_annotations(file: &JavaFile) -> Result<EntityDescription> {
    let class = &file.class;
    let anno = class
        .annotation(ENTITY_ANNOTATION)
        .ok_or_else(|| GenError::MissingAnnotation(file.qualified_name()))?;

    let package = match anno.str_arg("pkg") {
        Some(p) if !p.trim().is_empty() => p,
        _ => file.package.clone(),
    };
    let mut desc = EntityDescription::new(
        &package,
        &class.name,
        &anno.str_arg("tbName").unwrap_or_default(),
        &anno.str_arg("desc").unwrap_or_default(),
    );
    desc.module = anno.str_arg("module").unwrap_or_default();
    desc.logical_delete = anno.bool_arg("logicDel").unwrap_or(true);
    desc.namespace = anno.str_arg("namespace").unwrap_or_default();
    desc.super_class = match anno.get("superClass") {
        Some(AnnotationValue::ClassRef(name)) => Some(name.clone()),
        Some(AnnotationValue::Str(name)) if !name.is_empty() => Some(name.clone()),
        _ => None,
    };
    desc.child_class = anno.str_arg("childClass").unwrap_or_default();
    desc.index = match anno.get("index") {
        Some(AnnotationValue::List(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(AnnotationValue::Str(one)) => vec![one.clone()],
        _ => Vec::new(),
    };

    for member in class.fields() {
        match field_description(&class.name, member)? {
            Some(field) => desc.fields.push(field),
            None => debug!(
                "{}.{}: no @{}, field skipped",
                class.name, member.name, FIELD_ANNOTATION
            ),
        }
    }
    desc.ensure_flag_del();
    Ok(desc)
}

fn field_description(class_name: &str, member: &Member) -> Result<Option<FieldDescription>> {
    let anno = match member
        .annotations
        .iter()
        .find(|a| a.simple_name() == FIELD_ANNOTATION)
    {
        Some(a) => a,
        None => return Ok(None),
    };
    let description = anno.str_arg("desc").ok_or_else(|| {
        GenError::ValidationError(format!(
            "{}.{}: @{} requires desc",
            class_name, member.name, FIELD_ANNOTATION
        ))
    })?;
    let java_type = member.ty.clone().unwrap_or_default();
    let column_name = match anno.str_arg("columnName") {
        Some(c) if !c.trim().is_empty() => c,
        _ => capitalize_first(&member.name),
    };

    let mut field = FieldDescription::new(&member.name, &java_type, &description, &column_name);
    field.primary = anno.bool_arg("primary").unwrap_or(false);
    field.width = anno.int_arg("width").unwrap_or(0).max(0) as u32;
    field.skip = anno.bool_arg("pass").unwrap_or(false);
    field.queryable = anno.bool_arg("queryable").unwrap_or(true);
    field.sortable = anno.bool_arg("sortable").unwrap_or(true);
    field.remark = anno.str_arg("remark").unwrap_or_default();
    Ok(Some(field))
}
