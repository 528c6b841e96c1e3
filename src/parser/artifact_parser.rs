//! Metadata reconstruction from previously generated artifacts
//!
//! The inspection path works on classes whose annotations are long gone:
//! it rebuilds an `EntityDescription` from the entity class itself, its
//! query parameter sibling and the mapper XML. It therefore requires a
//! prior generation run and cannot bootstrap a blank entity.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use tracing::debug;

use crate::codegen::naming::{self, ORDER_ATTR_PREFIX, QUERY_ATTR_PREFIX};
use crate::codegen::DATA_PACKET;
use crate::error::{GenError, Result};
use crate::parser::metadata::{EntityDescription, FieldDescription, SKIP_MARKER};
use crate::tree::{comment_label, JavaFile, SourceTree};

/// Rebuild an `EntityDescription` for an already generated entity class.
pub fn extract_from_artifacts<T: SourceTree>(
    tree: &T,
    module: &str,
    entity: &JavaFile,
) -> Result<EntityDescription> {
    let class_name = entity.class.name.clone();
    let package = entity.package.clone();

    let para_name = format!("{}QueryPara", class_name);
    let query_para = tree
        .find_class(module, &package, &para_name)
        .ok_or_else(|| GenError::ArtifactMissing {
            class: entity.qualified_name(),
            artifact: para_name.clone(),
        })?;

    let mapper_name = format!("mybatis-{}.xml", class_name);
    let mapper = tree
        .find_text_file(module, &mapper_name)
        .ok_or_else(|| GenError::ArtifactMissing {
            class: entity.qualified_name(),
            artifact: mapper_name.clone(),
        })?;

    let table_name = table_name(mapper).ok_or_else(|| {
        GenError::ValidationError(format!("{}: no table name recognizable", mapper_name))
    })?;
    let columns = result_map_columns(mapper);
    let primary_field = id_property(mapper).unwrap_or_else(|| "id".to_string());

    // Queryable and sortable flags live in the query parameter constants.
    let mut queryable = BTreeSet::new();
    let mut sortable = BTreeSet::new();
    for constant in query_para.class.constants() {
        if let Some(rest) = constant.name.strip_prefix(QUERY_ATTR_PREFIX) {
            queryable.insert(rest.to_string());
        } else if let Some(rest) = constant.name.strip_prefix(ORDER_ATTR_PREFIX) {
            sortable.insert(rest.to_string());
        }
    }

    let description = entity
        .class
        .doc
        .as_deref()
        .map(comment_label)
        .unwrap_or_default();
    let mut desc = EntityDescription::new(&package, &class_name, &table_name, &description);
    desc.module = module.to_string();
    desc.super_class = match &entity.class.extends {
        Some(base) if base != DATA_PACKET && base != "DataPacket" => Some(base.clone()),
        _ => None,
    };

    for member in entity.class.fields() {
        let cap = naming::capitalize_first(&member.name);
        let doc = member.doc.as_deref().unwrap_or_default();
        let field_desc = comment_label(doc).replace(SKIP_MARKER, "").trim().to_string();
        let column = columns
            .get(&member.name)
            .cloned()
            .unwrap_or_else(|| cap.clone());
        let java_type = member.ty.clone().unwrap_or_default();

        let mut field = FieldDescription::new(&member.name, &java_type, &field_desc, &column);
        field.primary = member.name == primary_field;
        field.skip = doc.contains(SKIP_MARKER);
        field.queryable = queryable.contains(&cap);
        field.sortable = sortable.contains(&cap);
        desc.fields.push(field);
    }
    desc.logical_delete = desc.has_flag_del();

    debug!(
        class = %class_name,
        table = %desc.table_name,
        fields = desc.fields.len(),
        "rebuilt description from artifacts"
    );
    Ok(desc)
}

/// Table name from the generation marker comment, falling back to the
/// target of the generated insert statement.
fn table_name(mapper: &str) -> Option<String> {
    if let Some(cap) = capture(mapper, r"entitygen:mapper v1 table=(\S+)") {
        return Some(cap);
    }
    capture(mapper, r"(?i)insert\s+into\s+(\w+)")
}

fn id_property(mapper: &str) -> Option<String> {
    capture(mapper, r#"<id\s+property="([^"]+)""#)
}

/// property -> column pairs of the generated result map.
fn result_map_columns(mapper: &str) -> BTreeMap<String, String> {
    let mut columns = BTreeMap::new();
    if let Ok(re) = Regex::new(r#"<(?:id|result)\s+property="([^"]+)"\s+column="([^"]+)""#) {
        for cap in re.captures_iter(mapper) {
            columns.insert(cap[1].to_string(), cap[2].to_string());
        }
    }
    columns
}

fn capture(text: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text).map(|c| c[1].to_string())
}
