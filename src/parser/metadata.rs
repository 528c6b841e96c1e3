//! Entity metadata extracted from annotations or rebuilt from artifacts

use serde::Serialize;

/// Marker in a generated field comment that flags the field as excluded
/// from column lists and the result map.
pub const SKIP_MARKER: &str = "@pass";

/// Name of the synthetic logical delete field appended to entities that
/// use soft deletion.
pub const FLAG_DEL_FIELD: &str = "flagDel";

/// Generation contract comment written into new mapper files, directly
/// after the DOCTYPE declaration. Reverse extraction reads the table name
/// back out of it.
pub fn mapper_marker(table_name: &str) -> String {
    format!("<!-- entitygen:mapper v1 table={} -->", table_name)
}

/// Description of one entity field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescription {
    pub name: String,
    /// Declared Java type as written in source.
    pub java_type: String,
    pub description: String,
    pub column_name: String,
    pub primary: bool,
    pub width: u32,
    /// Excluded from column lists, placeholders and the result map.
    pub skip: bool,
    pub queryable: bool,
    pub sortable: bool,
    pub remark: String,
}

impl FieldDescription {
    pub fn new(name: &str, java_type: &str, description: &str, column_name: &str) -> Self {
        FieldDescription {
            name: name.to_string(),
            java_type: java_type.to_string(),
            description: description.to_string(),
            column_name: column_name.to_string(),
            primary: false,
            width: 0,
            skip: false,
            queryable: true,
            sortable: true,
            remark: String::new(),
        }
    }

    /// The synthetic logical delete flag. Note the column name stays
    /// uncapitalized.
    pub fn flag_del() -> Self {
        FieldDescription::new(FLAG_DEL_FIELD, "boolean", "delete flag", FLAG_DEL_FIELD)
    }
}

/// Description of one entity, the unit every generator consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDescription {
    /// Target module name; resolved against the project, falling back to
    /// the default module.
    pub module: String,
    pub package: String,
    pub class_name: String,
    pub table_name: String,
    pub description: String,
    pub logical_delete: bool,
    pub namespace: String,
    pub super_class: Option<String>,
    pub child_class: String,
    pub index: Vec<String>,
    pub fields: Vec<FieldDescription>,
}

impl EntityDescription {
    pub fn new(package: &str, class_name: &str, table_name: &str, description: &str) -> Self {
        EntityDescription {
            module: String::new(),
            package: package.to_string(),
            class_name: class_name.to_string(),
            table_name: table_name.to_string(),
            description: description.to_string(),
            logical_delete: true,
            namespace: String::new(),
            super_class: None,
            child_class: String::new(),
            index: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Append the synthetic flagDel field when logical deletion is on and
    /// the field is not already present.
    pub fn ensure_flag_del(&mut self) {
        if self.logical_delete && !self.fields.iter().any(|f| f.name == FLAG_DEL_FIELD) {
            self.fields.push(FieldDescription::flag_del());
        }
    }

    pub fn has_flag_del(&self) -> bool {
        self.fields.iter().any(|f| f.name == FLAG_DEL_FIELD)
    }

    /// The primary key field. Entities without a declared primary key fall
    /// back to a String `id` keyed on column `Id`.
    pub fn key_field(&self) -> FieldDescription {
        match self.fields.iter().find(|f| f.primary) {
            Some(f) => f.clone(),
            None => {
                let mut key = FieldDescription::new("id", "String", "identifier", "Id");
                key.primary = true;
                key
            }
        }
    }

    pub fn query_para_name(&self) -> String {
        format!("{}QueryPara", self.class_name)
    }

    pub fn list_name(&self) -> String {
        format!("{}List", self.class_name)
    }

    pub fn dao_interface_name(&self) -> String {
        format!("I{}Dao", self.class_name)
    }

    pub fn dao_impl_name(&self) -> String {
        format!("{}Dao", self.class_name)
    }

    pub fn service_interface_name(&self) -> String {
        format!("I{}BaseSvr", self.class_name)
    }

    pub fn service_impl_name(&self) -> String {
        format!("{}BaseSvr", self.class_name)
    }

    /// Package holding the DAO implementation and the mapper file.
    pub fn dao_package(&self) -> String {
        format!("{}.dao", self.package)
    }

    /// Mapper namespace, also the prefix of every fragment refid.
    pub fn mapper_namespace(&self) -> String {
        format!("{}.{}", self.dao_package(), self.dao_impl_name())
    }

    pub fn mapper_file_name(&self) -> String {
        format!("mybatis-{}.xml", self.class_name)
    }
}
