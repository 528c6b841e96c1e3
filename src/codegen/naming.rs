//! Naming conventions shared by the Java and mapper generators

use heck::ToLowerCamelCase;

/// Uppercase the first character, leaving the rest of the name untouched.
/// Field names feed accessor and constant names through this.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lower camel form of a class name, used as the prefix of mapper fragment
/// and result map ids.
pub fn lower_camel(name: &str) -> String {
    name.to_lower_camel_case()
}

pub fn getter_name(field: &str, is_primitive_boolean: bool) -> String {
    let prefix = if is_primitive_boolean { "is" } else { "get" };
    format!("{}{}", prefix, capitalize_first(field))
}

pub fn setter_name(field: &str) -> String {
    format!("set{}", capitalize_first(field))
}

/// Prefix of the query attribute constants in a query parameter class.
pub const QUERY_ATTR_PREFIX: &str = "QueryAttr_";

/// Prefix of the order attribute constants in a query parameter class.
pub const ORDER_ATTR_PREFIX: &str = "OrderAttr_";

/// Name of the `QueryAttr_` constant for a queryable field.
pub fn query_attr_const(field: &str) -> String {
    format!("{}{}", QUERY_ATTR_PREFIX, capitalize_first(field))
}

/// Name of the `OrderAttr_` constant for a sortable field.
pub fn order_attr_const(field: &str) -> String {
    format!("{}{}", ORDER_ATTR_PREFIX, capitalize_first(field))
}

/// Name of the basic query parameter setter for a field.
pub fn param_method(field: &str) -> String {
    format!("setParamBy{}", capitalize_first(field))
}

/// Field name of the DAO reference injected into service implementations.
pub fn dao_field_name(class_name: &str) -> String {
    format!("{}Dao", lower_camel(class_name))
}

/// Id of a mapper `<sql>` fragment or result map, e.g. `orderWhereSql`.
pub fn fragment_id(class_name: &str, kind: &str) -> String {
    format!("{}{}", lower_camel(class_name), kind)
}

pub fn result_map_id(class_name: &str) -> String {
    fragment_id(class_name, "ResultMap")
}

/// The eight mapper statement ids, in mapper declaration order.
pub fn statement_ids(class_name: &str) -> [String; 8] {
    [
        format!("insert{}", class_name),
        format!("update{}", class_name),
        format!("delete{}", class_name),
        format!("getBase{}", class_name),
        format!("get{}", class_name),
        format!("query{}Count", class_name),
        format!("queryBase{}List", class_name),
        format!("query{}List", class_name),
    ]
}
