//! Java field type classification
//!
//! Maps declared Java types to the semantic categories that drive default
//! values, JDBC types, copy strategies and query condition shapes.

/// Semantic category of a declared Java field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Boolean,
    BoxedByte,
    BoxedShort,
    BoxedInt,
    BoxedLong,
    BoxedFloat,
    BoxedDouble,
    BoxedChar,
    BoxedBoolean,
    Str,
    Decimal,
    Date,
    /// The dynamic key/value packet type of the runtime library.
    DynData,
    /// Any other type, assumed to be a nested data packet class.
    Custom(String),
}

/// Shape of the query parameter setters and mapper conditions for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFamily {
    /// String: basic, InEmpty and _Enum setters, like-based conditions.
    Text,
    /// Booleans: a single equality setter.
    Flag,
    /// Integral numbers: basic, IncZero, _Enum and _Range setters.
    Numeric,
    /// Dates: basic and _Range setters, range condition keys.
    Date,
    /// BigDecimal: same setter family as Numeric.
    Decimal,
    /// Dynamic packets: a single setter, queried through the JSON fragment.
    Nested,
    /// Everything else: a single Object equality setter, no mapper condition.
    Object,
}

pub struct TypeResolver;

impl TypeResolver {
    /// Classify a declared Java type. Both simple and fully qualified
    /// spellings of the well-known types are recognized; anything else is
    /// treated as a custom data packet type.
    pub fn resolve(declared: &str) -> FieldType {
        match declared.trim() {
            "byte" => FieldType::Byte,
            "short" => FieldType::Short,
            "int" => FieldType::Int,
            "long" => FieldType::Long,
            "float" => FieldType::Float,
            "double" => FieldType::Double,
            "char" => FieldType::Char,
            "boolean" => FieldType::Boolean,
            "Byte" | "java.lang.Byte" => FieldType::BoxedByte,
            "Short" | "java.lang.Short" => FieldType::BoxedShort,
            "Integer" | "java.lang.Integer" => FieldType::BoxedInt,
            "Long" | "java.lang.Long" => FieldType::BoxedLong,
            "Float" | "java.lang.Float" => FieldType::BoxedFloat,
            "Double" | "java.lang.Double" => FieldType::BoxedDouble,
            "Character" | "java.lang.Character" => FieldType::BoxedChar,
            "Boolean" | "java.lang.Boolean" => FieldType::BoxedBoolean,
            "String" | "java.lang.String" => FieldType::Str,
            "BigDecimal" | "java.math.BigDecimal" => FieldType::Decimal,
            "Date" | "java.util.Date" => FieldType::Date,
            "DynDataPacket" | "pengesoft.data.DynDataPacket" => FieldType::DynData,
            other => FieldType::Custom(other.to_string()),
        }
    }
}

impl FieldType {
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            FieldType::Byte
                | FieldType::Short
                | FieldType::Int
                | FieldType::Long
                | FieldType::Float
                | FieldType::Double
                | FieldType::Char
                | FieldType::Boolean
        )
    }

    /// True for types persisted as a JSON column and copied via assignFrom.
    pub fn is_custom(&self) -> bool {
        matches!(self, FieldType::DynData | FieldType::Custom(_))
    }

    /// Initializer literal used by the generated clear() method.
    pub fn default_literal(&self) -> &'static str {
        match self {
            FieldType::Byte | FieldType::Short | FieldType::Int => "0",
            FieldType::Long => "0L",
            FieldType::Float => "0.0f",
            FieldType::Double => "0.0",
            FieldType::Char => "'\\0'",
            FieldType::Boolean => "false",
            FieldType::Decimal => "java.math.BigDecimal.ZERO",
            _ => "null",
        }
    }

    /// JDBC type written into mapper placeholders. Types without an explicit
    /// mapping fall back to VARCHAR.
    pub fn jdbc_type(&self) -> &'static str {
        match self {
            FieldType::Str => "VARCHAR",
            FieldType::Decimal => "DECIMAL",
            FieldType::Date => "TIMESTAMP",
            FieldType::Int | FieldType::BoxedInt => "INTEGER",
            FieldType::Boolean | FieldType::BoxedBoolean => "BOOLEAN",
            _ => "VARCHAR",
        }
    }

    pub fn query_family(&self) -> QueryFamily {
        match self {
            FieldType::Str => QueryFamily::Text,
            FieldType::Boolean | FieldType::BoxedBoolean => QueryFamily::Flag,
            FieldType::Int | FieldType::Long | FieldType::BoxedInt | FieldType::BoxedLong => {
                QueryFamily::Numeric
            }
            FieldType::Date => QueryFamily::Date,
            FieldType::Decimal => QueryFamily::Decimal,
            FieldType::DynData => QueryFamily::Nested,
            // byte, short, float, double and char have no condition shape of
            // their own and ride on the Object fallback.
            _ => QueryFamily::Object,
        }
    }

    /// Java source form of the type as it appears in query setter parameters.
    pub fn param_type_string(&self) -> String {
        match self {
            FieldType::Byte => "byte".to_string(),
            FieldType::Short => "short".to_string(),
            FieldType::Int => "int".to_string(),
            FieldType::Long => "long".to_string(),
            FieldType::BoxedByte => "Byte".to_string(),
            FieldType::BoxedShort => "Short".to_string(),
            FieldType::BoxedInt => "Integer".to_string(),
            FieldType::BoxedLong => "Long".to_string(),
            FieldType::Boolean | FieldType::BoxedBoolean => "boolean".to_string(),
            FieldType::Str => "String".to_string(),
            FieldType::Decimal => "java.math.BigDecimal".to_string(),
            FieldType::Date => "java.util.Date".to_string(),
            FieldType::DynData => "DynDataPacket".to_string(),
            _ => "Object".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_primitives_and_boxed() {
        assert_eq!(TypeResolver::resolve("int"), FieldType::Int);
        assert_eq!(TypeResolver::resolve("java.lang.Integer"), FieldType::BoxedInt);
        assert_eq!(TypeResolver::resolve("Integer"), FieldType::BoxedInt);
        assert_eq!(TypeResolver::resolve("boolean"), FieldType::Boolean);
        assert!(FieldType::Int.is_primitive());
        assert!(!FieldType::BoxedInt.is_primitive());
    }

    #[test]
    fn test_resolve_library_types() {
        assert_eq!(TypeResolver::resolve("String"), FieldType::Str);
        assert_eq!(TypeResolver::resolve("java.lang.String"), FieldType::Str);
        assert_eq!(TypeResolver::resolve("java.math.BigDecimal"), FieldType::Decimal);
        assert_eq!(TypeResolver::resolve("java.util.Date"), FieldType::Date);
        assert_eq!(
            TypeResolver::resolve("pengesoft.data.DynDataPacket"),
            FieldType::DynData
        );
    }

    #[test]
    fn test_resolve_custom() {
        let ty = TypeResolver::resolve("com.shop.Address");
        assert_eq!(ty, FieldType::Custom("com.shop.Address".to_string()));
        assert!(ty.is_custom());
        assert!(FieldType::DynData.is_custom());
        assert!(!FieldType::Str.is_custom());
    }

    #[test]
    fn test_default_literals() {
        assert_eq!(FieldType::Int.default_literal(), "0");
        assert_eq!(FieldType::Long.default_literal(), "0L");
        assert_eq!(FieldType::Float.default_literal(), "0.0f");
        assert_eq!(FieldType::Char.default_literal(), "'\\0'");
        assert_eq!(FieldType::Boolean.default_literal(), "false");
        assert_eq!(FieldType::Decimal.default_literal(), "java.math.BigDecimal.ZERO");
        assert_eq!(FieldType::Str.default_literal(), "null");
        assert_eq!(FieldType::BoxedLong.default_literal(), "null");
    }

    #[test]
    fn test_jdbc_types() {
        assert_eq!(FieldType::Str.jdbc_type(), "VARCHAR");
        assert_eq!(FieldType::Decimal.jdbc_type(), "DECIMAL");
        assert_eq!(FieldType::Date.jdbc_type(), "TIMESTAMP");
        assert_eq!(FieldType::Int.jdbc_type(), "INTEGER");
        assert_eq!(FieldType::BoxedBoolean.jdbc_type(), "BOOLEAN");
        // No explicit mapping for long; it rides on the VARCHAR fallback.
        assert_eq!(FieldType::Long.jdbc_type(), "VARCHAR");
    }

    #[test]
    fn test_query_families() {
        assert_eq!(FieldType::Str.query_family(), QueryFamily::Text);
        assert_eq!(FieldType::Boolean.query_family(), QueryFamily::Flag);
        assert_eq!(FieldType::Long.query_family(), QueryFamily::Numeric);
        assert_eq!(FieldType::BoxedInt.query_family(), QueryFamily::Numeric);
        assert_eq!(FieldType::BoxedShort.query_family(), QueryFamily::Object);
        assert_eq!(FieldType::Date.query_family(), QueryFamily::Date);
        assert_eq!(FieldType::Decimal.query_family(), QueryFamily::Decimal);
        assert_eq!(FieldType::DynData.query_family(), QueryFamily::Nested);
        assert_eq!(
            TypeResolver::resolve("com.shop.Address").query_family(),
            QueryFamily::Object
        );
        assert_eq!(FieldType::Double.query_family(), QueryFamily::Object);
    }

    #[test]
    fn test_param_type_strings() {
        assert_eq!(FieldType::Str.param_type_string(), "String");
        assert_eq!(FieldType::BoxedLong.param_type_string(), "Long");
        assert_eq!(FieldType::Decimal.param_type_string(), "java.math.BigDecimal");
        assert_eq!(FieldType::Date.param_type_string(), "java.util.Date");
        assert_eq!(FieldType::BoxedBoolean.param_type_string(), "boolean");
        assert_eq!(
            FieldType::Custom("com.shop.Address".to_string()).param_type_string(),
            "Object"
        );
    }
}
