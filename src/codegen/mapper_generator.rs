//! MyBatis mapper XML generation
//!
//! The mapper is rendered in a single pass and written only when absent;
//! an existing file is never touched, so hand-tuned SQL survives. Every
//! `<include>` refid is qualified with the mapper namespace, which is the
//! same namespace the DAO statement ids resolve against.

use crate::codegen::naming;
use crate::codegen::{QueryFamily, TypeResolver};
use crate::parser::{mapper_marker, EntityDescription, FieldDescription};

/// Render the complete `mybatis-{Name}.xml` document.
pub fn mapper_xml(desc: &EntityDescription) -> String {
    let blocks = vec![
        result_map(desc),
        base_col(desc),
        all_col(desc),
        json_query_where(),
        where_sql(desc),
        where_sql_inner(desc),
        where_sql_inner_or(desc),
        order_sql(desc),
        order_sql_inner(desc),
        insert_col(desc),
        insert_values(desc),
        update_values(desc),
        crud_statements(desc),
    ];
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n<!DOCTYPE mapper PUBLIC \"-//mybatis.org//DTD Mapper 3.0//EN\" \"http://mybatis.org/dtd/mybatis-3-mapper.dtd\">\n{marker}\n<mapper namespace=\"{ns}\">\n\n{body}\n\n</mapper>\n",
        marker = mapper_marker(&desc.table_name),
        ns = desc.mapper_namespace(),
        body = blocks.join("\n\n")
    )
}

fn is_json(field: &FieldDescription) -> bool {
    TypeResolver::resolve(&field.java_type).is_custom()
}

fn family(field: &FieldDescription) -> QueryFamily {
    TypeResolver::resolve(&field.java_type).query_family()
}

fn jdbc(field: &FieldDescription) -> &'static str {
    TypeResolver::resolve(&field.java_type).jdbc_type()
}

/// Qualified refid of a sibling fragment.
fn refid(desc: &EntityDescription, kind: &str) -> String {
    format!(
        "{}.{}",
        desc.mapper_namespace(),
        naming::fragment_id(&desc.class_name, kind)
    )
}

fn result_map(desc: &EntityDescription) -> String {
    let mut rows = Vec::new();
    for field in &desc.fields {
        if field.skip {
            continue;
        }
        let row = if field.primary {
            format!(
                "        <id property=\"{}\" column=\"{}\"/>",
                field.name, field.column_name
            )
        } else if is_json(field) {
            format!(
                "        <result property=\"{}.jsonText\" column=\"{}\"/>",
                field.name, field.column_name
            )
        } else {
            format!(
                "        <result property=\"{}\" column=\"{}\"/>",
                field.name, field.column_name
            )
        };
        rows.push(row);
    }
    format!(
        "    <resultMap type=\"{pkg}.{name}\" id=\"{id}\">\n{rows}\n    </resultMap>",
        pkg = desc.package,
        name = desc.class_name,
        id = naming::result_map_id(&desc.class_name),
        rows = rows.join("\n")
    )
}

/// Column list fragment. The base variant also drops JSON-backed columns so
/// list queries stay narrow.
fn col_fragment(desc: &EntityDescription, kind: &str, include_json: bool) -> String {
    let cols: Vec<String> = desc
        .fields
        .iter()
        .filter(|f| !f.skip && (include_json || !is_json(f)))
        .map(|f| format!("t.{}", f.column_name))
        .collect();
    format!(
        "    <sql id=\"{id}\">\n        {cols}\n    </sql>",
        id = naming::fragment_id(&desc.class_name, kind),
        cols = cols.join(", ")
    )
}

fn base_col(desc: &EntityDescription) -> String {
    col_fragment(desc, "BaseCol", false)
}

fn all_col(desc: &EntityDescription) -> String {
    col_fragment(desc, "AllCol", true)
}

/// JSON-path probe fragment, independent of the field set. The caller binds
/// `JsonColName` and a `{field}_JsonProp` descriptor list at query time.
fn json_query_where() -> String {
    let lines = [
        "    <sql id=\"jsonQueryWhereSqlInner\">",
        "        <if test=\"${JsonQueryFieldName}_JsonProp != null\">",
        "            <foreach collection=\"${JsonQueryFieldName}_JsonProp\" item=\"item\">",
        "                <if test=\"item.propType == null or item.propType == '' or item.propType == 'string'\">",
        "                    and JSON_VALUE(t.${JsonColName}, '${item.propPath}') like #{item.propVal}",
        "                </if>",
        "                <if test=\"item.propType == 'date' or item.propType == 'number'\">",
        "                    and JSON_VALUE(t.${JsonColName}, '${item.propPath}') &gt; #{item.queryRangeStart}",
        "                    and JSON_VALUE(t.${JsonColName}, '${item.propPath}') &lt; #{item.queryRangeEnd}",
        "                </if>",
        "                <if test=\"item.propType == 'enum'\">",
        "                    and JSON_VALUE(t.${JsonColName}, '${item.propPath}') in",
        "                    <foreach collection=\"item.propVal\" item=\"it\" open=\"(\" separator=\",\" close=\")\">",
        "                        #{it}",
        "                    </foreach>",
        "                </if>",
        "            </foreach>",
        "        </if>",
        "    </sql>",
    ];
    lines.join("\n")
}

fn where_sql(desc: &EntityDescription) -> String {
    format!(
        "    <sql id=\"{id}\">\n        <trim prefix=\"WHERE\" prefixOverrides=\"and or \">\n            <include refid=\"{inner}\"/>\n            <if test=\"_default_mulattr != null\">\n                and (\n                <foreach collection=\"_default_mulattr\" item=\"item\" separator=\" or \">\n                    <include refid=\"{inner_or}\"/>\n                </foreach>\n                )\n            </if>\n        </trim>\n    </sql>",
        id = naming::fragment_id(&desc.class_name, "WhereSql"),
        inner = refid(desc, "WhereSqlInner"),
        inner_or = refid(desc, "WhereSqlInnerOr")
    )
}

fn where_sql_inner(desc: &EntityDescription) -> String {
    let mut blocks = Vec::new();
    for field in desc.fields.iter().filter(|f| f.queryable) {
        let f = &field.name;
        let col = &field.column_name;
        match family(field) {
            QueryFamily::Text => {
                blocks.push(format!("        <if test=\"{f} != null\">\n            <if test=\"{f} == ''\">\n                and (t.{col} is null or t.{col} = '')\n            </if>\n            <if test=\"{f} != ''\">\n                and t.{col} like #{{{f}}}\n            </if>\n        </if>", f = f, col = col));
                blocks.push(format!("        <if test=\"{f}_Enum != null\">\n            and t.{col} in\n            <foreach collection=\"{f}_Enum\" item=\"item\" open=\"(\" separator=\",\" close=\")\">#{{item}}</foreach>\n        </if>", f = f, col = col));
                blocks.push(format!("        <if test=\"{f}_EnumLike != null\">\n            and <foreach collection=\"{f}_EnumLike\" item=\"item\" open=\"(\" separator=\" or \" close=\")\">t.{col} like #{{item}}</foreach>\n        </if>", f = f, col = col));
            }
            QueryFamily::Date => {
                blocks.push(format!(
                    "        <if test=\"{f} != null\">and t.{col} = #{{{f}}}</if>",
                    f = f,
                    col = col
                ));
                blocks.push(format!("        <if test=\"{f}_S != null\"><![CDATA[ and t.{col} > #{{{f}_S}} and t.{col} < #{{{f}_E}} ]]></if>", f = f, col = col));
            }
            QueryFamily::Numeric | QueryFamily::Decimal => {
                blocks.push(format!(
                    "        <if test=\"{f} != null\">and t.{col} = #{{{f}}}</if>",
                    f = f,
                    col = col
                ));
                blocks.push(format!("        <if test=\"{f}_Enum != null\">\n            and t.{col} in\n            <foreach collection=\"{f}_Enum\" item=\"item\" open=\"(\" separator=\",\" close=\")\">#{{item}}</foreach>\n        </if>", f = f, col = col));
                blocks.push(format!("        <if test=\"{f}_L != null\"><![CDATA[ and t.{col} >= #{{{f}_L}} and t.{col} <= #{{{f}_H}} ]]></if>", f = f, col = col));
            }
            QueryFamily::Flag => {
                blocks.push(format!(
                    "        <if test=\"{f} != null\">and t.{col} = #{{{f}}}</if>",
                    f = f,
                    col = col
                ));
            }
            // Nested and fallback types have no condition shape.
            QueryFamily::Nested | QueryFamily::Object => {}
        }
    }
    format!(
        "    <sql id=\"{id}\">\n{body}\n    </sql>",
        id = naming::fragment_id(&desc.class_name, "WhereSqlInner"),
        body = blocks.join("\n")
    )
}

fn where_sql_inner_or(desc: &EntityDescription) -> String {
    let rows: Vec<String> = desc
        .fields
        .iter()
        .filter(|f| f.queryable)
        .map(|field| {
            let shape = if family(field) == QueryFamily::Text {
                format!("t.{} like #{{item.value}}", field.column_name)
            } else {
                format!("t.{} = #{{item.value}}", field.column_name)
            };
            format!(
                "        <if test=\"item.name == '{}'\">{}</if>",
                field.name, shape
            )
        })
        .collect();
    format!(
        "    <sql id=\"{id}\">\n{rows}\n    </sql>",
        id = naming::fragment_id(&desc.class_name, "WhereSqlInnerOr"),
        rows = rows.join("\n")
    )
}

fn order_sql(desc: &EntityDescription) -> String {
    format!(
        "    <sql id=\"{id}\">\n        <trim prefix=\"ORDER BY\" suffixOverrides=\",\">\n            <if test=\"_orderBys != null\">\n                <foreach collection=\"_orderBys\" item=\"item\" open=\"\" separator=\",\" close=\"\">\n                    <include refid=\"{inner}\"/>\n                </foreach>\n            </if>\n        </trim>\n    </sql>",
        id = naming::fragment_id(&desc.class_name, "OrderSql"),
        inner = refid(desc, "OrderSqlInner")
    )
}

fn order_sql_inner(desc: &EntityDescription) -> String {
    let rows: Vec<String> = desc
        .fields
        .iter()
        .filter(|f| f.sortable)
        .map(|field| {
            format!(
                "        <if test=\"item == '{f}'\">t.{col}</if>\n        <if test=\"item == '{f}_D'\">t.{col} desc</if>",
                f = field.name,
                col = field.column_name
            )
        })
        .collect();
    format!(
        "    <sql id=\"{id}\">\n{rows}\n    </sql>",
        id = naming::fragment_id(&desc.class_name, "OrderSqlInner"),
        rows = rows.join("\n")
    )
}

fn insert_col(desc: &EntityDescription) -> String {
    let cols: Vec<String> = desc
        .fields
        .iter()
        .filter(|f| !f.skip)
        .map(|f| format!("        {}", f.column_name))
        .collect();
    format!(
        "    <sql id=\"{id}\">\n{cols}\n    </sql>",
        id = naming::fragment_id(&desc.class_name, "InsertCol"),
        cols = cols.join(",\n")
    )
}

fn placeholder(field: &FieldDescription) -> String {
    if is_json(field) {
        format!("#{{{}.jsonText,jdbcType=VARCHAR}}", field.name)
    } else {
        format!("#{{{},jdbcType={}}}", field.name, jdbc(field))
    }
}

fn insert_values(desc: &EntityDescription) -> String {
    let values: Vec<String> = desc
        .fields
        .iter()
        .filter(|f| !f.skip)
        .map(|f| format!("        {}", placeholder(f)))
        .collect();
    format!(
        "    <sql id=\"{id}\">\n{values}\n    </sql>",
        id = naming::fragment_id(&desc.class_name, "InsertValues"),
        values = values.join(",\n")
    )
}

fn update_values(desc: &EntityDescription) -> String {
    let rows: Vec<String> = desc
        .fields
        .iter()
        .filter(|f| !f.skip && !f.primary)
        .map(|f| format!("        {} = {}", f.column_name, placeholder(f)))
        .collect();
    format!(
        "    <sql id=\"{id}\">\n{rows}\n    </sql>",
        id = naming::fragment_id(&desc.class_name, "UpdateValues"),
        rows = rows.join(",\n")
    )
}

fn crud_statements(desc: &EntityDescription) -> String {
    let key = desc.key_field();
    let key_predicate = format!(
        "{col}=#{{{f},jdbcType={ty}}}",
        col = key.column_name,
        f = key.name,
        ty = jdbc(&key)
    );
    let entity_type = format!("{}.{}", desc.package, desc.class_name);
    let ids = naming::statement_ids(&desc.class_name);
    let map_id = naming::result_map_id(&desc.class_name);
    let tb = &desc.table_name;

    let mut out = Vec::new();
    out.push(format!(
        "    <insert id=\"{id}\" parameterType=\"{ty}\">\n        insert into {tb}(\n        <include refid=\"{cols}\"/>\n        )values(\n        <include refid=\"{values}\"/>\n        )\n    </insert>",
        id = ids[0],
        ty = entity_type,
        tb = tb,
        cols = refid(desc, "InsertCol"),
        values = refid(desc, "InsertValues")
    ));
    out.push(format!(
        "    <update id=\"{id}\" parameterType=\"{ty}\">\n        update {tb} set\n        <include refid=\"{values}\"/>\n        where {key}\n    </update>",
        id = ids[1],
        ty = entity_type,
        tb = tb,
        values = refid(desc, "UpdateValues"),
        key = key_predicate
    ));
    out.push(format!(
        "    <delete id=\"{id}\" parameterType=\"{ty}\">\n        delete from {tb} where {key}\n    </delete>",
        id = ids[2],
        ty = entity_type,
        tb = tb,
        key = key_predicate
    ));
    out.push(format!(
        "    <select id=\"{id}\" parameterType=\"{ty}\" resultMap=\"{map}\">\n        select\n        <include refid=\"{cols}\"/>\n        from {tb} t where {key}\n    </select>",
        id = ids[3],
        ty = entity_type,
        map = map_id,
        cols = refid(desc, "BaseCol"),
        tb = tb,
        key = key_predicate
    ));
    out.push(format!(
        "    <select id=\"{id}\" parameterType=\"{ty}\" resultMap=\"{map}\">\n        select t.* from {tb} t where {key}\n    </select>",
        id = ids[4],
        ty = entity_type,
        map = map_id,
        tb = tb,
        key = key_predicate
    ));
    out.push(format!(
        "    <select id=\"{id}\" parameterType=\"java.util.Map\" resultType=\"int\">\n        select count(*) from {tb} t\n        <include refid=\"{where_frag}\"/>\n    </select>",
        id = ids[5],
        tb = tb,
        where_frag = refid(desc, "WhereSql")
    ));
    out.push(format!(
        "    <select id=\"{id}\" parameterType=\"java.util.Map\" resultMap=\"{map}\">\n        select\n        <include refid=\"{cols}\"/>\n        from {tb} t\n        <include refid=\"{where_frag}\"/>\n        <include refid=\"{order_frag}\"/>\n    </select>",
        id = ids[6],
        map = map_id,
        cols = refid(desc, "BaseCol"),
        tb = tb,
        where_frag = refid(desc, "WhereSql"),
        order_frag = refid(desc, "OrderSql")
    ));
    out.push(format!(
        "    <select id=\"{id}\" parameterType=\"java.util.Map\" resultMap=\"{map}\">\n        select t.* from {tb} t\n        <include refid=\"{where_frag}\"/>\n        <include refid=\"{order_frag}\"/>\n    </select>",
        id = ids[7],
        map = map_id,
        tb = tb,
        where_frag = refid(desc, "WhereSql"),
        order_frag = refid(desc, "OrderSql")
    ));
    out.join("\n\n")
}
