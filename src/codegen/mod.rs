//! Generators for the companion artifacts of an entity.
//!
//! Each generator is a pure function from an `EntityDescription` to a
//! `ClassSpec` (or, for the mapper, an XML string); the merge engine in
//! `tree` turns specs into source edits.

mod code_generator;
mod dao_generator;
mod entity_generator;
mod mapper_generator;
pub mod naming;
mod query_list_generator;
mod query_para_generator;
mod service_generator;
mod type_resolver;

pub use code_generator::*;
pub use dao_generator::*;
pub use entity_generator::*;
pub use mapper_generator::*;
pub use query_list_generator::*;
pub use query_para_generator::*;
pub use service_generator::*;
pub use type_resolver::*;

// Runtime support classes the generated code builds on.
pub const DATA_PACKET: &str = "pengesoft.data.DataPacket";
pub const DYN_DATA_PACKET: &str = "pengesoft.data.DynDataPacket";
pub const QUERY_PARAMETER: &str = "pengesoft.db.QueryParameter";
pub const QUERY_DATA_LIST: &str = "pengesoft.db.QueryDataList";
pub const DATA_PROVIDER_INTF: &str = "pengesoft.db.IDataProvider";
pub const DATA_PROVIDER_IMPL: &str = "pengesoft.db.DataProvider";

/// Banner comment carried by every generated Java artifact. The template
/// name records which generator wrote the file.
pub(crate) fn class_banner(summary: &str, template: &str) -> String {
    format!(
        "/**\n * {}\n *\n * Generated by the Pengesoft model tool (template: {}); avoid editing this file directly.\n * Copyright (C) 2008 - Pengesoft\n */",
        summary, template
    )
}
