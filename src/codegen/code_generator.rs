//! Main code generator orchestrator

use tracing::debug;

use crate::config::GenConfig;
use crate::error::Result;
use crate::parser::EntityDescription;
use crate::tree::{ClassSpec, SourceTree};

use super::dao_generator::{dao_impl_spec, dao_interface_spec};
use super::entity_generator::entity_spec;
use super::mapper_generator::mapper_xml;
use super::query_list_generator::query_list_spec;
use super::query_para_generator::query_para_spec;
use super::service_generator::{service_impl_spec, service_interface_spec};

/// Orchestrates the artifact generators for one entity at a time, gated by
/// the configured artifact groups.
pub struct CodeGenerator<'a> {
    config: &'a GenConfig,
}

impl<'a> CodeGenerator<'a> {
    /// Create a new code generator with the given configuration
    pub fn new(config: &'a GenConfig) -> Self {
        Self { config }
    }

    /// Generate every enabled artifact for one entity into `module`.
    pub fn generate<T: SourceTree>(
        &self,
        tree: &mut T,
        module: &str,
        desc: &EntityDescription,
    ) -> Result<()> {
        if self.config.generate_dto {
            self.apply(tree, module, entity_spec(desc))?;
            self.apply(tree, module, query_para_spec(desc))?;
            self.apply(tree, module, query_list_spec(desc))?;
        }
        if self.config.generate_dao {
            self.apply(tree, module, dao_interface_spec(desc))?;
            self.apply(tree, module, dao_impl_spec(desc))?;
            self.write_mapper(tree, module, desc)?;
        }
        if self.config.generate_service {
            self.apply(tree, module, service_interface_spec(desc))?;
            self.apply(tree, module, service_impl_spec(desc))?;
        }
        Ok(())
    }

    fn apply<T: SourceTree>(&self, tree: &mut T, module: &str, spec: ClassSpec) -> Result<()> {
        let name = format!("{}.{}", spec.package, spec.name);
        let report = tree.apply_class(module, &spec)?;
        if report.created {
            debug!("Created {} in {}", name, module);
        } else if report.changed() {
            debug!(
                "Merged {} ({} added, {} replaced, {} removed)",
                name, report.added, report.replaced, report.removed
            );
        } else {
            debug!("Unchanged {}", name);
        }
        Ok(())
    }

    /// The mapper is create-only; an existing file wins unconditionally.
    fn write_mapper<T: SourceTree>(
        &self,
        tree: &mut T,
        module: &str,
        desc: &EntityDescription,
    ) -> Result<()> {
        let file_name = desc.mapper_file_name();
        let created = tree.create_text_file(
            module,
            &desc.dao_package(),
            &file_name,
            &mapper_xml(desc),
        )?;
        if created {
            debug!("Created {} in {}", file_name, module);
        } else {
            debug!("Kept existing {}", file_name);
        }
        Ok(())
    }
}
