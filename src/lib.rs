//! entitygen: Generate companion persistence artifacts from annotated Java entities
//!
//! This crate provides both a CLI tool and a library for maintaining the
//! companion sources of a fixed enterprise persistence convention. It scans a
//! Maven-style project tree for classes annotated with `@EntityDesc`, builds
//! an `EntityDescription` from the annotations, and generates or merges:
//!
//! - The entity class body (fields, accessors, `clear`/`assignFrom`/`toString`)
//! - `{Name}QueryPara` with attribute constants and `setParamBy*` families
//! - `{Name}List`, `I{Name}Dao`, `{Name}Dao`, `I{Name}BaseSvr`, `{Name}BaseSvr`
//! - One MyBatis mapper `mybatis-{Name}.xml` per entity (create-only)
//!
//! Regeneration is merge-based: hand-written members survive, generated
//! members are replaced or inserted after their logical predecessor, and
//! fields dropped from the annotations are pruned together with their
//! accessors.
//!
//! # Configuration
//!
//! ```toml
//! # entitygen.toml
//! project_dir = "/work/shop"
//! source_root = "src/main/java"
//! include_classes = "*"
//! generate_service = true
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! entitygen --config entitygen.toml generate
//! entitygen --project /work/shop --class Order dto
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;
pub mod tree;

use std::collections::HashSet;

use tracing::{debug, info, warn};

pub use config::GenConfig;
pub use error::{GenError, Result};
pub use parser::EntityDescription;

use codegen::CodeGenerator;
use tree::{Project, SourceTree};

/// Main entry point for code generation
pub fn generate(config: &GenConfig) -> Result<()> {
    config.validate()?;
    info!("Scanning project: {}", config.project_dir.display());
    let mut project = Project::load(&config.project_dir, &config.source_root)?;

    let classes = project.annotated_classes(parser::ENTITY_ANNOTATION);
    info!("Found {} annotated classes", classes.len());

    let classes = filter_classes(classes, &config.include_classes, &config.exclude_classes);
    debug!(
        "After filtering: {} classes (include={}, exclude={})",
        classes.len(),
        config.include_classes,
        config.exclude_classes
    );

    let generator = CodeGenerator::new(config);
    for (host, package, name) in &classes {
        let file = match project.find_class(host, package, name) {
            Some(f) => f,
            None => continue,
        };
        let desc = match parser::extract_from_annotations(file) {
            Ok(desc) => desc,
            Err(err) if err.is_precondition() => {
                info!("Skipping {}.{}: {}", package, name, err);
                continue;
            }
            Err(err) => return Err(err),
        };
        let module = target_module(&project, config, &desc, host);
        info!("Generating artifacts for {}.{} in {}", package, name, module);
        generator.generate(&mut project, &module, &desc)?;
    }

    if config.dry_run {
        let pending = project.pending_paths();
        info!("Dry run: {} files would change", pending.len());
        for path in &pending {
            info!("  {}", path);
        }
    } else {
        let written = project.commit()?;
        info!("Code generation complete: {} files written", written.len());
    }
    Ok(())
}

/// Extract the description of one class by simple name, from annotations when
/// present, otherwise by reading back previously generated artifacts.
pub fn describe(config: &GenConfig, class_name: &str) -> Result<EntityDescription> {
    let project = Project::load(&config.project_dir, &config.source_root)?;
    let (module, file) = project
        .find_class_anywhere(class_name)
        .ok_or_else(|| GenError::ClassNotFound(class_name.to_string()))?;
    match parser::extract_from_annotations(file) {
        Ok(desc) => Ok(desc),
        Err(GenError::MissingAnnotation(_)) => {
            debug!("{}: no annotations, reading generated artifacts", class_name);
            parser::extract_from_artifacts(&project, module, file)
        }
        Err(err) => Err(err),
    }
}

/// Pick the module the artifacts land in. Metadata wins when it names a
/// known module, then the configured override, then the class's own module.
fn target_module(
    project: &Project,
    config: &GenConfig,
    desc: &EntityDescription,
    host: &str,
) -> String {
    if !desc.module.is_empty() {
        if project.has_module(&desc.module) {
            return desc.module.clone();
        }
        warn!(
            "Module {} from {} metadata not found",
            desc.module, desc.class_name
        );
    }
    if let Some(module) = &config.output_module {
        if project.has_module(module) {
            return module.clone();
        }
    }
    host.to_string()
}

/// Filter classes based on include/exclude patterns
fn filter_classes(
    classes: Vec<(String, String, String)>,
    include: &str,
    exclude: &str,
) -> Vec<(String, String, String)> {
    let include_all = include.trim() == "*" || include.trim().is_empty();
    let include_set: HashSet<String> = if include_all {
        HashSet::new()
    } else {
        include.split(',').map(|s| s.trim().to_string()).collect()
    };
    let exclude_set: HashSet<String> = exclude
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    classes
        .into_iter()
        .filter(|(_, _, name)| {
            let included = include_all || include_set.contains(name);
            let excluded = exclude_set.contains(name);
            included && !excluded
        })
        .collect()
}
