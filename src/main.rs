//! CLI entry point for entitygen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use entitygen::config::GenConfig;
use entitygen::parser::{extract_from_annotations, EntityDescription, ENTITY_ANNOTATION};
use entitygen::tree::{Project, SourceTree};

#[derive(Parser)]
#[command(name = "entitygen")]
#[command(about = "Generate companion persistence artifacts from annotated Java entities")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root directory of the target Java project (overrides config)
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// Restrict the run to one entity class by simple name
    #[arg(long)]
    class: Option<String>,

    /// Dry run - show what would change without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate all (entity/query/list, DAO and mapper, base service)
    Generate,
    /// Generate only the entity, query-parameter and list classes
    Dto,
    /// Generate only the DAO interface/implementation and the mapper XML
    Dao,
    /// Generate only the base service interface/implementation
    Service,
    /// Inspect entity descriptions (annotations, or generated artifacts)
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = GenConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(project) = cli.project {
        config.project_dir = project;
    }
    if let Some(class) = &cli.class {
        config.include_classes = class.clone();
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    // Apply command-specific settings
    match &cli.command {
        Some(Commands::Dto) => {
            config.generate_dao = false;
            config.generate_service = false;
        }
        Some(Commands::Dao) => {
            config.generate_dto = false;
            config.generate_service = false;
        }
        Some(Commands::Service) => {
            config.generate_dto = false;
            config.generate_dao = false;
        }
        Some(Commands::Inspect) => {
            return inspect_entities(&config, cli.class.as_deref());
        }
        _ => {}
    }

    config.validate()?;

    info!("Generating artifacts in {}", config.project_dir.display());
    entitygen::generate(&config)?;

    info!("Code generation completed successfully");
    Ok(())
}

fn inspect_entities(config: &GenConfig, class: Option<&str>) -> Result<()> {
    if let Some(name) = class {
        let desc = entitygen::describe(config, name)?;
        print_description(&desc);
        return Ok(());
    }

    let project = Project::load(&config.project_dir, &config.source_root)?;
    let classes = project.annotated_classes(ENTITY_ANNOTATION);
    println!("Found {} annotated classes:\n", classes.len());
    for (module, package, name) in &classes {
        let file = match project.find_class(module, package, name) {
            Some(f) => f,
            None => continue,
        };
        match extract_from_annotations(file) {
            Ok(desc) => print_description(&desc),
            Err(err) => println!("{}.{}: {}\n", package, name, err),
        }
    }
    Ok(())
}

fn print_description(desc: &EntityDescription) {
    println!("Entity: {}.{}", desc.package, desc.class_name);
    println!("  Table: {}", desc.table_name);
    if !desc.description.is_empty() {
        println!("  Description: {}", desc.description);
    }
    if !desc.module.is_empty() {
        println!("  Module: {}", desc.module);
    }
    if let Some(super_class) = &desc.super_class {
        println!("  Superclass: {}", super_class);
    }
    println!("  Logical delete: {}", desc.logical_delete);
    println!("  Fields:");
    for field in &desc.fields {
        let mut flags = Vec::new();
        if field.primary {
            flags.push("primary");
        }
        if field.skip {
            flags.push("skip");
        }
        if field.queryable {
            flags.push("queryable");
        }
        if field.sortable {
            flags.push("sortable");
        }
        let flag_text = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!(
            "    - {} {} -> {}{}",
            field.java_type, field.name, field.column_name, flag_text
        );
        if !field.description.is_empty() {
            println!("      {}", field.description);
        }
    }
    println!();
}
