//! Default configuration values - single source of truth

/// Default source root relative to a module directory (Maven layout)
pub const SOURCE_ROOT: &str = "src/main/java";

/// Default include classes pattern (all annotated classes)
pub const INCLUDE_CLASSES: &str = "*";

/// Default exclude classes pattern (none)
pub const EXCLUDE_CLASSES: &str = "";

/// Whether to generate entity/query-parameter/list files by default
pub const GENERATE_DTO: bool = true;

/// Whether to generate DAO files and the mapper XML by default
pub const GENERATE_DAO: bool = true;

/// Whether to generate base service files by default
pub const GENERATE_SERVICE: bool = true;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
