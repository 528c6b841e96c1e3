//! Project source tree access
//!
//! `SourceTree` is the port the generation pipeline works against; the
//! `Project` implementation backs it with a Maven-style directory layout,
//! parsing lazily-kept in-memory copies and flushing every change in one
//! commit at the end of a run.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{GenError, Result};
use crate::tree::class::{ClassSpec, JavaClass, JavaFile};
use crate::tree::merge::{apply_spec, MergeReport};
use crate::tree::source::{parse_java, render_java};

/// Access to the source tree the generators read and mutate.
pub trait SourceTree {
    fn default_module(&self) -> &str;

    fn has_module(&self, name: &str) -> bool;

    /// Resolve a metadata module name, falling back to the default module
    /// when the name is empty or unknown.
    fn resolve_module(&self, name: &str) -> String {
        if !name.is_empty() && self.has_module(name) {
            name.to_string()
        } else {
            self.default_module().to_string()
        }
    }

    fn find_class(&self, module: &str, package: &str, name: &str) -> Option<&JavaFile>;

    /// Find-or-create the class a spec describes and merge the spec into it.
    fn apply_class(&mut self, module: &str, spec: &ClassSpec) -> Result<MergeReport>;

    /// Look up a non-Java file by file name anywhere under the module root.
    fn find_text_file(&self, module: &str, file_name: &str) -> Option<&str>;

    /// Create a text file unless one with the same name already exists
    /// anywhere in the module. Returns whether the file was created.
    fn create_text_file(
        &mut self,
        module: &str,
        package: &str,
        file_name: &str,
        content: &str,
    ) -> Result<bool>;

    /// Flush modified files. Returns the written paths.
    fn commit(&mut self) -> Result<Vec<PathBuf>>;
}

/// One loaded source file.
pub enum SourceEntry {
    Java(JavaFile),
    /// Mapper XML, or Java the parser could not handle, kept verbatim.
    Text(String),
}

struct ModuleSources {
    name: String,
    /// Absolute source root on disk; None for in-memory projects.
    root: Option<PathBuf>,
    /// Files keyed by path relative to the source root, '/'-separated.
    files: BTreeMap<String, SourceEntry>,
    dirty: BTreeSet<String>,
}

impl ModuleSources {
    fn in_memory(name: &str) -> Self {
        ModuleSources {
            name: name.to_string(),
            root: None,
            files: BTreeMap::new(),
            dirty: BTreeSet::new(),
        }
    }

    fn load(name: String, src_root: PathBuf) -> Result<Self> {
        let mut files = BTreeMap::new();
        collect_sources(&src_root, &src_root, &mut files)?;
        debug!(module = %name, files = files.len(), "scanned source root");
        Ok(ModuleSources {
            name,
            root: Some(src_root),
            files,
            dirty: BTreeSet::new(),
        })
    }
}

fn collect_sources(
    base: &Path,
    dir: &Path,
    files: &mut BTreeMap<String, SourceEntry>,
) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_sources(base, &path, files)?;
            continue;
        }
        let rel = match path.strip_prefix(base) {
            Ok(r) => r.to_string_lossy().replace('\\', "/"),
            Err(_) => continue,
        };
        match path.extension().and_then(|e| e.to_str()) {
            Some("java") => {
                let text = fs::read_to_string(&path)?;
                match parse_java(&text) {
                    Ok(file) => {
                        files.insert(rel, SourceEntry::Java(file));
                    }
                    Err(err) => {
                        warn!("{}: kept as opaque text: {}", path.display(), err);
                        files.insert(rel, SourceEntry::Text(text));
                    }
                }
            }
            Some("xml") => {
                files.insert(rel, SourceEntry::Text(fs::read_to_string(&path)?));
            }
            _ => {}
        }
    }
    Ok(())
}

fn java_rel_path(package: &str, file_name: &str) -> String {
    if package.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", package.replace('.', "/"), file_name)
    }
}

/// A set of modules sharing one project root. The first module is the
/// default target when metadata names no module or an unknown one.
pub struct Project {
    modules: Vec<ModuleSources>,
}

impl Project {
    /// Load a project from disk. The root itself and every direct child
    /// directory containing `source_root` become modules, the root first.
    pub fn load(root: &Path, source_root: &str) -> Result<Self> {
        let mut modules = Vec::new();

        let root_src = root.join(source_root);
        if root_src.is_dir() {
            let name = root
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("main")
                .to_string();
            modules.push(ModuleSources::load(name, root_src)?);
        }

        let mut children: Vec<PathBuf> = fs::read_dir(root)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        children.sort();
        for child in children {
            let src = child.join(source_root);
            if src.is_dir() {
                let name = child
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();
                modules.push(ModuleSources::load(name, src)?);
            }
        }

        if modules.is_empty() {
            return Err(GenError::SourceRootMissing(root.display().to_string()));
        }
        info!(
            modules = modules.len(),
            root = %root.display(),
            "project loaded"
        );
        Ok(Project { modules })
    }

    /// An empty project holding sources only in memory. Used by tests and
    /// callers that render output themselves.
    pub fn in_memory(module_names: &[&str]) -> Self {
        let modules = module_names
            .iter()
            .map(|n| ModuleSources::in_memory(n))
            .collect();
        Project { modules }
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }

    fn module(&self, name: &str) -> Option<&ModuleSources> {
        self.modules.iter().find(|m| m.name == name)
    }

    fn module_mut(&mut self, name: &str) -> Result<&mut ModuleSources> {
        self.modules
            .iter_mut()
            .find(|m| m.name == name)
            .ok_or_else(|| GenError::ModuleNotFound(name.to_string()))
    }

    /// Seed a Java file without marking it dirty, as if loaded from disk.
    pub fn insert_java(&mut self, module: &str, file: JavaFile) -> Result<()> {
        let rel = java_rel_path(&file.package, &format!("{}.java", file.class.name));
        self.module_mut(module)?.files.insert(rel, SourceEntry::Java(file));
        Ok(())
    }

    /// Seed a text file without marking it dirty.
    pub fn insert_text(&mut self, module: &str, rel_path: &str, text: &str) -> Result<()> {
        self.module_mut(module)?
            .files
            .insert(rel_path.to_string(), SourceEntry::Text(text.to_string()));
        Ok(())
    }

    /// Render the current content of a file, whether or not it is dirty.
    pub fn file_text(&self, module: &str, rel_path: &str) -> Option<String> {
        match self.module(module)?.files.get(rel_path)? {
            SourceEntry::Java(f) => Some(render_java(f)),
            SourceEntry::Text(t) => Some(t.clone()),
        }
    }

    /// All classes carrying the given annotation, as
    /// (module, package, class name) triples in deterministic order.
    pub fn annotated_classes(&self, simple_name: &str) -> Vec<(String, String, String)> {
        let mut hits = Vec::new();
        for m in &self.modules {
            for entry in m.files.values() {
                if let SourceEntry::Java(file) = entry {
                    if file.class.annotation(simple_name).is_some() {
                        hits.push((
                            m.name.clone(),
                            file.package.clone(),
                            file.class.name.clone(),
                        ));
                    }
                }
            }
        }
        hits
    }

    /// Locate a class by simple name across all modules.
    pub fn find_class_anywhere(&self, name: &str) -> Option<(&str, &JavaFile)> {
        for m in &self.modules {
            for entry in m.files.values() {
                if let SourceEntry::Java(file) = entry {
                    if file.class.name == name {
                        return Some((m.name.as_str(), file));
                    }
                }
            }
        }
        None
    }

    /// Paths currently marked dirty, for dry-run reporting.
    pub fn pending_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for m in &self.modules {
            for p in &m.dirty {
                paths.push(format!("{}:{}", m.name, p));
            }
        }
        paths
    }
}

impl SourceTree for Project {
    fn default_module(&self) -> &str {
        self.modules
            .first()
            .map(|m| m.name.as_str())
            .unwrap_or_default()
    }

    fn has_module(&self, name: &str) -> bool {
        self.modules.iter().any(|m| m.name == name)
    }

    fn find_class(&self, module: &str, package: &str, name: &str) -> Option<&JavaFile> {
        let rel = java_rel_path(package, &format!("{}.java", name));
        match self.module(module)?.files.get(&rel)? {
            SourceEntry::Java(f) => Some(f),
            SourceEntry::Text(_) => None,
        }
    }

    fn apply_class(&mut self, module: &str, spec: &ClassSpec) -> Result<MergeReport> {
        let m = self.module_mut(module)?;
        let rel = java_rel_path(&spec.package, &spec.file_name());

        let created = if m.files.contains_key(&rel) {
            false
        } else {
            let file = JavaFile::new(&spec.package, JavaClass::new(&spec.name, spec.kind));
            m.files.insert(rel.clone(), SourceEntry::Java(file));
            true
        };

        match m.files.get_mut(&rel) {
            Some(SourceEntry::Java(file)) => {
                let mut report = apply_spec(file, spec);
                report.created = created;
                if report.changed() {
                    m.dirty.insert(rel);
                }
                Ok(report)
            }
            Some(SourceEntry::Text(_)) => Err(GenError::ParseError(format!(
                "{} exists but could not be parsed as Java",
                rel
            ))),
            None => Err(GenError::ClassNotFound(spec.qualified_name())),
        }
    }

    fn find_text_file(&self, module: &str, file_name: &str) -> Option<&str> {
        let suffix = format!("/{}", file_name);
        let m = self.module(module)?;
        for (path, entry) in &m.files {
            if path == file_name || path.ends_with(&suffix) {
                if let SourceEntry::Text(t) = entry {
                    return Some(t);
                }
            }
        }
        None
    }

    fn create_text_file(
        &mut self,
        module: &str,
        package: &str,
        file_name: &str,
        content: &str,
    ) -> Result<bool> {
        let m = self.module_mut(module)?;
        let suffix = format!("/{}", file_name);
        if m.files
            .keys()
            .any(|p| p == file_name || p.ends_with(&suffix))
        {
            return Ok(false);
        }
        let rel = java_rel_path(package, file_name);
        m.files.insert(rel.clone(), SourceEntry::Text(content.to_string()));
        m.dirty.insert(rel);
        Ok(true)
    }

    fn commit(&mut self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for m in &mut self.modules {
            let dirty: Vec<String> = m.dirty.iter().cloned().collect();
            for rel in dirty {
                let content = match m.files.get(&rel) {
                    Some(SourceEntry::Java(f)) => render_java(f),
                    Some(SourceEntry::Text(t)) => t.clone(),
                    None => continue,
                };
                let path = match &m.root {
                    Some(root) => {
                        let path = root.join(&rel);
                        if let Some(parent) = path.parent() {
                            fs::create_dir_all(parent)?;
                        }
                        fs::write(&path, content)?;
                        path
                    }
                    None => PathBuf::from(&rel),
                };
                debug!("wrote {}", path.display());
                written.push(path);
            }
            m.dirty.clear();
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::class::{Member, MemberSpec, TypeKind};
    use crate::tree::class::Anchor;

    fn order_spec() -> ClassSpec {
        let mut spec = ClassSpec::new("com.shop", "Order", TypeKind::Class);
        spec.extends = Some("pengesoft.data.DataPacket".to_string());
        spec.members.push(MemberSpec::keep(
            Member::field("orderNo", "String", Some("// order number".into()), "private String orderNo;"),
            Anchor::Tail,
        ));
        spec
    }

    #[test]
    fn test_in_memory_apply_and_render() {
        let mut project = Project::in_memory(&["app"]);
        let report = project.apply_class("app", &order_spec()).unwrap();
        assert!(report.created);
        assert_eq!(report.added, 1);

        let text = project.file_text("app", "com/shop/Order.java").unwrap();
        assert!(text.starts_with("package com.shop;"));
        assert!(text.contains("extends pengesoft.data.DataPacket"));
        assert!(text.contains("private String orderNo;"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut project = Project::in_memory(&["app"]);
        project.apply_class("app", &order_spec()).unwrap();
        let before = project.file_text("app", "com/shop/Order.java").unwrap();
        let second = project.apply_class("app", &order_spec()).unwrap();
        assert!(!second.changed());
        let after = project.file_text("app", "com/shop/Order.java").unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_resolve_module_fallback() {
        let project = Project::in_memory(&["core", "web"]);
        assert_eq!(project.resolve_module("web"), "web");
        assert_eq!(project.resolve_module("nope"), "core");
        assert_eq!(project.resolve_module(""), "core");
    }

    #[test]
    fn test_create_text_file_is_create_only() {
        let mut project = Project::in_memory(&["app"]);
        let created = project
            .create_text_file("app", "com.shop.dao", "mybatis-Order.xml", "<mapper/>")
            .unwrap();
        assert!(created);
        // A second attempt finds the existing file, wherever it lives.
        let again = project
            .create_text_file("app", "com.other", "mybatis-Order.xml", "<mapper2/>")
            .unwrap();
        assert!(!again);
        assert_eq!(
            project.find_text_file("app", "mybatis-Order.xml"),
            Some("<mapper/>")
        );
    }

    #[test]
    fn test_load_commit_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src/main/java/com/shop");
        fs::create_dir_all(&src).unwrap();
        fs::write(
            src.join("Order.java"),
            "package com.shop;\n\npublic class Order {\n\n    private String orderNo;\n}\n",
        )
        .unwrap();

        let mut project = Project::load(dir.path(), "src/main/java").unwrap();
        assert_eq!(project.module_names().len(), 1);
        assert!(project
            .find_class(project.default_module(), "com.shop", "Order")
            .is_some());

        let module = project.default_module().to_string();
        project.apply_class(&module, &order_spec()).unwrap();
        let written = project.commit().unwrap();
        assert_eq!(written.len(), 1);

        let text = fs::read_to_string(&written[0]).unwrap();
        assert!(text.contains("extends pengesoft.data.DataPacket"));

        // Nothing left dirty after commit.
        assert!(project.commit().unwrap().is_empty());
    }

    #[test]
    fn test_module_discovery() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/main/java")).unwrap();
        fs::create_dir_all(dir.path().join("shop-web/src/main/java")).unwrap();
        fs::create_dir_all(dir.path().join("shop-core/src/main/java")).unwrap();

        let project = Project::load(dir.path(), "src/main/java").unwrap();
        let names = project.module_names();
        assert_eq!(names.len(), 3);
        // Root module first, children in name order.
        assert_eq!(names[1], "shop-core");
        assert_eq!(names[2], "shop-web");
        assert_eq!(project.default_module(), names[0]);
    }

    #[test]
    fn test_missing_source_root() {
        let dir = tempfile::tempdir().unwrap();
        match Project::load(dir.path(), "src/main/java") {
            Err(GenError::SourceRootMissing(_)) => {}
            other => panic!("expected SourceRootMissing, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_annotated_class_scan() {
        let mut project = Project::in_memory(&["app"]);
        let src = "package com.shop;\n\n@EntityDesc(tbName = \"t_order\", desc = \"order\")\npublic class Order {\n}\n";
        project
            .insert_java("app", parse_java(src).unwrap())
            .unwrap();
        project
            .insert_java(
                "app",
                parse_java("package com.shop;\n\npublic class Plain {\n}\n").unwrap(),
            )
            .unwrap();

        let hits = project.annotated_classes("EntityDesc");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].2, "Order");
        assert!(project.find_class_anywhere("Plain").is_some());
    }
}
