use crate::error::LoadError;
use colorsource_core::{GrammarError, GrammarTable};
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Grammars compiled into the binary, as `(name, yaml)`.
const BUILTIN: &[(&str, &str)] = &[
    ("c", include_str!("../grammars/c.yaml")),
    ("diff", include_str!("../grammars/diff.yaml")),
    ("properties", include_str!("../grammars/properties.yaml")),
    ("url", include_str!("../grammars/url.yaml")),
];

/// File extensions tried, in order, for each search path.
const EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Resolves a language name to a compiled grammar.
pub trait GrammarSource {
    /// Load the grammar registered under `name`.
    fn load(&self, name: &str) -> Result<Arc<GrammarTable>, LoadError>;
}

#[derive(Debug, Default)]
/// Language registry: in-memory registrations, filesystem search paths and built-in grammars,
/// consulted in that order.
///
/// Grammars found on disk or built in are compiled on first use and cached, so `load` only
/// needs `&self` and the registry can be shared between threads.
pub struct GrammarRegistry {
    registered: HashMap<String, Arc<GrammarTable>>,
    search_paths: Vec<PathBuf>,
    compiled: RwLock<HashMap<String, Arc<GrammarTable>>>,
}

impl GrammarRegistry {
    /// Create a registry that knows only the built-in grammars.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compiled grammar under `name`, shadowing any file or built-in grammar.
    pub fn register(&mut self, name: impl Into<String>, grammar: GrammarTable) {
        self.registered.insert(name.into(), Arc::new(grammar));
    }

    /// Add a directory searched for `<name>.yaml`, `<name>.yml` or `<name>.json`.
    ///
    /// Directories are searched in the order they were added.
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
        // Names that resolved to a built-in may now resolve to a file.
        self.compiled.get_mut().clear();
    }

    /// Names of all languages this registry can resolve, sorted.
    pub fn languages(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = BUILTIN.iter().map(|(n, _)| n.to_string()).collect();
        names.extend(self.registered.keys().cloned());

        for dir in &self.search_paths {
            let Ok(entries) = std::fs::read_dir(dir) else {
                debug!(dir = %dir.display(), "grammar search path is not readable");
                continue;
            };
            for path in entries.flatten().map(|e| e.path()) {
                let known_ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| EXTENSIONS.contains(&e));
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                    && known_ext
                    && is_valid_name(stem)
                {
                    names.insert(stem.to_string());
                }
            }
        }
        names.into_iter().collect()
    }

    fn resolve_file(&self, name: &str) -> Option<PathBuf> {
        self.search_paths.iter().find_map(|dir| {
            EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{name}.{ext}")))
                .find(|candidate| candidate.is_file())
        })
    }

    fn compile(&self, name: &str) -> Result<GrammarTable, LoadError> {
        let invalid = |source: GrammarError| LoadError::Grammar {
            name: name.to_string(),
            source,
        };

        let mut grammar = if let Some(path) = self.resolve_file(name) {
            debug!(name, path = %path.display(), "compiling grammar file");
            read_grammar_file(&path).map_err(|e| match e {
                FileError::Io(source) => LoadError::Io { path, source },
                FileError::Grammar(source) => invalid(source),
            })?
        } else if let Some((_, yaml)) = BUILTIN.iter().find(|(n, _)| *n == name) {
            debug!(name, "compiling built-in grammar");
            GrammarTable::from_yaml_str(yaml).map_err(invalid)?
        } else {
            return Err(LoadError::UnknownLanguage(name.to_string()));
        };

        grammar.name.get_or_insert_with(|| name.to_string());
        Ok(grammar)
    }
}

impl GrammarSource for GrammarRegistry {
    fn load(&self, name: &str) -> Result<Arc<GrammarTable>, LoadError> {
        if !is_valid_name(name) {
            return Err(LoadError::UnknownLanguage(name.to_string()));
        }
        if let Some(grammar) = self.registered.get(name) {
            return Ok(grammar.clone());
        }
        if let Some(grammar) = self.compiled.read().get(name) {
            return Ok(grammar.clone());
        }

        let grammar = Arc::new(self.compile(name)?);
        let mut compiled = self.compiled.write();
        // Another thread may have compiled the same name meanwhile; keep the first.
        Ok(compiled.entry(name.to_string()).or_insert(grammar).clone())
    }
}

enum FileError {
    Io(std::io::Error),
    Grammar(GrammarError),
}

fn read_grammar_file(path: &Path) -> Result<GrammarTable, FileError> {
    let source = std::fs::read_to_string(path).map_err(FileError::Io)?;
    let is_json = path.extension().is_some_and(|e| e == "json");
    if is_json {
        GrammarTable::from_json_str(&source).map_err(FileError::Grammar)
    } else {
        GrammarTable::from_yaml_str(&source).map_err(FileError::Grammar)
    }
}

/// Language names are plain identifiers; anything path-like is refused.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_grammars_compile() {
        let registry = GrammarRegistry::new();
        for (name, _) in BUILTIN {
            let grammar = registry.load(name).unwrap();
            assert_eq!(grammar.name.as_deref(), Some(*name));
        }
    }

    #[test]
    fn test_load_is_cached() {
        let registry = GrammarRegistry::new();
        let first = registry.load("c").unwrap();
        let second = registry.load("c").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_path_like_names_are_unknown() {
        let registry = GrammarRegistry::new();
        for name in ["", "../c", "a/b", "a\\b", ".."] {
            assert!(matches!(
                registry.load(name),
                Err(LoadError::UnknownLanguage(n)) if n == name
            ));
        }
    }

    #[test]
    fn test_registered_grammar_shadows_builtin() {
        let mut registry = GrammarRegistry::new();
        let custom = GrammarTable::from_yaml_str("name: mine\nstates: [[['x', sh_x, -1]]]").unwrap();
        registry.register("c", custom);
        assert_eq!(registry.load("c").unwrap().name.as_deref(), Some("mine"));
    }
}
