use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use toml_edit::{DocumentMut, Item, Table};

/// The facade crate re-exporting every `vc_*` crate under its short name.
const FACADE_NAME: &str = "vc_access";
/// Alias users commonly give the facade in their manifest.
const FACADE_ALIAS: &str = "vc";
const CRATE_PREFIX: &str = "vc_";

/// The caller's parsed `Cargo.toml`, used to locate crates from generated code.
///
/// Generated code must name the engine through a path that is valid inside the
/// crate invoking the macro. The lookup order is:
///
/// 1. `name` is a direct dependency: `::name`.
/// 2. The facade `vc_access` (or its alias `vc`) is a dependency:
///    `::vc_access::short` where `short` is `name` without the `vc_` prefix.
/// 3. Repeat 1-2 for `dev-dependencies`.
/// 4. Fall back to `::name`.
///
/// A crate referring to itself should declare `extern crate self as name;`
/// so that the fallback resolves inside its own unit tests.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_accessor"));
/// ```
#[derive(Debug)]
pub struct Manifest {
    document: DocumentMut,
}

impl Manifest {
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let mut path = PathBuf::from(dir);
        path.push("Cargo.toml");
        path
    }

    fn load(path: &PathBuf) -> Self {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()));
        let document = text
            .parse::<DocumentMut>()
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()));
        Self { document }
    }

    fn parse_path(path: &str) -> syn::Path {
        syn::parse_str(path).unwrap_or_else(|_| panic!("`{path}` is not a valid path"))
    }

    fn lookup(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_path(&format!("::{name}")));
        }
        let short = name.strip_prefix(CRATE_PREFIX)?;
        [FACADE_NAME, FACADE_ALIAS]
            .into_iter()
            .find(|facade| deps.contains_key(facade))
            .map(|facade| Self::parse_path(&format!("::{facade}::{short}")))
    }

    /// Returns the path under which `name` is reachable from the calling crate.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|section| match self.document.get(section) {
                Some(Item::Table(deps)) => Self::lookup(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::parse_path(&format!("::{name}")))
    }

    /// Runs `func` against the caller's manifest.
    ///
    /// Manifests are parsed once per path and kept for the lifetime of the
    /// compiler process, so repeated macro expansions stay cheap.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, &'static Manifest>> =
            RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let cached = MANIFESTS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&path)
            .copied();

        let manifest = match cached {
            Some(manifest) => manifest,
            None => {
                let loaded: &'static Manifest = Box::leak(Box::new(Self::load(&path)));
                *MANIFESTS
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .entry(path)
                    .or_insert(loaded)
            }
        };

        func(manifest)
    }
}
