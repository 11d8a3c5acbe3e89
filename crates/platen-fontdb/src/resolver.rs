// this_file: crates/platen-fontdb/src/resolver.rs

//! The fallback chain that turns any font request into a usable face.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use walkdir::WalkDir;

use platen_core::error::FontLoadError;
use platen_core::types::{FontIdentifier, FontKey};

use crate::face::{BuiltinFace, Face, FontBlob, OutlineFace};
use crate::host::{is_font_file, ResolverConfig};
use crate::names;

/// How deep the named-file index descends into each search directory
const INDEX_DEPTH: usize = 4;

/// Which step of the chain produced a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionTier {
    /// The caller's own font file
    Explicit,
    /// A family name mapped to a file through the name table
    Named,
    /// A host system font or a project-local fallback
    System,
    /// The compiled-in bitmap font
    Builtin,
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explicit => "explicit",
            Self::Named => "named",
            Self::System => "system",
            Self::Builtin => "builtin",
        })
    }
}

/// A face ready to measure and draw, plus how it was found.
#[derive(Debug, Clone)]
pub struct ResolvedFont {
    pub key: FontKey,
    pub tier: ResolutionTier,
    pub face: Face,
}

impl ResolvedFont {
    /// Short human description, e.g. `simhei.ttf (named)`
    pub fn describe(&self) -> String {
        match self.face.source_path() {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("{name} ({})", self.tier)
            },
            None => format!("builtin bitmap ({})", self.tier),
        }
    }
}

type CacheKey = (FontKey, Option<String>);

/// Resolves font requests through explicit, named, system and builtin tiers.
///
/// Never fails. Results are cached by exact key and fallback name; the cache
/// only grows and is safe to share between threads.
pub struct FontResolver {
    config: ResolverConfig,
    resolved: RwLock<HashMap<CacheKey, ResolvedFont>>,
    /// Loaded files, so each size of a family shares one copy of the bytes
    blobs: RwLock<HashMap<PathBuf, Arc<FontBlob>>>,
    /// Lower-cased file name to first path found in the search directories
    file_index: OnceLock<HashMap<String, PathBuf>>,
}

impl FontResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            resolved: RwLock::new(HashMap::new()),
            blobs: RwLock::new(HashMap::new()),
            file_index: OnceLock::new(),
        }
    }

    /// Number of cached resolutions
    pub fn cached(&self) -> usize {
        self.resolved.read().len()
    }

    /// Finds the best available face for `key`.
    ///
    /// `fallback_name` is tried at the named tier when the key's own
    /// identifier does not load, typically the family name from the
    /// design file when the operator supplied a font path.
    pub fn resolve(&self, key: &FontKey, fallback_name: Option<&str>) -> ResolvedFont {
        let cache_key = (key.clone(), fallback_name.map(str::to_owned));
        if let Some(hit) = self.resolved.read().get(&cache_key) {
            return hit.clone();
        }

        let resolved = self.resolve_uncached(key, fallback_name);
        log::debug!(
            "Font {} resolved via {} tier: {}",
            key,
            resolved.tier,
            resolved.describe()
        );

        self.resolved
            .write()
            .entry(cache_key)
            .or_insert(resolved)
            .clone()
    }

    fn resolve_uncached(&self, key: &FontKey, fallback_name: Option<&str>) -> ResolvedFont {
        let found = |tier, face| ResolvedFont {
            key: key.clone(),
            tier,
            face: Face::Outline(face),
        };

        if let FontIdentifier::Path(path) = &key.identifier {
            if let Some(face) = self.probe(path, key.size) {
                return found(ResolutionTier::Explicit, face);
            }
        }

        let mut wanted: Vec<&str> = Vec::new();
        if let FontIdentifier::Name(name) = &key.identifier {
            wanted.push(name.as_str());
        }
        wanted.extend(fallback_name);
        for name in wanted {
            if let Some(face) = self.probe_named(name, key.size) {
                return found(ResolutionTier::Named, face);
            }
        }

        let candidates = self
            .config
            .system_fonts
            .iter()
            .cloned()
            .chain(self.config.local_fallbacks());
        for path in candidates {
            if let Some(face) = self.probe(&path, key.size) {
                return found(ResolutionTier::System, face);
            }
        }

        log::debug!("No font file usable for {key}, using the builtin bitmap font");
        ResolvedFont {
            key: key.clone(),
            tier: ResolutionTier::Builtin,
            face: Face::Builtin(BuiltinFace::new(key.size)),
        }
    }

    fn probe_named(&self, name: &str, size: u32) -> Option<OutlineFace> {
        let Some(file) = names::file_for_name(name) else {
            log::debug!("Font name {name:?} is not in the name table");
            return None;
        };
        self.locate(file)
            .into_iter()
            .find_map(|path| self.probe(&path, size))
    }

    /// Loads one candidate file, logging and swallowing any failure.
    fn probe(&self, path: &Path, size: u32) -> Option<OutlineFace> {
        match self.load_face(path, size) {
            Ok(face) => Some(face),
            Err(err) => {
                log::debug!("Font probe failed: {err}");
                None
            },
        }
    }

    fn load_face(&self, path: &Path, size: u32) -> Result<OutlineFace, FontLoadError> {
        if size == 0 {
            return Err(FontLoadError::InvalidSize(size));
        }

        let cached = self.blobs.read().get(path).cloned();
        let blob = match cached {
            Some(blob) => blob,
            None => {
                let blob = Arc::new(FontBlob::load(path)?);
                self.blobs
                    .write()
                    .entry(path.to_path_buf())
                    .or_insert(blob)
                    .clone()
            },
        };
        OutlineFace::new(blob, size)
    }

    /// Candidate paths for a file name, direct hits first.
    fn locate(&self, file: &str) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .config
            .search_dirs()
            .into_iter()
            .map(|dir| dir.join(file))
            .filter(|path| path.is_file())
            .collect();

        if let Some(path) = self.file_index().get(&file.to_lowercase()) {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }
        paths
    }

    fn file_index(&self) -> &HashMap<String, PathBuf> {
        self.file_index.get_or_init(|| {
            let mut index = HashMap::new();
            for dir in self.config.search_dirs() {
                if !dir.is_dir() {
                    continue;
                }
                let entries = WalkDir::new(&dir)
                    .max_depth(INDEX_DEPTH)
                    .follow_links(true)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().is_file() && is_font_file(entry.path()));
                for entry in entries {
                    let name = entry.file_name().to_string_lossy().to_lowercase();
                    index.entry(name).or_insert_with(|| entry.into_path());
                }
            }
            log::debug!("Indexed {} font files for name lookup", index.len());
            index
        })
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::from_env())
    }
}
