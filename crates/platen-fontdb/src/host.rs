// this_file: crates/platen-fontdb/src/host.rs

//! Where fonts live on each host, and the resolver settings built from it.

use std::env;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Environment variable naming the project-local font root
pub const FONT_ROOT_ENV: &str = "PLATEN_FONT_ROOT";

/// Font file extensions the resolver and the listing look at
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "ttc", "otf"];

/// Operating system family, for picking font locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOs {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl HostOs {
    /// The OS this binary was built for
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// Known-good system fonts with broad CJK coverage, in probe order.
    pub fn system_fonts(self) -> Vec<PathBuf> {
        let paths: &[&str] = match self {
            Self::Windows => &[
                r"C:\Windows\Fonts\msyh.ttc",
                r"C:\Windows\Fonts\simsun.ttc",
                r"C:\Windows\Fonts\simhei.ttf",
                r"C:\Windows\Fonts\simkai.ttf",
            ],
            Self::MacOs => &[
                "/System/Library/Fonts/PingFang.ttc",
                "/Library/Fonts/Arial Unicode.ttf",
                "/System/Library/Fonts/STHeiti Light.ttc",
            ],
            Self::Linux => &[
                "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
                "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
            ],
            Self::Other => &[],
        };
        paths.iter().map(PathBuf::from).collect()
    }

    /// Directories searched for a named font file, `~` expanded.
    pub fn font_dirs(self) -> Vec<PathBuf> {
        let dirs: &[&str] = match self {
            Self::Windows => &[r"C:\Windows\Fonts"],
            Self::MacOs => &["/Library/Fonts", "/System/Library/Fonts", "~/Library/Fonts"],
            Self::Linux => &["/usr/share/fonts", "/usr/local/share/fonts", "~/.fonts"],
            Self::Other => &[],
        };
        dirs.iter()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).into_owned()))
            .collect()
    }
}

/// Where the resolver looks for fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub host: HostOs,
    /// Tier 3 candidates, tried before the local fallbacks
    pub system_fonts: Vec<PathBuf>,
    /// Tier 2 search directories, before the local root
    pub font_dirs: Vec<PathBuf>,
    /// Project-local font root
    pub local_root: PathBuf,
}

impl ResolverConfig {
    /// Host defaults with the local root taken from `PLATEN_FONT_ROOT`.
    pub fn from_env() -> Self {
        let root = env::var(FONT_ROOT_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| PathBuf::from(shellexpand::tilde(&value).into_owned()))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::for_host(HostOs::current(), root)
    }

    pub fn for_host(host: HostOs, local_root: impl Into<PathBuf>) -> Self {
        Self {
            host,
            system_fonts: host.system_fonts(),
            font_dirs: host.font_dirs(),
            local_root: local_root.into(),
        }
    }

    /// Only the local root; no host locations at all.
    pub fn isolated(local_root: impl Into<PathBuf>) -> Self {
        Self {
            host: HostOs::Other,
            system_fonts: Vec::new(),
            font_dirs: Vec::new(),
            local_root: local_root.into(),
        }
    }

    pub fn with_local_root(mut self, local_root: impl Into<PathBuf>) -> Self {
        self.local_root = local_root.into();
        self
    }

    /// Project-local fallbacks probed after the system fonts
    pub fn local_fallbacks(&self) -> Vec<PathBuf> {
        ["fonts/SimHei.ttf", "fonts/SimSun.ttf", "fonts/msyh.ttc", "SimHei.ttf", "SimSun.ttf"]
            .iter()
            .map(|rel| self.local_root.join(rel))
            .collect()
    }

    /// Every directory a named font may be found in, host first
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.font_dirs.clone();
        dirs.push(self.local_root.join("fonts"));
        dirs.push(self.local_root.clone());
        dirs
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Font files found directly inside one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDirListing {
    pub dir: PathBuf,
    /// Sorted by file name
    pub files: Vec<PathBuf>,
}

impl FontDirListing {
    /// The first `limit` files and how many were left out
    pub fn preview(&self, limit: usize) -> (&[PathBuf], usize) {
        let shown = self.files.len().min(limit);
        (&self.files[..shown], self.files.len() - shown)
    }
}

pub fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|f| ext.eq_ignore_ascii_case(f)))
}

/// Lists font files in each existing directory, skipping the rest.
pub fn discover_font_files(dirs: &[PathBuf]) -> Vec<FontDirListing> {
    dirs.iter()
        .filter(|dir| dir.is_dir())
        .map(|dir| {
            let files: Vec<PathBuf> = WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file() && is_font_file(entry.path()))
                .map(|entry| entry.into_path())
                .collect();
            FontDirListing {
                dir: dir.clone(),
                files,
            }
        })
        .collect()
}
