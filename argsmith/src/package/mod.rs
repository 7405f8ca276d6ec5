//! Package metadata for the version option and the author listing.
//!
//! A [`VersionSource`] reports the calling program's [`PackageInfo`]. The
//! [`package_info!`](crate::package_info) macro captures the metadata Cargo
//! compiles into the calling crate; [`ManifestSource`] reads it from an explicit
//! `Cargo.toml` at run time.

use camino::{Utf8Path, Utf8PathBuf};

/// Name, version and authors of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageInfo {
    /// Package name.
    pub name: String,
    /// Version string, when the package declares one.
    pub version: Option<String>,
    /// Declared authors, in order.
    pub authors: Vec<String>,
}

impl PackageInfo {
    /// Build from the strings Cargo exposes through `CARGO_PKG_*`.
    ///
    /// `authors` is colon-separated, as in `CARGO_PKG_AUTHORS`. Empty values
    /// are treated as missing.
    #[must_use]
    pub fn from_cargo(name: &str, version: &str, authors: &str) -> Self {
        Self {
            name: name.to_owned(),
            version: (!version.is_empty()).then(|| version.to_owned()),
            authors: authors
                .split(':')
                .map(str::trim)
                .filter(|author| !author.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Captures the calling crate's [`PackageInfo`] at compile time.
///
/// ```
/// let info = argsmith::package_info!();
/// assert_eq!(info.name, "argsmith");
/// assert!(info.version.is_some());
/// ```
#[macro_export]
macro_rules! package_info {
    () => {
        $crate::PackageInfo::from_cargo(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_AUTHORS"),
        )
    };
}

/// Source of the calling program's package metadata.
pub trait VersionSource: Send + Sync {
    /// The metadata, or `None` when it cannot be determined.
    fn package(&self) -> Option<PackageInfo>;
}

impl VersionSource for PackageInfo {
    fn package(&self) -> Option<PackageInfo> {
        Some(self.clone())
    }
}

/// Reads `[package]` metadata from a `Cargo.toml`.
///
/// Only the given file is read; no parent directories are searched. Values
/// inherited from a workspace (`version.workspace = true`) are not strings and
/// count as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSource {
    path: Utf8PathBuf,
}

impl ManifestSource {
    /// Read the manifest at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Manifest location.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl VersionSource for ManifestSource {
    fn package(&self) -> Option<PackageInfo> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %self.path, error = %err, "cannot read package manifest");
                return None;
            }
        };
        let manifest = match text.parse::<toml::Table>() {
            Ok(table) => table,
            Err(err) => {
                tracing::warn!(path = %self.path, error = %err, "cannot parse package manifest");
                return None;
            }
        };
        let package = manifest.get("package")?.as_table()?;
        let field = |key: &str| package.get(key).and_then(toml::Value::as_str);
        Some(PackageInfo {
            name: field("name").unwrap_or_default().to_owned(),
            version: field("version").map(str::to_owned),
            authors: package
                .get("authors")
                .and_then(toml::Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(toml::Value::as_str)
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}
