//! Store-path name/version extraction

use std::sync::LazyLock;

use regex::Regex;

/// Matches `/nix/store/<hash>-<name>[-<version>][.drv]`. The version part is
/// recognized only when it starts with a digit; everything between the hash
/// and the version is the name.
static STORE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/nix/store/[a-z0-9]+-(.+?)(-([0-9].*?))?(\.drv)?$").unwrap()
});

/// Split a store path into its package name and version.
///
/// Returns `None` when the path does not follow the store naming convention.
/// The version is empty when the path carries no digit-leading suffix.
pub fn parse_name_version(store_path: &str) -> Option<(String, String)> {
    let captures = STORE_PATH_RE.captures(store_path)?;
    let name = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let version = captures.get(3).map(|m| m.as_str()).unwrap_or_default();
    Some((name.to_string(), version.to_string()))
}
