//! Path expansion and classification utilities

use crate::error::CheckError;
use crate::system::System;
use std::path::PathBuf;

/// Expand a leading `~` to the home directory
///
/// # Errors
///
/// Returns an error if:
/// - The path starts with `~` and neither `HOME` nor `USERPROFILE` is set
#[inline]
pub fn expand_home(system: &dyn System, path: &str) -> Result<PathBuf, CheckError> {
    if !path.starts_with('~') {
        return Ok(PathBuf::from(path));
    }

    let home = system
        .env_var("HOME")
        .or_else(|_| system.env_var("USERPROFILE"))
        .map_err(|_| {
            return CheckError::configuration("Cannot determine home directory for ~ expansion");
        })?;
    Ok(PathBuf::from(path.replacen('~', &home, 1)))
}

/// Whether a chart reference names a local directory
///
/// References starting with `.`, `/` or `~`, and any existing directory,
/// are local; everything else (`repo/name`, `oci://...`) is remote.
#[must_use]
pub fn is_local_reference(system: &dyn System, reference: &str) -> bool {
    if reference.contains("://") {
        return false;
    }
    reference.starts_with('.')
        || reference.starts_with('/')
        || reference.starts_with('~')
        || system.is_dir(std::path::Path::new(reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn test_expand_home() {
        let system = MockSystem::new().with_env("HOME", "/home/dev").unwrap();
        assert_eq!(
            expand_home(&system, "~/charts/app").unwrap(),
            PathBuf::from("/home/dev/charts/app")
        );
        assert_eq!(
            expand_home(&system, "./charts/app").unwrap(),
            PathBuf::from("./charts/app")
        );
    }

    #[test]
    fn test_expand_home_without_home() {
        let system = MockSystem::new();
        assert!(expand_home(&system, "~/charts").is_err());
    }

    #[test]
    fn test_is_local_reference() {
        let system = MockSystem::new().with_dir("charts/app").unwrap();
        assert!(is_local_reference(&system, "./app"));
        assert!(is_local_reference(&system, "/srv/app"));
        assert!(is_local_reference(&system, "charts/app"));
        assert!(!is_local_reference(&system, "bitnami/postgresql"));
        assert!(!is_local_reference(&system, "oci://registry.example.com/app"));
    }
}
