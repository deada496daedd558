//! Shared path manipulation utilities.

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base` when it is relative, then normalize `.`/`..`
/// components syntactically. Absolute paths are only normalized.
///
/// Content files may not exist yet when config is loaded, so this never
/// touches the filesystem.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    normalize_syntactic(&joined)
}

fn normalize_syntactic(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(..) | Component::RootDir | Component::Normal(_) => {
                components.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                }
            }
        }
    }
    components.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_joins_base() {
        let resolved = resolve_against(Path::new("/srv/folio"), Path::new("content.toml"));
        assert_eq!(resolved, PathBuf::from("/srv/folio/content.toml"));
    }

    #[test]
    fn absolute_path_ignores_base() {
        let resolved = resolve_against(Path::new("/srv/folio"), Path::new("/opt/site.toml"));
        assert_eq!(resolved, PathBuf::from("/opt/site.toml"));
    }

    #[test]
    fn parent_components_collapse() {
        let resolved = resolve_against(Path::new("/srv/folio/conf"), Path::new("../data/./x.toml"));
        assert_eq!(resolved, PathBuf::from("/srv/folio/data/x.toml"));
    }

    #[test]
    fn handles_parent_at_root() {
        #[cfg(unix)]
        {
            let resolved = normalize_syntactic(Path::new("/../foo"));
            assert_eq!(resolved, Path::new("/foo"));
        }
    }
}
