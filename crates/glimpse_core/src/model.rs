//! Locating the face-detection model file on disk.
//!
//! Nothing here ever downloads anything. The model is found, in order,
//! from an explicit path (a CLI flag), the [`MODEL_ENV`] environment
//! variable, or the user cache directory.

use std::path::{Path, PathBuf};

/// File name of the UltraFace model this crate is built around.
pub const MODEL_FILE: &str = "version-RFB-320.onnx";

/// Environment variable naming the model file.
pub const MODEL_ENV: &str = "GLIMPSE_MODEL";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model file {} does not exist", path.display())]
    Missing { path: PathBuf },

    #[error("no face model found (searched {searched:?}); pass a path, set {MODEL_ENV}, or place {MODEL_FILE} there")]
    NotFound { searched: Vec<PathBuf> },
}

/// Find the UltraFace model file.
///
/// An explicit or environment path that does not exist is an error, not a
/// fallthrough: both express clear intent, and quietly picking a different
/// model would be worse than failing.
pub fn resolve_model(explicit: Option<&Path>) -> Result<PathBuf, ModelError> {
    let env_path = std::env::var_os(MODEL_ENV).map(PathBuf::from);
    let cache = dirs::cache_dir().map(|dir| dir.join("glimpse").join(MODEL_FILE));
    resolve_from(explicit, env_path, cache)
}

fn resolve_from(
    explicit: Option<&Path>,
    env_path: Option<PathBuf>,
    cache: Option<PathBuf>,
) -> Result<PathBuf, ModelError> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_owned())
        } else {
            Err(ModelError::Missing {
                path: path.to_owned(),
            })
        };
    }
    if let Some(path) = env_path {
        return if path.is_file() {
            Ok(path)
        } else {
            Err(ModelError::Missing { path })
        };
    }

    let mut searched = Vec::new();
    if let Some(path) = cache {
        if path.is_file() {
            return Ok(path);
        }
        searched.push(path);
    }
    Err(ModelError::NotFound { searched })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"onnx").unwrap();
        path
    }

    #[test]
    fn explicit_path_wins_over_everything() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = touch(dir.path(), "explicit.onnx");
        let env = touch(dir.path(), "env.onnx");
        let cache = touch(dir.path(), MODEL_FILE);
        let got = resolve_from(Some(&explicit), Some(env), Some(cache)).unwrap();
        assert_eq!(got, explicit);
    }

    #[test]
    fn missing_explicit_path_does_not_fall_through() {
        let dir = tempfile::tempdir().unwrap();
        let env = touch(dir.path(), "env.onnx");
        let missing = dir.path().join("nope.onnx");
        let err = resolve_from(Some(&missing), Some(env), None).unwrap_err();
        assert!(matches!(err, ModelError::Missing { path } if path == missing));
    }

    #[test]
    fn environment_path_is_used_when_no_explicit_one() {
        let dir = tempfile::tempdir().unwrap();
        let env = touch(dir.path(), "env.onnx");
        let got = resolve_from(None, Some(env.clone()), None).unwrap();
        assert_eq!(got, env);
    }

    #[test]
    fn missing_environment_path_errors() {
        let missing = PathBuf::from("/nonexistent/env.onnx");
        let err = resolve_from(None, Some(missing.clone()), None).unwrap_err();
        assert!(matches!(err, ModelError::Missing { path } if path == missing));
    }

    #[test]
    fn cache_file_is_the_last_resort() {
        let dir = tempfile::tempdir().unwrap();
        let cache = touch(dir.path(), MODEL_FILE);
        let got = resolve_from(None, None, Some(cache.clone())).unwrap();
        assert_eq!(got, cache);
    }

    #[test]
    fn nothing_found_reports_where_it_looked() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("glimpse").join(MODEL_FILE);
        let err = resolve_from(None, None, Some(cache.clone())).unwrap_err();
        match err {
            ModelError::NotFound { searched } => assert_eq!(searched, vec![cache]),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
