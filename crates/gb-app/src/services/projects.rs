use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("default project path must be absolute: {}", .0.display())]
    RelativeDefaultPath(PathBuf),
}

/// Project directory resolution seeded from the user's home directory.
#[derive(Debug)]
pub struct ProjectService {
    default_path: PathBuf,
}

impl ProjectService {
    /// Create the service from the resolved home directory.
    ///
    /// # Errors
    ///
    /// `ProjectError::RelativeDefaultPath` if `default_path` is not absolute;
    /// a placeholder path must never seed project resolution.
    pub fn new(default_path: PathBuf) -> Result<Self, ProjectError> {
        if !default_path.is_absolute() {
            return Err(ProjectError::RelativeDefaultPath(default_path));
        }
        Ok(Self { default_path })
    }

    /// Directory offered first when the user adds a project.
    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// Resolve user input into an absolute project path.
    ///
    /// `~` and `~/...` expand against the default path, relative paths are
    /// joined onto it, absolute paths pass through.
    pub fn resolve_path(&self, input: &str) -> PathBuf {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "~" {
            return self.default_path.clone();
        }
        if let Some(rest) = trimmed.strip_prefix("~/") {
            return self.default_path.join(rest);
        }

        let path = Path::new(trimmed);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.default_path.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> PathBuf {
        std::env::temp_dir().join("gb-home")
    }

    #[test]
    fn rejects_relative_seed() {
        let err = ProjectService::new(PathBuf::from("relative/home")).unwrap_err();
        assert_eq!(
            err,
            ProjectError::RelativeDefaultPath(PathBuf::from("relative/home"))
        );
    }

    #[test]
    fn exposes_default_path() {
        let service = ProjectService::new(home()).unwrap();
        assert_eq!(service.default_path(), home().as_path());
    }

    #[test]
    fn resolves_tilde_and_relative_input() {
        let service = ProjectService::new(home()).unwrap();

        assert_eq!(service.resolve_path(""), home());
        assert_eq!(service.resolve_path("~"), home());
        assert_eq!(service.resolve_path("~/code/app"), home().join("code/app"));
        assert_eq!(service.resolve_path("code/app"), home().join("code/app"));
    }

    #[test]
    fn absolute_input_passes_through() {
        let service = ProjectService::new(home()).unwrap();
        let absolute = std::env::temp_dir().join("elsewhere");

        assert_eq!(service.resolve_path(absolute.to_str().unwrap()), absolute);
    }
}
