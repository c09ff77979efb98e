//! The content root: every registry describing the target machines.
//!
//! ```text
//! <root>/std.json           primitives
//! <root>/profiles/*.json    profiles
//! <root>/packages/*.blp     instruction packages
//! <root>/env/*.json         environments
//! ```

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::environments::{Environment, RawEnvironment};
use crate::error::{ContentError, Result};
use crate::packages::Package;
use crate::primitives::Primitives;
use crate::profiles::Profile;
use crate::registry::{Catalog, parse_json};
use crate::{JSON_EXTENSION, PACKAGE_EXTENSION};

pub const PRIMITIVES_FILE: &str = "std.json";
pub const PROFILES_DIR: &str = "profiles";
pub const PACKAGES_DIR: &str = "packages";
pub const ENVIRONMENTS_DIR: &str = "env";

/// Loaded once, then shared read-only by every compile.
#[derive(Debug)]
pub struct Content {
    root: PathBuf,
    primitives: Primitives,
    profiles: Catalog<Profile>,
    packages: Catalog<Package>,
    environments: Catalog<Environment>,
}

impl Content {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ContentError::NotADirectory(root.to_path_buf()));
        }
        log::debug!("opening content root {}", root.display());

        Ok(Self {
            root: root.to_path_buf(),
            primitives: Primitives::load(&root.join(PRIMITIVES_FILE))?,
            profiles: Catalog::open(root.join(PROFILES_DIR), JSON_EXTENSION)?,
            packages: Catalog::open(root.join(PACKAGES_DIR), PACKAGE_EXTENSION)?,
            environments: Catalog::open(root.join(ENVIRONMENTS_DIR), JSON_EXTENSION)?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn primitives(&self) -> &Primitives {
        &self.primitives
    }

    pub fn profile(&self, name: &str) -> Result<Option<Rc<Profile>>> {
        self.profiles.get_or_load(name, |path, text| {
            Profile::parse(name, path, text, &self.primitives)
        })
    }

    pub fn package(&self, name: &str) -> Result<Option<Rc<Package>>> {
        self.packages.get_or_load(name, |path, text| {
            Package::parse(name, path, text, &self.primitives)
        })
    }

    /// Load an environment together with its profile and packages.
    pub fn environment(&self, name: &str) -> Result<Option<Rc<Environment>>> {
        self.environments.get_or_load(name, |path, text| {
            let raw: RawEnvironment = parse_json(path, text)?;

            let profile = self
                .profile(&raw.profile)?
                .ok_or_else(|| ContentError::MissingProfile {
                    environment: name.to_string(),
                    profile: raw.profile.clone(),
                })?;

            let packages = raw
                .packages
                .iter()
                .map(|package| {
                    self.package(package)?
                        .ok_or_else(|| ContentError::MissingPackage {
                            environment: name.to_string(),
                            package: package.clone(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            Environment::build(name, path, profile, &packages)
        })
    }
}
