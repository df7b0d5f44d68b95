// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file discovery.
//!
//! Locations are comma-separated; each may hold `;`-separated alternatives
//! that are all probed. A location is one of:
//!
//! - a directory (`conf/`), probed for `{name}[-{profile}]` with the
//!   `.yml`, `.yaml` and `.properties` extensions, then the same under
//!   `conf/config/`;
//! - a file with an extension hint (`app.env[.properties]`), parsed as the
//!   hinted type, the profile suffix appended to the whole name;
//! - a plain file (`conf/app.yml`), the profile suffix inserted before the
//!   extension.

use crate::adapters::MapPropertySource;
use crate::domain::{ConfigError, Result};
use crate::ports::PropertySource;
use crate::service::environment::{split_list, Environment, DEFAULT_PROFILE};
use directories::BaseDirs;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Location searched when none is configured.
pub const DEFAULT_LOCATION: &str = "./";

/// Base name of configuration files when none is configured.
pub const DEFAULT_CONFIG_NAME: &str = "application";

/// Key listing profiles to activate.
pub const PROFILES_ACTIVE_KEY: &str = "profiles.active";

/// Key listing files to import from within a configuration file.
pub const CONFIG_IMPORT_KEY: &str = "config.import";

const PROBE_EXTENSIONS: [&str; 3] = [".yml", ".yaml", ".properties"];

const NESTED_DIRECTORY: &str = "config/";

/// Maximum allowed configuration file size (10MB)
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

static EXTENSION_HINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<location>.+)\[(?P<ext>\.\w+)\]$").expect("extension hint pattern is valid")
});

/// A parsed search location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Location {
    path: String,
    extension_hint: Option<String>,
}

impl Location {
    pub(crate) fn parse(raw: &str) -> Self {
        let raw = raw.trim().replace('\\', "/");
        let (path, extension_hint) = match EXTENSION_HINT.captures(&raw) {
            Some(caps) => (caps["location"].to_string(), Some(caps["ext"].to_string())),
            None => (raw.clone(), None),
        };
        Self {
            path: expand_home(&path),
            extension_hint,
        }
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn extension_hint(&self) -> Option<&str> {
        self.extension_hint.as_deref()
    }

    pub(crate) fn is_directory(&self) -> bool {
        self.path.ends_with('/')
    }

    /// Files to try, in order, for `name` under `profile`.
    pub(crate) fn candidates(&self, name: &str, profile: &str) -> Vec<String> {
        let suffixed = |base: &str| {
            if profile == DEFAULT_PROFILE {
                base.to_string()
            } else {
                format!("{}-{}", base, profile)
            }
        };

        if self.is_directory() {
            let file = suffixed(name);
            let nested = format!("{}{}", self.path, NESTED_DIRECTORY);
            [self.path.as_str(), nested.as_str()]
                .iter()
                .flat_map(|dir| PROBE_EXTENSIONS.iter().map(move |ext| (*dir, *ext)))
                .map(|(dir, ext)| format!("{}{}{}", dir, file, ext))
                .collect()
        } else if self.extension_hint.is_some() {
            vec![suffixed(&self.path)]
        } else {
            match split_extension(&self.path) {
                Some((stem, ext)) => vec![format!("{}{}", suffixed(stem), ext)],
                None => vec![suffixed(&self.path)],
            }
        }
    }
}

/// Splits `path` into stem and extension (dot included), looking only at the
/// last path segment.
pub(crate) fn split_extension(path: &str) -> Option<(&str, &str)> {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    let dot = path[file_start..].rfind('.')? + file_start;
    if dot == file_start || dot + 1 == path.len() {
        return None;
    }
    Some((&path[..dot], &path[dot..]))
}

/// Resolves `location` against the directory of `importing_file`. Absolute
/// locations are kept.
pub(crate) fn relative_to(importing_file: &str, location: &str) -> String {
    if Path::new(location).is_absolute() {
        return location.to_string();
    }
    let base = Path::new(importing_file)
        .parent()
        .unwrap_or_else(|| Path::new(""));
    normalize(&base.join(location))
}

fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn expand_home(path: &str) -> String {
    let Some(rest) = path.strip_prefix("~/") else {
        return path.to_string();
    };
    match BaseDirs::new() {
        Some(dirs) => {
            let mut expanded = normalize(&dirs.home_dir().join(rest));
            if path.ends_with('/') && !expanded.ends_with('/') {
                expanded.push('/');
            }
            expanded
        }
        None => path.to_string(),
    }
}

impl Environment {
    /// Runs discovery for the current profile list and the captured control
    /// values.
    pub(crate) fn load_application_configuration(&mut self) -> Result<()> {
        let profiles = self
            .params
            .non_empty(PROFILES_ACTIVE_KEY)
            .or_else(|| self.environ.non_empty("PROFILES_ACTIVE"))
            .unwrap_or(self.bootstrap_profiles.as_str())
            .to_string();
        self.active_profiles.extend(split_list(&profiles));

        let name = self
            .params
            .non_empty("config.name")
            .or_else(|| self.environ.non_empty("CONFIG_NAME"))
            .unwrap_or(DEFAULT_CONFIG_NAME)
            .trim()
            .to_string();
        let additional = self
            .params
            .non_empty("config.additional-location")
            .or_else(|| self.environ.non_empty("CONFIG_ADDITIONAL_LOCATION"))
            .map(split_list)
            .unwrap_or_default();
        let explicit = self
            .params
            .non_empty("config.location")
            .or_else(|| self.environ.non_empty("CONFIG_LOCATION"))
            .map(split_list);

        let locations = match explicit {
            Some(explicit) => additional.into_iter().chain(explicit).collect::<Vec<_>>(),
            None => std::iter::once(DEFAULT_LOCATION.to_string())
                .chain(additional)
                .collect(),
        };
        debug!(
            "Searching {:?} for '{}' with profiles {:?}",
            locations, name, self.active_profiles
        );

        for location in &locations {
            let mut i = 0;
            while i < self.active_profiles.len() {
                let profile = self.active_profiles[i].clone();
                for group in location.split(';').filter(|g| !g.trim().is_empty()) {
                    let location = Location::parse(group);
                    for path in location.candidates(&name, &profile) {
                        self.load_file(&path, location.extension_hint(), &mut Vec::new())?;
                    }
                }
                i += 1;
            }
        }
        Ok(())
    }

    /// Loads one file if it exists, then whatever it imports.
    fn load_file(&mut self, path: &str, hint: Option<&str>, chain: &mut Vec<String>) -> Result<()> {
        let file = Path::new(path);
        if !file.exists() {
            debug!("Skipping missing configuration file {}", path);
            return Ok(());
        }

        let extension = match hint {
            Some(hint) => hint.to_string(),
            None => file
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default(),
        };
        if extension.is_empty() {
            return Err(ConfigError::UnsupportedSourceType {
                location: path.to_string(),
                extension: String::new(),
            });
        }
        let parser = self
            .parsers
            .iter()
            .find(|parser| parser.supports(&extension))
            .ok_or_else(|| ConfigError::UnsupportedSourceType {
                location: path.to_string(),
                extension: extension.clone(),
            })?;

        let metadata = fs::metadata(file).map_err(|e| ConfigError::ResourceIo {
            path: path.to_string(),
            source: e,
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: path.to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_CONFIG_FILE_SIZE
                ),
                source: None,
            });
        }
        let content = fs::read_to_string(file).map_err(|e| ConfigError::ResourceIo {
            path: path.to_string(),
            source: e,
        })?;
        let values = parser.parse(&content)?;

        info!("Loading properties from {}", path);
        let source = MapPropertySource::from_map(path, values);
        let declared_profiles = source.non_empty(PROFILES_ACTIVE_KEY).map(split_list);
        let imports = source.non_empty(CONFIG_IMPORT_KEY).map(split_list);
        self.register(Arc::new(source));

        if let Some(declared) = declared_profiles {
            if self.active_profiles.len() == 1 && self.active_profiles[0] == DEFAULT_PROFILE {
                debug!("{} activates profiles {:?}", path, declared);
                self.active_profiles.extend(declared);
            }
        }

        if let Some(imports) = imports {
            chain.push(path.to_string());
            for import in imports {
                self.load_import(path, &import, chain)?;
            }
            chain.pop();
        }
        Ok(())
    }

    fn load_import(&mut self, importing_file: &str, raw: &str, chain: &mut Vec<String>) -> Result<()> {
        let location = Location::parse(raw);
        if location.is_directory() {
            return Err(ConfigError::InvalidLocation {
                location: location.path().to_string(),
                message: format!("imported from {}; directory import is not supported", importing_file),
            });
        }
        let path = relative_to(importing_file, location.path());
        if chain.iter().any(|seen| same_file(seen, &path)) {
            return Err(ConfigError::InvalidLocation {
                location: path,
                message: format!("circular import from {}", importing_file),
            });
        }
        debug!("{} imports {}", importing_file, path);
        self.load_file(&path, location.extension_hint(), chain)
    }

    /// Appends `source` to the chain.
    pub(crate) fn register(&mut self, source: Arc<dyn PropertySource>) {
        debug!("Registering property source {}", source.name());
        self.sources.push(source);
    }
}

fn same_file(a: &str, b: &str) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_candidates() {
        let location = Location::parse("conf/");
        assert!(location.is_directory());
        assert_eq!(
            location.candidates("application", DEFAULT_PROFILE),
            vec![
                "conf/application.yml",
                "conf/application.yaml",
                "conf/application.properties",
                "conf/config/application.yml",
                "conf/config/application.yaml",
                "conf/config/application.properties",
            ]
        );
        assert_eq!(location.candidates("app", "dev")[0], "conf/app-dev.yml");
        assert_eq!(location.candidates("app", "dev")[5], "conf/config/app-dev.properties");
    }

    #[test]
    fn test_file_candidates() {
        let location = Location::parse("conf/app.yml");
        assert_eq!(location.candidates("ignored", DEFAULT_PROFILE), vec!["conf/app.yml"]);
        assert_eq!(location.candidates("ignored", "prod"), vec!["conf/app-prod.yml"]);

        let no_ext = Location::parse("conf/app");
        assert_eq!(no_ext.candidates("ignored", "prod"), vec!["conf/app-prod"]);
    }

    #[test]
    fn test_extension_hint() {
        let location = Location::parse("deploy/app.env[.properties]");
        assert_eq!(location.path(), "deploy/app.env");
        assert_eq!(location.extension_hint(), Some(".properties"));
        assert_eq!(location.candidates("ignored", "dev"), vec!["deploy/app.env-dev"]);
    }

    #[test]
    fn test_backslashes_are_normalized() {
        let location = Location::parse(r"conf\app.yml");
        assert_eq!(location.path(), "conf/app.yml");
    }

    #[test]
    fn test_home_expansion() {
        let location = Location::parse("~/conf/");
        if BaseDirs::new().is_some() {
            assert!(!location.path().starts_with('~'));
            assert!(location.path().ends_with("conf/"));
        }
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("a/b.yml"), Some(("a/b", ".yml")));
        assert_eq!(split_extension("a.d/b"), None);
        assert_eq!(split_extension("a/.hidden"), None);
        assert_eq!(split_extension("a/b."), None);
        assert_eq!(split_extension("b.tar.gz"), Some(("b.tar", ".gz")));
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(relative_to("conf/application.yml", "db.yml"), "conf/db.yml");
        assert_eq!(relative_to("application.yml", "db.yml"), "db.yml");
        assert_eq!(relative_to("conf/application.yml", "../shared/db.yml"), "conf/../shared/db.yml");
        assert_eq!(relative_to("conf/application.yml", "/etc/db.yml"), "/etc/db.yml");
    }
}
