//! Build-root configuration
//!
//! A build root is described by a flat TOML table of option names to values.
//! The run never edits the operator's file: it loads the base table, applies
//! the overrides every chain build needs (package-manager plugins, the local
//! build repo, any extra repos) and writes the derived table into a
//! throwaway config directory for the build tool to consume.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::infra::filesystem;

/// Key naming the build root; also names the derived config file
pub const CHROOT_NAME_KEY: &str = "chroot_name";

/// Key holding the package-manager configuration text
pub const PACKAGE_MANAGER_CONF_KEY: &str = "yum.conf";

/// Key holding the plugin-priorities configuration text
pub const PLUGIN_CONF_KEY: &str = "priorities.conf";

fn non_id_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9_]").expect("invalid repo id pattern"))
}

/// Generate a repository id for a package-manager config out of a baseurl
///
/// The scheme is dropped, path separators become underscores, and anything
/// outside `[a-zA-Z0-9_]` is removed. Ids already present in `used_ids` get
/// the first free numeric suffix. The returned id is recorded in `used_ids`.
pub fn generate_repo_id(baseurl: &str, used_ids: &mut BTreeSet<String>) -> String {
    let tail: Vec<&str> = baseurl.split("//").skip(1).collect();
    let raw = tail.join("/").replace('/', "_");
    let base = non_id_chars().replace_all(&raw, "");

    let mut id = base.to_string();
    let mut counter = 1;
    while used_ids.contains(&id) {
        id = format!("{base}{counter}");
        counter += 1;
    }
    used_ids.insert(id.clone());
    id
}

fn repo_stanza(repo_id: &str, baseurl: &str) -> String {
    format!(
        "\n[{repo_id}]\nname={baseurl}\nbaseurl={baseurl}\nenabled=1\n\
         skip_if_unavailable=1\nmetadata_expire=30\ncost=1\npriority=1\n"
    )
}

/// An ordered table of build-root options
#[derive(Debug, Clone)]
pub struct BuildRootConfig {
    options: toml::Table,
}

impl BuildRootConfig {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        let options = text.parse::<toml::Table>()?;
        Ok(Self { options })
    }

    /// Load a config from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// The underlying option table
    pub fn options(&self) -> &toml::Table {
        &self.options
    }

    /// Look up a key that must exist and must be a string
    pub fn get_required_str(&self, key: &str) -> Result<&str, ConfigError> {
        let value = self
            .options
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey {
                key: key.to_string(),
            })?;
        value.as_str().ok_or_else(|| ConfigError::NotString {
            key: key.to_string(),
        })
    }

    /// Name of the build root
    pub fn chroot_name(&self) -> Result<&str, ConfigError> {
        self.get_required_str(CHROOT_NAME_KEY)
    }

    /// Enable the package-manager plugin machinery
    ///
    /// Sets the priorities plugin config and switches `plugins=1` on in
    /// every `[main]` section of the package-manager config.
    pub fn with_plugins_enabled(mut self) -> Result<Self, ConfigError> {
        let conf = self
            .get_required_str(PACKAGE_MANAGER_CONF_KEY)?
            .replace("[main]\n", "[main]\nplugins=1\n");
        self.options.insert(
            PLUGIN_CONF_KEY.to_string(),
            toml::Value::String("\n[main]\nenabled=1\n".to_string()),
        );
        self.options
            .insert(PACKAGE_MANAGER_CONF_KEY.to_string(), toml::Value::String(conf));
        Ok(self)
    }

    /// Append a repository to the package-manager config
    ///
    /// A fixed `repo_id` is recorded in `used_ids` as given; otherwise an id
    /// is generated from the baseurl.
    pub fn with_repo(
        mut self,
        baseurl: &str,
        repo_id: Option<&str>,
        used_ids: &mut BTreeSet<String>,
    ) -> Result<Self, ConfigError> {
        let id = match repo_id {
            Some(id) => {
                used_ids.insert(id.to_string());
                id.to_string()
            }
            None => generate_repo_id(baseurl, used_ids),
        };
        let conf = format!(
            "{}{}",
            self.get_required_str(PACKAGE_MANAGER_CONF_KEY)?,
            repo_stanza(&id, baseurl)
        );
        self.options
            .insert(PACKAGE_MANAGER_CONF_KEY.to_string(), toml::Value::String(conf));
        Ok(self)
    }

    /// Write the derived config out as TOML, preserving key order
    pub fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text =
            toml::to_string_pretty(&self.options).map_err(|e| ConfigError::WriteDerived {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
        filesystem::write_file(path, &text).map_err(|e| ConfigError::WriteDerived {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }
}
