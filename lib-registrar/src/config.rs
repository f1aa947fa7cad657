//! Registrar deployment configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! root_name = "sismo.eth"
//! registrar_address = "0x…"
//! administrator = "0x…"
//! reservation_duration_secs = 604800
//! max_emission_number = 0
//! deployed_at = 1650000000
//!
//! [access_code]
//! code_signer = "0x…"
//! domain_name = "SubdomainRegistrar"
//! domain_version = "1.0"
//! chain_id = 1
//! initial_group_id = 2728
//! ```

use std::path::{Path, PathBuf};

use lib_types::{Address, GroupId, Timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::access_code::{AccessCodeDomain, SECONDS_PER_WEEK};
use crate::code_accessible::CodeAccessibleRegistrar;
use crate::naming::NamingCollaborator;
use crate::registrar::{EngineConfig, SubdomainRegistrar};
use crate::types::namehash;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("missing [access_code] section")]
    MissingAccessCode,
}

fn default_reservation_duration() -> u64 {
    SECONDS_PER_WEEK
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrarConfig {
    pub root_name: String,
    pub registrar_address: String,
    pub administrator: String,
    #[serde(default = "default_reservation_duration")]
    pub reservation_duration_secs: u64,
    #[serde(default)]
    pub max_emission_number: u64,
    #[serde(default)]
    pub deployed_at: Timestamp,
    #[serde(default)]
    pub access_code: Option<AccessCodeConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCodeConfig {
    pub code_signer: String,
    pub domain_name: String,
    pub domain_version: String,
    pub chain_id: u64,
    #[serde(default)]
    pub initial_group_id: GroupId,
}

impl RegistrarConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), root = %config.root_name, "registrar config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_name.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "root_name",
                reason: "must not be empty".to_string(),
            });
        }
        parse_address("registrar_address", &self.registrar_address)?;
        parse_address("administrator", &self.administrator)?;

        if let Some(access_code) = &self.access_code {
            access_code.validate()?;
        }
        Ok(())
    }

    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        self.validate()?;
        Ok(EngineConfig {
            root_node: namehash(&self.root_name),
            registrar_address: parse_address("registrar_address", &self.registrar_address)?,
            deployed_at: self.deployed_at,
            reservation_duration: self.reservation_duration_secs,
            max_emission_number: self.max_emission_number,
        })
    }

    pub fn build_registrar<N: NamingCollaborator>(
        &self,
        naming: N,
    ) -> Result<SubdomainRegistrar<N>, ConfigError> {
        let engine = self.engine_config()?;
        let administrator = parse_address("administrator", &self.administrator)?;
        Ok(SubdomainRegistrar::new(naming, engine, administrator))
    }

    pub fn build_code_accessible<N: NamingCollaborator>(
        &self,
        naming: N,
    ) -> Result<CodeAccessibleRegistrar<N>, ConfigError> {
        let access_code = self
            .access_code
            .as_ref()
            .ok_or(ConfigError::MissingAccessCode)?;
        let registrar = self.build_registrar(naming)?;

        let domain = AccessCodeDomain {
            name: access_code.domain_name.clone(),
            version: access_code.domain_version.clone(),
            chain_id: access_code.chain_id,
            verifying_contract: registrar.config().registrar_address,
        };
        let code_signer = parse_address("access_code.code_signer", &access_code.code_signer)?;

        Ok(CodeAccessibleRegistrar::new(
            registrar,
            domain,
            code_signer,
            access_code.initial_group_id,
        ))
    }
}

impl AccessCodeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        parse_address("access_code.code_signer", &self.code_signer)?;
        if self.domain_name.is_empty() {
            return Err(ConfigError::InvalidField {
                field: "access_code.domain_name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.domain_version.is_empty() {
            return Err(ConfigError::InvalidField {
                field: "access_code.domain_version",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, ConfigError> {
    let address = Address::from_hex(value).map_err(|e| ConfigError::InvalidField {
        field,
        reason: e.to_string(),
    })?;
    if address.is_zero() {
        return Err(ConfigError::InvalidField {
            field,
            reason: "must not be the zero address".to_string(),
        });
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::InMemoryNameRegistry;
    use std::io::Write;

    fn hex_addr(id: u8) -> String {
        format!("0x{}", Address::new([id; 32]))
    }

    fn sample_toml() -> String {
        format!(
            r#"
root_name = "sismo.eth"
registrar_address = "{}"
administrator = "{}"
deployed_at = 1650000000

[access_code]
code_signer = "{}"
domain_name = "SubdomainRegistrar"
domain_version = "1.0"
chain_id = 1
initial_group_id = 2728
"#,
            hex_addr(100),
            hex_addr(200),
            hex_addr(50)
        )
    }

    #[test]
    fn test_defaults_applied() {
        let config = RegistrarConfig::from_toml_str(&format!(
            "root_name = \"sismo.eth\"\nregistrar_address = \"{}\"\nadministrator = \"{}\"\n",
            hex_addr(100),
            hex_addr(200)
        ))
        .unwrap();

        assert_eq!(config.reservation_duration_secs, 604_800);
        assert_eq!(config.max_emission_number, 0);
        assert_eq!(config.deployed_at, 0);
        assert!(config.access_code.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_toml().as_bytes()).unwrap();

        let config = RegistrarConfig::load(file.path()).unwrap();
        assert_eq!(config.root_name, "sismo.eth");
        assert_eq!(config.deployed_at, 1_650_000_000);
        assert_eq!(config.access_code.as_ref().unwrap().initial_group_id, 2728);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RegistrarConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut config = RegistrarConfig::from_toml_str(&sample_toml()).unwrap();
        config.administrator = format!("0x{}", Address::zero());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidField { field: "administrator", .. })
        ));

        let mut config = RegistrarConfig::from_toml_str(&sample_toml()).unwrap();
        config.registrar_address = "0xnothex".to_string();
        assert!(config.validate().is_err());

        let mut config = RegistrarConfig::from_toml_str(&sample_toml()).unwrap();
        config.root_name = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = RegistrarConfig::from_toml_str(&sample_toml()).unwrap();
        if let Some(access_code) = config.access_code.as_mut() {
            access_code.domain_version.clear();
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidField { field: "access_code.domain_version", .. })
        ));
    }

    #[test]
    fn test_build_code_accessible() {
        let config = RegistrarConfig::from_toml_str(&sample_toml()).unwrap();
        let gate = config
            .build_code_accessible(InMemoryNameRegistry::new(Address::new([100; 32])))
            .unwrap();

        assert_eq!(gate.code_signer(), Address::new([50; 32]));
        assert_eq!(gate.group_id(), 2728);
        assert_eq!(gate.registrar().owner(), Address::new([200; 32]));
        assert_eq!(gate.registrar().config().root_node, namehash("sismo.eth"));
        assert_eq!(gate.domain().verifying_contract, Address::new([100; 32]));
    }

    #[test]
    fn test_build_code_accessible_requires_section() {
        let mut config = RegistrarConfig::from_toml_str(&sample_toml()).unwrap();
        config.access_code = None;
        let result = config.build_code_accessible(InMemoryNameRegistry::new(Address::new([100; 32])));
        assert!(matches!(result, Err(ConfigError::MissingAccessCode)));
    }
}
