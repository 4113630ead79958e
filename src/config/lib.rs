/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

// The functions here use serde_ignored to catch typos in the config.
//
// NOTE: Please make sure to use the YamlRead trait for reading settings,
//       rather than serde_yaml::from_{reader,value,etc.}, or typos will be
//       silently ignored.

#[macro_use]
extern crate log;

use ::lintol_linalg::{EigenMethod, Engine, Tolerance};
use ::serde::{Serialize, Deserialize};
use ::std::io::Read;
use ::thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not parse settings: {0}")]
    Yaml(#[from] ::serde_yaml::Error),

    #[error("invalid settings: {0}")]
    Engine(#[from] ::lintol_linalg::Error),
}

/// Provides an alternative to serde_yaml::from_reader that reports unused
/// (likely misspelled) keys.
pub trait YamlRead: for <'de> Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, ::serde_yaml::Error>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, ::serde_yaml::Error> {
        // serde_ignored needs a Deserializer, which serde_yaml only offers
        // through Value.
        Self::from_value(::serde_yaml::from_reader(r)?)
    }

    fn from_value(value: ::serde_yaml::Value) -> Result<Self, ::serde_yaml::Error>;
}

/// Deserialize, handing the path of every ignored item to `on_unused`.
pub fn from_value_reporting_unused<T>(
    value: ::serde_yaml::Value,
    mut on_unused: impl FnMut(String),
) -> Result<T, ::serde_yaml::Error>
where T: for<'de> Deserialize<'de>,
{ ::serde_ignored::deserialize(value, |path| on_unused(path.to_string())) }

macro_rules! derive_yaml_read {
    ($Type:ty) => {
        impl YamlRead for $Type {
            fn from_value(value: ::serde_yaml::Value) -> Result<$Type, ::serde_yaml::Error> {
                from_value_reporting_unused(
                    value,
                    |path| warn!("Unused config item (possible typo?): {}", path),
                )
            }
        }
    };
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Magnitudes at or below this are treated as zero.
    #[serde(default="_settings__tolerance")]
    pub tolerance: f64,

    /// Used whenever eigenvalues are computed rather than supplied.
    #[serde(default)]
    pub eigen_method: EigenMethod,
}
fn _settings__tolerance() -> f64 { Tolerance::DEFAULT.value() }
derive_yaml_read!{Settings}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tolerance: _settings__tolerance(),
            eigen_method: EigenMethod::default(),
        }
    }
}

impl Settings {
    /// Validate and build an engine.
    pub fn engine(&self) -> Result<Engine, ::lintol_linalg::Error> {
        let tolerance = Tolerance::new(self.tolerance)?;
        Ok(Engine::new().with_tolerance(tolerance).with_eigen_method(self.eigen_method))
    }
}

/// Read [`Settings`] as YAML and build an engine from them.
pub fn read_engine(r: impl Read) -> Result<Engine, ConfigError> {
    let settings = Settings::from_reader(r)?;
    Ok(settings.engine()?)
}
