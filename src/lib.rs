/* ************************************************************************ **
** This file is part of lintol, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Facade over the workspace crates.
//!
//! The numerics live in `lintol-linalg`, re-exported at the root of this
//! crate; YAML settings live in [`config`].

pub use ::lintol_linalg::*;

pub mod config {
    pub use ::lintol_config::{ConfigError, Settings, YamlRead, read_engine};
}
