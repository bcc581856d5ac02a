//! Filesystem locations of the Flume agent and the Hive libraries it loads.

use serde::Serialize;

use crate::version::StackVersion;

pub const CONF_DIR: &str = "/etc/flume/conf";
pub const LOG_DIR: &str = "/var/log/flume";
pub const RUN_DIR: &str = "/var/run/flume";

/// The version-dependent set of binary and library locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathSet {
    pub bin: &'static str,
    pub hive_home: &'static str,
    pub hcat_home: &'static str,
}

impl PathSet {
    /// The `/usr/hdp/current` layout used from stack 2.2 on.
    pub const CURRENT: PathSet = PathSet {
        bin: "/usr/hdp/current/flume-server/bin/flume-ng",
        hive_home: "/usr/hdp/current/hive-metastore",
        hcat_home: "/usr/hdp/current/hive-webhcat",
    };

    /// The package-manager layout of older stacks.
    pub const LEGACY: PathSet = PathSet {
        bin: "/usr/bin/flume-ng",
        hive_home: "/usr/lib/hive",
        hcat_home: "/usr/lib/hive-hcatalog",
    };

    /// Picks the layout for `version`. Unknown versions get the legacy layout.
    pub fn for_version(version: Option<&StackVersion>) -> PathSet {
        match version {
            Some(v) if v.at_or_above_threshold() => {
                tracing::info!(version = %v, "using versioned stack layout");
                Self::CURRENT
            }
            Some(v) => {
                tracing::info!(version = %v, "using legacy stack layout");
                Self::LEGACY
            }
            None => {
                tracing::warn!("stack version unknown, using legacy stack layout");
                Self::LEGACY
            }
        }
    }
}
