//! Deployment parameters for the Flume agent, derived from a [`Snapshot`].
//!
//! ## Example
//!
//! ```
//! use flume_params::{FlumeParams, Snapshot};
//! use serde_json::json;
//!
//! let snapshot = Snapshot::from_value(json!({
//!     "configurations": {
//!         "cluster-env": { "user_group": "hadoop" },
//!         "hadoop-env": { "proxyuser_group": "users" },
//!         "flume-env": { "content": "export JAVA_HOME={{java_home}}" }
//!     },
//!     "hostLevelParams": { "stack_version": "2.2", "java_home": "/usr/jdk64/jdk1.7.0_67" },
//!     "commandParams": { "flume_handler": "a1,a2" }
//! }))?;
//!
//! let params = FlumeParams::resolve(&snapshot)?;
//! assert_eq!(params.paths.bin, "/usr/hdp/current/flume-server/bin/flume-ng");
//! assert_eq!(params.command_targets, ["a1", "a2"]);
//! assert!(!params.has_metric_collector());
//! # Ok::<(), flume_params::Error>(())
//! ```

use serde::Serialize;

use crate::layout::{PathSet, CONF_DIR, LOG_DIR, RUN_DIR};
use crate::snapshot::Snapshot;
use crate::version::StackVersion;
use crate::Error;

pub const DEFAULT_USER: &str = "flume";
pub const DEFAULT_GROUP: &str = "flume";

/// The flat set of values consumed by the Flume deployment scripts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlumeParams {
    pub stack_name: Option<String>,
    pub stack_version_unformatted: String,
    /// `None` when the host's version string could not be normalized.
    pub stack_version: Option<StackVersion>,
    pub user_group: String,
    pub proxyuser_group: String,
    pub security_enabled: bool,
    pub java_home: String,

    pub paths: PathSet,
    pub conf_dir: &'static str,
    pub log_dir: &'static str,
    pub run_dir: &'static str,

    pub user: String,
    pub group: String,

    /// Agent configuration, passed through unchanged.
    pub conf_content: Option<String>,
    /// log4j properties, passed through unchanged.
    pub log4j_content: Option<String>,
    /// Agent names listed in the command, empty when none are given.
    pub command_targets: Vec<String>,
    /// Unrendered `flume-env.sh` template.
    pub env_sh_template: String,

    pub ganglia_server_host: Option<String>,
    pub hostname: Option<String>,
    pub metric_collector_host: Option<String>,
}

impl FlumeParams {
    /// Resolves all parameters.
    ///
    /// Optional settings fall back to their defaults. Fails only when a
    /// required key is missing or holds a non-scalar.
    pub fn resolve(snapshot: &Snapshot) -> Result<Self, Error> {
        let stack_version_unformatted = snapshot.require_str("/hostLevelParams/stack_version")?;
        let stack_version = StackVersion::format(&stack_version_unformatted);
        if stack_version.is_none() {
            tracing::warn!(
                raw = %stack_version_unformatted,
                "could not normalize stack version"
            );
        }
        let paths = PathSet::for_version(stack_version.as_ref());

        let params = Self {
            stack_name: snapshot.optional_str("/hostLevelParams/stack_name"),
            stack_version_unformatted,
            stack_version,
            user_group: snapshot.require_str("/configurations/cluster-env/user_group")?,
            proxyuser_group: snapshot.require_str("/configurations/hadoop-env/proxyuser_group")?,
            security_enabled: false,
            java_home: snapshot.require_str("/hostLevelParams/java_home")?,

            paths,
            conf_dir: CONF_DIR,
            log_dir: LOG_DIR,
            run_dir: RUN_DIR,

            user: snapshot.default_str("/configurations/flume-env/flume_user", DEFAULT_USER),
            group: DEFAULT_GROUP.to_string(),

            conf_content: snapshot.optional_str("/configurations/flume-conf/content"),
            log4j_content: snapshot.optional_str("/configurations/flume-log4j/content"),
            command_targets: snapshot
                .optional_str("/commandParams/flume_handler")
                .map(|targets| split_targets(&targets))
                .unwrap_or_default(),
            env_sh_template: snapshot.require_str("/configurations/flume-env/content")?,

            ganglia_server_host: snapshot.first_of("/clusterHostInfo/ganglia_server_host"),
            hostname: snapshot.optional_str("/hostname"),
            metric_collector_host: snapshot.first_of("/clusterHostInfo/metric_collector_hosts"),
        };

        tracing::debug!(
            user = %params.user,
            targets = params.command_targets.len(),
            metric_collector = params.has_metric_collector(),
            "resolved flume parameters"
        );
        Ok(params)
    }

    pub fn has_metric_collector(&self) -> bool {
        self.metric_collector_host.is_some()
    }
}

/// Splits a comma-separated agent list, dropping blank entries.
pub fn split_targets(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotError;
    use serde_json::{json, Value};

    fn command(stack_version: Value) -> Value {
        json!({
            "configurations": {
                "cluster-env": { "user_group": "hadoop" },
                "hadoop-env": { "proxyuser_group": "users" },
                "flume-env": { "content": "export JAVA_HOME={{java_home}}" }
            },
            "hostLevelParams": {
                "stack_version": stack_version,
                "java_home": "/usr/jdk64/jdk1.7.0_67"
            }
        })
    }

    fn resolve(value: Value) -> FlumeParams {
        FlumeParams::resolve(&Snapshot::from_value(value).unwrap()).unwrap()
    }

    #[test]
    fn test_minimal_command_uses_defaults() {
        let params = resolve(command(json!("2.2")));

        assert_eq!(params.stack_name, None);
        assert_eq!(params.user, "flume");
        assert_eq!(params.group, "flume");
        assert_eq!(params.conf_content, None);
        assert_eq!(params.log4j_content, None);
        assert!(params.command_targets.is_empty());
        assert_eq!(params.ganglia_server_host, None);
        assert_eq!(params.hostname, None);
        assert_eq!(params.metric_collector_host, None);
        assert!(!params.has_metric_collector());
        assert!(!params.security_enabled);
        assert_eq!(params.conf_dir, "/etc/flume/conf");
        assert_eq!(params.log_dir, "/var/log/flume");
        assert_eq!(params.run_dir, "/var/run/flume");
    }

    #[test]
    fn test_version_at_threshold_selects_current_paths() {
        let params = resolve(command(json!("2.2.0.0")));
        assert_eq!(params.paths, PathSet::CURRENT);
        assert_eq!(params.stack_version.unwrap().to_string(), "2.2.0.0");
    }

    #[test]
    fn test_numeric_version_is_accepted() {
        let params = resolve(command(json!(2.3)));
        assert_eq!(params.stack_version_unformatted, "2.3");
        assert_eq!(params.paths, PathSet::CURRENT);
    }

    #[test]
    fn test_older_version_selects_legacy_paths() {
        let params = resolve(command(json!("2.1")));
        assert_eq!(params.paths, PathSet::LEGACY);
        assert_eq!(params.paths.bin, "/usr/bin/flume-ng");
        assert_eq!(params.paths.hive_home, "/usr/lib/hive");
        assert_eq!(params.paths.hcat_home, "/usr/lib/hive-hcatalog");
    }

    #[test]
    fn test_unknown_version_selects_legacy_paths() {
        let params = resolve(command(json!("trunk")));
        assert_eq!(params.stack_version, None);
        assert_eq!(params.paths, PathSet::LEGACY);
    }

    #[test]
    fn test_optional_sections_are_picked_up() {
        let mut value = command(json!("2.2"));
        value["configurations"]["flume-env"]["flume_user"] = json!("svc-flume");
        value["configurations"]["flume-conf"] = json!({ "content": "a1.sources = r1\n" });
        value["configurations"]["flume-log4j"] = json!({ "content": "flume.root.logger=INFO" });
        value["commandParams"] = json!({ "flume_handler": "a1, a2,,a3," });
        value["clusterHostInfo"] = json!({
            "ganglia_server_host": ["g1"],
            "metric_collector_hosts": ["m1", "m2"]
        });
        value["hostname"] = json!("c6401.ambari.apache.org");
        value["hostLevelParams"]["stack_name"] = json!("HDP");

        let params = resolve(value);

        assert_eq!(params.user, "svc-flume");
        assert_eq!(params.conf_content.as_deref(), Some("a1.sources = r1\n"));
        assert_eq!(params.log4j_content.as_deref(), Some("flume.root.logger=INFO"));
        assert_eq!(params.command_targets, ["a1", "a2", "a3"]);
        assert_eq!(params.ganglia_server_host.as_deref(), Some("g1"));
        assert_eq!(params.metric_collector_host.as_deref(), Some("m1"));
        assert!(params.has_metric_collector());
        assert_eq!(params.hostname.as_deref(), Some("c6401.ambari.apache.org"));
        assert_eq!(params.stack_name.as_deref(), Some("HDP"));
    }

    #[test]
    fn test_content_section_without_content_key_is_absent() {
        let mut value = command(json!("2.2"));
        value["configurations"]["flume-conf"] = json!({ "other": "x" });

        assert_eq!(resolve(value).conf_content, None);
    }

    #[test]
    fn test_empty_collector_list_selects_nothing() {
        let mut value = command(json!("2.2"));
        value["clusterHostInfo"] = json!({ "metric_collector_hosts": [] });

        let params = resolve(value);
        assert_eq!(params.metric_collector_host, None);
        assert!(!params.has_metric_collector());
    }

    #[test]
    fn test_missing_required_key() {
        let mut value = command(json!("2.2"));
        value["configurations"]
            .as_object_mut()
            .unwrap()
            .remove("flume-env");

        let err = FlumeParams::resolve(&Snapshot::from_value(value).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            Error::Snapshot(SnapshotError::MissingKey { ref path })
                if path == "/configurations/flume-env/content"
        ));
    }

    #[test]
    fn test_split_targets() {
        assert_eq!(split_targets("a1"), ["a1"]);
        assert_eq!(split_targets("a1,a2"), ["a1", "a2"]);
        assert_eq!(split_targets(" a1 , ,a2,"), ["a1", "a2"]);
        assert!(split_targets("").is_empty());
        assert!(split_targets(",,").is_empty());
    }
}
