//! Renders resolved parameters for the deployment scripts.

use std::str::FromStr;

use crate::params::FlumeParams;
use crate::Error;

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Pretty-printed JSON object.
    #[default]
    Json,
    /// `NAME='value'` lines suitable for `source`.
    Shell,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "shell" | "sh" => Ok(Self::Shell),
            other => Err(format!("unknown export format '{other}' (expected json or shell)")),
        }
    }
}

impl FlumeParams {
    /// The parameters as `FLUME_`-prefixed shell variables, in a stable order.
    ///
    /// Absent values become empty strings and lists are comma-joined.
    pub fn variables(&self) -> Vec<(&'static str, String)> {
        fn opt(value: &Option<String>) -> String {
            value.clone().unwrap_or_default()
        }

        vec![
            ("FLUME_STACK_NAME", opt(&self.stack_name)),
            ("FLUME_STACK_VERSION_UNFORMATTED", self.stack_version_unformatted.clone()),
            (
                "FLUME_STACK_VERSION",
                self.stack_version
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ),
            ("FLUME_USER_GROUP", self.user_group.clone()),
            ("FLUME_PROXYUSER_GROUP", self.proxyuser_group.clone()),
            ("FLUME_SECURITY_ENABLED", self.security_enabled.to_string()),
            ("FLUME_JAVA_HOME", self.java_home.clone()),
            ("FLUME_BIN", self.paths.bin.to_string()),
            ("FLUME_HIVE_HOME", self.paths.hive_home.to_string()),
            ("FLUME_HCAT_HOME", self.paths.hcat_home.to_string()),
            ("FLUME_CONF_DIR", self.conf_dir.to_string()),
            ("FLUME_LOG_DIR", self.log_dir.to_string()),
            ("FLUME_RUN_DIR", self.run_dir.to_string()),
            ("FLUME_USER", self.user.clone()),
            ("FLUME_GROUP", self.group.clone()),
            ("FLUME_CONF_CONTENT", opt(&self.conf_content)),
            ("FLUME_LOG4J_CONTENT", opt(&self.log4j_content)),
            ("FLUME_COMMAND_TARGETS", self.command_targets.join(",")),
            ("FLUME_ENV_SH_TEMPLATE", self.env_sh_template.clone()),
            ("FLUME_GANGLIA_SERVER_HOST", opt(&self.ganglia_server_host)),
            ("FLUME_HOSTNAME", opt(&self.hostname)),
            ("FLUME_HAS_METRIC_COLLECTOR", self.has_metric_collector().to_string()),
            ("FLUME_METRIC_COLLECTOR_HOST", opt(&self.metric_collector_host)),
        ]
    }

    /// Renders the parameters in `format`, newline-terminated.
    pub fn render(&self, format: ExportFormat) -> Result<String, Error> {
        match format {
            ExportFormat::Json => {
                let mut out = serde_json::to_string_pretty(self).map_err(Error::Export)?;
                out.push('\n');
                Ok(out)
            }
            ExportFormat::Shell => Ok(self
                .variables()
                .into_iter()
                .map(|(name, value)| format!("{name}={}\n", shell_quote(&value)))
                .collect()),
        }
    }
}

/// Single-quotes `value` for POSIX shells.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
