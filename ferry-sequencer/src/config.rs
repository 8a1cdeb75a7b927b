//! Sequencer configuration
//!
//! Defines the polling interval, the optional overall wait limit and how
//! unrecognized job states are treated.

use std::str::FromStr;
use std::time::Duration;

/// How the sequencer treats a job state the service is not known to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownStatusPolicy {
    /// Fail the poll with `QueryError::UnrecognizedStatus`
    #[default]
    Strict,
    /// Log a warning and keep polling as if the job were running
    Running,
}

impl FromStr for UnknownStatusPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "running" | "permissive" => Ok(Self::Running),
            other => anyhow::bail!("unknown status policy `{}` (expected strict or running)", other),
        }
    }
}

/// Sequencer configuration
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Fixed wait between two status queries
    pub poll_interval: Duration,

    /// Upper bound on the time spent polling a submitted job
    ///
    /// `None`, the default, means no limit: a job that never leaves a running
    /// state is polled forever.
    pub timeout: Option<Duration>,

    pub unknown_status: UnknownStatusPolicy,
}

impl SequencerConfig {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            timeout: None,
            unknown_status: UnknownStatusPolicy::default(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables:
    /// - FERRY_POLL_INTERVAL (optional, seconds, default: 3)
    /// - FERRY_JOB_TIMEOUT (optional, seconds, default: no limit)
    /// - FERRY_UNKNOWN_STATUS (optional, `strict` or `running`, default: strict)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("FERRY_POLL_INTERVAL") {
            let secs = raw
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("FERRY_POLL_INTERVAL must be a number of seconds"))?;
            config.poll_interval = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("FERRY_JOB_TIMEOUT") {
            let secs = raw
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("FERRY_JOB_TIMEOUT must be a number of seconds"))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(raw) = lookup("FERRY_UNKNOWN_STATUS") {
            config.unknown_status = raw.parse()?;
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_unknown_status(mut self, policy: UnknownStatusPolicy) -> Self {
        self.unknown_status = policy;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if matches!(self.timeout, Some(t) if t.is_zero()) {
            anyhow::bail!("timeout must be greater than 0 when set");
        }

        Ok(())
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SequencerConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        assert_eq!(config.timeout, None);
        assert_eq!(config.unknown_status, UnknownStatusPolicy::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = SequencerConfig::from_lookup(lookup(&[
            ("FERRY_POLL_INTERVAL", "10"),
            ("FERRY_JOB_TIMEOUT", "600"),
            ("FERRY_UNKNOWN_STATUS", "running"),
        ]))
        .unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.timeout, Some(Duration::from_secs(600)));
        assert_eq!(config.unknown_status, UnknownStatusPolicy::Running);
    }

    #[test]
    fn test_config_from_lookup_rejects_garbage() {
        assert!(SequencerConfig::from_lookup(lookup(&[("FERRY_POLL_INTERVAL", "soon")])).is_err());
        assert!(SequencerConfig::from_lookup(lookup(&[("FERRY_UNKNOWN_STATUS", "maybe")])).is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SequencerConfig::default();
        assert!(config.validate().is_ok());

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        config.poll_interval = Duration::from_secs(1);
        config.timeout = Some(Duration::ZERO);
        assert!(config.validate().is_err());

        config = config.with_timeout(Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }
}
