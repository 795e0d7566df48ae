//! Pipeline configuration with builder pattern.
//!
//! [`GroupingConfig`] bounds the work a single request may trigger and picks
//! how the assignor treats a shortfall of encodings. It uses the `bon` crate
//! for builder generation with validation at build time.
//!
//! # Example
//!
//! ```
//! use elephant_groups::config::{CoveragePolicy, GroupingConfig};
//!
//! // All defaults
//! let config = GroupingConfig::builder().build().unwrap();
//! assert_eq!(config.max_groups, 63);
//!
//! let config = GroupingConfig::builder()
//!     .max_groups(24)
//!     .coverage(CoveragePolicy::Truncate)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::encoding::MAX_LENGTH;

/// Default enumeration limit: the longest encoding that fits in a `u64`.
pub const DEFAULT_MAX_GROUPS: u32 = MAX_LENGTH;

/// Tighter limit for long-running services. `C(24, 12)` is about 2.7 million
/// items.
pub const SERVICE_MAX_GROUPS: u32 = 24;

/// Default capacity of the worker request queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_groups must be in 1..={max}, got {value}")]
    InvalidMaxGroups { value: u32, max: u32 },

    #[error("queue_capacity must be at least 1")]
    InvalidQueueCapacity,
}

// =============================================================================
// CoveragePolicy
// =============================================================================

/// What to do when fewer encodings exist than items were requested.
///
/// The solver's coverage condition makes this unreachable for a correct
/// solver; the policy decides how loudly a violation is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// Fail with `GroupingError::InsufficientEncodings`.
    #[default]
    Strict,
    /// Leave items without an encoding out of every group.
    Truncate,
}

// =============================================================================
// GroupingConfig
// =============================================================================

/// Configuration for [`GroupAssigner`](crate::grouping::GroupAssigner) and
/// the [`GroupingWorker`](crate::worker::GroupingWorker).
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
#[serde(default)]
pub struct GroupingConfig {
    /// Largest group count a request may need. Default: 63.
    ///
    /// Enumeration is exponential in the group count. Services that must
    /// answer promptly should lower this, e.g. to [`SERVICE_MAX_GROUPS`].
    #[builder(default = DEFAULT_MAX_GROUPS)]
    pub max_groups: u32,

    /// Shortfall handling. Default: [`CoveragePolicy::Strict`].
    #[builder(default)]
    pub coverage: CoveragePolicy,

    /// Bounded request queue size for the worker. Default: 64.
    #[builder(default = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,
}

impl<S: grouping_config_builder::IsComplete> GroupingConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `max_groups` is 0 or above 63
    /// - `queue_capacity` is 0
    pub fn build(self) -> Result<GroupingConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl GroupingConfig {
    /// Validate the configuration.
    ///
    /// The builder calls this; deserialised configs should call it too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_groups == 0 || self.max_groups > MAX_LENGTH {
            return Err(ConfigError::InvalidMaxGroups {
                value: self.max_groups,
                max: MAX_LENGTH,
            });
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::InvalidQueueCapacity);
        }
        Ok(())
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}
