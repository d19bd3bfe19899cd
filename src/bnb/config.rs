//! Branch-and-bound configuration.

use crate::error::AssignError;

/// Configuration for the branch-and-bound search.
///
/// The defaults run an exhaustive search for the single best assignment,
/// with constraint sets (if any) enforced.
///
/// # Examples
///
/// ```
/// use u_assign::bnb::BnbConfig;
///
/// let config = BnbConfig::default()
///     .with_max_solutions(3)
///     .with_max_expansions(10_000)
///     .with_time_limit_ms(500);
/// assert_eq!(config.max_solutions, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbConfig {
    /// How many distinct best assignments to keep. 1 = optimum only.
    pub max_solutions: usize,

    /// Maximum number of node expansions (hard budget). 0 = no limit.
    pub max_expansions: usize,

    /// Wall-clock limit in milliseconds (None = no limit).
    pub time_limit_ms: Option<u64>,

    /// Whether an assignment must cover every constraint set to be accepted.
    ///
    /// Has no effect on models without constraint sets.
    pub enforce_constraints: bool,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            max_solutions: 1,
            max_expansions: 0,
            time_limit_ms: None,
            enforce_constraints: true,
        }
    }
}

impl BnbConfig {
    /// Sets how many distinct best assignments to report.
    pub fn with_max_solutions(mut self, n: usize) -> Self {
        self.max_solutions = n;
        self
    }

    /// Sets the expansion budget.
    pub fn with_max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = n;
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enables or disables the constraint gate on incumbent acceptance.
    pub fn with_enforce_constraints(mut self, enforce: bool) -> Self {
        self.enforce_constraints = enforce;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AssignError> {
        if self.max_solutions == 0 {
            return Err(AssignError::invalid("max_solutions must be at least 1"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(AssignError::invalid("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BnbConfig::default();
        assert_eq!(config.max_solutions, 1);
        assert_eq!(config.max_expansions, 0);
        assert!(config.time_limit_ms.is_none());
        assert!(config.enforce_constraints);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = BnbConfig::default()
            .with_max_solutions(4)
            .with_max_expansions(100)
            .with_time_limit_ms(250)
            .with_enforce_constraints(false);
        assert_eq!(config.max_solutions, 4);
        assert_eq!(config.max_expansions, 100);
        assert_eq!(config.time_limit_ms, Some(250));
        assert!(!config.enforce_constraints);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(BnbConfig::default().with_max_solutions(0).validate().is_err());
        assert!(BnbConfig::default().with_time_limit_ms(0).validate().is_err());
    }
}
