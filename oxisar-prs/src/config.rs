//! PRS decoder configuration.

/// Default output buffer size before growth.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Default cap on decompressed output (16 MiB).
pub const DEFAULT_MAX_OUTPUT: usize = 16 * 1024 * 1024;

/// PRS decoder configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrsConfig {
    /// Initial output capacity in bytes. The buffer doubles as needed.
    pub initial_capacity: usize,
    /// Maximum number of output bytes. A stream that expands past this
    /// limit is rejected, which bounds the work done on hostile input.
    pub max_output: usize,
}

impl PrsConfig {
    /// Default configuration.
    pub const DEFAULT: Self = Self {
        initial_capacity: DEFAULT_INITIAL_CAPACITY,
        max_output: DEFAULT_MAX_OUTPUT,
    };

    /// Create the default configuration.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the initial output capacity.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set the output limit.
    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = max_output;
        self
    }
}

impl Default for PrsConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PrsConfig::default();
        assert_eq!(config, PrsConfig::DEFAULT);
        assert_eq!(config.initial_capacity, 64);
        assert_eq!(config.max_output, 16 * 1024 * 1024);
    }

    #[test]
    fn test_builder() {
        let config = PrsConfig::new()
            .with_initial_capacity(8)
            .with_max_output(1024);
        assert_eq!(config.initial_capacity, 8);
        assert_eq!(config.max_output, 1024);
    }
}
