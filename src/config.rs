//! Diagnostic configuration.

/// Settings for [`AccessDiagnostic`](crate::AccessDiagnostic).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiagnosticConfig {
    /// Command prefix for suggested fixes.
    pub chmod_command: String,
    /// Abort the walk when the group membership lookup fails, instead of
    /// logging it and falling through to the public role.
    pub strict_group_lookup: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            chmod_command: "sudo chmod".to_string(),
            strict_group_lookup: false,
        }
    }
}

impl DiagnosticConfig {
    /// Use `command` as the prefix of suggested fixes.
    pub fn with_chmod_command(mut self, command: impl Into<String>) -> Self {
        self.chmod_command = command.into();
        self
    }

    /// Set whether a failed group lookup aborts the walk.
    pub fn with_strict_group_lookup(mut self, strict: bool) -> Self {
        self.strict_group_lookup = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DiagnosticConfig::default();
        assert_eq!(config.chmod_command, "sudo chmod");
        assert!(!config.strict_group_lookup);
    }

    #[test]
    fn builder_setters() {
        let config = DiagnosticConfig::default()
            .with_chmod_command("chmod")
            .with_strict_group_lookup(true);
        assert_eq!(config.chmod_command, "chmod");
        assert!(config.strict_group_lookup);
    }
}
