//! Command implementations.

pub mod check;
pub mod completions;
pub mod rules;

/// Outcome of a command execution.
#[derive(Debug, Clone, Copy)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,
    /// Process exit code.
    pub exit_code: i32,
}

impl CommandResult {
    /// A successful result with exit code 0.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// A failed result with the given exit code.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}
