use thiserror::Error;

/// Failures inside the hero. None of them escapes [`crate::Hero`]; each one
/// short-circuits to the static panel or freezes the scene.
#[derive(Debug, Error)]
pub enum HeroError {
    #[error("rendering capability probe failed: {0}")]
    ProbeFailed(String),

    #[error("scene construction failed: {0}")]
    Construction(String),

    #[error("graphics context lost: {0}")]
    ContextLost(String),

    #[error("invalid hero config: `{field}` {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}
