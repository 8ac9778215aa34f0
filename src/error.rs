//! Typed errors for the GA engine.
//!
//! All fallible operations surface a [`GaError`]. Configuration problems are
//! rejected at construction; the engine never starts a run with an invalid
//! config and never swallows an error mid-run.

/// Errors produced by configuration validation and the evolutionary loop.
#[derive(Debug, thiserror::Error)]
pub enum GaError {
    /// A configuration invariant was violated. Carries the offending field
    /// name so interactive collaborators can surface it verbatim.
    #[error("invalid config: {field}: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// No objective function was supplied to the engine.
    #[error("no objective function supplied")]
    MissingObjective,

    /// An operator was configured by a name the engine does not know.
    #[error("unknown {kind} operator: {name:?}")]
    UnknownOperator { kind: &'static str, name: String },

    /// Two genes being recombined differ in length. Genes built from a shared
    /// encoding always have equal lengths, so this signals a defect in the
    /// caller, not bad user input.
    #[error("gene length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

impl GaError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GaError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_field_name() {
        let err = GaError::invalid("p_mutation", "must be within [0, 1], got 1.5");
        let msg = err.to_string();
        assert!(msg.contains("p_mutation"), "message was: {msg}");
        assert!(msg.contains("1.5"), "message was: {msg}");
    }

    #[test]
    fn test_unknown_operator_names_kind() {
        let err = GaError::UnknownOperator {
            kind: "crossover",
            name: "three_point".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("crossover"));
        assert!(msg.contains("three_point"));
    }
}
