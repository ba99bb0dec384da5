use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadFlowError>;

/// Failures raised while validating a network or solving a load flow.
///
/// Non-convergence is not an error: [`crate::PFResults::converged`] is
/// false and the last voltage estimate is still returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadFlowError {
    #[error("bus record {row} has {len} fields, at least 11 are required")]
    BusRecordTooShort { row: usize, len: usize },

    #[error("line record {row} has {len} fields, at least 6 are required")]
    LineRecordTooShort { row: usize, len: usize },

    #[error("bus {bus} has unknown type code {code}")]
    UnknownBusType { bus: usize, code: f64 },

    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("bus number {0} is not a positive integer")]
    NonIntegerBusId(f64),

    #[error("bus {0} is defined more than once")]
    DuplicateBus(usize),

    #[error("bus numbers must run 1..={count} without gaps, found {found}")]
    NonContiguousBusIds { count: usize, found: usize },

    #[error("line {line} references bus {bus} which does not exist")]
    UnknownBus { line: usize, bus: usize },

    #[error("bus {0} does not exist")]
    MissingBus(usize),

    #[error("network has no slack bus")]
    NoSlackBus,

    #[error("network has {0} slack buses, exactly one is required")]
    MultipleSlackBuses(usize),

    #[error("line {line} ({from}-{to}) has zero series impedance")]
    ZeroImpedance { line: usize, from: usize, to: usize },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("network contains no buses")]
    EmptyNetwork,

    #[error("{field} of {element} is not finite")]
    NonFiniteValue { element: String, field: &'static str },

    #[error("Jacobian is singular at iteration {iteration}, check for isolated buses")]
    SingularJacobian { iteration: usize },

    #[error("numerical failure: {0}")]
    Numerical(String),
}

impl LoadFlowError {
    /// True for errors raised before any computation starts.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            LoadFlowError::SingularJacobian { .. } | LoadFlowError::Numerical(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_validation_errors() {
        assert!(LoadFlowError::NoSlackBus.is_validation());
        assert!(LoadFlowError::UnknownBus { line: 1, bus: 9 }.is_validation());
        assert!(!LoadFlowError::SingularJacobian { iteration: 1 }.is_validation());
        assert!(!LoadFlowError::Numerical("nan".into()).is_validation());
    }

    #[test]
    fn messages_name_the_offending_element() {
        let err = LoadFlowError::UnknownBus { line: 3, bus: 7 };
        assert_eq!(
            err.to_string(),
            "line 3 references bus 7 which does not exist"
        );
    }
}
