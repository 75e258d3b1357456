/// Task status workflow validation
///
/// Tasks move through a fixed lifecycle enforced on every status update:
///
/// ```text
/// CREATED → IN_PROGRESS → COMPLETED
/// ```
///
/// `COMPLETED` is terminal. Everything outside the two arrows above —
/// self-transitions, skipping `IN_PROGRESS`, moving backwards — is rejected.
///
/// The initial status of a new task is always `CREATED`; that is enforced by
/// the request schema at the API boundary, not by this validator.
///
/// # Example
///
/// ```
/// use taskflow_shared::workflow::{validate_transition, TaskStatus};
///
/// assert!(validate_transition(TaskStatus::Created, TaskStatus::InProgress).is_ok());
/// assert!(validate_transition(TaskStatus::Created, TaskStatus::Completed).is_err());
/// ```
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Initial status of every task
    #[sqlx(rename = "CREATED")]
    Created,

    /// Work has started
    #[sqlx(rename = "IN_PROGRESS")]
    InProgress,

    /// Terminal status; no further transitions
    #[sqlx(rename = "COMPLETED")]
    Completed,
}

impl TaskStatus {
    /// Converts status to its wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Created => "CREATED",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    /// Checks if status is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(TaskStatus::Created),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "COMPLETED" => Ok(TaskStatus::Completed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Error for unrecognized status strings
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown task status: {0}")]
pub struct ParseStatusError(pub String);

/// Error for illegal status transitions
///
/// Carries both states so the API can name them in the 400 response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status transition from {from} to {to}")]
pub struct IllegalTransition {
    /// Status the task currently has
    pub from: TaskStatus,

    /// Status the caller requested
    pub to: TaskStatus,
}

/// Validates a status transition against the workflow
///
/// # Errors
///
/// Returns `IllegalTransition` for every pair outside
/// `CREATED → IN_PROGRESS` and `IN_PROGRESS → COMPLETED`.
pub fn validate_transition(current: TaskStatus, requested: TaskStatus) -> Result<(), IllegalTransition> {
    let legal = matches!(
        (current, requested),
        (TaskStatus::Created, TaskStatus::InProgress)
            | (TaskStatus::InProgress, TaskStatus::Completed)
    );

    if legal {
        Ok(())
    } else {
        Err(IllegalTransition {
            from: current,
            to: requested,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TaskStatus; 3] = [
        TaskStatus::Created,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    #[test]
    fn test_legal_transitions() {
        assert!(validate_transition(TaskStatus::Created, TaskStatus::InProgress).is_ok());
        assert!(validate_transition(TaskStatus::InProgress, TaskStatus::Completed).is_ok());
    }

    #[test]
    fn test_all_other_pairs_are_illegal() {
        for from in ALL {
            for to in ALL {
                let legal = matches!(
                    (from, to),
                    (TaskStatus::Created, TaskStatus::InProgress)
                        | (TaskStatus::InProgress, TaskStatus::Completed)
                );
                assert_eq!(validate_transition(from, to).is_ok(), legal);
            }
        }
    }

    #[test]
    fn test_self_transitions_are_illegal() {
        for status in ALL {
            let err = validate_transition(status, status).unwrap_err();
            assert_eq!(err.from, status);
            assert_eq!(err.to, status);
        }
    }

    #[test]
    fn test_completed_is_terminal() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(!TaskStatus::Created.is_terminal());
        assert!(!TaskStatus::InProgress.is_terminal());

        for to in ALL {
            assert!(validate_transition(TaskStatus::Completed, to).is_err());
        }
    }

    #[test]
    fn test_error_names_both_states() {
        let err = validate_transition(TaskStatus::Created, TaskStatus::Completed).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status transition from CREATED to COMPLETED"
        );
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
        assert!("DONE".parse::<TaskStatus>().is_err());
    }
}
