use serde::{Deserialize, Serialize};

/// Lifecycle of the sort owned by a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl SortStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(Self::Idle),
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(SortStatus::Running.as_str(), "running");
        assert_eq!(SortStatus::parse("cancelled"), Some(SortStatus::Cancelled));
        assert_eq!(SortStatus::parse("paused"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SortStatus::Idle.is_terminal());
        assert!(!SortStatus::Running.is_terminal());
        assert!(SortStatus::Completed.is_terminal());
        assert!(SortStatus::Cancelled.is_terminal());
    }
}
