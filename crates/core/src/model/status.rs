#![forbid(unsafe_code)]

/// Lifecycle of a single version row.
///
/// `Pending` is the only non-terminal state; it settles exactly once into
/// `Ready` or `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VersionStatus {
    Pending,
    Ready,
    Failed,
}

impl VersionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VersionStatus::Pending => "PENDING",
            VersionStatus::Ready => "READY",
            VersionStatus::Failed => "FAILED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(VersionStatus::Pending),
            "READY" => Some(VersionStatus::Ready),
            "FAILED" => Some(VersionStatus::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, VersionStatus::Pending)
    }

    /// Only ready versions may become current or serve as display fallback.
    pub fn is_adoptable(self) -> bool {
        matches!(self, VersionStatus::Ready)
    }

    pub fn can_transition_to(self, next: VersionStatus) -> bool {
        matches!(
            (self, next),
            (VersionStatus::Pending, VersionStatus::Ready)
                | (VersionStatus::Pending, VersionStatus::Failed)
        )
    }
}

/// Summary status of a slot as shown to list readers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayStatus {
    None,
    Generating,
    Ready,
    Failed,
}

impl DisplayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayStatus::None => "NONE",
            DisplayStatus::Generating => "GENERATING",
            DisplayStatus::Ready => "READY",
            DisplayStatus::Failed => "FAILED",
        }
    }
}
