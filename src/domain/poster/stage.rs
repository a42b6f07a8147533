//! Poster session lifecycle stages.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Coarse lifecycle position of a poster session.
///
/// Flow: `Gathering` → (`Ready`) → `Completed` → `Refining` → `Refining` ...
///
/// `Ready` is transient: the engine resolves it immediately by generating the
/// first image, so it is never persisted in practice. `Refining` accepts
/// further edits indefinitely; no stage is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosterStage {
    /// Eliciting requirements through clarification questions.
    Gathering,
    /// Enough information exists; the first image is about to be generated.
    Ready,
    /// The first image has been generated.
    Completed,
    /// At least one edit has been applied after the first image.
    Refining,
}

impl PosterStage {
    /// Returns true while the conversation is still collecting requirements.
    pub fn is_gathering(&self) -> bool {
        matches!(self, Self::Gathering | Self::Ready)
    }

    /// Returns true once at least one image exists and edits are allowed.
    pub fn accepts_edits(&self) -> bool {
        matches!(self, Self::Completed | Self::Refining)
    }

    /// Label for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gathering => "Gathering",
            Self::Ready => "Ready",
            Self::Completed => "Completed",
            Self::Refining => "Refining",
        }
    }
}

impl Default for PosterStage {
    fn default() -> Self {
        Self::Gathering
    }
}

impl fmt::Display for PosterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Gathering => "GATHERING",
            Self::Ready => "READY",
            Self::Completed => "COMPLETED",
            Self::Refining => "REFINING",
        };
        write!(f, "{}", s)
    }
}

impl StateMachine for PosterStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PosterStage::*;
        matches!(
            (self, target),
            (Gathering, Gathering)
                | (Gathering, Ready)
                | (Gathering, Completed)
                | (Ready, Completed)
                | (Completed, Refining)
                | (Refining, Refining)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PosterStage::*;
        match self {
            Gathering => vec![Gathering, Ready, Completed],
            Ready => vec![Completed],
            Completed => vec![Refining],
            Refining => vec![Refining],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PosterStage; 4] = [
        PosterStage::Gathering,
        PosterStage::Ready,
        PosterStage::Completed,
        PosterStage::Refining,
    ];

    #[test]
    fn default_stage_is_gathering() {
        assert_eq!(PosterStage::default(), PosterStage::Gathering);
    }

    #[test]
    fn serializes_to_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&PosterStage::Refining).unwrap(),
            "\"REFINING\""
        );
        let stage: PosterStage = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(stage, PosterStage::Completed);
    }

    #[test]
    fn no_stage_is_terminal() {
        for stage in ALL {
            assert!(!stage.is_terminal(), "{:?} should not be terminal", stage);
        }
    }

    #[test]
    fn refining_is_reenterable() {
        assert!(PosterStage::Refining.can_transition_to(&PosterStage::Refining));
    }

    #[test]
    fn cannot_edit_before_first_image() {
        assert!(!PosterStage::Gathering.can_transition_to(&PosterStage::Refining));
        assert!(!PosterStage::Gathering.accepts_edits());
    }

    #[test]
    fn cannot_return_to_gathering_after_completion() {
        assert!(PosterStage::Completed
            .transition_to(PosterStage::Gathering)
            .is_err());
        assert!(PosterStage::Refining
            .transition_to(PosterStage::Gathering)
            .is_err());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for stage in ALL {
            for target in ALL {
                assert_eq!(
                    stage.can_transition_to(&target),
                    stage.valid_transitions().contains(&target),
                    "{:?} -> {:?}",
                    stage,
                    target
                );
            }
        }
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(PosterStage::Gathering.to_string(), "GATHERING");
        assert_eq!(PosterStage::Completed.label(), "Completed");
    }
}
