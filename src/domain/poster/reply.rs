//! Wire shapes of the model's structured replies.

use serde::{Deserialize, Serialize};

use super::gathered_info::GatheredInfo;

/// Reply to the opening clarification call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartReply {
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub gathered_info: GatheredInfo,
}

impl StartReply {
    /// Questions with blanks removed and whitespace trimmed.
    pub fn clean_questions(&self) -> Vec<String> {
        self.questions
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Reply to a gathering turn. `updatedInfo` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineReply {
    #[serde(default)]
    pub is_ready: bool,
    #[serde(default)]
    pub next_question: Option<String>,
    pub updated_info: GatheredInfo,
}

impl RefineReply {
    pub fn next_question(&self) -> Option<&str> {
        self.next_question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

/// Reply to an edit request. `updatedInfo` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyReply {
    pub updated_info: GatheredInfo,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_reply_tolerates_missing_fields() {
        let reply: StartReply = serde_json::from_str("{}").unwrap();
        assert!(reply.questions.is_empty());
        assert!(reply.gathered_info.is_empty());
    }

    #[test]
    fn start_reply_drops_blank_questions() {
        let reply = StartReply {
            questions: vec!["  What size? ".into(), "".into(), "   ".into()],
            gathered_info: GatheredInfo::default(),
        };
        assert_eq!(reply.clean_questions(), vec!["What size?".to_string()]);
    }

    #[test]
    fn refine_reply_requires_updated_info() {
        let result: Result<RefineReply, _> = serde_json::from_str(r#"{"isReady": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn refine_reply_blank_question_reads_as_none() {
        let reply: RefineReply =
            serde_json::from_str(r#"{"isReady": false, "nextQuestion": "  ", "updatedInfo": {}}"#)
                .unwrap();
        assert_eq!(reply.next_question(), None);
    }

    #[test]
    fn modify_reply_parses_explanation() {
        let reply: ModifyReply = serde_json::from_str(
            r#"{"updatedInfo": {"keyElements": "huge headline"}, "explanation": "Bigger text"}"#,
        )
        .unwrap();
        assert_eq!(reply.updated_info.key_elements(), Some("huge headline"));
        assert_eq!(reply.explanation.as_deref(), Some("Bigger text"));
    }
}
