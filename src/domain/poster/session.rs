//! PosterSession aggregate.
//!
//! A session is one poster-design conversation owned by one user. Handlers
//! load it whole, mutate a working copy through the methods below, and write
//! it back whole; every mutation is checked against the stage machine first
//! so a rejected call leaves the copy untouched.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BrandKitId, PosterSessionId, StateMachine, Timestamp, UserId};

use super::errors::PosterError;
use super::gathered_info::GatheredInfo;
use super::image_version::ImageVersion;
use super::stage::PosterStage;
use super::turn::{questions_asked, ConversationTurn};

/// Poster session aggregate.
///
/// # Invariants
///
/// - `conversation_history` and `image_versions` are append-only
/// - `current_version`, when set, indexes into `image_versions`
/// - `image_versions` is non-empty once the stage is `Completed` or later
/// - `refined_prompt` is set once the stage is `Completed` or later
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterSession {
    id: PosterSessionId,
    user_id: UserId,
    brand_kit_id: BrandKitId,
    initial_description: String,
    stage: PosterStage,
    conversation_history: Vec<ConversationTurn>,
    gathered_info: GatheredInfo,
    refined_prompt: Option<String>,
    image_versions: Vec<ImageVersion>,
    current_version: Option<usize>,
    created_at: Timestamp,
    updated_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl PosterSession {
    /// Creates a session at `Gathering` with the description as first turn.
    ///
    /// # Errors
    ///
    /// - `Validation` if the description is blank
    pub fn start(
        id: PosterSessionId,
        user_id: UserId,
        brand_kit_id: BrandKitId,
        initial_description: impl Into<String>,
        gathered_info: GatheredInfo,
    ) -> Result<Self, PosterError> {
        let initial_description = initial_description.into();
        if initial_description.trim().is_empty() {
            return Err(PosterError::validation("poster description cannot be empty"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            brand_kit_id,
            conversation_history: vec![ConversationTurn::user(initial_description.clone())],
            initial_description,
            stage: PosterStage::Gathering,
            gathered_info,
            refined_prompt: None,
            image_versions: Vec::new(),
            current_version: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PosterSessionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn brand_kit_id(&self) -> &BrandKitId {
        &self.brand_kit_id
    }

    pub fn initial_description(&self) -> &str {
        &self.initial_description
    }

    pub fn stage(&self) -> PosterStage {
        self.stage
    }

    pub fn conversation_history(&self) -> &[ConversationTurn] {
        &self.conversation_history
    }

    pub fn gathered_info(&self) -> &GatheredInfo {
        &self.gathered_info
    }

    pub fn refined_prompt(&self) -> Option<&str> {
        self.refined_prompt.as_deref()
    }

    pub fn image_versions(&self) -> &[ImageVersion] {
        &self.image_versions
    }

    /// Index of the version the user is looking at.
    pub fn current_version_index(&self) -> Option<usize> {
        self.current_version
    }

    pub fn current_version(&self) -> Option<&ImageVersion> {
        self.current_version.and_then(|i| self.image_versions.get(i))
    }

    /// Number of clarification questions asked so far.
    pub fn questions_asked(&self) -> usize {
        questions_asked(&self.conversation_history)
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the user owns this session.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Authorizes a user to access this session.
    pub fn authorize(&self, user_id: &UserId) -> Result<(), PosterError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(PosterError::Forbidden)
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Gathering
    // ─────────────────────────────────────────────────────────────────────────

    /// Fails unless the session is still collecting requirements.
    pub fn ensure_gathering(&self) -> Result<(), PosterError> {
        if self.stage.is_gathering() {
            Ok(())
        } else {
            Err(PosterError::state(format!(
                "session is {}; replies are only accepted while gathering",
                self.stage
            )))
        }
    }

    /// Appends a user reply while gathering.
    pub fn record_user_reply(&mut self, content: impl Into<String>) -> Result<(), PosterError> {
        self.ensure_gathering()?;
        self.conversation_history.push(ConversationTurn::user(content));
        self.touch();
        Ok(())
    }

    /// Stores the updated info and the next clarification question.
    pub fn record_question(
        &mut self,
        question: impl Into<String>,
        updated_info: GatheredInfo,
    ) -> Result<(), PosterError> {
        self.advance(PosterStage::Gathering)?;
        self.gathered_info = updated_info;
        self.conversation_history.push(ConversationTurn::assistant(question));
        self.touch();
        Ok(())
    }

    /// Records the first generated image and moves to `Completed`.
    pub fn complete_with_first_image(
        &mut self,
        updated_info: GatheredInfo,
        refined_prompt: impl Into<String>,
        version: ImageVersion,
    ) -> Result<(), PosterError> {
        self.advance(PosterStage::Completed)?;
        self.gathered_info = updated_info;
        self.refined_prompt = Some(refined_prompt.into());
        self.push_version(version);
        self.completed_at = Some(Timestamp::now());
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Refinement
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the prompt an edit would start from.
    ///
    /// # Errors
    ///
    /// - `State` if no image exists yet
    pub fn editable_prompt(&self) -> Result<&str, PosterError> {
        if !self.stage.accepts_edits() {
            return Err(PosterError::state(format!(
                "session is {}; edits require a generated poster",
                self.stage
            )));
        }
        self.refined_prompt
            .as_deref()
            .ok_or_else(|| PosterError::state("no existing prompt to refine"))
    }

    /// Records an applied edit: the request, the explanation, the new info
    /// and prompt, and exactly one new image version.
    pub fn apply_refinement(
        &mut self,
        edit_request: impl Into<String>,
        explanation: impl Into<String>,
        updated_info: GatheredInfo,
        updated_prompt: impl Into<String>,
        version: ImageVersion,
    ) -> Result<(), PosterError> {
        self.editable_prompt()?;
        self.advance(PosterStage::Refining)?;
        self.conversation_history.push(ConversationTurn::user(edit_request));
        self.conversation_history.push(ConversationTurn::assistant(explanation));
        self.gathered_info = updated_info;
        self.refined_prompt = Some(updated_prompt.into());
        self.push_version(version);
        self.touch();
        Ok(())
    }

    /// Points the current-version cursor at an existing version.
    ///
    /// # Errors
    ///
    /// - `Validation` if `index` is out of range
    pub fn select_version(&mut self, index: usize) -> Result<&ImageVersion, PosterError> {
        if index >= self.image_versions.len() {
            return Err(PosterError::validation(format!(
                "image version {} does not exist ({} available)",
                index,
                self.image_versions.len()
            )));
        }
        self.current_version = Some(index);
        self.touch();
        Ok(&self.image_versions[index])
    }

    fn advance(&mut self, target: PosterStage) -> Result<(), PosterError> {
        self.stage = self
            .stage
            .transition_to(target)
            .map_err(|e| PosterError::state(e.to_string()))?;
        Ok(())
    }

    fn push_version(&mut self, version: ImageVersion) {
        self.image_versions.push(version);
        self.current_version = Some(self.image_versions.len() - 1);
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::poster::image_version::GenerationStatus;
    use crate::domain::poster::turn::TurnRole;

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn new_session() -> PosterSession {
        PosterSession::start(
            PosterSessionId::new(),
            owner(),
            BrandKitId::new(),
            "I need a summer sale poster",
            GatheredInfo::default(),
        )
        .unwrap()
    }

    fn version(url: &str) -> ImageVersion {
        ImageVersion::new(url, format!("prompt for {}", url), GenerationStatus::Succeeded)
    }

    fn completed_session() -> PosterSession {
        let mut session = new_session();
        session
            .complete_with_first_image(GatheredInfo::default(), "first prompt", version("v0"))
            .unwrap();
        session
    }

    #[test]
    fn start_records_description_as_first_user_turn() {
        let session = new_session();
        assert_eq!(session.stage(), PosterStage::Gathering);
        assert_eq!(session.conversation_history().len(), 1);
        assert_eq!(session.conversation_history()[0].role, TurnRole::User);
        assert_eq!(session.questions_asked(), 0);
        assert!(session.current_version().is_none());
    }

    #[test]
    fn start_rejects_blank_description() {
        let result = PosterSession::start(
            PosterSessionId::new(),
            owner(),
            BrandKitId::new(),
            "   ",
            GatheredInfo::default(),
        );
        assert!(matches!(result, Err(PosterError::Validation(_))));
    }

    #[test]
    fn authorize_rejects_other_users() {
        let session = new_session();
        assert!(session.authorize(&owner()).is_ok());
        assert!(matches!(
            session.authorize(&UserId::new("intruder").unwrap()),
            Err(PosterError::Forbidden)
        ));
    }

    #[test]
    fn record_question_counts_towards_questions_asked() {
        let mut session = new_session();
        session.record_user_reply("square please").unwrap();
        session
            .record_question("What headline?", GatheredInfo::default())
            .unwrap();

        assert_eq!(session.questions_asked(), 1);
        assert_eq!(session.stage(), PosterStage::Gathering);
    }

    #[test]
    fn completing_sets_prompt_and_first_version() {
        let session = completed_session();
        assert_eq!(session.stage(), PosterStage::Completed);
        assert_eq!(session.refined_prompt(), Some("first prompt"));
        assert_eq!(session.current_version_index(), Some(0));
        assert!(session.completed_at().is_some());
    }

    #[test]
    fn replies_are_rejected_after_completion() {
        let mut session = completed_session();
        assert!(matches!(
            session.record_user_reply("more"),
            Err(PosterError::State(_))
        ));
    }

    #[test]
    fn refinement_before_first_image_is_a_state_error() {
        let mut session = new_session();
        let before = session.clone();

        let result = session.apply_refinement(
            "make it blue",
            "done",
            GatheredInfo::default(),
            "prompt",
            version("v1"),
        );

        assert!(matches!(result, Err(PosterError::State(_))));
        assert_eq!(session, before);
    }

    #[test]
    fn refinement_appends_exactly_one_version_and_keeps_prior_ones() {
        let mut session = completed_session();
        let prior = session.image_versions().to_vec();

        session
            .apply_refinement(
                "bigger text",
                "Enlarged the headline",
                GatheredInfo::default(),
                "second prompt",
                version("v1"),
            )
            .unwrap();

        assert_eq!(session.stage(), PosterStage::Refining);
        assert_eq!(session.image_versions().len(), prior.len() + 1);
        assert_eq!(&session.image_versions()[..prior.len()], prior.as_slice());
        assert_eq!(session.current_version_index(), Some(1));
        assert_eq!(session.refined_prompt(), Some("second prompt"));
    }

    #[test]
    fn refining_is_reenterable() {
        let mut session = completed_session();
        for i in 1..=3 {
            session
                .apply_refinement(
                    "again",
                    "ok",
                    GatheredInfo::default(),
                    format!("p{}", i),
                    version(&format!("v{}", i)),
                )
                .unwrap();
        }
        assert_eq!(session.image_versions().len(), 4);
        assert_eq!(session.stage(), PosterStage::Refining);
    }

    #[test]
    fn select_version_moves_cursor_even_for_identical_urls() {
        let mut session = completed_session();
        session
            .apply_refinement("again", "ok", GatheredInfo::default(), "p1", version("v0"))
            .unwrap();

        session.select_version(0).unwrap();
        assert_eq!(session.current_version_index(), Some(0));
    }

    #[test]
    fn select_version_rejects_out_of_range_index() {
        let mut session = completed_session();
        assert!(matches!(
            session.select_version(5),
            Err(PosterError::Validation(_))
        ));
        assert_eq!(session.current_version_index(), Some(0));
    }

    #[test]
    fn serde_roundtrip_preserves_session() {
        let session = completed_session();
        let json = serde_json::to_string(&session).unwrap();
        let back: PosterSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
