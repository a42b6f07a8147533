//! Shared wiring for poster handler tests.

use std::sync::Arc;

use serde_json::json;

use crate::adapters::{
    InMemoryBrandCatalog, InMemoryPosterSessionRepository, MockAIProvider, MockImageGenerator,
};
use crate::application::PosterConversationEngine;
use crate::domain::brand::{BrandColors, BrandContext};
use crate::domain::foundation::{BrandKitId, CommandMetadata, PosterSessionId, UserId};
use crate::domain::poster::{GatheredInfo, GenerationStatus, ImageVersion, PosterSession};
use crate::ports::PosterSessionRepository;

use super::SessionTurnLocks;

pub(crate) struct Fixture {
    pub provider: Arc<MockAIProvider>,
    pub images: Arc<MockImageGenerator>,
    pub repository: Arc<InMemoryPosterSessionRepository>,
    pub brands: Arc<InMemoryBrandCatalog>,
    pub engine: Arc<PosterConversationEngine<MockAIProvider>>,
    pub locks: SessionTurnLocks,
    pub brand: BrandContext,
}

impl Fixture {
    pub fn new(provider: MockAIProvider) -> Self {
        Self::with_images(provider, MockImageGenerator::new())
    }

    pub fn with_images(provider: MockAIProvider, images: MockImageGenerator) -> Self {
        let brand = BrandContext::new(BrandKitId::new(), owner_id(), "Acme Coffee")
            .unwrap()
            .with_tone("warm")
            .with_colors(BrandColors {
                primary: Some("#3b2f2f".into()),
                secondary: Some("#f5f0e1".into()),
                accent: Some("#c0392b".into()),
                palette: Vec::new(),
            });
        let provider = Arc::new(provider);
        Self {
            engine: Arc::new(PosterConversationEngine::new(provider.clone())),
            provider,
            images: Arc::new(images),
            repository: Arc::new(InMemoryPosterSessionRepository::new()),
            brands: Arc::new(InMemoryBrandCatalog::with_brands([brand.clone()])),
            locks: SessionTurnLocks::new(),
            brand,
        }
    }

    pub async fn seed_gathering(&self, info: GatheredInfo) -> PosterSession {
        let session = PosterSession::start(
            PosterSessionId::new(),
            owner_id(),
            *self.brand.id(),
            "Poster for our summer sale",
            info,
        )
        .unwrap();
        self.repository.save(&session).await.unwrap();
        session
    }

    pub async fn seed_completed(&self) -> PosterSession {
        let info = GatheredInfo {
            dimensions: Some("1024x1024".into()),
            message: Some("50% OFF Summer Sale".into()),
            ..Default::default()
        };
        let mut session = PosterSession::start(
            PosterSessionId::new(),
            owner_id(),
            *self.brand.id(),
            "Poster for our summer sale",
            GatheredInfo::default(),
        )
        .unwrap();
        session.record_user_reply("Square, 50% OFF Summer Sale").unwrap();
        session
            .complete_with_first_image(
                info,
                "Marketing poster, v1",
                ImageVersion::new("https://img/v1.png", "Marketing poster, v1", GenerationStatus::Succeeded),
            )
            .unwrap();
        self.repository.save(&session).await.unwrap();
        session
    }

    pub async fn stored(&self, id: &PosterSessionId) -> PosterSession {
        self.repository.find_by_id(id).await.unwrap().unwrap()
    }
}

pub(crate) fn owner_id() -> UserId {
    UserId::new("owner-1").unwrap()
}

pub(crate) fn owner() -> CommandMetadata {
    CommandMetadata::new(owner_id()).with_correlation_id("corr-1").with_source("test")
}

pub(crate) fn stranger() -> CommandMetadata {
    CommandMetadata::new(UserId::new("someone-else").unwrap())
}

pub(crate) fn not_ready(question: &str) -> String {
    json!({ "isReady": false, "nextQuestion": question, "updatedInfo": {} }).to_string()
}
