//! Article generation from a chosen title and the user's prompt template.

use std::sync::Arc;

use crate::ai::{ChatMessage, ChatRequest, TextGenerator};
use crate::analysis::TitleStats;
use crate::config::PromptConfig;
use crate::error::{ContentError, GenerationError, InputError};
use crate::template;

pub const ARTICLE_SYSTEM_PROMPT: &str = "당신은 네이버 블로그 SEO 전문가이자 콘텐츠 마케터입니다. \
주어진 키워드와 가이드라인에 따라 독자의 클릭을 유도하고 검색 엔진에 최적화된 고품질 블로그 포스트를 작성합니다.";
pub const ARTICLE_TEMPERATURE: f32 = 0.8;
pub const ARTICLE_MAX_TOKENS: u32 = 3000;

pub const API_FAILURE_MESSAGE: &str = "AI 글 생성 중 API 오류가 발생했습니다.";
pub const NOT_CONFIGURED_MESSAGE: &str = "OpenAI 클라이언트가 설정되지 않아 글을 생성할 수 없습니다.";

pub const AUDIENCE_BEGINNER: &str = "관련 분야 초보자 및 입문자";
pub const AUDIENCE_EXPERT: &str = "관련 분야 전문가 및 심화 학습자";
pub const AUDIENCE_BUYER: &str = "제품/서비스 구매를 고려하는 소비자";
pub const AUDIENCE_GENERAL: &str = "일반 대중";

const AUDIENCE_RULES: &[(&[&str], &str)] = &[
    (&["초보", "입문"], AUDIENCE_BEGINNER),
    (&["전문가", "고급"], AUDIENCE_EXPERT),
    (&["후기", "내돈내산"], AUDIENCE_BUYER),
];

/// Pick the reader group a title speaks to. The first matching rule wins.
pub fn derive_audience(topic: &str) -> &'static str {
    AUDIENCE_RULES
        .iter()
        .find(|(triggers, _)| triggers.iter().any(|t| topic.contains(t)))
        .map_or(AUDIENCE_GENERAL, |(_, audience)| *audience)
}

/// Outcome of a generation attempt that got as far as the model.
#[derive(Debug)]
pub enum GenerationResult {
    /// Generated markdown, exactly as returned.
    Article(String),
    /// Placeholder text for display plus the underlying failure.
    Failed {
        message: String,
        cause: GenerationError,
    },
}

impl GenerationResult {
    /// Text to show the user: the article or the placeholder.
    pub fn text(&self) -> &str {
        match self {
            GenerationResult::Article(text) => text,
            GenerationResult::Failed { message, .. } => message,
        }
    }

    pub fn is_article(&self) -> bool {
        matches!(self, GenerationResult::Article(_))
    }
}

#[derive(Clone, Default)]
pub struct ContentGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl ContentGenerator {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Draft an article for `topic` using `config`'s template and model.
    ///
    /// An empty topic or unusable template is refused before any remote call.
    /// Remote failures come back as [`GenerationResult::Failed`].
    pub async fn generate(
        &self,
        topic: &str,
        context: Option<&TitleStats>,
        config: &PromptConfig,
    ) -> Result<GenerationResult, ContentError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(InputError::EmptyTitle.into());
        }

        let audience = derive_audience(topic);
        let prompt = template::render(&config.prompt_template, topic, audience)?;

        if let Some(stats) = context {
            tracing::debug!(
                "Generating with analysis context of {} titles",
                stats.title_count
            );
        }

        let Some(generator) = &self.generator else {
            tracing::warn!("Article generation skipped: no text generator configured");
            return Ok(GenerationResult::Failed {
                message: NOT_CONFIGURED_MESSAGE.to_string(),
                cause: GenerationError::NotConfigured,
            });
        };

        let request = ChatRequest {
            model: config.openai_model_name.clone(),
            messages: vec![
                ChatMessage::system(ARTICLE_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ],
            temperature: ARTICLE_TEMPERATURE,
            max_tokens: ARTICLE_MAX_TOKENS,
        };

        tracing::info!(
            "Generating article for {:?} (audience: {}, model: {})",
            topic,
            audience,
            config.openai_model_name
        );

        match generator.complete(&request).await {
            Ok(text) => Ok(GenerationResult::Article(text)),
            Err(e) => {
                tracing::error!("Article generation failed: {}", e);
                Ok(GenerationResult::Failed {
                    message: API_FAILURE_MESSAGE.to_string(),
                    cause: e,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::FakeGenerator;
    use crate::error::TemplateError;

    fn generator_with(fake: &Arc<FakeGenerator>) -> ContentGenerator {
        ContentGenerator::new(Some(fake.clone() as Arc<dyn TextGenerator>))
    }

    #[test]
    fn test_derive_audience_priority() {
        assert_eq!(derive_audience("왕초보 파이썬 입문"), AUDIENCE_BEGINNER);
        assert_eq!(derive_audience("고급 SQL 튜닝"), AUDIENCE_EXPERT);
        assert_eq!(derive_audience("내돈내산 청소기"), AUDIENCE_BUYER);
        assert_eq!(derive_audience("초보 전문가 후기"), AUDIENCE_BEGINNER);
        assert_eq!(derive_audience("전문가 후기"), AUDIENCE_EXPERT);
        assert_eq!(derive_audience("서울 카페"), AUDIENCE_GENERAL);
    }

    #[tokio::test]
    async fn test_generate_renders_template_into_request() {
        let fake = Arc::new(FakeGenerator::replying("# 제목\n\n본문"));
        let config = PromptConfig {
            prompt_template: "키워드={keyword}; 독자={target_audience}; {{예시}}".into(),
            openai_model_name: "gpt-4o-mini".into(),
        };

        let result = generator_with(&fake)
            .generate("  초보 캠핑 준비물 ", None, &config)
            .await
            .unwrap();
        assert!(result.is_article());
        assert_eq!(result.text(), "# 제목\n\n본문");

        let request = fake.last_request().unwrap();
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, ARTICLE_TEMPERATURE);
        assert_eq!(request.max_tokens, ARTICLE_MAX_TOKENS);
        assert_eq!(request.messages[0].content, ARTICLE_SYSTEM_PROMPT);
        assert_eq!(
            request.messages[1].content,
            "키워드=초보 캠핑 준비물; 독자=관련 분야 초보자 및 입문자; {예시}"
        );
    }

    #[tokio::test]
    async fn test_missing_audience_placeholder_blocks_call() {
        let fake = Arc::new(FakeGenerator::replying("unused"));
        let config = PromptConfig {
            prompt_template: "{keyword} 에 대한 글".into(),
            ..PromptConfig::default()
        };

        let err = generator_with(&fake)
            .generate("강남 맛집", None, &config)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ContentError::Template(TemplateError::MissingPlaceholder("target_audience"))
        );
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_topic_is_rejected() {
        let fake = Arc::new(FakeGenerator::replying("unused"));
        let err = generator_with(&fake)
            .generate("   ", None, &PromptConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err, ContentError::Input(InputError::EmptyTitle));
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_becomes_placeholder() {
        let fake = Arc::new(FakeGenerator::failing(GenerationError::Api {
            status: 429,
            message: "Rate limit reached".into(),
        }));

        let result = generator_with(&fake)
            .generate("강남 맛집", None, &PromptConfig::default())
            .await
            .unwrap();
        match result {
            GenerationResult::Failed { message, cause } => {
                assert_eq!(message, API_FAILURE_MESSAGE);
                assert!(matches!(cause, GenerationError::Api { status: 429, .. }));
            }
            other => panic!("Expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_generator() {
        let result = ContentGenerator::default()
            .generate("강남 맛집", None, &PromptConfig::default())
            .await
            .unwrap();
        assert!(!result.is_article());
        assert_eq!(result.text(), NOT_CONFIGURED_MESSAGE);
    }
}
