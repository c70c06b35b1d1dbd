//! Asking the model for fresh title candidates based on a batch's statistics.

use regex::Regex;
use std::sync::OnceLock;

use super::categories::Category;
use super::stats::TitleStats;
use crate::ai::{ChatMessage, ChatRequest, TextGenerator};
use crate::error::GenerationError;

pub const SUGGESTION_SYSTEM_PROMPT: &str = "당신은 SEO 전문가이자 창의적인 카피라이터입니다.";
pub const SUGGESTION_TEMPERATURE: f32 = 0.7;
pub const SUGGESTION_MAX_TOKENS: u32 = 500;

/// Used in place of a keyword when the first title has no words.
pub const FALLBACK_KEYWORD: &str = "새로운 정보";

fn numbered_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.").expect("numbered line pattern is a valid regex"))
}

fn numbering_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s*").expect("numbering prefix is a valid regex"))
}

/// First word of the first title.
pub fn dominant_keyword<S: AsRef<str>>(titles: &[S]) -> String {
    titles
        .first()
        .and_then(|title| title.as_ref().split_whitespace().next())
        .unwrap_or(FALLBACK_KEYWORD)
        .to_string()
}

/// Summary of the analysis handed to the model as background.
pub fn context_summary(stats: &TitleStats) -> String {
    let tone = stats
        .tones
        .most_common()
        .map(|t| t.label())
        .unwrap_or_default();
    let pattern = stats
        .patterns
        .most_common()
        .map(|p| p.label())
        .unwrap_or_default();
    let keywords = stats.vocabulary.keywords().join(", ");

    format!(
        "이전 블로그 제목들의 분석 결과는 다음과 같습니다:\n\
         - 구조적 특징: 평균 길이 {:.1}자, {tone} 어투가 흔함.\n\
         - 핵심 키워드/표현: '{keywords}' 등이 자주 사용됨.\n\
         - 패턴: {pattern} 패턴이 흔함 (예: 리스트형, 질문형, 정보가이드형).\n\
         - 관심 유도 기법: 숫자 활용, 가치/감성적 표현, 호기심 자극, 타겟 명확화 등이 효과적.\n\
         - SEO 특징: 키워드 전면 배치, 검색 의도 반영 (정보성 위주), 적정 길이 유지가 중요.\n",
        stats.average_length,
    )
}

pub fn suggestion_prompt(stats: &TitleStats, keyword: &str) -> String {
    format!(
        "{}\n\
         위 분석 결과를 참고하여, 기존과 다른 신선한 구조, 패턴, 키워드, SEO 관점을 반영하여 블로그 글 제목 10개를 창의적으로 제안해 주세요.\n\
         제안하는 제목은 기존 제목들의 특징을 활용하되, 더욱 매력적이고 검색 엔진 최적화에 유리하도록 만들어주세요.\n\
         제목의 핵심 키워드는 사용자에게 입력받은 키워드 '{keyword}'를 자연스럽게 포함하거나, 이와 관련된 확장 키워드를 활용해주세요.\n\
         각 제목은 숫자를 포함하거나, 질문형, 가이드형, 감탄형 등 다양한 패턴을 조합하여 작성해 주세요.\n\
         결과는 번호가 매겨진 리스트 형태로만 제공해주세요.",
        context_summary(stats),
    )
}

/// Keep the trimmed lines that start with `N.`, in order. Everything else is dropped.
pub fn parse_numbered_titles(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| numbered_line().is_match(line))
        .map(str::to_string)
        .collect()
}

/// `"3. 강남 맛집"` becomes `"강남 맛집"`.
pub fn strip_numbering(line: &str) -> String {
    numbering_prefix().replace(line.trim(), "").trim().to_string()
}

/// Request ten new titles. The returned lines keep their numbering.
pub async fn suggest_titles<S: AsRef<str>>(
    generator: &dyn TextGenerator,
    model: &str,
    stats: &TitleStats,
    titles: &[S],
) -> Result<Vec<String>, GenerationError> {
    let keyword = dominant_keyword(titles);
    let request = ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SUGGESTION_SYSTEM_PROMPT),
            ChatMessage::user(suggestion_prompt(stats, &keyword)),
        ],
        temperature: SUGGESTION_TEMPERATURE,
        max_tokens: SUGGESTION_MAX_TOKENS,
    };

    let text = generator.complete(&request).await?;
    let suggestions = parse_numbered_titles(&text);
    tracing::info!(
        "Model suggested {} titles for keyword {:?}",
        suggestions.len(),
        keyword
    );
    Ok(suggestions)
}
