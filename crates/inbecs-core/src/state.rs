//! UI-agnostic session state
//!
//! One `Session` lives for the whole run of a front end. Handlers feed it the
//! outcome of each step (search, analysis, generation) and it keeps the
//! selection, the generated article and user-facing notices consistent. It
//! never performs I/O itself.

use std::collections::HashSet;

use crate::analysis::{strip_numbering, AnalysisReport, TitleAnalysis, TitleStats};
use crate::error::{ContentError, GenerationError, InputError, SearchError};
use crate::export::default_filename;
use crate::generator::GenerationResult;
use crate::search::{clamp_display, Post, DEFAULT_DISPLAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message for the user about something that just happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// A validated search to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keyword: String,
    pub count: u32,
}

#[derive(Debug)]
pub struct Session {
    keyword: String,
    display_count: u32,
    posts: Vec<Post>,
    analysis: Option<TitleAnalysis>,
    selected_title: Option<String>,
    generation_pending: bool,
    generated: Option<GenerationResult>,
    generated_titles: HashSet<String>,
    notices: Vec<Notice>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            display_count: DEFAULT_DISPLAY,
            posts: Vec::new(),
            analysis: None,
            selected_title: None,
            generation_pending: false,
            generated: None,
            generated_titles: HashSet::new(),
            notices: Vec::new(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn display_count(&self) -> u32 {
        self.display_count
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn analysis(&self) -> Option<&TitleAnalysis> {
        self.analysis.as_ref()
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.analysis.as_ref().map(|a| &a.report)
    }

    pub fn stats(&self) -> Option<&TitleStats> {
        self.analysis.as_ref().and_then(|a| a.stats.as_ref())
    }

    /// Suggested titles with their numbering, as the model returned them.
    pub fn suggestions(&self) -> &[String] {
        self.analysis
            .as_ref()
            .map(|a| a.suggestions.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.selected_title.as_deref()
    }

    pub fn is_generation_pending(&self) -> bool {
        self.generation_pending
    }

    pub fn generated(&self) -> Option<&GenerationResult> {
        self.generated.as_ref()
    }

    /// The generated article, if the last generation succeeded.
    pub fn article(&self) -> Option<&str> {
        match &self.generated {
            Some(GenerationResult::Article(text)) => Some(text),
            _ => None,
        }
    }

    pub fn is_generated(&self, title: &str) -> bool {
        self.generated_titles.contains(strip_numbering(title).as_str())
    }

    /// Validate a new search and reset everything derived from the previous one.
    pub fn begin_search(&mut self, keyword: &str, count: u32) -> Result<SearchRequest, InputError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.push_notice(NoticeLevel::Warning, InputError::EmptyKeyword.to_string());
            return Err(InputError::EmptyKeyword);
        }

        self.keyword = keyword.to_string();
        self.display_count = clamp_display(count);
        self.posts.clear();
        self.analysis = None;
        self.selected_title = None;
        self.generation_pending = false;
        self.generated = None;
        self.generated_titles.clear();

        Ok(SearchRequest {
            keyword: self.keyword.clone(),
            count: self.display_count,
        })
    }

    /// Store search results and return the titles to analyze.
    ///
    /// A failed search becomes an empty result list plus an error notice.
    pub fn finish_search(&mut self, result: Result<Vec<Post>, SearchError>) -> Vec<String> {
        self.posts = match result {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!("Search for {:?} failed: {}", self.keyword, e);
                self.push_notice(
                    NoticeLevel::Error,
                    format!("네이버 블로그 검색 중 오류 발생: {e}"),
                );
                Vec::new()
            }
        };

        if self.posts.is_empty() {
            self.push_notice(
                NoticeLevel::Warning,
                "네이버 블로그 검색 결과가 없거나 오류가 발생했습니다. 키워드를 변경하여 다시 시도해 주세요.",
            );
        } else {
            self.push_notice(
                NoticeLevel::Info,
                format!("총 {}개 포스트를 찾았습니다.", self.posts.len()),
            );
        }

        self.posts.iter().map(|p| p.title.clone()).collect()
    }

    pub fn finish_analysis(&mut self, analysis: TitleAnalysis) {
        match &analysis.suggestion_error {
            Some(GenerationError::NotConfigured) => self.push_notice(
                NoticeLevel::Warning,
                "OpenAI 클라이언트가 초기화되지 않아 AI 제목 생성을 건너뜁니다. API 키를 확인해주세요.",
            ),
            Some(e) => self.push_notice(
                NoticeLevel::Error,
                format!("AI 제목 생성 중 오류 발생: {e}"),
            ),
            None if analysis.stats.is_some() && analysis.suggestions.is_empty() => self.push_notice(
                NoticeLevel::Warning,
                "새로운 제목을 생성하는 데 실패했습니다. 다시 검색해 주세요.",
            ),
            None => {}
        }
        self.analysis = Some(analysis);
    }

    /// Choose the suggestion at `index` for generation. Returns the title without numbering.
    pub fn select_suggestion(&mut self, index: usize) -> Option<String> {
        let title = strip_numbering(self.suggestions().get(index)?);
        if title.is_empty() {
            return None;
        }
        self.start_generation(title.clone());
        Some(title)
    }

    /// Choose a title typed by the user for generation.
    pub fn select_manual(&mut self, title: &str) -> Result<String, InputError> {
        let title = title.trim();
        if title.is_empty() {
            self.push_notice(NoticeLevel::Warning, InputError::EmptyTitle.to_string());
            return Err(InputError::EmptyTitle);
        }
        self.start_generation(title.to_string());
        Ok(title.to_string())
    }

    fn start_generation(&mut self, title: String) {
        self.selected_title = Some(title);
        self.generated = None;
        self.generation_pending = true;
    }

    /// Record a generation outcome. Only a successful article marks the title as generated.
    pub fn finish_generation(&mut self, result: Result<GenerationResult, ContentError>) {
        self.generation_pending = false;
        match result {
            Ok(GenerationResult::Article(text)) => {
                if let Some(title) = &self.selected_title {
                    self.generated_titles.insert(title.clone());
                }
                self.generated = Some(GenerationResult::Article(text));
            }
            Ok(GenerationResult::Failed { message, cause }) => {
                self.push_notice(NoticeLevel::Error, format!("AI 글 생성 중 오류 발생: {cause}"));
                self.generated = Some(GenerationResult::Failed { message, cause });
            }
            Err(ContentError::Template(e)) => {
                self.push_notice(NoticeLevel::Error, format!("프롬프트 템플릿 오류: {e}"));
                self.generated = None;
            }
            Err(ContentError::Input(e)) => {
                self.push_notice(NoticeLevel::Warning, e.to_string());
                self.generated = None;
            }
        }
    }

    /// Drop the generated article and the selection. Generated markers are kept.
    pub fn clear_generated(&mut self) {
        if self.generated.take().is_some() {
            self.push_notice(NoticeLevel::Info, "생성된 블로그 글이 화면에서 삭제되었습니다.");
        }
        self.selected_title = None;
    }

    pub fn download_filename(&self) -> String {
        default_filename(self.selected_title.as_deref())
    }

    pub fn push_notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;
    use url::Url;

    fn post(title: &str) -> Post {
        Post {
            title: title.into(),
            link: Url::parse("https://blog.naver.com/a/1").unwrap(),
            summary: String::new(),
        }
    }

    fn analysis_with(suggestions: &[&str]) -> TitleAnalysis {
        let titles = vec!["강남 맛집 추천".to_string()];
        TitleAnalysis {
            stats: crate::analysis::analyze_titles(&titles),
            report: AnalysisReport::no_data(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            suggestion_error: None,
        }
    }

    #[test]
    fn test_begin_search_validates_and_clamps() {
        let mut session = Session::new();
        assert_eq!(session.display_count(), DEFAULT_DISPLAY);

        assert_eq!(
            session.begin_search("   ", 10),
            Err(InputError::EmptyKeyword)
        );
        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);

        let request = session.begin_search(" 강남 맛집 ", 0).unwrap();
        assert_eq!(request.keyword, "강남 맛집");
        assert_eq!(request.count, 1);
        assert_eq!(session.keyword(), "강남 맛집");
    }

    #[test]
    fn test_begin_search_resets_previous_results() {
        let mut session = Session::new();
        session.begin_search("강남", 30).unwrap();
        session.finish_search(Ok(vec![post("강남 맛집")]));
        session.finish_analysis(analysis_with(&["1. 강남 맛집 TOP 5"]));
        session.select_suggestion(0).unwrap();
        session.finish_generation(Ok(GenerationResult::Article("본문".into())));
        assert!(session.is_generated("강남 맛집 TOP 5"));

        session.begin_search("서울", 30).unwrap();
        assert!(session.posts().is_empty());
        assert!(session.analysis().is_none());
        assert!(session.selected_title().is_none());
        assert!(session.generated().is_none());
        assert!(!session.is_generated("강남 맛집 TOP 5"));
    }

    #[test]
    fn test_failed_search_recovers_to_empty() {
        let mut session = Session::new();
        session.begin_search("강남", 30).unwrap();
        let titles = session.finish_search(Err(SearchError::MissingCredentials));

        assert!(titles.is_empty());
        assert!(session.posts().is_empty());
        let notices = session.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.contains("검색 중 오류"));
    }

    #[test]
    fn test_finish_search_returns_titles() {
        let mut session = Session::new();
        session.begin_search("강남", 30).unwrap();
        let titles = session.finish_search(Ok(vec![post("가"), post("나")]));
        assert_eq!(titles, vec!["가", "나"]);
        assert_eq!(session.posts().len(), 2);
    }

    #[test]
    fn test_select_suggestion_strips_numbering() {
        let mut session = Session::new();
        session.finish_analysis(analysis_with(&["1. 강남 맛집 TOP 5", "2. 강남 카페"]));

        assert_eq!(session.select_suggestion(1).as_deref(), Some("강남 카페"));
        assert_eq!(session.selected_title(), Some("강남 카페"));
        assert!(session.is_generation_pending());
        assert!(session.select_suggestion(5).is_none());
    }

    #[test]
    fn test_select_manual_rejects_empty() {
        let mut session = Session::new();
        assert_eq!(session.select_manual("  "), Err(InputError::EmptyTitle));
        assert!(!session.is_generation_pending());
        assert_eq!(session.select_manual(" 나만의 제목 ").unwrap(), "나만의 제목");
        assert!(session.is_generation_pending());
    }

    #[test]
    fn test_only_successful_generation_marks_title() {
        let mut session = Session::new();
        session.select_manual("실패할 제목").unwrap();
        session.finish_generation(Ok(GenerationResult::Failed {
            message: "AI 글 생성 중 API 오류가 발생했습니다.".into(),
            cause: GenerationError::EmptyResponse,
        }));
        assert!(!session.is_generation_pending());
        assert!(!session.is_generated("실패할 제목"));
        assert!(session.article().is_none());
        assert!(session.generated().is_some());

        session.select_manual("성공할 제목").unwrap();
        session.finish_generation(Ok(GenerationResult::Article("# 본문".into())));
        assert!(session.is_generated("성공할 제목"));
        assert!(session.is_generated("3. 성공할 제목"));
        assert_eq!(session.article(), Some("# 본문"));
    }

    #[test]
    fn test_template_error_surfaces_as_notice() {
        let mut session = Session::new();
        session.select_manual("제목").unwrap();
        session.take_notices();
        session.finish_generation(Err(ContentError::Template(
            TemplateError::MissingPlaceholder("target_audience"),
        )));

        assert!(session.generated().is_none());
        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.contains("{target_audience}"));
    }

    #[test]
    fn test_clear_generated_keeps_markers() {
        let mut session = Session::new();
        session.select_manual("강남 맛집: 숨겨진 맛!").unwrap();
        assert_eq!(session.download_filename(), "강남_맛집_숨겨진_맛.md");
        session.finish_generation(Ok(GenerationResult::Article("본문".into())));

        session.clear_generated();
        assert!(session.generated().is_none());
        assert!(session.selected_title().is_none());
        assert!(session.is_generated("강남 맛집: 숨겨진 맛!"));
        assert_eq!(session.download_filename(), "블로그_글.md");
    }

    #[test]
    fn test_missing_generator_notice() {
        let mut session = Session::new();
        let mut analysis = analysis_with(&[]);
        analysis.suggestion_error = Some(GenerationError::NotConfigured);
        session.finish_analysis(analysis);

        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.contains("API 키"));
        assert!(session.take_notices().is_empty());
    }
}
