//! Title analysis: statistics over search result titles, a readable report,
//! and model-suggested replacement titles.

pub mod categories;
pub mod report;
pub mod stats;
pub mod suggest;
pub mod tokenize;

pub use categories::{Category, Pattern, SeoFeature, Tally, Technique, Tone};
pub use report::{AnalysisReport, NO_DATA};
pub use stats::{analyze_titles, TitleStats, Vocabulary};
pub use suggest::{parse_numbered_titles, strip_numbering, suggest_titles};

use crate::ai::TextGenerator;
use crate::error::GenerationError;

/// Everything produced for one batch of titles.
#[derive(Debug)]
pub struct TitleAnalysis {
    /// `None` when there were no titles.
    pub stats: Option<TitleStats>,
    pub report: AnalysisReport,
    /// Numbered candidate lines as returned by the model.
    pub suggestions: Vec<String>,
    /// Why `suggestions` is empty, when the model call did not succeed.
    pub suggestion_error: Option<GenerationError>,
}

impl TitleAnalysis {
    pub fn empty() -> Self {
        Self {
            stats: None,
            report: AnalysisReport::no_data(),
            suggestions: Vec::new(),
            suggestion_error: None,
        }
    }
}

/// Analyze `titles` and ask `generator` for new candidates.
///
/// Empty input short-circuits without touching the generator. A failed or
/// missing generator still yields the statistics and report.
pub async fn analyze(
    titles: &[String],
    generator: Option<&dyn TextGenerator>,
    model: &str,
) -> TitleAnalysis {
    let Some(stats) = analyze_titles(titles) else {
        tracing::debug!("No titles to analyze");
        return TitleAnalysis::empty();
    };

    let report = AnalysisReport::from_stats(&stats);
    tracing::info!(
        "Analyzed {} titles (average length {:.1})",
        stats.title_count,
        stats.average_length
    );

    let (suggestions, suggestion_error) = match generator {
        None => {
            tracing::warn!("Skipping title suggestions: no text generator configured");
            (Vec::new(), Some(GenerationError::NotConfigured))
        }
        Some(generator) => match suggest_titles(generator, model, &stats, titles).await {
            Ok(suggestions) => (suggestions, None),
            Err(e) => {
                tracing::warn!("Title suggestion failed: {}", e);
                (Vec::new(), Some(e))
            }
        },
    };

    TitleAnalysis {
        stats: Some(stats),
        report,
        suggestions,
        suggestion_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::FakeGenerator;

    fn titles(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let generator = FakeGenerator::replying("1. 제목");
        let result = analyze(&[], Some(&generator), "gpt-4o").await;

        assert_eq!(generator.call_count(), 0);
        assert!(result.stats.is_none());
        assert!(result.suggestions.is_empty());
        assert!(result.suggestion_error.is_none());
        assert_eq!(result.report, AnalysisReport::no_data());
        assert_eq!(result.report.seo, NO_DATA);
    }

    #[tokio::test]
    async fn test_analyze_with_suggestions() {
        let generator = FakeGenerator::replying("1. 강남 맛집 BEST 7\n2. 강남 데이트 코스 정리");
        let result = analyze(
            &titles(&["강남 맛집 추천 5가지", "서울 카페 투어"]),
            Some(&generator),
            "gpt-4o",
        )
        .await;

        assert_eq!(generator.call_count(), 1);
        let stats = result.stats.unwrap();
        assert!((stats.average_length - 10.0).abs() < f64::EPSILON);
        assert_eq!(result.suggestions.len(), 2);
        assert!(result.suggestion_error.is_none());
    }

    #[tokio::test]
    async fn test_generator_failure_keeps_statistics() {
        let generator = FakeGenerator::failing(GenerationError::EmptyResponse);
        let result = analyze(&titles(&["강남 맛집"]), Some(&generator), "gpt-4o").await;

        assert!(result.stats.is_some());
        assert_ne!(result.report.structural, NO_DATA);
        assert!(result.suggestions.is_empty());
        assert!(matches!(
            result.suggestion_error,
            Some(GenerationError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_missing_generator() {
        let result = analyze(&titles(&["강남 맛집"]), None, "gpt-4o").await;
        assert!(result.suggestions.is_empty());
        assert!(matches!(
            result.suggestion_error,
            Some(GenerationError::NotConfigured)
        ));
    }
}
