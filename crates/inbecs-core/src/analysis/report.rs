use serde::Serialize;

use super::categories::{Category, SeoFeature, Technique};
use super::stats::TitleStats;

pub const NO_DATA: &str = "분석할 제목이 없습니다.";

/// Human-readable summaries of a [`TitleStats`], one block per analysis area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub structural: String,
    pub keywords: String,
    pub patterns: String,
    pub attention: String,
    pub seo: String,
}

fn join<I: IntoIterator<Item = String>>(items: I) -> String {
    items.into_iter().collect::<Vec<_>>().join(", ")
}

impl AnalysisReport {
    pub fn no_data() -> Self {
        Self {
            structural: NO_DATA.to_string(),
            keywords: NO_DATA.to_string(),
            patterns: NO_DATA.to_string(),
            attention: NO_DATA.to_string(),
            seo: NO_DATA.to_string(),
        }
    }

    pub fn from_stats(stats: &TitleStats) -> Self {
        let structural = format!(
            "- 평균 제목 길이: 약 {:.1}자\n\
             - 문장부호 사용 (상위 3개): {}\n\
             - 어투 분석: {}\n\
             - 전반적으로 간결하거나 핵심 정보를 명확히 제시하는 경향이 있습니다.",
            stats.average_length,
            join(stats.punctuation.iter().take(3).map(|(p, c)| format!("{p}: {c}"))),
            join(stats.tones.ranked().into_iter().map(|(t, c)| format!("{}: {c}개", t.label()))),
        );

        let keywords = format!(
            "- 자주 사용되는 핵심 키워드 (상위 10개): {}\n\
             - 자주 사용되는 표현 (상위 5개): {}",
            join(stats.top_tokens.iter().map(|(w, c)| format!("{w}: {c}"))),
            join(stats.top_bigrams.iter().map(|((a, b), c)| format!("{a} {b}: {c}"))),
        );

        let patterns = format!(
            "- 가장 흔한 패턴: {}\n\
             - 리스트형, 질문형, 정보/가이드형 제목이 정보 전달과 호기심 유발에 많이 활용됩니다.",
            join(
                stats
                    .patterns
                    .ranked()
                    .into_iter()
                    .take(3)
                    .map(|(p, c)| format!("{}: {c}개", p.label()))
            ),
        );

        let t = &stats.techniques;
        let attention = format!(
            "- 숫자 활용 ({}회): 정보의 명확성과 구체성을 제공합니다. (예: '5가지 꿀팁')\n\
             - 가치/감성적 표현 ({}회): 독자의 문제 해결이나 욕구를 자극합니다. (예: '인생템', '효과적인')\n\
             - 긴급성/시의성 ({}회): 지금 읽어야 할 이유를 만들어 클릭을 앞당깁니다. (예: '놓치지 마세요')\n\
             - 호기심 자극 ({}회): 미지의 정보에 대한 궁금증을 유발합니다. (예: '숨겨진 비밀')\n\
             - 타겟 명확화 ({}회): 특정 독자층에게 '이 글은 당신을 위한 것!'임을 어필합니다.",
            t.get(Technique::Numeric),
            t.get(Technique::Emotive),
            t.get(Technique::Urgency),
            t.get(Technique::Curiosity),
            t.get(Technique::Audience),
        );

        let s = &stats.seo;
        let seo = format!(
            "- 키워드 배치: {}개의 제목에서 핵심 키워드가 제목 초반에 배치되어 검색 엔진에 노출될 확률을 높입니다.\n\
             - 검색 의도 반영: 정보성 키워드 ('방법', '추천' 등)를 담은 제목 {}개, 거래성 키워드 ('가격', '비교' 등)를 담은 제목 {}개입니다.\n\
             - 제목 길이: {}개의 제목이 네이버 SEO에 유리한 15~30자 이내의 적정 길이를 유지하고 있습니다.\n\
             - 구체성: 제목에 숫자, 특정 명사 등이 포함되어 검색 사용자의 질문에 대한 구체적인 답변을 암시합니다.",
            s.get(SeoFeature::KeywordFronted),
            s.get(SeoFeature::Informational),
            s.get(SeoFeature::Transactional),
            s.get(SeoFeature::LengthInRange),
        );

        Self {
            structural,
            keywords,
            patterns,
            attention,
            seo,
        }
    }

    /// Blocks paired with their section headings, in display order.
    pub fn sections(&self) -> [(&'static str, &str); 5] {
        [
            ("1. 제목의 구조적 특징", self.structural.as_str()),
            ("2. 자주 사용되는 핵심 키워드와 표현", self.keywords.as_str()),
            ("3. 제목 구성의 패턴", self.patterns.as_str()),
            ("4. 독자의 관심을 끌기 위한 기법", self.attention.as_str()),
            ("5. 제목의 SEO 최적화 특징", self.seo.as_str()),
        ]
    }
}
