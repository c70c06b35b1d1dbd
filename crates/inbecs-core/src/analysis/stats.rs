//! Deterministic statistics over a batch of blog titles.
//!
//! Two passes: the first builds frequency tables and freezes the top
//! keywords into a [`Vocabulary`]; the second classifies every title against
//! that frozen snapshot.

use regex::Regex;
use std::sync::OnceLock;

use super::categories::{Pattern, SeoFeature, Tally, Technique, Tone};
use super::tokenize::{bigrams, keyword_tokens, FrequencyTable};

pub const TOP_TOKEN_COUNT: usize = 10;
pub const TOP_BIGRAM_COUNT: usize = 5;
pub const VOCABULARY_SIZE: usize = 5;

/// Inclusive character-length window favoured by Naver search.
pub const SEO_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 15..=30;

const PUNCTUATION: &[char] = &['?', '!', '.'];

const QUESTION_TRIGGERS: &[&str] = &["?", "무엇일까", "어떻게", "방법은"];
const REVIEW_TRIGGERS: &[&str] = &["후기", "내돈내산", "경험", "솔직"];
const GUIDE_TRIGGERS: &[&str] = &["꿀팁", "필수템", "정리", "완벽가이드"];
const EXCLAMATORY_TRIGGERS: &[&str] = &["!", "놀라운", "최고의", "강력추천"];

const EMOTIVE_WORDS: &[&str] = &["꿀팁", "필수", "진짜", "놀라운", "효과적인", "인생템"];
const URGENCY_WORDS: &[&str] = &["지금", "즉시", "놓치지"];
const CURIOSITY_WORDS: &[&str] = &["비밀", "숨겨진", "궁금증", "파헤치기"];
const AUDIENCE_WORDS: &[&str] = &["초보", "초보자", "왕초보", "완전정복"];

const INFORMATIONAL_WORDS: &[&str] = &["방법", "추천", "종류", "정리", "가이드"];
const TRANSACTIONAL_WORDS: &[&str] = &["가격", "구매", "최저가", "비교"];

fn list_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\d+(?:가지|개|방법|단계|팁)|TOP\s*\d+|(?:베스트|best)\s*\d+")
            .expect("list pattern is a valid regex")
    })
}

fn digit() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d").expect("digit pattern is a valid regex"))
}

fn contains_any(title: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| title.contains(needle))
}

/// The most frequent keyword tokens of one batch, frozen after the counting pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    keywords: Vec<String>,
}

impl Vocabulary {
    pub fn from_frequencies(tokens: &FrequencyTable<String>) -> Self {
        Self {
            keywords: tokens
                .most_common(VOCABULARY_SIZE)
                .into_iter()
                .map(|(token, _)| token)
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when any frozen keyword occurs anywhere in `text`.
    pub fn appears_in(&self, text: &str) -> bool {
        self.keywords.iter().any(|kw| text.contains(kw.as_str()))
    }

    /// True when the title's first whitespace-separated word contains a keyword.
    pub fn fronts(&self, title: &str) -> bool {
        title
            .split_whitespace()
            .next()
            .is_some_and(|first| self.appears_in(first))
    }
}

pub fn tone_of(title: &str) -> Tone {
    if title.contains('?') {
        Tone::Question
    } else if title.contains('!') {
        Tone::Exclamation
    } else {
        Tone::Declarative
    }
}

/// Composition patterns of one title. Exactly one of keyword-led/generic is always present.
pub fn patterns_of(title: &str, vocabulary: &Vocabulary) -> Vec<Pattern> {
    let mut found = Vec::new();
    if list_pattern().is_match(title) {
        found.push(Pattern::ListRanking);
    }
    if contains_any(title, QUESTION_TRIGGERS) {
        found.push(Pattern::Question);
    }
    if contains_any(title, REVIEW_TRIGGERS) {
        found.push(Pattern::Review);
    }
    if contains_any(title, GUIDE_TRIGGERS) {
        found.push(Pattern::Guide);
    }
    if contains_any(title, EXCLAMATORY_TRIGGERS) {
        found.push(Pattern::Exclamatory);
    }
    found.push(if vocabulary.appears_in(title) {
        Pattern::KeywordLed
    } else {
        Pattern::Generic
    });
    found
}

pub fn techniques_of(title: &str) -> Vec<Technique> {
    let checks = [
        (Technique::Numeric, digit().is_match(title)),
        (Technique::Emotive, contains_any(title, EMOTIVE_WORDS)),
        (Technique::Urgency, contains_any(title, URGENCY_WORDS)),
        (Technique::Curiosity, contains_any(title, CURIOSITY_WORDS)),
        (Technique::Audience, contains_any(title, AUDIENCE_WORDS)),
    ];
    checks
        .into_iter()
        .filter_map(|(technique, hit)| hit.then_some(technique))
        .collect()
}

pub fn seo_features_of(title: &str, vocabulary: &Vocabulary) -> Vec<SeoFeature> {
    let checks = [
        (SeoFeature::KeywordFronted, vocabulary.fronts(title)),
        (
            SeoFeature::LengthInRange,
            SEO_LENGTH_RANGE.contains(&title.chars().count()),
        ),
        (
            SeoFeature::Informational,
            contains_any(title, INFORMATIONAL_WORDS),
        ),
        (
            SeoFeature::Transactional,
            contains_any(title, TRANSACTIONAL_WORDS),
        ),
    ];
    checks
        .into_iter()
        .filter_map(|(feature, hit)| hit.then_some(feature))
        .collect()
}

/// Aggregate counts for a non-empty batch of titles.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleStats {
    pub title_count: usize,
    /// Mean length in characters.
    pub average_length: f64,
    /// Counts of `?`, `!` and `.`, most frequent first.
    pub punctuation: Vec<(char, usize)>,
    pub tones: Tally<Tone>,
    pub top_tokens: Vec<(String, usize)>,
    pub top_bigrams: Vec<((String, String), usize)>,
    pub vocabulary: Vocabulary,
    pub patterns: Tally<Pattern>,
    pub techniques: Tally<Technique>,
    pub seo: Tally<SeoFeature>,
}

/// Compute statistics for `titles`, or `None` when there is nothing to analyze.
pub fn analyze_titles<S: AsRef<str>>(titles: &[S]) -> Option<TitleStats> {
    if titles.is_empty() {
        return None;
    }

    // Pass one: frequency tables.
    let mut total_length = 0usize;
    let mut punctuation = FrequencyTable::new();
    let mut tones = Tally::new();
    let mut tokens = FrequencyTable::new();
    let mut pairs = FrequencyTable::new();

    for title in titles.iter().map(AsRef::as_ref) {
        total_length += title.chars().count();
        for c in title.chars().filter(|c| PUNCTUATION.contains(c)) {
            punctuation.add(c);
        }
        tones.bump(tone_of(title));
        for token in keyword_tokens(title) {
            tokens.add(token);
        }
        for pair in bigrams(title) {
            pairs.add(pair);
        }
    }

    let vocabulary = Vocabulary::from_frequencies(&tokens);

    // Pass two: classification against the frozen vocabulary.
    let mut patterns = Tally::new();
    let mut techniques = Tally::new();
    let mut seo = Tally::new();

    for title in titles.iter().map(AsRef::as_ref) {
        for pattern in patterns_of(title, &vocabulary) {
            patterns.bump(pattern);
        }
        for technique in techniques_of(title) {
            techniques.bump(technique);
        }
        for feature in seo_features_of(title, &vocabulary) {
            seo.bump(feature);
        }
    }

    Some(TitleStats {
        title_count: titles.len(),
        average_length: total_length as f64 / titles.len() as f64,
        punctuation: punctuation.most_common(PUNCTUATION.len()),
        tones,
        top_tokens: tokens.most_common(TOP_TOKEN_COUNT),
        top_bigrams: pairs.most_common(TOP_BIGRAM_COUNT),
        vocabulary,
        patterns,
        techniques,
        seo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::categories::Category;

    fn vocab(words: &[&str]) -> Vocabulary {
        Vocabulary {
            keywords: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_input() {
        let titles: [&str; 0] = [];
        assert!(analyze_titles(&titles).is_none());
    }

    #[test]
    fn test_average_length_counts_characters() {
        let stats = analyze_titles(&["강남 맛집 추천 5가지", "서울 카페 투어"]).unwrap();
        assert_eq!(stats.title_count, 2);
        assert!((stats.average_length - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_question_beats_exclamation() {
        assert_eq!(tone_of("이게 정말 효과 있을까?!"), Tone::Question);
        assert_eq!(tone_of("대박 맛집!"), Tone::Exclamation);
        assert_eq!(tone_of("서울 카페 투어"), Tone::Declarative);
    }

    #[test]
    fn test_tone_tally_sums_to_title_count() {
        let titles = [
            "이게 정말 효과 있을까?!",
            "대박 맛집!",
            "서울 카페 투어",
            "어디로 갈까?",
            "",
        ];
        let stats = analyze_titles(&titles).unwrap();
        assert_eq!(stats.tones.total(), titles.len());
        assert_eq!(stats.tones.get(Tone::Question), 2);
        assert_eq!(stats.tones.get(Tone::Exclamation), 1);
        assert_eq!(stats.tones.get(Tone::Declarative), 2);
    }

    #[test]
    fn test_tallies_are_bounded_by_title_count() {
        let titles = [
            "강남 맛집 TOP 10 추천! 지금 놓치지 마세요",
            "초보자를 위한 강남 맛집 완벽가이드 정리",
            "내돈내산 강남 맛집 솔직 후기, 가격 비교",
            "숨겨진 강남 맛집 비밀 3가지는 무엇일까?",
        ];
        let stats = analyze_titles(&titles).unwrap();
        for p in Pattern::ALL {
            assert!(stats.patterns.get(*p) <= titles.len());
        }
        for t in Technique::ALL {
            assert!(stats.techniques.get(*t) <= titles.len());
        }
        for f in SeoFeature::ALL {
            assert!(stats.seo.get(*f) <= titles.len());
        }
        assert_eq!(
            stats.patterns.get(Pattern::KeywordLed) + stats.patterns.get(Pattern::Generic),
            titles.len()
        );
    }

    #[test]
    fn test_top_tokens_and_vocabulary() {
        let titles = ["강남 맛집 추천", "강남 카페 추천", "강남 맛집 TOP 10"];
        let stats = analyze_titles(&titles).unwrap();

        assert_eq!(stats.top_tokens[0], ("강남".to_string(), 3));
        assert_eq!(stats.top_tokens[1], ("맛집".to_string(), 2));
        assert_eq!(stats.top_tokens[2], ("추천".to_string(), 2));
        assert_eq!(
            stats.vocabulary.keywords(),
            &["강남", "맛집", "추천", "카페", "TOP"]
        );
        assert_eq!(
            stats.top_bigrams[0],
            (("강남".to_string(), "맛집".to_string()), 2)
        );
    }

    #[test]
    fn test_punctuation_ranked() {
        let stats = analyze_titles(&["와! 정말?", "대박!! 진짜.", "끝."]).unwrap();
        assert_eq!(stats.punctuation, vec![('!', 3), ('.', 2), ('?', 1)]);
    }

    #[test]
    fn test_list_pattern_triggers() {
        let v = Vocabulary::default();
        for title in ["맛집 5가지", "10개 모음", "TOP10 카페", "top 3 리스트", "베스트 7", "Best5 추천", "3단계 정리"] {
            assert!(
                patterns_of(title, &v).contains(&Pattern::ListRanking),
                "{title} should be a list title"
            );
        }
        for title in ["2024년 여행", "카페 투어"] {
            assert!(!patterns_of(title, &v).contains(&Pattern::ListRanking));
        }
    }

    #[test]
    fn test_patterns_are_multi_label() {
        let v = vocab(&["맛집"]);
        let found = patterns_of("맛집 솔직 후기 어떻게 고를까? 강력추천!", &v);
        assert_eq!(
            found,
            vec![
                Pattern::Question,
                Pattern::Review,
                Pattern::Exclamatory,
                Pattern::KeywordLed
            ]
        );
        assert_eq!(patterns_of("카페 투어", &v), vec![Pattern::Generic]);
    }

    #[test]
    fn test_techniques() {
        assert_eq!(
            techniques_of("지금 확인하는 숨겨진 꿀팁 5가지"),
            vec![
                Technique::Numeric,
                Technique::Emotive,
                Technique::Urgency,
                Technique::Curiosity
            ]
        );
        assert_eq!(techniques_of("왕초보 완전정복"), vec![Technique::Audience]);
        assert!(techniques_of("카페 투어").is_empty());
    }

    #[test]
    fn test_length_window_boundaries() {
        let v = Vocabulary::default();
        let len = |n: usize| "가".repeat(n);
        assert!(!seo_features_of(&len(14), &v).contains(&SeoFeature::LengthInRange));
        assert!(seo_features_of(&len(15), &v).contains(&SeoFeature::LengthInRange));
        assert!(seo_features_of(&len(30), &v).contains(&SeoFeature::LengthInRange));
        assert!(!seo_features_of(&len(31), &v).contains(&SeoFeature::LengthInRange));
    }

    #[test]
    fn test_keyword_fronted_checks_first_word_only() {
        let v = vocab(&["맛집"]);
        assert!(v.fronts("강남맛집 추천"));
        assert!(!v.fronts("강남 맛집 추천"));
        assert!(!v.fronts("   "));

        let found = seo_features_of("강남맛집 가격 비교 방법", &v);
        assert_eq!(
            found,
            vec![
                SeoFeature::KeywordFronted,
                SeoFeature::Informational,
                SeoFeature::Transactional
            ]
        );
    }
}
