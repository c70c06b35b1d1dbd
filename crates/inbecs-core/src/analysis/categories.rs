//! Closed category sets for title classification and a fixed-size tally over them.

use std::fmt;
use std::marker::PhantomData;

/// A closed set of labels that can be counted.
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    fn index(self) -> usize;

    /// Display label used in reports and prompts.
    fn label(self) -> &'static str;
}

macro_rules! category {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Category for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn index(self) -> usize {
                self as usize
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

category!(
    /// Sentence tone of a title. Exactly one per title.
    Tone {
        Question => "질문형",
        Exclamation => "감탄형",
        Declarative => "서술형",
    }
);

category!(
    /// Composition patterns. A title may match several.
    Pattern {
        ListRanking => "리스트/순위형",
        Question => "질문형",
        Review => "후기/경험형",
        Guide => "정보/가이드형",
        Exclamatory => "감탄/강조형",
        KeywordLed => "키워드 선두 배치",
        Generic => "일반 서술형",
    }
);

category!(
    /// Techniques used to draw the reader's attention.
    Technique {
        Numeric => "숫자 활용",
        Emotive => "가치/감성적 표현",
        Urgency => "긴급성/시의성",
        Curiosity => "호기심 자극",
        Audience => "타겟 명확화",
    }
);

category!(
    /// Search-engine oriented features.
    SeoFeature {
        KeywordFronted => "키워드 전면 배치",
        LengthInRange => "적정 길이 유지",
        Informational => "정보성/탐색 의도 반영",
        Transactional => "거래성 의도 반영",
    }
);

/// Per-category counts.
#[derive(Clone, PartialEq, Eq)]
pub struct Tally<C: Category> {
    counts: Vec<usize>,
    _category: PhantomData<C>,
}

impl<C: Category> Default for Tally<C> {
    fn default() -> Self {
        Self {
            counts: vec![0; C::ALL.len()],
            _category: PhantomData,
        }
    }
}

impl<C: Category> Tally<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&mut self, category: C) {
        self.counts[category.index()] += 1;
    }

    pub fn get(&self, category: C) -> usize {
        self.counts[category.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Non-zero categories, highest count first. Ties keep declaration order.
    pub fn ranked(&self) -> Vec<(C, usize)> {
        let mut ranked: Vec<(C, usize)> = C::ALL
            .iter()
            .map(|&c| (c, self.get(c)))
            .filter(|&(_, n)| n > 0)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn most_common(&self) -> Option<C> {
        self.ranked().first().map(|&(c, _)| c)
    }
}

impl<C: Category> fmt::Debug for Tally<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(C::ALL.iter().map(|c| (c, self.get(*c))))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_indices() {
        assert_eq!(Tone::Question.label(), "질문형");
        assert_eq!(Pattern::ALL.len(), 7);
        for (i, p) in Pattern::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
        assert_eq!(SeoFeature::LengthInRange.to_string(), "적정 길이 유지");
    }

    #[test]
    fn test_ranked_orders_by_count_then_declaration() {
        let mut tally = Tally::<Technique>::new();
        tally.bump(Technique::Audience);
        tally.bump(Technique::Curiosity);
        tally.bump(Technique::Audience);
        tally.bump(Technique::Numeric);

        assert_eq!(
            tally.ranked(),
            vec![
                (Technique::Audience, 2),
                (Technique::Numeric, 1),
                (Technique::Curiosity, 1),
            ]
        );
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.get(Technique::Urgency), 0);
        assert_eq!(tally.most_common(), Some(Technique::Audience));
    }

    #[test]
    fn test_empty_tally() {
        let tally = Tally::<Tone>::new();
        assert!(tally.ranked().is_empty());
        assert_eq!(tally.most_common(), None);
    }
}
