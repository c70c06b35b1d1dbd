//! Title tokenization and insertion-ordered frequency counting.

use std::collections::HashMap;
use std::hash::Hash;

/// Particles and copulas that carry no topic information.
pub const STOPWORDS: &[&str] = &[
    "은", "는", "이", "가", "을", "를", "에", "에서", "와", "과", "의", "더", "좀", "수", "할", "있는",
    "입니다", "합니다", "을까", "것", "으로", "들",
];

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

fn is_token_char(c: char) -> bool {
    ('가'..='힣').contains(&c) || c.is_ascii_alphanumeric() || c.is_whitespace()
}

/// Split a title into raw tokens. Every character outside Hangul syllables,
/// ASCII letters and digits, and whitespace acts as a separator.
pub fn tokenize(title: &str) -> Vec<String> {
    let cleaned: String = title
        .chars()
        .map(|c| if is_token_char(c) { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Tokens worth counting as keywords: longer than one character and not a stopword.
pub fn keyword_tokens(title: &str) -> impl Iterator<Item = String> {
    tokenize(title)
        .into_iter()
        .filter(|t| t.chars().count() > 1 && !is_stopword(t))
}

/// Adjacent token pairs where neither side is a stopword.
pub fn bigrams(title: &str) -> Vec<(String, String)> {
    let tokens = tokenize(title);
    tokens
        .windows(2)
        .filter(|pair| !is_stopword(&pair[0]) && !is_stopword(&pair[1]))
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

/// Counts keyed by value, remembering the order in which keys were first seen.
#[derive(Debug, Clone)]
pub struct FrequencyTable<T> {
    entries: Vec<(T, usize)>,
    index: HashMap<T, usize>,
}

impl<T> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> FrequencyTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) {
        match self.index.get(&item) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(item.clone(), self.entries.len());
                self.entries.push((item, 1));
            }
        }
    }

    pub fn count(&self, item: &T) -> usize {
        self.index.get(item).map_or(0, |&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` highest counts. Equal counts keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(T, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for FrequencyTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::new();
        for item in iter {
            table.add(item);
        }
        table
    }
}
