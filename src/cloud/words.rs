use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

/// Common English words left out of the cloud.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm",
    "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k",
    "let's", "like", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours",
    "ourselves", "out", "over", "own", "r", "same", "shall", "shan't", "she", "she'd",
    "she'll", "she's", "should", "shouldn't", "since", "so", "some", "such", "than", "that",
    "that's", "the", "their", "theirs", "them", "themselves", "then", "there", "there's",
    "therefore", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't",
    "would", "wouldn't", "www", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\w[\w']+").expect("word pattern is valid"))
}

fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

/// A word with its count and its count relative to the most frequent word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
    /// `count / max_count`, in `(0, 1]`.
    pub weight: f32,
}

/// What the word-cloud panel has to show for a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub enum CloudContent {
    /// The text is blank.
    NoTitles,
    /// The text only contains stop words, numbers or one-letter tokens.
    NoWords,
    /// Words ordered by descending frequency.
    Words(Vec<WordFrequency>),
}

/// Split raw text into the tokens the cloud counts.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    word_pattern()
        .find_iter(text)
        .map(|m| {
            let w = m.as_str();
            w.strip_suffix("'s")
                .or_else(|| w.strip_suffix("'S"))
                .unwrap_or(w)
        })
        .filter(|w| !w.is_empty() && !w.chars().all(|c| c.is_ascii_digit()))
        .filter(|w| !stopwords().contains(w.to_lowercase().as_str()))
}

/// Counts for one case-insensitive word, remembering how it was spelled.
#[derive(Default)]
struct WordGroup<'a> {
    total: usize,
    /// Spelling → count, in first-seen order.
    spellings: Vec<(&'a str, usize)>,
}

impl<'a> WordGroup<'a> {
    fn add(&mut self, spelling: &'a str, n: usize) {
        self.total += n;
        match self.spellings.iter_mut().find(|(s, _)| *s == spelling) {
            Some((_, c)) => *c += n,
            None => self.spellings.push((spelling, n)),
        }
    }

    /// Most frequent spelling; the earliest one wins a tie.
    fn display(&self) -> &'a str {
        let mut best = self.spellings[0];
        for &(s, c) in &self.spellings[1..] {
            if c > best.1 {
                best = (s, c);
            }
        }
        best.0
    }
}

/// Likelihood-ratio score above which a word pair counts as a phrase.
const COLLOCATION_THRESHOLD: f64 = 30.0;

/// Case- and plural-folded counts of a token stream.
struct FoldedCounts {
    /// Display spelling and count, in first-seen order.
    entries: Vec<(String, usize)>,
    /// Lowercase token → position in `entries`. Folded plurals point at
    /// their singular.
    index: HashMap<String, usize>,
}

impl FoldedCounts {
    /// Group `tokens` case-insensitively. A plural ending in a single `s`
    /// is folded into its singular when the singular also occurs.
    fn new<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, WordGroup<'a>> = HashMap::new();
        for token in tokens {
            let key = token.to_lowercase();
            if !groups.contains_key(&key) {
                order.push(key.clone());
            }
            groups.entry(key).or_default().add(token, 1);
        }

        let mut folded: Vec<(String, String)> = Vec::new();
        for key in &order {
            if !key.ends_with('s') || key.ends_with("ss") {
                continue;
            }
            let singular = &key[..key.len() - 1];
            if !groups.contains_key(singular) {
                continue;
            }
            if let Some(plural) = groups.remove(key) {
                if let Some(target) = groups.get_mut(singular) {
                    // plural spellings count towards the singular total only
                    target.total += plural.total;
                }
                folded.push((key.clone(), singular.to_string()));
            }
        }

        let mut entries = Vec::new();
        let mut index = HashMap::new();
        for key in &order {
            if let Some(group) = groups.get(key) {
                index.insert(key.clone(), entries.len());
                entries.push((group.display().to_string(), group.total));
            }
        }
        for (plural, singular) in folded {
            if let Some(&at) = index.get(&singular) {
                index.insert(plural, at);
            }
        }
        FoldedCounts { entries, index }
    }

    fn position(&self, token: &str) -> Option<usize> {
        self.index.get(&token.to_lowercase()).copied()
    }
}

/// Dunning log-likelihood of `k` successes in `n` trials at rate `x`.
fn log_likelihood(k: f64, n: f64, x: f64) -> f64 {
    x.max(1e-10).ln() * k + (1.0 - x).max(1e-10).ln() * (n - k)
}

/// How strongly a pair seen `pair` times sticks together, given the counts
/// of its two words among `n_words` tokens.
fn collocation_score(pair: usize, first: usize, second: usize, n_words: usize) -> f64 {
    if n_words <= first || n_words <= second {
        return 0.0;
    }
    let (n, c12, c1, c2) = (n_words as f64, pair as f64, first as f64, second as f64);
    let p = c2 / n;
    let p1 = c12 / c1;
    let p2 = (c2 - c12) / (n - c1);
    -2.0 * (log_likelihood(c12, c1, p) + log_likelihood(c2 - c12, n - c1, p)
        - log_likelihood(c12, c1, p1)
        - log_likelihood(c2 - c12, n - c1, p2))
}

/// Single-word counts with strong word pairs promoted to phrases.
///
/// Each accepted phrase is taken out of the counts of its two words; words
/// left with nothing are dropped. Phrases follow the words in first-seen
/// order.
fn with_collocations(words: &[&str]) -> Vec<(String, usize)> {
    let unigrams = FoldedCounts::new(words.iter().copied());
    let pairs: Vec<String> = words.windows(2).map(|w| format!("{} {}", w[0], w[1])).collect();
    let bigrams = FoldedCounts::new(pairs.iter().map(String::as_str));

    let mut counts: Vec<(String, i64)> = unigrams
        .entries
        .iter()
        .map(|(word, count)| (word.clone(), *count as i64))
        .collect();
    for (phrase, count) in bigrams.entries {
        let Some((first, second)) = phrase.split_once(' ') else {
            continue;
        };
        let (Some(i), Some(j)) = (unigrams.position(first), unigrams.position(second)) else {
            continue;
        };
        let score = collocation_score(
            count,
            unigrams.entries[i].1,
            unigrams.entries[j].1,
            words.len(),
        );
        if score > COLLOCATION_THRESHOLD {
            counts[i].1 -= count as i64;
            counts[j].1 -= count as i64;
            counts.push((phrase, count as i64));
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(word, count)| (word, count as usize))
        .collect()
}

/// Count the words of `text` and keep the `max_words` most frequent.
///
/// Words are grouped case-insensitively and plurals fold into their
/// singular. Adjacent words that occur together far more often than chance
/// are counted as one two-word phrase.
pub fn word_frequencies(text: &str, max_words: usize) -> CloudContent {
    if text.trim().is_empty() {
        return CloudContent::NoTitles;
    }

    let words: Vec<&str> = tokens(text).collect();
    let mut ranked = with_collocations(&words);
    if ranked.is_empty() {
        return CloudContent::NoWords;
    }
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(max_words);

    let max_count = ranked[0].1 as f32;
    CloudContent::Words(
        ranked
            .into_iter()
            .map(|(word, count)| WordFrequency {
                word,
                count,
                weight: count as f32 / max_count,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(content: &CloudContent) -> Vec<(&str, usize)> {
        match content {
            CloudContent::Words(words) => {
                words.iter().map(|w| (w.word.as_str(), w.count)).collect()
            }
            other => panic!("expected words, got {other:?}"),
        }
    }

    #[test]
    fn blank_text_has_no_titles() {
        assert_eq!(word_frequencies("", 200), CloudContent::NoTitles);
        assert_eq!(word_frequencies("   \n ", 200), CloudContent::NoTitles);
    }

    #[test]
    fn only_stopwords_has_no_words() {
        assert_eq!(word_frequencies("The and of 2020 a", 200), CloudContent::NoWords);
    }

    #[test]
    fn counts_case_insensitively_with_common_spelling() {
        let content = word_frequencies("COVID covid COVID outbreak", 200);
        assert_eq!(counts(&content), vec![("COVID", 3), ("outbreak", 1)]);
    }

    #[test]
    fn plurals_fold_into_singular() {
        let content = word_frequencies("patients patient patients virus viruses", 200);
        assert_eq!(
            counts(&content),
            vec![("patient", 3), ("virus", 1), ("viruses", 1)]
        );
    }

    #[test]
    fn possessive_suffix_is_stripped() {
        let content = word_frequencies("Wuhan's outbreak Wuhan", 200);
        assert_eq!(counts(&content), vec![("Wuhan", 2), ("outbreak", 1)]);
    }

    #[test]
    fn ties_keep_first_seen_order_and_truncate() {
        let content = word_frequencies("delta alpha gamma beta alpha", 3);
        assert_eq!(counts(&content), vec![("alpha", 2), ("delta", 1), ("gamma", 1)]);
    }

    #[test]
    fn frequent_pair_becomes_a_phrase() {
        let text: String = (0..20)
            .map(|i| format!("SARS CoV case{i} "))
            .collect();
        let content = word_frequencies(&text, 200);
        let counts = counts(&content);
        assert_eq!(counts[0], ("SARS CoV", 20));
        assert!(counts.iter().all(|(w, _)| *w != "SARS" && *w != "CoV"));
        assert_eq!(counts.len(), 21);
    }

    #[test]
    fn rare_pairs_stay_single_words() {
        assert!(collocation_score(1, 2, 2, 10) < COLLOCATION_THRESHOLD);
        assert!(collocation_score(20, 20, 20, 60) > COLLOCATION_THRESHOLD);
        // a word making up the whole text never forms a phrase
        assert_eq!(collocation_score(3, 4, 4, 4), 0.0);
    }

    #[test]
    fn weights_are_relative_to_top_word() {
        let CloudContent::Words(words) = word_frequencies("mask mask mask mask vaccine", 200)
        else {
            panic!("expected words");
        };
        assert_eq!(words[0].weight, 1.0);
        assert_eq!(words[1].weight, 0.25);
    }
}
