//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};
use compact_str::CompactString;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The statistics over the documents in a corpus
pub trait CorpusDocumentStatistics {
    /// The number of documents in the corpus
    fn document_count(&self) -> u64;
    /// The number of words in the corpus
    fn word_count(&self) -> u64;
    /// The number of unique words in the corpus
    fn unique_word_count(&self) -> usize;
    /// The number of documents containing [word]
    fn document_frequency(&self, word: &str) -> Option<u64>;
    /// The number of occurrences of [word] in the whole corpus
    fn term_frequency(&self, word: &str) -> Option<u64>;
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct WordStatistics {
    term_frequency: u64,
    document_frequency: u64,
}

/// Collects the frequencies in a corpus
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct CorpusStatisticsCollector {
    document_count: u64,
    word_count: u64,
    words: HashMap<CompactString, WordStatistics>,
}

impl CorpusStatisticsCollector {
    pub fn add<D, W>(&mut self, doc: D)
    where
        D: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        self.document_count = self.document_count.saturating_add(1);
        let mut seen = HashSet::new();
        for value in doc {
            let value = value.as_ref();
            self.word_count = self.word_count.saturating_add(1);
            let first_in_doc = seen.insert(CompactString::from(value));
            let entry = self.words.entry(CompactString::from(value)).or_default();
            entry.term_frequency = entry.term_frequency.saturating_add(1);
            if first_in_doc {
                entry.document_frequency = entry.document_frequency.saturating_add(1);
            }
        }
    }

    /// The vocabulary restricted to the [max_features] most frequent words.
    /// Ties are broken by lexical order, the result is sorted lexically.
    /// A [max_features] of 0 keeps every word.
    pub fn select_vocabulary(&self, max_features: usize) -> Vec<CompactString> {
        let mut selected = if max_features == 0 || max_features >= self.words.len() {
            self.words.keys().cloned().collect_vec()
        } else {
            self.words
                .iter()
                .sorted_by(|(word_a, a), (word_b, b)| {
                    b.term_frequency
                        .cmp(&a.term_frequency)
                        .then_with(|| word_a.cmp(word_b))
                })
                .take(max_features)
                .map(|(word, _)| word.clone())
                .collect_vec()
        };
        selected.sort_unstable();
        selected
    }
}

impl Display for CorpusStatisticsCollector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Document Count: {}", self.document_count)?;
        writeln!(f, "Word Count: {}", self.word_count)?;
        write!(f, "Unique Word Count: {}", self.unique_word_count())
    }
}

impl CorpusDocumentStatistics for CorpusStatisticsCollector {
    #[inline]
    fn document_count(&self) -> u64 {
        self.document_count
    }

    #[inline]
    fn word_count(&self) -> u64 {
        self.word_count
    }

    #[inline]
    fn unique_word_count(&self) -> usize {
        self.words.len()
    }

    fn document_frequency(&self, word: &str) -> Option<u64> {
        self.words.get(word).map(|value| value.document_frequency)
    }

    fn term_frequency(&self, word: &str) -> Option<u64> {
        self.words.get(word).map(|value| value.term_frequency)
    }
}

#[cfg(test)]
mod test {
    use super::{CorpusDocumentStatistics, CorpusStatisticsCollector};

    fn statistics() -> CorpusStatisticsCollector {
        let mut statistics = CorpusStatisticsCollector::default();
        statistics.add("python python sql".split(' '));
        statistics.add("java sql excel".split(' '));
        statistics.add("python aws".split(' '));
        statistics
    }

    #[test]
    fn counts_documents_and_terms() {
        let statistics = statistics();
        assert_eq!(statistics.document_count(), 3);
        assert_eq!(statistics.word_count(), 8);
        assert_eq!(statistics.unique_word_count(), 5);
        assert_eq!(statistics.term_frequency("python"), Some(3));
        assert_eq!(statistics.document_frequency("python"), Some(2));
        assert_eq!(statistics.document_frequency("rust"), None);
    }

    #[test]
    fn vocabulary_is_capped_and_sorted() {
        let statistics = statistics();
        assert_eq!(
            statistics.select_vocabulary(0),
            vec!["aws", "excel", "java", "python", "sql"]
        );
        // python (3) and sql (2) win, then the lexically first of the single counts.
        assert_eq!(statistics.select_vocabulary(3), vec!["aws", "python", "sql"]);
    }
}
