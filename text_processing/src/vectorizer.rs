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

use std::collections::HashMap;
use std::hash::Hasher;
use compact_str::CompactString;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::configs::VectorizerSettings;
use crate::corpus::{CorpusDocumentStatistics, CorpusStatisticsCollector};
use crate::fingerprint::{Fingerprint, Fingerprintable};
use crate::normalizer::NormalizedText;
use crate::tf_idf::{IdfError, Norm, TfIdf};

#[derive(Debug, Error)]
pub enum VectorizerError {
    #[error("Can not fit a vectorizer without any documents.")]
    EmptyCorpus,
    #[error("The corpus does not contain a single usable term.")]
    EmptyVocabulary,
    #[error(transparent)]
    Idf(#[from] IdfError),
}

/// The ordered terms known to a fitted vectorizer. Indices follow the lexical order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<CompactString>", into = "Vec<CompactString>")]
pub struct Vocabulary {
    terms: Vec<CompactString>,
    index: HashMap<CompactString, u32>,
}

impl Vocabulary {
    pub fn get(&self, term: &str) -> Option<u32> {
        self.index.get(term).copied()
    }

    pub fn term(&self, index: u32) -> Option<&str> {
        self.terms.get(index as usize).map(CompactString::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(CompactString::as_str)
    }
}

impl From<Vec<CompactString>> for Vocabulary {
    fn from(mut terms: Vec<CompactString>) -> Self {
        terms.sort_unstable();
        terms.dedup();
        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx as u32))
            .collect();
        Self { terms, index }
    }
}

impl From<Vocabulary> for Vec<CompactString> {
    fn from(value: Vocabulary) -> Self {
        value.terms
    }
}

impl Fingerprintable for Vocabulary {
    fn write_fingerprint<H: Hasher>(&self, state: &mut H) {
        (self.terms.len() as u32).write_fingerprint(state);
        for term in &self.terms {
            term.as_str().write_fingerprint(state);
        }
    }
}

/// A sparse vector with a fixed dimension. Entries are sorted by index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(u32, f64)>,
}

impl FeatureVector {
    /// Creates a vector from arbitrary entries, zeros are dropped.
    pub fn new(dimension: usize, entries: impl IntoIterator<Item = (u32, f64)>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|(idx, value)| *value != 0.0 && (*idx as usize) < dimension)
            .sorted_by_key(|(idx, _)| *idx)
            .collect_vec();
        Self { dimension, entries }
    }

    pub fn from_dense(values: &[f64]) -> Self {
        Self::new(
            values.len(),
            values.iter().enumerate().map(|(idx, value)| (idx as u32, *value)),
        )
    }

    pub fn zero(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, value)| *value == 0.0)
    }

    pub fn get(&self, index: u32) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(idx, _)| *idx)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// The dot product with a dense vector, indices beyond [dense] count as zero.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(idx, value)| dense.get(*idx as usize).map(|w| w * value))
            .sum()
    }

    pub fn squared_norm(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value * value).sum()
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for (idx, value) in &self.entries {
            dense[*idx as usize] = *value;
        }
        dense
    }
}

/// Maps normalized text to feature vectors over a vocabulary fixed at fit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentVectorizer {
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    tf_idf: TfIdf,
    settings: VectorizerSettings,
}

impl DocumentVectorizer {
    /// Learns the vocabulary and the document frequencies of [documents].
    pub fn fit<'a, I>(documents: I, settings: VectorizerSettings) -> Result<Self, VectorizerError>
    where
        I: IntoIterator<Item = &'a NormalizedText>,
    {
        let mut statistics = CorpusStatisticsCollector::default();
        for doc in documents {
            statistics.add(doc.tokens());
        }
        if statistics.document_count() == 0 {
            return Err(VectorizerError::EmptyCorpus);
        }
        let vocabulary = Vocabulary::from(statistics.select_vocabulary(settings.max_features));
        if vocabulary.is_empty() {
            return Err(VectorizerError::EmptyVocabulary);
        }
        let tf_idf = settings.weighting.tf_idf();
        let idf = vocabulary
            .iter()
            .map(|term| {
                let document_frequency = statistics.document_frequency(term).unwrap_or_default();
                tf_idf.calculate_idf_with_document_frequency(&statistics, document_frequency)
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "Fitted vectorizer with {} terms over {} documents.",
            vocabulary.len(),
            statistics.document_count()
        );
        Ok(Self {
            vocabulary,
            idf,
            tf_idf,
            settings,
        })
    }

    /// Vectorizes [text], terms outside of the vocabulary are ignored.
    pub fn transform(&self, text: &NormalizedText) -> FeatureVector {
        let tf = self.tf_idf.calculate_tf(text.tokens());
        let mut entries = tf
            .into_iter()
            .filter_map(|(term, tf)| {
                self.vocabulary
                    .get(term)
                    .map(|idx| (idx, tf * self.idf[idx as usize]))
            })
            .collect_vec();
        if self.settings.norm == Norm::L2 {
            let norm = entries.iter().map(|(_, value)| value * value).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, value) in entries.iter_mut() {
                    *value /= norm;
                }
            }
        }
        FeatureVector::new(self.dimension(), entries)
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn settings(&self) -> &VectorizerSettings {
        &self.settings
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::builder().with(self).finish()
    }
}

impl Fingerprintable for DocumentVectorizer {
    fn write_fingerprint<H: Hasher>(&self, state: &mut H) {
        self.vocabulary.write_fingerprint(state);
        self.tf_idf.write_fingerprint(state);
        let norm: &'static str = self.settings.norm.into();
        norm.write_fingerprint(state);
        for value in &self.idf {
            state.write_u64(value.to_bits());
        }
    }
}

#[cfg(test)]
mod test {
    use float_cmp::approx_eq;
    use crate::configs::VectorizerSettings;
    use crate::normalizer::{NormalizedText, TextNormalizer};
    use super::{DocumentVectorizer, FeatureVector, VectorizerError};

    fn corpus() -> Vec<NormalizedText> {
        let normalizer = TextNormalizer::english();
        [
            "Python developer with SQL and Excel",
            "Java developer building Spring services",
            "Analyst using Python and machine learning",
        ]
        .into_iter()
        .map(|doc| normalizer.normalize(doc))
        .collect()
    }

    #[test]
    fn vocabulary_is_sorted_and_deterministic() {
        let corpus = corpus();
        let a = DocumentVectorizer::fit(&corpus, VectorizerSettings::default()).unwrap();
        let b = DocumentVectorizer::fit(corpus.iter().rev(), VectorizerSettings::default()).unwrap();
        assert_eq!(a.vocabulary(), b.vocabulary());
        assert_eq!(a.fingerprint(), b.fingerprint());
        let terms = a.vocabulary().iter().collect::<Vec<_>>();
        let mut sorted = terms.clone();
        sorted.sort_unstable();
        assert_eq!(terms, sorted);
        assert_eq!(a.vocabulary().get("analyst"), Some(0));
    }

    #[test]
    fn unknown_text_gives_a_zero_vector() {
        let corpus = corpus();
        let vectorizer = DocumentVectorizer::fit(&corpus, VectorizerSettings::default()).unwrap();
        let unrelated = TextNormalizer::english().normalize(&lipsum::lipsum(25));
        let vector = vectorizer.transform(&unrelated);
        assert!(vector.is_zero());
        assert_eq!(vector.dimension(), vectorizer.dimension());
        assert_eq!(vectorizer.transform(&NormalizedText::default()).dimension(), vectorizer.dimension());
    }

    #[test]
    fn tf_idf_vectors_have_unit_length() {
        let corpus = corpus();
        let vectorizer = DocumentVectorizer::fit(&corpus, VectorizerSettings::default()).unwrap();
        let vector = vectorizer.transform(&corpus[0]);
        assert!(approx_eq!(f64, vector.squared_norm(), 1.0, epsilon = 1e-12));
        // "developer" is in two of three documents and weighs less than "sql".
        let developer = vectorizer.vocabulary().get("developer").unwrap();
        let sql = vectorizer.vocabulary().get("sql").unwrap();
        assert!(vector.get(developer) < vector.get(sql));
    }

    #[test]
    fn raw_counts_are_plain_counts() {
        let normalizer = TextNormalizer::english();
        let docs = vec![normalizer.normalize("python python sql"), normalizer.normalize("excel")];
        let vectorizer = DocumentVectorizer::fit(&docs, VectorizerSettings::raw_counts()).unwrap();
        let vector = vectorizer.transform(&normalizer.normalize("Python, python and SQL!"));
        assert_eq!(vector.to_dense(), vec![0.0, 2.0, 1.0]);
    }

    #[test]
    fn capped_vocabulary_keeps_frequent_terms() {
        let normalizer = TextNormalizer::english();
        let docs = vec![normalizer.normalize("python python sql"), normalizer.normalize("excel python")];
        let settings = VectorizerSettings {
            max_features: 1,
            ..VectorizerSettings::default()
        };
        let vectorizer = DocumentVectorizer::fit(&docs, settings).unwrap();
        assert_eq!(vectorizer.vocabulary().iter().collect::<Vec<_>>(), vec!["python"]);
    }

    #[test]
    fn empty_inputs_fail() {
        let empty: Vec<NormalizedText> = Vec::new();
        assert!(matches!(
            DocumentVectorizer::fit(&empty, VectorizerSettings::default()),
            Err(VectorizerError::EmptyCorpus)
        ));
        let blank = vec![NormalizedText::default()];
        assert!(matches!(
            DocumentVectorizer::fit(&blank, VectorizerSettings::default()),
            Err(VectorizerError::EmptyVocabulary)
        ));
    }

    #[test]
    fn survives_persistence() {
        let corpus = corpus();
        let vectorizer = DocumentVectorizer::fit(&corpus, VectorizerSettings::default()).unwrap();
        let bytes = bincode::serialize(&vectorizer).unwrap();
        let restored: DocumentVectorizer = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored.fingerprint(), vectorizer.fingerprint());
        assert_eq!(restored.transform(&corpus[1]), vectorizer.transform(&corpus[1]));
    }

    #[test]
    fn dense_helpers() {
        let vector = FeatureVector::from_dense(&[0.0, 2.0, 0.0, 1.0]);
        assert_eq!(vector.entries(), &[(1, 2.0), (3, 1.0)]);
        assert!(approx_eq!(f64, vector.dot(&[1.0, 1.0, 1.0, 3.0]), 5.0));
    }
}
