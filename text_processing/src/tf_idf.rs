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
use std::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;
use crate::corpus::CorpusDocumentStatistics;
use crate::fingerprint::Fingerprintable;

pub mod defaults {
    use super::{Idf, Tf, TfIdf};
    pub const RAW_COUNTS: TfIdf = TfIdf::new(Tf::RawCount, Idf::Unary);
    pub const RAW_INVERSE_SMOOTH: TfIdf = TfIdf::new(Tf::RawCount, Idf::InverseDocumentFrequencySmooth);
}

/// The weighting scheme chosen at fit time.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Weighting {
    /// Raw term counts, a plain bag of words.
    #[strum(to_string = "raw-counts", serialize = "RawCounts")]
    RawCounts,
    /// Raw term counts times the smoothed inverse document frequency.
    #[default]
    #[strum(to_string = "tf-idf", serialize = "TfIdf")]
    TfIdf,
}

impl Weighting {
    pub const fn tf_idf(self) -> TfIdf {
        match self {
            Weighting::RawCounts => defaults::RAW_COUNTS,
            Weighting::TfIdf => defaults::RAW_INVERSE_SMOOTH,
        }
    }
}

/// The normalization of a vectorized document.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize, IntoStaticStr)]
pub enum Norm {
    None,
    #[default]
    L2,
}

/// A combination of Tf and Idf
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct TfIdf<TF = Tf, IDF = Idf> {
    pub tf: TF,
    pub idf: IDF,
}

impl<TF, IDF> TfIdf<TF, IDF> {
    pub const fn new(tf: TF, idf: IDF) -> Self {
        Self { tf, idf }
    }
}

impl<TF, IDF> TfIdf<TF, IDF> where TF: TfAlgorithm {
    delegate::delegate! {
        to self.tf {
            pub fn calculate_tf<W, D: IntoIterator<Item=W>>(&self, doc: D) -> HashMap<W, f64> where W: Hash + Eq;
        }
    }
}

impl<TF, IDF> TfIdf<TF, IDF> where IDF: IdfAlgorithm {
    delegate::delegate! {
        to self.idf {
            pub fn calculate_idf<S: CorpusDocumentStatistics>(&self, statistics: &S, word: &str) -> Result<Option<f64>, IDF::Error>;
            pub fn calculate_idf_with_document_frequency<S: CorpusDocumentStatistics>(&self, statistics: &S, document_frequency: u64) -> Result<f64, IDF::Error>;
        }
    }
}

impl Fingerprintable for TfIdf {
    fn write_fingerprint<H: Hasher>(&self, state: &mut H) {
        let tf: &'static str = self.tf.into();
        let idf: &'static str = self.idf.into();
        tf.write_fingerprint(state);
        idf.write_fingerprint(state);
    }
}

/// Trait for IDF Algorithms
pub trait IdfAlgorithm {
    type Error: std::error::Error;

    /// Calculates the IDF value for a single word based on the provided statistics.
    /// Returns None if the word is unknown to the [statistics].
    #[inline]
    fn calculate_idf<S: CorpusDocumentStatistics>(&self, statistics: &S, word: &str) -> Result<Option<f64>, Self::Error> {
        statistics
            .document_frequency(word)
            .map(|value| self.calculate_idf_with_document_frequency(statistics, value))
            .transpose()
    }

    /// Calculates the IDF value for a word that occurs in [document_frequency] documents.
    fn calculate_idf_with_document_frequency<S: CorpusDocumentStatistics>(&self, statistics: &S, document_frequency: u64) -> Result<f64, Self::Error>;
}

/// The document weight of a term.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, IntoStaticStr)]
pub enum Idf {
    /// Every term weighs 1.
    Unary,
    /// ln((1 + N) / (1 + df)) + 1, never zero for known words.
    InverseDocumentFrequencySmooth,
}

#[derive(Debug, Error, Copy, Clone)]
pub enum IdfError {
    #[error("The CorpusDocumentStatistics is seen as empty but this should not be possible.")]
    StatisticsEmptyError,
}

impl IdfAlgorithm for Idf {
    type Error = IdfError;

    fn calculate_idf_with_document_frequency<S: CorpusDocumentStatistics>(&self, statistics: &S, document_frequency: u64) -> Result<f64, IdfError> {
        let document_count = statistics.document_count();
        if document_count == 0 {
            return Err(IdfError::StatisticsEmptyError);
        }
        Ok(match self {
            Idf::Unary => 1.0,
            Idf::InverseDocumentFrequencySmooth => {
                ((1.0 + document_count as f64) / (1.0 + document_frequency as f64)).ln() + 1.0
            }
        })
    }
}

/// Trait for TF Algorithm
pub trait TfAlgorithm {
    /// Calculates the TF value for every word in a [doc].
    fn calculate_tf<W, D: IntoIterator<Item = W>>(&self, doc: D) -> HashMap<W, f64> where W: Hash + Eq;
}

/// The in-document weight of a term.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, IntoStaticStr)]
pub enum Tf {
    /// How often the term occurs in the document.
    RawCount,
}

impl TfAlgorithm for Tf {
    fn calculate_tf<W, D: IntoIterator<Item = W>>(&self, doc: D) -> HashMap<W, f64> where W: Hash + Eq {
        match self {
            Tf::RawCount => doc.into_iter().fold(HashMap::new(), |mut counts, word| {
                *counts.entry(word).or_insert(0.0) += 1.0;
                counts
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use float_cmp::approx_eq;
    use crate::corpus::CorpusStatisticsCollector;
    use super::{Idf, IdfAlgorithm, Tf, TfAlgorithm, TfIdf, Weighting};

    #[test]
    fn term_frequencies() {
        let doc = ["python", "sql", "python"];
        let raw = Tf::RawCount.calculate_tf(doc);
        assert_eq!(raw.len(), 2);
        assert!(approx_eq!(f64, raw["python"], 2.0));
        assert!(approx_eq!(f64, raw["sql"], 1.0));
    }

    #[test]
    fn smooth_idf_matches_the_usual_formula() {
        let mut statistics = CorpusStatisticsCollector::default();
        statistics.add("it is going to rain today".split(' '));
        statistics.add("today i am not going outside".split(' '));
        statistics.add("i am going to watch the season premiere".split(' '));

        let going = Idf::InverseDocumentFrequencySmooth.calculate_idf(&statistics, "going").unwrap().unwrap();
        assert!(approx_eq!(f64, going, 1.0));
        let rain = Idf::InverseDocumentFrequencySmooth.calculate_idf(&statistics, "rain").unwrap().unwrap();
        assert!(approx_eq!(f64, rain, 2f64.ln() + 1.0));
        let unary = Idf::Unary.calculate_idf(&statistics, "today").unwrap().unwrap();
        assert!(approx_eq!(f64, unary, 1.0));
        assert_eq!(Idf::Unary.calculate_idf(&statistics, "unknown").unwrap(), None);
    }

    #[test]
    fn empty_statistics_fail() {
        let statistics = CorpusStatisticsCollector::default();
        assert!(Idf::Unary.calculate_idf_with_document_frequency(&statistics, 1).is_err());
    }

    #[test]
    fn weightings_select_their_formulas() {
        assert_eq!(Weighting::RawCounts.tf_idf(), TfIdf::new(Tf::RawCount, Idf::Unary));
        assert_eq!(Weighting::TfIdf.tf_idf(), TfIdf::new(Tf::RawCount, Idf::InverseDocumentFrequencySmooth));
    }

    #[test]
    fn weighting_parses() {
        assert_eq!(Weighting::from_str("tf-idf").unwrap(), Weighting::TfIdf);
        assert_eq!(Weighting::from_str("RAW-COUNTS").unwrap(), Weighting::RawCounts);
        assert_eq!(Weighting::TfIdf.to_string(), "tf-idf");
    }
}
