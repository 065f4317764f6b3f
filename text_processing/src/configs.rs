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

use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};
use crate::stopwords::StopWordRepository;
use crate::tf_idf::{Norm, Weighting};

/// The config for the text normalization used at training and inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Where to get the stop words from. Multiple repositories are merged.
    #[serde(default = "_default_stop_words")]
    pub stop_words: Vec<StopWordRepository>,
    /// Decompose accented letters and keep their base letter.
    #[serde(default)]
    pub fold_accents: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stemmer: Option<Algorithm>,
}

fn _default_stop_words() -> Vec<StopWordRepository> {
    vec![StopWordRepository::English]
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            stop_words: _default_stop_words(),
            fold_accents: false,
            stemmer: None,
        }
    }
}

/// Settings fixed when a vectorizer is fitted.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct VectorizerSettings {
    #[serde(default)]
    pub weighting: Weighting,
    /// The maximum vocabulary size, 0 disables the cap.
    #[serde(default = "_default_max_features")]
    pub max_features: usize,
    #[serde(default = "_default_norm")]
    pub norm: Norm,
}

const fn _default_max_features() -> usize {
    5000
}

const fn _default_norm() -> Norm {
    Norm::L2
}

impl VectorizerSettings {
    /// Plain bag of words counts without normalization.
    pub const fn raw_counts() -> Self {
        Self {
            weighting: Weighting::RawCounts,
            max_features: 0,
            norm: Norm::None,
        }
    }

    /// Switches to [weighting] and its usual norm, the vocabulary cap is kept.
    pub const fn with_weighting(self, weighting: Weighting) -> Self {
        let norm = match weighting {
            Weighting::RawCounts => Norm::None,
            Weighting::TfIdf => Norm::L2,
        };
        Self {
            weighting,
            norm,
            max_features: self.max_features,
        }
    }
}

impl Default for VectorizerSettings {
    fn default() -> Self {
        Self {
            weighting: Weighting::default(),
            max_features: _default_max_features(),
            norm: _default_norm(),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::tf_idf::{Norm, Weighting};
    use super::VectorizerSettings;

    #[test]
    fn switching_the_weighting_keeps_the_cap() {
        let settings = VectorizerSettings {
            max_features: 300,
            ..VectorizerSettings::default()
        };
        let raw = settings.with_weighting(Weighting::RawCounts);
        assert_eq!(raw.weighting, Weighting::RawCounts);
        assert_eq!(raw.norm, Norm::None);
        assert_eq!(raw.max_features, 300);

        let back = raw.with_weighting(Weighting::TfIdf);
        assert_eq!(back, settings);
    }
}
