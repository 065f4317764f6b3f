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

pub mod configs;
pub mod corpus;
pub mod fingerprint;
pub mod normalizer;
pub mod stopwords;
pub mod tf_idf;
pub mod vectorizer;

pub use configs::{NormalizerConfig, VectorizerSettings};
pub use fingerprint::{Fingerprint, Fingerprintable};
pub use normalizer::{NormalizedText, TextNormalizer};
pub use stopwords::{StopWordList, StopWordRepository, StopWordsError};
pub use tf_idf::{Norm, Weighting};
pub use vectorizer::{DocumentVectorizer, FeatureVector, VectorizerError, Vocabulary};
