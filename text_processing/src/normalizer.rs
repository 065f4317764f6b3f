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

use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::hash::Hasher;
use std::sync::Arc;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use crate::configs::NormalizerConfig;
use crate::fingerprint::Fingerprintable;
use crate::stopwords::{StopWordList, StopWordsError};

/// Lowercase, alphabetic-only, stop word free tokens joined by single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_ascii_whitespace()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NormalizedText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalizes raw document text before vectorization.
///
/// The steps run in a fixed order:
/// 1. lowercase
/// 2. strip ascii punctuation
/// 3. strip digits
/// 4. split on whitespace and drop stop words
/// 5. strip every remaining non-alphabetic character from each token
/// 6. rejoin with single spaces
///
/// Tokens emptied by step 5 vanish and tokens that only become stop words through
/// step 5 are dropped as well, so normalizing twice yields the same text.
/// The optional stemmer runs last and is not idempotent for every word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextNormalizer {
    stop_words: Arc<StopWordList>,
    fold_accents: bool,
    stemmer: Option<rust_stemmers::Algorithm>,
}

impl TextNormalizer {
    pub fn new(
        stop_words: Arc<StopWordList>,
        fold_accents: bool,
        stemmer: Option<rust_stemmers::Algorithm>,
    ) -> Self {
        Self {
            stop_words,
            fold_accents,
            stemmer,
        }
    }

    pub fn from_config(cfg: &NormalizerConfig) -> Result<Self, StopWordsError> {
        Ok(Self::new(
            Arc::new(StopWordList::from_repositories(&cfg.stop_words)?),
            cfg.fold_accents,
            cfg.stemmer,
        ))
    }

    pub fn english() -> Self {
        Self::new(Arc::new(StopWordList::english()), false, None)
    }

    pub fn stop_words(&self) -> &StopWordList {
        &self.stop_words
    }

    pub fn normalize(&self, text: &str) -> NormalizedText {
        let text = if self.fold_accents {
            Cow::Owned(text.nfkd().filter(|c| !is_combining_mark(*c)).collect::<String>())
        } else {
            Cow::Borrowed(text)
        };

        let lowercase = text.to_lowercase();
        let cleaned = lowercase
            .chars()
            .filter(|c| !c.is_ascii_punctuation() && !c.is_numeric())
            .collect::<String>();

        let mut tokens = cleaned
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(*token))
            .map(|token| token.chars().filter(char::is_ascii_alphabetic).collect::<String>())
            .filter(|token| !token.is_empty() && !self.stop_words.contains(token.as_str()));

        let joined = if let Some(algorithm) = self.stemmer {
            let stemmer = rust_stemmers::Stemmer::create(algorithm);
            tokens.map(|token| stemmer.stem(&token).into_owned()).join(" ")
        } else {
            tokens.join(" ")
        };

        NormalizedText(joined)
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Fingerprintable for TextNormalizer {
    fn write_fingerprint<H: Hasher>(&self, state: &mut H) {
        self.stop_words.write_fingerprint(state);
        state.write_u8(self.fold_accents as u8);
        match self.stemmer {
            None => state.write_u8(0),
            Some(algorithm) => {
                state.write_u8(1);
                format!("{algorithm:?}").as_str().write_fingerprint(state);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use super::TextNormalizer;
    use crate::stopwords::StopWordList;

    const SAMPLES: &[&str] = &[
        "Proficient in Python, SQL and Excel!",
        "Jane Doe\n+91 98765 43210\njane.doe@example.com",
        "I have 5+ years of experience (2018-2023) in C++ & Node.js.",
        "  \t\n ",
        "Résumé: naïve café owner, İstanbul",
        "The quick brown fox... it's 100% ok",
        "don't won't can't a-b-c ½ ² ٣",
    ];

    #[test]
    fn follows_the_pipeline_order() {
        let normalizer = TextNormalizer::english();
        assert_eq!(
            normalizer.normalize("Proficient in Python, SQL and Excel!").as_str(),
            "proficient python sql excel"
        );
        assert_eq!(
            normalizer.normalize("I have 5+ years of experience (2018-2023) in C++ & Node.js.").as_str(),
            "years experience c nodejs"
        );
    }

    #[test]
    fn output_is_clean() {
        let normalizer = TextNormalizer::english();
        for sample in SAMPLES {
            let normalized = normalizer.normalize(sample);
            for token in normalized.tokens() {
                assert!(token.chars().all(|c| c.is_ascii_lowercase()), "{token:?} in {sample:?}");
                assert!(!normalizer.stop_words().contains(token), "{token:?} in {sample:?}");
            }
            assert!(!normalized.as_str().contains("  "));
            assert_eq!(normalized.as_str().trim(), normalized.as_str());
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        for normalizer in [
            TextNormalizer::english(),
            TextNormalizer::new(Arc::new(StopWordList::english()), true, None),
        ] {
            for sample in SAMPLES {
                let once = normalizer.normalize(sample);
                let twice = normalizer.normalize(once.as_str());
                assert_eq!(once, twice, "not idempotent for {sample:?}");
            }
        }
    }

    #[test]
    fn stripping_may_reveal_stop_words() {
        let normalizer = TextNormalizer::english();
        // "tö" loses the umlaut and becomes the stop word "t".
        assert_eq!(normalizer.normalize("tö python").as_str(), "python");
    }

    #[test]
    fn accent_folding_keeps_letters() {
        let folding = TextNormalizer::new(Arc::new(StopWordList::english()), true, None);
        assert_eq!(folding.normalize("Résumé café").as_str(), "resume cafe");
        assert_eq!(TextNormalizer::english().normalize("Résumé café").as_str(), "rsum caf");
    }

    #[test]
    fn stemming_is_optional() {
        let stemming = TextNormalizer::new(
            Arc::new(StopWordList::english()),
            false,
            Some(rust_stemmers::Algorithm::English),
        );
        assert_eq!(stemming.normalize("Developing developers").as_str(), "develop develop");
    }
}
