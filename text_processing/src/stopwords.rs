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

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fs::File;
use std::hash::Hasher;
use std::io;
use std::io::{BufRead, BufReader};
use camino::Utf8PathBuf;
use compact_str::{CompactString, ToCompactString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::fingerprint::Fingerprintable;

/// The english stop word list, as shipped by the nltk corpus.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

#[derive(Debug, Error)]
pub enum StopWordsError {
    #[error("Failed to read the stop word file {file}: {source}")]
    Io {
        file: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No stop word repository was configured!")]
    NoRepository,
}

/// An immutable set of lowercase stop words.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct StopWordList {
    words: BTreeSet<CompactString>,
}

impl StopWordList {
    pub fn english() -> Self {
        ENGLISH_STOP_WORDS.iter().copied().collect()
    }

    /// Loads and merges the lists of all [repositories].
    pub fn from_repositories(repositories: &[StopWordRepository]) -> Result<Self, StopWordsError> {
        if repositories.is_empty() {
            return Err(StopWordsError::NoRepository);
        }
        let mut list = Self::default();
        for repository in repositories {
            list.extend(repository.load_raw_stop_words()?);
        }
        log::debug!("Loaded {} stop words from {} repositories.", list.len(), repositories.len());
        Ok(list)
    }

    #[inline]
    pub fn contains<Q: ?Sized>(&self, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Ord,
    {
        self.words.contains(value)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(CompactString::as_str)
    }
}

impl<Q> Extend<Q> for StopWordList where Q: ToCompactString {
    fn extend<T: IntoIterator<Item = Q>>(&mut self, iter: T) {
        for value in iter.into_iter() {
            let word = value.to_compact_string();
            let word = word.trim();
            if !word.is_empty() {
                self.words.insert(CompactString::from(word.to_lowercase()));
            }
        }
    }
}

impl<Q> FromIterator<Q> for StopWordList where Q: ToCompactString {
    fn from_iter<T: IntoIterator<Item = Q>>(iter: T) -> Self {
        let mut new = Self::default();
        new.extend(iter);
        new
    }
}

impl Fingerprintable for StopWordList {
    fn write_fingerprint<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.words.len());
        for word in &self.words {
            state.write(word.as_bytes());
            state.write_u8(0xff);
        }
    }
}

/// Where stop words are loaded from.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(try_from = "StopWordRepositoryDev", into = "StopWordRepositoryDev")]
pub enum StopWordRepository {
    /// The built-in [ENGLISH_STOP_WORDS].
    English,
    /// A file with one stop word per line.
    File { with_english: bool, file: Utf8PathBuf },
}

impl Default for StopWordRepository {
    fn default() -> Self {
        Self::English
    }
}

impl StopWordRepository {
    pub fn load_raw_stop_words(&self) -> Result<Vec<String>, StopWordsError> {
        fn english() -> Vec<String> {
            ENGLISH_STOP_WORDS.iter().map(|value| str::to_owned(*value)).collect()
        }

        match self {
            StopWordRepository::English => Ok(english()),
            StopWordRepository::File { with_english, file } => {
                let reader = File::open(file).map_err(|source| StopWordsError::Io {
                    file: file.clone(),
                    source,
                })?;
                let mut result = BufReader::new(reader)
                    .lines()
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|source| StopWordsError::Io {
                        file: file.clone(),
                        source,
                    })?;
                if *with_english {
                    result.extend(english())
                }
                Ok(result)
            }
        }
    }
}

#[derive(Debug, Error)]
#[error("Was not able to convert the definition to a recognized StopWordRepository definition: {0:?}")]
#[repr(transparent)]
pub struct StopWordRepositoryConversionError(StopWordRepositoryDev);

impl TryFrom<StopWordRepositoryDev> for StopWordRepository {
    type Error = StopWordRepositoryConversionError;

    fn try_from(value: StopWordRepositoryDev) -> Result<Self, Self::Error> {
        match value {
            StopWordRepositoryDev { with_english, file: Some(file) } => {
                Ok(Self::File { with_english, file })
            }
            StopWordRepositoryDev { with_english: true, file: None } => Ok(Self::English),
            err => Err(StopWordRepositoryConversionError(err)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
struct StopWordRepositoryDev {
    #[serde(skip_serializing_if = "std::ops::Not::not", rename = "english")]
    with_english: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<Utf8PathBuf>,
}

impl From<StopWordRepository> for StopWordRepositoryDev {
    fn from(value: StopWordRepository) -> Self {
        match value {
            StopWordRepository::English => StopWordRepositoryDev {
                with_english: true,
                file: None,
            },
            StopWordRepository::File { with_english, file } => StopWordRepositoryDev {
                with_english,
                file: Some(file),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;
    use camino::Utf8PathBuf;
    use super::{StopWordList, StopWordRepository, StopWordsError};

    #[test]
    fn english_list_contains_common_words() {
        let list = StopWordList::english();
        for word in ["the", "and", "i", "with", "wouldn"] {
            assert!(list.contains(word), "{word} is missing");
        }
        assert!(!list.contains("python"));
    }

    #[test]
    fn repositories_are_merged() {
        let dir = camino_tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Curriculum\n  vitae \n").unwrap();
        drop(file);

        let repositories = vec![StopWordRepository::File {
            with_english: true,
            file: path,
        }];
        let list = StopWordList::from_repositories(&repositories).unwrap();
        assert!(list.contains("curriculum"));
        assert!(list.contains("vitae"));
        assert!(list.contains("the"));
    }

    #[test]
    fn missing_file_fails() {
        let repositories = vec![StopWordRepository::File {
            with_english: false,
            file: Utf8PathBuf::from("/does/not/exist/stopwords.txt"),
        }];
        assert!(matches!(
            StopWordList::from_repositories(&repositories),
            Err(StopWordsError::Io { .. })
        ));
        assert!(matches!(
            StopWordList::from_repositories(&[]),
            Err(StopWordsError::NoRepository)
        ));
    }

    #[test]
    fn repository_serde_forms() {
        let english: StopWordRepository = serde_json::from_str(r#"{"english": true}"#).unwrap();
        assert_eq!(english, StopWordRepository::English);
        let file: StopWordRepository = serde_json::from_str(r#"{"file": "a.txt"}"#).unwrap();
        assert_eq!(
            file,
            StopWordRepository::File { with_english: false, file: "a.txt".into() }
        );
        assert!(serde_json::from_str::<StopWordRepository>("{}").is_err());
    }
}
