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

use std::collections::BTreeSet;
use std::io::Read;
use camino::Utf8Path;
use thiserror::Error;
use crate::config::TrainingConfig;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("The corpus lacks the required columns {missing:?}, found {found:?}.")]
    Schema {
        missing: Vec<String>,
        found: Vec<String>,
    },
    #[error("The corpus contains no labeled documents.")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledDocument {
    pub text: String,
    pub label: String,
}

impl LabeledDocument {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// A non empty collection of labeled documents.
#[derive(Debug, Clone)]
pub struct Corpus {
    documents: Vec<LabeledDocument>,
}

impl Corpus {
    pub fn new(documents: Vec<LabeledDocument>) -> Result<Self, CorpusError> {
        if documents.is_empty() {
            Err(CorpusError::Empty)
        } else {
            Ok(Self { documents })
        }
    }

    /// Reads a csv with a header row. The columns are named by [cfg].
    /// Rows without a label are dropped.
    pub fn read<R: Read>(reader: R, cfg: &TrainingConfig) -> Result<Self, CorpusError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = reader.headers()?.clone();
        let position = |name: &str| headers.iter().position(|header| header.trim() == name);
        let (text_at, label_at) = match (position(&cfg.text_column), position(&cfg.label_column)) {
            (Some(text_at), Some(label_at)) => (text_at, label_at),
            (text_at, label_at) => {
                let missing = [(text_at, &cfg.text_column), (label_at, &cfg.label_column)]
                    .into_iter()
                    .filter(|(at, _)| at.is_none())
                    .map(|(_, name)| name.clone())
                    .collect();
                return Err(CorpusError::Schema {
                    missing,
                    found: headers.iter().map(str::to_string).collect(),
                });
            }
        };

        let mut documents = Vec::new();
        let mut unlabeled = 0usize;
        for record in reader.records() {
            let record = record?;
            let label = record.get(label_at).unwrap_or_default().trim();
            if label.is_empty() {
                unlabeled += 1;
                continue;
            }
            let text = record.get(text_at).unwrap_or_default();
            documents.push(LabeledDocument::new(text, label));
        }
        if unlabeled > 0 {
            log::warn!("Dropped {unlabeled} rows without a label.");
        }
        Self::new(documents)
    }

    pub fn open(path: impl AsRef<Utf8Path>, cfg: &TrainingConfig) -> Result<Self, CorpusError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read(std::io::BufReader::new(file), cfg)
    }

    pub fn documents(&self) -> &[LabeledDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn labels(&self) -> BTreeSet<&str> {
        self.documents.iter().map(|document| document.label.as_str()).collect()
    }
}
