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

pub mod store;

use std::io::{Read, Write};
use camino::Utf8PathBuf;
use classifier::ClassifierModel;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::Display;
use text_processing::{DocumentVectorizer, Fingerprint, FeatureVector, TextNormalizer};
use thiserror::Error;
use time::OffsetDateTime;

/// The version of the layout of persisted artifacts.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialisation(#[from] bincode::Error),
    #[error("The artifact has the format version {found} but only {supported} is supported.")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("Expected a {expected} artifact but found a {found} artifact.")]
    WrongKind {
        expected: ArtifactKind,
        found: ArtifactKind,
    },
    #[error("The {kind} artifact is corrupted: the header names {expected} but the content hashes to {found}.")]
    Corrupted {
        kind: ArtifactKind,
        expected: Fingerprint,
        found: Fingerprint,
    },
    #[error("The classifier was trained on vocabulary {classifier} ({classifier_dimension} terms) but the vectorizer has vocabulary {vectorizer} ({vectorizer_dimension} terms).")]
    VocabularyMismatch {
        vectorizer: Fingerprint,
        vectorizer_dimension: usize,
        classifier: Fingerprint,
        classifier_dimension: usize,
    },
    #[error("No published models in {0}.")]
    NothingPublished(Utf8PathBuf),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display)]
pub enum ArtifactKind {
    Vectorizer,
    Classifier,
}

/// Precedes every persisted artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHeader {
    pub format_version: u32,
    pub kind: ArtifactKind,
    /// The fingerprint of the vocabulary the artifact belongs to.
    pub fingerprint: Fingerprint,
    pub created_at: OffsetDateTime,
}

impl ArtifactHeader {
    fn new(kind: ArtifactKind, fingerprint: Fingerprint) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            kind,
            fingerprint,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn check(&self, expected: ArtifactKind) -> Result<(), ArtifactError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: self.format_version,
                supported: FORMAT_VERSION,
            });
        }
        if self.kind != expected {
            return Err(ArtifactError::WrongKind {
                expected,
                found: self.kind,
            });
        }
        Ok(())
    }
}

fn write_artifact<W: Write, T: Serialize>(mut writer: W, header: &ArtifactHeader, payload: &T) -> Result<(), ArtifactError> {
    bincode::serialize_into(&mut writer, header)?;
    bincode::serialize_into(&mut writer, payload)?;
    writer.flush()?;
    Ok(())
}

fn read_artifact<R: Read, T: DeserializeOwned>(mut reader: R, expected: ArtifactKind) -> Result<(ArtifactHeader, T), ArtifactError> {
    let header: ArtifactHeader = bincode::deserialize_from(&mut reader)?;
    header.check(expected)?;
    let payload = bincode::deserialize_from(&mut reader)?;
    Ok((header, payload))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VectorizerPayload {
    normalizer: TextNormalizer,
    vectorizer: DocumentVectorizer,
}

/// The fitted normalizer and vectorizer of a training run.
#[derive(Debug, Clone)]
pub struct VectorizerArtifact {
    header: ArtifactHeader,
    normalizer: TextNormalizer,
    vectorizer: DocumentVectorizer,
}

impl VectorizerArtifact {
    pub fn new(normalizer: TextNormalizer, vectorizer: DocumentVectorizer) -> Self {
        let fingerprint = Self::compute_fingerprint(&normalizer, &vectorizer);
        Self {
            header: ArtifactHeader::new(ArtifactKind::Vectorizer, fingerprint),
            normalizer,
            vectorizer,
        }
    }

    fn compute_fingerprint(normalizer: &TextNormalizer, vectorizer: &DocumentVectorizer) -> Fingerprint {
        Fingerprint::builder().with(normalizer).with(vectorizer).finish()
    }

    pub fn header(&self) -> &ArtifactHeader {
        &self.header
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.header.fingerprint
    }

    pub fn dimension(&self) -> usize {
        self.vectorizer.dimension()
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn vectorizer(&self) -> &DocumentVectorizer {
        &self.vectorizer
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), ArtifactError> {
        write_artifact(
            writer,
            &self.header,
            &VectorizerPayload {
                normalizer: self.normalizer.clone(),
                vectorizer: self.vectorizer.clone(),
            },
        )
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        let (header, payload): (_, VectorizerPayload) = read_artifact(reader, ArtifactKind::Vectorizer)?;
        let found = Self::compute_fingerprint(&payload.normalizer, &payload.vectorizer);
        if found != header.fingerprint {
            return Err(ArtifactError::Corrupted {
                kind: ArtifactKind::Vectorizer,
                expected: header.fingerprint,
                found,
            });
        }
        Ok(Self {
            header,
            normalizer: payload.normalizer,
            vectorizer: payload.vectorizer,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClassifierPayload {
    dimension: usize,
    model: ClassifierModel,
}

/// The classifier of a training run, bound to the vocabulary it was fit on.
#[derive(Debug, Clone)]
pub struct ClassifierArtifact {
    header: ArtifactHeader,
    dimension: usize,
    model: ClassifierModel,
}

impl ClassifierArtifact {
    pub fn new(vectorizer: &VectorizerArtifact, model: ClassifierModel) -> Self {
        Self {
            header: ArtifactHeader::new(ArtifactKind::Classifier, vectorizer.fingerprint()),
            dimension: vectorizer.dimension(),
            model,
        }
    }

    pub fn header(&self) -> &ArtifactHeader {
        &self.header
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.header.fingerprint
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn model(&self) -> &ClassifierModel {
        &self.model
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), ArtifactError> {
        write_artifact(
            writer,
            &self.header,
            &ClassifierPayload {
                dimension: self.dimension,
                model: self.model.clone(),
            },
        )
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        let (header, payload): (_, ClassifierPayload) = read_artifact(reader, ArtifactKind::Classifier)?;
        Ok(Self {
            header,
            dimension: payload.dimension,
            model: payload.model,
        })
    }
}

/// A matched vectorizer and classifier, immutable after loading and shared by all inference calls.
#[derive(Debug, Clone)]
pub struct ScreeningModel {
    fingerprint: Fingerprint,
    normalizer: TextNormalizer,
    vectorizer: DocumentVectorizer,
    classifier: ClassifierModel,
}

impl ScreeningModel {
    /// Pairs the artifacts, fails if they stem from different training runs.
    pub fn pair(vectorizer: VectorizerArtifact, classifier: ClassifierArtifact) -> Result<Self, ArtifactError> {
        if vectorizer.fingerprint() != classifier.fingerprint()
            || vectorizer.dimension() != classifier.dimension()
            || classifier.model().dimension() != classifier.dimension()
        {
            return Err(ArtifactError::VocabularyMismatch {
                vectorizer: vectorizer.fingerprint(),
                vectorizer_dimension: vectorizer.dimension(),
                classifier: classifier.fingerprint(),
                classifier_dimension: classifier.model().dimension(),
            });
        }
        Ok(Self {
            fingerprint: vectorizer.fingerprint(),
            normalizer: vectorizer.normalizer,
            vectorizer: vectorizer.vectorizer,
            classifier: classifier.model,
        })
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    pub fn labels(&self) -> &[String] {
        self.classifier.labels()
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn vectorize(&self, text: &str) -> FeatureVector {
        self.vectorizer.transform(&self.normalizer.normalize(text))
    }

    /// Classifies the raw [text]. Never fails, unknown words are ignored.
    pub fn predict(&self, text: &str) -> &str {
        self.classifier.predict(&self.vectorize(text))
    }
}
