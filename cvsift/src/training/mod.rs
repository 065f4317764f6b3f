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

pub mod corpus;
pub mod split;
pub mod synthetic;

use camino::{Utf8Path, Utf8PathBuf};
use classifier::{ClassificationReport, ClassifierError, ClassifierModel};
use itertools::Itertools;
use text_processing::{DocumentVectorizer, NormalizedText, StopWordsError, TextNormalizer, VectorizerError};
use thiserror::Error;
use crate::artifacts::{store, ArtifactError, ClassifierArtifact, VectorizerArtifact};
use crate::config::Configs;
use crate::training::corpus::{Corpus, CorpusError};

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error(transparent)]
    StopWords(#[from] StopWordsError),
    #[error(transparent)]
    Vectorizer(#[from] VectorizerError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Artifacts(#[from] ArtifactError),
    #[error("The test size has to be in [0, 1) but is {0}.")]
    InvalidTestSize(f64),
}

/// The matched artifacts of a training run and their evaluation on the held out documents.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub vectorizer: VectorizerArtifact,
    pub classifier: ClassifierArtifact,
    pub report: ClassificationReport,
}

impl TrainingOutcome {
    /// Publishes both artifacts as the current models in [models_dir].
    pub fn publish(&self, models_dir: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf, ArtifactError> {
        store::publish(models_dir, &self.vectorizer, &self.classifier)
    }
}

/// Loads the corpus at [path] and trains on it.
pub fn train_from_path(path: impl AsRef<Utf8Path>, configs: &Configs) -> Result<TrainingOutcome, TrainingError> {
    let path = path.as_ref();
    log::info!("Load the corpus {path}.");
    let corpus = Corpus::open(path, &configs.training)?;
    train(&corpus, configs)
}

/// Fits the vectorizer and the classifier on the training part of [corpus]
/// and evaluates them on the held out part.
pub fn train(corpus: &Corpus, configs: &Configs) -> Result<TrainingOutcome, TrainingError> {
    let test_size = configs.training.test_size;
    if !(0.0..1.0).contains(&test_size) {
        return Err(TrainingError::InvalidTestSize(test_size));
    }
    configs.classifier.validate()?;
    let normalizer = TextNormalizer::from_config(&configs.normalizer)?;

    log::info!(
        "Normalize {} documents with {} categories.",
        corpus.len(),
        corpus.labels().len()
    );
    let normalized = corpus
        .documents()
        .iter()
        .map(|document| (normalizer.normalize(&document.text), document.label.as_str()))
        .collect_vec();
    let (train_part, test_part) = split::train_test_split(normalized, test_size, configs.training.seed);
    log::info!("Train on {} documents, test on {}.", train_part.len(), test_part.len());

    let vectorizer = DocumentVectorizer::fit(train_part.iter().map(|(text, _)| text), configs.vectorizer)?;
    log::info!(
        "Fitted a {} vocabulary of {} terms.",
        configs.vectorizer.weighting,
        vectorizer.dimension()
    );

    let examples = train_part
        .iter()
        .map(|(text, label)| (*label, vectorizer.transform(text)))
        .collect_vec();
    let model = ClassifierModel::fit(&examples, &configs.classifier)?;

    let report = evaluate(&vectorizer, &model, &test_part);
    if test_part.is_empty() {
        log::warn!("No documents were held out, the report is empty.");
    } else {
        log::info!("Accuracy on the held out documents: {:.4}", report.accuracy);
    }

    let vectorizer = VectorizerArtifact::new(normalizer, vectorizer);
    let classifier = ClassifierArtifact::new(&vectorizer, model);
    Ok(TrainingOutcome {
        vectorizer,
        classifier,
        report,
    })
}

fn evaluate(vectorizer: &DocumentVectorizer, model: &ClassifierModel, documents: &[(NormalizedText, &str)]) -> ClassificationReport {
    let truth = documents.iter().map(|(_, label)| *label).collect_vec();
    let predicted = documents
        .iter()
        .map(|(text, _)| model.predict(&vectorizer.transform(text)))
        .collect_vec();
    ClassificationReport::evaluate(&truth, &predicted)
}

#[cfg(test)]
mod test {
    use classifier::Solver;
    use text_processing::VectorizerSettings;
    use crate::artifacts::{store, ScreeningModel};
    use crate::config::Configs;
    use crate::training::corpus::{Corpus, CorpusError, LabeledDocument};
    use crate::training::synthetic::{self, CATEGORIES};
    use super::{train, train_from_path, TrainingError};

    fn synthetic_corpus(count: usize) -> Corpus {
        let documents = synthetic::generate(count, 11)
            .into_iter()
            .map(|resume| LabeledDocument::new(resume.resume, resume.category))
            .collect();
        Corpus::new(documents).unwrap()
    }

    #[test]
    fn synthetic_corpora_are_learned() {
        let outcome = train(&synthetic_corpus(600), &Configs::default()).unwrap();
        assert!(outcome.report.accuracy > 0.9, "{}", outcome.report);
        assert_eq!(outcome.report.total(), 180);
        assert_eq!(outcome.vectorizer.fingerprint(), outcome.classifier.fingerprint());

        let model = ScreeningModel::pair(outcome.vectorizer, outcome.classifier).unwrap();
        assert_eq!(model.labels().len(), CATEGORIES.len());
        assert_eq!(
            model.predict("Experienced in financial reporting and tax preparation. Proficient accountant."),
            "Accountant"
        );
    }

    #[test]
    fn logistic_regression_on_raw_counts() {
        let mut configs = Configs::default();
        configs.vectorizer = VectorizerSettings::raw_counts();
        configs.classifier.solver = Solver::LogisticRegression;
        let outcome = train(&synthetic_corpus(400), &configs).unwrap();
        assert!(outcome.report.accuracy > 0.85, "{}", outcome.report);
    }

    #[test]
    fn training_is_reproducible() {
        let corpus = synthetic_corpus(200);
        let first = train(&corpus, &Configs::default()).unwrap();
        let second = train(&corpus, &Configs::default()).unwrap();
        assert_eq!(first.vectorizer.fingerprint(), second.vectorizer.fingerprint());
        assert_eq!(first.report, second.report);
    }

    #[test]
    fn invalid_settings_fail_before_fitting() {
        let mut configs = Configs::default();
        configs.training.test_size = 1.0;
        assert!(matches!(
            train(&synthetic_corpus(10), &configs),
            Err(TrainingError::InvalidTestSize(_))
        ));
        let mut configs = Configs::default();
        configs.classifier.cost = 0.0;
        assert!(matches!(
            train(&synthetic_corpus(10), &configs),
            Err(TrainingError::Classifier(_))
        ));
    }

    #[test]
    fn corpus_files_are_checked_then_published() {
        let folder = camino_tempfile::tempdir().unwrap();
        let broken = folder.path().join("broken.csv");
        std::fs::write(&broken, "Text,Label\nsome text,Accountant\n").unwrap();
        assert!(matches!(
            train_from_path(&broken, &Configs::default()),
            Err(TrainingError::Corpus(CorpusError::Schema { .. }))
        ));

        let corpus = folder.path().join("corpus.csv");
        synthetic::export_csv(&corpus, &synthetic::generate(300, 5)).unwrap();
        let outcome = train_from_path(&corpus, &Configs::default()).unwrap();
        let models = folder.path().join("models");
        outcome.publish(&models).unwrap();
        let loaded = store::load_current(&models).unwrap();
        assert_eq!(loaded.fingerprint(), outcome.vectorizer.fingerprint());
    }
}
