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

pub mod batch;
pub mod error;
pub mod export;

use std::sync::Arc;
use camino::Utf8Path;
use crate::artifacts::{store, ScreeningModel};
use crate::config::Configs;
use crate::document::{self, Document, ExtractionError};
use crate::extraction::InformationExtractor;
use crate::pipeline::error::SetupError;
use crate::record::CandidateRecord;

/// Turns documents into candidate records.
///
/// The loaded model is immutable and shared, cloning a pipeline is cheap.
#[derive(Clone)]
pub struct ScreeningPipeline {
    model: Arc<ScreeningModel>,
    extractor: Arc<InformationExtractor>,
}

impl ScreeningPipeline {
    pub fn new(model: ScreeningModel, extractor: InformationExtractor) -> Self {
        Self {
            model: Arc::new(model),
            extractor: Arc::new(extractor),
        }
    }

    /// Loads the currently published models from [models_dir] or the configured directory.
    pub fn load(configs: &Configs, models_dir: Option<&Utf8Path>) -> Result<Self, SetupError> {
        let configured = configs.paths.dir_models();
        let models_dir = models_dir.unwrap_or(configured.as_path());
        let model = store::load_current(models_dir)?;
        log::info!(
            "Loaded the models {} with {} categories from {models_dir}.",
            model.fingerprint(),
            model.labels().len()
        );
        let extractor = InformationExtractor::from_config(&configs.extraction)?;
        Ok(Self::new(model, extractor))
    }

    pub fn model(&self) -> &ScreeningModel {
        &self.model
    }

    /// Screens the raw bytes of a document against the [requested_role].
    pub fn process(&self, bytes: &[u8], requested_role: &str, filename: &str) -> Result<CandidateRecord, ExtractionError> {
        let text = document::extract_text(bytes)?;
        Ok(self.screen_text(&text, requested_role, filename))
    }

    /// Screens the document at [path]. Blocks while reading.
    pub fn process_file(&self, path: &Utf8Path, requested_role: &str) -> Result<CandidateRecord, ExtractionError> {
        let text = Document::open(path)?.extract_text()?;
        Ok(self.screen_text(&text, requested_role, path.file_name().unwrap_or(path.as_str())))
    }

    /// Screens already extracted text.
    pub fn screen_text(&self, text: &str, requested_role: &str, filename: &str) -> CandidateRecord {
        let fields = self.extractor.extract(text);
        let predicted = self.model.predict(text);
        log::debug!("{filename} was classified as {predicted}.");
        CandidateRecord::new(filename, fields, requested_role, predicted)
    }
}
