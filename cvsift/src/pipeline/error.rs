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

use thiserror::Error;
use crate::artifacts::ArtifactError;
use crate::document::ExtractionError;

/// Why a single document did not yield a record.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("The worker stopped unexpectedly: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ProcessError {
    /// Readable documents without text are skipped, not failed.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Extraction(ExtractionError::EmptyText))
    }
}

/// Errors while preparing a pipeline. The process must not start screening after one of them.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Artifacts(#[from] ArtifactError),
    #[error("Failed to build the skill matcher: {0}")]
    Skills(#[from] aho_corasick::BuildError),
}
