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

use std::fmt::{Display, Formatter};
use std::sync::Arc;
use camino::Utf8PathBuf;
use itertools::Itertools;
use serde::Serialize;
use tokio::sync::Semaphore;
use crate::pipeline::error::ProcessError;
use crate::pipeline::ScreeningPipeline;
use crate::record::CandidateRecord;

/// The outcome for one input document.
#[derive(Debug)]
pub struct BatchItem {
    pub filename: String,
    pub outcome: Result<CandidateRecord, ProcessError>,
}

/// Aggregates of a batch. Only documents that produced a record count as processed.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub suitable: usize,
    pub not_suitable: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn collect<'a>(items: impl IntoIterator<Item = &'a BatchItem>) -> Self {
        let mut summary = Self::default();
        for item in items {
            match &item.outcome {
                Ok(record) if record.suitability.is_suitable() => {
                    summary.processed += 1;
                    summary.suitable += 1;
                }
                Ok(_) => {
                    summary.processed += 1;
                    summary.not_suitable += 1;
                }
                Err(err) if err.is_skip() => summary.skipped += 1,
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }
}

impl Display for BatchSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "processed: {} (suitable: {}, not suitable: {}), skipped: {}, failed: {}",
            self.processed, self.suitable, self.not_suitable, self.skipped, self.failed
        )
    }
}

/// Screens all [paths] on blocking workers, at most [workers] at the same time.
/// The items are returned in the order of [paths].
pub async fn process_batch(
    pipeline: &ScreeningPipeline,
    paths: impl IntoIterator<Item = Utf8PathBuf>,
    requested_role: &str,
    workers: usize,
) -> Vec<BatchItem> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let requested_role: Arc<str> = Arc::from(requested_role);

    let handles = paths
        .into_iter()
        .map(|path| {
            let filename = path.file_name().unwrap_or(path.as_str()).to_string();
            let semaphore = semaphore.clone();
            let pipeline = pipeline.clone();
            let requested_role = requested_role.clone();
            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                tokio::task::spawn_blocking(move || pipeline.process_file(&path, &requested_role)).await
            });
            (filename, handle)
        })
        .collect_vec();

    let mut items = Vec::with_capacity(handles.len());
    for (filename, handle) in handles {
        let outcome = match handle.await {
            Ok(Ok(Ok(record))) => Ok(record),
            Ok(Ok(Err(err))) => Err(ProcessError::from(err)),
            Ok(Err(err)) | Err(err) => Err(ProcessError::from(err)),
        };
        match &outcome {
            Err(err) if err.is_skip() => log::info!("Skipped {filename}: {err}"),
            Err(err) => log::warn!("Failed to process {filename}: {err}"),
            Ok(_) => {}
        }
        items.push(BatchItem { filename, outcome });
    }
    items
}
