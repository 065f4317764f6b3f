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

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::NamedUtf8TempFile;
use crate::artifacts::{ArtifactError, ClassifierArtifact, ScreeningModel, VectorizerArtifact};

pub const VECTORIZER_FILE: &str = "vectorizer.bin";
pub const CLASSIFIER_FILE: &str = "classifier.bin";
/// Names the run directory currently in use.
pub const CURRENT_FILE: &str = "CURRENT";
pub const RUNS_DIR: &str = "runs";

fn write_file(path: &Utf8Path, write: impl FnOnce(&mut BufWriter<&File>) -> Result<(), ArtifactError>) -> Result<(), ArtifactError> {
    let file = File::options().write(true).create_new(true).open(path)?;
    let mut writer = BufWriter::new(&file);
    write(&mut writer)?;
    writer.flush()?;
    drop(writer);
    file.sync_all()?;
    Ok(())
}

/// Publishes both artifacts of a training run below [models_dir].
///
/// The artifacts are written to a fresh directory that is renamed into `runs/` once complete.
/// Afterwards the `CURRENT` pointer is replaced atomically, so a reader either sees the old
/// pair or the new pair, never a mix of both.
pub fn publish(
    models_dir: impl AsRef<Utf8Path>,
    vectorizer: &VectorizerArtifact,
    classifier: &ClassifierArtifact,
) -> Result<Utf8PathBuf, ArtifactError> {
    let models_dir = models_dir.as_ref();
    let runs = models_dir.join(RUNS_DIR);
    std::fs::create_dir_all(&runs)?;

    let staging = camino_tempfile::Builder::new()
        .prefix(".staging-")
        .tempdir_in(&runs)?;
    write_file(&staging.path().join(VECTORIZER_FILE), |writer| vectorizer.write_to(writer))?;
    write_file(&staging.path().join(CLASSIFIER_FILE), |writer| classifier.write_to(writer))?;

    let run_name = format!(
        "{}-{}",
        vectorizer.fingerprint(),
        vectorizer.header().created_at.unix_timestamp_nanos()
    );
    let run_dir = runs.join(&run_name);
    std::fs::rename(staging.path(), &run_dir)?;
    // The directory is gone, nothing left to clean up.
    let _ = staging.keep();
    File::open(&runs)?.sync_all()?;

    let mut pointer = NamedUtf8TempFile::new_in(models_dir)?;
    pointer.write_all(run_name.as_bytes())?;
    pointer.as_file().sync_all()?;
    pointer
        .persist(models_dir.join(CURRENT_FILE))
        .map_err(|err| err.error)?;
    log::info!("Published the models of run {run_name} in {models_dir}.");
    Ok(run_dir)
}

/// Resolves the run directory `CURRENT` points to.
pub fn current_run(models_dir: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf, ArtifactError> {
    let models_dir = models_dir.as_ref();
    let pointer = models_dir.join(CURRENT_FILE);
    if !pointer.exists() {
        return Err(ArtifactError::NothingPublished(models_dir.to_path_buf()));
    }
    let run_name = std::fs::read_to_string(&pointer)?;
    let run_name = run_name.trim();
    if run_name.is_empty() {
        return Err(ArtifactError::NothingPublished(models_dir.to_path_buf()));
    }
    Ok(models_dir.join(RUNS_DIR).join(run_name))
}

/// Loads and pairs the artifacts stored in [run_dir].
pub fn load_run(run_dir: impl AsRef<Utf8Path>) -> Result<ScreeningModel, ArtifactError> {
    let run_dir = run_dir.as_ref();
    let vectorizer = VectorizerArtifact::read_from(BufReader::new(File::open(run_dir.join(VECTORIZER_FILE))?))?;
    let classifier = ClassifierArtifact::read_from(BufReader::new(File::open(run_dir.join(CLASSIFIER_FILE))?))?;
    log::debug!(
        "Loaded vectorizer {} and classifier {} from {run_dir}.",
        vectorizer.fingerprint(),
        classifier.fingerprint()
    );
    ScreeningModel::pair(vectorizer, classifier)
}

/// Loads the currently published pair of [models_dir].
pub fn load_current(models_dir: impl AsRef<Utf8Path>) -> Result<ScreeningModel, ArtifactError> {
    load_run(current_run(models_dir)?)
}
