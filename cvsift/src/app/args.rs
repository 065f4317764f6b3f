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

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use classifier::Solver;
use text_processing::Weighting;

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
/// Screens résumés against job roles
pub struct CvsiftArgs {
    /// A command to initialize exemplary configs
    #[arg(long)]
    pub generate_example_config: bool,

    /// The folder containing the configs.
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// overrides the log level from the config.
    #[arg(long, global = true)]
    pub override_log_level: Option<log::LevelFilter>,

    /// The mode of cvsift
    #[command(subcommand)]
    pub mode: Option<RunMode>,
}

#[derive(Subcommand, Debug)]
pub enum RunMode {
    /// Trains a vectorizer and a classifier on a labeled csv corpus and publishes them.
    Train {
        /// The csv corpus with a text and a label column.
        corpus: Utf8PathBuf,
        /// The models directory, overrides the config.
        #[arg(short, long)]
        out: Option<Utf8PathBuf>,
        /// The weighting of the features (tf-idf or raw-counts)
        #[arg(long)]
        weighting: Option<Weighting>,
        /// The classifier family (linear-svm or logistic-regression)
        #[arg(long)]
        solver: Option<Solver>,
    },
    /// Screens documents against a job role with the published models.
    Screen {
        /// The pdf or text documents.
        #[arg(required = true)]
        files: Vec<Utf8PathBuf>,
        /// The requested job role.
        #[arg(short, long)]
        role: String,
        /// The models directory, overrides the config.
        #[arg(short, long)]
        models: Option<Utf8PathBuf>,
        /// Also write the records to this csv file.
        #[arg(long)]
        csv: Option<Utf8PathBuf>,
        /// The number of documents processed at the same time.
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Writes a synthetic labeled corpus.
    Generate {
        /// The csv file to write.
        out: Utf8PathBuf,
        /// The number of résumés.
        #[arg(short = 'n', long, default_value_t = 5000)]
        count: usize,
        /// The seed of the generator.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}
