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

mod args;
mod constants;
mod logging;

use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;
use anyhow::Context;
use camino::Utf8PathBuf;
use classifier::Solver;
use text_processing::Weighting;
pub use args::{CvsiftArgs, RunMode};
use crate::app::constants::{create_example_config, EXAMPLE_CONFIG_FILE};
use crate::app::logging::configure_logging;
use crate::config::Configs;
use crate::pipeline::batch::{process_batch, BatchSummary};
use crate::pipeline::export::export_csv;
use crate::pipeline::ScreeningPipeline;
use crate::training::{synthetic, train_from_path};

pub fn exec_args(args: CvsiftArgs) -> ExitCode {
    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Failed with: {err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: CvsiftArgs) -> anyhow::Result<()> {
    if args.generate_example_config {
        write_example_config()?;
    }
    let Some(mode) = args.mode else {
        return Ok(());
    };

    let mut configs = match &args.config {
        Some(folder) => Configs::load_from(folder)
            .with_context(|| format!("Failed to load the configs from {folder}"))?,
        None => Configs::discover_or_default().context("Failed to load the configs")?,
    };
    if let Some(level) = args.override_log_level {
        configs.system.log_level = level;
    }
    if configs.system.log_to_file {
        std::fs::create_dir_all(configs.paths.root_path())?;
    }
    configure_logging(&configs)?;

    match mode {
        RunMode::Train {
            corpus,
            out,
            weighting,
            solver,
        } => run_train(configs, corpus, out, weighting, solver),
        RunMode::Screen {
            files,
            role,
            models,
            csv,
            workers,
        } => {
            if let Some(workers) = workers {
                configs.system.workers = workers;
            }
            run_screen(configs, files, role, models, csv)
        }
        RunMode::Generate { out, count, seed } => {
            let resumes = synthetic::generate(count, seed);
            synthetic::export_csv(&out, &resumes)
                .with_context(|| format!("Failed to write the corpus {out}"))?;
            log::info!("Generated {count} résumés in {out}.");
            Ok(())
        }
    }
}

fn write_example_config() -> anyhow::Result<()> {
    let cfg = create_example_config();
    let root = cfg.paths.root_path();
    std::fs::create_dir_all(root)?;
    let path = root.join(EXAMPLE_CONFIG_FILE);
    let file = File::create(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &cfg)
        .with_context(|| format!("Failed to create the example file {path}"))?;
    println!("Created {path}");
    Ok(())
}

fn run_train(
    mut configs: Configs,
    corpus: Utf8PathBuf,
    out: Option<Utf8PathBuf>,
    weighting: Option<Weighting>,
    solver: Option<Solver>,
) -> anyhow::Result<()> {
    apply_train_overrides(&mut configs, out, weighting, solver);
    let outcome = train_from_path(&corpus, &configs)
        .with_context(|| format!("Failed to train on {corpus}"))?;
    println!("Accuracy: {:.4}", outcome.report.accuracy);
    println!("{}", outcome.report);
    let run = outcome.publish(configs.paths.dir_models())?;
    println!("Published {run}");
    Ok(())
}

fn apply_train_overrides(
    configs: &mut Configs,
    out: Option<Utf8PathBuf>,
    weighting: Option<Weighting>,
    solver: Option<Solver>,
) {
    if let Some(weighting) = weighting {
        configs.vectorizer = configs.vectorizer.with_weighting(weighting);
    }
    if let Some(solver) = solver {
        configs.classifier.solver = solver;
    }
    if let Some(out) = out {
        configs.paths.models = Some(out);
    }
}

fn run_screen(
    configs: Configs,
    files: Vec<Utf8PathBuf>,
    role: String,
    models: Option<Utf8PathBuf>,
    csv: Option<Utf8PathBuf>,
) -> anyhow::Result<()> {
    let pipeline = ScreeningPipeline::load(&configs, models.as_deref())?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let items = runtime.block_on(process_batch(&pipeline, files, &role, configs.system.workers));

    for record in items.iter().filter_map(|item| item.outcome.as_ref().ok()) {
        println!("{}", serde_json::to_string(record)?);
    }
    if let Some(csv) = csv {
        export_csv(&csv, items.iter().filter_map(|item| item.outcome.as_ref().ok()))
            .with_context(|| format!("Failed to export to {csv}"))?;
        log::info!("Exported the records to {csv}.");
    }
    let summary = BatchSummary::collect(&items);
    log::info!("Finished screening for {role}: {summary}");
    eprintln!("{summary}");
    Ok(())
}
