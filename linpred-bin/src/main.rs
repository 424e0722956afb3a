// Copyright 2026- linpred developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Note that clippy attributes should be in sync with those declared in "lib.rs"
#![warn(clippy::all, clippy::nursery, clippy::pedantic, clippy::cargo)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate
)]
// Some from restriction lint-group
#![warn(
    clippy::clone_on_ref_ptr,
    clippy::create_dir,
    clippy::dbg_macro,
    clippy::empty_structs_with_brackets,
    clippy::exit,
    clippy::if_then_some_else_none,
    clippy::impl_trait_in_params,
    clippy::let_underscore_must_use,
    clippy::lossy_float_literal,
    clippy::multiple_inherent_impl,
    clippy::print_stdout,
    clippy::rc_buffer,
    clippy::rc_mutex,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::separated_literal_suffix,
    clippy::str_to_string,
    clippy::string_add,
    clippy::string_to_string,
    clippy::try_err,
    clippy::unnecessary_self_imports,
    clippy::wildcard_enum_match_arm
)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use clap::Parser;
use log::info;

use linpred::config;
use linpred::error::Verify;

mod report;
mod source;

use report::Report;
use source::WavSignal;

/// Frame-wise LPC analysis of WAV files.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path for the output TOML file.
    #[clap(short, long)]
    output: String,
    /// Path for the input WAV file.
    source: String,
    /// If set, load config from the specified file.
    #[clap(short, long)]
    config: Option<String>,
    /// If set, dump the config used to the specified path.
    #[clap(long)]
    dump_config: Option<String>,
    /// If set, overrides the LPC order in the config.
    #[clap(long)]
    order: Option<usize>,
}

/// Exit codes of the analyzer process.
enum ExitCode {
    #[allow(dead_code)]
    Normal = 0,
    InvalidConfig = -1,
    InvalidSource = -2,
    AnalysisFailed = -3,
}

fn log_build_constants() {
    info!(
        target: "linpred-bin::build_info::jsonl",
        "{{ version: \"{}\", multithread_default: {} }}",
        linpred::constant::build_info::CRATE_VERSION,
        config::Lpc::default().multithread,
    );
}

fn load_config(args: &Args) -> config::Analysis {
    let mut analysis_config = args
        .config
        .as_ref()
        .map_or_else(config::Analysis::default, |path| {
            let conf_str = std::fs::read_to_string(path).expect("Config file read error.");
            toml::from_str(&conf_str).expect("Config file syntax error.")
        });
    if let Some(order) = args.order {
        analysis_config.order = order;
    }
    analysis_config
}

fn source_name(path: &str) -> String {
    Path::new(path).file_name().map_or_else(
        || path.to_owned(),
        |s| s.to_string_lossy().to_string(),
    )
}

fn main_body(args: Args) -> Result<(), i32> {
    log_build_constants();
    let analysis_config = load_config(&args);
    if let Err(e) = analysis_config.verify() {
        eprintln!("Error: {}", e.within("analysis_config"));
        return Err(ExitCode::InvalidConfig as i32);
    }

    let signal = match WavSignal::from_path(&args.source) {
        Ok(signal) => signal,
        Err(e) => {
            eprintln!("Error: failed to load {}: {e}", args.source);
            return Err(ExitCode::InvalidSource as i32);
        }
    };
    let analysis_start = Instant::now();
    let prediction = match linpred::analyze_frames(signal.samples(), &analysis_config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            return Err(ExitCode::AnalysisFailed as i32);
        }
    };
    let report = Report::new(
        &source_name(&args.source),
        signal.sample_rate(),
        &analysis_config,
        &prediction,
    );

    info!(
        target: "linpred-bin::analysis::jsonl",
        "{{ frames: {}, degenerate_frames: {}, channels: {}, duration_secs: {}, analysis_secs: {} }}",
        report.frames.len(),
        report.degenerate_count(),
        signal.channels(),
        signal.duration_as_secs(),
        analysis_start.elapsed().as_secs_f32(),
    );

    if let Some(path) = args.dump_config {
        let mut file = File::create(path).expect("Failed to create a file.");
        file.write_all(
            toml::to_string(&analysis_config)
                .expect("Config serialization failed.")
                .as_bytes(),
        )
        .expect("File write failed.");
    }

    let mut file = File::create(args.output).expect("Failed to create a file.");
    file.write_all(
        toml::to_string(&report)
            .expect("Report serialization failed.")
            .as_bytes(),
    )
    .expect("File write failed.");
    Ok(())
}

#[allow(clippy::expect_used)]
fn main() -> Result<(), i32> {
    env_logger::Builder::from_env("LINPRED_LOG")
        .format_timestamp(None)
        .init();
    main_body(Args::parse())
}
