//! Chiplet Architecture Estimator CLI.
//!
//! Thin wrapper around the library: collects raw parameters from flags or a
//! JSON batch file, hands them to the validator and estimator, and prints
//! the results.
//!
//! # Usage
//!
//! 1. **Single Mode**: every hardware flag is given; workload flags are
//!    optional and default to the calibration's `[workload]` section.
//! 2. **Batch Mode**: `--batch sweep.json` evaluates every entry of a JSON
//!    array; workload flags then act as defaults for the entries.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;

extern crate chiplet_sim;

use chiplet_sim::chiplet::validate;
use chiplet_sim::config::ModelConfig;
use chiplet_sim::report;
use chiplet_sim::sim::batch;
use chiplet_sim::{ChipletConfig, Estimator, RawConfig, SimulationResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

/// Command-line arguments for the chiplet estimator.
///
/// Parameter flags are taken as text and validated by the library so that
/// flags and batch entries go through the same parse-and-validate step.
#[derive(Parser, Debug)]
#[command(author, version, about = "Chiplet Architecture Estimator")]
struct Args {
    /// Calibration file (TOML); built-in defaults when omitted
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// JSON array of configurations to evaluate
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Number of CPU dies
    #[arg(long = "cpu_dies", allow_hyphen_values = true)]
    cpu_dies: Option<String>,

    /// CPU cores per die
    #[arg(long = "cpu_cores", allow_hyphen_values = true)]
    cpu_cores: Option<String>,

    /// Number of NPU dies
    #[arg(long = "npu_dies", allow_hyphen_values = true)]
    npu_dies: Option<String>,

    /// NPU cores per die
    #[arg(long = "npu_cores", allow_hyphen_values = true)]
    npu_cores: Option<String>,

    /// Interconnect bandwidth (GB/s)
    #[arg(long = "interconnect_bw", allow_hyphen_values = true)]
    interconnect_bw: Option<String>,

    /// Memory bandwidth (GB/s)
    #[arg(long = "memory_bw", allow_hyphen_values = true)]
    memory_bw: Option<String>,

    /// CPU FLOPs per inference
    #[arg(long = "cpu_flops", allow_hyphen_values = true)]
    cpu_flops: Option<String>,

    /// NPU FLOPs per inference
    #[arg(long = "npu_flops", allow_hyphen_values = true)]
    npu_flops: Option<String>,

    /// Inference frequency (inferences/s)
    #[arg(long = "inference_freq", allow_hyphen_values = true)]
    inference_freq: Option<String>,

    /// Linux task DMIPS
    #[arg(long = "linux_dmips", allow_hyphen_values = true)]
    linux_dmips: Option<String>,

    /// Data size per inference (GB)
    #[arg(long = "data_size", allow_hyphen_values = true)]
    data_size: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Print power, OS task and latency budget details per configuration
    #[arg(long)]
    breakdown: bool,
}

impl Args {
    /// Collects the parameter flags into a raw configuration.
    fn raw_config(&self) -> RawConfig {
        let flags = [
            (validate::CPU_DIES, &self.cpu_dies),
            (validate::CPU_CORES_PER_DIE, &self.cpu_cores),
            (validate::NPU_DIES, &self.npu_dies),
            (validate::NPU_CORES_PER_DIE, &self.npu_cores),
            (validate::INTERCONNECT_BW, &self.interconnect_bw),
            (validate::MEMORY_BW, &self.memory_bw),
            (validate::CPU_FLOPS, &self.cpu_flops),
            (validate::NPU_FLOPS, &self.npu_flops),
            (validate::INFERENCE_FREQ, &self.inference_freq),
            (validate::LINUX_DMIPS, &self.linux_dmips),
            (validate::DATA_SIZE, &self.data_size),
        ];

        let mut raw = RawConfig::default();
        for (field, value) in flags {
            if let Some(value) = value {
                raw.set(field, value.as_str());
            }
        }
        raw
    }
}

/// Main entry point for the chiplet estimator.
///
/// # Behavior
///
/// 1. **Configuration**: Parses flags and loads the calibration file.
/// 2. **Validation**: Builds raw configurations and validates them.
/// 3. **Estimation**: Evaluates each valid configuration.
/// 4. **Output**: Prints the table (or JSON) and optional breakdowns.
///
/// Exits with code 1 if the calibration or batch file cannot be loaded, or
/// if the single configuration is rejected.
fn main() {
    env_logger::init();
    let args = Args::parse();

    let model = match &args.model {
        Some(path) => ModelConfig::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => ModelConfig::default(),
    };
    let defaults = RawConfig::from(&model.workload);
    let estimator = Estimator::new(model).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let raw = args.raw_config();
    let results: Vec<SimulationResult> = if let Some(path) = &args.batch {
        let entries = batch::load_batch(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });
        let entry_defaults = batch::entry_defaults(&raw, &defaults);
        let outcome = batch::run_batch(&entries, &entry_defaults, &estimator);
        for (index, err) in outcome.rejected() {
            eprintln!("[!] Skipped entry #{}: {}", index, err);
        }
        outcome.results().copied().collect()
    } else {
        let config = ChipletConfig::try_from(raw.or(&defaults)).unwrap_or_else(|e| {
            eprintln!("Error: invalid configuration: {}", e);
            process::exit(1);
        });
        vec![estimator.estimate(&config)]
    };

    match args.format {
        Format::Table => print!("{}", report::render_table(&results)),
        Format::Json => match report::render_json(&results) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
    }

    if args.breakdown {
        for result in &results {
            print!("{}", report::render_breakdown(result));
        }
    }
}
