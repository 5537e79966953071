use anyhow::Context;
use calorie_serve::adapters::batch::predict_csv;
use calorie_serve::core::artifacts::{DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH};
use calorie_serve::utils::logger;
use calorie_serve::{load_artifacts, ArtifactPaths, PredictionHandler};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};

#[derive(Parser)]
#[command(name = "batch-predict")]
#[command(about = "Predict calories for every row of a workout CSV")]
struct Args {
    /// Input CSV with Age,Gender,Height,Weight,Duration,Heart_Rate,Body_Temp columns
    input: String,

    /// Output CSV path (stdout when omitted)
    #[arg(short, long)]
    output: Option<String>,

    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model_path: String,

    #[arg(long, default_value = DEFAULT_SCALER_PATH)]
    scaler_path: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let context = load_artifacts(&ArtifactPaths::new(&args.model_path, &args.scaler_path))
        .context("failed to load model artifacts")?;
    let handler = PredictionHandler::new(context);

    let input = File::open(&args.input).with_context(|| format!("cannot open {}", args.input))?;
    let input = BufReader::new(input);

    let summary = match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create {}", path))?;
            predict_csv(&handler, input, BufWriter::new(file))?
        }
        None => predict_csv(&handler, input, io::stdout().lock())?,
    };

    tracing::info!(
        "📊 Processed {} rows: {} succeeded, {} failed",
        summary.rows,
        summary.succeeded,
        summary.failed
    );
    Ok(())
}
