//! Command-line front end: build a pipeline, run it over `--text`, print the
//! result.
//!
//! Without `--spec` the pipeline is a single regex segmenter using
//! `--pattern`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use textstages::nlp::tokenizer::RegexSegmenter;
use textstages::{Document, PipelineController, PipelineError, PipelineSpec, Stage, StageSequence};

#[derive(Parser, Debug)]
#[command(
    name = "textstages",
    version,
    about = "Run a segment/annotate/analyze pipeline over a piece of text"
)]
struct Args {
    /// Text to process
    #[arg(long)]
    text: String,

    /// Regex pattern for segmentation (ignored when --spec is given)
    #[arg(long, default_value = RegexSegmenter::DEFAULT_PATTERN)]
    pattern: String,

    /// JSON pipeline spec describing the stages to run
    #[arg(long, value_name = "FILE")]
    spec: Option<PathBuf>,

    /// Print the processed document as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            if let Some(hint) = &err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), PipelineError> {
    let sequence = match &args.spec {
        Some(path) => load_spec(path)?.build()?,
        None => {
            let mut sequence = StageSequence::new();
            sequence.push(Stage::segmenter(RegexSegmenter::new(&args.pattern)?));
            sequence
        }
    };

    let controller = PipelineController::new(sequence);
    let mut doc = Document::new(args.text.as_str());
    let doc = controller.run(&mut doc)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&*doc)?);
        return Ok(());
    }

    println!("Tokens: {:?}", doc.segments);
    if !doc.annotations.is_empty() {
        println!("Tagged: {:?}", doc.annotations);
    }
    if let Some(structure) = &doc.structure {
        for tree in structure.trees() {
            println!("Structure: {tree}");
        }
    }
    Ok(())
}

fn load_spec(path: &Path) -> Result<PipelineSpec, PipelineError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        PipelineError::invalid_spec(format!("cannot read {}: {e}", path.display()))
    })?;
    PipelineSpec::from_json(&json)
}
