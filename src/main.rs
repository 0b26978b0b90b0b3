use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use color_eyre::eyre::Result;

use scene_svm::PipelineParameters;
use scene_svm::pipeline;
use scene_svm::preprocessing::SplitStrategy;

#[derive(Debug,Clone,Copy,ValueEnum)]
enum SplitArg {
    Positional,
    Directory
}

impl From<SplitArg> for SplitStrategy {
    fn from(arg: SplitArg) -> SplitStrategy {
        match arg {
            SplitArg::Positional => SplitStrategy::Positional,
            SplitArg::Directory => SplitStrategy::Directory
        }
    }
}

#[derive(Parser)]
#[command(name = "scene-svm")]
#[command(about = "Train and evaluate a linear SVM on fused HOG, SIFT and colour features")]
#[command(version)]
struct Cli {
    /// Dataset root holding train/ and test/ category directories.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// YAML file with pipeline parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// How examples are partitioned into training and evaluation sets.
    #[arg(long, value_enum)]
    split: Option<SplitArg>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => PipelineParameters::from_yaml_file(path)?,
        None => PipelineParameters::default()
    };
    if let Some(data_dir) = cli.data_dir {
        params.dataset_root = data_dir;
    }
    if let Some(split) = cli.split {
        params.split.strategy = split.into();
    }

    let evaluation = pipeline::run(&params)?;
    println!("{}", evaluation.report);

    Ok(())
}
