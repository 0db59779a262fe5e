//! Replay a recorded landmark stream through the rep coach.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use repcoach_agents::{HeuristicBackend, SystemClock};
use repcoach_exercise::{BodySide, ExerciseKind};
use repcoach_session::{CoachConfig, FrameSource, LogPresenter, ReplaySource, SessionContext, SessionRunner};

#[derive(Parser, Debug)]
#[command(name = "repcoach", about = "Count reps and coach form from recorded pose landmarks")]
struct Args {
    /// JSON-lines landmark recording (`-` for stdin)
    input: PathBuf,

    /// Configuration file (toml, yaml or json)
    #[arg(long, short, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Exercise to count: bicep-curl, push-up, shoulder-press, front-raise,
    /// shoulder-rotation or neck-rotation
    #[arg(long, short)]
    exercise: Option<ExerciseKind>,

    /// Body side read by arm and trunk exercises
    #[arg(long)]
    side: Option<BodySide>,

    /// Coach credential. The bundled offline coach never reads it, so any
    /// non-blank value turns coaching on
    #[arg(long)]
    api_key: Option<String>,

    /// Seconds between coach requests
    #[arg(long)]
    cooldown: Option<f64>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(&self, config: &mut CoachConfig) {
        if let Some(exercise) = self.exercise {
            config.exercise = exercise;
        }
        if let Some(side) = self.side {
            config.side = side;
        }
        if let Some(api_key) = &self.api_key {
            config.advisor.api_key = Some(api_key.clone());
        }
        if let Some(cooldown) = self.cooldown {
            config.advisor.cooldown_secs = cooldown;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = CoachConfig::load(args.config.as_deref()).context("loading configuration")?;
    args.apply(&mut config);

    let context = SessionContext::new(config, Arc::new(HeuristicBackend::new()), Arc::new(SystemClock));
    let mut runner = SessionRunner::new(context);
    let mut presenter = LogPresenter::new();

    let mut source: Box<dyn FrameSource> = if args.input.as_os_str() == "-" {
        Box::new(ReplaySource::new(tokio::io::stdin()))
    } else {
        Box::new(
            ReplaySource::open(&args.input)
                .await
                .with_context(|| format!("opening {}", args.input.display()))?,
        )
    };

    let summary = runner.run(source.as_mut(), &mut presenter).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
