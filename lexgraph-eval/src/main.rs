//! `lexgraph-eval` CLI: evaluate NL → Cypher strategies over a labeled
//! question set and write `results.jsonl` + `summary.csv`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use lexgraph_core::config::LexConfig;
use lexgraph_nl2cypher::{GenerationEngine, GenerationMode};

use lexgraph_eval::neo4j::Neo4jHttpExecutor;
use lexgraph_eval::{dataset, evaluate, report};

#[derive(Debug, Parser)]
#[command(name = "lexgraph-eval", version, about = "Offline NL → Cypher evaluation harness")]
struct Args {
    /// Optional TOML config file ([pipeline], [model], [eval] sections).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Question dataset CSV (qid,question,gt_type,gt_payload).
    #[arg(long, default_value = "data/questions.csv")]
    data: PathBuf,

    /// Strategies to evaluate: rules, model, auto.
    #[arg(long, value_delimiter = ',', default_value = "rules")]
    engines: Vec<GenerationMode>,

    /// Chat model for model-backed strategies. Overrides the config file.
    #[arg(long)]
    model: Option<String>,

    /// Evaluate at most N questions (0 = all). Overrides the config file.
    #[arg(long)]
    limit: Option<usize>,

    /// Directory for results.jsonl and summary.csv. Overrides the config file.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn load_config(args: &Args) -> anyhow::Result<LexConfig> {
    match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            LexConfig::from_toml_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(LexConfig::default()),
    }
}

fn needs_model(modes: &[GenerationMode]) -> bool {
    modes
        .iter()
        .any(|m| matches!(m, GenerationMode::ModelOnly | GenerationMode::Auto))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let limit = args.limit.unwrap_or(config.eval.limit);
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.eval.out_dir));

    let mut questions = dataset::load_csv(&args.data)
        .with_context(|| format!("loading question set {}", args.data.display()))?;
    if limit > 0 {
        questions.truncate(limit);
    }

    let executor = Neo4jHttpExecutor::from_env();

    #[cfg(feature = "openai")]
    let model_client = if needs_model(&args.engines) {
        let mut model_config = config.model.clone();
        if let Some(name) = &args.model {
            model_config.name = name.clone();
        }
        match lexgraph_nl2cypher::openai::OpenAiClient::from_env(model_config) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!(error = %err, "model strategies will produce no query");
                None
            }
        }
    } else {
        None
    };

    #[cfg(not(feature = "openai"))]
    if needs_model(&args.engines) {
        warn!("built without the 'openai' feature; model strategies will produce no query");
    }

    let engine = GenerationEngine::new(&executor, config.pipeline.clone());
    #[cfg(feature = "openai")]
    let engine = match &model_client {
        Some(client) => engine.with_model(client),
        None => engine,
    };

    let (records, summaries) = evaluate(&questions, &args.engines, &engine);
    report::write_reports(&out_dir, &records, &summaries)
        .context("writing evaluation reports")?;

    println!("=== Summary per strategy ===");
    for s in &summaries {
        println!(
            "{:<10} n={:<4} ok={:<4} error={:<4} ok_rate={:.2} fallback={:<4} f1_mean={} ms_p50={} ms_p95={} rows_mean={:.1}",
            s.strategy,
            s.n,
            s.ok,
            s.error,
            s.ok_rate,
            s.fallback,
            s.f1_mean.map(|v| format!("{v:.3}")).unwrap_or_else(|| "-".into()),
            s.ms_p50.map(|v| format!("{v:.0}")).unwrap_or_else(|| "-".into()),
            s.ms_p95.map(|v| format!("{v:.0}")).unwrap_or_else(|| "-".into()),
            s.rows_mean,
        );
    }
    println!("Wrote {}", out_dir.join("results.jsonl").display());
    println!("Wrote {}", out_dir.join("summary.csv").display());
    Ok(())
}
