use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};

use pdfrag_ai::embeddings::openai_embed::OpenAiEmbedder;
use pdfrag_ai::llm::openai_llm::OpenAiLlm;
use pdfrag_ai::openai::OpenAiConfig;
use pdfrag_cli::logging;
use pdfrag_cli::output::LlmMeta;
use pdfrag_cli::run::{run_query, QueryArgs, QueryOutcome};

#[derive(Debug, Parser)]
#[command(
    name = "query-rag",
    version,
    about = "Answer questions against a persisted PDF index"
)]
struct Cli {
    /// Directory holding a previously persisted index.
    #[arg(long)]
    persist_dir: PathBuf,
    /// Single question to ask (answered before any file questions).
    #[arg(long)]
    question: Option<String>,
    /// Line-delimited JSON file with a "question" field per line.
    #[arg(long)]
    questions_file: Option<PathBuf>,
    /// Output directory for answers.jsonl and run_meta.json.
    #[arg(long, default_value = "runs/rag_out")]
    out: PathBuf,
    /// Increase logging verbosity (use -vv for trace level).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = OpenAiConfig::from_env();
    let llm_meta = LlmMeta {
        model: config.model.clone(),
        base_url: config.base_url.clone(),
    };
    let embedder = OpenAiEmbedder::new(config.clone());
    let llm = OpenAiLlm::new(config);

    let args = QueryArgs {
        persist_dir: cli.persist_dir,
        question: cli.question,
        questions_file: cli.questions_file,
        out: cli.out,
    };
    match run_query(&args, &embedder, &llm, &llm_meta)? {
        QueryOutcome::NoQuestions => {
            println!("No question provided.");
        }
        QueryOutcome::Answered { answers_path, .. } => {
            println!("Wrote: {}", answers_path.display());
        }
    }
    Ok(())
}
