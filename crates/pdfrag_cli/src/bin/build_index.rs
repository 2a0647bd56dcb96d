use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing::info;

use pdfrag_ai::embeddings::openai_embed::OpenAiEmbedder;
use pdfrag_ai::openai::OpenAiConfig;
use pdfrag_cli::logging;
use pdfrag_cli::run::{run_build, BuildArgs, BuildOutcome};

#[derive(Debug, Parser)]
#[command(
    name = "build-index",
    version,
    about = "Build and persist a vector index from a directory of PDFs"
)]
struct Cli {
    /// Directory containing PDFs (searched recursively).
    #[arg(long)]
    input_dir: PathBuf,
    /// Where to persist the index storage.
    #[arg(long)]
    persist_dir: PathBuf,
    /// Embedding model identifier.
    #[arg(long, default_value = "sentence-transformers/all-MiniLM-L6-v2")]
    embed_model: String,
    /// Chunk size in characters.
    #[arg(long, default_value_t = 1024)]
    chunk_size: usize,
    /// Overlap between consecutive chunks, in characters.
    #[arg(long, default_value_t = 100)]
    chunk_overlap: usize,
    /// Increase logging verbosity (use -vv for trace level).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // The embedding endpoint connection comes from the same env family as
    // the query side (OPENAI_API_KEY / OPENAI_BASE_URL); the flag names the
    // model served on the /embeddings route.
    let embedder = OpenAiEmbedder::new(OpenAiConfig::from_env());

    let args = BuildArgs {
        input_dir: cli.input_dir,
        persist_dir: cli.persist_dir,
        embed_model: cli.embed_model,
        chunk_size: cli.chunk_size,
        chunk_overlap: cli.chunk_overlap,
    };
    match run_build(&args, &embedder)? {
        BuildOutcome::NoPdfs => {
            println!(
                "No PDFs found. Place files under: {}",
                args.input_dir.display()
            );
        }
        BuildOutcome::Built(manifest) => {
            info!(
                chunks = manifest.chunk_count,
                dims = manifest.dims,
                "index build complete"
            );
            println!("Index built & persisted to: {}", args.persist_dir.display());
        }
    }
    Ok(())
}
