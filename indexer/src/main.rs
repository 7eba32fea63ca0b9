use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use irs_core::persist::{load_collection, load_snapshot, save_snapshot};
use irs_core::{render_results, Bm25Params, Collection, Config, PdfExtractor, PlainTextExtractor, TextExtractor};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

const EXIT_SENTINEL: &str = "$exit";

#[derive(Parser)]
#[command(name = "irs")]
#[command(about = "Build, update and query a BM25 document collection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BuildArgs {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Drop terms seen fewer times than this across the corpus
    #[arg(long)]
    min_freq: Option<u64>,
    /// Only files whose name contains this marker are indexed
    #[arg(long)]
    doc_marker: Option<String>,
    /// Read documents as plain UTF-8 text instead of PDF
    #[arg(long, default_value_t = false)]
    plain_text: bool,
}

#[derive(Args)]
struct QueryArgs {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    k1: Option<f64>,
    #[arg(long)]
    b: Option<f64>,
    /// Maximum number of documents printed per query
    #[arg(long)]
    top_k: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a collection from a directory of documents
    Build {
        /// Directory containing the documents
        #[arg(long)]
        input: PathBuf,
        /// Snapshot file to write
        #[arg(long)]
        output: PathBuf,
        #[command(flatten)]
        opts: BuildArgs,
    },
    /// Add the documents of a directory to an existing collection
    Update {
        /// Directory containing the new documents
        #[arg(long)]
        input: PathBuf,
        /// Snapshot file to update in place
        #[arg(long)]
        collection: PathBuf,
        #[command(flatten)]
        opts: BuildArgs,
    },
    /// Rank documents interactively, one query per line
    Query {
        #[arg(long)]
        collection: PathBuf,
        #[command(flatten)]
        opts: QueryArgs,
    },
    /// Print collection statistics
    Info {
        #[arg(long)]
        collection: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, opts } => build(&input, &output, &opts),
        Commands::Update { input, collection, opts } => update(&input, &collection, &opts),
        Commands::Query { collection, opts } => query(&collection, &opts),
        Commands::Info { collection } => info(&collection),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Config::load(p).with_context(|| format!("reading config {}", p.display())),
        None => Ok(Config::default()),
    }
}

fn build_collection(input: &Path, opts: &BuildArgs) -> Result<Collection> {
    let mut config = load_config(opts.config.as_deref())?.build;
    if let Some(min_freq) = opts.min_freq {
        config.min_freq = min_freq;
    }
    if let Some(marker) = &opts.doc_marker {
        config.doc_marker = marker.clone();
    }
    let extractor: Box<dyn TextExtractor> = if opts.plain_text {
        Box::new(PlainTextExtractor::new(config.doc_marker.clone()))
    } else {
        Box::new(PdfExtractor::with_marker(config.doc_marker.clone()))
    };
    Collection::build(input, extractor.as_ref(), config)
        .with_context(|| format!("building collection from {}", input.display()))
}

fn build(input: &Path, output: &Path, opts: &BuildArgs) -> Result<()> {
    let collection = build_collection(input, opts)?;
    save_snapshot(output, &collection).with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(output = %output.display(), "collection build complete");
    Ok(())
}

fn update(input: &Path, path: &Path, opts: &BuildArgs) -> Result<()> {
    let mut collection = load_collection(path).with_context(|| format!("loading {}", path.display()))?;
    let incoming = build_collection(input, opts)?;
    collection.merge(incoming).context("merging collections")?;
    save_snapshot(path, &collection).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(collection = %path.display(), "collection update complete");
    Ok(())
}

fn query(path: &Path, opts: &QueryArgs) -> Result<()> {
    let mut params: Bm25Params = load_config(opts.config.as_deref())?.bm25;
    if let Some(k1) = opts.k1 {
        params.k1 = k1;
    }
    if let Some(b) = opts.b {
        params.b = b;
    }
    if let Some(top_k) = opts.top_k {
        params.top_k = top_k;
    }
    params.validate()?;

    let collection = load_collection(path).with_context(|| format!("loading {}", path.display()))?;
    let mut rl = DefaultEditor::new()?;
    let prompt = format!("Enter your query (enter {EXIT_SENTINEL} to leave): ");
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim() == EXIT_SENTINEL {
                    break;
                }
                let _ = rl.add_history_entry(line.as_str());
                let results = collection.search(&line, &params)?;
                print!("{}", render_results(&line, &results));
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn info(path: &Path) -> Result<()> {
    let (header, collection) = load_snapshot(path).with_context(|| format!("loading {}", path.display()))?;
    println!("snapshot version:      {}", header.version);
    println!("created at:            {}", header.created_at);
    println!("documents scanned:     {}", collection.num_docs());
    println!("documents indexed:     {}", collection.doc_lengths().len());
    println!("vocabulary size:       {}", collection.vocabulary().len());
    println!("average doc length:    {:.3}", collection.avg_doc_length());
    Ok(())
}
