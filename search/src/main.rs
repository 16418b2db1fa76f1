mod corpus;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use search_core::report::{write_outcome, DEFAULT_TEST_QUERIES};
use search_core::{run_batch, InvertedIndex, UrlMap};
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Keyword search over a directory of HTML pages", long_about = None)]
struct Cli {
    /// Directory containing the .html/.htm pages to index
    #[arg(long, global = true, default_value = "webpages")]
    webpages: PathBuf,
    /// File name to URL mapping; defaults to <webpages>/input.txt
    #[arg(long, global = true)]
    url_map: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read queries from stdin until `exit` (default)
    Interactive,
    /// Run a fixed query list and write the transcript to a file
    Test {
        /// Transcript path, or `-` for stdout
        #[arg(long, default_value = "output.txt")]
        output: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Query to run; repeatable. Without any, the built-in list is used
        #[arg(long = "query")]
        queries: Vec<String>,
        /// File with one query per line
        #[arg(long, conflicts_with = "queries")]
        queries_file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let url_map_path = cli.url_map.clone().unwrap_or_else(|| cli.webpages.join("input.txt"));
    let urls = UrlMap::load_or_empty(&url_map_path);
    let index = build_index(&cli.webpages)?;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => run_interactive(&index, &urls),
        Commands::Test { output, format, queries, queries_file } => {
            let queries = select_queries(queries, queries_file.as_deref())?;
            run_test(&index, &urls, &queries, &output, format)
        }
    }
}

/// Queries from `--queries-file`, else `--query` flags, else the built-in list.
fn select_queries(queries: Vec<String>, queries_file: Option<&Path>) -> Result<Vec<String>> {
    let queries = match queries_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading queries from {}", path.display()))?
            .lines()
            .map(str::to_string)
            .collect(),
        None if queries.is_empty() => DEFAULT_TEST_QUERIES.iter().map(|q| q.to_string()).collect(),
        None => queries,
    };
    Ok(queries)
}

fn build_index(dir: &Path) -> Result<InvertedIndex> {
    let docs = corpus::load_documents(dir)?;
    let mut index = InvertedIndex::new();
    index.build(docs);
    Ok(index)
}

fn run_test(index: &InvertedIndex, urls: &UrlMap, queries: &[String], output: &str, format: Format) -> Result<()> {
    let mut out: Box<dyn Write> = if output == "-" {
        Box::new(io::stdout().lock())
    } else {
        let f = File::create(output).with_context(|| format!("creating {output}"))?;
        Box::new(BufWriter::new(f))
    };
    write_transcript(index, urls, queries, &mut out, format)?;
    out.flush()?;
    if output != "-" {
        println!("Test output saved to {output}");
    }
    tracing::info!(queries = queries.len(), output, "test run complete");
    Ok(())
}

/// Only the transcript goes to `out`; progress is logged on stderr.
fn write_transcript<W: Write>(index: &InvertedIndex, urls: &UrlMap, queries: &[String], out: &mut W, format: Format) -> Result<()> {
    let transcript = run_batch(index, queries);
    match format {
        Format::Text => transcript.write_text(out, urls)?,
        Format::Json => transcript.write_json(out, urls)?,
    }
    Ok(())
}

fn run_interactive(index: &InvertedIndex, urls: &UrlMap) -> Result<()> {
    println!("\nMini Search Engine");
    println!("Type 'exit' to quit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        write!(stdout, "\nEnter search query: ")?;
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim_end_matches(['\r', '\n']);
        if query.trim().eq_ignore_ascii_case("exit") {
            println!("Exiting search engine. Goodbye!");
            break;
        }
        let outcome = index.query(query);
        tracing::debug!(query, disposition = ?outcome.disposition, "served query");
        write_outcome(&mut stdout, &outcome, urls)?;
    }
    Ok(())
}
