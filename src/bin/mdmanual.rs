//! CLI binary for mdmanual.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ManualConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mdmanual::{
    assemble, assemble_to_file, assemble_to_pdf, AssemblyProgressCallback, ManualConfig,
    ProgressCallback,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a progress bar on stderr plus one line per
/// processed file.
struct CliProgressCallback {
    bar: ProgressBar,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    /// Spinner until `on_assembly_start` reports how many files there are.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message("Looking for Markdown files…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Assembling");
    }
}

impl AssemblyProgressCallback for CliProgressCallback {
    fn on_assembly_start(&self, total_files: usize) {
        self.activate_bar(total_files);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Assembling {total_files} files…"))
        ));
    }

    fn on_file_start(&self, _index: usize, _total: usize, path: &str) {
        self.bar.set_message(path.to_string());
    }

    fn on_file_complete(&self, index: usize, total: usize, path: &str, html_len: usize) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            green("✓"),
            index,
            total,
            path,
            dim(&format!("{html_len:>6} bytes")),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, index: usize, total: usize, path: &str, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            red("✗"),
            index,
            total,
            path,
            red(error),
        ));
        self.bar.abandon();
    }

    fn on_assembly_complete(&self, total_files: usize, html_len: usize) {
        self.bar.finish_and_clear();
        if self.errors.load(Ordering::SeqCst) == 0 {
            eprintln!(
                "{} {} files assembled  {}",
                green("✔"),
                bold(&total_files.to_string()),
                dim(&format!("{html_len} bytes of HTML")),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Assemble papers/ and print HTML (stdout)
  mdmanual

  # Pipe straight into WeasyPrint
  mdmanual | weasyprint --base-url . - manual.pdf

  # Render the PDF directly (WeasyPrint must be installed)
  mdmanual --pdf manual.pdf

  # Another documentation tree and repository
  mdmanual docs --primary-segment guide \
      --repo-base-url https://github.com/acme/widget/tree/main/ -o manual.html

  # Section list and statistics as JSON
  mdmanual --json > manual.json

LAYOUT:
  Files whose path contains /<primary-segment>/ form the main manual, ordered
  by path with each directory's README.md first. All other Markdown files
  follow, appendix-style, in path order.

  Assets are referenced relative to the working directory:
    fonts/IBMPlexSans-{Regular,Bold,Italic,BoldItalic}.ttf
    logo.png

ENVIRONMENT VARIABLES:
  WEASYPRINT_BIN   Path to the WeasyPrint executable (default: search PATH)
  RUST_LOG         Override the log filter (e.g. RUST_LOG=mdmanual=debug)
"#;

/// Assemble a tree of Markdown files into a single print-ready HTML manual.
#[derive(Parser, Debug)]
#[command(
    name = "mdmanual",
    version,
    about = "Assemble a tree of Markdown files into a single print-ready HTML manual",
    long_about = "Collect every Markdown file under ROOT, order them README-first, turn \
cross-file links into in-document page references, and wrap the result in a print \
stylesheet ready for HTML-to-PDF rendering.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory holding the Markdown tree.
    #[arg(default_value = "papers", env = "MDMANUAL_ROOT")]
    root: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long, env = "MDMANUAL_OUTPUT", conflicts_with = "pdf")]
    output: Option<PathBuf>,

    /// Render a PDF with WeasyPrint to this path.
    #[arg(long, env = "MDMANUAL_PDF")]
    pdf: Option<PathBuf>,

    /// Base directory for relative paths, anchors and assets (default: current directory).
    #[arg(long, env = "MDMANUAL_WORKING_DIR")]
    working_dir: Option<PathBuf>,

    /// Directory name marking the main manual; other files are appended at the end.
    #[arg(long, env = "MDMANUAL_PRIMARY_SEGMENT", default_value = mdmanual::config::DEFAULT_PRIMARY_SEGMENT)]
    primary_segment: String,

    /// URL prefix of repository links to rewrite into in-document anchors.
    #[arg(long, env = "MDMANUAL_REPO_BASE_URL", default_value = mdmanual::config::DEFAULT_REPO_BASE_URL)]
    repo_base_url: String,

    /// Keep single newlines inside paragraphs as soft breaks.
    #[arg(long, env = "MDMANUAL_NO_HARD_BREAKS")]
    no_hard_breaks: bool,

    /// Output structured JSON (sections and statistics) instead of HTML.
    #[arg(long, env = "MDMANUAL_JSON", conflicts_with = "pdf")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "MDMANUAL_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MDMANUAL_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MDMANUAL_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // With the progress bar active it already names every file, so library
    // INFO lines would only duplicate it.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn AssemblyProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run assembly ─────────────────────────────────────────────────────
    if let Some(ref pdf_path) = cli.pdf {
        let output = assemble_to_pdf(&config, pdf_path).context("PDF rendering failed")?;
        if !cli.quiet {
            eprintln!(
                "{}  {} sections  {}ms  →  {}",
                green("✔"),
                output.stats.file_count,
                output.stats.total_duration_ms,
                bold(&pdf_path.display().to_string()),
            );
        }
    } else if let Some(ref output_path) = cli.output {
        let stats = assemble_to_file(&config, output_path).context("Assembly failed")?;
        if !cli.quiet {
            eprintln!(
                "{}  {} sections  {}ms  →  {}",
                green("✔"),
                stats.file_count,
                stats.total_duration_ms,
                bold(&output_path.display().to_string()),
            );
        }
    } else {
        let output = assemble(&config).context("Assembly failed")?;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output.html.as_bytes())
                .context("Failed to write to stdout")?;
            handle.flush().context("Failed to write to stdout")?;
        }

        if !cli.quiet && !show_progress && !cli.json {
            eprintln!(
                "Assembled {} sections in {}ms",
                output.stats.file_count, output.stats.total_duration_ms
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ManualConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ManualConfig> {
    let mut builder = ManualConfig::builder()
        .root_dir(&cli.root)
        .primary_segment(cli.primary_segment.trim_matches('/'))
        .repo_base_url(normalize_base_url(&cli.repo_base_url))
        .hard_line_breaks(!cli.no_hard_breaks);

    if let Some(ref dir) = cli.working_dir {
        builder = builder.working_dir(dir);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Accept a base URL with or without its trailing slash.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
