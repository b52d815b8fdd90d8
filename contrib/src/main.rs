//! Command-line interface for the contributor leaderboard generator.
//!
//! The `generate` subcommand fetches the contributor list of a repository and
//! writes the rendered leaderboard to a file or standard output. Diagnostics
//! and progress go to standard error so the document can be piped.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process,
    time::Duration
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use contrib::{
    DEFAULT_LIMIT, Error, GenerateRequest, GeneratorConfig, Layout, LeaderboardGenerator,
    OutputFormat, load_badge_rules, load_config, write_error
};
use indicatif::{ProgressBar, ProgressStyle};
use tempfile::NamedTempFile;
use tracing_subscriber::EnvFilter;

/// Command line interface for rendering contributor leaderboards.
#[derive(Debug, Parser)]
#[command(name = "contrib", version, about = "Generate contributor leaderboards")]
struct Cli {
    #[command(subcommand)]
    command: Command
}

#[derive(Debug, Subcommand)]
/// Supported commands exposed by the CLI.
enum Command {
    /// Generate a leaderboard snippet for a repository.
    Generate(GenerateArgs)
}

#[derive(Debug, Args)]
/// Arguments accepted by the `generate` subcommand.
struct GenerateArgs {
    /// GitHub repository in owner/name format.
    #[arg(short = 'r', long = "repo", value_name = "OWNER/NAME")]
    repo: String,

    /// Number of contributors to include (clamped to 1..=100).
    #[arg(short = 'n', long = "limit", default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Arrangement of contributors in SVG output.
    #[arg(long = "layout", value_enum)]
    layout: Option<LayoutArg>,

    /// Output document format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = FormatArg::Markdown)]
    format: FormatArg,

    /// Write the document to this file instead of standard output.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// GitHub personal access token.
    #[arg(short = 't', long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// YAML file with custom badge rules.
    #[arg(long = "badges", value_name = "PATH")]
    badges: Option<PathBuf>,

    /// Title displayed above the leaderboard.
    #[arg(long = "title")]
    title: Option<String>,

    /// YAML generator configuration file.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    Vertical,
    Horizontal
}

impl From<LayoutArg> for Layout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Vertical => Self::Vertical,
            LayoutArg::Horizontal => Self::Horizontal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Markdown,
    Svg
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Markdown => Self::Markdown,
            FormatArg::Svg => Self::Svg
        }
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("Error: {}", error.to_display_string());
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates configuration, fetch and output errors.
async fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args).await
    }
}

async fn run_generate(args: GenerateArgs) -> Result<(), Error> {
    let config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default()
    };
    let request = build_request(&args, &config);

    let mut generator = LeaderboardGenerator::from_config(&config);
    if let Some(path) = args.badges.as_deref() {
        generator = generator.with_assigner(load_badge_rules(path)?);
    }

    let spinner = start_spinner(&format!("Fetching contributors for {}...", request.repository));
    let document = match generator.generate(&request).await {
        Ok(document) => {
            spinner.finish_and_clear();
            document
        }
        Err(error) => {
            spinner.abandon_with_message(format!(
                "Failed to fetch contributors for {}",
                request.repository
            ));
            return Err(error);
        }
    };

    match args.output.as_deref() {
        Some(path) => {
            write_document_file(path, &document)?;
            eprintln!("Leaderboard written to {}", path.display());
        }
        None => {
            eprintln!("Leaderboard generated! Add this to your README:\n");
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_document(&mut handle, &document)
                .map_err(|source| write_error(Path::new("<stdout>"), source))?;
        }
    }

    Ok(())
}

fn build_request(args: &GenerateArgs, config: &GeneratorConfig) -> GenerateRequest {
    let mut options = config.render_options();
    if let Some(layout) = args.layout {
        options = options.with_layout(layout.into());
    }
    if let Some(title) = args.title.as_deref().map(str::trim).filter(|title| !title.is_empty()) {
        options = options.with_title(title);
    }

    GenerateRequest {
        repository: args.repo.trim().to_owned(),
        token: args
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_owned),
        limit: args.limit,
        format: args.format.into(),
        options
    }
}

fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.yellow} {msg}")
            .expect("valid template")
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn write_document<W: Write>(writer: &mut W, document: &str) -> io::Result<()> {
    writer.write_all(document.as_bytes())?;
    if !document.ends_with('\n') {
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Writes `document` next to `path` and renames it into place, so readers
/// never observe a truncated leaderboard.
fn write_document_file(path: &Path, document: &str) -> Result<(), Error> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new(".")
    };

    let mut staged =
        NamedTempFile::new_in(directory).map_err(|source| write_error(path, source))?;
    staged
        .write_all(document.as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|source| write_error(path, source))?;
    staged
        .persist(path)
        .map_err(|error| write_error(path, error.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use clap::Parser;
    use contrib::{Layout, OutputFormat, parse_config};
    use tempfile::tempdir;

    use super::{Cli, Command, FormatArg, GenerateArgs, LayoutArg, build_request, write_document,
        write_document_file};

    fn parse_generate(arguments: &[&str]) -> GenerateArgs {
        let mut argv = vec![env!("CARGO_PKG_NAME"), "generate"];
        argv.extend_from_slice(arguments);
        let cli = Cli::try_parse_from(argv).expect("failed to parse CLI");
        match cli.command {
            Command::Generate(args) => args
        }
    }

    #[test]
    fn generate_defaults() {
        let args = parse_generate(&["--repo", "octocat/hello"]);
        assert_eq!(args.repo, "octocat/hello");
        assert_eq!(args.limit, 3);
        assert_eq!(args.format, FormatArg::Markdown);
        assert!(args.layout.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn generate_accepts_all_flags() {
        let args = parse_generate(&[
            "-r",
            "octocat/hello",
            "-n",
            "10",
            "--layout",
            "horizontal",
            "--format",
            "svg",
            "-o",
            "board.svg",
            "--token",
            "abc",
            "--badges",
            "badges.yaml",
            "--title",
            "Stars",
            "--config",
            "contrib.yaml",
        ]);

        assert_eq!(args.limit, 10);
        assert_eq!(args.layout, Some(LayoutArg::Horizontal));
        assert_eq!(args.format, FormatArg::Svg);
        assert_eq!(args.token.as_deref(), Some("abc"));
        assert!(args.badges.is_some());
        assert!(args.config.is_some());
    }

    #[test]
    fn generate_requires_repo() {
        let result = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "generate"]);
        assert!(result.is_err());
    }

    #[test]
    fn generate_rejects_unknown_format() {
        let result = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "generate",
            "--repo",
            "a/b",
            "--format",
            "png",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_flags_override_configuration() {
        let config = parse_config("layout: vertical\ntitle: From Config\n").expect("valid config");
        let args = parse_generate(&[
            "--repo",
            " octocat/hello ",
            "--layout",
            "horizontal",
            "--title",
            "From Flag",
            "--token",
            "  ",
            "--format",
            "svg",
        ]);

        let request = build_request(&args, &config);
        assert_eq!(request.repository, "octocat/hello");
        assert_eq!(request.options.layout, Layout::Horizontal);
        assert_eq!(request.options.title, "From Flag");
        assert_eq!(request.format, OutputFormat::Svg);
        assert!(request.token.is_none());
    }

    #[test]
    fn configuration_applies_without_flags() {
        let config =
            parse_config("layout: horizontal\ntitle: From Config\n").expect("valid config");
        let args = parse_generate(&["--repo", "octocat/hello"]);

        let request = build_request(&args, &config);
        assert_eq!(request.options.layout, Layout::Horizontal);
        assert_eq!(request.options.title, "From Config");
    }

    #[test]
    fn write_document_appends_trailing_newline() {
        let mut buffer = Cursor::new(Vec::new());
        write_document(&mut buffer, "- line").expect("write failed");
        assert_eq!(buffer.into_inner(), b"- line\n");

        let mut buffer = Cursor::new(Vec::new());
        write_document(&mut buffer, "<svg/>\n").expect("write failed");
        assert_eq!(buffer.into_inner(), b"<svg/>\n");
    }

    #[test]
    fn write_document_file_reports_missing_directory() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("missing").join("board.md");

        let error = write_document_file(&path, "doc").expect_err("expected write failure");
        assert!(matches!(error, contrib::Error::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn write_document_file_replaces_existing_file_whole() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("board.svg");
        fs::write(&path, "previous leaderboard that is much longer than the new one")
            .expect("seed file");

        write_document_file(&path, "<svg/>\n").expect("write failed");

        assert_eq!(fs::read_to_string(&path).expect("readable"), "<svg/>\n");
        let entries = fs::read_dir(temp.path()).expect("listable").count();
        assert_eq!(entries, 1, "staging file must not be left behind");
    }

    #[test]
    fn write_document_file_failure_keeps_previous_content() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("board.md");
        fs::create_dir(&path).expect("directory in place of target");

        let error = write_document_file(&path, "doc").expect_err("expected write failure");
        assert!(matches!(error, contrib::Error::Write { .. }));
        assert!(path.is_dir());
        let entries = fs::read_dir(temp.path()).expect("listable").count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn write_document_file_persists_content() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("board.md");

        write_document_file(&path, "### Top Contributors\n").expect("write failed");
        assert_eq!(fs::read_to_string(&path).expect("readable"), "### Top Contributors\n");
    }
}
