use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use diffence_config::Config;
use diffence_engine::{FormatOptions, IndentPolicy, ScannerKind, format_markdown_with_report};
use std::{
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

/// Re-indent fenced diff blocks in Markdown to match their fence.
#[derive(Debug, Parser)]
#[command(name = "diffence", version, about)]
struct Args {
    /// Markdown file to format. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Write the result here instead of stdout.
    #[arg(short, long, conflicts_with_all = ["in_place", "check"])]
    output: Option<PathBuf>,

    /// Rewrite INPUT in place.
    #[arg(short, long, requires = "input", conflicts_with = "check")]
    in_place: bool,

    /// Write nothing; exit with status 1 if the document would change.
    #[arg(long)]
    check: bool,

    /// Re-indentation policy (overrides the config file).
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Fence scanner (overrides the config file).
    #[arg(long, value_enum)]
    scanner: Option<ScannerArg>,

    /// Config file to use instead of ~/.config/diffence/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a config file with default settings and exit.
    #[arg(long, conflicts_with_all = ["input", "output", "in_place", "check", "policy", "scanner"])]
    init_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    ChangedLines,
    Baseline,
}

impl From<PolicyArg> for IndentPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::ChangedLines => IndentPolicy::ChangedLines,
            PolicyArg::Baseline => IndentPolicy::Baseline,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScannerArg {
    Lines,
    Backtracking,
}

impl From<ScannerArg> for ScannerKind {
    fn from(s: ScannerArg) -> Self {
        match s {
            ScannerArg::Lines => ScannerKind::Lines,
            ScannerArg::Backtracking => ScannerKind::Backtracking,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Done,
    WouldReformat,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::WouldReformat) => ExitCode::from(1),
        Err(e) => {
            eprintln!("diffence: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<Outcome> {
    let config_path = args
        .config
        .as_ref()
        .map(|p| Config::expand_path(p).unwrap_or_else(|| p.clone()))
        .unwrap_or_else(Config::config_path);

    if args.init_config {
        Config::default().save_to_path(&config_path)?;
        eprintln!("Wrote default config to {}", config_path.display());
        return Ok(Outcome::Done);
    }

    let config = Config::load_from_path(&config_path)?.unwrap_or_default();
    log::debug!("config from {}: {config:?}", config_path.display());
    let opts = resolve_options(args, &config);

    let input_path = args.input.as_deref().filter(|p| *p != Path::new("-"));
    if args.in_place && input_path.is_none() {
        bail!("--in-place needs a file, not stdin");
    }
    let text = read_input(input_path, opts.limits.max_document_bytes)?;

    let (formatted, report) = format_markdown_with_report(&text, &opts)?;
    log::info!(
        "{} diff block(s), {} rewritten, {} line(s) changed",
        report.blocks_found,
        report.blocks_changed,
        report.lines_changed
    );

    let name = input_path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());

    if args.check {
        if report.changed() {
            eprintln!("{name}: would reformat");
            return Ok(Outcome::WouldReformat);
        }
        return Ok(Outcome::Done);
    }

    if args.in_place {
        if let Some(path) = input_path
            && report.changed()
        {
            std::fs::write(path, &formatted)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        return Ok(Outcome::Done);
    }

    match &args.output {
        Some(path) => std::fs::write(path, &formatted)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(formatted.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(Outcome::Done)
}

fn resolve_options(args: &Args, config: &Config) -> FormatOptions {
    let mut opts = config.format_options();
    if let Some(policy) = args.policy {
        opts.policy = policy.into();
    }
    if let Some(scanner) = args.scanner {
        opts.scanner = scanner.into();
    }
    opts
}

/// Reads at most `max + 1` bytes so an oversized document is rejected
/// without being loaded whole.
fn read_input(path: Option<&Path>, max: usize) -> Result<String> {
    let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
    let mut bytes = Vec::new();
    let name = match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            file.take(limit)
                .read_to_end(&mut bytes)
                .with_context(|| format!("failed to read {}", path.display()))?;
            path.display().to_string()
        }
        None => {
            io::stdin()
                .lock()
                .take(limit)
                .read_to_end(&mut bytes)
                .context("failed to read stdin")?;
            "stdin".to_string()
        }
    };

    if bytes.len() > max {
        bail!("{name} exceeds the {max} byte limit");
    }
    String::from_utf8(bytes).with_context(|| format!("{name} is not valid UTF-8"))
}
