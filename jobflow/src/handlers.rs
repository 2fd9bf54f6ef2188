use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use jobflow_core::model::FlowSummary;
use jobflow_core::report::{
    ChartOptions, ReportFormat, generate_html_report, generate_json_report, generate_text_report,
    save_report,
};
use jobflow_core::{FlowError, build_flows, read_records, summarize};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{Level, debug, info, warn};

pub const DEFAULT_INPUT: &str = "251208_OfficeTrackApplications.csv";
pub const DEFAULT_OUTPUT: &str = "job_application_sankey.html";

/// Everything needed for one run, resolved from the command line
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub format: ReportFormat,
    pub chart: ChartOptions,
    pub show: bool,
}

impl RenderOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            format: ReportFormat::Html,
            chart: ChartOptions::default(),
            show: false,
        }
    }

    /// Where the report lands on disk. `None` means print it instead.
    pub fn output_path(&self) -> Option<PathBuf> {
        match (&self.output, self.format) {
            (Some(path), _) => Some(path.clone()),
            (None, ReportFormat::Html) => Some(PathBuf::from(DEFAULT_OUTPUT)),
            (None, ReportFormat::Json) => Some(Path::new(DEFAULT_OUTPUT).with_extension("json")),
            (None, ReportFormat::Text) => None,
        }
    }
}

/// Result of a run: the headline numbers, plus where the report went
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub summary: FlowSummary,
    pub written: Option<PathBuf>,
    pub printed: Option<String>,
}

/// Expand a leading `~` in a user supplied path
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

pub fn render_options_from_args(args: &ArgMatches) -> RenderOptions {
    let input = args
        .get_one::<String>("INPUT")
        .map(|s| expand_path(s))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let output = args.get_one::<String>("output").map(|s| expand_path(s));
    let format = args
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Html);

    let mut chart = ChartOptions::default();
    if let Some(title) = args.get_one::<String>("title") {
        chart.title = title.clone();
    }

    RenderOptions {
        input,
        output,
        format,
        chart,
        show: !args.get_flag("no-show"),
    }
}

/// Load, aggregate and render. Writes or returns the report, never displays it.
pub fn run(options: &RenderOptions) -> Result<RenderOutcome> {
    let records = read_records(&options.input)?;
    let flows = build_flows(&records);
    let summary = summarize(&records, &flows);

    let content = match options.format {
        ReportFormat::Html => generate_html_report(&flows, &options.chart)
            .context("Failed to render HTML report")?,
        ReportFormat::Json => generate_json_report(&flows, &summary, &options.chart)
            .context("Failed to render JSON report")?,
        ReportFormat::Text => generate_text_report(&flows, &summary, &options.chart.title),
    };

    match options.output_path() {
        Some(path) => {
            save_report(&content, &path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
            Ok(RenderOutcome {
                summary,
                written: Some(path),
                printed: None,
            })
        }
        None => Ok(RenderOutcome {
            summary,
            written: None,
            printed: Some(content),
        }),
    }
}

pub fn handle_render(args: &ArgMatches) {
    let options = render_options_from_args(args);
    let quiet = args.get_flag("quiet");
    debug!("Render options: {:?}", options);

    let outcome = match run(&options) {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(FlowError::InputNotFound(_)) = e.downcast_ref::<FlowError>() {
                println!("{}", e);
            } else {
                eprintln!("{} {:#}", "✗".red().bold(), e);
            }
            std::process::exit(1);
        }
    };

    if let Some(text) = &outcome.printed {
        print!("{}", text);
    }

    if let Some(path) = &outcome.written {
        if !quiet {
            println!(
                "{} Sankey diagram saved to '{}'",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
            println!(
                "{} {} applications, {} applied",
                "→".blue(),
                outcome.summary.total_rows.to_string().cyan(),
                outcome.summary.applied_rows.to_string().cyan()
            );
        }

        if options.show && options.format == ReportFormat::Html {
            if let Err(e) = show_report(path) {
                warn!("Could not open {} in a viewer: {}", path.display(), e);
            }
        }
    }
}

/// Open the page with the platform's default handler
pub fn show_report(path: &Path) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };

    command
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

pub fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
