use clap::{Parser, ValueEnum};
use ncc2d::io::{load_gray_image, save_response_png};
use ncc2d::{CorrelationConfig, Correlator, Method, NccError, ResponseMap, Template};
use serde::Serialize;
use std::fs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_BAD_ARGS: u8 = 1;
const EXIT_IO: u8 = 2;
const EXIT_PRECONDITION: u8 = 3;
const EXIT_OTHER: u8 = 4;

const OUTPUT_FILE: &str = "correlated.png";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "2D grayscale normalized cross-correlation",
    long_about = "2D grayscale normalized cross-correlation.\n\n\
        Writes the rescaled response map to correlated.png in the working directory. \
        Only --image and --template are required; the other flags are optional extras \
        and never change the output file name."
)]
struct Cli {
    /// Image to search in.
    #[arg(long, value_name = "PATH")]
    image: PathBuf,
    /// Template to search for; must be smaller than the image on both axes.
    #[arg(long, value_name = "PATH")]
    template: PathBuf,
    /// Window scoring strategy.
    #[arg(long, value_enum, default_value_t = MethodArg::Moments)]
    method: MethodArg,
    /// Score rows in parallel.
    #[arg(long)]
    parallel: bool,
    /// Write a JSON summary of the response map.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
enum MethodArg {
    Direct,
    Moments,
}

impl From<MethodArg> for Method {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::Direct => Method::Direct,
            MethodArg::Moments => Method::Moments,
        }
    }
}

#[derive(Debug, Serialize)]
struct PeakRecord {
    x: usize,
    y: usize,
    score: f32,
}

#[derive(Debug, Serialize)]
struct Report {
    image: [usize; 2],
    template: [usize; 2],
    method: MethodArg,
    peak: Option<PeakRecord>,
    min: Option<f32>,
    max: Option<f32>,
    degenerate_template: bool,
    degenerate_patches: usize,
}

impl Report {
    fn new(cli: &Cli, template: &Template, map: &ResponseMap) -> Self {
        let extremes = map.extremes();
        Self {
            image: [map.width(), map.height()],
            template: [template.width(), template.height()],
            method: cli.method,
            peak: map.peak().map(|(x, y, score)| PeakRecord { x, y, score }),
            min: extremes.map(|e| e.min_value),
            max: extremes.map(|e| e.max_value),
            degenerate_template: map.degenerate_template(),
            degenerate_patches: map.degenerate_patches(),
        }
    }
}

enum Failure {
    Lib(NccError),
    Report(String),
}

impl From<NccError> for Failure {
    fn from(err: NccError) -> Self {
        Failure::Lib(err)
    }
}

impl Failure {
    fn exit_code(&self) -> u8 {
        match self {
            Failure::Lib(NccError::ImageIo { .. }) | Failure::Report(_) => EXIT_IO,
            Failure::Lib(NccError::InvalidTemplateSize { .. }) => EXIT_PRECONDITION,
            Failure::Lib(_) => EXIT_OTHER,
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Lib(err) => write!(f, "{err}"),
            Failure::Report(reason) => write!(f, "report: {reason}"),
        }
    }
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let image = load_gray_image(&cli.image)?;
    let template = Template::from(load_gray_image(&cli.template)?);

    let correlator = Correlator::new(&template)?.with_config(CorrelationConfig {
        method: cli.method.into(),
        parallel: cli.parallel,
    });
    let map = correlator.correlate(image.view())?;
    if let Some((x, y, score)) = map.peak() {
        tracing::info!(x, y, score, "best match");
    }

    // The report is staged before the image so a failure leaves neither file.
    let staged_report = match &cli.report {
        Some(path) => {
            let report = Report::new(cli, &template, &map);
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| Failure::Report(e.to_string()))?;
            let tmp = staging_path(path);
            fs::write(&tmp, json)
                .map_err(|e| Failure::Report(format!("{}: {e}", path.display())))?;
            Some((tmp, path))
        }
        None => None,
    };

    let output = Path::new(OUTPUT_FILE);
    if let Err(err) = save_response_png(&map, output) {
        if let Some((tmp, _)) = &staged_report {
            let _ = fs::remove_file(tmp);
        }
        return Err(err.into());
    }

    if let Some((tmp, path)) = staged_report {
        if let Err(err) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            let _ = fs::remove_file(output);
            return Err(Failure::Report(format!("{}: {err}", path.display())));
        }
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path);
    name.push(".tmp");
    PathBuf::from(name)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_BAD_ARGS } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    if cli.trace {
        let filter = match "ncc2d=info".parse() {
            Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
            Err(_) => EnvFilter::new("info"),
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("error: {failure}");
            ExitCode::from(failure.exit_code())
        }
    }
}
