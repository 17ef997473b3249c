#![warn(clippy::uninlined_format_args)]

mod config;
mod report;
mod snapshot;

use std::{borrow::Cow, env, fs, io, process};

use config::InterpreterConfig;
use racha_application::{BillProcessor, ProcessingOutcome};
use racha_presentation::{ExactValueFormat, RachaExactValueFormatter, format_processing_error};
use report::BillReport;
use snapshot::BillFile;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> CliResult<()> {
    let config = InterpreterConfig::from_env().map_err(|err| err.to_string())?;

    let Some(path) = env::args().nth(1) else {
        return Err(racha_i18n::USAGE.into());
    };

    let source =
        fs::read_to_string(&path).map_err(|err| racha_i18n::failed_to_read(&path, err))?;
    let bill = BillFile::from_json(&source)
        .and_then(BillFile::into_bill)
        .map_err(racha_i18n::invalid_bill)?;
    let fees = config.apply_fees(bill.fees);

    tracing::debug!(
        path = %path,
        exact_values = config.exact_values,
        exact_digits = config.exact_digits,
        "Loaded bill"
    );

    let formatter = RachaExactValueFormatter::new(
        ExactValueFormat::default().with_extra_digits(config.exact_digits),
    );
    let processor = if config.exact_values {
        BillProcessor::new(&formatter)
    } else {
        BillProcessor::without_exact_values()
    };

    let result = match processor.process(bill.snapshot(), fees) {
        ProcessingOutcome::Success(result) => result,
        ProcessingOutcome::Failure(err) => return Err(format_processing_error(&err).into()),
    };

    let output = serde_json::to_string_pretty(&BillReport::new(&bill, &result))
        .map_err(|err| format!("Failed to serialize report: {err}"))?;
    println!("{output}");

    Ok(())
}
