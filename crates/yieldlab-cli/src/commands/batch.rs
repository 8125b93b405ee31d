//! Batch command: evaluates an array of requests.
//!
//! Each element is converted on its own, so one malformed request yields an
//! error envelope in its slot without affecting the others. Output order
//! matches input order.

use serde_json::Value;
use tabled::Tabled;
use tracing::debug;

use yieldlab_analytics::{
    AnalyticsEngine, AnalyticsError, CalculationRequest, CalculationRequestDto,
    CalculationResponse,
};

use crate::cli::OutputFormat;
use crate::commands::{read_file, BatchArgs};
use crate::error::{CliError, CliResult};
use crate::output::{format_percent, print_error, print_json, print_success, print_table};

/// One line of the batch summary table.
#[derive(Debug, Clone, Tabled)]
struct BatchRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Clean Price")]
    clean_price: String,
    #[tabled(rename = "Yield")]
    yield_to_maturity: String,
    #[tabled(rename = "Mod Duration")]
    modified_duration: String,
    #[tabled(rename = "Error")]
    error: String,
}

impl BatchRow {
    fn new(index: usize, response: &CalculationResponse) -> Self {
        match response {
            CalculationResponse::Success { result } => Self {
                index,
                status: "success".to_string(),
                clean_price: format!("{:.6}", result.clean_price),
                yield_to_maturity: format_percent(result.yield_to_maturity),
                modified_duration: format!("{:.4}", result.modified_duration),
                error: String::new(),
            },
            CalculationResponse::Error { error } => Self {
                index,
                status: "error".to_string(),
                clean_price: String::new(),
                yield_to_maturity: String::new(),
                modified_duration: String::new(),
                error: error.kind.as_str().to_string(),
            },
        }
    }
}

/// Executes the batch command. Returns whether every request succeeded.
pub fn execute(engine: &AnalyticsEngine, args: &BatchArgs, format: OutputFormat) -> CliResult<bool> {
    let text = read_file(&args.input)?;
    let requests = parse_batch(&text)?;
    debug!(requests = requests.len(), "batch read");

    let responses = engine.respond_batch(requests);
    let failed = responses.iter().filter(|r| !r.is_success()).count();

    match format {
        OutputFormat::Json => print_json(&responses)?,
        OutputFormat::Table => {
            let rows: Vec<BatchRow> = responses
                .iter()
                .enumerate()
                .map(|(i, r)| BatchRow::new(i, r))
                .collect();
            print_table(&rows);
            for response in &responses {
                if let CalculationResponse::Error { error } = response {
                    print_error(error);
                }
            }
            if failed == 0 {
                print_success(&format!("{} requests evaluated", responses.len()));
            }
        }
    }

    Ok(failed == 0)
}

/// Splits the input into per-request conversions.
fn parse_batch(text: &str) -> CliResult<Vec<Result<CalculationRequest, AnalyticsError>>> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(CliError::InvalidBatch(
            "expected a JSON array of requests".to_string(),
        ));
    };

    Ok(items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<CalculationRequestDto>(item)
                .map_err(AnalyticsError::from)
                .and_then(CalculationRequest::try_from)
        })
        .collect())
}
