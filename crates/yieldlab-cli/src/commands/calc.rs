//! Calc command: one request in, one envelope out.

use tracing::debug;
use yieldlab_analytics::{AnalyticsEngine, CalculationResponse};

use crate::cli::OutputFormat;
use crate::commands::{read_input, InputArgs};
use crate::error::CliResult;
use crate::output::{print_error, print_header, print_json, print_table, result_rows};

/// Executes the calc command. Returns whether the calculation succeeded.
pub fn execute(engine: &AnalyticsEngine, args: &InputArgs, format: OutputFormat) -> CliResult<bool> {
    let text = read_input(args.input.as_deref())?;
    debug!(bytes = text.len(), "request read");

    let response = engine.respond_json(&text);
    let succeeded = response.is_success();

    match format {
        OutputFormat::Json => print_json(&response)?,
        OutputFormat::Table => match &response {
            CalculationResponse::Success { result } => {
                print_header("Bond Analytics");
                print_table(&result_rows(result));
            }
            CalculationResponse::Error { error } => print_error(error),
        },
    }

    Ok(succeeded)
}
