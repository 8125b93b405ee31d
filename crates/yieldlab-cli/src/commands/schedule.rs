//! Schedule command: prints the cash-flow timetable of a bond.

use yieldlab_analytics::{AnalyticsEngine, ScheduleResponse};

use crate::cli::OutputFormat;
use crate::commands::{read_input, InputArgs};
use crate::error::CliResult;
use crate::output::{print_cash_flows, print_error, print_header, print_json};

/// Executes the schedule command. Returns whether a schedule was built.
pub fn execute(engine: &AnalyticsEngine, args: &InputArgs, format: OutputFormat) -> CliResult<bool> {
    let text = read_input(args.input.as_deref())?;
    let response = engine.schedule_json(&text);
    let succeeded = response.is_success();

    match format {
        OutputFormat::Json => print_json(&response)?,
        OutputFormat::Table => match &response {
            ScheduleResponse::Success { cash_flows } => {
                print_header("Cash Flows");
                print_cash_flows(cash_flows);
            }
            ScheduleResponse::Error { error } => print_error(error),
        },
    }

    Ok(succeeded)
}
