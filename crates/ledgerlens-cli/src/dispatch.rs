use ledgerlens_engine::commands;
use ledgerlens_engine::{EngineResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> EngineResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Classify {
            path,
            no_direct_map,
            output,
            json: _,
        } => commands::classify::run(path.as_deref(), !no_direct_map, output.as_deref()),
        Commands::Anomalies {
            path,
            window_days,
            spend_threshold,
            txn_threshold,
            json: _,
        } => commands::anomalies::run(
            path.as_deref(),
            *window_days,
            *spend_threshold,
            *txn_threshold,
        ),
        Commands::Quality { path, json: _ } => commands::quality::run(path.as_deref()),
        Commands::Report {
            path,
            output_dir,
            json: _,
        } => commands::report::run(path.as_deref(), output_dir.as_deref()),
    }
}
