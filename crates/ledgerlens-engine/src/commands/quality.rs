use crate::commands::common::require_path;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::QualityData;
use crate::error::EngineResult;
use crate::ingest;
use crate::quality;

#[derive(Debug, Default)]
pub struct QualityRunOptions<'a> {
    pub path: Option<String>,
    pub stdin_override: Option<&'a str>,
}

pub fn run(path: Option<&str>) -> EngineResult<SuccessEnvelope> {
    run_with_options(QualityRunOptions {
        path: path.map(std::string::ToString::to_string),
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: QualityRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    let path = require_path(options.path.as_deref(), "quality")?;

    let loaded = ingest::load_records(path, options.stdin_override)?;
    let report = quality::assess(&loaded.records);

    let data = QualityData {
        path: Some(path.to_string()),
        report,
    };
    success("quality", data)
}
