use std::path::Path;

use crate::classify;
use crate::commands::common::{category_distribution, require_path};
use crate::config::ClassifierConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ClassifyData;
use crate::error::EngineResult;
use crate::export;
use crate::ingest;

#[derive(Debug)]
pub struct ClassifyRunOptions<'a> {
    pub path: Option<String>,
    pub use_direct_map: bool,
    pub output: Option<String>,
    pub stdin_override: Option<&'a str>,
}

impl Default for ClassifyRunOptions<'_> {
    fn default() -> Self {
        Self {
            path: None,
            use_direct_map: true,
            output: None,
            stdin_override: None,
        }
    }
}

pub fn run(
    path: Option<&str>,
    use_direct_map: bool,
    output: Option<&str>,
) -> EngineResult<SuccessEnvelope> {
    run_with_options(ClassifyRunOptions {
        path: path.map(std::string::ToString::to_string),
        use_direct_map,
        output: output.map(std::string::ToString::to_string),
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ClassifyRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    let path = require_path(options.path.as_deref(), "classify")?;

    let config = ClassifierConfig::standard().with_direct_map(options.use_direct_map);
    config.validate()?;

    let loaded = ingest::load_records(path, options.stdin_override)?;
    let classified = classify::classify(&loaded.records, &config);
    let distribution = category_distribution(&classified.rows);

    let output = match options.output.as_deref() {
        Some(output_path) => {
            export::write_classified_csv(Path::new(output_path), &classified.rows)?;
            Some(output_path.to_string())
        }
        None => None,
    };

    let data = ClassifyData {
        path: Some(path.to_string()),
        ingest: loaded.summary,
        summary: classified.summary,
        distribution,
        output,
    };
    success("classify", data)
}
