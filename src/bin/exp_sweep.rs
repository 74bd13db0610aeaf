use std::env;
use std::fs::File;
use std::io::BufWriter;

use anyhow::Context;
use expsweep::harness::{
    ErrorReport, Harness, Reference, ResultsSink, SummarySink, SweepConfig, TableSink,
};
use flexi_logger::Logger;
use log::{info, warn};

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_value(key)
        .map(|v| v.parse::<T>().with_context(|| format!("{key}={v}")))
        .transpose()
}

fn sweep_config() -> anyhow::Result<SweepConfig> {
    let mut config = SweepConfig::default();
    if let Some(seed) = env_parse("EXPSWEEP_SEED")? {
        config.seed = seed;
    }
    if let Some(factor) = env_parse("EXPSWEEP_FACTOR")? {
        config.factor = factor;
    }
    if let Some(ceiling) = env_parse("EXPSWEEP_CEILING")? {
        config.ceiling = ceiling;
    }
    Ok(config)
}

fn log_report(report: &ErrorReport) {
    for v in &report.variants {
        info!("{:>8} {}", v.name, v.max_scaled_error);
        if v.excluded > 0 {
            warn!("{:>8} excluded {} of {} rows", v.name, v.excluded, v.samples + v.excluded);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let level = env_value("EXPSWEEP_LOG").unwrap_or_else(|| "info".to_string());
    let _logger = Logger::try_with_str(&level)?.start()?;

    let config = sweep_config()?;
    let reference: Reference = env_parse("EXPSWEEP_REFERENCE")?.unwrap_or_default();
    let mut harness = Harness::new(Harness::default_candidates(), reference);
    if let Some(chunk) = env_parse::<usize>("EXPSWEEP_CHUNK")? {
        harness = harness.with_chunk_size(chunk);
    }

    let sweep = config.sweep()?;
    let mut sink: Box<dyn ResultsSink> = match env_value("EXPSWEEP_TABLE") {
        Some(path) => {
            let file = File::create(&path).with_context(|| format!("create {path}"))?;
            info!("writing rows to {path}");
            Box::new(TableSink::new(BufWriter::new(file)))
        }
        None => Box::new(SummarySink::new()),
    };

    let report = harness.run(sweep, sink.as_mut())?;
    log_report(&report);
    Ok(())
}
