use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use greenswan_analysis::config::PipelineConfig;
use greenswan_data::{
    CoalitionRegistry, CoalitionRegistryFile, CountryTable, CountryTableFile, IndicatorCatalog,
};
use serde::{Serialize, de::DeserializeOwned};

/// Destination of a JSON report: stdout, or a file created up front.
pub struct ReportSink {
    writer: Box<dyn Write>,
    destination: String,
}

impl ReportSink {
    pub fn open(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self {
                writer: Box::new(io::stdout().lock()),
                destination: "stdout".to_owned(),
            });
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            destination: path.display().to_string(),
        })
    }

    pub fn write<T>(mut self, report: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        write_pretty_json(&mut self.writer, report)
            .with_context(|| format!("Failed to write report to {}", self.destination))?;
        tracing::info!(output = %self.destination, "report written");
        Ok(())
    }
}

/// Writes `report` to stdout, or to `path` when one is given.
pub fn save_report<T>(report: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    ReportSink::open(path)?.write(report)
}

/// Pretty JSON followed by a newline, then a flush.
fn write_pretty_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn load_json<T>(kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {kind} JSON file: {}", path.display()))
}

/// Read the country table from a JSON file
///
/// # Errors
///
/// Returns error if the file cannot be opened or parsed, or if it lists a
/// country code twice
pub fn read_country_table(path: &Path) -> anyhow::Result<CountryTable> {
    let file: CountryTableFile = load_json("country table", path)?;
    let table = CountryTable::from_file(file)
        .with_context(|| format!("Invalid country table: {}", path.display()))?;
    tracing::debug!(countries = table.len(), path = %path.display(), "loaded country table");
    Ok(table)
}

/// Read the coalition registry from a JSON file
///
/// # Errors
///
/// Returns error if the file cannot be opened or parsed, or if a coalition id
/// is repeated or reserved
pub fn read_coalition_registry(path: &Path) -> anyhow::Result<CoalitionRegistry> {
    let file: CoalitionRegistryFile = load_json("coalition registry", path)?;
    let registry = CoalitionRegistry::from_file(file)
        .with_context(|| format!("Invalid coalition registry: {}", path.display()))?;
    tracing::debug!(
        coalitions = registry.len(),
        path = %path.display(),
        "loaded coalition registry"
    );
    Ok(registry)
}

/// Read the indicator catalog, or use the built-in one when no path is given
pub fn read_catalog(path: Option<&Path>) -> anyhow::Result<IndicatorCatalog> {
    match path {
        Some(path) => load_json("indicator catalog", path),
        None => Ok(IndicatorCatalog::default()),
    }
}

/// Read the pipeline configuration, or use the defaults when no path is given
pub fn read_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => load_json("config", path),
        None => Ok(PipelineConfig::default()),
    }
}
