use std::path::PathBuf;

use greenswan_analysis::{
    clustering::ClusteringEngine,
    config::{MissingValuePolicy, PipelineConfig},
};

use crate::{command::CommonArg, schema::report::Report, util};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum MissingArg {
    /// Replace missing cells with zero
    ZeroFill,
    /// Leave out countries with missing cells
    DropRows,
}

impl From<MissingArg> for MissingValuePolicy {
    fn from(arg: MissingArg) -> Self {
        match arg {
            MissingArg::ZeroFill => MissingValuePolicy::ZeroFill,
            MissingArg::DropRows => MissingValuePolicy::DropRows,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClusterArg {
    #[clap(flatten)]
    common: CommonArg,
    /// Indicator names to cluster on (every catalog indicator when omitted)
    #[arg(long, value_delimiter = ',')]
    pub(crate) features: Vec<String>,
    /// Number of clusters [default: from config]
    #[arg(short, long = "clusters")]
    pub(crate) k: Option<usize>,
    /// K-means seed [default: from config]
    #[arg(long)]
    seed: Option<u64>,
    /// Missing-value policy [default: from config]
    #[arg(long, value_enum)]
    missing: Option<MissingArg>,
    /// Indicator catalog JSON file [default: built-in catalog]
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Pipeline configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ClusterArg {
    /// Applies command-line overrides on top of the loaded configuration.
    fn apply_overrides(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(k) = self.k {
            config.cluster_count = k;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(missing) = self.missing {
            config.missing_values = missing.into();
        }
        config
    }
}

pub(crate) fn run(arg: &ClusterArg) -> anyhow::Result<()> {
    let table = util::read_country_table(&arg.common.countries)?;
    let catalog = util::read_catalog(arg.catalog.as_deref())?;
    let config = arg.apply_overrides(util::read_config(arg.config.as_deref())?);

    let features = if arg.features.is_empty() {
        catalog.names().map(str::to_owned).collect()
    } else {
        arg.features.clone()
    };

    let result = ClusteringEngine::new(&table, &catalog, &config).run_default(&features)?;
    if !result.dropped.is_empty() {
        tracing::warn!(
            dropped = result.dropped.len(),
            "countries with missing values were left out"
        );
    }

    util::save_report(&Report::new(result), arg.common.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg() -> ClusterArg {
        ClusterArg {
            common: CommonArg {
                countries: PathBuf::from("countries.json"),
                output: None,
            },
            features: vec![],
            k: None,
            seed: None,
            missing: None,
            catalog: None,
            config: None,
        }
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = PipelineConfig {
            seed: 7,
            ..PipelineConfig::default()
        };
        assert_eq!(arg().apply_overrides(config.clone()), config);
    }

    #[test]
    fn test_flags_override_config() {
        let arg = ClusterArg {
            k: Some(3),
            seed: Some(99),
            missing: Some(MissingArg::DropRows),
            ..arg()
        };
        let config = arg.apply_overrides(PipelineConfig::default());
        assert_eq!(config.cluster_count, 3);
        assert_eq!(config.seed, 99);
        assert_eq!(config.missing_values, MissingValuePolicy::DropRows);
    }
}
