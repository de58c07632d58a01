use std::path::PathBuf;

use greenswan_analysis::club_summary::ClubSummaryBuilder;

use crate::{command::CommonArg, schema::report::Report, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    common: CommonArg,
    /// Coalition registry JSON file
    #[arg(long)]
    coalitions: PathBuf,
    /// First coalition id (or `All`)
    left: String,
    /// Second coalition id (or `All`)
    right: String,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let table = util::read_country_table(&arg.common.countries)?;
    let registry = util::read_coalition_registry(&arg.coalitions)?;

    let comparison = ClubSummaryBuilder::new(&table, &registry).compare(&arg.left, &arg.right);
    for row in [&comparison.left, &comparison.right] {
        if let Some(message) = row.status_message() {
            tracing::warn!("{message}");
        }
    }

    util::save_report(&Report::new(comparison), arg.common.output.as_deref())
}
