use std::path::PathBuf;

use greenswan_analysis::club_summary::ClubSummaryBuilder;

use crate::{
    command::CommonArg,
    schema::report::{ClubSummaries, Report},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClubsArg {
    #[clap(flatten)]
    common: CommonArg,
    /// Coalition registry JSON file
    #[arg(long)]
    coalitions: PathBuf,
}

pub(crate) fn run(arg: &ClubsArg) -> anyhow::Result<()> {
    let table = util::read_country_table(&arg.common.countries)?;
    let registry = util::read_coalition_registry(&arg.coalitions)?;

    let coalitions = ClubSummaryBuilder::new(&table, &registry).build_all();
    for message in coalitions.iter().filter_map(|row| row.status_message()) {
        tracing::warn!("{message}");
    }

    util::save_report(
        &Report::new(ClubSummaries { coalitions }),
        arg.common.output.as_deref(),
    )
}
