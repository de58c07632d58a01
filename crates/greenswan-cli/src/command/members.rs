use std::path::PathBuf;

use greenswan_analysis::membership::MembershipEngine;
use greenswan_data::ALL_COALITIONS;

use crate::{command::CommonArg, schema::report::Report, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MembersArg {
    #[clap(flatten)]
    common: CommonArg,
    /// Coalition registry JSON file
    #[arg(long)]
    coalitions: PathBuf,
    /// Coalition id
    #[arg(default_value = ALL_COALITIONS)]
    pub(crate) coalition: String,
}

pub(crate) fn run(arg: &MembersArg) -> anyhow::Result<()> {
    let table = util::read_country_table(&arg.common.countries)?;
    let registry = util::read_coalition_registry(&arg.coalitions)?;

    let report = MembershipEngine::new(&registry).membership(&table, &arg.coalition);
    tracing::info!(
        coalition = %report.selector,
        members = report.member_count(),
        "resolved membership"
    );

    util::save_report(&Report::new(report), arg.common.output.as_deref())
}
