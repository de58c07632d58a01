use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{clubs::ClubsArg, cluster::ClusterArg, compare::CompareArg, members::MembersArg};

mod clubs;
mod cluster;
mod compare;
mod members;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Cluster countries on selected indicators and project them to 2D
    Cluster(#[clap(flatten)] ClusterArg),
    /// Summarize every coalition in the registry
    Clubs(#[clap(flatten)] ClubsArg),
    /// Compare two coalitions side by side
    Compare(#[clap(flatten)] CompareArg),
    /// Flag the members of a coalition (or `All`)
    Members(#[clap(flatten)] MembersArg),
}

/// Country table and output location shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CommonArg {
    /// Country table JSON file
    #[arg(long)]
    countries: PathBuf,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Cluster(arg) => cluster::run(&arg)?,
        Mode::Clubs(arg) => clubs::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Members(arg) => members::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_cluster() {
        let args = CommandArgs::try_parse_from([
            "greenswan",
            "cluster",
            "--countries",
            "countries.json",
            "--features",
            "GCP_scaled,Biocapacity",
            "--clusters",
            "3",
            "--missing",
            "drop-rows",
        ])
        .unwrap();
        let Mode::Cluster(arg) = args.mode else {
            panic!("expected cluster subcommand");
        };
        assert_eq!(arg.features, ["GCP_scaled", "Biocapacity"]);
        assert_eq!(arg.k, Some(3));
    }

    #[test]
    fn test_members_defaults_to_all() {
        let args = CommandArgs::try_parse_from([
            "greenswan",
            "members",
            "--countries",
            "countries.json",
            "--coalitions",
            "coalitions.json",
        ])
        .unwrap();
        let Mode::Members(arg) = args.mode else {
            panic!("expected members subcommand");
        };
        assert_eq!(arg.coalition, "All");
    }

    #[test]
    fn test_compare_requires_two_ids() {
        let result = CommandArgs::try_parse_from([
            "greenswan",
            "compare",
            "--countries",
            "countries.json",
            "--coalitions",
            "coalitions.json",
            "G7",
        ]);
        assert!(result.is_err());
    }
}
