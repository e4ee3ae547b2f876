use clap::*;

pub mod branches;
pub mod mark;
pub mod strip;

pub fn make_subcommand() -> Command {
    Command::new("nwk")
        .about("Annotate branches of Newick trees")
        .after_help(
            r###"
Tools for preparing Newick trees for codeml / HyPhy runs.

Subcommand groups:
* info: branches
* ops:  mark / strip

"###,
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(branches::make_subcommand())
        .subcommand(mark::make_subcommand())
        .subcommand(strip::make_subcommand())
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    match args.subcommand() {
        Some(("branches", sub_matches)) => branches::execute(sub_matches),
        Some(("mark", sub_matches)) => mark::execute(sub_matches),
        Some(("strip", sub_matches)) => strip::execute(sub_matches),
        _ => unreachable!(),
    }
}
