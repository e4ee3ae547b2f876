extern crate clap;
use clap::*;

mod cmd_gloss;

fn main() -> anyhow::Result<()> {
    let app = Command::new("gloss")
        .version(crate_version!())
        .about("`gloss` - Gene-LOSS dating helpers")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (-v info, -vv debug, -vvv trace). RUST_LOG overrides"),
        )
        .subcommand(cmd_gloss::nwk::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Trees:
    * nwk - Mark Newick branches for branch-site and RELAX tests

"###,
        );

    let matches = app.get_matches();

    let level = match matches.get_count("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("nwk", sub_matches)) => cmd_gloss::nwk::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
