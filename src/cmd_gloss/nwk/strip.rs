use clap::*;
use gloss::libs::phylo::token;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("strip")
        .about("Remove branch lengths and labels from a Newick tree")
        .after_help(
            r###"
Deletes every `:<value>` annotation, at any depth, and leaves everything else
(names, brackets, comments) as it was.

Examples:
1. Topology only:
   gloss nwk strip tree.nwk

2. Undo a previous `gloss nwk mark`:
   gloss nwk strip marked.nwk

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input filename. [stdin] for standard input"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let text = gloss::read_to_string(infile)?;
    let out_string = token::strip_annotations(&text)?;

    let mut writer = gloss::writer(args.get_one::<String>("outfile").unwrap())?;
    writer.write_all((out_string.trim_end().to_string() + "\n").as_ref())?;

    Ok(())
}
