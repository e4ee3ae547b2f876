use clap::*;
use gloss::libs::phylo::token;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("branches")
        .about("List the named branches of a Newick tree")
        .after_help(
            r###"
Prints the branch names that `gloss nwk mark` will look up, in the same order
as in the Newick, one per line.

Notes:
* Unnamed nodes and purely numeric names (support values) are not branches
* The `-I` and `-L` options filter out internal or leaf branches
* A name occurring twice is printed twice, unless `--unique` is set
* The output is a handy template for labels.tsv

Examples:
1. List all branches:
   gloss nwk branches tree.nwk

2. Start a label table where every leaf is background:
   gloss nwk branches tree.nwk -I | sed 's/$/\t1.0/' > labels.tsv

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
            Arg::new("Internal")
                .long("Internal")
                .short('I')
                .action(ArgAction::SetTrue)
                .help("Don't print internal branches"),
        )
        .arg(
            Arg::new("Leaf")
                .long("Leaf")
                .short('L')
                .action(ArgAction::SetTrue)
                .help("Don't print leaf branches"),
        )
        .arg(
            Arg::new("unique")
                .long("unique")
                .short('u')
                .action(ArgAction::SetTrue)
                .help("Print each name once"),
        )
        .arg(
            Arg::new("tab")
                .long("tab")
                .short('t')
                .action(ArgAction::SetTrue)
                .help("Print names on a single line, separated by tab stops"),
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
    let skip_internal = args.get_flag("Internal");
    let skip_leaf = args.get_flag("Leaf");
    let is_unique = args.get_flag("unique");
    let is_tab = args.get_flag("tab");

    let infile = args.get_one::<String>("infile").unwrap();
    let text = gloss::read_to_string(infile)?;
    let tokenized = token::tokenize(&text)?;

    let mut seen = BTreeSet::new();
    let names: Vec<&str> = tokenized
        .branches
        .iter()
        .filter(|b| !(skip_internal && !b.is_leaf))
        .filter(|b| !(skip_leaf && b.is_leaf))
        .map(|b| b.name.as_str())
        .filter(|name| !is_unique || seen.insert(*name))
        .collect();

    let mut writer = gloss::writer(args.get_one::<String>("outfile").unwrap())?;
    if is_tab {
        writer.write_fmt(format_args!("{}\n", names.iter().join("\t")))?;
    } else {
        for name in names {
            writer.write_fmt(format_args!("{}\n", name))?;
        }
    }

    Ok(())
}
