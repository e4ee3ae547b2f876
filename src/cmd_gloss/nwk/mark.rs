use anyhow::Context;
use clap::*;
use gloss::libs::phylo::{token, Annotator, LabelResolver, LabelTable, DEFAULT_LABEL};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("mark")
        .about("Attach a label to every branch of a Newick tree")
        .after_help(
            r###"
Replaces the branch lengths of a tree with labels looked up in a TSV file,
e.g. to mark foreground branches before running codeml or HyPhy.

Notes:
* <labels.tsv> has 2 columns: <branch_name> <label>
  * Columns are tab-separated; lines without a tab are split on whitespace
  * Blank lines are ignored, extra columns are ignored
  * A name listed twice keeps its last label; later files override earlier ones
* Every named branch gets `:<label>` right after its name
  * Names absent from the table get `--default`
  * Purely numeric names (support values) are not branches and keep no label
* Unnamed internal branches lose their length; if they had one, they get `--default`
* Each input file must hold exactly one tree
* Nothing is written if any tree or table fails to parse

Examples:
1. Mark foreground branches:
   gloss nwk mark tree.nwk --labels fg.tsv

2. Use 0 for unlisted branches:
   gloss nwk mark tree.nwk -l fg.tsv --default 0

3. Many gene trees at once:
   gloss nwk mark genes/*.nwk -l fg.tsv --parallel 4 -o marked.nwk

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Input filename(s). [stdin] for standard input"),
        )
        .arg(
            Arg::new("labels")
                .long("labels")
                .short('l')
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append)
                .help("Path to labels.tsv"),
        )
        .arg(
            Arg::new("default")
                .long("default")
                .short('d')
                .num_args(1)
                .default_value(DEFAULT_LABEL)
                .help("Label for branches missing from the table"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of threads for parallel processing"),
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
    //----------------------------
    // Args
    //----------------------------
    let opt_default = args.get_one::<String>("default").unwrap();
    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();

    let infiles: Vec<&String> = args.get_many::<String>("infiles").unwrap().collect();

    //----------------------------
    // Load
    //----------------------------
    let mut table = LabelTable::new();
    for lfile in args.get_many::<String>("labels").unwrap() {
        table
            .extend_from_file(lfile)
            .with_context(|| format!("Failed to load labels from {}", lfile))?;
    }
    log::info!("{} labels loaded", table.len());

    let mut trees = Vec::with_capacity(infiles.len());
    for infile in &infiles {
        trees.push(gloss::read_to_string(infile)?);
    }

    //----------------------------
    // Annotate
    //----------------------------
    let annotator = Annotator::new(LabelResolver::new(&table).with_default(opt_default.as_str()));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opt_parallel)
        .build()?;
    let outputs: anyhow::Result<Vec<String>> = pool.install(|| {
        infiles
            .par_iter()
            .zip(trees.par_iter())
            .map(|(infile, text)| {
                annotator
                    .annotate(text)
                    .with_context(|| format!("Failed to annotate {}", infile))
            })
            .collect()
    });
    let outputs = outputs?;

    if log::log_enabled!(log::Level::Warn) {
        report_unused(&table, &trees);
    }

    //----------------------------
    // Output
    //----------------------------
    let mut writer = gloss::writer(args.get_one::<String>("outfile").unwrap())?;
    for out_string in outputs {
        writer.write_all((out_string.trim_end().to_string() + "\n").as_ref())?;
    }

    Ok(())
}

// Table entries that name no branch are usually typos
fn report_unused(table: &LabelTable, trees: &[String]) {
    let mut seen = BTreeSet::new();
    for text in trees {
        if let Ok(tokenized) = token::tokenize(text) {
            seen.extend(tokenized.branches.into_iter().map(|b| b.name));
        }
    }

    for name in table.names().filter(|name| !seen.contains(*name)) {
        log::warn!("{} is not a branch of any input tree", name);
    }
}
