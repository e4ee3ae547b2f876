use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn command_mark_default() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gloss")?;
    let output = cmd
        .arg("nwk")
        .arg("mark")
        .arg("tests/newick/abc.nwk")
        .arg("--labels")
        .arg("tests/newick/abc.labels.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout, "((A:2.0,B:1.0),C:1.0);\n");

    Ok(())
}

#[test]
fn command_mark_lengths_replaced() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gloss")?;
    let output = cmd
        .arg("nwk")
        .arg("mark")
        .arg("tests/newick/vertebrates.nwk")
        .arg("-l")
        .arg("tests/newick/foreground.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout
        .contains("((Homo_sapiens:Foreground,Mus_musculus:1.0):1.0,Gallus_gallus:1.0);"));

    Ok(())
}

#[test]
fn command_mark_prefix_names() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gloss")?;
    let output = cmd
        .arg("nwk")
        .arg("mark")
        .arg("tests/newick/prefix.nwk")
        .arg("-l")
        .arg("tests/newick/prefix.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.trim(), "(AB:X,ABC:1.0);");

    Ok(())
}

#[test]
fn command_mark_internal() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gloss")?;
    let output = cmd
        .arg("nwk")
        .arg("mark")
        .arg("tests/newick/catarrhini.nwk")
        .arg("-l")
        .arg("tests/newick/hominini.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // Pan is listed twice, the last label wins; 95 is a support value
    assert_eq!(
        stdout.trim(),
        "((((Homo:1.0,Pan:Foreground)Hominini:Foreground,Gorilla:1.0)Homininae:1.0,Pongo:1.0)Hominidae:1.0,(Macaca:1.0,Papio:1.0)95:1.0)Catarrhini:1.0;"
    );

    Ok(())
}

#[test]
fn command_mark_multiple_tables() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gloss")?;
    let output = cmd
        .arg("nwk")
        .arg("mark")
        .arg("tests/newick/catarrhini.nwk")
        .arg("-l")
        .arg("tests/newick/hominini.tsv")
        .arg("tests/newick/pongo.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("Hominini:Foreground"));
    assert!(stdout.contains("Pongo:0.5"));

    Ok(())
}

#[test]
fn command_mark_default_label() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gloss")?;
    let output = cmd
        .arg("nwk")
        .arg("mark")
        .arg("tests/newick/abc.nwk")
        .arg("-l")
        .arg("tests/newick/abc.labels.tsv")
        .arg("--default")
        .arg("0")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.trim(), "((A:2.0,B:0),C:0);");

    Ok(())
}

#[test]
fn command_mark_stdin_gz() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gloss")?;
    let output = cmd
        .arg("nwk")
        .arg("mark")
        .arg("stdin")
        .arg("-l")
        .arg("tests/newick/prefix.tsv")
        .write_stdin("(AB:0.1,(ABC:0.2,ABCD:0.3):0.4);")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.trim(), "(AB:X,(ABC:1.0,ABCD:1.0):1.0);");

    let mut cmd = Command::cargo_bin("gloss")?;
    let output = cmd
        .arg("nwk")
        .arg("mark")
        .arg("tests/newick/vertebrates.nwk.gz")
        .arg("-l")
        .arg("tests/newick/foreground.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("Homo_sapiens:Foreground"));

    Ok(())
}

#[test]
fn command_mark_many_trees() -> anyhow::Result<()> {
    let expected = "((A:2.0,B:1.0),C:1.0);\n((Homo_sapiens:1.0,Mus_musculus:1.0):1.0,Gallus_gallus:1.0);\n(AB:1.0,ABC:1.0);\n";

    for parallel in ["1", "3"] {
        let mut cmd = Command::cargo_bin("gloss")?;
        let output = cmd
            .arg("nwk")
            .arg("mark")
            .arg("tests/newick/abc.nwk")
            .arg("tests/newick/vertebrates.nwk")
            .arg("tests/newick/prefix.nwk")
            .arg("-l")
            .arg("tests/newick/abc.labels.tsv")
            .arg("--parallel")
            .arg(parallel)
            .output()?;
        let stdout = String::from_utf8(output.stdout)?;

        assert_eq!(stdout, expected);
    }

    Ok(())
}

#[test]
fn command_mark_outfile() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outfile = temp.path().join("marked.nwk");

    let mut cmd = Command::cargo_bin("gloss")?;
    cmd.arg("nwk")
        .arg("mark")
        .arg("tests/newick/abc.nwk")
        .arg("-l")
        .arg("tests/newick/abc.labels.tsv")
        .arg("-o")
        .arg(outfile.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&outfile)?;
    assert_eq!(content, "((A:2.0,B:1.0),C:1.0);\n");

    Ok(())
}

#[test]
fn command_mark_malformed_tree() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gloss")?;
    cmd.arg("nwk")
        .arg("mark")
        .arg("tests/newick/abc.nwk")
        .arg("tests/newick/malformed.nwk")
        .arg("-l")
        .arg("tests/newick/abc.labels.tsv")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed.nwk"))
        .stderr(predicate::str::contains("Parse error"));

    Ok(())
}

#[test]
fn command_mark_malformed_table() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gloss")?;
    cmd.arg("nwk")
        .arg("mark")
        .arg("tests/newick/abc.nwk")
        .arg("-l")
        .arg("tests/newick/malformed.tsv")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Malformed label table row at line 2"));

    Ok(())
}

#[test]
fn command_mark_missing_file() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gloss")?;
    cmd.arg("nwk")
        .arg("mark")
        .arg("tests/newick/not-there.nwk")
        .arg("-l")
        .arg("tests/newick/abc.labels.tsv")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not-there.nwk"));

    let mut cmd = Command::cargo_bin("gloss")?;
    cmd.arg("nwk")
        .arg("mark")
        .arg("tests/newick/abc.nwk")
        .arg("-l")
        .arg("tests/newick/not-there.tsv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not-there.tsv"));

    Ok(())
}

#[test]
fn command_mark_bom_table() -> anyhow::Result<()> {
    let tempdir = TempDir::new()?;
    let lfile = tempdir.path().join("bom.tsv");
    std::fs::write(&lfile, "\u{feff}Homo_sapiens\tForeground\nHomo_sapeins\tForeground\n")?;

    let mut cmd = Command::cargo_bin("gloss")?;
    let output = cmd
        .arg("nwk")
        .arg("mark")
        .arg("tests/newick/vertebrates.nwk")
        .arg("-l")
        .arg(lfile.to_str().unwrap())
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert!(stdout.contains("(Homo_sapiens:Foreground,"));
    // the misspelled row is reported, the BOM row is not
    assert!(stderr.contains("Homo_sapeins is not a branch"));
    assert!(!stderr.contains("Homo_sapiens is not a branch"));

    Ok(())
}
