use assert_cmd::Command;

fn plot_times() -> Command {
    Command::cargo_bin("plot-times").unwrap()
}

fn stdout(args: &[&str]) -> String {
    let out = plot_times().args(args).assert().success().get_output().clone();
    String::from_utf8(out.stdout).unwrap()
}

#[test]
fn table_lists_every_problem_size() {
    let table = stdout(&["--table"]);
    let lines: Vec<_> = table.lines().collect();
    assert_eq!(lines.len(), 9, "{}", table);
    assert!(lines[0].starts_with("factors/assets"));
    assert!(lines[0].contains("ECOS"));
    assert!(lines[0].ends_with("EiCOS"));
    assert!(lines[1].starts_with("100/5 "));
    assert!(lines[8].starts_with("10000/70 "));
    assert!(lines[8].contains("3.81043"));
    assert!(lines[8].ends_with("2.80828"));
}

#[test]
fn table_with_other_wording() {
    let table = stdout(&["--table", "--xlabel", "assets/factors"]);
    assert!(table.starts_with("assets/factors "));
}

#[test]
fn dpi_requires_output() {
    plot_times().args(["--table", "--dpi", "300"]).assert().failure();
}

#[test]
fn no_style_conflicts_with_style() {
    plot_times().args(["--table", "--no-style", "--style", "ggplot"])
        .assert().failure();
}

#[test]
fn help() {
    let help = stdout(&["--help"]);
    assert!(help.contains("--output"));
    assert!(help.contains("--table"));
}
