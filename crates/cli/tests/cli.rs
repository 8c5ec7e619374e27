use assert_cmd::Command;

#[test]
fn help_lists_subcommands() {
    let output = Command::cargo_bin("bookclub")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["serve", "list", "show", "add", "update", "delete"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn unknown_sort_field_is_rejected() {
    let output = Command::cargo_bin("bookclub")
        .unwrap()
        .args(["list", "--sort-by", "rating"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("rating"));
}
