use super::*;

#[test]
fn glob_star_and_question_mark() {
    let re = glob_to_regex("*SCRIPT*.md").unwrap();
    assert!(re.is_match("DEMO_SCRIPT.md"));
    assert!(re.is_match("SCRIPT.md"));
    assert!(!re.is_match("DEMO_SCRIPT.md.bak"));
    assert!(!re.is_match("demo_script.md"));

    let re = glob_to_regex("take?.txt").unwrap();
    assert!(re.is_match("take1.txt"));
    assert!(!re.is_match("take12.txt"));
}

#[test]
fn glob_character_classes() {
    let re = glob_to_regex("part[0-9].md").unwrap();
    assert!(re.is_match("part3.md"));
    assert!(!re.is_match("partx.md"));

    let re = glob_to_regex("part[!0-9].md").unwrap();
    assert!(re.is_match("partx.md"));
    assert!(!re.is_match("part3.md"));

    assert!(glob_to_regex("part[0-9.md").is_err());
}

#[test]
fn glob_caret_in_class_is_literal() {
    let re = glob_to_regex("[^a]*.md").unwrap();
    assert!(re.is_match("^x.md"));
    assert!(re.is_match("a.md"));
    assert!(!re.is_match("b.md"));

    let re = glob_to_regex("[!^]*.md").unwrap();
    assert!(re.is_match("b.md"));
    assert!(!re.is_match("^b.md"));
}

#[test]
fn glob_escapes_regex_metacharacters() {
    let re = glob_to_regex("a+b(1).md").unwrap();
    assert!(re.is_match("a+b(1).md"));
    assert!(!re.is_match("aab1.md"));
}

#[test]
fn scan_matches_only_files_in_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("INTRO_SCRIPT.md"), "## A\nx").unwrap();
    std::fs::write(dir.path().join("notes.md"), "nope").unwrap();
    std::fs::create_dir(dir.path().join("OLD_SCRIPT.md")).unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    std::fs::write(dir.path().join("nested").join("DEEP_SCRIPT.md"), "x").unwrap();

    let found = scan_scripts(dir.path(), "*SCRIPT*.md").unwrap();
    assert_eq!(found, vec![dir.path().join("INTRO_SCRIPT.md")]);
}

#[test]
fn scan_with_no_matches_is_empty_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(scan_scripts(dir.path(), "*SCRIPT*.md").unwrap().is_empty());
}

#[test]
fn scan_of_missing_directory_finds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let found = scan_scripts(&dir.path().join("missing"), "*SCRIPT*.md").unwrap();
    assert!(found.is_empty());
}

#[test]
fn scan_of_a_file_instead_of_a_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("DEMO_SCRIPT.md");
    std::fs::write(&file, "## A\nx").unwrap();
    assert!(scan_scripts(&file, "*").is_err());
}

#[test]
fn scan_results_are_sorted() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["C_SCRIPT.md", "A_SCRIPT.md", "B_SCRIPT.md"] {
        std::fs::write(dir.path().join(name), "## A\nx").unwrap();
    }
    let found = scan_scripts(dir.path(), "*SCRIPT*.md").unwrap();
    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["A_SCRIPT.md", "B_SCRIPT.md", "C_SCRIPT.md"]);
}
