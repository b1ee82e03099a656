//! Edge case tests for driveclean


use harness::{TestTree, run_driveclean};

#[test]
fn test_reserved_basename_with_extension_is_renamed() {
    let tree = TestTree::new();
    tree.add_file("CON.txt", "x");

    let (_stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(!tree.exists("CON.txt"));
    assert!(tree.exists("FILE0"), "extension is dropped for reserved basenames");
}

#[test]
fn test_lowercase_reserved_names_untouched() {
    let tree = TestTree::new();
    tree.add_file("con", "x");
    tree.add_file("aux", "x");
    tree.add_dir("lpt1");

    let (_stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(tree.exists("con"));
    assert!(tree.exists("aux"));
    assert!(tree.exists("lpt1"));
}

#[test]
fn test_every_com_and_lpt_port_renamed() {
    let tree = TestTree::new();
    for i in 1..=9 {
        tree.add_file(&format!("sub{i}/COM{i}"), "x");
        tree.add_file(&format!("sub{i}/LPT{i}"), "x");
    }

    let (_stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    for i in 1..=9 {
        // Sorted listing puts COM before LPT, so indexes are 0 and 1.
        assert!(tree.exists(&format!("sub{i}/FILE0")), "COM{i} should be FILE0");
        assert!(tree.exists(&format!("sub{i}/FILE1")), "LPT{i} should be FILE1");
    }
}

#[test]
fn test_dot_lock_file_and_directory_branches() {
    let tree = TestTree::new();
    tree.add_file("a/.lock", "x");
    tree.add_dir("b/.lock");

    let (_stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(tree.exists("a/FILE0"));
    assert!(tree.exists("b/FOLDER0"));
}

#[test]
fn test_multiple_reserved_siblings_get_distinct_names() {
    let tree = TestTree::new();
    tree.add_file("AUX", "a");
    tree.add_file("CON", "c");
    tree.add_dir("PRN");

    let (_stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    // Sorted listing: AUX (0), CON (1), PRN (2).
    assert!(tree.exists("FILE0"));
    assert!(tree.exists("FILE1"));
    assert!(tree.exists("FOLDER2"));
}

#[test]
fn test_vti_marker_replaced_in_files_and_directories() {
    let tree = TestTree::new();
    tree.add_file("_vti_cnf/page_vti_old.html", "x");

    let (_stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(tree.exists("-vti-cnf/page-vti-old.html"));
}

#[test]
fn test_interior_dots_collapse_into_dashes() {
    let tree = TestTree::new();
    tree.add_file("archive.tar.gz", "x");
    tree.add_file("v1.2.3-notes.txt", "x");

    let (_stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(tree.exists("archive-tar.gz"));
    assert!(tree.exists("v1-2-3-notes.txt"));
}

#[test]
fn test_dotfiles_survive() {
    let tree = TestTree::new();
    tree.add_file(".gitignore", "target/");
    tree.add_file(".env", "KEY=1");
    tree.add_dir(".config");

    let (stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(tree.exists(".gitignore"));
    assert!(tree.exists(".env"));
    assert!(tree.exists(".config"));
    assert!(!stdout.contains("Renamed: "), "{stdout}");
}

#[test]
fn test_unicode_names_handled_by_codepoint() {
    let tree = TestTree::new();
    tree.add_file("héllo:wörld.txt", "x");
    tree.add_file("日本語?メモ.md", "x");

    let (_stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(tree.exists("héllo-wörld.txt"));
    assert!(tree.exists("日本語-メモ.md"));
}

#[test]
fn test_name_of_only_forbidden_characters() {
    let tree = TestTree::new();
    tree.add_file("~\"#%&:*<>?{|}", "x");

    let (_stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(tree.exists("-------------"), "1:1 replacement keeps the length");
}

#[test]
fn test_deeply_nested_tree_completes() {
    let tree = TestTree::new();
    let mut path = String::new();
    for i in 0..150 {
        path.push_str(&format!("d{i}/"));
    }
    path.push_str("bad:leaf.txt");
    tree.add_file(&path, "x");

    let (stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(
        stdout.contains("Finished working on 150 folder(s) and 1 file(s)."),
        "{stdout}"
    );
    assert!(stdout.contains("Renamed: "));
}

#[test]
fn test_directory_tree_renamed_bottom_up() {
    // Children must be fixed while their parents still carry the old names;
    // afterwards every level of the chain is renamed too.
    let tree = TestTree::new();
    tree.add_file("a:1/b:2/c:3/leaf:x.txt", "x");

    let (_stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(tree.exists("a-1/b-2/c-3/leaf-x.txt"));
    assert!(!tree.exists("a:1"));
}

#[test]
fn test_forms_with_extension_at_root() {
    let tree = TestTree::new();
    tree.add_file("forms.docx", "x");

    let (_stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(tree.exists("formsFile"), "extension is dropped by the forms rule");
    assert!(!tree.exists("forms.docx"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_reported_and_skipped() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let tree = TestTree::new();
    tree.add_file("locked/secret.txt", "x");
    tree.add_file("open/bad:name.txt", "x");
    let locked = tree.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // Permission bits do not stop a privileged user; skip if the listing
    // still succeeds (e.g. running as root).
    let denied = fs::read_dir(&locked).is_err();
    let result = if denied {
        Some(run_driveclean(tree.path(), &[]))
    } else {
        None
    };
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let Some((stdout, _stderr, success)) = result else {
        return;
    };

    assert!(success, "listing failures are non-fatal: {stdout}");
    assert!(
        stdout.contains("Error listing"),
        "should report the unreadable directory: {stdout}"
    );
    assert!(
        tree.exists("open/bad-name.txt"),
        "sibling subtree still renamed: {stdout}"
    );
    assert!(
        stdout.contains("Finished working on"),
        "run should complete with a summary: {stdout}"
    );
}

#[test]
fn test_whitespace_only_names_converge() {
    let tree = TestTree::new();
    tree.add_file("   ", "x");
    tree.add_dir("sub/\t\t");

    let (first, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(tree.exists("FILE0"), "whitespace-only file gets an indexed name: {first}");
    assert!(tree.exists("sub/FOLDER0"), "whitespace-only dir too: {first}");

    let (second, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(
        !second.contains("Renamed: ") && !second.contains("Error renaming"),
        "second run must be a no-op: {second}"
    );
}

#[test]
fn test_mixed_tree_counts_and_outcomes() {
    let tree = TestTree::new();
    tree.add_file("clean.txt", "x");
    tree.add_file("bad&file.txt", "x");
    tree.add_file("docs/desktop.ini", "x");
    tree.add_dir("docs/CON");
    tree.add_file(".DS_Store", "x");

    let (stdout, _stderr, success) = run_driveclean(tree.path(), &[]);
    assert!(success);
    assert!(tree.exists("clean.txt"));
    assert!(tree.exists("bad-file.txt"));
    assert!(tree.exists("docs/desktop-ini"));
    assert!(tree.exists("docs/FOLDER0"));
    assert!(tree.exists(".DS_Store"));
    assert!(
        stdout.contains("Finished working on 2 folder(s) and 4 file(s)."),
        "{stdout}"
    );
}
