//! Serialize/deserialize through files on disk

use std::fs;

use ntree::codec::{deserialize, serialize};
use ntree::util::testing;
use ntree::{CodecError, Tree};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

fn tree(values: &[&str], parents: &[i64]) -> Tree<String> {
    let values = values.iter().map(|v| v.to_string()).collect();
    Tree::from_parent_indices(values, parents).unwrap()
}

#[rstest]
fn given_single_node_when_serialized_then_file_is_one_line(temp_dir: TempDir) {
    let path = temp_dir.path().join("single.tree");
    let original = tree(&["A"], &[-1]);

    serialize(&original, &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "A\n");

    let restored: Tree<String> = deserialize(&path).unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored.root_value().unwrap(), "A");
    assert_eq!(restored, original);
}

#[rstest]
fn given_empty_tree_when_serialized_then_file_is_empty(temp_dir: TempDir) {
    let path = temp_dir.path().join("empty.tree");
    serialize(&Tree::<String>::new(), &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    let restored: Tree<String> = deserialize(&path).unwrap();
    assert!(restored.is_empty());
}

#[rstest]
#[case::pair(&["A", "B"], &[-1, 0])]
#[case::wide(&["R", "a", "b", "c", "d"], &[-1, 0, 0, 0, 0])]
#[case::chain(&["1", "2", "3", "4"], &[-1, 0, 1, 2])]
#[case::mixed(&["root", "l", "r", "ll", "lr", "rl", "lrl"], &[-1, 0, 0, 1, 1, 2, 4])]
fn given_distinct_values_when_round_tripped_then_equal(
    temp_dir: TempDir,
    #[case] values: &[&str],
    #[case] parents: &[i64],
) {
    let path = temp_dir.path().join("tree.txt");
    let original = tree(values, parents);

    serialize(&original, &path).unwrap();
    let restored: Tree<String> = deserialize(&path).unwrap();

    assert_eq!(restored, original);
    assert_eq!(ntree::render::render(&restored), ntree::render::render(&original));
}

#[rstest]
fn given_tree_when_serialized_then_lines_are_breadth_first_paths(temp_dir: TempDir) {
    let path = temp_dir.path().join("bfs.tree");
    let original = tree(&["A", "B", "C", "D", "E", "F"], &[-1, 0, 0, 1, 1, 2]);

    serialize(&original, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["A", "A B", "A C", "A B D", "A B E", "A C F"]);
}

#[rstest]
fn given_integer_tree_when_round_tripped_then_values_parse_back(temp_dir: TempDir) {
    let path = temp_dir.path().join("ints.tree");
    let original = Tree::from_parent_indices(vec![10i64, -4, 7, 12], &[-1, 0, 0, 1]).unwrap();

    serialize(&original, &path).unwrap();
    let restored: Tree<i64> = deserialize(&path).unwrap();

    assert_eq!(restored, original);
}

#[rstest]
fn given_existing_file_when_serializing_then_truncated(temp_dir: TempDir) {
    let path = temp_dir.path().join("reuse.tree");
    fs::write(&path, "stale\nstale x\nstale x y\n").unwrap();

    serialize(&tree(&["A"], &[-1]), &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "A\n");
}

#[rstest]
fn given_unencodable_value_when_serializing_then_no_file_written(temp_dir: TempDir) {
    let path = temp_dir.path().join("bad.tree");
    let original = tree(&["A", "two words"], &[-1, 0]);

    let err = serialize(&original, &path).unwrap_err();

    assert!(matches!(err, CodecError::UnencodableValue { .. }));
    assert!(!path.exists());
}

#[rstest]
fn given_missing_file_when_deserializing_then_io_error(temp_dir: TempDir) {
    let path = temp_dir.path().join("nope.tree");
    let err = deserialize::<String>(&path).unwrap_err();

    match err {
        CodecError::Io { context, source } => {
            assert!(context.contains("nope.tree"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn given_missing_directory_when_serializing_then_io_error(temp_dir: TempDir) {
    let path = temp_dir.path().join("no/such/dir/out.tree");
    let err = serialize(&tree(&["A"], &[-1]), &path).unwrap_err();
    assert!(matches!(err, CodecError::Io { .. }));
}

#[rstest]
fn given_orphan_line_in_file_when_deserializing_then_reports_line(temp_dir: TempDir) {
    let path = temp_dir.path().join("orphan.tree");
    fs::write(&path, "A\nA B\nA C D\n").unwrap();

    let err = deserialize::<String>(&path).unwrap_err();

    match err {
        CodecError::OrphanLine { line, text } => {
            assert_eq!(line, 3);
            assert_eq!(text, "A C D");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn given_hand_written_file_in_ancestor_order_when_deserializing_then_siblings_keep_order(
    temp_dir: TempDir,
) {
    let path = temp_dir.path().join("manual.tree");
    fs::write(&path, "A\nA C\nA C E\nA B\n").unwrap();

    let restored: Tree<String> = deserialize(&path).unwrap();

    assert_eq!(restored, tree(&["A", "C", "E", "B"], &[-1, 0, 1, 0]));
}
