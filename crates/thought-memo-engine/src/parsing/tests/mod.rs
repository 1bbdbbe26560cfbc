
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{BlockState, TOKEN, block_at, parse_blocks};

// Fixture-based snapshot tests

#[test]
fn fixture_simple_blocks() {
    assert_fixture("simple_blocks");
}

#[test]
fn fixture_marked_blocks() {
    assert_fixture("marked_blocks");
}

#[test]
fn fixture_malformed_markers() {
    assert_fixture("malformed_markers");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(format!("{fixtures_dir}/{name}.txt")).unwrap();

    let blocks = parse_blocks(&text);
    invariants::check(&text, &blocks);

    let snap = normalize::normalize(&blocks);
    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_debug_snapshot!(name, snap);
    });
}

// Invariant tests

#[rstest]
#[case::empty("")]
#[case::single("Buy milk")]
#[case::trailing_newline("a\nb\n")]
#[case::blank_runs("\n\n a \n\t\n\nb\nc\n\n")]
#[case::marked_inside_block("a\nb\u{200B}[x:r]\u{200B}\nc")]
#[case::adjacent_markers("\u{200B}[x:r]\u{200B}\n\u{200B}[y:c]\u{200B}")]
#[case::crlf("a\r\n\r\nb\r\n")]
fn blocks_partition_non_blank_lines(#[case] text: &str) {
    let blocks = parse_blocks(text);
    invariants::check(text, &blocks);
}

#[test]
fn empty_document() {
    assert!(parse_blocks("").is_empty());
}

#[test]
fn blank_lines_only() {
    assert!(parse_blocks("\n  \n\t\n").is_empty());
}

#[test]
fn single_unmarked_line() {
    let blocks = parse_blocks("Buy milk");

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].state, BlockState::None);
    assert_eq!(blocks[0].id, None);
    assert_eq!(blocks[0].lines, vec!["Buy milk"]);
}

#[test]
fn marker_starts_a_new_block_without_blank_line() {
    let text = format!("first\nsecond{TOKEN}[b:c]{TOKEN}\nthird");
    let blocks = parse_blocks(&text);

    assert_eq!(blocks.len(), 2);
    assert_eq!((blocks[0].start_line, blocks[0].end_line), (0, 0));
    assert_eq!((blocks[1].start_line, blocks[1].end_line), (1, 2));
    assert_eq!(blocks[1].state, BlockState::Complete);
    assert_eq!(blocks[1].id, Some("b"));
}

#[test]
fn marker_on_later_line_does_not_change_state_of_earlier_block() {
    let text = format!("head{TOKEN}[a:r]{TOKEN}\nbody\n\nnext");
    let blocks = parse_blocks(&text);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].state, BlockState::Normal);
    assert_eq!(blocks[1].state, BlockState::None);
}

#[test]
fn excluded_is_taken_from_first_line_only() {
    let blocks = parse_blocks("-- note\nsomething\n\nplain\n-- later");

    assert!(blocks[0].excluded);
    assert!(!blocks[1].excluded);
}

#[test]
fn lookup_by_line() {
    let blocks = parse_blocks("a\nb\n\nc");

    assert_eq!(block_at(&blocks, 1).map(|b| b.start_line), Some(0));
    assert!(block_at(&blocks, 2).is_none());
    assert_eq!(block_at(&blocks, 3).map(|b| b.start_line), Some(3));
    assert!(block_at(&blocks, 9).is_none());
}
