use rstest::rstest;
use thought_memo_engine::parsing::{TOKEN, embed_marker, remove_marker};
use thought_memo_engine::{
    BlockState, MarkerEncoding, SequentialIds, extract_completed_blocks, parse_blocks,
    remove_completed_blocks, toggle_block_state,
};

const DOCUMENTS: &[&str] = &[
    "",
    "Buy milk",
    "a\nb\n\nc\n",
    "-- note\nsomething\n\n\nplain",
    "x \u{200B}[1:c]\u{200B}\ny\nz\u{200B}[2:r]\u{200B}\n\n-- w\u{200B}[3:c]\u{200B}",
    "  \n\t\ngroceries Buy milk\u{200B}[4:complete]\u{200B}\n\nkeep me\n",
];

#[rstest]
fn toggle_is_a_three_cycle(#[values("task", "  spaced  ", "two words", "[x] box")] line: &str) {
    let mut ids = SequentialIds::new("blk");
    let mut text = line.to_string();
    let mut states = vec![];

    for _ in 0..3 {
        text = toggle_block_state(&text, 0, MarkerEncoding::Long, &mut ids);
        states.push(parse_blocks(&text)[0].state);
    }

    assert_eq!(
        states,
        vec![BlockState::Normal, BlockState::Complete, BlockState::None]
    );
    assert_eq!(text, line);
}

#[rstest]
fn embed_twice_equals_embed_once(
    #[values("", "plain", "has [brackets]", "tail\u{200B}[old:r]\u{200B}")] line: &str,
    #[values(BlockState::Normal, BlockState::Complete)] state: BlockState,
) {
    let once = embed_marker(line, "id", state, MarkerEncoding::Short);
    assert_eq!(embed_marker(&once, "id", state, MarkerEncoding::Short), once);
    assert_eq!(remove_marker(&once), remove_marker(line));
}

#[test]
fn blocks_partition_line_indices() {
    for text in DOCUMENTS {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut covered = vec![false; lines.len()];

        for block in parse_blocks(text) {
            for index in block.start_line..=block.end_line {
                assert!(!covered[index], "line {index} in two blocks of {text:?}");
                covered[index] = true;
            }
        }
        for (index, line) in lines.iter().enumerate() {
            assert_eq!(covered[index], !line.trim().is_empty(), "line {index} of {text:?}");
        }
    }
}

#[test]
fn removal_is_consistent_with_extraction() {
    for text in DOCUMENTS {
        let remaining = remove_completed_blocks(text);
        let remaining_blocks = parse_blocks(&remaining);

        assert!(remaining_blocks.iter().all(|b| !b.is_completable()), "{text:?}");
        assert!(extract_completed_blocks(&remaining).is_empty());

        let kept: Vec<Vec<&str>> = parse_blocks(text)
            .into_iter()
            .filter(|b| !b.is_completable())
            .map(|b| b.lines)
            .collect();
        let survived: Vec<Vec<&str>> = remaining_blocks.into_iter().map(|b| b.lines).collect();
        assert_eq!(
            kept.iter().map(|l| l.join("\n").trim().to_string()).collect::<Vec<_>>(),
            survived.iter().map(|l| l.join("\n").trim().to_string()).collect::<Vec<_>>(),
            "{text:?}"
        );
    }
}

#[test]
fn marker_token_never_leaks_into_completed_text() {
    for text in DOCUMENTS {
        for done in extract_completed_blocks(text) {
            assert!(!done.text.contains(TOKEN));
            assert!(!done.original_text.contains(TOKEN));
        }
    }
}
