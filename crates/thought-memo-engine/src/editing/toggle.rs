use std::borrow::Cow;

use crate::parsing::{BlockState, MarkerEncoding, embed_marker, extract_marker, is_excluded_line};

use super::ids::IdSource;

/// Advances the state of the marker on line `line_index` by one step.
///
/// `none -> normal` assigns a fresh id, `normal -> complete` keeps it and
/// `complete -> none` removes the marker. Out-of-range, blank and excluded
/// lines leave the text unchanged.
pub fn toggle_block_state(
    text: &str,
    line_index: usize,
    encoding: MarkerEncoding,
    ids: &mut impl IdSource,
) -> String {
    let mut lines: Vec<Cow<str>> = text.split('\n').map(Cow::Borrowed).collect();
    let Some(line) = lines.get(line_index).cloned() else {
        log::debug!("toggle ignored: line {line_index} out of range");
        return text.to_string();
    };

    if line.trim().is_empty() || is_excluded_line(&line) {
        return text.to_string();
    }

    let toggled = match extract_marker(&line) {
        None => embed_marker(&line, &ids.next_id(), BlockState::Normal, encoding),
        Some(marker) => embed_marker(&line, marker.id, marker.state.next(), encoding),
    };
    lines[line_index] = Cow::Owned(toggled);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::ids::SequentialIds;
    use crate::parsing::{TOKEN, parse_blocks, remove_marker};
    use pretty_assertions::assert_eq;

    fn toggle(text: &str, line: usize, ids: &mut SequentialIds) -> String {
        toggle_block_state(text, line, MarkerEncoding::Long, ids)
    }

    #[test]
    fn cycles_none_normal_complete_none() {
        let mut ids = SequentialIds::new("blk");

        let once = toggle("Buy milk", 0, &mut ids);
        assert_eq!(once, format!("Buy milk{TOKEN}[blk-1:normal]{TOKEN}"));
        assert_eq!(parse_blocks(&once)[0].state, BlockState::Normal);

        let twice = toggle(&once, 0, &mut ids);
        assert_eq!(twice, format!("Buy milk{TOKEN}[blk-1:complete]{TOKEN}"));
        assert_eq!(parse_blocks(&twice)[0].state, BlockState::Complete);

        let thrice = toggle(&twice, 0, &mut ids);
        assert_eq!(thrice, "Buy milk");
        assert_eq!(parse_blocks(&thrice)[0].state, BlockState::None);
        assert_eq!(parse_blocks(&thrice)[0].id, None);
    }

    #[test]
    fn id_is_kept_until_marker_is_removed() {
        let mut ids = SequentialIds::new("blk");
        let text = toggle("task", 0, &mut ids);
        let text = toggle(&text, 0, &mut ids);
        assert_eq!(parse_blocks(&text)[0].id, Some("blk-1"));

        let text = toggle(&text, 0, &mut ids);
        let text = toggle(&text, 0, &mut ids);
        assert_eq!(parse_blocks(&text)[0].id, Some("blk-2"));
    }

    #[test]
    fn short_encoding_is_written_and_read() {
        let mut ids = SequentialIds::new("s");
        let text = toggle_block_state("task", 0, MarkerEncoding::Short, &mut ids);
        assert_eq!(text, format!("task{TOKEN}[s-1:r]{TOKEN}"));

        let text = toggle_block_state(&text, 0, MarkerEncoding::Short, &mut ids);
        assert_eq!(text, format!("task{TOKEN}[s-1:c]{TOKEN}"));
    }

    #[test]
    fn legacy_short_marker_advances_with_long_encoding() {
        let mut ids = SequentialIds::new("blk");
        let text = format!("task{TOKEN}[old:r]{TOKEN}");
        let text = toggle(&text, 0, &mut ids);
        assert_eq!(text, format!("task{TOKEN}[old:complete]{TOKEN}"));
    }

    #[test]
    fn excluded_line_is_untouched() {
        let mut ids = SequentialIds::new("blk");
        let text = "-- note\nsomething";
        assert_eq!(toggle(text, 0, &mut ids), text);
    }

    #[test]
    fn out_of_range_is_noop() {
        let mut ids = SequentialIds::new("blk");
        assert_eq!(toggle("a\nb", 2, &mut ids), "a\nb");
        assert_eq!(toggle("", 5, &mut ids), "");
    }

    #[test]
    fn blank_line_is_untouched() {
        let mut ids = SequentialIds::new("blk");
        assert_eq!(toggle("a\n  \nb", 1, &mut ids), "a\n  \nb");
    }

    #[test]
    fn only_target_line_changes() {
        let mut ids = SequentialIds::new("blk");
        let text = "one\r\ntwo\n\nthree\n";
        let toggled = toggle(text, 3, &mut ids);

        assert_eq!(remove_marker(&toggled), text);
        assert_eq!(toggled.split('\n').nth(3), Some("three\u{200B}[blk-1:normal]\u{200B}"));
    }

    #[test]
    fn malformed_marker_is_replaced_by_fresh_one() {
        let mut ids = SequentialIds::new("blk");
        let text = format!("task{TOKEN}[x:bogus]{TOKEN}");
        assert_eq!(toggle(&text, 0, &mut ids), format!("task{TOKEN}[blk-1:normal]{TOKEN}"));
    }

    #[test]
    fn toggling_inner_line_splits_block() {
        let mut ids = SequentialIds::new("blk");
        let text = toggle("first\nsecond", 1, &mut ids);
        let blocks = parse_blocks(&text);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].state, BlockState::Normal);
    }
}
