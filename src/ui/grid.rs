//! Section layout for the agenda grid.
//!
//! Turns the agenda into a plain renderable tree: sections become header
//! plus card rows, each row carrying the width split computed by
//! [`super::weights`]. The tree is pure data; committing it to the
//! terminal is `draw.rs`'s job, so row grouping is testable without a
//! backend.
//!
//! Row-grouping policy:
//! - The first section, when it has at least 4 items, opens with a
//!   three-block row over items 0-2 and a full-width row for item 3.
//!   Items past index 3 continue as pairs.
//! - Everything else chunks into consecutive pairs; a trailing odd item
//!   renders full-width alone.

use crate::agenda::{Agenda, ItemKey};

use super::weights::{three_block_percents, two_block_percents, Percent};

/// One card slot within a row.
#[derive(Debug, Clone)]
pub struct BlockSlot {
    pub key: ItemKey,
    /// Share of the row width, as computed by the weight calculator.
    pub width: Percent,
    /// Position in the clickable-items index, if the item has speakers.
    pub clickable: Option<usize>,
}

/// A horizontal group of 1 to 3 cards sharing a width split.
#[derive(Debug, Clone)]
pub struct Row {
    pub blocks: Vec<BlockSlot>,
}

/// A section's header plus its card rows.
#[derive(Debug, Clone)]
pub struct SectionLayout {
    pub section: usize,
    pub rows: Vec<Row>,
}

/// Build the renderable tree for the whole agenda.
pub fn build_layout(agenda: &Agenda) -> Vec<SectionLayout> {
    let clickable = agenda.clickable_items();
    let clickable_pos = |key: ItemKey| clickable.iter().position(|&k| k == key);

    agenda
        .sections
        .iter()
        .enumerate()
        .map(|(section, sec)| {
            let slot = |item: usize, width: Percent| {
                let key = ItemKey { section, item };
                BlockSlot {
                    key,
                    width,
                    clickable: clickable_pos(key),
                }
            };

            let mut rows = Vec::new();
            let items = &sec.items;
            let mut next = 0;

            // First section: lead with 3 items in one row, then the 4th
            // full-width. Remaining items fall through to the pair loop.
            if section == 0 && items.len() >= 4 {
                let widths =
                    three_block_percents(&items[0].title, &items[1].title, &items[2].title);
                rows.push(Row {
                    blocks: (0..3).map(|i| slot(i, widths[i])).collect(),
                });
                rows.push(Row {
                    blocks: vec![slot(3, Percent::full())],
                });
                next = 4;
            }

            while next < items.len() {
                if next + 1 < items.len() {
                    let widths = two_block_percents(&items[next].title, &items[next + 1].title);
                    rows.push(Row {
                        blocks: vec![slot(next, widths[0]), slot(next + 1, widths[1])],
                    });
                    next += 2;
                } else {
                    rows.push(Row {
                        blocks: vec![slot(next, Percent::full())],
                    });
                    next += 1;
                }
            }

            SectionLayout { section, rows }
        })
        .collect()
}

/// One scrollable unit of the flattened layout.
#[derive(Debug, Clone)]
pub enum VisualRowKind {
    /// Section header (index into the agenda's sections).
    Header(usize),
    Cards(Row),
}

#[derive(Debug, Clone)]
pub struct VisualRow {
    pub kind: VisualRowKind,
    /// Height in terminal lines.
    pub height: u16,
}

/// Linearize the section tree into scroll units.
pub fn flatten_rows(
    layout: Vec<SectionLayout>,
    header_height: u16,
    card_height: u16,
) -> Vec<VisualRow> {
    let mut out = Vec::new();
    for section in layout {
        out.push(VisualRow {
            kind: VisualRowKind::Header(section.section),
            height: header_height,
        });
        for row in section.rows {
            out.push(VisualRow {
                kind: VisualRowKind::Cards(row),
                height: card_height,
            });
        }
    }
    out
}

/// Largest scroll offset that still keeps the viewport filled (or 0 when
/// everything fits).
pub fn max_scroll(rows: &[VisualRow], viewport: u16) -> usize {
    let mut remaining: u32 = rows.iter().map(|r| u32::from(r.height)).sum();
    if remaining <= u32::from(viewport) {
        return 0;
    }
    let mut scroll = 0;
    for row in rows {
        remaining -= u32::from(row.height);
        scroll += 1;
        if remaining <= u32::from(viewport) {
            break;
        }
    }
    // Never scroll the last row out of view.
    scroll.min(rows.len().saturating_sub(1))
}

/// Visual row holding the given clickable item.
pub fn row_of_clickable(rows: &[VisualRow], clickable: usize) -> Option<usize> {
    rows.iter().position(|row| match &row.kind {
        VisualRowKind::Cards(r) => r.blocks.iter().any(|b| b.clickable == Some(clickable)),
        VisualRowKind::Header(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::{Section, SessionItem, Speaker};

    fn item(title: &str, clickable: bool) -> SessionItem {
        SessionItem {
            id: title.to_string(),
            title: title.to_string(),
            speakers: if clickable {
                vec![Speaker {
                    name: "Speaker".to_string(),
                    ..Speaker::default()
                }]
            } else {
                Vec::new()
            },
            ..SessionItem::default()
        }
    }

    fn section(titles: &[&str]) -> Section {
        Section {
            items: titles.iter().map(|t| item(t, true)).collect(),
            ..Section::default()
        }
    }

    fn shape(layout: &[SectionLayout]) -> Vec<Vec<usize>> {
        layout
            .iter()
            .map(|s| s.rows.iter().map(|r| r.blocks.len()).collect())
            .collect()
    }

    #[test]
    fn test_first_section_four_items() {
        let agenda = Agenda {
            sections: vec![section(&["a", "bb", "ccc", "dddd"])],
        };
        let layout = build_layout(&agenda);
        assert_eq!(shape(&layout), vec![vec![3, 1]]);
        // Triple row carries the three-block split of its titles.
        let widths = three_block_percents("a", "bb", "ccc");
        for (block, expected) in layout[0].rows[0].blocks.iter().zip(widths) {
            assert_eq!(block.width, expected);
        }
        assert_eq!(layout[0].rows[1].blocks[0].width, Percent::full());
    }

    #[test]
    fn test_first_section_overflow_pairs() {
        // Items past index 3 keep flowing as pairs.
        let agenda = Agenda {
            sections: vec![section(&["a", "b", "c", "d", "e", "f", "g"])],
        };
        let layout = build_layout(&agenda);
        assert_eq!(shape(&layout), vec![vec![3, 1, 2, 1]]);
    }

    #[test]
    fn test_first_section_small_uses_pairs() {
        let agenda = Agenda {
            sections: vec![section(&["a", "b", "c"])],
        };
        let layout = build_layout(&agenda);
        assert_eq!(shape(&layout), vec![vec![2, 1]]);
    }

    #[test]
    fn test_other_sections_pair_chunked() {
        let agenda = Agenda {
            sections: vec![
                section(&["a", "b", "c", "d"]),
                section(&["e", "f", "g", "h", "i"]),
            ],
        };
        let layout = build_layout(&agenda);
        assert_eq!(shape(&layout), vec![vec![3, 1], vec![2, 2, 1]]);
        // Pair rows carry the two-block split of their titles.
        let widths = two_block_percents("e", "f");
        assert_eq!(layout[1].rows[0].blocks[0].width, widths[0]);
        assert_eq!(layout[1].rows[0].blocks[1].width, widths[1]);
    }

    #[test]
    fn test_clickable_positions_follow_scan_order() {
        let mut sec = section(&["a", "b", "c", "d"]);
        sec.items[1].speakers.clear(); // "b" is not clickable
        let agenda = Agenda {
            sections: vec![sec, section(&["e"])],
        };
        let layout = build_layout(&agenda);

        let mut seen = Vec::new();
        for s in &layout {
            for row in &s.rows {
                for block in &row.blocks {
                    if let Some(i) = block.clickable {
                        seen.push((i, agenda.item(block.key).id.clone()));
                    }
                }
            }
        }
        assert_eq!(
            seen,
            vec![
                (0, "a".to_string()),
                (1, "c".to_string()),
                (2, "d".to_string()),
                (3, "e".to_string()),
            ]
        );
    }

    #[test]
    fn test_flatten_interleaves_headers() {
        let agenda = Agenda {
            sections: vec![section(&["a", "b"]), section(&["c"])],
        };
        let rows = flatten_rows(build_layout(&agenda), 3, 7);
        assert_eq!(rows.len(), 4); // header, pair, header, single
        assert!(matches!(rows[0].kind, VisualRowKind::Header(0)));
        assert_eq!(rows[0].height, 3);
        assert!(matches!(rows[1].kind, VisualRowKind::Cards(_)));
        assert_eq!(rows[1].height, 7);
        assert!(matches!(rows[2].kind, VisualRowKind::Header(1)));
    }

    #[test]
    fn test_max_scroll() {
        let agenda = Agenda {
            sections: vec![section(&["a", "b", "c", "d", "e", "f"])],
        };
        let rows = flatten_rows(build_layout(&agenda), 3, 7);
        // header + 3 pair rows: 3 + 7*3 = 24 lines total.
        assert_eq!(max_scroll(&rows, 24), 0);
        assert_eq!(max_scroll(&rows, 30), 0);
        // 21 lines fit after dropping the header.
        assert_eq!(max_scroll(&rows, 21), 1);
        assert_eq!(max_scroll(&rows, 7), 3);
        // Viewport smaller than any row still keeps the last row reachable.
        assert_eq!(max_scroll(&rows, 2), 3);
    }

    #[test]
    fn test_row_of_clickable() {
        let agenda = Agenda {
            sections: vec![section(&["a", "b", "c"])],
        };
        let rows = flatten_rows(build_layout(&agenda), 3, 7);
        assert_eq!(row_of_clickable(&rows, 0), Some(1));
        assert_eq!(row_of_clickable(&rows, 1), Some(1));
        assert_eq!(row_of_clickable(&rows, 2), Some(2));
        assert_eq!(row_of_clickable(&rows, 9), None);
    }
}
