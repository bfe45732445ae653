//! Property tests for offset <-> position conversion.

use core_model::Layout;
use core_text::{Document, Position};
use proptest::prelude::*;

proptest! {
    #[test]
    fn offset_round_trips(text in "[ab\n😀]{0,40}", width in 1usize..12) {
        let doc = Document::from_text(&text);
        let layout = Layout::rebuild(&doc, width);
        for offset in 0..=doc.len_chars() {
            let pos = layout.offset_to_position(offset);
            prop_assert!(pos.row < layout.row_count());
            prop_assert!(pos.col <= layout.row_width(pos.row));
            prop_assert_eq!(layout.position_to_offset(pos), offset);
        }
    }

    #[test]
    fn every_position_maps_back_to_the_same_cell(text in "[ab\n]{0,40}", width in 1usize..12) {
        let layout = Layout::rebuild(&Document::from_text(&text), width);
        for row in 0..layout.row_count() {
            for col in 0..=layout.row_width(row) {
                let pos = Position::new(row, col);
                let back = layout.offset_to_position(layout.position_to_offset(pos));
                prop_assert_eq!(layout.display_cell(back), layout.display_cell(pos));
            }
        }
    }

    #[test]
    fn rows_rejoin_into_document(text in "[abc\n ]{0,60}", width in 1usize..10) {
        let layout = Layout::rebuild(&Document::from_text(&text), width);
        let mut joined = String::new();
        for row in layout.rows() {
            prop_assert!(row.len() <= width);
            joined.push_str(&row.text());
            if row.is_explicit() {
                joined.push('\n');
            }
        }
        prop_assert_eq!(joined, text);
        prop_assert!(!layout.rows().last().unwrap().is_explicit());
    }
}
