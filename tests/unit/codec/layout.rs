//! Tests for the 15x15 layout encoding and cell operations

#[cfg(test)]
mod tests {
    use darkdream::DungeonError;
    use darkdream::codec::{Layout, Tile};
    use ndarray::Array2;

    fn sample_layout() -> Layout {
        Layout::from_fn(|row, col| Tile::new(((row * 3 + col) % 0x30) as u32, (col % 4) as u8))
    }

    // Tests an all-unknown layout encodes to 450 F characters
    // Verified by encoding unknown cells as 00
    #[test]
    fn test_unknown_layout_encoding() {
        let encoded = Layout::unknown().encode().expect("unknown layout encodes");
        assert_eq!(encoded.len(), 450);
        assert!(encoded.chars().all(|c| c == 'F'));
        assert_eq!(Layout::default(), Layout::unknown());
    }

    // Tests cell order is row-major
    // Verified by iterating columns first
    #[test]
    fn test_layout_row_major_order() {
        let mut layout = Layout::unknown();
        assert!(layout.set(0, 1, Tile::new(0x01, 0)));
        assert!(layout.set(1, 0, Tile::new(0x03, 0)));

        let encoded = layout.encode().expect("layout encodes");
        assert_eq!(&encoded[0..6], "FF04FF");
        assert_eq!(&encoded[30..32], "0C");
    }

    // Tests decode inverts encode
    // Verified by transposing the decoded matrix
    #[test]
    fn test_layout_decode_inverts_encode() {
        let layout = sample_layout();
        let encoded = layout.encode().expect("layout encodes");
        let decoded: Layout = encoded.parse().expect("layout decodes");
        assert_eq!(decoded, layout);
        assert_eq!(decoded.get(14, 14), layout.get(14, 14));
    }

    // Tests decoding rejects anything but 450 characters
    // Verified by truncating long input instead of rejecting it
    #[test]
    fn test_layout_decode_length() {
        assert!(matches!(
            Layout::decode(&"F".repeat(449)),
            Err(DungeonError::InvalidLayoutLength { length: 449 })
        ));
        assert!(Layout::decode(&"F".repeat(451)).is_err());
        assert!(Layout::decode("").is_err());
    }

    // Tests decoding rejects non-hex characters at any position
    // Verified by skipping pairs that fail to parse
    #[test]
    fn test_layout_decode_non_hex() {
        let mut encoded = "F".repeat(448);
        encoded.push_str("XY");
        assert!(matches!(
            Layout::decode(&encoded),
            Err(DungeonError::InvalidHexData { .. })
        ));
    }

    // Tests wrapping a matrix checks its shape
    // Verified by accepting any matrix
    #[test]
    fn test_layout_from_cells_shape() {
        assert!(Layout::from_cells(Array2::from_elem((15, 15), Tile::UNKNOWN)).is_ok());
        assert!(matches!(
            Layout::from_cells(Array2::from_elem((15, 14), Tile::UNKNOWN)),
            Err(DungeonError::InvalidLayoutShape { rows: 15, cols: 14 })
        ));
    }

    // Tests access outside the grid is refused
    // Verified by clamping coordinates into the grid
    #[test]
    fn test_layout_bounds() {
        let mut layout = Layout::unknown();
        assert_eq!(layout.get(15, 0), None);
        assert!(!layout.set(0, 15, Tile::new(1, 0)));
        assert_eq!(layout.known_count(), 0);
    }

    // Tests an out-of-range tile makes the layout unencodable
    // Verified by skipping cells that fail to pack
    #[test]
    fn test_layout_encode_invalid_tile() {
        let mut layout = Layout::unknown();
        layout.set(7, 7, Tile::new(0x50, 0));
        assert!(matches!(
            layout.encode(),
            Err(DungeonError::InvalidTileData { .. })
        ));
    }

    // Tests merging fills unknown cells and never overwrites known ones
    // Verified by letting observed tiles overwrite known cells
    #[test]
    fn test_merge_unknown() {
        let mut known = Layout::unknown();
        known.set(0, 0, Tile::new(0x01, 0));

        let mut observed = Layout::unknown();
        observed.set(0, 0, Tile::new(0x03, 0));
        observed.set(2, 2, Tile::new(0x05, 1));

        let (merged, changed) = known.merge_unknown(&observed);
        assert!(changed);
        assert_eq!(merged.get(0, 0), Some(Tile::new(0x01, 0)));
        assert_eq!(merged.get(2, 2), Some(Tile::new(0x05, 1)));
        assert_eq!(merged.known_count(), 2);

        let (again, changed_again) = merged.merge_unknown(&observed);
        assert!(!changed_again);
        assert_eq!(again, merged);
    }
}
