//! Tests for tile packing and the two-character encoding

#[cfg(test)]
mod tests {
    use darkdream::DungeonError;
    use darkdream::codec::Tile;

    // Tests the packing formula (identity << 2) + rotation
    // Verified by swapping identity and rotation bits
    #[test]
    fn test_tile_encode_packing() {
        assert_eq!(Tile::new(0x01, 0).encode().ok().as_deref(), Some("04"));
        assert_eq!(Tile::new(0x03, 0).encode().ok().as_deref(), Some("0C"));
        assert_eq!(Tile::new(0x01, 2).encode().ok().as_deref(), Some("06"));
        assert_eq!(Tile::new(0x1A, 3).encode().ok().as_deref(), Some("6B"));
    }

    // Tests the unknown tile encodes to the sentinel
    // Verified by packing the sentinel identity like a normal tile
    #[test]
    fn test_unknown_encodes_to_sentinel() {
        assert_eq!(Tile::UNKNOWN.encode().ok().as_deref(), Some("FF"));
        assert_eq!(Tile::new(0xFFFF_FFFF, 2), Tile::UNKNOWN);
        assert_eq!(Tile::default(), Tile::UNKNOWN);
        assert!(Tile::UNKNOWN.is_unknown());
    }

    // Tests tiles that cannot fit a byte are rejected rather than truncated
    // Verified by masking the packed value to eight bits
    #[test]
    fn test_tile_encode_out_of_range() {
        assert!(matches!(
            Tile::new(0, 4).encode(),
            Err(DungeonError::InvalidTileData {
                identity: 0,
                rotation: 4
            })
        ));
        assert!(Tile::new(0x40, 0).encode().is_err());
        // (0x3F << 2) + 3 would collide with the sentinel byte
        assert!(Tile::new(0x3F, 3).encode().is_err());
        assert_eq!(Tile::new(0x3F, 2).encode().ok().as_deref(), Some("FE"));
    }

    // Tests decoding recovers identity and rotation
    // Verified by shifting the identity the wrong way
    #[test]
    fn test_tile_decode() {
        let tile = Tile::decode("6B").ok();
        assert_eq!(tile.map(|t| (t.identity(), t.rotation())), Some((0x1A, 3)));
        assert_eq!(Tile::decode("ff").ok(), Some(Tile::UNKNOWN));
        assert_eq!(Tile::decode("0c").ok(), Some(Tile::new(0x03, 0)));
    }

    // Tests malformed encodings are rejected
    // Verified by ignoring characters past the second
    #[test]
    fn test_tile_decode_rejects_malformed() {
        assert!(matches!(
            Tile::decode("G0"),
            Err(DungeonError::InvalidHexData { .. })
        ));
        assert!(Tile::decode("0").is_err());
        assert!(Tile::decode("000").is_err());
        assert!(Tile::decode("").is_err());
    }

    // Tests every byte value decodes and re-encodes to itself
    // Verified by dropping the sentinel special case in from_byte
    #[test]
    fn test_every_byte_survives() {
        for byte in 0..=u8::MAX {
            let tile = Tile::from_byte(byte);
            assert_eq!(tile.to_byte().ok(), Some(byte), "byte {byte:#04X}");
        }
    }

    // Tests display distinguishes unknown tiles
    // Verified by printing the sentinel identity
    #[test]
    fn test_tile_display() {
        assert_eq!(Tile::UNKNOWN.to_string(), "Tile(unknown)");
        assert_eq!(Tile::new(0x01, 2).to_string(), "Tile(0x01, 2)");
    }
}
