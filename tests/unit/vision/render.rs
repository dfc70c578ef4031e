//! Tests for drawing layouts as minimap images

#[cfg(test)]
mod tests {
    use crate::support::noise_sheet;
    use darkdream::DungeonError;
    use darkdream::codec::{Layout, Tile};
    use darkdream::vision::TileSheet;
    use darkdream::vision::pipeline::cell_image;
    use darkdream::vision::render::{export_layout_png, render_layout};
    use image::RgbImage;
    use tempfile::TempDir;

    // Tests each cell is drawn with its tile's artwork
    // Verified by drawing every cell at the origin
    #[test]
    fn test_render_places_artwork() {
        let sheet = noise_sheet(8);
        let mut layout = Layout::unknown();
        layout.set(3, 11, Tile::new(0x05, 0));
        layout.set(14, 0, Tile::new(0x1F, 2));

        let image = render_layout(&sheet, &layout).expect("layout renders");
        assert_eq!(image.dimensions(), (240, 240));
        assert_eq!(
            cell_image(&image, 3, 11),
            sheet.tile_image(Tile::new(0x05, 0)).expect("tile is on the sheet")
        );
        assert_eq!(
            cell_image(&image, 14, 0),
            sheet.tile_image(Tile::new(0x1F, 2)).expect("tile is on the sheet")
        );
        assert_eq!(
            cell_image(&image, 0, 0),
            sheet.tile_image(Tile::UNKNOWN).expect("unknown artwork exists")
        );
    }

    // Tests tiles without artwork fail rendering
    // Verified by leaving such cells blank
    #[test]
    fn test_render_missing_artwork() {
        let sheet = TileSheet::from_image(RgbImage::new(64, 32)).expect("sheet is valid");
        let mut layout = Layout::unknown();
        layout.set(0, 0, Tile::new(0x09, 0));
        assert!(matches!(
            render_layout(&sheet, &layout),
            Err(DungeonError::InvalidTileSheet { .. })
        ));
    }

    // Tests export writes a readable image, creating parent directories
    // Verified by skipping directory creation
    #[test]
    fn test_export_layout_png() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("layout.png");
        let sheet = noise_sheet(8);

        export_layout_png(&sheet, &Layout::unknown(), &path).expect("export succeeds");
        let written = image::open(&path).expect("export is readable").to_rgb8();
        assert_eq!(written.dimensions(), (240, 240));
    }

    // Tests a failed export reports the output path it was writing to
    // Verified by labelling export failures as image loads
    #[test]
    fn test_export_layout_unsupported_format() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("layout.notanimage");
        let sheet = noise_sheet(8);

        match export_layout_png(&sheet, &Layout::unknown(), &path) {
            Err(DungeonError::ImageExport { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected an export error, got {other:?}"),
        }
    }
}
