//! Tests for the offline corpus builder

#[cfg(test)]
mod tests {
    use darkdream::DungeonError;
    use darkdream::codec::Tile;
    use darkdream::io::progress::ImportProgress;
    use darkdream::storage::import::{import_corpus, parse_corpus, read_corpus, store_corpus};
    use darkdream::storage::store::LayoutStore;
    use std::fs;
    use tempfile::TempDir;

    fn record(layout_byte: &str, treasure: &str) -> String {
        format!(
            r#"{{"layout": "{}", "treasure": "{treasure}"}}"#,
            layout_byte.repeat(225)
        )
    }

    fn write_corpus(dir: &TempDir, json: &str) -> std::path::PathBuf {
        let path = dir.path().join("corpus.json");
        fs::write(&path, json).expect("corpus is written");
        path
    }

    // Tests records are keyed by hex seed and sorted by seed
    // Verified by parsing keys as decimal
    #[test]
    fn test_parse_corpus_hex_seeds() {
        let json = format!(
            r#"{{"0000001F": {}, "0000000A": {}}}"#,
            record("04", ""),
            record("08", "")
        );
        let corpus = parse_corpus(&json).expect("corpus parses");

        let seeds: Vec<u32> = corpus.dungeons.iter().map(|d| d.seed).collect();
        assert_eq!(seeds, vec![0x0A, 0x1F]);
        assert_eq!(corpus.skipped, 0);
        assert_eq!(
            corpus.dungeons.first().and_then(|d| d.layout.get(0, 0)),
            Some(Tile::new(2, 0))
        );
    }

    // Tests treasure is optional and parsed when present
    // Verified by requiring the treasure field
    #[test]
    fn test_parse_corpus_treasure() {
        let json = format!(
            r#"{{"00000001": {{"layout": "{}"}}, "00000002": {}}}"#,
            "FF".repeat(225),
            record("04", "0012033F800000C0200000")
        );
        let corpus = parse_corpus(&json).expect("corpus parses");

        assert_eq!(corpus.dungeons.len(), 2);
        assert!(corpus.dungeons.first().is_some_and(|d| d.treasure.is_empty()));
        assert_eq!(corpus.dungeons.get(1).map(|d| d.treasure.len()), Some(1));
    }

    // Tests malformed records are skipped while the rest survive
    // Verified by failing the whole document on the first bad record
    #[test]
    fn test_parse_corpus_skips_malformed() {
        let json = format!(
            r#"{{"00000001": {}, "00000002": {{"layout": "FFFF"}}, "NOTHEX": {}, "00000004": {}}}"#,
            record("04", ""),
            record("04", ""),
            record("04", "123")
        );
        let corpus = parse_corpus(&json).expect("corpus parses");

        assert_eq!(corpus.dungeons.len(), 1);
        assert_eq!(corpus.skipped, 3);
    }

    // Tests documents of the wrong shape are rejected
    // Verified by treating a non-object as an empty corpus
    #[test]
    fn test_parse_corpus_wrong_shape() {
        assert!(parse_corpus("[]").is_err());
        assert!(parse_corpus(r#"{"00000001": {"treasure": ""}}"#).is_err());
        assert!(parse_corpus("{").is_err());
    }

    // Tests missing and malformed files map to distinct errors
    // Verified by reporting both as file system errors
    #[test]
    fn test_read_corpus_errors() {
        let dir = TempDir::new().expect("temp dir");
        assert!(matches!(
            read_corpus(&dir.path().join("missing.json")),
            Err(DungeonError::FileSystem { .. })
        ));

        let path = write_corpus(&dir, "not json");
        assert!(matches!(
            read_corpus(&path),
            Err(DungeonError::CorpusFormat { .. })
        ));
    }

    // Tests importing creates the schema, stores every valid record and reports progress
    // Verified by skipping the final progress update
    #[test]
    fn test_import_corpus() {
        let dir = TempDir::new().expect("temp dir");
        let json = format!(
            r#"{{"00000001": {}, "00000002": {}, "00000003": {{"layout": "00"}}}}"#,
            record("04", ""),
            record("08", "")
        );
        let path = write_corpus(&dir, &json);

        let mut store = LayoutStore::open(dir.path().join("dungeons.db")).expect("store opens");
        let progress = ImportProgress::hidden(3);
        let summary = import_corpus(&mut store, &path, Some(&progress)).expect("import succeeds");

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.stored, 2);
        assert!(!summary.is_complete());
        assert_eq!(progress.written(), 2);
        assert!(store.get(2).expect("lookup succeeds").is_some());
    }

    // Tests importing twice leaves a single copy of each seed
    // Verified by inserting without replacing
    #[test]
    fn test_import_is_repeatable() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_corpus(&dir, &format!(r#"{{"00000001": {}}}"#, record("04", "")));
        let mut store = LayoutStore::open_in_memory().expect("store opens");

        import_corpus(&mut store, &path, None).expect("first import succeeds");
        let summary = import_corpus(&mut store, &path, None).expect("second import succeeds");
        assert_eq!(summary.stored, 1);
    }

    // Tests a seed is accepted under exactly one spelling
    // Verified by accepting unpadded seed keys
    #[test]
    fn test_parse_corpus_requires_padded_seeds() {
        let json = format!(
            r#"{{"2A": {}, "0000002A": {}, "00000002A": {}}}"#,
            record("04", ""),
            record("08", ""),
            record("0C", "")
        );
        let corpus = parse_corpus(&json).expect("corpus parses");

        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.skipped, 2);
        assert_eq!(
            corpus.dungeons.first().map(|d| (d.seed, d.layout.get(0, 0))),
            Some((0x2A, Some(Tile::new(2, 0))))
        );
    }

    // Tests the import summary agrees with the store when seeds are spelled two ways
    // Verified by counting every accepted key as imported
    #[test]
    fn test_import_counts_match_store() {
        let dir = TempDir::new().expect("temp dir");
        let json = format!(
            r#"{{"2A": {}, "0000002A": {}}}"#,
            record("04", ""),
            record("08", "")
        );
        let path = write_corpus(&dir, &json);
        let mut store = LayoutStore::open_in_memory().expect("store opens");

        let summary = import_corpus(&mut store, &path, None).expect("import succeeds");
        assert_eq!(summary.imported, summary.stored);
        assert_eq!((summary.imported, summary.skipped), (1, 1));
    }

    // Tests storing a parsed corpus fills a progress bar sized to its records
    // Verified by sizing the bar to the reference corpus
    #[test]
    fn test_store_corpus_progress() {
        let json = format!(
            r#"{{"00000001": {}, "00000002": {}}}"#,
            record("04", ""),
            record("08", "")
        );
        let corpus = parse_corpus(&json).expect("corpus parses");
        let progress = ImportProgress::hidden(corpus.len());
        let mut store = LayoutStore::open_in_memory().expect("store opens");

        let summary = store_corpus(&mut store, &corpus, Some(&progress)).expect("store succeeds");
        assert_eq!(summary.imported, 2);
        assert_eq!(progress.total(), Some(2));
        assert_eq!(progress.written(), 2);
    }
}
