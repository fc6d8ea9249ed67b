use pdf_booklet::{BookletError, BookletOptions, PaperSize};

#[test]
fn test_default_options_validate() {
    assert!(BookletOptions::default().validate().is_ok());
}

#[test]
fn test_jpeg_quality_bounds() {
    let mut options = BookletOptions::default();

    options.jpeg_quality = 0;
    assert!(matches!(
        options.validate(),
        Err(BookletError::Config(_))
    ));

    options.jpeg_quality = 101;
    assert!(options.validate().is_err());

    options.jpeg_quality = 100;
    assert!(options.validate().is_ok());
}

#[test]
fn test_page_too_narrow_for_two_columns() {
    let mut options = BookletOptions::default();
    // 2 * 20mm margin + 12mm gap = 52mm of fixed width; 50mm leaves nothing.
    options.paper_size = PaperSize::Custom {
        width_mm: 50.0,
        height_mm: 420.0,
    };
    match options.validate() {
        Err(BookletError::Config(msg)) => assert!(msg.contains("narrow")),
        other => panic!("expected Config error, got {:?}", other.err()),
    }
}

#[test]
fn test_page_too_short_for_content() {
    let mut options = BookletOptions::default();
    options.paper_size = PaperSize::Custom {
        width_mm: 297.0,
        height_mm: 50.0,
    };
    assert!(options.validate().is_err());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_options_json_round_trip() {
    use pdf_booklet::{NumberingPolicy, PackingMode};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");

    let mut options = BookletOptions::default();
    options.document_title = "Round Trip".to_string();
    options.show_citations = false;
    options.packing_mode = PackingMode::SingleColumn;
    options.numbering = NumberingPolicy::CountSkipped;
    options.font_sources = vec!["fonts/custom.ttf".into()];

    options.save(&path).await.unwrap();
    let loaded = BookletOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}
