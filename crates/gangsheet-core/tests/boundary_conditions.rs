use gangsheet_core::config::PackConfig;
use gangsheet_core::error::PackError;
use gangsheet_core::model::PackItem;
use gangsheet_core::packer::pack;

#[test]
fn zero_page_width_is_invalid() {
    let cfg = PackConfig {
        page_width: 0.0,
        page_height: 297.0,
        ..Default::default()
    };
    match cfg.validate() {
        Err(PackError::InvalidDimension { width, height }) => {
            assert_eq!(width, 0.0);
            assert_eq!(height, 297.0);
        }
        _ => panic!("expected InvalidDimension"),
    }
}

#[test]
fn negative_page_height_is_invalid() {
    let cfg = PackConfig {
        page_width: 210.0,
        page_height: -1.0,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn non_finite_page_size_is_invalid() {
    let cfg = PackConfig {
        page_width: f64::NAN,
        page_height: 297.0,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn pack_validates_the_page_size() {
    let cfg = PackConfig {
        page_width: 0.0,
        page_height: 0.0,
        ..Default::default()
    };
    let result = pack(vec![PackItem::new("a", 10.0, 10.0)], &cfg);
    assert!(matches!(result, Err(PackError::InvalidDimension { .. })));
}

#[test]
fn non_positive_item_dimensions_fail_the_whole_call() {
    let cfg = PackConfig::default();
    let items = vec![
        PackItem::new("ok", 10.0, 10.0),
        PackItem::new("bad", 0.0, 10.0),
    ];
    match pack(items, &cfg) {
        Err(PackError::InvalidDimension { width, height }) => {
            assert_eq!(width, 0.0);
            assert_eq!(height, 10.0);
        }
        _ => panic!("expected InvalidDimension"),
    }
}

#[test]
fn empty_input_packs_to_no_pages() {
    let cfg = PackConfig::default();
    let pages = pack(Vec::<PackItem<String>>::new(), &cfg).unwrap();
    assert!(pages.is_empty());
}

#[test]
fn page_sized_rectangle_fills_one_page_unrotated() {
    let cfg = PackConfig::builder().with_page_size(100.0, 200.0).build();
    let pages = pack(vec![PackItem::new("full", 100.0, 200.0)], &cfg).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].placements.len(), 1);

    let placement = &pages[0].placements[0];
    assert_eq!((placement.x, placement.y), (0.0, 0.0));
    assert_eq!((placement.width, placement.height), (100.0, 200.0));
    assert!(!placement.rotated);
}

#[test]
fn oversized_rectangles_are_all_reported_at_once() {
    let cfg = PackConfig::builder().with_page_size(210.0, 297.0).build();
    let items = vec![
        PackItem::new("huge-a", 400.0, 500.0),
        PackItem::new("fits", 100.0, 100.0),
        PackItem::new("huge-b", 300.0, 400.0),
    ];
    match pack(items, &cfg) {
        Err(PackError::DoesNotFit { rejected }) => {
            let mut keys: Vec<&str> = rejected.iter().map(|r| r.key.as_str()).collect();
            keys.sort();
            assert_eq!(keys, ["huge-a", "huge-b"]);
        }
        _ => panic!("expected DoesNotFit"),
    }
}

#[test]
fn oversized_in_both_orientations_is_rejected_for_any_page_size() {
    // Larger than the page in every orientation: both dimensions exceed both
    // page dimensions.
    let cfg = PackConfig::builder().with_page_size(50.0, 80.0).build();
    let result = pack(vec![PackItem::new("big", 81.0, 90.0)], &cfg);
    match result {
        Err(PackError::DoesNotFit { rejected }) => {
            assert_eq!(rejected.len(), 1);
            assert_eq!(rejected[0].key, "big");
        }
        _ => panic!("expected DoesNotFit"),
    }
}
