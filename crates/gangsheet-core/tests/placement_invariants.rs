use gangsheet_core::config::PackConfig;
use gangsheet_core::model::{PackItem, Placement};
use gangsheet_core::packer::pack;
use rand::{Rng, SeedableRng};

fn disjoint(placements: &[Placement<String>]) -> bool {
    for i in 0..placements.len() {
        for j in (i + 1)..placements.len() {
            let a = &placements[i];
            let b = &placements[j];
            let overlap = a.x < b.x + b.width
                && b.x < a.x + a.width
                && a.y < b.y + b.height
                && b.y < a.y + a.height;
            if overlap {
                return false;
            }
        }
    }
    true
}

#[test]
fn random_rectangles_conserve_do_not_overlap_and_stay_in_bounds() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let cfg = PackConfig::builder().with_page_size(210.0, 297.0).build();

    let count = 200;
    let items: Vec<PackItem<String>> = (0..count)
        .map(|i| {
            let w = rng.gen_range(5..=120) as f64;
            let h = rng.gen_range(5..=120) as f64;
            PackItem::new(format!("r{i}"), w, h)
        })
        .collect();

    let pages = pack(items, &cfg).expect("every rectangle fits an empty page");

    // Conservation: everything placed exactly once.
    let placed: usize = pages.iter().map(|p| p.placements.len()).sum();
    assert_eq!(placed, count);
    let mut keys: Vec<&str> = pages
        .iter()
        .flat_map(|p| p.placements.iter().map(|l| l.key.as_str()))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), count);

    for page in &pages {
        assert!(disjoint(&page.placements), "page {} overlaps", page.index);
        for location in &page.placements {
            assert!(location.x >= 0.0 && location.y >= 0.0);
            assert!(location.x + location.width <= cfg.page_width + 1e-9);
            assert!(location.y + location.height <= cfg.page_height + 1e-9);
        }
    }
}

#[test]
fn rotated_placements_swap_their_dimensions() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let cfg = PackConfig::builder().with_page_size(150.0, 150.0).build();

    let items: Vec<PackItem<String>> = (0..80)
        .map(|i| {
            let w = rng.gen_range(10..=70) as f64;
            let h = rng.gen_range(10..=70) as f64;
            PackItem::new(format!("{w}x{h}-{i}"), w, h)
        })
        .collect();
    let originals: Vec<(String, f64, f64)> = items
        .iter()
        .map(|it| (it.key.clone(), it.width, it.height))
        .collect();

    let pages = pack(items, &cfg).unwrap();
    for page in &pages {
        for location in &page.placements {
            let (_, w, h) = originals
                .iter()
                .find(|(k, _, _)| *k == location.key)
                .expect("placement key came from the input");
            if location.rotated {
                assert_eq!((location.width, location.height), (*h, *w));
            } else {
                assert_eq!((location.width, location.height), (*w, *h));
            }
        }
    }
}
