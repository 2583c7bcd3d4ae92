use criterion::{Criterion, criterion_group, criterion_main};
use gangsheet_core::config::PackConfig;
use gangsheet_core::model::PackItem;
use gangsheet_core::packer::pack;
use rand::{Rng, SeedableRng};

fn random_items(count: usize) -> Vec<PackItem<String>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            let w = rng.gen_range(10..=100) as f64;
            let h = rng.gen_range(10..=100) as f64;
            PackItem::new(format!("r{i}"), w, h)
        })
        .collect()
}

fn bench_pack(c: &mut Criterion) {
    let cfg = PackConfig::default();
    for count in [100usize, 500] {
        let items = random_items(count);
        c.bench_function(&format!("pack_{count}_random"), |b| {
            b.iter(|| pack(items.clone(), &cfg).unwrap())
        });
    }
}

criterion_group!(benches, bench_pack);
criterion_main!(benches);
