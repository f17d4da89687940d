use lookup_bench::archive;
use lookup_bench::store::{IndexStore, OrderedIndex};
use lookup_bench::{
    BenchConfig, Driver, Family, FixedWorkload, RandomWorkload, Store, Workload, WorkloadSource,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config(runs: usize, size: usize) -> BenchConfig {
    BenchConfig {
        runs,
        size,
        ..BenchConfig::default()
    }
}

#[test]
fn single_trial_over_five_items() {
    let mut driver = Driver::new(
        config(1, 5),
        FixedWorkload::exact(vec![0, 10, 20, 30, 40]),
        StdRng::seed_from_u64(3),
        Vec::new(),
    );

    let results = driver.run_all().unwrap();
    let labels: Vec<&str> = results.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "insert<BTreeMap<f64, u64>>",
            "read_vector",
            "read<BTreeMap<f64, u64>>",
            "insert<HashMap<f64, u64>>",
            "read<HashMap<f64, u64>>",
            "insert<ProbeTable>",
            "read<ProbeTable>",
            "serialize<BTreeMap<f64, u64>>",
            "deserialize<BTreeMap<f64, u64>>",
        ]
    );
    assert!(results.iter().all(|m| m.failures == 0 && m.items == 5));

    let console = String::from_utf8(driver.into_console()).unwrap();
    assert_eq!(console.matches("[us/item]").count(), results.len());
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = || {
        let mut driver = Driver::new(
            config(3, 200),
            RandomWorkload::seeded(11, 10),
            StdRng::seed_from_u64(12),
            Vec::new(),
        );
        let m = driver.run(Family::Read(Store::Probe)).unwrap();
        (m.items, m.failures, m.dropped)
    };
    assert_eq!(run(), run());
    assert_eq!(run(), (600, 0, 0));
}

#[test]
fn archive_file_roundtrip_of_generated_map() {
    let mut workload = Workload::new();
    RandomWorkload::seeded(5, 10).fill(1_000, &mut workload);

    let mut map = <OrderedIndex as IndexStore>::with_capacity(workload.len());
    for (key, index) in workload.pairs() {
        IndexStore::insert(&mut map, key, index);
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.bin");
    archive::save_to_file(&map, &path).unwrap();
    assert_eq!(archive::load_from_file(&path).unwrap(), map);
}
