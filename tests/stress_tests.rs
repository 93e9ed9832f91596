use bombard_ant::{Evolution, Evolver, RunConfig};
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;
use std::time::Instant;

#[test]
fn stress_test_large_population_throughput() {
    let pop_size = 2000;
    let config = RunConfig::default()
        .with_population_size(pop_size)
        .with_bombs_per_candidate(10)
        .with_nest_count(12);
    let mut evo = Evolution::with_rng(Pcg64::seed_from_u64(42));
    evo.reset(config).unwrap();

    println!("Starting stress test ({pop_size} candidates x 10 bombs x 12 nests)...");
    let start = Instant::now();
    evo.run(20).unwrap();
    let duration = start.elapsed();

    println!(
        "20 generations in {:?}, best kill rate {:.1}%",
        duration,
        evo.kill_rate()
    );

    assert_eq!(evo.population().len(), pop_size);
    assert_eq!(evo.generation(), 20);
    // Conservative bound for CI machines and debug builds.
    assert!(duration.as_secs() < 60, "20 generations took {duration:?}");
}
