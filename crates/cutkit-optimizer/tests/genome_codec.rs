use cutkit_optimizer::genome::{self, CuttingParams, GenomeScale, DNA_BITS};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SCALE: GenomeScale = GenomeScale {
    speed_max: 8000.0,
    feed_max: 8000.0,
    cut_depth_max: 0.68,
};

#[test]
fn every_random_genome_decodes_finite_and_in_range() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..2000 {
        let genome = genome::random_genome(&mut rng);
        let params = genome::decode(&genome, &SCALE);
        assert!(params.speed.is_finite());
        assert!(params.feed.is_finite());
        assert!(params.cut_depth.is_finite());
        assert!((0.0..=SCALE.speed_max).contains(&params.speed));
        assert!((0.0..=SCALE.feed_max).contains(&params.feed));
        assert!((0.0..=SCALE.cut_depth_max).contains(&params.cut_depth));
    }
}

#[test]
fn uniform_bits_decode_uniformly_over_the_grid() {
    let mut rng = StdRng::seed_from_u64(2);
    let samples = 4000;
    let mean = (0..samples)
        .map(|_| genome::decode(&genome::random_genome(&mut rng), &SCALE).speed)
        .sum::<f64>()
        / samples as f64;
    // Uniform on [0, 8000] has mean 4000; allow a generous sampling band.
    assert!((mean - 4000.0).abs() < 300.0, "sample mean {mean}");
}

#[test]
fn round_trip_is_identity_on_every_axis_grid() {
    for k in [0u64, 1, 77, 126, 127] {
        let cut_depth = k as f64 / 127.0 * SCALE.cut_depth_max;
        let params = CuttingParams {
            speed: 0.0,
            feed: 0.0,
            cut_depth,
        };
        let decoded = genome::decode(&genome::encode(&params, &SCALE), &SCALE);
        assert!((decoded.cut_depth - cut_depth).abs() < 1e-12);
    }
    for k in [0u64, 1, 4095, 8191] {
        let feed = k as f64 / 8191.0 * SCALE.feed_max;
        let params = CuttingParams {
            speed: 0.0,
            feed,
            cut_depth: 0.0,
        };
        let decoded = genome::decode(&genome::encode(&params, &SCALE), &SCALE);
        assert!((decoded.feed - feed).abs() < 1e-9);
    }
}

#[test]
fn identical_genomes_decode_identically() {
    let mut rng = StdRng::seed_from_u64(3);
    let genome_a = genome::random_genome(&mut rng);
    let genome_b = genome_a;
    let a = genome::decode(&genome_a, &SCALE);
    let b = genome::decode(&genome_b, &SCALE);
    assert_eq!(a, b);
    assert_eq!(genome_a.len(), DNA_BITS);
}
