use avgen_models::dist::{RangeSampler, UniformRange};

#[test]
fn test_range_contains_is_inclusive() {
    let range = UniformRange::new(1.0, 5.0);
    assert!(range.contains(1.0));
    assert!(range.contains(5.0));
    assert!(!range.contains(0.999));
    assert!(!range.contains(5.001));
}

#[test]
fn test_sampler_stays_within_bounds() {
    let mut sampler = RangeSampler::new(UniformRange::new(-0.0005, 0.0005), 42);
    for _ in 0..1000 {
        let value = sampler.sample();
        assert!((-0.0005..0.0005).contains(&value));
    }
}

#[test]
fn test_sampler_is_reproducible() {
    let mut first = RangeSampler::new(UniformRange::new(0.0, 1.0), 42);
    let mut second = RangeSampler::new(UniformRange::new(0.0, 1.0), 42);
    for _ in 0..100 {
        assert_eq!(first.sample(), second.sample());
    }
}
