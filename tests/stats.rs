use astroplot::{histogram, pearson, AxisDomain, Error, RangeLimits};

#[test]
fn percentile_indices_match_floor_formula() {
    // Sorted series 1..=100: low(10) -> index floor(10*100/100) = 10,
    // high(10) -> index floor(90*100/100) = 90 (zero-indexed).
    let data: Vec<f64> = (1..=100).map(|i| i as f64).collect();
    let mut limits = RangeLimits::new(&data).unwrap();
    let (low, high) = limits.range(10.0, 10.0).unwrap();
    assert_eq!(low, data[10]);
    assert_eq!(high, data[90]);
    assert_eq!(limits.low(), Some(low));
    assert_eq!(limits.high(), Some(high));
}

#[test]
fn symmetric_range_is_range_shorthand() {
    let data: Vec<f64> = (1..=100).map(|i| i as f64).collect();
    let mut a = RangeLimits::new(&data).unwrap();
    let mut b = RangeLimits::new(&data).unwrap();
    assert_eq!(a.symmetric_range(5.0).unwrap(), b.range(5.0, 5.0).unwrap());
}

#[test]
fn input_buffer_is_left_untouched() {
    let data = vec![3.0, 1.0, 2.0];
    let limits = RangeLimits::new(&data).unwrap();
    assert_eq!(data, vec![3.0, 1.0, 2.0], "caller's buffer must not be sorted");
    assert_eq!(limits.data(), &[1.0, 2.0, 3.0]);
}

#[test]
fn cutoffs_are_recomputed_on_demand() {
    let data: Vec<f64> = (1..=100).map(|i| i as f64).collect();
    let mut limits = RangeLimits::new(&data).unwrap();
    assert_eq!(limits.low(), None);
    limits.low_percentile(10.0).unwrap();
    let first = limits.low().unwrap();
    limits.low_percentile(20.0).unwrap();
    assert_ne!(limits.low().unwrap(), first, "cache is overwritten");
}

#[test]
fn percentile_bounds_are_enforced() {
    let data = vec![1.0, 2.0, 3.0];
    let mut limits = RangeLimits::new(&data).unwrap();
    assert!(matches!(
        limits.low_percentile(-1.0),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        limits.high_percentile(101.0),
        Err(Error::InvalidParameter(_))
    ));
    // Inclusive endpoints are valid and clamp to the last element.
    assert_eq!(limits.low_percentile(0.0).unwrap(), 1.0);
    assert_eq!(limits.low_percentile(100.0).unwrap(), 3.0);
    assert_eq!(limits.high_percentile(0.0).unwrap(), 3.0);
}

#[test]
fn empty_series_is_rejected() {
    assert!(matches!(RangeLimits::new(&[]), Err(Error::EmptyInput)));
}

#[test]
fn histogram_counts_and_edges() {
    let range = AxisDomain::new(0.0, 10.0).unwrap();
    let data = vec![0.0, 1.0, 1.5, 9.99, 10.0, -0.1, 10.1];
    let counts = histogram(&data, 10, &range).unwrap();
    assert_eq!(counts.iter().sum::<u32>(), 5, "out-of-range values ignored");
    assert_eq!(counts[0], 1);
    assert_eq!(counts[1], 2);
    assert_eq!(counts[9], 2, "upper bound lands in the last bin");
}

#[test]
fn histogram_rejects_bad_configuration() {
    let range = AxisDomain::new(0.0, 10.0).unwrap();
    assert!(matches!(
        histogram(&[1.0], 0, &range),
        Err(Error::InvalidParameter(_))
    ));
    let flat = AxisDomain::new(5.0, 5.0).unwrap();
    assert!(matches!(
        histogram(&[1.0], 10, &flat),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn pearson_detects_linear_relations() {
    let xs: Vec<f64> = (0..50).map(|i| i as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x - 7.0).collect();
    assert!((pearson(&xs, &ys).unwrap() - 1.0).abs() < 1e-12);

    let neg: Vec<f64> = xs.iter().map(|x| -2.0 * x + 5.0).collect();
    assert!((pearson(&xs, &neg).unwrap() + 1.0).abs() < 1e-12);
}

#[test]
fn pearson_error_conditions() {
    assert!(matches!(
        pearson(&[1.0, 2.0], &[1.0]),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        pearson(&[1.0], &[1.0]),
        Err(Error::InsufficientData(_))
    ));
    assert!(matches!(
        pearson(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]),
        Err(Error::InvalidParameter(_))
    ));
}
