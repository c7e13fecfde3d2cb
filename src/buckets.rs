//! Fixed-range bucketing for the distribution charts.

/// How a bucket's upper bound is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// Value belongs to the bucket when `value < upper`.
    Exclusive,
    /// Value belongs to the bucket when `value <= upper`.
    Inclusive,
}

/// Ordered, disjoint labeled ranges with an open-ended top bucket.
pub struct BucketSpec {
    pub bounds: &'static [(&'static str, f64)],
    pub last_label: &'static str,
    pub kind: BoundKind,
}

/// Wealth distribution: [0,10K) [10K,100K) [100K,1M) [1M,10M) [10M,∞).
pub const WEALTH_BUCKETS: BucketSpec = BucketSpec {
    bounds: &[
        ("0-10K", 10_000.0),
        ("10K-100K", 100_000.0),
        ("100K-1M", 1_000_000.0),
        ("1M-10M", 10_000_000.0),
    ],
    last_label: "10M+",
    kind: BoundKind::Exclusive,
};

/// Level distribution: [1,10] [11,25] [26,50] [51,75] [76,100].
pub const LEVEL_BUCKETS: BucketSpec = BucketSpec {
    bounds: &[
        ("1-10", 10.0),
        ("11-25", 25.0),
        ("26-50", 50.0),
        ("51-75", 75.0),
    ],
    last_label: "76-100",
    kind: BoundKind::Inclusive,
};

/// Count values into the spec's buckets, preserving bucket order.
///
/// Anything past the explicit bounds lands in the open-ended last bucket.
/// Non-finite values count as 0. Empty input yields all-zero counts.
pub fn bucketize(values: &[f64], spec: &BucketSpec) -> Vec<(&'static str, u64)> {
    let mut counts = vec![0u64; spec.bounds.len() + 1];

    for &raw in values {
        let value = if raw.is_finite() { raw } else { 0.0 };
        let idx = spec
            .bounds
            .iter()
            .position(|&(_, upper)| match spec.kind {
                BoundKind::Exclusive => value < upper,
                BoundKind::Inclusive => value <= upper,
            })
            .unwrap_or(spec.bounds.len());
        counts[idx] += 1;
    }

    spec.bounds
        .iter()
        .map(|&(label, _)| label)
        .chain(std::iter::once(spec.last_label))
        .zip(counts)
        .collect()
}
