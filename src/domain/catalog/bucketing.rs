//! Numeric value → bucket id, used at ingestion time to fill `*_range` columns.

use crate::domain::catalog::range::RangeCondition;

/// Ascending exclusive upper thresholds. `n` thresholds describe `n + 1` buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds(Vec<i64>);

impl Thresholds {
    /// Thresholds are the upper bounds of every bucket but the last, so the
    /// result agrees with the catalog for any condition that passed
    /// [`RangeCondition::validate`].
    pub fn from_condition(condition: &RangeCondition) -> Self {
        let bounds = condition
            .ranges
            .iter()
            .filter_map(|b| b.upper())
            .collect();
        Self(bounds)
    }

    pub fn bucket(&self, value: i64) -> usize {
        self.0.partition_point(|&t| t <= value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::range::Bucket;
    use rand::Rng;

    fn condition(bounds: &[i64]) -> RangeCondition {
        let mut ranges = Vec::new();
        let mut min = -1;
        for (id, &max) in bounds.iter().chain(std::iter::once(&-1)).enumerate() {
            ranges.push(Bucket { id, min, max });
            min = max;
        }
        RangeCondition {
            prefix: String::new(),
            suffix: String::new(),
            ranges,
        }
    }

    #[test]
    fn price_thresholds() {
        let t = Thresholds::from_condition(&condition(&[3000, 6000, 9000, 12000, 15000]));
        assert_eq!(t, Thresholds(vec![3000, 6000, 9000, 12000, 15000]));
        assert_eq!(t.bucket(0), 0);
        assert_eq!(t.bucket(2999), 0);
        assert_eq!(t.bucket(3000), 1);
        assert_eq!(t.bucket(8999), 2);
        assert_eq!(t.bucket(14999), 4);
        assert_eq!(t.bucket(15000), 5);
        assert_eq!(t.bucket(1_000_000), 5);
    }

    #[test]
    fn dimension_and_rent_thresholds() {
        let dim = Thresholds::from_condition(&condition(&[80, 110, 150]));
        assert_eq!([79, 80, 109, 110, 149, 150].map(|v| dim.bucket(v)), [0, 1, 1, 2, 2, 3]);

        let rent = Thresholds::from_condition(&condition(&[50000, 100000, 150000]));
        assert_eq!(rent.bucket(49999), 0);
        assert_eq!(rent.bucket(100000), 2);
        assert_eq!(rent.bucket(150000), 3);
    }

    #[test]
    fn single_bucket_maps_everything_to_zero() {
        let t = Thresholds::from_condition(&condition(&[80]));
        assert_eq!(t, Thresholds(vec![80]));
        assert_eq!([i64::MIN, 79].map(|v| t.bucket(v)), [0, 0]);
        assert_eq!([80, i64::MAX].map(|v| t.bucket(v)), [1, 1]);
    }

    #[test]
    fn bucket_is_the_catalog_interval_containing_the_value() {
        let cond = condition(&[3000, 6000, 9000, 12000, 15000]);
        cond.validate("price").unwrap();
        let t = Thresholds::from_condition(&cond);

        let mut samples = vec![i64::MIN, -1, 0, i64::MAX];
        for b in &cond.ranges {
            if let Some(max) = b.upper() {
                samples.extend([max - 1, max, max + 1]);
            }
        }
        let mut rng = rand::thread_rng();
        samples.extend((0..500).map(|_| rng.gen_range(-1000..20000)));

        for v in samples {
            let containing: Vec<usize> = cond
                .ranges
                .iter()
                .filter(|b| b.contains(v))
                .map(|b| b.id)
                .collect();
            assert_eq!(containing, vec![t.bucket(v)], "value {v}");
        }
    }
}
