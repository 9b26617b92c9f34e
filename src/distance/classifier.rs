use super::{DistanceBucket, Thresholds};

/// Map a block distance onto a risk bucket. Bounds are inclusive.
pub fn classify(distance: u64, thresholds: &Thresholds) -> DistanceBucket {
    let [t1, t2, t3] = thresholds.as_array();
    if distance <= t1 {
        DistanceBucket::Closest
    } else if distance <= t2 {
        DistanceBucket::Near
    } else if distance <= t3 {
        DistanceBucket::Far
    } else {
        DistanceBucket::Farthest
    }
}

/// Absolute difference between a target block and the current chain height.
pub fn block_distance(target_block: u64, current_block: u64) -> u64 {
    target_block.abs_diff(current_block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn narrow_triple_examples() {
        let t = Thresholds::new(2, 10, 256).unwrap();
        assert_eq!(classify(5, &t), DistanceBucket::Near);
        assert_eq!(classify(5, &t).color(), "lightgreen");
        assert_eq!(classify(500, &t), DistanceBucket::Farthest);
    }

    #[test]
    fn bounds_are_inclusive() {
        let t = Thresholds::SIMPLE;
        assert_eq!(classify(0, &t), DistanceBucket::Closest);
        assert_eq!(classify(64, &t), DistanceBucket::Closest);
        assert_eq!(classify(65, &t), DistanceBucket::Near);
        assert_eq!(classify(128, &t), DistanceBucket::Near);
        assert_eq!(classify(192, &t), DistanceBucket::Far);
        assert_eq!(classify(193, &t), DistanceBucket::Farthest);
    }

    #[test]
    fn classification_is_monotonic() {
        for t in [Thresholds::SIMPLE, Thresholds::COMPLEX, Thresholds::new(2, 10, 256).unwrap()] {
            let mut prev = classify(0, &t);
            for d in 1..400 {
                let cur = classify(d, &t);
                assert!(cur >= prev, "distance {d} moved from {prev:?} to {cur:?}");
                prev = cur;
            }
        }
    }

    #[test]
    fn equal_bounds_skip_buckets() {
        let t = Thresholds::new(10, 10, 10).unwrap();
        assert_eq!(classify(10, &t), DistanceBucket::Closest);
        assert_eq!(classify(11, &t), DistanceBucket::Farthest);
    }

    #[test]
    fn decreasing_bounds_are_rejected() {
        let err = Thresholds::new(10, 5, 20).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn thresholds_parse_from_env_strings() {
        let t: Thresholds = "32, 64,96".parse().unwrap();
        assert_eq!(t, Thresholds::COMPLEX);
        assert!("1,2".parse::<Thresholds>().is_err());
        assert!("a,b,c".parse::<Thresholds>().is_err());
        assert!("3,2,1".parse::<Thresholds>().is_err());
    }

    #[test]
    fn thresholds_serialize_as_array() {
        let json = serde_json::to_string(&Thresholds::SIMPLE).unwrap();
        assert_eq!(json, "[64,128,192]");
        assert!(serde_json::from_str::<Thresholds>("[3,2,1]").is_err());
    }

    #[test]
    fn distance_is_absolute() {
        assert_eq!(block_distance(100, 40), 60);
        assert_eq!(block_distance(40, 100), 60);
        assert_eq!(block_distance(7, 7), 0);
    }

    #[test]
    fn ranks_follow_bucket_order() {
        let ranks: Vec<u8> = DistanceBucket::ALL.iter().map(|b| b.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }
}
