//! Unit tests for vc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ClusterId, NodeId, SiteId, UnitId};

    #[test]
    fn index_roundtrip() {
        let id = ClusterId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ClusterId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn unit_id_holds_census_scale_values() {
        // Real block ids run to fifteen digits.
        let id = UnitId(60_375_990_002_013);
        assert_eq!(id.index(), 60_375_990_002_013);
        assert_eq!(id.to_string(), "UnitId(60375990002013)");
    }

    #[test]
    fn ordering() {
        assert!(ClusterId(0) < ClusterId(1));
        assert!(SiteId(100) > SiteId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(UnitId::INVALID.0, u64::MAX);
        assert_eq!(ClusterId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(SiteId::default(), SiteId::INVALID);
    }

    #[test]
    fn try_from_rejects_overflow() {
        assert!(NodeId::try_from(usize::MAX).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(SiteId(7).to_string(), "SiteId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(-118.24, 34.05);
        assert_eq!(p.dist2(p), 0.0);
    }

    #[test]
    fn pythagorean_triple() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert_eq!(a.dist2(b), 25.0);
        assert_eq!(b.dist2(a), 25.0);
    }

    #[test]
    fn centroid_of_square() {
        let pts = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(2.0, 0.0),
            GeoPoint::new(2.0, 2.0),
            GeoPoint::new(0.0, 2.0),
        ];
        let c = GeoPoint::centroid(&pts).unwrap();
        assert_eq!(c, GeoPoint::new(1.0, 1.0));
    }

    #[test]
    fn centroid_of_empty_is_none() {
        assert!(GeoPoint::centroid(&[]).is_none());
    }

    #[test]
    fn centroid_of_singleton_is_itself() {
        let p = GeoPoint::new(-87.6, 41.9);
        assert_eq!(GeoPoint::centroid(&[p]).unwrap(), p);
    }

    #[test]
    fn display() {
        let p = GeoPoint::new(-118.243685, 34.052234);
        assert_eq!(p.to_string(), "(-118.243685, 34.052234)");
    }
}

#[cfg(test)]
mod config {
    use crate::{RegionConfig, TierOverrides};

    #[test]
    fn defaults_validate() {
        RegionConfig::default().validate().unwrap();
    }

    #[test]
    fn for_region_sets_short_capacity() {
        let cfg = RegionConfig::for_region(12_500.0);
        assert_eq!(cfg.short_capacity, 12_500.0);
        assert_eq!(cfg.long_capacity, 75_000.0);
        cfg.validate().unwrap();
    }

    #[test]
    fn rejects_nonpositive_capacity() {
        let mut cfg = RegionConfig::default();
        cfg.short_capacity = 0.0;
        assert!(cfg.validate().is_err());
        cfg.short_capacity = -5.0;
        assert!(cfg.validate().is_err());
        cfg.short_capacity = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_min_clusters() {
        let mut cfg = RegionConfig::default();
        cfg.min_clusters = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_improvement_factor() {
        let mut cfg = RegionConfig::default();
        cfg.improvement_factor = 0.0;
        assert!(cfg.validate().is_err());
        cfg.improvement_factor = 1.5;
        assert!(cfg.validate().is_err());
        cfg.improvement_factor = 1.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_shrinking_expansion_factor() {
        let mut cfg = RegionConfig::default();
        cfg.expansion_factor = 0.9;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_dropbox_override_allowed_zero_short_rejected() {
        let mut cfg = RegionConfig::default();
        cfg.site_overrides = TierOverrides { dropbox: Some(0), ..TierOverrides::default() };
        assert!(cfg.validate().is_ok());

        cfg.site_overrides = TierOverrides { short: Some(0), ..TierOverrides::default() };
        assert!(cfg.validate().is_err());
        cfg.site_overrides = TierOverrides { long: Some(0), ..TierOverrides::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn negative_cost_base_rejected() {
        let mut cfg = RegionConfig::default();
        cfg.center_cost_base = -1.0;
        assert!(cfg.validate().is_err());
        // Zero is fine: a region may model free public buildings.
        cfg.center_cost_base = 0.0;
        assert!(cfg.validate().is_ok());
    }
}
