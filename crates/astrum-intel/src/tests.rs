#[cfg(test)]
mod tests {
    use astrum_core::enums::IntelCoverage;
    use astrum_core::error::ContractViolation;
    use astrum_core::types::{EntityId, PlayerId, SimTime};

    use crate::policy::DecayPolicy;
    use crate::record::{CoverageChange, IntelRecord};

    const ALLY: PlayerId = PlayerId(1);
    const RIVAL: PlayerId = PlayerId(2);

    fn fast_decay() -> DecayPolicy {
        DecayPolicy {
            enabled: true,
            grace_ticks: 10,
            step_ticks: 10,
            floor: IntelCoverage::Unknown,
        }
    }

    #[test]
    fn test_never_observed_returns_sentinel() {
        let record = IntelRecord::new(EntityId(1));
        let reading = record.reading(ALLY);
        assert_eq!(reading.current, IntelCoverage::Unknown);
        assert!(reading.dated.is_none(), "No fabricated timestamp");
        assert!(record.dated(RIVAL).is_none());
        assert_eq!(record.observers().count(), 0);
    }

    #[test]
    fn test_observation_sets_current_equal_to_dated() {
        let mut record = IntelRecord::new(EntityId(1));
        let reading = record
            .observe(ALLY, IntelCoverage::Broad, SimTime::at(5))
            .unwrap();
        let dated = reading.dated.unwrap();
        assert_eq!(dated.level, IntelCoverage::Broad);
        assert_eq!(dated.as_of.tick, 5);
        assert_eq!(reading.current, dated.level);
    }

    #[test]
    fn test_factions_are_independent() {
        let mut record = IntelRecord::new(EntityId(1));
        record
            .observe(ALLY, IntelCoverage::Comprehensive, SimTime::at(1))
            .unwrap();
        assert_eq!(record.current(ALLY), IntelCoverage::Comprehensive);
        assert_eq!(record.current(RIVAL), IntelCoverage::Unknown);
        assert!(record.dated(RIVAL).is_none());
    }

    #[test]
    fn test_decay_lowers_current_but_freezes_dated() {
        let mut record = IntelRecord::new(EntityId(1));
        record
            .observe(ALLY, IntelCoverage::Comprehensive, SimTime::at(0))
            .unwrap();

        let changes = record.decay(SimTime::at(9), &fast_decay());
        assert!(changes.is_empty(), "Still within grace period");

        let changes = record.decay(SimTime::at(10), &fast_decay());
        assert_eq!(
            changes,
            vec![CoverageChange {
                faction: ALLY,
                from: IntelCoverage::Comprehensive,
                to: IntelCoverage::Broad,
            }]
        );

        let dated = record.dated(ALLY).unwrap();
        assert_eq!(dated.level, IntelCoverage::Comprehensive);
        assert_eq!(dated.as_of.tick, 0, "Dated stamp frozen without observation");

        record.decay(SimTime::at(1_000), &fast_decay());
        assert_eq!(record.current(ALLY), IntelCoverage::Unknown);
        assert_eq!(
            record.dated(ALLY).unwrap().level,
            IntelCoverage::Comprehensive
        );
    }

    #[test]
    fn test_decay_is_idempotent_within_a_tick() {
        let mut record = IntelRecord::new(EntityId(1));
        record
            .observe(ALLY, IntelCoverage::Broad, SimTime::at(0))
            .unwrap();
        assert_eq!(record.decay(SimTime::at(15), &fast_decay()).len(), 1);
        assert!(record.decay(SimTime::at(15), &fast_decay()).is_empty());
    }

    #[test]
    fn test_fresh_observation_restores_current() {
        let mut record = IntelRecord::new(EntityId(1));
        record
            .observe(ALLY, IntelCoverage::Broad, SimTime::at(0))
            .unwrap();
        record.decay(SimTime::at(100), &fast_decay());
        assert_eq!(record.current(ALLY), IntelCoverage::Unknown);

        let reading = record
            .observe(ALLY, IntelCoverage::Broad, SimTime::at(100))
            .unwrap();
        assert_eq!(reading.current, IntelCoverage::Broad);
        assert_eq!(reading.dated.unwrap().as_of.tick, 100);
    }

    #[test]
    fn test_weaker_observation_never_lowers_dated() {
        let mut record = IntelRecord::new(EntityId(1));
        record
            .observe(ALLY, IntelCoverage::Comprehensive, SimTime::at(0))
            .unwrap();
        let reading = record
            .observe(ALLY, IntelCoverage::Basic, SimTime::at(20))
            .unwrap();
        let dated = reading.dated.unwrap();
        assert_eq!(dated.level, IntelCoverage::Comprehensive);
        assert_eq!(dated.as_of.tick, 20);
        assert_eq!(reading.current, IntelCoverage::Comprehensive);
    }

    #[test]
    fn test_out_of_order_observation_is_rejected() {
        let mut record = IntelRecord::new(EntityId(4));
        record
            .observe(ALLY, IntelCoverage::Basic, SimTime::at(30))
            .unwrap();
        let err = record
            .observe(ALLY, IntelCoverage::Broad, SimTime::at(29))
            .unwrap_err();
        assert_eq!(
            err,
            ContractViolation::ObservationOutOfOrder {
                entity: EntityId(4),
                faction: ALLY,
                last: 30,
                attempted: 29,
            }
        );
        // Rejected observation leaves the record untouched.
        assert_eq!(record.current(ALLY), IntelCoverage::Basic);
        assert_eq!(record.dated(ALLY).unwrap().as_of.tick, 30);
    }

    #[test]
    fn test_same_tick_observation_is_accepted() {
        let mut record = IntelRecord::new(EntityId(1));
        record
            .observe(ALLY, IntelCoverage::Basic, SimTime::at(8))
            .unwrap();
        let reading = record
            .observe(ALLY, IntelCoverage::Broad, SimTime::at(8))
            .unwrap();
        assert_eq!(reading.current, IntelCoverage::Broad);
    }

    /// Drive a mixed sequence of observations and decay ticks and check the
    /// record's invariants after every step.
    #[test]
    fn test_invariants_hold_over_mixed_sequence() {
        let mut record = IntelRecord::new(EntityId(1));
        let policy = DecayPolicy {
            enabled: true,
            grace_ticks: 3,
            step_ticks: 2,
            floor: IntelCoverage::Unknown,
        };
        let observations: [(u64, IntelCoverage); 5] = [
            (0, IntelCoverage::Basic),
            (7, IntelCoverage::Comprehensive),
            (8, IntelCoverage::Basic),
            (25, IntelCoverage::Broad),
            (60, IntelCoverage::Unknown),
        ];

        let mut last_stamp = 0;
        let mut next_obs = 0;
        for tick in 0..100u64 {
            if next_obs < observations.len() && observations[next_obs].0 == tick {
                let (_, level) = observations[next_obs];
                let reading = record.observe(ALLY, level, SimTime::at(tick)).unwrap();
                assert_eq!(reading.current, reading.dated.unwrap().level);
                next_obs += 1;
            } else {
                record.decay(SimTime::at(tick), &policy);
            }

            let reading = record.reading(ALLY);
            if let Some(dated) = reading.dated {
                assert!(reading.current <= dated.level);
                assert!(dated.as_of.tick >= last_stamp, "Stamp went backwards");
                last_stamp = dated.as_of.tick;
            }
        }
        assert_eq!(last_stamp, 60);
    }
}
