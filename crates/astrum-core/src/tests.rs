#[cfg(test)]
mod tests {
    use crate::capabilities::{Handle, Kind, Ship, Star};
    use crate::commands::{Order, SimInput};
    use crate::enums::*;
    use crate::events::{Outbox, SimEvent};
    use crate::state::GalaxySnapshot;
    use crate::types::*;

    #[test]
    fn test_coverage_ordering() {
        assert!(IntelCoverage::Unknown < IntelCoverage::Basic);
        assert!(IntelCoverage::Basic < IntelCoverage::Broad);
        assert!(IntelCoverage::Broad < IntelCoverage::Comprehensive);
        assert_eq!(IntelCoverage::default(), IntelCoverage::Unknown);
    }

    #[test]
    fn test_coverage_lowered_by_stops_at_unknown() {
        assert_eq!(
            IntelCoverage::Comprehensive.lowered_by(1),
            IntelCoverage::Broad
        );
        assert_eq!(IntelCoverage::Broad.lowered_by(2), IntelCoverage::Unknown);
        assert_eq!(IntelCoverage::Basic.lowered_by(40), IntelCoverage::Unknown);
        assert_eq!(
            IntelCoverage::Comprehensive.lowered_by(u64::MAX),
            IntelCoverage::Unknown
        );
        assert_eq!(IntelCoverage::Broad.lowered_by(0), IntelCoverage::Broad);
    }

    #[test]
    fn test_coverage_rank_round_trip() {
        for level in IntelCoverage::ALL {
            assert_eq!(IntelCoverage::from_rank(level.rank()), level);
        }
    }

    #[test]
    fn test_sector_containing() {
        let size = 100.0;
        assert_eq!(
            SectorIndex::containing(&Position::new(0.0, 0.0, 0.0), size),
            SectorIndex::new(0, 0, 0)
        );
        assert_eq!(
            SectorIndex::containing(&Position::new(99.9, 150.0, 250.0), size),
            SectorIndex::new(0, 1, 2)
        );
        // Negative coordinates floor away from zero.
        assert_eq!(
            SectorIndex::containing(&Position::new(-0.1, -100.0, -100.1), size),
            SectorIndex::new(-1, -1, -2)
        );
    }

    #[test]
    fn test_sector_center_is_inside_sector() {
        let sector = SectorIndex::new(-2, 3, 0);
        let center = sector.center(100.0);
        assert_eq!(SectorIndex::containing(&center, 100.0), sector);
    }

    #[test]
    fn test_sector_distance() {
        let a = SectorIndex::new(0, 0, 0);
        assert_eq!(a.sector_distance(&a), 0);
        assert_eq!(a.sector_distance(&SectorIndex::new(1, 1, -1)), 1);
        assert_eq!(a.sector_distance(&SectorIndex::new(-3, 1, 2)), 3);
    }

    #[test]
    fn test_position_range() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 12.0);
        assert!((a.range_to(&b) - 13.0).abs() < 1e-12);
        assert!((a.range_sq_to(&b) - 169.0).abs() < 1e-9);
    }

    #[test]
    fn test_sim_time_at_matches_advance() {
        let mut time = SimTime::default();
        for _ in 0..25 {
            time.advance();
        }
        let direct = SimTime::at(25);
        assert_eq!(time.tick, direct.tick);
        assert!((time.elapsed_secs - direct.elapsed_secs).abs() < 1e-9);
        assert_eq!(direct.ticks_since(&SimTime::at(30)), 0);
        assert_eq!(direct.ticks_since(&SimTime::at(5)), 20);
    }

    #[test]
    fn test_never_observed_reading_has_no_timestamp() {
        let reading = CoverageReading::NEVER_OBSERVED;
        assert!(reading.is_never_observed());
        assert_eq!(reading.current, IntelCoverage::Unknown);
        assert_eq!(reading.staleness(), 0);
    }

    #[test]
    fn test_reading_staleness() {
        let reading = CoverageReading {
            current: IntelCoverage::Basic,
            dated: Some(DatedCoverage {
                level: IntelCoverage::Comprehensive,
                as_of: SimTime::at(4),
            }),
        };
        assert_eq!(reading.staleness(), 2);
    }

    #[test]
    fn test_handle_carries_kind() {
        let ship: Handle<Ship> = Handle::from_raw(EntityId(7));
        let star: Handle<Star> = Handle::from_raw(EntityId(7));
        assert_eq!(ship.kind(), EntityKind::Ship);
        assert_eq!(star.kind(), Star::KIND);
        assert_eq!(EntityId::from(ship), star.id());
    }

    #[test]
    fn test_kind_partitions() {
        let elements: Vec<_> = EntityKind::ALL.iter().filter(|k| k.is_element()).collect();
        let commands: Vec<_> = EntityKind::ALL.iter().filter(|k| k.is_command()).collect();
        assert_eq!(elements.len(), 2);
        assert_eq!(commands.len(), 3);
        assert!(EntityKind::ALL
            .iter()
            .all(|k| !(k.is_element() && k.is_command())));
    }

    #[test]
    fn test_outbox_drain_empties() {
        let mut outbox = Outbox::new();
        outbox.push(SimEvent::CommandLeaderless {
            command: EntityId(1),
        });
        outbox.push(SimEvent::InputRejected {
            reason: "nope".into(),
        });
        assert_eq!(outbox.len(), 2);
        let drained = outbox.drain();
        assert_eq!(drained.len(), 2);
        assert!(outbox.is_empty());
        assert!(outbox.drain().is_empty());
    }

    /// Events cross the process boundary as tagged JSON.
    #[test]
    fn test_sim_event_serde() {
        let events = vec![
            SimEvent::Died {
                entity: EntityId(3),
                kind: EntityKind::Ship,
                cause: DeathCause::Destroyed,
                tick: 12,
            },
            SimEvent::OwnerChanged {
                entity: EntityId(4),
                previous: PlayerId(1),
                current: PlayerId(2),
                tick: 9,
            },
            SimEvent::OrderAccepted {
                subject: EntityId(5),
                issuer: PlayerId(1),
                order: Order::Attack {
                    target: EntityId(6),
                },
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            assert!(json.contains("\"type\""));
            let back: SimEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_sim_input_deserializes_from_tagged_json() {
        let json = r#"{"type":"Observe","entity":9,"faction":2,"level":"Broad","at":{"tick":40,"elapsed_secs":4.0}}"#;
        let input: SimInput = serde_json::from_str(json).unwrap();
        assert_eq!(
            input,
            SimInput::Observe {
                entity: EntityId(9),
                faction: PlayerId(2),
                level: IntelCoverage::Broad,
                at: SimTime::at(40),
            }
        );
    }

    #[test]
    fn test_order_requirements() {
        assert!(Order::Attack {
            target: EntityId(1)
        }
        .requires_combat());
        assert!(!Order::Repair.requires_combat());
        assert!(Order::Move {
            destination: Position::ORIGIN
        }
        .requires_mobility());
        assert!(!Order::Disband.requires_mobility());
    }

    #[test]
    fn test_snapshot_item_lookup_on_empty() {
        let snapshot = GalaxySnapshot::default();
        assert!(snapshot.item(EntityId(0)).is_none());
    }
}
