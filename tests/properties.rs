//! Property tests over random parameter sets and seeds.

use delvekit::generator::rect::ROOM_EPSILON;
use delvekit::{
    CorridorId, GeneratorSettings, RoomId, Violation, check_dungeon, find_violation,
    generate_seeded, is_fully_connected,
};
use proptest::prelude::*;

/// Valid settings, including occupancies that shrink small rooms below one tile.
fn settings_strategy() -> impl Strategy<Value = GeneratorSettings> {
    (
        (24u32..96, 24u32..96),
        (2u32..10, 16u32..200),
        (0.0f32..=1.0, 0u32..4, 0u32..1500),
        (1u32..4, 0.05f32..0.8, 0.0f32..0.15),
        (1u32..3, any::<bool>()),
    )
        .prop_map(
            |(
                (width, height),
                (min_length, min_split_area),
                (stop_chance, min_depth_to_stop, max_area_for_stop),
                (corridor_width, min_occupancy, extra_occupancy),
                (scale, repair_connectivity),
            )| GeneratorSettings {
                width,
                height,
                min_split_area: min_split_area as f32,
                min_length: min_length as f32,
                max_area_for_stop: max_area_for_stop as f32,
                stop_chance,
                min_depth_to_stop,
                corridor_width,
                min_occupancy,
                max_occupancy: min_occupancy + extra_occupancy,
                scale,
                max_split_passes: 100,
                repair_connectivity,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Rooms are never empty and stay inside their region.
    #[test]
    fn prop_rooms_inside_regions(settings in settings_strategy(), seed: u64) {
        prop_assert!(settings.validate().is_ok());
        let dungeon = generate_seeded(settings, seed).unwrap();

        prop_assert!(!dungeon.rooms().is_empty());
        for (i, room) in dungeon.rooms().iter().enumerate() {
            let region = dungeon.region(room.region).unwrap();
            prop_assert!(room.footprint.area() > 0.0);
            prop_assert!(region.footprint.contains_rect(&room.footprint));
            prop_assert!(region.children().is_none());
            prop_assert_eq!(region.room(), Some(RoomId(i)));
        }
    }

    /// Rooms never overlap nor touch.
    #[test]
    fn prop_rooms_do_not_touch(settings in settings_strategy(), seed: u64) {
        let dungeon = generate_seeded(settings, seed).unwrap();
        let rooms = dungeon.rooms();

        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                prop_assert!(!a.footprint.overlaps(&b.footprint));
                prop_assert!(!a.footprint.touches(&b.footprint, ROOM_EPSILON));
            }
        }
    }

    /// Rooms and corridors always reference each other, and corridors reach both rooms.
    #[test]
    fn prop_corridors_are_consistent(settings in settings_strategy(), seed: u64) {
        let dungeon = generate_seeded(settings, seed).unwrap();

        match find_violation(&dungeon) {
            None | Some(Violation::IsolatedRoom(_)) => (),
            Some(v) => prop_assert!(false, "unexpected violation: {}", v),
        }
        for (i, corridor) in dungeon.corridors().iter().enumerate() {
            for room in corridor.rooms {
                let corridors = &dungeon.room(room).unwrap().corridors;
                prop_assert!(corridors.contains(&CorridorId(i)));
            }
            prop_assert!(dungeon.are_adjacent(corridor.rooms[0], corridor.rooms[1]));
        }
    }

    /// Connected dungeons always pass the checks, and checking twice gives the same answer.
    #[test]
    fn prop_validation_is_stable(settings in settings_strategy(), seed: u64) {
        let dungeon = generate_seeded(settings, seed).unwrap();
        let first = check_dungeon(&dungeon);

        prop_assert_eq!(first, check_dungeon(&dungeon));
        if is_fully_connected(&dungeon) {
            prop_assert!(first);
        }
    }

    /// The same seed always produces the same dungeon.
    #[test]
    fn prop_generation_is_deterministic(settings in settings_strategy(), seed: u64) {
        let a = generate_seeded(settings.clone(), seed).unwrap();
        let b = generate_seeded(settings, seed).unwrap();
        prop_assert_eq!(a, b);
    }
}
