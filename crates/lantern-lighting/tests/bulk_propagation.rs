mod common;

use common::{StubWorld, diamond_shell, palette};
use lantern_geom::{BlockPos, BlockRegion};
use lantern_lighting::{BlockChange, LightPropagationRules, StandardBatchPropagator};

const ORIGIN: BlockPos = BlockPos::ZERO;

fn propagator() -> StandardBatchPropagator<LightPropagationRules> {
    StandardBatchPropagator::new(LightPropagationRules)
}

fn assert_shells(world: &StubWorld, center: BlockPos, radii: std::ops::Range<i32>, expect: impl Fn(i32) -> u8) {
    for r in radii {
        for pos in diamond_shell(center, r) {
            assert_eq!(world.value(pos), expect(r), "at {pos:?}, distance {r}");
        }
    }
}

#[test]
fn add_light_in_vacuum() {
    let p = palette();
    let mut world = StubWorld::testing(p.air);
    world.set_block(ORIGIN, p.full_light);
    let mut prop = propagator();
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(ORIGIN, p.air, p.full_light)]);

    assert_eq!(world.value(ORIGIN), 15);
    assert_eq!(world.value(BlockPos::new(0, 1, 0)), 14);
    assert_eq!(world.value(BlockPos::new(0, 14, 0)), 1);
    assert_shells(&world, ORIGIN, 1..15, |r| 15 - r as u8);
    assert!(prop.is_idle());
}

#[test]
fn remove_light_in_vacuum() {
    let p = palette();
    let mut world = StubWorld::testing(p.air);
    world.set_block(ORIGIN, p.full_light);
    let mut prop = propagator();
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(ORIGIN, p.air, p.full_light)]);

    world.set_block(ORIGIN, p.air);
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(ORIGIN, p.full_light, p.air)]);

    assert_shells(&world, ORIGIN, 0..16, |_| 0);
}

#[test]
fn reduce_light() {
    let p = palette();
    let mut world = StubWorld::testing(p.air);
    world.set_block(ORIGIN, p.full_light);
    let mut prop = propagator();
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(ORIGIN, p.air, p.full_light)]);

    world.set_block(ORIGIN, p.weak_light);
    prop.process_view(
        &p.registry,
        &mut world,
        &[BlockChange::new(ORIGIN, p.full_light, p.weak_light)],
    );

    assert_eq!(world.value(ORIGIN), 2);
    assert_shells(&world, ORIGIN, 1..15, |r| 2u8.saturating_sub(r as u8));
}

#[test]
fn add_overlapping_lights() {
    let p = palette();
    let light_pos = BlockPos::new(5, 0, 0);
    let mut world = StubWorld::single_chunk(p.air);
    world.set_block(ORIGIN, p.full_light);
    world.set_block(light_pos, p.full_light);
    let mut prop = propagator();
    prop.process_view(
        &p.registry,
        &mut world,
        &[
            BlockChange::new(ORIGIN, p.air, p.full_light),
            BlockChange::new(light_pos, p.air, p.full_light),
        ],
    );

    let row: Vec<u8> = (0..6).map(|x| world.value(BlockPos::new(x, 0, 0))).collect();
    assert_eq!(row, vec![15, 14, 13, 13, 14, 15]);
}

#[test]
fn remove_overlapping_light() {
    let p = palette();
    let light_pos = BlockPos::new(5, 0, 0);
    let mut world = StubWorld::testing(p.air);
    world.set_block(ORIGIN, p.full_light);
    world.set_block(light_pos, p.full_light);
    let mut prop = propagator();
    prop.process_view(
        &p.registry,
        &mut world,
        &[
            BlockChange::new(ORIGIN, p.air, p.full_light),
            BlockChange::new(light_pos, p.air, p.full_light),
        ],
    );

    world.set_block(light_pos, p.air);
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(light_pos, p.full_light, p.air)]);

    assert_shells(&world, ORIGIN, 0..16, |r| 15u8.saturating_sub(r as u8));
}

#[test]
fn remove_light_overlapping_at_edge() {
    let p = palette();
    let light_pos = BlockPos::new(2, 0, 0);
    let mut world = StubWorld::testing(p.air);
    world.set_block(ORIGIN, p.weak_light);
    world.set_block(light_pos, p.weak_light);
    let mut prop = propagator();
    prop.process_view(
        &p.registry,
        &mut world,
        &[
            BlockChange::new(ORIGIN, p.air, p.weak_light),
            BlockChange::new(light_pos, p.air, p.weak_light),
        ],
    );

    world.set_block(light_pos, p.air);
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(light_pos, p.weak_light, p.air)]);

    assert_shells(&world, ORIGIN, 0..3, |r| 2u8.saturating_sub(r as u8));
}

#[test]
fn add_light_in_light() {
    let p = palette();
    let medium_pos = BlockPos::new(2, 0, 0);
    let mut world = StubWorld::testing(p.air);
    world.set_block(medium_pos, p.medium_light);
    let mut prop = propagator();
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(medium_pos, p.air, p.medium_light)]);

    world.set_block(ORIGIN, p.full_light);
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(ORIGIN, p.air, p.full_light)]);

    assert_shells(&world, ORIGIN, 0..16, |r| 15u8.saturating_sub(r as u8));
}

#[test]
fn add_adjacent_lights() {
    let p = palette();
    let second = BlockPos::new(1, 0, 0);
    let mut world = StubWorld::testing(p.air);
    world.set_block(second, p.medium_light);
    world.set_block(ORIGIN, p.medium_light);
    let mut prop = propagator();
    prop.process_view(
        &p.registry,
        &mut world,
        &[
            BlockChange::new(second, p.air, p.medium_light),
            BlockChange::new(ORIGIN, p.air, p.medium_light),
        ],
    );

    for r in 0..16 {
        for pos in diamond_shell(ORIGIN, r) {
            let dist = ORIGIN.grid_distance(pos).min(second.grid_distance(pos));
            let expect = 5u32.saturating_sub(dist) as u8;
            assert_eq!(world.value(pos), expect, "at {pos:?}");
        }
    }
}

#[test]
fn weak_light_next_to_strong_light_keeps_the_stronger_value() {
    let p = palette();
    let mut world = StubWorld::testing(p.air);
    world.set_block(ORIGIN, p.full_light);
    let mut prop = propagator();
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(ORIGIN, p.air, p.full_light)]);

    let weak_pos = BlockPos::new(1, 0, 0);
    world.set_block(weak_pos, p.weak_light);
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(weak_pos, p.air, p.weak_light)]);
    assert_eq!(world.value(weak_pos), 14);
}

#[test]
fn remove_adjacent_lights() {
    let p = palette();
    let second = BlockPos::new(1, 0, 0);
    let mut world = StubWorld::testing(p.air);
    world.set_block(second, p.medium_light);
    world.set_block(ORIGIN, p.medium_light);
    let mut prop = propagator();
    prop.process_view(
        &p.registry,
        &mut world,
        &[
            BlockChange::new(second, p.air, p.medium_light),
            BlockChange::new(ORIGIN, p.air, p.medium_light),
        ],
    );

    world.set_block(second, p.air);
    world.set_block(ORIGIN, p.air);
    prop.process_view(
        &p.registry,
        &mut world,
        &[
            BlockChange::new(second, p.medium_light, p.air),
            BlockChange::new(ORIGIN, p.medium_light, p.air),
        ],
    );

    assert_shells(&world, ORIGIN, 0..16, |_| 0);
}

#[test]
fn added_solid_blocks_light() {
    let p = palette();
    let mut world = StubWorld::single_chunk(p.air);
    world.set_block(ORIGIN, p.medium_light);
    let mut prop = propagator();
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(ORIGIN, p.air, p.medium_light)]);

    let wall = BlockPos::new(1, 0, 0);
    world.set_block(wall, p.solid);
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(wall, p.air, p.solid)]);

    assert_eq!(world.value(wall), 0);
    // Reached around the wall: four hops instead of two.
    assert_eq!(world.value(BlockPos::new(2, 0, 0)), 1);
}

#[test]
fn opaque_emitter_lights_its_surroundings() {
    let p = palette();
    let mut world = StubWorld::testing(p.air);
    world.set_block(ORIGIN, p.solid_medium_light);
    let mut prop = propagator();
    prop.process_view(
        &p.registry,
        &mut world,
        &[BlockChange::new(ORIGIN, p.air, p.solid_medium_light)],
    );

    assert_eq!(world.value(ORIGIN), 5);
    assert_shells(&world, ORIGIN, 1..7, |r| 5u8.saturating_sub(r as u8));
}

#[test]
fn opaque_emitter_is_not_brightened_by_a_stronger_light() {
    let p = palette();
    let mut world = StubWorld::testing(p.air);
    let torch = BlockPos::new(2, 0, 0);
    world.set_block(ORIGIN, p.solid_medium_light);
    world.set_block(torch, p.full_light);
    let mut prop = propagator();
    prop.process_view(
        &p.registry,
        &mut world,
        &[
            BlockChange::new(ORIGIN, p.air, p.solid_medium_light),
            BlockChange::new(torch, p.air, p.full_light),
        ],
    );

    assert_eq!(world.value(ORIGIN), 5);
    // Around the emitter, not through it.
    assert_eq!(world.value(BlockPos::new(-1, 0, 0)), 10);
}

#[test]
fn replacing_opaque_emitter_with_stone_clears_its_light() {
    let p = palette();
    let mut world = StubWorld::testing(p.air);
    world.set_block(ORIGIN, p.solid_medium_light);
    let mut prop = propagator();
    prop.process_view(
        &p.registry,
        &mut world,
        &[BlockChange::new(ORIGIN, p.air, p.solid_medium_light)],
    );

    world.set_block(ORIGIN, p.solid);
    prop.process_view(
        &p.registry,
        &mut world,
        &[BlockChange::new(ORIGIN, p.solid_medium_light, p.solid)],
    );

    assert_shells(&world, ORIGIN, 0..7, |_| 0);
}

#[test]
fn opaque_emitter_becoming_translucent_lets_light_through() {
    let p = palette();
    let mut world = StubWorld::testing(p.air);
    let torch = BlockPos::new(-1, 0, 0);
    world.set_block(ORIGIN, p.solid_medium_light);
    world.set_block(torch, p.full_light);
    let mut prop = propagator();
    prop.process_view(
        &p.registry,
        &mut world,
        &[
            BlockChange::new(ORIGIN, p.air, p.solid_medium_light),
            BlockChange::new(torch, p.air, p.full_light),
        ],
    );
    // The emitter blocks the straight path.
    assert_eq!(world.value(BlockPos::new(1, 0, 0)), 11);

    world.set_block(ORIGIN, p.medium_light);
    prop.process_view(
        &p.registry,
        &mut world,
        &[BlockChange::new(ORIGIN, p.solid_medium_light, p.medium_light)],
    );

    assert_eq!(world.value(ORIGIN), 14);
    assert_eq!(world.value(BlockPos::new(1, 0, 0)), 13);
}

fn walled_world() -> (common::Palette, StubWorld) {
    let p = palette();
    let mut world = StubWorld::testing(p.air);
    for pos in BlockRegion::from_point(BlockPos::new(1, 0, 0)).expand(0, 30, 30).iter() {
        world.set_block(pos, p.solid);
    }
    world.set_block(ORIGIN, p.full_light);
    (p, world)
}

#[test]
fn removing_solid_lets_light_through() {
    let (p, mut world) = walled_world();
    let mut prop = propagator();
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(ORIGIN, p.air, p.full_light)]);
    assert_eq!(world.value(BlockPos::new(1, 0, 0)), 0);
    assert_eq!(world.value(BlockPos::new(2, 0, 0)), 0);

    let hole = BlockPos::new(1, 0, 0);
    world.set_block(hole, p.air);
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(hole, p.solid, p.air)]);

    assert_eq!(world.value(hole), 14);
    assert_eq!(world.value(BlockPos::new(2, 0, 0)), 13);
}

#[test]
fn removing_solid_and_light_together_leaves_darkness() {
    let (p, mut world) = walled_world();
    let mut prop = propagator();
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(ORIGIN, p.air, p.full_light)]);

    let hole = BlockPos::new(1, 0, 0);
    world.set_block(hole, p.air);
    world.set_block(ORIGIN, p.air);
    prop.process_view(
        &p.registry,
        &mut world,
        &[
            BlockChange::new(hole, p.solid, p.air),
            BlockChange::new(ORIGIN, p.full_light, p.air),
        ],
    );

    assert_shells(&world, ORIGIN, 0..16, |_| 0);
}

#[test]
fn reverted_change_is_tolerated() {
    let p = palette();
    let mut world = StubWorld::testing(p.air);
    world.set_block(ORIGIN, p.full_light);
    let mut prop = propagator();
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(ORIGIN, p.air, p.full_light)]);

    prop.process_view(
        &p.registry,
        &mut world,
        &[BlockChange::new(ORIGIN, p.full_light, p.full_light)],
    );
    assert_shells(&world, ORIGIN, 0..16, |r| 15u8.saturating_sub(r as u8));
}

#[test]
fn unavailable_region_is_an_absorbing_boundary() {
    let p = palette();
    // Light in the corner of a lone chunk: nothing leaks past x = 0.
    let mut world = StubWorld::single_chunk(p.air);
    world.set_block(ORIGIN, p.full_light);
    let mut prop = propagator();
    prop.process_view(&p.registry, &mut world, &[BlockChange::new(ORIGIN, p.air, p.full_light)]);

    use lantern_lighting::PropagatorWorldView;
    assert_eq!(world.value_at(BlockPos::new(-1, 0, 0)), None);
    assert_eq!(world.value(BlockPos::new(3, 0, 0)), 12);
}

#[test]
fn queued_spread_fills_from_an_existing_value() {
    use lantern_lighting::PropagatorWorldView;

    let p = palette();
    let mut world = StubWorld::testing(p.air);
    world.set_value_at(ORIGIN, 6);
    let mut prop = propagator();
    prop.propagate_from(ORIGIN, 6);
    assert!(!prop.is_idle());
    prop.flush(&p.registry, &mut world);

    assert_shells(&world, ORIGIN, 0..8, |r| 6u8.saturating_sub(r as u8));
    assert!(prop.is_idle());
}
