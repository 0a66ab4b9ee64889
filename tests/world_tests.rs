use std::collections::HashSet;

use cgmath::{Point3, Vector3};
use web_time::Duration;

use voxel_world::config::WorldConfig;
use voxel_world::engine_state::interaction::{dig, place, raycast};
use voxel_world::engine_state::voxels::generation::{
    NoiseBasis, OctaveNoise, SurfaceWorldGenerator, WorldGenerator,
};
use voxel_world::engine_state::voxels::loader::{ChunkLoader, SphericalChunkLoader};
use voxel_world::engine_state::world_generation::GenerationStage;
use voxel_world::{
    BlockKind, BlockPosition, BlockSide, Chunk, ChunkCoordinate, EngineState, World,
    WorldDimensions, WorldError,
};

/// Stone below `floor`, air above.
struct Layered {
    floor: i32,
}

impl WorldGenerator for Layered {
    fn setup(&mut self, _rng: &mut fastrand::Rng) {}

    fn block_kind(&self, pos: BlockPosition) -> BlockKind {
        if pos.y < self.floor {
            BlockKind::STONE
        } else {
            BlockKind::AIR
        }
    }
}

fn dims() -> WorldDimensions {
    WorldDimensions::new(Vector3::new(4, 4, 4), Vector3::new(3, 2, 3))
}

fn world_with_floor(floor: i32) -> World {
    World::new(
        dims(),
        vec![Box::new(Layered { floor }), Box::new(Layered { floor })],
    )
    .unwrap()
}

fn all_chunks() -> Vec<ChunkCoordinate> {
    let mut coords = Vec::new();
    for x in 0..3 {
        for y in 0..2 {
            for z in 0..3 {
                coords.push(ChunkCoordinate::new(x, y, z));
            }
        }
    }
    coords
}

fn dirty_chunks(world: &World) -> HashSet<ChunkCoordinate> {
    world
        .chunks()
        .filter(|chunk| chunk.is_dirty())
        .map(|chunk| chunk.coordinate())
        .collect()
}

/// Every chunk exists and is clean, but none is loaded, so edits leave dirty flags in place.
fn settled_world() -> World {
    let mut world = world_with_floor(0);
    world.load_chunks(&all_chunks()).unwrap();
    world.build_chunks(true).unwrap();
    world.update_loaded_chunks(&[]).unwrap();
    assert!(dirty_chunks(&world).is_empty());
    world
}

#[test]
fn local_and_world_positions_round_trip() {
    let chunk = Chunk::new(ChunkCoordinate::new(2, 1, 1), dims(), true);
    for pos in [
        BlockPosition::new(0, 0, 0),
        BlockPosition::new(3, 2, 1),
        BlockPosition::new(-5, 9, 17),
    ] {
        assert_eq!(chunk.to_local_position(chunk.to_world_position(pos)), pos);
        assert_eq!(chunk.to_world_position(chunk.to_local_position(pos)), pos);
    }
    assert_eq!(
        chunk.to_world_position(BlockPosition::new(1, 2, 3)),
        BlockPosition::new(9, 6, 7)
    );
}

#[test]
fn chunk_location_is_floor_division() {
    let world = world_with_floor(0);
    for x in 0..12 {
        for y in 0..8 {
            for z in 0..12 {
                let pos = BlockPosition::new(x, y, z);
                assert_eq!(
                    world.get_chunk_location(pos),
                    Ok(ChunkCoordinate::new(x.div_euclid(4), y.div_euclid(4), z.div_euclid(4)))
                );
            }
        }
    }

    let outside = BlockPosition::new(-1, 0, 0);
    assert_eq!(
        world.get_chunk_location(outside),
        Err(WorldError::InvalidBlockPosition(outside))
    );
}

#[test]
fn set_block_then_get_block_returns_the_kind() {
    let mut world = world_with_floor(2);
    let pos = BlockPosition::new(5, 3, 6);
    for kind in BlockKind::all() {
        world.set_block(pos, kind).unwrap();
        assert_eq!(world.get_block(pos).unwrap().kind(), kind);
    }
}

#[test]
fn out_of_bounds_access_is_rejected() {
    let mut world = world_with_floor(2);
    let pos = BlockPosition::new(0, 8, 0);
    assert_eq!(
        world.set_block(pos, BlockKind::DIRT),
        Err(WorldError::InvalidBlockPosition(pos))
    );
    assert!(matches!(
        world.get_block(pos),
        Err(WorldError::InvalidBlockPosition(_))
    ));

    let coord = ChunkCoordinate::new(3, 0, 0);
    assert!(matches!(
        world.get_chunk(coord),
        Err(WorldError::InvalidChunkCoordinate(c)) if c == coord
    ));
    assert_eq!(world.chunk_count(), 0);
}

#[test]
fn boundary_edit_dirties_only_the_neighbour_across_it() {
    let mut world = settled_world();

    // Local (0, 1, 1) in chunk (1, 0, 1).
    world
        .set_block(BlockPosition::new(4, 1, 5), BlockKind::STONE)
        .unwrap();

    let expected: HashSet<ChunkCoordinate> = [
        ChunkCoordinate::new(1, 0, 1),
        ChunkCoordinate::new(0, 0, 1),
    ]
    .into_iter()
    .collect();
    assert_eq!(dirty_chunks(&world), expected);
}

#[test]
fn corner_edit_dirties_one_neighbour_per_axis() {
    let mut world = settled_world();

    // Local (3, 3, 3) in chunk (1, 0, 1).
    world
        .set_block(BlockPosition::new(7, 3, 7), BlockKind::STONE)
        .unwrap();

    let expected: HashSet<ChunkCoordinate> = [
        ChunkCoordinate::new(1, 0, 1),
        ChunkCoordinate::new(2, 0, 1),
        ChunkCoordinate::new(1, 1, 1),
        ChunkCoordinate::new(1, 0, 2),
    ]
    .into_iter()
    .collect();
    assert_eq!(dirty_chunks(&world), expected);
}

#[test]
fn edits_on_the_world_boundary_dirty_no_neighbour() {
    let mut world = settled_world();

    world
        .set_block(BlockPosition::new(0, 1, 1), BlockKind::STONE)
        .unwrap();

    let expected: HashSet<ChunkCoordinate> =
        [ChunkCoordinate::new(0, 0, 0)].into_iter().collect();
    assert_eq!(dirty_chunks(&world), expected);
}

#[test]
fn isolated_block_produces_six_faces() {
    let mut world = world_with_floor(0);
    let coord = ChunkCoordinate::new(1, 1, 1);
    world.load_chunks(&[coord]).unwrap();

    world
        .set_block(BlockPosition::new(5, 5, 5), BlockKind::DIRT)
        .unwrap();

    let chunk = world.chunk(coord).unwrap();
    assert!(!chunk.is_dirty());
    let mesh = chunk.mesh();
    assert_eq!(mesh.face_count(), 6);
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.indices.len(), 36);
    assert_eq!(mesh.tangents.len(), 24);
    assert_eq!(chunk.collision_mesh(), mesh);
}

#[test]
fn unoptimised_chunks_emit_every_face() {
    let mut world = world_with_floor(0).with_optimise_mesh(false);
    let coord = ChunkCoordinate::new(1, 0, 1);
    world.load_chunks(&[coord]).unwrap();

    let blocks = [
        BlockPosition::new(5, 1, 5),
        BlockPosition::new(6, 1, 5),
        BlockPosition::new(6, 2, 5),
        BlockPosition::new(6, 2, 6),
    ];
    for pos in blocks {
        world.set_block(pos, BlockKind::STONE).unwrap();
    }

    assert_eq!(
        world.chunk(coord).unwrap().mesh().face_count(),
        6 * blocks.len()
    );
}

#[test]
fn faces_are_culled_across_chunk_boundaries() {
    let mut world = world_with_floor(0);
    let left = ChunkCoordinate::new(0, 0, 0);
    let right = ChunkCoordinate::new(1, 0, 0);
    world.load_chunks(&[left, right]).unwrap();
    world.build_chunks(true).unwrap();

    world
        .set_block(BlockPosition::new(3, 1, 1), BlockKind::STONE)
        .unwrap();
    world
        .set_block(BlockPosition::new(4, 1, 1), BlockKind::STONE)
        .unwrap();

    assert_eq!(world.chunk(left).unwrap().mesh().face_count(), 5);
    assert_eq!(world.chunk(right).unwrap().mesh().face_count(), 5);

    world
        .set_block(BlockPosition::new(4, 1, 1), BlockKind::AIR)
        .unwrap();
    assert_eq!(world.chunk(left).unwrap().mesh().face_count(), 6);
    assert!(world.chunk(right).unwrap().mesh().is_empty());
}

#[test]
fn meshing_before_generation_fails() {
    let world = world_with_floor(1);
    let coord = ChunkCoordinate::new(0, 0, 0);
    let chunk = Chunk::new(coord, dims(), true);
    assert_eq!(
        chunk.build_mesh(&world, world.models()),
        Err(WorldError::ChunkNotGenerated(coord))
    );
}

#[test]
fn ground_level_reports_missing_ground() {
    let mut world = world_with_floor(2);
    assert_eq!(world.get_ground_level(3, 7), Ok(Some(1)));

    let mut empty = world_with_floor(0);
    assert_eq!(empty.get_ground_level(3, 7), Ok(None));
}

#[test]
fn octave_noise_is_deterministic_and_bounded() {
    for basis in [NoiseBasis::Value, NoiseBasis::Perlin] {
        let noise = OctaveNoise::new(basis);
        for i in 0..50 {
            let (x, y, z) = (i as f64 * 0.37, 1.0, i as f64 * -1.3);
            for (octaves, persistence) in [(1, 1.0), (4, 2.0), (6, 0.5)] {
                let a = noise.octave_noise(x, y, z, octaves, persistence);
                let b = noise.octave_noise(x, y, z, octaves, persistence);
                assert_eq!(a.to_bits(), b.to_bits());
                assert!((0.0..=1.0).contains(&a), "{} out of range", a);
            }
        }
    }
}

#[test]
fn spherical_loader_matches_the_filled_sphere() {
    let dims = WorldDimensions::new(Vector3::new(4, 4, 4), Vector3::new(5, 5, 5));
    let loader = SphericalChunkLoader::new(2);
    let observer = Point3::new(4.5, 9.0, 17.2);
    let centre = ChunkCoordinate::new(1, 2, 4);

    let loaded: HashSet<ChunkCoordinate> =
        loader.loaded_chunks(observer, &dims).into_iter().collect();

    let mut expected = HashSet::new();
    for x in 0..5 {
        for y in 0..5 {
            for z in 0..5 {
                let coord = ChunkCoordinate::new(x, y, z);
                if coord.distance_squared(&centre) <= 4 {
                    expected.insert(coord);
                }
            }
        }
    }
    assert_eq!(loaded, expected);

    assert!(loader
        .loaded_chunks(Point3::new(-0.5, 1.0, 1.0), &dims)
        .is_empty());
    assert!(loader
        .loaded_chunks(Point3::new(1.0, 20.0, 1.0), &dims)
        .is_empty());
}

#[test]
fn surface_layers_follow_the_computed_height() {
    assert_eq!(
        SurfaceWorldGenerator::classify(48, 5.0, 52),
        BlockKind::GRASS
    );
    assert_eq!(SurfaceWorldGenerator::classify(48, 5.0, 50), BlockKind::DIRT);
    assert_eq!(SurfaceWorldGenerator::classify(48, 5.0, 54), BlockKind::AIR);
}

#[test]
fn seeded_worlds_generate_identical_terrain() {
    let config = WorldConfig::from_json_str(
        r#"{
            "chunks": [2, 2, 2],
            "chunk_size": [8, 8, 8],
            "seed": 1234,
            "generators": [
                { "kind": "cave", "octaves": 3, "persistence": 2.0 },
                { "kind": "surface", "surface_level": 8, "height_scale": 6.0, "octaves": 2 }
            ]
        }"#,
    )
    .unwrap();

    let mut first = World::from_config(&config).unwrap();
    let mut second = World::from_config(&config).unwrap();
    first.setup_generators();
    second.setup_generators();

    for x in 0..16 {
        for y in 0..16 {
            for z in (0..16).step_by(3) {
                let pos = BlockPosition::new(x, y, z);
                assert_eq!(
                    first.get_block(pos).unwrap().kind(),
                    second.get_block(pos).unwrap().kind()
                );
            }
        }
    }

    // The cave layer always has a bedrock floor.
    assert_eq!(
        first.get_block(BlockPosition::new(3, 0, 9)).unwrap().kind(),
        BlockKind::BEDROCK
    );
}

#[test]
fn generator_count_must_match_layers() {
    let config = WorldConfig::from_json_str(
        r#"{ "chunks": [2, 3, 2], "generators": [{ "kind": "cave" }] }"#,
    )
    .unwrap();
    assert!(matches!(
        World::from_config(&config),
        Err(WorldError::Configuration(_))
    ));
    assert!(EngineState::new(&config).is_err());
}

#[test]
fn periodic_update_evicts_chunks_outside_the_desired_set() {
    let mut world = world_with_floor(1).with_update_interval(Duration::from_secs(1));
    world.load_chunks(&all_chunks()).unwrap();
    world.build_chunks(true).unwrap();

    let keep = [ChunkCoordinate::new(0, 0, 0), ChunkCoordinate::new(1, 0, 0)];

    // Nothing happens until the loop runs and a full interval has passed.
    assert_eq!(world.update(Duration::from_secs(5), &keep), Ok(false));
    world.start_updating();
    assert_eq!(world.update(Duration::from_millis(400), &keep), Ok(false));
    assert_eq!(world.chunk_count(), all_chunks().len());

    assert_eq!(world.update(Duration::from_millis(600), &keep), Ok(true));
    assert_eq!(world.chunk_count(), keep.len());
    assert!(world.chunks().all(|chunk| chunk.is_loaded()));

    world.stop_updating();
    assert_eq!(world.update(Duration::from_secs(5), &[]), Ok(false));
    assert_eq!(world.chunk_count(), keep.len());
}

#[test]
fn raycast_dig_and_place() {
    let mut world = world_with_floor(2);
    world.load_chunks(&all_chunks()).unwrap();
    world.build_chunks(true).unwrap();

    let origin = Point3::new(5.5, 3.5, 5.5);
    let down = Vector3::new(0.0, -1.0, 0.0);

    let hit = raycast(&world, origin, down, 4.0).unwrap();
    assert_eq!(hit.position, BlockPosition::new(5, 1, 5));
    assert_eq!(hit.side, BlockSide::TOP);
    assert!((hit.distance - 1.5).abs() < 1e-5);
    assert!(raycast(&world, origin, down, 1.0).is_none());
    assert!(raycast(&world, origin, Vector3::new(0.0, 1.0, 0.0), 4.0).is_none());

    assert_eq!(place(&mut world, &hit, BlockKind::WOOD), Ok(true));
    assert_eq!(
        world.get_block(BlockPosition::new(5, 2, 5)).unwrap().kind(),
        BlockKind::WOOD
    );

    let hit = raycast(&world, origin, down, 4.0).unwrap();
    assert_eq!(hit.position, BlockPosition::new(5, 2, 5));
    dig(&mut world, &hit).unwrap();
    assert_eq!(
        world.get_block(BlockPosition::new(5, 2, 5)).unwrap().kind(),
        BlockKind::AIR
    );
}

#[test]
fn raycast_rejects_non_finite_input() {
    let mut world = world_with_floor(2);
    world.load_chunks(&all_chunks()).unwrap();

    let origin = Point3::new(2.5, 2.5, 2.5);
    let up = Vector3::new(0.0, 1.0, 0.0);
    assert!(raycast(&world, origin, up, f32::INFINITY).is_none());
    assert!(raycast(&world, origin, up, f32::NAN).is_none());
    assert!(raycast(&world, Point3::new(f32::NAN, 2.5, 2.5), up, 4.0).is_none());
    assert!(raycast(&world, origin, Vector3::new(0.0, f32::NEG_INFINITY, 0.0), 4.0).is_none());
}

#[test]
fn engine_generates_then_streams() {
    let config = WorldConfig::from_json_str(
        r#"{
            "chunks": [3, 2, 3],
            "chunk_size": [8, 8, 8],
            "seed": 7,
            "spawn_position": [0.3, 0.3],
            "generators": [
                { "kind": "cave" },
                { "kind": "surface", "surface_level": 10, "height_scale": 4.0 }
            ],
            "loader": { "kind": "spherical", "radius": 1 }
        }"#,
    )
    .unwrap();

    let mut engine = EngineState::new(&config).unwrap();
    assert_eq!(engine.stage(), GenerationStage::Pending);
    assert!(!engine.observer.is_active());

    let step = Duration::from_secs(1);
    assert_eq!(engine.tick(step), Ok(GenerationStage::ChunksGenerated));
    assert_eq!(engine.tick(step), Ok(GenerationStage::MeshesBuilt));
    assert_eq!(engine.tick(step), Ok(GenerationStage::Running));
    assert!(engine.is_generated());
    assert!(engine.observer.is_active());
    assert!(engine.world.is_running());

    // The observer stands above the ground of its spawn column.
    let feet = BlockPosition::from_scene_position(engine.observer.position);
    let below = feet - BlockPosition::new(0, 2, 0);
    assert!(engine.world.is_valid(below));
    assert!(!engine.world.get_block(below).unwrap().is_transparent());

    assert_eq!(engine.tick(step), Ok(GenerationStage::Running));
    let desired: HashSet<ChunkCoordinate> = engine
        .observer
        .desired_chunks(engine.world.dimensions())
        .into_iter()
        .collect();
    let loaded: HashSet<ChunkCoordinate> = engine
        .world
        .chunks()
        .filter(|chunk| chunk.is_loaded())
        .map(|chunk| chunk.coordinate())
        .collect();
    assert_eq!(loaded, desired);
    assert!(engine
        .world
        .chunks()
        .filter(|chunk| chunk.is_loaded())
        .all(|chunk| !chunk.is_dirty()));

    engine.stop();
    assert!(!engine.world.is_running());
}
