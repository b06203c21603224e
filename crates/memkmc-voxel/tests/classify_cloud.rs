use std::fs;

use memkmc_core::{write_file, SpatialBox};
use memkmc_test_utils::{random_cloud, MEMBRANE_TYPE_MAP, MEMBRANE_TYPE_PAIRS};
use memkmc_voxel::{
    count_grid_voxels, count_particles, write_grid, ClassId, GridFile, TypeClassMap,
    VoxelClassifier, VoxelError,
};
use proptest::prelude::*;

fn membrane_map() -> TypeClassMap {
    TypeClassMap::from_reader(MEMBRANE_TYPE_MAP.as_bytes()).unwrap()
}

#[test]
fn mapping_file_matches_pairs() {
    assert_eq!(membrane_map(), TypeClassMap::from_pairs(MEMBRANE_TYPE_PAIRS));
}

#[test]
fn every_voxel_is_labeled_and_no_particle_is_lost() {
    let cell = SpatialBox::new([0.0; 3], [20.0, 16.0, 12.0]).unwrap();
    let particles = random_cloud(11, 5_000, &cell, &[1, 2, 3, 5, 6, 42]);
    let vox = VoxelClassifier::new(4.0)
        .unwrap()
        .classify(&cell, &particles, &membrane_map())
        .unwrap();

    assert_eq!(vox.grid.dims().as_array(), [5, 4, 3]);
    assert_eq!(
        vox.counted + vox.dropped_outside + vox.dropped_unmapped,
        particles.len()
    );
    assert_eq!(vox.dropped_outside, 0);

    // With water and polymer known, nothing is void.
    assert_eq!(vox.grid.count(ClassId::VOID), 0);

    let grid_counts = count_grid_voxels(&vox.grid, &vox.registry);
    assert_eq!(grid_counts.total, 60);
    let particle_counts = count_particles(&particles, &membrane_map());
    assert_eq!(particle_counts.total, 5_000);
    assert!(particle_counts.get("unknown") > 0);
}

#[test]
fn grid_file_round_trip_preserves_site_order() {
    let cell = SpatialBox::new([-3.0, -3.0, -3.0], [12.0, 12.0, 12.0]).unwrap();
    let particles = random_cloud(3, 800, &cell, &[1, 3, 5]);
    let vox = VoxelClassifier::new(4.0)
        .unwrap()
        .classify(&cell, &particles, &membrane_map())
        .unwrap();

    let mut buf = Vec::new();
    write_grid(&mut buf, &vox.grid).unwrap();
    let file = GridFile::read(buf.as_slice()).unwrap();

    let dims = vox.grid.dims();
    for (site_id, row) in file.sites() {
        assert_eq!(dims.coords_of_site(site_id), Some(row.coords));
    }
    assert_eq!(file.to_label_grid().unwrap(), vox.grid);
}

#[test]
fn files_on_disk_load_like_in_memory_text() {
    let tmp = tempfile::tempdir().unwrap();
    let map_path = tmp.path().join("types.txt");
    fs::write(&map_path, MEMBRANE_TYPE_MAP).unwrap();
    let map = TypeClassMap::load(&map_path).unwrap();
    assert_eq!(map, membrane_map());

    let cell = SpatialBox::new([0.0; 3], [9.0, 6.0, 6.0]).unwrap();
    let particles = random_cloud(7, 300, &cell, &[1, 3, 5]);
    let vox = VoxelClassifier::new(3.0)
        .unwrap()
        .classify(&cell, &particles, &map)
        .unwrap();
    let grid_path = tmp.path().join("grid.xyz");
    write_file(&grid_path, |w| write_grid(w, &vox.grid)).unwrap();

    let file = GridFile::load(&grid_path).unwrap();
    assert_eq!(file.len(), 12);
    assert!(file.is_canonical());
    assert_eq!(file.to_label_grid().unwrap(), vox.grid);
}

#[test]
fn missing_files_are_io_errors() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(matches!(
        TypeClassMap::load(tmp.path().join("absent.txt")),
        Err(VoxelError::Io(_))
    ));
    assert!(matches!(
        GridFile::load(tmp.path().join("absent.xyz")),
        Err(VoxelError::Io(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn dims_follow_floor_rule(lx in 0.5f64..40.0, ly in 0.5f64..40.0, lz in 0.5f64..40.0, spacing in 0.5f64..8.0) {
        let cell = SpatialBox::new([0.0; 3], [lx, ly, lz]).unwrap();
        let vox = VoxelClassifier::new(spacing)
            .unwrap()
            .classify(&cell, &[], &membrane_map())
            .unwrap();
        let dims = vox.grid.dims().as_array();
        for (axis, len) in [lx, ly, lz].into_iter().enumerate() {
            let expected = ((len / spacing).floor() as u32).max(1);
            prop_assert_eq!(dims[axis], expected);
        }
    }
}
