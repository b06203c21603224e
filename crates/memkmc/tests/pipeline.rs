//! Structure file to run directories, through the facade.

use std::fs;

use memkmc::prelude::*;
use memkmc::zacros::{seed_dir, LATTICE_FILE, STATE_FILE};
use memkmc_test_utils::{DATA_FULL, MEMBRANE_LABEL_SPECIES, MEMBRANE_TYPE_MAP};

#[test]
fn data_file_to_seed_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("membrane.data");
    fs::write(&data, DATA_FULL).unwrap();
    let mapping = tmp.path().join("label_species.txt");
    fs::write(&mapping, MEMBRANE_LABEL_SPECIES).unwrap();

    let structure = load_structure(&data, StructureFormat::Data, FrameSelect::Last).unwrap();
    assert_eq!(structure.len(), 8);
    let types = TypeClassMap::from_reader(MEMBRANE_TYPE_MAP.as_bytes()).unwrap();

    // 8 / 2.5 floors to 3 voxels per axis.
    let vox = VoxelClassifier::new(2.5)
        .unwrap()
        .classify(&structure.cell, &structure.particles, &types)
        .unwrap();
    assert_eq!(vox.grid.dims().as_array(), [3, 3, 3]);
    assert_eq!(vox.counted, 8);

    let grid_path = tmp.path().join("grid.xyz");
    write_file(&grid_path, |w| write_grid(w, &vox.grid)).unwrap();

    let out = tmp.path().join("runs");
    let report = PrepareRun::builder()
        .grid(&grid_path)
        .mapping(&mapping)
        .seeds([42])
        .outdir(&out)
        .build()
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(report.written, [42]);

    let dir = seed_dir(&out, 42);
    let lattice = fs::read_to_string(dir.join(LATTICE_FILE)).unwrap();
    assert!(lattice.contains("n_sites            27\n"));

    // Every non-void voxel is seeded, at the lattice site sharing its coordinates.
    let state = fs::read_to_string(dir.join(STATE_FILE)).unwrap();
    let seeded = state.lines().filter(|l| l.starts_with("seed_on_sites")).count();
    assert_eq!(seeded, 27 - vox.grid.count(ClassId::VOID));

    let topo = CubicLattice::new(3, 3, 3).unwrap().build().unwrap();
    let file = GridFile::load(&grid_path).unwrap();
    for (site_id, row) in file.sites() {
        let site = topo.site(site_id).unwrap();
        let expected = row.coords.map(|c| c as f64 / 3.0);
        assert_eq!(site.frac, expected);
    }
}
