//! End-to-end folding scenarios through the public API.

use evofold::core::decoys::DecoySet;
use evofold::core::energy::table::EnergyTable;
use evofold::core::models::conformation::Contact;
use evofold::core::models::ids::StructureId;
use evofold::core::models::sequence::Sequence;
use evofold::engine::config::{ConfigError, FoldMode, FolderConfig, FolderSettings};
use evofold::engine::error::{CapacityError, FoldError};
use evofold::workflows::fold::{Fold, LatticeFolder, build_folder, fold_batch};
use evofold::workflows::neutrality::neutrality;
use std::f64::consts::E;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const TOLERANCE: f64 = 1e-12;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn hp_table() -> EnergyTable {
    EnergyTable::from_matrix(&[vec![-1.0, 0.0], vec![0.0, 0.0]]).unwrap()
}

fn folder(temperature: f64, max_length: usize) -> LatticeFolder {
    let config = FolderConfig::builder()
        .dimensionality(2)
        .max_length(max_length)
        .energy_table(hp_table())
        .temperature(temperature)
        .build()
        .unwrap();
    LatticeFolder::new(config).unwrap()
}

fn hpphph() -> Sequence {
    Sequence::from_codes(&[0, 1, 1, 0, 1, 0])
}

#[test]
fn four_monomer_chain_has_a_single_certain_conformation() {
    init_tracing();
    let folder = folder(0.6, 25);
    let result = folder.fold(&Sequence::from_codes(&[0, 0, 0, 0])).unwrap();

    assert_eq!(result.num_conformations(), 1);
    assert_eq!(result.structure, StructureId(0));
    assert_eq!(result.energy, -1.0);
    assert_eq!(result.stability, 1.0);
    assert_eq!(result.delta_g, f64::NEG_INFINITY);
}

#[test]
fn six_monomer_chain_matches_hand_computed_values() {
    init_tracing();
    let folder = folder(1.0, 25);
    let result = folder.fold(&hpphph()).unwrap();

    assert_eq!(result.num_conformations(), 4);
    assert_eq!(result.structure, StructureId(0));
    assert_eq!(result.energy, -2.0);
    assert!((result.stability - 1.0 / (1.0 + 3.0 / E)).abs() < TOLERANCE);
    assert!((result.delta_g - (3.0f64.ln() - 1.0)).abs() < TOLERANCE);

    let rendered = result
        .native_conformation()
        .render(result.conformations().shape().unwrap())
        .unwrap();
    assert_eq!(rendered.lines().count(), 3);
    assert_eq!(rendered.matches('S').count(), 1);
    assert_eq!(rendered.matches('E').count(), 1);
}

#[test]
fn all_neutral_sequence_spreads_evenly() {
    let result = folder(1.0, 25).fold(&Sequence::from_codes(&[1; 6])).unwrap();
    assert_eq!(result.structure, StructureId(0));
    assert!((result.stability - 0.25).abs() < TOLERANCE);
}

#[test]
fn lengths_above_the_ceiling_are_rejected() {
    let folder = folder(1.0, 12);
    assert_eq!(
        folder.fold(&Sequence::from_codes(&[0; 16])).unwrap_err(),
        FoldError::Capacity(CapacityError::ExceedsCeiling {
            length: 16,
            max_length: 12
        })
    );
    assert!(folder.library().cached_lengths().is_empty());
}

#[test]
fn folding_is_deterministic_across_folders() {
    let sequence = Sequence::from_codes(&[0, 1, 0, 0, 1, 1, 0, 1, 0, 0, 1, 0, 1, 1, 0, 0]);
    let first = folder(0.6, 16).fold(&sequence).unwrap();
    let second = folder(0.6, 16).fold(&sequence).unwrap();

    assert_eq!(first.structure, second.structure);
    assert_eq!(first.energy, second.energy);
    assert_eq!(first.stability, second.stability);
    assert_eq!(first.delta_g, second.delta_g);
    assert_eq!(first.conformations().conformations(), second.conformations().conformations());
}

#[test]
fn temperature_limits_approach_certainty_and_uniformity() {
    let sequence = hpphph();
    let cold = folder(0.01, 25).fold(&sequence).unwrap();
    let hot = folder(1e6, 25).fold(&sequence).unwrap();

    assert!(cold.stability > 1.0 - 1e-12);
    assert!((hot.stability - 0.25).abs() < 1e-5);
    assert_eq!(cold.structure, hot.structure);
}

#[test]
fn decoys_without_the_global_minimum_report_lower_stability() {
    let exact = folder(1.0, 25).fold(&hpphph()).unwrap();

    // The three rectangle walks other than the native, all at energy -1.
    let decoys = DecoySet::new(
        6,
        vec![
            vec![Contact::new(0, 3), Contact::new(2, 5)],
            vec![Contact::new(0, 5), Contact::new(1, 4)],
            vec![Contact::new(0, 5), Contact::new(2, 5)],
        ],
    )
    .unwrap();
    let folder = folder(1.0, 25);
    let approximate = folder.fold_with_decoys(&hpphph(), &decoys).unwrap();

    assert_eq!(approximate.mode, FoldMode::Decoy);
    assert_eq!(approximate.energy, -1.0);
    assert!(approximate.energy > exact.energy);
    assert!((approximate.stability - 1.0 / 3.0).abs() < TOLERANCE);
    assert!(approximate.stability <= exact.stability);
}

#[test]
fn fold_counter_tracks_successful_folds() {
    let folder = folder(1.0, 9);
    let sequences = vec![hpphph(), Sequence::from_codes(&[0; 4]), Sequence::from_codes(&[0; 25])];
    let results = fold_batch(&folder, &sequences);

    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(results[2].is_err());
    assert_eq!(folder.num_folded(), 2);
}

#[test]
fn configuration_and_inputs_load_from_files() {
    init_tracing();
    let dir = TempDir::new().unwrap();

    let settings_path = dir.path().join("folder.toml");
    fs::write(&settings_path, "max_length = 16\ntemperature = 1.0\nmode = \"decoy\"\n").unwrap();

    let table_path = dir.path().join("energies.csv");
    fs::write(&table_path, "first,second,energy\n0,0,-1\n0,1,0\n1,1,0\n").unwrap();

    let maps = dir.path().join("maps");
    fs::create_dir(&maps).unwrap();
    fs::write(maps.join("a.cmap"), "0 H 3 H\n0 H 5 H\n").unwrap();
    fs::write(maps.join("b.cmap"), "0 H 5 H\n1 P 4 P\n").unwrap();
    let list_path = dir.path().join("maps.txt");
    fs::write(&list_path, "a.cmap\nb.cmap\n").unwrap();

    let table = EnergyTable::load_csv(&table_path).unwrap();
    let decoys = DecoySet::load(&list_path, &maps, 6).unwrap();
    let config = FolderSettings::load(&settings_path)
        .unwrap()
        .into_builder()
        .energy_table(Arc::new(table))
        .build()
        .unwrap();

    let folder = build_folder(config, Some(decoys)).unwrap();
    assert_eq!(folder.mode(), FoldMode::Decoy);

    let result = folder.fold(&hpphph()).unwrap();
    assert_eq!(result.structure, StructureId(0));
    assert_eq!(result.energy, -2.0);
    assert!((result.stability - 1.0 / (1.0 + 1.0 / E)).abs() < TOLERANCE);
}

#[test]
fn neutrality_of_a_degenerate_square() {
    // Every 2x2 mutant keeps the only conformation.
    let folder = folder(1.0, 25);
    let fraction = neutrality(&folder, &Sequence::from_codes(&[0, 1, 1, 0]), 0.0).unwrap();
    assert_eq!(fraction, 1.0);
}

#[test]
fn cubic_eight_monomer_chain_matches_hand_computed_values() {
    init_tracing();
    let config = FolderConfig::builder()
        .dimensionality(3)
        .max_length(12)
        .energy_table(hp_table())
        .temperature(1.0)
        .build()
        .unwrap();
    let folder = LatticeFolder::new(config).unwrap();
    let result = folder.fold(&Sequence::from_codes(&[0, 1, 1, 0, 0, 1, 1, 0])).unwrap();

    // Energies over the three 2x2x2 structures: -2, -3, -1.
    let competing = (-1.0f64).exp() + (-2.0f64).exp();
    assert_eq!(result.num_conformations(), 3);
    assert_eq!(result.structure, StructureId(1));
    assert_eq!(result.energy, -3.0);
    assert!((result.stability - 1.0 / (1.0 + competing)).abs() < TOLERANCE);
    assert!((result.delta_g - competing.ln()).abs() < TOLERANCE);
    assert_eq!(
        result.native_conformation().contacts(),
        &[
            Contact::new(0, 3),
            Contact::new(0, 7),
            Contact::new(1, 6),
            Contact::new(2, 5),
            Contact::new(4, 7),
        ]
    );

    let shape = result.conformations().shape().unwrap();
    assert_eq!(shape.sides(), &[2usize, 2, 2]);
    assert!(result.native_conformation().render(shape).is_none());
}

#[test]
fn temperatures_edited_after_build_never_reach_a_fold() {
    let mut config = FolderConfig::builder()
        .dimensionality(2)
        .max_length(9)
        .energy_table(hp_table())
        .temperature(1.0)
        .build()
        .unwrap();

    for temperature in [0.0, -1.0] {
        config.temperature = temperature;
        assert!(matches!(
            LatticeFolder::new(config.clone()),
            Err(ConfigError::NonPositiveTemperature(_))
        ));
    }
}
