use cutkit_toollib::{init_standard_library, ParameterLibrary, ParameterStore};

#[test]
fn standard_library_resolves_every_seeded_record() {
    let library = init_standard_library();
    assert_eq!(library.material_count(), 3);
    assert_eq!(library.tool_count(), 3);

    let steel = library.material("P2").unwrap();
    assert_eq!(steel.cutting_force_coefficient, 2000.0);
    let drill = library.tool("DR10-2").unwrap();
    assert_eq!(drill.diameter, 10.0);
    assert!(library.machine("VMC-850").is_some());
    assert!(library.strategy("DRILL-STD").is_some());
    assert!(library.material("P999").is_none());
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");

    let seeded = init_standard_library();
    let library = ParameterLibrary::new(path.clone());
    for id in ["P2", "K1", "N1"] {
        library.add_material(seeded.material(id).unwrap());
    }
    library.add_tool(seeded.tool("FM25-2").unwrap());
    library.add_machine(seeded.machine("VMC-850").unwrap());
    library.add_strategy(seeded.strategy("ROUGH-MILL").unwrap());
    library.save().unwrap();

    let reloaded = ParameterLibrary::new(path);
    reloaded.load().unwrap();
    assert_eq!(reloaded.material_count(), 3);
    let tool = reloaded.tool("FM25-2").unwrap();
    assert_eq!(tool.teeth, 2);
    assert_eq!(tool.max_feed_per_tooth, 0.15);
}

#[test]
fn missing_file_seeds_the_standard_library() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.json");

    let library = ParameterLibrary::new(path.clone());
    library.load().unwrap();
    assert!(path.exists());
    assert!(library.material("P2").is_some());
    assert!(library.tool("BB25").is_some());
}
