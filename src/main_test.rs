use super::*;

fn config_in(dir: &std::path::Path) -> AppConfig {
    AppConfig { data_dir: dir.to_path_buf(), ..AppConfig::default() }
}

fn titled(title: &str) -> NodeDraft {
    NodeDraft { title: Some(title.to_owned()), ..Default::default() }
}

#[test]
fn add_node_then_delete_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    run_add_node(&config, "p1", titled("First")).unwrap();
    let view = open_project(&config, "p1").unwrap();
    assert_eq!(view.nodes().len(), 1);
    let id = view.nodes()[0].id.clone();

    run_delete_node(&config, "p1", &id).unwrap();
    assert!(open_project(&config, "p1").unwrap().nodes().is_empty());
}

#[test]
fn failed_save_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    run_add_node(&config, "p1", titled("First")).unwrap();

    // A directory where the temporary file goes makes every write fail.
    std::fs::create_dir(dir.path().join("project_p1_nodes.json.tmp")).unwrap();

    let err = run_add_node(&config, "p1", titled("Second")).unwrap_err();
    assert!(matches!(err, CliError::Storage(_)));
    let id = open_project(&config, "p1").unwrap().nodes()[0].id.clone();
    let err = run_delete_node(&config, "p1", &id).unwrap_err();
    assert!(matches!(err, CliError::Storage(_)));

    let titles: Vec<String> = open_project(&config, "p1").unwrap().nodes().iter().map(|n| n.title.clone()).collect();
    assert_eq!(titles, ["First"]);
}

#[test]
fn delete_unknown_node_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_delete_node(&config_in(dir.path()), "p1", "404").unwrap_err();
    assert!(matches!(err, CliError::UnknownNode { .. }));
}

#[test]
fn node_type_and_style_parse_by_stored_name() {
    assert_eq!(parse_wire::<NodeType>("type", "node_person").unwrap(), NodeType::Person);
    assert_eq!(parse_wire::<VisualStyle>("style", "postit").unwrap(), VisualStyle::Postit);
    assert!(matches!(parse_wire::<NodeType>("type", "planet"), Err(CliError::InvalidValue { .. })));
}
