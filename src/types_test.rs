use serde_json::json;

use super::*;

#[test]
fn report_defaults_missing_fields() {
    let report: Report = serde_json::from_value(json!({ "id": 17 })).unwrap();
    assert_eq!(report.id, "17");
    assert_eq!(report.title, "");
    assert_eq!(report.content, "");
    assert_eq!(report.image, DEFAULT_REPORT_IMAGE);
}

#[test]
fn report_display_title_and_initials() {
    let mut report: Report = serde_json::from_value(json!({ "id": "r1" })).unwrap();
    assert_eq!(report.display_title(), "Untitled");
    assert_eq!(report.initials(), "");
    report.title = "ledger notes".into();
    assert_eq!(report.display_title(), "ledger notes");
    assert_eq!(report.initials(), "LE");
}

#[test]
fn project_deserializes_backend_row() {
    let project: Project = serde_json::from_value(json!({
        "id": "b7e1",
        "title": "Harbor fire",
        "description": "Arson?",
        "image": null,
        "owner_id": "u1",
        "created_at": "2024-03-05T10:00:00Z",
        "reports": [{ "id": 1, "title": "Witness", "content": "...", "image": "/w.png" }],
    }))
    .unwrap();
    assert_eq!(project.owner_id.as_deref(), Some("u1"));
    assert_eq!(project.reports.len(), 1);
    assert_eq!(project.reports[0].id, "1");
    assert!(project.updated_at.is_none());
}

#[test]
fn placeholder_project() {
    let project = Project::placeholder("9");
    assert_eq!(project.id, "9");
    assert_eq!(project.title, "Project 9");
    assert!(project.reports.is_empty());
}

#[test]
fn project_ids_share_node_id_parsing() {
    let project: Project = serde_json::from_value(json!({ "id": 1_712_345_678_901_i64 })).unwrap();
    assert_eq!(project.id, "1712345678901");
    assert!(serde_json::from_value::<Project>(json!({ "id": true })).is_err());
    assert!(serde_json::from_value::<Report>(json!({ "id": null })).is_err());
}
