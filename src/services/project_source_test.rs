use super::*;

fn owned(id: &str, owner: &str) -> Project {
    Project { owner_id: Some(owner.into()), ..Project::placeholder(id) }
}

#[test]
fn parse_eq_filter() {
    let f = EqFilter::parse("owner_id.eq.user.with.dots").unwrap();
    assert_eq!(f.column, "owner_id");
    assert_eq!(f.value, "user.with.dots");
    assert!(matches!(EqFilter::parse("owner_id.neq.x"), Err(SourceError::InvalidFilter(_))));
    assert!(matches!(EqFilter::parse("owner_id"), Err(SourceError::InvalidFilter(_))));
    assert!(matches!(EqFilter::parse(".eq.x"), Err(SourceError::InvalidFilter(_))));
}

#[tokio::test]
async fn memory_source_filters_by_owner() {
    let source = MemoryProjectSource::new(vec![owned("1", "u1"), owned("2", "u2"), owned("3", "u1")]);
    let all = source.list_projects(None).await.unwrap();
    assert_eq!(all.len(), 3);

    let mine = source.list_projects(Some("owner_id.eq.u1")).await.unwrap();
    let ids: Vec<&str> = mine.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
}

#[tokio::test]
async fn unknown_column_is_rejected() {
    let source = MemoryProjectSource::new(vec![owned("1", "u1")]);
    let err = source.list_projects(Some("color.eq.red")).await.unwrap_err();
    assert!(matches!(err, SourceError::InvalidFilter(_)));
}

#[tokio::test]
async fn json_file_source_reads_and_filters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(
        &path,
        r#"[{"id": 1, "title": "Harbor", "owner_id": "u1"}, {"id": "2", "title": "Depot", "owner_id": "u2"}]"#,
    )
    .unwrap();

    let source = JsonFileProjectSource::new(&path);
    let mine = source.list_projects(Some("owner_id.eq.u1")).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, "1");
    assert_eq!(mine[0].title, "Harbor");
}

#[tokio::test]
async fn json_file_source_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let source = JsonFileProjectSource::new(dir.path().join("absent.json"));
    assert!(source.list_projects(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn json_file_source_malformed_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(&path, "{not json").unwrap();
    let err = JsonFileProjectSource::new(&path).list_projects(None).await.unwrap_err();
    assert!(matches!(err, SourceError::Json(_)));
}
