use propdoc::edit::{EditOptions, Operation, Outcome, PropEdit, PropEditError};
use propdoc::{ChangeType, Document, SamePolicy};
use std::fs;
use tempfile::TempDir;

const APP_PROPERTIES: &str = "# Database configuration
db.host=localhost
db.port: 5432

# Credentials
! rotate monthly
db.user=admin
db.password=secret
";

#[test]
fn test_edit_integration() {
  let temp_dir = TempDir::new().unwrap();
  let path = temp_dir.path().join("app.properties");
  fs::write(&path, APP_PROPERTIES).unwrap();

  let options = || EditOptions {
    file: path.clone(),
    create: false,
  };

  PropEdit::run(
    options(),
    Operation::Set {
      key: "db.port".to_string(),
      value: "6432".to_string(),
    },
  )
  .unwrap();

  let outcome = PropEdit::run(
    options(),
    Operation::Del {
      key: "db.user".to_string(),
    },
  )
  .unwrap();
  assert_eq!(outcome, Outcome::Existed(true));

  PropEdit::run(
    options(),
    Operation::Set {
      key: "pool.size".to_string(),
      value: "8".to_string(),
    },
  )
  .unwrap();

  PropEdit::run(
    options(),
    Operation::Comment {
      key: "pool.size".to_string(),
      text: "Connection pool".to_string(),
    },
  )
  .unwrap();

  let edited = fs::read_to_string(&path).unwrap();
  let expected = "# Database configuration
db.host=localhost
db.port:6432

db.password=secret
#Connection pool
pool.size=8
";

  assert_eq!(edited, expected);

  let outcome = PropEdit::run(
    options(),
    Operation::Get {
      key: "db.port".to_string(),
    },
  )
  .unwrap();
  assert_eq!(outcome, Outcome::Value(Some("6432".to_string())));
}

#[test]
fn test_read_only_operations_leave_file_untouched() {
  let temp_dir = TempDir::new().unwrap();
  let path = temp_dir.path().join("app.properties");
  let content = "  indented = value  \n";
  fs::write(&path, content).unwrap();

  let options = || EditOptions {
    file: path.clone(),
    create: false,
  };

  PropEdit::run(options(), Operation::List).unwrap();
  PropEdit::run(
    options(),
    Operation::Del {
      key: "missing".to_string(),
    },
  )
  .unwrap();
  assert_eq!(fs::read_to_string(&path).unwrap(), content);

  let outcome = PropEdit::run(
    options(),
    Operation::Set {
      key: "indented".to_string(),
      value: "value".to_string(),
    },
  )
  .unwrap();
  assert_eq!(outcome, Outcome::Replaced(Some("value".to_string())));
  assert_eq!(fs::read_to_string(&path).unwrap(), content);

  assert!(PropEdit::format(options()).unwrap());
  assert_eq!(fs::read_to_string(&path).unwrap(), "indented=value\n");
  assert!(!PropEdit::format(options()).unwrap());
}

#[test]
fn test_create_missing_file() {
  let temp_dir = TempDir::new().unwrap();
  let path = temp_dir.path().join("new.properties");

  let result = PropEdit::run(
    EditOptions {
      file: path.clone(),
      create: false,
    },
    Operation::List,
  );
  assert!(matches!(result, Err(PropEditError::FileNotFound(_))));
  assert!(!path.exists());

  PropEdit::run(
    EditOptions {
      file: path.clone(),
      create: true,
    },
    Operation::Set {
      key: "a".to_string(),
      value: "1".to_string(),
    },
  )
  .unwrap();
  assert_eq!(fs::read_to_string(&path).unwrap(), "a=1\n");
}

#[test]
fn test_file_roundtrip() {
  let temp_dir = TempDir::new().unwrap();
  let source = temp_dir.path().join("source.properties");
  let target = temp_dir.path().join("target.properties");
  fs::write(&source, APP_PROPERTIES).unwrap();

  let doc = Document::load_file(&source).unwrap();
  doc.export_file(&target).unwrap();

  let expected = APP_PROPERTIES.replace("db.port: 5432", "db.port:5432");
  assert_eq!(fs::read_to_string(&target).unwrap(), expected);
  assert_eq!(Document::load_file(&target).unwrap(), doc);
}

#[test]
fn test_diff_files() {
  let temp_dir = TempDir::new().unwrap();
  let left = temp_dir.path().join("left.properties");
  let right = temp_dir.path().join("right.properties");
  fs::write(&left, "k1=v1\nk2=v2\n").unwrap();
  fs::write(&right, "# changed\nk1=v10\nk3=v3").unwrap();

  let events = PropEdit::diff_files(&left, &right, SamePolicy::Emit).unwrap();
  let summary: Vec<(ChangeType, &str)> = events
    .iter()
    .map(|e| (e.change_type, e.key.as_str()))
    .collect();

  assert_eq!(
    summary,
    vec![
      (ChangeType::Modified, "k1"),
      (ChangeType::Added, "k3"),
      (ChangeType::Removed, "k2"),
    ]
  );

  let missing = temp_dir.path().join("missing.properties");
  assert!(matches!(
    PropEdit::diff_files(&left, &missing, SamePolicy::Emit),
    Err(PropEditError::Load(_))
  ));
}
