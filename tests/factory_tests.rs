//! Repository factory and configuration selection tests.

use std::io::Write;

use slotwise::db::repository::{AvailabilityRepository, RepositoryError};
use slotwise::db::{RepositoryFactory, RepositoryType};

#[test]
fn repository_type_parses_known_names() {
    assert_eq!("local".parse::<RepositoryType>(), Ok(RepositoryType::Local));
    assert_eq!(
        "postgres".parse::<RepositoryType>(),
        Ok(RepositoryType::Postgres)
    );
    assert_eq!("PG".parse::<RepositoryType>(), Ok(RepositoryType::Postgres));
    assert!("sqlite".parse::<RepositoryType>().is_err());
}

#[tokio::test]
async fn local_repository_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"local\"").unwrap();

    let repo = RepositoryFactory::from_config_file(file.path())
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn unknown_backend_in_config_is_a_configuration_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"sqlite\"").unwrap();

    let err = RepositoryFactory::from_config_file(file.path())
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Configuration(_)));
}

#[tokio::test]
async fn missing_config_file_is_a_configuration_error() {
    let err = RepositoryFactory::from_config_file("/nonexistent/repository.toml")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Configuration(_)));
}
