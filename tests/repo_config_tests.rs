//! Repository configuration file parsing.

use std::io::Write;
use std::path::Path;

use skylane::db::repo_config::RepositoryConfig;
use skylane::db::repository::{FlightRepository, RepositoryError};
use skylane::db::{RepositoryFactory, RepositoryType};

#[test]
fn test_config_parses_local_backend() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"local\"").unwrap();

    let config = RepositoryConfig::from_file(file.path()).unwrap();
    assert_eq!(config.repository.repo_type, "local");
    assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
}

#[test]
fn test_missing_config_file_is_a_configuration_error() {
    let err = RepositoryConfig::from_file(Path::new("/nonexistent/repository.toml")).unwrap_err();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
}

#[test]
fn test_malformed_config_is_a_configuration_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "repository = 5").unwrap();

    let err = RepositoryConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
}

#[test]
fn test_unknown_backend_fails_at_factory_time() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"dynamo\"").unwrap();

    // The file parses; the type is rejected when the repository is built.
    let config = RepositoryConfig::from_file(file.path()).unwrap();
    assert!(config.repository_type().is_err());

    let err = RepositoryFactory::from_config_file(file.path()).unwrap_err();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
}

#[tokio::test]
async fn test_factory_builds_repository_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"local\"").unwrap();

    let repo = RepositoryFactory::from_config_file(file.path()).unwrap();
    assert!(repo.health_check().await.unwrap());
}
