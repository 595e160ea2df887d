use serde_json::Value;
use std::path::Path;

use crate::error::ImportError;

/// Reads the planets file and parses it as a JSON array.
///
/// Elements are kept as raw JSON; the collection schema is applied at insert
/// time, not here.
pub async fn load_planets(path: &Path) -> Result<Vec<Value>, ImportError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&contents).map_err(|source| ImportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_source(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_records_in_file_order() {
        let file = write_source(r#"[{"name":"Mercury","id":1},{"name":"Venus","id":2}]"#);

        let planets = load_planets(file.path()).await.unwrap();
        assert_eq!(planets.len(), 2);
        assert_eq!(planets[0]["name"], "Mercury");
        assert_eq!(planets[1]["id"], 2);
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();

        let err = load_planets(&dir.path().join("planets-data.json"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileRead);
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let file = write_source("[{\"name\": \"Mars\",");

        let err = load_planets(file.path()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn a_single_object_is_not_a_planet_list() {
        let file = write_source(r#"{"name":"Mars","id":4}"#);

        let err = load_planets(file.path()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
