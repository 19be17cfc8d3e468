// file: src/exporter/json.rs
// description: json export of research run records

use crate::error::{ResearchError, Result};
use crate::models::ResearchNotes;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| ResearchError::FileOperation {
            path: output_dir.clone(),
            source: e,
        })?;
        Ok(Self { output_dir })
    }

    /// Writes `notes_{run_id}.json` and returns its path.
    pub fn export(&self, notes: &ResearchNotes, pretty: bool) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("notes_{}.json", notes.run_id));

        let body = if pretty {
            serde_json::to_string_pretty(notes)?
        } else {
            serde_json::to_string(notes)?
        };

        fs::write(&path, body).map_err(|e| ResearchError::FileOperation {
            path: path.clone(),
            source: e,
        })?;

        info!("Exported research notes to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunStats;
    use tempfile::tempdir;

    #[test]
    fn test_exporter_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("exports/notes");
        assert!(JsonExporter::new(&nested).is_ok());
        assert!(nested.is_dir());
    }

    #[test]
    fn test_export_round_trips_notes() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let notes = ResearchNotes::new(
            "Acme Corp",
            vec!["Acme Corp headquarters".to_string()],
            "headquarters: Springfield".to_string(),
            RunStats {
                queries_issued: 1,
                ..RunStats::default()
            },
        );

        let path = exporter.export(&notes, true).unwrap();
        assert!(path.ends_with(format!("notes_{}.json", notes.run_id)));

        let written: ResearchNotes =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.notes, "headquarters: Springfield");
        assert_eq!(written.stats.queries_issued, 1);
    }
}
