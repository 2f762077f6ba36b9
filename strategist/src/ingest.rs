use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::{debug, info};

use crate::services::{Embedder, Report, VectorIndex};

/// Reads a JSON array of reports from disk.
///
/// # Errors
///
/// Returns an error if the file can't be read or isn't a JSON array of reports.
pub fn load_reports(path: &Path) -> Result<Vec<Report>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read reports from {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse reports from {}", path.display()))
}

/// Embeds each report and upserts it into the index, one at a time.
///
/// The first failing report aborts the batch, reports before it stay upserted.
///
/// # Errors
///
/// Returns the first error raised by the embedding service or the index.
pub async fn ingest(
    embedder: &dyn Embedder,
    index: &dyn VectorIndex,
    reports: &[Report],
) -> Result<usize> {
    for report in reports {
        let vector = embedder.embed(&report.content).await?;
        index.upsert(&report.id, vector, report.metadata()?).await?;

        debug!("Loaded report {}", report.id);
    }

    info!("Loaded {} reports into the knowledge base", reports.len());

    Ok(reports.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MockEmbedder, MockVectorIndex};
    use mockall::{predicate::eq, Sequence};

    #[tokio::test]
    async fn upserts_every_report_in_order() {
        let mut embedder = MockEmbedder::new();
        embedder
            .expect_embed()
            .returning(|text| Ok(vec![text.len() as f32]));

        let mut seq = Sequence::new();
        let mut index = MockVectorIndex::new();
        for (id, len) in [("r-1", 5.0), ("r-2", 6.0)] {
            index
                .expect_upsert()
                .withf(move |upsert_id, values, metadata| {
                    upsert_id == id && values == &vec![len] && metadata["id"] == id
                })
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _, _| Ok(()));
        }

        let reports = vec![Report::new("r-1", "first"), Report::new("r-2", "second")];
        let count = ingest(&embedder, &index, &reports).await.unwrap();

        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn aborts_batch_on_embedding_failure() {
        let mut embedder = MockEmbedder::new();
        embedder
            .expect_embed()
            .with(eq("first"))
            .returning(|_| Ok(vec![1.0]));
        embedder
            .expect_embed()
            .with(eq("second"))
            .returning(|_| Err(anyhow::anyhow!("rate limited")));

        let mut index = MockVectorIndex::new();
        index.expect_upsert().times(1).returning(|_, _, _| Ok(()));

        let reports = vec![
            Report::new("r-1", "first"),
            Report::new("r-2", "second"),
            Report::new("r-3", "third"),
        ];
        let err = ingest(&embedder, &index, &reports).await.unwrap_err();

        assert_eq!(err.to_string(), "rate limited");
    }

    #[test]
    fn loads_reports_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.json");
        fs::write(
            &path,
            r#"[{ "id": "r-1", "content": "Emulsion demand is up", "source": "Q3 survey" }]"#,
        )
        .unwrap();

        let reports = load_reports(&path).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].content, "Emulsion demand is up");
        assert_eq!(reports[0].extra["source"], "Q3 survey");
    }

    #[test]
    fn rejects_reports_without_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.json");
        fs::write(&path, r#"[{ "id": "r-1" }]"#).unwrap();

        assert!(load_reports(&path).is_err());
    }
}
