use crate::core::client::{check_response, ApiClient};
use crate::domain::model::{JobState, JobStatus, MappingList, MappingSchema, UploadJob};
use crate::utils::csvdata::{enrichment_name_from_csv, rows_to_csv};
use crate::utils::error::{BigPandaError, Result};
use reqwest::header::CONTENT_TYPE;
use std::collections::BTreeMap;
use std::path::Path;

impl ApiClient {
    /// Creates the schema for a new mapping enrichment. This must be done
    /// before populating it with data via the update-table operations.
    ///
    /// `enrichment_name` defaults to `result_tag`.
    pub async fn mapping_create_schema(
        &self,
        query_tag: &str,
        result_tag: &str,
        enrichment_name: Option<&str>,
    ) -> Result<()> {
        let name = enrichment_name.unwrap_or(result_tag);
        let schema = MappingSchema::new(query_tag, result_tag, name);

        tracing::info!(name, "creating mapping enrichment schema");
        let resp = self
            .auth(self.http().post(self.v2_1("mapping-enrichment")))
            .json(&schema)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// Replaces the data of an existing mapping enrichment table with the
    /// given rows. The table's schema must already exist at BigPanda.
    pub async fn mapping_update_table_rows(
        &self,
        enrichment_name: &str,
        rows: &[BTreeMap<String, String>],
    ) -> Result<()> {
        let csv_data = rows_to_csv(rows)?;
        self.upload_table(enrichment_name, csv_data).await
    }

    /// Replaces the data of an existing mapping enrichment table with the
    /// contents of a CSV file. The enrichment name is taken from the second
    /// column of the file's header.
    pub async fn mapping_update_table_csv(&self, csv_path: &Path) -> Result<()> {
        let enrichment_name = enrichment_name_from_csv(csv_path)?;
        tracing::info!(path = %csv_path.display(), "extracting data from file");
        let csv_data = tokio::fs::read_to_string(csv_path).await?;
        self.upload_table(&enrichment_name, csv_data).await
    }

    /// Resolves the internal id of a mapping enrichment from its name.
    async fn mapping_id_by_name(&self, enrichment_name: &str) -> Result<String> {
        tracing::info!("getting mapping ID from BigPanda");
        let resp = self
            .auth(self.http().get(self.v2_1("mapping-enrichment")))
            .send()
            .await?;
        let list = check_response(resp).await?.json::<MappingList>().await?;

        list.data
            .into_iter()
            .find(|item| item.config.name == enrichment_name)
            .map(|item| item.id)
            .ok_or_else(|| BigPandaError::EnrichmentNotFound {
                name: enrichment_name.to_string(),
            })
    }

    async fn upload_table(&self, enrichment_name: &str, csv_data: String) -> Result<()> {
        let mapping_id = self.mapping_id_by_name(enrichment_name).await?;
        tracing::info!(enrichment_name, %mapping_id, "uploading mapping table");

        let resp = self
            .auth(
                self.http()
                    .post(self.v2_1(&format!("mapping-enrichment/{mapping_id}/map"))),
            )
            .header(CONTENT_TYPE, "text/csv; charset=utf8")
            .body(csv_data)
            .send()
            .await?;
        let job = check_response(resp).await?.json::<UploadJob>().await?;
        let job_id = job.job_id.ok_or(BigPandaError::MissingJobId)?;

        loop {
            tracing::info!(%job_id, "waiting for upload to process");
            tokio::time::sleep(self.poll_interval()).await;

            let resp = self
                .auth(
                    self.http()
                        .get(self.v2_1(&format!("alert-enrichments-jobs/{job_id}"))),
                )
                .send()
                .await?;
            let status = check_response(resp).await?.json::<JobStatus>().await?;

            match status.status {
                JobState::Done => break,
                JobState::Failed => return Err(BigPandaError::JobFailed { job_id }),
                _ => continue,
            }
        }

        tracing::info!("upload complete");
        Ok(())
    }
}
