use crate::core::client::{check_response, OimClient};
use crate::domain::model::{AlertStatus, OimAlert};
use crate::utils::error::Result;
use crate::utils::timeparse::{epoch_seconds_f64, parse_datetime};
use std::collections::BTreeMap;

impl OimClient {
    /// Sends an alert to an Open Integration Manager integration.
    ///
    /// Each property becomes a tag on the alert. Properties named after the
    /// reserved body keys (`app_key`, `status`, `timestamp`) are dropped so
    /// they cannot override the typed fields. When `timestamp` is omitted
    /// BigPanda uses the time it receives the payload; otherwise it is parsed
    /// as ISO 8601 (UTC assumed without an offset).
    pub async fn oim_send_alert(
        &self,
        app_key: &str,
        mut properties: BTreeMap<String, String>,
        status: AlertStatus,
        timestamp: Option<&str>,
    ) -> Result<()> {
        let timestamp = match timestamp {
            Some(value) => Some(epoch_seconds_f64(parse_datetime("timestamp", value)?)),
            None => None,
        };

        properties.retain(|key, _| !matches!(key.as_str(), "app_key" | "status" | "timestamp"));

        let alert = OimAlert {
            app_key: app_key.to_string(),
            status,
            timestamp,
            properties,
        };

        tracing::info!(status = status.as_str(), "sending OIM alert");
        let resp = self
            .auth(self.http().post(self.url("alerts")))
            .json(&alert)
            .send()
            .await?;
        check_response(resp).await?;
        tracing::info!("alert accepted");
        Ok(())
    }
}
