use crate::core::client::{check_response, ApiClient};
use crate::domain::model::{MaintenancePlan, NewMaintenancePlan, PlanSchedule};
use crate::utils::error::Result;
use chrono::Utc;

impl ApiClient {
    /// Creates a maintenance plan covering the incidents matched by
    /// `condition` (a query in BPQL object format) for the given window.
    pub async fn maintenance_plan_create(
        &self,
        name: &str,
        condition: serde_json::Value,
        schedule: &PlanSchedule,
        description: Option<&str>,
    ) -> Result<()> {
        let (start, end) = schedule.resolve(Utc::now());
        let body = NewMaintenancePlan {
            name: name.to_string(),
            condition,
            start,
            end,
            description: description.map(str::to_string),
        };

        tracing::info!(name, start, end, "creating maintenance plan");
        let resp = self
            .auth(self.http().post(self.v2_0("maintenance-plans")))
            .json(&body)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// Fetches a single maintenance plan by id.
    pub async fn maintenance_plan_get(&self, plan_id: &str) -> Result<MaintenancePlan> {
        let resp = self
            .auth(
                self.http()
                    .get(self.v2_0(&format!("maintenance-plans/{plan_id}"))),
            )
            .send()
            .await?;
        let plan = check_response(resp).await?.json::<MaintenancePlan>().await?;
        Ok(plan)
    }

    /// Lists all maintenance plans.
    pub async fn maintenance_plan_list(&self) -> Result<Vec<MaintenancePlan>> {
        let resp = self
            .auth(self.http().get(self.v2_0("maintenance-plans")))
            .send()
            .await?;
        let plans = check_response(resp)
            .await?
            .json::<Vec<MaintenancePlan>>()
            .await?;
        Ok(plans)
    }

    /// Deletes a maintenance plan.
    pub async fn maintenance_plan_delete(&self, plan_id: &str) -> Result<()> {
        tracing::info!(plan_id, "deleting maintenance plan");
        let resp = self
            .auth(
                self.http()
                    .delete(self.v2_0(&format!("maintenance-plans/{plan_id}"))),
            )
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// Stops a running maintenance plan ahead of its scheduled end.
    pub async fn maintenance_plan_stop(&self, plan_id: &str) -> Result<()> {
        tracing::info!(plan_id, "stopping maintenance plan");
        let resp = self
            .auth(
                self.http()
                    .post(self.v2_0(&format!("maintenance-plans/{plan_id}/stop"))),
            )
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}
