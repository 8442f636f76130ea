use chrono::Utc;
use maintgate_core::AppResult;
use maintgate_domain::{ContinuationToken, GateOutcome, ParkedTokenRecord, TokenNamespace};
use tracing::info;

use super::MaintenanceGateService;

impl MaintenanceGateService {
    pub(super) async fn park_token(
        &self,
        namespace: &TokenNamespace,
        task_token: &ContinuationToken,
    ) -> AppResult<GateOutcome> {
        let key = namespace.new_key();
        let record = ParkedTokenRecord::new(task_token.clone(), Utc::now());

        self.token_store
            .put_record(self.config.bucket(), key.as_str(), record.to_vec()?)
            .await?;

        info!(
            bucket = %self.config.bucket(),
            key = %key,
            "workflow under maintenance, parked task token"
        );

        Ok(GateOutcome::Maintenance {
            saved_token_key: key,
        })
    }
}
