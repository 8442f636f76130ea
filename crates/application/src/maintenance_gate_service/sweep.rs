use chrono::Utc;
use maintgate_core::AppResult;
use maintgate_domain::{
    ContinuationToken, GateOutcome, ParkedTokenRecord, ReleasePayload, TokenNamespace,
};
use tracing::{info, warn};

use super::MaintenanceGateService;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SweepReport {
    listed: u32,
    resumed: u32,
    read_failures: u32,
    release_failures: u32,
    delete_failures: u32,
}

/// What happened to one listed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParkedTokenResolution {
    Resumed,
    /// Released, but the record is still stored and will be released again
    /// by the next sweep.
    ResumedOrphaned,
    Unreadable,
    ReleaseRejected,
}

impl MaintenanceGateService {
    pub(super) async fn sweep_and_proceed(
        &self,
        namespace: &TokenNamespace,
        task_token: &ContinuationToken,
    ) -> AppResult<GateOutcome> {
        let report = self.sweep_parked_tokens(namespace).await;

        info!(
            namespace = %namespace.root(),
            listed = report.listed,
            resumed = report.resumed,
            read_failures = report.read_failures,
            release_failures = report.release_failures,
            delete_failures = report.delete_failures,
            "swept parked task tokens"
        );

        // Not isolated: a failure here fails the invocation even though the
        // sweep above has already taken effect.
        self.release_port
            .release_token(task_token, ReleasePayload::Proceeding)
            .await?;

        info!(namespace = %namespace.root(), "released incoming task token");

        Ok(GateOutcome::Proceeding {
            resumed_tokens: report.resumed,
        })
    }

    async fn sweep_parked_tokens(&self, namespace: &TokenNamespace) -> SweepReport {
        let bucket = self.config.bucket();
        let list_prefix = namespace.list_prefix();

        let keys = match self.token_store.list_keys(bucket, list_prefix.as_str()).await {
            Ok(keys) => keys,
            Err(error) => {
                warn!(
                    bucket = %bucket,
                    prefix = %list_prefix,
                    error = %error,
                    "failed to list parked task tokens, nothing will be resumed"
                );
                Vec::new()
            }
        };

        let mut report = SweepReport {
            listed: u32::try_from(keys.len()).unwrap_or(u32::MAX),
            ..SweepReport::default()
        };

        for key in keys {
            match self.resume_parked_token(key.as_str()).await {
                ParkedTokenResolution::Resumed => {
                    report.resumed = report.resumed.saturating_add(1);
                }
                ParkedTokenResolution::ResumedOrphaned => {
                    report.resumed = report.resumed.saturating_add(1);
                    report.delete_failures = report.delete_failures.saturating_add(1);
                }
                ParkedTokenResolution::Unreadable => {
                    report.read_failures = report.read_failures.saturating_add(1);
                }
                ParkedTokenResolution::ReleaseRejected => {
                    report.release_failures = report.release_failures.saturating_add(1);
                }
            }
        }

        report
    }

    async fn resume_parked_token(&self, key: &str) -> ParkedTokenResolution {
        let bucket = self.config.bucket();

        let record = match self.read_parked_record(key).await {
            Ok(record) => record,
            Err(error) => {
                warn!(key = %key, error = %error, "failed to read parked task token, skipping");
                return ParkedTokenResolution::Unreadable;
            }
        };

        if let Err(error) = self
            .release_port
            .release_token(record.task_token(), ReleasePayload::Resumed)
            .await
        {
            warn!(
                key = %key,
                error = %error,
                "failed to resume parked task token, leaving it parked"
            );
            return ParkedTokenResolution::ReleaseRejected;
        }

        if let Err(error) = self.token_store.delete_record(bucket, key).await {
            warn!(
                key = %key,
                error = %error,
                "resumed parked task token but failed to delete its record"
            );
            return ParkedTokenResolution::ResumedOrphaned;
        }

        info!(
            key = %key,
            parked_for_seconds = record
                .parked_at()
                .map(|parked_at| (Utc::now() - parked_at).num_seconds()),
            "resumed parked task token"
        );

        ParkedTokenResolution::Resumed
    }

    async fn read_parked_record(&self, key: &str) -> AppResult<ParkedTokenRecord> {
        let body = self
            .token_store
            .get_record(self.config.bucket(), key)
            .await?;

        ParkedTokenRecord::from_slice(body.as_slice())
    }
}
