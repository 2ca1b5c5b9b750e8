use chrono::Utc;
use futures::stream::{self, StreamExt};
use url::Url;

use super::{RunReport, Suite};
use crate::contract::{self, Verdict};
use crate::error::ContractError;
use crate::http::Transport;

/// Runs every case of a suite with bounded concurrency
pub struct SuiteRunner<T: Transport> {
    transport: T,
    concurrency: usize,
}

impl<T: Transport> SuiteRunner<T> {
    pub fn new(transport: T, concurrency: usize) -> Self {
        Self {
            transport,
            concurrency: concurrency.max(1),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Every descriptor is resolved before the first request goes out, so a
    /// malformed case aborts the run without any network traffic. After that
    /// no failure stops the remaining cases.
    pub async fn run(&self, suite: &Suite, base_url: &Url) -> Result<RunReport, ContractError> {
        let prepared = suite
            .cases
            .iter()
            .map(|case| contract::prepare(base_url, case).map(|request| (case, request)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            suite = %suite.name,
            base_url = %base_url,
            cases = prepared.len(),
            concurrency = self.concurrency,
            "starting run"
        );
        let started_at = Utc::now();

        let mut verdicts: Vec<(usize, Verdict)> = stream::iter(prepared.into_iter().enumerate())
            .map(|(index, (case, request))| async move {
                let verdict = contract::execute(&self.transport, case, &request).await;
                (index, verdict)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        verdicts.sort_by_key(|(index, _)| *index);
        let report = RunReport::new(
            suite.name.clone(),
            base_url.as_str(),
            started_at,
            verdicts.into_iter().map(|(_, verdict)| verdict).collect(),
        );

        tracing::info!(run_id = %report.run_id, "{}", report.summary_line());
        Ok(report)
    }
}
