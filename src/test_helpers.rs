//! Shared test helpers: deposit fixtures and a scripted in-memory source.

use crate::error::FetchError;
use crate::export::{ArtifactWriter, ExportColumn};
use crate::filter::PageQuery;
use crate::source::DepositSource;
use crate::types::{DepositStatus, PageResponse, ReportedDeposit};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

/// A deposit whose transaction id is `id`
pub(crate) fn deposit(id: &str) -> ReportedDeposit {
    ReportedDeposit {
        transaction_id: id.to_string(),
        phone: "+5511999990000".to_string(),
        wallet: "bc1qexamplewallet".to_string(),
        network: "bitcoin".to_string(),
        payment_method: "pix".to_string(),
        document_id: "123.456.789-00".to_string(),
        transaction_date: "2024-03-01T12:00:00Z".to_string(),
        coupon: None,
        value_in_asset: 0.0015,
        value_in_local_currency: 500.0,
        status: DepositStatus::Paid,
        discount_percent: 0.0,
        value_collected: 500.0,
    }
}

/// `count` deposits with ids `<prefix>-0`, `<prefix>-1`, ...
pub(crate) fn deposits(prefix: &str, count: usize) -> Vec<ReportedDeposit> {
    (0..count).map(|i| deposit(&format!("{prefix}-{i}"))).collect()
}

/// Transaction ids of a record slice, for order assertions
pub(crate) fn ids(records: &[ReportedDeposit]) -> Vec<String> {
    records.iter().map(|d| d.transaction_id.clone()).collect()
}

/// What the scripted source answers
#[derive(Clone, Debug)]
pub(crate) enum Reply {
    Page(PageResponse),
    Remote {
        code: String,
        message: Option<String>,
    },
}

impl Reply {
    pub(crate) fn remote(code: &str, message: Option<&str>) -> Self {
        Reply::Remote {
            code: code.to_string(),
            message: message.map(str::to_string),
        }
    }

    fn into_result(self) -> Result<PageResponse, FetchError> {
        match self {
            Reply::Page(page) => Ok(page),
            Reply::Remote { code, message } => Err(FetchError::Remote { code, message }),
        }
    }
}

struct OneShotReply {
    reply: Reply,
    gate: Option<oneshot::Receiver<()>>,
}

/// In-memory [`DepositSource`] answering from a script
///
/// One-off replies queued with [`push`](Self::push)/[`push_gated`](Self::push_gated)
/// are consumed in call order first; otherwise the reply configured for the
/// requested page is returned (an empty last page when none is configured).
#[derive(Default)]
pub(crate) struct ScriptedSource {
    pages: Mutex<HashMap<u32, Reply>>,
    queued: Mutex<VecDeque<OneShotReply>>,
    calls: Mutex<Vec<PageQuery>>,
}

impl ScriptedSource {
    /// Pages with the given record counts; ids are `p<page>-<index>`
    pub(crate) fn with_page_sizes(sizes: &[usize]) -> Self {
        let total = sizes.len() as u32;
        let source = Self::default();
        for (i, size) in sizes.iter().enumerate() {
            let page = i as u32 + 1;
            source.set_page(
                page,
                Reply::Page(PageResponse::new(deposits(&format!("p{page}"), *size), total)),
            );
        }
        source
    }

    pub(crate) fn set_page(&self, page: u32, reply: Reply) {
        self.pages.lock().unwrap().insert(page, reply);
    }

    pub(crate) fn push(&self, reply: Reply) {
        self.queued
            .lock()
            .unwrap()
            .push_back(OneShotReply { reply, gate: None });
    }

    /// Queue a reply that is held back until the returned sender fires
    pub(crate) fn push_gated(&self, reply: Reply) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.queued.lock().unwrap().push_back(OneShotReply {
            reply,
            gate: Some(rx),
        });
        tx
    }

    pub(crate) fn calls(&self) -> Vec<PageQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DepositSource for ScriptedSource {
    async fn fetch(&self, query: &PageQuery) -> Result<PageResponse, FetchError> {
        self.calls.lock().unwrap().push(query.clone());

        let queued = self.queued.lock().unwrap().pop_front();
        if let Some(OneShotReply { reply, gate }) = queued {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            return reply.into_result();
        }

        let reply = self
            .pages
            .lock()
            .unwrap()
            .get(&query.page)
            .cloned()
            .unwrap_or_else(|| Reply::Page(PageResponse::new(Vec::new(), query.page)));
        reply.into_result()
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Poll until `source` has seen at least `n` calls
pub(crate) async fn wait_for_calls(source: &ScriptedSource, n: usize) {
    for _ in 0..200 {
        if source.call_count() >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("source never reached {} calls", n);
}

/// [`ArtifactWriter`] that keeps every written record sequence in memory
#[derive(Default)]
pub(crate) struct RecordingWriter {
    writes: Mutex<Vec<(Vec<ReportedDeposit>, Vec<ExportColumn>)>>,
}

impl RecordingWriter {
    pub(crate) fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    /// Records of the most recent write
    pub(crate) fn last_records(&self) -> Option<Vec<ReportedDeposit>> {
        self.writes.lock().unwrap().last().map(|(r, _)| r.clone())
    }

    /// Columns of the most recent write
    pub(crate) fn last_columns(&self) -> Option<Vec<ExportColumn>> {
        self.writes.lock().unwrap().last().map(|(_, c)| c.clone())
    }
}

#[async_trait]
impl ArtifactWriter for RecordingWriter {
    async fn write(
        &self,
        records: &[ReportedDeposit],
        columns: &[ExportColumn],
    ) -> crate::Result<PathBuf> {
        self.writes
            .lock()
            .unwrap()
            .push((records.to_vec(), columns.to_vec()));
        Ok(PathBuf::from("memory://deposits.csv"))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
