//! Service layer: routes commands to the indexing gateway and normalizes
//! what comes back.
//!
//! The service holds one gateway and exposes a unified API for the CLI.
//! It never touches HTTP and never renders; it returns cleaned records.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use lens_common::error::{LensError, LensResult};
use lens_common::raw::RawEnvelope;
use lens_common::record::{NormalizedRecord, RecordPage};
use lens_common::traits::IndexerGateway;
use lens_common::types::{BatchOptions, QueryFilter, TokenLookupKey, WalletResource};

use crate::normalize::normalize_counted;

pub struct LensService {
    gateway: Arc<dyn IndexerGateway>,
}

impl LensService {
    pub fn new(gateway: Arc<dyn IndexerGateway>) -> Self {
        info!(provider = gateway.provider(), "registered indexer gateway");
        Self { gateway }
    }

    pub fn provider(&self) -> &str {
        self.gateway.provider()
    }

    /// NFTs currently held by `address`, one page.
    pub async fn wallet_nfts(
        &self,
        address: &str,
        filter: &QueryFilter,
        cancel: &CancellationToken,
    ) -> LensResult<RecordPage> {
        self.wallet_page(address, WalletResource::Nfts, filter, cancel)
            .await
    }

    /// Transaction history of `address`, one page.
    pub async fn wallet_history(
        &self,
        address: &str,
        filter: &QueryFilter,
        cancel: &CancellationToken,
    ) -> LensResult<RecordPage> {
        self.wallet_page(address, WalletResource::History, filter, cancel)
            .await
    }

    /// Look up specific NFTs by (contract, token id).
    pub async fn specific_nfts(
        &self,
        keys: &[TokenLookupKey],
        options: BatchOptions,
        cancel: &CancellationToken,
    ) -> LensResult<Vec<NormalizedRecord>> {
        if keys.is_empty() {
            return Err(LensError::InvalidArgument(
                "at least one token key is required".into(),
            ));
        }

        let start = Instant::now();
        let raw = self.gateway.fetch_by_tokens(keys, options, cancel).await?;
        let (records, spam) = normalize_counted(&raw);

        info!(
            requested = keys.len(),
            raw = raw.len(),
            clean = records.len(),
            spam_filtered = spam,
            duration_ms = start.elapsed().as_millis() as u64,
            "fetched specific NFTs"
        );
        Ok(records)
    }

    async fn wallet_page(
        &self,
        address: &str,
        resource: WalletResource,
        filter: &QueryFilter,
        cancel: &CancellationToken,
    ) -> LensResult<RecordPage> {
        debug!(address, %resource, ?filter, "wallet query");

        let start = Instant::now();
        let envelope = self
            .gateway
            .fetch_by_wallet(address, resource, filter, cancel)
            .await?;
        let page = into_page(envelope);

        info!(
            address,
            %resource,
            page = page.page,
            clean = page.records.len(),
            has_more = page.has_more(),
            duration_ms = start.elapsed().as_millis() as u64,
            "fetched wallet page"
        );
        Ok(page)
    }
}

fn into_page(envelope: RawEnvelope) -> RecordPage {
    let (records, spam) = normalize_counted(&envelope.result);
    if spam > 0 {
        info!(
            raw = envelope.result.len(),
            clean = records.len(),
            spam_filtered = spam,
            "filtered spam records"
        );
    }
    RecordPage {
        page: envelope.page,
        page_size: envelope.page_size,
        cursor: envelope.cursor,
        records,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use lens_common::raw::RawRecord;

    use super::*;

    /// Canned gateway that records what it was asked for.
    #[derive(Default)]
    struct FakeGateway {
        envelope: Option<RawEnvelope>,
        batch: Vec<RawRecord>,
        fail_status: Option<u16>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl IndexerGateway for FakeGateway {
        fn provider(&self) -> &str {
            "fake"
        }

        async fn fetch_by_wallet(
            &self,
            address: &str,
            resource: WalletResource,
            _filter: &QueryFilter,
            cancel: &CancellationToken,
        ) -> LensResult<RawEnvelope> {
            if cancel.is_cancelled() {
                return Err(LensError::cancelled("fetch_by_wallet"));
            }
            self.calls
                .lock()
                .unwrap()
                .push(format!("{resource}:{address}"));
            if let Some(code) = self.fail_status {
                return Err(LensError::HttpStatus {
                    operation: "fetch_by_wallet".into(),
                    target: address.into(),
                    code,
                });
            }
            Ok(self.envelope.clone().unwrap_or(RawEnvelope {
                status: None,
                page: 0,
                page_size: 0,
                cursor: None,
                result: vec![],
            }))
        }

        async fn fetch_by_tokens(
            &self,
            keys: &[TokenLookupKey],
            _options: BatchOptions,
            _cancel: &CancellationToken,
        ) -> LensResult<Vec<RawRecord>> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("tokens:{}", keys.len()));
            Ok(self.batch.clone())
        }
    }

    fn raw(id: &str, spam: bool) -> RawRecord {
        RawRecord {
            token_id: id.into(),
            possible_spam: spam,
            ..Default::default()
        }
    }

    fn service(gateway: FakeGateway) -> (LensService, Arc<FakeGateway>) {
        let gateway = Arc::new(gateway);
        (LensService::new(gateway.clone()), gateway)
    }

    #[tokio::test]
    async fn test_wallet_nfts_filters_spam_and_keeps_paging() {
        let (svc, gw) = service(FakeGateway {
            envelope: Some(RawEnvelope {
                status: Some("SYNCED".into()),
                page: 1,
                page_size: 3,
                cursor: Some("next".into()),
                result: vec![raw("1", false), raw("2", true), raw("3", false)],
            }),
            ..Default::default()
        });

        let page = svc
            .wallet_nfts("0xabc", &QueryFilter::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 3);
        assert_eq!(page.cursor.as_deref(), Some("next"));
        let ids: Vec<_> = page.records.iter().map(|r| r.token_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(gw.calls.lock().unwrap().as_slice(), ["nfts:0xabc"]);
    }

    #[tokio::test]
    async fn test_wallet_history_uses_history_resource() {
        let (svc, gw) = service(FakeGateway::default());
        let page = svc
            .wallet_history("0xabc", &QueryFilter::default(), &CancellationToken::new())
            .await
            .unwrap();
        assert!(page.records.is_empty());
        assert!(!page.has_more());
        assert_eq!(gw.calls.lock().unwrap().as_slice(), ["history:0xabc"]);
    }

    #[tokio::test]
    async fn test_specific_nfts_normalizes_batch() {
        let (svc, _) = service(FakeGateway {
            batch: vec![raw("7", false), raw("8", true)],
            ..Default::default()
        });
        let keys = vec![TokenLookupKey::new("0xc", "7"), TokenLookupKey::new("0xc", "8")];
        let records = svc
            .specific_nfts(&keys, BatchOptions::default(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].token_id, "7");
    }

    #[tokio::test]
    async fn test_specific_nfts_rejects_empty_keys_without_calling_gateway() {
        let (svc, gw) = service(FakeGateway::default());
        let err = svc
            .specific_nfts(&[], BatchOptions::default(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, LensError::InvalidArgument(_)));
        assert!(gw.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_error_propagates() {
        let (svc, _) = service(FakeGateway {
            fail_status: Some(401),
            ..Default::default()
        });
        let err = svc
            .wallet_nfts("0xabc", &QueryFilter::default(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, LensError::HttpStatus { code: 401, .. }));
    }

    #[tokio::test]
    async fn test_cancelled_token_surfaces_cancelled() {
        let (svc, gw) = service(FakeGateway::default());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = svc
            .wallet_nfts("0xabc", &QueryFilter::default(), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, LensError::Cancelled { .. }));
        assert!(gw.calls.lock().unwrap().is_empty());
    }
}
