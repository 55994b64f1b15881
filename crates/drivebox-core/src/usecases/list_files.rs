//! Listing use case
//!
//! Fetches the remote file listing. `single_page` reproduces the upstream
//! one-page request; `all_pages` follows `nextPageToken` to exhaustion so
//! results are never silently truncated.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    domain::{DriveSession, FilePage, PageSize, RemoteFileEntry},
    ports::IRemoteFileGateway,
};

/// Use case for querying the remote file listing
pub struct ListFilesUseCase {
    gateway: Arc<dyn IRemoteFileGateway>,
}

impl ListFilesUseCase {
    /// Creates a new ListFilesUseCase with the required dependencies
    pub fn new(gateway: Arc<dyn IRemoteFileGateway>) -> Self {
        Self { gateway }
    }

    /// Fetches a single page of at most `page_size` entries
    ///
    /// The returned page carries the continuation token untouched; callers
    /// decide whether to follow it.
    pub async fn single_page(
        &self,
        session: &DriveSession,
        page_size: PageSize,
    ) -> Result<FilePage> {
        self.gateway
            .list_files(session.credential(), page_size, None)
            .await
            .context("Failed to list remote files")
    }

    /// Fetches the complete listing by following continuation tokens
    ///
    /// Pages are concatenated in backend order. Each request uses the same
    /// page size.
    pub async fn all_pages(
        &self,
        session: &DriveSession,
        page_size: PageSize,
    ) -> Result<Vec<RemoteFileEntry>> {
        let mut entries = Vec::new();
        let mut token = None;
        let mut pages = 0u32;

        loop {
            let page = self
                .gateway
                .list_files(session.credential(), page_size, token.as_ref())
                .await
                .with_context(|| format!("Failed to list remote files (page {})", pages + 1))?;

            pages += 1;
            entries.extend(page.entries);

            match page.next_page_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        debug!(pages, total = entries.len(), "Listing complete");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AccountProfile, Credential, Email, FileId, PageToken, UploadRequest, UploadResult,
    };
    use chrono::{Duration, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Gateway serving a fixed sequence of pages, one per call
    struct PagedGateway {
        pages: Vec<FilePage>,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl IRemoteFileGateway for PagedGateway {
        async fn list_files(
            &self,
            _credential: &Credential,
            _page_size: PageSize,
            page_token: Option<&PageToken>,
        ) -> Result<FilePage> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            // After the first page the caller must present the token we returned
            if call > 0 {
                assert!(page_token.is_some(), "continuation without page token");
            }
            Ok(self.pages[call].clone())
        }

        async fn upload_file(
            &self,
            _credential: &Credential,
            _request: UploadRequest,
        ) -> Result<UploadResult> {
            unimplemented!("not used in listing tests")
        }

        async fn fetch_profile(&self, _credential: &Credential) -> Result<AccountProfile> {
            unimplemented!("not used in listing tests")
        }
    }

    fn entry(id: &str, name: &str) -> RemoteFileEntry {
        RemoteFileEntry {
            id: FileId::new(id.to_string()).unwrap(),
            name: name.to_string(),
        }
    }

    fn test_session() -> DriveSession {
        DriveSession::new(
            AccountProfile {
                email: Email::new("user@example.com".to_string()).unwrap(),
                display_name: "Test User".to_string(),
                storage_used: 0,
                storage_limit: 0,
            },
            Credential {
                access_token: "ya29.token".to_string(),
                refresh_token: None,
                expires_at: Utc::now() + Duration::hours(1),
            },
        )
    }

    #[tokio::test]
    async fn test_single_page_preserves_order() {
        let gateway = Arc::new(PagedGateway {
            pages: vec![FilePage {
                entries: vec![entry("1", "a.txt"), entry("2", "b.txt")],
                next_page_token: None,
            }],
            calls: AtomicUsize::new(0),
        });
        let usecase = ListFilesUseCase::new(gateway);

        let page = usecase
            .single_page(&test_session(), PageSize::default())
            .await
            .unwrap();

        let names: Vec<&str> = page.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert!(page.next_page_token.is_none());
    }

    #[tokio::test]
    async fn test_single_page_does_not_follow_token() {
        let gateway = Arc::new(PagedGateway {
            pages: vec![FilePage {
                entries: vec![entry("1", "a.txt")],
                next_page_token: Some(PageToken::new("more".to_string()).unwrap()),
            }],
            calls: AtomicUsize::new(0),
        });
        let usecase = ListFilesUseCase::new(Arc::clone(&gateway) as Arc<dyn IRemoteFileGateway>);

        let page = usecase
            .single_page(&test_session(), PageSize::default())
            .await
            .unwrap();

        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
        assert!(page.next_page_token.is_some());
    }

    #[tokio::test]
    async fn test_all_pages_follows_tokens_in_order() {
        let gateway = Arc::new(PagedGateway {
            pages: vec![
                FilePage {
                    entries: vec![entry("1", "a.txt"), entry("2", "b.txt")],
                    next_page_token: Some(PageToken::new("p2".to_string()).unwrap()),
                },
                FilePage {
                    entries: vec![entry("3", "c.txt")],
                    next_page_token: Some(PageToken::new("p3".to_string()).unwrap()),
                },
                FilePage {
                    entries: vec![entry("4", "d.txt")],
                    next_page_token: None,
                },
            ],
            calls: AtomicUsize::new(0),
        });
        let usecase = ListFilesUseCase::new(Arc::clone(&gateway) as Arc<dyn IRemoteFileGateway>);

        let entries = usecase
            .all_pages(&test_session(), PageSize::default())
            .await
            .unwrap();

        assert_eq!(gateway.calls.load(Ordering::SeqCst), 3);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt", "d.txt"]);
    }

    #[tokio::test]
    async fn test_all_pages_single_page_listing() {
        let gateway = Arc::new(PagedGateway {
            pages: vec![FilePage {
                entries: vec![entry("1", "only.txt")],
                next_page_token: None,
            }],
            calls: AtomicUsize::new(0),
        });
        let usecase = ListFilesUseCase::new(gateway);

        let entries = usecase
            .all_pages(&test_session(), PageSize::default())
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
    }
}
