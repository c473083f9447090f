use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{DataPaths, load_json_or_default, now_timestamp, save_json};

/// One queued change waiting for upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncItem {
    pub id: Uuid,
    pub action: String,
    pub data: serde_json::Value,
    pub timestamp: String,
    #[serde(default)]
    pub synced: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct QueueFile {
    #[serde(default)]
    items: Vec<SyncItem>,
}

/// Append-only queue of offline changes, persisted as one JSON file.
#[derive(Debug, Clone)]
pub struct SyncQueue {
    paths: DataPaths,
}

impl SyncQueue {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    pub async fn enqueue(&self, action: &str, data: serde_json::Value) -> Result<()> {
        let path = self.paths.sync_queue_file();
        let mut queue: QueueFile = load_json_or_default(&path).await;
        queue.items.push(SyncItem {
            id: Uuid::new_v4(),
            action: action.to_string(),
            data,
            timestamp: now_timestamp(),
            synced: false,
        });
        save_json(&path, &queue).await
    }

    pub async fn pending(&self) -> Vec<SyncItem> {
        let queue: QueueFile = load_json_or_default(&self.paths.sync_queue_file()).await;
        queue.items.into_iter().filter(|item| !item.synced).collect()
    }

    /// Mark the first `count` pending items as synced.
    pub async fn mark_synced(&self, count: usize) -> Result<()> {
        let path = self.paths.sync_queue_file();
        let mut queue: QueueFile = load_json_or_default(&path).await;

        let mut marked = 0;
        for item in queue.items.iter_mut() {
            if !item.synced && marked < count {
                item.synced = true;
                marked += 1;
            }
        }
        save_json(&path, &queue).await
    }

    /// Drop synced items from the queue file.
    pub async fn clear_synced(&self) -> Result<()> {
        let path = self.paths.sync_queue_file();
        let mut queue: QueueFile = load_json_or_default(&path).await;
        queue.items.retain(|item| !item.synced);
        save_json(&path, &queue).await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncStatus {
    #[serde(default)]
    pub last_sync: Option<String>,
    #[serde(default)]
    pub pending_items: usize,
    #[serde(default)]
    pub sync_in_progress: bool,
    #[serde(default)]
    pub last_error: Option<String>,
    #[serde(default)]
    pub total_synced: usize,
}

/// Delta payload: pending items only, grouped by action, with a content
/// checksum for the receiving side.
#[derive(Debug, Clone, Serialize)]
pub struct SyncPayload {
    pub items: Vec<SyncItem>,
    pub grouped: HashMap<String, Vec<SyncItem>>,
    pub count: usize,
    pub checksum: String,
    pub prepared_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub success: bool,
    pub message: String,
    pub items_synced: usize,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncSummary {
    pub is_online: bool,
    pub pending_count: usize,
    pub last_sync: Option<String>,
    pub total_synced: usize,
    pub can_sync: bool,
    pub status_text: String,
}

/// Offline-first sync: reachability probe, delta payload, simulated upload,
/// queue bookkeeping. The server side is not part of this app; `upload`
/// stands in for the eventual API call.
pub struct SyncManager {
    paths: DataPaths,
    queue: SyncQueue,
    probe_addr: String,
    probe_timeout: Duration,
}

impl SyncManager {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            queue: SyncQueue::new(paths.clone()),
            paths,
            probe_addr: "8.8.8.8:53".to_string(),
            probe_timeout: Duration::from_secs(3),
        }
    }

    pub fn with_probe(mut self, addr: impl Into<String>, probe_timeout: Duration) -> Self {
        self.probe_addr = addr.into();
        self.probe_timeout = probe_timeout;
        self
    }

    /// Reachability check against a well-known endpoint. Offline means
    /// unreachable within the timeout.
    pub async fn is_online(&self) -> bool {
        matches!(
            timeout(self.probe_timeout, TcpStream::connect(&self.probe_addr)).await,
            Ok(Ok(_))
        )
    }

    pub async fn status(&self) -> SyncStatus {
        load_json_or_default(&self.paths.sync_status_file()).await
    }

    async fn update_status(&self, apply: impl FnOnce(&mut SyncStatus)) -> Result<()> {
        let mut status = self.status().await;
        apply(&mut status);
        save_json(&self.paths.sync_status_file(), &status).await
    }

    pub async fn prepare_payload(&self) -> Result<SyncPayload> {
        let items = self.queue.pending().await;

        let mut grouped: HashMap<String, Vec<SyncItem>> = HashMap::new();
        for item in &items {
            grouped.entry(item.action.clone()).or_default().push(item.clone());
        }

        let serialized = serde_json::to_vec(&items)?;
        let checksum = hex::encode(Sha256::digest(&serialized));

        Ok(SyncPayload {
            count: items.len(),
            items,
            grouped,
            checksum,
            prepared_at: now_timestamp(),
        })
    }

    /// Full sync pass. Failures come back as an unsuccessful outcome, never
    /// a panic; the queue is only touched after a successful upload.
    pub async fn sync(&self) -> SyncOutcome {
        let timestamp = now_timestamp();

        if !self.is_online().await {
            return SyncOutcome {
                success: false,
                message: "No internet connection".to_string(),
                items_synced: 0,
                timestamp,
            };
        }

        if let Err(e) = self.update_status(|s| s.sync_in_progress = true).await {
            return SyncOutcome {
                success: false,
                message: format!("Sync error: {e}"),
                items_synced: 0,
                timestamp,
            };
        }

        let outcome = self.sync_pending(&timestamp).await;

        if let Err(e) = self.update_status(|s| s.sync_in_progress = false).await {
            warn!(error = %e, "failed to clear sync-in-progress flag");
        }

        outcome
    }

    async fn sync_pending(&self, timestamp: &str) -> SyncOutcome {
        let failure = |message: String| SyncOutcome {
            success: false,
            message,
            items_synced: 0,
            timestamp: timestamp.to_string(),
        };

        let payload = match self.prepare_payload().await {
            Ok(payload) => payload,
            Err(e) => {
                let message = format!("Sync error: {e}");
                self.record_error(&message).await;
                return failure(message);
            }
        };

        if payload.count == 0 {
            return SyncOutcome {
                success: true,
                message: "Already up to date".to_string(),
                items_synced: 0,
                timestamp: timestamp.to_string(),
            };
        }

        let (uploaded, message) = self.upload(&payload).await;
        if !uploaded {
            self.record_error(&message).await;
            return failure(format!("Sync failed: {message}"));
        }

        if let Err(e) = self.queue.mark_synced(payload.count).await {
            let message = format!("Sync error: {e}");
            self.record_error(&message).await;
            return failure(message);
        }
        if let Err(e) = self.queue.clear_synced().await {
            let message = format!("Sync error: {e}");
            self.record_error(&message).await;
            return failure(message);
        }

        let count = payload.count;
        if let Err(e) = self
            .update_status(|s| {
                s.last_sync = Some(timestamp.to_string());
                s.pending_items = 0;
                s.total_synced += count;
                s.last_error = None;
            })
            .await
        {
            warn!(error = %e, "failed to record sync status");
        }

        info!(items = count, "sync completed");
        SyncOutcome {
            success: true,
            message,
            items_synced: count,
            timestamp: timestamp.to_string(),
        }
    }

    async fn record_error(&self, message: &str) {
        let message = message.to_string();
        if let Err(e) = self.update_status(move |s| s.last_error = Some(message)).await {
            warn!(error = %e, "failed to record sync error");
        }
    }

    // Stand-in for the real upload: brief delay, then success.
    async fn upload(&self, payload: &SyncPayload) -> (bool, String) {
        sleep(Duration::from_millis(500)).await;
        (true, format!("Synced {} items successfully", payload.count))
    }

    pub async fn summary(&self) -> SyncSummary {
        let status = self.status().await;
        let pending_count = self.queue.pending().await.len();
        let is_online = self.is_online().await;

        SyncSummary {
            is_online,
            pending_count,
            last_sync: status.last_sync.clone(),
            total_synced: status.total_synced,
            can_sync: is_online && pending_count > 0,
            status_text: status_text(is_online, pending_count, &status),
        }
    }
}

fn status_text(is_online: bool, pending: usize, status: &SyncStatus) -> String {
    if !is_online {
        if pending > 0 {
            return format!("Offline • {pending} items pending sync");
        }
        return "Offline • All data saved locally".to_string();
    }

    if pending > 0 {
        return format!("Online • {pending} items ready to sync");
    }

    if let Some(last) = &status.last_sync {
        return format!("Synced • Last: {}", time_ago(last));
    }

    "Online • Ready".to_string()
}

fn time_ago(iso: &str) -> String {
    let Ok(then) = chrono::DateTime::parse_from_rfc3339(iso) else {
        return "unknown".to_string();
    };

    let delta = chrono::Local::now().signed_duration_since(then);
    if delta.num_days() > 0 {
        return format!("{}d ago", delta.num_days());
    }
    if delta.num_hours() > 0 {
        return format!("{}h ago", delta.num_hours());
    }
    if delta.num_minutes() > 0 {
        return format!("{}m ago", delta.num_minutes());
    }
    "just now".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn queue(dir: &tempfile::TempDir) -> SyncQueue {
        SyncQueue::new(DataPaths::new(dir.path()))
    }

    #[tokio::test]
    async fn enqueue_then_pending_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(&dir);

        queue
            .enqueue("lesson_complete", json!({"lesson_id": "physics-1"}))
            .await
            .unwrap();
        queue
            .enqueue("quiz_score", json!({"lesson_id": "physics-1", "score": 80}))
            .await
            .unwrap();

        let pending = queue.pending().await;
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].action, "lesson_complete");
        assert!(!pending[0].synced);
        assert_ne!(pending[0].id, pending[1].id);
    }

    #[tokio::test]
    async fn mark_and_clear_synced_drain_the_queue() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(&dir);

        for i in 0..3 {
            queue.enqueue("quiz_score", json!({"n": i})).await.unwrap();
        }

        queue.mark_synced(2).await.unwrap();
        assert_eq!(queue.pending().await.len(), 1);

        queue.clear_synced().await.unwrap();
        let remaining = queue.pending().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].data, json!({"n": 2}));
    }

    #[tokio::test]
    async fn payload_groups_by_action_and_carries_a_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path());
        let queue = SyncQueue::new(paths.clone());
        let manager = SyncManager::new(paths);

        queue.enqueue("quiz_score", json!({"n": 1})).await.unwrap();
        queue.enqueue("quiz_score", json!({"n": 2})).await.unwrap();
        queue
            .enqueue("lesson_complete", json!({"lesson_id": "l"}))
            .await
            .unwrap();

        let payload = manager.prepare_payload().await.unwrap();
        assert_eq!(payload.count, 3);
        assert_eq!(payload.grouped["quiz_score"].len(), 2);
        assert_eq!(payload.grouped["lesson_complete"].len(), 1);
        assert_eq!(payload.checksum.len(), 64);
    }

    #[tokio::test]
    async fn sync_reports_offline_without_touching_the_queue() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path());
        let queue = SyncQueue::new(paths.clone());
        // Nothing listens on this port, so the probe fails fast.
        let manager =
            SyncManager::new(paths).with_probe("127.0.0.1:9", Duration::from_millis(100));

        queue.enqueue("quiz_score", json!({"n": 1})).await.unwrap();

        let outcome = manager.sync().await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "No internet connection");
        assert_eq!(queue.pending().await.len(), 1);
    }

    #[tokio::test]
    async fn sync_drains_the_queue_when_reachable() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path());
        let queue = SyncQueue::new(paths.clone());

        // A local listener stands in for "the internet".
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let manager =
            SyncManager::new(paths).with_probe(addr.to_string(), Duration::from_secs(1));

        queue.enqueue("quiz_score", json!({"n": 1})).await.unwrap();
        queue.enqueue("quiz_score", json!({"n": 2})).await.unwrap();

        let outcome = manager.sync().await;
        assert!(outcome.success);
        assert_eq!(outcome.items_synced, 2);
        assert!(queue.pending().await.is_empty());

        let status = manager.status().await;
        assert_eq!(status.total_synced, 2);
        assert!(status.last_sync.is_some());
        assert!(!status.sync_in_progress);
        assert!(status.last_error.is_none());

        drop(listener);
    }

    #[tokio::test]
    async fn empty_queue_syncs_as_already_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let manager =
            SyncManager::new(paths).with_probe(addr.to_string(), Duration::from_secs(1));

        let outcome = manager.sync().await;
        assert!(outcome.success);
        assert_eq!(outcome.message, "Already up to date");
        assert_eq!(outcome.items_synced, 0);
    }

    #[test]
    fn status_lines_cover_the_four_states() {
        let status = SyncStatus::default();
        assert_eq!(
            status_text(false, 3, &status),
            "Offline • 3 items pending sync"
        );
        assert_eq!(
            status_text(false, 0, &status),
            "Offline • All data saved locally"
        );
        assert_eq!(
            status_text(true, 2, &status),
            "Online • 2 items ready to sync"
        );
        assert_eq!(status_text(true, 0, &status), "Online • Ready");

        let synced = SyncStatus {
            last_sync: Some(chrono::Local::now().to_rfc3339()),
            ..SyncStatus::default()
        };
        assert_eq!(status_text(true, 0, &synced), "Synced • Last: just now");
    }

    #[test]
    fn time_ago_handles_garbage_input() {
        assert_eq!(time_ago("not a timestamp"), "unknown");
    }
}
