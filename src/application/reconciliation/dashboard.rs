//! Dashboard controller: drives gateway calls from user intent and keeps the
//! view state current.
//!
//! Failures never escape as panics or blocked state. A failed initial load
//! shows an empty list; a failed later refresh keeps the previous snapshot.
//! Both record a notice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, info, warn};

use super::poller::{PollHandle, PollTarget, DEFAULT_POLL_INTERVAL};
use super::view_state::{VideoDraft, ViewMode, ViewState};
use crate::application::handlers::gateway::SCRIPT_REQUIRED;
use crate::domain::conversation::StartedConversation;
use crate::domain::gateway::Operation;
use crate::domain::video::VideoGenerationTicket;
use crate::ports::{ClientError, GatewayApi, GenerateVideoRequest};

/// Result of trying to rejoin a past conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejoinOutcome {
    /// The view switched to the live conversation at this URL.
    Joined(String),
    /// No join URL was available; the view stays on the list.
    Unavailable,
}

/// State shared with the poll task.
struct DashboardCore {
    api: Arc<dyn GatewayApi>,
    state: RwLock<ViewState>,
    /// Whether a poll task has decided to keep running. The task's exit and
    /// every re-arm are both decided while holding this lock.
    running: AsyncMutex<bool>,
}

impl DashboardCore {
    /// Replaces the video list with a fresh snapshot.
    async fn reload_videos(&self) -> Result<(), ClientError> {
        match self.api.list_videos().await {
            Ok(videos) => {
                debug!(count = videos.len(), "Video list refreshed");
                self.state.write().await.videos = videos;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Video refresh failed");
                self.state.write().await.notice = Some(Operation::ListVideos.failure_message().to_string());
                Err(e)
            }
        }
    }

    async fn reload_conversations(&self) -> Result<(), ClientError> {
        match self.api.list_conversations().await {
            Ok(conversations) => {
                debug!(count = conversations.len(), "Conversation list refreshed");
                self.state.write().await.conversations = conversations;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Conversation refresh failed");
                self.state.write().await.notice =
                    Some(Operation::ListConversations.failure_message().to_string());
                Err(e)
            }
        }
    }
}

#[async_trait]
impl PollTarget for DashboardCore {
    async fn keep_polling(&self) -> bool {
        let mut running = self.running.lock().await;
        if self.state.read().await.has_pending_videos() {
            return true;
        }
        *running = false;
        false
    }

    async fn reconcile(&self) {
        // Failures are already recorded; the next cycle retries.
        let _ = self.reload_videos().await;
    }
}

/// Client-side controller for the conversation and video dashboard.
pub struct Dashboard {
    core: Arc<DashboardCore>,
    poll_interval: Duration,
    poller: Mutex<Option<PollHandle>>,
    torn_down: AtomicBool,
}

impl Dashboard {
    pub fn new(api: Arc<dyn GatewayApi>) -> Self {
        Self {
            core: Arc::new(DashboardCore {
                api,
                state: RwLock::new(ViewState::default()),
                running: AsyncMutex::new(false),
            }),
            poll_interval: DEFAULT_POLL_INTERVAL,
            poller: Mutex::new(None),
            torn_down: AtomicBool::new(false),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Loads both lists once, treating failures as empty lists, then starts
    /// polling if any video is still in flight.
    pub async fn mount(&self) {
        let (conversations, videos) = futures::join!(
            self.core.api.list_conversations(),
            self.core.api.list_videos()
        );

        {
            let mut state = self.core.state.write().await;
            match conversations {
                Ok(list) => state.conversations = list,
                Err(e) => {
                    warn!(error = %e, "Initial conversation load failed");
                    state.conversations = Vec::new();
                    state.notice = Some(Operation::ListConversations.failure_message().to_string());
                }
            }
            match videos {
                Ok(list) => state.videos = list,
                Err(e) => {
                    warn!(error = %e, "Initial video load failed");
                    state.videos = Vec::new();
                    state.notice = Some(Operation::ListVideos.failure_message().to_string());
                }
            }
        }

        self.ensure_polling().await;
    }

    /// Starts a live conversation and switches to the embedded view.
    pub async fn start_conversation(&self) -> Result<StartedConversation, ClientError> {
        self.core.state.write().await.starting = true;
        let result = self.core.api.start_conversation().await;

        {
            let mut state = self.core.state.write().await;
            state.starting = false;
            match &result {
                Ok(started) => match started.conversation_url.as_deref().filter(|u| !u.is_empty()) {
                    Some(url) => {
                        info!(conversation_id = ?started.conversation_id, "Conversation started");
                        state.mode = ViewMode::Live {
                            url: url.to_string(),
                        };
                        state.highlighted_conversation = started.conversation_id.clone();
                    }
                    None => {
                        warn!("Start succeeded without a join URL");
                        state.notice = Some(Operation::StartConversation.failure_message().to_string());
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Failed to start conversation");
                    state.notice = Some(notice_for(Operation::StartConversation, e));
                }
            }
        }

        if result.is_ok() {
            let _ = self.core.reload_conversations().await;
        }
        result
    }

    pub async fn set_script(&self, script: impl Into<String>) {
        self.core.state.write().await.draft.script = script.into();
    }

    pub async fn set_video_name(&self, name: impl Into<String>) {
        self.core.state.write().await.draft.video_name = name.into();
    }

    /// Submits the draft. A blank script is rejected without a network call.
    ///
    /// On success the draft is cleared and the whole video list re-read.
    pub async fn generate_video(&self) -> Result<VideoGenerationTicket, ClientError> {
        let request = {
            let mut state = self.core.state.write().await;
            let mut request = GenerateVideoRequest::new(state.draft.script.clone())
                .with_video_name(state.draft.video_name.clone());
            if request.trimmed_script().is_none() {
                state.notice = Some(SCRIPT_REQUIRED.to_string());
                return Err(ClientError::Validation(SCRIPT_REQUIRED.to_string()));
            }
            request.video_name = request.requested_name().map(str::to_string);
            state.generating = true;
            request
        };

        let result = self.core.api.generate_video(&request).await;

        {
            let mut state = self.core.state.write().await;
            state.generating = false;
            match &result {
                Ok(ticket) => {
                    info!(video_id = ?ticket.video_id, "Video generation accepted");
                    state.draft = VideoDraft::default();
                }
                Err(e) => {
                    warn!(error = %e, "Failed to generate video");
                    state.notice = Some(notice_for(Operation::GenerateVideo, e));
                }
            }
        }

        if result.is_ok() {
            self.refresh_videos().await;
        }
        result
    }

    /// Immediately re-reads the conversation list.
    pub async fn refresh_conversations(&self) {
        let _ = self.core.reload_conversations().await;
    }

    /// Immediately re-reads the video list, re-arming polling if needed.
    pub async fn refresh_videos(&self) {
        let _ = self.core.reload_videos().await;
        self.ensure_polling().await;
    }

    /// Re-fetches one conversation and joins it if it has a join URL.
    pub async fn rejoin(&self, conversation_id: &str) -> RejoinOutcome {
        let conversation = match self.core.api.get_conversation(conversation_id).await {
            Ok(conversation) => conversation,
            Err(e) => {
                warn!(conversation_id, error = %e, "Rejoin lookup failed");
                return RejoinOutcome::Unavailable;
            }
        };

        let Some(url) = conversation.join_url() else {
            warn!(conversation_id, "Conversation has no join URL");
            return RejoinOutcome::Unavailable;
        };

        let mut state = self.core.state.write().await;
        state.mode = ViewMode::Live {
            url: url.to_string(),
        };
        state.highlighted_conversation = Some(conversation.id.clone());
        RejoinOutcome::Joined(url.to_string())
    }

    /// Returns to the list view.
    pub async fn leave_live(&self) {
        self.core.state.write().await.mode = ViewMode::List;
    }

    pub async fn dismiss_notice(&self) {
        self.core.state.write().await.notice = None;
    }

    /// A copy of the current view state for rendering.
    pub async fn snapshot(&self) -> ViewState {
        self.core.state.read().await.clone()
    }

    /// True while a poll task is alive.
    pub fn is_polling(&self) -> bool {
        self.poller().as_ref().is_some_and(PollHandle::is_active)
    }

    /// Stops polling for good. Later refreshes never re-arm it.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
        if let Some(handle) = self.poller().take() {
            handle.stop();
            debug!("Dashboard torn down, polling stopped");
        }
    }

    /// Spawns a poll task when videos are pending and none is running.
    async fn ensure_polling(&self) {
        if self.torn_down.load(Ordering::SeqCst) {
            return;
        }

        let mut running = self.core.running.lock().await;
        if *running || !self.core.state.read().await.has_pending_videos() {
            return;
        }

        let mut poller = self.poller();
        if self.torn_down.load(Ordering::SeqCst) {
            return;
        }

        debug!(interval_secs = self.poll_interval.as_secs(), "Polling for pending videos");
        let target: Arc<dyn PollTarget> = self.core.clone();
        *poller = Some(PollHandle::spawn(target, self.poll_interval));
        *running = true;
    }

    fn poller(&self) -> MutexGuard<'_, Option<PollHandle>> {
        self.poller.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn notice_for(operation: Operation, error: &ClientError) -> String {
    match error {
        ClientError::Validation(message) | ClientError::Gateway { message, .. } if !message.is_empty() => {
            message.clone()
        }
        _ => operation.failure_message().to_string(),
    }
}
