//! Mock gateway API for testing the reconciliation layer.
//!
//! Each operation pops its next scripted result; list operations fall back to
//! the last configured snapshot once their queue drains, so a poller can keep
//! reading a steady state. Every call is recorded by operation name.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::domain::conversation::{Conversation, StartedConversation};
use crate::domain::video::{VideoGenerationTicket, VideoJob};
use crate::ports::{ClientError, GatewayApi, GenerateVideoRequest};

type Scripted<T> = Arc<Mutex<VecDeque<Result<T, ClientError>>>>;

#[derive(Clone, Default)]
pub struct MockGatewayApi {
    conversation_lists: Scripted<Vec<Conversation>>,
    video_lists: Scripted<Vec<VideoJob>>,
    last_conversations: Arc<Mutex<Vec<Conversation>>>,
    last_videos: Arc<Mutex<Vec<VideoJob>>>,
    starts: Scripted<StartedConversation>,
    generations: Scripted<VideoGenerationTicket>,
    conversations: Arc<Mutex<HashMap<String, Conversation>>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
    generate_requests: Arc<Mutex<Vec<GenerateVideoRequest>>>,
}

impl MockGatewayApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversations(self, list: Vec<Conversation>) -> Self {
        self.conversation_lists.lock().unwrap().push_back(Ok(list));
        self
    }

    pub fn with_conversations_error(self, error: ClientError) -> Self {
        self.conversation_lists.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_videos(self, list: Vec<VideoJob>) -> Self {
        self.video_lists.lock().unwrap().push_back(Ok(list));
        self
    }

    pub fn with_videos_error(self, error: ClientError) -> Self {
        self.video_lists.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_start(self, result: Result<StartedConversation, ClientError>) -> Self {
        self.starts.lock().unwrap().push_back(result);
        self
    }

    pub fn with_generation(self, result: Result<VideoGenerationTicket, ClientError>) -> Self {
        self.generations.lock().unwrap().push_back(result);
        self
    }

    /// Makes a single conversation available to `get_conversation`.
    pub fn with_conversation(self, conversation: Conversation) -> Self {
        self.conversations
            .lock()
            .unwrap()
            .insert(conversation.id.clone(), conversation);
        self
    }

    /// Number of calls recorded for an operation, e.g. `"list_videos"`.
    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == operation)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn generate_requests(&self) -> Vec<GenerateVideoRequest> {
        self.generate_requests.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str) {
        self.calls.lock().unwrap().push(operation);
    }
}

/// Pops the next scripted list, remembering successes as the steady state.
fn next_list<T: Clone>(queue: &Scripted<Vec<T>>, last: &Mutex<Vec<T>>) -> Result<Vec<T>, ClientError> {
    match queue.lock().unwrap().pop_front() {
        Some(Ok(list)) => {
            *last.lock().unwrap() = list.clone();
            Ok(list)
        }
        Some(Err(error)) => Err(error),
        None => Ok(last.lock().unwrap().clone()),
    }
}

fn unscripted(operation: &str) -> ClientError {
    ClientError::Transport(format!("MockGatewayApi has no scripted {}", operation))
}

#[async_trait]
impl GatewayApi for MockGatewayApi {
    async fn start_conversation(&self) -> Result<StartedConversation, ClientError> {
        self.record("start_conversation");
        self.starts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("start_conversation")))
    }

    async fn generate_video(
        &self,
        request: &GenerateVideoRequest,
    ) -> Result<VideoGenerationTicket, ClientError> {
        self.record("generate_video");
        self.generate_requests.lock().unwrap().push(request.clone());
        self.generations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("generate_video")))
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, ClientError> {
        self.record("list_conversations");
        next_list(&self.conversation_lists, &self.last_conversations)
    }

    async fn get_conversation(&self, id: &str) -> Result<Conversation, ClientError> {
        self.record("get_conversation");
        self.conversations
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::Gateway {
                status: 404,
                message: "Conversation not found".to_string(),
            })
    }

    async fn list_videos(&self) -> Result<Vec<VideoJob>, ClientError> {
        self.record("list_videos");
        next_list(&self.video_lists, &self.last_videos)
    }

    async fn get_video(&self, id: &str) -> Result<VideoJob, ClientError> {
        self.record("get_video");
        self.last_videos
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| ClientError::Gateway {
                status: 404,
                message: "Video not found".to_string(),
            })
    }
}
