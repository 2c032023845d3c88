//! Scripted API and recording view shared by the controller tests.

use std::sync::{Arc, Mutex};

use crate::net::api::DashboardApi;
use crate::net::types::{
    ApiError, FileDescriptor, FileListing, LoginBody, LoginReply, LoginRequest, MessageBody, Reply, SelectedFile,
    SignupRequest,
};
use crate::state::session::MemorySessionStore;
use crate::state::view::{ListContent, ListEntry, Panel, Route, View};

use super::Controller;

// =========================================================================
// MockApi
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Signup(SignupRequest),
    Login(LoginRequest),
    ListFiles,
    Upload(String),
    Download(String),
}

/// Pops one scripted response per call, front first. An unscripted call is
/// a transport error so a test that forgets a script fails loudly.
#[derive(Default)]
pub struct MockApi {
    signup: Mutex<Vec<Result<Reply<MessageBody>, ApiError>>>,
    login: Mutex<Vec<Result<LoginReply, ApiError>>>,
    list_files: Mutex<Vec<Result<FileListing, ApiError>>>,
    upload: Mutex<Vec<Result<Reply<MessageBody>, ApiError>>>,
    download: Mutex<Vec<Result<Vec<u8>, ApiError>>>,
    calls: Mutex<Vec<Call>>,
}

fn next<T>(queue: &Mutex<Vec<Result<T, ApiError>>>) -> Result<T, ApiError> {
    let mut queue = queue.lock().unwrap();
    if queue.is_empty() {
        return Err(ApiError::Transport("no scripted response".into()));
    }
    queue.remove(0)
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signup(self, response: Result<Reply<MessageBody>, ApiError>) -> Self {
        self.signup.lock().unwrap().push(response);
        self
    }

    pub fn with_login(self, response: Result<LoginReply, ApiError>) -> Self {
        self.login.lock().unwrap().push(response);
        self
    }

    pub fn with_list_files(self, response: Result<FileListing, ApiError>) -> Self {
        self.list_files.lock().unwrap().push(response);
        self
    }

    pub fn with_upload(self, response: Result<Reply<MessageBody>, ApiError>) -> Self {
        self.upload.lock().unwrap().push(response);
        self
    }

    pub fn with_download(self, response: Result<Vec<u8>, ApiError>) -> Self {
        self.download.lock().unwrap().push(response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl DashboardApi for MockApi {
    async fn signup(&self, request: &SignupRequest) -> Result<Reply<MessageBody>, ApiError> {
        self.record(Call::Signup(request.clone()));
        next(&self.signup)
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginReply, ApiError> {
        self.record(Call::Login(request.clone()));
        next(&self.login)
    }

    async fn list_files(&self) -> Result<FileListing, ApiError> {
        self.record(Call::ListFiles);
        next(&self.list_files)
    }

    async fn upload(&self, file: &SelectedFile) -> Result<Reply<MessageBody>, ApiError> {
        self.record(Call::Upload(file.name.clone()));
        next(&self.upload)
    }

    async fn download(&self, download_link: &str) -> Result<Vec<u8>, ApiError> {
        self.record(Call::Download(download_link.to_owned()));
        next(&self.download)
    }
}

// =========================================================================
// RecordingView
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Message(String),
    UploadMessage(String),
    Welcome(String),
    ShowPanel(Panel),
    ClientFiles(ListContent),
    AppendUploaded(ListEntry),
    ClearFileInput,
    Navigate(Route),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<Route> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Navigate(route) => Some(route),
                _ => None,
            })
            .collect()
    }

    pub fn panels(&self) -> Vec<Panel> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::ShowPanel(panel) => Some(panel),
                _ => None,
            })
            .collect()
    }

    pub fn last_message(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Message(text) => Some(text),
            _ => None,
        })
    }

    pub fn last_upload_message(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::UploadMessage(text) => Some(text),
            _ => None,
        })
    }

    pub fn client_files(&self) -> Vec<ListContent> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::ClientFiles(content) => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn uploaded(&self) -> Vec<ListEntry> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::AppendUploaded(entry) => Some(entry),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl View for RecordingView {
    fn set_message(&self, text: &str) {
        self.push(ViewEvent::Message(text.to_owned()));
    }

    fn set_upload_message(&self, text: &str) {
        self.push(ViewEvent::UploadMessage(text.to_owned()));
    }

    fn set_welcome(&self, text: &str) {
        self.push(ViewEvent::Welcome(text.to_owned()));
    }

    fn show_panel(&self, panel: Panel) {
        self.push(ViewEvent::ShowPanel(panel));
    }

    fn set_client_files(&self, content: ListContent) {
        self.push(ViewEvent::ClientFiles(content));
    }

    fn append_uploaded_file(&self, entry: ListEntry) {
        self.push(ViewEvent::AppendUploaded(entry));
    }

    fn clear_file_input(&self) {
        self.push(ViewEvent::ClearFileInput);
    }

    fn navigate(&self, route: Route) {
        self.push(ViewEvent::Navigate(route));
    }
}

// =========================================================================
// Harness
// =========================================================================

pub struct Harness {
    pub controller: Controller,
    pub api: Arc<MockApi>,
    pub session: Arc<MemorySessionStore>,
    pub view: Arc<RecordingView>,
}

pub fn harness(api: MockApi) -> Harness {
    harness_with_session(api, MemorySessionStore::new())
}

pub fn harness_with_session(api: MockApi, session: MemorySessionStore) -> Harness {
    let api = Arc::new(api);
    let session = Arc::new(session);
    let view = Arc::new(RecordingView::default());
    let controller = Controller::new(api.clone(), session.clone(), view.clone());
    Harness { controller, api, session, view }
}

pub fn message_reply(status: u16, message: &str) -> Result<Reply<MessageBody>, ApiError> {
    Ok(Reply { status, body: MessageBody { message: message.to_owned(), download_link: None } })
}

pub fn accepted_login(role: &str) -> Result<LoginReply, ApiError> {
    Ok(LoginReply::Accepted(LoginBody { role: role.to_owned(), message: Some("Login successful".into()) }))
}

pub fn listing(files: &[(&str, &str)]) -> Result<FileListing, ApiError> {
    Ok(FileListing {
        files: Some(
            files
                .iter()
                .map(|(filename, link)| FileDescriptor {
                    filename: (*filename).to_owned(),
                    download_link: (*link).to_owned(),
                    file_id: None,
                })
                .collect(),
        ),
    })
}
