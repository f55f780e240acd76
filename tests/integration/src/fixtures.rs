//! In-memory repositories, capabilities, and entity builders
//!
//! The repositories mirror the PostgreSQL implementations closely
//! enough to drive the service layer through real flows.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use talent_core::{
    Application, ApplicationRepository, ApplicationStatus, Candidate, CandidateLead,
    CandidateRepository, CompanyGroup, CompanyGroupRepository, DomainError, FileStorage,
    JobPosting, JobPostingRepository, JobStatus, MailRequest, MailTransport, Message,
    MessageQuery, MessageRepository, MessageSender, MessageStatus, NotificationPreference,
    NotificationRepository, RepoResult, Room, RoomRepository, SenderType, Snowflake,
    SnowflakeGenerator, TaskType, UnreadNotification,
};
use talent_service::{ServiceContext, ServiceContextBuilder};

/// Shared backing store for all in-memory repositories
#[derive(Default)]
pub struct MemoryStore {
    pub rooms: Mutex<Vec<Room>>,
    pub messages: Mutex<Vec<Message>>,
    pub notifications: Mutex<Vec<UnreadNotification>>,
    pub applications: Mutex<Vec<Application>>,
    pub job_postings: Mutex<Vec<JobPosting>>,
    pub candidates: Mutex<Vec<Candidate>>,
    pub company_groups: Mutex<Vec<CompanyGroup>>,
}

impl MemoryStore {
    pub fn add_candidate(&self, candidate: Candidate) {
        self.candidates.lock().unwrap().push(candidate);
    }

    pub fn add_company_group(&self, group: CompanyGroup) {
        self.company_groups.lock().unwrap().push(group);
    }

    pub fn add_job_posting(&self, posting: JobPosting) {
        self.job_postings.lock().unwrap().push(posting);
    }

    pub fn add_application(&self, application: Application) {
        self.applications.lock().unwrap().push(application);
    }

    pub fn add_room(&self, room: Room) {
        self.rooms.lock().unwrap().push(room);
    }

    pub fn add_message(&self, message: Message) {
        self.messages.lock().unwrap().push(message);
    }
}

// ============================================================================
// Repositories
// ============================================================================

pub struct MemoryRoomRepository(pub Arc<MemoryStore>);

#[async_trait]
impl RoomRepository for MemoryRoomRepository {
    async fn create(&self, room: &Room) -> RepoResult<()> {
        self.0.rooms.lock().unwrap().push(room.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Room>> {
        Ok(self.0.rooms.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_participants(
        &self,
        candidate_id: Snowflake,
        company_group_id: Snowflake,
        related_job_posting_id: Option<Snowflake>,
    ) -> RepoResult<Option<Room>> {
        Ok(self
            .0
            .rooms
            .lock()
            .unwrap()
            .iter()
            .find(|r| {
                r.candidate_id == candidate_id
                    && r.company_group_id == company_group_id
                    && r.related_job_posting_id == related_job_posting_id
            })
            .cloned())
    }

    async fn list_for_candidate(&self, candidate_id: Snowflake) -> RepoResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .0
            .rooms
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.candidate_id == candidate_id)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rooms)
    }

    async fn list_for_groups(&self, group_ids: &[Snowflake]) -> RepoResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .0
            .rooms
            .lock()
            .unwrap()
            .iter()
            .filter(|r| group_ids.contains(&r.company_group_id))
            .cloned()
            .collect();
        rooms.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rooms)
    }

    async fn add_participant(
        &self,
        room_id: Snowflake,
        company_user_id: Snowflake,
    ) -> RepoResult<()> {
        let mut rooms = self.0.rooms.lock().unwrap();
        let room = rooms
            .iter_mut()
            .find(|r| r.id == room_id)
            .ok_or(DomainError::RoomNotFound(room_id))?;
        room.add_participant(company_user_id);
        Ok(())
    }

    async fn touch(&self, room_id: Snowflake, now: DateTime<Utc>) -> RepoResult<()> {
        let mut rooms = self.0.rooms.lock().unwrap();
        let room = rooms
            .iter_mut()
            .find(|r| r.id == room_id)
            .ok_or(DomainError::RoomNotFound(room_id))?;
        room.touch(now);
        Ok(())
    }
}

pub struct MemoryMessageRepository(pub Arc<MemoryStore>);

#[async_trait]
impl MessageRepository for MemoryMessageRepository {
    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.0.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        Ok(self
            .0
            .messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn list_by_room(
        &self,
        room_id: Snowflake,
        query: &MessageQuery,
    ) -> RepoResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .0
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.room_id == room_id)
            .filter(|m| query.before.is_none_or(|b| m.id < b))
            .filter(|m| query.after.is_none_or(|a| m.id > a))
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at).then(a.id.cmp(&b.id)));
        let limit = usize::try_from(query.limit.max(0)).unwrap_or(usize::MAX);
        if messages.len() > limit && query.after.is_none() {
            // Latest page when paging backwards from the end
            messages.drain(..messages.len() - limit);
        } else {
            messages.truncate(limit);
        }
        Ok(messages)
    }

    async fn mark_room_read(
        &self,
        room_id: Snowflake,
        sender_type: SenderType,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Snowflake>> {
        let mut messages = self.0.messages.lock().unwrap();
        let mut changed = Vec::new();
        for message in messages
            .iter_mut()
            .filter(|m| m.room_id == room_id && m.sender_type() == sender_type)
        {
            if message.mark_read(now) {
                changed.push(message.id);
            }
        }
        Ok(changed)
    }

    async fn count_unread(&self, room_id: Snowflake, sender_type: SenderType) -> RepoResult<i64> {
        Ok(self
            .0
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                m.room_id == room_id
                    && m.sender_type() == sender_type
                    && m.status == MessageStatus::Sent
            })
            .count() as i64)
    }

    async fn find_candidate_leads(
        &self,
        group_ids: &[Snowflake],
    ) -> RepoResult<Vec<CandidateLead>> {
        let rooms = self.0.rooms.lock().unwrap();
        let candidates = self.0.candidates.lock().unwrap();
        let postings = self.0.job_postings.lock().unwrap();
        let messages = self.0.messages.lock().unwrap();

        let mut leads = Vec::new();
        for message in messages
            .iter()
            .filter(|m| m.sender_type() == SenderType::Candidate)
        {
            let Some(room) = rooms
                .iter()
                .find(|r| r.id == message.room_id && group_ids.contains(&r.company_group_id))
            else {
                continue;
            };
            let Some(candidate) = candidates.iter().find(|c| c.id == room.candidate_id) else {
                continue;
            };
            let job_title = room.related_job_posting_id.and_then(|id| {
                postings.iter().find(|p| p.id == id).map(|p| p.title.clone())
            });
            leads.push(CandidateLead {
                room_id: room.id,
                candidate_id: candidate.id,
                candidate_name: candidate.display_name(),
                job_title,
                anchored_at: message.sent_at,
            });
        }
        Ok(leads)
    }
}

pub struct MemoryNotificationRepository(pub Arc<MemoryStore>);

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn create(&self, notification: &UnreadNotification) -> RepoResult<()> {
        let mut rows = self.0.notifications.lock().unwrap();
        // One ledger row per message
        if rows.iter().any(|n| n.message_id == notification.message_id) {
            return Ok(());
        }
        rows.push(notification.clone());
        Ok(())
    }

    async fn mark_read_for_messages(
        &self,
        message_ids: &[Snowflake],
        now: DateTime<Utc>,
    ) -> RepoResult<u64> {
        let mut rows = self.0.notifications.lock().unwrap();
        let mut changed = 0;
        for row in rows
            .iter_mut()
            .filter(|n| n.read_at.is_none() && message_ids.contains(&n.message_id))
        {
            row.mark_read(now);
            changed += 1;
        }
        Ok(changed)
    }

    async fn list_unread_for_candidate(
        &self,
        candidate_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<UnreadNotification>> {
        let mut rows: Vec<UnreadNotification> = self
            .0
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.candidate_id == candidate_id && n.read_at.is_none())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        Ok(rows)
    }

    async fn count_unread_by_type(
        &self,
        candidate_id: Snowflake,
    ) -> RepoResult<Vec<(TaskType, i64)>> {
        let mut counts: HashMap<TaskType, i64> = HashMap::new();
        for row in self
            .0
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.candidate_id == candidate_id && n.read_at.is_none())
        {
            *counts.entry(row.task_type).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }
}

pub struct MemoryApplicationRepository(pub Arc<MemoryStore>);

#[async_trait]
impl ApplicationRepository for MemoryApplicationRepository {
    async fn list_sent_for_groups(&self, group_ids: &[Snowflake]) -> RepoResult<Vec<Application>> {
        Ok(self
            .0
            .applications
            .lock()
            .unwrap()
            .iter()
            .filter(|a| {
                a.status == ApplicationStatus::Sent && group_ids.contains(&a.company_group_id)
            })
            .cloned()
            .collect())
    }

    async fn list_responded_for_groups(
        &self,
        group_ids: &[Snowflake],
    ) -> RepoResult<Vec<Application>> {
        Ok(self
            .0
            .applications
            .lock()
            .unwrap()
            .iter()
            .filter(|a| {
                a.status == ApplicationStatus::Responded && group_ids.contains(&a.company_group_id)
            })
            .cloned()
            .collect())
    }
}

pub struct MemoryJobPostingRepository(pub Arc<MemoryStore>);

#[async_trait]
impl JobPostingRepository for MemoryJobPostingRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<JobPosting>> {
        Ok(self
            .0
            .job_postings
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn count_active_for_groups(&self, group_ids: &[Snowflake]) -> RepoResult<i64> {
        Ok(self
            .0
            .job_postings
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_active() && group_ids.contains(&p.company_group_id))
            .count() as i64)
    }

    async fn titles_by_ids(&self, ids: &[Snowflake]) -> RepoResult<HashMap<Snowflake, String>> {
        Ok(self
            .0
            .job_postings
            .lock()
            .unwrap()
            .iter()
            .filter(|p| ids.contains(&p.id))
            .map(|p| (p.id, p.title.clone()))
            .collect())
    }
}

pub struct MemoryCandidateRepository(pub Arc<MemoryStore>);

#[async_trait]
impl CandidateRepository for MemoryCandidateRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Candidate>> {
        Ok(self
            .0
            .candidates
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Candidate>> {
        Ok(self
            .0
            .candidates
            .lock()
            .unwrap()
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }
}

pub struct MemoryCompanyGroupRepository(pub Arc<MemoryStore>);

#[async_trait]
impl CompanyGroupRepository for MemoryCompanyGroupRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CompanyGroup>> {
        Ok(self
            .0
            .company_groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id)
            .cloned())
    }
}

// ============================================================================
// Failure-injecting repositories
// ============================================================================

/// Notification repository whose every call fails, for exercising the
/// best-effort ledger paths
pub struct FailingNotificationRepository;

#[async_trait]
impl NotificationRepository for FailingNotificationRepository {
    async fn create(&self, _notification: &UnreadNotification) -> RepoResult<()> {
        Err(DomainError::DatabaseError("ledger unavailable".to_string()))
    }

    async fn mark_read_for_messages(
        &self,
        _message_ids: &[Snowflake],
        _now: DateTime<Utc>,
    ) -> RepoResult<u64> {
        Err(DomainError::DatabaseError("ledger unavailable".to_string()))
    }

    async fn list_unread_for_candidate(
        &self,
        _candidate_id: Snowflake,
        _limit: i64,
    ) -> RepoResult<Vec<UnreadNotification>> {
        Err(DomainError::DatabaseError("ledger unavailable".to_string()))
    }

    async fn count_unread_by_type(
        &self,
        _candidate_id: Snowflake,
    ) -> RepoResult<Vec<(TaskType, i64)>> {
        Err(DomainError::DatabaseError("ledger unavailable".to_string()))
    }
}

/// Application repository whose every call fails
pub struct FailingApplicationRepository;

#[async_trait]
impl ApplicationRepository for FailingApplicationRepository {
    async fn list_sent_for_groups(&self, _group_ids: &[Snowflake]) -> RepoResult<Vec<Application>> {
        Err(DomainError::DatabaseError("applications unavailable".to_string()))
    }

    async fn list_responded_for_groups(
        &self,
        _group_ids: &[Snowflake],
    ) -> RepoResult<Vec<Application>> {
        Err(DomainError::DatabaseError("applications unavailable".to_string()))
    }
}

/// Job posting repository whose every call fails
pub struct FailingJobPostingRepository;

#[async_trait]
impl JobPostingRepository for FailingJobPostingRepository {
    async fn find_by_id(&self, _id: Snowflake) -> RepoResult<Option<JobPosting>> {
        Err(DomainError::DatabaseError("job postings unavailable".to_string()))
    }

    async fn count_active_for_groups(&self, _group_ids: &[Snowflake]) -> RepoResult<i64> {
        Err(DomainError::DatabaseError("job postings unavailable".to_string()))
    }

    async fn titles_by_ids(&self, _ids: &[Snowflake]) -> RepoResult<HashMap<Snowflake, String>> {
        Err(DomainError::DatabaseError("job postings unavailable".to_string()))
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// Mail transport that records requests and can be told to fail
#[derive(Default)]
pub struct RecordingMailTransport {
    sent: Mutex<Vec<MailRequest>>,
    fail: AtomicBool,
}

impl RecordingMailTransport {
    pub fn sent(&self) -> Vec<MailRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(&self, request: MailRequest) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::MailError("provider rejected request".to_string()));
        }
        self.sent.lock().unwrap().push(request);
        Ok(())
    }
}

/// File storage that keeps nothing but the names it was asked to store
#[derive(Default)]
pub struct MemoryFileStorage {
    stored: Mutex<Vec<String>>,
}

impl MemoryFileStorage {
    pub fn stored(&self) -> Vec<String> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStorage for MemoryFileStorage {
    async fn store(
        &self,
        filename: &str,
        _content_type: &str,
        _bytes: &[u8],
    ) -> Result<String, DomainError> {
        let url = format!("mem://{filename}");
        self.stored.lock().unwrap().push(url.clone());
        Ok(url)
    }
}

// ============================================================================
// Test environment
// ============================================================================

/// Everything a service-level test needs
pub struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub mail: Arc<RecordingMailTransport>,
    pub storage: Arc<MemoryFileStorage>,
    pub ctx: ServiceContext,
}

fn context_builder(
    store: &Arc<MemoryStore>,
    mail: &Arc<RecordingMailTransport>,
    storage: &Arc<MemoryFileStorage>,
) -> ServiceContextBuilder {
    ServiceContextBuilder::new()
        .room_repo(Arc::new(MemoryRoomRepository(store.clone())))
        .message_repo(Arc::new(MemoryMessageRepository(store.clone())))
        .notification_repo(Arc::new(MemoryNotificationRepository(store.clone())))
        .application_repo(Arc::new(MemoryApplicationRepository(store.clone())))
        .job_posting_repo(Arc::new(MemoryJobPostingRepository(store.clone())))
        .candidate_repo(Arc::new(MemoryCandidateRepository(store.clone())))
        .company_group_repo(Arc::new(MemoryCompanyGroupRepository(store.clone())))
        .mail_transport(mail.clone())
        .file_storage(storage.clone())
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(0)))
}

/// Build a service context over fresh in-memory stores
pub fn test_env() -> TestEnv {
    let store = Arc::new(MemoryStore::default());
    let mail = Arc::new(RecordingMailTransport::default());
    let storage = Arc::new(MemoryFileStorage::default());

    let ctx = context_builder(&store, &mail, &storage)
        .build()
        .expect("context builds over in-memory repos");

    TestEnv {
        store,
        mail,
        storage,
        ctx,
    }
}

/// Like [`test_env`] but every notification ledger call fails, for
/// exercising the best-effort ledger boundary
pub fn test_env_with_failing_ledger() -> TestEnv {
    let store = Arc::new(MemoryStore::default());
    let mail = Arc::new(RecordingMailTransport::default());
    let storage = Arc::new(MemoryFileStorage::default());

    let ctx = context_builder(&store, &mail, &storage)
        .notification_repo(Arc::new(FailingNotificationRepository))
        .build()
        .expect("context builds over in-memory repos");

    TestEnv {
        store,
        mail,
        storage,
        ctx,
    }
}

/// Like [`test_env`] but the application and job posting sources fail,
/// for exercising per-source task board degradation
pub fn test_env_with_failing_board_sources() -> TestEnv {
    let store = Arc::new(MemoryStore::default());
    let mail = Arc::new(RecordingMailTransport::default());
    let storage = Arc::new(MemoryFileStorage::default());

    let ctx = context_builder(&store, &mail, &storage)
        .application_repo(Arc::new(FailingApplicationRepository))
        .job_posting_repo(Arc::new(FailingJobPostingRepository))
        .build()
        .expect("context builds over in-memory repos");

    TestEnv {
        store,
        mail,
        storage,
        ctx,
    }
}

// ============================================================================
// Entity builders
// ============================================================================

pub fn candidate(id: i64, email: &str, family: Option<&str>, given: Option<&str>) -> Candidate {
    Candidate {
        id: Snowflake::new(id),
        email: email.to_string(),
        family_name: family.map(str::to_string),
        given_name: given.map(str::to_string),
        notification_preference: None,
        created_at: Utc::now(),
    }
}

pub fn candidate_with_preference(
    id: i64,
    email: &str,
    preference: NotificationPreference,
) -> Candidate {
    Candidate {
        notification_preference: Some(preference),
        ..candidate(id, email, None, None)
    }
}

pub fn company_group(id: i64, name: &str) -> CompanyGroup {
    CompanyGroup {
        id: Snowflake::new(id),
        name: name.to_string(),
        created_at: Utc::now(),
    }
}

pub fn job_posting(id: i64, group_id: i64, title: &str, status: JobStatus) -> JobPosting {
    let now = Utc::now();
    JobPosting {
        id: Snowflake::new(id),
        company_group_id: Snowflake::new(group_id),
        title: title.to_string(),
        status,
        created_at: now,
        updated_at: now,
    }
}

pub fn application(
    id: i64,
    candidate_id: i64,
    job_posting_id: i64,
    group_id: i64,
    status: ApplicationStatus,
    hours_ago: i64,
) -> Application {
    let anchored = Utc::now() - Duration::hours(hours_ago);
    Application {
        id: Snowflake::new(id),
        candidate_id: Snowflake::new(candidate_id),
        job_posting_id: Snowflake::new(job_posting_id),
        company_group_id: Snowflake::new(group_id),
        status,
        applied_at: anchored,
        updated_at: anchored,
    }
}

pub fn room(id: i64, candidate_id: i64, group_id: i64, posting_id: Option<i64>) -> Room {
    Room::new(
        Snowflake::new(id),
        Snowflake::new(candidate_id),
        Snowflake::new(group_id),
        posting_id.map(Snowflake::new),
        Utc::now(),
    )
}

pub fn candidate_message(id: i64, room_id: i64, candidate_id: i64, hours_ago: i64) -> Message {
    Message::new(
        Snowflake::new(id),
        Snowflake::new(room_id),
        MessageSender::Candidate(Snowflake::new(candidate_id)),
        talent_core::MessageType::General,
        "ご質問があります".to_string(),
        None,
        vec![],
        Utc::now() - Duration::hours(hours_ago),
    )
}
