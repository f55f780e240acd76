//! Service context - dependency container for services
//!
//! Holds all repositories, capabilities, and other dependencies needed
//! by services. The context is storage-agnostic: it carries trait
//! objects only, so tests can build one over in-memory repositories.

use std::sync::Arc;
use std::time::Duration;

use talent_cache::TaskBoardCache;
use talent_common::MailerConfig;
use talent_core::{
    ApplicationRepository, CandidateRepository, CompanyGroupRepository, FileStorage,
    JobPostingRepository, MailTransport, MessageRepository, NotificationRepository,
    SnowflakeGenerator,
};
use talent_core::RoomRepository;

use super::dispatcher::DispatcherHandle;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all
/// services. It provides access to:
/// - Repositories
/// - External capabilities (mail transport, file storage)
/// - Snowflake generator for ID generation
/// - The notification dispatcher handle
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    room_repo: Arc<dyn RoomRepository>,
    message_repo: Arc<dyn MessageRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    job_posting_repo: Arc<dyn JobPostingRepository>,
    candidate_repo: Arc<dyn CandidateRepository>,
    company_group_repo: Arc<dyn CompanyGroupRepository>,

    // Capabilities
    mail_transport: Arc<dyn MailTransport>,
    file_storage: Arc<dyn FileStorage>,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,
    mailer_config: MailerConfig,

    // Read-side cache for task boards (optional)
    board_cache: Option<Arc<TaskBoardCache>>,

    // Outbox handle, attached after the worker is spawned
    dispatcher: Option<DispatcherHandle>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the room repository
    pub fn room_repo(&self) -> &dyn RoomRepository {
        self.room_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the unread notification ledger repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Get the application repository
    pub fn application_repo(&self) -> &dyn ApplicationRepository {
        self.application_repo.as_ref()
    }

    /// Get the job posting repository
    pub fn job_posting_repo(&self) -> &dyn JobPostingRepository {
        self.job_posting_repo.as_ref()
    }

    /// Get the candidate repository
    pub fn candidate_repo(&self) -> &dyn CandidateRepository {
        self.candidate_repo.as_ref()
    }

    /// Get the company group repository
    pub fn company_group_repo(&self) -> &dyn CompanyGroupRepository {
        self.company_group_repo.as_ref()
    }

    // === Capabilities ===

    /// Get the mail transport
    pub fn mail_transport(&self) -> &dyn MailTransport {
        self.mail_transport.as_ref()
    }

    /// Get the file storage
    pub fn file_storage(&self) -> &dyn FileStorage {
        self.file_storage.as_ref()
    }

    // === Services ===

    /// Get the mailer configuration
    pub fn mailer_config(&self) -> &MailerConfig {
        &self.mailer_config
    }

    /// Get the task board cache, if one is configured
    pub fn board_cache(&self) -> Option<&TaskBoardCache> {
        self.board_cache.as_deref()
    }

    /// Get the dispatcher handle, if one is attached
    pub fn dispatcher(&self) -> Option<&DispatcherHandle> {
        self.dispatcher.as_ref()
    }

    /// Attach the outbox dispatcher handle
    #[must_use]
    pub fn with_dispatcher(mut self, handle: DispatcherHandle) -> Self {
        self.dispatcher = Some(handle);
        self
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> talent_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("capabilities", &"...")
            .field("dispatcher", &self.dispatcher.is_some())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    room_repo: Option<Arc<dyn RoomRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    application_repo: Option<Arc<dyn ApplicationRepository>>,
    job_posting_repo: Option<Arc<dyn JobPostingRepository>>,
    candidate_repo: Option<Arc<dyn CandidateRepository>>,
    company_group_repo: Option<Arc<dyn CompanyGroupRepository>>,
    mail_transport: Option<Arc<dyn MailTransport>>,
    file_storage: Option<Arc<dyn FileStorage>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    mailer_config: Option<MailerConfig>,
    board_cache_ttl: Option<Duration>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room_repo(mut self, repo: Arc<dyn RoomRepository>) -> Self {
        self.room_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn application_repo(mut self, repo: Arc<dyn ApplicationRepository>) -> Self {
        self.application_repo = Some(repo);
        self
    }

    pub fn job_posting_repo(mut self, repo: Arc<dyn JobPostingRepository>) -> Self {
        self.job_posting_repo = Some(repo);
        self
    }

    pub fn candidate_repo(mut self, repo: Arc<dyn CandidateRepository>) -> Self {
        self.candidate_repo = Some(repo);
        self
    }

    pub fn company_group_repo(mut self, repo: Arc<dyn CompanyGroupRepository>) -> Self {
        self.company_group_repo = Some(repo);
        self
    }

    pub fn mail_transport(mut self, transport: Arc<dyn MailTransport>) -> Self {
        self.mail_transport = Some(transport);
        self
    }

    pub fn file_storage(mut self, storage: Arc<dyn FileStorage>) -> Self {
        self.file_storage = Some(storage);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn mailer_config(mut self, config: MailerConfig) -> Self {
        self.mailer_config = Some(config);
        self
    }

    /// Enable the task board cache with the given TTL
    pub fn board_cache_ttl(mut self, ttl: Duration) -> Self {
        self.board_cache_ttl = Some(ttl);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext {
            room_repo: self
                .room_repo
                .ok_or_else(|| ServiceError::validation("room_repo is required"))?,
            message_repo: self
                .message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            notification_repo: self
                .notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            application_repo: self
                .application_repo
                .ok_or_else(|| ServiceError::validation("application_repo is required"))?,
            job_posting_repo: self
                .job_posting_repo
                .ok_or_else(|| ServiceError::validation("job_posting_repo is required"))?,
            candidate_repo: self
                .candidate_repo
                .ok_or_else(|| ServiceError::validation("candidate_repo is required"))?,
            company_group_repo: self
                .company_group_repo
                .ok_or_else(|| ServiceError::validation("company_group_repo is required"))?,
            mail_transport: self
                .mail_transport
                .ok_or_else(|| ServiceError::validation("mail_transport is required"))?,
            file_storage: self
                .file_storage
                .ok_or_else(|| ServiceError::validation("file_storage is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            mailer_config: self.mailer_config.unwrap_or_else(default_mailer_config),
            board_cache: self
                .board_cache_ttl
                .map(|ttl| Arc::new(TaskBoardCache::new(ttl, 256))),
            dispatcher: None,
        })
    }
}

fn default_mailer_config() -> MailerConfig {
    MailerConfig {
        dispatch_timeout_secs: 5,
        queue_capacity: 256,
        message_template_id: "message-received".to_string(),
        room_link_base: "http://localhost:3000/rooms".to_string(),
    }
}
