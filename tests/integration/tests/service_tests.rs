//! Service-level integration tests
//!
//! Exercises the messaging, notification, and task derivation flows end
//! to end over in-memory repositories.
//!
//! Run with: cargo test -p integration-tests --test service_tests

use base64::Engine;
use chrono::{Duration, Utc};

use integration_tests::*;
use talent_core::{
    ApplicationStatus, CallerIdentity, DomainError, JobStatus, MessageQuery, MessageType,
    NotificationPreference, Snowflake,
};
use talent_service::{
    AttachmentPayload, MessageService, NotificationDispatcher, RoomService, SendMessageRequest,
    ServiceError, StartConversationRequest, TaskService,
};

fn candidate_caller(id: i64) -> CallerIdentity {
    CallerIdentity::Candidate {
        candidate_id: Snowflake::new(id),
    }
}

fn company_caller(user_id: i64, group_ids: &[i64]) -> CallerIdentity {
    CallerIdentity::CompanyUser {
        company_user_id: Snowflake::new(user_id),
        group_ids: group_ids.iter().copied().map(Snowflake::new).collect(),
    }
}

fn message_request(content: &str, message_type: MessageType) -> SendMessageRequest {
    SendMessageRequest {
        content: content.to_string(),
        subject: None,
        message_type,
        attachments: vec![],
    }
}

// ============================================================================
// Sending and read state
// ============================================================================

#[tokio::test]
async fn test_candidate_send_creates_sent_message_without_ledger() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", Some("山田"), Some("太郎")));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));

    let service = MessageService::new(&env.ctx);
    let sent = service
        .send_to_room(
            &candidate_caller(1),
            Snowflake::new(100),
            message_request("ご質問があります", MessageType::General),
        )
        .await
        .unwrap();

    assert_eq!(sent.status, "SENT");
    assert!(sent.read_at.is_none());
    assert_eq!(sent.sender_type, "CANDIDATE");

    // Candidate-authored messages never produce ledger rows
    assert!(env.store.notifications.lock().unwrap().is_empty());

    // The company side sees it as unread
    let rooms = RoomService::new(&env.ctx)
        .list_rooms(&company_caller(5, &[10]))
        .await
        .unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].unread_count, 1);
}

#[tokio::test]
async fn test_company_send_creates_ledger_row_and_dispatch_job() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", Some("山田"), Some("太郎")));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));

    let (handle, mut rx) = NotificationDispatcher::channel(8);
    let ctx = env.ctx.clone().with_dispatcher(handle);

    let service = MessageService::new(&ctx);
    let sent = service
        .send_to_room(
            &company_caller(5, &[10]),
            Snowflake::new(100),
            message_request("カジュアル面談のご案内", MessageType::Scout),
        )
        .await
        .unwrap();

    // Ledger row mirrors the message type
    let notifications = env.store.notifications.lock().unwrap().clone();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].task_type.as_str(), "SCOUT_MESSAGE_UNREAD");
    assert_eq!(notifications[0].message_id.to_string(), sent.id);
    assert!(notifications[0].read_at.is_none());

    // The sender was recorded as a room participant
    let rooms = env.store.rooms.lock().unwrap().clone();
    assert_eq!(rooms[0].participant_company_users, vec![Snowflake::new(5)]);

    // A dispatch job was queued without blocking the send
    let job = rx.try_recv().expect("job queued");
    assert_eq!(job.candidate_id, Snowflake::new(1));
    assert_eq!(job.room_id, Snowflake::new(100));

    // Draining the job sends exactly one templated mail
    let dispatcher = NotificationDispatcher::new(env.ctx.clone());
    dispatcher.dispatch(&job).await.unwrap();
    let mails = env.mail.sent();
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].to, "taro@example.com");
    assert_eq!(mails[0].variables["recipient_name"], "山田 太郎");
    assert_eq!(mails[0].variables["company_name"], "Acme");
    assert_eq!(mails[0].variables["message_preview"], "カジュアル面談のご案内");
    assert!(mails[0].variables["room_url"].ends_with("/100"));

    // A redelivered job is deduplicated
    dispatcher.dispatch(&job).await.unwrap();
    assert_eq!(env.mail.sent().len(), 1);
}

#[tokio::test]
async fn test_mark_read_flips_only_counterpart_and_is_idempotent() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", None, None));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));

    let candidate_id = candidate_caller(1);
    let company = company_caller(5, &[10]);
    let service = MessageService::new(&env.ctx);

    service
        .send_to_room(&candidate_id, Snowflake::new(100), message_request("A", MessageType::General))
        .await
        .unwrap();
    service
        .send_to_room(&company, Snowflake::new(100), message_request("B", MessageType::General))
        .await
        .unwrap();

    // Candidate reads the room: only the company message flips
    let marked = service
        .mark_room_read(&candidate_id, Snowflake::new(100))
        .await
        .unwrap();
    assert_eq!(marked.messages_marked, 1);

    let messages = service
        .list_messages(&candidate_id, Snowflake::new(100), &MessageQuery::latest(50))
        .await
        .unwrap();
    for message in &messages {
        match message.sender_type.as_str() {
            "CANDIDATE" => {
                assert_eq!(message.status, "SENT");
                assert!(message.read_at.is_none());
            }
            _ => {
                assert_eq!(message.status, "READ");
                assert!(message.read_at.is_some());
            }
        }
    }

    // The ledger row was settled alongside
    let notifications = env.store.notifications.lock().unwrap().clone();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].read_at.is_some());

    // A second read finds nothing left to flip
    let marked = service
        .mark_room_read(&candidate_id, Snowflake::new(100))
        .await
        .unwrap();
    assert_eq!(marked.messages_marked, 0);
}

#[tokio::test]
async fn test_listing_never_changes_read_state() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", None, None));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));

    let service = MessageService::new(&env.ctx);
    service
        .send_to_room(
            &candidate_caller(1),
            Snowflake::new(100),
            message_request("hello", MessageType::General),
        )
        .await
        .unwrap();

    // The company lists the room twice; the message stays unread
    let company = company_caller(5, &[10]);
    for _ in 0..2 {
        let messages = service
            .list_messages(&company, Snowflake::new(100), &MessageQuery::latest(50))
            .await
            .unwrap();
        assert_eq!(messages[0].status, "SENT");
    }
}

#[tokio::test]
async fn test_start_conversation_creates_room_lazily_and_reuses_it() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", None, None));
    env.store.add_company_group(company_group(10, "Acme"));

    let service = MessageService::new(&env.ctx);
    let request = || StartConversationRequest {
        counterpart_id: "10".to_string(),
        related_job_posting_id: None,
        message: message_request("はじめまして", MessageType::Application),
    };

    let first = service
        .start_conversation(&candidate_caller(1), request())
        .await
        .unwrap();
    let second = service
        .start_conversation(&candidate_caller(1), request())
        .await
        .unwrap();

    // Same triple, same room
    assert_eq!(first.room_id, second.room_id);
    assert_eq!(env.store.rooms.lock().unwrap().len(), 1);
    assert_eq!(env.store.messages.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_start_conversation_rejects_unknown_counterpart() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", None, None));

    let service = MessageService::new(&env.ctx);
    let err = service
        .start_conversation(
            &candidate_caller(1),
            StartConversationRequest {
                counterpart_id: "999".to_string(),
                related_job_posting_id: None,
                message: message_request("hi", MessageType::General),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::CompanyGroupNotFound(_))
    ));
    assert!(env.store.rooms.lock().unwrap().is_empty());
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn test_room_access_is_identity_scoped() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", None, None));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));

    let service = MessageService::new(&env.ctx);

    // A different candidate is not a participant
    let err = service
        .list_messages(&candidate_caller(2), Snowflake::new(100), &MessageQuery::latest(10))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotRoomParticipant)
    ));

    // A company user without the room's group lacks permission
    let err = service
        .list_messages(&company_caller(5, &[99]), Snowflake::new(100), &MessageQuery::latest(10))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::MissingGroupPermission(_))
    ));
    assert_eq!(err.status_code(), 403);
}

// ============================================================================
// Attachments
// ============================================================================

#[tokio::test]
async fn test_oversized_attachment_rejected_before_any_write() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", None, None));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));

    let data = base64::engine::general_purpose::STANDARD.encode(vec![0u8; 6 * 1024 * 1024]);
    let request = SendMessageRequest {
        content: "履歴書を添付します".to_string(),
        subject: None,
        message_type: MessageType::Application,
        attachments: vec![AttachmentPayload {
            filename: "resume.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data,
        }],
    };

    let err = MessageService::new(&env.ctx)
        .send_to_room(&candidate_caller(1), Snowflake::new(100), request)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::AttachmentTooLarge { .. })
    ));

    // Nothing was stored and no message row was written
    assert!(env.storage.stored().is_empty());
    assert!(env.store.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unsupported_attachment_type_rejected() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", None, None));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));

    let request = SendMessageRequest {
        content: "archive".to_string(),
        subject: None,
        message_type: MessageType::General,
        attachments: vec![AttachmentPayload {
            filename: "files.zip".to_string(),
            content_type: "application/zip".to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(b"zipzip"),
        }],
    };

    let err = MessageService::new(&env.ctx)
        .send_to_room(&candidate_caller(1), Snowflake::new(100), request)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::UnsupportedAttachmentType(_))
    ));
    assert!(env.store.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_valid_attachment_stored_and_linked() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", None, None));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));

    let request = SendMessageRequest {
        content: "職務経歴書です".to_string(),
        subject: Some("応募書類".to_string()),
        message_type: MessageType::Application,
        attachments: vec![AttachmentPayload {
            filename: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(b"pdf bytes"),
        }],
    };

    let sent = MessageService::new(&env.ctx)
        .send_to_room(&candidate_caller(1), Snowflake::new(100), request)
        .await
        .unwrap();
    assert_eq!(sent.file_urls, vec!["mem://cv.pdf".to_string()]);
    assert_eq!(env.storage.stored().len(), 1);
}

// ============================================================================
// Mail dispatch
// ============================================================================

#[tokio::test]
async fn test_opted_out_candidate_gets_no_mail() {
    let env = test_env();
    env.store.add_candidate(candidate_with_preference(
        1,
        "taro@example.com",
        NotificationPreference::NotReceive,
    ));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));

    let (handle, mut rx) = NotificationDispatcher::channel(8);
    let ctx = env.ctx.clone().with_dispatcher(handle);

    MessageService::new(&ctx)
        .send_to_room(
            &company_caller(5, &[10]),
            Snowflake::new(100),
            message_request("お知らせ", MessageType::General),
        )
        .await
        .unwrap();

    let job = rx.try_recv().expect("job queued");
    NotificationDispatcher::new(env.ctx.clone())
        .dispatch(&job)
        .await
        .unwrap();

    // Preference gate: dispatch succeeds but nothing is sent
    assert!(env.mail.sent().is_empty());
    // The ledger row still exists; only mail is gated
    assert_eq!(env.store.notifications.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_mail_failure_never_fails_the_send_path() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", None, None));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));
    env.mail.set_fail(true);

    let (handle, mut rx) = NotificationDispatcher::channel(8);
    let ctx = env.ctx.clone().with_dispatcher(handle);

    // The send itself succeeds regardless of the mail provider
    let sent = MessageService::new(&ctx)
        .send_to_room(
            &company_caller(5, &[10]),
            Snowflake::new(100),
            message_request("お知らせ", MessageType::General),
        )
        .await
        .unwrap();
    assert_eq!(sent.status, "SENT");
    assert_eq!(env.store.messages.lock().unwrap().len(), 1);

    // The queued dispatch surfaces the provider error to the worker only
    let job = rx.try_recv().expect("job queued");
    let err = NotificationDispatcher::new(env.ctx.clone())
        .dispatch(&job)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MailError(_)));
}

// ============================================================================
// Best-effort boundaries
// ============================================================================

#[tokio::test]
async fn test_ledger_failure_does_not_fail_the_send() {
    let env = test_env_with_failing_ledger();
    env.store.add_candidate(candidate(1, "taro@example.com", None, None));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));

    let service = MessageService::new(&env.ctx);
    let sent = service
        .send_to_room(
            &company_caller(5, &[10]),
            Snowflake::new(100),
            message_request("お知らせ", MessageType::General),
        )
        .await
        .unwrap();

    // The message write went through; only the ledger row is missing
    assert_eq!(sent.status, "SENT");
    assert_eq!(env.store.messages.lock().unwrap().len(), 1);

    // Settling the ledger on read is best-effort too
    let marked = service
        .mark_room_read(&candidate_caller(1), Snowflake::new(100))
        .await
        .unwrap();
    assert_eq!(marked.messages_marked, 1);
}

#[tokio::test]
async fn test_unread_summary_degrades_when_ledger_unavailable() {
    let env = test_env_with_failing_ledger();
    let summary = TaskService::new(&env.ctx)
        .candidate_unread_summary(&candidate_caller(1))
        .await
        .unwrap();
    assert!(summary.totals.is_empty());
    assert!(summary.recent.is_empty());
}

#[tokio::test]
async fn test_board_sources_degrade_independently() {
    let env = test_env_with_failing_board_sources();
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_candidate(candidate(1, "a@example.com", Some("佐藤"), None));
    env.store.add_room(room(100, 1, 10, None));
    env.store.add_message(candidate_message(301, 100, 1, 1));
    env.store.add_message(candidate_message(302, 100, 1, 49));

    // Applications and postings error out; the board still serves the
    // message buckets from the healthy source
    let board = TaskService::new(&env.ctx)
        .company_task_board(&company_caller(5, &[10]))
        .await
        .unwrap();

    assert_eq!(board.new_messages.entries.len(), 1);
    assert_eq!(board.new_messages.entries[0].candidate_name, "佐藤");
    assert_eq!(board.overdue_messages.entries.len(), 1);

    assert!(!board.new_applications.active);
    assert!(!board.overdue_applications.active);
    assert!(!board.unregistered_interview_results.active);
    assert!(!board.no_job_postings.active);
}

// ============================================================================
// Task derivation
// ============================================================================

#[tokio::test]
async fn test_board_with_no_postings_flags_only_that_bucket() {
    let env = test_env();
    let board = TaskService::new(&env.ctx)
        .company_task_board(&company_caller(5, &[10]))
        .await
        .unwrap();

    assert!(board.no_job_postings.active);
    assert!(!board.new_applications.active);
    assert!(!board.overdue_applications.active);
    assert!(!board.new_messages.active);
    assert!(!board.overdue_messages.active);
    assert!(!board.unregistered_interview_results.active);

    assert_eq!(board.no_job_postings.kind, "NO_JOB_POSTINGS");
    assert_eq!(board.new_applications.kind, "NEW_APPLICATION");
    assert_eq!(
        board.unregistered_interview_results.kind,
        "UNREGISTERED_INTERVIEW_RESULT"
    );
}

#[tokio::test]
async fn test_board_age_buckets_and_dead_zone() {
    let env = test_env();
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_job_posting(job_posting(20, 10, "Backend Engineer", JobStatus::Published));
    env.store.add_candidate(candidate(1, "a@example.com", Some("佐藤"), None));
    env.store.add_candidate(candidate(2, "b@example.com", Some("鈴木"), None));
    env.store.add_candidate(candidate(3, "c@example.com", Some("高橋"), None));

    // 1h old: new. 30h old: dead zone, surfaces nowhere. 50h old: overdue.
    env.store.add_application(application(201, 1, 20, 10, ApplicationStatus::Sent, 1));
    env.store.add_application(application(202, 2, 20, 10, ApplicationStatus::Sent, 30));
    env.store.add_application(application(203, 3, 20, 10, ApplicationStatus::Sent, 50));

    // Responded 73h ago: interview result overdue. 71h: not yet.
    env.store.add_application(application(204, 1, 20, 10, ApplicationStatus::Responded, 73));
    env.store.add_application(application(205, 2, 20, 10, ApplicationStatus::Responded, 71));

    // Candidate messages: 1h new, 49h overdue
    env.store.add_room(room(100, 1, 10, Some(20)));
    env.store.add_message(candidate_message(301, 100, 1, 1));
    env.store.add_message(candidate_message(302, 100, 1, 49));

    let board = TaskService::new(&env.ctx)
        .company_task_board(&company_caller(5, &[10]))
        .await
        .unwrap();

    assert!(!board.no_job_postings.active);

    assert_eq!(board.new_applications.entries.len(), 1);
    assert_eq!(board.new_applications.entries[0].candidate_name, "佐藤");
    assert_eq!(
        board.new_applications.entries[0].job_title.as_deref(),
        Some("Backend Engineer")
    );

    assert_eq!(board.overdue_applications.entries.len(), 1);
    assert_eq!(board.overdue_applications.entries[0].candidate_name, "高橋");

    assert_eq!(board.unregistered_interview_results.entries.len(), 1);
    assert_eq!(
        board.unregistered_interview_results.entries[0].candidate_name,
        "佐藤"
    );

    assert_eq!(board.new_messages.entries.len(), 1);
    assert_eq!(board.overdue_messages.entries.len(), 1);
    assert_eq!(board.overdue_messages.entries[0].candidate_name, "佐藤");
}

#[tokio::test]
async fn test_board_buckets_are_capped_and_ordered() {
    let env = test_env();
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_job_posting(job_posting(20, 10, "Backend Engineer", JobStatus::Published));

    // Seven fresh applications, minutes apart
    for i in 0..7 {
        env.store.add_candidate(candidate(i, &format!("c{i}@example.com"), None, None));
        let mut app = application(300 + i, i, 20, 10, ApplicationStatus::Sent, 0);
        app.applied_at = Utc::now() - Duration::minutes(i * 10);
        env.store.add_application(app);
    }

    let board = TaskService::new(&env.ctx)
        .company_task_board(&company_caller(5, &[10]))
        .await
        .unwrap();

    assert!(board.new_applications.active);
    assert_eq!(board.new_applications.entries.len(), 5);
    // Newest first
    assert_eq!(board.new_applications.entries[0].candidate_name, "c0");
    assert_eq!(board.new_applications.entries[4].candidate_name, "c4");
}

#[tokio::test]
async fn test_board_requires_company_identity() {
    let env = test_env();
    let err = TaskService::new(&env.ctx)
        .company_task_board(&candidate_caller(1))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
}

// ============================================================================
// Candidate unread summary
// ============================================================================

#[tokio::test]
async fn test_unread_summary_counts_by_type_and_limits_recent() {
    let env = test_env();
    env.store.add_candidate(candidate(1, "taro@example.com", None, None));
    env.store.add_company_group(company_group(10, "Acme"));
    env.store.add_room(room(100, 1, 10, None));

    let service = MessageService::new(&env.ctx);
    let company = company_caller(5, &[10]);
    for i in 0..6 {
        let message_type = if i < 2 {
            MessageType::Scout
        } else {
            MessageType::General
        };
        service
            .send_to_room(&company, Snowflake::new(100), message_request("msg", message_type))
            .await
            .unwrap();
    }

    let summary = TaskService::new(&env.ctx)
        .candidate_unread_summary(&candidate_caller(1))
        .await
        .unwrap();

    let mut totals: Vec<(String, i64)> = summary
        .totals
        .iter()
        .map(|t| (t.task_type.clone(), t.count))
        .collect();
    totals.sort();
    assert_eq!(
        totals,
        vec![
            ("GENERAL_MESSAGE_UNREAD".to_string(), 4),
            ("SCOUT_MESSAGE_UNREAD".to_string(), 2),
        ]
    );
    assert_eq!(summary.recent.len(), 5);

    // Reading the room clears the summary
    service
        .mark_room_read(&candidate_caller(1), Snowflake::new(100))
        .await
        .unwrap();
    let summary = TaskService::new(&env.ctx)
        .candidate_unread_summary(&candidate_caller(1))
        .await
        .unwrap();
    assert!(summary.totals.is_empty());
    assert!(summary.recent.is_empty());
}
