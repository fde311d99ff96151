use std::sync::Arc;
use userlist_application::RecordListUseCase;
use userlist_core::notice::NoticeLevel;
use userlist_core::record::{Record, RecordId, RecordRepository};
use userlist_infrastructure::{ChannelNotifier, InMemoryRecordRepository};

#[tokio::test]
async fn test_full_screen_flow_against_in_memory_table() {
    let repository = Arc::new(InMemoryRecordRepository::with_records(vec![
        Record::new(1, "A", "M"),
        Record::new(2, "B", "F"),
    ]));
    let (notifier, mut notices) = ChannelNotifier::channel();
    let usecase = RecordListUseCase::new(repository.clone(), Arc::new(notifier));

    // Initial load
    assert_eq!(usecase.load().await.unwrap(), 2);

    // Add a user from the form
    usecase.set_draft_full_name("Ada").await;
    usecase.set_draft_gender("F").await;
    let inserted = usecase.submit_draft().await.unwrap();
    assert_eq!(inserted[0].id, RecordId::Int(3));

    // Pick a row, edit, submit
    usecase.select(&RecordId::Int(2)).await.unwrap();
    usecase.edit_selection_full_name("C").await.unwrap();
    usecase.submit_selection().await.unwrap();

    // Delete the first row
    usecase.delete(&RecordId::Int(1)).await.unwrap();

    let expected = vec![Record::new(2, "C", "F"), Record::new(3, "Ada", "F")];
    assert_eq!(usecase.records().await, expected);
    // Local cache and remote table agree
    assert_eq!(repository.list_all().await.unwrap(), expected);

    let first = notices.try_recv().unwrap();
    let second = notices.try_recv().unwrap();
    assert_eq!(first.level, NoticeLevel::Success);
    assert_eq!(second.level, NoticeLevel::Success);
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_update_of_row_deleted_elsewhere_reports_error() {
    let repository = Arc::new(InMemoryRecordRepository::with_records(vec![Record::new(
        5, "E", "M",
    )]));
    let (notifier, mut notices) = ChannelNotifier::channel();
    let usecase = RecordListUseCase::new(repository.clone(), Arc::new(notifier));
    usecase.load().await.unwrap();
    usecase.select(&RecordId::Int(5)).await.unwrap();

    // Another client removes the row behind our back
    repository.delete(&RecordId::Int(5)).await.unwrap();

    let err = usecase.submit_selection().await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(usecase.records().await, vec![Record::new(5, "E", "M")]);
    assert!(notices.try_recv().unwrap().is_error());
}
