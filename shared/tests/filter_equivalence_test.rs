use shared::filter::sort_by_date;
use shared::store::{MeetingStore, MemoryStore};
use shared::{MeetingRecord, SearchFilter};

fn record(id: &str, organizer: &str, date: &str, summary: &str, transcript: &str) -> MeetingRecord {
    MeetingRecord {
        id: id.to_string(),
        organizer: organizer.to_string(),
        participants: vec![],
        meeting_date: date.parse().unwrap(),
        meeting_time: "10:00".to_string(),
        recording_url: String::new(),
        transcript: transcript.to_string(),
        summary: summary.to_string(),
    }
}

fn corpus() -> Vec<MeetingRecord> {
    vec![
        record("m1", "maria.silva@empresa.com.br", "2025-05-20", "budget review", ""),
        record("m2", "roberto.almeida@empresa.com.br", "2025-05-21", "", "BUDGET follow-up"),
        record("m3", "eduardo.gomes@empresa.com.br", "2025-05-22", "design sync", ""),
        record("m4", "Maria.Souza@empresa.com.br", "2025-05-22", "100%_complete", ""),
        record("m5", "ana.oliveira@empresa.com.br", "2025-04-30", "retro", "budget leftovers"),
    ]
}

fn filters() -> Vec<SearchFilter> {
    vec![
        SearchFilter::default(),
        SearchFilter {
            query: Some("budget".to_string()),
            ..Default::default()
        },
        SearchFilter {
            query: Some("100%".to_string()),
            ..Default::default()
        },
        SearchFilter {
            organizer: Some("maria".to_string()),
            ..Default::default()
        },
        SearchFilter {
            date_from: Some("2025-05-21".parse().unwrap()),
            date_to: Some("2025-05-22".parse().unwrap()),
            ..Default::default()
        },
        SearchFilter {
            query: Some("budget".to_string()),
            organizer: Some("empresa".to_string()),
            date_from: Some("2025-05-01".parse().unwrap()),
            date_to: None,
        },
    ]
}

/// The store's filtered listing must be exactly the local predicate applied
/// to the full set, in canonical order. The in-memory store is the reference
/// every native backend has to agree with.
#[tokio::test]
async fn test_store_filtering_equals_local_predicate() {
    for filter in filters() {
        let store = MemoryStore::with_records(corpus());
        let via_store = store.list_filtered(&filter).await.unwrap();

        let mut via_predicate: Vec<MeetingRecord> = corpus()
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        sort_by_date(&mut via_predicate, true);

        assert_eq!(via_store, via_predicate, "filter: {:?}", filter);
    }
}

#[tokio::test]
async fn test_empty_filter_returns_full_set_ordered() {
    let store = MemoryStore::with_records(corpus());
    let results = store.list_filtered(&SearchFilter::default()).await.unwrap();
    assert_eq!(results.len(), corpus().len());

    // Descending dates with id breaking the 2025-05-22 tie.
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["m3", "m4", "m2", "m1", "m5"]);
}

#[tokio::test]
async fn test_wildcard_characters_match_literally() {
    let store = MemoryStore::with_records(corpus());
    let filter = SearchFilter {
        query: Some("%_".to_string()),
        ..Default::default()
    };
    let results = store.list_filtered(&filter).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "m4");
}
