use fpl_live::fake_source::FakeSource;
use fpl_live::models::NewEntrant;
use fpl_live::new_entries::compute_new_entrants;

fn entrants(count: u32) -> Vec<NewEntrant> {
    (1..=count)
        .map(|idx| NewEntrant {
            entry_id: 500 + idx,
            entry_name: format!("Newcomer {idx}"),
            first_name: "New".to_string(),
            last_name: format!("Person{idx}"),
            joined_time: None,
        })
        .collect()
}

#[test]
fn concatenates_pages_in_order() {
    let source = FakeSource::new()
        .with_page_size(50)
        .with_new_entries(3, entrants(120));
    let merged = compute_new_entrants(&source, 3).expect("entrants should load");
    assert_eq!(merged.len(), 120);
    assert_eq!(source.new_entries_requests(), 3);
    assert_eq!(merged[0].entry_id, 501);
    assert_eq!(merged[119].entry_id, 620);
}

#[test]
fn stops_at_five_pages() {
    let source = FakeSource::new()
        .with_page_size(10)
        .with_new_entries(3, entrants(80));
    let merged = compute_new_entrants(&source, 3).expect("entrants should load");
    assert_eq!(source.new_entries_requests(), 5);
    assert_eq!(merged.len(), 50);
    assert_eq!(merged.last().map(|e| e.entry_id), Some(550));
}

#[test]
fn empty_league_makes_a_single_request() {
    let source = FakeSource::new().with_new_entries(3, Vec::new());
    let merged = compute_new_entrants(&source, 3).expect("empty list is fine");
    assert!(merged.is_empty());
    assert_eq!(source.new_entries_requests(), 1);
}

#[test]
fn unknown_league_is_an_error() {
    let source = FakeSource::new();
    let err = compute_new_entrants(&source, 99).unwrap_err();
    assert!(format!("{err:#}").contains("league 99"));
}
