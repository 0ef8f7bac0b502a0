use std::collections::{HashMap, HashSet};

use lucky_draw::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn names(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

#[test]
fn two_out_of_three_without_exclusion() {
    init();
    let participants = names(&["Alice", "Bob", "Carol"]);
    let mut rng = StdRng::seed_from_u64(2023);
    let mut seen: HashMap<String, u32> = HashMap::new();
    for _ in 0..100 {
        let pool = resolve(&participants, &[], false);
        let winners = draw(&pool, 2, &mut rng).unwrap();
        assert_eq!(winners.len(), 2);
        assert_ne!(winners[0], winners[1]);
        for w in winners {
            assert!(participants.contains(&w));
            *seen.entry(w).or_insert(0) += 1;
        }
    }
    for p in participants.iter() {
        assert!(seen.get(p).cloned().unwrap_or(0) > 0, "{} never won", p);
    }
}

#[test]
fn exclusion_shrinks_the_pool_below_the_requested_count() {
    init();
    let mut ledger = DrawLedger::new();
    ledger.record(names(&["Alice"]), None);
    let raw = names(&["Alice", "Bob", "Carol"]);

    let pool = resolve(&raw, ledger.records(), true);
    assert_eq!(pool, names(&["Bob", "Carol"]));

    let err = validate_winner_count(3, pool.len()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    // Same thing through the session.
    let session = Session::new(SessionSettings::default())
        .with_participants(&raw)
        .with_exclude_previous_winners(true);
    let mut rng = StdRng::seed_from_u64(1);
    let (session, first) = session.draw(&mut rng).unwrap();
    let session = session
        .with_edited_draw(first.id(), &names(&["Alice"]))
        .unwrap()
        .0
        .with_winner_count(3);
    let err = session.draw(&mut rng).unwrap_err();
    assert_eq!(
        err,
        DrawError::WinnerCountExceedsPool {
            count: 3,
            pool_size: 2
        }
    );
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn edit_known_and_missing_draws() {
    init();
    let mut ledger = DrawLedger::new();
    let d1 = ledger.record(names(&["Alice", "Bob"]), None);
    assert_eq!(d1.id(), "d1");

    let edited = ledger.edit("d1", names(&["Dave"])).unwrap();
    assert_eq!(edited.winners(), &names(&["Dave"])[..]);
    assert_eq!(
        ledger.get("d1").map(|r| r.winners().to_vec()),
        Some(names(&["Dave"]))
    );

    let err = ledger.edit("missing", names(&["Dave"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn deleting_the_selected_prize() {
    init();
    let session = Session::new(SessionSettings::default())
        .with_participants(&["Alice", "Bob"])
        .with_prize(Prize {
            id: "p1".to_string(),
            name: "Gold".to_string(),
            image_url: None,
        })
        .unwrap()
        .with_selected_prize(Some("p1"))
        .unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let (session, record) = session.draw(&mut rng).unwrap();
    assert_eq!(record.prize().map(|p| p.name.as_str()), Some("Gold"));

    let session = session.without_prize("p1").unwrap();
    assert_eq!(
        resolve_selected(Some("p1"), session.catalog().prizes()),
        None
    );
    assert_eq!(session.catalog().selected_id(), None);

    // The history keeps its own copy of the prize.
    let kept = session.history().get(record.id()).unwrap();
    assert_eq!(kept.prize().map(|p| p.name.as_str()), Some("Gold"));

    // With an empty catalog the next draw has no prize.
    let (_, next) = session.draw(&mut rng).unwrap();
    assert_eq!(next.prize(), None);
}

#[test]
fn history_is_append_only() {
    init();
    let mut session = Session::new(SessionSettings::default())
        .with_participants(&["Alice", "Bob", "Carol", "Dave"]);
    let mut rng = StdRng::seed_from_u64(77);
    let mut previous: Vec<DrawRecord> = Vec::new();
    for _ in 0..4 {
        let (next, _) = session.draw(&mut rng).unwrap();
        assert_eq!(&next.history().records()[..previous.len()], &previous[..]);
        previous = next.history().records().to_vec();
        session = next;
    }
    let ids: HashSet<&str> = session.history().records().iter().map(|r| r.id()).collect();
    assert_eq!(ids.len(), 4);
}
