//! Integration tests for eligibility and pairing
//!
//! These tests drive the meet manager through manual and automatic pairing
//! and check who remains eligible afterwards.

use sports_meet::roster::{CategoryGroup, GenderGroup, Participant, ParticipantId};
use sports_meet::schedule::{NoOpReason, ValidationError};
use sports_meet::{AutoScheduleOutcome, MeetError, MeetManager, MeetSettings, SportCatalog};

/// Helper to build a participant
fn player(id: ParticipantId, grade: i32, gender: GenderGroup, sports: &[&str]) -> Participant {
    Participant::new(id, format!("Player {id}"), grade, gender, sports.iter().copied())
        .expect("valid participant")
}

/// Helper to create a meet whose automatic pairing keeps pool order
fn ordered_meet(participants: Vec<Participant>) -> MeetManager {
    let mut meet = MeetManager::new(SportCatalog::default(), MeetSettings::default())
        .with_shuffler(|_: &mut [ParticipantId]| {});
    meet.import_participants(participants)
        .expect("participants import");
    meet
}

fn middle_boys() -> CategoryGroup {
    "Middle-Boys".parse().unwrap()
}

#[test]
fn test_chess_manual_then_auto_leaves_remainder() {
    let mut meet = ordered_meet(
        (1..=5)
            .map(|id| player(id, 6, GenderGroup::Boys, &["Chess"]))
            .collect(),
    );

    assert_eq!(meet.pool_for_group("Chess", &middle_boys()).len(), 5);

    meet.create_match("Chess", &middle_boys(), &[2, 4]).unwrap();

    let remaining: Vec<_> = meet
        .pool_for_group("Chess", &middle_boys())
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(remaining, vec![1, 3, 5]);

    // Three players make one full pair and one leftover
    let outcome = meet.auto_schedule("Chess").unwrap();
    assert_eq!(outcome.created().len(), 1);
    assert_eq!(meet.eligible_pool("Chess").len(), 1);

    let outcome = meet.auto_schedule("Chess").unwrap();
    match outcome {
        AutoScheduleOutcome::NoOp(NoOpReason::NotEnoughPlayers { leftovers, .. }) => {
            assert_eq!(leftovers[&middle_boys()], vec![5]);
        }
        other => panic!("expected a no-op, got {other:?}"),
    }
}

#[test]
fn test_remainder_below_match_size_creates_nothing() {
    let mut meet = ordered_meet(vec![player(1, 6, GenderGroup::Boys, &["Chess"])]);
    let outcome = meet.auto_schedule("Chess").unwrap();
    assert!(outcome.is_noop());
    assert!(meet.matches().is_empty());
}

#[test]
fn test_group_keys_follow_pool() {
    let mut meet = ordered_meet(vec![
        player(1, 4, GenderGroup::Girls, &["Badminton"]),
        player(2, 5, GenderGroup::Girls, &["Badminton"]),
        player(3, 9, GenderGroup::Boys, &["Badminton"]),
        player(4, 12, GenderGroup::Boys, &["Badminton"]),
    ]);

    let keys: Vec<String> = meet
        .group_keys("Badminton")
        .iter()
        .map(|g| g.to_string())
        .collect();
    assert_eq!(keys, vec!["Junior-Girls", "Senior-Boys", "Unknown-Boys"]);

    meet.create_match("Badminton", &"Junior-Girls".parse().unwrap(), &[1, 2])
        .unwrap();
    let keys: Vec<String> = meet
        .group_keys("Badminton")
        .iter()
        .map(|g| g.to_string())
        .collect();
    assert_eq!(keys, vec!["Senior-Boys", "Unknown-Boys"]);

    assert!(meet.group_keys("Football").is_empty());
}

#[test]
fn test_auto_schedule_keeps_groups_apart() {
    let mut meet = ordered_meet(vec![
        player(1, 6, GenderGroup::Boys, &["Table Tennis"]),
        player(2, 6, GenderGroup::Girls, &["Table Tennis"]),
        player(3, 7, GenderGroup::Boys, &["Table Tennis"]),
        player(4, 7, GenderGroup::Girls, &["Table Tennis"]),
        player(5, 9, GenderGroup::Girls, &["Table Tennis"]),
    ]);

    let outcome = meet.auto_schedule("Table Tennis").unwrap();
    let AutoScheduleOutcome::Scheduled(report) = outcome else {
        panic!("expected matches");
    };

    assert_eq!(report.created.len(), 2);
    for m in &report.created {
        let groups: Vec<CategoryGroup> = m
            .player_ids
            .iter()
            .map(|id| meet.roster().get(*id).unwrap().category_group())
            .collect();
        assert!(groups.iter().all(|g| *g == m.category_group));
    }
    assert_eq!(
        report.leftovers[&"Senior-Girls".parse::<CategoryGroup>().unwrap()],
        vec![5]
    );
}

#[test]
fn test_team_sport_auto_schedule_uses_four_players() {
    let mut meet = ordered_meet(
        (1..=9)
            .map(|id| player(id, 8, GenderGroup::Girls, &["Carrom (2vs2)"]))
            .collect(),
    );

    let outcome = meet.auto_schedule("Carrom (2vs2)").unwrap();
    assert_eq!(outcome.created().len(), 2);
    assert!(outcome.created().iter().all(|m| m.player_ids.len() == 4));
    assert_eq!(meet.eligible_pool("Carrom (2vs2)").len(), 1);
}

#[test]
fn test_manual_pairing_is_revalidated() {
    let mut meet = ordered_meet(vec![
        player(1, 6, GenderGroup::Boys, &["Chess"]),
        player(2, 6, GenderGroup::Boys, &["Chess"]),
        player(3, 6, GenderGroup::Boys, &["Football"]),
    ]);

    let err = meet
        .create_match("Chess", &middle_boys(), &[1, 3])
        .unwrap_err();
    assert_eq!(
        err,
        MeetError::Validation(ValidationError::IneligiblePlayer {
            player: 3,
            sport: "Chess".to_string(),
            group: "Middle-Boys".to_string(),
        })
    );
    assert!(meet.matches().is_empty());
}

#[test]
fn test_sports_are_independent() {
    let mut meet = ordered_meet(vec![
        player(1, 6, GenderGroup::Boys, &["Chess", "Carrom"]),
        player(2, 6, GenderGroup::Boys, &["Chess", "Carrom"]),
    ]);

    meet.auto_schedule("Chess").unwrap();
    assert!(meet.eligible_pool("Chess").is_empty());
    assert_eq!(meet.eligible_pool("Carrom").len(), 2);

    let outcome = meet.auto_schedule("Carrom").unwrap();
    assert_eq!(outcome.created().len(), 1);
}
