use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sports_meet::{
    MeetManager, MeetSettings, SportCatalog,
    roster::{GenderGroup, Participant, ParticipantId},
    schedule::SeededShuffler,
};
use std::hint::black_box;

const SPORTS: [&str; 3] = ["Chess", "Badminton", "Carrom (2vs2)"];

/// Helper to create a meet with N registered participants spread over all groups
fn setup_meet(n_participants: i64) -> MeetManager {
    let mut meet = MeetManager::new(SportCatalog::default(), MeetSettings::default())
        .with_shuffler(SeededShuffler::new(7));

    let participants = (1..=n_participants)
        .map(|id| {
            let grade = 4 + (id % 7) as i32;
            let gender = if id % 2 == 0 {
                GenderGroup::Boys
            } else {
                GenderGroup::Girls
            };
            Participant::new(id, format!("player{id}"), grade, gender, SPORTS).unwrap()
        })
        .collect();
    meet.import_participants(participants).unwrap();

    meet
}

/// Helper to create a meet where half of every sport is already paired
fn setup_half_scheduled(n_participants: i64) -> MeetManager {
    let mut meet = setup_meet(n_participants);
    for sport in SPORTS {
        let groups = meet.group_keys(sport);
        for group in groups.iter().step_by(2) {
            let size = meet.catalog().get(sport).unwrap().players_per_match();
            let ids: Vec<ParticipantId> = meet
                .pool_for_group(sport, group)
                .iter()
                .take(size)
                .map(|p| p.id)
                .collect();
            if ids.len() == size {
                meet.create_match(sport, group, &ids).unwrap();
            }
        }
    }
    meet
}

/// Benchmark eligible pool computation against a partly scheduled meet
fn bench_eligible_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("eligible_pool");

    for n_participants in [50, 200, 1000] {
        let meet = setup_half_scheduled(n_participants);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_participants}_participants")),
            &meet,
            |b, meet| {
                b.iter(|| black_box(meet.eligible_pool("Chess")));
            },
        );
    }

    group.finish();
}

/// Benchmark group key derivation for the group picker
fn bench_group_keys(c: &mut Criterion) {
    let meet = setup_half_scheduled(500);

    c.bench_function("group_keys_500_participants", |b| {
        b.iter(|| black_box(meet.group_keys("Badminton")));
    });
}

/// Benchmark automatic pairing of a whole sport
fn bench_auto_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("auto_schedule");

    for n_participants in [50, 200, 1000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_participants}_participants")),
            &n_participants,
            |b, &n| {
                b.iter_batched(
                    || setup_meet(n),
                    |mut meet| black_box(meet.auto_schedule("Carrom (2vs2)").unwrap()),
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark the status board for one participant in a busy meet
fn bench_status_board(c: &mut Criterion) {
    let mut meet = setup_meet(500);
    for sport in SPORTS {
        meet.auto_schedule(sport).unwrap();
    }

    c.bench_function("status_board_500_participants", |b| {
        b.iter(|| black_box(meet.status_board(250).unwrap()));
    });
}

criterion_group!(eligibility, bench_eligible_pool, bench_group_keys);

criterion_group!(scheduling, bench_auto_schedule, bench_status_board);

criterion_main!(eligibility, scheduling);
