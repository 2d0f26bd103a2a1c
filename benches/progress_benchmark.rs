use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fitness_tracker::models::{Exercise, Workout, WorkoutStatus};
use fitness_tracker::services::progress::{aggregate_stats, weekly_progress};

fn make_completed_workout(days_ago: i64) -> Workout {
    let date = Utc::now() - Duration::days(days_ago);
    let exercises = (0..4)
        .map(|j| Exercise {
            id: format!("ex_{}", j),
            name: format!("Exercise {}", j),
            sets: 4,
            reps: 10,
            weight: 60.0 + j as f64 * 5.0,
            rest_time: 90,
            completed: true,
            completed_sets: 4,
            image: None,
        })
        .collect();

    Workout {
        id: format!("workout-{}", days_ago),
        user_id: "bench-user".to_string(),
        name: "Bench Workout".to_string(),
        date,
        status: WorkoutStatus::Completed,
        progress: 100.0,
        exercises,
        created_at: date,
    }
}

fn benchmark_progress_aggregation(c: &mut Criterion) {
    // Daily workouts over the 7-week window
    let window: Vec<Workout> = (0..49).map(make_completed_workout).collect();
    // A year of history for the all-time stats path
    let history: Vec<Workout> = (0..365).map(make_completed_workout).collect();

    let mut group = c.benchmark_group("progress_aggregation");

    group.bench_function("weekly_49_workouts", |b| {
        b.iter(|| weekly_progress(black_box(&window)))
    });

    group.bench_function("weekly_empty_history", |b| {
        b.iter(|| weekly_progress(black_box(&[])))
    });

    group.bench_function("stats_365_workouts", |b| {
        b.iter(|| aggregate_stats(black_box(&history), black_box(12)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_progress_aggregation);
criterion_main!(benches);
