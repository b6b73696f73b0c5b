use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizdeck_core::attempt::Attempt;
use quizdeck_core::grading::{percentage, score_attempt, Grade};
use quizdeck_core::model::{AnswerKey, AnswerSheet, Question, Quiz};

fn make_quiz(question_count: i64, shuffle: bool) -> Quiz {
    let questions = (1..=question_count)
        .map(|id| Question {
            id,
            text: format!("question {id}"),
            option_a: "alpha".into(),
            option_b: "beta".into(),
            option_c: "gamma".into(),
            option_d: "delta".into(),
            correct: AnswerKey::ALL[(id % 4) as usize],
            display_order: id as u32,
        })
        .collect();
    Quiz {
        id: 1,
        title: "bench".into(),
        description: String::new(),
        time_limit_minutes: 30,
        shuffle_questions: shuffle,
        questions,
    }
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    group.bench_function("from_percentage", |b| {
        b.iter(|| {
            for pct in 0..=100u8 {
                black_box(Grade::from_percentage(black_box(pct)));
            }
        })
    });

    group.bench_function("percentage", |b| {
        b.iter(|| percentage(black_box(37), black_box(50)))
    });

    group.finish();
}

fn bench_score_attempt(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_attempt");

    for &n in &[10i64, 100, 1000] {
        let quiz = make_quiz(n, false);
        let mut answers = AnswerSheet::new();
        for q in &quiz.questions {
            answers.record(q.id, AnswerKey::A);
        }
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| score_attempt(black_box(&quiz.questions), black_box(&answers)))
        });
    }

    group.finish();
}

fn bench_attempt_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("attempt_ordering");

    group.bench_function("sequential_n=100", |b| {
        b.iter(|| Attempt::new(black_box(make_quiz(100, false))))
    });

    group.bench_function("shuffled_n=100", |b| {
        b.iter(|| Attempt::new(black_box(make_quiz(100, true))))
    });

    group.finish();
}

criterion_group!(benches, bench_grade, bench_score_attempt, bench_attempt_ordering);
criterion_main!(benches);
