use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use sushida::content::ContentRegistry;
use sushida::generator::spawner::ItemSpawner;
use sushida::keyboard::hangul::HangulComposer;
use sushida::keyboard::ime::TextInput;
use sushida::session::game::{Game, GameSettings};
use sushida::session::input::InputBuffer;

fn bench_matcher(c: &mut Criterion) {
    let target = "국립중앙박물관";
    let prefixes: Vec<String> = (0..=target.chars().count())
        .map(|n| target.chars().take(n).collect())
        .collect();

    c.bench_function("input buffer: type 7-syllable word", |b| {
        b.iter(|| {
            let mut buf = InputBuffer::default();
            for prefix in &prefixes {
                black_box(buf.update(black_box(prefix), Some(target)));
            }
        })
    });
}

fn bench_composer(c: &mut Criterion) {
    // 국립중앙박물관
    let keys = "rnrflqwnddkdqkranfrhks";

    c.bench_function("hangul composer: 22 keys", |b| {
        b.iter(|| {
            let mut composer = HangulComposer::new();
            for key in keys.chars() {
                black_box(composer.key(key));
            }
            composer.commit()
        })
    });
}

fn bench_spawner(c: &mut Criterion) {
    let content = ContentRegistry::load().unwrap();
    let course = content.course("HARD").unwrap().clone();
    let mut rng = SmallRng::seed_from_u64(7);
    let mut spawner = ItemSpawner::new();

    c.bench_function("spawner: draw item", |b| {
        b.iter(|| spawner.spawn(black_box(&course), &content, &mut rng, Duration::ZERO))
    });
}

fn bench_round(c: &mut Criterion) {
    let content = ContentRegistry::load().unwrap();

    c.bench_function("game: 120s round, word every 2s", |b| {
        b.iter(|| {
            let mut game = Game::new(
                content.clone(),
                GameSettings {
                    seed: Some(1),
                    ..GameSettings::default()
                },
            );
            game.start_game("HARD").unwrap();
            for _ in 0..60 {
                let word = game.round().unwrap().item.as_ref().unwrap().word.clone();
                game.handle_composition_end(&word);
                game.advance(Duration::from_secs(2));
            }
            game.snapshot()
        })
    });
}

criterion_group!(benches, bench_matcher, bench_composer, bench_spawner, bench_round);
criterion_main!(benches);
