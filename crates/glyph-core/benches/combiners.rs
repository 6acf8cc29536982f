use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glyph_core::hangul::to_blocks;
use glyph_core::khipro::convert;
use glyph_core::wylie::to_unicode;
use glyph_core::{Combiner, Event};

static KHIPRO_INPUTS: &[(&str, &str)] = &[
    ("short", "bangla"),
    ("medium", "kompiutar test kf"),
    ("long", "ami banglay gan gai ami amar amike cirodin ei banglay khuNje pai"),
];

static HANGUL_INPUTS: &[(&str, &str)] = &[
    ("short", "ㅎㅏㄴㄱㅡㄹ"),
    ("medium", "ㄷㅏㄹㄱㅇㅣ ㅇㅓㅂㅅㅇㅓ"),
    ("long", "ㄷㅐㅎㅏㄴㅁㅣㄴㄱㅜㄱㅇㅡㄴ ㅁㅣㄴㅈㅜㄱㅗㅇㅎㅗㅏㄱㅜㄱㅇㅣㄷㅏ"),
];

static WYLIE_INPUTS: &[(&str, &str)] = &[
    ("short", "bod"),
    ("medium", "bsgrubs rgya dbang"),
    ("long", "bod skad kyi yi ge 'di ni bsgrubs pa'i rgyu yin/"),
];

fn bench_khipro(c: &mut Criterion) {
    let mut group = c.benchmark_group("khipro/convert");
    for &(label, text) in KHIPRO_INPUTS {
        group.bench_with_input(BenchmarkId::new(label, text.len()), &text, |b, &text| {
            b.iter(|| convert(text));
        });
    }
    group.finish();
}

fn bench_hangul(c: &mut Criterion) {
    let mut group = c.benchmark_group("hangul/to_blocks");
    for &(label, jamo) in HANGUL_INPUTS {
        group.bench_with_input(BenchmarkId::new(label, jamo.len()), &jamo, |b, &jamo| {
            b.iter(|| to_blocks(jamo, false));
        });
    }
    group.finish();
}

fn bench_wylie(c: &mut Criterion) {
    let mut group = c.benchmark_group("wylie/to_unicode");
    for &(label, wylie) in WYLIE_INPUTS {
        group.bench_with_input(BenchmarkId::new(label, wylie.len()), &wylie, |b, &wylie| {
            b.iter(|| to_unicode(wylie));
        });
    }
    group.finish();
}

/// Feedback is recomputed after every keystroke, so typing a word is
/// quadratic in its length.
fn bench_khipro_typing(c: &mut Criterion) {
    let word = "kompiutar";
    c.bench_function("khipro/typing", |b| {
        b.iter(|| {
            let mut combiner = glyph_core::khipro::BnKhiproCombiner::new(".ff");
            for ch in word.chars() {
                combiner.process_event(&[], Event::from_char(ch));
                combiner.combining_state_feedback();
            }
        });
    });
}

criterion_group!(
    benches,
    bench_khipro,
    bench_hangul,
    bench_wylie,
    bench_khipro_typing
);
criterion_main!(benches);
