//! Benchmarks for the tokenizer and the full dispatch pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ircparse_core::state::Session;
use ircparse_core::{to_event, tokenizer};

const SIMPLE_MESSAGE: &str = "PING :irc.example.com";
const PREFIX_MESSAGE: &str = ":nick!user@host PRIVMSG #channel :Hello, world!";
const TAGGED_MESSAGE: &str = "@time=2023-01-01T00:00:00.000Z;msgid=abc123;+example/tag=value :nick!user@host PRIVMSG #channel :Hello with tags!";
const COMPLEX_TAGS: &str = "@time=2023-01-01T12:00:00Z;msgid=msg-12345;+draft/reply=parent-id;batch=batch001;account=username :nick!user@host.example.com PRIVMSG #long-channel-name :This is a longer message with more content to parse";
const NUMERIC_RESPONSE: &str = ":irc.server.net 001 nickname :Welcome to the IRC Network nickname!user@host";
const MODE_MESSAGE: &str = ":op!op@host MODE #channel +bbe mask1!*@* mask2!*@* exception!*@*";

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tokenize");
    let messages = [
        ("simple_ping", SIMPLE_MESSAGE),
        ("with_prefix", PREFIX_MESSAGE),
        ("with_tags", TAGGED_MESSAGE),
        ("complex_tags", COMPLEX_TAGS),
        ("numeric_response", NUMERIC_RESPONSE),
    ];
    for (name, raw) in messages {
        group.bench_with_input(BenchmarkId::new("tokenize", name), raw, |b, s| {
            b.iter(|| black_box(tokenizer::tokenize(black_box(s)).unwrap()))
        });
    }
    group.finish();
}

fn benchmark_to_event(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dispatch");
    let messages = [
        ("simple_ping", SIMPLE_MESSAGE),
        ("with_prefix", PREFIX_MESSAGE),
        ("with_tags", TAGGED_MESSAGE),
        ("complex_tags", COMPLEX_TAGS),
        ("numeric_response", NUMERIC_RESPONSE),
        ("mode_with_carried_exceptions", MODE_MESSAGE),
    ];
    for (name, raw) in messages {
        group.bench_with_input(BenchmarkId::new("to_event", name), raw, |b, s| {
            b.iter_batched(
                || Session::new("nyxbot^"),
                |mut session| {
                    let event = to_event(black_box(s), &mut session);
                    black_box(event)
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_tokenize, benchmark_to_event);
criterion_main!(benches);
