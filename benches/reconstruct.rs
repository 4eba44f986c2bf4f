//! Performance benchmarks for change reconstruction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use group_reconstruct::{
    apply_change, reconstruct, ApplyConfig, GroupSnapshot, Member, MemberId, PendingMember,
    ProfileKey,
};

fn group(revision: u32, size: u128) -> GroupSnapshot {
    let mut group = GroupSnapshot::new(revision).with_title("Benchmark");
    for n in 1..=size {
        group = group.with_member(
            Member::member(MemberId::from_u128(n)).with_profile_key(ProfileKey(vec![n as u8; 32])),
        );
    }
    group
}

/// A group where one member left, one joined and one invite was accepted.
fn churned(from: &GroupSnapshot, size: u128) -> GroupSnapshot {
    let mut to = from.clone();
    to.revision += 1;
    to.members.remove(0);
    to.pending_members.clear();
    to.members.push(Member::member(MemberId::from_u128(size + 1)));
    to.members.push(Member::member(MemberId::from_u128(size + 2)));
    to
}

/// Benchmark reconstruction with varying member counts
fn bench_reconstruct(c: &mut Criterion) {
    let mut group_bench = c.benchmark_group("reconstruct");

    for size in [2u128, 150, 1_000, 5_000] {
        let from = group(1, size)
            .with_pending_member(PendingMember::new(MemberId::from_u128(size + 2)));
        let to = churned(&from, size);

        group_bench.bench_with_input(BenchmarkId::new("members", size), &size, |b, _| {
            b.iter(|| black_box(reconstruct(black_box(&from), black_box(&to))));
        });
    }

    group_bench.finish();
}

/// Benchmark reconstructing identical snapshots (the common no-op refresh)
fn bench_unchanged(c: &mut Criterion) {
    let mut group_bench = c.benchmark_group("unchanged");

    for size in [150u128, 1_000, 5_000] {
        let snapshot = group(1, size);

        group_bench.bench_with_input(BenchmarkId::new("members", size), &size, |b, _| {
            b.iter(|| black_box(reconstruct(black_box(&snapshot), black_box(&snapshot))));
        });
    }

    group_bench.finish();
}

/// Benchmark reconstruct followed by apply
fn bench_round_trip(c: &mut Criterion) {
    let mut group_bench = c.benchmark_group("round_trip");

    for size in [150u128, 1_000] {
        let from = group(1, size)
            .with_pending_member(PendingMember::new(MemberId::from_u128(size + 2)));
        let to = churned(&from, size);
        let config = ApplyConfig::default();

        group_bench.bench_with_input(BenchmarkId::new("members", size), &size, |b, _| {
            b.iter(|| {
                let change = reconstruct(&from, &to);
                black_box(apply_change(&from, &change, &config).unwrap())
            });
        });
    }

    group_bench.finish();
}

criterion_group!(benches, bench_reconstruct, bench_unchanged, bench_round_trip);
criterion_main!(benches);
