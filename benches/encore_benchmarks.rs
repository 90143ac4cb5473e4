//! # Encore Performance Benchmarks
//!
//! Benchmarks for the pure pieces of the recommendation pipeline. The
//! gateway is network bound and is not benchmarked here.
//!
//! ## Benchmark Categories
//!
//! - **Artist De-duplication**: first-occurrence filtering over large artist lists
//! - **Interleaving**: round-robin assembly of the final track list
//! - **Ownership Index**: index construction and membership checks
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark group
//! cargo bench dedup
//! cargo bench interleave
//! cargo bench ownership
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use encore::model::{Album, Artist, Playlist, Track};
use encore::ownership::OwnershipIndex;
use encore::recommend::{dedup_artists, interleave_available, ArtistTrackMap};
use std::hint::black_box;

fn make_artist(id: u64) -> Artist {
    Artist {
        id,
        name: format!("Artist {id:04}"),
    }
}

fn make_track(artist: &Artist, track_id: u64) -> Track {
    Track {
        id: track_id,
        title: format!("Track {track_id:05}"),
        artist: artist.clone(),
        album: Album {
            id: artist.id,
            title: format!("Album {:04}", artist.id),
        },
    }
}

/// Builds an artist list with heavy duplication, the shape the taste
/// expansion produces when playlists share artists.
fn duplicated_artists(count: usize, distinct: u64) -> Vec<Artist> {
    (0..count)
        .map(|i| make_artist((i as u64 % distinct) + 1))
        .collect()
}

/// Builds a map of `artists` columns with `tracks_each` tracks per column.
fn make_track_map(artists: u64, tracks_each: u64) -> ArtistTrackMap {
    let mut map = ArtistTrackMap::new();
    for a in 1..=artists {
        let artist = make_artist(a);
        let tracks = (0..tracks_each)
            .map(|t| make_track(&artist, a * 1000 + t))
            .collect();
        map.insert(artist, tracks);
    }
    map
}

fn benchmark_dedup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup");

    for size in [100, 1_000, 10_000].iter() {
        let artists = duplicated_artists(*size, 50);

        group.bench_with_input(BenchmarkId::new("dedup_artists", size), &artists, |b, artists| {
            b.iter_batched(
                || artists.clone(),
                |artists| dedup_artists(black_box(artists)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn benchmark_interleave(c: &mut Criterion) {
    let mut group = c.benchmark_group("interleave");

    // Even columns: every artist contributes the same number of tracks.
    for artists in [10, 100, 500].iter() {
        let map = make_track_map(*artists, 10);

        group.bench_with_input(BenchmarkId::new("even_columns", artists), &map, |b, map| {
            b.iter(|| interleave_available(black_box(map), black_box(1_000)))
        });
    }

    // Skewed columns: one deep column, the rest shallow, exercising the
    // exhausted-column skipping.
    let mut skewed = make_track_map(50, 1);
    let deep = make_artist(999);
    let deep_tracks = (0..500).map(|t| make_track(&deep, 999_000 + t)).collect();
    skewed.insert(deep, deep_tracks);

    group.bench_function("skewed_columns", |b| {
        b.iter(|| interleave_available(black_box(&skewed), black_box(550)))
    });

    group.finish();
}

fn benchmark_ownership(c: &mut Criterion) {
    let mut group = c.benchmark_group("ownership");

    let playlists: Vec<Playlist> = (1..=20)
        .map(|p| {
            let tracks = (0..100)
                .map(|t| {
                    let artist = make_artist((t % 25) + 1);
                    make_track(&artist, p * 10_000 + t)
                })
                .collect();
            Playlist {
                id: p,
                title: format!("Playlist {p}"),
                tracks,
            }
        })
        .collect();

    group.bench_function("index_from_playlists", |b| {
        b.iter(|| OwnershipIndex::from_playlists(black_box(&playlists)))
    });

    let index = OwnershipIndex::from_playlists(&playlists);
    group.bench_function("membership_check", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for artist in 1..=25u64 {
                for track in 0..100u64 {
                    if index.contains(black_box(artist), black_box(10_000 + track)) {
                        hits += 1;
                    }
                }
            }
            black_box(hits)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_dedup,
    benchmark_interleave,
    benchmark_ownership
);

criterion_main!(benches);
