use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uuid::Uuid;

use content_classifier::Taxonomy;
use content_discovery::{DiscoveryEngine, SearchFilters, SearchQuery, SortBy};
use content_model::{ContentItem, ContentTag, TagSource};

const CATEGORIES: &[&str] = &["quran", "hadith", "fiqh", "seerah", "finance"];

fn build_engine(size: usize) -> DiscoveryEngine {
    let mut engine = DiscoveryEngine::new(Taxonomy::builtin());
    for i in 0..size {
        let category = CATEGORIES[i % CATEGORIES.len()];
        let mut item = ContentItem::new(
            format!("Lecture {i} on {category}"),
            format!("Lecture notes number {i} covering {category} topics in detail"),
            format!("Author {}", i % 20),
            category,
        );
        item.quality_score = (i % 100) as f32;
        item.engagement.views = (i * 7 % 1000) as u32;
        item.tags = vec![ContentTag::new(
            format!("tag-{}", i % 30),
            category,
            TagSource::Auto,
        )];
        engine.add_content(item);
    }
    engine
}

fn bench_search_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1000, 10_000] {
        let mut engine = build_engine(size);
        let query = SearchQuery {
            text: Some("lecture notes".to_string()),
            filters: SearchFilters {
                categories: vec!["quran".to_string(), "fiqh".to_string()],
                min_quality: Some(20.0),
                ..Default::default()
            },
            sort_by: SortBy::Quality,
            ..Default::default()
        };

        group.bench_function(format!("filtered_text_{size}_items"), |b| {
            b.iter(|| black_box(engine.search(black_box(&query))));
        });

        let unfiltered = SearchQuery::default();
        group.bench_function(format!("list_all_{size}_items"), |b| {
            b.iter(|| black_box(engine.search(black_box(&unfiltered))));
        });
    }

    group.finish();
}

fn bench_recommendations(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommendations");

    for size in [100, 1000, 10_000] {
        let engine = build_engine(size);
        let seed = engine.trending_content(None, 1)[0].id;

        group.bench_function(format!("trending_{size}_items"), |b| {
            b.iter(|| black_box(engine.trending_content(None, 20)));
        });
        group.bench_function(format!("similar_{size}_items"), |b| {
            b.iter(|| black_box(engine.similar_content(black_box(seed), 20)));
        });
        group.bench_function(format!("personalized_{size}_items"), |b| {
            b.iter(|| black_box(engine.personalized_recommendations(Uuid::nil(), 20)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search_pipeline, bench_recommendations);
criterion_main!(benches);
