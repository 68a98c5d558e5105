#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use sdt::prelude::*;

const N_FLAT: usize = 2000;

/// A flat list of N_FLAT short text scalars.
fn flat_list_wire() -> String {
    let element = "@SDT/$S:5:entry";
    let items: String = std::iter::repeat(element).take(N_FLAT).collect();
    format!("@SDT/[{}:{}:{}", N_FLAT, items.chars().count(), items)
}

const N_DEEP: usize = 60;

/// A single null wrapped in N_DEEP nested lists.
fn deep_list_wire() -> String {
    let mut wire = String::from("@SDT/$0:0:");
    for _ in 0..N_DEEP {
        wire = format!("@SDT/[1:{}:{}", wire.chars().count(), wire);
    }
    wire
}

const N_RECORDS: usize = 200;

/// A context block declaring one three-key class and N_RECORDS records.
fn class_block_wire() -> String {
    let descriptors: String = ["name", "color", "category"]
        .iter()
        .map(|key| {
            let content = format!(
                ":3:key@SDT/$S:{}:{}:12:display-name@SDT/$S:{}:{}",
                key.chars().count(),
                key,
                key.chars().count(),
                key
            );
            format!("@SDT/{{:{}:{}", content.chars().count(), content)
        })
        .collect();
    let keys_list = format!("@SDT/[3:{}:{}", descriptors.chars().count(), descriptors);
    let info = format!(":4:keys{}", keys_list);
    let info_map = format!("@SDT/{{:{}:{}", info.chars().count(), info);
    let class_map = format!(":8:ClassFoo{}", info_map);
    let class_map = format!("@SDT/{{:{}:{}", class_map.chars().count(), class_map);
    let header = format!(":13:map-class-map{}", class_map);
    let header = format!("@SDT/{{:{}:{}", header.chars().count(), header);

    let record_content = ":8:ClassFoo@SDT/$S:5:Apple@SDT/$S:3:Red@SDT/$S:5:Fruit";
    let record = format!(
        "@SDT/%:{}:{}",
        record_content.chars().count(),
        record_content
    );
    let records: String = std::iter::repeat(record.as_str()).take(N_RECORDS).collect();
    let root = format!("@SDT/[{}:{}:{}", N_RECORDS, records.chars().count(), records);

    let content = format!("{}{}", header, root);
    format!("@SDT/*:{}:{}", content.chars().count(), content)
}

fn bench_flat_list(c: &mut Criterion) {
    let wire = flat_list_wire();
    c.bench_function(
        &format!(
            "Unmarshalling a {} element list of {} chars",
            N_FLAT,
            wire.chars().count()
        ),
        move |b| b.iter(|| unmarshal(black_box(&wire), UnmarshalMode::Recursive)),
    );
}

fn bench_deep_list(c: &mut Criterion) {
    let wire = deep_list_wire();
    c.bench_function(
        &format!("Unmarshalling a list nested {} levels deep", N_DEEP),
        move |b| b.iter(|| unmarshal(black_box(&wire), UnmarshalMode::Recursive)),
    );
}

fn bench_class_block(c: &mut Criterion) {
    let wire = class_block_wire();
    c.bench_function(
        &format!(
            "Unmarshalling a context block with {} records, {} chars",
            N_RECORDS,
            wire.chars().count()
        ),
        move |b| b.iter(|| unmarshal(black_box(&wire), UnmarshalMode::Recursive)),
    );
}

criterion_group!(benches, bench_flat_list, bench_deep_list, bench_class_block);
criterion_main!(benches);
