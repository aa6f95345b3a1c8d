use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mysql_handbook::application::DdlGenerator;
use mysql_handbook::domain::entity::{ColumnDefinition, DataType, SchemaDefinition};

fn wide_table(columns: usize) -> Vec<ColumnDefinition> {
    (0..columns)
        .map(|i| {
            let column = ColumnDefinition::new(format!("col_{}", i), DataType::Varchar(100));
            if i == 0 {
                column.primary_key().auto_increment()
            } else {
                column.nullable()
            }
        })
        .collect()
}

fn bench_create_table(c: &mut Criterion) {
    let columns = wide_table(64);
    c.bench_function("render_create_table_64_columns", |b| {
        b.iter(|| DdlGenerator::render_create_table(black_box("wide"), black_box(&columns)))
    });
}

fn bench_schema(c: &mut Criterion) {
    let mut schema = SchemaDefinition::new();
    for t in 0..16 {
        let name = format!("table_{}", t);
        schema.add_table(name.clone()).unwrap();
        for column in wide_table(12) {
            schema.add_column(&name, column).unwrap();
        }
    }

    c.bench_function("render_schema_16_tables", |b| {
        b.iter(|| DdlGenerator::render_schema(black_box(&schema)))
    });
}

criterion_group!(benches, bench_create_table, bench_schema);
criterion_main!(benches);
