use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use xmlscan::{analyse, decode, scan, EventTrie};

const EMPLOYEES: usize = 5_000;

fn make_company(count: usize) -> String {
    let mut xml = String::with_capacity(count * 200);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<company>\n  <employees>\n");
    for i in 0..count {
        xml.push_str(&format!(
            "    <employee id=\"{i}\" active=\"true\">\n      <name>Employee &#x{:X};{i}</name>\n      <position>Engineer &amp; Lead</position>\n      <notes><![CDATA[<raw> {i}]]></notes>\n    </employee>\n",
            0x41 + (i % 26),
        ));
    }
    xml.push_str("  </employees>\n</company>\n");
    xml
}

fn bench_scan_no_handlers(c: &mut Criterion) {
    let input = make_company(EMPLOYEES);
    let trie: EventTrie<()> = EventTrie::new();
    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("no_handlers", |b| {
        b.iter(|| scan(black_box(&input), &trie, &mut ()).unwrap());
    });
    group.finish();
}

fn bench_scan_targeted(c: &mut Criterion) {
    let input = make_company(EMPLOYEES);
    let mut trie: EventTrie<usize> = EventTrie::new();
    let name = trie.add_element(trie.root(), "company/employees/employee/name");
    trie[name].on_text(|total, text| {
        *total += text.len();
        Ok(())
    });
    trie.add_attribute_event(trie.root(), "company/employees/employee", "id", |total, value| {
        *total += value.len();
        Ok(())
    });

    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("targeted", |b| {
        b.iter(|| {
            let mut total = 0;
            scan(black_box(&input), &trie, &mut total).unwrap();
            black_box(total)
        });
    });
    group.finish();
}

fn bench_analyse(c: &mut Criterion) {
    let input = make_company(EMPLOYEES);
    let mut group = c.benchmark_group("analyse");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("company", |b| {
        b.iter(|| black_box(analyse(black_box(&input)).unwrap()));
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let plain = "Engineer and Lead ".repeat(64);
    let escaped = "Engineer &amp; Lead &#x41; ".repeat(64);
    c.bench_function("decode_plain", |b| b.iter(|| black_box(decode(black_box(&plain)))));
    c.bench_function("decode_escaped", |b| b.iter(|| black_box(decode(black_box(&escaped)))));
}

criterion_group!(
    benches,
    bench_scan_no_handlers,
    bench_scan_targeted,
    bench_analyse,
    bench_decode
);
criterion_main!(benches);
