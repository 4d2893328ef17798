use criterion::{criterion_group, criterion_main, Criterion};
use page_loader::locality::is_local;
use page_loader::naming::{derive_base_name, derive_resource_file_name};
use page_loader::{FileManager, HtmlDocument};
use std::hint::black_box;
use std::path::Path;
use tempfile::tempdir;
use url::Url;

const PAGE: &str = r#"
    <html>
        <head>
            <link rel="stylesheet" href="/style.css">
            <link rel="canonical" href="/page">
            <script src="/script.js"></script>
            <link rel="stylesheet" href="https://cdn.example.org/theme.css">
            <script src="/utils.js"></script>
        </head>
        <body>
            <img src="/logo.png" alt="Logo">
            <img src="/banner.jpg" alt="Banner">
            <a href="/about">About</a>
            <a href="/contact">Contact</a>
            <a href="/products">Products</a>
        </body>
    </html>
"#;

fn bench_find_resources(c: &mut Criterion) {
    c.bench_function("find_resources", |b| {
        b.iter(|| {
            let document = HtmlDocument::parse(black_box(PAGE));
            let _resources = document.find_resources();
        });
    });
}

fn bench_serialize(c: &mut Criterion) {
    let document = HtmlDocument::parse(PAGE);

    c.bench_function("serialize_document", |b| {
        b.iter(|| {
            let _html = black_box(&document).serialize().unwrap();
        });
    });
}

fn bench_base_names(c: &mut Criterion) {
    let urls: Vec<Url> = [
        "https://example.com/page",
        "https://ru.hexlet.io/courses?lang=en&page=2",
        "http://localhost:8080/path/with/many/segments",
        "https://example.com/",
    ]
    .iter()
    .map(|u| Url::parse(u).unwrap())
    .collect();

    c.bench_function("derive_base_names", |b| {
        b.iter(|| {
            for url in &urls {
                let _name = derive_base_name(black_box(url));
            }
        });
    });
}

fn bench_resource_names(c: &mut Criterion) {
    let page = Url::parse("https://example.com/blog/post").unwrap();
    let references = [
        "../style.css",
        "./script.js",
        "images/photo.jpg",
        "/assets/app.js?v=3",
        "https://example.com/archive.tar.gz",
        "/courses",
    ];

    c.bench_function("derive_resource_file_names", |b| {
        b.iter(|| {
            for reference in &references {
                let _name = derive_resource_file_name(black_box(reference), &page).unwrap();
            }
        });
    });
}

fn bench_locality(c: &mut Criterion) {
    let page = Url::parse("https://example.com/blog/post").unwrap();
    let references = [
        "../style.css",
        "https://cdn.example.com/style.css",
        "//cdn.example.com/script.js",
        "data:image/png;base64,AAAA",
        "/logo.png",
    ];

    c.bench_function("classify_locality", |b| {
        b.iter(|| {
            for reference in &references {
                let _local = is_local(black_box(reference), &page);
            }
        });
    });
}

fn bench_file_saving(c: &mut Criterion) {
    let temp_dir = tempdir().unwrap();
    let file_manager = FileManager::open(temp_dir.path()).unwrap();
    file_manager.create_dir("example-com-page_files").unwrap();
    let relative = Path::new("example-com-page_files").join("example-com-image.png");
    let content = vec![0u8; 16 * 1024];

    c.bench_function("save_resource_file", |b| {
        b.iter(|| {
            let _result = file_manager.save_file(&relative, black_box(&content));
        });
    });
}

criterion_group!(
    benches,
    bench_find_resources,
    bench_serialize,
    bench_base_names,
    bench_resource_names,
    bench_locality,
    bench_file_saving,
);
criterion_main!(benches);
