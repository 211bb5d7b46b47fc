use bytes::Bytes;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use once_cell::sync::Lazy;
use cloudsign_core::{Credential, SignRequest, SigningContext};
use cloudsign_sdk_hmac::RequestSigner;

criterion_group!(benches, bench);
criterion_main!(benches);

static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("must success")
});

fn build_parts(uri: &str) -> http::request::Parts {
    http::Request::post(uri)
        .header("X-Project-Id", "project")
        .header("Content-Type", "application/json")
        .body(())
        .expect("request must be valid")
        .into_parts()
        .0
}

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("sdk_hmac");

    let s = RequestSigner::new(
        Credential::new("access_key", "secret_key"),
        SigningContext::new("eu-de", "ecs"),
    );
    let body = Bytes::from_static(br#"{"server":{"name":"bench","flavorRef":"s3.small.1"}}"#);

    group.bench_function("sign", |b| {
        b.iter(|| {
            let mut parts = build_parts("https://ecs.eu-de.example.com/v1/project/servers?limit=10&marker=");
            s.sign(&mut parts, &body, false).expect("must success")
        })
    });

    group.bench_function("sign_async", |b| {
        b.to_async(&*RUNTIME).iter(|| async {
            let mut parts = build_parts("https://ecs.eu-de.example.com/v1/project/servers?limit=10&marker=");
            s.sign_async(&mut parts, &body, false)
                .await
                .expect("must success")
        })
    });

    group.finish();
}
