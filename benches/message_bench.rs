use criterion::{criterion_group, criterion_main, Criterion};
use mdns_message::message::header::Header;
use mdns_message::message::name::Name;
use mdns_message::message::question::Question;
use mdns_message::message::resource::a::AResource;
use mdns_message::message::resource::ptr::PtrResource;
use mdns_message::message::resource::srv::SrvResource;
use mdns_message::message::resource::txt::TxtResource;
use mdns_message::message::resource::Resource;
use mdns_message::message::{DnsType, Message};

fn service_msg() -> Message {
    let service = Name::new("_airplay._tcp.local.").unwrap();
    let instance = Name::new("Living Room._airplay._tcp.local.").unwrap();
    let server = Name::new("living-room.local.").unwrap();

    Message {
        header: Header {
            response: true,
            authoritative: true,
            ..Default::default()
        },
        questions: vec![Question {
            name: service.clone(),
            typ: DnsType::Ptr,
            ..Default::default()
        }],
        answers: vec![
            Resource::new(
                service.clone(),
                4500,
                PtrResource {
                    ptr: instance.clone(),
                }
                .into(),
            ),
            Resource::new(
                instance,
                120,
                SrvResource {
                    port: 7000,
                    target: server.clone(),
                    ..Default::default()
                }
                .into(),
            ),
        ],
        authorities: vec![],
        additionals: vec![
            Resource::new(
                server,
                120,
                AResource {
                    a: "10.0.1.2".parse().unwrap(),
                }
                .into(),
            ),
            Resource::new(
                service,
                4500,
                TxtResource::new([("deviceid", "58:55:CA:1A:E2:88"), ("features", "0x39f7")])
                    .into(),
            ),
        ],
    }
}

fn benchmark_message(c: &mut Criterion) {
    let msg = service_msg();
    c.bench_function("BenchmarkMessage_Pack", |b| {
        b.iter(|| {
            msg.pack().unwrap();
        })
    });

    let raw = msg.pack().unwrap();
    c.bench_function("BenchmarkMessage_Unpack", |b| {
        b.iter(|| {
            Message::unpack(&raw).unwrap();
        })
    });
}

criterion_group!(benches, benchmark_message);
criterion_main!(benches);
