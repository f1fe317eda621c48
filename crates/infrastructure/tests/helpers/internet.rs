use super::message::ResponseBuilder;
use super::scripted_transport::{Reply, ScriptedQuery, ScriptedTransport};
use rootwalk_domain::SelectedRoot;
use rootwalk_infrastructure::dns::{
    ContextHandle, IterativeResolver, ResolverContext, ResolverSettings, RootHints,
};
use std::sync::Arc;
use std::time::Duration;

pub const ROOT: &str = "198.41.0.4";
pub const COM_A: &str = "192.5.6.30";
pub const COM_B: &str = "192.33.14.30";
pub const NET: &str = "192.12.94.30";
pub const EXAMPLE_AUTH: &str = "199.43.135.53";
pub const DNSHOST_AUTH: &str = "203.0.113.53";
pub const DNSHOST_NS1: &str = "198.51.100.7";
pub const FAILOVER_AUTH: [&str; 4] = ["192.0.2.1", "192.0.2.2", "192.0.2.3", "192.0.2.4"];

const SERVFAIL: u8 = 2;
const NXDOMAIN: u8 = 3;
const REFUSED: u8 = 5;

fn reply(builder: ResponseBuilder) -> Reply {
    Reply::Message(builder.build())
}

fn root(q: &ScriptedQuery) -> Reply {
    let r = ResponseBuilder::reply_to(&q.bytes);
    if q.name.ends_with(".net") {
        reply(
            r.authority_ns("net", "a.gtld-servers.net")
                .additional_a("a.gtld-servers.net", NET),
        )
    } else if q.name.ends_with(".com") || q.name == "com" {
        reply(
            r.authority_ns("com", "a.gtld-servers.net")
                .authority_ns("com", "b.gtld-servers.net")
                .additional_a("a.gtld-servers.net", COM_A)
                .additional_a("b.gtld-servers.net", COM_B),
        )
    } else {
        reply(r.rcode(NXDOMAIN))
    }
}

fn com_tld(q: &ScriptedQuery) -> Reply {
    let r = ResponseBuilder::reply_to(&q.bytes);
    match q.name.as_str() {
        "broken.com" => reply(r.rcode(SERVFAIL)),
        "example.com" | "empty.com" | "refused.com" => reply(
            r.authority_ns(&q.name, "ns1.example.com")
                .additional_a("ns1.example.com", EXAMPLE_AUTH),
        ),
        "glueless.com" => reply(r.authority_ns("glueless.com", "ns1.dnshost.net")),
        "loop.com" | "ns.loop.com" => reply(r.authority_ns("loop.com", "ns.loop.com")),
        "failover.com" => {
            let mut r = r;
            for (i, ip) in FAILOVER_AUTH.iter().enumerate() {
                let ns = format!("ns{}.failover.com", i + 1);
                r = r.authority_ns("failover.com", &ns).additional_a(&ns, ip);
            }
            reply(r)
        }
        "lame.com" => reply(r),
        _ => reply(r.rcode(NXDOMAIN)),
    }
}

fn net_tld(q: &ScriptedQuery) -> Reply {
    let r = ResponseBuilder::reply_to(&q.bytes);
    match q.name.as_str() {
        "ns1.dnshost.net" => reply(
            r.authority_ns("dnshost.net", "ns.dnshost.net")
                .additional_a("ns.dnshost.net", DNSHOST_AUTH),
        ),
        _ => reply(r.rcode(NXDOMAIN)),
    }
}

/// A small delegation tree:
/// - `example.com`: glued referral, answers 93.184.216.34
/// - `glueless.com`: NS `ns1.dnshost.net` without glue
/// - `loop.com`: NS `ns.loop.com` without glue, forever
/// - `failover.com`: four glued servers, only the last one answers
/// - `empty.com`: authoritative server answers with no records
/// - `lame.com`: TLD referral with neither NS nor glue
/// - `broken.com`: both TLD servers answer SERVFAIL
/// - `refused.com`: the only authoritative server answers REFUSED
pub fn internet() -> Arc<ScriptedTransport> {
    let net = Arc::new(ScriptedTransport::new());

    net.on(ROOT, root);
    net.on(COM_A, com_tld);
    net.on(COM_B, com_tld);
    net.on(NET, net_tld);

    net.on(EXAMPLE_AUTH, |q| {
        let r = ResponseBuilder::reply_to(&q.bytes);
        match q.name.as_str() {
            "example.com" => reply(r.answer_a("93.184.216.34", 300)),
            "refused.com" => reply(r.rcode(REFUSED)),
            _ => reply(r),
        }
    });
    net.on(DNSHOST_AUTH, |q| {
        let r = ResponseBuilder::reply_to(&q.bytes);
        match q.name.as_str() {
            "ns1.dnshost.net" => reply(r.answer_a(DNSHOST_NS1, 3600)),
            _ => reply(r.rcode(NXDOMAIN)),
        }
    });
    net.on(DNSHOST_NS1, |q| {
        let r = ResponseBuilder::reply_to(&q.bytes);
        match q.name.as_str() {
            "glueless.com" => reply(r.answer_a("10.1.2.3", 120)),
            _ => reply(r.rcode(NXDOMAIN)),
        }
    });
    net.on(FAILOVER_AUTH[3], |q| {
        reply(ResponseBuilder::reply_to(&q.bytes).answer_a("10.4.4.4", 60))
    });

    net
}

pub fn root_hints() -> Arc<RootHints> {
    Arc::new(RootHints::parse(&format!("a.root-servers.net. 3600000 A {}", ROOT)).unwrap())
}

pub fn context(
    transport: Arc<ScriptedTransport>,
    settings: ResolverSettings,
    with_root: bool,
) -> ResolverContext {
    let hints = root_hints();
    let root = with_root.then(|| SelectedRoot {
        server: hints.servers()[0].clone(),
        latency: Duration::from_millis(5),
    });
    ResolverContext::new(root, hints, transport, settings)
}

pub fn resolver(transport: Arc<ScriptedTransport>) -> IterativeResolver {
    resolver_with(transport, ResolverSettings::default())
}

pub fn resolver_with(
    transport: Arc<ScriptedTransport>,
    settings: ResolverSettings,
) -> IterativeResolver {
    let handle = ContextHandle::new(context(transport, settings, true), Duration::from_millis(100));
    IterativeResolver::new(Arc::new(handle))
}
