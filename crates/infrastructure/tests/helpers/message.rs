use rootwalk_infrastructure::dns::wire;
use std::net::Ipv4Addr;

/// Question name and type of a query datagram.
pub fn question_of(query: &[u8]) -> (String, u16) {
    let (name, end) = wire::decode_name(query, 12).unwrap();
    let qtype = u16::from_be_bytes([query[end], query[end + 1]]);
    (name, qtype)
}

/// Builds a response to a given query: same ID, QR set, question echoed.
pub struct ResponseBuilder {
    id: [u8; 2],
    question: Vec<u8>,
    echo_opt: bool,
    rcode: u8,
    answers: Vec<Vec<u8>>,
    authority: Vec<Vec<u8>>,
    additional: Vec<Vec<u8>>,
}

impl ResponseBuilder {
    pub fn reply_to(query: &[u8]) -> Self {
        let question_end = wire::answer_start(query).unwrap();
        let arcount = u16::from_be_bytes([query[10], query[11]]);
        Self {
            id: [query[0], query[1]],
            question: query[12..question_end].to_vec(),
            echo_opt: arcount > 0,
            rcode: 0,
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.rcode = rcode;
        self
    }

    /// A record owned by the question name (compressed as 0xC00C).
    pub fn answer_a(mut self, ip: &str, ttl: u32) -> Self {
        self.answers
            .push(record(&[0xC0, 0x0C], 1, ttl, &ipv4(ip).octets()));
        self
    }

    pub fn answer_raw(mut self, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.answers.push(record(&[0xC0, 0x0C], rtype, ttl, rdata));
        self
    }

    pub fn authority_ns(mut self, zone: &str, nameserver: &str) -> Self {
        let owner = wire::encode_name(zone).unwrap();
        let rdata = wire::encode_name(nameserver).unwrap();
        self.authority.push(record(&owner, 2, 172800, &rdata));
        self
    }

    pub fn additional_a(mut self, name: &str, ip: &str) -> Self {
        let owner = wire::encode_name(name).unwrap();
        self.additional
            .push(record(&owner, 1, 172800, &ipv4(ip).octets()));
        self
    }

    pub fn additional_aaaa(mut self, name: &str) -> Self {
        let owner = wire::encode_name(name).unwrap();
        self.additional.push(record(&owner, 28, 172800, &[0x20; 16]));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let arcount = self.additional.len() + usize::from(self.echo_opt);

        let mut msg = Vec::with_capacity(512);
        msg.extend_from_slice(&self.id);
        msg.extend_from_slice(&(0x8000u16 | u16::from(self.rcode)).to_be_bytes());
        msg.extend_from_slice(&1u16.to_be_bytes());
        msg.extend_from_slice(&(self.answers.len() as u16).to_be_bytes());
        msg.extend_from_slice(&(self.authority.len() as u16).to_be_bytes());
        msg.extend_from_slice(&(arcount as u16).to_be_bytes());
        msg.extend_from_slice(&self.question);

        for rr in self
            .answers
            .iter()
            .chain(&self.authority)
            .chain(&self.additional)
        {
            msg.extend_from_slice(rr);
        }
        if self.echo_opt {
            msg.extend_from_slice(&[0x00, 0x00, 0x29, 0x04, 0xD0, 0, 0, 0, 0, 0, 0]);
        }
        msg
    }
}

fn ipv4(ip: &str) -> Ipv4Addr {
    ip.parse().unwrap()
}

fn record(owner: &[u8], rtype: u16, ttl: u32, rdata: &[u8]) -> Vec<u8> {
    let mut rr = owner.to_vec();
    rr.extend_from_slice(&rtype.to_be_bytes());
    rr.extend_from_slice(&1u16.to_be_bytes());
    rr.extend_from_slice(&ttl.to_be_bytes());
    rr.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    rr.extend_from_slice(rdata);
    rr
}
