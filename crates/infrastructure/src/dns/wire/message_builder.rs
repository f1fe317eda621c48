use rootwalk_domain::{DomainError, RecordClass, RecordType};

/// UDP payload size advertised in the OPT pseudo-record.
pub const DEFAULT_EDNS_PAYLOAD_SIZE: u16 = 4096;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 253;

/// Encodes a dotted name as length-prefixed labels ending in the root label.
///
/// A single trailing dot is accepted; `""` and `"."` encode the root.
pub fn encode_name(domain: &str) -> Result<Vec<u8>, DomainError> {
    let name = domain.strip_suffix('.').unwrap_or(domain);
    if name.is_empty() {
        return Ok(vec![0]);
    }

    if name.len() > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "{} exceeds {} characters",
            domain, MAX_NAME_LEN
        )));
    }
    if !name.is_ascii() {
        return Err(DomainError::InvalidDomainName(format!(
            "{} contains non-ASCII characters",
            domain
        )));
    }

    let mut out = Vec::with_capacity(name.len() + 2);
    for label in name.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "{} contains an empty label",
                domain
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "label {} exceeds {} characters",
                label, MAX_LABEL_LEN
            )));
        }
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    Ok(out)
}

/// Builds a query with a fresh random ID and the default EDNS payload size.
pub fn encode_query(
    domain: &str,
    qtype: RecordType,
    qclass: RecordClass,
    use_edns: bool,
) -> Result<Vec<u8>, DomainError> {
    let edns = use_edns.then_some(DEFAULT_EDNS_PAYLOAD_SIZE);
    encode_query_with_id(domain, qtype, qclass, edns).map(|(_, bytes)| bytes)
}

/// Like [`encode_query`] but returns the ID placed in the header, so the
/// caller can match the response against it.
pub fn encode_query_with_id(
    domain: &str,
    qtype: RecordType,
    qclass: RecordClass,
    edns_payload: Option<u16>,
) -> Result<(u16, Vec<u8>), DomainError> {
    let id = fastrand::u16(..);
    let bytes = encode_query_as(id, domain, qtype, qclass, edns_payload)?;
    Ok((id, bytes))
}

/// Builds an iterative query (RD clear) with an explicit ID.
pub fn encode_query_as(
    id: u16,
    domain: &str,
    qtype: RecordType,
    qclass: RecordClass,
    edns_payload: Option<u16>,
) -> Result<Vec<u8>, DomainError> {
    let qname = encode_name(domain)?;
    let arcount: u16 = if edns_payload.is_some() { 1 } else { 0 };

    let mut msg = Vec::with_capacity(12 + qname.len() + 4 + 11);
    msg.extend_from_slice(&id.to_be_bytes());
    msg.extend_from_slice(&[0x00, 0x00]);
    msg.extend_from_slice(&1u16.to_be_bytes());
    msg.extend_from_slice(&0u16.to_be_bytes());
    msg.extend_from_slice(&0u16.to_be_bytes());
    msg.extend_from_slice(&arcount.to_be_bytes());

    msg.extend_from_slice(&qname);
    msg.extend_from_slice(&qtype.to_u16().to_be_bytes());
    msg.extend_from_slice(&qclass.to_u16().to_be_bytes());

    if let Some(payload) = edns_payload {
        push_opt_record(&mut msg, payload);
    }

    Ok(msg)
}

// RFC 6891 §6.1.2: root owner, TYPE 41, CLASS = payload size, TTL = ext-rcode/version/flags.
fn push_opt_record(msg: &mut Vec<u8>, payload: u16) {
    msg.push(0x00);
    msg.extend_from_slice(&RecordType::OPT.to_u16().to_be_bytes());
    msg.extend_from_slice(&payload.to_be_bytes());
    msg.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    msg.extend_from_slice(&[0x00, 0x00]);
}
