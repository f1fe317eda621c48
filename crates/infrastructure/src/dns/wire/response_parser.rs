use super::errors::WireError;
use rootwalk_domain::AddressRecord;
use std::net::Ipv4Addr;

pub const HEADER_LEN: usize = 12;

const MAX_ENCODED_NAME_LEN: usize = 255;
// A 255-octet name has at most 127 labels; anything needing more jumps loops.
const MAX_POINTER_HOPS: usize = 127;
// TYPE(2) CLASS(2) TTL(4) RDLENGTH(2)
const RR_FIXED_LEN: usize = 10;

const TYPE_A: u16 = 1;
const TYPE_NS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    pub fn is_response(&self) -> bool {
        self.flags & 0x8000 != 0
    }

    pub fn is_truncated(&self) -> bool {
        self.flags & 0x0200 != 0
    }

    pub fn rcode(&self) -> u8 {
        (self.flags & 0x000F) as u8
    }
}

pub fn header(buf: &[u8]) -> Result<Header, WireError> {
    if buf.len() < HEADER_LEN {
        return Err(WireError::Truncated { offset: buf.len() });
    }
    let word = |i: usize| u16::from_be_bytes([buf[i], buf[i + 1]]);
    Ok(Header {
        id: word(0),
        flags: word(2),
        qdcount: word(4),
        ancount: word(6),
        nscount: word(8),
        arcount: word(10),
    })
}

/// Decodes the (possibly compressed) name at `offset`.
///
/// Returns the dotted name and the offset just past it in the original
/// stream: after the terminating zero label, or after the first pointer
/// when the name jumps.
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(String, usize), WireError> {
    let mut name = String::new();
    let mut pos = offset;
    let mut resume_at: Option<usize> = None;
    let mut hops = 0usize;
    // The terminating root octet counts toward the limit.
    let mut encoded_len = 1usize;

    loop {
        let len = *buf.get(pos).ok_or(WireError::Truncated { offset: pos })?;

        match len & 0xC0 {
            0xC0 => {
                let low = *buf
                    .get(pos + 1)
                    .ok_or(WireError::Truncated { offset: pos + 1 })?;
                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(WireError::PointerLoop { offset });
                }
                if resume_at.is_none() {
                    resume_at = Some(pos + 2);
                }
                pos = (usize::from(len & 0x3F) << 8) | usize::from(low);
            }
            0x00 if len == 0 => {
                let next = resume_at.unwrap_or(pos + 1);
                return Ok((name, next));
            }
            0x00 => {
                let start = pos + 1;
                let end = start + usize::from(len);
                let label = buf
                    .get(start..end)
                    .ok_or(WireError::Truncated { offset: buf.len() })?;

                encoded_len += label.len() + 1;
                if encoded_len > MAX_ENCODED_NAME_LEN {
                    return Err(WireError::NameTooLong);
                }

                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&String::from_utf8_lossy(label));
                pos = end;
            }
            _ => {
                return Err(WireError::ReservedLabelType {
                    offset: pos,
                    byte: len,
                })
            }
        }
    }
}

/// [`decode_name`] for callers that only want a best effort: any fault
/// yields an empty name and leaves the cursor where it was.
pub fn decode_name_lenient(buf: &[u8], offset: usize) -> (String, usize) {
    decode_name(buf, offset).unwrap_or_else(|_| (String::new(), offset))
}

/// Offset of the first answer record, i.e. just past the question section.
pub fn answer_start(buf: &[u8]) -> Result<usize, WireError> {
    let hdr = header(buf)?;
    let mut offset = HEADER_LEN;
    for _ in 0..hdr.qdcount {
        let (_, after_name) = decode_name(buf, offset)?;
        offset = after_name + 4;
        if offset > buf.len() {
            return Err(WireError::Truncated { offset: buf.len() });
        }
    }
    Ok(offset)
}

/// Walks ANCOUNT records from `start_offset` and keeps the A records.
pub fn decode_answer_section(
    buf: &[u8],
    start_offset: usize,
) -> Result<Vec<AddressRecord>, WireError> {
    let hdr = header(buf)?;
    let mut offset = start_offset;
    let mut records = Vec::new();

    for _ in 0..hdr.ancount {
        let (rr, next) = read_record(buf, offset)?;
        if let Some(address) = rr.ipv4() {
            records.push(AddressRecord::new(address, rr.ttl));
        }
        offset = next;
    }

    Ok(records)
}

/// Glue: the A records of the additional section.
pub fn decode_additional_section(query: &[u8], response: &[u8]) -> Result<Vec<Ipv4Addr>, WireError> {
    validate_response(query, response)?;
    let hdr = header(response)?;

    let mut offset = answer_start(response)?;
    offset = skip_records(response, offset, hdr.ancount)?;
    offset = skip_records(response, offset, hdr.nscount)?;

    let mut glue = Vec::new();
    for _ in 0..hdr.arcount {
        let (rr, next) = read_record(response, offset)?;
        if let Some(address) = rr.ipv4() {
            glue.push(address);
        }
        offset = next;
    }

    Ok(glue)
}

/// Nameserver names carried by the NS records of the authority section.
pub fn decode_authority_section(query: &[u8], response: &[u8]) -> Result<Vec<String>, WireError> {
    validate_response(query, response)?;
    let hdr = header(response)?;

    let mut offset = answer_start(response)?;
    offset = skip_records(response, offset, hdr.ancount)?;

    let mut names = Vec::new();
    for _ in 0..hdr.nscount {
        let (rr, next) = read_record(response, offset)?;
        if rr.rtype == TYPE_NS {
            let (ns_name, _) = decode_name(response, rr.rdata_offset)?;
            if !ns_name.is_empty() {
                names.push(ns_name);
            }
        }
        offset = next;
    }

    Ok(names)
}

/// Checks that `response` answers `query`: the ID is echoed and QR is set.
pub fn validate_response(query: &[u8], response: &[u8]) -> Result<(), WireError> {
    let expected = header(query)?.id;
    let hdr = header(response)?;
    if hdr.id != expected {
        return Err(WireError::IdMismatch {
            expected,
            actual: hdr.id,
        });
    }
    if !hdr.is_response() {
        return Err(WireError::NotAResponse);
    }
    Ok(())
}

struct RawRecord<'a> {
    rtype: u16,
    ttl: u32,
    rdata_offset: usize,
    rdata: &'a [u8],
}

impl RawRecord<'_> {
    fn ipv4(&self) -> Option<Ipv4Addr> {
        if self.rtype != TYPE_A {
            return None;
        }
        let octets: [u8; 4] = self.rdata.try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }
}

fn read_record(buf: &[u8], offset: usize) -> Result<(RawRecord<'_>, usize), WireError> {
    let (_, after_name) = decode_name(buf, offset)?;
    let fixed = buf
        .get(after_name..after_name + RR_FIXED_LEN)
        .ok_or(WireError::Truncated { offset: buf.len() })?;

    let rtype = u16::from_be_bytes([fixed[0], fixed[1]]);
    let ttl = u32::from_be_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]);
    let rdlength = usize::from(u16::from_be_bytes([fixed[8], fixed[9]]));

    let rdata_offset = after_name + RR_FIXED_LEN;
    let rdata = buf
        .get(rdata_offset..rdata_offset + rdlength)
        .ok_or(WireError::Truncated { offset: buf.len() })?;

    Ok((
        RawRecord {
            rtype,
            ttl,
            rdata_offset,
            rdata,
        },
        rdata_offset + rdlength,
    ))
}

fn skip_records(buf: &[u8], mut offset: usize, count: u16) -> Result<usize, WireError> {
    for _ in 0..count {
        let (_, next) = read_record(buf, offset)?;
        offset = next;
    }
    Ok(offset)
}
