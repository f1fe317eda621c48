use std::net::Ipv4Addr;

/// One A answer: the address and the TTL it was served (or is still cached) with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRecord {
    pub address: Ipv4Addr,

    pub ttl: u32,
}

impl AddressRecord {
    pub fn new(address: Ipv4Addr, ttl: u32) -> Self {
        Self { address, ttl }
    }
}
