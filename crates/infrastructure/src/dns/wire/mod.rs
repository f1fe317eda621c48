//! DNS wire format (RFC 1035 §4): query construction and response parsing.
//!
//! Everything in here is pure: bytes in, bytes or values out. Network I/O
//! lives in `transport` and the resolver.

mod errors;
mod message_builder;
mod response_parser;

pub use errors::WireError;
pub use message_builder::{
    encode_name, encode_query, encode_query_as, encode_query_with_id, DEFAULT_EDNS_PAYLOAD_SIZE,
};
pub use response_parser::{
    answer_start, decode_additional_section, decode_answer_section, decode_authority_section,
    decode_name, decode_name_lenient, header, validate_response, Header, HEADER_LEN,
};
