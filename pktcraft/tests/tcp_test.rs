use pnet::packet::tcp::TcpPacket as PnetTcpPacket;
use pnet::packet::Packet;
use smoltcp::wire::{IpAddress, TcpPacket as SmoltcpTcpPacket};

use pktcraft::ipv4::Ipv4Addr;
use pktcraft::ipv6::Ipv6Addr;
use pktcraft::tcp::*;
use pktcraft::{Layer, NetworkContext, RawPayload};

// An HTTP GET over TCP, captured off the wire. Ethernet header at 0,
// IPv4 at 14, TCP at 34. The capturing host offloaded the TCP checksum,
// so the stored value 0x4729 is not the RFC 1071 result.
static FRAME_BYTES: [u8; 200] = [
    0x00, 0x26, 0x62, 0x2f, 0x47, 0x87, 0x00, 0x1d, 0x60, 0xb3, 0x01, 0x84, 0x08, 0x00, 0x45,
    0x00, 0x00, 0xba, 0xcb, 0x5d, 0x40, 0x00, 0x40, 0x06, 0x28, 0x64, 0xc0, 0xa8, 0x01, 0x8c,
    0xae, 0x8f, 0xd5, 0xb8, 0xe1, 0x4e, 0x00, 0x50, 0x8e, 0x50, 0x19, 0x02, 0xc7, 0x52, 0x9d,
    0x89, 0x80, 0x18, 0x00, 0x2e, 0x47, 0x29, 0x00, 0x00, 0x01, 0x01, 0x08, 0x0a, 0x00, 0x21,
    0xd2, 0x5f, 0x31, 0xc7, 0xba, 0x48, 0x47, 0x45, 0x54, 0x20, 0x2f, 0x69, 0x6d, 0x61, 0x67,
    0x65, 0x73, 0x2f, 0x6c, 0x61, 0x79, 0x6f, 0x75, 0x74, 0x2f, 0x6c, 0x6f, 0x67, 0x6f, 0x2e,
    0x70, 0x6e, 0x67, 0x20, 0x48, 0x54, 0x54, 0x50, 0x2f, 0x31, 0x2e, 0x30, 0x0d, 0x0a, 0x55,
    0x73, 0x65, 0x72, 0x2d, 0x41, 0x67, 0x65, 0x6e, 0x74, 0x3a, 0x20, 0x57, 0x67, 0x65, 0x74,
    0x2f, 0x31, 0x2e, 0x31, 0x32, 0x20, 0x28, 0x6c, 0x69, 0x6e, 0x75, 0x78, 0x2d, 0x67, 0x6e,
    0x75, 0x29, 0x0d, 0x0a, 0x41, 0x63, 0x63, 0x65, 0x70, 0x74, 0x3a, 0x20, 0x2a, 0x2f, 0x2a,
    0x0d, 0x0a, 0x48, 0x6f, 0x73, 0x74, 0x3a, 0x20, 0x70, 0x61, 0x63, 0x6b, 0x65, 0x74, 0x6c,
    0x69, 0x66, 0x65, 0x2e, 0x6e, 0x65, 0x74, 0x0d, 0x0a, 0x43, 0x6f, 0x6e, 0x6e, 0x65, 0x63,
    0x74, 0x69, 0x6f, 0x6e, 0x3a, 0x20, 0x4b, 0x65, 0x65, 0x70, 0x2d, 0x41, 0x6c, 0x69, 0x76,
    0x65, 0x0d, 0x0a, 0x0d, 0x0a,
];

const TCP_OFFSET: usize = 34;

fn captured_context() -> NetworkContext {
    NetworkContext::Ipv4 {
        src: Ipv4Addr::new(192, 168, 1, 140),
        dst: Ipv4Addr::new(174, 143, 213, 184),
    }
}

#[test]
fn parse_captured_frame() {
    let segment = TcpSegment::parse(&FRAME_BYTES[TCP_OFFSET..]).unwrap();

    assert_eq!(segment.src_port(), 57678);
    assert_eq!(segment.dst_port(), 80);
    assert_eq!(segment.seq_number(), 0x8e501902);
    assert_eq!(segment.ack_number(), 0xc7529d89);
    assert_eq!(segment.data_offset(), 8);
    assert_eq!(segment.header_size(), 32);
    assert_eq!(segment.total_size(), 166);
    assert!(segment.ack() && segment.psh());
    assert!(!segment.syn() && !segment.fin() && !segment.rst());
    assert!(!segment.urg() && !segment.ece() && !segment.cwr());
    assert_eq!(segment.flags(), FLG_ACK | FLG_PSH);
    assert_eq!(segment.window_size(), 46);
    assert_eq!(segment.checksum(), 0x4729);
    assert_eq!(segment.urgent_ptr(), 0);

    let kinds: Vec<TcpOptionKind> = segment.options().iter().map(|o| o.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TcpOptionKind::NOP,
            TcpOptionKind::NOP,
            TcpOptionKind::TIMESTAMP
        ]
    );
    assert_eq!(segment.options_size(), 12);
    assert_eq!(segment.total_options_size(), 12);
    assert_eq!(segment.timestamp().unwrap(), (0x0021d25f, 0x31c7ba48));
    assert_eq!(segment.mss(), 0);
    assert!(!segment.has_sack_permitted());

    // 134 bytes of HTTP request attached as the next layer.
    assert_eq!(segment.inner().unwrap().total_size(), 134);
}

#[test]
fn reserialize_captured_frame() {
    let mut segment = TcpSegment::parse(&FRAME_BYTES[TCP_OFFSET..]).unwrap();

    let mut buf = vec![0u8; segment.total_size()];
    segment.serialize(&mut buf[..], Some(&captured_context()));

    // Everything but the checksum field must be reproduced verbatim; the
    // checksum comes out recomputed instead of the capture's offloaded
    // value.
    assert_eq!(&buf[..16], &FRAME_BYTES[TCP_OFFSET..TCP_OFFSET + 16]);
    assert_eq!(&buf[18..], &FRAME_BYTES[TCP_OFFSET + 18..]);
    assert_eq!(segment.checksum(), 0xc0dd);
    assert_eq!(&buf[16..18], &[0xc0, 0xdd]);

    let checked = SmoltcpTcpPacket::new_checked(&buf[..]).unwrap();
    assert!(checked.verify_checksum(
        &IpAddress::v4(192, 168, 1, 140),
        &IpAddress::v4(174, 143, 213, 184)
    ));
}

#[test]
fn round_trip_built_segment() {
    let mut segment = TcpSegment::new(4097, 443);
    segment.set_seq_number(0x01020304);
    segment.set_ack_number(0x0a0b0c0d);
    segment.set_syn(true);
    segment.set_ack(true);
    segment.set_window_size(8192);
    segment.set_mss(1460);
    segment.set_window_scale(7);
    segment.set_sack_permitted();
    segment.set_inner(Box::new(RawPayload::new(b"hello")));

    let context = NetworkContext::Ipv4 {
        src: Ipv4Addr::new(10, 0, 0, 1),
        dst: Ipv4Addr::new(10, 0, 0, 2),
    };
    let mut buf = vec![0u8; segment.total_size()];
    segment.serialize(&mut buf[..], Some(&context));

    let parsed = TcpSegment::parse(&buf[..]).unwrap();
    assert_eq!(parsed.src_port(), segment.src_port());
    assert_eq!(parsed.dst_port(), segment.dst_port());
    assert_eq!(parsed.seq_number(), segment.seq_number());
    assert_eq!(parsed.ack_number(), segment.ack_number());
    assert_eq!(parsed.flags(), segment.flags());
    assert_eq!(parsed.window_size(), segment.window_size());
    assert_eq!(parsed.checksum(), segment.checksum());
    assert_eq!(parsed.mss(), 1460);
    assert_eq!(parsed.window_scale(), 7);
    assert!(parsed.has_sack_permitted());
    // Option order survives, with the single padding byte decoded as a
    // trailing no-op record.
    let kinds: Vec<TcpOptionKind> = parsed.options().iter().map(|o| o.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TcpOptionKind::MSS,
            TcpOptionKind::WSCALE,
            TcpOptionKind::SACK_PERMITTED,
            TcpOptionKind::NOP,
            TcpOptionKind::NOP,
            TcpOptionKind::NOP
        ]
    );

    let checked = SmoltcpTcpPacket::new_checked(&buf[..]).unwrap();
    assert!(checked.verify_checksum(&IpAddress::v4(10, 0, 0, 1), &IpAddress::v4(10, 0, 0, 2)));
}

#[test]
fn ipv6_parent_checksum() {
    let mut segment = TcpSegment::new(52000, 8080);
    segment.set_seq_number(0xcafe0001);
    segment.set_syn(true);
    segment.set_mss(1440);
    segment.set_timestamp(0x1000, 0);
    segment.set_inner(Box::new(RawPayload::new(b"v6 payload")));

    let src = Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 1);
    let dst = Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 2);
    let context = NetworkContext::Ipv6 { src, dst };

    let mut buf = vec![0u8; segment.total_size()];
    segment.serialize(&mut buf[..], Some(&context));
    assert_ne!(segment.checksum(), 0);

    let checked = SmoltcpTcpPacket::new_checked(&buf[..]).unwrap();
    assert!(checked.verify_checksum(
        &IpAddress::v6(0xfd00, 0, 0, 0, 0, 0, 0, 1),
        &IpAddress::v6(0xfd00, 0, 0, 0, 0, 0, 0, 2)
    ));

    let parsed = TcpSegment::parse(&buf[..]).unwrap();
    assert_eq!(parsed.checksum(), segment.checksum());
    assert_eq!(parsed.mss(), 1440);
}

#[test]
fn cross_check_with_pnet() {
    let mut segment = TcpSegment::new(57678, 80);
    segment.set_seq_number(0x8e501902);
    segment.set_ack_number(0xc7529d89);
    segment.set_ack(true);
    segment.set_psh(true);
    segment.set_window_size(46);
    segment.set_timestamp(0x0021d25f, 0x31c7ba48);
    segment.set_inner(Box::new(RawPayload::new(b"GET / HTTP/1.0\r\n\r\n")));

    let mut buf = vec![0u8; segment.total_size()];
    segment.serialize(&mut buf[..], Some(&captured_context()));

    let pkt = PnetTcpPacket::new(&buf[..]).unwrap();
    assert_eq!(pkt.get_source(), 57678);
    assert_eq!(pkt.get_destination(), 80);
    assert_eq!(pkt.get_sequence(), 0x8e501902);
    assert_eq!(pkt.get_acknowledgement(), 0xc7529d89);
    assert_eq!(pkt.get_data_offset(), 8);
    assert_eq!(pkt.get_window(), 46);
    assert_eq!(pkt.get_checksum(), segment.checksum());
    assert_eq!(pkt.get_urgent_ptr(), 0);
    assert_eq!(pkt.payload(), b"GET / HTTP/1.0\r\n\r\n");
}

#[test]
fn matches_response_across_the_flow() {
    let request = TcpSegment::parse(&FRAME_BYTES[TCP_OFFSET..]).unwrap();

    // A reply has the port pair swapped; the raw inner layer accepts the
    // bytes past the reply's own header boundary.
    let mut reply = TcpSegment::new(80, 57678);
    reply.set_ack(true);
    let mut buf = vec![0u8; reply.total_size()];
    reply.serialize(&mut buf[..], None);
    assert!(request.matches_response(&buf[..]));

    // The captured segment itself is not a reply to itself.
    assert!(!request.matches_response(&FRAME_BYTES[TCP_OFFSET..]));
}
