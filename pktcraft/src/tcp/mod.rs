//! Tcp protocol.

mod header;
pub use header::{TcpHeader, TCP_HEADER_LEN, TCP_HEADER_LEN_MAX, TCP_HEADER_TEMPLATE};
pub use header::{FLG_ACK, FLG_CWR, FLG_ECE, FLG_FIN, FLG_PSH, FLG_RST, FLG_SYN, FLG_URG};

mod option;
pub use option::{AltChecksum, TcpOption, TcpOptionKind};

mod segment;
pub use segment::{TcpSegment, DEFAULT_WINDOW};
