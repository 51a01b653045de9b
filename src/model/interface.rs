use std::fmt;
use std::net::Ipv4Addr;

/// A non-loopback IPv4 address and the device it is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub device: String,
    pub ip: Ipv4Addr,
}

impl InterfaceRecord {
    pub fn new(device: impl Into<String>, ip: Ipv4Addr) -> Self {
        Self {
            device: device.into(),
            ip,
        }
    }
}

impl fmt::Display for InterfaceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.device, self.ip)
    }
}
