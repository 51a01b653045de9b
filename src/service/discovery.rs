use crate::model::interface::InterfaceRecord;
use crate::model::report::RunReport;
use crate::service::command_runner::{run_command, CommandRunner};
use anyhow::Result;
use log::{debug, warn};
use std::net::Ipv4Addr;

/// One line per address: `<index>: <device>    inet <addr>/<prefix> ...`.
pub const LIST_COMMAND: &str = "ip -4 -o addr show";

const DEVICE_COLUMN: usize = 1;
const ADDRESS_COLUMN: usize = 3;

/// Device names end up in `sh -c` lines, so only plain names are accepted.
fn is_plain_device_name(device: &str) -> bool {
    !device.is_empty()
        && device
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '@' | '-'))
}

/// Extracts the non-loopback IPv4 addresses from `ip -4 -o addr show` output,
/// in listing order.
pub fn parse_interfaces(output: &str) -> Vec<InterfaceRecord> {
    output
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() <= ADDRESS_COLUMN {
                return None;
            }

            let device = parts[DEVICE_COLUMN];
            let address = parts[ADDRESS_COLUMN]
                .split('/')
                .next()
                .unwrap_or_default();

            let ip = match address.parse::<Ipv4Addr>() {
                Ok(ip) => ip,
                Err(_) => {
                    debug!("Skipping `{}`: `{}` is not an IPv4 address", device, address);
                    return None;
                }
            };

            if ip.is_loopback() {
                return None;
            }

            if !is_plain_device_name(device) {
                warn!("Skipping {}: unsupported interface name `{}`", ip, device);
                return None;
            }

            Some(InterfaceRecord::new(device, ip))
        })
        .collect()
}

/// Lists the host's interfaces. A failing listing yields no interfaces rather than an error.
pub async fn discover_interfaces<R>(
    runner: &R,
    report: &mut RunReport,
) -> Result<Vec<InterfaceRecord>>
where
    R: CommandRunner + ?Sized,
{
    let step = run_command(
        runner,
        LIST_COMMAND.to_string(),
        "Scanning network interfaces",
        false,
    )
    .await?;

    let interfaces = parse_interfaces(step.output().unwrap_or_default());
    report.record(step);

    Ok(interfaces)
}
