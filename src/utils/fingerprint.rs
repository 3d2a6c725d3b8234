// Machine fingerprint used to derive the session encryption key
use base64::Engine;
use sha2::{Digest, Sha256};

/// First line of each wanted `key : value` field in /proc/cpuinfo, concatenated
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn cpuinfo_signature(cpuinfo: &str, fields: &[&str]) -> String {
    fields
        .iter()
        .filter_map(|field| cpuinfo.lines().find(|line| line.starts_with(field)))
        .collect::<Vec<_>>()
        .concat()
}

#[cfg(target_os = "linux")]
fn machine_key() -> Option<String> {
    let machine_id = std::fs::read_to_string("/etc/machine-id")
        .or_else(|_| std::fs::read_to_string("/var/lib/dbus/machine-id"))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").unwrap_or_default();
    Some(machine_id + &cpuinfo_signature(&cpuinfo, &["vendor_id", "model name"]))
}

#[cfg(target_os = "windows")]
fn machine_key() -> Option<String> {
    use winreg::{enums::HKEY_LOCAL_MACHINE, RegKey};

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let guid: String = hklm
        .open_subkey("SOFTWARE\\Microsoft\\Cryptography")
        .ok()?
        .get_value("MachineGuid")
        .ok()?;

    let cpu = hklm
        .open_subkey("HARDWARE\\DESCRIPTION\\System\\CentralProcessor\\0")
        .map(|cpu0| {
            ["VendorIdentifier", "ProcessorNameString"]
                .iter()
                .filter_map(|name| cpu0.get_value::<String, _>(name).ok())
                .collect::<String>()
        })
        .unwrap_or_default();

    Some(guid + &cpu)
}

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
fn machine_key() -> Option<String> {
    // macOS and others: host name or user as a stand-in
    std::env::var("HOSTNAME").or_else(|_| std::env::var("USER")).ok()
}

pub fn fingerprint() -> String {
    let key = machine_key().unwrap_or_else(|| {
        log::warn!("[Fingerprint] No machine id available, using fallback key");
        "holidaze-fallback".into()
    });
    let hash = Sha256::digest(key.as_bytes());
    base64::engine::general_purpose::STANDARD_NO_PAD.encode(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(fingerprint(), fingerprint());
        assert!(!fingerprint().is_empty());
    }

    #[test]
    fn test_cpuinfo_signature_takes_first_match() {
        let cpuinfo = "processor\t: 0\nvendor_id\t: GenuineIntel\nmodel name\t: Core\nvendor_id\t: Other\n";
        assert_eq!(
            cpuinfo_signature(cpuinfo, &["vendor_id", "model name"]),
            "vendor_id\t: GenuineIntelmodel name\t: Core"
        );
    }
}
