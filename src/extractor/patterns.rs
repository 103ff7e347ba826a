// file: src/extractor/patterns.rs
// description: compiled regex patterns for recon text extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Port scan lines
    pub static ref PORT_LINE: Regex = Regex::new(
        r"(?m)^\s*(\d{1,5})/(tcp|udp)\s+open\s+(.+)$"
    ).expect("PORT_LINE regex is valid");

    pub static ref PORT_BULLET: Regex = Regex::new(
        r"(?m)^\s*-\s*(\d{1,5})\s*\(([^)]+)\)\s*$"
    ).expect("PORT_BULLET regex is valid");

    // DNS records (zone-file and dig output shapes). The name capture ends
    // on a word character so a zone-file trailing dot stays outside it and
    // "mail.example.com." canonicalizes to the same asset as
    // "mail.example.com".
    pub static ref DNS_A_RECORD: Regex = Regex::new(
        r"(?m)^\s*([\w](?:[\w.-]*[\w])?)\.?\s+(?:\d+\s+)?(?:IN\s+)?A\s+((?:\d{1,3}\.){3}\d{1,3})\s*$"
    ).expect("DNS_A_RECORD regex is valid");

    pub static ref DNS_RECORD: Regex = Regex::new(
        r"(?m)^\s*([\w](?:[\w.-]*[\w])?)\.?\s+(?:\d+\s+)?(?:IN\s+)?(AAAA|CNAME|MX|NS|TXT|SOA|PTR)\s+(.+)$"
    ).expect("DNS_RECORD regex is valid");

    pub static ref A_RECORD_LABEL: Regex = Regex::new(
        r"(?im)^\s*A Record:\s*((?:\d{1,3}\.){3}\d{1,3})\s*$"
    ).expect("A_RECORD_LABEL regex is valid");

    // WHOIS key: value lines
    pub static ref WHOIS_FIELD: Regex = Regex::new(
        r"(?m)^\s*([A-Za-z][A-Za-z0-9 ._/-]{2,40}?):\s+(\S.*)$"
    ).expect("WHOIS_FIELD regex is valid");

    // One subdomain per line
    pub static ref SUBDOMAIN_LINE: Regex = Regex::new(
        r"(?im)^\s*((?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,})\s*$"
    ).expect("SUBDOMAIN_LINE regex is valid");

    // Vulnerability lines: "CVE-2017-0144 | Sev: Critical | Score: 9.8"
    pub static ref CVE_LINE: Regex = Regex::new(
        r"(?im)^\s*(CVE-\d{4}-\d{4,7})\b\s*(?:\|\s*(.+))?$"
    ).expect("CVE_LINE regex is valid");

    // Scan target headers
    pub static ref TARGET_LABEL: Regex = Regex::new(
        r"(?im)^\s*Target:\s*(\S+)\s*$"
    ).expect("TARGET_LABEL regex is valid");

    pub static ref NMAP_REPORT: Regex = Regex::new(
        r"(?im)^Nmap scan report for\s+(\S+)"
    ).expect("NMAP_REPORT regex is valid");

    pub static ref IP_ADDRESS: Regex = Regex::new(
        r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b"
    ).expect("IP_ADDRESS regex is valid");
}

/// WHOIS keys worth surfacing as findings; everything else in a WHOIS dump
/// is boilerplate.
pub const WHOIS_KEYS: &[&str] = &[
    "registrant",
    "admin",
    "tech",
    "registrar",
    "name server",
    "nserver",
    "creation date",
    "created",
    "expiry date",
    "expires",
    "updated date",
    "org",
    "organisation",
    "organization",
    "email",
];

pub fn is_whois_key(key: &str) -> bool {
    let key = key.to_lowercase();
    WHOIS_KEYS.iter().any(|k| key.contains(k))
}

pub fn is_private_ip(ip: &str) -> bool {
    let parts: Vec<&str> = ip.split('.').collect();
    if parts.len() != 4 {
        return false;
    }

    if let Ok(first) = parts[0].parse::<u8>() {
        match first {
            10 => true,
            172 => {
                if let Ok(second) = parts[1].parse::<u8>() {
                    (16..=31).contains(&second)
                } else {
                    false
                }
            }
            192 => parts[1] == "168",
            127 => true,
            _ => false,
        }
    } else {
        false
    }
}
