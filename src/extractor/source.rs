// file: src/extractor/source.rs
// description: source kind detection from filename with content-shape fallback
// reference: configurable classification over scanner naming conventions

use crate::extractor::patterns::{
    is_whois_key, DNS_A_RECORD, DNS_RECORD, PORT_BULLET, PORT_LINE, SUBDOMAIN_LINE, WHOIS_FIELD,
};
use crate::models::SourceKind;

/// Filename keyword rules, checked in order; first match wins.
const NAME_RULES: &[(&str, SourceKind)] = &[
    ("whois", SourceKind::Whois),
    ("dns", SourceKind::Dns),
    ("subdomain", SourceKind::Subdomains),
    ("subs", SourceKind::Subdomains),
    ("port", SourceKind::Ports),
    ("nmap", SourceKind::Ports),
    ("masscan", SourceKind::Ports),
];

pub fn detect_source_kind(file_name: &str, content: &str) -> SourceKind {
    let name = file_name.to_lowercase();

    for (keyword, kind) in NAME_RULES {
        if name.contains(keyword) {
            return *kind;
        }
    }

    detect_from_content(content)
}

/// Shape-based fallback for untagged files. Samples the first lines and
/// picks the kind with the strongest signal; ties fall back to generic.
fn detect_from_content(content: &str) -> SourceKind {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(50)
        .collect();

    if lines.is_empty() {
        return SourceKind::Generic;
    }

    let mut port_hits = 0usize;
    let mut dns_hits = 0usize;
    let mut whois_hits = 0usize;
    let mut subdomain_hits = 0usize;

    for line in &lines {
        if PORT_LINE.is_match(line) || PORT_BULLET.is_match(line) {
            port_hits += 1;
        } else if DNS_A_RECORD.is_match(line) || DNS_RECORD.is_match(line) {
            dns_hits += 1;
        } else if WHOIS_FIELD
            .captures(line)
            .map(|c| is_whois_key(&c[1]))
            .unwrap_or(false)
        {
            whois_hits += 1;
        } else if SUBDOMAIN_LINE.is_match(line) {
            subdomain_hits += 1;
        }
    }

    let best = [
        (port_hits, SourceKind::Ports),
        (dns_hits, SourceKind::Dns),
        (whois_hits, SourceKind::Whois),
        (subdomain_hits, SourceKind::Subdomains),
    ]
    .into_iter()
    .max_by_key(|(hits, _)| *hits)
    .map(|(hits, kind)| if hits * 2 >= lines.len() { Some(kind) } else { None })
    .flatten();

    best.unwrap_or(SourceKind::Generic)
}
