// file: src/extractor/recon.rs
// description: best-effort fact extraction from raw recon text
// reference: lenient parsing over noisy scanner output

use crate::extractor::patterns::*;
use crate::models::{FindingCategory, RawFact, SourceKind};
use tracing::debug;

/// Pulls discrete facts out of raw report text. Extraction never fails:
/// lines matching no rule are skipped, a whole file of noise yields an
/// empty vector.
pub struct ReconExtractor;

impl ReconExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str, kind: SourceKind, asset_hint: &str) -> Vec<RawFact> {
        let facts = match kind {
            SourceKind::Ports => self.extract_ports(text, asset_hint),
            SourceKind::Dns => self.extract_dns(text, asset_hint),
            SourceKind::Subdomains => self.extract_subdomains(text),
            SourceKind::Whois => self.extract_whois(text, asset_hint),
            SourceKind::Generic => self.extract_generic(text, asset_hint),
        };

        debug!(
            "Extracted {} facts from {} source ({} bytes)",
            facts.len(),
            kind.as_str(),
            text.len()
        );
        facts
    }

    fn extract_ports(&self, text: &str, asset_hint: &str) -> Vec<RawFact> {
        let asset = self.scan_target(text, asset_hint);
        let mut facts = Vec::new();

        for line in text.lines() {
            if let Some(caps) = PORT_LINE.captures(line) {
                if let Ok(port) = caps[1].parse::<u16>() {
                    facts.push(
                        RawFact::new(FindingCategory::Port, asset.clone(), caps[3].trim())
                            .with_port(port, &caps[2]),
                    );
                }
            } else if let Some(caps) = PORT_BULLET.captures(line) {
                if let Ok(port) = caps[1].parse::<u16>() {
                    let service = caps[2].trim();
                    facts.push(
                        RawFact::new(
                            FindingCategory::Port,
                            asset.clone(),
                            format!("{} service detected", service),
                        )
                        .with_port(port, ""),
                    );
                }
            } else if let Some(fact) = self.cve_fact(line, &asset) {
                facts.push(fact);
            }
        }

        facts
    }

    /// Vulnerability annotations alongside scan output. Category `other`
    /// so the port rules never shadow them; the detail keeps the scanner's
    /// severity/score text for the keyword rules downstream.
    fn cve_fact(&self, line: &str, asset: &str) -> Option<RawFact> {
        let caps = CVE_LINE.captures(line)?;
        let detail = match caps.get(2) {
            Some(rest) => format!("Vulnerability {} ({})", &caps[1], rest.as_str().trim()),
            None => format!("Vulnerability {}", &caps[1]),
        };
        Some(RawFact::new(FindingCategory::Other, asset, detail))
    }

    fn extract_dns(&self, text: &str, asset_hint: &str) -> Vec<RawFact> {
        let mut facts = Vec::new();

        for line in text.lines() {
            if let Some(fact) = self.dns_fact(line, asset_hint) {
                facts.push(fact);
            }
        }

        facts
    }

    fn dns_fact(&self, line: &str, asset_hint: &str) -> Option<RawFact> {
        if let Some(caps) = DNS_A_RECORD.captures(line) {
            let ip = caps[2].to_string();
            let detail = if is_private_ip(&ip) {
                format!("A {} (internal address)", ip)
            } else {
                format!("A {}", ip)
            };
            return Some(RawFact::new(FindingCategory::Dns, &caps[1], detail));
        }

        if let Some(caps) = DNS_RECORD.captures(line) {
            let detail = format!("{} {}", &caps[2], caps[3].trim());
            return Some(RawFact::new(FindingCategory::Dns, &caps[1], detail));
        }

        if let Some(caps) = A_RECORD_LABEL.captures(line) {
            return Some(RawFact::new(
                FindingCategory::Dns,
                asset_hint,
                format!("A {}", &caps[1]),
            ));
        }

        None
    }

    fn extract_subdomains(&self, text: &str) -> Vec<RawFact> {
        let mut facts = Vec::new();

        for line in text.lines() {
            if let Some(caps) = SUBDOMAIN_LINE.captures(line) {
                let name = caps[1].to_string();
                facts.push(RawFact::new(FindingCategory::Subdomain, name.clone(), name));
            }
        }

        facts
    }

    fn extract_whois(&self, text: &str, asset_hint: &str) -> Vec<RawFact> {
        let asset = self.scan_target(text, asset_hint);
        let mut facts = Vec::new();

        for line in text.lines() {
            if let Some(caps) = WHOIS_FIELD.captures(line) {
                let key = caps[1].trim();
                if is_whois_key(key) {
                    facts.push(RawFact::new(
                        FindingCategory::Whois,
                        asset.clone(),
                        format!("{}: {}", key, caps[2].trim()),
                    ));
                }
            }
        }

        facts
    }

    /// Untagged content: per-line rule cascade, first match wins, same skip
    /// policy as the tagged extractors.
    fn extract_generic(&self, text: &str, asset_hint: &str) -> Vec<RawFact> {
        let asset = self.scan_target(text, asset_hint);
        let mut facts = Vec::new();

        for line in text.lines() {
            if let Some(caps) = PORT_LINE.captures(line) {
                if let Ok(port) = caps[1].parse::<u16>() {
                    facts.push(
                        RawFact::new(FindingCategory::Port, asset.clone(), caps[3].trim())
                            .with_port(port, &caps[2]),
                    );
                    continue;
                }
            }

            if let Some(fact) = self.cve_fact(line, &asset) {
                facts.push(fact);
                continue;
            }

            if let Some(fact) = self.dns_fact(line, &asset) {
                facts.push(fact);
                continue;
            }

            if let Some(caps) = WHOIS_FIELD.captures(line) {
                let key = caps[1].trim();
                if is_whois_key(key) {
                    facts.push(RawFact::new(
                        FindingCategory::Whois,
                        asset.clone(),
                        format!("{}: {}", key, caps[2].trim()),
                    ));
                    continue;
                }
            }

            if let Some(caps) = SUBDOMAIN_LINE.captures(line) {
                let name = caps[1].to_string();
                facts.push(RawFact::new(FindingCategory::Subdomain, name.clone(), name));
            }
        }

        facts
    }

    /// Asset for facts that carry no host of their own: a `Target:` header
    /// or nmap report line if present, otherwise the caller's hint
    /// (normally the file stem).
    fn scan_target(&self, text: &str, asset_hint: &str) -> String {
        if let Some(caps) = TARGET_LABEL.captures(text) {
            return caps[1].to_string();
        }
        if let Some(caps) = NMAP_REPORT.captures(text) {
            return caps[1].to_string();
        }
        asset_hint.to_string()
    }
}

impl Default for ReconExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_port_extraction() {
        let extractor = ReconExtractor::new();
        let text = "Target: app.example.com\n22/tcp open ssh OpenSSH 7.2\n80/tcp open http nginx\n";
        let facts = extractor.extract(text, SourceKind::Ports, "scan01");

        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].asset, "app.example.com");
        assert_eq!(facts[0].port, Some(22));
        assert_eq!(facts[0].protocol, "tcp");
        assert!(facts[0].detail.contains("OpenSSH 7.2"));
    }

    #[test]
    fn test_port_bullet_extraction() {
        let extractor = ReconExtractor::new();
        let text = "- 443 (https)\n- 22 (ssh)\n";
        let facts = extractor.extract(text, SourceKind::Ports, "scan02");

        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].port, Some(443));
        assert_eq!(facts[0].detail, "https service detected");
        assert_eq!(facts[0].asset, "scan02");
    }

    #[test]
    fn test_cve_lines_become_vulnerability_findings() {
        let extractor = ReconExtractor::new();
        let text = "Target: app.example.com\n\
                    445/tcp open microsoft-ds\n\
                    CVE-2017-0144 | Sev: Critical | Score: 9.8\n";
        let facts = extractor.extract(text, SourceKind::Ports, "scan03");

        assert_eq!(facts.len(), 2);
        assert_eq!(facts[1].category, FindingCategory::Other);
        assert_eq!(facts[1].asset, "app.example.com");
        assert_eq!(
            facts[1].detail,
            "Vulnerability CVE-2017-0144 (Sev: Critical | Score: 9.8)"
        );
    }

    #[test]
    fn test_dns_extraction_marks_internal_addresses() {
        let extractor = ReconExtractor::new();
        let text = "www.example.com A 93.184.216.34\nintranet.example.com A 10.0.0.5\n";
        let facts = extractor.extract(text, SourceKind::Dns, "dns01");

        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].detail, "A 93.184.216.34");
        assert_eq!(facts[1].detail, "A 10.0.0.5 (internal address)");
    }

    #[test]
    fn test_subdomain_extraction() {
        let extractor = ReconExtractor::new();
        let text = "sub.example.com\napi.example.com\nnot a domain\n";
        let facts = extractor.extract(text, SourceKind::Subdomains, "subs");

        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].category, FindingCategory::Subdomain);
        assert_eq!(facts[0].asset, "sub.example.com");
    }

    #[test]
    fn test_whois_extraction_filters_boilerplate() {
        let extractor = ReconExtractor::new();
        let text = "Domain Name: EXAMPLE.COM\n\
                    Registrant Name: Jane Smith\n\
                    Name Server: ns1.example.com\n\
                    NOTICE: The expiration date shown is informational\n";
        let facts = extractor.extract(text, SourceKind::Whois, "example.com");

        let details: Vec<&str> = facts.iter().map(|f| f.detail.as_str()).collect();
        assert!(details.contains(&"Registrant Name: Jane Smith"));
        assert!(details.contains(&"Name Server: ns1.example.com"));
        assert!(!details.iter().any(|d| d.starts_with("NOTICE")));
    }

    #[test]
    fn test_malformed_lines_are_skipped_silently() {
        let extractor = ReconExtractor::new();
        for kind in [
            SourceKind::Ports,
            SourceKind::Dns,
            SourceKind::Subdomains,
            SourceKind::Whois,
            SourceKind::Generic,
        ] {
            let facts = extractor.extract("###garbage###\n%%% noise %%%\n", kind, "x");
            assert!(facts.is_empty(), "{:?} should skip garbage", kind);
        }
    }

    #[test]
    fn test_generic_cascade() {
        let extractor = ReconExtractor::new();
        let text = "Target: example.com\n\
                    22/tcp open ssh\n\
                    CVE-2021-44228\n\
                    www.example.com A 93.184.216.34\n\
                    Registrant Org: Acme Ltd\n\
                    shop.example.com\n";
        let facts = extractor.extract(text, SourceKind::Generic, "mixed");

        let categories: Vec<FindingCategory> = facts.iter().map(|f| f.category).collect();
        assert_eq!(
            categories,
            vec![
                FindingCategory::Port,
                FindingCategory::Other,
                FindingCategory::Dns,
                FindingCategory::Whois,
                FindingCategory::Subdomain,
            ]
        );
    }
}
