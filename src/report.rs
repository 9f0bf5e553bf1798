//! Field breakdown of an identifier, for humans and for JSON

use serde::Serialize;
use uuidkit_core::{Case, Uuid};

/// RFC 4122 fields as numbers
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub time_low: u32,
    pub time_mid: u16,
    pub time_high_and_version: u16,
    pub clock_seq_hi_and_reserved: u8,
    pub clock_seq_low: u8,
    pub node: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UuidReport {
    pub text: String,
    /// Raw bytes, lowercase hex in storage order
    pub bytes: String,
    pub variant: &'static str,
    pub version: &'static str,
    pub nil: bool,
    pub fields: FieldReport,
}

impl UuidReport {
    pub fn new(id: &Uuid, case: Case) -> Self {
        Self {
            text: id.to_text(case),
            bytes: hex::encode(id.as_bytes()),
            variant: id.variant().name(),
            version: id.version().name(),
            nil: id.is_nil(),
            fields: FieldReport {
                time_low: id.time_low(),
                time_mid: id.time_mid(),
                time_high_and_version: id.time_high_and_version(),
                clock_seq_hi_and_reserved: id.clock_seq_hi_and_reserved(),
                clock_seq_low: id.clock_seq_low(),
                node: id.node(),
            },
        }
    }

    /// Multi-line listing for terminal output
    pub fn render(&self) -> String {
        let f = &self.fields;
        let mut out = String::new();
        out.push_str(&format!("UUID:      {}\n", self.text));
        out.push_str(&format!("Bytes:     {}\n", self.bytes));
        out.push_str(&format!("Variant:   {}\n", self.variant));
        out.push_str(&format!("Version:   {}\n", self.version));
        out.push_str(&format!("Time low:  0x{:08x}\n", f.time_low));
        out.push_str(&format!("Time mid:  0x{:04x}\n", f.time_mid));
        out.push_str(&format!("Time high: 0x{:04x}\n", f.time_high_and_version));
        out.push_str(&format!(
            "Clock seq: 0x{:02x}{:02x}\n",
            f.clock_seq_hi_and_reserved, f.clock_seq_low
        ));
        out.push_str(&format!("Node:      0x{:012x}", f.node));
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuidkit_core::NAMESPACE_DNS;

    #[test]
    fn test_report_fields() {
        let report = UuidReport::new(&NAMESPACE_DNS, Case::Lower);
        assert_eq!(report.text, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
        assert_eq!(report.bytes, "6ba7b8109dad11d180b400c04fd430c8");
        assert_eq!(report.variant, "standard");
        assert_eq!(report.version, "time");
        assert!(!report.nil);
        assert_eq!(report.fields.node, 0x00C04FD430C8);
        assert!(report.render().contains("Node:      0x00c04fd430c8"));
    }

    #[test]
    fn test_report_json() {
        let report = UuidReport::new(&Uuid::nil(), Case::Upper);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["text"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["nil"], true);
        assert_eq!(value["version"], "none");
        assert_eq!(value["fields"]["time_low"], 0);
    }
}
