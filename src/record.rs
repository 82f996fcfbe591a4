use serde::Serialize;

/// DNS record payload for the create endpoint, tagged by record type.
///
/// Serializes to `{"type": ..., "name": ..., "content": ..., "ttl": ...}`
/// with optional fields left out when unset. Field values are not checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum DnsRecord {
    A(RecordFields),
    Aaaa(RecordFields),
    Cname(RecordFields),
    Mx {
        #[serde(flatten)]
        fields: RecordFields,
        priority: u16,
    },
    Txt(RecordFields),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFields {
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

impl RecordFields {
    pub fn new(name: impl Into<String>, content: impl Into<String>, ttl: u32) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            ttl,
            proxied: None,
        }
    }

    pub fn proxied(mut self, proxied: bool) -> Self {
        self.proxied = Some(proxied);
        self
    }
}

impl DnsRecord {
    /// Builds a record from a type name as accepted on the command line.
    pub fn from_parts(record_type: &str, fields: RecordFields, priority: Option<u16>) -> Option<Self> {
        let record = match record_type.to_ascii_uppercase().as_str() {
            "A" => DnsRecord::A(fields),
            "AAAA" => DnsRecord::Aaaa(fields),
            "CNAME" => DnsRecord::Cname(fields),
            "MX" => DnsRecord::Mx {
                fields,
                priority: priority.unwrap_or(10),
            },
            "TXT" => DnsRecord::Txt(fields),
            _ => return None,
        };
        Some(record)
    }

    pub fn record_type(&self) -> &'static str {
        match self {
            DnsRecord::A(_) => "A",
            DnsRecord::Aaaa(_) => "AAAA",
            DnsRecord::Cname(_) => "CNAME",
            DnsRecord::Mx { .. } => "MX",
            DnsRecord::Txt(_) => "TXT",
        }
    }

    pub fn fields(&self) -> &RecordFields {
        match self {
            DnsRecord::A(fields)
            | DnsRecord::Aaaa(fields)
            | DnsRecord::Cname(fields)
            | DnsRecord::Txt(fields) => fields,
            DnsRecord::Mx { fields, .. } => fields,
        }
    }
}
