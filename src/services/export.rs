//! CSV export of visitor records

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::models::visitor::Visitor;

const HEADERS: [&str; 20] = [
    "ID",
    "Name",
    "Email",
    "Phone",
    "Company",
    "Purpose",
    "Host",
    "Department",
    "Badge Number",
    "ID Proof Type",
    "ID Proof Number",
    "Vehicle Number",
    "Has Laptop",
    "Laptop Make",
    "Laptop Model",
    "Laptop Serial",
    "Check In",
    "Check Out",
    "Status",
    "Notes",
];

/// Download file name for an export made on `date`
pub fn export_filename(date: NaiveDate) -> String {
    format!("visitors-{}.csv", date.format("%Y-%m-%d"))
}

/// Quote a text field, doubling embedded quotes
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn optional(value: &Option<String>) -> String {
    value.as_deref().map(quoted).unwrap_or_default()
}

/// RFC 3339 with the same fractional digits as the JSON representation
fn timestamp(value: &DateTime<Utc>) -> String {
    quoted(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

fn row(visitor: &Visitor) -> String {
    let fields = [
        visitor.id.to_string(),
        quoted(&visitor.name),
        optional(&visitor.email),
        optional(&visitor.phone),
        optional(&visitor.company),
        quoted(&visitor.purpose),
        quoted(&visitor.host_name),
        optional(&visitor.host_department),
        optional(&visitor.badge_number),
        optional(&visitor.id_proof_type),
        optional(&visitor.id_proof_number),
        optional(&visitor.vehicle_number),
        visitor.has_laptop.to_string(),
        optional(&visitor.laptop_make),
        optional(&visitor.laptop_model),
        optional(&visitor.laptop_serial),
        timestamp(&visitor.check_in_time),
        visitor.check_out_time.as_ref().map(timestamp).unwrap_or_default(),
        quoted(visitor.status.as_str()),
        optional(&visitor.notes),
    ];
    fields.join(",")
}

/// Render visitors as CSV: a quoted header row, then one line per visitor
pub fn visitors_to_csv(visitors: &[Visitor]) -> String {
    let mut out = HEADERS.iter().map(|h| quoted(h)).collect::<Vec<_>>().join(",");
    out.push('\n');
    for visitor in visitors {
        out.push_str(&row(visitor));
        out.push('\n');
    }
    out
}
