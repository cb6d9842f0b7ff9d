//! Lesson bookings for the Reverb Music Academy

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::schema::{parse_date_time, FieldDef, FieldType, Model, ModelSpec};

/// Instrument or discipline for a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LessonInstrument {
    Guitar,
    Kanto,
    Piano,
    Drums,
}

impl LessonInstrument {
    pub const ALL: [LessonInstrument; 4] = [
        LessonInstrument::Guitar,
        LessonInstrument::Kanto,
        LessonInstrument::Piano,
        LessonInstrument::Drums,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LessonInstrument::Guitar => "Guitar",
            LessonInstrument::Kanto => "Kanto",
            LessonInstrument::Piano => "Piano",
            LessonInstrument::Drums => "Drums",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// Booking collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub instrument: LessonInstrument,
    /// YYYY-MM-DD, kept as entered
    pub preferred_date: String,
    /// HH:MM, kept as entered
    pub preferred_time: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, deserialize_with = "lenient_date_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_date_time")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Timestamps without an offset are read as UTC
fn lenient_date_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| {
            parse_date_time(&s)
                .ok_or_else(|| de::Error::custom(format!("invalid date_time '{}'", s)))
        })
        .transpose()
}

impl Model for Booking {
    const NAME: &'static str = "booking";

    fn spec() -> ModelSpec {
        let instruments = LessonInstrument::ALL.iter().map(LessonInstrument::as_str);
        let statuses = BookingStatus::ALL.iter().map(BookingStatus::as_str);

        ModelSpec::new(
            Self::NAME,
            vec![
                FieldDef::required("name", FieldType::String)
                    .min_length(2)
                    .max_length(100)
                    .describe("Student full name"),
                FieldDef::required("email", FieldType::Email).describe("Contact email"),
                FieldDef::optional("phone", FieldType::String)
                    .nullable()
                    .max_length(30)
                    .describe("Contact phone number"),
                FieldDef::required("instrument", FieldType::one_of(instruments))
                    .describe("Instrument/discipline for the lesson"),
                FieldDef::required("preferred_date", FieldType::String)
                    .describe("Preferred date (YYYY-MM-DD)"),
                FieldDef::required("preferred_time", FieldType::String)
                    .describe("Preferred time (HH:MM)"),
                FieldDef::optional("message", FieldType::String)
                    .nullable()
                    .max_length(1000)
                    .describe("Additional notes or goals"),
                FieldDef::optional("teacher", FieldType::String)
                    .nullable()
                    .max_length(100)
                    .describe("Preferred teacher if any"),
                FieldDef::optional("source", FieldType::String)
                    .nullable()
                    .with_default("website")
                    .describe("Where the booking came from"),
                FieldDef::optional("status", FieldType::one_of(statuses))
                    .with_default(BookingStatus::Pending.as_str())
                    .describe("Booking status"),
                FieldDef::optional("created_at", FieldType::DateTime).nullable(),
                FieldDef::optional("updated_at", FieldType::DateTime).nullable(),
            ],
        )
        .describe("Lesson bookings for Reverb Music Academy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ModelRegistry;
    use serde_json::json;

    fn registry() -> ModelRegistry {
        let registry = ModelRegistry::new();
        registry.register(Booking::spec()).unwrap();
        registry
    }

    #[test]
    fn test_enum_values_follow_native_enums() {
        let spec = Booking::spec();
        let instrument = spec.field("instrument").unwrap();
        assert_eq!(
            instrument.field_type,
            FieldType::one_of(["Guitar", "Kanto", "Piano", "Drums"])
        );
        let status = spec.field("status").unwrap();
        assert_eq!(
            status.field_type,
            FieldType::one_of(["pending", "confirmed", "cancelled"])
        );
    }

    #[test]
    fn test_validate_as_booking() {
        let booking: Booking = registry()
            .validate_as(&json!({
                "name": "Al",
                "email": "a@b.com",
                "instrument": "Kanto",
                "preferred_date": "2024-01-01",
                "preferred_time": "10:00",
                "created_at": "2024-01-01T09:00:00+02:00"
            }))
            .unwrap();

        assert_eq!(booking.instrument, LessonInstrument::Kanto);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.source.as_deref(), Some("website"));
        assert_eq!(
            booking.created_at.map(|t| t.to_rfc3339()),
            Some("2024-01-01T07:00:00+00:00".to_string())
        );
    }

    fn base_booking() -> serde_json::Value {
        json!({
            "name": "Al",
            "email": "a@b.com",
            "instrument": "Piano",
            "preferred_date": "2024-01-01",
            "preferred_time": "10:00"
        })
    }

    #[test]
    fn test_naive_timestamps_read_as_utc() {
        let mut doc = base_booking();
        doc["created_at"] = json!("2024-01-01T10:00:00");
        doc["updated_at"] = json!("2024-01-02");

        let booking: Booking = registry().validate_as(&doc).unwrap();
        assert_eq!(
            booking.created_at.map(|t| t.to_rfc3339()),
            Some("2024-01-01T10:00:00+00:00".to_string())
        );
        assert_eq!(
            booking.updated_at.map(|t| t.to_rfc3339()),
            Some("2024-01-02T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_null_status_rejected() {
        let mut doc = base_booking();
        doc["status"] = json!(null);

        let err = registry().validate_as::<Booking>(&doc).unwrap_err();
        assert_eq!(err.code().code(), "FLAMES_VALIDATION_FAILED");
        assert_eq!(
            err.violations(),
            &[crate::schema::Violation::type_mismatch("status", "enum", "null")]
        );
    }

    #[test]
    fn test_null_optional_text_accepted() {
        let mut doc = base_booking();
        doc["phone"] = json!(null);
        doc["created_at"] = json!(null);

        let booking: Booking = registry().validate_as(&doc).unwrap();
        assert_eq!(booking.phone, None);
        assert_eq!(booking.created_at, None);
    }

    #[test]
    fn test_phone_length() {
        let doc = json!({
            "name": "Al",
            "email": "a@b.com",
            "instrument": "Drums",
            "preferred_date": "2024-01-01",
            "preferred_time": "10:00",
            "phone": "0".repeat(31)
        });
        let err = registry().validate("booking", &doc).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field(), "phone");
    }
}
