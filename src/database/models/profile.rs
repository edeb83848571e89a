use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Geographic point in WGS 84, longitude first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// Gender enumeration, carried over the wire as its raw integer value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i16", into = "i16")]
#[repr(i16)]
pub enum Gender {
    Male = 0,
    Female = 1,
    Other = 2,
}

impl From<Gender> for i16 {
    fn from(g: Gender) -> Self {
        g as i16
    }
}

impl TryFrom<i16> for Gender {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Gender::Male),
            1 => Ok(Gender::Female),
            2 => Ok(Gender::Other),
            other => Err(format!("invalid gender value: {}", other)),
        }
    }
}

/// Column list shared by every profile query. The PostGIS point is split into
/// longitude/latitude doubles so the row maps onto plain sqlx types.
pub const PROFILE_COLUMNS: &str = "id, owner_id, name, first_name, last_name, birthday, gender, \
     bio, ST_X(location::geometry) AS longitude, ST_Y(location::geometry) AS latitude, \
     created_at, updated_at";

/// Raw database row for a profile
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub owner_id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub bio: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API representation of a profile. `owner_id` stays server-side; it is the
/// authorization key, not response data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    #[serde(skip)]
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(with = "birthday_format")]
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub bio: Option<String>,
    pub location: Option<GeoPoint>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        let location = match (row.longitude, row.latitude) {
            (Some(longitude), Some(latitude)) => Some(GeoPoint {
                longitude,
                latitude,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            name: row.name,
            first_name: row.first_name,
            last_name: row.last_name,
            birthday: row.birthday,
            gender: row.gender,
            bio: row.bio,
            location,
        }
    }
}

/// Fixed wire format for birthdays: `yyyy-MM-dd'T'HH:mm:ss` followed by `Z`
/// or a numeric UTC offset. No fractional seconds, no date-only shorthand.
/// The time-of-day is dropped on decode; encode emits midnight UTC.
pub mod birthday_format {
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn parse(s: &str) -> Result<NaiveDate, String> {
        let utc: DateTime<Utc> = if let Some(naive) = s.strip_suffix('Z') {
            NaiveDateTime::parse_from_str(naive, PATTERN)
                .map(|n| Utc.from_utc_datetime(&n))
                .map_err(|e| format!("invalid timestamp '{}': {}", s, e))?
        } else {
            DateTime::<FixedOffset>::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z")
                .map(|d| d.with_timezone(&Utc))
                .map_err(|e| format!("invalid timestamp '{}': {}", s, e))?
        };
        Ok(utc.date_naive())
    }

    pub fn format(date: NaiveDate) -> String {
        format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
    }

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&format(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(s) => parse(&s).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn gender_round_trips_raw_values() {
        assert_eq!(Gender::try_from(0i16), Ok(Gender::Male));
        assert_eq!(Gender::try_from(2i16), Ok(Gender::Other));
        assert!(Gender::try_from(3i16).is_err());
        assert_eq!(i16::from(Gender::Female), 1);
    }

    #[test]
    fn birthday_parses_fixed_format() {
        let d = birthday_format::parse("2020-01-01T00:00:00Z").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());

        // Numeric offsets are normalized to UTC before the date is taken
        let d = birthday_format::parse("2020-01-01T23:30:00+0200").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn birthday_rejects_other_shapes() {
        assert!(birthday_format::parse("2020-01-01").is_err());
        assert!(birthday_format::parse("2020-01-01T00:00:00.000Z").is_err());
        assert!(birthday_format::parse("01/01/2020").is_err());
    }

    #[test]
    fn profile_serializes_api_fields() {
        let profile = Profile {
            id: 7,
            owner_id: "1234".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            name: Some("Test".to_string()),
            first_name: None,
            last_name: None,
            birthday: NaiveDate::from_ymd_opt(2020, 1, 1),
            gender: Some(Gender::Male),
            bio: None,
            location: Some(GeoPoint {
                longitude: 151.2,
                latitude: -33.8,
            }),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "Test");
        assert_eq!(json["gender"], 0);
        assert_eq!(json["birthday"], "2020-01-01T00:00:00Z");
        assert_eq!(json["location"]["longitude"], 151.2);
        assert_eq!(json["firstName"], serde_json::Value::Null);
        // Authorization key never leaves the server
        assert!(json.get("ownerId").is_none());
        assert!(json.get("owner_id").is_none());
    }
}
