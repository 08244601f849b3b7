use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;

/// Per-hole statistic that a player may or may not have tracked.
///
/// `Absent` is stored as SQL `NULL` and is distinct from `Recorded(vec![])`,
/// which is stored as the JSON text `[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatSeries<T> {
    #[default]
    Absent,
    Recorded(Vec<T>),
}

impl<T: Serialize> StatSeries<T> {
    pub fn to_column(&self) -> Result<Option<String>, serde_json::Error> {
        match self {
            Self::Absent => Ok(None),
            Self::Recorded(values) => serde_json::to_string(values).map(Some),
        }
    }
}

impl<T: DeserializeOwned> StatSeries<T> {
    /// Undecodable column text is treated as untracked.
    pub fn from_column(column: Option<&str>) -> Self {
        column
            .and_then(|raw| serde_json::from_str(raw).ok())
            .map_or(Self::Absent, Self::Recorded)
    }
}

impl<T> From<Option<Vec<T>>> for StatSeries<T> {
    fn from(value: Option<Vec<T>>) -> Self {
        value.map_or(Self::Absent, Self::Recorded)
    }
}

impl<T: Serialize> Serialize for StatSeries<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Recorded(values) => serializer.serialize_some(values),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for StatSeries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<Vec<T>>::deserialize(deserializer).map(Self::from)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoundRequest {
    pub course_id: i64,
    pub tee_box_id: i64,
    pub date: String,
    pub scores: Vec<i64>,
    #[serde(default)]
    pub putts: StatSeries<i64>,
    #[serde(default)]
    pub gir: StatSeries<bool>,
    #[serde(default)]
    pub fairways: StatSeries<bool>,
    #[serde(default)]
    pub bunkers: StatSeries<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundCreated {
    pub id: i64,
    pub message: String,
}

/// Raw `rounds` row joined with course and tee names.
#[derive(Debug, Clone, FromRow)]
pub struct RoundRow {
    pub id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub tee_box_id: i64,
    pub tee_name: String,
    pub date: String,
    pub scores: String,
    pub putts: Option<String>,
    pub gir: Option<String>,
    pub fairways: Option<String>,
    pub bunkers: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    pub id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub tee_box_id: i64,
    pub tee_name: String,
    pub date: String,
    pub scores: Vec<i64>,
    pub putts: StatSeries<i64>,
    pub gir: StatSeries<bool>,
    pub fairways: StatSeries<bool>,
    pub bunkers: StatSeries<i64>,
    pub total_score: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_are_stored_differently() {
        let absent: StatSeries<i64> = StatSeries::Absent;
        let empty: StatSeries<i64> = StatSeries::Recorded(vec![]);
        assert_eq!(absent.to_column().unwrap(), None);
        assert_eq!(empty.to_column().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn column_decoding() {
        assert_eq!(
            StatSeries::<bool>::from_column(Some("[true,false]")),
            StatSeries::Recorded(vec![true, false])
        );
        assert_eq!(StatSeries::<bool>::from_column(None), StatSeries::Absent);
        assert_eq!(StatSeries::<i64>::from_column(Some("not json")), StatSeries::Absent);
    }

    #[test]
    fn request_without_stats_deserializes_as_absent() {
        let req: NewRoundRequest = serde_json::from_str(
            r#"{"course_id":1,"tee_box_id":2,"date":"2025-06-01","scores":[4,4,4],"putts":null,"gir":[]}"#,
        )
        .unwrap();
        assert_eq!(req.putts, StatSeries::Absent);
        assert_eq!(req.gir, StatSeries::Recorded(vec![]));
        assert_eq!(req.fairways, StatSeries::Absent);
        assert_eq!(req.bunkers, StatSeries::Absent);
    }

    #[test]
    fn absent_serializes_as_null() {
        let value = serde_json::to_value(StatSeries::<i64>::Absent).unwrap();
        assert!(value.is_null());
        let value = serde_json::to_value(StatSeries::Recorded(vec![2, 1])).unwrap();
        assert_eq!(value, serde_json::json!([2, 1]));
    }
}
