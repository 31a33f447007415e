use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// National identifier, assigned by the caller.
pub type PatientId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}
