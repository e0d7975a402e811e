//! Grade entity, letter grade bands and DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Letter grade.
///
/// `Ua` (absent) and `Ra` (re-attempt) are reserved letters assigned by hand;
/// [`LetterGrade::from_percentage`] never produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "letter_grade")]
pub enum LetterGrade {
    #[serde(rename = "O")]
    #[sqlx(rename = "O")]
    O,
    #[serde(rename = "A+")]
    #[sqlx(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    #[sqlx(rename = "A")]
    A,
    #[serde(rename = "B+")]
    #[sqlx(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    #[sqlx(rename = "B")]
    B,
    #[serde(rename = "C")]
    #[sqlx(rename = "C")]
    C,
    #[serde(rename = "F")]
    #[sqlx(rename = "F")]
    F,
    #[serde(rename = "UA")]
    #[sqlx(rename = "UA")]
    Ua,
    #[serde(rename = "RA")]
    #[sqlx(rename = "RA")]
    Ra,
}

/// Inclusive lower bound of each band, highest first.
const BANDS: [(f64, LetterGrade); 6] = [
    (91.0, LetterGrade::O),
    (81.0, LetterGrade::APlus),
    (71.0, LetterGrade::A),
    (61.0, LetterGrade::BPlus),
    (51.0, LetterGrade::B),
    (40.0, LetterGrade::C),
];

impl LetterGrade {
    pub fn from_percentage(percentage: f64) -> Self {
        BANDS
            .iter()
            .find(|(lower, _)| percentage >= *lower)
            .map(|(_, letter)| *letter)
            .unwrap_or(Self::F)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::O => "O",
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::F => "F",
            Self::Ua => "UA",
            Self::Ra => "RA",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `marks / total * 100`, or `None` when the total is not positive.
pub fn percentage(marks_scored: f64, total_mark: i32) -> Option<f64> {
    (total_mark > 0).then(|| marks_scored / f64::from(total_mark) * 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Grade {
    pub id: i32,
    pub student_id: i32,
    pub exam_id: i32,
    /// Faculty member who evaluated the paper.
    pub evaluated_by_id: i32,
    pub marks_scored: f64,
    pub percentage: f64,
    pub letter_grade: LetterGrade,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateGradeDto {
    pub student_id: i32,
    pub exam_id: i32,
    pub evaluated_by_id: i32,
    #[schema(example = 87.5)]
    pub marks_scored: f64,
    #[validate(length(max = 500))]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateGradeDto {
    pub marks_scored: Option<f64>,
    #[validate(length(max = 500))]
    pub comments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert_eq!(LetterGrade::from_percentage(100.0), LetterGrade::O);
        assert_eq!(LetterGrade::from_percentage(91.0), LetterGrade::O);
        assert_eq!(LetterGrade::from_percentage(90.999), LetterGrade::APlus);
        assert_eq!(LetterGrade::from_percentage(81.0), LetterGrade::APlus);
        assert_eq!(LetterGrade::from_percentage(80.5), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(71.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(61.0), LetterGrade::BPlus);
        assert_eq!(LetterGrade::from_percentage(60.99), LetterGrade::B);
        assert_eq!(LetterGrade::from_percentage(51.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_percentage(40.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_percentage(39.999), LetterGrade::F);
        assert_eq!(LetterGrade::from_percentage(0.0), LetterGrade::F);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(45.0, 50), Some(90.0));
        assert_eq!(percentage(0.0, 100), Some(0.0));
        assert_eq!(percentage(10.0, 0), None);
    }

    #[test]
    fn test_letter_grade_serializes_with_symbol() {
        assert_eq!(serde_json::to_string(&LetterGrade::APlus).unwrap(), "\"A+\"");
        let parsed: LetterGrade = serde_json::from_str("\"UA\"").unwrap();
        assert_eq!(parsed, LetterGrade::Ua);
    }
}
