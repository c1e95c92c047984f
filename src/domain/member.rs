use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered youth as stored, generated fields included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub id_member: i64,
    pub member_name: String,
    pub phone_number: String,
    pub t_shirt: TShirtSize,
    pub food_allergy: YesNo,
    pub sower: YesNo,
    pub ministry_position: YesNo,
    pub date_birth: NaiveDate,
    pub email: Option<String>,
    pub create_date: NaiveDateTime,
    pub update_date: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum TShirtSize {
    PP,
    P,
    M,
    G,
    GG,
    XG,
    EG,
    G1,
    G2,
    G3,
    G4,
}

impl TShirtSize {
    pub const ALL: [TShirtSize; 11] = [
        TShirtSize::PP,
        TShirtSize::P,
        TShirtSize::M,
        TShirtSize::G,
        TShirtSize::GG,
        TShirtSize::XG,
        TShirtSize::EG,
        TShirtSize::G1,
        TShirtSize::G2,
        TShirtSize::G3,
        TShirtSize::G4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TShirtSize::PP => "PP",
            TShirtSize::P => "P",
            TShirtSize::M => "M",
            TShirtSize::G => "G",
            TShirtSize::GG => "GG",
            TShirtSize::XG => "XG",
            TShirtSize::EG => "EG",
            TShirtSize::G1 => "G1",
            TShirtSize::G2 => "G2",
            TShirtSize::G3 => "G3",
            TShirtSize::G4 => "G4",
        }
    }
}

impl FromStr for TShirtSize {
    type Err = String;

    /// Accepts any casing and surrounding whitespace, e.g. `" pp "`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        TShirtSize::ALL
            .into_iter()
            .find(|size| size.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid t-shirt size: {}. Expected one of: PP, P, M, G, GG, XG, EG, G1, G2, G3, G4",
                    s
                )
            })
    }
}

impl fmt::Display for TShirtSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-valued answer. Serialized with the localized tokens the admin UI
/// shows; the English spellings are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum YesNo {
    #[serde(rename = "Sim")]
    Yes,
    #[serde(rename = "Não")]
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "Sim",
            YesNo::No => "Não",
        }
    }
}

impl FromStr for YesNo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sim" | "yes" => Ok(YesNo::Yes),
            "não" | "no" => Ok(YesNo::No),
            _ => Err(format!("Value must be 'Sim' or 'Não', got '{}'", s)),
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated record ready to insert. Built only by the validation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub member_name: String,
    pub phone_number: String,
    pub t_shirt: TShirtSize,
    pub food_allergy: YesNo,
    pub sower: YesNo,
    pub ministry_position: YesNo,
    pub date_birth: NaiveDate,
    pub email: Option<String>,
}

/// A validated partial update; `None` leaves the stored column as is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemberPatch {
    pub member_name: Option<String>,
    pub phone_number: Option<String>,
    pub t_shirt: Option<TShirtSize>,
    pub food_allergy: Option<YesNo>,
    pub sower: Option<YesNo>,
    pub ministry_position: Option<YesNo>,
    pub date_birth: Option<NaiveDate>,
    pub email: Option<String>,
}

impl MemberPatch {
    pub fn is_empty(&self) -> bool {
        self == &MemberPatch::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TShirtCount {
    pub t_shirt: TShirtSize,
    pub count: i64,
}

/// Registration indicators: how many members there are and which shirts to order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberSummary {
    pub total: i64,
    pub t_shirts: Vec<TShirtCount>,
}

impl MemberSummary {
    /// Expands sparse per-size counts into one entry per size, in size order.
    pub fn from_counts(counts: &[(TShirtSize, i64)]) -> Self {
        let t_shirts: Vec<TShirtCount> = TShirtSize::ALL
            .into_iter()
            .map(|size| TShirtCount {
                t_shirt: size,
                count: counts
                    .iter()
                    .filter(|(s, _)| *s == size)
                    .map(|(_, c)| *c)
                    .sum(),
            })
            .collect();
        let total = t_shirts.iter().map(|t| t.count).sum();

        Self { total, t_shirts }
    }
}
