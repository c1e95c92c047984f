//! Input validation for member records.
//!
//! Raw request bodies are checked field by field and turned into the typed
//! [`NewMember`] / [`MemberPatch`] values the repository accepts. Nothing in
//! here touches storage.

use std::borrow::Cow;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    domain::{MemberPatch, NewMember, TShirtSize, YesNo},
    error::{AppError, Result},
    schema::{EMAIL_MAX, MEMBER_NAME_MAX, MEMBER_NAME_MIN, PHONE_NUMBER_MAX, PHONE_NUMBER_MIN},
};

// Brazilian landline or mobile number, area code optionally in parentheses.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?[1-9]{2}\)? ?(?:[2-8]|9[1-9])[0-9]{3}\-?[0-9]{4}$").expect("valid phone regex")
});
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Body of a create request. Missing fields deserialize to their empty
/// value and are rejected by validation.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct MemberInput {
    #[validate(
        custom(function = "not_blank"),
        length(min = MEMBER_NAME_MIN, max = MEMBER_NAME_MAX, message = "must be between 3 and 255 characters")
    )]
    pub member_name: String,
    #[validate(
        custom(function = "not_blank"),
        length(min = PHONE_NUMBER_MIN, max = PHONE_NUMBER_MAX, message = "must be between 10 and 15 characters"),
        regex(path = *PHONE_RE, message = "must look like (11) 91234-5678")
    )]
    pub phone_number: String,
    #[validate(custom(function = "valid_t_shirt"))]
    pub t_shirt: String,
    #[validate(custom(function = "valid_yes_no"))]
    pub food_allergy: String,
    #[validate(custom(function = "valid_yes_no"))]
    pub sower: String,
    #[validate(custom(function = "valid_yes_no"))]
    pub ministry_position: String,
    #[validate(required(message = "is required"))]
    pub date_birth: Option<NaiveDate>,
    #[validate(
        regex(path = *EMAIL_RE, message = "is not a valid email address"),
        length(max = EMAIL_MAX, message = "must be at most 50 characters")
    )]
    pub email: Option<String>,
}

/// Body of an update request. Every field is optional, but at least one
/// must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct MemberPatchInput {
    #[validate(
        custom(function = "not_blank"),
        length(min = MEMBER_NAME_MIN, max = MEMBER_NAME_MAX, message = "must be between 3 and 255 characters")
    )]
    pub member_name: Option<String>,
    #[validate(
        custom(function = "not_blank"),
        length(min = PHONE_NUMBER_MIN, max = PHONE_NUMBER_MAX, message = "must be between 10 and 15 characters"),
        regex(path = *PHONE_RE, message = "must look like (11) 91234-5678")
    )]
    pub phone_number: Option<String>,
    #[validate(custom(function = "valid_t_shirt"))]
    pub t_shirt: Option<String>,
    #[validate(custom(function = "valid_yes_no"))]
    pub food_allergy: Option<String>,
    #[validate(custom(function = "valid_yes_no"))]
    pub sower: Option<String>,
    #[validate(custom(function = "valid_yes_no"))]
    pub ministry_position: Option<String>,
    pub date_birth: Option<NaiveDate>,
    #[validate(
        regex(path = *EMAIL_RE, message = "is not a valid email address"),
        length(max = EMAIL_MAX, message = "must be at most 50 characters")
    )]
    pub email: Option<String>,
}

impl MemberInput {
    pub fn into_new_member(self) -> Result<NewMember> {
        let input = MemberInput {
            email: non_blank(self.email),
            ..self
        };
        input.validate().map_err(to_app_error)?;

        let date_birth = input
            .date_birth
            .ok_or_else(|| AppError::Validation("date_birth: is required".to_string()))?;

        Ok(NewMember {
            t_shirt: parse_field("t_shirt", &input.t_shirt)?,
            food_allergy: parse_field("food_allergy", &input.food_allergy)?,
            sower: parse_field("sower", &input.sower)?,
            ministry_position: parse_field("ministry_position", &input.ministry_position)?,
            member_name: input.member_name,
            phone_number: input.phone_number,
            date_birth,
            email: input.email,
        })
    }
}

impl MemberPatchInput {
    pub fn is_empty(&self) -> bool {
        self.member_name.is_none()
            && self.phone_number.is_none()
            && self.t_shirt.is_none()
            && self.food_allergy.is_none()
            && self.sower.is_none()
            && self.ministry_position.is_none()
            && self.date_birth.is_none()
            && self.email.is_none()
    }

    pub fn into_patch(self) -> Result<MemberPatch> {
        let input = MemberPatchInput {
            email: non_blank(self.email),
            ..self
        };
        if input.is_empty() {
            return Err(AppError::Validation("no field provided to update".to_string()));
        }
        input.validate().map_err(to_app_error)?;

        Ok(MemberPatch {
            t_shirt: parse_optional("t_shirt", input.t_shirt.as_deref())?,
            food_allergy: parse_optional("food_allergy", input.food_allergy.as_deref())?,
            sower: parse_optional("sower", input.sower.as_deref())?,
            ministry_position: parse_optional("ministry_position", input.ministry_position.as_deref())?,
            member_name: input.member_name,
            phone_number: input.phone_number,
            date_birth: input.date_birth,
            email: input.email,
        })
    }
}

fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::from("must not be empty")));
    }
    Ok(())
}

fn valid_t_shirt(value: &str) -> std::result::Result<(), ValidationError> {
    value
        .parse::<TShirtSize>()
        .map(|_| ())
        .map_err(|msg| ValidationError::new("t_shirt").with_message(Cow::from(msg)))
}

fn valid_yes_no(value: &str) -> std::result::Result<(), ValidationError> {
    value
        .parse::<YesNo>()
        .map(|_| ())
        .map_err(|msg| ValidationError::new("yes_no").with_message(Cow::from(msg)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_field<T>(field: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|msg| AppError::Validation(format!("{}: {}", field, msg)))
}

fn parse_optional<T>(field: &str, value: Option<&str>) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    value.map(|v| parse_field(field, v)).transpose()
}

fn to_app_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let detail = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                format!("{}: {}", field, detail)
            })
        })
        .collect();
    messages.sort();

    AppError::Validation(messages.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> MemberInput {
        MemberInput {
            member_name: "Ana Souza".to_string(),
            phone_number: "(11) 94002-8922".to_string(),
            t_shirt: "M".to_string(),
            food_allergy: "Não".to_string(),
            sower: "Sim".to_string(),
            ministry_position: "Não".to_string(),
            date_birth: NaiveDate::from_ymd_opt(2008, 3, 14),
            email: Some("ana@example.com".to_string()),
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_a_complete_record() {
        let member = valid_input().into_new_member().unwrap();
        assert_eq!(member.member_name, "Ana Souza");
        assert_eq!(member.t_shirt, TShirtSize::M);
        assert_eq!(member.sower, YesNo::Yes);
        assert_eq!(member.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn lowercase_t_shirt_is_normalized() {
        let input = MemberInput {
            t_shirt: "pp".to_string(),
            ..valid_input()
        };
        assert_eq!(input.into_new_member().unwrap().t_shirt, TShirtSize::PP);
    }

    #[test]
    fn unknown_t_shirt_is_rejected() {
        let input = MemberInput {
            t_shirt: "XXL".to_string(),
            ..valid_input()
        };
        assert!(message(input.into_new_member().unwrap_err()).starts_with("t_shirt:"));
    }

    #[test]
    fn yes_no_fields_reject_other_answers() {
        let input = MemberInput {
            food_allergy: "Maybe".to_string(),
            ..valid_input()
        };
        assert!(message(input.into_new_member().unwrap_err()).contains("food_allergy"));
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let input = MemberInput {
            member_name: "     ".to_string(),
            ..valid_input()
        };
        let msg = message(input.into_new_member().unwrap_err());
        assert!(msg.contains("member_name: must not be empty"), "{}", msg);
    }

    #[test]
    fn name_and_phone_lengths_are_bounded() {
        let short_name = MemberInput {
            member_name: "Al".to_string(),
            ..valid_input()
        };
        assert!(short_name.into_new_member().is_err());

        let long_name = MemberInput {
            member_name: "a".repeat(256),
            ..valid_input()
        };
        assert!(long_name.into_new_member().is_err());

        let short_phone = MemberInput {
            phone_number: "123456789".to_string(),
            ..valid_input()
        };
        assert!(message(short_phone.into_new_member().unwrap_err()).contains("phone_number"));

        let long_phone = MemberInput {
            phone_number: "1".repeat(16),
            ..valid_input()
        };
        assert!(long_phone.into_new_member().is_err());
    }

    #[test]
    fn phone_must_follow_the_regional_format() {
        for phone in ["(11) 94002-8922", "11940028922", "(21)3333-4444", "21 98888-7777"] {
            let input = MemberInput {
                phone_number: phone.to_string(),
                ..valid_input()
            };
            assert!(input.into_new_member().is_ok(), "{} was rejected", phone);
        }

        for phone in ["abcdefghijk", "(01) 94002-8922", "(11) 90002-8922", "(11) 14002-8922", "+55 11 94002-892"] {
            let input = MemberInput {
                phone_number: phone.to_string(),
                ..valid_input()
            };
            let msg = message(input.into_new_member().unwrap_err());
            assert!(msg.contains("phone_number"), "{} accepted: {}", phone, msg);
        }

        let patch = MemberPatchInput {
            phone_number: Some("phone-number".to_string()),
            ..Default::default()
        };
        assert!(message(patch.into_patch().unwrap_err()).contains("phone_number"));
    }

    #[test]
    fn date_of_birth_is_required() {
        let input = MemberInput {
            date_birth: None,
            ..valid_input()
        };
        assert!(message(input.into_new_member().unwrap_err()).contains("date_birth"));
    }

    #[test]
    fn email_is_optional_but_checked() {
        let without = MemberInput {
            email: None,
            ..valid_input()
        };
        assert_eq!(without.into_new_member().unwrap().email, None);

        let blank = MemberInput {
            email: Some("  ".to_string()),
            ..valid_input()
        };
        assert_eq!(blank.into_new_member().unwrap().email, None);

        let malformed = MemberInput {
            email: Some("not-an-email".to_string()),
            ..valid_input()
        };
        assert!(message(malformed.into_new_member().unwrap_err()).contains("email"));

        let undotted_domain = MemberInput {
            email: Some("a@b".to_string()),
            ..valid_input()
        };
        assert!(message(undotted_domain.into_new_member().unwrap_err()).contains("email"));

        let too_long = MemberInput {
            email: Some(format!("{}@example.com", "a".repeat(45))),
            ..valid_input()
        };
        assert!(too_long.into_new_member().is_err());
    }

    #[test]
    fn every_failing_field_is_reported() {
        let msg = message(MemberInput::default().into_new_member().unwrap_err());
        for field in ["member_name", "phone_number", "t_shirt", "sower", "date_birth"] {
            assert!(msg.contains(field), "{} not in {}", field, msg);
        }
    }

    #[test]
    fn empty_patch_is_rejected() {
        let msg = message(MemberPatchInput::default().into_patch().unwrap_err());
        assert_eq!(msg, "no field provided to update");

        let blank_email_only = MemberPatchInput {
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(blank_email_only.into_patch().is_err());
    }

    #[test]
    fn patch_validates_only_provided_fields() {
        let patch = MemberPatchInput {
            t_shirt: Some(" gg ".to_string()),
            ..Default::default()
        }
        .into_patch()
        .unwrap();
        assert_eq!(patch.t_shirt, Some(TShirtSize::GG));
        assert_eq!(patch.member_name, None);

        let bad = MemberPatchInput {
            sower: Some("talvez".to_string()),
            ..Default::default()
        };
        assert!(message(bad.into_patch().unwrap_err()).contains("sower"));
    }

    #[test]
    fn patch_deserializes_from_partial_json() {
        let input: MemberPatchInput = serde_json::from_str(r#"{"ministry_position": "Sim"}"#).unwrap();
        let patch = input.into_patch().unwrap();
        assert_eq!(patch.ministry_position, Some(YesNo::Yes));
        assert!(patch.date_birth.is_none());
    }
}
