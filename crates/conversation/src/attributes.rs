//! The four questionnaire attributes and their closed value sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One of the categorical fields the questionnaire collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    SkinType,
    SkinTone,
    HairColor,
    EyeColor,
}

/// Legal values for one attribute.
///
/// Values are stored in their normalized form (see [`normalize`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub attribute: Attribute,
    pub valid_values: &'static [&'static str],
}

static SPECS: [AttributeSpec; 4] = [
    AttributeSpec {
        attribute: Attribute::SkinType,
        valid_values: &["Oily", "Dry", "Normal", "Combination"],
    },
    AttributeSpec {
        attribute: Attribute::SkinTone,
        valid_values: &["Fair", "Medium", "Olive", "Dark"],
    },
    AttributeSpec {
        attribute: Attribute::HairColor,
        valid_values: &["Black", "Brown", "Blonde", "Red", "Other"],
    },
    AttributeSpec {
        attribute: Attribute::EyeColor,
        valid_values: &["Brown", "Blue", "Green", "Hazel", "Other"],
    },
];

impl Attribute {
    /// Question order
    pub const ALL: [Attribute; 4] = [
        Attribute::SkinType,
        Attribute::SkinTone,
        Attribute::HairColor,
        Attribute::EyeColor,
    ];

    /// Feature / answer key, e.g. `skin_type`
    pub fn key(self) -> &'static str {
        match self {
            Attribute::SkinType => "skin_type",
            Attribute::SkinTone => "skin_tone",
            Attribute::HairColor => "hair_color",
            Attribute::EyeColor => "eye_color",
        }
    }

    /// Human-readable name, e.g. `skin type`
    pub fn label(self) -> &'static str {
        match self {
            Attribute::SkinType => "skin type",
            Attribute::SkinTone => "skin tone",
            Attribute::HairColor => "hair color",
            Attribute::EyeColor => "eye color",
        }
    }

    pub fn spec(self) -> &'static AttributeSpec {
        &SPECS[self as usize]
    }

    /// Bot prompt asking for this attribute
    pub fn question(self) -> String {
        let lead = match self {
            Attribute::SkinType => "🌸 Hi there, I'm Lumi! Let's find products that suit you. What's your",
            Attribute::SkinTone => "🌼 Thanks! What's your",
            Attribute::HairColor => "💇 Lovely! What's your",
            Attribute::EyeColor => "👁️ Last one! What's your",
        };
        format!("{} <b>{}</b>? ({})", lead, self.label(), self.spec().options())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input that isn't one of an attribute's legal values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value:?} is not a valid {attribute}; choose from: {}", .valid_values.join(", "))]
pub struct InvalidChoice {
    pub attribute: Attribute,
    pub value: String,
    pub valid_values: &'static [&'static str],
}

impl AttributeSpec {
    /// Comma separated list of the legal values
    pub fn options(&self) -> String {
        self.valid_values.join(", ")
    }

    /// Normalize `raw` and accept it only if it is a legal value
    pub fn validate(&self, raw: &str) -> Result<String, InvalidChoice> {
        let value = normalize(raw);
        if self.valid_values.contains(&value.as_str()) {
            Ok(value)
        } else {
            Err(InvalidChoice {
                attribute: self.attribute,
                value: raw.to_string(),
                valid_values: self.valid_values,
            })
        }
    }
}

/// Trim, upper-case the first character and lower-case the rest.
///
/// Applies to the whole string, so `"light brown"` becomes `"Light brown"`.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  oily "), "Oily");
        assert_eq!(normalize("OILY"), "Oily");
        assert_eq!(normalize("cOMBINATION"), "Combination");
        assert_eq!(normalize("light brown"), "Light brown");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_specs_line_up_with_attributes() {
        for attribute in Attribute::ALL {
            assert_eq!(attribute.spec().attribute, attribute);
        }
    }

    #[test]
    fn test_validate_accepts_any_casing() {
        let spec = Attribute::HairColor.spec();
        assert_eq!(spec.validate("blonde").unwrap(), "Blonde");
        assert_eq!(spec.validate(" RED ").unwrap(), "Red");
    }

    #[test]
    fn test_validate_rejects_outside_values() {
        let err = Attribute::SkinTone.spec().validate("Purple").unwrap_err();
        assert_eq!(err.attribute, Attribute::SkinTone);
        assert_eq!(err.value, "Purple");
        assert_eq!(err.valid_values, &["Fair", "Medium", "Olive", "Dark"]);
        assert_eq!(
            err.to_string(),
            "\"Purple\" is not a valid skin tone; choose from: Fair, Medium, Olive, Dark"
        );
    }

    #[test]
    fn test_value_valid_for_one_attribute_only() {
        assert!(Attribute::HairColor.spec().validate("Black").is_ok());
        assert!(Attribute::EyeColor.spec().validate("Black").is_err());
    }

    #[test]
    fn test_question_lists_options() {
        let question = Attribute::EyeColor.question();
        assert!(question.contains("<b>eye color</b>"));
        assert!(question.contains("(Brown, Blue, Green, Hazel, Other)"));
    }
}
