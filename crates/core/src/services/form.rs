//! Notification form validation and platform-scoped field groups.
//!
//! [`validate`] turns a raw [`NotificationForm`] into a [`NotificationRequest`]
//! or reports every rejected field at once. [`visible_groups`] decides which
//! optional field groups a client should present for a platform; it never
//! affects validation.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use pushboard_common::{FieldErrorKind, FieldErrors};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: u64 = 100;
/// Maximum message length in characters.
pub const MESSAGE_MAX_LEN: u64 = 500;
/// Maximum subtitle length in characters.
pub const SUBTITLE_MAX_LEN: u64 = 100;
/// Maximum channel id length in characters.
pub const CHANNEL_ID_MAX_LEN: u64 = 100;

const PLATFORM_REQUIRED: &str = "You need to select a platform";

static BADGE_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]*$").unwrap());

/// Target mobile OS family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple devices only.
    Ios,
    /// Android devices only.
    Android,
    /// Both platforms.
    Both,
}

impl Platform {
    /// Wire name of the platform.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Both => "both",
        }
    }

    /// Whether notifications for this platform reach devices of `group`.
    #[must_use]
    pub const fn includes(self, group: FieldGroup) -> bool {
        matches!(
            (self, group),
            (Self::Both, _) | (Self::Ios, FieldGroup::Ios) | (Self::Android, FieldGroup::Android)
        )
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown platform: {:?}", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "both" => Ok(Self::Both),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}

/// A set of optional fields relevant to one platform only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldGroup {
    /// `subtitle`, `badgeCount` and `playSound`.
    Ios,
    /// `channelId`.
    Android,
}

impl FieldGroup {
    /// Wire names of the fields in this group.
    #[must_use]
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Ios => &["subtitle", "badgeCount", "playSound"],
            Self::Android => &["channelId"],
        }
    }
}

/// Field groups to present for `platform`.
#[must_use]
pub fn visible_groups(platform: Platform) -> BTreeSet<FieldGroup> {
    [FieldGroup::Ios, FieldGroup::Android]
        .into_iter()
        .filter(|group| platform.includes(*group))
        .collect()
}

/// Raw form input, exactly as a client submits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotificationForm {
    #[serde(default, deserialize_with = "lenient_text")]
    #[validate(
        custom(function = "title_required"),
        length(max = 100, code = "too_long", message = "Title must be 100 characters or less")
    )]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_text")]
    #[validate(
        custom(function = "message_required"),
        length(max = 500, code = "too_long", message = "Message must be 500 characters or less")
    )]
    pub message: String,

    #[serde(default, deserialize_with = "lenient_text")]
    #[validate(custom(function = "known_platform"))]
    pub platform: String,

    #[serde(default, deserialize_with = "lenient_optional_text")]
    #[validate(length(
        max = 100,
        code = "too_long",
        message = "Subtitle must be 100 characters or less"
    ))]
    pub subtitle: Option<String>,

    #[serde(default, deserialize_with = "lenient_optional_text")]
    #[validate(custom(function = "badge_count_format"))]
    pub badge_count: Option<String>,

    pub play_sound: Option<bool>,

    #[serde(default, deserialize_with = "lenient_optional_text")]
    #[validate(length(
        max = 100,
        code = "too_long",
        message = "Channel ID must be 100 characters or less"
    ))]
    pub channel_id: Option<String>,
}

impl Default for NotificationForm {
    /// The values a fresh form starts with.
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            platform: Platform::Both.as_str().to_string(),
            subtitle: Some(String::new()),
            badge_count: Some(String::new()),
            play_sound: Some(false),
            channel_id: Some(String::new()),
        }
    }
}

/// Accept any JSON value for a text field so that type mismatches surface as
/// field errors instead of a body rejection. `null` reads as absent; numbers
/// and booleans keep their JSON text.
fn lenient_optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(lenient_optional_text(d)?.unwrap_or_default())
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(message)));
    }
    Ok(())
}

fn title_required(value: &str) -> Result<(), ValidationError> {
    required(value, "Title is required")
}

fn message_required(value: &str) -> Result<(), ValidationError> {
    required(value, "Message is required")
}

fn known_platform(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Platform>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("required").with_message(Cow::Borrowed(PLATFORM_REQUIRED)))
}

fn badge_count_format(value: &str) -> Result<(), ValidationError> {
    if BADGE_COUNT_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("format")
            .with_message(Cow::Borrowed("Badge count must be a number")))
    }
}

/// A validated notification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub title: String,
    pub message: String,
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_sound: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

impl NotificationRequest {
    /// Drop values of field groups that `platform` does not present.
    #[must_use]
    pub fn without_hidden_fields(mut self) -> Self {
        if !self.platform.includes(FieldGroup::Ios) {
            self.subtitle = None;
            self.badge_count = None;
            self.play_sound = None;
        }
        if !self.platform.includes(FieldGroup::Android) {
            self.channel_id = None;
        }
        self
    }
}

/// Empty optional text counts as not provided.
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Validate a raw form.
///
/// Every field is checked independently, so the error set names every
/// problem at once. Platform-scoped fields are validated whether or not
/// their group is visible.
pub fn validate(input: &NotificationForm) -> Result<NotificationRequest, FieldErrors> {
    Validate::validate(input).map_err(FieldErrors::from)?;

    let platform = input.platform.parse::<Platform>().map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.add("platform", FieldErrorKind::Required, PLATFORM_REQUIRED);
        errors
    })?;

    Ok(NotificationRequest {
        title: input.title.clone(),
        message: input.message.clone(),
        platform,
        subtitle: non_empty(input.subtitle.as_ref()),
        badge_count: non_empty(input.badge_count.as_ref()),
        play_sound: input.play_sound,
        channel_id: non_empty(input.channel_id.as_ref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, message: &str, platform: &str) -> NotificationForm {
        NotificationForm {
            title: title.to_string(),
            message: message.to_string(),
            platform: platform.to_string(),
            subtitle: None,
            badge_count: None,
            play_sound: None,
            channel_id: None,
        }
    }

    #[test]
    fn test_title_length_bounds() {
        let err = validate(&form("", "World", "both")).unwrap_err();
        assert_eq!(err.kind("title"), Some(FieldErrorKind::Required));

        for len in [1, 50, 100] {
            let title = "a".repeat(len);
            assert!(validate(&form(&title, "World", "both")).is_ok(), "len {len}");
        }

        for len in [101, 250] {
            let title = "a".repeat(len);
            let err = validate(&form(&title, "World", "both")).unwrap_err();
            assert_eq!(err.kind("title"), Some(FieldErrorKind::TooLong { max: 100 }));
        }
    }

    #[test]
    fn test_length_counts_characters() {
        let title = "é".repeat(100);
        assert!(validate(&form(&title, "World", "ios")).is_ok());
    }

    #[test]
    fn test_message_length_bounds() {
        let err = validate(&form("Hello", "", "both")).unwrap_err();
        assert_eq!(err.kind("message"), Some(FieldErrorKind::Required));
        assert_eq!(err.get("message").unwrap().message, "Message is required");

        assert!(validate(&form("Hello", &"m".repeat(500), "both")).is_ok());

        let err = validate(&form("Hello", &"m".repeat(501), "both")).unwrap_err();
        assert_eq!(err.kind("message"), Some(FieldErrorKind::TooLong { max: 500 }));
        assert_eq!(
            err.get("message").unwrap().message,
            "Message must be 500 characters or less"
        );
    }

    #[test]
    fn test_platform_must_be_known() {
        for platform in ["", "windows", "IOS"] {
            let err = validate(&form("Hello", "World", platform)).unwrap_err();
            assert_eq!(err.kind("platform"), Some(FieldErrorKind::Required));
            assert_eq!(err.get("platform").unwrap().message, PLATFORM_REQUIRED);
        }
    }

    #[test]
    fn test_badge_count_digits_only() {
        for ok in ["", "0", "7", "12345"] {
            let mut input = form("Hello", "World", "ios");
            input.badge_count = Some(ok.to_string());
            assert!(validate(&input).is_ok(), "{ok:?} should pass");
        }

        for bad in ["a", "1a", "-1", "1.5", " 3", "٣"] {
            let mut input = form("Hello", "World", "ios");
            input.badge_count = Some(bad.to_string());
            let err = validate(&input).unwrap_err();
            assert_eq!(err.kind("badgeCount"), Some(FieldErrorKind::Format), "{bad:?}");
        }
    }

    #[test]
    fn test_optional_text_limits() {
        let mut input = form("Hello", "World", "both");
        input.subtitle = Some("s".repeat(101));
        input.channel_id = Some("c".repeat(101));

        let err = validate(&input).unwrap_err();
        assert_eq!(err.kind("subtitle"), Some(FieldErrorKind::TooLong { max: 100 }));
        assert_eq!(err.kind("channelId"), Some(FieldErrorKind::TooLong { max: 100 }));
    }

    #[test]
    fn test_reports_every_failing_field() {
        let mut input = form("", "", "");
        input.badge_count = Some("x".to_string());

        let err = validate(&input).unwrap_err();
        assert_eq!(err.len(), 4);
        assert!(err.get("title").is_some());
        assert!(err.get("message").is_some());
        assert!(err.get("platform").is_some());
        assert!(err.get("badgeCount").is_some());
    }

    #[test]
    fn test_hidden_fields_are_still_validated() {
        let mut input = form("Hello", "World", "android");
        input.subtitle = Some("s".repeat(101));

        let err = validate(&input).unwrap_err();
        assert_eq!(err.kind("subtitle"), Some(FieldErrorKind::TooLong { max: 100 }));
    }

    #[test]
    fn test_normalizes_empty_optionals() {
        let input = NotificationForm {
            title: "Hello".to_string(),
            message: "World".to_string(),
            ..NotificationForm::default()
        };

        let request = validate(&input).unwrap();
        assert_eq!(request.platform, Platform::Both);
        assert_eq!(request.subtitle, None);
        assert_eq!(request.badge_count, None);
        assert_eq!(request.channel_id, None);
        assert_eq!(request.play_sound, Some(false));
    }

    #[test]
    fn test_visible_groups() {
        assert_eq!(visible_groups(Platform::Ios), BTreeSet::from([FieldGroup::Ios]));
        assert_eq!(visible_groups(Platform::Android), BTreeSet::from([FieldGroup::Android]));
        assert_eq!(
            visible_groups(Platform::Both),
            BTreeSet::from([FieldGroup::Ios, FieldGroup::Android])
        );
    }

    #[test]
    fn test_without_hidden_fields() {
        let request = NotificationRequest {
            title: "Hello".to_string(),
            message: "World".to_string(),
            platform: Platform::Android,
            subtitle: Some("sub".to_string()),
            badge_count: Some("3".to_string()),
            play_sound: Some(true),
            channel_id: Some("alerts".to_string()),
        };

        let stripped = request.clone().without_hidden_fields();
        assert_eq!(stripped.subtitle, None);
        assert_eq!(stripped.badge_count, None);
        assert_eq!(stripped.play_sound, None);
        assert_eq!(stripped.channel_id.as_deref(), Some("alerts"));

        let both = NotificationRequest {
            platform: Platform::Both,
            ..request
        };
        assert_eq!(both.clone().without_hidden_fields(), both);
    }

    #[test]
    fn test_null_and_mistyped_json_become_field_errors() {
        let input: NotificationForm = serde_json::from_value(serde_json::json!({
            "title": null,
            "message": "World",
            "platform": null,
            "badgeCount": true,
            "subtitle": null,
        }))
        .unwrap();

        assert_eq!(input.title, "");
        assert_eq!(input.subtitle, None);
        let err = validate(&input).unwrap_err();
        assert_eq!(err.kind("title"), Some(FieldErrorKind::Required));
        assert_eq!(err.kind("platform"), Some(FieldErrorKind::Required));
        assert_eq!(err.kind("badgeCount"), Some(FieldErrorKind::Format));
        assert_eq!(err.len(), 3);
    }

    #[test]
    fn test_numeric_badge_count_is_accepted() {
        let input: NotificationForm = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "message": "World",
            "platform": "ios",
            "badgeCount": 5,
        }))
        .unwrap();

        let request = validate(&input).unwrap();
        assert_eq!(request.badge_count.as_deref(), Some("5"));
    }

    #[test]
    fn test_platform_round_trips_through_str() {
        for platform in [Platform::Ios, Platform::Android, Platform::Both] {
            assert_eq!(platform.as_str().parse::<Platform>(), Ok(platform));
        }
    }
}
