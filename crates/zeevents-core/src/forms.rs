//! The site's form catalogue
//!
//! One schema per form: the combined auth screen (sign-up, sign-in,
//! admin login), the client intake and proposal request steps, the
//! contact form, and the control-panel forms (page editor, media,
//! password change). Schemas are built once and shared.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::{FieldKind, FieldSpec, FormSchema, Rule};

/// Mobile number rule: 7 to 15 digits
pub const PHONE_PATTERN: &str = r"\d{7,15}";

/// Currency rule: digits with an optional two-decimal fraction
pub const CURRENCY_PATTERN: &str = r"\d+(\.\d{1,2})?";

/// Loose email shape; the auth service performs the authoritative check
pub const EMAIL_PATTERN: &str = r"[^@\s]+@[^@\s]+\.[^@\s]+";

/// Country codes offered by the intake form's select
pub const COUNTRY_CODES: [(&str, &str); 10] = [
    ("+1", "USA"),
    ("+44", "UK"),
    ("+91", "India"),
    ("+61", "Australia"),
    ("+49", "Germany"),
    ("+33", "France"),
    ("+81", "Japan"),
    ("+86", "China"),
    ("+55", "Brazil"),
    ("+27", "South Africa"),
];

/// Identifies one of the site's forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    SignUp,
    SignIn,
    AdminLogin,
    ClientInfo,
    Contact,
    ProposalRequest,
    PageEditor,
    PageDelete,
    MediaUpload,
    MediaDelete,
    PasswordChange,
}

impl FormKind {
    pub const ALL: [FormKind; 11] = [
        FormKind::SignUp,
        FormKind::SignIn,
        FormKind::AdminLogin,
        FormKind::ClientInfo,
        FormKind::Contact,
        FormKind::ProposalRequest,
        FormKind::PageEditor,
        FormKind::PageDelete,
        FormKind::MediaUpload,
        FormKind::MediaDelete,
        FormKind::PasswordChange,
    ];

    /// The shared, immutable schema for this form
    pub fn schema(self) -> Arc<FormSchema> {
        SCHEMAS
            .get(&self)
            .cloned()
            .unwrap_or_else(|| unreachable!("schema registered for every FormKind"))
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FormKind::SignUp => "sign_up",
            FormKind::SignIn => "sign_in",
            FormKind::AdminLogin => "admin_login",
            FormKind::ClientInfo => "client_info",
            FormKind::Contact => "contact",
            FormKind::ProposalRequest => "proposal_request",
            FormKind::PageEditor => "page_editor",
            FormKind::PageDelete => "page_delete",
            FormKind::MediaUpload => "media_upload",
            FormKind::MediaDelete => "media_delete",
            FormKind::PasswordChange => "password_change",
        };
        write!(f, "{}", name)
    }
}

lazy_static! {
    static ref SCHEMAS: HashMap<FormKind, Arc<FormSchema>> = {
        let mut map = HashMap::new();
        for kind in FormKind::ALL {
            map.insert(kind, Arc::new(build_schema(kind)));
        }
        map
    };
}

fn country_code_options() -> Vec<String> {
    COUNTRY_CODES.iter().map(|(code, _)| code.to_string()).collect()
}

fn build_schema(kind: FormKind) -> FormSchema {
    let schema = match kind {
        FormKind::SignUp => FormSchema::builder("sign_up")
            .field(
                FieldSpec::new("fullName", FieldKind::Text)
                    .with_label("Full Name")
                    .with_rule(Rule::required())
                    .with_rule(Rule::min_length(2).with_message(
                        "Full Name is required and must be at least 2 characters.",
                    )),
            )
            .field(
                FieldSpec::new("email", FieldKind::Email)
                    .with_label("Email Address")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::pattern(EMAIL_PATTERN)
                            .with_message("Please enter a valid email address."),
                    ),
            )
            .field(
                FieldSpec::new("mobileCountryCode", FieldKind::Select)
                    .with_label("Country Code")
                    .with_default("+1")
                    .with_rule(Rule::required().with_message("Please select a country code."))
                    .with_rule(Rule::one_of(country_code_options())),
            )
            .field(
                FieldSpec::new("mobileNumber", FieldKind::Text)
                    .with_label("Mobile Number")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::pattern(PHONE_PATTERN)
                            .with_message("Please enter a valid mobile number (7-15 digits)."),
                    ),
            )
            .field(
                FieldSpec::new("password", FieldKind::Password)
                    .with_label("Password")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::min_length(8)
                            .with_message("Password must be at least 8 characters."),
                    ),
            )
            .build(),

        FormKind::SignIn => FormSchema::builder("sign_in")
            .field(
                FieldSpec::new("email", FieldKind::Email)
                    .with_label("Email Address")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::pattern(EMAIL_PATTERN)
                            .with_message("Please enter a valid email address."),
                    ),
            )
            .field(
                FieldSpec::new("password", FieldKind::Password)
                    .with_label("Password")
                    .with_rule(Rule::required()),
            )
            .build(),

        FormKind::AdminLogin => FormSchema::builder("admin_login")
            .field(
                FieldSpec::new("username", FieldKind::Text)
                    .with_label("Username")
                    .with_rule(Rule::required()),
            )
            .field(
                FieldSpec::new("password", FieldKind::Password)
                    .with_label("Password")
                    .with_rule(Rule::required()),
            )
            .build(),

        FormKind::ClientInfo => FormSchema::builder("client_info")
            .field(
                FieldSpec::new("fullName", FieldKind::Text)
                    .with_label("Full Name")
                    .with_rule(Rule::required())
                    .with_rule(Rule::min_length(2).with_message(
                        "Full Name is required and must be at least 2 characters.",
                    )),
            )
            .field(
                FieldSpec::new("emailAddress", FieldKind::Email)
                    .with_label("Email Address")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::pattern(EMAIL_PATTERN)
                            .with_message("Please enter a valid email address."),
                    ),
            )
            .field(
                FieldSpec::new("mobileCountryCode", FieldKind::Select)
                    .with_label("Country Code")
                    .with_default("+1")
                    .with_rule(Rule::required().with_message("Please select a country code."))
                    .with_rule(Rule::one_of(country_code_options())),
            )
            .field(
                FieldSpec::new("mobileNumber", FieldKind::Text)
                    .with_label("Mobile Number")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::pattern(PHONE_PATTERN)
                            .with_message("Please enter a valid mobile number (7-15 digits)."),
                    ),
            )
            .build(),

        FormKind::Contact => FormSchema::builder("contact")
            .field(
                FieldSpec::new("name", FieldKind::Text)
                    .with_label("Full Name")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::min_length(2)
                            .with_message("Name must be at least 2 characters."),
                    ),
            )
            .field(
                FieldSpec::new("email", FieldKind::Email)
                    .with_label("Email Address")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::pattern(EMAIL_PATTERN)
                            .with_message("Please enter a valid email address."),
                    ),
            )
            .field(
                FieldSpec::new("message", FieldKind::LongText)
                    .with_label("Your Message")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::min_length(10)
                            .with_message("Message must be at least 10 characters."),
                    ),
            )
            .build(),

        FormKind::ProposalRequest => FormSchema::builder("proposal_request")
            .field(
                FieldSpec::new("weddingDate", FieldKind::Date)
                    .with_label("Wedding Date")
                    .with_rule(Rule::required()),
            )
            .field(
                FieldSpec::new("guestCount", FieldKind::Number)
                    .with_label("Guest Count")
                    .with_rule(Rule::required())
                    .with_rule(Rule::numeric()),
            )
            .field(
                FieldSpec::new("budget", FieldKind::Number)
                    .with_label("Budget")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::pattern(CURRENCY_PATTERN)
                            .with_message("Please enter a valid amount (e.g. 25000 or 25000.50)."),
                    ),
            )
            .field(
                FieldSpec::new("preferredServices", FieldKind::LongText)
                    .with_label("Preferred Services")
                    .with_rule(Rule::required()),
            )
            .field(FieldSpec::new("notes", FieldKind::LongText).with_label("Notes"))
            .build(),

        FormKind::PageEditor => FormSchema::builder("page_editor")
            .field(
                FieldSpec::new("title", FieldKind::Text)
                    .with_label("Title")
                    .with_rule(Rule::required())
                    .with_rule(Rule::max_length(120)),
            )
            .field(
                FieldSpec::new("content", FieldKind::LongText)
                    .with_label("Content")
                    .with_rule(Rule::required()),
            )
            .build(),

        FormKind::PageDelete => FormSchema::builder("page_delete")
            .field(
                FieldSpec::new("pageId", FieldKind::Text)
                    .with_label("Page")
                    .with_rule(Rule::required()),
            )
            .build(),

        FormKind::MediaUpload => FormSchema::builder("media_upload")
            .field(
                FieldSpec::new("fileName", FieldKind::Text)
                    .with_label("File Name")
                    .with_rule(Rule::required())
                    .with_rule(Rule::max_length(200)),
            )
            .build(),

        FormKind::MediaDelete => FormSchema::builder("media_delete")
            .field(
                FieldSpec::new("path", FieldKind::Text)
                    .with_label("File")
                    .with_rule(Rule::required()),
            )
            .build(),

        FormKind::PasswordChange => FormSchema::builder("password_change")
            .field(
                FieldSpec::new("currentPassword", FieldKind::Password)
                    .with_label("Current Password")
                    .with_rule(Rule::required().with_message("Current password is required.")),
            )
            .field(
                FieldSpec::new("newPassword", FieldKind::Password)
                    .with_label("New Password")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::min_length(8)
                            .with_message("New password must be at least 8 characters."),
                    ),
            )
            .field(
                FieldSpec::new("confirmNewPassword", FieldKind::Password)
                    .with_label("Confirm New Password")
                    .with_rule(Rule::required().with_message("Please confirm your new password."))
                    .with_rule(
                        Rule::min_length(8)
                            .with_message("Please confirm your new password."),
                    )
                    .with_rule(
                        Rule::equals_field("newPassword")
                            .with_message("New passwords do not match."),
                    ),
            )
            .build(),
    };

    match schema {
        Ok(schema) => schema,
        Err(e) => unreachable!("built-in schema '{}' is valid: {}", kind, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;
    use std::collections::HashMap;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_every_form_kind_has_a_schema() {
        for kind in FormKind::ALL {
            let schema = kind.schema();
            assert!(!schema.fields().is_empty(), "{} has no fields", kind);
        }
    }

    #[test]
    fn test_schemas_are_shared() {
        let a = FormKind::Contact.schema();
        let b = FormKind::Contact.schema();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_sign_up_happy_path() {
        let schema = FormKind::SignUp.schema();
        let result = validate(
            &schema,
            &values(&[
                ("fullName", "Jane Doe"),
                ("email", "jane@x.com"),
                ("mobileCountryCode", "+1"),
                ("mobileNumber", "5551234567"),
                ("password", "password1"),
            ]),
        );
        assert!(result.is_valid, "errors: {:?}", result.field_errors);
    }

    #[test]
    fn test_sign_up_catches_bad_email() {
        let schema = FormKind::SignUp.schema();
        let result = validate(
            &schema,
            &values(&[
                ("fullName", "Jane Doe"),
                ("email", "not-an-email"),
                ("mobileCountryCode", "+1"),
                ("mobileNumber", "5551234567"),
                ("password", "password1"),
            ]),
        );
        assert_eq!(
            result.error_for("email"),
            Some("Please enter a valid email address.")
        );
    }

    #[test]
    fn test_client_info_defaults_to_usa_code() {
        let schema = FormKind::ClientInfo.schema();
        assert_eq!(schema.field("mobileCountryCode").unwrap().default, "+1");
    }

    #[test]
    fn test_proposal_budget_currency_shapes() {
        let schema = FormKind::ProposalRequest.schema();
        let base = [
            ("weddingDate", "2027-06-12"),
            ("guestCount", "120"),
            ("preferredServices", "Full planning"),
        ];

        for (budget, ok) in [("25000", true), ("25000.50", true), ("25,000", false), ("25000.123", false)] {
            let mut vals = base.to_vec();
            vals.push(("budget", budget));
            let result = validate(&schema, &values(&vals));
            assert_eq!(result.is_valid, ok, "budget {:?}", budget);
        }
    }

    #[test]
    fn test_proposal_notes_are_optional() {
        let schema = FormKind::ProposalRequest.schema();
        let result = validate(
            &schema,
            &values(&[
                ("weddingDate", "2027-06-12"),
                ("guestCount", "120"),
                ("budget", "25000"),
                ("preferredServices", "Venue, catering"),
            ]),
        );
        assert!(result.is_valid);
    }

    #[test]
    fn test_password_change_mismatch() {
        let schema = FormKind::PasswordChange.schema();
        let result = validate(
            &schema,
            &values(&[
                ("currentPassword", "admin"),
                ("newPassword", "abcdefgh"),
                ("confirmNewPassword", "abcdefg1"),
            ]),
        );
        assert_eq!(
            result.error_for("confirmNewPassword"),
            Some("New passwords do not match.")
        );
    }
}
