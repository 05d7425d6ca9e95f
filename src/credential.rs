//! Credential codec.
//!
//! Reads the claims segment of a three-part bearer token without checking its
//! signature. The answer is "what the token claims", never "whether the token is
//! valid": the backend re-validates every request.

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde_json::{Map, Value};

/// Claim key holding the role list.
pub const ROLES_CLAIM: &str = "roles";

/// Role that grants access to the console.
pub const ADMIN_ROLE: &str = "ADMIN";

// Token issuers are inconsistent about padding and some emit trailing bits.
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Claims
///
/// The decoded payload of a credential, kept as a raw JSON object so unknown claims
/// survive untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The `sub` claim, when it is a string.
    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    /// Roles asserted under the `roles` claim. Anything other than an array yields an
    /// empty set; non-string entries are skipped.
    pub fn roles(&self) -> RoleSet {
        match self.get(ROLES_CLAIM) {
            Some(Value::Array(items)) => RoleSet(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            _ => RoleSet::default(),
        }
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// RoleSet
///
/// Ordered role identifiers taken from a credential's claims.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleSet(Vec<String>);

impl RoleSet {
    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.contains(ADMIN_ROLE)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// decode
///
/// Total function: any malformed input (missing segment, bad base64, invalid UTF-8,
/// payload that is not a JSON object) yields `None`.
///
/// The payload bytes are decoded as UTF-8 before parsing, so multi-byte characters in
/// claim values come through intact.
pub fn decode(credential: &str) -> Option<Claims> {
    let payload = credential.split('.').nth(1).filter(|segment| !segment.is_empty())?;

    let normalized: String = payload
        .trim()
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = LENIENT_URL_SAFE.decode(normalized.as_bytes()).ok()?;
    let text = String::from_utf8(bytes).ok()?;

    serde_json::from_str::<Map<String, Value>>(&text)
        .ok()
        .map(Claims)
}

/// Role set of a credential; empty when it cannot be decoded.
pub fn roles_of(credential: &str) -> RoleSet {
    decode(credential).map(|claims| claims.roles()).unwrap_or_default()
}

/// Whether the credential claims the administrator role. Always false for an empty
/// credential.
pub fn is_admin_credential(credential: &str) -> bool {
    !credential.is_empty() && roles_of(credential).is_admin()
}
