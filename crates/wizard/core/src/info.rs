//! License and security-contact metadata.

use crate::contract::ContractBuilder;
use serde::{Deserialize, Serialize};

const SECURITY_CONTACT_TAG: &str = "@custom:security-contact";

/// Metadata options common to every standard.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Info {
    pub security_contact: String,
    pub license: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            security_contact: String::new(),
            license: "MIT".to_string(),
        }
    }
}

/// Metadata alternatives used when enumerating option spaces.
pub fn info_options() -> Vec<Info> {
    vec![
        Info::default(),
        Info {
            security_contact: "security@example.com".to_string(),
            license: "WTFPL".to_string(),
        },
    ]
}

/// Annotate the contract. Runs last; never touches members.
pub fn set_info(c: &mut ContractBuilder, info: &Info) {
    if !info.security_contact.is_empty() {
        c.add_natspec_tag(SECURITY_CONTACT_TAG, info.security_contact.as_str());
    }
    if !info.license.is_empty() {
        c.set_license(info.license.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_info_keeps_mit_and_adds_no_tag() {
        let mut c = ContractBuilder::new("MyToken");
        set_info(&mut c, &Info::default());
        let contract = c.build();
        assert_eq!(contract.license(), "MIT");
        assert!(contract.natspec_tags().is_empty());
    }

    #[test]
    fn security_contact_becomes_natspec() {
        let mut c = ContractBuilder::new("MyToken");
        set_info(&mut c, &info_options()[1]);
        let contract = c.build();
        assert_eq!(contract.license(), "WTFPL");
        assert_eq!(contract.natspec_tags()[0].key, SECURITY_CONTACT_TAG);
        assert_eq!(contract.natspec_tags()[0].value, "security@example.com");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let info: Info = serde_json::from_str(r#"{"securityContact":"a@b.c"}"#).unwrap();
        assert_eq!(info.license, "MIT");
    }
}
