use crate::{
    patch::Patch,
    rules::{self, PHONE_NUMBER, check_patch, trimmed, trimmed_patch},
};
use app_schema::customer::Customer;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CustomerCreate {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(regex(path = *PHONE_NUMBER))]
    pub phone_number: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub address: String,
}

/// Body of `PUT /customers/{id}`; only supplied keys are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerPatch {
    #[serde(default, deserialize_with = "trimmed_patch")]
    pub name: Patch<String>,
    #[serde(default)]
    pub phone_number: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub address: Patch<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_missing()
            && self.phone_number.is_missing()
            && self.email.is_missing()
            && self.address.is_missing()
    }

    pub fn apply(self, customer: &mut Customer) {
        self.name.merge_into(&mut customer.name);
        self.phone_number.merge_into(&mut customer.phone_number);
        self.email.merge_into(&mut customer.email);
        self.address.merge_into(&mut customer.address);
    }
}

impl Validate for CustomerPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_patch(&mut errors, "name", &self.name, rules::name);
        check_patch(&mut errors, "phone_number", &self.phone_number, rules::phone_number);
        check_patch(&mut errors, "email", &self.email, rules::email);
        check_patch(&mut errors, "address", &self.address, rules::address);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn stored() -> Customer {
        Customer {
            customer_id: 7,
            name: "Asha Rao".to_owned(),
            phone_number: "9876543210".to_owned(),
            email: "asha@example.com".to_owned(),
            address: "12 MG Road".to_owned(),
        }
    }

    #[test]
    fn create_trims_and_validates() {
        let input: CustomerCreate = serde_json::from_value(json!({
            "name": "  Asha Rao ",
            "phone_number": "9876543210",
            "email": "asha@example.com",
            "address": "12 MG Road"
        }))
        .unwrap();
        assert_eq!(input.name, "Asha Rao");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn create_rejects_bad_fields() {
        let input: CustomerCreate = serde_json::from_value(json!({
            "name": "   ",
            "phone_number": "12345",
            "email": "nope",
            "address": "a".repeat(201)
        }))
        .unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "phone_number", "email", "address"] {
            assert!(fields.contains_key(field), "{field} should fail");
        }
    }

    #[test]
    fn email_only_patch_touches_email() {
        let patch: CustomerPatch = serde_json::from_value(json!({"email": "new@x.com"})).unwrap();
        assert!(patch.validate().is_ok());
        let mut customer = stored();
        patch.apply(&mut customer);
        assert_eq!(customer.email, "new@x.com");
        assert_eq!(customer.name, "Asha Rao");
        assert_eq!(customer.phone_number, "9876543210");
        assert_eq!(customer.address, "12 MG Road");
    }

    #[test]
    fn null_field_is_rejected() {
        let patch: CustomerPatch = serde_json::from_value(json!({"name": null})).unwrap();
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn empty_address_is_a_value() {
        let patch: CustomerPatch = serde_json::from_value(json!({"address": ""})).unwrap();
        assert!(patch.validate().is_ok());
        let mut customer = stored();
        patch.apply(&mut customer);
        assert_eq!(customer.address, "");
    }

    #[test]
    fn identity_cannot_be_patched() {
        let result = serde_json::from_value::<CustomerPatch>(json!({"customer_id": 9}));
        assert!(result.is_err());
    }

    #[test]
    fn empty_patch() {
        let patch: CustomerPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.is_empty());
    }
}
